//! Persisted application settings stored in `config.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize, de::Error as SerdeDeError};
use thiserror::Error;

use crate::{app_dirs, i18n::Language, ml::DEFAULT_MODEL_FILE};

/// Default filename used to store the app configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Settings loaded from the TOML file; every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub model: ModelSettings,
    #[serde(default)]
    pub ui: UiSettings,
    #[serde(default)]
    pub export: ExportSettings,
}

/// Where the model artifact lives and how to verify it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSettings {
    /// Artifact path; relative paths resolve against the working directory.
    #[serde(default = "default_model_path")]
    pub path: PathBuf,
    /// Optional hex SHA-256 the artifact must match.
    #[serde(default)]
    pub sha256: Option<String>,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            path: default_model_path(),
            sha256: None,
        }
    }
}

/// Presentation preferences.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UiSettings {
    /// Language selected at startup.
    #[serde(default)]
    pub language: Language,
    /// Font file with CJK glyphs, installed as a fallback font.
    #[serde(default)]
    pub cjk_font: Option<PathBuf>,
}

/// CSV export preferences.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportSettings {
    /// Initial directory of the save dialog.
    #[serde(default)]
    pub directory: Option<PathBuf>,
    /// Replaces the localized result column header when set.
    #[serde(default)]
    pub result_header: Option<String>,
}

fn default_model_path() -> PathBuf {
    PathBuf::from(DEFAULT_MODEL_FILE)
}

/// Errors that may occur while loading or saving app configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unable to create config directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config at {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Failed to serialize config to TOML at {path}: {source}")]
    SerializeToml {
        path: PathBuf,
        source: toml::ser::Error,
    },
    #[error("No suitable config directory found")]
    NoConfigDir,
}

/// Resolve the configuration file path, ensuring the parent directory exists.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    let dir = app_dirs::app_root_dir().map_err(map_app_dir_error)?;
    Ok(dir.join(CONFIG_FILE_NAME))
}

/// Load configuration from disk, returning defaults if the file is missing.
pub fn load_or_default() -> Result<AppConfig, ConfigError> {
    load_from(&config_path()?)
}

/// Load configuration from a specific file, returning defaults if missing.
pub fn load_from(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let bytes = std::fs::read(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8(bytes).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source: SerdeDeError::custom(source),
    })?;
    toml::from_str(&text).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Persist configuration to the default location.
pub fn save(config: &AppConfig) -> Result<(), ConfigError> {
    save_to_path(config, &config_path()?)
}

/// Save configuration to a specific path, creating parent directories as needed.
pub fn save_to_path(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let text = toml::to_string_pretty(config).map_err(|source| ConfigError::SerializeToml {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, text).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn map_app_dir_error(error: app_dirs::AppDirError) -> ConfigError {
    match error {
        app_dirs::AppDirError::NoBaseDir => ConfigError::NoConfigDir,
        app_dirs::AppDirError::CreateDir { path, source } => {
            ConfigError::CreateDir { path, source }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let cfg = load_from(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.model.path, PathBuf::from("gbtboost.json"));
        assert_eq!(cfg.ui.language, Language::English);
    }

    #[test]
    fn partial_file_fills_remaining_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            "[ui]\nlanguage = \"chinese\"\n\n[export]\nresult_header = \"degradation (%)\"\n",
        )
        .unwrap();
        let cfg = load_from(&path).unwrap();
        assert_eq!(cfg.ui.language, Language::Chinese);
        assert_eq!(cfg.export.result_header.as_deref(), Some("degradation (%)"));
        assert_eq!(cfg.model, ModelSettings::default());
    }

    #[test]
    fn saved_settings_load_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);
        let cfg = AppConfig {
            model: ModelSettings {
                path: PathBuf::from("/models/mb.json"),
                sha256: Some("abc123".into()),
            },
            ui: UiSettings {
                language: Language::Chinese,
                cjk_font: None,
            },
            export: ExportSettings::default(),
        };
        save_to_path(&cfg, &path).unwrap();
        assert_eq!(load_from(&path).unwrap(), cfg);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[ui]\nlanguage = \"klingon\"\n").unwrap();
        assert!(matches!(
            load_from(&path),
            Err(ConfigError::ParseToml { .. })
        ));
    }
}
