//! Loading the serialized model artifact.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use sha2::{Digest, Sha256};
use thiserror::Error;

use super::{ModelHandle, Regressor, gbdt::GbdtRegressor};
use crate::form::FIELD_COUNT;

/// Artifact filename looked up in the working directory by default.
pub const DEFAULT_MODEL_FILE: &str = "gbtboost.json";
/// Environment variable that overrides the configured artifact path.
pub const MODEL_PATH_ENV: &str = "MBPREDICT_MODEL";

/// Errors that make the model artifact unusable.
#[derive(Debug, Error)]
pub enum ModelLoadError {
    #[error("Model artifact not found at {path}")]
    Missing { path: PathBuf },
    #[error("Failed to read model artifact {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Model artifact {path} failed checksum: expected {expected}, found {actual}")]
    Checksum {
        path: PathBuf,
        expected: String,
        actual: String,
    },
    #[error("Model artifact {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Model artifact {path} is corrupt: {reason}")]
    Invalid { path: PathBuf, reason: String },
}

/// Resolve the artifact path, letting `MBPREDICT_MODEL` win over `configured`.
pub fn resolve_model_path(configured: &Path) -> PathBuf {
    std::env::var_os(MODEL_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| configured.to_path_buf())
}

/// Read, verify and validate the model at `path`.
///
/// `expected_sha256` is a hex digest; when given, the file bytes must match
/// it before anything is parsed.
pub fn load_model(
    path: &Path,
    expected_sha256: Option<&str>,
) -> Result<ModelHandle, ModelLoadError> {
    if !path.is_file() {
        return Err(ModelLoadError::Missing {
            path: path.to_path_buf(),
        });
    }
    let bytes = std::fs::read(path).map_err(|source| ModelLoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    if let Some(expected) = expected_sha256 {
        verify_sha256(path, &bytes, expected)?;
    }
    let model: GbdtRegressor =
        serde_json::from_slice(&bytes).map_err(|source| ModelLoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    let invalid = |reason: String| ModelLoadError::Invalid {
        path: path.to_path_buf(),
        reason,
    };
    if model.feature_len != FIELD_COUNT {
        return Err(invalid(format!(
            "expects {} features but the form provides {FIELD_COUNT}",
            model.feature_len
        )));
    }
    model.validate().map_err(invalid)?;
    tracing::info!("Loaded model {} from {}", model.describe(), path.display());
    Ok(Arc::new(model))
}

fn verify_sha256(path: &Path, bytes: &[u8], expected: &str) -> Result<(), ModelLoadError> {
    let actual = hex_digest(&Sha256::digest(bytes));
    let expected = expected.trim().to_ascii_lowercase();
    if actual != expected {
        return Err(ModelLoadError::Checksum {
            path: path.to_path_buf(),
            expected,
            actual,
        });
    }
    Ok(())
}

fn hex_digest(bytes: &[u8]) -> String {
    bytes.iter().map(|byte| format!("{byte:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FeatureVector;
    use tempfile::tempdir;

    const MODEL_JSON: &str = r#"{
        "model_version": 1,
        "feature_len": 6,
        "learning_rate": 0.5,
        "init_value": 60.0,
        "trees": [
            {"nodes": [
                {"kind": "split", "feature": 5, "threshold": 7.5, "left": 1, "right": 2},
                {"kind": "leaf", "value": 20.0},
                {"kind": "leaf", "value": -20.0}
            ]}
        ]
    }"#;

    #[test]
    fn loads_and_predicts() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_MODEL_FILE);
        std::fs::write(&path, MODEL_JSON).unwrap();
        let model = load_model(&path, None).unwrap();
        let result = crate::ml::predict(model.as_ref(), &FeatureVector::default()).unwrap();
        assert_eq!(result.percent, 70.0);
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempdir().unwrap();
        let err = load_model(&dir.path().join("absent.json"), None).err().unwrap();
        assert!(matches!(err, ModelLoadError::Missing { .. }));
    }

    #[test]
    fn garbage_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, b"\x80\x04pickle").unwrap();
        let err = load_model(&path, None).err().unwrap();
        assert!(matches!(err, ModelLoadError::Parse { .. }));
    }

    #[test]
    fn wrong_feature_count_is_invalid() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, MODEL_JSON.replace("\"feature_len\": 6", "\"feature_len\": 7"))
            .unwrap();
        let err = load_model(&path, None).err().unwrap();
        assert!(matches!(err, ModelLoadError::Invalid { .. }));
    }

    #[test]
    fn checksum_must_match_when_configured() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, MODEL_JSON).unwrap();
        let digest = hex_digest(&Sha256::digest(MODEL_JSON.as_bytes()));

        assert!(load_model(&path, Some(&digest.to_uppercase())).is_ok());
        let err = load_model(&path, Some("00ff")).err().unwrap();
        assert!(matches!(err, ModelLoadError::Checksum { .. }));
    }
}
