//! One-row CSV export of the latest prediction.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::{
    form::{FeatureVector, Field},
    i18n::LabelBundle,
    ml::PredictionResult,
};

/// Errors raised while writing an export to disk.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to create export directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write export {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// CSV bytes plus the suggested file name for the current language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Build the CSV document for one prediction.
///
/// The header lists the six localized input labels followed by the result
/// column (`header_override` or `"<result prefix> (%)"`). The data row holds
/// the raw inputs and the result rounded to two decimals.
pub fn export_csv(
    features: &FeatureVector,
    result: &PredictionResult,
    labels: &LabelBundle,
    header_override: Option<&str>,
) -> CsvExport {
    let result_header = header_override
        .map(str::to_string)
        .unwrap_or_else(|| labels.result_header());
    let header = labels
        .input_labels
        .iter()
        .map(|label| escape_cell(label))
        .chain(std::iter::once(escape_cell(&result_header)))
        .collect::<Vec<_>>();
    let row = Field::ALL
        .iter()
        .map(|&field| format_number(features.get(field)))
        .chain(std::iter::once(format_number(result.rounded())))
        .collect::<Vec<_>>();

    let mut text = header.join(",");
    text.push('\n');
    text.push_str(&row.join(","));
    text.push('\n');
    CsvExport {
        file_name: labels.file_name.to_string(),
        bytes: text.into_bytes(),
    }
}

/// Write export bytes to `path`, creating missing parent directories.
pub fn write_export(path: &Path, export: &CsvExport) -> Result<(), ExportError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| ExportError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, &export.bytes).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!("Exported prediction to {}", path.display());
    Ok(())
}

/// Shortest round-trip formatting, always with a fractional part (`298.0`).
fn format_number(value: f64) -> String {
    format!("{value:?}")
}

fn escape_cell(cell: &str) -> String {
    if cell.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}
