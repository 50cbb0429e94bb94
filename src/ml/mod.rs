//! Regression inference for degradation prediction.
//!
//! The model is produced by an external training process and only consumed
//! here. [`load_model`] reads it once at startup and hands back a shared,
//! read-only [`ModelHandle`].

mod artifact;
pub mod gbdt;

pub use artifact::{
    DEFAULT_MODEL_FILE, MODEL_PATH_ENV, ModelLoadError, load_model, resolve_model_path,
};

use std::sync::Arc;

use thiserror::Error;

use crate::form::FeatureVector;

/// Errors raised while evaluating a model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictError {
    /// A row had a different number of features than the model expects.
    #[error("Expected {expected} features per row but row {row} has {actual}")]
    FeatureCount {
        row: usize,
        expected: usize,
        actual: usize,
    },
    /// The model returned a different number of outputs than rows given.
    #[error("Model returned {actual} outputs for {expected} input rows")]
    OutputCount { expected: usize, actual: usize },
    /// The model produced NaN or an infinity.
    #[error("Model produced a non-finite prediction ({0})")]
    NonFinite(f64),
}

/// A trained regressor that maps feature rows to scalar predictions.
pub trait Regressor {
    /// Predict one value per row.
    fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>, PredictError>;

    /// Short description for logs.
    fn describe(&self) -> String {
        "regressor".to_string()
    }
}

/// Shared read-only handle to the loaded model.
pub type ModelHandle = Arc<dyn Regressor + Send + Sync>;

/// Predicted degradation in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionResult {
    pub percent: f64,
}

impl PredictionResult {
    /// Result rounded to two decimals, as exported.
    ///
    /// Goes through the same `{:.2}` formatting as the displayed result so the
    /// exported value always matches what was shown.
    pub fn rounded(&self) -> f64 {
        format!("{:.2}", self.percent)
            .parse()
            .unwrap_or(self.percent)
    }
}

/// Run the model on a single `(1, 6)` batch built from `features`.
pub fn predict(
    model: &dyn Regressor,
    features: &FeatureVector,
) -> Result<PredictionResult, PredictError> {
    let rows = vec![features.as_array().to_vec()];
    let outputs = model.predict(&rows)?;
    let &[percent] = outputs.as_slice() else {
        return Err(PredictError::OutputCount {
            expected: 1,
            actual: outputs.len(),
        });
    };
    if !percent.is_finite() {
        return Err(PredictError::NonFinite(percent));
    }
    Ok(PredictionResult { percent })
}

/// Check that every row carries exactly the model's feature count.
pub(crate) fn check_rows(rows: &[Vec<f64>], expected: usize) -> Result<(), PredictError> {
    for (row, values) in rows.iter().enumerate() {
        if values.len() != expected {
            return Err(PredictError::FeatureCount {
                row,
                expected,
                actual: values.len(),
            });
        }
    }
    Ok(())
}
