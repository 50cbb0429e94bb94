//! Helpers to convert domain data into egui-facing view structs.

use crate::egui_app::state::{DownloadOffer, InputView};
use crate::form::{FeatureVector, Field};
use crate::i18n::LabelBundle;
use crate::ml::PredictionResult;

/// Build the input rows for the current snapshot and language.
pub fn input_rows(inputs: &FeatureVector, labels: &'static LabelBundle) -> Vec<InputView> {
    Field::ALL
        .iter()
        .map(|&field| InputView {
            field,
            label: labels.input_labels[field.index()],
            value: inputs.get(field),
            spec: field.spec(),
        })
        .collect()
}

/// Result line for a successful prediction.
pub fn result_text(result: &PredictionResult, labels: &LabelBundle) -> String {
    labels.format_result(result.percent)
}

/// Download button for the current language.
pub fn download_offer(labels: &'static LabelBundle) -> DownloadOffer {
    DownloadOffer {
        label: labels.button_export,
        file_name: labels.file_name.to_string(),
    }
}
