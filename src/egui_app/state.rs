use crate::{
    form::{Field, FieldSpec},
    i18n::{LabelBundle, Language},
};

/// Everything the renderer needs for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FormView {
    pub language: Language,
    pub labels: &'static LabelBundle,
    /// Inputs in feature order.
    pub inputs: Vec<InputView>,
    /// Formatted result line; `None` until a prediction succeeds.
    pub result_text: Option<String>,
    /// Download offer; present only alongside a result.
    pub download: Option<DownloadOffer>,
    pub status: Option<StatusLine>,
}

/// One numeric input row.
#[derive(Clone, Debug, PartialEq)]
pub struct InputView {
    pub field: Field,
    pub label: &'static str,
    pub value: f64,
    pub spec: FieldSpec,
}

/// Export button caption and the file name it suggests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadOffer {
    pub label: &'static str,
    pub file_name: String,
}

/// Transient message shown under the form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub tone: StatusTone,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusTone {
    Info,
    Error,
}
