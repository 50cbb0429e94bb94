//! Prediction form controller.
//!
//! Each user action arrives as a [`FormEvent`], is applied synchronously and
//! yields a fresh [`FormView`]. The only carried state is the form snapshot
//! and, after a successful submit, the prediction for that snapshot.

use std::path::{Path, PathBuf};

use rfd::FileDialog;

use crate::config::AppConfig;
use crate::egui_app::state::{FormView, StatusLine, StatusTone};
use crate::egui_app::view_model;
use crate::export::{self, CsvExport, ExportError};
use crate::form::{FeatureVector, Field};
use crate::i18n::{LabelBundle, Language};
use crate::ml::{self, ModelHandle, PredictError, PredictionResult};

/// A discrete user action on the form.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FormEvent {
    SelectLanguage(Language),
    SetField(Field, f64),
    Predict,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Prediction {
    features: FeatureVector,
    result: PredictionResult,
}

/// Owns the model handle and the form state between frames.
pub struct PredictionController {
    model: ModelHandle,
    language: Language,
    inputs: FeatureVector,
    prediction: Option<Prediction>,
    status: Option<StatusLine>,
    result_header: Option<String>,
    export_dir: Option<PathBuf>,
}

impl PredictionController {
    /// Controller with default inputs and English labels.
    pub fn new(model: ModelHandle) -> Self {
        Self {
            model,
            language: Language::default(),
            inputs: FeatureVector::default(),
            prediction: None,
            status: None,
            result_header: None,
            export_dir: None,
        }
    }

    /// Controller seeded from persisted settings.
    pub fn from_config(model: ModelHandle, config: &AppConfig) -> Self {
        let mut controller = Self::new(model);
        controller.language = config.ui.language;
        controller.result_header = config.export.result_header.clone();
        controller.export_dir = config.export.directory.clone();
        controller
    }

    /// Apply one event and return the view for the next render.
    ///
    /// Prediction failures are returned as errors; the view after a failure
    /// shows no result and an error status.
    pub fn handle(&mut self, event: FormEvent) -> Result<FormView, PredictError> {
        self.status = None;
        match event {
            FormEvent::SelectLanguage(language) => {
                self.select_language(language);
            }
            FormEvent::SetField(field, value) => {
                self.set_field(field, value);
            }
            FormEvent::Predict => {
                self.predict()?;
            }
        }
        Ok(self.view())
    }

    /// Render-ready view of the current state.
    pub fn view(&self) -> FormView {
        let labels = self.labels();
        let result_text = self
            .prediction
            .map(|prediction| view_model::result_text(&prediction.result, labels));
        FormView {
            language: self.language,
            labels,
            inputs: view_model::input_rows(&self.inputs, labels),
            download: result_text
                .as_ref()
                .map(|_| view_model::download_offer(labels)),
            result_text,
            status: self.status.clone(),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Labels of the active language.
    pub fn labels(&self) -> &'static LabelBundle {
        self.language.labels()
    }

    /// Switch the label set; numeric values and any prediction are kept.
    pub fn select_language(&mut self, language: Language) -> &'static LabelBundle {
        self.language = language;
        self.labels()
    }

    /// Current form snapshot.
    pub fn inputs(&self) -> FeatureVector {
        self.inputs
    }

    /// Update one field with widget clamping.
    ///
    /// A changed value discards the prediction, which belonged to the old
    /// snapshot. Rejected (non-finite) input leaves everything untouched.
    pub fn set_field(&mut self, field: Field, value: f64) -> Option<f64> {
        let previous = self.inputs.get(field);
        let stored = self.inputs.set(field, value)?;
        if stored != previous {
            self.prediction = None;
        }
        Some(stored)
    }

    /// Run the model on the current snapshot.
    pub fn predict(&mut self) -> Result<PredictionResult, PredictError> {
        let features = self.inputs;
        match ml::predict(self.model.as_ref(), &features) {
            Ok(result) => {
                tracing::debug!("Predicted {:.4}% for {}", result.percent, features);
                self.prediction = Some(Prediction { features, result });
                Ok(result)
            }
            Err(err) => {
                tracing::warn!("Prediction failed for {}: {err}", features);
                self.prediction = None;
                self.status = Some(StatusLine {
                    text: format!("Prediction failed: {err}"),
                    tone: StatusTone::Error,
                });
                Err(err)
            }
        }
    }

    /// Latest prediction, if one exists for the current snapshot.
    pub fn result(&self) -> Option<PredictionResult> {
        self.prediction.map(|prediction| prediction.result)
    }

    /// CSV bytes for the latest prediction; `None` before any submit.
    pub fn export(&self) -> Option<CsvExport> {
        let prediction = self.prediction?;
        Some(export::export_csv(
            &prediction.features,
            &prediction.result,
            self.labels(),
            self.result_header.as_deref(),
        ))
    }

    /// Write the export to `path` and report the outcome in the status line.
    pub fn save_export_to(&mut self, path: &Path) -> Result<(), ExportError> {
        let Some(csv) = self.export() else {
            return Ok(());
        };
        match export::write_export(path, &csv) {
            Ok(()) => {
                self.status = Some(StatusLine {
                    text: format!("Saved {}", path.display()),
                    tone: StatusTone::Info,
                });
                Ok(())
            }
            Err(err) => {
                tracing::warn!("{err}");
                self.status = Some(StatusLine {
                    text: err.to_string(),
                    tone: StatusTone::Error,
                });
                Err(err)
            }
        }
    }

    /// Ask for a destination with a native save dialog, then write the export.
    pub fn save_export_via_dialog(&mut self) {
        let Some(csv) = self.export() else {
            return;
        };
        let mut dialog = FileDialog::new()
            .set_file_name(&csv.file_name)
            .add_filter("CSV", &["csv"]);
        if let Some(dir) = &self.export_dir {
            dialog = dialog.set_directory(dir);
        }
        if let Some(path) = dialog.save_file() {
            if let Err(err) = self.save_export_to(&path) {
                tracing::debug!("Dialog export to {} failed: {err}", path.display());
            }
        }
    }
}
