//! Library exports for the degradation predictor binaries and tests.
/// Application directory helpers.
pub mod app_dirs;
/// Persisted settings.
pub mod config;
/// Shared egui UI modules.
pub mod egui_app;
/// CSV export of a single prediction.
pub mod export;
/// Experimental input fields and the feature vector.
pub mod form;
/// Localized label bundles.
pub mod i18n;
/// Logging setup.
pub mod logging;
/// Regression model loading and inference.
pub mod ml;
