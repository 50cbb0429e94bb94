//! egui front end: controller, render state and renderer.
/// Prediction form controller driving the UI.
pub mod controller;
/// Render-ready state produced each frame.
pub mod state;
/// egui renderer.
pub mod ui;
/// Conversions from domain values into render state.
pub mod view_model;
