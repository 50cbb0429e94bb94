#![deny(missing_docs)]
#![deny(warnings)]

//! Entry point for the egui-based degradation predictor.
#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]
use eframe::egui;
use mbpredict::config;
use mbpredict::egui_app::controller::PredictionController;
use mbpredict::egui_app::ui::{EguiApp, MIN_VIEWPORT_SIZE};
use mbpredict::i18n::WINDOW_TITLE;
use mbpredict::logging;
use mbpredict::ml;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let app = match build_app() {
        Ok(app) => AppOrError::App(Box::new(app)),
        Err(message) => {
            tracing::error!("{message}");
            AppOrError::Error(LaunchError { message })
        }
    };

    let viewport = egui::ViewportBuilder::default()
        .with_title(WINDOW_TITLE)
        .with_inner_size([760.0, 900.0])
        .with_min_inner_size(MIN_VIEWPORT_SIZE);
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        native_options,
        Box::new(move |_cc| {
            let app: Box<dyn eframe::App> = match app {
                AppOrError::App(app) => app,
                AppOrError::Error(error) => Box::new(error),
            };
            Ok(app)
        }),
    )?;
    Ok(())
}

/// Load settings and the model; any failure keeps the form from starting.
fn build_app() -> Result<EguiApp, String> {
    let cfg = config::load_or_default().map_err(|err| format!("Failed to load config: {err}"))?;
    let model_path = ml::resolve_model_path(&cfg.model.path);
    let model = ml::load_model(&model_path, cfg.model.sha256.as_deref())
        .map_err(|err| format!("Failed to load model: {err}"))?;
    let controller = PredictionController::from_config(model, &cfg);
    Ok(EguiApp::new(controller, cfg.ui.cjk_font.clone()))
}

enum AppOrError {
    App(Box<EguiApp>),
    Error(LaunchError),
}

/// Minimal fallback app to display initialization errors.
struct LaunchError {
    message: String,
}

impl eframe::App for LaunchError {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Failed to start");
                ui.label(&self.message);
            });
        });
    }
}
