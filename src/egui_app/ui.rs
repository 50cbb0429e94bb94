//! egui renderer for the prediction form.

mod fonts;
pub mod style;

use std::path::PathBuf;

use eframe::egui::{self, Button, CornerRadius, Frame, Margin, RichText, Ui};

use crate::egui_app::controller::{FormEvent, PredictionController};
use crate::egui_app::state::{FormView, InputView};
use crate::i18n::{LANGUAGE_TOGGLE_LABEL, Language};

/// Minimum window size that still fits the whole form.
pub const MIN_VIEWPORT_SIZE: egui::Vec2 = egui::vec2(520.0, 640.0);

/// Renders the form and forwards user actions to the controller.
pub struct EguiApp {
    controller: PredictionController,
    cjk_font: Option<PathBuf>,
    visuals_set: bool,
}

impl EguiApp {
    pub fn new(controller: PredictionController, cjk_font: Option<PathBuf>) -> Self {
        Self {
            controller,
            cjk_font,
            visuals_set: false,
        }
    }

    fn prepare_frame(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::light();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        fonts::install_cjk_font(ctx, self.cjk_font.as_deref());
        self.visuals_set = true;
    }

    fn render_form(&mut self, ui: &mut Ui) {
        let view = self.controller.view();
        let mut events = Vec::new();

        render_language_toggle(ui, &view, &mut events);
        ui.add_space(12.0);
        ui.label(
            RichText::new(view.labels.title)
                .size(22.0)
                .strong()
                .color(style::palette().text_primary),
        );
        ui.label(RichText::new(view.labels.description).color(style::palette().text_muted));
        ui.add_space(16.0);

        for input in &view.inputs {
            render_input(ui, input, &mut events);
            ui.add_space(6.0);
        }

        ui.add_space(8.0);
        let palette = style::palette();
        let predict = Button::new(
            RichText::new(view.labels.button_predict)
                .strong()
                .color(palette.accent_text),
        )
        .fill(palette.accent)
        .corner_radius(CornerRadius::same(8));
        if ui.add(predict).clicked() {
            events.push(FormEvent::Predict);
        }

        let mut export_clicked = false;
        if let Some(text) = &view.result_text {
            ui.add_space(12.0);
            Frame::new()
                .fill(palette.success_fill)
                .inner_margin(Margin::same(12))
                .corner_radius(CornerRadius::same(8))
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.label(RichText::new(text).strong().color(palette.success_text));
                });
        }
        if let Some(offer) = &view.download {
            ui.add_space(8.0);
            export_clicked = ui
                .button(offer.label)
                .on_hover_text(offer.file_name.as_str())
                .clicked();
        }
        if let Some(status) = &view.status {
            ui.add_space(8.0);
            ui.label(RichText::new(&status.text).color(style::status_color(status.tone)));
        }

        for event in events {
            // A failed prediction ends this cycle; the error is already in the status line.
            if self.controller.handle(event).is_err() {
                break;
            }
        }
        if export_clicked {
            self.controller.save_export_via_dialog();
        }
    }
}

fn render_language_toggle(ui: &mut Ui, view: &FormView, events: &mut Vec<FormEvent>) {
    ui.label(LANGUAGE_TOGGLE_LABEL);
    ui.horizontal(|ui| {
        for language in Language::ALL {
            if ui
                .radio(view.language == language, language.display_name())
                .clicked()
                && view.language != language
            {
                events.push(FormEvent::SelectLanguage(language));
            }
        }
    });
}

fn render_input(ui: &mut Ui, input: &InputView, events: &mut Vec<FormEvent>) {
    let spec = input.spec;
    ui.label(RichText::new(input.label).color(style::palette().text_primary));
    ui.horizontal(|ui| {
        let mut value = input.value;
        let drag = egui::DragValue::new(&mut value)
            .speed(spec.step)
            .range(spec.min..=spec.max)
            .fixed_decimals(spec.decimals().max(2));
        if ui.add_sized([220.0, 24.0], drag).changed() {
            events.push(FormEvent::SetField(input.field, value));
        }
        let at_min = input.value <= spec.min;
        let at_max = input.value >= spec.max;
        if ui.add_enabled(!at_min, Button::new("−")).clicked() {
            events.push(FormEvent::SetField(input.field, spec.step_by(input.value, -1)));
        }
        if ui.add_enabled(!at_max, Button::new("+")).clicked() {
            events.push(FormEvent::SetField(input.field, spec.step_by(input.value, 1)));
        }
    });
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.prepare_frame(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                let side = ((ui.available_width() - style::FORM_MAX_WIDTH) / 2.0).max(16.0);
                ui.horizontal(|ui| {
                    ui.add_space(side);
                    ui.vertical(|ui| {
                        ui.set_max_width(style::FORM_MAX_WIDTH);
                        ui.add_space(24.0);
                        self.render_form(ui);
                    });
                });
            });
        });
    }
}
