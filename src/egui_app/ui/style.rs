use eframe::egui::{
    Color32, Stroke, Visuals,
    epaint::CornerRadius,
    style::WidgetVisuals,
};

use crate::egui_app::state::StatusTone;

/// Maximum width of the centered form column.
pub const FORM_MAX_WIDTH: f32 = 700.0;

#[derive(Clone, Copy)]
pub struct Palette {
    pub bg_page: Color32,
    pub bg_field: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub accent: Color32,
    pub accent_text: Color32,
    pub success_fill: Color32,
    pub success_text: Color32,
    pub outline: Color32,
    pub error: Color32,
}

pub fn palette() -> Palette {
    Palette {
        bg_page: Color32::from_rgb(224, 247, 250),
        bg_field: Color32::WHITE,
        text_primary: Color32::from_rgb(34, 34, 34),
        text_muted: Color32::from_rgb(85, 85, 85),
        accent: Color32::from_rgb(2, 136, 209),
        accent_text: Color32::WHITE,
        success_fill: Color32::from_rgb(179, 229, 252),
        success_text: Color32::from_rgb(1, 87, 155),
        outline: Color32::from_rgb(221, 221, 221),
        error: Color32::from_rgb(198, 40, 40),
    }
}

pub fn apply_visuals(visuals: &mut Visuals) {
    let palette = palette();
    visuals.panel_fill = palette.bg_page;
    visuals.window_fill = palette.bg_page;
    visuals.extreme_bg_color = palette.bg_field;
    visuals.override_text_color = Some(palette.text_primary);
    visuals.error_fg_color = palette.error;
    visuals.selection.bg_fill = palette.success_fill;
    visuals.selection.stroke = Stroke::new(1.0, palette.accent);
    set_rounded(&mut visuals.widgets.inactive, palette);
    set_rounded(&mut visuals.widgets.hovered, palette);
    set_rounded(&mut visuals.widgets.active, palette);
}

fn set_rounded(vis: &mut WidgetVisuals, palette: Palette) {
    vis.corner_radius = CornerRadius::same(8);
    vis.bg_stroke = Stroke::new(1.0, palette.outline);
}

pub fn status_color(tone: StatusTone) -> Color32 {
    let palette = palette();
    match tone {
        StatusTone::Info => palette.success_text,
        StatusTone::Error => palette.error,
    }
}
