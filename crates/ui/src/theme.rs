use bevy::color::{ColorToPacked, Srgba};
use bevy_egui::{egui, EguiContexts};

use simulation::config::STAGE_COUNT;
use simulation::stages::{STAGES, WATER_COLOR_STOPS};

/// Heading color for the stage with accent `[r, g, b]`.
pub fn accent(color: [u8; 3]) -> egui::Color32 {
    egui::Color32::from_rgb(color[0], color[1], color[2])
}

pub fn to_color32(color: Srgba) -> egui::Color32 {
    let [r, g, b, a] = color.to_u8_array();
    egui::Color32::from_rgba_unmultiplied(r, g, b, a)
}

/// `rgb` washed toward white; `amount` 1.0 is pure white.
fn washed(rgb: [u8; 3], amount: f32) -> egui::Color32 {
    let wash = |c: u8| (c as f32 + (255.0 - c as f32) * amount).round() as u8;
    egui::Color32::from_rgb(wash(rgb[0]), wash(rgb[1]), wash(rgb[2]))
}

/// Light visuals tinted with the treated-water color; selections use the
/// intake stage accent.
pub fn water_visuals() -> egui::Visuals {
    let clear_water = WATER_COLOR_STOPS[STAGE_COUNT - 1];
    let selection = accent(STAGES[0].color);

    let mut visuals = egui::Visuals::light();
    visuals.panel_fill = washed(clear_water, 0.92);
    visuals.window_fill = visuals.panel_fill;
    visuals.faint_bg_color = washed(clear_water, 0.85);
    visuals.widgets.hovered.weak_bg_fill = washed(clear_water, 0.6);
    visuals.selection.bg_fill = selection;
    visuals.selection.stroke = egui::Stroke::new(1.0, egui::Color32::WHITE);
    visuals.hyperlink_color = selection;
    visuals
}

pub fn apply_water_theme(mut contexts: EguiContexts) {
    contexts.ctx_mut().set_visuals(water_visuals());
}
