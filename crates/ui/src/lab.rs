//! Lab panel: the three treatment parameters, the headline metrics, the floc
//! preview and the chart legend.
//!
//! Slider edits go through a local copy of [`SimulationInput`] and are only
//! written back when a value actually changed, so the model recomputes on
//! real edits and not on every repaint.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use simulation::chart_data::{ChartCache, LEGEND};
use simulation::config::{DOSE_RANGE, MIX_TIME_RANGE, SETTLE_TIME_RANGE};
use simulation::floc::{FlocPreview, BACKGROUND_BOTTOM, BACKGROUND_TOP, SPECK_COLOR};
use simulation::model::{LabMetrics, SimulationInput, SimulationResult};

use crate::graphs::paint_line_graph;
use crate::theme::{accent, to_color32};

const FLOC_PREVIEW_SIZE: egui::Vec2 = egui::vec2(300.0, 140.0);
const GRADIENT_BANDS: usize = 16;

pub fn metric_lines(metrics: &LabMetrics) -> [String; 4] {
    [
        format!("Coagulation efficiency: {:.0}%", metrics.efficiency_pct),
        format!(
            "Final turbidity: {:.1} NTU ({:.1}% removed)",
            metrics.final_turbidity, metrics.turbidity_removed_pct
        ),
        format!(
            "Microbe reduction: {:.2} log ({:.2}% removed)",
            metrics.microbe_log_reduction, metrics.microbes_removed_pct
        ),
        "Try a moderate dose with enough mixing and settling time.".to_string(),
    ]
}

pub fn lab_ui(
    mut contexts: EguiContexts,
    mut input: ResMut<SimulationInput>,
    result: Res<SimulationResult>,
    floc: Res<FlocPreview>,
    charts: Res<ChartCache>,
) {
    egui::SidePanel::right("lab")
        .resizable(false)
        .default_width(360.0)
        .show(contexts.ctx_mut(), |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Treatment Lab");

                let mut edited = *input;
                ui.add(
                    egui::Slider::new(&mut edited.dose, DOSE_RANGE.0..=DOSE_RANGE.1)
                        .text("Coagulant dose (mg/L)"),
                );
                ui.add(
                    egui::Slider::new(&mut edited.mix_time, MIX_TIME_RANGE.0..=MIX_TIME_RANGE.1)
                        .text("Mixing time (s)"),
                );
                ui.add(
                    egui::Slider::new(
                        &mut edited.settle_time,
                        SETTLE_TIME_RANGE.0..=SETTLE_TIME_RANGE.1,
                    )
                    .text("Settling time (min)"),
                );
                input.set_if_neq(edited);

                ui.separator();
                for line in metric_lines(&result.metrics()) {
                    ui.label(line);
                }

                ui.separator();
                ui.label(egui::RichText::new("Floc formation").strong());
                paint_floc(ui, &floc);

                ui.separator();
                ui.horizontal(|ui| {
                    for (name, color) in LEGEND {
                        let (rect, _) =
                            ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
                        ui.painter().rect_filled(rect, 2.0, accent(color));
                        ui.label(name);
                    }
                });
                paint_line_graph(ui, &charts.turbidity, "Turbidity (NTU)");
                paint_line_graph(ui, &charts.microbes, "Microbes (log scale)");
            });
        });
}

fn lerp_rgb(a: [u8; 3], b: [u8; 3], t: f32) -> egui::Color32 {
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    egui::Color32::from_rgb(mix(a[0], b[0]), mix(a[1], b[1]), mix(a[2], b[2]))
}

fn paint_floc(ui: &mut egui::Ui, floc: &FlocPreview) {
    let (rect, _) = ui.allocate_exact_size(FLOC_PREVIEW_SIZE, egui::Sense::hover());
    let painter = ui.painter_at(rect);

    // Vertical gradient in horizontal bands.
    let band_h = rect.height() / GRADIENT_BANDS as f32;
    for i in 0..GRADIENT_BANDS {
        let t = i as f32 / (GRADIENT_BANDS - 1) as f32;
        let band = egui::Rect::from_min_size(
            egui::pos2(rect.min.x, rect.min.y + i as f32 * band_h),
            egui::vec2(rect.width(), band_h + 0.5),
        );
        painter.rect_filled(band, 0.0, lerp_rgb(BACKGROUND_TOP, BACKGROUND_BOTTOM, t));
    }

    let to_screen = |p: Vec2| egui::pos2(rect.min.x + p.x * rect.width(), rect.min.y + p.y * rect.height());

    let speck = to_color32(SPECK_COLOR);
    for s in &floc.specks {
        painter.circle_filled(to_screen(s.center), s.radius, speck);
    }

    let tint = to_color32(floc.tint);
    for cluster in &floc.clusters {
        let center = to_screen(cluster.core.center);
        painter.circle_filled(center, cluster.core.radius, tint);
        for sub in &cluster.sub_blobs {
            painter.circle_filled(center + egui::vec2(sub.center.x, sub.center.y), sub.radius, tint);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simulation::model::compute_series;

    #[test]
    fn test_metric_lines_format() {
        let lines = metric_lines(&compute_series(1.0).metrics());
        assert!(lines[0].starts_with("Coagulation efficiency: 100%"));
        assert!(lines[1].contains("NTU"));
        assert!(lines[2].contains("log"));
    }

    #[test]
    fn test_metric_precision() {
        let metrics = LabMetrics {
            efficiency_pct: 87.4,
            final_turbidity: 3.456,
            turbidity_removed_pct: 97.12,
            microbe_log_reduction: 4.567,
            microbes_removed_pct: 99.9712,
        };
        let lines = metric_lines(&metrics);
        assert_eq!(lines[0], "Coagulation efficiency: 87%");
        assert_eq!(lines[1], "Final turbidity: 3.5 NTU (97.1% removed)");
        assert_eq!(lines[2], "Microbe reduction: 4.57 log (99.97% removed)");
    }

    #[test]
    fn test_gradient_endpoints() {
        assert_eq!(lerp_rgb(BACKGROUND_TOP, BACKGROUND_BOTTOM, 0.0), accent(BACKGROUND_TOP));
        assert_eq!(lerp_rgb(BACKGROUND_TOP, BACKGROUND_BOTTOM, 1.0), accent(BACKGROUND_BOTTOM));
    }
}
