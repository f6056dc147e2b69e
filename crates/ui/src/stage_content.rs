use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use simulation::content::StageContentView;
use simulation::stages::Stage;

use crate::theme::accent;

/// Bottom panel with the current stage's explanation.
pub fn stage_content_ui(mut contexts: EguiContexts, mut view: ResMut<StageContentView>) {
    let Some(stage) = view.current() else {
        return;
    };
    let focus = view.take_focus_request();

    egui::TopBottomPanel::bottom("stage_content")
        .resizable(true)
        .default_height(170.0)
        .show(contexts.ctx_mut(), |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| stage_content_body(ui, stage, focus));
        });
}

/// Title, summary, bullets and tip. With `focus` set the heading is scrolled
/// into view; keyboard focus stays where it was so shortcuts keep working.
pub fn stage_content_body(ui: &mut egui::Ui, stage: &Stage, focus: bool) {
    let heading = ui.heading(
        egui::RichText::new(stage.title)
            .color(accent(stage.color))
            .strong(),
    );
    if focus {
        heading.scroll_to_me(Some(egui::Align::TOP));
    }
    ui.label(stage.summary);
    for bullet in stage.bullets {
        ui.label(format!("\u{2022} {bullet}"));
    }
    ui.add_space(4.0);
    ui.label(egui::RichText::new(format!("Tip: {}", stage.tip)).italics());
}
