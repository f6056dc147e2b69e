use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use simulation::config::SPEED_CHOICES;
use simulation::navigator::{NavCommand, NavigatorState};
use simulation::stages::STAGES;

use crate::theme::accent;

pub fn speed_label(speed: f32) -> String {
    format!("{speed}x")
}

/// Left panel: the stage list and transport controls.
pub fn stage_nav_ui(
    mut contexts: EguiContexts,
    nav: Res<NavigatorState>,
    mut commands: EventWriter<NavCommand>,
) {
    let current = nav.current_stage();

    egui::SidePanel::left("stage_nav")
        .resizable(false)
        .default_width(210.0)
        .show(contexts.ctx_mut(), |ui| {
            ui.heading("Treatment Stages");
            ui.separator();

            for stage in &STAGES {
                let text = egui::RichText::new(format!("{}. {}", stage.index + 1, stage.title))
                    .color(accent(stage.color));
                let text = if stage.index == current {
                    text.strong()
                } else {
                    text
                };
                if ui.selectable_label(stage.index == current, text).clicked() {
                    commands.send(NavCommand::Goto {
                        index: stage.index,
                        user_initiated: true,
                    });
                }
            }

            ui.separator();
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(current > 0, egui::Button::new("< Prev"))
                    .clicked()
                {
                    commands.send(NavCommand::Prev);
                }
                let play = if nav.is_playing() { "Pause" } else { "Play" };
                if ui.button(play).clicked() {
                    commands.send(NavCommand::TogglePlay);
                }
                if ui
                    .add_enabled(current + 1 < STAGES.len(), egui::Button::new("Next >"))
                    .clicked()
                {
                    commands.send(NavCommand::Next);
                }
            });

            ui.horizontal(|ui| {
                ui.label("Speed");
                let mut speed = nav.speed_multiplier();
                egui::ComboBox::from_id_salt("speed_select")
                    .selected_text(speed_label(speed))
                    .show_ui(ui, |ui| {
                        for choice in SPEED_CHOICES {
                            ui.selectable_value(&mut speed, choice, speed_label(choice));
                        }
                    });
                if speed != nav.speed_multiplier() {
                    commands.send(NavCommand::SetSpeed(speed));
                }
            });

            let mut auto = nav.auto_advance();
            if ui.checkbox(&mut auto, "Auto-advance").changed() {
                commands.send(NavCommand::SetAutoAdvance(auto));
            }

            ui.small(format!("Stage {} of {}", current + 1, STAGES.len()));
        });
}
