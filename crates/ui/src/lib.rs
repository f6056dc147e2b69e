use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use simulation::simulation_sets::EngineSet;

pub mod graphs;
pub mod keybinds;
pub mod lab;
pub mod quiz;
pub mod stage_content;
pub mod stage_nav;
pub mod theme;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .add_systems(Startup, theme::apply_water_theme)
            .add_systems(
                Update,
                (
                    keybinds::stage_keybinds,
                    stage_nav::stage_nav_ui,
                    lab::lab_ui,
                    stage_content::stage_content_ui,
                    quiz::quiz_ui,
                )
                    .chain()
                    .in_set(EngineSet::Input),
            );
    }
}
