use bevy::prelude::*;

use simulation::simulation_sets::{EngineSet, StageChangeSet};

pub mod camera;
pub mod egui_input_guard;
pub mod highlight;
pub mod particles;
pub mod picking;
pub mod scene;
pub mod shimmer;
pub mod sync;

use highlight::ActiveStage;

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(camera::CLEAR_COLOR))
            .init_resource::<ActiveStage>()
            .add_systems(
                Startup,
                (camera::setup_camera, scene::spawn_scene)
                    .chain()
                    .after(simulation::droplet::place_droplet),
            )
            .add_systems(
                Update,
                picking::pick_stage_block.in_set(EngineSet::Input),
            )
            .add_systems(
                Update,
                highlight::highlight_active_stage.in_set(StageChangeSet::Highlight),
            )
            .add_systems(
                Update,
                (
                    sync::sync_droplet,
                    sync::sync_pipes,
                    particles::draw_particles,
                    shimmer::draw_shimmer,
                )
                    .in_set(EngineSet::Present),
            );
    }
}
