use bevy::prelude::*;

pub mod anchors;
pub mod chart_data;
pub mod config;
pub mod content;
pub mod droplet;
pub mod error;
pub mod floc;
pub mod model;
pub mod motion;
pub mod navigator;
pub mod pipes;
pub mod quiz;
pub mod sedimentation;
pub mod shimmer;
pub mod sim_rng;
pub mod simulation_sets;
pub mod stages;
pub mod tasks;
pub mod timing;

#[cfg(any(test, feature = "bench"))]
pub mod test_harness;

use anchors::PresentationAnchors;
use chart_data::ChartCache;
use config::EngineConfig;
use content::StageContentView;
use droplet::DropletState;
use floc::FlocPreview;
use model::{SimulationInput, SimulationRecomputed, SimulationResult};
use motion::MotionPreference;
use navigator::{NavCommand, NavigatorState, StageChanged};
use pipes::PipeNetwork;
use quiz::{NewQuizQuestion, QuizState};
use sedimentation::SedimentationSystem;
use shimmer::ShimmerLoop;
use sim_rng::SimRng;
use simulation_sets::{EngineSet, StageChangeSet};

// ---------------------------------------------------------------------------
// Engine lifecycle
// ---------------------------------------------------------------------------

/// Apply the runtime [`EngineConfig`] to the engine resources.
///
/// Runs once at startup, before any driver is placed or started.
pub fn init_engine(
    config: Res<EngineConfig>,
    mut nav: ResMut<NavigatorState>,
    mut rng: ResMut<SimRng>,
    mut input: ResMut<SimulationInput>,
    mut motion: ResMut<MotionPreference>,
) {
    if !nav.set_speed(config.speed) {
        warn!(
            "Engine: configured speed {} rejected, keeping {}",
            config.speed,
            nav.speed_multiplier()
        );
    }
    nav.set_auto_advance(config.auto_advance);
    rng.reseed(config.seed);
    *input = SimulationInput::clamped(config.dose, config.mix_time, config.settle_time);
    *motion = motion.with_override(config.reduced_motion);

    info!(
        "Engine: speed {}x, auto-advance {}, seed {}, reduced motion {}",
        nav.speed_multiplier(),
        nav.auto_advance(),
        config.seed,
        motion.reduced
    );
}

/// Stop every driver loop. Safe to call any number of times.
pub fn stop_all_drivers(world: &mut World) {
    world.resource_mut::<NavigatorState>().stop();
    world.resource_mut::<DropletState>().stop();
    world.resource_mut::<PipeNetwork>().stop();
    world.resource_mut::<SedimentationSystem>().teardown();
    world.resource_mut::<ShimmerLoop>().stop();
}

fn stop_drivers_on_exit(
    mut exits: EventReader<AppExit>,
    mut nav: ResMut<NavigatorState>,
    mut droplet: ResMut<DropletState>,
    mut pipes: ResMut<PipeNetwork>,
    mut sedimentation: ResMut<SedimentationSystem>,
    mut shimmer: ResMut<ShimmerLoop>,
) {
    if exits.read().count() == 0 {
        return;
    }
    nav.stop();
    droplet.stop();
    pipes.stop();
    sedimentation.teardown();
    shimmer.stop();
    info!("Engine: all drivers stopped");
}

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        // Engine context. Resources inserted by the app beforehand (config,
        // anchors, motion preference) are kept as they are.
        app.init_resource::<EngineConfig>()
            .init_resource::<PresentationAnchors>()
            .init_resource::<MotionPreference>()
            .init_resource::<SimRng>()
            .init_resource::<SimulationInput>()
            .init_resource::<SimulationResult>()
            .init_resource::<NavigatorState>()
            .init_resource::<StageContentView>()
            .init_resource::<DropletState>()
            .init_resource::<PipeNetwork>()
            .init_resource::<SedimentationSystem>()
            .init_resource::<ShimmerLoop>()
            .init_resource::<ChartCache>()
            .init_resource::<FlocPreview>()
            .init_resource::<QuizState>()
            .add_event::<NavCommand>()
            .add_event::<StageChanged>()
            .add_event::<SimulationRecomputed>()
            .add_event::<NewQuizQuestion>();

        app.configure_sets(
            Update,
            (
                EngineSet::Input,
                EngineSet::Model,
                EngineSet::Navigate,
                EngineSet::StageChange,
                EngineSet::Animate,
                EngineSet::Present,
            )
                .chain(),
        )
        .configure_sets(
            Update,
            (
                StageChangeSet::Content,
                StageChangeSet::Highlight,
                StageChangeSet::DropletTransition,
                StageChangeSet::PipeFill,
                StageChangeSet::DropletColor,
                StageChangeSet::Sedimentation,
                StageChangeSet::Charts,
            )
                .chain()
                .in_set(EngineSet::StageChange),
        );

        app.add_systems(
            Startup,
            (init_engine, droplet::place_droplet, shimmer::start_shimmer).chain(),
        );

        app.add_systems(
            Update,
            (
                model::recompute_simulation,
                floc::regenerate_floc,
                quiz::draw_quiz_question,
            )
                .chain()
                .in_set(EngineSet::Model),
        )
        .add_systems(
            Update,
            (navigator::apply_nav_commands, navigator::auto_advance)
                .chain()
                .in_set(EngineSet::Navigate),
        );

        // Stage-change subscribers, one per ordered slot.
        app.add_systems(
            Update,
            content::render_stage_content.in_set(StageChangeSet::Content),
        )
        .add_systems(
            Update,
            droplet::start_droplet_transition.in_set(StageChangeSet::DropletTransition),
        )
        .add_systems(Update, pipes::start_pipe_fill.in_set(StageChangeSet::PipeFill))
        .add_systems(
            Update,
            droplet::update_droplet_color.in_set(StageChangeSet::DropletColor),
        )
        .add_systems(
            Update,
            sedimentation::sync_sedimentation.in_set(StageChangeSet::Sedimentation),
        )
        .add_systems(
            Update,
            chart_data::rebuild_charts.in_set(StageChangeSet::Charts),
        );

        app.add_systems(
            Update,
            (
                droplet::animate_droplet,
                pipes::animate_pipes,
                sedimentation::animate_sedimentation,
                shimmer::animate_shimmer,
            )
                .in_set(EngineSet::Animate),
        );

        app.add_systems(Last, stop_drivers_on_exit);
    }
}
