//! # TestEngine: headless harness for the purification engine
//!
//! Wraps `bevy::app::App` + `MinimalPlugins` + `SimulationPlugin` with a
//! manually stepped clock, so tests (and benches) can drive navigation and
//! the animation drivers frame by frame without a window or renderer.

use std::time::Duration;

use bevy::app::App;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use crate::anchors::PresentationAnchors;
use crate::config::EngineConfig;
use crate::droplet::DropletState;
use crate::model::{SimulationInput, SimulationResult};
use crate::motion::MotionPreference;
use crate::navigator::{NavCommand, NavigatorState, StageChanged};
use crate::pipes::PipeNetwork;
use crate::sedimentation::SedimentationSystem;
use crate::simulation_sets::EngineSet;
use crate::timing::now_ms;
use crate::SimulationPlugin;

/// Simulated frame length. Small enough that the virtual clock never hits
/// its max-delta clamp.
pub const FRAME_MS: u64 = 10;

/// Every `StageChanged` the navigator broadcast, in order.
#[derive(Resource, Debug, Default)]
pub struct StageChangeLog(pub Vec<StageChanged>);

fn record_stage_changes(mut events: EventReader<StageChanged>, mut log: ResMut<StageChangeLog>) {
    log.0.extend(events.read().copied());
}

/// A headless engine for integration testing.
pub struct TestEngine {
    app: App,
}

impl Default for TestEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEngine {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// Default config, standard layout, full motion.
    pub fn new() -> Self {
        Self::build(
            EngineConfig::default(),
            PresentationAnchors::standard(),
            MotionPreference::default(),
        )
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self::build(
            config,
            PresentationAnchors::standard(),
            MotionPreference::default(),
        )
    }

    /// Standard config on a custom (possibly incomplete) presentation surface.
    pub fn with_anchors(anchors: PresentationAnchors) -> Self {
        Self::build(EngineConfig::default(), anchors, MotionPreference::default())
    }

    /// Engine whose environment reports a reduced-motion preference.
    pub fn with_reduced_motion() -> Self {
        Self::build(
            EngineConfig::default(),
            PresentationAnchors::standard(),
            MotionPreference::reduced(),
        )
    }

    fn build(config: EngineConfig, anchors: PresentationAnchors, motion: MotionPreference) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(
            FRAME_MS,
        )));

        // Inserted before the plugin so its init_resource calls keep them.
        app.insert_resource(config);
        app.insert_resource(anchors);
        app.insert_resource(motion);
        app.add_plugins(SimulationPlugin);

        app.init_resource::<StageChangeLog>();
        app.add_systems(Update, record_stage_changes.in_set(EngineSet::Animate));

        // Run one update so Startup systems execute.
        app.update();
        Self { app }
    }

    // -----------------------------------------------------------------------
    // Driving
    // -----------------------------------------------------------------------

    /// Run a single frame.
    pub fn update(&mut self) {
        self.app.update();
    }

    /// Run frames until at least `ms` of engine time has passed.
    pub fn advance_ms(&mut self, ms: u64) {
        for _ in 0..ms.div_ceil(FRAME_MS) {
            self.app.update();
        }
    }

    /// Queue a navigation command and run one frame so it is applied.
    pub fn send(&mut self, command: NavCommand) {
        self.app.world_mut().send_event(command);
        self.app.update();
    }

    /// User-initiated jump to `index`.
    pub fn goto(&mut self, index: usize) {
        self.send(NavCommand::Goto {
            index,
            user_initiated: true,
        });
    }

    pub fn set_input(&mut self, dose: f64, mix_time: f64, settle_time: f64) {
        *self.app.world_mut().resource_mut::<SimulationInput>() =
            SimulationInput::clamped(dose, mix_time, settle_time);
        self.app.update();
    }

    /// Send `AppExit` and run the frame that handles it.
    pub fn shutdown(&mut self) {
        self.app.world_mut().send_event(AppExit::Success);
        self.app.update();
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    pub fn resource<T: Resource>(&self) -> &T {
        self.app.world().resource::<T>()
    }

    pub fn resource_mut<T: Resource>(&mut self) -> Mut<'_, T> {
        self.app.world_mut().resource_mut::<T>()
    }

    pub fn now_ms(&self) -> f64 {
        now_ms(self.app.world().resource::<Time>())
    }

    pub fn current_stage(&self) -> usize {
        self.navigator().current_stage()
    }

    pub fn navigator(&self) -> &NavigatorState {
        self.resource::<NavigatorState>()
    }

    pub fn droplet(&self) -> &DropletState {
        self.resource::<DropletState>()
    }

    pub fn pipes(&self) -> &PipeNetwork {
        self.resource::<PipeNetwork>()
    }

    pub fn sedimentation(&self) -> &SedimentationSystem {
        self.resource::<SedimentationSystem>()
    }

    pub fn result(&self) -> &SimulationResult {
        self.resource::<SimulationResult>()
    }

    pub fn stage_changes(&self) -> &[StageChanged] {
        &self.resource::<StageChangeLog>().0
    }

    // -----------------------------------------------------------------------
    // Assertions
    // -----------------------------------------------------------------------

    pub fn assert_stage(&self, expected: usize) {
        let actual = self.current_stage();
        assert_eq!(actual, expected, "Expected stage {expected}, got {actual}");
    }

    /// Assert the droplet is resting (not moving) within `tolerance` of the
    /// anchor of `stage`, bob included.
    pub fn assert_droplet_at_stage(&self, stage: usize, tolerance: f32) {
        let anchor = self
            .resource::<PresentationAnchors>()
            .stage(stage)
            .unwrap_or_else(|| panic!("no anchor for stage {stage}"));
        let droplet = self.droplet();
        assert!(!droplet.is_moving(), "droplet still moving");
        let distance = droplet.position().distance(anchor);
        assert!(
            distance <= tolerance,
            "Expected droplet within {tolerance} of stage {stage} anchor {anchor}, got {} ({distance} away)",
            droplet.position()
        );
    }
}
