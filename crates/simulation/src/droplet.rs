//! Droplet mover: eased travel between stage anchors, tint by stage, idle bob.
//!
//! A move always starts from the droplet's live on-screen position, so a new
//! `goto` in the middle of a transition continues smoothly instead of snapping.
//! On arrival the droplet snaps exactly onto the anchor and starts a gentle
//! vertical bob. Move and bob are serialized by the `moving` gate: on any given
//! frame at most one of them writes the position, and the move always wins.

use std::f64::consts::TAU;

use bevy::prelude::*;

use crate::anchors::PresentationAnchors;
use crate::config::{DROPLET_BOB_AMPLITUDE, DROPLET_BOB_PERIOD_MS, DROPLET_MOVE_MS};
use crate::navigator::{NavigatorState, StageChanged};
use crate::stages::water_color;
use crate::tasks::{TaskHandle, TaskSlot};
use crate::timing::{
    eased_progress, effective_duration_ms, lerp_srgba, linear_progress, now_ms,
};

#[derive(Debug, Clone, Copy)]
struct MovePlan {
    from: Vec2,
    to: Vec2,
    duration_ms: f64,
}

#[derive(Debug, Clone, Copy)]
struct TintPlan {
    from: Srgba,
    to: Srgba,
    duration_ms: f64,
}

/// Visual state of the droplet, owned by the droplet driver.
#[derive(Resource, Debug, Clone)]
pub struct DropletState {
    position: Vec2,
    rest: Vec2,
    color: Srgba,
    moving: bool,
    move_task: TaskSlot,
    move_plan: Option<MovePlan>,
    tint_task: TaskSlot,
    tint_plan: Option<TintPlan>,
    bob_task: TaskSlot,
    bob_phase: f64,
}

impl Default for DropletState {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            rest: Vec2::ZERO,
            color: water_color(0),
            moving: false,
            move_task: TaskSlot::default(),
            move_plan: None,
            tint_task: TaskSlot::default(),
            tint_plan: None,
            bob_task: TaskSlot::default(),
            bob_phase: 0.0,
        }
    }
}

impl DropletState {
    /// Position to draw this frame (bob offset included).
    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn color(&self) -> Srgba {
        self.color
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    pub fn is_bobbing(&self) -> bool {
        self.bob_task.is_running()
    }

    pub fn move_handle(&self) -> Option<TaskHandle> {
        self.move_task.current()
    }

    /// Put the droplet at `anchor` without animating and start the idle bob.
    pub fn place_at(&mut self, anchor: Vec2, stage: usize, now_ms: f64) {
        self.move_task.cancel();
        self.tint_task.cancel();
        self.move_plan = None;
        self.tint_plan = None;
        self.moving = false;
        self.position = anchor;
        self.rest = anchor;
        self.color = water_color(stage);
        self.bob_phase = 0.0;
        self.bob_task.start(now_ms);
    }

    /// Live position to start a move from; a non-finite position (left over
    /// from a corrupted frame) falls back to `baseline`.
    pub fn live_position(&self, baseline: Vec2) -> Vec2 {
        if self.position.is_finite() {
            self.position
        } else {
            baseline
        }
    }

    /// Begin travelling to `target`, cancelling any move in flight and
    /// suspending the bob until arrival.
    pub fn begin_move(&mut self, target: Vec2, now_ms: f64, speed: f32, baseline: Vec2) {
        let from = self.live_position(baseline);
        self.bob_task.cancel();
        self.move_task.start(now_ms);
        self.move_plan = Some(MovePlan {
            from,
            to: target,
            duration_ms: effective_duration_ms(DROPLET_MOVE_MS, speed),
        });
        self.moving = true;
        self.position = from;
        self.rest = from;
    }

    /// Begin easing the tint toward the water color of `stage`.
    pub fn begin_tint(&mut self, stage: usize, now_ms: f64, speed: f32) {
        self.tint_task.start(now_ms);
        self.tint_plan = Some(TintPlan {
            from: self.color,
            to: water_color(stage),
            duration_ms: effective_duration_ms(DROPLET_MOVE_MS, speed),
        });
    }

    /// Advance one move frame under `handle`. Returns `false` when `handle`
    /// is stale (the move was cancelled or replaced) and nothing was done.
    pub fn step_move(&mut self, handle: TaskHandle, now_ms: f64) -> bool {
        if !self.move_task.is_live(handle) {
            return false;
        }
        let (Some(plan), Some(elapsed)) = (self.move_plan, self.move_task.elapsed_ms(now_ms))
        else {
            return false;
        };

        if linear_progress(elapsed, plan.duration_ms) >= 1.0 {
            self.position = plan.to;
            self.rest = plan.to;
            self.moving = false;
            self.move_plan = None;
            self.move_task.cancel();
            self.bob_phase = 0.0;
            self.bob_task.start(now_ms);
        } else {
            let t = eased_progress(elapsed, plan.duration_ms) as f32;
            self.position = plan.from.lerp(plan.to, t);
            self.rest = self.position;
        }
        true
    }

    /// Advance one bob frame under `handle`. The bob never runs while a move
    /// is in progress.
    pub fn step_bob(&mut self, handle: TaskHandle, dt_ms: f64, speed: f32) -> bool {
        if self.moving || !self.bob_task.is_live(handle) {
            return false;
        }
        let period = effective_duration_ms(DROPLET_BOB_PERIOD_MS, speed);
        self.bob_phase = (self.bob_phase + dt_ms / period * TAU) % TAU;
        let offset = self.bob_phase.sin() as f32 * DROPLET_BOB_AMPLITUDE;
        self.position = self.rest + Vec2::new(0.0, offset);
        true
    }

    fn step_tint(&mut self, now_ms: f64) {
        let Some(handle) = self.tint_task.current() else {
            return;
        };
        if !self.tint_task.is_live(handle) {
            return;
        }
        let (Some(plan), Some(elapsed)) = (self.tint_plan, self.tint_task.elapsed_ms(now_ms))
        else {
            return;
        };
        if linear_progress(elapsed, plan.duration_ms) >= 1.0 {
            self.color = plan.to;
            self.tint_plan = None;
            self.tint_task.cancel();
        } else {
            let t = eased_progress(elapsed, plan.duration_ms) as f32;
            self.color = lerp_srgba(plan.from, plan.to, t);
        }
    }

    /// One frame of the driver: the move if one is in flight, otherwise the bob.
    pub fn step(&mut self, now_ms: f64, dt_ms: f64, speed: f32) {
        if let Some(handle) = self.move_task.current() {
            self.step_move(handle, now_ms);
        } else if let Some(handle) = self.bob_task.current() {
            self.step_bob(handle, dt_ms, speed);
        }
        self.step_tint(now_ms);
    }

    /// Stop every loop (teardown).
    pub fn stop(&mut self) {
        self.move_task.cancel();
        self.tint_task.cancel();
        self.bob_task.cancel();
        self.moving = false;
    }
}

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

/// Startup: park the droplet on the current stage's anchor.
pub fn place_droplet(
    anchors: Res<PresentationAnchors>,
    nav: Res<NavigatorState>,
    time: Res<Time>,
    mut droplet: ResMut<DropletState>,
) {
    let stage = nav.current_stage();
    let anchor = anchors.stage(stage).unwrap_or_else(|| anchors.baseline());
    droplet.place_at(anchor, stage, now_ms(&time));
}

/// Stage-change subscriber: start travelling toward the new stage's anchor.
pub fn start_droplet_transition(
    mut events: EventReader<StageChanged>,
    anchors: Res<PresentationAnchors>,
    nav: Res<NavigatorState>,
    time: Res<Time>,
    mut droplet: ResMut<DropletState>,
) {
    for event in events.read() {
        if event.previous == event.current {
            continue;
        }
        let Some(target) = anchors.stage(event.current) else {
            debug!("Droplet: no anchor for stage {}, staying put", event.current);
            continue;
        };
        droplet.begin_move(
            target,
            now_ms(&time),
            nav.speed_multiplier(),
            anchors.baseline(),
        );
    }
}

/// Stage-change subscriber: retint the droplet for the new stage.
pub fn update_droplet_color(
    mut events: EventReader<StageChanged>,
    nav: Res<NavigatorState>,
    time: Res<Time>,
    mut droplet: ResMut<DropletState>,
) {
    for event in events.read() {
        if event.previous == event.current {
            continue;
        }
        droplet.begin_tint(event.current, now_ms(&time), nav.speed_multiplier());
    }
}

/// Per-frame droplet driver.
pub fn animate_droplet(
    nav: Res<NavigatorState>,
    time: Res<Time>,
    mut droplet: ResMut<DropletState>,
) {
    let dt_ms = time.delta_secs_f64() * 1000.0;
    droplet.step(now_ms(&time), dt_ms, nav.speed_multiplier());
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: Vec2 = Vec2::new(0.0, 0.0);
    const B: Vec2 = Vec2::new(200.0, 0.0);

    #[test]
    fn test_move_snaps_exactly_on_completion() {
        let mut d = DropletState::default();
        d.place_at(A, 0, 0.0);
        d.begin_move(B, 0.0, 1.0, A);
        d.step(350.0, 16.0, 1.0);
        assert!(d.is_moving());
        assert!(d.position().x > 0.0 && d.position().x < 200.0);
        d.step(700.0, 16.0, 1.0);
        assert!(!d.is_moving());
        assert_eq!(d.position(), B);
        assert!(d.is_bobbing());
    }

    #[test]
    fn test_move_duration_scales_with_speed() {
        let mut d = DropletState::default();
        d.place_at(A, 0, 0.0);
        d.begin_move(B, 0.0, 2.0, A);
        d.step(350.0, 16.0, 2.0);
        assert_eq!(d.position(), B);
    }

    #[test]
    fn test_bob_suspended_during_move() {
        let mut d = DropletState::default();
        d.place_at(A, 0, 0.0);
        assert!(d.is_bobbing());
        d.begin_move(B, 0.0, 1.0, A);
        assert!(!d.is_bobbing());
        let bob_handle = d.bob_task.start(0.0);
        // Even with a live bob handle the gate blocks the bob while moving.
        assert!(!d.step_bob(bob_handle, 16.0, 1.0));
    }

    #[test]
    fn test_bob_stays_within_amplitude() {
        let mut d = DropletState::default();
        d.place_at(B, 0, 0.0);
        for frame in 1..=400 {
            d.step(frame as f64 * 16.0, 16.0, 1.0);
            let dy = (d.position().y - B.y).abs();
            assert!(dy <= DROPLET_BOB_AMPLITUDE + 1e-4);
            assert_eq!(d.position().x, B.x);
        }
    }

    #[test]
    fn test_retarget_starts_from_live_position() {
        let mut d = DropletState::default();
        d.place_at(A, 0, 0.0);
        d.begin_move(B, 0.0, 1.0, A);
        d.step(350.0, 16.0, 1.0);
        let midway = d.position();
        d.begin_move(Vec2::new(400.0, 0.0), 350.0, 1.0, A);
        // The new move starts where the droplet actually is.
        assert_eq!(d.position(), midway);
        d.step(351.0, 1.0, 1.0);
        assert!((d.position().x - midway.x).abs() < 1.0);
    }

    #[test]
    fn test_stale_move_handle_is_ignored() {
        let mut d = DropletState::default();
        d.place_at(A, 0, 0.0);
        d.begin_move(B, 0.0, 1.0, A);
        let stale = d.move_handle().unwrap();
        d.begin_move(Vec2::new(-200.0, 0.0), 10.0, 1.0, A);
        assert!(!d.step_move(stale, 800.0));
        assert!(d.is_moving());
    }

    #[test]
    fn test_non_finite_position_falls_back_to_baseline() {
        let mut d = DropletState::default();
        d.position = Vec2::new(f32::NAN, 3.0);
        let baseline = Vec2::new(-500.0, 140.0);
        assert_eq!(d.live_position(baseline), baseline);
        d.begin_move(B, 0.0, 1.0, baseline);
        assert_eq!(d.position(), baseline);
    }

    #[test]
    fn test_tint_reaches_stage_color() {
        let mut d = DropletState::default();
        d.place_at(A, 0, 0.0);
        d.begin_tint(4, 0.0, 1.0);
        d.step(100.0, 16.0, 1.0);
        assert_ne!(d.color(), water_color(4));
        d.step(700.0, 16.0, 1.0);
        assert_eq!(d.color(), water_color(4));
    }

    #[test]
    fn test_stop_halts_everything() {
        let mut d = DropletState::default();
        d.place_at(A, 0, 0.0);
        d.begin_move(B, 0.0, 1.0, A);
        d.stop();
        d.stop();
        let before = d.position();
        d.step(1000.0, 16.0, 1.0);
        assert_eq!(d.position(), before);
    }
}
