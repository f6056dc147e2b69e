//! Decorative shimmer: a mask offset cycling over a fixed pixel range.
//!
//! Independent of the current stage. Runs from startup until stopped and is
//! never started when reduced motion is requested.

use bevy::prelude::*;

use crate::config::{SHIMMER_RANGE_PX, SHIMMER_RATE_PX_PER_SEC};
use crate::motion::MotionPreference;
use crate::navigator::NavigatorState;
use crate::tasks::{TaskHandle, TaskSlot};
use crate::timing::now_ms;

#[derive(Resource, Debug, Clone, Default)]
pub struct ShimmerLoop {
    offset: f32,
    task: TaskSlot,
}

impl ShimmerLoop {
    /// Current mask offset in `[0, SHIMMER_RANGE_PX)`.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn is_running(&self) -> bool {
        self.task.is_running()
    }

    pub fn handle(&self) -> Option<TaskHandle> {
        self.task.current()
    }

    /// Start (or restart) the loop. Returns `None` under reduced motion.
    pub fn start(&mut self, now_ms: f64, motion: MotionPreference) -> Option<TaskHandle> {
        if motion.reduced {
            self.task.cancel();
            return None;
        }
        Some(self.task.start(now_ms))
    }

    /// Advance the offset by `dt` seconds at the speed-scaled rate.
    pub fn step(&mut self, handle: TaskHandle, dt: f32, speed: f32) -> bool {
        if !self.task.is_live(handle) {
            return false;
        }
        self.offset = (self.offset + SHIMMER_RATE_PX_PER_SEC * speed * dt).rem_euclid(SHIMMER_RANGE_PX);
        true
    }

    pub fn stop(&mut self) -> bool {
        self.task.cancel()
    }
}

/// Startup: start the shimmer unless reduced motion is on.
pub fn start_shimmer(
    motion: Res<MotionPreference>,
    time: Res<Time>,
    mut shimmer: ResMut<ShimmerLoop>,
) {
    if shimmer.start(now_ms(&time), *motion).is_none() {
        info!("Shimmer: skipped (reduced motion)");
    }
}

pub fn animate_shimmer(
    nav: Res<NavigatorState>,
    time: Res<Time>,
    mut shimmer: ResMut<ShimmerLoop>,
) {
    if let Some(handle) = shimmer.handle() {
        shimmer.step(handle, time.delta_secs(), nav.speed_multiplier());
    }
}
