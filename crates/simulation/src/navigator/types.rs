use bevy::prelude::*;

use crate::config::{AUTO_ADVANCE_INTERVAL_MS, MAX_SPEED, MIN_SPEED, STAGE_COUNT};
use crate::tasks::TaskSlot;
use crate::timing::effective_duration_ms;

// =============================================================================
// Events
// =============================================================================

/// Discrete navigation commands from the input surface.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum NavCommand {
    /// Jump to a stage. Out-of-range indices are ignored.
    Goto { index: usize, user_initiated: bool },
    /// One stage forward, stopping at the last stage.
    Next,
    /// One stage back, stopping at the first stage.
    Prev,
    TogglePlay,
    SetSpeed(f32),
    SetAutoAdvance(bool),
}

/// Broadcast after the navigator commits a stage index.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageChanged {
    pub previous: usize,
    pub current: usize,
    pub user_initiated: bool,
}

impl StageChanged {
    /// Exactly one stage forward (the only transition that fills a pipe).
    pub fn is_forward_step(&self) -> bool {
        self.current == self.previous + 1
    }

    /// The transition arrives at `stage` from somewhere else.
    pub fn entered(&self, stage: usize) -> bool {
        self.current == stage && self.previous != stage
    }

    /// The transition departs `stage` for somewhere else.
    pub fn left(&self, stage: usize) -> bool {
        self.previous == stage && self.current != stage
    }
}

// =============================================================================
// Navigator state
// =============================================================================

/// Single source of truth for the current stage and playback settings.
///
/// Only the navigation systems mutate this resource; every driver and
/// renderer reads it.
#[derive(Resource, Debug, Clone)]
pub struct NavigatorState {
    current_stage: usize,
    is_playing: bool,
    auto_advance: bool,
    speed_multiplier: f32,
    /// Auto-advance loop; its reference time is the last advance.
    advance_loop: TaskSlot,
}

impl Default for NavigatorState {
    fn default() -> Self {
        Self {
            current_stage: 0,
            is_playing: false,
            auto_advance: false,
            speed_multiplier: 1.0,
            advance_loop: TaskSlot::default(),
        }
    }
}

impl NavigatorState {
    pub fn current_stage(&self) -> usize {
        self.current_stage
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn auto_advance(&self) -> bool {
        self.auto_advance
    }

    pub fn speed_multiplier(&self) -> f32 {
        self.speed_multiplier
    }

    /// Commit `index` as the current stage.
    ///
    /// Returns `None` (and changes nothing) when `index` is out of range.
    /// Re-selecting the current stage still returns an event so the content
    /// panel re-renders; subscribers treat `previous == current` as a no-op.
    pub fn goto(&mut self, index: usize, user_initiated: bool) -> Option<StageChanged> {
        if index >= STAGE_COUNT {
            return None;
        }
        let previous = self.current_stage;
        self.current_stage = index;
        Some(StageChanged {
            previous,
            current: index,
            user_initiated,
        })
    }

    pub fn next_index(&self) -> usize {
        (self.current_stage + 1).min(STAGE_COUNT - 1)
    }

    pub fn prev_index(&self) -> usize {
        self.current_stage.saturating_sub(1)
    }

    /// Flip play/pause. Playing starts a fresh auto-advance loop anchored at
    /// `now_ms`; pausing stops it.
    pub fn toggle_play(&mut self, now_ms: f64) -> bool {
        self.is_playing = !self.is_playing;
        if self.is_playing {
            self.advance_loop.start(now_ms);
        } else {
            self.advance_loop.cancel();
        }
        self.is_playing
    }

    /// Set the speed multiplier. Non-finite or non-positive values are
    /// rejected; accepted values are clamped to the supported range.
    pub fn set_speed(&mut self, speed: f32) -> bool {
        if !speed.is_finite() || speed <= 0.0 {
            return false;
        }
        self.speed_multiplier = speed.clamp(MIN_SPEED, MAX_SPEED);
        true
    }

    pub fn set_auto_advance(&mut self, enabled: bool) {
        self.auto_advance = enabled;
    }

    /// Current auto-advance interval, from the live speed multiplier.
    pub fn advance_interval_ms(&self) -> f64 {
        effective_duration_ms(AUTO_ADVANCE_INTERVAL_MS, self.speed_multiplier)
    }

    /// One scheduling decision of the auto-advance loop.
    ///
    /// The interval is recomputed from the live speed on every call, so a
    /// speed change shortens or lengthens the wait for the next advance
    /// without touching time already elapsed.
    pub fn auto_advance_tick(&mut self, now_ms: f64) -> Option<StageChanged> {
        if !self.advance_loop.is_running() {
            return None;
        }
        if !self.is_playing {
            self.advance_loop.cancel();
            return None;
        }
        let elapsed = self.advance_loop.elapsed_ms(now_ms)?;
        if elapsed < self.advance_interval_ms() {
            return None;
        }
        self.advance_loop.rebase(now_ms);

        let mut next = self.current_stage + 1;
        if next >= STAGE_COUNT {
            if self.auto_advance {
                next = 0;
            } else {
                self.is_playing = false;
                self.advance_loop.cancel();
                info!("Navigator: reached final stage, playback stopped");
                return None;
            }
        }
        self.goto(next, false)
    }

    /// Stop playback and its loop (used on shutdown).
    pub fn stop(&mut self) {
        self.is_playing = false;
        self.advance_loop.cancel();
    }

    pub fn advance_loop_running(&self) -> bool {
        self.advance_loop.is_running()
    }
}
