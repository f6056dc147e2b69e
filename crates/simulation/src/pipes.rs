//! Pipe fill animator.
//!
//! There is one segment per adjacent stage pair. A single forward step
//! `(from, from + 1)` fills that segment from zero to full width; backward
//! moves and skips fill nothing. At most one segment is "active" (highlighted
//! while filling) at a time.

use bevy::prelude::*;

use crate::anchors::PresentationAnchors;
use crate::config::{PIPE_FILL_MS, PIPE_FULL_WIDTH, STAGE_COUNT};
use crate::navigator::{NavigatorState, StageChanged};
use crate::stages::water_color;
use crate::tasks::{TaskHandle, TaskSlot};
use crate::timing::{eased_progress, effective_duration_ms, linear_progress, now_ms};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipeSegment {
    pub from: usize,
    pub to: usize,
    /// Eased fill fraction in `[0, 1]`.
    pub fill_progress: f32,
    pub filled: bool,
    pub active: bool,
}

impl PipeSegment {
    fn new(from: usize) -> Self {
        Self {
            from,
            to: from + 1,
            fill_progress: 0.0,
            filled: false,
            active: false,
        }
    }

    /// Rendered fill width.
    pub fn fill_width(&self) -> f32 {
        self.fill_progress * PIPE_FULL_WIDTH
    }

    /// Fill color: the water color of the destination stage.
    pub fn color(&self) -> Srgba {
        water_color(self.to)
    }
}

#[derive(Resource, Debug, Clone)]
pub struct PipeNetwork {
    segments: Vec<PipeSegment>,
    fill_task: TaskSlot,
    fill_duration_ms: f64,
}

impl Default for PipeNetwork {
    fn default() -> Self {
        Self {
            segments: (0..STAGE_COUNT - 1).map(PipeSegment::new).collect(),
            fill_task: TaskSlot::default(),
            fill_duration_ms: PIPE_FILL_MS,
        }
    }
}

impl PipeNetwork {
    pub fn segments(&self) -> &[PipeSegment] {
        &self.segments
    }

    pub fn segment(&self, from: usize, to: usize) -> Option<&PipeSegment> {
        self.segments.iter().find(|s| s.from == from && s.to == to)
    }

    pub fn active_segment(&self) -> Option<&PipeSegment> {
        self.segments.iter().find(|s| s.active)
    }

    pub fn fill_handle(&self) -> Option<TaskHandle> {
        self.fill_task.current()
    }

    pub fn is_filling(&self) -> bool {
        self.fill_task.is_running()
    }

    /// Start filling `(from, to)`. Returns `false` without touching anything
    /// unless `to == from + 1` and the pipe anchor exists.
    pub fn begin_fill(
        &mut self,
        from: usize,
        to: usize,
        anchors: &PresentationAnchors,
        now_ms: f64,
        speed: f32,
    ) -> bool {
        if to != from + 1 || anchors.pipe(from, to).is_none() {
            return false;
        }
        let Some(index) = self.segments.iter().position(|s| s.from == from) else {
            return false;
        };

        self.finish_active();
        let segment = &mut self.segments[index];
        segment.fill_progress = 0.0;
        segment.filled = false;
        segment.active = true;
        self.fill_duration_ms = effective_duration_ms(PIPE_FILL_MS, speed);
        self.fill_task.start(now_ms);
        true
    }

    /// Complete whichever fill is in progress.
    fn finish_active(&mut self) {
        self.fill_task.cancel();
        for segment in self.segments.iter_mut().filter(|s| s.active) {
            segment.fill_progress = 1.0;
            segment.filled = true;
            segment.active = false;
        }
    }

    /// Advance the fill under `handle`. Stale handles are ignored.
    pub fn step(&mut self, handle: TaskHandle, now_ms: f64) -> bool {
        if !self.fill_task.is_live(handle) {
            return false;
        }
        let Some(elapsed) = self.fill_task.elapsed_ms(now_ms) else {
            return false;
        };
        if linear_progress(elapsed, self.fill_duration_ms) >= 1.0 {
            self.finish_active();
        } else {
            let progress = eased_progress(elapsed, self.fill_duration_ms) as f32;
            for segment in self.segments.iter_mut().filter(|s| s.active) {
                segment.fill_progress = progress;
            }
        }
        true
    }

    /// Cancel any fill in progress. An interrupted segment keeps its partial
    /// width but loses the active highlight.
    pub fn stop(&mut self) {
        self.fill_task.cancel();
        for segment in &mut self.segments {
            segment.active = false;
        }
    }
}

/// Stage-change subscriber: fill the pipe for a single forward step.
pub fn start_pipe_fill(
    mut events: EventReader<StageChanged>,
    anchors: Res<PresentationAnchors>,
    nav: Res<NavigatorState>,
    time: Res<Time>,
    mut pipes: ResMut<PipeNetwork>,
) {
    for event in events.read() {
        if !event.is_forward_step() {
            continue;
        }
        if !pipes.begin_fill(
            event.previous,
            event.current,
            &anchors,
            now_ms(&time),
            nav.speed_multiplier(),
        ) {
            debug!(
                "Pipes: no segment anchor for {} -> {}",
                event.previous, event.current
            );
        }
    }
}

pub fn animate_pipes(time: Res<Time>, mut pipes: ResMut<PipeNetwork>) {
    if let Some(handle) = pipes.fill_handle() {
        pipes.step(handle, now_ms(&time));
    }
}
