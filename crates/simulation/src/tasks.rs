//! Cancellable per-driver animation tasks.
//!
//! Each looping driver owns one [`TaskSlot`]. Starting the slot hands out a
//! fresh [`TaskHandle`] and invalidates whatever handle was live before, so at
//! most one loop per driver is ever active. Frame systems check
//! [`TaskSlot::is_live`] with the handle they were scheduled under before doing
//! any work; a handle from a stopped or restarted loop is simply ignored.

/// Identifies one run of a driver loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle {
    generation: u64,
}

impl TaskHandle {
    pub fn generation(self) -> u64 {
        self.generation
    }
}

/// Bookkeeping for the single active run of a driver loop.
#[derive(Debug, Clone, Default)]
pub struct TaskSlot {
    generation: u64,
    active: Option<ActiveTask>,
}

#[derive(Debug, Clone, Copy)]
struct ActiveTask {
    handle: TaskHandle,
    started_ms: f64,
}

impl TaskSlot {
    /// Start a new run at `now_ms`, cancelling any previous run.
    pub fn start(&mut self, now_ms: f64) -> TaskHandle {
        self.generation = self.generation.wrapping_add(1);
        let handle = TaskHandle {
            generation: self.generation,
        };
        self.active = Some(ActiveTask {
            handle,
            started_ms: now_ms,
        });
        handle
    }

    /// Stop the current run. Returns whether anything was running.
    /// Calling this on an idle slot is a no-op.
    pub fn cancel(&mut self) -> bool {
        self.active.take().is_some()
    }

    /// Whether `handle` identifies the run that is currently active.
    pub fn is_live(&self, handle: TaskHandle) -> bool {
        self.active.is_some_and(|a| a.handle == handle)
    }

    /// Handle of the active run, if any.
    pub fn current(&self) -> Option<TaskHandle> {
        self.active.map(|a| a.handle)
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Start time of the active run.
    pub fn started_ms(&self) -> Option<f64> {
        self.active.map(|a| a.started_ms)
    }

    /// Move the reference time of the active run (used by loops that
    /// measure intervals from their last tick rather than from start).
    pub fn rebase(&mut self, now_ms: f64) {
        if let Some(active) = self.active.as_mut() {
            active.started_ms = now_ms;
        }
    }

    /// Milliseconds since the active run started.
    pub fn elapsed_ms(&self, now_ms: f64) -> Option<f64> {
        self.active.map(|a| now_ms - a.started_ms)
    }
}
