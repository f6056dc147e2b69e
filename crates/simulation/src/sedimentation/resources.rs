use bevy::prelude::*;
use rand::Rng;

use crate::tasks::{TaskHandle, TaskSlot};

use super::constants::SLUDGE_DEPTH;
use super::particle::{particle_count, radius_range, Particle};

// =============================================================================
// Resources
// =============================================================================

/// The particle ensemble of the settling basin.
///
/// Only alive while the sedimentation stage is current. Every entry discards
/// the previous ensemble and spawns a fresh one; leaving tears it down.
#[derive(Resource, Debug, Clone, Default)]
pub struct SedimentationSystem {
    particles: Vec<Particle>,
    basin_size: Vec2,
    efficiency: f64,
    task: TaskSlot,
    visits: u32,
}

impl SedimentationSystem {
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn basin_size(&self) -> Vec2 {
        self.basin_size
    }

    /// Efficiency the current ensemble was spawned with.
    pub fn efficiency(&self) -> f64 {
        self.efficiency
    }

    /// Number of times the ensemble has been spawned this session.
    pub fn visits(&self) -> u32 {
        self.visits
    }

    pub fn is_active(&self) -> bool {
        self.task.is_running()
    }

    pub fn handle(&self) -> Option<TaskHandle> {
        self.task.current()
    }

    pub fn settled_count(&self) -> usize {
        self.particles.iter().filter(|p| p.settled).count()
    }

    /// Static sludge layer, in basin-local coordinates.
    pub fn sludge_rect(&self) -> Rect {
        sludge_rect(self.basin_size)
    }

    /// Discard any previous ensemble and spawn a fresh one sized for
    /// `efficiency` inside a basin of `basin_size`.
    pub fn enter(
        &mut self,
        efficiency: f64,
        basin_size: Vec2,
        rng: &mut impl Rng,
        now_ms: f64,
    ) -> TaskHandle {
        let count = particle_count(efficiency);
        let radii = radius_range(efficiency);
        self.particles.clear();
        self.particles
            .extend((0..count).map(|_| Particle::spawn(rng, basin_size, radii)));
        self.basin_size = basin_size;
        self.efficiency = efficiency;
        self.visits += 1;
        self.task.start(now_ms)
    }

    /// Stop the loop and drop the ensemble. Idempotent.
    pub fn teardown(&mut self) -> bool {
        self.particles.clear();
        self.task.cancel()
    }

    /// Integrate one frame under `handle`. A stale handle does nothing.
    pub fn step(&mut self, handle: TaskHandle, dt: f32, speed: f32, rng: &mut impl Rng) -> bool {
        if !self.task.is_live(handle) {
            return false;
        }
        let basin_size = self.basin_size;
        for particle in &mut self.particles {
            particle.step(dt, speed, basin_size, rng);
        }
        true
    }
}

/// Sludge layer along the floor of a basin of `basin_size`.
pub fn sludge_rect(basin_size: Vec2) -> Rect {
    let depth = SLUDGE_DEPTH.min(basin_size.y.max(0.0));
    Rect::new(0.0, basin_size.y - depth, basin_size.x, basin_size.y)
}
