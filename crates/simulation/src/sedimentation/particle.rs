use bevy::prelude::*;
use rand::Rng;

use super::constants::*;

/// One floc particle in the settling basin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Basin-local position (y grows downward).
    pub position: Vec2,
    pub radius: f32,
    pub velocity: Vec2,
    /// Resting on the floor with its settle delay used up.
    pub settled: bool,
    /// Seconds left on the floor before it counts as settled; `None` while falling.
    pub settle_delay_remaining: Option<f32>,
    pub wobble_phase: f32,
}

impl Particle {
    /// Spawn a particle near the surface of a basin of `basin_size`.
    pub fn spawn(rng: &mut impl Rng, basin_size: Vec2, radius_range: (f32, f32)) -> Self {
        let radius = uniform(rng, radius_range.0, radius_range.1);
        let x = uniform(rng, radius, basin_size.x - radius);
        let y = uniform(rng, 0.0, basin_size.y * SPAWN_DEPTH_FRACTION);
        Self {
            position: Vec2::new(x, y),
            radius,
            velocity: Vec2::new(uniform(rng, -SPAWN_VX, SPAWN_VX), uniform(rng, 0.0, SPAWN_VY_MAX)),
            settled: false,
            settle_delay_remaining: None,
            wobble_phase: uniform(rng, 0.0, std::f32::consts::TAU),
        }
    }

    pub fn on_floor(&self) -> bool {
        self.settle_delay_remaining.is_some()
    }

    pub fn opacity(&self) -> f32 {
        if self.settled {
            SETTLED_OPACITY
        } else {
            FALLING_OPACITY
        }
    }

    /// Resting height of the particle centre.
    fn floor_y(&self, basin_size: Vec2) -> f32 {
        basin_size.y - self.radius
    }

    /// Integrate one frame. `dt` is in seconds; `speed` is the live multiplier.
    ///
    /// Falling: gravity (scaled by size) against linear drag, `vx` decays.
    /// On the floor: no bounce; the particle wobbles in x while its delay
    /// counts down, then it is settled and stops moving.
    pub fn step(&mut self, dt: f32, speed: f32, basin_size: Vec2, rng: &mut impl Rng) {
        if self.settled {
            return;
        }
        let scaled = dt * speed;

        if let Some(remaining) = self.settle_delay_remaining {
            self.wobble_phase += WOBBLE_RATE * scaled;
            self.position.x += self.wobble_phase.cos() * WOBBLE_AMPLITUDE * scaled;
            let remaining = remaining - scaled;
            if remaining <= 0.0 {
                self.settled = true;
                self.settle_delay_remaining = Some(0.0);
            } else {
                self.settle_delay_remaining = Some(remaining);
            }
        } else {
            let sink = GRAVITY * (0.6 + 0.4 * self.radius / REFERENCE_RADIUS);
            self.velocity.y += (sink - DRAG * self.velocity.y) * scaled;
            self.velocity.x *= (1.0 - VX_DECAY_PER_SEC * scaled).max(0.0);

            self.position.y += self.velocity.y * scaled;
            self.position.x += self.velocity.x * scaled * HORIZONTAL_SCALE;

            let floor = self.floor_y(basin_size);
            if self.position.y >= floor {
                self.position.y = floor;
                self.velocity = Vec2::ZERO;
                self.settle_delay_remaining = Some(uniform(rng, SETTLE_DELAY_MIN, SETTLE_DELAY_MAX));
            }
        }

        let max_x = (basin_size.x - self.radius).max(self.radius);
        self.position.x = self.position.x.clamp(self.radius, max_x);
    }
}

/// Count of particles for an ensemble at `efficiency`: non-decreasing in
/// efficiency, never below [`MIN_PARTICLES`].
pub fn particle_count(efficiency: f64) -> usize {
    let raw = (COUNT_BASE + efficiency.max(0.0) * COUNT_PER_EFFICIENCY).round() as usize;
    raw.clamp(MIN_PARTICLES, MAX_PARTICLES)
}

/// `(min, max)` radius for an ensemble at `efficiency`. Denser floc is bigger.
pub fn radius_range(efficiency: f64) -> (f32, f32) {
    let eff = efficiency.max(0.0) as f32;
    (
        RADIUS_MIN_BASE + eff * RADIUS_MIN_PER_EFFICIENCY,
        RADIUS_MAX_BASE + eff * RADIUS_MAX_PER_EFFICIENCY,
    )
}

/// Uniform sample in `[lo, hi)`, or `lo` when the range is empty.
fn uniform(rng: &mut impl Rng, lo: f32, hi: f32) -> f32 {
    if hi > lo {
        rng.gen_range(lo..hi)
    } else {
        lo
    }
}
