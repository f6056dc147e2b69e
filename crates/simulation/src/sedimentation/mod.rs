//! Sedimentation particle system.
//!
//! Floc particles sink through the settling basin under gravity and drag,
//! rest on the floor for a randomized delay, then count as settled. The
//! ensemble only exists while the sedimentation stage is current.

mod constants;
mod particle;
mod resources;
mod systems;
mod tests;

pub use constants::{FALLING_OPACITY, SETTLED_OPACITY, SLUDGE_DEPTH};
pub use particle::{particle_count, radius_range, Particle};
pub use resources::{sludge_rect, SedimentationSystem};
pub use systems::{animate_sedimentation, sync_sedimentation};
