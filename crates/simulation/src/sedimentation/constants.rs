// =============================================================================
// Constants
// =============================================================================
//
// Particle coordinates are basin-local: x grows rightward from the left wall,
// y grows downward from the water surface, the floor is at the basin height.

/// Fewest particles an ensemble may have, whatever the efficiency.
pub(crate) const MIN_PARTICLES: usize = 40;

/// Most particles an ensemble may have.
pub(crate) const MAX_PARTICLES: usize = 96;

/// `count = round(COUNT_BASE + efficiency * COUNT_PER_EFFICIENCY)`, then clamped.
pub(crate) const COUNT_BASE: f64 = 24.0;
pub(crate) const COUNT_PER_EFFICIENCY: f64 = 56.0;

/// Radius range at zero efficiency; both ends grow with efficiency.
pub(crate) const RADIUS_MIN_BASE: f32 = 1.5;
pub(crate) const RADIUS_MAX_BASE: f32 = 2.5;
pub(crate) const RADIUS_MIN_PER_EFFICIENCY: f32 = 1.0;
pub(crate) const RADIUS_MAX_PER_EFFICIENCY: f32 = 3.5;

/// Reference radius for the size-dependent sink rate.
pub(crate) const REFERENCE_RADIUS: f32 = 4.0;

/// Downward acceleration (px/s^2) for a particle of reference radius.
pub(crate) const GRAVITY: f32 = 120.0;

/// Linear drag on vertical velocity (1/s); terminal velocity is `GRAVITY / DRAG`.
pub(crate) const DRAG: f32 = 1.6;

/// Horizontal motion is damped relative to vertical.
pub(crate) const HORIZONTAL_SCALE: f32 = 0.3;

/// Fraction of `vx` lost per second.
pub(crate) const VX_DECAY_PER_SEC: f32 = 0.8;

/// Initial horizontal speed range (px/s).
pub(crate) const SPAWN_VX: f32 = 20.0;

/// Initial downward speed range (px/s).
pub(crate) const SPAWN_VY_MAX: f32 = 20.0;

/// Particles spawn in the upper part of the basin.
pub(crate) const SPAWN_DEPTH_FRACTION: f32 = 0.35;

/// Randomized delay (s) a particle rests on the floor before it counts as settled.
pub(crate) const SETTLE_DELAY_MIN: f32 = 0.3;
pub(crate) const SETTLE_DELAY_MAX: f32 = 1.5;

/// Floor wobble speed (rad/s) and horizontal amplitude (px/s).
pub(crate) const WOBBLE_RATE: f32 = 9.0;
pub(crate) const WOBBLE_AMPLITUDE: f32 = 6.0;

/// Depth of the static sludge layer at the bottom of the basin.
pub const SLUDGE_DEPTH: f32 = 18.0;

/// Render opacity of a particle still in motion and of a settled one.
pub const FALLING_OPACITY: f32 = 0.55;
pub const SETTLED_OPACITY: f32 = 0.9;
