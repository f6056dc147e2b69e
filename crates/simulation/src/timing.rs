//! Shared timing contract for the animation drivers.
//!
//! Every driver scales a baseline duration by the live speed multiplier,
//! normalizes elapsed wall time into `[0, 1]`, and eases the result with
//! [`ease_in_out_cubic`] before applying it to a position, width or color.

use bevy::prelude::*;

use crate::config::MIN_SPEED;

/// Cubic ease-in-out: `4t^3` for the first half, mirrored for the second.
#[inline]
pub fn ease_in_out_cubic(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// `baseline / speed`, with the speed floored so a bad multiplier cannot
/// produce an infinite duration.
#[inline]
pub fn effective_duration_ms(baseline_ms: f64, speed: f32) -> f64 {
    baseline_ms / speed.max(MIN_SPEED) as f64
}

/// Linear progress of `elapsed` through `duration`, clamped to `[0, 1]`.
#[inline]
pub fn linear_progress(elapsed_ms: f64, duration_ms: f64) -> f64 {
    if duration_ms <= 0.0 {
        return 1.0;
    }
    (elapsed_ms / duration_ms).clamp(0.0, 1.0)
}

/// Eased progress of `elapsed` through `duration`.
#[inline]
pub fn eased_progress(elapsed_ms: f64, duration_ms: f64) -> f64 {
    ease_in_out_cubic(linear_progress(elapsed_ms, duration_ms))
}

/// Channel-wise interpolation between two sRGB colors.
pub fn lerp_srgba(from: Srgba, to: Srgba, t: f32) -> Srgba {
    Srgba::new(
        from.red + (to.red - from.red) * t,
        from.green + (to.green - from.green) * t,
        from.blue + (to.blue - from.blue) * t,
        from.alpha + (to.alpha - from.alpha) * t,
    )
}

/// Current engine time in milliseconds.
#[inline]
pub fn now_ms(time: &Time) -> f64 {
    time.elapsed_secs_f64() * 1000.0
}
