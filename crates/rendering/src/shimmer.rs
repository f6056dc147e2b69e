use bevy::prelude::*;

use simulation::anchors::{PresentationAnchors, STAGE_BLOCK_SIZE};
use simulation::config::SHIMMER_RANGE_PX;
use simulation::shimmer::ShimmerLoop;

const GLINT_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.35);

/// Horizontal glint position inside a block for a given mask offset.
pub fn glint_x(offset: f32) -> f32 {
    let t = (offset / SHIMMER_RANGE_PX).clamp(0.0, 1.0);
    (t - 0.5) * STAGE_BLOCK_SIZE.x
}

/// A slanted highlight line sweeping across every stage block.
pub fn draw_shimmer(
    shimmer: Res<ShimmerLoop>,
    anchors: Res<PresentationAnchors>,
    mut gizmos: Gizmos,
) {
    if !shimmer.is_running() {
        return;
    }
    let x = glint_x(shimmer.offset());
    let half_h = STAGE_BLOCK_SIZE.y / 2.0;
    let half_w = STAGE_BLOCK_SIZE.x / 2.0;
    for center in anchors.stages.iter().flatten() {
        let top = *center + Vec2::new((x + 8.0).min(half_w), half_h);
        let bottom = *center + Vec2::new((x - 8.0).max(-half_w), -half_h);
        gizmos.line_2d(bottom, top, GLINT_COLOR);
    }
}
