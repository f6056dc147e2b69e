use bevy::prelude::*;

use simulation::anchors::PresentationAnchors;
use simulation::sedimentation::SedimentationSystem;

/// Floc particle color before opacity is applied.
const PARTICLE_COLOR: Srgba = Srgba::rgb(0.42, 0.33, 0.2);

/// Map a basin-local point (origin top-left, y down) into world space.
pub fn basin_to_world(basin: Rect, local: Vec2) -> Vec2 {
    Vec2::new(basin.min.x + local.x, basin.max.y - local.y)
}

/// Draw the settling particles while the sedimentation stage is showing.
pub fn draw_particles(
    sedimentation: Res<SedimentationSystem>,
    anchors: Res<PresentationAnchors>,
    mut gizmos: Gizmos,
) {
    if !sedimentation.is_active() {
        return;
    }
    let Some(basin) = anchors.basin else {
        return;
    };
    for particle in sedimentation.particles() {
        let center = basin_to_world(basin, particle.position);
        gizmos.circle_2d(
            Isometry2d::from_translation(center),
            particle.radius,
            PARTICLE_COLOR.with_alpha(particle.opacity()),
        );
    }
}
