//! Per-frame copy of engine state onto the scene entities.

use bevy::prelude::*;

use simulation::droplet::DropletState;
use simulation::pipes::PipeNetwork;

use crate::scene::{DropletMarker, DropletMaterial, PipeFillSprite};

/// Extra brightness applied to the segment that is filling right now.
const ACTIVE_GLOW: f32 = 0.25;

pub fn sync_droplet(
    droplet: Res<DropletState>,
    material: Option<Res<DropletMaterial>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut markers: Query<&mut Transform, With<DropletMarker>>,
) {
    for mut transform in &mut markers {
        let position = droplet.position();
        transform.translation.x = position.x;
        transform.translation.y = position.y;
    }
    let Some(material) = material else {
        return;
    };
    if let Some(mat) = materials.get_mut(&material.0) {
        mat.color = Color::from(droplet.color());
    }
}

pub fn fill_sprite_color(color: Srgba, active: bool) -> Color {
    if active {
        Color::from(color.mix(&Srgba::WHITE, ACTIVE_GLOW))
    } else {
        Color::from(color)
    }
}

pub fn sync_pipes(pipes: Res<PipeNetwork>, mut fills: Query<(&PipeFillSprite, &mut Sprite)>) {
    if !pipes.is_changed() {
        return;
    }
    for (fill, mut sprite) in &mut fills {
        let Some(segment) = pipes.segment(fill.from, fill.to) else {
            continue;
        };
        let height = sprite.custom_size.map_or(0.0, |s| s.y);
        sprite.custom_size = Some(Vec2::new(segment.fill_width(), height));
        sprite.color = fill_sprite_color(segment.color(), segment.active);
    }
}
