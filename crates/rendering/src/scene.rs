//! One-time scaffolding of the pipeline scene.
//!
//! Everything is laid out from `PresentationAnchors`. Missing anchors simply
//! produce no entity; the per-frame sync systems then have nothing to update
//! for that piece.

use bevy::prelude::*;
use bevy::sprite::Anchor;

use simulation::anchors::{PresentationAnchors, STAGE_BLOCK_SIZE};
use simulation::config::PIPE_FULL_WIDTH;
use simulation::droplet::DropletState;
use simulation::navigator::NavigatorState;
use simulation::sedimentation::sludge_rect;
use simulation::stages::STAGES;

use crate::highlight::block_color;

pub const DROPLET_RADIUS: f32 = 12.0;
pub const PIPE_THICKNESS: f32 = 12.0;

const PIPE_COLOR: Color = Color::srgb(0.72, 0.76, 0.8);
const BASIN_COLOR: Color = Color::srgba(0.45, 0.62, 0.78, 0.35);
const SLUDGE_COLOR: Color = Color::srgba(0.36, 0.27, 0.16, 0.45);
const LABEL_COLOR: Color = Color::srgb(0.1, 0.14, 0.2);

// Draw order.
const Z_BASIN: f32 = 0.0;
const Z_SLUDGE: f32 = 0.1;
const Z_PIPE: f32 = 0.2;
const Z_PIPE_FILL: f32 = 0.3;
const Z_BLOCK: f32 = 0.5;
const Z_LABEL: f32 = 0.6;
const Z_DROPLET: f32 = 1.0;

#[derive(Component, Debug, Clone, Copy)]
pub struct StageBlock {
    pub index: usize,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct PipeFillSprite {
    pub from: usize,
    pub to: usize,
}

#[derive(Component)]
pub struct DropletMarker;

/// Handle of the droplet's material, recolored every frame.
#[derive(Resource)]
pub struct DropletMaterial(pub Handle<ColorMaterial>);

#[derive(Component)]
pub struct BasinWater;

#[derive(Component)]
pub struct SludgeLayer;

pub fn spawn_scene(
    mut commands: Commands,
    anchors: Res<PresentationAnchors>,
    nav: Res<NavigatorState>,
    droplet: Res<DropletState>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    let current = nav.current_stage();

    for stage in &STAGES {
        let Some(center) = anchors.stage(stage.index) else {
            continue;
        };
        commands
            .spawn((
                StageBlock { index: stage.index },
                Sprite {
                    color: block_color(stage, stage.index == current),
                    custom_size: Some(STAGE_BLOCK_SIZE),
                    ..default()
                },
                Transform::from_translation(center.extend(Z_BLOCK)),
            ))
            .with_children(|parent| {
                parent.spawn((
                    Text2d::new(stage.title),
                    TextFont {
                        font_size: 11.0,
                        ..default()
                    },
                    TextColor(LABEL_COLOR),
                    Transform::from_xyz(0.0, -STAGE_BLOCK_SIZE.y / 2.0 - 12.0, Z_LABEL - Z_BLOCK),
                ));
            });
    }

    for pipe in &anchors.pipes {
        commands.spawn((
            Sprite {
                color: PIPE_COLOR,
                custom_size: Some(Vec2::new(PIPE_FULL_WIDTH, PIPE_THICKNESS)),
                anchor: Anchor::CenterLeft,
                ..default()
            },
            Transform::from_translation(pipe.start.extend(Z_PIPE)),
        ));
        commands.spawn((
            PipeFillSprite {
                from: pipe.from,
                to: pipe.to,
            },
            Sprite {
                custom_size: Some(Vec2::new(0.0, PIPE_THICKNESS * 0.6)),
                anchor: Anchor::CenterLeft,
                ..default()
            },
            Transform::from_translation(pipe.start.extend(Z_PIPE_FILL)),
        ));
    }

    if let Some(basin) = anchors.basin {
        commands.spawn((
            BasinWater,
            Sprite {
                color: BASIN_COLOR,
                custom_size: Some(basin.size()),
                ..default()
            },
            Transform::from_translation(basin.center().extend(Z_BASIN)),
        ));

        // Basin-local rect (y down) mapped into world space.
        let sludge = sludge_rect(basin.size());
        let center = Vec2::new(
            basin.min.x + sludge.center().x,
            basin.max.y - sludge.center().y,
        );
        commands.spawn((
            SludgeLayer,
            Sprite {
                color: SLUDGE_COLOR,
                custom_size: Some(sludge.size()),
                ..default()
            },
            Transform::from_translation(center.extend(Z_SLUDGE)),
        ));
    }

    let material = materials.add(ColorMaterial::from(Color::from(droplet.color())));
    commands.insert_resource(DropletMaterial(material.clone()));
    commands.spawn((
        DropletMarker,
        Mesh2d(meshes.add(Circle::new(DROPLET_RADIUS))),
        MeshMaterial2d(material),
        Transform::from_translation(droplet.position().extend(Z_DROPLET)),
    ));

    info!(
        "Scene: {} stage blocks, {} pipes, basin {}",
        anchors.stages.iter().flatten().count(),
        anchors.pipes.len(),
        if anchors.basin.is_some() { "present" } else { "absent" }
    );
}
