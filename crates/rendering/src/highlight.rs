use bevy::prelude::*;

use simulation::navigator::StageChanged;
use simulation::stages::{stage, Stage};

use crate::scene::StageBlock;

/// Alpha of stage blocks that are not the current stage.
const INACTIVE_ALPHA: f32 = 0.35;

/// The stage block currently drawn as active.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ActiveStage(pub usize);

pub fn block_color(stage: &Stage, active: bool) -> Color {
    if active {
        stage.accent()
    } else {
        stage.accent().with_alpha(INACTIVE_ALPHA)
    }
}

/// Stage-change subscriber: exactly one block is drawn active.
pub fn highlight_active_stage(
    mut events: EventReader<StageChanged>,
    mut active: ResMut<ActiveStage>,
    mut blocks: Query<(&StageBlock, &mut Sprite)>,
) {
    let Some(last) = events.read().last() else {
        return;
    };
    active.0 = last.current;
    for (block, mut sprite) in &mut blocks {
        if let Some(s) = stage(block.index) {
            sprite.color = block_color(s, block.index == active.0);
        }
    }
}
