//! Geometry the drivers read from the presentation surface.
//!
//! The rendering crate lays the scene out from [`PresentationAnchors`]; the
//! drivers read the same anchors to know where the droplet should travel, which
//! pipe segments exist and where the settling basin sits. Any anchor may be
//! missing, in which case the dependent driver quietly does nothing for it.

use bevy::prelude::*;

use crate::config::STAGE_COUNT;

/// Horizontal spacing between stage block centres.
pub const STAGE_SPACING: f32 = 200.0;
/// Size of a stage block.
pub const STAGE_BLOCK_SIZE: Vec2 = Vec2::new(104.0, 80.0);
/// Vertical position of the stage row.
pub const STAGE_ROW_Y: f32 = 140.0;
/// Size of the sedimentation basin.
pub const BASIN_SIZE: Vec2 = Vec2::new(280.0, 160.0);

/// Start of one pipe segment between two adjacent stage blocks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipeAnchor {
    pub from: usize,
    pub to: usize,
    /// Left end of the pipe; the fill grows rightward from here.
    pub start: Vec2,
}

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct PresentationAnchors {
    /// Droplet anchor point per stage.
    pub stages: [Option<Vec2>; STAGE_COUNT],
    pub pipes: Vec<PipeAnchor>,
    /// Settling basin in world coordinates.
    pub basin: Option<Rect>,
}

impl Default for PresentationAnchors {
    fn default() -> Self {
        Self::standard()
    }
}

impl PresentationAnchors {
    /// The standard left-to-right pipeline layout, centred on the origin.
    pub fn standard() -> Self {
        let first_x = -STAGE_SPACING * (STAGE_COUNT as f32 - 1.0) / 2.0;
        let stages: [Option<Vec2>; STAGE_COUNT] = std::array::from_fn(|i| {
            Some(Vec2::new(first_x + i as f32 * STAGE_SPACING, STAGE_ROW_Y))
        });
        let pipes = (0..STAGE_COUNT - 1)
            .map(|from| PipeAnchor {
                from,
                to: from + 1,
                start: Vec2::new(
                    first_x + from as f32 * STAGE_SPACING + STAGE_BLOCK_SIZE.x / 2.0,
                    STAGE_ROW_Y - STAGE_BLOCK_SIZE.y / 4.0,
                ),
            })
            .collect();
        let basin_center = Vec2::new(
            first_x + crate::config::SEDIMENTATION_STAGE as f32 * STAGE_SPACING,
            STAGE_ROW_Y - STAGE_BLOCK_SIZE.y / 2.0 - 40.0 - BASIN_SIZE.y / 2.0,
        );
        Self {
            stages,
            pipes,
            basin: Some(Rect::from_center_size(basin_center, BASIN_SIZE)),
        }
    }

    /// A surface with no anchors at all.
    pub fn empty() -> Self {
        Self {
            stages: [None; STAGE_COUNT],
            pipes: Vec::new(),
            basin: None,
        }
    }

    pub fn stage(&self, index: usize) -> Option<Vec2> {
        self.stages.get(index).copied().flatten()
    }

    pub fn pipe(&self, from: usize, to: usize) -> Option<&PipeAnchor> {
        self.pipes.iter().find(|p| p.from == from && p.to == to)
    }

    /// Fallback droplet position when its live position is unusable.
    pub fn baseline(&self) -> Vec2 {
        self.stage(0).unwrap_or(Vec2::ZERO)
    }

    /// Index of the stage block containing `point`, if any.
    pub fn stage_at(&self, point: Vec2) -> Option<usize> {
        self.stages.iter().enumerate().find_map(|(i, anchor)| {
            anchor
                .filter(|a| Rect::from_center_size(*a, STAGE_BLOCK_SIZE).contains(point))
                .map(|_| i)
        })
    }
}
