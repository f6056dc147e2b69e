//! Floc preview for the lab panel: background specks plus floc clusters
//! whose number, size and tint follow the coagulation efficiency.
//!
//! Coordinates are normalized to `[0, 1]` on both axes; the painter scales
//! them into whatever rectangle it draws into. Radii are in points.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::model::{SimulationRecomputed, SimulationResult};

pub const SPECK_COUNT: usize = 60;
pub const SPECK_COLOR: Srgba = Srgba::new(200.0 / 255.0, 220.0 / 255.0, 1.0, 0.4);
pub const BACKGROUND_TOP: [u8; 3] = [0x13, 0x3b, 0x55];
pub const BACKGROUND_BOTTOM: [u8; 3] = [0x0a, 0x25, 0x34];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blob {
    pub center: Vec2,
    pub radius: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlocCluster {
    pub core: Blob,
    pub sub_blobs: Vec<Blob>,
}

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct FlocPreview {
    pub efficiency: f64,
    pub specks: Vec<Blob>,
    pub clusters: Vec<FlocCluster>,
    pub tint: Srgba,
}

impl Default for FlocPreview {
    fn default() -> Self {
        Self::generate(SimulationResult::default().efficiency)
    }
}

pub fn cluster_count(efficiency: f64) -> usize {
    (10.0 + efficiency * 20.0).round().max(0.0) as usize
}

pub fn sub_blob_count(efficiency: f64) -> usize {
    3 + (efficiency * 4.0).round().max(0.0) as usize
}

pub fn cluster_tint(efficiency: f64) -> Srgba {
    let e = efficiency as f32;
    Srgba::new(
        ((40.0 + e * 80.0) / 255.0).min(1.0),
        ((120.0 + e * 80.0) / 255.0).min(1.0),
        ((180.0 + e * 40.0) / 255.0).min(1.0),
        0.75,
    )
}

impl FlocPreview {
    /// Same efficiency, same picture.
    pub fn generate(efficiency: f64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(efficiency.to_bits());
        let eff = efficiency.max(0.0) as f32;

        let specks = (0..SPECK_COUNT)
            .map(|_| Blob {
                center: Vec2::new(rng.gen::<f32>(), rng.gen::<f32>()),
                radius: 1.0 + rng.gen::<f32>() * 2.0,
            })
            .collect();

        let subs = sub_blob_count(efficiency);
        let clusters = (0..cluster_count(efficiency))
            .map(|_| {
                let center = Vec2::new(rng.gen::<f32>(), rng.gen::<f32>());
                let radius = 4.0 + rng.gen::<f32>() * 8.0 * eff;
                let sub_blobs = (0..subs)
                    .map(|s| {
                        let angle = s as f32 / subs as f32 * std::f32::consts::TAU;
                        Blob {
                            // Offset in points; the painter adds it after scaling `center`.
                            center: Vec2::from_angle(angle) * radius * 0.6,
                            radius: radius * 0.35,
                        }
                    })
                    .collect();
                FlocCluster {
                    core: Blob { center, radius },
                    sub_blobs,
                }
            })
            .collect();

        Self {
            efficiency,
            specks,
            clusters,
            tint: cluster_tint(efficiency),
        }
    }
}

pub fn regenerate_floc(
    mut recomputed: EventReader<SimulationRecomputed>,
    mut floc: ResMut<FlocPreview>,
) {
    if let Some(last) = recomputed.read().last() {
        if last.efficiency != floc.efficiency {
            *floc = FlocPreview::generate(last.efficiency);
        }
    }
}
