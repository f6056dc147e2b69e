use bevy::prelude::*;

use crate::anchors::PresentationAnchors;
use crate::config::SEDIMENTATION_STAGE;
use crate::model::SimulationResult;
use crate::navigator::{NavigatorState, StageChanged};
use crate::sim_rng::SimRng;
use crate::timing::now_ms;

use super::resources::SedimentationSystem;

/// Stage-change subscriber: spawn on entering the sedimentation stage, tear
/// down on leaving it.
pub fn sync_sedimentation(
    mut events: EventReader<StageChanged>,
    anchors: Res<PresentationAnchors>,
    result: Res<SimulationResult>,
    time: Res<Time>,
    mut rng: ResMut<SimRng>,
    mut sedimentation: ResMut<SedimentationSystem>,
) {
    for event in events.read() {
        if event.left(SEDIMENTATION_STAGE) && sedimentation.teardown() {
            info!("Sedimentation: torn down");
        }
        if event.entered(SEDIMENTATION_STAGE) {
            let Some(basin) = anchors.basin else {
                debug!("Sedimentation: no basin on the presentation surface");
                continue;
            };
            sedimentation.enter(result.efficiency, basin.size(), &mut rng.0, now_ms(&time));
            info!(
                "Sedimentation: spawned {} particles (efficiency {:.2}, visit {})",
                sedimentation.particles().len(),
                result.efficiency,
                sedimentation.visits()
            );
        }
    }
}

/// Per-frame particle integration.
pub fn animate_sedimentation(
    nav: Res<NavigatorState>,
    time: Res<Time>,
    mut rng: ResMut<SimRng>,
    mut sedimentation: ResMut<SedimentationSystem>,
) {
    let Some(handle) = sedimentation.handle() else {
        return;
    };
    sedimentation.step(handle, time.delta_secs(), nav.speed_multiplier(), &mut rng.0);
}
