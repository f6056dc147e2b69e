use crate::anchors::PresentationAnchors;
use crate::chart_data::ChartCache;
use crate::config::{DROPLET_BOB_AMPLITUDE, SEDIMENTATION_STAGE};
use crate::floc::FlocPreview;
use crate::sedimentation::particle_count;
use crate::shimmer::ShimmerLoop;
use crate::stages::water_color;
use crate::test_harness::TestEngine;

const BOB_TOLERANCE: f32 = DROPLET_BOB_AMPLITUDE + 0.01;

// ====================================================================
// Droplet
// ====================================================================

#[test]
fn test_droplet_starts_on_first_stage() {
    let engine = TestEngine::new();
    engine.assert_droplet_at_stage(0, BOB_TOLERANCE);
}

#[test]
fn test_skip_to_last_stage_moves_droplet_without_pipe() {
    let mut engine = TestEngine::new();
    engine.goto(5);
    assert!(engine.droplet().is_moving());
    engine.advance_ms(800);
    engine.assert_droplet_at_stage(5, BOB_TOLERANCE);
    assert_eq!(engine.droplet().color(), water_color(5));
    assert!(engine.pipes().active_segment().is_none());
    assert!(engine.pipes().segments().iter().all(|s| !s.filled));
}

#[test]
fn test_retarget_mid_move_does_not_snap() {
    let mut engine = TestEngine::new();
    engine.goto(3);
    engine.advance_ms(300);
    let before = engine.droplet().position();
    engine.goto(1);
    let after = engine.droplet().position();
    assert!(
        before.distance(after) < 5.0,
        "droplet jumped from {before} to {after}"
    );
    engine.advance_ms(800);
    engine.assert_droplet_at_stage(1, BOB_TOLERANCE);
}

#[test]
fn test_droplet_bobs_after_arrival() {
    let mut engine = TestEngine::new();
    engine.goto(1);
    engine.advance_ms(800);
    assert!(engine.droplet().is_bobbing());
    let mut ys = Vec::new();
    for _ in 0..30 {
        engine.advance_ms(50);
        ys.push(engine.droplet().position().y);
    }
    let spread = ys.iter().cloned().fold(f32::MIN, f32::max) - ys.iter().cloned().fold(f32::MAX, f32::min);
    assert!(spread > 1.0, "droplet did not bob (spread {spread})");
    engine.assert_droplet_at_stage(1, BOB_TOLERANCE);
}

// ====================================================================
// Pipes
// ====================================================================

#[test]
fn test_forward_step_fills_one_pipe() {
    let mut engine = TestEngine::new();
    engine.goto(1);
    assert_eq!(engine.pipes().active_segment().map(|s| (s.from, s.to)), Some((0, 1)));
    engine.advance_ms(1000);
    let seg = engine.pipes().segment(0, 1).unwrap();
    assert!(seg.filled);
    assert!(!seg.active);
}

#[test]
fn test_backward_and_skip_fill_nothing() {
    let mut engine = TestEngine::new();
    engine.goto(1);
    engine.advance_ms(1000);
    let before = engine.pipes().segments().to_vec();

    engine.goto(0);
    engine.advance_ms(1000);
    assert_eq!(engine.pipes().segments(), before.as_slice());

    engine.goto(2);
    engine.advance_ms(1000);
    assert_eq!(engine.pipes().segments(), before.as_slice());
}

#[test]
fn test_faster_speed_fills_sooner() {
    let mut engine = TestEngine::new();
    engine.send(crate::navigator::NavCommand::SetSpeed(2.0));
    engine.goto(1);
    engine.advance_ms(500);
    assert!(engine.pipes().segment(0, 1).unwrap().filled);
}

// ====================================================================
// Sedimentation
// ====================================================================

#[test]
fn test_sedimentation_spawns_on_entry_and_tears_down_on_leave() {
    let mut engine = TestEngine::new();
    assert!(!engine.sedimentation().is_active());

    engine.goto(SEDIMENTATION_STAGE);
    let expected = particle_count(engine.result().efficiency);
    assert!(engine.sedimentation().is_active());
    assert_eq!(engine.sedimentation().particles().len(), expected);

    engine.goto(SEDIMENTATION_STAGE + 1);
    assert!(!engine.sedimentation().is_active());
    assert!(engine.sedimentation().particles().is_empty());
}

#[test]
fn test_reentry_respawns_same_count() {
    let mut engine = TestEngine::new();
    engine.goto(SEDIMENTATION_STAGE);
    let first = engine.sedimentation().particles().to_vec();
    engine.advance_ms(500);
    engine.goto(SEDIMENTATION_STAGE - 1);
    engine.goto(SEDIMENTATION_STAGE);
    let second = engine.sedimentation().particles().to_vec();
    assert_eq!(first.len(), second.len());
    assert_ne!(first, second);
    assert_eq!(engine.sedimentation().visits(), 2);
    assert_eq!(engine.sedimentation().settled_count(), 0);
}

#[test]
fn test_particles_settle_while_stage_is_current() {
    let mut engine = TestEngine::new();
    engine.goto(SEDIMENTATION_STAGE);
    engine.advance_ms(8000);
    let system = engine.sedimentation();
    assert_eq!(system.settled_count(), system.particles().len());
}

#[test]
fn test_better_efficiency_denser_floc() {
    let mut poor = TestEngine::new();
    poor.set_input(0.0, 0.0, 40.0);
    poor.goto(SEDIMENTATION_STAGE);

    let mut good = TestEngine::new();
    good.set_input(45.0, 60.0, 15.0);
    good.goto(SEDIMENTATION_STAGE);

    assert!(
        good.sedimentation().particles().len() >= poor.sedimentation().particles().len()
    );
}

#[test]
fn test_same_seed_same_ensemble() {
    let mut a = TestEngine::new();
    let mut b = TestEngine::new();
    a.goto(SEDIMENTATION_STAGE);
    b.goto(SEDIMENTATION_STAGE);
    assert_eq!(a.sedimentation().particles(), b.sedimentation().particles());
}

// ====================================================================
// Missing anchors
// ====================================================================

#[test]
fn test_missing_anchors_degrade_to_noops() {
    let mut engine = TestEngine::with_anchors(PresentationAnchors::empty());
    let start = engine.droplet().position();

    engine.goto(1);
    engine.assert_stage(1);
    assert!(!engine.droplet().is_moving());
    assert_eq!(engine.droplet().position().x, start.x);
    assert!(engine.pipes().active_segment().is_none());

    engine.goto(SEDIMENTATION_STAGE);
    assert!(!engine.sedimentation().is_active());

    // The droplet still retints.
    engine.advance_ms(800);
    assert_eq!(engine.droplet().color(), water_color(SEDIMENTATION_STAGE));
}

#[test]
fn test_partial_anchors_only_affect_their_driver() {
    let mut anchors = PresentationAnchors::standard();
    anchors.stages[3] = None;
    anchors.pipes.retain(|p| p.from != 1);
    let mut engine = TestEngine::with_anchors(anchors);

    engine.goto(1);
    engine.advance_ms(1000);
    assert!(engine.pipes().segment(0, 1).unwrap().filled);

    engine.goto(2);
    assert!(engine.pipes().active_segment().is_none());
    engine.advance_ms(1000);

    engine.goto(3);
    assert!(!engine.droplet().is_moving());
    engine.assert_stage(3);
}

// ====================================================================
// Shimmer, charts, floc
// ====================================================================

#[test]
fn test_shimmer_runs_by_default() {
    let mut engine = TestEngine::new();
    assert!(engine.resource::<ShimmerLoop>().is_running());
    let before = engine.resource::<ShimmerLoop>().offset();
    engine.advance_ms(500);
    assert_ne!(engine.resource::<ShimmerLoop>().offset(), before);
}

#[test]
fn test_shimmer_skipped_under_reduced_motion() {
    let mut engine = TestEngine::with_reduced_motion();
    engine.advance_ms(500);
    let shimmer = engine.resource::<ShimmerLoop>();
    assert!(!shimmer.is_running());
    assert_eq!(shimmer.offset(), 0.0);
}

#[test]
fn test_charts_rebuild_on_stage_change_and_recompute() {
    let mut engine = TestEngine::new();
    let start = engine.resource::<ChartCache>().generation;
    assert!(start >= 1);

    engine.goto(3);
    let cache = engine.resource::<ChartCache>();
    assert_eq!(cache.generation, start + 1);
    assert_eq!(cache.turbidity.highlighted().map(|p| p.stage), Some(3));

    engine.set_input(45.0, 60.0, 15.0);
    assert_eq!(engine.resource::<ChartCache>().generation, start + 2);

    // Idle frames rebuild nothing.
    engine.advance_ms(100);
    assert_eq!(engine.resource::<ChartCache>().generation, start + 2);
}

#[test]
fn test_recompute_overwrites_result_and_floc() {
    let mut engine = TestEngine::new();
    engine.set_input(45.0, 60.0, 15.0);
    let result = engine.result().clone();
    assert!((result.efficiency - 1.3).abs() < 1e-9);
    assert_eq!(result.turbidity[0], 120.0);
    assert_eq!(result.microbes[0], 1_000_000.0);
    assert_eq!(engine.resource::<FlocPreview>().efficiency, result.efficiency);

    engine.set_input(0.0, 0.0, 0.0);
    assert!(engine.result().final_turbidity() > result.final_turbidity());
}
