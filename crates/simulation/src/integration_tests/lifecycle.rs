use crate::config::{EngineConfig, SEDIMENTATION_STAGE};
use crate::model::SimulationInput;
use crate::motion::MotionPreference;
use crate::navigator::NavCommand;
use crate::quiz::{NewQuizQuestion, QuizState};
use crate::shimmer::ShimmerLoop;
use crate::stop_all_drivers;
use crate::test_harness::TestEngine;

// ====================================================================
// Startup configuration
// ====================================================================

#[test]
fn test_config_applied_at_startup() {
    let engine = TestEngine::with_config(EngineConfig {
        speed: 1.5,
        auto_advance: true,
        dose: 45.0,
        mix_time: 60.0,
        settle_time: 15.0,
        ..Default::default()
    });
    assert_eq!(engine.navigator().speed_multiplier(), 1.5);
    assert!(engine.navigator().auto_advance());
    let input = engine.resource::<SimulationInput>();
    assert_eq!((input.dose, input.mix_time, input.settle_time), (45.0, 60.0, 15.0));
    assert!((engine.result().efficiency - 1.3).abs() < 1e-9);
}

#[test]
fn test_bad_config_values_fall_back() {
    let engine = TestEngine::with_config(EngineConfig {
        speed: -3.0,
        dose: 10_000.0,
        ..Default::default()
    });
    assert_eq!(engine.navigator().speed_multiplier(), 1.0);
    assert_eq!(engine.resource::<SimulationInput>().dose, 90.0);
}

#[test]
fn test_reduced_motion_override_from_config() {
    let engine = TestEngine::with_config(EngineConfig {
        reduced_motion: Some(true),
        ..Default::default()
    });
    assert!(engine.resource::<MotionPreference>().reduced);
    assert!(!engine.resource::<ShimmerLoop>().is_running());
}

#[test]
fn test_seed_changes_ensemble() {
    let mut a = TestEngine::with_config(EngineConfig {
        seed: 1,
        ..Default::default()
    });
    let mut b = TestEngine::with_config(EngineConfig {
        seed: 2,
        ..Default::default()
    });
    a.goto(SEDIMENTATION_STAGE);
    b.goto(SEDIMENTATION_STAGE);
    assert_eq!(a.sedimentation().particles().len(), b.sedimentation().particles().len());
    assert_ne!(a.sedimentation().particles(), b.sedimentation().particles());
}

// ====================================================================
// Teardown
// ====================================================================

#[test]
fn test_exit_stops_every_driver() {
    let mut engine = TestEngine::new();
    engine.send(NavCommand::TogglePlay);
    engine.goto(SEDIMENTATION_STAGE);
    engine.goto(SEDIMENTATION_STAGE + 1);
    assert!(engine.droplet().is_moving());

    engine.shutdown();
    assert!(!engine.navigator().is_playing());
    assert!(!engine.navigator().advance_loop_running());
    assert!(!engine.droplet().is_moving());
    assert!(!engine.pipes().is_filling());
    assert!(engine.pipes().active_segment().is_none());
    assert!(!engine.sedimentation().is_active());
    assert!(!engine.resource::<ShimmerLoop>().is_running());

    // Nothing resurrects after teardown.
    let stage = engine.current_stage();
    let position = engine.droplet().position();
    engine.advance_ms(5000);
    engine.assert_stage(stage);
    assert_eq!(engine.droplet().position(), position);
}

#[test]
fn test_stop_all_drivers_is_idempotent() {
    let mut engine = TestEngine::new();
    engine.goto(SEDIMENTATION_STAGE);
    stop_all_drivers(engine.world_mut());
    stop_all_drivers(engine.world_mut());
    assert!(!engine.sedimentation().is_active());
    assert!(!engine.resource::<ShimmerLoop>().is_running());
}

// ====================================================================
// Quiz
// ====================================================================

#[test]
fn test_quiz_has_question_after_startup() {
    let engine = TestEngine::new();
    assert!(engine.resource::<QuizState>().question().is_some());
}

#[test]
fn test_new_question_request_resets_answer() {
    let mut engine = TestEngine::new();
    engine.resource_mut::<QuizState>().answer(0);
    assert!(engine.resource::<QuizState>().is_answered());
    engine.world_mut().send_event(NewQuizQuestion);
    engine.update();
    assert!(!engine.resource::<QuizState>().is_answered());
}
