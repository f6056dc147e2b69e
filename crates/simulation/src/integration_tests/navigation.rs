use crate::config::{EngineConfig, STAGE_COUNT};
use crate::content::StageContentView;
use crate::navigator::NavCommand;
use crate::test_harness::TestEngine;

// ====================================================================
// Goto
// ====================================================================

#[test]
fn test_goto_every_stage() {
    let mut engine = TestEngine::new();
    for i in 0..STAGE_COUNT {
        engine.goto(i);
        engine.assert_stage(i);
    }
}

#[test]
fn test_goto_out_of_range_leaves_stage_and_broadcasts_nothing() {
    let mut engine = TestEngine::new();
    engine.goto(2);
    let changes = engine.stage_changes().len();
    engine.goto(STAGE_COUNT);
    engine.goto(usize::MAX);
    engine.assert_stage(2);
    assert_eq!(engine.stage_changes().len(), changes);
}

#[test]
fn test_next_prev_clamp() {
    let mut engine = TestEngine::new();
    engine.send(NavCommand::Prev);
    engine.assert_stage(0);
    for _ in 0..10 {
        engine.send(NavCommand::Next);
    }
    engine.assert_stage(STAGE_COUNT - 1);
    engine.send(NavCommand::Prev);
    engine.assert_stage(STAGE_COUNT - 2);
}

#[test]
fn test_content_panel_follows_stage_and_focus() {
    let mut engine = TestEngine::new();
    engine.goto(4);
    let view = engine.resource::<StageContentView>();
    assert_eq!(view.stage, 4);
    assert!(view.focus_requested);

    engine.send(NavCommand::Goto {
        index: 1,
        user_initiated: false,
    });
    let view = engine.resource::<StageContentView>();
    assert_eq!(view.stage, 1);
    assert!(!view.focus_requested);
}

// ====================================================================
// Auto-advance
// ====================================================================

#[test]
fn test_auto_advance_every_interval() {
    let mut engine = TestEngine::new();
    engine.send(NavCommand::TogglePlay);
    engine.advance_ms(3900);
    engine.assert_stage(0);
    engine.advance_ms(200);
    engine.assert_stage(1);
    let last = *engine.stage_changes().last().unwrap();
    assert!(!last.user_initiated);
}

#[test]
fn test_speed_change_takes_effect_on_running_loop() {
    let mut engine = TestEngine::new();
    engine.send(NavCommand::TogglePlay);
    engine.advance_ms(1000);
    engine.send(NavCommand::SetSpeed(2.0));
    // Interval is now 2000ms, measured from the play press.
    engine.advance_ms(900);
    engine.assert_stage(0);
    engine.advance_ms(100);
    engine.assert_stage(1);
}

#[test]
fn test_playback_stops_at_final_stage() {
    let mut engine = TestEngine::new();
    engine.goto(STAGE_COUNT - 1);
    engine.send(NavCommand::TogglePlay);
    engine.advance_ms(4100);
    engine.assert_stage(STAGE_COUNT - 1);
    assert!(!engine.navigator().is_playing());
}

#[test]
fn test_playback_wraps_with_auto_advance() {
    let mut engine = TestEngine::with_config(EngineConfig {
        auto_advance: true,
        ..Default::default()
    });
    engine.goto(STAGE_COUNT - 1);
    engine.send(NavCommand::TogglePlay);
    engine.advance_ms(4100);
    engine.assert_stage(0);
    assert!(engine.navigator().is_playing());
}

#[test]
fn test_pause_stops_advancing() {
    let mut engine = TestEngine::new();
    engine.send(NavCommand::TogglePlay);
    engine.advance_ms(2000);
    engine.send(NavCommand::TogglePlay);
    engine.advance_ms(10_000);
    engine.assert_stage(0);
}

#[test]
fn test_rejected_speed_keeps_previous() {
    let mut engine = TestEngine::new();
    engine.send(NavCommand::SetSpeed(1.5));
    engine.send(NavCommand::SetSpeed(-2.0));
    engine.send(NavCommand::SetSpeed(f32::NAN));
    assert_eq!(engine.navigator().speed_multiplier(), 1.5);
}
