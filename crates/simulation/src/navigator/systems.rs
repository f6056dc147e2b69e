use bevy::prelude::*;

use crate::timing::now_ms;

use super::types::{NavCommand, NavigatorState, StageChanged};

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

/// Apply queued navigation commands in arrival order.
pub fn apply_nav_commands(
    mut commands: EventReader<NavCommand>,
    mut nav: ResMut<NavigatorState>,
    mut changed: EventWriter<StageChanged>,
    time: Res<Time>,
) {
    for command in commands.read() {
        let event = match *command {
            NavCommand::Goto {
                index,
                user_initiated,
            } => {
                let event = nav.goto(index, user_initiated);
                if event.is_none() {
                    debug!("Navigator: ignoring goto({}) outside the pipeline", index);
                }
                event
            }
            NavCommand::Next => {
                let index = nav.next_index();
                nav.goto(index, true)
            }
            NavCommand::Prev => {
                let index = nav.prev_index();
                nav.goto(index, true)
            }
            NavCommand::TogglePlay => {
                let playing = nav.toggle_play(now_ms(&time));
                info!("Navigator: {}", if playing { "playing" } else { "paused" });
                None
            }
            NavCommand::SetSpeed(speed) => {
                if !nav.set_speed(speed) {
                    warn!("Navigator: rejected speed multiplier {}", speed);
                }
                None
            }
            NavCommand::SetAutoAdvance(enabled) => {
                nav.set_auto_advance(enabled);
                None
            }
        };

        if let Some(event) = event {
            debug!(
                "Navigator: stage {} -> {}{}",
                event.previous,
                event.current,
                if event.user_initiated { " (user)" } else { "" }
            );
            changed.send(event);
        }
    }
}

/// Per-frame auto-advance check while playing.
pub fn auto_advance(
    mut nav: ResMut<NavigatorState>,
    mut changed: EventWriter<StageChanged>,
    time: Res<Time>,
) {
    if !nav.advance_loop_running() {
        return;
    }
    if let Some(event) = nav.auto_advance_tick(now_ms(&time)) {
        debug!("Navigator: auto-advance {} -> {}", event.previous, event.current);
        changed.send(event);
    }
}
