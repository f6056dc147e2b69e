use bevy::prelude::*;
use bevy_egui::EguiContexts;

use rendering::egui_input_guard::egui_wants_keyboard;
use simulation::navigator::NavCommand;

/// Map a pressed key to a navigation command. The arrows always navigate;
/// Space is left to the focused widget when there is one.
pub fn command_for_key(key: KeyCode, widget_focused: bool) -> Option<NavCommand> {
    match key {
        KeyCode::ArrowLeft => Some(NavCommand::Prev),
        KeyCode::ArrowRight => Some(NavCommand::Next),
        KeyCode::Space if !widget_focused => Some(NavCommand::TogglePlay),
        _ => None,
    }
}

/// ArrowLeft / ArrowRight step through the stages, Space toggles play.
pub fn stage_keybinds(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut contexts: EguiContexts,
    mut commands: EventWriter<NavCommand>,
) {
    if keyboard.get_just_pressed().next().is_none() {
        return;
    }
    let widget_focused = egui_wants_keyboard(&mut contexts);
    for key in keyboard.get_just_pressed() {
        if let Some(command) = command_for_key(*key, widget_focused) {
            commands.send(command);
        }
    }
}
