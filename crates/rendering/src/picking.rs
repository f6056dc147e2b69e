use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;

use simulation::anchors::PresentationAnchors;
use simulation::navigator::NavCommand;

use crate::camera::cursor_world_pos;
use crate::egui_input_guard::egui_wants_pointer;

/// Left click on a stage block jumps to that stage.
pub fn pick_stage_block(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<Camera2d>>,
    anchors: Res<PresentationAnchors>,
    mut contexts: EguiContexts,
    mut commands: EventWriter<NavCommand>,
) {
    if !buttons.just_pressed(MouseButton::Left) || egui_wants_pointer(&mut contexts) {
        return;
    }
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Ok((camera, cam_transform)) = cameras.get_single() else {
        return;
    };
    let Some(world_pos) = cursor_world_pos(window, camera, cam_transform) else {
        return;
    };
    if let Some(index) = anchors.stage_at(world_pos) {
        commands.send(NavCommand::Goto {
            index,
            user_initiated: true,
        });
    }
}
