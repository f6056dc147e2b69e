use bevy::prelude::*;

/// Background behind the pipeline scene.
pub const CLEAR_COLOR: Color = Color::srgb(0.93, 0.96, 0.99);

pub fn setup_camera(mut commands: Commands) {
    commands.spawn((Camera2d, Msaa::Sample4));
}

/// World-space position of the cursor, if it is inside the window.
pub fn cursor_world_pos(
    window: &Window,
    camera: &Camera,
    cam_transform: &GlobalTransform,
) -> Option<Vec2> {
    let screen_pos = window.cursor_position()?;
    camera.viewport_to_world_2d(cam_transform, screen_pos).ok()
}
