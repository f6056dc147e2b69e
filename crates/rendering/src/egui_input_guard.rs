//! Egui input guard: keeps clicks and key presses aimed at the panels from
//! also reaching the scene.

use bevy_egui::EguiContexts;

/// `true` when the pointer is over an egui panel or egui is handling a
/// click or drag. Scene input systems return early when this is set.
#[inline]
pub fn egui_wants_pointer(contexts: &mut EguiContexts) -> bool {
    let ctx = contexts.ctx_mut();
    ctx.wants_pointer_input() || ctx.is_pointer_over_area()
}

/// `true` when a text field (or another widget) has keyboard focus.
#[inline]
pub fn egui_wants_keyboard(contexts: &mut EguiContexts) -> bool {
    contexts.ctx_mut().wants_keyboard_input()
}
