//! Stage navigator: current stage, play/pause, auto-advance and speed.

mod systems;
pub mod types;

pub use systems::{apply_nav_commands, auto_advance};
pub use types::{NavCommand, NavigatorState, StageChanged};
