use bevy::prelude::*;

/// Whether the environment asked for reduced motion.
///
/// Set once at startup from the platform (or the config override) and read
/// by drivers that are purely decorative.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MotionPreference {
    pub reduced: bool,
}

impl MotionPreference {
    pub fn reduced() -> Self {
        Self { reduced: true }
    }

    /// Apply an explicit override on top of what the environment reported.
    pub fn with_override(self, forced: Option<bool>) -> Self {
        Self {
            reduced: forced.unwrap_or(self.reduced),
        }
    }
}
