use bevy::prelude::*;

use crate::navigator::StageChanged;
use crate::stages::{stage, Stage};

/// What the stage text panel shows.
///
/// `revision` bumps on every stage-change event, including re-selecting the
/// current stage, so the panel always re-renders.
#[derive(Resource, Debug, Clone, Default)]
pub struct StageContentView {
    pub stage: usize,
    /// Move keyboard focus to the content panel on the next frame.
    pub focus_requested: bool,
    pub revision: u64,
}

impl StageContentView {
    pub fn current(&self) -> Option<&'static Stage> {
        stage(self.stage)
    }

    pub fn show(&mut self, event: &StageChanged) {
        self.stage = event.current;
        self.focus_requested = event.user_initiated;
        self.revision += 1;
    }

    /// Consume a pending focus request.
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_requested)
    }
}

pub fn render_stage_content(
    mut events: EventReader<StageChanged>,
    mut view: ResMut<StageContentView>,
) {
    for event in events.read() {
        view.show(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_tracks_stage_and_focus() {
        let mut view = StageContentView::default();
        view.show(&StageChanged {
            previous: 0,
            current: 3,
            user_initiated: true,
        });
        assert_eq!(view.current().map(|s| s.title), Some("Filtration"));
        assert!(view.take_focus_request());
        assert!(!view.take_focus_request());
        assert_eq!(view.revision, 1);
    }

    #[test]
    fn test_reselecting_same_stage_still_rerenders() {
        let mut view = StageContentView::default();
        let same = StageChanged {
            previous: 0,
            current: 0,
            user_initiated: false,
        };
        view.show(&same);
        view.show(&same);
        assert_eq!(view.revision, 2);
        assert!(!view.focus_requested);
    }
}
