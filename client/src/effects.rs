//! What the page must do in response to a batch of engine actions.
//!
//! Folding actions into [`HostEffects`] keeps the DOM side a straight-line
//! apply step, and lets the decision logic run without a browser.

#[cfg(test)]
#[path = "effects_test.rs"]
mod effects_test;

use canvas::engine::Action;
use canvas::surface::PageId;
use canvas::tool::Cursor;

/// Body class present while annotation mode is on.
pub const MODE_BODY_CLASS: &str = "highlight-mode";

/// Prompt shown before a page's annotations are erased.
pub const CLEAR_PROMPT: &str = "Erase all highlights on this page?";

#[derive(Debug, Default, Clone, PartialEq)]
pub struct HostEffects {
    /// Flush the pending save on the next animation frame.
    pub schedule_persist: bool,
    /// Ask before erasing this page.
    pub confirm_clear: Option<PageId>,
    /// New state of the mode body class.
    pub body_mode: Option<bool>,
    /// Cursor to show over the surface; the last one reported wins.
    pub cursor: Option<Cursor>,
}

impl HostEffects {
    #[must_use]
    pub fn from_actions(actions: &[Action]) -> Self {
        let mut effects = Self::default();
        for action in actions {
            match action {
                Action::StrokeStarted { page } => log::debug!("stroke started on page {page}"),
                Action::PersistRequested { .. } => effects.schedule_persist = true,
                Action::ConfirmClearRequested { page } => effects.confirm_clear = Some(*page),
                Action::AnnotationsCleared { page } => log::info!("annotations cleared for page {page}"),
                Action::ModeChanged(enabled) => effects.body_mode = Some(*enabled),
                Action::SetCursor(cursor) => effects.cursor = Some(*cursor),
            }
        }
        effects
    }

    /// Whether there is nothing to do.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
