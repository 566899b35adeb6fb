//! Keyboard focus for card text regions.

use crate::card::CardId;

/// Something that reacts to gaining and losing keyboard focus.
///
/// The host binds these to whatever focusable text region it shows for a
/// card; the canvas never patches callbacks onto individual widgets.
pub trait Focusable {
    /// The text region received keyboard focus.
    fn on_focus_gained(&mut self);
    /// The text region lost keyboard focus.
    fn on_focus_lost(&mut self);
}

/// Tracks which card holds keyboard focus.
///
/// At most one card is focused at a time. Moving focus reports the card that
/// must be told it lost focus.
#[derive(Debug, Clone, Default)]
pub struct FocusTracker {
    focused: Option<CardId>,
}

/// Outcome of a focus change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FocusChange {
    /// Card that lost focus, if any.
    pub lost: Option<CardId>,
    /// Card that gained focus, if any.
    pub gained: Option<CardId>,
}

impl FocusChange {
    /// Check if anything changed.
    pub fn is_empty(&self) -> bool {
        self.lost.is_none() && self.gained.is_none()
    }
}

impl FocusTracker {
    /// Create a tracker with nothing focused.
    pub fn new() -> Self {
        Self::default()
    }

    /// The focused card, if any.
    pub fn focused(&self) -> Option<CardId> {
        self.focused
    }

    /// Check if a card holds focus.
    pub fn is_focused(&self, id: CardId) -> bool {
        self.focused == Some(id)
    }

    /// Move focus to `id` (or clear it with `None`).
    ///
    /// Focusing the already-focused card is a no-op.
    pub fn set_focus(&mut self, id: Option<CardId>) -> FocusChange {
        if self.focused == id {
            return FocusChange::default();
        }
        let lost = self.focused.take();
        self.focused = id;
        FocusChange { lost, gained: id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_focus_moves_between_cards() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let mut tracker = FocusTracker::new();

        let change = tracker.set_focus(Some(a));
        assert_eq!(change, FocusChange { lost: None, gained: Some(a) });

        let change = tracker.set_focus(Some(b));
        assert_eq!(change, FocusChange { lost: Some(a), gained: Some(b) });
        assert!(tracker.is_focused(b));
        assert!(!tracker.is_focused(a));
    }

    #[test]
    fn test_refocus_is_noop() {
        let a = Uuid::new_v4();
        let mut tracker = FocusTracker::new();
        tracker.set_focus(Some(a));
        assert!(tracker.set_focus(Some(a)).is_empty());
    }

    #[test]
    fn test_clear_focus() {
        let a = Uuid::new_v4();
        let mut tracker = FocusTracker::new();
        tracker.set_focus(Some(a));
        let change = tracker.set_focus(None);
        assert_eq!(change.lost, Some(a));
        assert_eq!(tracker.focused(), None);
        assert!(tracker.set_focus(None).is_empty());
    }
}
