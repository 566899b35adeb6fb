//! Card selection and rubber-band (marquee) selection.

use crate::card::CardId;
use kurbo::{Point, Rect};

/// Selection rectangle state for marquee selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionRect {
    /// Starting point in world coordinates.
    pub start: Point,
    /// Current point in world coordinates.
    pub current: Point,
}

impl SelectionRect {
    /// Start a marquee at a world point.
    pub fn new(start: Point) -> Self {
        Self { start, current: start }
    }

    /// Get the selection rectangle as a Rect.
    pub fn to_rect(&self) -> Rect {
        Rect::from_points(self.start, self.current)
    }
}

/// The selected cards, kept in board (insertion) order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<CardId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected ids in board order.
    pub fn ids(&self) -> &[CardId] {
        &self.ids
    }

    pub fn contains(&self, id: CardId) -> bool {
        self.ids.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Replace the selection. `ids` must already be in board order.
    pub fn set(&mut self, ids: Vec<CardId>) -> bool {
        if self.ids == ids {
            return false;
        }
        self.ids = ids;
        true
    }

    /// Select a single card.
    pub fn select_only(&mut self, id: CardId) -> bool {
        self.set(vec![id])
    }

    /// Clear the selection. Returns whether anything was selected.
    pub fn clear(&mut self) -> bool {
        if self.ids.is_empty() {
            return false;
        }
        self.ids.clear();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_selection_rect_normalizes() {
        let mut marquee = SelectionRect::new(Point::new(100.0, 50.0));
        marquee.current = Point::new(20.0, 80.0);
        assert_eq!(marquee.to_rect(), Rect::new(20.0, 50.0, 100.0, 80.0));
    }

    #[test]
    fn test_selection_changes() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let mut selection = Selection::new();

        assert!(selection.set(vec![a, b]));
        assert!(!selection.set(vec![a, b]));
        assert_eq!(selection.ids(), &[a, b]);

        assert!(selection.select_only(b));
        assert!(!selection.contains(a));
        assert!(selection.clear());
        assert!(!selection.clear());
    }
}
