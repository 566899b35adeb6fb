//! Cards: the text notes placed on the board.

use crate::focus::Focusable;
use kurbo::{Point, Rect, RoundedRect, Size};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for cards.
pub type CardId = Uuid;

/// Default card body size in world units.
pub const CARD_SIZE: Size = Size::new(220.0, 140.0);

/// Kind of card, taken from the active tool when the card is created.
///
/// Only a label; every kind behaves as free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CardKind {
    #[default]
    Text,
    Title,
    Checklist,
}

impl CardKind {
    /// Get display name for UI.
    pub fn display_name(&self) -> &'static str {
        match self {
            CardKind::Text => "Texto",
            CardKind::Title => "Título",
            CardKind::Checklist => "Checklist",
        }
    }

    /// Get all card kinds.
    pub fn all() -> &'static [CardKind] {
        &[CardKind::Text, CardKind::Title, CardKind::Checklist]
    }
}

/// Whether a card shows its hint phrase or the user's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditingState {
    /// Showing the placeholder in the hint tone.
    #[default]
    ShowingPlaceholder,
    /// Showing user text in the active tone.
    Editing,
}

/// Colour tone the card text is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextTone {
    Hint,
    Active,
}

/// A note card.
#[derive(Debug, Clone)]
pub struct Card {
    id: CardId,
    /// Top-left corner of the body in world coordinates.
    pub position: Point,
    size: Size,
    kind: CardKind,
    text: String,
    placeholder: String,
    state: EditingState,
}

impl Card {
    /// Create a card showing `placeholder`.
    pub fn new(
        position: Point,
        size: Size,
        kind: CardKind,
        placeholder: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            size,
            kind,
            text: String::new(),
            placeholder: placeholder.into(),
            state: EditingState::ShowingPlaceholder,
        }
    }

    pub fn id(&self) -> CardId {
        self.id
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn kind(&self) -> CardKind {
        self.kind
    }

    /// The user's text (empty while the placeholder is shown).
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The hint phrase picked at creation.
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn editing_state(&self) -> EditingState {
        self.state
    }

    pub fn is_placeholder(&self) -> bool {
        self.state == EditingState::ShowingPlaceholder
    }

    /// Text to draw: the placeholder or the user's text.
    pub fn display_text(&self) -> &str {
        match self.state {
            EditingState::ShowingPlaceholder => &self.placeholder,
            EditingState::Editing => &self.text,
        }
    }

    /// Tone to draw the display text in.
    pub fn tone(&self) -> TextTone {
        match self.state {
            EditingState::ShowingPlaceholder => TextTone::Hint,
            EditingState::Editing => TextTone::Active,
        }
    }

    /// Replace the user's text.
    ///
    /// Only accepted while editing; returns whether the text changed.
    pub fn set_text(&mut self, text: impl Into<String>) -> bool {
        if self.state != EditingState::Editing {
            log::debug!("Ignoring text edit on card {} showing its placeholder", self.id);
            return false;
        }
        let text = text.into();
        if self.text == text {
            return false;
        }
        self.text = text;
        true
    }

    /// Body rectangle in world coordinates.
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }

    /// Rounded body outline for rendering.
    pub fn body(&self, corner_radius: f64) -> RoundedRect {
        RoundedRect::from_rect(self.bounds(), corner_radius)
    }

    /// Region the text is laid out in.
    pub fn text_rect(&self, inset: f64) -> Rect {
        self.bounds().inset(-inset)
    }

    /// Check if a world point lies on the card body.
    pub fn hit_test(&self, point: Point) -> bool {
        self.bounds().contains(point)
    }
}

impl Focusable for Card {
    fn on_focus_gained(&mut self) {
        if self.state == EditingState::ShowingPlaceholder {
            self.text.clear();
            self.state = EditingState::Editing;
        }
    }

    fn on_focus_lost(&mut self) {
        if self.text.trim().is_empty() {
            self.text.clear();
            self.state = EditingState::ShowingPlaceholder;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> Card {
        Card::new(Point::new(10.0, 20.0), CARD_SIZE, CardKind::Text, "Comece digitando…")
    }

    #[test]
    fn test_new_card_shows_placeholder() {
        let card = card();
        assert!(card.is_placeholder());
        assert_eq!(card.display_text(), "Comece digitando…");
        assert_eq!(card.tone(), TextTone::Hint);
        assert_eq!(card.text(), "");
    }

    #[test]
    fn test_blur_without_typing_restores_placeholder() {
        let mut card = card();
        card.on_focus_gained();
        assert_eq!(card.editing_state(), EditingState::Editing);
        assert_eq!(card.display_text(), "");
        assert_eq!(card.tone(), TextTone::Active);

        card.on_focus_lost();
        assert!(card.is_placeholder());
        assert_eq!(card.display_text(), "Comece digitando…");
    }

    #[test]
    fn test_typed_text_survives_blur() {
        let mut card = card();
        card.on_focus_gained();
        assert!(card.set_text("Hello"));
        card.on_focus_lost();
        assert_eq!(card.editing_state(), EditingState::Editing);
        assert_eq!(card.display_text(), "Hello");

        // Refocusing committed text keeps it.
        card.on_focus_gained();
        assert_eq!(card.display_text(), "Hello");
    }

    #[test]
    fn test_erased_text_reverts_to_placeholder() {
        let mut card = card();
        card.on_focus_gained();
        card.set_text("Hello");
        card.set_text("   \n");
        card.on_focus_lost();
        assert!(card.is_placeholder());
        assert_eq!(card.display_text(), "Comece digitando…");
        assert_eq!(card.text(), "");
    }

    #[test]
    fn test_text_edit_ignored_without_focus() {
        let mut card = card();
        assert!(!card.set_text("Hello"));
        assert!(card.is_placeholder());
    }

    #[test]
    fn test_hit_test_and_geometry() {
        let card = card();
        assert_eq!(card.bounds(), Rect::new(10.0, 20.0, 230.0, 160.0));
        assert!(card.hit_test(Point::new(100.0, 100.0)));
        assert!(!card.hit_test(Point::new(231.0, 100.0)));
        assert_eq!(card.text_rect(10.0), Rect::new(20.0, 30.0, 220.0, 150.0));
    }
}
