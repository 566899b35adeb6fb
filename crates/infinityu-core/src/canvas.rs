//! Card store and runtime canvas state.

use crate::Instant;
use crate::card::{Card, CardId, CardKind};
use crate::config::{CanvasConfig, ConfigResult};
use crate::focus::{FocusTracker, Focusable};
use crate::indicator::ZoomIndicator;
use crate::selection::Selection;
use crate::snap::snap_to_grid;
use crate::viewport::Viewport;
use kurbo::{Point, Rect, Size, Vec2};
use rand::Rng;
use rand::seq::IndexedRandom;
use std::collections::HashMap;

/// Drag in progress on a single card.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ActiveDrag {
    id: CardId,
    /// Position the card had when the drag began.
    origin: Point,
}

/// All cards on the board, in creation order.
///
/// Cards are never removed, so ids are never reused and the order vector
/// doubles as paint order (back to front).
#[derive(Debug, Clone)]
pub struct CardStore {
    cards: HashMap<CardId, Card>,
    order: Vec<CardId>,
    card_size: Size,
    grid_size: f64,
    placeholders: Vec<String>,
    drag: Option<ActiveDrag>,
}

impl Default for CardStore {
    fn default() -> Self {
        Self::from_config(&CanvasConfig::default())
    }
}

impl CardStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store using the card size, grid and placeholders of a config.
    pub fn from_config(config: &CanvasConfig) -> Self {
        Self {
            cards: HashMap::new(),
            order: Vec::new(),
            card_size: config.card_size,
            grid_size: config.grid_size,
            placeholders: config.placeholders.clone(),
            drag: None,
        }
    }

    /// Create a card at exactly `position` with a random placeholder.
    pub fn create_card(&mut self, position: Point, kind: CardKind) -> &Card {
        self.create_card_with_rng(position, kind, &mut rand::rng())
    }

    /// Create a card, drawing its placeholder from `rng`.
    pub fn create_card_with_rng<R: Rng + ?Sized>(
        &mut self,
        position: Point,
        kind: CardKind,
        rng: &mut R,
    ) -> &Card {
        let placeholder = self.placeholders.choose(rng).cloned().unwrap_or_default();
        let card = Card::new(position, self.card_size, kind, placeholder);
        let id = card.id();
        log::debug!("Created {:?} card {} at ({:.1}, {:.1})", kind, id, position.x, position.y);
        self.order.push(id);
        self.cards.entry(id).or_insert(card)
    }

    /// Get a card by ID.
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(&id)
    }

    /// Get a mutable reference to a card by ID.
    pub fn get_mut(&mut self, id: CardId) -> Option<&mut Card> {
        self.cards.get_mut(&id)
    }

    /// Cards in creation order (back to front).
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.order.iter().filter_map(|id| self.cards.get(id))
    }

    /// Card ids in creation order.
    pub fn ids(&self) -> &[CardId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Topmost card under a world point. Newer cards win on overlap.
    pub fn card_at(&self, point: Point) -> Option<CardId> {
        self.order
            .iter()
            .rev()
            .copied()
            .find(|id| self.cards.get(id).is_some_and(|card| card.hit_test(point)))
    }

    /// Cards whose body intersects `rect`, in creation order.
    pub fn cards_in_rect(&self, rect: Rect) -> Vec<CardId> {
        self.order
            .iter()
            .copied()
            .filter(|id| {
                self.cards
                    .get(id)
                    .is_some_and(|card| rect.intersect(card.bounds()).area() > 0.0)
            })
            .collect()
    }

    /// Bounding box of all cards.
    pub fn bounds(&self) -> Option<Rect> {
        self.iter().map(Card::bounds).reduce(|acc, r| acc.union(r))
    }

    /// Start dragging a card. Replaces any drag already in progress.
    pub fn begin_drag(&mut self, id: CardId) -> bool {
        let Some(card) = self.cards.get(&id) else {
            return false;
        };
        self.drag = Some(ActiveDrag {
            id,
            origin: card.position,
        });
        log::debug!("Drag started on card {id}");
        true
    }

    /// Move the dragged card towards `position`, snapped to the grid.
    ///
    /// Ignored unless `id` is the card being dragged. Returns whether the
    /// stored position changed.
    pub fn update_drag(&mut self, id: CardId, position: Point) -> bool {
        if self.drag.map(|d| d.id) != Some(id) {
            return false;
        }
        let snapped = snap_to_grid(position, self.grid_size);
        match self.cards.get_mut(&id) {
            Some(card) if card.position != snapped => {
                card.position = snapped;
                true
            }
            _ => false,
        }
    }

    /// Finish dragging a card.
    pub fn end_drag(&mut self, id: CardId) -> bool {
        match self.drag {
            Some(drag) if drag.id == id => {
                self.drag = None;
                log::debug!("Drag finished on card {id}");
                true
            }
            _ => false,
        }
    }

    /// Card being dragged, if any.
    pub fn dragging(&self) -> Option<CardId> {
        self.drag.map(|d| d.id)
    }

    /// Position the dragged card had when its drag began.
    pub fn drag_origin(&self) -> Option<Point> {
        self.drag.map(|d| d.origin)
    }
}

/// Runtime canvas state.
///
/// Owns the viewport, the cards and everything derived from them. All
/// mutation happens on the UI thread through these methods.
#[derive(Debug, Clone)]
pub struct Canvas {
    config: CanvasConfig,
    /// The cards on the board.
    pub cards: CardStore,
    /// View transform.
    pub viewport: Viewport,
    /// Selected cards.
    pub selection: Selection,
    focus: FocusTracker,
    indicator: ZoomIndicator,
    card_kind: CardKind,
    /// Viewport size in screen pixels.
    pub viewport_size: Size,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::from_valid_config(CanvasConfig::default())
    }
}

impl Canvas {
    /// Create a canvas with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a canvas from a config, validating it first.
    pub fn with_config(config: CanvasConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: CanvasConfig) -> Self {
        log::info!(
            "Canvas created (grid {}, zoom {}..{})",
            config.grid_size,
            config.min_zoom,
            config.max_zoom
        );
        Self {
            cards: CardStore::from_config(&config),
            viewport: Viewport::from_config(&config),
            selection: Selection::new(),
            focus: FocusTracker::new(),
            indicator: ZoomIndicator::new(config.indicator_hold(), config.indicator_fade()),
            card_kind: CardKind::default(),
            viewport_size: Size::new(1280.0, 720.0),
            config,
        }
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    /// Set the viewport size.
    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        self.viewport_size = Size::new(width, height);
    }

    /// Kind given to newly created cards.
    pub fn card_kind(&self) -> CardKind {
        self.card_kind
    }

    /// Set the kind given to newly created cards (tool selection).
    pub fn set_card_kind(&mut self, kind: CardKind) {
        self.card_kind = kind;
    }

    /// Zoom by `step` around a screen anchor and report the new percentage.
    pub fn zoom_by(&mut self, step: f64, anchor: Point, now: Instant) -> bool {
        if !self.viewport.zoom_by(step, anchor) {
            return false;
        }
        self.indicator.show(self.viewport.zoom_percent(), now);
        true
    }

    /// Pan by a screen delta (subtracted from the pan offset).
    pub fn pan_by(&mut self, delta: Vec2) -> bool {
        let before = self.viewport.offset;
        self.viewport.pan_by(delta);
        self.viewport.offset != before
    }

    /// Create a card of the active kind under a screen point.
    pub fn create_card_at_screen(&mut self, screen_point: Point) -> CardId {
        let world = self.viewport.screen_to_world(screen_point);
        let kind = self.card_kind;
        self.cards.create_card(world, kind).id()
    }

    /// Move keyboard focus to a card, or clear it with `None`.
    ///
    /// The card losing focus is told before the card gaining it.
    pub fn focus_card(&mut self, id: Option<CardId>) -> bool {
        if let Some(id) = id {
            if self.cards.get(id).is_none() {
                return false;
            }
        }
        let change = self.focus.set_focus(id);
        if let Some(lost) = change.lost.and_then(|id| self.cards.get_mut(id)) {
            lost.on_focus_lost();
            log::debug!("Card {} lost focus", lost.id());
        }
        if let Some(gained) = change.gained.and_then(|id| self.cards.get_mut(id)) {
            gained.on_focus_gained();
            log::debug!("Card {} gained focus", gained.id());
        }
        !change.is_empty()
    }

    /// Card holding keyboard focus.
    pub fn focused_card(&self) -> Option<CardId> {
        self.focus.focused()
    }

    /// Replace the text of the focused card.
    pub fn set_card_text(&mut self, id: CardId, text: impl Into<String>) -> bool {
        if !self.focus.is_focused(id) {
            log::debug!("Ignoring text for unfocused card {id}");
            return false;
        }
        self.cards.get_mut(id).is_some_and(|card| card.set_text(text))
    }

    /// Select cards intersecting a world rectangle.
    pub fn select_in_rect(&mut self, rect: Rect) -> bool {
        let ids = self.cards.cards_in_rect(rect);
        self.selection.set(ids)
    }

    pub fn is_selected(&self, id: CardId) -> bool {
        self.selection.contains(id)
    }

    pub fn indicator(&self) -> &ZoomIndicator {
        &self.indicator
    }

    /// Advance timers. Returns true when a repaint is needed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.indicator.tick(now)
    }
}
