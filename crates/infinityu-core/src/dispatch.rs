//! Routes input events to the viewport and the card store.

use crate::Instant;
use crate::canvas::Canvas;
use crate::card::CardId;
use crate::input::{Axis, GesturePhase, InputEvent, InputState, MouseButton};
use crate::selection::SelectionRect;
use kurbo::{Point, Vec2};
use std::time::Duration;
use winit::window::CursorIcon;

/// An open trackpad gesture with no events for this long no longer blocks
/// middle-button panning.
pub const GESTURE_IDLE_TIMEOUT: Duration = Duration::from_millis(250);

/// What a left-button press started.
#[derive(Debug, Clone, Copy, PartialEq)]
enum LeftDrag {
    /// Moving a card. `grab` is the world point under the pointer at press.
    Card { id: CardId, grab: Point },
    /// Rubber-band selection on the background.
    Marquee(SelectionRect),
}

/// Classifies input events and applies them to a [`Canvas`].
///
/// Gesture panning and middle-button panning are mutually exclusive. A
/// gesture update takes over from a middle-button pan, and while a started
/// gesture is open (no `Ended` yet, last event within
/// [`GESTURE_IDLE_TIMEOUT`]) middle-button panning is ignored.
#[derive(Debug, Clone)]
pub struct InputDispatcher {
    input: InputState,
    /// Recognise double-clicks from raw presses. Turn off for hosts that
    /// deliver [`InputEvent::DoubleClick`] themselves.
    pub detect_double_clicks: bool,
    middle_pan: bool,
    left_drag: Option<LeftDrag>,
    /// Time of the last event of a started, not yet ended gesture.
    open_gesture: Option<Instant>,
}

impl Default for InputDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl InputDispatcher {
    /// Create a dispatcher with default double-click thresholds.
    pub fn new() -> Self {
        Self {
            input: InputState::default(),
            detect_double_clicks: true,
            middle_pan: false,
            left_drag: None,
            open_gesture: None,
        }
    }

    /// Create a dispatcher using the double-click thresholds of a canvas.
    pub fn for_canvas(canvas: &Canvas) -> Self {
        let config = canvas.config();
        Self {
            input: InputState::new(config.double_click_time(), config.double_click_distance),
            ..Self::new()
        }
    }

    /// Cursor the host should show.
    pub fn cursor_icon(&self) -> CursorIcon {
        if self.middle_pan {
            CursorIcon::Grabbing
        } else {
            CursorIcon::Default
        }
    }

    /// Current marquee rectangle in world coordinates (for rendering).
    pub fn selection_rect(&self) -> Option<SelectionRect> {
        match self.left_drag {
            Some(LeftDrag::Marquee(rect)) => Some(rect),
            _ => None,
        }
    }

    /// Pointer state.
    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Apply one event. Returns true when the canvas needs repainting.
    pub fn handle_event(&mut self, canvas: &mut Canvas, event: InputEvent, now: Instant) -> bool {
        match event {
            InputEvent::Pinch { center, scale, phase } => {
                self.track_gesture(phase, now);
                self.handle_pinch(canvas, center, scale, now)
            }
            InputEvent::PanGesture { delta, phase } => {
                self.track_gesture(phase, now);
                // Content follows the fingers.
                canvas.pan_by(-delta)
            }
            InputEvent::Scrollbar { axis, delta } => {
                let delta = match axis {
                    Axis::Horizontal => Vec2::new(delta, 0.0),
                    Axis::Vertical => Vec2::new(0.0, delta),
                };
                canvas.pan_by(delta)
            }
            InputEvent::Wheel { position, delta } => {
                self.handle_wheel(canvas, position, delta, now)
            }
            InputEvent::PointerDown { position, button } => {
                self.handle_press(canvas, position, button, now)
            }
            InputEvent::PointerMove { position } => self.handle_move(canvas, position, now),
            InputEvent::PointerUp { position, button } => {
                self.handle_release(canvas, position, button)
            }
            InputEvent::DoubleClick { position, button } => {
                if button == MouseButton::Left {
                    self.handle_double_click(canvas, position)
                } else {
                    false
                }
            }
            InputEvent::FocusIn(id) => canvas.focus_card(Some(id)),
            InputEvent::FocusOut(id) => {
                if canvas.focused_card() == Some(id) {
                    canvas.focus_card(None)
                } else {
                    false
                }
            }
            InputEvent::TextChanged { card, text } => canvas.set_card_text(card, text),
        }
    }

    fn handle_pinch(
        &mut self,
        canvas: &mut Canvas,
        center: Point,
        scale: f64,
        now: Instant,
    ) -> bool {
        if !(scale.is_finite() && scale > 0.0) {
            log::debug!("Ignoring pinch scale {scale}");
            return false;
        }
        let step = canvas.config().pinch_zoom_step;
        let step = if scale > 1.0 {
            step
        } else if scale < 1.0 {
            1.0 / step
        } else {
            return false;
        };
        canvas.zoom_by(step, center, now)
    }

    fn track_gesture(&mut self, phase: GesturePhase, now: Instant) {
        if phase != GesturePhase::Ended && std::mem::take(&mut self.middle_pan) {
            log::debug!("Trackpad gesture took over from middle-button pan");
        }
        match phase {
            GesturePhase::Started => self.open_gesture = Some(now),
            // Hosts that never send `Started` do not block the mouse.
            GesturePhase::Updated => {
                if self.open_gesture.is_some() {
                    self.open_gesture = Some(now);
                }
            }
            GesturePhase::Ended => self.open_gesture = None,
        }
    }

    /// Whether a trackpad gesture currently owns panning.
    pub fn gesture_active(&self, now: Instant) -> bool {
        self.open_gesture
            .is_some_and(|last| now.saturating_duration_since(last) < GESTURE_IDLE_TIMEOUT)
    }

    fn handle_wheel(
        &mut self,
        canvas: &mut Canvas,
        position: Point,
        delta: Vec2,
        now: Instant,
    ) -> bool {
        self.input.move_to(position);
        let step = canvas.config().wheel_zoom_step;
        if delta.y > 0.0 {
            canvas.zoom_by(step, position, now)
        } else if delta.y < 0.0 {
            canvas.zoom_by(1.0 / step, position, now)
        } else {
            false
        }
    }

    fn handle_press(
        &mut self,
        canvas: &mut Canvas,
        position: Point,
        button: MouseButton,
        now: Instant,
    ) -> bool {
        let is_double = self.input.press(position, button, now);
        match button {
            MouseButton::Middle => {
                if self.gesture_active(now) {
                    return false;
                }
                // A stale gesture that never ended gives way to the mouse.
                self.open_gesture = None;
                self.middle_pan = true;
                true
            }
            MouseButton::Left if is_double && self.detect_double_clicks => {
                self.cancel_left_drag(canvas);
                self.handle_double_click(canvas, position)
            }
            MouseButton::Left => self.begin_left_drag(canvas, position),
            MouseButton::Right => false,
        }
    }

    fn begin_left_drag(&mut self, canvas: &mut Canvas, position: Point) -> bool {
        let world = canvas.viewport.screen_to_world(position);
        match canvas.cards.card_at(world) {
            Some(id) => {
                let mut changed = false;
                if !canvas.is_selected(id) {
                    changed |= canvas.selection.select_only(id);
                }
                canvas.cards.begin_drag(id);
                self.left_drag = Some(LeftDrag::Card { id, grab: world });
                changed
            }
            None => {
                // Clicking the background takes focus away from any card.
                let mut changed = canvas.focus_card(None);
                changed |= canvas.selection.clear();
                self.left_drag = Some(LeftDrag::Marquee(SelectionRect::new(world)));
                changed
            }
        }
    }

    fn handle_move(&mut self, canvas: &mut Canvas, position: Point, now: Instant) -> bool {
        self.input.move_to(position);

        if self.middle_pan {
            if self.gesture_active(now) {
                return false;
            }
            // Content follows the cursor.
            return canvas.pan_by(-self.input.pointer_delta());
        }

        let world = canvas.viewport.screen_to_world(position);
        match &mut self.left_drag {
            Some(LeftDrag::Card { id, grab }) => {
                let Some(origin) = canvas.cards.drag_origin() else {
                    return false;
                };
                canvas.cards.update_drag(*id, origin + (world - *grab))
            }
            Some(LeftDrag::Marquee(rect)) => {
                rect.current = world;
                let rect = rect.to_rect();
                canvas.select_in_rect(rect);
                true
            }
            None => false,
        }
    }

    fn handle_release(
        &mut self,
        canvas: &mut Canvas,
        position: Point,
        button: MouseButton,
    ) -> bool {
        self.input.move_to(position);
        match button {
            MouseButton::Middle => std::mem::take(&mut self.middle_pan),
            MouseButton::Left => match self.left_drag.take() {
                Some(LeftDrag::Card { id, .. }) => canvas.cards.end_drag(id),
                // Marquee overlay disappears.
                Some(LeftDrag::Marquee(_)) => true,
                None => false,
            },
            MouseButton::Right => false,
        }
    }

    fn handle_double_click(&mut self, canvas: &mut Canvas, position: Point) -> bool {
        let world = canvas.viewport.screen_to_world(position);
        match canvas.cards.card_at(world) {
            // The card itself handles it: start editing.
            Some(id) => canvas.focus_card(Some(id)),
            None => {
                canvas.create_card_at_screen(position);
                true
            }
        }
    }

    fn cancel_left_drag(&mut self, canvas: &mut Canvas) {
        if let Some(LeftDrag::Card { id, .. }) = self.left_drag.take() {
            canvas.cards.end_drag(id);
        }
    }
}
