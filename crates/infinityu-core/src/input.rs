//! Input events fed to the canvas and pointer state tracking.

use crate::Instant;
use crate::card::CardId;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Phase of a continuous trackpad gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GesturePhase {
    Started,
    Updated,
    Ended,
}

/// Scrollbar axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Everything the host forwards to the canvas.
///
/// Positions are in screen pixels relative to the canvas viewport.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown {
        position: Point,
        button: MouseButton,
    },
    PointerUp {
        position: Point,
        button: MouseButton,
    },
    PointerMove {
        position: Point,
    },
    /// A double-click already recognised by the host.
    DoubleClick {
        position: Point,
        button: MouseButton,
    },
    /// Mouse wheel, `delta` in notches (positive y scrolls up / away).
    Wheel {
        position: Point,
        delta: Vec2,
    },
    /// Pinch zoom. `scale` is relative to the previous update (1.0 = no change).
    Pinch {
        center: Point,
        scale: f64,
        phase: GesturePhase,
    },
    /// Two-finger pan, `delta` is finger travel in screen pixels.
    PanGesture {
        delta: Vec2,
        phase: GesturePhase,
    },
    /// Scrollbar thumb moved by `delta` screen pixels.
    Scrollbar {
        axis: Axis,
        delta: f64,
    },
    /// A card's text region gained keyboard focus.
    FocusIn(CardId),
    /// A card's text region lost keyboard focus.
    FocusOut(CardId),
    /// The text in a card's text region changed.
    TextChanged {
        card: CardId,
        text: String,
    },
}

/// Double-click detection constants.
pub const DOUBLE_CLICK_TIME: Duration = Duration::from_millis(500);
pub const DOUBLE_CLICK_DISTANCE: f64 = 5.0;

/// Tracks the pointer and recent presses across events.
#[derive(Debug, Clone)]
pub struct InputState {
    /// Pointer position in screen coordinates.
    pub pointer: Point,
    last_pointer: Point,
    /// Time and place of the press that may start a double-click.
    pending_click: Option<(Instant, Point)>,
    double_click_time: Duration,
    double_click_distance: f64,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new(DOUBLE_CLICK_TIME, DOUBLE_CLICK_DISTANCE)
    }
}

impl InputState {
    /// Create an input state with custom double-click thresholds.
    pub fn new(double_click_time: Duration, double_click_distance: f64) -> Self {
        Self {
            pointer: Point::ZERO,
            last_pointer: Point::ZERO,
            pending_click: None,
            double_click_time,
            double_click_distance,
        }
    }

    /// Record a button press. Returns true if it completes a left double-click.
    pub fn press(&mut self, position: Point, button: MouseButton, now: Instant) -> bool {
        self.move_to(position);
        if button != MouseButton::Left {
            return false;
        }

        let is_double = self.pending_click.is_some_and(|(time, pos)| {
            now.saturating_duration_since(time) < self.double_click_time
                && position.distance(pos) < self.double_click_distance
        });
        // A completed double-click clears the pending press so a triple-click
        // is not a second double-click.
        self.pending_click = if is_double { None } else { Some((now, position)) };
        is_double
    }

    /// Record pointer movement.
    pub fn move_to(&mut self, position: Point) {
        self.last_pointer = self.pointer;
        self.pointer = position;
    }

    /// Pointer movement since the previous event.
    pub fn pointer_delta(&self) -> Vec2 {
        self.pointer - self.last_pointer
    }
}
