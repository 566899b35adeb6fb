//! Translation of winit window events into canvas input events.

use crate::input::{GesturePhase, InputEvent, MouseButton};
use kurbo::{Point, Vec2};
use winit::event::{ElementState, MouseScrollDelta, TouchPhase, WindowEvent};

/// Map a winit mouse button. Back/forward/other buttons are not used.
pub fn map_button(button: winit::event::MouseButton) -> Option<MouseButton> {
    match button {
        winit::event::MouseButton::Left => Some(MouseButton::Left),
        winit::event::MouseButton::Right => Some(MouseButton::Right),
        winit::event::MouseButton::Middle => Some(MouseButton::Middle),
        _ => None,
    }
}

/// Map a winit touch phase to a gesture phase.
pub fn map_phase(phase: TouchPhase) -> GesturePhase {
    match phase {
        TouchPhase::Started => GesturePhase::Started,
        TouchPhase::Moved => GesturePhase::Updated,
        TouchPhase::Ended | TouchPhase::Cancelled => GesturePhase::Ended,
    }
}

/// Line deltas come from wheel notches and zoom; pixel deltas come from
/// two-finger trackpad scrolling and pan.
pub fn scroll_event(delta: MouseScrollDelta, phase: TouchPhase, cursor: Point) -> InputEvent {
    match delta {
        MouseScrollDelta::LineDelta(x, y) => InputEvent::Wheel {
            position: cursor,
            delta: Vec2::new(x as f64, y as f64),
        },
        MouseScrollDelta::PixelDelta(pos) => InputEvent::PanGesture {
            delta: Vec2::new(pos.x, pos.y),
            phase: map_phase(phase),
        },
    }
}

/// winit reports pinch as an additive magnification delta; the canvas wants
/// a relative scale factor.
pub fn pinch_event(delta: f64, phase: TouchPhase, cursor: Point) -> InputEvent {
    InputEvent::Pinch {
        center: cursor,
        scale: 1.0 + delta,
        phase: map_phase(phase),
    }
}

/// Stateful translator: remembers the cursor so button and gesture events,
/// which carry no position in winit, can be anchored.
#[derive(Debug, Clone, Default)]
pub struct WinitTranslator {
    cursor: Point,
}

impl WinitTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last known cursor position in physical pixels.
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    /// Translate a window event. Events the canvas does not consume yield `None`.
    pub fn translate(&mut self, event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Point::new(position.x, position.y);
                Some(InputEvent::PointerMove { position: self.cursor })
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let button = map_button(*button)?;
                let position = self.cursor;
                Some(match state {
                    ElementState::Pressed => InputEvent::PointerDown { position, button },
                    ElementState::Released => InputEvent::PointerUp { position, button },
                })
            }
            WindowEvent::MouseWheel { delta, phase, .. } => {
                Some(scroll_event(*delta, *phase, self.cursor))
            }
            WindowEvent::PinchGesture { delta, phase, .. } => {
                Some(pinch_event(*delta, *phase, self.cursor))
            }
            WindowEvent::PanGesture { delta, phase, .. } => Some(InputEvent::PanGesture {
                delta: Vec2::new(delta.x as f64, delta.y as f64),
                phase: map_phase(*phase),
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    #[test]
    fn test_line_delta_is_wheel() {
        let notch = MouseScrollDelta::LineDelta(0.0, -1.0);
        let event = scroll_event(notch, TouchPhase::Moved, Point::new(3.0, 4.0));
        assert_eq!(
            event,
            InputEvent::Wheel {
                position: Point::new(3.0, 4.0),
                delta: Vec2::new(0.0, -1.0),
            }
        );
    }

    #[test]
    fn test_pixel_delta_is_pan() {
        let event = scroll_event(
            MouseScrollDelta::PixelDelta(PhysicalPosition::new(12.0, -6.0)),
            TouchPhase::Started,
            Point::ZERO,
        );
        assert_eq!(
            event,
            InputEvent::PanGesture {
                delta: Vec2::new(12.0, -6.0),
                phase: GesturePhase::Started,
            }
        );
    }

    #[test]
    fn test_pinch_delta_to_scale() {
        let event = pinch_event(-0.05, TouchPhase::Cancelled, Point::ZERO);
        let InputEvent::Pinch { scale, phase, .. } = event else {
            panic!("expected pinch");
        };
        assert!((scale - 0.95).abs() < 1e-12);
        assert_eq!(phase, GesturePhase::Ended);
    }

    #[test]
    fn test_button_mapping() {
        assert_eq!(map_button(winit::event::MouseButton::Middle), Some(MouseButton::Middle));
        assert_eq!(map_button(winit::event::MouseButton::Back), None);
        assert_eq!(map_button(winit::event::MouseButton::Other(7)), None);
    }
}
