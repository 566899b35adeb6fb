//! infinityu core library
//!
//! Platform-agnostic canvas interaction core for the infinityu note board:
//! the pan/zoom viewport, the card store with its editing state machine, and
//! the input dispatcher that drives both.

pub mod canvas;
pub mod card;
pub mod config;
pub mod dispatch;
pub mod focus;
pub mod indicator;
pub mod input;
pub mod platform;
pub mod selection;
pub mod snap;
pub mod viewport;

// Use web_time for WASM compatibility
#[cfg(target_arch = "wasm32")]
pub use web_time::Instant;
#[cfg(not(target_arch = "wasm32"))]
pub use std::time::Instant;

pub use canvas::{Canvas, CardStore};
pub use card::{CARD_SIZE, Card, CardId, CardKind, EditingState, TextTone};
pub use config::{CanvasConfig, ConfigError, ConfigResult};
pub use dispatch::InputDispatcher;
pub use focus::{FocusChange, FocusTracker, Focusable};
pub use indicator::ZoomIndicator;
pub use input::{Axis, GesturePhase, InputEvent, InputState, MouseButton};
pub use platform::WinitTranslator;
pub use selection::{Selection, SelectionRect};
pub use snap::{GRID_SIZE, snap_to_grid};
pub use viewport::{BASE_ZOOM, Viewport};
