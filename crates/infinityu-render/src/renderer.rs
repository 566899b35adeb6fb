//! Renderer trait abstraction.

use infinityu_core::canvas::Canvas;
use infinityu_core::card::TextTone;
use infinityu_core::Instant;
use kurbo::{Rect, Size};
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Invalid viewport size: {0}x{1}")]
    InvalidViewport(f64, f64),
    #[error("Invalid scale factor: {0}")]
    InvalidScaleFactor(f64),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Colours used when drawing the board.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Board background.
    pub background: Color,
    /// Grid dot fill.
    pub grid_dot: Color,
    /// Card body fill.
    pub card: Color,
    /// Placeholder text.
    pub hint_text: Color,
    /// User text.
    pub active_text: Color,
    /// Selection and focus accent.
    pub accent: Color,
    /// Zoom indicator pill.
    pub indicator_background: Color,
    /// Zoom indicator label.
    pub indicator_text: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::from_rgba8(0x20, 0x20, 0x20, 255),
            grid_dot: Color::from_rgba8(141, 141, 141, 41),
            card: Color::from_rgba8(0x33, 0x33, 0x33, 255),
            hint_text: Color::from_rgba8(150, 150, 150, 255),
            active_text: Color::from_rgba8(230, 230, 230, 255),
            accent: Color::from_rgba8(0x5b, 0x7c, 0xfa, 255),
            indicator_background: Color::from_rgba8(0x26, 0x26, 0x26, 230),
            indicator_text: Color::from_rgba8(0xdd, 0xdd, 0xdd, 255),
        }
    }
}

impl Theme {
    /// Text colour for a card tone.
    pub fn text_color(&self, tone: TextTone) -> Color {
        match tone {
            TextTone::Hint => self.hint_text,
            TextTone::Active => self.active_text,
        }
    }
}

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The canvas to render.
    pub canvas: &'a Canvas,
    /// Viewport size in logical pixels.
    pub viewport_size: Size,
    /// Device pixel ratio (for HiDPI).
    pub scale_factor: f64,
    /// Frame colours.
    pub theme: Theme,
    /// Selection rectangle (marquee) in world coordinates.
    pub selection_rect: Option<Rect>,
    /// Frame time, used for the indicator fade.
    pub now: Instant,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context sized to the canvas viewport.
    pub fn new(canvas: &'a Canvas, now: Instant) -> Self {
        Self {
            canvas,
            viewport_size: canvas.viewport_size,
            scale_factor: 1.0,
            theme: Theme::default(),
            selection_rect: None,
            now,
        }
    }

    /// Set the scale factor for HiDPI.
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Override the viewport size.
    pub fn with_viewport_size(mut self, size: Size) -> Self {
        self.viewport_size = size;
        self
    }

    /// Set the frame colours.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set the selection rectangle.
    pub fn with_selection_rect(mut self, rect: Option<Rect>) -> Self {
        self.selection_rect = rect;
        self
    }

    /// Check that the frame can be drawn.
    pub fn validate(&self) -> RenderResult<()> {
        let Size { width, height } = self.viewport_size;
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(RendererError::InvalidViewport(width, height));
        }
        if self.scale_factor <= 0.0 || !self.scale_factor.is_finite() {
            return Err(RendererError::InvalidScaleFactor(self.scale_factor));
        }
        Ok(())
    }
}

/// Trait for rendering backends.
///
/// A backend turns one frame of canvas state into whatever its surface
/// consumes: a GPU scene, a command list, a test recording.
pub trait Renderer: Send + Sync {
    /// Build the scene/command buffer for a frame.
    ///
    /// Called once per frame. An invalid context leaves the previous frame
    /// untouched.
    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<()>;

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.theme.background
    }
}
