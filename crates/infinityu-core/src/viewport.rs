//! Viewport module for pan/zoom transforms.

use crate::config::CanvasConfig;
use kurbo::{Affine, Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Zoom factor that corresponds to "100%" in the UI.
pub const BASE_ZOOM: f64 = 1.0;

/// Slack allowed when comparing a zoom result against its bounds, so a
/// sequence of steps that lands exactly on a bound is not rejected by rounding.
const ZOOM_BOUND_EPSILON: f64 = 1e-9;

/// Viewport owns the view transform for the canvas.
///
/// `screen = world * zoom + offset`, so
/// `world = (screen - offset) / zoom`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Current translation offset (pan), in screen pixels.
    pub offset: Vec2,
    /// Current zoom factor (BASE_ZOOM = 100% in UI).
    zoom: f64,
    /// Minimum allowed zoom factor.
    pub min_zoom: f64,
    /// Maximum allowed zoom factor.
    pub max_zoom: f64,
    /// Finite world extent, if any.
    pub world_bounds: Option<Rect>,
    /// Keep the viewport's top-left world point inside `world_bounds` while
    /// panning and zooming.
    pub clamp_pan: bool,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::from_config(&CanvasConfig::default())
    }
}

impl Viewport {
    /// Create a viewport with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a viewport using the zoom bounds and world extent of a config.
    pub fn from_config(config: &CanvasConfig) -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: BASE_ZOOM.clamp(config.min_zoom, config.max_zoom),
            min_zoom: config.min_zoom,
            max_zoom: config.max_zoom,
            world_bounds: config.world_bounds,
            clamp_pan: config.clamp_pan_to_world,
        }
    }

    /// Current zoom factor.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Current zoom as a whole percentage, as shown to the user.
    pub fn zoom_percent(&self) -> u32 {
        (self.zoom * 100.0).round() as u32
    }

    /// Get the affine transform for rendering (world to screen).
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.zoom)
    }

    /// Get the inverse transform for input handling (screen to world).
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.zoom) * Affine::translate(-self.offset)
    }

    /// Convert a screen point to world coordinates.
    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        self.inverse_transform() * screen_point
    }

    /// Convert a world point to screen coordinates.
    pub fn world_to_screen(&self, world_point: Point) -> Point {
        self.transform() * world_point
    }

    /// The part of the world visible in a viewport of the given size.
    pub fn visible_world_rect(&self, viewport_size: Size) -> Rect {
        Rect::from_points(
            self.screen_to_world(Point::ZERO),
            self.screen_to_world(Point::new(viewport_size.width, viewport_size.height)),
        )
    }

    /// Pan the viewport: the offset moves by `-screen_delta`.
    pub fn pan_by(&mut self, screen_delta: Vec2) {
        if !screen_delta.is_finite() {
            log::debug!("Ignoring non-finite pan delta {screen_delta:?}");
            return;
        }
        self.offset -= screen_delta;
        if self.clamp_pan {
            self.clamp_offset();
        }
    }

    /// Multiply the zoom factor by `step`, keeping `anchor` fixed on screen.
    ///
    /// Returns false (and changes nothing) when the step is not a positive
    /// finite number or the result would leave `[min_zoom, max_zoom]`.
    pub fn zoom_by(&mut self, step: f64, anchor: Point) -> bool {
        if !(step.is_finite() && step > 0.0) {
            log::debug!("Ignoring invalid zoom step {step}");
            return false;
        }
        let new_zoom = self.zoom * step;
        if new_zoom < self.min_zoom - ZOOM_BOUND_EPSILON
            || new_zoom > self.max_zoom + ZOOM_BOUND_EPSILON
        {
            log::debug!(
                "Zoom {new_zoom:.3} outside {}..{}, rejected",
                self.min_zoom,
                self.max_zoom
            );
            return false;
        }

        let world_anchor = self.screen_to_world(anchor);
        self.zoom = new_zoom.clamp(self.min_zoom, self.max_zoom);
        // Solve anchor = world_anchor * zoom + offset for the new offset.
        self.offset = anchor.to_vec2() - world_anchor.to_vec2() * self.zoom;
        if self.clamp_pan {
            self.clamp_offset();
        }
        true
    }

    /// Reset viewport to the origin at 100%.
    pub fn reset(&mut self) {
        self.offset = Vec2::ZERO;
        self.zoom = BASE_ZOOM.clamp(self.min_zoom, self.max_zoom);
    }

    fn clamp_offset(&mut self) {
        let Some(bounds) = self.world_bounds else {
            return;
        };
        // Top-left world point is -offset / zoom; keep it inside bounds.
        self.offset.x = self.offset.x.clamp(-bounds.x1 * self.zoom, -bounds.x0 * self.zoom);
        self.offset.y = self.offset.y.clamp(-bounds.y1 * self.zoom, -bounds.y0 * self.zoom);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_point_eq(a: Point, b: Point) {
        assert!((a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9, "{a:?} != {b:?}");
    }

    #[test]
    fn test_default_viewport() {
        let viewport = Viewport::new();
        assert_eq!(viewport.offset, Vec2::ZERO);
        assert!((viewport.zoom() - BASE_ZOOM).abs() < f64::EPSILON);
        assert_eq!(viewport.zoom_percent(), 100);
    }

    #[test]
    fn test_screen_to_world_identity() {
        let viewport = Viewport::new();
        let screen = Point::new(100.0, 200.0);
        assert_point_eq(viewport.screen_to_world(screen), screen);
    }

    #[test]
    fn test_screen_to_world_with_offset() {
        let mut viewport = Viewport::new();
        viewport.offset = Vec2::new(50.0, 100.0);
        let world = viewport.screen_to_world(Point::new(100.0, 200.0));
        assert_point_eq(world, Point::new(50.0, 100.0));
    }

    #[test]
    fn test_roundtrip_conversion() {
        let mut viewport = Viewport::new();
        viewport.offset = Vec2::new(30.0, -20.0);
        assert!(viewport.zoom_by(1.5, Point::new(10.0, 10.0)));

        for original in [Point::new(123.0, 456.0), Point::new(-8.5, 0.25), Point::ZERO] {
            let back = viewport.world_to_screen(viewport.screen_to_world(original));
            assert_point_eq(back, original);
        }
    }

    #[test]
    fn test_pan_subtracts_delta() {
        let mut viewport = Viewport::new();
        viewport.pan_by(Vec2::new(10.0, 20.0));
        assert_eq!(viewport.offset, Vec2::new(-10.0, -20.0));
        assert_point_eq(viewport.screen_to_world(Point::ZERO), Point::new(10.0, 20.0));
    }

    #[test]
    fn test_zoom_keeps_anchor_fixed() {
        let mut viewport = Viewport::new();
        viewport.offset = Vec2::new(-40.0, 75.0);
        let anchor = Point::new(320.0, 180.0);
        let before = viewport.screen_to_world(anchor);

        assert!(viewport.zoom_by(1.12, anchor));
        assert_point_eq(viewport.screen_to_world(anchor), before);

        assert!(viewport.zoom_by(1.0 / 1.08, anchor));
        assert_point_eq(viewport.screen_to_world(anchor), before);
    }

    #[test]
    fn test_zoom_rejected_out_of_bounds() {
        let mut viewport = Viewport::new();
        viewport.offset = Vec2::new(12.0, 34.0);
        let before = viewport.clone();

        assert!(!viewport.zoom_by(10.0, Point::new(5.0, 5.0)));
        assert_eq!(viewport, before);

        assert!(!viewport.zoom_by(0.1, Point::new(5.0, 5.0)));
        assert_eq!(viewport, before);
    }

    #[test]
    fn test_zoom_stays_in_bounds() {
        let mut viewport = Viewport::new();
        let anchor = Point::new(400.0, 300.0);
        for _ in 0..100 {
            viewport.zoom_by(1.12, anchor);
            assert!(viewport.zoom() <= viewport.max_zoom);
        }
        for _ in 0..200 {
            viewport.zoom_by(1.0 / 1.08, anchor);
            assert!(viewport.zoom() >= viewport.min_zoom);
        }
    }

    #[test]
    fn test_invalid_zoom_step() {
        let mut viewport = Viewport::new();
        let before = viewport.clone();
        assert!(!viewport.zoom_by(0.0, Point::ZERO));
        assert!(!viewport.zoom_by(-1.2, Point::ZERO));
        assert!(!viewport.zoom_by(f64::NAN, Point::ZERO));
        assert_eq!(viewport, before);
    }

    #[test]
    fn test_zoom_percent_rounds() {
        let mut viewport = Viewport::new();
        viewport.zoom_by(1.12, Point::ZERO);
        assert_eq!(viewport.zoom_percent(), 112);
        viewport.zoom_by(1.12, Point::ZERO);
        assert_eq!(viewport.zoom_percent(), 125);
    }

    #[test]
    fn test_pan_clamped_to_world() {
        let mut viewport = Viewport::new();
        viewport.clamp_pan = true;
        viewport.world_bounds = Some(Rect::new(-100.0, -100.0, 100.0, 100.0));

        viewport.pan_by(Vec2::new(1000.0, -1000.0));
        assert_point_eq(viewport.screen_to_world(Point::ZERO), Point::new(100.0, -100.0));
    }

    #[test]
    fn test_zoom_out_at_world_edge_stays_clamped() {
        let mut viewport = Viewport::new();
        viewport.clamp_pan = true;
        viewport.pan_by(Vec2::new(-5000.0, -5000.0));
        assert_point_eq(viewport.screen_to_world(Point::ZERO), Point::new(-5000.0, -5000.0));

        assert!(viewport.zoom_by(1.0 / 1.12, Point::new(640.0, 360.0)));
        let top_left = viewport.screen_to_world(Point::ZERO);
        assert!(top_left.x >= -5000.0 - 1e-9, "escaped left edge: {top_left:?}");
        assert!(top_left.y >= -5000.0 - 1e-9, "escaped top edge: {top_left:?}");
        assert!((viewport.zoom() - 1.0 / 1.12).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_unclamped_keeps_anchor_past_edge() {
        let mut viewport = Viewport::new();
        viewport.pan_by(Vec2::new(-5000.0, -5000.0));
        viewport.zoom_by(1.0 / 1.12, Point::new(640.0, 360.0));
        assert!(viewport.screen_to_world(Point::ZERO).x < -5000.0);
    }

    #[test]
    fn test_visible_world_rect() {
        let mut viewport = Viewport::new();
        viewport.zoom_by(2.0, Point::ZERO);
        let rect = viewport.visible_world_rect(Size::new(800.0, 600.0));
        assert!((rect.width() - 400.0).abs() < 1e-9);
        assert!((rect.height() - 300.0).abs() < 1e-9);
    }
}
