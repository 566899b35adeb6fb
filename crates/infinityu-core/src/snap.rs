//! Grid snapping for card positions.

use kurbo::Point;

/// Grid spacing in world units (matches the background dot grid).
pub const GRID_SIZE: f64 = 15.0;

/// Snap a single coordinate to the nearest multiple of `grid_size`.
///
/// A non-positive or non-finite grid size leaves the value untouched.
pub fn snap_coordinate(value: f64, grid_size: f64) -> f64 {
    if grid_size <= 0.0 || !grid_size.is_finite() {
        return value;
    }
    (value / grid_size).round() * grid_size
}

/// Snap a point to the nearest grid intersection.
///
/// Snapping is idempotent: a point that already lies on the grid comes back
/// unchanged.
pub fn snap_to_grid(point: Point, grid_size: f64) -> Point {
    Point::new(
        snap_coordinate(point.x, grid_size),
        snap_coordinate(point.y, grid_size),
    )
}

/// Check whether a point lies on the grid (within floating-point tolerance).
pub fn is_on_grid(point: Point, grid_size: f64) -> bool {
    let snapped = snap_to_grid(point, grid_size);
    (snapped.x - point.x).abs() < 1e-9 && (snapped.y - point.y).abs() < 1e-9
}
