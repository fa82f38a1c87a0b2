//! Grid snapping.

use kurbo::Point;

/// Default grid size in canvas units.
pub const DEFAULT_GRID_SIZE: f64 = 10.0;

/// Round `value` to the nearest multiple of `grid_size` when `enabled`.
///
/// A non-positive grid size disables snapping.
pub fn snap(value: f64, grid_size: f64, enabled: bool) -> f64 {
    if !enabled || grid_size <= 0.0 {
        return value;
    }
    (value / grid_size).round() * grid_size
}

/// Snap both axes of a point independently.
pub fn snap_point(point: Point, grid_size: f64, enabled: bool) -> Point {
    Point::new(snap(point.x, grid_size, enabled), snap(point.y, grid_size, enabled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_rounds_to_nearest() {
        assert!((snap(14.0, 10.0, true) - 10.0).abs() < f64::EPSILON);
        assert!((snap(15.0, 10.0, true) - 20.0).abs() < f64::EPSILON);
        assert!((snap(-6.0, 10.0, true) + 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_snap_disabled_is_identity() {
        assert!((snap(14.3, 10.0, false) - 14.3).abs() < f64::EPSILON);
        assert!((snap(14.3, 0.0, true) - 14.3).abs() < f64::EPSILON);
    }

    #[test]
    fn test_snap_point() {
        let snapped = snap_point(Point::new(23.0, 37.0), 20.0, true);
        assert_eq!(snapped, Point::new(20.0, 40.0));
    }
}
