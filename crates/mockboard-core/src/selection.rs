//! Selection and resize handle system.

use crate::snap::snap;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Handle hit tolerance in screen pixels.
pub const HANDLE_HIT_TOLERANCE: f64 = 6.0;

/// One of the eight compass-point resize handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeHandle {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

impl ResizeHandle {
    /// All handles, clockwise from the top edge.
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::Nw,
        ResizeHandle::N,
        ResizeHandle::Ne,
        ResizeHandle::E,
        ResizeHandle::Se,
        ResizeHandle::S,
        ResizeHandle::Sw,
        ResizeHandle::W,
    ];

    /// Moves the top edge (`y` and height).
    pub fn affects_top(self) -> bool {
        matches!(self, ResizeHandle::N | ResizeHandle::Ne | ResizeHandle::Nw)
    }

    /// Moves the bottom edge (height only).
    pub fn affects_bottom(self) -> bool {
        matches!(self, ResizeHandle::S | ResizeHandle::Se | ResizeHandle::Sw)
    }

    /// Moves the left edge (`x` and width).
    pub fn affects_left(self) -> bool {
        matches!(self, ResizeHandle::W | ResizeHandle::Nw | ResizeHandle::Sw)
    }

    /// Moves the right edge (width only).
    pub fn affects_right(self) -> bool {
        matches!(self, ResizeHandle::E | ResizeHandle::Ne | ResizeHandle::Se)
    }

    /// Handle position on a bounding box.
    pub fn position(self, bounds: Rect) -> Point {
        let center = bounds.center();
        let x = if self.affects_left() {
            bounds.x0
        } else if self.affects_right() {
            bounds.x1
        } else {
            center.x
        };
        let y = if self.affects_top() {
            bounds.y0
        } else if self.affects_bottom() {
            bounds.y1
        } else {
            center.y
        };
        Point::new(x, y)
    }
}

/// A selection handle with its position and type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    /// Position in canvas coordinates.
    pub position: Point,
    pub kind: ResizeHandle,
}

impl Handle {
    /// Check if a point (in canvas coordinates) hits this handle.
    /// `tolerance` should be adjusted for camera zoom.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        (point.x - self.position.x).abs() <= tolerance && (point.y - self.position.y).abs() <= tolerance
    }
}

/// The eight resize handles of a bounding box.
pub fn handles(bounds: Rect) -> Vec<Handle> {
    ResizeHandle::ALL
        .iter()
        .map(|&kind| Handle {
            position: kind.position(bounds),
            kind,
        })
        .collect()
}

/// Find the handle under `point`, if any.
pub fn hit_test_handles(bounds: Rect, point: Point, tolerance: f64) -> Option<ResizeHandle> {
    handles(bounds)
        .into_iter()
        .find(|handle| handle.hit_test(point, tolerance))
        .map(|handle| handle.kind)
}

/// Geometry of one element before a gesture started.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Geometry {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// New geometry for a resize gesture.
///
/// Only the dragged edges move and only they are snapped: the right and
/// bottom edges snap the size, the left and top edges snap the position and
/// keep the opposite edge where it was. The size floor is left to the store.
pub fn resize_geometry(
    handle: ResizeHandle,
    start: Geometry,
    delta: Vec2,
    grid_size: f64,
    snap_enabled: bool,
) -> Geometry {
    let mut next = start;
    if handle.affects_right() {
        next.width = snap(start.width + delta.x, grid_size, snap_enabled);
    }
    if handle.affects_left() {
        next.x = snap(start.x + delta.x, grid_size, snap_enabled);
        next.width = start.width - (next.x - start.x);
    }
    if handle.affects_bottom() {
        next.height = snap(start.height + delta.y, grid_size, snap_enabled);
    }
    if handle.affects_top() {
        next.y = snap(start.y + delta.y, grid_size, snap_enabled);
        next.height = start.height - (next.y - start.y);
    }
    next
}

/// Effective delta for a rigid drag: snap the lead element's would-be
/// position and return how far that actually moves it.
pub fn snapped_drag_delta(lead: Point, delta: Vec2, grid_size: f64, snap_enabled: bool) -> Vec2 {
    Vec2::new(
        snap(lead.x + delta.x, grid_size, snap_enabled) - lead.x,
        snap(lead.y + delta.y, grid_size, snap_enabled) - lead.y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_positions() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 50.0);
        let hs = handles(bounds);
        assert_eq!(hs.len(), 8);

        let find = |kind| hs.iter().find(|h| h.kind == kind).unwrap().position;
        assert_eq!(find(ResizeHandle::Nw), Point::new(0.0, 0.0));
        assert_eq!(find(ResizeHandle::N), Point::new(50.0, 0.0));
        assert_eq!(find(ResizeHandle::E), Point::new(100.0, 25.0));
        assert_eq!(find(ResizeHandle::Se), Point::new(100.0, 50.0));
        assert_eq!(find(ResizeHandle::W), Point::new(0.0, 25.0));
    }

    #[test]
    fn test_hit_test_handles() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 50.0);
        assert_eq!(hit_test_handles(bounds, Point::new(103.0, 52.0), 6.0), Some(ResizeHandle::Se));
        assert_eq!(hit_test_handles(bounds, Point::new(50.0, 25.0), 6.0), None);
    }

    #[test]
    fn test_resize_east_snaps_width_only() {
        let start = Geometry::new(10.0, 10.0, 100.0, 40.0);
        let next = resize_geometry(ResizeHandle::E, start, Vec2::new(14.0, 30.0), 10.0, true);
        assert_eq!(next, Geometry::new(10.0, 10.0, 110.0, 40.0));
    }

    #[test]
    fn test_resize_west_keeps_right_edge() {
        let start = Geometry::new(10.0, 10.0, 100.0, 40.0);
        let next = resize_geometry(ResizeHandle::W, start, Vec2::new(-7.0, 0.0), 10.0, true);
        // x snaps from 3 to 0, width grows by the same amount.
        assert_eq!(next, Geometry::new(0.0, 10.0, 110.0, 40.0));
    }

    #[test]
    fn test_resize_corner_affects_both_axes() {
        let start = Geometry::new(0.0, 0.0, 100.0, 100.0);
        let next = resize_geometry(ResizeHandle::Nw, start, Vec2::new(20.0, 30.0), 10.0, false);
        assert_eq!(next, Geometry::new(20.0, 30.0, 80.0, 70.0));
    }

    #[test]
    fn test_snapped_drag_delta() {
        let delta = snapped_drag_delta(Point::new(13.0, 20.0), Vec2::new(4.0, 6.0), 10.0, true);
        assert_eq!(delta, Vec2::new(7.0, 10.0));

        let raw = snapped_drag_delta(Point::new(13.0, 20.0), Vec2::new(4.0, 6.0), 10.0, false);
        assert_eq!(raw, Vec2::new(4.0, 6.0));
    }
}
