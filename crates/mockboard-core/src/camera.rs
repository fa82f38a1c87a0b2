//! Camera module for pan/zoom transforms.
//!
//! Canvas coordinates are zoom-independent logical units. The canvas surface
//! is drawn at `origin + pan`, scaled by `zoom`; the pan offset is measured in
//! screen pixels.

use kurbo::{Affine, Point, Size, Vec2};
use serde::{Deserialize, Deserializer, Serialize};

/// Minimum allowed zoom level.
pub const MIN_ZOOM: f64 = 0.25;
/// Maximum allowed zoom level.
pub const MAX_ZOOM: f64 = 4.0;
/// Zoom change per zoom-in/zoom-out step or wheel notch.
pub const ZOOM_STEP: f64 = 0.1;

/// Clamp a zoom factor into the supported range.
pub fn clamp_zoom(zoom: f64) -> f64 {
    zoom.clamp(MIN_ZOOM, MAX_ZOOM)
}

/// The render transform: `translate(origin) · translate(pan) · scale(zoom)`.
pub fn view_transform(zoom: f64, pan: Vec2, origin: Point) -> Affine {
    Affine::translate(origin.to_vec2()) * Affine::translate(pan) * Affine::scale(zoom)
}

/// Convert a screen point to canvas coordinates.
pub fn screen_to_canvas(point: Point, zoom: f64, pan: Vec2, origin: Point) -> Point {
    view_transform(zoom, pan, origin).inverse() * point
}

/// Convert a canvas point to screen coordinates.
pub fn canvas_to_screen(point: Point, zoom: f64, pan: Vec2, origin: Point) -> Point {
    view_transform(zoom, pan, origin) * point
}

/// Where the canvas surface's top-left sits in a viewport it is centred in.
pub fn canvas_origin(viewport: Size, canvas: Size) -> Point {
    Point::new(
        viewport.width / 2.0 - canvas.width / 2.0,
        viewport.height / 2.0 - canvas.height / 2.0,
    )
}

/// Camera manages the view transform for the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Camera {
    /// Current zoom level (1.0 = 100%).
    #[serde(deserialize_with = "deserialize_zoom")]
    zoom: f64,
    /// Pan offset in screen pixels.
    pub pan_offset: Vec2,
}

fn deserialize_zoom<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    f64::deserialize(deserializer).map(clamp_zoom)
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan_offset: Vec2::ZERO,
        }
    }
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Set the zoom level, clamped to [`MIN_ZOOM`, `MAX_ZOOM`].
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = clamp_zoom(zoom);
    }

    /// Change the zoom level by `delta`, clamped.
    pub fn zoom_by(&mut self, delta: f64) {
        self.set_zoom(self.zoom + delta);
    }

    /// Pan the camera by a delta in screen coordinates.
    pub fn pan(&mut self, delta: Vec2) {
        self.pan_offset += delta;
    }

    /// Affine transform for rendering at the given canvas origin.
    pub fn transform(&self, origin: Point) -> Affine {
        view_transform(self.zoom, self.pan_offset, origin)
    }

    pub fn screen_to_canvas(&self, point: Point, origin: Point) -> Point {
        screen_to_canvas(point, self.zoom, self.pan_offset, origin)
    }

    pub fn canvas_to_screen(&self, point: Point, origin: Point) -> Point {
        canvas_to_screen(point, self.zoom, self.pan_offset, origin)
    }

    /// Reset zoom to 100%.
    pub fn reset_zoom(&mut self) {
        self.zoom = 1.0;
    }

    /// Center the view by clearing the pan offset.
    pub fn center(&mut self) {
        self.pan_offset = Vec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_camera() {
        let camera = Camera::new();
        assert_eq!(camera.pan_offset, Vec2::ZERO);
        assert!((camera.zoom() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_deserialized_zoom_is_clamped() {
        let camera: Camera = serde_json::from_str(r#"{"zoom": 12.0, "panOffset": {"x": 0.0, "y": 0.0}}"#).unwrap();
        assert!((camera.zoom() - MAX_ZOOM).abs() < f64::EPSILON);
        let camera: Camera = serde_json::from_str(r#"{"zoom": 0.01, "panOffset": {"x": 0.0, "y": 0.0}}"#).unwrap();
        assert!((camera.zoom() - MIN_ZOOM).abs() < f64::EPSILON);
    }

    #[test]
    fn test_screen_to_canvas_identity() {
        let screen = Point::new(100.0, 200.0);
        let canvas = screen_to_canvas(screen, 1.0, Vec2::ZERO, Point::ZERO);
        assert!((canvas.x - screen.x).abs() < f64::EPSILON);
        assert!((canvas.y - screen.y).abs() < f64::EPSILON);
    }

    #[test]
    fn test_screen_to_canvas_with_origin_pan_and_zoom() {
        let origin = Point::new(40.0, 60.0);
        let pan = Vec2::new(10.0, -20.0);
        let canvas = screen_to_canvas(Point::new(150.0, 240.0), 2.0, pan, origin);
        assert!((canvas.x - 50.0).abs() < 1e-10);
        assert!((canvas.y - 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_roundtrip_conversion() {
        let mut camera = Camera::new();
        camera.pan_offset = Vec2::new(30.0, -20.0);
        camera.set_zoom(1.5);
        let origin = Point::new(-12.0, 7.0);

        let original = Point::new(123.0, 456.0);
        let canvas = camera.screen_to_canvas(original, origin);
        let back = camera.canvas_to_screen(canvas, origin);

        assert!((back.x - original.x).abs() < 1e-10);
        assert!((back.y - original.y).abs() < 1e-10);
    }

    #[test]
    fn test_zoom_clamp() {
        let mut camera = Camera::new();
        camera.set_zoom(5.0);
        assert!((camera.zoom() - MAX_ZOOM).abs() < f64::EPSILON);

        camera.set_zoom(0.1);
        assert!((camera.zoom() - MIN_ZOOM).abs() < f64::EPSILON);

        camera.zoom_by(-ZOOM_STEP);
        assert!((camera.zoom() - MIN_ZOOM).abs() < f64::EPSILON);
    }

    #[test]
    fn test_canvas_origin_centres_surface() {
        let origin = canvas_origin(Size::new(1000.0, 800.0), Size::new(1440.0, 900.0));
        assert_eq!(origin, Point::new(-220.0, -50.0));
    }

    #[test]
    fn test_pan_and_center() {
        let mut camera = Camera::new();
        camera.pan(Vec2::new(10.0, 20.0));
        assert!((camera.pan_offset.x - 10.0).abs() < f64::EPSILON);
        assert!((camera.pan_offset.y - 20.0).abs() < f64::EPSILON);

        camera.center();
        assert_eq!(camera.pan_offset, Vec2::ZERO);
    }
}
