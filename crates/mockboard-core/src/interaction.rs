//! Pointer interaction state machine.
//!
//! Translates screen-space pointer events into store operations: selection,
//! rubber-band select, rigid multi-element drag, handle resize, pan, wheel
//! zoom and inline label editing. It never touches history; the editor
//! checkpoints around gestures.

use crate::camera::{ZOOM_STEP, canvas_origin, screen_to_canvas};
use crate::canvas::CanvasStore;
use crate::element::{ElementId, ElementUpdate};
use crate::input::{Modifiers, MouseButton, PointerEvent};
use crate::selection::{
    Geometry, HANDLE_HIT_TOLERANCE, ResizeHandle, hit_test_handles, resize_geometry, snapped_drag_delta,
};
use kurbo::{Point, Rect, Size, Vec2};

/// Observable controller state. Edit mode excludes every gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionState {
    Idle,
    Panning,
    RubberBandSelecting,
    DraggingElements,
    ResizingElement(ResizeHandle),
    EditingLabel(ElementId),
}

/// Selection rectangle state for rubber-band selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionRect {
    /// Starting point in canvas coordinates.
    pub start: Point,
    /// Current point in canvas coordinates.
    pub current: Point,
}

impl SelectionRect {
    /// Get the selection rectangle as a Rect.
    pub fn to_rect(&self) -> Rect {
        Rect::new(
            self.start.x.min(self.current.x),
            self.start.y.min(self.current.y),
            self.start.x.max(self.current.x),
            self.start.y.max(self.current.y),
        )
    }
}

#[derive(Debug, Clone)]
enum Gesture {
    Idle,
    Pan {
        anchor: Vec2,
        start: Point,
    },
    RubberBand(SelectionRect),
    Drag {
        ids: Vec<ElementId>,
        /// Lead element's position before the drag.
        lead: Point,
        start: Point,
        /// Snapped delta already written to the store.
        applied: Vec2,
        originals: Vec<(ElementId, Geometry)>,
    },
    Resize {
        id: ElementId,
        handle: ResizeHandle,
        start: Point,
        original: Geometry,
    },
    Editing(ElementId),
}

/// Drives store mutations from pointer input.
#[derive(Debug, Clone)]
pub struct InteractionController {
    gesture: Gesture,
    viewport: Option<Size>,
    handle_tolerance: f64,
    zoom_step: f64,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionController {
    pub fn new() -> Self {
        Self {
            gesture: Gesture::Idle,
            viewport: None,
            handle_tolerance: HANDLE_HIT_TOLERANCE,
            zoom_step: ZOOM_STEP,
        }
    }

    /// Handle hit tolerance in screen pixels.
    pub fn with_handle_tolerance(mut self, tolerance: f64) -> Self {
        self.handle_tolerance = tolerance;
        self
    }

    pub fn with_zoom_step(mut self, step: f64) -> Self {
        self.zoom_step = step;
        self
    }

    /// Set the size of the viewport the canvas surface is centred in.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = Some(viewport);
    }

    pub fn state(&self) -> InteractionState {
        match &self.gesture {
            Gesture::Idle => InteractionState::Idle,
            Gesture::Pan { .. } => InteractionState::Panning,
            Gesture::RubberBand(_) => InteractionState::RubberBandSelecting,
            Gesture::Drag { .. } => InteractionState::DraggingElements,
            Gesture::Resize { handle, .. } => InteractionState::ResizingElement(*handle),
            Gesture::Editing(id) => InteractionState::EditingLabel(*id),
        }
    }

    /// Whether a drag or resize is in flight.
    pub fn is_manipulating(&self) -> bool {
        matches!(self.gesture, Gesture::Drag { .. } | Gesture::Resize { .. })
    }

    /// Current rubber-band rectangle (for rendering).
    pub fn selection_rect(&self) -> Option<Rect> {
        match &self.gesture {
            Gesture::RubberBand(rect) => Some(rect.to_rect()),
            _ => None,
        }
    }

    fn origin(&self, store: &CanvasStore) -> Point {
        self.viewport
            .map(|viewport| canvas_origin(viewport, store.settings().size()))
            .unwrap_or(Point::ZERO)
    }

    fn to_canvas(&self, store: &CanvasStore, position: Point) -> Point {
        screen_to_canvas(position, store.zoom(), store.pan_offset(), self.origin(store))
    }

    /// Topmost visible element under a canvas point.
    fn element_at(store: &CanvasStore, point: Point) -> Option<ElementId> {
        store
            .elements_at_point(point)
            .into_iter()
            .find(|id| store.get(*id).is_some_and(|el| el.visible))
    }

    /// Follow edit-mode changes made directly on the store.
    pub fn sync(&mut self, store: &CanvasStore) {
        match (&self.gesture, store.editing()) {
            (Gesture::Editing(id), editing) if editing != Some(*id) => {
                self.gesture = match editing {
                    Some(other) => Gesture::Editing(other),
                    None => Gesture::Idle,
                };
            }
            (Gesture::Idle, Some(id)) => self.gesture = Gesture::Editing(id),
            _ => {}
        }
    }

    /// Dispatch one pointer event.
    pub fn handle_event(&mut self, store: &mut CanvasStore, event: PointerEvent) -> InteractionState {
        match event {
            PointerEvent::Down {
                position,
                button,
                modifiers,
            } => self.pointer_down(store, position, button, modifiers),
            PointerEvent::Move { position } => self.pointer_move(store, position),
            PointerEvent::Up { position } => self.pointer_up(store, position),
            PointerEvent::DoubleClick { position } => self.double_click(store, position),
            PointerEvent::Wheel { delta, modifiers } => self.wheel(store, delta, modifiers),
        }
    }

    pub fn pointer_down(
        &mut self,
        store: &mut CanvasStore,
        position: Point,
        button: MouseButton,
        modifiers: Modifiers,
    ) -> InteractionState {
        self.sync(store);
        let point = self.to_canvas(store, position);

        if let Gesture::Editing(editing) = self.gesture {
            if Self::element_at(store, point) == Some(editing) {
                return self.state();
            }
            store.set_editing(None);
            self.gesture = Gesture::Idle;
        }

        if button == MouseButton::Middle || (button == MouseButton::Left && modifiers.alt) {
            self.gesture = Gesture::Pan {
                anchor: store.pan_offset(),
                start: position,
            };
            return self.state();
        }
        if button != MouseButton::Left {
            return self.state();
        }

        let tolerance = self.handle_tolerance / store.zoom();
        for &id in store.selection().iter().rev() {
            let Some(element) = store.get(id) else {
                continue;
            };
            if let Some(handle) = hit_test_handles(element.bounds(), point, tolerance) {
                log::debug!("Resize {id} from {handle:?}");
                self.gesture = Gesture::Resize {
                    id,
                    handle,
                    start: point,
                    original: Geometry::new(element.x, element.y, element.width, element.height),
                };
                return self.state();
            }
        }

        match Self::element_at(store, point) {
            Some(hit) => {
                if modifiers.extends_selection() {
                    store.add_to_selection(hit);
                } else if !store.is_selected(hit) {
                    store.set_selection([hit]);
                }
                let ids = store.selection().to_vec();
                let originals = ids
                    .iter()
                    .filter_map(|id| {
                        store
                            .get(*id)
                            .map(|el| (*id, Geometry::new(el.x, el.y, el.width, el.height)))
                    })
                    .collect();
                let lead = store.get(hit).map(|el| el.position()).unwrap_or(point);
                log::debug!("Drag {} elements", ids.len());
                self.gesture = Gesture::Drag {
                    ids,
                    lead,
                    start: point,
                    applied: Vec2::ZERO,
                    originals,
                };
            }
            None => {
                store.clear_selection();
                self.gesture = Gesture::RubberBand(SelectionRect {
                    start: point,
                    current: point,
                });
            }
        }
        self.state()
    }

    pub fn pointer_move(&mut self, store: &mut CanvasStore, position: Point) -> InteractionState {
        let point = self.to_canvas(store, position);
        let settings = store.settings().clone();

        match &mut self.gesture {
            Gesture::Pan { anchor, start } => {
                store.set_pan_offset(*anchor + (position - *start));
            }
            Gesture::RubberBand(rect) => rect.current = point,
            Gesture::Drag {
                ids,
                lead,
                start,
                applied,
                ..
            } => {
                let effective = snapped_drag_delta(*lead, point - *start, settings.grid_size, settings.snap_to_grid);
                let step = effective - *applied;
                if step != Vec2::ZERO {
                    store.move_elements(ids, step);
                    *applied = effective;
                }
            }
            Gesture::Resize {
                id,
                handle,
                start,
                original,
            } => {
                let next = resize_geometry(
                    *handle,
                    *original,
                    point - *start,
                    settings.grid_size,
                    settings.snap_to_grid,
                );
                store.resize(*id, next.x, next.y, next.width, next.height);
            }
            Gesture::Idle | Gesture::Editing(_) => {}
        }
        self.state()
    }

    pub fn pointer_up(&mut self, store: &mut CanvasStore, position: Point) -> InteractionState {
        let point = self.to_canvas(store, position);
        if let Gesture::RubberBand(rect) = &mut self.gesture {
            rect.current = point;
        }
        match std::mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::RubberBand(rect) => {
                let hits: Vec<ElementId> = store
                    .elements_in_rect(rect.to_rect())
                    .into_iter()
                    .filter(|id| store.get(*id).is_some_and(|el| el.visible))
                    .collect();
                if !hits.is_empty() {
                    store.set_selection(hits);
                }
            }
            Gesture::Editing(id) => self.gesture = Gesture::Editing(id),
            _ => {}
        }
        self.state()
    }

    /// Enter label editing on the element under the pointer.
    pub fn double_click(&mut self, store: &mut CanvasStore, position: Point) -> InteractionState {
        let point = self.to_canvas(store, position);
        if let Some(id) = Self::element_at(store, point) {
            self.cancel(store);
            store.set_editing(Some(id));
            self.gesture = Gesture::Editing(id);
            log::debug!("Editing label of {id}");
        }
        self.state()
    }

    /// Zoom with ctrl/meta held, otherwise pan.
    pub fn wheel(&mut self, store: &mut CanvasStore, delta: Vec2, modifiers: Modifiers) -> InteractionState {
        if modifiers.zooms_wheel() {
            let step = if delta.y > 0.0 { -self.zoom_step } else { self.zoom_step };
            store.set_zoom(store.zoom() + step);
        } else {
            store.set_pan_offset(store.pan_offset() - delta);
        }
        self.state()
    }

    /// Write the edited label and leave edit mode. Returns false when not editing.
    pub fn commit_label(&mut self, store: &mut CanvasStore, text: impl Into<String>) -> bool {
        self.sync(store);
        let Gesture::Editing(id) = self.gesture else {
            return false;
        };
        store.update(id, ElementUpdate::label(text));
        store.set_editing(None);
        self.gesture = Gesture::Idle;
        true
    }

    /// Abort the current gesture, restoring pre-gesture geometry for drag and resize.
    pub fn cancel(&mut self, store: &mut CanvasStore) {
        match std::mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::Drag { originals, .. } => {
                for (id, geometry) in originals {
                    store.update(id, ElementUpdate::position(geometry.x, geometry.y));
                }
            }
            Gesture::Resize { id, original, .. } => {
                store.resize(id, original.x, original.y, original.width, original.height);
            }
            Gesture::Editing(_) => store.set_editing(None),
            Gesture::Idle | Gesture::Pan { .. } | Gesture::RubberBand(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementKind;

    fn down(controller: &mut InteractionController, store: &mut CanvasStore, x: f64, y: f64) -> InteractionState {
        controller.pointer_down(store, Point::new(x, y), MouseButton::Left, Modifiers::NONE)
    }

    fn store_with(elements: &[(f64, f64, f64, f64)]) -> (CanvasStore, Vec<ElementId>) {
        let mut store = CanvasStore::default();
        let ids = elements
            .iter()
            .map(|&(x, y, w, h)| {
                let id = store.add(ElementKind::Rectangle, Point::new(x, y)).unwrap();
                store.resize(id, x, y, w, h);
                id
            })
            .collect();
        store.clear_selection();
        (store, ids)
    }

    #[test]
    fn test_rubber_band_selects_strictly_overlapping() {
        let (mut store, ids) = store_with(&[(50.0, 50.0, 20.0, 20.0), (200.0, 200.0, 20.0, 20.0)]);
        let mut controller = InteractionController::new();

        assert_eq!(down(&mut controller, &mut store, 0.0, 0.0), InteractionState::RubberBandSelecting);
        controller.pointer_move(&mut store, Point::new(100.0, 100.0));
        assert_eq!(controller.selection_rect(), Some(Rect::new(0.0, 0.0, 100.0, 100.0)));
        controller.pointer_up(&mut store, Point::new(100.0, 100.0));

        assert_eq!(store.selection(), &[ids[0]]);
        assert_eq!(controller.state(), InteractionState::Idle);
    }

    #[test]
    fn test_zero_area_rubber_band_selects_nothing() {
        let (mut store, ids) = store_with(&[(50.0, 50.0, 20.0, 20.0)]);
        store.set_selection([ids[0]]);
        let mut controller = InteractionController::new();

        down(&mut controller, &mut store, 10.0, 10.0);
        controller.pointer_up(&mut store, Point::new(10.0, 10.0));
        assert!(store.selection().is_empty());
    }

    #[test]
    fn test_drag_moves_selection_rigidly_with_snap() {
        let (mut store, ids) = store_with(&[(10.0, 10.0, 40.0, 40.0), (103.0, 7.0, 40.0, 40.0)]);
        store.set_selection(ids.clone());
        let mut controller = InteractionController::new();

        assert_eq!(down(&mut controller, &mut store, 20.0, 20.0), InteractionState::DraggingElements);
        controller.pointer_move(&mut store, Point::new(34.0, 27.0));
        // Lead snaps 10+14 -> 20 and 10+7 -> 20; the other element follows by the same delta.
        assert_eq!(store.get(ids[0]).unwrap().position(), Point::new(20.0, 20.0));
        assert_eq!(store.get(ids[1]).unwrap().position(), Point::new(113.0, 17.0));

        controller.pointer_move(&mut store, Point::new(41.0, 20.0));
        assert_eq!(store.get(ids[0]).unwrap().position(), Point::new(30.0, 10.0));
        assert_eq!(store.get(ids[1]).unwrap().position(), Point::new(123.0, 7.0));

        controller.pointer_up(&mut store, Point::new(41.0, 20.0));
        assert_eq!(controller.state(), InteractionState::Idle);
    }

    #[test]
    fn test_click_unselected_replaces_selection_shift_adds() {
        let (mut store, ids) = store_with(&[(0.0, 0.0, 40.0, 40.0), (100.0, 0.0, 40.0, 40.0)]);
        let mut controller = InteractionController::new();

        down(&mut controller, &mut store, 10.0, 10.0);
        controller.pointer_up(&mut store, Point::new(10.0, 10.0));
        assert_eq!(store.selection(), &[ids[0]]);

        controller.pointer_down(&mut store, Point::new(110.0, 10.0), MouseButton::Left, Modifiers::shift());
        controller.pointer_up(&mut store, Point::new(110.0, 10.0));
        assert_eq!(store.selection(), &[ids[0], ids[1]]);
    }

    #[test]
    fn test_resize_from_handle_enforces_minimum() {
        let (mut store, ids) = store_with(&[(0.0, 0.0, 100.0, 100.0)]);
        store.set_selection([ids[0]]);
        let mut controller = InteractionController::new();

        let state = down(&mut controller, &mut store, 100.0, 100.0);
        assert_eq!(state, InteractionState::ResizingElement(ResizeHandle::Se));

        controller.pointer_move(&mut store, Point::new(153.0, 100.0));
        let el = store.get(ids[0]).unwrap();
        assert_eq!((el.width, el.height), (150.0, 100.0));

        controller.pointer_move(&mut store, Point::new(0.0, 0.0));
        let el = store.get(ids[0]).unwrap();
        assert_eq!((el.width, el.height), (20.0, 20.0));
    }

    #[test]
    fn test_cancel_restores_pre_gesture_geometry() {
        let (mut store, ids) = store_with(&[(0.0, 0.0, 40.0, 40.0)]);
        let mut controller = InteractionController::new();

        down(&mut controller, &mut store, 10.0, 10.0);
        controller.pointer_move(&mut store, Point::new(90.0, 60.0));
        assert_eq!(store.get(ids[0]).unwrap().position(), Point::new(80.0, 50.0));

        controller.cancel(&mut store);
        assert_eq!(store.get(ids[0]).unwrap().position(), Point::ZERO);
        assert_eq!(controller.state(), InteractionState::Idle);
    }

    #[test]
    fn test_pan_uses_screen_delta() {
        let (mut store, _) = store_with(&[]);
        store.set_zoom(2.0);
        let mut controller = InteractionController::new();

        let state = controller.pointer_down(&mut store, Point::new(10.0, 10.0), MouseButton::Middle, Modifiers::NONE);
        assert_eq!(state, InteractionState::Panning);
        controller.pointer_move(&mut store, Point::new(40.0, 25.0));
        assert_eq!(store.pan_offset(), Vec2::new(30.0, 15.0));

        controller.pointer_up(&mut store, Point::new(40.0, 25.0));
        let state = controller.pointer_down(&mut store, Point::new(0.0, 0.0), MouseButton::Left, Modifiers::alt());
        assert_eq!(state, InteractionState::Panning);
    }

    #[test]
    fn test_wheel_zooms_or_pans() {
        let (mut store, _) = store_with(&[]);
        let mut controller = InteractionController::new();

        controller.wheel(&mut store, Vec2::new(0.0, 100.0), Modifiers::ctrl());
        assert!((store.zoom() - 0.9).abs() < 1e-9);
        controller.wheel(&mut store, Vec2::new(0.0, -100.0), Modifiers::ctrl());
        assert!((store.zoom() - 1.0).abs() < 1e-9);

        controller.wheel(&mut store, Vec2::new(5.0, 10.0), Modifiers::NONE);
        assert_eq!(store.pan_offset(), Vec2::new(-5.0, -10.0));
    }

    #[test]
    fn test_editing_suppresses_gestures_on_edited_element() {
        let (mut store, ids) = store_with(&[(0.0, 0.0, 100.0, 40.0)]);
        let mut controller = InteractionController::new();

        let state = controller.double_click(&mut store, Point::new(10.0, 10.0));
        assert_eq!(state, InteractionState::EditingLabel(ids[0]));

        assert_eq!(down(&mut controller, &mut store, 20.0, 20.0), InteractionState::EditingLabel(ids[0]));
        controller.pointer_move(&mut store, Point::new(80.0, 80.0));
        assert_eq!(store.get(ids[0]).unwrap().position(), Point::ZERO);

        assert!(controller.commit_label(&mut store, "Save"));
        assert_eq!(store.get(ids[0]).unwrap().label, "Save");
        assert_eq!(store.editing(), None);
        assert_eq!(controller.state(), InteractionState::Idle);
    }

    #[test]
    fn test_element_deleted_mid_drag_is_tolerated() {
        let (mut store, ids) = store_with(&[(0.0, 0.0, 40.0, 40.0)]);
        let mut controller = InteractionController::new();

        down(&mut controller, &mut store, 10.0, 10.0);
        store.remove(&ids);
        controller.pointer_move(&mut store, Point::new(50.0, 50.0));
        assert_eq!(controller.pointer_up(&mut store, Point::new(50.0, 50.0)), InteractionState::Idle);
        assert!(store.is_empty());
    }

    #[test]
    fn test_viewport_origin_offsets_hit_testing() {
        let (mut store, ids) = store_with(&[(0.0, 0.0, 40.0, 40.0)]);
        let mut controller = InteractionController::new();
        // Canvas 1440x900 centred in a 1640x1100 viewport sits at (100, 100).
        controller.set_viewport(Size::new(1640.0, 1100.0));

        assert_eq!(down(&mut controller, &mut store, 110.0, 110.0), InteractionState::DraggingElements);
        assert_eq!(store.selection(), &[ids[0]]);
    }
}
