//! Canvas store: the scene plus selection, edit mode and canvas settings.
//!
//! Every mutation is total. Ids that no longer exist are skipped, never
//! reported, so callers can act on stale selections without checking first.

use crate::camera::Camera;
use crate::element::{
    Element, ElementId, ElementKind, ElementUpdate, FieldColumn, MIN_ELEMENT_SIZE, StyleUpdate, field_id_for,
};
use crate::error::CanvasResult;
use crate::project::ProjectData;
use crate::registry::KindRegistry;
use crate::scene::{Scene, SceneSnapshot};
use crate::snap::DEFAULT_GRID_SIZE;
use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

/// Offset applied to duplicated and pasted elements.
pub const DUPLICATE_OFFSET: f64 = 20.0;

/// Canvas surface background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CanvasBackground {
    #[default]
    White,
    SoftBlue,
    Black,
    LightBlue,
    BlueGreenGradient,
}

/// Logical drawing surface settings, independent of the viewport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CanvasSettings {
    pub width: f64,
    pub height: f64,
    pub background: CanvasBackground,
    pub grid_visible: bool,
    pub grid_size: f64,
    pub snap_to_grid: bool,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            width: 1440.0,
            height: 900.0,
            background: CanvasBackground::White,
            grid_visible: true,
            grid_size: DEFAULT_GRID_SIZE,
            snap_to_grid: true,
        }
    }
}

impl CanvasSettings {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Owns the scene, selection, edit mode and canvas settings.
#[derive(Debug, Clone)]
pub struct CanvasStore {
    registry: Arc<KindRegistry>,
    scene: Scene,
    /// Ordered, duplicate-free, always a subset of the draw order.
    selection: Vec<ElementId>,
    editing: Option<ElementId>,
    hovered: Option<ElementId>,
    settings: CanvasSettings,
    camera: Camera,
    duplicate_offset: Vec2,
}

impl Default for CanvasStore {
    fn default() -> Self {
        Self::new(Arc::new(KindRegistry::builtin()))
    }
}

impl CanvasStore {
    /// Create an empty store backed by the given kind registry.
    pub fn new(registry: Arc<KindRegistry>) -> Self {
        Self {
            registry,
            scene: Scene::new(),
            selection: Vec::new(),
            editing: None,
            hovered: None,
            settings: CanvasSettings::default(),
            camera: Camera::new(),
            duplicate_offset: Vec2::new(DUPLICATE_OFFSET, DUPLICATE_OFFSET),
        }
    }

    /// Override the offset used by [`duplicate`](Self::duplicate).
    pub fn with_duplicate_offset(mut self, offset: f64) -> Self {
        self.duplicate_offset = Vec2::new(offset, offset);
        self
    }

    /// Offset applied to duplicated and pasted elements.
    pub fn duplicate_offset(&self) -> Vec2 {
        self.duplicate_offset
    }

    /// Replace the canvas settings wholesale.
    pub fn with_settings(mut self, settings: CanvasSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn registry(&self) -> &KindRegistry {
        &self.registry
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.scene.get(id)
    }

    pub fn len(&self) -> usize {
        self.scene.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scene.is_empty()
    }

    /// Draw order, back to front.
    pub fn element_order(&self) -> &[ElementId] {
        self.scene.order()
    }

    /// Elements in draw order.
    pub fn ordered_elements(&self) -> impl Iterator<Item = &Element> {
        self.scene.ordered()
    }

    /// Elements under a canvas point, topmost first.
    pub fn elements_at_point(&self, point: Point) -> Vec<ElementId> {
        self.scene.elements_at_point(point)
    }

    /// Elements strictly overlapping a canvas rectangle, in draw order.
    pub fn elements_in_rect(&self, rect: Rect) -> Vec<ElementId> {
        self.scene.elements_in_rect(rect)
    }

    pub fn snapshot(&self) -> SceneSnapshot {
        self.scene.snapshot()
    }

    // --- Element mutations ---

    /// Create an element of `kind` at `position` on top of the draw order and select only it.
    pub fn add(&mut self, kind: ElementKind, position: Point) -> CanvasResult<ElementId> {
        let descriptor = self.registry.get(kind)?;
        let size = descriptor.default_size;
        let mut element = Element::new(kind, position.x, position.y, size.width, size.height);
        element.label = descriptor.display_name.to_string();
        element.style = descriptor.resolved_style();
        element.props = descriptor.default_props.clone();
        element.field_meta = descriptor.field_meta_for(field_id_for(self.scene.len()));

        let id = self.scene.insert(element);
        self.selection = vec![id];
        log::debug!("Added {kind} element {id}");
        Ok(id)
    }

    /// Shallow-merge the given fields into an element.
    pub fn update(&mut self, id: ElementId, update: ElementUpdate) -> bool {
        match self.scene.get_mut(id) {
            Some(element) => {
                update.apply_to(element);
                true
            }
            None => false,
        }
    }

    /// Shallow-merge the given fields into an element's style.
    pub fn update_style(&mut self, id: ElementId, update: &StyleUpdate) -> bool {
        match self.scene.get_mut(id) {
            Some(element) => {
                update.apply_to(&mut element.style);
                true
            }
            None => false,
        }
    }

    /// Overwrite one cell of an element's field metadata.
    pub fn set_field_meta(&mut self, id: ElementId, column: FieldColumn, value: impl Into<String>) -> bool {
        match self.scene.get_mut(id) {
            Some(element) => {
                element.field_meta.set(column, value);
                true
            }
            None => false,
        }
    }

    /// Delete elements, dropping them from selection, edit mode and hover.
    pub fn remove(&mut self, ids: &[ElementId]) {
        let removing: HashSet<ElementId> = ids.iter().copied().collect();
        for id in ids {
            self.scene.remove(*id);
        }
        self.selection.retain(|id| !removing.contains(id));
        if self.editing.is_some_and(|id| removing.contains(&id)) {
            self.editing = None;
        }
        if self.hovered.is_some_and(|id| removing.contains(&id)) {
            self.hovered = None;
        }
        log::debug!("Removed {} elements", removing.len());
    }

    /// Translate every unlocked element among `ids`.
    pub fn move_elements(&mut self, ids: &[ElementId], delta: Vec2) {
        for id in ids {
            match self.scene.get_mut(*id) {
                Some(element) if !element.locked => {
                    element.x += delta.x;
                    element.y += delta.y;
                }
                _ => {}
            }
        }
    }

    /// Overwrite an element's geometry. Size is floored at the minimum; locked elements are left alone.
    pub fn resize(&mut self, id: ElementId, x: f64, y: f64, width: f64, height: f64) {
        if let Some(element) = self.scene.get_mut(id).filter(|el| !el.locked) {
            element.x = x;
            element.y = y;
            element.width = width.max(MIN_ELEMENT_SIZE);
            element.height = height.max(MIN_ELEMENT_SIZE);
        }
    }

    pub fn bring_to_front(&mut self, ids: &[ElementId]) {
        self.scene.bring_to_front(ids);
    }

    pub fn send_to_back(&mut self, ids: &[ElementId]) {
        self.scene.send_to_back(ids);
    }

    /// Clone the given elements on top of the draw order, offset, and select the clones.
    ///
    /// Each clone's field id is numbered from the element count at the
    /// moment it is inserted.
    pub fn duplicate(&mut self, ids: &[ElementId]) -> Vec<ElementId> {
        let mut new_ids = Vec::with_capacity(ids.len());
        for id in ids {
            let Some(original) = self.scene.get(*id) else {
                continue;
            };
            let mut clone = original.clone();
            clone.regenerate_id();
            clone.x += self.duplicate_offset.x;
            clone.y += self.duplicate_offset.y;
            clone.field_meta.field_id = field_id_for(self.scene.len());
            new_ids.push(self.scene.insert(clone));
        }
        self.selection = new_ids.clone();
        log::debug!("Duplicated {} elements", new_ids.len());
        new_ids
    }

    /// Replace the scene wholesale. Clears selection and edit mode.
    pub fn replace_all(&mut self, elements: impl IntoIterator<Item = Element>) {
        self.scene = Scene::from_elements(elements);
        self.reset_selection_state();
    }

    /// Restore a history snapshot. Clears selection and edit mode.
    pub fn restore(&mut self, snapshot: SceneSnapshot) {
        self.scene = Scene::from_snapshot(snapshot);
        self.reset_selection_state();
    }

    /// Remove every element.
    pub fn clear_canvas(&mut self) {
        self.scene.clear();
        self.reset_selection_state();
    }

    fn reset_selection_state(&mut self) {
        self.selection.clear();
        self.editing = None;
        self.hovered = None;
    }

    // --- Selection ---

    pub fn selection(&self) -> &[ElementId] {
        &self.selection
    }

    pub fn is_selected(&self, id: ElementId) -> bool {
        self.selection.contains(&id)
    }

    /// Replace the selection and leave edit mode. Unknown and repeated ids are dropped.
    pub fn set_selection(&mut self, ids: impl IntoIterator<Item = ElementId>) {
        self.selection.clear();
        for id in ids {
            if self.scene.contains(id) && !self.selection.contains(&id) {
                self.selection.push(id);
            }
        }
        self.editing = None;
    }

    /// Append to the selection if not already present.
    pub fn add_to_selection(&mut self, id: ElementId) {
        if self.scene.contains(id) && !self.selection.contains(&id) {
            self.selection.push(id);
        }
    }

    /// Empty the selection and leave edit mode.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.editing = None;
    }

    /// Select everything, in draw order.
    pub fn select_all(&mut self) {
        self.selection = self.scene.order().to_vec();
    }

    pub fn editing(&self) -> Option<ElementId> {
        self.editing
    }

    /// Enter or leave inline label editing.
    pub fn set_editing(&mut self, id: Option<ElementId>) {
        self.editing = id.filter(|id| self.scene.contains(*id));
    }

    pub fn hovered(&self) -> Option<ElementId> {
        self.hovered
    }

    pub fn set_hovered(&mut self, id: Option<ElementId>) {
        self.hovered = id.filter(|id| self.scene.contains(*id));
    }

    // --- Canvas settings ---

    pub fn settings(&self) -> &CanvasSettings {
        &self.settings
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.settings.width = width;
        self.settings.height = height;
    }

    pub fn set_background(&mut self, background: CanvasBackground) {
        self.settings.background = background;
    }

    pub fn set_grid_visible(&mut self, visible: bool) {
        self.settings.grid_visible = visible;
    }

    pub fn set_grid_size(&mut self, size: f64) {
        self.settings.grid_size = size;
    }

    pub fn set_snap_to_grid(&mut self, snap: bool) {
        self.settings.snap_to_grid = snap;
    }

    pub fn zoom(&self) -> f64 {
        self.camera.zoom()
    }

    /// Set the zoom level, clamped to `[0.25, 4.0]`.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.camera.set_zoom(zoom);
    }

    pub fn pan_offset(&self) -> Vec2 {
        self.camera.pan_offset
    }

    pub fn set_pan_offset(&mut self, offset: Vec2) {
        self.camera.pan_offset = offset;
    }

    // --- Project ---

    /// Serializable project document for the current scene and canvas.
    pub fn project_data(&self) -> ProjectData {
        ProjectData::new(&self.settings, &self.scene)
    }

    /// Apply a project document. Invalid documents are rejected without touching the store.
    pub fn load_project(&mut self, data: ProjectData) -> CanvasResult<()> {
        data.validate()?;
        let (settings, scene) = data.into_parts();
        self.settings = settings;
        self.scene = scene;
        self.reset_selection_state();
        log::info!("Loaded project with {} elements", self.scene.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::FontWeight;
    use pretty_assertions::assert_eq;

    fn store() -> CanvasStore {
        CanvasStore::default()
    }

    fn add_at(store: &mut CanvasStore, kind: ElementKind, x: f64, y: f64) -> ElementId {
        store.add(kind, Point::new(x, y)).unwrap()
    }

    #[test]
    fn test_add_applies_kind_defaults() {
        let mut store = store();
        let id = add_at(&mut store, ElementKind::ProcessBox, 10.0, 10.0);
        let el = store.get(id).unwrap();

        assert_eq!(el.width, 160.0);
        assert_eq!(el.height, 60.0);
        assert_eq!(el.label, "Process Box");
        assert_eq!(el.style.font_weight, FontWeight::Bold);
        assert_eq!(el.style.background_color, "#e8f0fe");
        assert_eq!(store.selection(), &[id]);
    }

    #[test]
    fn test_add_numbers_field_ids() {
        let mut store = store();
        let a = add_at(&mut store, ElementKind::Button, 10.0, 10.0);
        let b = add_at(&mut store, ElementKind::Button, 50.0, 10.0);
        assert_eq!(store.get(a).unwrap().field_meta.field_id, "001");
        assert_eq!(store.get(b).unwrap().field_meta.field_id, "002");
    }

    #[test]
    fn test_add_unknown_kind_fails() {
        let mut store = CanvasStore::new(Arc::new(KindRegistry::new()));
        assert!(store.add(ElementKind::Button, Point::ZERO).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_clears_editing_and_skips_unknown() {
        let mut store = store();
        let a = add_at(&mut store, ElementKind::Text, 0.0, 0.0);
        let b = add_at(&mut store, ElementKind::Text, 0.0, 50.0);
        store.set_selection([a, b]);
        store.set_editing(Some(a));
        store.set_hovered(Some(a));

        store.remove(&[a, ElementId::new_v4()]);

        assert!(store.get(a).is_none());
        assert_eq!(store.element_order(), &[b]);
        assert_eq!(store.selection(), &[b]);
        assert_eq!(store.editing(), None);
        assert_eq!(store.hovered(), None);
        assert!(store.scene().is_consistent());
    }

    #[test]
    fn test_move_skips_locked() {
        let mut store = store();
        let a = add_at(&mut store, ElementKind::Card, 0.0, 0.0);
        let b = add_at(&mut store, ElementKind::Card, 100.0, 0.0);
        store.update(
            b,
            ElementUpdate {
                locked: Some(true),
                ..ElementUpdate::default()
            },
        );

        store.move_elements(&[a, b], Vec2::new(5.0, 7.0));
        assert_eq!(store.get(a).unwrap().position(), Point::new(5.0, 7.0));
        assert_eq!(store.get(b).unwrap().position(), Point::new(100.0, 0.0));
    }

    #[test]
    fn test_resize_floors_size_and_respects_lock() {
        let mut store = store();
        let a = add_at(&mut store, ElementKind::Button, 0.0, 0.0);
        store.resize(a, 3.0, 4.0, 5.0, -10.0);
        let el = store.get(a).unwrap();
        assert_eq!((el.x, el.y, el.width, el.height), (3.0, 4.0, 20.0, 20.0));

        store.update(
            a,
            ElementUpdate {
                locked: Some(true),
                ..ElementUpdate::default()
            },
        );
        store.resize(a, 0.0, 0.0, 300.0, 300.0);
        assert_eq!(store.get(a).unwrap().width, 20.0);
    }

    #[test]
    fn test_duplicate_offsets_and_selects_clones() {
        let mut store = store();
        let a = add_at(&mut store, ElementKind::Button, 10.0, 10.0);
        let b = add_at(&mut store, ElementKind::Input, 100.0, 40.0);
        store.set_selection([a, b]);

        let new_ids = store.duplicate(&[a, ElementId::new_v4(), b]);
        assert_eq!(new_ids.len(), 2);
        assert_eq!(store.selection(), new_ids.as_slice());

        let copy_a = store.get(new_ids[0]).unwrap();
        assert_eq!(copy_a.position(), Point::new(30.0, 30.0));
        assert_eq!(copy_a.field_meta.field_id, "003");
        let copy_b = store.get(new_ids[1]).unwrap();
        assert_eq!(copy_b.position(), Point::new(120.0, 60.0));
        assert_eq!(copy_b.field_meta.field_id, "004");

        assert!(!store.is_selected(a));
        assert_eq!(store.element_order(), &[a, b, new_ids[0], new_ids[1]]);
    }

    #[test]
    fn test_selection_rules() {
        let mut store = store();
        let a = add_at(&mut store, ElementKind::Text, 0.0, 0.0);
        let b = add_at(&mut store, ElementKind::Text, 0.0, 50.0);

        store.set_selection([a, a, ElementId::new_v4()]);
        assert_eq!(store.selection(), &[a]);

        store.add_to_selection(b);
        store.add_to_selection(b);
        assert_eq!(store.selection(), &[a, b]);

        store.set_editing(Some(a));
        store.clear_selection();
        assert!(store.selection().is_empty());
        assert_eq!(store.editing(), None);

        store.select_all();
        assert_eq!(store.selection(), &[a, b]);
    }

    #[test]
    fn test_replace_all_resets_selection() {
        let mut store = store();
        let a = add_at(&mut store, ElementKind::Text, 0.0, 0.0);
        store.set_editing(Some(a));

        let replacement = Element::new(ElementKind::Card, 1.0, 2.0, 100.0, 100.0);
        store.replace_all(vec![replacement.clone(), replacement.clone()]);

        assert_eq!(store.element_order(), &[replacement.id()]);
        assert!(store.selection().is_empty());
        assert_eq!(store.editing(), None);
    }

    #[test]
    fn test_zoom_clamps() {
        let mut store = store();
        store.set_zoom(5.0);
        assert_eq!(store.zoom(), 4.0);
        store.set_zoom(0.1);
        assert_eq!(store.zoom(), 0.25);
    }

    #[test]
    fn test_project_round_trip() {
        let mut store = store();
        add_at(&mut store, ElementKind::Table, 0.0, 0.0);
        add_at(&mut store, ElementKind::Button, 10.0, 300.0);
        store.set_background(CanvasBackground::SoftBlue);
        store.set_grid_size(20.0);

        let data = store.project_data();
        let mut loaded = CanvasStore::default();
        loaded.load_project(data).unwrap();

        assert_eq!(loaded.scene(), store.scene());
        assert_eq!(loaded.settings(), store.settings());
    }

    #[test]
    fn test_set_field_meta() {
        let mut store = store();
        let a = add_at(&mut store, ElementKind::Input, 0.0, 0.0);
        assert!(store.set_field_meta(a, FieldColumn::TechnicalField, "MATNR"));
        assert_eq!(store.get(a).unwrap().field_meta.technical_field, "MATNR");
        assert!(!store.set_field_meta(ElementId::new_v4(), FieldColumn::Remarks, "x"));
    }
}
