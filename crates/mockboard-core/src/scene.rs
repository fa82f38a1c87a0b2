//! The scene: every element plus its draw order.

use crate::element::{Element, ElementId};
use kurbo::{Point, Rect};
use std::collections::{HashMap, HashSet};

/// An owned deep copy of the scene, used for undo/redo.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneSnapshot {
    pub elements: HashMap<ElementId, Element>,
    pub element_order: Vec<ElementId>,
}

impl SceneSnapshot {
    /// Elements in draw order.
    pub fn ordered(&self) -> Vec<Element> {
        self.element_order
            .iter()
            .filter_map(|id| self.elements.get(id))
            .cloned()
            .collect()
    }
}

/// All elements keyed by id, plus z-order (back to front).
///
/// `element_order` and the keys of `elements` always hold exactly the same
/// ids, each once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    elements: HashMap<ElementId, Element>,
    element_order: Vec<ElementId>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a scene from elements in draw order. Repeated ids keep their first occurrence.
    pub fn from_elements(elements: impl IntoIterator<Item = Element>) -> Self {
        let mut scene = Self::new();
        for element in elements {
            if !scene.contains(element.id()) {
                scene.insert(element);
            }
        }
        scene
    }

    /// Rebuild from a snapshot, dropping any entry that breaks the order/map pairing.
    pub fn from_snapshot(snapshot: SceneSnapshot) -> Self {
        let SceneSnapshot {
            mut elements,
            element_order,
        } = snapshot;
        let mut scene = Self::new();
        for id in element_order {
            if let Some(element) = elements.remove(&id) {
                scene.insert(element);
            }
        }
        if !elements.is_empty() {
            log::warn!("Dropped {} elements missing from draw order", elements.len());
        }
        scene
    }

    /// Deep copy of the current state.
    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot {
            elements: self.elements.clone(),
            element_order: self.element_order.clone(),
        }
    }

    /// Insert on top of the draw order. Replaces an element with the same id in place.
    pub fn insert(&mut self, element: Element) -> ElementId {
        let id = element.id();
        if self.elements.insert(id, element).is_none() {
            self.element_order.push(id);
        }
        id
    }

    /// Remove an element from both the map and the draw order.
    pub fn remove(&mut self, id: ElementId) -> Option<Element> {
        let removed = self.elements.remove(&id)?;
        self.element_order.retain(|&other| other != id);
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.elements.clear();
        self.element_order.clear();
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(&id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Draw order, back to front.
    pub fn order(&self) -> &[ElementId] {
        &self.element_order
    }

    /// Elements keyed by id.
    pub fn elements(&self) -> &HashMap<ElementId, Element> {
        &self.elements
    }

    /// Elements in draw order (back to front).
    pub fn ordered(&self) -> impl Iterator<Item = &Element> {
        self.element_order.iter().filter_map(|id| self.elements.get(id))
    }

    /// Move the given ids to the top, keeping their current relative order.
    pub fn bring_to_front(&mut self, ids: &[ElementId]) {
        let moving: HashSet<ElementId> = ids.iter().copied().collect();
        let (moved, rest): (Vec<_>, Vec<_>) = self.element_order.iter().copied().partition(|id| moving.contains(id));
        self.element_order = rest.into_iter().chain(moved).collect();
    }

    /// Move the given ids to the bottom, keeping their current relative order.
    pub fn send_to_back(&mut self, ids: &[ElementId]) {
        let moving: HashSet<ElementId> = ids.iter().copied().collect();
        let (moved, rest): (Vec<_>, Vec<_>) = self.element_order.iter().copied().partition(|id| moving.contains(id));
        self.element_order = moved.into_iter().chain(rest).collect();
    }

    /// Elements whose box contains the point, topmost first.
    pub fn elements_at_point(&self, point: Point) -> Vec<ElementId> {
        self.element_order
            .iter()
            .rev()
            .filter(|id| self.elements.get(*id).is_some_and(|el| el.contains(point)))
            .copied()
            .collect()
    }

    /// Elements strictly overlapping the rectangle, in draw order.
    pub fn elements_in_rect(&self, rect: Rect) -> Vec<ElementId> {
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return Vec::new();
        }
        self.ordered()
            .filter(|el| el.intersects(rect))
            .map(Element::id)
            .collect()
    }

    /// Check the order/map pairing.
    pub fn is_consistent(&self) -> bool {
        let unique: HashSet<&ElementId> = self.element_order.iter().collect();
        unique.len() == self.element_order.len()
            && self.element_order.len() == self.elements.len()
            && self.element_order.iter().all(|id| self.elements.contains_key(id))
    }
}
