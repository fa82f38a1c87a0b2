//! Project file format.

use crate::canvas::{CanvasBackground, CanvasSettings};
use crate::element::{Element, ElementId};
use crate::error::{CanvasError, CanvasResult};
use crate::scene::Scene;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Current project format version.
pub const PROJECT_VERSION: &str = "1.0.0";

/// File extension for saved projects.
pub const PROJECT_EXTENSION: &str = "mbd";

/// Serialized project: canvas settings plus the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectData {
    pub version: String,
    pub canvas_width: f64,
    pub canvas_height: f64,
    #[serde(default)]
    pub canvas_background: CanvasBackground,
    #[serde(default = "default_grid_visible")]
    pub grid_visible: bool,
    pub grid_size: f64,
    #[serde(default = "default_snap_to_grid")]
    pub snap_to_grid: bool,
    pub elements: HashMap<ElementId, Element>,
    pub element_order: Vec<ElementId>,
}

fn default_grid_visible() -> bool {
    CanvasSettings::default().grid_visible
}

fn default_snap_to_grid() -> bool {
    CanvasSettings::default().snap_to_grid
}

impl Default for ProjectData {
    fn default() -> Self {
        Self::new(&CanvasSettings::default(), &Scene::new())
    }
}

impl ProjectData {
    pub fn new(settings: &CanvasSettings, scene: &Scene) -> Self {
        Self {
            version: PROJECT_VERSION.to_string(),
            canvas_width: settings.width,
            canvas_height: settings.height,
            canvas_background: settings.background,
            grid_visible: settings.grid_visible,
            grid_size: settings.grid_size,
            snap_to_grid: settings.snap_to_grid,
            elements: scene.elements().clone(),
            element_order: scene.order().to_vec(),
        }
    }

    /// Check the document before applying it.
    pub fn validate(&self) -> CanvasResult<()> {
        let mut seen = HashSet::with_capacity(self.element_order.len());
        for id in &self.element_order {
            if !seen.insert(*id) {
                return Err(CanvasError::MalformedProject(format!("{id} appears twice in element order")));
            }
            if !self.elements.contains_key(id) {
                return Err(CanvasError::MalformedProject(format!("{id} in element order has no element")));
            }
        }
        if self.elements.len() != self.element_order.len() {
            return Err(CanvasError::MalformedProject(format!(
                "{} elements but {} ordered ids",
                self.elements.len(),
                self.element_order.len()
            )));
        }
        if let Some((key, element)) = self.elements.iter().find(|(key, el)| **key != el.id()) {
            return Err(CanvasError::MalformedProject(format!(
                "element keyed {key} carries id {}",
                element.id()
            )));
        }
        if !(self.canvas_width > 0.0 && self.canvas_height > 0.0) {
            return Err(CanvasError::MalformedProject("canvas size must be positive".to_string()));
        }
        Ok(())
    }

    /// Split into canvas settings and scene. Call [`validate`](Self::validate) first.
    pub fn into_parts(self) -> (CanvasSettings, Scene) {
        let settings = CanvasSettings {
            width: self.canvas_width,
            height: self.canvas_height,
            background: self.canvas_background,
            grid_visible: self.grid_visible,
            grid_size: self.grid_size,
            snap_to_grid: self.snap_to_grid,
        };
        let scene = Scene::from_snapshot(crate::scene::SceneSnapshot {
            elements: self.elements,
            element_order: self.element_order,
        });
        (settings, scene)
    }

    /// Serialize the project to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse and validate a project from JSON.
    pub fn from_json(json: &str) -> CanvasResult<Self> {
        let data: Self = serde_json::from_str(json)?;
        data.validate()?;
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementKind;
    use pretty_assertions::assert_eq;

    fn sample() -> ProjectData {
        let scene = Scene::from_elements(vec![
            Element::new(ElementKind::Button, 0.0, 0.0, 120.0, 36.0),
            Element::new(ElementKind::Table, 0.0, 100.0, 500.0, 240.0),
        ]);
        ProjectData::new(&CanvasSettings::default(), &scene)
    }

    #[test]
    fn test_json_field_names() {
        let json: serde_json::Value = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["version"], "1.0.0");
        assert_eq!(json["canvasWidth"], 1440.0);
        assert_eq!(json["canvasBackground"], "white");
        assert_eq!(json["elementOrder"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_json_round_trip() {
        let data = sample();
        let parsed = ProjectData::from_json(&data.to_json().unwrap()).unwrap();
        assert_eq!(parsed, data);
    }

    #[test]
    fn test_rejects_dangling_order() {
        let mut data = sample();
        data.element_order.push(ElementId::new_v4());
        assert!(matches!(data.validate(), Err(CanvasError::MalformedProject(_))));
    }

    #[test]
    fn test_rejects_orphan_element() {
        let mut data = sample();
        data.element_order.pop();
        assert!(data.validate().is_err());
    }

    #[test]
    fn test_rejects_mismatched_key() {
        let mut data = sample();
        let id = data.element_order[0];
        let element = data.elements.remove(&id).unwrap();
        let other = ElementId::new_v4();
        data.elements.insert(other, element);
        data.element_order[0] = other;
        assert!(data.validate().is_err());
    }

    #[test]
    fn test_sparse_settings_match_new_canvas() {
        let json = r#"{
            "version": "1.0.0",
            "canvasWidth": 800.0,
            "canvasHeight": 600.0,
            "gridSize": 10.0,
            "elements": {},
            "elementOrder": []
        }"#;
        let data = ProjectData::from_json(json).unwrap();
        let defaults = CanvasSettings::default();
        assert_eq!(data.grid_visible, defaults.grid_visible);
        assert_eq!(data.snap_to_grid, defaults.snap_to_grid);
        assert_eq!(data.canvas_background, defaults.background);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(matches!(ProjectData::from_json("[1, 2"), Err(CanvasError::Serialization(_))));
    }
}
