//! Copy/paste of elements.

use crate::canvas::CanvasStore;
use crate::element::{Element, ElementId};
use kurbo::Point;

/// Logical clipboard holding deep copies of copied elements.
#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    elements: Vec<Element>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Capture the current selection. An empty selection leaves the clipboard as is.
    pub fn copy(&mut self, store: &CanvasStore) -> usize {
        let copied: Vec<Element> = store
            .selection()
            .iter()
            .filter_map(|id| store.get(*id))
            .cloned()
            .collect();
        if !copied.is_empty() {
            self.elements = copied;
        }
        self.elements.len()
    }

    /// Paste the captured elements and select them.
    ///
    /// If the originals still exist they are duplicated. Otherwise fresh
    /// elements of the captured kinds are added next to where they were.
    pub fn paste(&self, store: &mut CanvasStore) -> Vec<ElementId> {
        if self.elements.is_empty() {
            return Vec::new();
        }
        let ids: Vec<ElementId> = self.elements.iter().map(Element::id).collect();
        let duplicated = store.duplicate(&ids);
        if !duplicated.is_empty() {
            return duplicated;
        }

        let offset = store.duplicate_offset();
        let mut added = Vec::with_capacity(self.elements.len());
        for element in &self.elements {
            let position = element.position() + offset;
            match store.add(element.kind, position) {
                Ok(id) => added.push(id),
                Err(err) => log::warn!("Skipping pasted element: {err}"),
            }
        }
        store.set_selection(added.iter().copied());
        added
    }

    /// Serialize for the host's system clipboard.
    pub fn to_payload(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.elements)
    }

    /// Decode a system clipboard payload. Anything malformed decodes to an empty clipboard.
    pub fn from_payload(payload: &str) -> Self {
        match serde_json::from_str::<Vec<Element>>(payload) {
            Ok(elements) => Self { elements },
            Err(err) => {
                log::warn!("Ignoring malformed clipboard payload: {err}");
                Self::default()
            }
        }
    }
}
