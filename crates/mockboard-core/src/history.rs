//! Snapshot-based undo/redo.

use crate::scene::SceneSnapshot;
use std::collections::VecDeque;

/// Maximum number of undo states to keep.
pub const MAX_UNDO_HISTORY: usize = 50;

/// Two bounded snapshot stacks. Callers push a snapshot *before* each
/// undoable step and apply whatever `undo`/`redo` hand back.
#[derive(Debug, Clone)]
pub struct History {
    /// Oldest first.
    past: VecDeque<SceneSnapshot>,
    /// Next redo first.
    future: VecDeque<SceneSnapshot>,
    max_depth: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(MAX_UNDO_HISTORY)
    }
}

impl History {
    pub fn new(max_depth: usize) -> Self {
        Self {
            past: VecDeque::new(),
            future: VecDeque::new(),
            max_depth: max_depth.max(1),
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Record a checkpoint. Any pending redo is discarded.
    pub fn push_snapshot(&mut self, snapshot: SceneSnapshot) {
        self.past.push_back(snapshot);
        while self.past.len() > self.max_depth {
            self.past.pop_front();
        }
        self.future.clear();
    }

    /// Step back. `current` becomes the next redo.
    pub fn undo(&mut self, current: SceneSnapshot) -> Option<SceneSnapshot> {
        let snapshot = self.past.pop_back()?;
        self.future.push_front(current);
        self.future.truncate(self.max_depth);
        Some(snapshot)
    }

    /// Step forward. `current` becomes the next undo.
    pub fn redo(&mut self, current: SceneSnapshot) -> Option<SceneSnapshot> {
        let snapshot = self.future.pop_front()?;
        self.past.push_back(current);
        while self.past.len() > self.max_depth {
            self.past.pop_front();
        }
        Some(snapshot)
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.past.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.future.len()
    }

    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Element, ElementKind};
    use crate::scene::Scene;

    fn scene_with(n: usize) -> SceneSnapshot {
        Scene::from_elements((0..n).map(|i| Element::new(ElementKind::Text, i as f64, 0.0, 20.0, 20.0))).snapshot()
    }

    #[test]
    fn test_undo_redo_cycle() {
        let mut history = History::default();
        let s0 = scene_with(0);
        let s1 = scene_with(1);

        history.push_snapshot(s0.clone());
        assert!(history.can_undo());
        assert!(!history.can_redo());

        let undone = history.undo(s1.clone()).unwrap();
        assert_eq!(undone, s0);
        assert!(history.can_redo());

        let redone = history.redo(s0).unwrap();
        assert_eq!(redone, s1);
        assert!(!history.can_redo());
    }

    #[test]
    fn test_empty_history_is_noop() {
        let mut history = History::default();
        assert!(history.undo(scene_with(0)).is_none());
        assert!(history.redo(scene_with(0)).is_none());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_push_clears_redo() {
        let mut history = History::default();
        history.push_snapshot(scene_with(0));
        history.undo(scene_with(1));
        assert!(history.can_redo());

        history.push_snapshot(scene_with(2));
        assert!(!history.can_redo());
        assert!(history.redo(scene_with(2)).is_none());
    }

    #[test]
    fn test_depth_is_bounded() {
        let mut history = History::new(3);
        for i in 0..5 {
            history.push_snapshot(scene_with(i));
        }
        assert_eq!(history.undo_depth(), 3);

        // Oldest entries were dropped.
        let mut last = None;
        while let Some(snapshot) = history.undo(scene_with(9)) {
            last = Some(snapshot);
        }
        assert_eq!(last.unwrap().element_order.len(), 2);
        assert_eq!(history.redo_depth(), 3);
    }

    #[test]
    fn test_clear() {
        let mut history = History::default();
        history.push_snapshot(scene_with(0));
        history.undo(scene_with(1));
        history.push_snapshot(scene_with(2));
        history.clear();
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }
}
