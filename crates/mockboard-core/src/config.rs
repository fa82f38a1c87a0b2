//! Editor settings, persisted as JSON through [`Storage`](crate::storage::Storage).

use crate::camera::ZOOM_STEP;
use crate::canvas::{CanvasSettings, DUPLICATE_OFFSET};
use crate::history::MAX_UNDO_HISTORY;
use crate::selection::HANDLE_HIT_TOLERANCE;
use crate::storage::DEFAULT_AUTOSAVE_DELAY_MS;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tunables for an editing session. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    pub history_depth: usize,
    pub zoom_step: f64,
    /// Offset for duplicated and pasted elements, in canvas units.
    pub duplicate_offset: f64,
    /// Settings applied to new projects.
    pub canvas: CanvasSettings,
    pub autosave_delay_ms: u64,
    /// Resize handle hit radius, in screen pixels.
    pub handle_tolerance: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_depth: MAX_UNDO_HISTORY,
            zoom_step: ZOOM_STEP,
            duplicate_offset: DUPLICATE_OFFSET,
            canvas: CanvasSettings::default(),
            autosave_delay_ms: DEFAULT_AUTOSAVE_DELAY_MS,
            handle_tolerance: HANDLE_HIT_TOLERANCE,
        }
    }
}

impl EditorConfig {
    pub fn autosave_delay(&self) -> Duration {
        Duration::from_millis(self.autosave_delay_ms)
    }

    /// Parse settings JSON, falling back to defaults when it is malformed.
    pub fn from_json_or_default(json: &str) -> Self {
        serde_json::from_str(json).unwrap_or_else(|err| {
            log::warn!("Ignoring malformed settings: {err}");
            Self::default()
        })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
