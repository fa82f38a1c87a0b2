//! Debounced auto-save.
//!
//! Every change pushes the save deadline back; a save is due once the scene
//! has been quiet for the whole delay.

use std::time::{Duration, Instant};

/// Default quiet period before an auto-save, in milliseconds.
pub const DEFAULT_AUTOSAVE_DELAY_MS: u64 = 1000;

/// Tracks unsaved changes and when they become due for saving.
#[derive(Debug, Clone)]
pub struct AutoSave {
    delay: Duration,
    /// Time of the most recent change while dirty.
    last_change: Option<Instant>,
    enabled: bool,
}

impl Default for AutoSave {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_AUTOSAVE_DELAY_MS))
    }
}

impl AutoSave {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_change: None,
            enabled: true,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Record a change, restarting the debounce window.
    pub fn mark_dirty(&mut self, now: Instant) {
        self.last_change = Some(now);
    }

    /// Check if the document has unsaved changes.
    pub fn is_dirty(&self) -> bool {
        self.last_change.is_some()
    }

    /// Dirty, enabled, and quiet for at least the delay.
    pub fn should_save(&self, now: Instant) -> bool {
        match self.last_change {
            Some(changed) if self.enabled => now.saturating_duration_since(changed) >= self.delay,
            _ => false,
        }
    }

    pub fn mark_saved(&mut self) {
        self.last_change = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_never_saves() {
        let autosave = AutoSave::default();
        assert!(!autosave.is_dirty());
        assert!(!autosave.should_save(Instant::now() + Duration::from_secs(10)));
    }

    #[test]
    fn test_debounce_restarts_on_change() {
        let mut autosave = AutoSave::default();
        let t0 = Instant::now();
        autosave.mark_dirty(t0);
        assert!(!autosave.should_save(t0 + Duration::from_millis(999)));

        autosave.mark_dirty(t0 + Duration::from_millis(800));
        assert!(!autosave.should_save(t0 + Duration::from_millis(1500)));
        assert!(autosave.should_save(t0 + Duration::from_millis(1800)));

        autosave.mark_saved();
        assert!(!autosave.is_dirty());
        assert!(!autosave.should_save(t0 + Duration::from_secs(5)));
    }

    #[test]
    fn test_disabled_never_due() {
        let mut autosave = AutoSave::new(Duration::ZERO);
        autosave.set_enabled(false);
        let now = Instant::now();
        autosave.mark_dirty(now);
        assert!(!autosave.should_save(now));
        assert!(autosave.is_dirty());
    }
}
