//! Per-visitor UI preferences behind an explicit store interface.
//!
//! The sidebar flag and scheduling default used to live in ambient global
//! state; here they round-trip through a `SettingsStore` so the backing
//! medium (cookie session in production, memory in tests) is swappable.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UiSettings {
    pub sidebar_collapsed: bool,
    pub default_session_duration: u32,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            sidebar_collapsed: false,
            default_session_duration: 60,
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to persist settings: {0}")]
    Storage(String),
}

/// Load-at-startup / save-on-change contract for UI preferences.
pub trait SettingsStore {
    /// Returns stored settings, or defaults when nothing was saved yet.
    fn load(&self) -> UiSettings;
    fn save(&self, settings: &UiSettings) -> Result<(), SettingsError>;
}
