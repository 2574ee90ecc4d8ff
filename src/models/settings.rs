//! Cookie-session implementation of the settings store.

use actix_session::Session;

use crate::domain::settings::{SettingsError, SettingsStore, UiSettings};

const SETTINGS_KEY: &str = "ui-settings";

/// Persists `UiSettings` in the visitor's cookie session.
pub struct SessionSettingsStore {
    session: Session,
}

impl SessionSettingsStore {
    pub fn new(session: Session) -> Self {
        Self { session }
    }
}

impl SettingsStore for SessionSettingsStore {
    fn load(&self) -> UiSettings {
        self.session
            .get::<UiSettings>(SETTINGS_KEY)
            .ok()
            .flatten()
            .unwrap_or_default()
    }

    fn save(&self, settings: &UiSettings) -> Result<(), SettingsError> {
        self.session
            .insert(SETTINGS_KEY, settings)
            .map_err(|err| SettingsError::Storage(err.to_string()))
    }
}
