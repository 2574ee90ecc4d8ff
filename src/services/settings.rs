//! UI settings workflows over the `SettingsStore` seam.

use crate::domain::settings::{SettingsStore, UiSettings};
use crate::forms::settings::SettingsForm;
use crate::services::{ServiceError, ServiceResult};

/// Reads the visitor's settings, falling back to defaults.
pub fn load_settings<S>(store: &S) -> UiSettings
where
    S: SettingsStore + ?Sized,
{
    store.load()
}

/// Validates and persists edited settings, returning the stored value.
pub fn save_settings<S>(store: &S, form: SettingsForm) -> ServiceResult<UiSettings>
where
    S: SettingsStore + ?Sized,
{
    use validator::Validate;

    if let Err(err) = form.validate() {
        log::error!("Failed to validate settings form: {err}");
        return Err(ServiceError::Form(
            "Session duration must be between 15 and 180 minutes".to_string(),
        ));
    }

    let settings = UiSettings::from(form);
    store.save(&settings).map_err(|err| {
        log::error!("Failed to save settings: {err}");
        ServiceError::Form("Could not save settings".to_string())
    })?;

    Ok(settings)
}
