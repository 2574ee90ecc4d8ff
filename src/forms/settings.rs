use serde::Deserialize;
use validator::Validate;

use crate::domain::settings::UiSettings;

#[derive(Debug, Deserialize, Validate)]
/// Form data for saving UI preferences.
pub struct SettingsForm {
    /// Checkbox, present when checked.
    #[serde(default)]
    pub sidebar_collapsed: Option<String>,
    #[validate(range(min = 15, max = 180))]
    pub default_session_duration: u32,
}

impl From<SettingsForm> for UiSettings {
    fn from(form: SettingsForm) -> Self {
        UiSettings {
            sidebar_collapsed: form.sidebar_collapsed.is_some(),
            default_session_duration: form.default_session_duration,
        }
    }
}
