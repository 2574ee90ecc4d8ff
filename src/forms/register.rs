//! Step forms posted by the registration wizard.
//!
//! Field names match the HTML input names, which is also how the wizard
//! state keys them. Each form applies itself through
//! `WizardState::update_field` so edits clear stale field errors before
//! the navigation attempt re-validates.

use serde::Deserialize;

use crate::wizard::{WizardState, WizardStep};

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PersonalStepForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub title: String,
}

impl PersonalStepForm {
    pub fn apply(self, state: &mut WizardState) {
        state.update_field("firstName", self.first_name.into());
        state.update_field("lastName", self.last_name.into());
        state.update_field("email", self.email.into());
        state.update_field("phone", self.phone.into());
        state.update_field("title", self.title.into());
    }
}

/// Decoded with `serde_html_form`: `specializations` repeats once per
/// checked box.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CredentialsStepForm {
    #[serde(default)]
    pub certification: String,
    #[serde(default)]
    pub other_certification: String,
    #[serde(default)]
    pub specializations: Vec<String>,
}

impl CredentialsStepForm {
    pub fn apply(self, state: &mut WizardState) {
        state.update_field("certification", self.certification.into());
        state.update_field("otherCertification", self.other_certification.into());
        state.update_field("specializations", self.specializations.into());
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PracticeStepForm {
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub client_volume: String,
    #[serde(default)]
    pub practice_type: String,
    #[serde(default)]
    pub session_format: String,
    #[serde(default)]
    pub session_duration: String,
}

impl PracticeStepForm {
    pub fn apply(self, state: &mut WizardState) {
        state.update_field("experience", self.experience.into());
        state.update_field("clientVolume", self.client_volume.into());
        state.update_field("practiceType", self.practice_type.into());
        state.update_field("sessionFormat", self.session_format.into());
        state.update_field("sessionDuration", self.session_duration.into());
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SecurityStepForm {
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
    /// Checkbox, present when checked.
    #[serde(default)]
    pub agree_to_terms: Option<String>,
}

impl SecurityStepForm {
    pub fn apply(self, state: &mut WizardState) {
        state.update_field("password", self.password.into());
        state.update_field("confirmPassword", self.confirm_password.into());
        state.update_field("agreeToTerms", self.agree_to_terms.is_some().into());
    }
}

/// Decodes the posted body for the given step and applies it.
pub fn apply_step_body(
    step: WizardStep,
    body: &str,
    state: &mut WizardState,
) -> Result<(), serde_html_form::de::Error> {
    match step {
        WizardStep::Personal => serde_html_form::from_str::<PersonalStepForm>(body)?.apply(state),
        WizardStep::Credentials => {
            serde_html_form::from_str::<CredentialsStepForm>(body)?.apply(state)
        }
        WizardStep::Practice => serde_html_form::from_str::<PracticeStepForm>(body)?.apply(state),
        WizardStep::Security => serde_html_form::from_str::<SecurityStepForm>(body)?.apply(state),
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
/// Code entry on the verification page.
pub struct VerifyCodeForm {
    #[serde(default)]
    pub code: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::StepAdvance;

    #[test]
    fn personal_body_round_trips_through_the_wizard() {
        let mut state = WizardState::new();
        let body = "firstName=Ada&lastName=Lovelace&email=ada%40example.com\
                    &phone=%2B1%20555%200100&title=Coach";
        apply_step_body(WizardStep::Personal, body, &mut state).expect("decodes");
        assert_eq!(state.go_next(), StepAdvance::Advanced);
    }

    #[test]
    fn repeated_specializations_collect_into_a_list() {
        let mut state = WizardState::new();
        let body = "certification=icf-acc&specializations=career&specializations=executive";
        apply_step_body(WizardStep::Credentials, body, &mut state).expect("decodes");
        assert_eq!(
            state.fields().list("specializations"),
            ["career", "executive"]
        );
    }

    #[test]
    fn absent_checkbox_reads_as_false() {
        let mut state = WizardState::new();
        apply_step_body(WizardStep::Security, "password=longenough1&confirmPassword=longenough1", &mut state)
            .expect("decodes");
        assert!(!state.fields().flag("agreeToTerms"));
    }
}
