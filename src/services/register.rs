//! Registration workflows gluing the wizard to the HTTP session.

use chrono::NaiveDateTime;

use crate::forms::register::apply_step_body;
use crate::services::{ServiceError, ServiceResult};
use crate::wizard::verification::{VerificationError, VerificationState};
use crate::wizard::{StepAdvance, WizardState};

/// Applies one posted step body and attempts to advance.
///
/// Every submitted field goes through `update_field` first, so stale
/// errors are cleared before the step re-validates.
pub fn submit_step(state: &mut WizardState, body: &str) -> ServiceResult<StepAdvance> {
    apply_step_body(state.current_step(), body, state).map_err(|err| {
        log::error!("Failed to decode wizard step body: {err}");
        ServiceError::Form("Could not read the submitted form".to_string())
    })?;
    Ok(state.go_next())
}

/// Enters the verification sub-stage after the simulated account
/// creation; the code is "sent" to the address collected in step one.
pub fn begin_verification(state: &WizardState) -> VerificationState {
    VerificationState::new(state.fields().trimmed("email"))
}

/// Checks a submitted code against the verification state.
pub fn verify_code(
    verification: &mut VerificationState,
    code: &str,
) -> Result<(), VerificationError> {
    verification.verify(code)
}

/// Requests another code, honoring the resend cooldown.
pub fn resend_code(
    verification: &mut VerificationState,
    now: NaiveDateTime,
) -> Result<(), VerificationError> {
    verification.request_resend(now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::WizardStep;

    const PERSONAL_BODY: &str = "firstName=Ada&lastName=Lovelace&email=ada%40example.com\
                                 &phone=555-0100&title=Coach";
    const CREDENTIALS_BODY: &str = "certification=icf-pcc&specializations=executive";
    const PRACTICE_BODY: &str = "experience=7-10&clientVolume=21-30&practiceType=independent\
                                 &sessionFormat=virtual&sessionDuration=60";
    const SECURITY_BODY: &str =
        "password=Sup3rSecret!&confirmPassword=Sup3rSecret!&agreeToTerms=on";

    #[test]
    fn full_flow_reaches_submission() {
        let mut state = WizardState::new();

        assert_eq!(submit_step(&mut state, PERSONAL_BODY).unwrap(), StepAdvance::Advanced);
        assert_eq!(
            submit_step(&mut state, CREDENTIALS_BODY).unwrap(),
            StepAdvance::Advanced
        );
        assert_eq!(submit_step(&mut state, PRACTICE_BODY).unwrap(), StepAdvance::Advanced);
        assert_eq!(
            submit_step(&mut state, SECURITY_BODY).unwrap(),
            StepAdvance::Completed
        );

        let verification = begin_verification(&state);
        assert_eq!(verification.email, "ada@example.com");
    }

    #[test]
    fn invalid_step_stays_put_with_errors() {
        let mut state = WizardState::new();
        let outcome = submit_step(&mut state, "firstName=Ada").unwrap();
        assert_eq!(outcome, StepAdvance::Rejected);
        assert_eq!(state.current_step(), WizardStep::Personal);
        assert!(!state.errors().is_empty());
        assert!(!state.errors().contains_key("firstName"));
    }
}
