//! Email-verification sub-stage entered after the wizard submits.
//!
//! The stubbed verification backend accepts exactly one code and never
//! talks to a server; resends are rate-limited by a local cooldown
//! timestamp. No attempt counter, no lockout.

use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The one code the stubbed backend accepts.
const ACCEPTED_CODE: &str = "123456";

/// Seconds a visitor must wait between resend requests.
pub const RESEND_COOLDOWN_SECS: i64 = 60;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VerificationError {
    #[error("Please enter the verification code")]
    EmptyCode,
    #[error("Verification code must be 6 digits")]
    MalformedCode,
    #[error("Invalid verification code. Please try again.")]
    WrongCode,
    #[error("Please wait {remaining_secs}s before requesting another code")]
    CooldownActive { remaining_secs: i64 },
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct VerificationState {
    /// Address the code was "sent" to, echoed back in the page copy.
    pub email: String,
    pub verified: bool,
    resend_available_at: Option<NaiveDateTime>,
}

impl VerificationState {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            verified: false,
            resend_available_at: None,
        }
    }

    /// Checks a submitted code. Shape problems are rejected before any
    /// comparison with the accepted value.
    pub fn verify(&mut self, code: &str) -> Result<(), VerificationError> {
        let code = code.trim();
        if code.is_empty() {
            return Err(VerificationError::EmptyCode);
        }
        if code.len() != 6 || !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(VerificationError::MalformedCode);
        }
        if code != ACCEPTED_CODE {
            return Err(VerificationError::WrongCode);
        }
        self.verified = true;
        Ok(())
    }

    /// Registers a resend request, starting a fresh cooldown window.
    pub fn request_resend(&mut self, now: NaiveDateTime) -> Result<(), VerificationError> {
        if let Some(available_at) = self.resend_available_at {
            if now < available_at {
                return Err(VerificationError::CooldownActive {
                    remaining_secs: (available_at - now).num_seconds().max(1),
                });
            }
        }
        self.resend_available_at = Some(now + TimeDelta::seconds(RESEND_COOLDOWN_SECS));
        Ok(())
    }

    /// Seconds left before another resend is allowed; 0 when available.
    pub fn resend_cooldown_remaining(&self, now: NaiveDateTime) -> i64 {
        self.resend_available_at
            .map(|available_at| (available_at - now).num_seconds().max(0))
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(secs: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 30)
            .unwrap()
            .and_hms_opt(12, secs / 60, secs % 60)
            .unwrap()
    }

    #[test]
    fn accepted_code_verifies() {
        let mut state = VerificationState::new("coach@example.com");
        assert_eq!(state.verify("123456"), Ok(()));
        assert!(state.verified);
    }

    #[test]
    fn wrong_six_digit_code_fails_generically() {
        let mut state = VerificationState::new("coach@example.com");
        assert_eq!(state.verify("654321"), Err(VerificationError::WrongCode));
        assert!(!state.verified);
    }

    #[test]
    fn malformed_input_is_rejected_before_comparison() {
        let mut state = VerificationState::new("coach@example.com");
        assert_eq!(state.verify(""), Err(VerificationError::EmptyCode));
        assert_eq!(state.verify("12345"), Err(VerificationError::MalformedCode));
        assert_eq!(state.verify("1234567"), Err(VerificationError::MalformedCode));
        assert_eq!(state.verify("12345a"), Err(VerificationError::MalformedCode));
    }

    #[test]
    fn resend_cooldown_blocks_until_expiry() {
        let mut state = VerificationState::new("coach@example.com");
        assert_eq!(state.request_resend(at(0)), Ok(()));
        assert_eq!(state.resend_cooldown_remaining(at(0)), RESEND_COOLDOWN_SECS);

        assert!(matches!(
            state.request_resend(at(30)),
            Err(VerificationError::CooldownActive { remaining_secs: 30 })
        ));

        assert_eq!(state.request_resend(at(60)), Ok(()));
    }
}
