//! Declarative validation rule sets, one table per wizard step.
//!
//! Rules are checked in table order and the first failure per field
//! wins, so a field never carries more than one message at a time.

use std::collections::BTreeMap;

use super::{WizardFields, WizardStep};

type Predicate = fn(&WizardFields) -> bool;

/// One field-level rule: satisfied, or `message` attaches to `field`.
pub struct FieldRule {
    pub field: &'static str,
    pub message: &'static str,
    pub is_satisfied: Predicate,
}

const SESSION_DURATION_MIN: i64 = 15;
const SESSION_DURATION_MAX: i64 = 180;
const PASSWORD_MIN_LEN: usize = 8;

/// Loose `local@domain.tld` shape: no whitespace, an `@`, and a dotted
/// domain. Full address validation happens past the form boundary.
fn looks_like_email(value: &str) -> bool {
    if value.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !local.is_empty() && !host.is_empty() && !tld.is_empty()
}

fn duration_in_range(value: &str) -> bool {
    value
        .parse::<i64>()
        .is_ok_and(|minutes| (SESSION_DURATION_MIN..=SESSION_DURATION_MAX).contains(&minutes))
}

const PERSONAL: &[FieldRule] = &[
    FieldRule {
        field: "firstName",
        message: "First name is required",
        is_satisfied: |f| !f.trimmed("firstName").is_empty(),
    },
    FieldRule {
        field: "lastName",
        message: "Last name is required",
        is_satisfied: |f| !f.trimmed("lastName").is_empty(),
    },
    FieldRule {
        field: "email",
        message: "Email is required",
        is_satisfied: |f| !f.trimmed("email").is_empty(),
    },
    FieldRule {
        field: "email",
        message: "Please enter a valid email address",
        is_satisfied: |f| looks_like_email(f.trimmed("email")),
    },
    FieldRule {
        field: "phone",
        message: "Phone number is required",
        is_satisfied: |f| !f.trimmed("phone").is_empty(),
    },
    FieldRule {
        field: "title",
        message: "Professional title is required",
        is_satisfied: |f| !f.trimmed("title").is_empty(),
    },
];

const CREDENTIALS: &[FieldRule] = &[
    FieldRule {
        field: "certification",
        message: "Certification is required",
        is_satisfied: |f| !f.trimmed("certification").is_empty(),
    },
    FieldRule {
        field: "otherCertification",
        message: "Please specify your certification",
        is_satisfied: |f| {
            f.trimmed("certification") != "other" || !f.trimmed("otherCertification").is_empty()
        },
    },
    FieldRule {
        field: "specializations",
        message: "Please select at least one specialization",
        is_satisfied: |f| !f.list("specializations").is_empty(),
    },
];

const PRACTICE: &[FieldRule] = &[
    FieldRule {
        field: "experience",
        message: "Experience level is required",
        is_satisfied: |f| !f.trimmed("experience").is_empty(),
    },
    FieldRule {
        field: "clientVolume",
        message: "Client volume is required",
        is_satisfied: |f| !f.trimmed("clientVolume").is_empty(),
    },
    FieldRule {
        field: "practiceType",
        message: "Practice type is required",
        is_satisfied: |f| !f.trimmed("practiceType").is_empty(),
    },
    FieldRule {
        field: "sessionFormat",
        message: "Session format is required",
        is_satisfied: |f| !f.trimmed("sessionFormat").is_empty(),
    },
    FieldRule {
        field: "sessionDuration",
        message: "Session duration is required",
        is_satisfied: |f| !f.trimmed("sessionDuration").is_empty(),
    },
    FieldRule {
        field: "sessionDuration",
        message: "Session duration must be between 15-180 minutes",
        is_satisfied: |f| {
            let value = f.trimmed("sessionDuration");
            value.is_empty() || duration_in_range(value)
        },
    },
];

const SECURITY: &[FieldRule] = &[
    FieldRule {
        field: "password",
        message: "Password is required",
        is_satisfied: |f| !f.text("password").is_empty(),
    },
    FieldRule {
        field: "password",
        message: "Password must be at least 8 characters",
        is_satisfied: |f| {
            let password = f.text("password");
            password.is_empty() || password.chars().count() >= PASSWORD_MIN_LEN
        },
    },
    FieldRule {
        field: "confirmPassword",
        message: "Please confirm your password",
        is_satisfied: |f| !f.text("confirmPassword").is_empty(),
    },
    FieldRule {
        field: "confirmPassword",
        message: "Passwords do not match",
        is_satisfied: |f| {
            let confirm = f.text("confirmPassword");
            confirm.is_empty() || confirm == f.text("password")
        },
    },
    FieldRule {
        field: "agreeToTerms",
        message: "You must agree to the terms and conditions",
        is_satisfied: |f| f.flag("agreeToTerms"),
    },
];

/// Rule table owned by the given step.
pub fn rules_for(step: WizardStep) -> &'static [FieldRule] {
    match step {
        WizardStep::Personal => PERSONAL,
        WizardStep::Credentials => CREDENTIALS,
        WizardStep::Practice => PRACTICE,
        WizardStep::Security => SECURITY,
    }
}

/// Runs the step's rules, collecting at most one message per field.
pub fn validate(step: WizardStep, fields: &WizardFields) -> BTreeMap<String, String> {
    let mut errors = BTreeMap::new();
    for rule in rules_for(step) {
        if !errors.contains_key(rule.field) && !(rule.is_satisfied)(fields) {
            errors.insert(rule.field.to_string(), rule.message.to_string());
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::WizardState;

    fn fields_with(pairs: &[(&str, &str)]) -> WizardFields {
        let mut state = WizardState::new();
        for (name, value) in pairs {
            state.update_field(name, (*value).into());
        }
        state.fields().clone()
    }

    #[test]
    fn email_shape_checks() {
        assert!(looks_like_email("coach@example.com"));
        assert!(looks_like_email("a@b.co"));
        assert!(!looks_like_email("missing-at.example.com"));
        assert!(!looks_like_email("no-tld@example"));
        assert!(!looks_like_email("spaces in@example.com"));
        assert!(!looks_like_email("@example.com"));
    }

    #[test]
    fn other_certification_required_only_for_other() {
        let mut state = WizardState::new();
        state.update_field("certification", "icf-acc".into());
        state.update_field("specializations", vec!["career".to_string()].into());
        assert!(validate(WizardStep::Credentials, state.fields()).is_empty());

        state.update_field("certification", "other".into());
        let errors = validate(WizardStep::Credentials, state.fields());
        assert_eq!(
            errors.get("otherCertification").map(String::as_str),
            Some("Please specify your certification")
        );

        state.update_field("otherCertification", "Somatic Coaching Cert".into());
        assert!(validate(WizardStep::Credentials, state.fields()).is_empty());
    }

    #[test]
    fn session_duration_bounds_are_inclusive() {
        let base = [
            ("experience", "4-6"),
            ("clientVolume", "11-20"),
            ("practiceType", "independent"),
            ("sessionFormat", "virtual"),
        ];

        for (duration, ok) in [("15", true), ("180", true), ("14", false), ("181", false), ("abc", false)] {
            let mut pairs = base.to_vec();
            pairs.push(("sessionDuration", duration));
            let errors = validate(WizardStep::Practice, &fields_with(&pairs));
            assert_eq!(errors.is_empty(), ok, "duration {duration}");
        }
    }

    #[test]
    fn required_message_wins_over_range_message() {
        let errors = validate(WizardStep::Practice, &fields_with(&[]));
        assert_eq!(
            errors.get("sessionDuration").map(String::as_str),
            Some("Session duration is required")
        );
    }

    #[test]
    fn password_mismatch_blocks_and_equality_passes() {
        let mut state = WizardState::new();
        state.update_field("password", "correct horse".into());
        state.update_field("confirmPassword", "correct horsf".into());
        state.update_field("agreeToTerms", true.into());

        let errors = validate(WizardStep::Security, state.fields());
        assert_eq!(
            errors.get("confirmPassword").map(String::as_str),
            Some("Passwords do not match")
        );

        state.update_field("confirmPassword", "correct horse".into());
        assert!(validate(WizardStep::Security, state.fields()).is_empty());
    }

    #[test]
    fn short_password_fails_length_rule() {
        let mut state = WizardState::new();
        state.update_field("password", "short".into());
        state.update_field("confirmPassword", "short".into());
        state.update_field("agreeToTerms", true.into());

        let errors = validate(WizardStep::Security, state.fields());
        assert_eq!(
            errors.get("password").map(String::as_str),
            Some("Password must be at least 8 characters")
        );
    }

    #[test]
    fn terms_must_be_accepted() {
        let mut state = WizardState::new();
        state.update_field("password", "long enough".into());
        state.update_field("confirmPassword", "long enough".into());

        let errors = validate(WizardStep::Security, state.fields());
        assert_eq!(errors.len(), 1);
        assert!(errors.contains_key("agreeToTerms"));
    }
}
