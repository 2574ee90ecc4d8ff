//! Registration wizard state machine.
//!
//! Four fixed steps, each owning a disjoint set of fields with a
//! declarative rule set (`rules`). Forward navigation is gated on the
//! active step validating cleanly; backward navigation never validates.
//! After the last step passes, the flow hands over to the
//! email-verification sub-stage (`verification`).

pub mod password;
pub mod rules;
pub mod verification;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The fixed, ordered wizard steps.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum WizardStep {
    #[default]
    Personal,
    Credentials,
    Practice,
    Security,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::Personal,
        WizardStep::Credentials,
        WizardStep::Practice,
        WizardStep::Security,
    ];

    /// 1-based position, as shown by the progress indicator.
    pub fn index(self) -> usize {
        match self {
            WizardStep::Personal => 1,
            WizardStep::Credentials => 2,
            WizardStep::Practice => 3,
            WizardStep::Security => 4,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::Personal => "Personal",
            WizardStep::Credentials => "Credentials",
            WizardStep::Practice => "Practice",
            WizardStep::Security => "Security",
        }
    }

    pub fn next(self) -> Option<WizardStep> {
        match self {
            WizardStep::Personal => Some(WizardStep::Credentials),
            WizardStep::Credentials => Some(WizardStep::Practice),
            WizardStep::Practice => Some(WizardStep::Security),
            WizardStep::Security => None,
        }
    }

    pub fn previous(self) -> Option<WizardStep> {
        match self {
            WizardStep::Personal => None,
            WizardStep::Credentials => Some(WizardStep::Personal),
            WizardStep::Practice => Some(WizardStep::Credentials),
            WizardStep::Security => Some(WizardStep::Practice),
        }
    }
}

/// A single form field value as posted by the step forms.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    List(Vec<String>),
    Text(String),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::List(value)
    }
}

/// Accumulated field values, keyed by the form input name.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct WizardFields(BTreeMap<String, FieldValue>);

impl WizardFields {
    /// Raw text of a field; empty when absent or not text.
    pub fn text(&self, name: &str) -> &str {
        match self.0.get(name) {
            Some(FieldValue::Text(value)) => value,
            _ => "",
        }
    }

    /// Text of a field with surrounding whitespace removed.
    pub fn trimmed(&self, name: &str) -> &str {
        self.text(name).trim()
    }

    pub fn flag(&self, name: &str) -> bool {
        matches!(self.0.get(name), Some(FieldValue::Flag(true)))
    }

    pub fn list(&self, name: &str) -> &[String] {
        match self.0.get(name) {
            Some(FieldValue::List(values)) => values,
            _ => &[],
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    fn insert(&mut self, name: String, value: FieldValue) {
        self.0.insert(name, value);
    }
}

/// Result of a forward-navigation attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepAdvance {
    /// Validation failed; the step did not change and `errors()` is populated.
    Rejected,
    /// Moved to the next step.
    Advanced,
    /// The last step validated; the caller should run submission.
    Completed,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct WizardState {
    current_step: WizardStep,
    fields: WizardFields,
    errors: BTreeMap<String, String>,
}

impl WizardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_step(&self) -> WizardStep {
        self.current_step
    }

    pub fn fields(&self) -> &WizardFields {
        &self.fields
    }

    /// Messages for the fields that failed the most recent `go_next`.
    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    /// Merges one field edit and drops any existing error for it.
    ///
    /// The error is removed even when the new value is still invalid;
    /// re-validation only happens on the next navigation attempt.
    pub fn update_field(&mut self, name: &str, value: FieldValue) {
        self.fields.insert(name.to_string(), value);
        self.errors.remove(name);
    }

    /// Validates the active step and advances when it is clean.
    pub fn go_next(&mut self) -> StepAdvance {
        let errors = rules::validate(self.current_step, &self.fields);
        if !errors.is_empty() {
            self.errors = errors;
            return StepAdvance::Rejected;
        }

        self.errors.clear();
        match self.current_step.next() {
            Some(step) => {
                self.current_step = step;
                StepAdvance::Advanced
            }
            None => StepAdvance::Completed,
        }
    }

    /// Steps back without validating; a no-op on the first step.
    pub fn go_previous(&mut self) {
        if let Some(step) = self.current_step.previous() {
            self.current_step = step;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_personal() -> WizardState {
        let mut state = WizardState::new();
        state.update_field("firstName", "Ada".into());
        state.update_field("lastName", "Lovelace".into());
        state.update_field("email", "ada@example.com".into());
        state.update_field("phone", "+1 555 0100".into());
        state.update_field("title", "Executive Coach".into());
        state
    }

    #[test]
    fn go_next_rejects_and_reports_every_missing_field() {
        let mut state = WizardState::new();
        assert_eq!(state.go_next(), StepAdvance::Rejected);
        assert_eq!(state.current_step(), WizardStep::Personal);
        assert_eq!(state.errors().len(), 5);
    }

    #[test]
    fn go_next_advances_when_the_step_is_clean() {
        let mut state = filled_personal();
        assert_eq!(state.go_next(), StepAdvance::Advanced);
        assert_eq!(state.current_step(), WizardStep::Credentials);
        assert!(state.errors().is_empty());
    }

    #[test]
    fn exactly_one_error_per_invalid_field() {
        let mut state = filled_personal();
        state.update_field("email", "nonsense".into());
        assert_eq!(state.go_next(), StepAdvance::Rejected);
        assert_eq!(state.errors().len(), 1);
        assert_eq!(
            state.errors().get("email").map(String::as_str),
            Some("Please enter a valid email address")
        );
    }

    #[test]
    fn editing_a_field_clears_its_error_even_if_still_invalid() {
        let mut state = WizardState::new();
        state.go_next();
        assert!(state.errors().contains_key("email"));

        state.update_field("email", "still not an email".into());
        assert!(!state.errors().contains_key("email"));
        // Other errors survive untouched.
        assert!(state.errors().contains_key("firstName"));
    }

    #[test]
    fn go_previous_never_validates_and_floors_at_the_first_step() {
        let mut state = filled_personal();
        state.go_next();
        state.update_field("certification", "".into());

        state.go_previous();
        assert_eq!(state.current_step(), WizardStep::Personal);
        assert!(state.errors().is_empty());

        state.go_previous();
        assert_eq!(state.current_step(), WizardStep::Personal);
    }
}
