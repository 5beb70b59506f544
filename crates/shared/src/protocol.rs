use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{FieldName, FieldValue};

pub type FieldValues = BTreeMap<FieldName, FieldValue>;
pub type FieldErrors = BTreeMap<FieldName, String>;

/// Input event forwarded by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormEvent {
    Change {
        name: FieldName,
        #[serde(default)]
        value: FieldValue,
    },
    Blur {
        name: FieldName,
        #[serde(default)]
        value: FieldValue,
    },
    Submit,
}

/// Render-facing state of one form session.
///
/// `errors` holds `""` for a validated, valid field; a missing entry means the
/// field has not been validated yet.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FormSnapshot {
    pub values: FieldValues,
    pub errors: FieldErrors,
    pub submitted: bool,
}

impl FormSnapshot {
    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    pub fn has_error(&self, name: &str) -> bool {
        self.error(name).is_some_and(|message| !message.is_empty())
    }

    pub fn field_state(&self, name: &str) -> FieldState {
        match self.error(name) {
            None => FieldState::Pristine,
            Some("") => FieldState::TouchedValid,
            Some(_) => FieldState::TouchedInvalid,
        }
    }

    pub fn error_count(&self) -> usize {
        self.errors.values().filter(|message| !message.is_empty()).count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldState {
    Pristine,
    TouchedValid,
    TouchedInvalid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmitOutcome {
    Accepted,
    Rejected { invalid: Vec<FieldName> },
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmitOutcome::Accepted)
    }
}
