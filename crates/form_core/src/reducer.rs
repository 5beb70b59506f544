//! Pure state transitions: previous snapshot + event -> next snapshot.

use field_config::FieldSet;
use serde::{Deserialize, Serialize};
use shared::{
    domain::{FieldName, FieldValue},
    error::FormError,
    protocol::{FormSnapshot, SubmitOutcome},
};

use crate::validation::{validate, validate_all};

/// When a change event re-runs validation for its field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevalidateOnChange {
    /// Only fields currently showing an error are re-checked while typing.
    #[default]
    AfterError,
    /// Every change is validated, including pristine fields.
    Always,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FormOptions {
    #[serde(default)]
    pub revalidate_on_change: RevalidateOnChange,
}

pub fn reduce_change(
    fields: &FieldSet,
    options: &FormOptions,
    current: &FormSnapshot,
    name: &FieldName,
    value: &FieldValue,
) -> Result<FormSnapshot, FormError> {
    let field = fields
        .get(name.as_str())
        .ok_or_else(|| FormError::UnknownField(name.clone()))?;

    let mut next = current.clone();
    next.values.insert(name.clone(), value.clone());

    let recheck = match options.revalidate_on_change {
        RevalidateOnChange::AfterError => current.has_error(name.as_str()),
        RevalidateOnChange::Always => true,
    };
    if recheck {
        next.errors.insert(name.clone(), validate(field, value));
    }
    Ok(next)
}

pub fn reduce_blur(
    fields: &FieldSet,
    current: &FormSnapshot,
    name: &FieldName,
    value: &FieldValue,
) -> Result<FormSnapshot, FormError> {
    let field = fields
        .get(name.as_str())
        .ok_or_else(|| FormError::UnknownField(name.clone()))?;

    let mut next = current.clone();
    next.errors.insert(name.clone(), validate(field, value));
    Ok(next)
}

pub fn reduce_submit(fields: &FieldSet, current: &FormSnapshot) -> (FormSnapshot, SubmitOutcome) {
    let errors = validate_all(fields, &current.values);
    // Definition order, not map order.
    let invalid: Vec<FieldName> = fields
        .iter()
        .filter(|field| errors.get(&field.name).is_some_and(|m| !m.is_empty()))
        .map(|field| field.name.clone())
        .collect();

    let next = FormSnapshot {
        values: current.values.clone(),
        errors,
        submitted: true,
    };
    let outcome = if invalid.is_empty() {
        SubmitOutcome::Accepted
    } else {
        SubmitOutcome::Rejected { invalid }
    };
    (next, outcome)
}
