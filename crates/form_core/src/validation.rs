//! Field-level validation rules.
//!
//! Every function here is pure: the same `(field, value)` pair always yields
//! the same message. An empty message means the value is valid.

use field_config::FieldSet;
use shared::{
    domain::{FieldDefinition, FieldValue},
    protocol::{FieldErrors, FieldValues},
};

/// Result of coercing a raw value for the `min`/`max` rules.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coerced {
    Number(f64),
    NotANumber,
}

impl Coerced {
    fn at_least(self, bound: f64) -> bool {
        matches!(self, Coerced::Number(n) if n >= bound)
    }

    fn at_most(self, bound: f64) -> bool {
        matches!(self, Coerced::Number(n) if n <= bound)
    }
}

/// Blank or unparsable text, non-finite numbers and `Unset` are not numbers.
/// Checkbox values count as 1 and 0.
pub fn coerce_number(value: &FieldValue) -> Coerced {
    match value {
        FieldValue::Bool(checked) => Coerced::Number(if *checked { 1.0 } else { 0.0 }),
        FieldValue::Text(text) => match text.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => Coerced::Number(n),
            _ => Coerced::NotANumber,
        },
        FieldValue::Unset => Coerced::NotANumber,
    }
}

/// Length in characters, or `None` for values that have no length.
pub fn text_length(value: &FieldValue) -> Option<usize> {
    match value {
        FieldValue::Text(text) => Some(text.chars().count()),
        FieldValue::Unset => Some(0),
        FieldValue::Bool(_) => None,
    }
}

/// First rule a value breaks, in evaluation order.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleFailure {
    Required,
    MinLength(usize),
    MaxLength(usize),
    Min(f64),
    Max(f64),
    Pattern,
}

impl RuleFailure {
    pub fn message(&self, field: &FieldDefinition) -> String {
        let label = &field.label;
        match self {
            RuleFailure::Required => format!("{label} is required"),
            RuleFailure::MinLength(k) => format!("{label} must be at least {k} characters"),
            RuleFailure::MaxLength(k) => format!("{label} cannot exceed {k} characters"),
            RuleFailure::Min(min) => format!("{label} must be at least {min}"),
            RuleFailure::Max(max) => format!("{label} cannot be more than {max}"),
            RuleFailure::Pattern => field
                .error_msg
                .clone()
                .unwrap_or_else(|| format!("{label} is not valid")),
        }
    }
}

pub fn check(field: &FieldDefinition, value: &FieldValue) -> Result<(), RuleFailure> {
    if field.required && value.is_blank() {
        return Err(RuleFailure::Required);
    }

    let length = text_length(value);
    if let (Some(min_length), Some(length)) = (field.min_length, length) {
        if length < min_length {
            return Err(RuleFailure::MinLength(min_length));
        }
    }
    if let (Some(max_length), Some(length)) = (field.max_length, length) {
        if length > max_length {
            return Err(RuleFailure::MaxLength(max_length));
        }
    }

    if field.min.is_some() || field.max.is_some() {
        let number = coerce_number(value);
        if let Some(min) = field.min {
            if !number.at_least(min) {
                return Err(RuleFailure::Min(min));
            }
        }
        if let Some(max) = field.max {
            if !number.at_most(max) {
                return Err(RuleFailure::Max(max));
            }
        }
    }

    if let Some(pattern) = &field.pattern {
        if !pattern.is_match(&value.as_text()) {
            return Err(RuleFailure::Pattern);
        }
    }

    Ok(())
}

/// Message for the first failing rule, or `""` when the value is valid.
pub fn validate(field: &FieldDefinition, value: &FieldValue) -> String {
    match check(field, value) {
        Ok(()) => String::new(),
        Err(failure) => failure.message(field),
    }
}

/// Validates every defined field, substituting the kind's default for fields
/// that never received a value. Every field gets an entry.
pub fn validate_all(fields: &FieldSet, values: &FieldValues) -> FieldErrors {
    fields
        .iter()
        .map(|field| {
            let message = match values.get(&field.name) {
                Some(value) if *value != FieldValue::Unset => validate(field, value),
                _ => validate(field, &FieldValue::default_for(&field.kind)),
            };
            (field.name.clone(), message)
        })
        .collect()
}

#[cfg(test)]
#[path = "tests/validation_tests.rs"]
mod tests;
