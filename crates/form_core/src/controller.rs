//! Form session state owner.
//!
//! The controller holds the current snapshot, runs each event through the
//! reducer and swaps in the result. The only side effect it performs is
//! handing the values to a [`SubmissionHandler`] after an accepted submit.

use field_config::FieldSet;
use shared::{
    domain::{FieldName, FieldValue},
    error::FormError,
    protocol::{FieldState, FieldValues, FormEvent, FormSnapshot, SubmitOutcome},
};
use tracing::{debug, info, warn};

use crate::{
    reducer::{reduce_blur, reduce_change, reduce_submit, FormOptions},
    view::{build_view, FieldView},
};

/// Receives the complete values map once per accepted submit.
pub trait SubmissionHandler {
    fn submit(&mut self, values: &FieldValues);
}

impl<F> SubmissionHandler for F
where
    F: FnMut(&FieldValues),
{
    fn submit(&mut self, values: &FieldValues) {
        self(values)
    }
}

pub struct FormController {
    fields: FieldSet,
    options: FormOptions,
    state: FormSnapshot,
}

impl FormController {
    pub fn new(fields: FieldSet) -> Self {
        Self::with_options(fields, FormOptions::default())
    }

    pub fn with_options(fields: FieldSet, options: FormOptions) -> Self {
        Self {
            fields,
            options,
            state: FormSnapshot::default(),
        }
    }

    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    pub fn options(&self) -> &FormOptions {
        &self.options
    }

    pub fn snapshot(&self) -> &FormSnapshot {
        &self.state
    }

    pub fn into_snapshot(self) -> FormSnapshot {
        self.state
    }

    pub fn on_change(
        &mut self,
        name: &str,
        value: impl Into<FieldValue>,
    ) -> Result<&FormSnapshot, FormError> {
        let name = FieldName::from(name);
        let next = reduce_change(
            &self.fields,
            &self.options,
            &self.state,
            &name,
            &value.into(),
        )
        .inspect_err(|_| warn!(field = %name, "form: change for unknown field ignored"))?;
        self.state = next;
        debug!(field = %name, state = ?self.state.field_state(name.as_str()), "form: change");
        Ok(&self.state)
    }

    pub fn on_blur(
        &mut self,
        name: &str,
        value: impl Into<FieldValue>,
    ) -> Result<&FormSnapshot, FormError> {
        let name = FieldName::from(name);
        let next = reduce_blur(&self.fields, &self.state, &name, &value.into())
            .inspect_err(|_| warn!(field = %name, "form: blur for unknown field ignored"))?;
        self.state = next;
        debug!(field = %name, state = ?self.state.field_state(name.as_str()), "form: blur");
        Ok(&self.state)
    }

    pub fn on_submit<H>(&mut self, handler: &mut H) -> SubmitOutcome
    where
        H: SubmissionHandler + ?Sized,
    {
        let (next, outcome) = reduce_submit(&self.fields, &self.state);
        self.state = next;
        match &outcome {
            SubmitOutcome::Accepted => {
                info!(
                    field_count = self.state.values.len(),
                    "form: submit accepted"
                );
                handler.submit(&self.state.values);
            }
            SubmitOutcome::Rejected { invalid } => {
                debug!(invalid_count = invalid.len(), "form: submit rejected");
            }
        }
        outcome
    }

    /// Dispatches a recorded event; returns the outcome for submit events.
    pub fn apply<H>(
        &mut self,
        event: FormEvent,
        handler: &mut H,
    ) -> Result<Option<SubmitOutcome>, FormError>
    where
        H: SubmissionHandler + ?Sized,
    {
        match event {
            FormEvent::Change { name, value } => {
                self.on_change(name.as_str(), value)?;
                Ok(None)
            }
            FormEvent::Blur { name, value } => {
                self.on_blur(name.as_str(), value)?;
                Ok(None)
            }
            FormEvent::Submit => Ok(Some(self.on_submit(handler))),
        }
    }

    pub fn field_state(&self, name: &str) -> FieldState {
        self.state.field_state(name)
    }

    /// True once every defined field has been validated without error.
    pub fn is_valid(&self) -> bool {
        self.fields
            .iter()
            .all(|field| self.state.error(field.name.as_str()) == Some(""))
    }

    pub fn view(&self) -> Vec<FieldView> {
        build_view(&self.fields, &self.state)
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
