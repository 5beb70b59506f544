//! Render model handed to the presentation layer.

use field_config::FieldSet;
use serde::Serialize;
use shared::{
    domain::{FieldDefinition, FieldKind, FieldName, FieldValue, SelectOption},
    protocol::FormSnapshot,
};

const TEXTAREA_ROWS: u8 = 4;
const SELECT_PROMPT: &str = "Select an option";
const DEFAULT_TEL_FORMAT: &str = "Format: (123) 456-7890";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "widget", rename_all = "snake_case")]
pub enum Widget {
    Input { input_type: String },
    Textarea { rows: u8 },
    Select {
        prompt: &'static str,
        options: Vec<SelectOption>,
    },
    Checkbox,
}

impl Widget {
    pub fn for_field(field: &FieldDefinition) -> Self {
        match &field.kind {
            FieldKind::Textarea => Widget::Textarea {
                rows: TEXTAREA_ROWS,
            },
            FieldKind::Select => Widget::Select {
                prompt: SELECT_PROMPT,
                options: field.options.clone(),
            },
            FieldKind::Checkbox => Widget::Checkbox,
            other => Widget::Input {
                input_type: other.as_str().to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldView {
    pub name: FieldName,
    pub label: String,
    pub required: bool,
    #[serde(flatten)]
    pub widget: Widget,
    /// `Bool` for checkboxes, `Text` otherwise; never `Unset`.
    pub value: FieldValue,
    pub placeholder: String,
    pub error: Option<String>,
    /// Field description; hidden while an error is shown.
    pub hint: Option<String>,
    pub format_hint: Option<String>,
    /// Submitted, not in error, and still empty.
    pub highlight_empty: bool,
}

pub fn build_view(fields: &FieldSet, snapshot: &FormSnapshot) -> Vec<FieldView> {
    fields
        .iter()
        .map(|field| field_view(field, snapshot))
        .collect()
}

fn field_view(field: &FieldDefinition, snapshot: &FormSnapshot) -> FieldView {
    let raw = snapshot.value(field.name.as_str());
    let error = snapshot
        .error(field.name.as_str())
        .filter(|message| !message.is_empty())
        .map(str::to_string);

    let value = match (&field.kind, raw) {
        (FieldKind::Checkbox, Some(FieldValue::Bool(checked))) => FieldValue::Bool(*checked),
        (FieldKind::Checkbox, _) => FieldValue::Bool(false),
        (_, Some(value)) => FieldValue::Text(value.as_text().into_owned()),
        (_, None) => FieldValue::Text(String::new()),
    };
    let is_empty = matches!(
        raw,
        None | Some(FieldValue::Unset) | Some(FieldValue::Bool(false))
    ) || matches!(raw, Some(FieldValue::Text(text)) if text.is_empty());

    FieldView {
        name: field.name.clone(),
        label: field.label.clone(),
        required: field.required,
        widget: Widget::for_field(field),
        value,
        placeholder: field.placeholder.clone().unwrap_or_default(),
        hint: if error.is_none() {
            field.description.clone()
        } else {
            None
        },
        format_hint: (field.kind == FieldKind::Tel).then(|| {
            field
                .format
                .clone()
                .unwrap_or_else(|| DEFAULT_TEL_FORMAT.to_string())
        }),
        highlight_empty: snapshot.submitted && error.is_none() && is_empty,
        error,
    }
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
