//! Loading and checking of the externally supplied field-definition list.

use std::{collections::HashSet, fs, path::Path, sync::Arc};

use serde::Deserialize;
use shared::{
    domain::{FieldDefinition, FieldKind},
    error::DefinitionError,
};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionFormat {
    Toml,
    Json,
}

impl DefinitionFormat {
    pub fn from_path(path: &Path) -> Result<Self, DefinitionError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match extension.as_str() {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            other => Err(DefinitionError::UnsupportedFormat(other.to_string())),
        }
    }
}

#[derive(Debug, Deserialize)]
struct DefinitionDocument {
    fields: Vec<FieldDefinition>,
}

/// Ordered, checked list of field definitions for one form session.
///
/// Names are unique; select fields carry options; bounds are ordered and
/// finite. Cloning is cheap.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSet {
    fields: Arc<[FieldDefinition]>,
}

impl FieldSet {
    pub fn new(fields: Vec<FieldDefinition>) -> Result<Self, DefinitionError> {
        check_definitions(&fields)?;
        Ok(Self {
            fields: fields.into(),
        })
    }

    pub fn get(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|field| field.name.as_str() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.iter()
    }

    pub fn as_slice(&self) -> &[FieldDefinition] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<'a> IntoIterator for &'a FieldSet {
    type Item = &'a FieldDefinition;
    type IntoIter = std::slice::Iter<'a, FieldDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

pub fn parse_definitions(raw: &str, format: DefinitionFormat) -> Result<FieldSet, DefinitionError> {
    let fields = match format {
        DefinitionFormat::Toml => {
            toml::from_str::<DefinitionDocument>(raw)
                .map_err(|e| DefinitionError::Parse(e.to_string()))?
                .fields
        }
        DefinitionFormat::Json => {
            // Accept either a bare array or an object with a `fields` array.
            let mut document: serde_json::Value =
                serde_json::from_str(raw).map_err(|e| DefinitionError::Parse(e.to_string()))?;
            if let Some(fields) = document.get_mut("fields") {
                document = fields.take();
            }
            serde_json::from_value(document).map_err(|e| DefinitionError::Parse(e.to_string()))?
        }
    };
    FieldSet::new(fields)
}

pub fn load_definitions(path: &Path) -> Result<FieldSet, DefinitionError> {
    let format = DefinitionFormat::from_path(path)?;
    let raw = fs::read_to_string(path).map_err(|source| DefinitionError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let fields = parse_definitions(&raw, format)?;
    info!(
        path = %path.display(),
        field_count = fields.len(),
        "definitions: loaded field definitions"
    );
    Ok(fields)
}

pub fn check_definitions(fields: &[FieldDefinition]) -> Result<(), DefinitionError> {
    let mut seen = HashSet::with_capacity(fields.len());
    for (index, field) in fields.iter().enumerate() {
        if field.name.as_str().trim().is_empty() {
            return Err(DefinitionError::EmptyName { index });
        }
        if !seen.insert(field.name.as_str()) {
            return Err(DefinitionError::DuplicateName {
                name: field.name.clone(),
            });
        }
        if field.kind == FieldKind::Select && field.options.is_empty() {
            return Err(DefinitionError::MissingOptions {
                name: field.name.clone(),
            });
        }
        if let (Some(min_length), Some(max_length)) = (field.min_length, field.max_length) {
            if min_length > max_length {
                return Err(DefinitionError::InvertedLength {
                    name: field.name.clone(),
                    min_length,
                    max_length,
                });
            }
        }
        if field.min.is_some_and(|min| !min.is_finite())
            || field.max.is_some_and(|max| !max.is_finite())
        {
            return Err(DefinitionError::NonFiniteBound {
                name: field.name.clone(),
            });
        }
        if let (Some(min), Some(max)) = (field.min, field.max) {
            if min > max {
                return Err(DefinitionError::InvertedRange {
                    name: field.name.clone(),
                    min,
                    max,
                });
            }
        }
        if let FieldKind::Other(raw) = &field.kind {
            debug!(field = %field.name, kind = %raw, "definitions: unrecognized type uses default rules");
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
