use thiserror::Error;

use crate::domain::FieldName;

/// Configuration problems in a field-definition list.
#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("field at position {index} has an empty name")]
    EmptyName { index: usize },
    #[error("duplicate field name '{name}'")]
    DuplicateName { name: FieldName },
    #[error("select field '{name}' declares no options")]
    MissingOptions { name: FieldName },
    #[error("field '{name}' has min_length {min_length} greater than max_length {max_length}")]
    InvertedLength {
        name: FieldName,
        min_length: usize,
        max_length: usize,
    },
    #[error("field '{name}' has min {min} greater than max {max}")]
    InvertedRange { name: FieldName, min: f64, max: f64 },
    #[error("field '{name}' has a non-finite numeric bound")]
    NonFiniteBound { name: FieldName },
    #[error("failed to parse field definitions: {0}")]
    Parse(String),
    #[error("failed to read field definitions from '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("unsupported definition format '{0}'; expected toml or json")]
    UnsupportedFormat(String),
}

/// Misuse of a form session by the presentation layer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("no field named '{0}' is defined for this form")]
    UnknownField(FieldName),
}
