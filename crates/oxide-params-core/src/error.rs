//! Error types for parameter translation.
//!
//! Two distinct classes exist. [`ConfigError`] signals a programming or
//! integration bug (an unknown data type at registration time, a parameter
//! shape the tokenizer cannot accept) and is raised immediately.
//! [`ValidationError`]s describe bad user input; they are collected into a
//! [`ValidationErrors`] list across the whole translation attempt and
//! reported as one aggregate failure, never one at a time.

use serde::Serialize;
use thiserror::Error;

/// Fatal configuration errors.
///
/// These are never produced by user input and are not meant to be
/// recovered per-request.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A field was registered with a data type name the registry does
    /// not recognize.
    #[error("unknown data type: {0}")]
    UnknownDataType(String),

    /// A parameter arrived in a shape the tokenizer cannot process
    /// (e.g. a bare number where a string or string array is required).
    #[error("unsupported value shape for parameter {0}: expected a string or an array of strings")]
    UnsupportedInput(String),
}

/// A single user-input validation failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    /// Human-readable description of the failure.
    pub message: String,
    /// Optional structured context (field name, offending value, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl ValidationError {
    /// Creates a new validation error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
        }
    }

    /// Attaches structured context to the error.
    #[must_use]
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// An ordered collection of validation errors for one translation attempt.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    /// Creates a new empty collection.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends an error, preserving insertion order.
    pub fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }

    /// Returns whether any errors were recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of recorded errors.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns the recorded errors in insertion order.
    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            f.write_str(&error.message)?;
        }
        Ok(())
    }
}

/// Translation-specific errors.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// User input failed validation; carries every failure collected
    /// during the attempt.
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    /// Fatal configuration error surfaced mid-translation.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type alias for translation operations.
pub type Result<T> = std::result::Result<T, TranslateError>;
