//! Typed bound values for parameterized queries.

use chrono::{DateTime, Utc};

/// A value extracted from user input, positionally paired with a `?`
/// placeholder in a WHERE expression.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// SQL NULL, produced by the NULL sentinel.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
    /// Text value (the implicit string type).
    Text(String),
    /// UTC timestamp.
    DateTime(DateTime<Utc>),
}

impl ParamValue {
    /// Returns the parameter placeholder marker.
    #[must_use]
    pub const fn placeholder() -> &'static str {
        "?"
    }
}
