//! Field registry: the allow-list and metadata store describing which
//! fields exist and how each may be used.
//!
//! The registry is built once by the owning API definition and is
//! read-only during translation. Registration is append/upgrade-only:
//! re-registering a name widens its filter/order permissions but never
//! resets its nullability or declared data type.

use std::collections::{HashMap, HashSet};
use std::str::FromStr;

use crate::error::ConfigError;

/// Declared data type of a registered field.
///
/// `String` is the implicit default and is never stored in the registry's
/// type map, since raw tokens are already strings and need no conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    /// Base-10 integer.
    Integer,
    /// Floating-point number.
    Number,
    /// Plain string (no conversion).
    String,
    /// Calendar timestamp or epoch milliseconds.
    DateTime,
    /// Boolean flag.
    Boolean,
}

impl FromStr for DataType {
    type Err = ConfigError;

    /// Parses a case/whitespace-normalized data type name.
    fn from_str(raw: &str) -> Result<Self, ConfigError> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "INTEGER" => Ok(Self::Integer),
            "NUMBER" => Ok(Self::Number),
            "STRING" => Ok(Self::String),
            "DATETIME" => Ok(Self::DateTime),
            "BOOLEAN" => Ok(Self::Boolean),
            _ => Err(ConfigError::UnknownDataType(raw.trim().to_string())),
        }
    }
}

/// A field definition to be registered.
#[derive(Debug, Clone)]
pub struct Field {
    name: String,
    filterable: bool,
    orderable: bool,
    nullable: bool,
    data_type: Option<DataType>,
}

impl Field {
    /// Creates a selectable field with no filter/order permissions and
    /// the implicit string type.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            filterable: false,
            orderable: false,
            nullable: false,
            data_type: None,
        }
    }

    /// Permits the field in WHERE expressions.
    #[must_use]
    pub fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }

    /// Permits the field in ORDER BY expressions.
    #[must_use]
    pub fn orderable(mut self) -> Self {
        self.orderable = true;
        self
    }

    /// Permits NULL comparisons against the field.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Declares the field's data type.
    ///
    /// `DataType::String` is accepted but not recorded.
    #[must_use]
    pub fn data_type(mut self, data_type: DataType) -> Self {
        self.data_type = match data_type {
            DataType::String => None,
            other => Some(other),
        };
        self
    }

    /// Declares the field's data type from a config-supplied name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownDataType`] for unrecognized names.
    /// This is a programming error, not user input, and is raised
    /// immediately.
    pub fn data_type_name(self, raw: &str) -> Result<Self, ConfigError> {
        Ok(self.data_type(raw.parse()?))
    }
}

/// Per-query allow-list of fields and their metadata.
#[derive(Debug, Clone, Default)]
pub struct FieldRegistry {
    /// Selectable fields in registration order; used as the default
    /// SELECT list when the caller requests no explicit fields.
    select_fields: Vec<String>,
    selectable: HashSet<String>,
    filterable: HashSet<String>,
    orderable: HashSet<String>,
    nullable: HashSet<String>,
    types: HashMap<String, DataType>,
}

impl FieldRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a field, or upgrades it if the name is already known.
    ///
    /// The first registration of a name appends it to the default SELECT
    /// list and records its nullability and data type. Repeated
    /// registrations only union in filter/order permissions; they never
    /// reset nullability or the data type. A blank name is a no-op.
    pub fn register(&mut self, field: Field) {
        let name = field.name.trim();
        if name.is_empty() {
            return;
        }

        if self.selectable.insert(name.to_string()) {
            self.select_fields.push(name.to_string());
            if field.nullable {
                self.nullable.insert(name.to_string());
            }
            if let Some(data_type) = field.data_type {
                self.types.insert(name.to_string(), data_type);
            }
        }
        if field.filterable {
            self.filterable.insert(name.to_string());
        }
        if field.orderable {
            self.orderable.insert(name.to_string());
        }
    }

    /// Registers every field in the iterator.
    pub fn register_all(&mut self, fields: impl IntoIterator<Item = Field>) {
        for field in fields {
            self.register(field);
        }
    }

    /// Returns the selectable fields in registration order.
    pub fn select_fields(&self) -> &[String] {
        &self.select_fields
    }

    /// Returns whether the field may appear in SELECT.
    pub fn is_selectable(&self, name: &str) -> bool {
        self.selectable.contains(name)
    }

    /// Returns whether the field may appear in WHERE expressions.
    pub fn is_filterable(&self, name: &str) -> bool {
        self.filterable.contains(name)
    }

    /// Returns whether the field may appear in ORDER BY.
    pub fn is_orderable(&self, name: &str) -> bool {
        self.orderable.contains(name)
    }

    /// Returns whether the field permits NULL comparisons.
    pub fn is_nullable(&self, name: &str) -> bool {
        self.nullable.contains(name)
    }

    /// Returns the field's declared non-string data type, if any.
    pub fn data_type(&self, name: &str) -> Option<DataType> {
        self.types.get(name).copied()
    }
}
