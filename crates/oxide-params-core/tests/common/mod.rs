//! Shared fixtures for integration tests.

use oxide_params_core::{DataType, Field, FieldRegistry};

/// A registry resembling a typical user-listing endpoint.
pub fn user_registry() -> FieldRegistry {
    let mut registry = FieldRegistry::new();
    registry.register_all([
        Field::new("name").filterable().orderable(),
        Field::new("age")
            .filterable()
            .orderable()
            .data_type(DataType::Integer),
        Field::new("score")
            .filterable()
            .data_type(DataType::Number),
        Field::new("active")
            .filterable()
            .data_type(DataType::Boolean),
        Field::new("created_at")
            .filterable()
            .orderable()
            .nullable()
            .data_type(DataType::DateTime),
        Field::new("nickname").filterable().nullable(),
        Field::new("id"),
    ]);
    registry
}
