//! # oxide-params-sqlx
//!
//! Binds a translation's bound values onto `sqlx` SQLite queries. The
//! translation engine stays driver-free; this crate is the seam between
//! a [`oxide_params_core::Translation`] and parameterized execution.
//!
//! ```ignore
//! let query = translate(&registry, &params, &options)?;
//! let sql = query.to_sql("users", true);
//! let rows = bind_values(sqlx::query(&sql), query.where_values())
//!     .fetch_all(&pool)
//!     .await?;
//! ```

use oxide_params_core::ParamValue;
use sqlx::query::{Query, QueryAs};
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{FromRow, Sqlite};

/// Binds one value onto a raw query.
#[must_use]
pub fn bind_value<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    value: &ParamValue,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    match value {
        ParamValue::Null => query.bind(Option::<i64>::None),
        ParamValue::Bool(b) => query.bind(*b),
        ParamValue::Int(n) => query.bind(*n),
        ParamValue::Float(f) => query.bind(*f),
        ParamValue::Text(s) => query.bind(s.clone()),
        ParamValue::DateTime(ts) => query.bind(*ts),
    }
}

/// Binds every value, in placeholder order, onto a raw query.
#[must_use]
pub fn bind_values<'q>(
    mut query: Query<'q, Sqlite, SqliteArguments<'q>>,
    values: &[ParamValue],
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    for value in values {
        query = bind_value(query, value);
    }
    query
}

/// Binds every value, in placeholder order, onto a `query_as` query.
#[must_use]
pub fn bind_values_as<'q, O>(
    mut query: QueryAs<'q, Sqlite, O, SqliteArguments<'q>>,
    values: &[ParamValue],
) -> QueryAs<'q, Sqlite, O, SqliteArguments<'q>>
where
    O: for<'r> FromRow<'r, SqliteRow>,
{
    for value in values {
        query = match value {
            ParamValue::Null => query.bind(Option::<i64>::None),
            ParamValue::Bool(b) => query.bind(*b),
            ParamValue::Int(n) => query.bind(*n),
            ParamValue::Float(f) => query.bind(*f),
            ParamValue::Text(s) => query.bind(s.clone()),
            ParamValue::DateTime(ts) => query.bind(*ts),
        };
    }
    query
}
