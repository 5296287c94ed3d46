//! # oxide-params-core
//!
//! Translates untrusted, flat key/value query parameters — as they
//! arrive from an HTTP query string — into a validated, parameterized
//! SQL query description: a SELECT field list, a WHERE clause of
//! AND/OR-joined expressions with positional bound values, an ORDER BY
//! list, and bounded OFFSET/LIMIT values. Clients get filtering, sorting
//! and pagination without ever constructing SQL or reaching columns the
//! API did not register.
//!
//! ## Quick start
//!
//! ```rust
//! use oxide_params_core::{
//!     translate, DataType, Field, FieldRegistry, ListingParams,
//!     ParamValue, TranslateOptions,
//! };
//!
//! // Configure the registry once, at startup.
//! let mut registry = FieldRegistry::new();
//! registry.register(Field::new("name").filterable().orderable());
//! registry.register(
//!     Field::new("age")
//!         .filterable()
//!         .orderable()
//!         .data_type(DataType::Integer),
//! );
//! registry.register(Field::new("id"));
//!
//! // Then translate each incoming parameter set.
//! let params = ListingParams::new()
//!     .fields("name,age")
//!     .where_and("age>=21")
//!     .order_by("-age");
//!
//! let query = translate(&registry, &params, &TranslateOptions::default()).unwrap();
//!
//! assert_eq!(query.select(), "name,age");
//! assert_eq!(query.where_clause(), "WHERE (age >= ?)");
//! assert_eq!(query.where_values(), &[ParamValue::Int(21)]);
//! assert_eq!(query.order_by_clause(), "ORDER BY age DESC");
//! assert_eq!(query.limit_clause(), "LIMIT 0,20");
//! assert_eq!(
//!     query.to_sql("users", true),
//!     "SELECT name,age FROM users WHERE (age >= ?) ORDER BY age DESC LIMIT 0,20"
//! );
//! ```
//!
//! ## Error model
//!
//! Bad user input (a NULL comparison on a non-nullable field, a failed
//! type conversion, an invalid `whereJoin`) accumulates across the whole
//! attempt and fails the call with one aggregate
//! [`TranslateError::Validation`] — never a partial result. Malformed or
//! disallowed WHERE tokens are dropped silently by design, so a client
//! probing fields it may not filter learns nothing. Misconfiguration
//! (an unknown data type name, a parameter shape the tokenizer cannot
//! accept) is the separate, fatal [`ConfigError`] class.

pub mod convert;
pub mod error;
pub mod expr;
pub mod params;
pub mod registry;
pub mod tokens;
pub mod translate;
pub mod value;
pub mod where_clause;

pub use error::{ConfigError, Result, TranslateError, ValidationError, ValidationErrors};
pub use expr::ParsedExpr;
pub use params::{ListingParams, RawParam, TranslateOptions};
pub use registry::{DataType, Field, FieldRegistry};
pub use translate::{translate, translate_async, Translation};
pub use value::ParamValue;
pub use where_clause::JoinOp;
