//! Translation entry points and the immutable result object.
//!
//! `translate` is a pure, synchronous computation: the registry is
//! read-only during the call and all per-call state (token buffers, the
//! error list, the bound-values list) is allocated fresh, so concurrent
//! translations against one registry never interfere.

use tracing::debug;

use crate::error::{Result, TranslateError, ValidationError, ValidationErrors};
use crate::expr::{self, ParsedExpr};
use crate::params::{ListingParams, RawParam, TranslateOptions};
use crate::registry::FieldRegistry;
use crate::tokens::normalize;
use crate::value::ParamValue;
use crate::where_clause::{JoinOp, WhereBuilder};

/// An immutable, validated query description.
///
/// Holds the resolved SELECT/WHERE/ORDER BY components, the bound values
/// in placeholder order, and the clamped OFFSET/LIMIT pair. SQL text for
/// a concrete table comes from [`Translation::to_sql`].
#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    select_fields: Vec<String>,
    where_expressions: Vec<String>,
    where_values: Vec<ParamValue>,
    where_join: JoinOp,
    order_by_fields: Vec<String>,
    order_by_expressions: Vec<String>,
    offset: i64,
    limit: i64,
}

impl Translation {
    /// Returns the resolved SELECT fields.
    pub fn select_fields(&self) -> &[String] {
        &self.select_fields
    }

    /// Returns the comma-joined SELECT field list.
    pub fn select(&self) -> String {
        self.select_fields.join(",")
    }

    /// Returns the full SELECT clause (`SELECT a,b`).
    pub fn select_clause(&self) -> String {
        format!("SELECT {}", self.select())
    }

    /// Returns the top-level WHERE expressions.
    pub fn where_expressions(&self) -> &[String] {
        &self.where_expressions
    }

    /// Returns the WHERE expressions joined by the join operator.
    pub fn where_expr(&self) -> String {
        self.where_expressions
            .join(&format!(" {} ", self.where_join))
    }

    /// Returns the WHERE clause (`WHERE …`), or an empty string when no
    /// bound value exists.
    pub fn where_clause(&self) -> String {
        if self.where_values.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.where_expr())
        }
    }

    /// Returns the bound values, positionally matching the `?`
    /// placeholders across the WHERE expressions.
    pub fn where_values(&self) -> &[ParamValue] {
        &self.where_values
    }

    /// Returns the top-level join operator.
    pub fn where_join(&self) -> JoinOp {
        self.where_join
    }

    /// Returns the resolved ORDER BY field names.
    pub fn order_by_fields(&self) -> &[String] {
        &self.order_by_fields
    }

    /// Returns the comma-joined ORDER BY expression list.
    pub fn order_by(&self) -> String {
        self.order_by_expressions.join(",")
    }

    /// Returns the ORDER BY clause, or an empty string when no ordering
    /// was requested.
    pub fn order_by_clause(&self) -> String {
        if self.order_by_expressions.is_empty() {
            String::new()
        } else {
            format!("ORDER BY {}", self.order_by())
        }
    }

    /// Returns the clamped pagination offset.
    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// Returns the clamped row limit.
    pub fn limit(&self) -> i64 {
        self.limit
    }

    /// Returns the LIMIT clause (`LIMIT offset,limit`).
    pub fn limit_clause(&self) -> String {
        format!("LIMIT {},{}", self.offset, self.limit)
    }

    /// Assembles the full SQL statement for `table`.
    ///
    /// Pass `include_limit = false` to omit OFFSET/LIMIT, e.g. when the
    /// same translation feeds a separate COUNT query.
    pub fn to_sql(&self, table: &str, include_limit: bool) -> String {
        let mut sql = format!("SELECT {} FROM {table}", self.select());
        if !self.where_values.is_empty() {
            sql.push(' ');
            sql.push_str(&self.where_clause());
        }
        if !self.order_by_expressions.is_empty() {
            sql.push(' ');
            sql.push_str(&self.order_by_clause());
        }
        if include_limit {
            sql.push(' ');
            sql.push_str(&self.limit_clause());
        }
        sql
    }

    /// Assembles a COUNT statement over the same WHERE clause, reusing
    /// the same bound values.
    pub fn count_sql(&self, table: &str) -> String {
        let mut sql = format!("SELECT COUNT(*) FROM {table}");
        if !self.where_values.is_empty() {
            sql.push(' ');
            sql.push_str(&self.where_clause());
        }
        sql
    }
}

/// Translates raw parameters into a validated query description.
///
/// Validation failures accumulate across the whole attempt; if any were
/// recorded the call fails with the full ordered list and no partial
/// result.
///
/// # Errors
///
/// [`TranslateError::Validation`] for bad user input;
/// [`TranslateError::Config`] for unsupported parameter shapes (the
/// fatal, non-user-facing class).
pub fn translate(
    registry: &FieldRegistry,
    params: &ListingParams,
    options: &TranslateOptions,
) -> Result<Translation> {
    let mut errors = ValidationErrors::new();

    let where_join = resolve_join(params.where_join.as_ref(), &mut errors)?;

    let mut and_groups = normalize("whereAnd", params.where_and.as_ref(), true)?;
    and_groups.extend(normalize("where", params.r#where.as_ref(), true)?);
    let or_groups = normalize("whereOr", params.where_or.as_ref(), true)?;

    let mut builder = WhereBuilder::new(registry);
    builder.add_groups(&and_groups, JoinOp::And, &mut errors);
    builder.add_groups(&or_groups, JoinOp::Or, &mut errors);

    let select_tokens = normalize("fields", params.fields.as_ref(), false)?;
    let mut select_fields: Vec<String> = expr::process(
        &select_tokens,
        |field| registry.is_selectable(field),
        expr::identity,
        false,
    )
    .into_iter()
    .map(|e| e.expression)
    .collect();
    if select_fields.is_empty() {
        select_fields = registry.select_fields().to_vec();
    }

    let order_tokens = normalize("orderBy", params.order_by.as_ref(), false)?;
    let order = expr::process(
        &order_tokens,
        |field| registry.is_orderable(field),
        order_expr,
        false,
    );

    let offset = int_param("offset", params.offset.as_ref())?
        .unwrap_or(0)
        .max(0);
    let max_limit = options.max_limit.max(1);
    let limit = int_param("limit", params.limit.as_ref())?
        .unwrap_or(options.default_limit)
        .clamp(1, max_limit);

    if !errors.is_empty() {
        return Err(TranslateError::Validation(errors));
    }

    let (where_expressions, where_values) = builder.finish();
    debug!(
        "translated query: {} select fields, {} where expressions, {} bound values",
        select_fields.len(),
        where_expressions.len(),
        where_values.len()
    );

    Ok(Translation {
        select_fields,
        where_expressions,
        where_values,
        where_join,
        order_by_fields: order.iter().map(|e| e.field.clone()).collect(),
        order_by_expressions: order.into_iter().map(|e| e.expression).collect(),
        offset,
        limit,
    })
}

/// Asynchronous convenience wrapper: yields to the scheduler once, then
/// runs the synchronous translation. Useful to avoid blocking the
/// caller's current turn; it adds no other concurrency concerns.
pub async fn translate_async(
    registry: &FieldRegistry,
    params: &ListingParams,
    options: &TranslateOptions,
) -> Result<Translation> {
    tokio::task::yield_now().await;
    translate(registry, params, options)
}

/// Maps an ORDER BY token: a `-` prefix renders `field DESC`, anything
/// else is an implicit ascending reference to itself.
fn order_expr(token: &str) -> Option<ParsedExpr> {
    if let Some(rest) = token.strip_prefix('-') {
        let field = rest.trim();
        if field.is_empty() {
            return None;
        }
        Some(ParsedExpr {
            field: field.to_string(),
            expression: format!("{field} DESC"),
        })
    } else {
        Some(ParsedExpr {
            field: token.to_string(),
            expression: token.to_string(),
        })
    }
}

/// Resolves the top-level join operator, defaulting to AND. Anything
/// other than AND/OR records a validation error.
fn resolve_join(
    value: Option<&RawParam>,
    errors: &mut ValidationErrors,
) -> std::result::Result<JoinOp, crate::error::ConfigError> {
    let tokens = normalize("whereJoin", value, false)?;
    let Some(token) = tokens.first() else {
        return Ok(JoinOp::default());
    };
    JoinOp::parse(token).map_or_else(
        || {
            errors.push(
                ValidationError::new(format!("invalid whereJoin value: {token}"))
                    .with_data(serde_json::json!({"value": token})),
            );
            Ok(JoinOp::default())
        },
        Ok,
    )
}

/// Leniently resolves a numeric parameter: bare numbers pass through,
/// strings are tokenized and the first token parsed, anything
/// unparseable falls back to the caller's default.
fn int_param(
    key: &str,
    value: Option<&RawParam>,
) -> std::result::Result<Option<i64>, crate::error::ConfigError> {
    match value {
        None => Ok(None),
        Some(RawParam::Number(n)) => Ok(Some(*n)),
        Some(other) => {
            let tokens = normalize(key, Some(other), false)?;
            Ok(tokens.first().and_then(|token| token.parse().ok()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_expr_maps_descending_prefix() {
        let expr = order_expr("-price").unwrap();
        assert_eq!(expr.field, "price");
        assert_eq!(expr.expression, "price DESC");

        let expr = order_expr("price").unwrap();
        assert_eq!(expr.expression, "price");
    }

    #[test]
    fn bare_dash_order_token_is_dropped() {
        assert!(order_expr("-").is_none());
    }

    #[test]
    fn join_defaults_to_and() {
        let mut errors = ValidationErrors::new();
        assert_eq!(resolve_join(None, &mut errors).unwrap(), JoinOp::And);
        assert!(errors.is_empty());
    }

    #[test]
    fn invalid_join_records_a_validation_error() {
        let mut errors = ValidationErrors::new();
        let join = resolve_join(Some(&RawParam::from("XOR")), &mut errors).unwrap();
        assert_eq!(join, JoinOp::And);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn int_param_is_lenient() {
        assert_eq!(int_param("offset", Some(&RawParam::from(40))).unwrap(), Some(40));
        assert_eq!(
            int_param("offset", Some(&RawParam::from(" 12 "))).unwrap(),
            Some(12)
        );
        assert_eq!(int_param("offset", Some(&RawParam::from("abc"))).unwrap(), None);
        assert_eq!(int_param("offset", None).unwrap(), None);
    }
}
