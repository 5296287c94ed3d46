//! WHERE clause builder.
//!
//! Grammar per expression token: `field <op> value` with
//! `<op>` one of `<>`, `<=`, `>=`, `<`, `>`, `=`. The operator pattern
//! lists longer operators before their one-character prefixes so `<=`
//! never tokenizes as `<` followed by a stray `=`. A token that does not
//! split into exactly one field/operator/value triple is malformed and
//! dropped without an error; so is a triple naming a field outside the
//! WHERE allow-list. Noisy client input on fields a client may not
//! filter is tolerated by design.

use regex::Regex;
use serde_json::json;
use tracing::debug;

use crate::convert::convert;
use crate::error::{ValidationError, ValidationErrors};
use crate::expr::{process, ParsedExpr};
use crate::registry::FieldRegistry;
use crate::value::ParamValue;

/// The case-insensitive value that requests a NULL comparison.
const NULL_SENTINEL: &str = "null";

/// Join operator between WHERE expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinOp {
    /// `AND` (the default).
    #[default]
    And,
    /// `OR`.
    Or,
}

impl JoinOp {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }

    /// Parses a join operator token; only `AND` and `OR` are accepted
    /// (case-insensitive, trimmed).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "AND" => Some(Self::And),
            "OR" => Some(Self::Or),
            _ => None,
        }
    }
}

impl std::fmt::Display for JoinOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accumulates top-level WHERE expressions and their bound values across
/// AND and OR groups.
pub(crate) struct WhereBuilder<'a> {
    registry: &'a FieldRegistry,
    op_pattern: Regex,
    expressions: Vec<String>,
    values: Vec<ParamValue>,
}

impl<'a> WhereBuilder<'a> {
    pub fn new(registry: &'a FieldRegistry) -> Self {
        // Longest operators first; the alternation order is load-bearing.
        let op_pattern = Regex::new("(<>|<=|>=|<|>|=)").expect("operator pattern");
        Self {
            registry,
            op_pattern,
            expressions: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Parses one list of groups. Each group is comma-split into triples;
    /// the triples inside a group join with the group's own operator and
    /// a group of two or more is parenthesized as a whole.
    pub fn add_groups(&mut self, groups: &[String], join: JoinOp, errors: &mut ValidationErrors) {
        let registry = self.registry;
        let op_pattern = &self.op_pattern;
        let values = &mut self.values;

        for group in groups {
            let tokens: Vec<String> = group.split(',').map(str::to_string).collect();
            let parsed = process(
                &tokens,
                |field| registry.is_filterable(field),
                |token| map_triple(registry, op_pattern, values, errors, token),
                true,
            );
            let fragments: Vec<String> = parsed.into_iter().map(|e| e.expression).collect();

            match fragments.len() {
                0 => {}
                1 => self.expressions.extend(fragments),
                _ => {
                    let joined = fragments.join(&format!(" {join} "));
                    self.expressions.push(format!("({joined})"));
                }
            }
        }
    }

    /// Returns the accumulated top-level expressions and bound values.
    pub fn finish(self) -> (Vec<String>, Vec<ParamValue>) {
        (self.expressions, self.values)
    }
}

/// Parses and renders a single `field op value` triple.
///
/// Pushes the bound value in emission order and returns the rendered
/// fragment `(field op ?)`, or `None` when the token is dropped (with a
/// validation error recorded for NULL misuse and conversion failures,
/// silently otherwise).
fn map_triple(
    registry: &FieldRegistry,
    op_pattern: &Regex,
    values: &mut Vec<ParamValue>,
    errors: &mut ValidationErrors,
    token: &str,
) -> Option<ParsedExpr> {
    let matches: Vec<_> = op_pattern.find_iter(token).collect();
    if matches.len() != 1 {
        debug!("dropping malformed WHERE token: {token}");
        return None;
    }

    let m = matches[0];
    let field = token[..m.start()].trim();
    let op = m.as_str();
    let raw_value = token[m.end()..].trim();

    if field.is_empty() || !registry.is_filterable(field) {
        debug!("dropping WHERE token for disallowed field: {token}");
        return None;
    }

    if raw_value.eq_ignore_ascii_case(NULL_SENTINEL) {
        if !registry.is_nullable(field) {
            errors.push(
                ValidationError::new(format!("field {field} cannot be compared with NULL"))
                    .with_data(json!({"field": field})),
            );
            return None;
        }
        let null_op = match op {
            "=" => "IS",
            "<>" => "IS NOT",
            _ => {
                errors.push(
                    ValidationError::new(format!(
                        "invalid operator {op} for NULL comparison on field {field}"
                    ))
                    .with_data(json!({"field": field, "operator": op})),
                );
                return None;
            }
        };
        values.push(ParamValue::Null);
        return Some(ParsedExpr {
            field: field.to_string(),
            expression: format!("({field} {null_op} ?)"),
        });
    }

    let value = match registry.data_type(field) {
        Some(data_type) => convert(field, data_type, raw_value, errors)?,
        None => ParamValue::Text(raw_value.to_string()),
    };

    values.push(value);
    Some(ParsedExpr {
        field: field.to_string(),
        expression: format!("({field} {op} ?)"),
    })
}
