//! Expression processor: maps ordered tokens to validated expression
//! fragments, filtered by an allow-list.

use tracing::debug;

/// A validated, renderable SQL fragment bound to one logical field.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedExpr {
    /// The logical field the expression binds to.
    pub field: String,
    /// The rendered SQL fragment.
    pub expression: String,
}

/// The default token mapper: field and expression are the token itself.
///
/// Used for SELECT tokens and any other plain field reference.
pub fn identity(token: &str) -> Option<ParsedExpr> {
    Some(ParsedExpr {
        field: token.to_string(),
        expression: token.to_string(),
    })
}

/// Maps tokens to expressions, preserving input order.
///
/// Tokens the mapper rejects are dropped silently; so are fields missing
/// from the allow-list. Unknown or disallowed fields are tolerated by
/// design, never an error. When `allow_field_multiples` is false, the
/// first occurrence of a field wins and later duplicates are dropped.
pub fn process(
    tokens: &[String],
    allowed: impl Fn(&str) -> bool,
    mut mapper: impl FnMut(&str) -> Option<ParsedExpr>,
    allow_field_multiples: bool,
) -> Vec<ParsedExpr> {
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();

    for token in tokens {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let Some(expr) = mapper(token) else {
            debug!("dropping unmapped token: {token}");
            continue;
        };
        if !allow_field_multiples && !seen.insert(expr.field.clone()) {
            continue;
        }
        if allowed(&expr.field) {
            out.push(expr);
        } else {
            debug!("dropping token for disallowed field: {}", expr.field);
        }
    }

    out
}
