//! Raw parameter shapes and per-call translation options.

use serde::{Deserialize, Serialize};

/// A raw parameter value as it arrives from a query string or JSON body.
///
/// String values may be comma-delimited lists; array values carry one
/// string per element. Bare numbers are only meaningful for `offset` and
/// `limit` and are rejected by the tokenizer anywhere else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawParam {
    /// A single (optionally comma-delimited) string.
    One(String),
    /// An array of strings.
    Many(Vec<String>),
    /// A bare number.
    Number(i64),
}

impl From<&str> for RawParam {
    fn from(value: &str) -> Self {
        Self::One(value.to_string())
    }
}

impl From<String> for RawParam {
    fn from(value: String) -> Self {
        Self::One(value)
    }
}

impl From<Vec<String>> for RawParam {
    fn from(value: Vec<String>) -> Self {
        Self::Many(value)
    }
}

impl From<Vec<&str>> for RawParam {
    fn from(value: Vec<&str>) -> Self {
        Self::Many(value.into_iter().map(str::to_string).collect())
    }
}

impl From<i64> for RawParam {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

/// The flat key/value parameter object accepted by translation.
///
/// Deserializes from camelCase keys (`fields`, `whereAnd`, `where`,
/// `whereOr`, `whereJoin`, `orderBy`, `offset`, `limit`); every key is
/// optional. `where` is a shorthand whose groups are concatenated onto
/// the `whereAnd` groups before parsing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListingParams {
    /// SELECT field names.
    pub fields: Option<RawParam>,
    /// AND-joined WHERE groups.
    pub where_and: Option<RawParam>,
    /// Shorthand for additional AND-joined WHERE groups.
    pub r#where: Option<RawParam>,
    /// OR-joined WHERE groups.
    pub where_or: Option<RawParam>,
    /// Join operator between top-level WHERE expressions (AND or OR).
    pub where_join: Option<RawParam>,
    /// ORDER BY tokens; prefix a field with `-` for descending.
    pub order_by: Option<RawParam>,
    /// Row offset for pagination.
    pub offset: Option<RawParam>,
    /// Maximum number of rows to return.
    pub limit: Option<RawParam>,
}

impl ListingParams {
    /// Creates an empty parameter object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the SELECT field names.
    #[must_use]
    pub fn fields(mut self, value: impl Into<RawParam>) -> Self {
        self.fields = Some(value.into());
        self
    }

    /// Sets the AND-joined WHERE groups.
    #[must_use]
    pub fn where_and(mut self, value: impl Into<RawParam>) -> Self {
        self.where_and = Some(value.into());
        self
    }

    /// Sets the `where` shorthand groups.
    #[must_use]
    pub fn where_filter(mut self, value: impl Into<RawParam>) -> Self {
        self.r#where = Some(value.into());
        self
    }

    /// Sets the OR-joined WHERE groups.
    #[must_use]
    pub fn where_or(mut self, value: impl Into<RawParam>) -> Self {
        self.where_or = Some(value.into());
        self
    }

    /// Sets the top-level WHERE join operator.
    #[must_use]
    pub fn where_join(mut self, value: impl Into<RawParam>) -> Self {
        self.where_join = Some(value.into());
        self
    }

    /// Sets the ORDER BY tokens.
    #[must_use]
    pub fn order_by(mut self, value: impl Into<RawParam>) -> Self {
        self.order_by = Some(value.into());
        self
    }

    /// Sets the pagination offset.
    #[must_use]
    pub fn offset(mut self, value: impl Into<RawParam>) -> Self {
        self.offset = Some(value.into());
        self
    }

    /// Sets the row limit.
    #[must_use]
    pub fn limit(mut self, value: impl Into<RawParam>) -> Self {
        self.limit = Some(value.into());
        self
    }
}

/// Per-call translation options.
#[derive(Debug, Clone)]
pub struct TranslateOptions {
    /// Limit applied when the caller specifies none.
    pub default_limit: i64,
    /// Ceiling for the limit; itself clamped to be at least 1.
    pub max_limit: i64,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self {
            default_limit: 20,
            max_limit: 100,
        }
    }
}

impl TranslateOptions {
    /// Creates options with the default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the limit applied when the caller specifies none.
    #[must_use]
    pub fn default_limit(mut self, limit: i64) -> Self {
        self.default_limit = limit;
        self
    }

    /// Sets the limit ceiling.
    #[must_use]
    pub fn max_limit(mut self, limit: i64) -> Self {
        self.max_limit = limit;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_mixed_shapes() {
        let params: ListingParams = serde_json::from_str(
            r#"{
                "fields": "name,age",
                "whereAnd": ["age>=21", "name<>null"],
                "where": "id>0",
                "whereOr": "age<18",
                "whereJoin": "OR",
                "orderBy": ["-age", "name"],
                "offset": 40,
                "limit": "10"
            }"#,
        )
        .unwrap();

        assert_eq!(params.fields, Some(RawParam::One("name,age".to_string())));
        assert_eq!(
            params.where_and,
            Some(RawParam::Many(vec![
                "age>=21".to_string(),
                "name<>null".to_string()
            ]))
        );
        assert_eq!(params.r#where, Some(RawParam::One("id>0".to_string())));
        assert_eq!(params.offset, Some(RawParam::Number(40)));
        assert_eq!(params.limit, Some(RawParam::One("10".to_string())));
    }

    #[test]
    fn absent_keys_deserialize_to_none() {
        let params: ListingParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params, ListingParams::default());
    }

    #[test]
    fn builder_mirrors_deserialization() {
        let params = ListingParams::new()
            .fields("name,age")
            .where_and("age>=21")
            .order_by(vec!["-age"]);

        assert_eq!(params.fields, Some(RawParam::One("name,age".to_string())));
        assert_eq!(
            params.order_by,
            Some(RawParam::Many(vec!["-age".to_string()]))
        );
    }
}
