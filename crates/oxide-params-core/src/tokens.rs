//! Tokenizer/normalizer: converts heterogeneous raw parameter shapes
//! into a flat, ordered sequence of trimmed, non-empty tokens.

use crate::error::ConfigError;
use crate::params::RawParam;

/// Normalizes a raw parameter into ordered tokens.
///
/// - An absent value yields an empty sequence.
/// - With `preserve_groups`, array elements are kept verbatim (each may
///   itself be a comma-joined group) and a single string becomes a
///   one-element sequence; otherwise every string is comma-split and
///   flattened.
/// - Every token is trimmed; tokens empty after trimming are discarded.
///
/// # Errors
///
/// Returns [`ConfigError::UnsupportedInput`] for a bare number, which no
/// string-valued parameter accepts. This is the fatal class, not a
/// user-facing validation failure.
pub fn normalize(
    key: &str,
    value: Option<&RawParam>,
    preserve_groups: bool,
) -> Result<Vec<String>, ConfigError> {
    let tokens = match value {
        None => Vec::new(),
        Some(RawParam::One(s)) => {
            if preserve_groups {
                vec![s.as_str()]
            } else {
                s.split(',').collect()
            }
        }
        Some(RawParam::Many(items)) => {
            if preserve_groups {
                items.iter().map(String::as_str).collect()
            } else {
                items.iter().flat_map(|item| item.split(',')).collect()
            }
        }
        Some(RawParam::Number(_)) => {
            return Err(ConfigError::UnsupportedInput(key.to_string()));
        }
    };

    Ok(tokens
        .into_iter()
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect())
}
