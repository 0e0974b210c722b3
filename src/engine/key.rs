//! Parser for quantifier-annotated object keys.
//!
//! Template object keys may carry a suffix after the first `|`:
//! `"records|20"` repeats a sub-template 20 times, `"score|50-100"` draws a
//! number (or repeat count) from an inclusive range, `"status|1"` picks one
//! element of a candidate array. This module only normalizes the key; which
//! of those meanings applies is decided later against the value's shape.

use crate::engine::error::EngineError;

/// A quantifier spec parsed from a key suffix.
///
/// `Exact` holds a literal count; `Range` holds inclusive bounds with
/// `min <= max` guaranteed at parse time. Pick-one has no spelling of its
/// own: it is `Exact(1)` paired with a multi-element array value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    Exact(u64),
    Range { min: i64, max: i64 },
}

/// An object key normalized into its base name and optional quantifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedKey {
    /// Key with the annotation suffix stripped; this is the output key.
    pub name: String,
    pub quantifier: Option<Quantifier>,
}

/// Splits a raw object key on the first `|` and parses the suffix.
///
/// Keys without a delimiter pass through unchanged. A malformed suffix
/// (empty, non-numeric, missing bound) fails with
/// [`EngineError::TemplateParse`] naming the offending key; reversed bounds
/// fail with [`EngineError::Range`].
pub fn parse_key(raw: &str) -> Result<ParsedKey, EngineError> {
    let Some((name, spec)) = raw.split_once('|') else {
        return Ok(ParsedKey {
            name: raw.to_string(),
            quantifier: None,
        });
    };

    if name.is_empty() {
        return Err(EngineError::TemplateParse(format!(
            "key '{raw}' has an empty name before '|'"
        )));
    }

    let quantifier = parse_spec(raw, spec)?;
    Ok(ParsedKey {
        name: name.to_string(),
        quantifier: Some(quantifier),
    })
}

fn parse_spec(raw: &str, spec: &str) -> Result<Quantifier, EngineError> {
    if spec.is_empty() {
        return Err(EngineError::TemplateParse(format!(
            "key '{raw}' has an empty quantifier spec"
        )));
    }

    // Plain non-negative integer: an exact count.
    if let Ok(n) = spec.parse::<u64>() {
        return Ok(Quantifier::Exact(n));
    }

    // Range form `<int>-<int>`. The separator is searched from the second
    // byte so a leading sign on the min bound is not mistaken for it.
    let sep = spec
        .char_indices()
        .skip(1)
        .find(|&(_, c)| c == '-')
        .map(|(i, _)| i)
        .ok_or_else(|| malformed(raw, spec))?;
    let min = spec[..sep]
        .parse::<i64>()
        .map_err(|_| malformed(raw, spec))?;
    let max = spec[sep + 1..]
        .parse::<i64>()
        .map_err(|_| malformed(raw, spec))?;

    if min > max {
        return Err(EngineError::Range { min, max });
    }
    Ok(Quantifier::Range { min, max })
}

fn malformed(raw: &str, spec: &str) -> EngineError {
    EngineError::TemplateParse(format!(
        "key '{raw}' has a malformed quantifier spec '{spec}' (expected <int> or <int>-<int>)"
    ))
}
