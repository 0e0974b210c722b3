//! Strategy selection for quantified keys.
//!
//! A quantifier alone does not say what to generate; the runtime shape of
//! the value it is paired with does. The rules are checked in order and the
//! first match wins; pairings outside the table are rejected instead of
//! guessed.

use crate::engine::error::EngineError;
use crate::engine::key::Quantifier;
use serde_json::Value;

/// The generation strategy chosen for one object entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Singleton-array value with a quantifier: generate the contained
    /// sub-template independently once per count.
    Repeat(Quantifier),
    /// Multi-element array with an explicit `|1`: select one element
    /// uniformly, as a literal (never recursed).
    PickOne,
    /// Scalar value with a range quantifier: the scalar is a placeholder,
    /// the output is a uniform integer in `[min, max]`.
    IntRange { min: i64, max: i64 },
    /// No quantifier: hand the value back to the generator unchanged.
    Passthrough,
}

/// Applies the ordered decision procedure for a parsed key.
pub fn resolve(quantifier: Option<Quantifier>, value: &Value) -> Result<Strategy, EngineError> {
    let Some(quantifier) = quantifier else {
        return Ok(Strategy::Passthrough);
    };

    match value {
        Value::Array(items) if items.len() == 1 => Ok(Strategy::Repeat(quantifier)),
        Value::Array(items) if items.len() > 1 => match quantifier {
            Quantifier::Exact(1) => Ok(Strategy::PickOne),
            _ => Err(EngineError::TemplateParse(format!(
                "quantifier {} on a {}-element array: pick-one requires '|1'",
                describe(quantifier),
                items.len()
            ))),
        },
        Value::Array(_) => Err(EngineError::TemplateParse(
            "quantifier on an empty array has nothing to repeat or pick".to_string(),
        )),
        Value::Object(_) => Err(EngineError::TemplateParse(format!(
            "quantifier {} on an object value is not supported",
            describe(quantifier)
        ))),
        _ => match quantifier {
            Quantifier::Range { min, max } => Ok(Strategy::IntRange { min, max }),
            Quantifier::Exact(_) => Err(EngineError::TemplateParse(format!(
                "quantifier {} on a scalar value (only ranges apply to scalars)",
                describe(quantifier)
            ))),
        },
    }
}

fn describe(quantifier: Quantifier) -> String {
    match quantifier {
        Quantifier::Exact(n) => format!("'|{n}'"),
        Quantifier::Range { min, max } => format!("'|{min}-{max}'"),
    }
}
