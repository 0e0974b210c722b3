//! Error types for the mock data engine

use thiserror::Error;

/// Errors that can abort a single generation call.
///
/// All variants are local to the call that raised them: no partial value
/// tree is returned and the provider registry is never mutated on failure.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Malformed quantifier spec, malformed directive syntax, or an
    /// unsupported quantifier/value-shape combination
    #[error("Template parse error: {0}")]
    TemplateParse(String),

    /// Directive references a provider that was never registered
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    /// Numeric bounds with min greater than max
    #[error("Invalid range: min {min} is greater than max {max}")]
    Range { min: i64, max: i64 },

    /// Recursion depth guard tripped while walking the template
    #[error("Maximum template depth ({0}) exceeded")]
    DepthExceeded(usize),
}
