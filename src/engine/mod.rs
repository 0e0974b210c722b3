//! Template-driven mock data generation engine.
//!
//! A template is an ordinary JSON value tree whose object keys may carry a
//! `|` quantifier suffix and whose string leaves may be `@provider(args)`
//! directives. The [`Generator`] walks the tree, resolving both embedded
//! grammars against an injected [`ProviderRegistry`], and returns a concrete
//! tree with no annotations left.

pub mod directive;
pub mod error;
pub mod generator;
pub mod key;
pub mod quantifier;
pub mod registry;

pub use directive::{Arg, Directive};
pub use error::EngineError;
pub use generator::Generator;
pub use key::{ParsedKey, Quantifier};
pub use quantifier::Strategy;
pub use registry::{ProviderFn, ProviderRegistry};

#[cfg(test)]
mod registry_test;
