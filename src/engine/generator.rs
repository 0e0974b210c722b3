//! Recursive template walker producing the concrete value tree.

use crate::engine::directive;
use crate::engine::error::EngineError;
use crate::engine::key::{self, Quantifier};
use crate::engine::quantifier::{self, Strategy};
use crate::engine::registry::ProviderRegistry;
use rand::{Rng, RngCore};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Recursion limit applied when none is configured.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Turns an annotated template into a fully resolved value tree.
///
/// The generator holds no state across calls; every call is a pure function
/// of the template, the injected registry and the random source. Concurrent
/// calls against one shared registry are safe because generation never
/// mutates it.
pub struct Generator {
    registry: Arc<ProviderRegistry>,
    max_depth: usize,
}

impl Generator {
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self {
            registry,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Overrides the recursion depth guard.
    pub fn with_max_depth(self, max_depth: usize) -> Self {
        Self { max_depth, ..self }
    }

    /// Generates one value tree using the thread-local random source.
    ///
    /// Fails on the first problem encountered; no partial tree is returned.
    pub fn generate(&self, template: &Value) -> Result<Value, EngineError> {
        self.generate_with_rng(template, &mut rand::thread_rng())
    }

    /// Generates one value tree drawing all randomness from `rng`. A
    /// deterministic source yields a deterministic tree.
    pub fn generate_with_rng(
        &self,
        template: &Value,
        rng: &mut dyn RngCore,
    ) -> Result<Value, EngineError> {
        self.node(template, rng, 0)
    }

    fn node(&self, template: &Value, rng: &mut dyn RngCore, depth: usize) -> Result<Value, EngineError> {
        if depth > self.max_depth {
            return Err(EngineError::DepthExceeded(self.max_depth));
        }
        match template {
            Value::Object(entries) => self.object(entries, rng, depth),
            // A bare array (no governing key quantifier) keeps its length.
            Value::Array(items) => items
                .iter()
                .map(|item| self.node(item, rng, depth + 1))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            Value::String(leaf) => self.leaf(leaf, rng),
            other => Ok(other.clone()),
        }
    }

    fn object(
        &self,
        entries: &Map<String, Value>,
        rng: &mut dyn RngCore,
        depth: usize,
    ) -> Result<Value, EngineError> {
        let mut out = Map::with_capacity(entries.len());
        for (raw_key, value) in entries {
            let parsed = key::parse_key(raw_key)?;
            let generated = match quantifier::resolve(parsed.quantifier, value)? {
                Strategy::Repeat(count) => self.repeat(value, count, rng, depth)?,
                Strategy::PickOne => pick_one(value, rng)?,
                Strategy::IntRange { min, max } => Value::from(rng.gen_range(min..=max)),
                Strategy::Passthrough => self.node(value, rng, depth + 1)?,
            };
            out.insert(parsed.name, generated);
        }
        Ok(Value::Object(out))
    }

    /// Repeat strategy: the array's single element is the sub-template,
    /// generated independently once per count.
    fn repeat(
        &self,
        value: &Value,
        count: Quantifier,
        rng: &mut dyn RngCore,
        depth: usize,
    ) -> Result<Value, EngineError> {
        let n = match count {
            Quantifier::Exact(n) => n as usize,
            Quantifier::Range { min, max } => {
                if min < 0 {
                    return Err(EngineError::TemplateParse(format!(
                        "repeat count range {min}-{max} must not be negative"
                    )));
                }
                rng.gen_range(min..=max) as usize
            }
        };
        // Shape guaranteed by the strategy resolver.
        let sub_template = value.as_array().and_then(|a| a.first()).ok_or_else(|| {
            EngineError::TemplateParse("repeat strategy applied to a non-singleton array".to_string())
        })?;
        let mut items = Vec::with_capacity(n);
        for _ in 0..n {
            items.push(self.node(sub_template, rng, depth + 1)?);
        }
        Ok(Value::Array(items))
    }

    fn leaf(&self, leaf: &str, rng: &mut dyn RngCore) -> Result<Value, EngineError> {
        match directive::parse(leaf)? {
            None => Ok(Value::String(leaf.to_string())),
            Some(directive) => {
                let provider = self
                    .registry
                    .lookup(&directive.provider)
                    .ok_or_else(|| EngineError::UnknownProvider(directive.provider.clone()))?;
                provider(rng, &directive.args)
            }
        }
    }
}

/// Pick-one strategy: a uniform choice among the literal candidates. The
/// chosen element is not recursed; whatever the template lists is emitted
/// verbatim.
fn pick_one(value: &Value, rng: &mut dyn RngCore) -> Result<Value, EngineError> {
    // Shape guaranteed by the strategy resolver.
    let candidates = value.as_array().filter(|a| !a.is_empty()).ok_or_else(|| {
        EngineError::TemplateParse("pick-one strategy applied to a non-array".to_string())
    })?;
    Ok(candidates[rng.gen_range(0..candidates.len())].clone())
}
