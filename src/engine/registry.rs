//! Provider registry and the built-in providers.
//!
//! A provider is a named function that turns directive arguments plus a
//! random source into one generated value. The registry is populated during
//! setup and then shared behind an `Arc`; since registration needs
//! `&mut self`, nothing can add providers once serving starts.

use crate::engine::directive::Arg;
use crate::engine::error::EngineError;
use fake::faker::lorem::en::Word;
use fake::faker::name::en::Name;
use fake::Fake;
use rand::distributions::Alphanumeric;
use rand::{Rng, RngCore};
use serde_json::{json, Value};
use std::collections::HashMap;

/// Generation function backing one provider. Receives the caller's random
/// source so a deterministic generator produces deterministic providers.
pub type ProviderFn = Box<dyn Fn(&mut dyn RngCore, &[Arg]) -> Result<Value, EngineError> + Send + Sync>;

/// Mapping from provider name to generation function.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: HashMap<String, ProviderFn>,
}

impl ProviderRegistry {
    /// An empty registry with no providers.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-populated with the built-in providers: `integer`,
    /// `string`, `name`, `title`, `image` and `id`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("integer", gen_integer);
        registry.register("string", gen_string);
        registry.register("name", gen_name);
        registry.register("title", gen_title);
        registry.register("image", gen_image);
        registry.register("id", gen_id);
        registry
    }

    /// Inserts or overwrites the provider for `name`. Last write wins.
    pub fn register<F>(&mut self, name: impl Into<String>, generate: F)
    where
        F: Fn(&mut dyn RngCore, &[Arg]) -> Result<Value, EngineError> + Send + Sync + 'static,
    {
        self.providers.insert(name.into(), Box::new(generate));
    }

    /// Returns the provider registered under `name`, if any.
    pub fn lookup(&self, name: &str) -> Option<&ProviderFn> {
        self.providers.get(name)
    }

    /// Registered provider names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.providers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

/// Random integer in `[min, max]`, defaulting to `[0, 100]`.
fn gen_integer(rng: &mut dyn RngCore, args: &[Arg]) -> Result<Value, EngineError> {
    check_arity("integer", args, 2)?;
    let min = int_arg("integer", args, 0)?.unwrap_or(0);
    let max = int_arg("integer", args, 1)?.unwrap_or(100);
    if min > max {
        return Err(EngineError::Range { min, max });
    }
    Ok(json!(rng.gen_range(min..=max)))
}

/// Random alphanumeric token. `string(n)` gives exactly `n` characters,
/// `string(min, max)` a length drawn from the range, no args a length in
/// `[3, 10]`.
fn gen_string(rng: &mut dyn RngCore, args: &[Arg]) -> Result<Value, EngineError> {
    check_arity("string", args, 2)?;
    let (min, max) = match (int_arg("string", args, 0)?, int_arg("string", args, 1)?) {
        (None, _) => (3, 10),
        (Some(n), None) => (n, n),
        (Some(min), Some(max)) => (min, max),
    };
    if min < 0 {
        return Err(EngineError::TemplateParse(format!(
            "provider 'string' got a negative length {min}"
        )));
    }
    if min > max {
        return Err(EngineError::Range { min, max });
    }
    let len = rng.gen_range(min..=max) as usize;
    let token: String = (0..len).map(|_| rng.sample(Alphanumeric) as char).collect();
    Ok(Value::String(token))
}

/// Random person name.
fn gen_name(rng: &mut dyn RngCore, args: &[Arg]) -> Result<Value, EngineError> {
    check_arity("name", args, 0)?;
    Ok(Value::String(Name().fake_with_rng::<String, _>(rng)))
}

/// Random title of `title(min, max)` capitalized words, default 2 to 5.
fn gen_title(rng: &mut dyn RngCore, args: &[Arg]) -> Result<Value, EngineError> {
    check_arity("title", args, 2)?;
    let min = int_arg("title", args, 0)?.unwrap_or(2);
    let max = int_arg("title", args, 1)?.unwrap_or(5);
    if min < 1 {
        return Err(EngineError::TemplateParse(format!(
            "provider 'title' needs at least one word, got min {min}"
        )));
    }
    if min > max {
        return Err(EngineError::Range { min, max });
    }
    let count = rng.gen_range(min..=max);
    let words: Vec<String> = (0..count)
        .map(|_| capitalize(&Word().fake_with_rng::<String, _>(rng)))
        .collect();
    Ok(Value::String(words.join(" ")))
}

/// Placeholder image URL, `image("WxH")` with a 100x100 default.
fn gen_image(_rng: &mut dyn RngCore, args: &[Arg]) -> Result<Value, EngineError> {
    check_arity("image", args, 1)?;
    let dims = match args.first() {
        None => "100x100",
        Some(Arg::Str(s)) => s.as_str(),
        Some(other) => {
            return Err(EngineError::TemplateParse(format!(
                "provider 'image' expects a \"WxH\" string, got {other:?}"
            )))
        }
    };
    let valid = dims
        .split_once('x')
        .is_some_and(|(w, h)| w.parse::<u32>().is_ok() && h.parse::<u32>().is_ok());
    if !valid {
        return Err(EngineError::TemplateParse(format!(
            "provider 'image' expects dimensions like \"200x200\", got \"{dims}\""
        )));
    }
    Ok(Value::String(format!("https://dummyimage.com/{dims}")))
}

/// Random UUID v4 identifier, drawn from the caller's random source.
fn gen_id(rng: &mut dyn RngCore, args: &[Arg]) -> Result<Value, EngineError> {
    check_arity("id", args, 0)?;
    let mut bytes = [0u8; 16];
    rng.fill_bytes(&mut bytes);
    let id = uuid::Builder::from_random_bytes(bytes).into_uuid();
    Ok(Value::String(id.to_string()))
}

fn check_arity(provider: &str, args: &[Arg], max: usize) -> Result<(), EngineError> {
    if args.len() > max {
        return Err(EngineError::TemplateParse(format!(
            "provider '{provider}' takes at most {max} argument(s), got {}",
            args.len()
        )));
    }
    Ok(())
}

fn int_arg(provider: &str, args: &[Arg], idx: usize) -> Result<Option<i64>, EngineError> {
    match args.get(idx) {
        None => Ok(None),
        Some(Arg::Int(n)) => Ok(Some(*n)),
        Some(other) => Err(EngineError::TemplateParse(format!(
            "provider '{provider}' expects an integer for argument {idx}, got {other:?}"
        ))),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
