use super::directive::Arg;
use super::error::EngineError;
use super::registry::ProviderRegistry;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::{json, Value};

fn rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

#[test]
fn test_builtins_are_registered() {
    let registry = ProviderRegistry::with_builtins();
    for name in ["integer", "string", "name", "title", "image", "id"] {
        assert!(registry.lookup(name).is_some(), "missing builtin '{name}'");
    }
    assert_eq!(registry.len(), 6);
}

#[test]
fn test_register_overwrites_last_write_wins() {
    let mut registry = ProviderRegistry::with_builtins();
    registry.register("id", |_, _| Ok(json!("fixed")));
    let provider = registry.lookup("id").unwrap();
    assert_eq!(provider(&mut rng(), &[]).unwrap(), json!("fixed"));
}

#[test]
fn test_lookup_missing() {
    let registry = ProviderRegistry::new();
    assert!(registry.lookup("integer").is_none());
    assert!(registry.is_empty());
}

#[test]
fn test_integer_bounds_are_inclusive() {
    let registry = ProviderRegistry::with_builtins();
    let provider = registry.lookup("integer").unwrap();
    let mut rng = rng();
    let mut seen_min = false;
    let mut seen_max = false;
    for _ in 0..500 {
        let value = provider(&mut rng, &[Arg::Int(1), Arg::Int(3)]).unwrap();
        let n = value.as_i64().unwrap();
        assert!((1..=3).contains(&n));
        seen_min |= n == 1;
        seen_max |= n == 3;
    }
    assert!(seen_min && seen_max);
}

#[test]
fn test_integer_defaults() {
    let registry = ProviderRegistry::with_builtins();
    let provider = registry.lookup("integer").unwrap();
    let n = provider(&mut rng(), &[]).unwrap().as_i64().unwrap();
    assert!((0..=100).contains(&n));
}

#[test]
fn test_integer_reversed_bounds() {
    let registry = ProviderRegistry::with_builtins();
    let provider = registry.lookup("integer").unwrap();
    let err = provider(&mut rng(), &[Arg::Int(10), Arg::Int(1)]).unwrap_err();
    assert!(matches!(err, EngineError::Range { min: 10, max: 1 }));
}

#[test]
fn test_integer_rejects_string_arg() {
    let registry = ProviderRegistry::with_builtins();
    let provider = registry.lookup("integer").unwrap();
    let err = provider(&mut rng(), &[Arg::Str("a".into())]).unwrap_err();
    assert!(matches!(err, EngineError::TemplateParse(_)));
}

#[test]
fn test_string_exact_length() {
    let registry = ProviderRegistry::with_builtins();
    let provider = registry.lookup("string").unwrap();
    let value = provider(&mut rng(), &[Arg::Int(32)]).unwrap();
    let token = value.as_str().unwrap();
    assert_eq!(token.len(), 32);
    assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
}

#[test]
fn test_string_bounded_length() {
    let registry = ProviderRegistry::with_builtins();
    let provider = registry.lookup("string").unwrap();
    let mut rng = rng();
    for _ in 0..100 {
        let value = provider(&mut rng, &[Arg::Int(2), Arg::Int(6)]).unwrap();
        let len = value.as_str().unwrap().len();
        assert!((2..=6).contains(&len));
    }
}

#[test]
fn test_string_negative_length() {
    let registry = ProviderRegistry::with_builtins();
    let provider = registry.lookup("string").unwrap();
    let err = provider(&mut rng(), &[Arg::Int(-1)]).unwrap_err();
    assert!(matches!(err, EngineError::TemplateParse(_)));
}

#[test]
fn test_name_is_nonempty_string() {
    let registry = ProviderRegistry::with_builtins();
    let provider = registry.lookup("name").unwrap();
    let value = provider(&mut rng(), &[]).unwrap();
    assert!(!value.as_str().unwrap().is_empty());
}

#[test]
fn test_title_word_count() {
    let registry = ProviderRegistry::with_builtins();
    let provider = registry.lookup("title").unwrap();
    let mut rng = rng();
    for _ in 0..50 {
        let value = provider(&mut rng, &[Arg::Int(2), Arg::Int(5)]).unwrap();
        let words = value.as_str().unwrap().split(' ').count();
        assert!((2..=5).contains(&words));
    }
}

#[test]
fn test_image_dimensions() {
    let registry = ProviderRegistry::with_builtins();
    let provider = registry.lookup("image").unwrap();
    let value = provider(&mut rng(), &[Arg::Str("200x200".into())]).unwrap();
    assert_eq!(value, json!("https://dummyimage.com/200x200"));

    let value = provider(&mut rng(), &[]).unwrap();
    assert_eq!(value, json!("https://dummyimage.com/100x100"));
}

#[test]
fn test_image_rejects_bad_dimensions() {
    let registry = ProviderRegistry::with_builtins();
    let provider = registry.lookup("image").unwrap();
    for bad in ["200", "wxh", "200x", "x200"] {
        let err = provider(&mut rng(), &[Arg::Str(bad.into())]).unwrap_err();
        assert!(matches!(err, EngineError::TemplateParse(_)), "accepted {bad}");
    }
}

#[test]
fn test_id_is_a_uuid() {
    let registry = ProviderRegistry::with_builtins();
    let provider = registry.lookup("id").unwrap();
    let value = provider(&mut rng(), &[]).unwrap();
    let id = value.as_str().unwrap();
    assert_eq!(id.len(), 36);
    assert_eq!(id.matches('-').count(), 4);
}

#[test]
fn test_id_is_deterministic_for_a_seeded_source() {
    let registry = ProviderRegistry::with_builtins();
    let provider = registry.lookup("id").unwrap();
    let a = provider(&mut rng(), &[]).unwrap();
    let b = provider(&mut rng(), &[]).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_extra_args_are_rejected() {
    let registry = ProviderRegistry::with_builtins();
    let provider = registry.lookup("id").unwrap();
    let err = provider(&mut rng(), &[Arg::Int(1)]).unwrap_err();
    assert!(matches!(err, EngineError::TemplateParse(_)));
}

#[test]
fn test_custom_provider_returns_non_string_values() {
    let mut registry = ProviderRegistry::new();
    registry.register("flag", |_, _| Ok(Value::Bool(true)));
    let provider = registry.lookup("flag").unwrap();
    assert_eq!(provider(&mut rng(), &[]).unwrap(), json!(true));
}
