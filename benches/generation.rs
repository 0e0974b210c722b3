use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mimus::engine::{Generator, ProviderRegistry};
use serde_json::json;
use std::sync::Arc;

fn generator() -> Generator {
    Generator::new(Arc::new(ProviderRegistry::with_builtins()))
}

fn benchmark_flat_template(c: &mut Criterion) {
    let g = generator();
    let template = json!({
        "name": "@name",
        "avatar": "@image(\"200x200\")",
        "phone": "@integer(10000000000, 19999999999)",
        "score|50-100": 1
    });

    c.bench_function("flat_template", |b| {
        b.iter(|| g.generate(black_box(&template)).unwrap());
    });
}

fn benchmark_nested_template(c: &mut Criterion) {
    let g = generator();
    let template = json!({
        "commonWords": { "learnedWords|0-1000": 1, "totalWords|1000-2000": 1 },
        "wordTest": { "correct|0-100": 1, "total|100-200": 1 },
        "phrase": { "learnedPhrases|0-100": 1, "totalPhrases|100-200": 1 },
        "phraseTest": { "correct|0-100": 1, "total|100-200": 1 }
    });

    c.bench_function("nested_template", |b| {
        b.iter(|| g.generate(black_box(&template)).unwrap());
    });
}

fn benchmark_repeat_counts(c: &mut Criterion) {
    let g = generator();
    let mut group = c.benchmark_group("repeat_records");
    for count in [1usize, 20, 200] {
        let template = json!({
            format!("records|{count}"): [{
                "id": "@id",
                "title": "@title(2, 5)",
                "type|1": ["word", "phrase"],
                "status|1": ["learned", "unlearned"],
                "learnedTime|1-100": 1,
                "totalTime|1-100": 1
            }]
        });
        group.bench_with_input(BenchmarkId::from_parameter(count), &template, |b, t| {
            b.iter(|| g.generate(black_box(t)).unwrap());
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_flat_template,
    benchmark_nested_template,
    benchmark_repeat_counts
);
criterion_main!(benches);
