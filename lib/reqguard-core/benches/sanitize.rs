use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use http::Method;
use reqguard_core::{RequestBody, RequestDescription, SecretSet, SensitiveFieldIndex, sanitize};
use serde_json::{Value, json};

fn nested_body(depth: usize, width: usize) -> Value {
    if depth == 0 {
        return json!("value with SECRET123 inside and some padding text");
    }
    let items = (0..width)
        .map(|idx| (format!("key{idx}"), nested_body(depth - 1, width)))
        .collect::<serde_json::Map<_, _>>();
    Value::Object(items)
}

fn benchmark_sanitize(c: &mut Criterion) {
    let mut group = c.benchmark_group("sanitize");

    let secrets = ["SECRET123", "oauth-token-xyz", "hunter2"]
        .into_iter()
        .collect::<SecretSet>();
    let index = SensitiveFieldIndex::new().with_keys("auth", ["pass"]);

    let small = RequestDescription::new(Method::GET, "https://example.com?key=SECRET123")
        .with_header("Authorization", "Bearer SECRET123")
        .with_option("auth", json!({ "user": "alice", "pass": "hunter2" }));

    let nested = RequestDescription::new(Method::POST, "https://example.com")
        .with_body(RequestBody::Json(nested_body(4, 6)));

    let binary = RequestDescription::new(Method::POST, "https://example.com")
        .with_body(RequestBody::Raw(vec![0_u8; 1_000_000].into()));

    group.bench_function("small_request", |b| {
        b.iter(|| black_box(sanitize(black_box(&small), &index, &secrets)));
    });

    group.bench_function("nested_json_body", |b| {
        b.iter(|| black_box(sanitize(black_box(&nested), &index, &secrets)));
    });

    group.bench_function("large_binary_body", |b| {
        b.iter(|| black_box(sanitize(black_box(&binary), &index, &secrets)));
    });

    group.finish();
}

criterion_group!(benches, benchmark_sanitize);
criterion_main!(benches);
