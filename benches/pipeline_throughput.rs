//! Snippet pipeline throughput benchmarks
//!
//! Measures `process_document` on generated documents with varying node
//! counts, and the cost of the no-op path on already-resolved pages.
//!
//! Run benchmarks: `cargo bench --bench pipeline_throughput`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use pagesmith::{Pipeline, process_document};
use serde_json::{Value, json};
use std::hint::black_box;

/// A generated document: one dropzone section per ten nodes, the rest nested
/// inside it, every node carrying an inline property value and a reference.
fn generated_document(count: usize) -> String {
    let content: Vec<Value> = (0..count)
        .map(|i| {
            let section = i - i % 10;
            if i == section {
                json!({
                    "id": i,
                    "type": "base",
                    "props": {
                        "element": "section",
                        "children": "dropzone",
                        "childrenProps": {},
                        "properties": [{ "key": "className", "valueType": "string", "value": "grid gap-4" }]
                    }
                })
            } else {
                json!({
                    "id": i,
                    "parentId": section,
                    "type": "typography",
                    "props": {
                        "variant": "p",
                        "text": format!("Item {} of {{copy(root.props.title)}}", i),
                        "properties": [{ "key": "className", "valueType": "string", "value": "text-sm" }]
                    }
                })
            }
        })
        .collect();

    json!({ "root": { "props": { "title": "Bench" } }, "content": content }).to_string()
}

fn source_document() -> Value {
    json!({ "root": { "props": { "title": "Saved page" } } })
}

/// Benchmark full pipeline throughput with varying node counts
fn benchmark_pipeline_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline_throughput");
    let source = source_document();

    for count in [10, 100, 1000] {
        group.throughput(Throughput::Elements(count as u64));
        let raw = generated_document(count);

        group.bench_with_input(BenchmarkId::new("nodes", count), &raw, |b, raw| {
            b.iter(|| black_box(process_document(black_box(raw), Some(&source))));
        });
    }

    group.finish();
}

/// Benchmark the pass-through path on an already-resolved document
fn benchmark_resolved_passthrough(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolved_passthrough");

    for count in [100, 1000] {
        let resolved = Pipeline::new().process(&generated_document(count), Some(&source_document()));
        group.throughput(Throughput::Bytes(resolved.len() as u64));

        group.bench_with_input(BenchmarkId::new("nodes", count), &resolved, |b, resolved| {
            b.iter(|| black_box(process_document(black_box(resolved), None)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_pipeline_throughput,
    benchmark_resolved_passthrough
);
criterion_main!(benches);
