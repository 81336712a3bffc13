//! Resolution benchmarks.
//!
//! Measures parse+bind of a synthetic project and key completion over call
//! chains of increasing length.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use phz::binder::ProjectStore;
use phz::lsp::{CompletionOptions, complete};

/// `f0` returns a record; every `fN` returns `f(N-1)()`. The caret sits in
/// `$x['']` where `$x = f{depth}()`.
fn call_chain(depth: usize) -> (String, u32) {
    let mut source = String::from("<?php\nfunction f0() { return ['id' => 1, 'name' => 'x', 'tags' => []]; }\n");
    for i in 1..=depth {
        source.push_str(&format!("function f{i}() {{ return f{}(); }}\n", i - 1));
    }
    source.push_str(&format!("$x = f{depth}();\n$x['"));
    let offset = source.len() as u32;
    source.push_str("'];\n");
    (source, offset)
}

fn bench_index(c: &mut Criterion) {
    let (source, _) = call_chain(200);
    c.bench_function("index_200_functions", |b| {
        b.iter(|| {
            let mut store = ProjectStore::new();
            store.add_source("bench.php", black_box(source.as_str()));
            store
        })
    });
}

fn bench_complete(c: &mut Criterion) {
    let mut group = c.benchmark_group("complete_call_chain");
    for depth in [1usize, 10, 50, 200] {
        let (source, offset) = call_chain(depth);
        let mut store = ProjectStore::new();
        store.add_source("bench.php", source);
        let options = CompletionOptions::default();
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, _| {
            b.iter(|| complete(&store, "bench.php", black_box(offset), &options))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_index, bench_complete);
criterion_main!(benches);
