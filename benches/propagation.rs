//! Benchmarks for upward price propagation
//!
//! Target: <1µs per update on a 3-level fund hierarchy

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use portfolio_sim::{DefinitionRecord, Hierarchy, PropagationEngine};

/// One root fund holding `funds` sub-funds of `assets` leaves each
fn fund_hierarchy(funds: usize, assets: usize) -> Hierarchy {
    let mut records = vec![DefinitionRecord::header("Root")];
    for f in 0..funds {
        records.push(DefinitionRecord::child(format!("F{f}"), 1));
    }
    for f in 0..funds {
        records.push(DefinitionRecord::header(format!("F{f}")));
        for a in 0..assets {
            records.push(DefinitionRecord::child(format!("F{f}A{a}"), 10));
        }
    }
    Hierarchy::build(records).expect("benchmark hierarchy is well formed")
}

fn bench_update_to_root(c: &mut Criterion) {
    let mut group = c.benchmark_group("propagation");

    for assets in [8usize, 64, 512] {
        let mut engine = PropagationEngine::new(fund_hierarchy(16, assets));
        // Price everything once so every update walks to the root
        for f in 0..16 {
            for a in 0..assets {
                engine.apply(&format!("F{f}A{a}"), 1.0);
            }
        }

        let mut out = Vec::with_capacity(4);
        group.bench_with_input(BenchmarkId::new("to_root", assets), &assets, |b, _| {
            b.iter(|| {
                out.clear();
                black_box(engine.apply_into(black_box("F3A1"), black_box(2.5), &mut out));
            })
        });
    }

    group.finish();
}

fn bench_update_pending(c: &mut Criterion) {
    let mut engine = PropagationEngine::new(fund_hierarchy(16, 64));
    let mut out = Vec::new();

    c.bench_function("propagation_pending", |b| {
        b.iter(|| {
            out.clear();
            black_box(engine.apply_into(black_box("F0A0"), black_box(2.5), &mut out));
        })
    });
}

fn bench_deep_chain(c: &mut Criterion) {
    let depth = 1_000;
    let mut records = Vec::with_capacity(depth * 2);
    for level in 0..depth {
        records.push(DefinitionRecord::header(format!("P{level}")));
        records.push(DefinitionRecord::child(format!("P{}", level + 1), 1));
    }
    let mut engine =
        PropagationEngine::new(Hierarchy::build(records).expect("chain is well formed"));
    let leaf = format!("P{depth}");
    let mut out = Vec::with_capacity(depth);

    c.bench_function("propagation_chain_1000", |b| {
        b.iter(|| {
            out.clear();
            black_box(engine.apply_into(black_box(&leaf), black_box(1.5), &mut out));
        })
    });
}

criterion_group!(
    benches,
    bench_update_to_root,
    bench_update_pending,
    bench_deep_chain
);
criterion_main!(benches);
