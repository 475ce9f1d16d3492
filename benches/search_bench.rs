#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use resolog::{Engine, Fact, Rule};

/// A chain of `len` edges with the usual reachability rules
fn setup_chain(len: usize) -> Engine {
    let mut engine = Engine::new();

    for i in 0..len {
        engine.add_fact(Fact::new(
            "edge",
            [format!("node_{i}"), format!("node_{}", i + 1)],
        ));
    }

    // path(X, Y) :- edge(X, Y)
    engine.add_rule(Rule::new(
        Fact::new("path", ["X", "Y"]),
        [Fact::new("edge", ["X", "Y"])],
    ));

    // path(X, Z) :- edge(X, Y), path(Y, Z)
    engine.add_rule(Rule::new(
        Fact::new("path", ["X", "Z"]),
        [Fact::new("edge", ["X", "Y"]), Fact::new("path", ["Y", "Z"])],
    ));

    engine
}

/// A family tree where every person has two children, `depth` levels deep
fn setup_family(depth: usize) -> Engine {
    let mut engine = Engine::new();
    let mut generation = vec!["p".to_string()];

    for _ in 0..depth {
        let mut next = Vec::new();
        for parent in &generation {
            for side in ["l", "r"] {
                let child = format!("{parent}{side}");
                engine.add_fact(Fact::new("parent", [parent.clone(), child.clone()]));
                next.push(child);
            }
        }
        generation = next;
    }

    engine.add_rule(Rule::new(
        Fact::new("grandparent", ["X", "Z"]),
        [Fact::new("parent", ["X", "Y"]), Fact::new("parent", ["Y", "Z"])],
    ));

    engine
}

fn query_reachability(c: &mut Criterion) {
    let engine = setup_chain(30);

    c.bench_function("query_reachability", |b| {
        b.iter(|| {
            let query = Fact::new("path", ["node_0", "node_30"]);
            black_box(engine.query(&query))
        });
    });
}

fn query_all_reachable(c: &mut Criterion) {
    let engine = setup_chain(30);

    c.bench_function("query_all_reachable", |b| {
        b.iter(|| {
            let query = Fact::new("path", ["node_0", "T"]);
            black_box(engine.query(&query))
        });
    });
}

fn query_all_grandchildren(c: &mut Criterion) {
    let engine = setup_family(6);

    c.bench_function("query_all_grandchildren", |b| {
        b.iter(|| {
            let query = Fact::new("grandparent", ["G", "C"]);
            black_box(engine.query(&query))
        });
    });
}

criterion_group!(
    benches,
    query_reachability,
    query_all_reachable,
    query_all_grandchildren
);
criterion_main!(benches);
