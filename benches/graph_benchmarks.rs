use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use mute::graph::{Link, Node, NodeGraph, NodeId};

/// Build a ring of `size` nodes, each linked to its successor
fn ring(size: usize) -> (NodeGraph, Vec<NodeId>) {
    let graph = NodeGraph::new();
    let ids: Vec<NodeId> = (0..size).map(|_| graph.insert_node(Node::new()).id()).collect();
    for i in 0..size {
        graph
            .insert_link(Link::new(ids[i], ids[(i + 1) % size]))
            .unwrap();
    }
    (graph, ids)
}

/// Benchmark node insertion throughput
fn bench_node_insertion(c: &mut Criterion) {
    let mut group = c.benchmark_group("node_insertion");

    for size in [100, 1000, 10_000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| {
                let graph = NodeGraph::new();
                for _ in 0..size {
                    graph.insert_node(Node::new());
                }
                criterion::black_box(graph.node_count());
            });
        });
    }
    group.finish();
}

/// Benchmark link insertion, which validates both endpoints
fn bench_link_insertion(c: &mut Criterion) {
    let mut group = c.benchmark_group("link_insertion");

    for size in [100, 1000, 10_000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| {
                let (graph, _) = ring(size);
                criterion::black_box(graph.link_count());
            });
        });
    }
    group.finish();
}

/// Benchmark proxy traversal: incident links and neighbors
fn bench_traversal(c: &mut Criterion) {
    let mut group = c.benchmark_group("traversal");

    for size in [100, 1000, 10_000].iter() {
        let (graph, ids) = ring(*size);
        let middle = ids[size / 2];

        group.bench_with_input(BenchmarkId::new("links", size), size, |b, _| {
            b.iter(|| {
                let links = graph.lookup_node(middle).unwrap().links().unwrap();
                criterion::black_box(links.len());
            });
        });

        group.bench_with_input(BenchmarkId::new("neighbors", size), size, |b, _| {
            b.iter(|| {
                let neighbors = graph.lookup_node(middle).unwrap().neighbors().unwrap();
                criterion::black_box(neighbors.len());
            });
        });
    }
    group.finish();
}

/// Benchmark cascading node erasure
fn bench_erase(c: &mut Criterion) {
    c.bench_function("erase_ring_1000", |b| {
        b.iter(|| {
            let (graph, ids) = ring(1000);
            for id in ids {
                graph.erase_node(id);
            }
            criterion::black_box(graph.link_count());
        });
    });
}

criterion_group!(
    benches,
    bench_node_insertion,
    bench_link_insertion,
    bench_traversal,
    bench_erase
);
criterion_main!(benches);
