// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_hierarchy::{FlatCursor, FlatEntry, HierarchySnapshot, NodeId};

/// A balanced tree with `fanout` children per node, `levels` deep, in pre-order.
fn gen_tree(fanout: usize, levels: usize) -> FlatCursor {
    fn push(
        cursor: &mut FlatCursor,
        next_id: &mut i64,
        fanout: usize,
        depth: usize,
        levels: usize,
    ) {
        if depth == levels {
            return;
        }
        for _ in 0..fanout {
            let id = *next_id;
            *next_id += 1;
            cursor.push(id, "node", depth);
            push(cursor, next_id, fanout, depth + 1, levels);
        }
    }
    let mut cursor = FlatCursor::new();
    let mut next_id = 0;
    push(&mut cursor, &mut next_id, fanout, 0, levels);
    cursor
}

fn built(cursor: &mut FlatCursor) -> HierarchySnapshot {
    let mut snapshot = HierarchySnapshot::new();
    snapshot.update(cursor);
    snapshot
}

fn bench_diff(c: &mut Criterion) {
    let mut group = c.benchmark_group("hierarchy_diff");
    for (fanout, levels) in [(10, 3), (8, 4), (4, 7)] {
        let source = gen_tree(fanout, levels);
        let nodes = source.entries().len();
        group.throughput(Throughput::Elements(nodes as u64));

        group.bench_function(format!("initial_build_n{nodes}"), |b| {
            b.iter_batched(
                || source.clone(),
                |mut cursor| black_box(HierarchySnapshot::new().update(&mut cursor)),
                BatchSize::SmallInput,
            );
        });

        group.bench_function(format!("unchanged_n{nodes}"), |b| {
            let mut cursor = source.clone();
            let mut snapshot = built(&mut cursor);
            b.iter(|| black_box(snapshot.update(&mut cursor)));
        });

        group.bench_function(format!("rename_last_leaf_n{nodes}"), |b| {
            let last = NodeId(i64::try_from(nodes).unwrap() - 1);
            b.iter_batched(
                || {
                    let mut cursor = source.clone();
                    let snapshot = built(&mut cursor);
                    cursor.rename(last, "renamed");
                    (cursor, snapshot)
                },
                |(mut cursor, mut snapshot)| black_box(snapshot.update(&mut cursor)),
                BatchSize::SmallInput,
            );
        });

        group.bench_function(format!("insert_first_root_n{nodes}"), |b| {
            b.iter_batched(
                || {
                    let mut cursor = source.clone();
                    let snapshot = built(&mut cursor);
                    cursor.entries_mut().insert(
                        0,
                        FlatEntry {
                            id: NodeId(-1),
                            name: "inserted".into(),
                            depth: 0,
                        },
                    );
                    (cursor, snapshot)
                },
                |(mut cursor, mut snapshot)| black_box(snapshot.update(&mut cursor)),
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_diff);
criterion_main!(benches);
