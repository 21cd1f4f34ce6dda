// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Point;
use understory_hierarchy::{Children, NodeId, TreeNode};
use understory_list_view::{HierarchyListView, ListViewConfig, RowFlags, RowWidget};

#[derive(Default)]
#[allow(dead_code, reason = "Written like a real row, never read back.")]
struct NullRow {
    node: Option<NodeId>,
    position: Point,
}

impl RowWidget for NullRow {
    fn bind(&mut self, id: NodeId) {
        self.node = Some(id);
    }

    fn unbind(&mut self) {
        self.node = None;
    }

    fn set_visual_state(&mut self, _width: f64, _depth: usize, _flags: RowFlags) {}

    fn set_position(&mut self, position: Point) {
        self.position = position;
    }
}

/// `groups` roots, each with `per_group` leaf children.
fn gen_groups(groups: i64, per_group: i64) -> Children {
    (0..groups)
        .map(|g| {
            let base = (g + 1) * 1_000_000;
            let children: Vec<_> = (0..per_group)
                .map(|i| TreeNode::leaf(NodeId(base + i), "leaf"))
                .collect();
            TreeNode::new(NodeId(g), "group", children)
        })
        .collect::<Vec<_>>()
        .into()
}

fn config() -> ListViewConfig {
    ListViewConfig {
        row_extent: 1.0,
        view_extent: 40.0,
        ..Default::default()
    }
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("list_view_render");
    for (groups, per_group) in [(10, 100), (100, 100), (100, 1000)] {
        let data = gen_groups(groups, per_group);
        let rows = (groups * (per_group + 1)) as u64;
        group.throughput(Throughput::Elements(rows));

        group.bench_function(format!("collapsed_rows{rows}"), |b| {
            let mut view = HierarchyListView::new(config(), NullRow::default);
            view.set_data(data.clone());
            b.iter(|| black_box(view.render()));
        });

        group.bench_function(format!("expanded_scroll_rows{rows}"), |b| {
            let mut view = HierarchyListView::new(config(), NullRow::default);
            view.set_data(data.clone());
            for id in 0..groups {
                view.toggle_expanded(NodeId(id));
            }
            view.render();
            let bottom = -(view.content_extent() - 40.0);
            b.iter(|| {
                // One row per iteration, wrapping at the bottom.
                if view.scroll_offset() <= bottom {
                    view.set_scroll_offset(0.0);
                } else {
                    view.scroll_by(-1.0);
                }
                black_box(view.render())
            });
        });

        group.bench_function(format!("select_last_rows{rows}"), |b| {
            let last = NodeId(groups * 1_000_000 + per_group - 1);
            b.iter(|| {
                let mut view = HierarchyListView::new(config(), NullRow::default);
                view.set_data(data.clone());
                view.select_row(last);
                black_box(view.render())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
