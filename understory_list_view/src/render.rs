// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One render pass over the tree.
//!
//! Nodes are visited in display order (a node, then its children if expanded, then its next
//! sibling). Every visited node advances the row counter; only rows inside the
//! [`RowWindow`] are bound and positioned. Rows outside the window, rows under collapsed
//! nodes, and rows whose node vanished from the data are recycled.

use alloc::collections::BTreeSet;

use understory_hierarchy::{NodeId, TreeNode};

use crate::config::ListViewConfig;
use crate::expand::ExpandState;
use crate::pool::{RowFactory, RowPool, RowWidget};
use crate::types::{RowFlags, RowWindow};

/// Summary of a render pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Rows in display order, visible or not (collapsed subtrees excluded).
    pub rows: usize,
    /// Rows bound to a widget after the pass.
    pub bound: usize,
}

pub(crate) struct RenderPass<'a, F: RowFactory> {
    pub(crate) pool: &'a mut RowPool<F>,
    pub(crate) expand: &'a mut ExpandState,
    pub(crate) config: &'a ListViewConfig,
    pub(crate) window: RowWindow,
    pub(crate) scroll_offset: f64,
    pub(crate) selected: Option<NodeId>,
    count: i64,
    rendered: BTreeSet<NodeId>,
}

impl<'a, F: RowFactory> RenderPass<'a, F> {
    pub(crate) fn new(
        pool: &'a mut RowPool<F>,
        expand: &'a mut ExpandState,
        config: &'a ListViewConfig,
        window: RowWindow,
    ) -> Self {
        Self {
            pool,
            expand,
            config,
            window,
            scroll_offset: 0.0,
            selected: None,
            count: 0,
            rendered: BTreeSet::new(),
        }
    }

    pub(crate) fn run(mut self, roots: &[TreeNode]) -> RenderStats {
        self.visit(roots, 0);
        let rendered = self.rendered;
        // Rows for nodes that are no longer in the data.
        self.pool.retain(|id| rendered.contains(&id));
        RenderStats {
            rows: usize::try_from(self.count).unwrap_or(0),
            bound: self.pool.active_len(),
        }
    }

    fn visit(&mut self, nodes: &[TreeNode], depth: usize) {
        for node in nodes {
            let expanded = self.expand.entry(node.id());
            if self.window.contains(self.count) {
                self.update_row(node, depth, expanded);
            } else {
                self.pool.recycle(node.id());
            }
            self.count += 1;

            if node.has_children() {
                if expanded {
                    self.visit(node.children(), depth + 1);
                } else {
                    self.recycle_children(node);
                }
            }
        }
    }

    fn update_row(&mut self, node: &TreeNode, depth: usize, expanded: bool) {
        let mut flags = RowFlags::empty();
        flags.set(RowFlags::HAS_CHILDREN, node.has_children());
        flags.set(RowFlags::EXPANDED, expanded);
        flags.set(RowFlags::SELECTED, self.selected == Some(node.id()));

        let width = self.config.row_width();
        let position = self
            .config
            .row_position(self.count, depth, self.scroll_offset);
        let row = self.pool.acquire(node.id());
        row.set_visual_state(width, depth, flags);
        row.set_position(position);
        self.rendered.insert(node.id());
    }

    fn recycle_children(&mut self, node: &TreeNode) {
        for child in node.children().iter() {
            self.pool.recycle(child.id());
            self.recycle_children(child);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::tests::{TestRow, test_pool};
    use alloc::vec::Vec;

    fn unit() -> ListViewConfig {
        ListViewConfig {
            row_extent: 1.0,
            view_extent: 5.0,
            width: 4.0,
            indent: 1.0,
            clip_margin: 0.0,
        }
    }

    fn flat(n: i64) -> Vec<TreeNode> {
        (0..n).map(|i| TreeNode::leaf(NodeId(i), "row")).collect()
    }

    fn bound(pool: &RowPool<fn() -> TestRow>) -> Vec<i64> {
        pool.bound_ids().map(|id| id.0).collect()
    }

    #[test]
    fn flat_window_binds_exact_range() {
        let cfg = unit();
        let data = flat(10);
        let mut pool = test_pool();
        let mut expand = ExpandState::new();

        for (first, expected) in [
            (0, [0, 1, 2, 3, 4]),
            (3, [3, 4, 5, 6, 7]),
            (5, [5, 6, 7, 8, 9]),
        ] {
            let window = RowWindow::from_first_row(first, 5);
            let stats = RenderPass::new(&mut pool, &mut expand, &cfg, window).run(&data);
            assert_eq!(bound(&pool), expected, "first row {first}");
            assert_eq!(stats.rows, 10);
            assert_eq!(stats.bound, 5);
        }
        assert_eq!(pool.created(), 5, "scrolling reuses rows");
    }

    #[test]
    fn window_past_the_end_binds_tail_only() {
        let cfg = unit();
        let data = flat(10);
        let mut pool = test_pool();
        let mut expand = ExpandState::new();
        let window = RowWindow::from_first_row(8, 5);
        RenderPass::new(&mut pool, &mut expand, &cfg, window).run(&data);
        assert_eq!(bound(&pool), [8, 9]);
    }

    #[test]
    fn scrolled_above_the_top_leaves_leading_slots_empty() {
        let cfg = unit();
        let data = flat(10);
        let mut pool = test_pool();
        let mut expand = ExpandState::new();
        let mut pass = RenderPass::new(&mut pool, &mut expand, &cfg, RowWindow::new(5, 2));
        pass.scroll_offset = 2.0;
        let stats = pass.run(&data);
        assert_eq!(bound(&pool), [0, 1, 2]);
        assert_eq!(stats.rows, 10);
        assert_eq!(pool.row(NodeId(0)).unwrap().position.y, 2.0);
        assert_eq!(pool.row(NodeId(2)).unwrap().position.y, 4.0);
    }

    #[test]
    fn zero_capacity_recycles_everything() {
        let cfg = unit();
        let data = flat(3);
        let mut pool = test_pool();
        let mut expand = ExpandState::new();
        RenderPass::new(&mut pool, &mut expand, &cfg, RowWindow::new(3, 0)).run(&data);
        assert_eq!(pool.active_len(), 3);
        let stats = RenderPass::new(&mut pool, &mut expand, &cfg, RowWindow::new(0, 0)).run(&data);
        assert_eq!(stats.rows, 3, "rows are still counted");
        assert_eq!(stats.bound, 0);
        assert_eq!(pool.active_len(), 0);
        assert_eq!(pool.free_len(), 3);
    }

    #[test]
    fn empty_tree_is_a_no_op() {
        let cfg = unit();
        let mut pool = test_pool();
        let mut expand = ExpandState::new();
        let stats = RenderPass::new(&mut pool, &mut expand, &cfg, RowWindow::new(5, 0)).run(&[]);
        assert_eq!(stats, RenderStats::default());
        assert_eq!(pool.created(), 0);
        assert!(expand.is_empty());
    }

    #[test]
    fn expanded_children_follow_their_parent() {
        let cfg = unit();
        let data = [
            TreeNode::new(
                NodeId(1),
                "a",
                [TreeNode::leaf(NodeId(2), "a.1"), TreeNode::leaf(NodeId(3), "a.2")].to_vec(),
            ),
            TreeNode::leaf(NodeId(4), "b"),
        ];
        let mut pool = test_pool();
        let mut expand = ExpandState::new();
        expand.set(NodeId(1), true);
        let stats = RenderPass::new(&mut pool, &mut expand, &cfg, RowWindow::new(5, 0)).run(&data);
        assert_eq!(stats.rows, 4);

        let row = |id| pool.row(NodeId(id)).unwrap().clone();
        assert_eq!(row(1).position.y, 0.0);
        assert_eq!(row(2).position.y, 1.0);
        assert_eq!(row(3).position.y, 2.0);
        assert_eq!(row(4).position.y, 3.0);
        assert_eq!(row(2).position.x, 1.0, "children are indented");
        assert_eq!(row(2).depth, 1);
        assert!(row(1).flags.contains(RowFlags::HAS_CHILDREN | RowFlags::EXPANDED));
        assert!(row(4).flags.is_empty());
    }
}
