// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ancestor expansion and scroll-to-row.
//!
//! These work directly on a tree and an [`ExpandState`], so a host can use them without a
//! [`HierarchyListView`](crate::HierarchyListView).

use understory_hierarchy::{NodeId, TreeNode};

use crate::expand::ExpandState;

/// Expand every ancestor of `target` found under `nodes`.
///
/// The walk is post-order. `target` itself is left as it was, and nodes off the path to it
/// are not touched. Returns whether `target` was found.
pub fn expand_to_row(nodes: &[TreeNode], target: NodeId, expand: &mut ExpandState) -> bool {
    let mut found = false;
    for node in nodes {
        if node.id() == target {
            found = true;
        } else if expand_to_row(node.children(), target, expand) {
            expand.set(node.id(), true);
            found = true;
        }
    }
    found
}

/// Offset along the scroll axis of the row showing `target`.
///
/// Only rows that are on screen under `expand` are counted, so the result is the row's
/// display index times `row_extent`. Returns `None` if `target` is not reachable.
pub fn row_offset(
    nodes: &[TreeNode],
    target: NodeId,
    expand: &ExpandState,
    row_extent: f64,
) -> Option<f64> {
    let mut index = 0_usize;
    find_row(nodes, target, expand, &mut index).then(|| index as f64 * row_extent)
}

fn find_row(nodes: &[TreeNode], target: NodeId, expand: &ExpandState, index: &mut usize) -> bool {
    for node in nodes {
        if node.id() == target {
            return true;
        }
        *index += 1;
        if expand.is_expanded(node.id()) && find_row(node.children(), target, expand, index) {
            return true;
        }
    }
    false
}

/// Scroll offset that brings a row at `offset` into view.
///
/// Returns `None` if the row is already visible, otherwise the offset that puts the row at
/// the top edge.
pub fn scroll_to_reveal(scroll_offset: f64, offset: f64, view_extent: f64) -> Option<f64> {
    let top = -scroll_offset;
    if offset < top || offset > top + view_extent {
        Some(-offset)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    // 1
    // ├─ 2
    // │  └─ 3
    // │     └─ 4
    // └─ 5
    //    └─ 6
    // 7
    fn tree() -> Vec<TreeNode> {
        vec![
            TreeNode::new(
                NodeId(1),
                "1",
                vec![
                    TreeNode::new(
                        NodeId(2),
                        "2",
                        vec![TreeNode::new(
                            NodeId(3),
                            "3",
                            vec![TreeNode::leaf(NodeId(4), "4")],
                        )],
                    ),
                    TreeNode::new(NodeId(5), "5", vec![TreeNode::leaf(NodeId(6), "6")]),
                ],
            ),
            TreeNode::leaf(NodeId(7), "7"),
        ]
    }

    #[test]
    fn expands_ancestors_only() {
        let data = tree();
        let mut expand = ExpandState::new();
        assert!(expand_to_row(&data, NodeId(4), &mut expand));
        let ids: Vec<_> = expand.expanded_ids().collect();
        assert_eq!(ids, [NodeId(1), NodeId(2), NodeId(3)]);
        assert!(!expand.contains(NodeId(5)), "siblings off the path are untouched");
    }

    #[test]
    fn target_keeps_its_own_state() {
        let data = tree();
        let mut expand = ExpandState::new();
        assert!(expand_to_row(&data, NodeId(2), &mut expand));
        assert!(expand.is_expanded(NodeId(1)));
        assert!(!expand.is_expanded(NodeId(2)));
    }

    #[test]
    fn unknown_target_changes_nothing() {
        let data = tree();
        let mut expand = ExpandState::new();
        assert!(!expand_to_row(&data, NodeId(99), &mut expand));
        assert!(expand.is_empty());
        assert_eq!(row_offset(&data, NodeId(99), &expand, 1.0), None);
    }

    #[test]
    fn offset_counts_visible_rows_only() {
        let data = tree();
        let mut expand = ExpandState::new();
        // Everything collapsed: 1, 7.
        assert_eq!(row_offset(&data, NodeId(7), &expand, 2.0), Some(2.0));
        // 1 expanded: 1, 2, 5, 7.
        expand.set(NodeId(1), true);
        assert_eq!(row_offset(&data, NodeId(5), &expand, 2.0), Some(4.0));
        assert_eq!(row_offset(&data, NodeId(7), &expand, 2.0), Some(6.0));
        // Hidden under a collapsed node.
        assert_eq!(row_offset(&data, NodeId(4), &expand, 2.0), None);
        expand_to_row(&data, NodeId(4), &mut expand);
        assert_eq!(row_offset(&data, NodeId(4), &expand, 1.0), Some(3.0));
    }

    #[test]
    fn reveal_snaps_to_top_edge() {
        // Already visible, including both edges.
        assert_eq!(scroll_to_reveal(-10.0, 10.0, 5.0), None);
        assert_eq!(scroll_to_reveal(-10.0, 15.0, 5.0), None);
        assert_eq!(scroll_to_reveal(-10.0, 12.0, 5.0), None);
        // Below and above the view.
        assert_eq!(scroll_to_reveal(-10.0, 30.0, 5.0), Some(-30.0));
        assert_eq!(scroll_to_reveal(-10.0, 4.0, 5.0), Some(-4.0));
    }
}
