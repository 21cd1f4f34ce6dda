// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for hierarchy snapshots: node identifiers, nodes, and shared child lists.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::fmt;
use core::ops::Deref;

/// Identifier of a node in the external hierarchy.
///
/// Ids are assigned by the host and are expected to be unique within one traversal.
/// The same id seen in a later traversal denotes the same logical node.
/// Hosts commonly hand out negative ids, so the payload is signed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub i64);

/// One node of a hierarchy snapshot.
///
/// Nodes are immutable once published. A later snapshot either shares a node's
/// subtree (when nothing below it changed) or contains a rebuilt copy.
#[derive(Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub(crate) id: NodeId,
    pub(crate) name: Rc<str>,
    pub(crate) children: Children,
}

impl TreeNode {
    /// Build a node by hand. Mostly useful for tests and static data.
    pub fn new(id: NodeId, name: &str, children: impl Into<Children>) -> Self {
        Self {
            id,
            name: Rc::from(name),
            children: children.into(),
        }
    }

    /// Build a node without children.
    pub fn leaf(id: NodeId, name: &str) -> Self {
        Self::new(id, name, Children::empty())
    }

    /// Host identifier.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ordered children. Empty exactly when the source reported none.
    pub fn children(&self) -> &Children {
        &self.children
    }

    /// Shorthand for `!self.children().is_empty()`.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(Self::subtree_len).sum::<usize>()
    }

    /// True if `other` is this node without any rebuild: same id, and the very same
    /// name and child allocations.
    pub(crate) fn is_shared_with(&self, other: &Self) -> bool {
        self.id == other.id
            && Rc::ptr_eq(&self.name, &other.name)
            && self.children.ptr_eq(&other.children)
    }
}

impl fmt::Debug for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("TreeNode");
        s.field("id", &self.id.0).field("name", &&*self.name);
        if !self.children.is_empty() {
            s.field("children", &self.children);
        }
        s.finish()
    }
}

/// A shared, ordered list of [`TreeNode`]s.
///
/// Cloning copies the reference, not the nodes. An empty list never allocates,
/// so "no children" has exactly one representation.
#[derive(Clone, Default)]
pub struct Children(Option<Rc<[TreeNode]>>);

impl Children {
    /// The empty list.
    pub const fn empty() -> Self {
        Self(None)
    }

    /// Borrow the nodes.
    pub fn as_slice(&self) -> &[TreeNode] {
        self.0.as_deref().unwrap_or(&[])
    }

    /// True if both lists are the same allocation (or both empty).
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl Deref for Children {
    type Target = [TreeNode];

    fn deref(&self) -> &[TreeNode] {
        self.as_slice()
    }
}

impl From<Vec<TreeNode>> for Children {
    fn from(nodes: Vec<TreeNode>) -> Self {
        if nodes.is_empty() {
            Self(None)
        } else {
            Self(Some(Rc::from(nodes)))
        }
    }
}

impl PartialEq for Children {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.as_slice() == other.as_slice()
    }
}

impl Eq for Children {}

impl fmt::Debug for Children {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn empty_children_have_one_representation() {
        let a = Children::from(Vec::new());
        let b = Children::empty();
        assert!(a.ptr_eq(&b));
        assert!(a.is_empty());
        assert_eq!(a.as_slice().len(), 0);
    }

    #[test]
    fn clone_shares_allocation() {
        let kids = Children::from(vec![TreeNode::leaf(NodeId(1), "a")]);
        let copy = kids.clone();
        assert!(kids.ptr_eq(&copy));
        let rebuilt = Children::from(vec![TreeNode::leaf(NodeId(1), "a")]);
        assert!(!kids.ptr_eq(&rebuilt));
        assert_eq!(kids, rebuilt, "structural equality ignores allocation");
    }

    #[test]
    fn subtree_len_counts_descendants() {
        let n = TreeNode::new(
            NodeId(1),
            "root",
            vec![
                TreeNode::leaf(NodeId(2), "a"),
                TreeNode::new(NodeId(3), "b", vec![TreeNode::leaf(NodeId(4), "c")]),
            ],
        );
        assert_eq!(n.subtree_len(), 4);
        assert!(n.has_children());
        assert_eq!(n.children()[1].name(), "b");
    }
}
