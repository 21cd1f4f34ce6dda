// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Traversal cursors over an external hierarchy.
//!
//! ## Protocol
//!
//! A [`HierarchyCursor`] walks the host's hierarchy in depth-first pre-order.
//! After [`reset`](HierarchyCursor::reset) it sits before the first node; each
//! [`next`](HierarchyCursor::next) moves to the following node and returns `false` at the end.
//! [`previous`](HierarchyCursor::previous) steps back one node, which lets a reader peek at a
//! sibling boundary without consuming it.
//!
//! The accessors (`id`, `name`, `has_children`, `depth`) describe the current node and are
//! only meaningful after `next` returned `true`.

use alloc::string::String;
use alloc::vec::Vec;

use crate::types::{NodeId, TreeNode};

/// Stateful pre-order cursor over an external hierarchy.
pub trait HierarchyCursor {
    /// Id of the current node.
    fn id(&self) -> NodeId;

    /// Name of the current node.
    fn name(&self) -> &str;

    /// Whether the current node has at least one child.
    fn has_children(&self) -> bool;

    /// Depth of the current node. Top-level nodes have depth `0`.
    fn depth(&self) -> usize;

    /// Advance to the next node. Returns `false` at end of traversal.
    fn next(&mut self) -> bool;

    /// Step back to the previous node. Returns `false` when moving before the first node.
    fn previous(&mut self) -> bool;

    /// Rewind to before the first node.
    fn reset(&mut self);
}

impl<C: HierarchyCursor + ?Sized> HierarchyCursor for &mut C {
    fn id(&self) -> NodeId {
        (**self).id()
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn has_children(&self) -> bool {
        (**self).has_children()
    }

    fn depth(&self) -> usize {
        (**self).depth()
    }

    fn next(&mut self) -> bool {
        (**self).next()
    }

    fn previous(&mut self) -> bool {
        (**self).previous()
    }

    fn reset(&mut self) {
        (**self).reset();
    }
}

/// One pre-order record of a [`FlatCursor`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlatEntry {
    /// Host id.
    pub id: NodeId,
    /// Display name.
    pub name: String,
    /// Depth, `0` for top-level nodes.
    pub depth: usize,
}

/// In-memory cursor over a pre-order list of `(id, name, depth)` records.
///
/// `has_children` is derived: a record has children when the next record is deeper.
/// Hosts that can flatten their scene cheaply can feed this directly; tests use it
/// to simulate edits between refreshes.
#[derive(Clone, Debug, Default)]
pub struct FlatCursor {
    entries: Vec<FlatEntry>,
    // 0 = before the first entry, i + 1 = at entry i, len + 1 = past the end.
    pos: usize,
}

impl FlatCursor {
    /// Create an empty cursor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cursor over `entries`, which must already be in pre-order.
    pub fn from_entries(entries: Vec<FlatEntry>) -> Self {
        Self { entries, pos: 0 }
    }

    /// Flatten a nested tree into a cursor, top-level nodes at depth `0`.
    pub fn from_tree(roots: &[TreeNode]) -> Self {
        fn walk(nodes: &[TreeNode], depth: usize, out: &mut Vec<FlatEntry>) {
            for n in nodes {
                out.push(FlatEntry {
                    id: n.id(),
                    name: String::from(n.name()),
                    depth,
                });
                walk(n.children(), depth + 1, out);
            }
        }
        let mut entries = Vec::new();
        walk(roots, 0, &mut entries);
        Self::from_entries(entries)
    }

    /// Append a record. Returns `self` for chaining.
    pub fn push(&mut self, id: i64, name: &str, depth: usize) -> &mut Self {
        self.entries.push(FlatEntry {
            id: NodeId(id),
            name: String::from(name),
            depth,
        });
        self
    }

    /// Records in pre-order.
    pub fn entries(&self) -> &[FlatEntry] {
        &self.entries
    }

    /// Mutable access to the records, for simulating hierarchy edits.
    ///
    /// The cursor is rewound since positions may no longer be valid.
    pub fn entries_mut(&mut self) -> &mut Vec<FlatEntry> {
        self.pos = 0;
        &mut self.entries
    }

    /// Rename every record carrying `id`. Returns whether any record matched.
    pub fn rename(&mut self, id: NodeId, name: &str) -> bool {
        let mut hit = false;
        for e in self.entries.iter_mut().filter(|e| e.id == id) {
            e.name = String::from(name);
            hit = true;
        }
        hit
    }

    fn current(&self) -> Option<&FlatEntry> {
        self.pos.checked_sub(1).and_then(|i| self.entries.get(i))
    }
}

impl HierarchyCursor for FlatCursor {
    fn id(&self) -> NodeId {
        self.current().map(|e| e.id).unwrap_or(NodeId(0))
    }

    fn name(&self) -> &str {
        self.current().map(|e| e.name.as_str()).unwrap_or("")
    }

    fn has_children(&self) -> bool {
        match (self.current(), self.entries.get(self.pos)) {
            (Some(cur), Some(next)) => next.depth > cur.depth,
            _ => false,
        }
    }

    fn depth(&self) -> usize {
        self.current().map(|e| e.depth).unwrap_or(0)
    }

    fn next(&mut self) -> bool {
        if self.pos < self.entries.len() {
            self.pos += 1;
            true
        } else {
            self.pos = self.entries.len() + 1;
            false
        }
    }

    fn previous(&mut self) -> bool {
        let at = self.pos.min(self.entries.len() + 1);
        if at > 1 {
            self.pos = at - 1;
            true
        } else {
            self.pos = 0;
            false
        }
    }

    fn reset(&mut self) {
        self.pos = 0;
    }
}
