// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cached snapshot of an external hierarchy, refreshed by an incremental diff.
//!
//! ## Matching
//!
//! [`HierarchySnapshot::update`] walks the cursor in lock-step with the cached tree.
//! Children are matched by position: the child at index `i` is reused only when the
//! cursor's node at index `i` carries the same id. Inserting or removing a sibling
//! therefore rebuilds every following sibling at that depth, and swapping two siblings
//! rebuilds both. This is a known limitation; reordering is treated as a data change.
//!
//! ## Sharing
//!
//! Unchanged subtrees keep their allocation across updates (see [`Children::ptr_eq`]).
//! Nodes on the path to a change are rebuilt shallowly, so a consumer still holding an
//! older [`Children`] keeps a consistent view of the previous snapshot.

use alloc::rc::Rc;
use alloc::vec::Vec;

use tracing::trace;

use crate::cursor::HierarchyCursor;
use crate::types::{Children, NodeId, TreeNode};

/// Walk state threaded through one update.
struct Walk {
    has_next: bool,
    changed: bool,
}

/// Cached tree mirroring an external hierarchy.
///
/// The snapshot root is virtual: its children are the top-level (depth `0`) nodes of the
/// traversal.
#[derive(Clone, Debug, Default)]
pub struct HierarchySnapshot {
    roots: Children,
    built: bool,
    hidden: Option<NodeId>,
}

impl HierarchySnapshot {
    /// Create an empty snapshot. The first [`update`](Self::update) is a full build.
    pub fn new() -> Self {
        Self::default()
    }

    /// Designate a node whose descendants must never appear in the snapshot.
    ///
    /// This is typically the tool's own representation inside the scene. The node itself
    /// stays visible as a leaf, with its own id and name.
    pub fn set_hidden(&mut self, id: Option<NodeId>) {
        self.hidden = id;
    }

    /// The hidden node, if any.
    pub fn hidden(&self) -> Option<NodeId> {
        self.hidden
    }

    /// Top-level nodes of the last update. Empty before the first update.
    pub fn roots(&self) -> &Children {
        &self.roots
    }

    /// Whether [`update`](Self::update) has run at least once.
    pub fn is_built(&self) -> bool {
        self.built
    }

    /// Refresh from `cursor` and return the new top-level list plus whether anything changed.
    ///
    /// The cursor is reset first. Calling this twice with no external change returns
    /// `changed == false` the second time and leaves every allocation shared.
    pub fn update<C: HierarchyCursor + ?Sized>(&mut self, cursor: &mut C) -> (Children, bool) {
        cursor.reset();
        let mut walk = Walk {
            has_next: cursor.next(),
            changed: !self.built,
        };
        let roots = self.collect_children(cursor, None, &self.roots, &mut walk);
        self.roots = roots;
        self.built = true;
        trace!(changed = walk.changed, roots = self.roots.len(), "snapshot updated");
        (self.roots.clone(), walk.changed)
    }

    /// Collect the children of the node at `parent_depth` (or the top level for `None`).
    ///
    /// On entry the cursor sits on the first candidate child. On exit it sits on the last
    /// node consumed, unless the traversal ended.
    fn collect_children<C: HierarchyCursor + ?Sized>(
        &self,
        cursor: &mut C,
        parent_depth: Option<usize>,
        cached: &Children,
        walk: &mut Walk,
    ) -> Children {
        let prior = cached.as_slice();
        // Allocated at the first divergence from `prior`.
        let mut fresh: Option<Vec<TreeNode>> = None;
        let mut i = 0;
        while walk.has_next && parent_depth.is_none_or(|d| cursor.depth() > d) {
            let reuse = prior.get(i).filter(|p| p.id == cursor.id());
            if reuse.is_none() {
                walk.changed = true;
            }
            let node = self.collect_node(cursor, reuse, walk);
            if let Some(list) = fresh.as_mut() {
                list.push(node);
            } else if !reuse.is_some_and(|p| p.is_shared_with(&node)) {
                let mut list = Vec::with_capacity(prior.len().max(i + 1));
                list.extend_from_slice(&prior[..i]);
                list.push(node);
                fresh = Some(list);
            }
            if walk.has_next {
                walk.has_next = cursor.next();
            }
            i += 1;
        }

        if i < prior.len() {
            walk.changed = true;
            fresh.get_or_insert_with(|| prior[..i].to_vec());
        }

        // Leave the boundary node for the parent level to read.
        if walk.has_next && parent_depth.is_some() {
            cursor.previous();
        }

        match fresh {
            Some(list) => Children::from(list),
            None => cached.clone(),
        }
    }

    /// Collect the node under the cursor, reusing `cached` where possible.
    fn collect_node<C: HierarchyCursor + ?Sized>(
        &self,
        cursor: &mut C,
        cached: Option<&TreeNode>,
        walk: &mut Walk,
    ) -> TreeNode {
        let id = cursor.id();
        let depth = cursor.depth();
        let name = match cached {
            Some(prior) if *prior.name == *cursor.name() => prior.name.clone(),
            _ => {
                walk.changed = true;
                Rc::from(cursor.name())
            }
        };
        let cached_children = cached.map(|p| &p.children);

        let children = if self.hidden == Some(id) {
            skip_descendants(cursor, depth, walk);
            Children::empty()
        } else if cursor.has_children() {
            walk.has_next = cursor.next();
            let empty = Children::empty();
            self.collect_children(
                cursor,
                Some(depth),
                cached_children.unwrap_or(&empty),
                walk,
            )
        } else {
            Children::empty()
        };

        if children.is_empty() && cached_children.is_some_and(|c| !c.is_empty()) {
            walk.changed = true;
        }

        TreeNode { id, name, children }
    }
}

/// Advance past every descendant of the node at `depth`, leaving the cursor on the last one.
fn skip_descendants<C: HierarchyCursor + ?Sized>(cursor: &mut C, depth: usize, walk: &mut Walk) {
    if !cursor.has_children() {
        return;
    }
    loop {
        walk.has_next = cursor.next();
        if !walk.has_next || cursor.depth() <= depth {
            break;
        }
    }
    if walk.has_next {
        cursor.previous();
    }
}
