// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-node expand/collapse flags.

use alloc::collections::BTreeMap;

use understory_hierarchy::NodeId;

/// Expand/collapse flags keyed by node id.
///
/// Entries are created lazily (collapsed) the first time a node is rendered or touched and
/// are never removed, so a node that disappears and comes back keeps its state. The map is
/// bounded by the number of ids the host ever hands out.
#[derive(Clone, Debug, Default)]
pub struct ExpandState {
    states: BTreeMap<NodeId, bool>,
}

impl ExpandState {
    /// Create an empty state map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current flag for `id`, creating a collapsed entry if none exists.
    pub fn entry(&mut self, id: NodeId) -> bool {
        *self.states.entry(id).or_insert(false)
    }

    /// Current flag for `id` without creating an entry. Unknown ids are collapsed.
    pub fn is_expanded(&self, id: NodeId) -> bool {
        self.states.get(&id).copied().unwrap_or(false)
    }

    /// Whether an entry exists for `id`.
    pub fn contains(&self, id: NodeId) -> bool {
        self.states.contains_key(&id)
    }

    /// Set the flag for `id`.
    pub fn set(&mut self, id: NodeId, expanded: bool) {
        self.states.insert(id, expanded);
    }

    /// Flip the flag for `id` and return the new value. Unknown ids start collapsed.
    pub fn toggle(&mut self, id: NodeId) -> bool {
        let flag = self.states.entry(id).or_insert(false);
        *flag = !*flag;
        *flag
    }

    /// Number of tracked ids.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// True if no id has been tracked yet.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Ids currently expanded, in ascending order.
    pub fn expanded_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.states
            .iter()
            .filter_map(|(id, &expanded)| expanded.then_some(*id))
    }
}
