// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Row widgets and their recycling pool.
//!
//! ## Binding rules
//!
//! - A row is bound to at most one node id at a time.
//! - The pool holds at most one active row per id, so two rows never show the same node.
//! - Recycled rows are unbound and kept for reuse; the factory is only called when the free
//!   list is empty.

use alloc::collections::BTreeMap;
use alloc::collections::btree_map::Entry;
use alloc::vec::Vec;
use core::fmt;

use kurbo::Point;
use tracing::trace;
use understory_hierarchy::NodeId;

use crate::types::RowFlags;

/// A pooled visual row.
pub trait RowWidget {
    /// Associate the row with a node.
    fn bind(&mut self, id: NodeId);

    /// Drop the node association and hide the row.
    fn unbind(&mut self);

    /// Update size, indentation and state flags.
    fn set_visual_state(&mut self, width: f64, depth: usize, flags: RowFlags);

    /// Move the row. `x` carries the indentation, `y` the row offset.
    fn set_position(&mut self, position: Point);
}

/// Source of new rows for a [`RowPool`].
pub trait RowFactory {
    /// Row type produced.
    type Row: RowWidget;

    /// Construct a new, unbound row.
    fn create(&mut self) -> Self::Row;
}

impl<W: RowWidget, F: FnMut() -> W> RowFactory for F {
    type Row = W;

    fn create(&mut self) -> W {
        self()
    }
}

/// Rows keyed by the node they are bound to, plus a free list.
pub struct RowPool<F: RowFactory> {
    factory: F,
    active: BTreeMap<NodeId, F::Row>,
    free: Vec<F::Row>,
    created: usize,
}

impl<F: RowFactory> fmt::Debug for RowPool<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowPool")
            .field("active", &self.active.len())
            .field("free", &self.free.len())
            .field("created", &self.created)
            .finish_non_exhaustive()
    }
}

impl<F: RowFactory> RowPool<F> {
    /// Create an empty pool. Rows are created lazily.
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            active: BTreeMap::new(),
            free: Vec::new(),
            created: 0,
        }
    }

    /// The row bound to `id`, binding a free or freshly created row if necessary.
    pub fn acquire(&mut self, id: NodeId) -> &mut F::Row {
        match self.active.entry(id) {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(e) => {
                let mut row = match self.free.pop() {
                    Some(row) => row,
                    None => {
                        self.created += 1;
                        trace!(node = id.0, created = self.created, "allocating row");
                        self.factory.create()
                    }
                };
                row.bind(id);
                e.insert(row)
            }
        }
    }

    /// Unbind the row showing `id` and return it to the free list.
    ///
    /// Returns `false` if no row was bound to `id`.
    pub fn recycle(&mut self, id: NodeId) -> bool {
        match self.active.remove(&id) {
            Some(mut row) => {
                row.unbind();
                self.free.push(row);
                true
            }
            None => false,
        }
    }

    /// Recycle every row whose id fails `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(NodeId) -> bool) {
        let stale: Vec<NodeId> = self
            .active
            .keys()
            .copied()
            .filter(|id| !keep(*id))
            .collect();
        for id in stale {
            self.recycle(id);
        }
    }

    /// Recycle every active row.
    pub fn recycle_all(&mut self) {
        self.retain(|_| false);
    }

    /// The row bound to `id`, if any.
    pub fn row(&self, id: NodeId) -> Option<&F::Row> {
        self.active.get(&id)
    }

    /// Whether a row is bound to `id`.
    pub fn is_bound(&self, id: NodeId) -> bool {
        self.active.contains_key(&id)
    }

    /// Ids with a bound row, ascending.
    pub fn bound_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.active.keys().copied()
    }

    /// Bound rows with their ids, ascending by id.
    pub fn rows(&self) -> impl Iterator<Item = (NodeId, &F::Row)> + '_ {
        self.active.iter().map(|(id, row)| (*id, row))
    }

    /// Number of bound rows.
    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    /// Number of pooled, unbound rows.
    pub fn free_len(&self) -> usize {
        self.free.len()
    }

    /// Total rows ever created by the factory.
    pub fn created(&self) -> usize {
        self.created
    }
}
