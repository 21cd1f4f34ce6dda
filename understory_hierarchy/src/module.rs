// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Consumer fan-out for hierarchy snapshots.
//!
//! [`HierarchyModule`] owns the host cursor and the cached [`HierarchySnapshot`]. The host
//! calls [`HierarchyModule::hierarchy_changed`] from its "hierarchy changed" notification;
//! when the refresh reports a change, every registered [`HierarchyConsumer`] receives the new
//! top-level list synchronously, in registration order.
//!
//! Notifications are only honored while the module is running (see
//! [`Lifecycle`](understory_plugin::Lifecycle)).

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use tracing::{debug, trace};
use understory_plugin::Lifecycle;

use crate::cursor::HierarchyCursor;
use crate::snapshot::HierarchySnapshot;
use crate::types::{Children, NodeId};

/// Receives the top-level node list whenever the snapshot changes.
///
/// The list is shared with the module and other consumers; it is never mutated in place,
/// so it stays valid until the consumer drops it.
pub trait HierarchyConsumer {
    /// Replace the consumer's view of the hierarchy.
    fn set_hierarchy_data(&mut self, data: Children);
}

impl<T: HierarchyConsumer + ?Sized> HierarchyConsumer for Box<T> {
    fn set_hierarchy_data(&mut self, data: Children) {
        (**self).set_hierarchy_data(data);
    }
}

impl<T: HierarchyConsumer + ?Sized> HierarchyConsumer for Rc<RefCell<T>> {
    fn set_hierarchy_data(&mut self, data: Children) {
        self.borrow_mut().set_hierarchy_data(data);
    }
}

/// Handle returned by [`HierarchyModule::add_consumer`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ConsumerId(u32);

/// Snapshot owner and consumer registry.
pub struct HierarchyModule<C> {
    cursor: C,
    snapshot: HierarchySnapshot,
    consumers: Vec<(ConsumerId, Box<dyn HierarchyConsumer>)>,
    next_consumer: u32,
    running: bool,
}

impl<C> fmt::Debug for HierarchyModule<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HierarchyModule")
            .field("snapshot", &self.snapshot)
            .field("consumers", &self.consumers.len())
            .field("running", &self.running)
            .finish_non_exhaustive()
    }
}

impl<C: HierarchyCursor> HierarchyModule<C> {
    /// Create a stopped module reading from `cursor`. No traversal happens until
    /// [`start`](Lifecycle::start) or [`refresh`](Self::refresh).
    pub fn new(cursor: C) -> Self {
        Self {
            cursor,
            snapshot: HierarchySnapshot::new(),
            consumers: Vec::new(),
            next_consumer: 0,
            running: false,
        }
    }

    /// Hide the descendants of `id` (usually the tool's own scene object).
    pub fn with_hidden(mut self, id: NodeId) -> Self {
        self.snapshot.set_hidden(Some(id));
        self
    }

    /// Register a consumer. It immediately receives the current data, which is an empty
    /// list if no snapshot has been built yet.
    pub fn add_consumer(&mut self, consumer: impl HierarchyConsumer + 'static) -> ConsumerId {
        let mut consumer: Box<dyn HierarchyConsumer> = Box::new(consumer);
        consumer.set_hierarchy_data(self.data());
        let id = ConsumerId(self.next_consumer);
        self.next_consumer = self.next_consumer.wrapping_add(1);
        self.consumers.push((id, consumer));
        trace!(consumer = id.0, "hierarchy consumer added");
        id
    }

    /// Stop delivering to `id`. Returns `false` if it was not registered.
    pub fn remove_consumer(&mut self, id: ConsumerId) -> bool {
        let before = self.consumers.len();
        self.consumers.retain(|(cid, _)| *cid != id);
        let removed = self.consumers.len() != before;
        trace!(consumer = id.0, removed, "hierarchy consumer removed");
        removed
    }

    /// Number of registered consumers.
    pub fn consumer_count(&self) -> usize {
        self.consumers.len()
    }

    /// Current top-level nodes; empty before the first refresh.
    pub fn data(&self) -> Children {
        self.snapshot.roots().clone()
    }

    /// The cached snapshot.
    pub fn snapshot(&self) -> &HierarchySnapshot {
        &self.snapshot
    }

    /// The host cursor.
    pub fn cursor(&self) -> &C {
        &self.cursor
    }

    /// Mutable access to the host cursor, e.g. to edit an in-memory source.
    pub fn cursor_mut(&mut self) -> &mut C {
        &mut self.cursor
    }

    /// Notification entry point for "the external hierarchy changed".
    ///
    /// Ignored while stopped. Returns whether consumers were notified.
    pub fn hierarchy_changed(&mut self) -> bool {
        if !self.running {
            trace!("hierarchy change ignored while stopped");
            return false;
        }
        self.refresh()
    }

    /// Diff the source against the snapshot and push to consumers if anything changed.
    pub fn refresh(&mut self) -> bool {
        let (roots, changed) = self.snapshot.update(&mut self.cursor);
        debug!(changed, roots = roots.len(), "hierarchy refreshed");
        if changed {
            for (id, consumer) in &mut self.consumers {
                trace!(consumer = id.0, "delivering hierarchy");
                consumer.set_hierarchy_data(roots.clone());
            }
        }
        changed
    }
}

impl<C: HierarchyCursor> Lifecycle for HierarchyModule<C> {
    fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        debug!("hierarchy module started");
        self.refresh();
    }

    fn stop(&mut self) {
        if self.running {
            self.running = false;
            debug!("hierarchy module stopped");
        }
    }

    fn is_running(&self) -> bool {
        self.running
    }
}
