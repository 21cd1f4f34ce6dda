// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Explicit start/stop lifecycles.
//!
//! Components that would otherwise hook global editor events subscribe in
//! [`Lifecycle::start`] and unsubscribe in [`Lifecycle::stop`]. Whatever owns the
//! process loop drives these calls; nothing starts implicitly.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use tracing::debug;

/// A component with an explicit enable/disable lifecycle.
///
/// Implementations should make both calls idempotent.
pub trait Lifecycle {
    /// Enable the component (subscribe to notifications, do initial work).
    fn start(&mut self);

    /// Disable the component (unsubscribe). No notifications are handled after this.
    fn stop(&mut self);

    /// Whether the component is between `start` and `stop`.
    fn is_running(&self) -> bool;
}

impl<T: Lifecycle + ?Sized> Lifecycle for Box<T> {
    fn start(&mut self) {
        (**self).start();
    }

    fn stop(&mut self) {
        (**self).stop();
    }

    fn is_running(&self) -> bool {
        (**self).is_running()
    }
}

/// Shared components can be owned by the host and driven by a [`LifecycleGroup`].
impl<T: Lifecycle + ?Sized> Lifecycle for Rc<RefCell<T>> {
    fn start(&mut self) {
        self.borrow_mut().start();
    }

    fn stop(&mut self) {
        self.borrow_mut().stop();
    }

    fn is_running(&self) -> bool {
        self.borrow().is_running()
    }
}

/// An ordered set of components started front-to-back and stopped back-to-front.
#[derive(Default)]
pub struct LifecycleGroup {
    members: Vec<Box<dyn Lifecycle>>,
    running: bool,
}

impl fmt::Debug for LifecycleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleGroup")
            .field("members", &self.members.len())
            .field("running", &self.running)
            .finish()
    }
}

impl LifecycleGroup {
    /// Create an empty, stopped group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a member. If the group is already running, the member is started now.
    pub fn push(&mut self, mut member: Box<dyn Lifecycle>) {
        if self.running && !member.is_running() {
            member.start();
        }
        self.members.push(member);
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True if the group has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl Lifecycle for LifecycleGroup {
    fn start(&mut self) {
        if self.running {
            return;
        }
        debug!(members = self.members.len(), "starting lifecycle group");
        for m in &mut self.members {
            if !m.is_running() {
                m.start();
            }
        }
        self.running = true;
    }

    fn stop(&mut self) {
        if !self.running {
            return;
        }
        debug!(members = self.members.len(), "stopping lifecycle group");
        for m in self.members.iter_mut().rev() {
            if m.is_running() {
                m.stop();
            }
        }
        self.running = false;
    }

    fn is_running(&self) -> bool {
        self.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    struct Probe {
        tag: u32,
        running: bool,
        log: Rc<RefCell<Vec<(u32, bool)>>>,
    }

    impl Lifecycle for Probe {
        fn start(&mut self) {
            self.running = true;
            self.log.borrow_mut().push((self.tag, true));
        }

        fn stop(&mut self) {
            self.running = false;
            self.log.borrow_mut().push((self.tag, false));
        }

        fn is_running(&self) -> bool {
            self.running
        }
    }

    fn probe(tag: u32, log: &Rc<RefCell<Vec<(u32, bool)>>>) -> Box<dyn Lifecycle> {
        Box::new(Probe {
            tag,
            running: false,
            log: log.clone(),
        })
    }

    #[test]
    fn start_in_order_stop_in_reverse() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut group = LifecycleGroup::new();
        group.push(probe(1, &log));
        group.push(probe(2, &log));
        group.start();
        group.stop();
        assert_eq!(
            *log.borrow(),
            vec![(1, true), (2, true), (2, false), (1, false)]
        );
    }

    #[test]
    fn start_and_stop_are_idempotent() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut group = LifecycleGroup::new();
        group.push(probe(1, &log));
        group.start();
        group.start();
        group.stop();
        group.stop();
        assert_eq!(log.borrow().len(), 2, "each transition should fire once");
    }

    #[test]
    fn late_member_joins_running_group() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut group = LifecycleGroup::new();
        group.start();
        group.push(probe(7, &log));
        assert_eq!(*log.borrow(), vec![(7, true)]);
        assert!(group.is_running());
    }

    #[test]
    fn shared_member_reports_state_to_owner() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let shared = Rc::new(RefCell::new(Probe {
            tag: 3,
            running: false,
            log: log.clone(),
        }));
        let mut group = LifecycleGroup::new();
        group.push(Box::new(shared.clone()));
        group.start();
        assert!(shared.borrow().is_running());
        group.stop();
        assert!(!shared.borrow().is_running());
    }
}
