// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capability-tagged plugin registry.
//!
//! ## Overview
//!
//! Hosts that discover extensions by reflection ("every type implementing interface X") map onto
//! an explicit table here: a [`Capability`] tag maps to an ordered list of named [`Factory`]
//! entries. Registration happens while the process starts up; [`PluginRegistry::freeze`] marks
//! the one-time resolution as complete, after which the table is read-only.

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::fmt;

use tracing::debug;

/// Tag naming an extension point, e.g. `Capability("workspace")`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Capability(pub &'static str);

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// A named constructor registered under a [`Capability`].
pub struct Factory<T: ?Sized> {
    name: &'static str,
    construct: fn() -> Box<T>,
}

impl<T: ?Sized> Factory<T> {
    /// Name the factory was registered with. Unique within its capability.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Construct a fresh instance.
    pub fn create(&self) -> Box<T> {
        (self.construct)()
    }
}

impl<T: ?Sized> Clone for Factory<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for Factory<T> {}

impl<T: ?Sized> fmt::Debug for Factory<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Factory")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Errors reported while populating a [`PluginRegistry`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// A factory with the same name already exists for this capability.
    #[error("plugin `{name}` is already registered for capability `{capability}`")]
    Duplicate {
        /// Capability the registration targeted.
        capability: Capability,
        /// Conflicting factory name.
        name: &'static str,
    },
    /// The registry was frozen by [`PluginRegistry::freeze`].
    #[error("plugin registry is frozen; cannot register `{name}` for capability `{capability}`")]
    Frozen {
        /// Capability the registration targeted.
        capability: Capability,
        /// Rejected factory name.
        name: &'static str,
    },
}

/// Mapping from capability tags to ordered sets of factories producing `Box<T>`.
///
/// `T` is usually a trait object such as `dyn Lifecycle`.
pub struct PluginRegistry<T: ?Sized> {
    entries: BTreeMap<Capability, Vec<Factory<T>>>,
    frozen: bool,
}

impl<T: ?Sized> Default for PluginRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for PluginRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginRegistry")
            .field("capabilities", &self.entries.len())
            .field("factories", &self.len())
            .field("frozen", &self.frozen)
            .finish()
    }
}

impl<T: ?Sized> PluginRegistry<T> {
    /// Create an empty, unfrozen registry.
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            frozen: false,
        }
    }

    /// Register `construct` under `capability`.
    ///
    /// Factories are kept in registration order.
    pub fn register(
        &mut self,
        capability: Capability,
        name: &'static str,
        construct: fn() -> Box<T>,
    ) -> Result<(), RegistryError> {
        if self.frozen {
            return Err(RegistryError::Frozen { capability, name });
        }
        let list = self.entries.entry(capability).or_default();
        if list.iter().any(|f| f.name == name) {
            return Err(RegistryError::Duplicate { capability, name });
        }
        list.push(Factory { name, construct });
        debug!(%capability, name, "registered plugin factory");
        Ok(())
    }

    /// Finish startup resolution. Later registrations fail with [`RegistryError::Frozen`].
    pub fn freeze(&mut self) {
        if !self.frozen {
            self.frozen = true;
            debug!(factories = self.len(), "plugin registry frozen");
        }
    }

    /// Whether [`freeze`](Self::freeze) has been called.
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Factories registered for `capability`, in registration order.
    pub fn factories(&self, capability: Capability) -> &[Factory<T>] {
        self.entries
            .get(&capability)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Look up a single factory by capability and name.
    pub fn find(&self, capability: Capability, name: &str) -> Option<&Factory<T>> {
        self.factories(capability).iter().find(|f| f.name == name)
    }

    /// Construct one instance from every factory of `capability`.
    pub fn instantiate(&self, capability: Capability) -> Vec<Box<T>> {
        self.factories(capability)
            .iter()
            .map(Factory::create)
            .collect()
    }

    /// Capabilities with at least one factory.
    pub fn capabilities(&self) -> impl Iterator<Item = Capability> + '_ {
        self.entries.keys().copied()
    }

    /// Total number of factories across all capabilities.
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// True if nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
