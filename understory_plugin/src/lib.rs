// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_plugin --heading-base-level=0

//! Understory Plugin: static plugin discovery and explicit lifecycles.
//!
//! Editor extensions (tools, workspaces, data modules) are usually found by reflection and
//! enabled through global editor hooks. This crate replaces both with plain data:
//!
//! - [`PluginRegistry`]: a capability tag → ordered factories table, filled once at startup
//!   and then [frozen](PluginRegistry::freeze).
//! - [`Lifecycle`]: explicit `start`/`stop` methods, driven by whatever owns the process loop.
//! - [`LifecycleGroup`]: starts members in order and stops them in reverse.
//!
//! # Example
//!
//! ```rust
//! use understory_plugin::{Capability, Lifecycle, LifecycleGroup, PluginRegistry};
//!
//! #[derive(Default)]
//! struct Clock { running: bool }
//!
//! impl Lifecycle for Clock {
//!     fn start(&mut self) { self.running = true; }
//!     fn stop(&mut self) { self.running = false; }
//!     fn is_running(&self) -> bool { self.running }
//! }
//!
//! const MODULES: Capability = Capability("module");
//!
//! let mut registry: PluginRegistry<dyn Lifecycle> = PluginRegistry::new();
//! registry
//!     .register(MODULES, "clock", || -> Box<dyn Lifecycle> { Box::new(Clock::default()) })
//!     .unwrap();
//! registry.freeze();
//!
//! let mut group = LifecycleGroup::new();
//! for module in registry.instantiate(MODULES) {
//!     group.push(module);
//! }
//! group.start();
//! assert!(group.is_running());
//! group.stop();
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod lifecycle;
pub mod registry;

pub use lifecycle::{Lifecycle, LifecycleGroup};
pub use registry::{Capability, Factory, PluginRegistry, RegistryError};
