// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_hierarchy --heading-base-level=0

//! Understory Hierarchy: incremental snapshots of an external scene hierarchy.
//!
//! Editors and inspectors often mirror a hierarchy they do not own (a scene graph, a document
//! outline, a file tree). This crate keeps a cached tree in sync with such a source and tells
//! interested parties when it changed.
//!
//! - [`HierarchyCursor`]: the host's depth-first, pre-order cursor. [`FlatCursor`] is an
//!   in-memory implementation.
//! - [`HierarchySnapshot`]: the cached tree. [`HierarchySnapshot::update`] diffs the cursor
//!   against the cache, reusing unchanged subtrees, and reports whether anything changed.
//! - [`HierarchyModule`]: owns cursor and snapshot, fans changes out to registered
//!   [`HierarchyConsumer`]s, and follows an explicit [`Lifecycle`](understory_plugin::Lifecycle).
//!
//! ## Where this fits
//!
//! The snapshot is the data side of a hierarchy browser. A list view (for example
//! `understory_list_view`) consumes the [`Children`] list and decides what to draw.
//!
//! ## Matching is positional
//!
//! Children are compared index by index. Inserting a sibling rebuilds every sibling after it,
//! and reordering siblings is reported as a change to each moved node. Unchanged subtrees in
//! front of the edit are shared with the previous snapshot.
//!
//! # Example
//!
//! ```rust
//! use understory_hierarchy::{FlatCursor, HierarchySnapshot, NodeId};
//!
//! let mut source = FlatCursor::new();
//! source.push(1, "camera", 0).push(2, "world", 0).push(3, "ground", 1);
//!
//! let mut snapshot = HierarchySnapshot::new();
//! let (roots, changed) = snapshot.update(&mut source);
//! assert!(changed);
//! assert_eq!(roots.len(), 2);
//! assert_eq!(roots[1].children()[0].name(), "ground");
//!
//! // Nothing changed: no rebuild, same allocation.
//! let (again, changed) = snapshot.update(&mut source);
//! assert!(!changed);
//! assert!(again.ptr_eq(&roots));
//!
//! // Renaming a leaf only rebuilds its ancestors.
//! source.rename(NodeId(3), "terrain");
//! let (renamed, changed) = snapshot.update(&mut source);
//! assert!(changed);
//! assert_eq!(renamed[1].children()[0].name(), "terrain");
//! ```
//!
//! This crate is `no_std` and uses `alloc`. It is single-threaded: snapshots share
//! nodes through `Rc`.

#![no_std]

extern crate alloc;

pub mod cursor;
pub mod module;
pub mod snapshot;
pub mod types;

pub use cursor::{FlatCursor, FlatEntry, HierarchyCursor};
pub use module::{ConsumerId, HierarchyConsumer, HierarchyModule};
pub use snapshot::HierarchySnapshot;
pub use types::{Children, NodeId, TreeNode};
