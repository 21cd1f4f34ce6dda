// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_list_view --heading-base-level=0

//! Understory List View: a virtualized, recycling tree list.
//!
//! A hierarchy browser shows a tree as indented rows, one per visible node. Trees can be large
//! and the view small, so only the rows inside the visible window get a widget; everything else
//! is handed back to a pool.
//!
//! - [`HierarchyListView`]: owns the data, the [`ExpandState`], the [`RowPool`] and the
//!   [`SelectionState`]. It implements
//!   [`HierarchyConsumer`](understory_hierarchy::HierarchyConsumer) so it can be fed by an
//!   [`understory_hierarchy::HierarchyModule`].
//! - [`RowWidget`] and [`RowFactory`]: the host's visual rows. The view binds, positions and
//!   recycles them; it never draws anything itself.
//! - [`ListViewConfig`]: row extent, view extent, width, indentation and clip margin. With the
//!   `std` feature it loads from TOML.
//! - [`expand_to_row`], [`row_offset`] and [`scroll_to_reveal`]: the pieces behind
//!   [`HierarchyListView::select_row`], usable on their own.
//!
//! ## Rendering
//!
//! Rows are numbered in display order: a node, then (if expanded) its children, then its next
//! sibling. Row `count` is drawn in slot `count + data_offset` of a [`RowWindow`] and only slots
//! `0..capacity` are drawn. The row sits at `x = depth * indent` and
//! `y = count * row_extent + scroll_offset`. Rows under collapsed nodes and rows whose node left
//! the data are recycled during the same pass.
//!
//! ## Scrolling
//!
//! `scroll_offset` is `0` at the top and negative when scrolled down. Selecting a row that is
//! off screen moves it to the top edge; selecting a visible row leaves the scroll alone.
//!
//! # Example
//!
//! ```rust
//! use kurbo::Point;
//! use understory_hierarchy::{NodeId, TreeNode};
//! use understory_list_view::{HierarchyListView, ListViewConfig, RowFlags, RowWidget};
//!
//! #[derive(Default)]
//! struct Label {
//!     node: Option<NodeId>,
//!     y: f64,
//! }
//!
//! impl RowWidget for Label {
//!     fn bind(&mut self, id: NodeId) { self.node = Some(id); }
//!     fn unbind(&mut self) { self.node = None; }
//!     fn set_visual_state(&mut self, _width: f64, _depth: usize, _flags: RowFlags) {}
//!     fn set_position(&mut self, position: Point) { self.y = position.y; }
//! }
//!
//! let config = ListViewConfig { row_extent: 1.0, view_extent: 2.0, ..Default::default() };
//! let mut view = HierarchyListView::new(config, Label::default);
//! let rows: Vec<TreeNode> = (0..10).map(|i| TreeNode::leaf(NodeId(i), "item")).collect();
//! view.set_data(rows.into());
//!
//! // Three slots: two full rows plus a partial one.
//! assert_eq!(view.render().bound, 3);
//!
//! // Selecting an off-screen row scrolls it to the top.
//! assert!(view.select_row(NodeId(7)));
//! view.render();
//! assert_eq!(view.pool().row(NodeId(7)).unwrap().y, 0.0);
//! assert!(!view.pool().is_bound(NodeId(0)));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod config;
pub mod expand;
pub mod pool;
mod render;
pub mod selection;
pub mod types;
pub mod view;

pub use config::{ConfigError, DEFAULT_CLIP_MARGIN, ListViewConfig};
pub use expand::ExpandState;
pub use pool::{RowFactory, RowPool, RowWidget};
pub use render::RenderStats;
pub use selection::{expand_to_row, row_offset, scroll_to_reveal};
pub use types::{RowFlags, RowWindow, SelectionState};
pub use view::HierarchyListView;
