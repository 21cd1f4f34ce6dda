// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The list view: data, expand state, rows, selection and scroll in one place.

use alloc::boxed::Box;
use core::fmt;

use tracing::debug;
use understory_hierarchy::{Children, HierarchyConsumer, NodeId};

use crate::config::ListViewConfig;
use crate::expand::ExpandState;
use crate::pool::{RowFactory, RowPool};
use crate::render::{RenderPass, RenderStats};
use crate::selection::{expand_to_row, row_offset, scroll_to_reveal};
use crate::types::{RowWindow, SelectionState};

type SelectCallback = Box<dyn FnMut(NodeId)>;

/// Virtualized tree list view.
///
/// Receives snapshot roots through [`HierarchyConsumer`], renders the rows that fall inside
/// the visible window each time [`render`](Self::render) is called, and keeps the
/// expand/collapse state, selection and scroll offset between calls.
pub struct HierarchyListView<F: RowFactory> {
    data: Children,
    expand: ExpandState,
    pool: RowPool<F>,
    selection: SelectionState,
    config: ListViewConfig,
    on_select: Option<SelectCallback>,
    last_render: RenderStats,
}

impl<F: RowFactory> fmt::Debug for HierarchyListView<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HierarchyListView")
            .field("roots", &self.data.len())
            .field("expand", &self.expand.len())
            .field("pool", &self.pool)
            .field("selection", &self.selection)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<F: RowFactory> HierarchyListView<F> {
    /// Create an empty view. Rows are created on demand by `factory`.
    pub fn new(config: ListViewConfig, factory: F) -> Self {
        Self {
            data: Children::empty(),
            expand: ExpandState::new(),
            pool: RowPool::new(factory),
            selection: SelectionState::default(),
            config,
            on_select: None,
            last_render: RenderStats::default(),
        }
    }

    /// Install the callback invoked by [`select_row`](Self::select_row).
    pub fn set_on_select(&mut self, callback: impl FnMut(NodeId) + 'static) {
        self.on_select = Some(Box::new(callback));
    }

    /// Remove the selection callback.
    pub fn clear_on_select(&mut self) {
        self.on_select = None;
    }

    /// Replace the displayed roots. Takes effect on the next render.
    pub fn set_data(&mut self, data: Children) {
        self.data = data;
    }

    /// Displayed roots.
    pub fn data(&self) -> &Children {
        &self.data
    }

    /// Geometry in use.
    pub fn config(&self) -> &ListViewConfig {
        &self.config
    }

    /// Replace the geometry. Takes effect on the next render.
    pub fn set_config(&mut self, config: ListViewConfig) {
        self.config = config;
    }

    /// Expand/collapse flags.
    pub fn expand_state(&self) -> &ExpandState {
        &self.expand
    }

    /// Mutable expand/collapse flags.
    pub fn expand_state_mut(&mut self) -> &mut ExpandState {
        &mut self.expand
    }

    /// Whether `id` is expanded. Unknown ids are collapsed.
    pub fn is_expanded(&self, id: NodeId) -> bool {
        self.expand.is_expanded(id)
    }

    /// Row pool, for inspecting bound rows.
    pub fn pool(&self) -> &RowPool<F> {
        &self.pool
    }

    /// Selected node and scroll offset.
    pub fn selection(&self) -> SelectionState {
        self.selection
    }

    /// Selected node, if any.
    pub fn selected(&self) -> Option<NodeId> {
        self.selection.selected
    }

    /// Current scroll offset; `0` at the top, negative when scrolled down.
    pub fn scroll_offset(&self) -> f64 {
        self.selection.scroll_offset
    }

    /// Set the scroll offset directly.
    pub fn set_scroll_offset(&mut self, scroll_offset: f64) {
        self.selection.scroll_offset = scroll_offset;
    }

    /// Scroll by `delta` (negative scrolls down), clamped to the content measured by the
    /// last render. Returns the new offset.
    pub fn scroll_by(&mut self, delta: f64) -> f64 {
        let max_scroll = (self.content_extent() - self.config.view_extent).max(0.0);
        let scroll = self.selection.scroll_offset + delta;
        self.selection.scroll_offset = scroll.clamp(-max_scroll, 0.0);
        self.selection.scroll_offset
    }

    /// Extent of all displayed rows as of the last render.
    pub fn content_extent(&self) -> f64 {
        self.last_render.rows as f64 * self.config.row_extent
    }

    /// Whole rows scrolled past.
    pub fn data_offset(&self) -> i64 {
        self.config.data_offset(self.selection.scroll_offset)
    }

    /// Window derived from the view extent and the scroll offset.
    pub fn window(&self) -> RowWindow {
        RowWindow::new(self.config.visible_rows(), self.data_offset())
    }

    /// Render the rows visible at the current scroll offset.
    pub fn render(&mut self) -> RenderStats {
        let window = self.window();
        self.render_window(window)
    }

    /// Render into an explicit window.
    pub fn render_window(&mut self, window: RowWindow) -> RenderStats {
        let mut pass = RenderPass::new(&mut self.pool, &mut self.expand, &self.config, window);
        pass.scroll_offset = self.selection.scroll_offset;
        pass.selected = self.selection.selected;
        self.last_render = pass.run(&self.data);
        self.last_render
    }

    /// Stats from the last render.
    pub fn last_render(&self) -> RenderStats {
        self.last_render
    }

    /// Flip the expand flag of `id` and return the new value.
    ///
    /// Collapsed subtrees are recycled on the next render.
    pub fn toggle_expanded(&mut self, id: NodeId) -> bool {
        let expanded = self.expand.toggle(id);
        debug!(node = id.0, expanded, "toggled row");
        expanded
    }

    /// Handle a click on the row showing `id`: select it.
    pub fn on_row_clicked(&mut self, id: NodeId) -> bool {
        self.select_row(id)
    }

    /// Handle a click on the expand arrow of the row showing `id`.
    pub fn on_arrow_clicked(&mut self, id: NodeId) -> bool {
        self.toggle_expanded(id)
    }

    /// Select `id`, expanding its ancestors and scrolling it into view if needed.
    ///
    /// The selection callback runs even when `id` is not in the data; in that case nothing is
    /// expanded and the scroll offset is unchanged. Returns whether the scroll offset moved.
    pub fn select_row(&mut self, id: NodeId) -> bool {
        self.selection.selected = Some(id);
        let found = expand_to_row(&self.data, id, &mut self.expand);
        if let Some(callback) = self.on_select.as_mut() {
            callback(id);
        }
        let scrolled = self.scroll_to_row(id);
        debug!(node = id.0, found, scrolled, "selected row");
        scrolled
    }

    /// Scroll so that the row showing `id` is visible, without expanding anything.
    ///
    /// A row already inside the view leaves the offset alone; otherwise the row is moved to the
    /// top edge. Rows hidden under a collapsed ancestor, and unknown ids, are ignored. Returns
    /// whether the scroll offset moved.
    pub fn scroll_to_row(&mut self, id: NodeId) -> bool {
        let target = row_offset(&self.data, id, &self.expand, self.config.row_extent)
            .and_then(|offset| {
                scroll_to_reveal(
                    self.selection.scroll_offset,
                    offset,
                    self.config.view_extent,
                )
            });
        match target {
            Some(offset) => {
                self.selection.scroll_offset = offset;
                true
            }
            None => false,
        }
    }
}

impl<F: RowFactory> HierarchyConsumer for HierarchyListView<F> {
    fn set_hierarchy_data(&mut self, data: Children) {
        self.set_data(data);
    }
}
