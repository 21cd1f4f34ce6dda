// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the list view: row state flags, the render window, and selection state.

use understory_hierarchy::NodeId;

bitflags::bitflags! {
    /// Visual state passed to [`RowWidget::set_visual_state`](crate::RowWidget::set_visual_state).
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct RowFlags: u8 {
        /// The node has children; the row should show an expand arrow.
        const HAS_CHILDREN = 0b0000_0001;
        /// The node's children are shown below it.
        const EXPANDED     = 0b0000_0010;
        /// The node is the selected row.
        const SELECTED     = 0b0000_0100;
    }
}

/// The band of sequential row positions that get a widget.
///
/// Rows are numbered in display order starting at `0`. A row at position `count` is rendered
/// into slot `count + data_offset`, and only slots `0..capacity` are rendered.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RowWindow {
    /// Number of row slots.
    pub capacity: usize,
    /// Shift applied to row positions; negative when scrolled down.
    pub data_offset: i64,
}

impl RowWindow {
    /// Create a window from its raw parts.
    pub const fn new(capacity: usize, data_offset: i64) -> Self {
        Self {
            capacity,
            data_offset,
        }
    }

    /// Window whose first slot shows row `first_row`.
    pub const fn from_first_row(first_row: i64, capacity: usize) -> Self {
        Self::new(capacity, -first_row)
    }

    /// Slot of the row at position `count`, or `None` if it falls outside the window.
    ///
    /// A shift that overflows `i64` is outside the window.
    pub fn slot(&self, count: i64) -> Option<usize> {
        count
            .checked_add(self.data_offset)
            .and_then(|slot| usize::try_from(slot).ok())
            .filter(|&slot| slot < self.capacity)
    }

    /// Whether the row at position `count` is rendered.
    pub fn contains(&self, count: i64) -> bool {
        self.slot(count).is_some()
    }
}

/// Selected row and scroll position of a list view.
///
/// `scroll_offset` is `0` at the top and becomes negative as the list scrolls down; a row at
/// accumulated offset `h` is on screen when `-scroll_offset <= h <= -scroll_offset + view_extent`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SelectionState {
    /// Currently selected node, if any.
    pub selected: Option<NodeId>,
    /// Scroll position along the row axis.
    pub scroll_offset: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_slots() {
        let w = RowWindow::from_first_row(3, 5);
        assert_eq!(w.slot(2), None);
        assert_eq!(w.slot(3), Some(0));
        assert_eq!(w.slot(7), Some(4));
        assert_eq!(w.slot(8), None);
    }

    #[test]
    fn zero_capacity_window_is_empty() {
        let w = RowWindow::new(0, 0);
        assert!(!w.contains(0));
        assert!(!w.contains(-1));
    }

    #[test]
    fn extreme_offsets_are_outside_the_window() {
        let w = RowWindow::new(5, i64::MAX);
        assert_eq!(w.slot(0), None);
        assert_eq!(w.slot(1), None);
        let w = RowWindow::new(5, i64::MIN);
        assert_eq!(w.slot(0), None);
        assert_eq!(w.slot(-1), None);
    }

    #[test]
    fn negative_first_row_leaves_leading_slots_empty() {
        let w = RowWindow::from_first_row(-2, 4);
        assert_eq!(w.slot(0), Some(2));
        assert_eq!(w.slot(2), None);
    }
}
