// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! List view geometry and its configuration.
//!
//! All extents share one unit (meters for a world-space panel, pixels for a flat one).
//! Row offsets run along `y`, indentation along `x`.

use kurbo::{Point, Rect, Size};

/// Margin subtracted from the row width so row sides are not clipped by the panel edge.
pub const DEFAULT_CLIP_MARGIN: f64 = 0.001;

/// Errors from [`ListViewConfig::validate`] and [`ListViewConfig::from_toml_str`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The TOML text could not be parsed into a config.
    #[cfg(feature = "std")]
    #[error("failed to parse list view config: {0}")]
    Parse(#[from] toml::de::Error),
    /// `row_extent` must be strictly positive.
    #[error("row extent must be positive and finite, got {0}")]
    InvalidRowExtent(f64),
    /// A length that must not be negative.
    #[error("`{field}` must be non-negative and finite, got {value}")]
    Negative {
        /// Offending field.
        field: &'static str,
        /// Offending value.
        value: f64,
    },
}

/// Geometry of a list view.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct ListViewConfig {
    /// Extent of one row along the scroll axis.
    pub row_extent: f64,
    /// Extent of the visible area along the scroll axis.
    pub view_extent: f64,
    /// Width of the panel.
    pub width: f64,
    /// Indentation per depth level.
    pub indent: f64,
    /// Subtracted from `width` for each row.
    pub clip_margin: f64,
}

impl Default for ListViewConfig {
    fn default() -> Self {
        Self {
            row_extent: 0.03,
            view_extent: 0.3,
            width: 0.4,
            indent: 0.02,
            clip_margin: DEFAULT_CLIP_MARGIN,
        }
    }
}

impl ListViewConfig {
    /// Parse and validate a TOML document. Missing keys take their default value.
    ///
    /// ```
    /// use understory_list_view::ListViewConfig;
    ///
    /// let cfg = ListViewConfig::from_toml_str("row_extent = 1.0\nview_extent = 4.0").unwrap();
    /// assert_eq!(cfg.visible_rows(), 5);
    /// ```
    #[cfg(feature = "std")]
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check that every extent is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.row_extent.is_finite() && self.row_extent > 0.0) {
            return Err(ConfigError::InvalidRowExtent(self.row_extent));
        }
        for (field, value) in [
            ("view_extent", self.view_extent),
            ("width", self.width),
            ("indent", self.indent),
            ("clip_margin", self.clip_margin),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Negative { field, value });
            }
        }
        Ok(())
    }

    /// Row slots needed to cover the view, including a partially visible trailing row.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Float to int casts saturate; the quotient is floored on purpose."
    )]
    pub fn visible_rows(&self) -> usize {
        if self.row_extent <= 0.0 || self.row_extent.is_nan() {
            return 0;
        }
        ((self.view_extent / self.row_extent) as usize).saturating_add(1)
    }

    /// Whole rows scrolled past, truncated toward zero (non-positive when scrolled down).
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Float to int casts saturate; truncation toward zero is intended."
    )]
    pub fn data_offset(&self, scroll_offset: f64) -> i64 {
        if self.row_extent <= 0.0 || self.row_extent.is_nan() {
            return 0;
        }
        (scroll_offset / self.row_extent) as i64
    }

    /// Row width after the clip margin.
    pub fn row_width(&self) -> f64 {
        (self.width - self.clip_margin).max(0.0)
    }

    /// Position of the row at sequential position `count` and tree depth `depth`.
    pub fn row_position(&self, count: i64, depth: usize, scroll_offset: f64) -> Point {
        Point::new(
            depth as f64 * self.indent,
            count as f64 * self.row_extent + scroll_offset,
        )
    }

    /// Bounds of the row at `count`/`depth`, indented content only.
    pub fn row_rect(&self, count: i64, depth: usize, scroll_offset: f64) -> Rect {
        let origin = self.row_position(count, depth, scroll_offset);
        let width = (self.row_width() - origin.x).max(0.0);
        Rect::from_origin_size(origin, Size::new(width, self.row_extent))
    }
}
