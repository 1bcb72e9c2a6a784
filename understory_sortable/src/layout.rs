// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slot ↔ pixel mapping along one axis.

use kurbo::{Rect, Vec2};

use crate::error::{SortableError, non_negative, positive};

/// Primary axis of a list.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Items stack top to bottom.
    #[default]
    Vertical,
    /// Items stack left to right.
    Horizontal,
}

impl Axis {
    /// Component of `v` along this axis.
    pub fn along(self, v: Vec2) -> f64 {
        match self {
            Self::Vertical => v.y,
            Self::Horizontal => v.x,
        }
    }

    /// Vector of length `d` along this axis.
    pub fn vector(self, d: f64) -> Vec2 {
        match self {
            Self::Vertical => Vec2::new(0.0, d),
            Self::Horizontal => Vec2::new(d, 0.0),
        }
    }
}

/// Uniform slot geometry: slot `i` starts at `i * extent + i * gap + leading_padding`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SlotLayout {
    axis: Axis,
    item_extent: f64,
    gap: f64,
    leading_padding: f64,
}

impl SlotLayout {
    /// Layout with no gap or padding.
    pub fn new(axis: Axis, item_extent: f64) -> Result<Self, SortableError> {
        Ok(Self {
            axis,
            item_extent: positive("item extent", item_extent)?,
            gap: 0.0,
            leading_padding: 0.0,
        })
    }

    /// Space between consecutive items.
    pub fn with_gap(mut self, gap: f64) -> Result<Self, SortableError> {
        self.gap = non_negative("gap", gap)?;
        Ok(self)
    }

    /// Space before the first item.
    pub fn with_leading_padding(mut self, padding: f64) -> Result<Self, SortableError> {
        self.leading_padding = non_negative("leading padding", padding)?;
        Ok(self)
    }

    /// Primary axis.
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Extent of one item along the axis.
    pub fn item_extent(&self) -> f64 {
        self.item_extent
    }

    /// Distance between the starts of consecutive slots.
    pub fn stride(&self) -> f64 {
        self.item_extent + self.gap
    }

    /// Leading offset of `slot`.
    pub fn offset_of(&self, slot: usize) -> f64 {
        let i = slot as f64;
        i * self.item_extent + i * self.gap + self.leading_padding
    }

    /// Nearest slot to the leading offset `pixel`, clamped to `[0, len - 1]`.
    ///
    /// `None` when the list is empty.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "The operand is finite and positive, and the result is clamped."
    )]
    pub fn slot_at(&self, pixel: f64, len: usize) -> Option<usize> {
        let last = len.checked_sub(1)?;
        let rel = (pixel - self.leading_padding) / self.stride();
        if rel.is_nan() || rel <= 0.0 {
            return Some(0);
        }
        if !rel.is_finite() {
            return Some(last);
        }
        // Round half up; `rel` is positive.
        Some(((rel + 0.5) as usize).min(last))
    }

    /// Total extent of `len` items, including padding before the first.
    pub fn content_extent(&self, len: usize) -> f64 {
        match len {
            0 => self.leading_padding,
            n => self.offset_of(n - 1) + self.item_extent,
        }
    }

    /// Rectangle of `slot`, with `cross` as the extent across the axis.
    pub fn slot_rect(&self, slot: usize, cross: f64) -> Rect {
        let start = self.offset_of(slot);
        let end = start + self.item_extent;
        match self.axis {
            Axis::Vertical => Rect::new(0.0, start, cross, end),
            Axis::Horizontal => Rect::new(start, 0.0, end, cross),
        }
    }
}
