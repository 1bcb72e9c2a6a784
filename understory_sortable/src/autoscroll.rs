// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Edge auto-scroll.
//!
//! ## Model
//!
//! Position samples only decide the direction: [`AutoScroller::observe`] compares
//! the dragged item's edges (in viewport coordinates) with the proximity threshold.
//! The offset itself advances in [`AutoScroller::tick`], called from the host
//! frame clock, so scrolling continues while the pointer holds still near an edge.
//!
//! Scrolling stops when the edge returns to the safe zone or the offset reaches
//! `0` or the scroll extent.
//!
//! The offset lives in a [`SharedValue`] so a render thread can read it without
//! locking.
//!
//! ```
//! use core::time::Duration;
//! use understory_sortable::autoscroll::{AutoScrollConfig, AutoScrollState, AutoScroller};
//!
//! let mut s = AutoScroller::new(AutoScrollConfig::default(), 400.0, 2000.0).unwrap();
//! // An item touching the bottom of the viewport.
//! assert_eq!(s.observe(360.0, 400.0), AutoScrollState::Forward);
//! s.tick(Duration::from_millis(100));
//! assert!(s.offset() > 0.0);
//! ```

use core::time::Duration;

use understory_dnd::shared::SharedValue;

use crate::error::{SortableError, non_negative, positive};

/// Direction of auto-scroll.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum AutoScrollState {
    /// Not scrolling.
    #[default]
    None,
    /// Scrolling toward the end of the content.
    Forward,
    /// Scrolling toward the start of the content.
    Backward,
}

/// Auto-scroll tuning.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AutoScrollConfig {
    /// Distance from a viewport edge that triggers scrolling.
    pub threshold: f64,
    /// Scroll speed in units per second.
    pub speed: f64,
}

impl Default for AutoScrollConfig {
    fn default() -> Self {
        Self {
            threshold: 48.0,
            speed: 600.0,
        }
    }
}

impl AutoScrollConfig {
    /// Set the edge threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the speed.
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    /// Reject values that can never work.
    pub fn validate(&self) -> Result<(), SortableError> {
        non_negative("auto-scroll threshold", self.threshold)?;
        positive("auto-scroll speed", self.speed)?;
        Ok(())
    }
}

/// Scroll offset driver for one list.
#[derive(Clone, Debug)]
pub struct AutoScroller {
    config: AutoScrollConfig,
    state: AutoScrollState,
    offset: SharedValue,
    viewport: f64,
    content: f64,
}

impl AutoScroller {
    /// Create a scroller for a viewport of `viewport` units over `content` units.
    pub fn new(config: AutoScrollConfig, viewport: f64, content: f64) -> Result<Self, SortableError> {
        config.validate()?;
        Ok(Self {
            config,
            state: AutoScrollState::None,
            offset: SharedValue::new(0.0),
            viewport: non_negative("viewport extent", viewport)?,
            content: non_negative("content extent", content)?,
        })
    }

    /// Current direction.
    pub fn state(&self) -> AutoScrollState {
        self.state
    }

    /// Current scroll offset.
    pub fn offset(&self) -> f64 {
        self.offset.get()
    }

    /// Handle to the offset cell, for readers on other threads.
    pub fn offset_value(&self) -> SharedValue {
        self.offset.clone()
    }

    /// Visible extent.
    pub fn viewport(&self) -> f64 {
        self.viewport
    }

    /// Largest reachable offset.
    pub fn max_offset(&self) -> f64 {
        (self.content - self.viewport).max(0.0)
    }

    /// Update viewport and content extents; the offset is clamped to the new range.
    pub fn set_extents(&mut self, viewport: f64, content: f64) {
        if viewport.is_finite() && content.is_finite() {
            self.viewport = viewport.max(0.0);
            self.content = content.max(0.0);
            self.set_offset(self.offset());
        }
    }

    /// Scroll to `offset` (for example after a user scroll), clamped.
    pub fn set_offset(&mut self, offset: f64) {
        if offset.is_finite() {
            self.offset.set(offset.clamp(0.0, self.max_offset()));
        }
    }

    /// Classify a sample from the dragged item's edges in viewport coordinates.
    pub fn observe(&mut self, leading: f64, trailing: f64) -> AutoScrollState {
        let offset = self.offset();
        let max = self.max_offset();
        self.state = if trailing >= self.viewport - self.config.threshold && offset < max {
            AutoScrollState::Forward
        } else if leading <= self.config.threshold && offset > 0.0 {
            AutoScrollState::Backward
        } else {
            AutoScrollState::None
        };
        self.state
    }

    /// Stop scrolling.
    pub fn stop(&mut self) {
        self.state = AutoScrollState::None;
    }

    /// Advance the offset by `dt`; returns the applied change.
    ///
    /// Reaching either end of the scroll range stops scrolling.
    pub fn tick(&mut self, dt: Duration) -> f64 {
        let step = self.config.speed * dt.as_secs_f64();
        let before = self.offset();
        let max = self.max_offset();
        let after = match self.state {
            AutoScrollState::None => return 0.0,
            AutoScrollState::Forward => (before + step).min(max),
            AutoScrollState::Backward => (before - step).max(0.0),
        };
        if after <= 0.0 || after >= max {
            self.state = AutoScrollState::None;
        }
        self.offset.set(after);
        after - before
    }
}
