// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-draggable gesture state machine.
//!
//! ## Phases
//!
//! `Idle → Dragging → Animating → Idle`.
//!
//! - [`DragSession::begin`] starts a drag, or arms it when a press delay is configured;
//!   the delay elapses through [`DragSession::tick`].
//! - [`DragSession::update`] applies a gesture delta. The offset is clamped by the
//!   [`DragConstraints`] before anything reads the dragged rectangle, so collision
//!   tests only ever see positions the item can visibly reach.
//! - [`DragSession::end`] starts a [`Settle`] toward a destination offset (a drop
//!   anchor, or zero for the origin). Cancelling is ending with no destination.
//! - [`DragSession::tick`] advances the settle and returns to `Idle` on completion.
//!
//! The session knows nothing about drop targets; the
//! [provider](crate::provider) layers target resolution on top, and sortable lists
//! reuse the session directly.
//!
//! ```
//! use core::time::Duration;
//! use kurbo::{Rect, Vec2};
//! use understory_dnd::session::{DragSession, DraggableConfig, Phase};
//!
//! let mut s = DragSession::new(DraggableConfig::default().with_settle_duration(Duration::from_millis(100)));
//! s.set_origin(Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
//! s.begin();
//! s.update(Vec2::new(5.0, 0.0));
//! assert_eq!(s.rect(), Some(Rect::new(5.0, 0.0, 15.0, 10.0)));
//! s.end(None);
//! assert_eq!(s.phase(), Phase::Animating);
//! s.tick(Duration::from_millis(100));
//! assert_eq!(s.phase(), Phase::Idle);
//! assert_eq!(s.offset(), Vec2::ZERO);
//! ```

use core::time::Duration;

use kurbo::{Point, Rect, Vec2};

use crate::collision::CollisionAlgorithm;
use crate::error::ConfigError;
use crate::registry::is_finite_rect;
use crate::types::DragAxes;

/// Lifecycle phase of a draggable.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    /// At rest; also while a press delay is pending.
    #[default]
    Idle,
    /// Following the gesture.
    Dragging,
    /// Settling toward its destination after the gesture ended.
    Animating,
}

/// Movement constraints applied before collision testing.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct DragConstraints {
    /// Axes the item may move along.
    pub axes: DragAxes,
    /// World-space rectangle the item must stay inside.
    pub bounds: Option<Rect>,
}

impl DragConstraints {
    /// Clamp an offset of the box `origin` so the moved box stays inside `bounds`.
    ///
    /// An item larger than the bounds is pinned to the bounds' leading edge.
    pub fn clamp_bounds(&self, origin: Rect, offset: Vec2) -> Vec2 {
        let Some(b) = self.bounds else {
            return offset;
        };
        Vec2::new(
            clamp_axis(offset.x, b.x0 - origin.x0, b.x1 - origin.x1),
            clamp_axis(offset.y, b.y0 - origin.y0, b.y1 - origin.y1),
        )
    }
}

fn clamp_axis(v: f64, lo: f64, hi: f64) -> f64 {
    if hi < lo { lo } else { v.clamp(lo, hi) }
}

/// Configuration of one draggable.
#[derive(Clone, Debug, PartialEq)]
pub struct DraggableConfig {
    /// Policy used against targets that do not override it.
    pub collision: CollisionAlgorithm,
    /// Axis and bounds constraints.
    pub constraints: DragConstraints,
    /// Hold time before a begun gesture becomes a drag.
    pub press_delay: Duration,
    /// Duration of the settle after the gesture ends.
    pub settle_duration: Duration,
    /// Disabled draggables ignore gestures.
    pub disabled: bool,
}

impl Default for DraggableConfig {
    fn default() -> Self {
        Self {
            collision: CollisionAlgorithm::default(),
            constraints: DragConstraints::default(),
            press_delay: Duration::ZERO,
            settle_duration: Duration::from_millis(250),
            disabled: false,
        }
    }
}

impl DraggableConfig {
    /// Set the collision policy.
    pub fn with_collision(mut self, collision: CollisionAlgorithm) -> Self {
        self.collision = collision;
        self
    }

    /// Restrict movement to `axes`.
    pub fn with_axes(mut self, axes: DragAxes) -> Self {
        self.constraints.axes = axes;
        self
    }

    /// Keep the item inside `bounds`.
    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.constraints.bounds = Some(bounds);
        self
    }

    /// Require holding for `delay` before dragging starts.
    pub fn with_press_delay(mut self, delay: Duration) -> Self {
        self.press_delay = delay;
        self
    }

    /// Set the settle duration.
    pub fn with_settle_duration(mut self, duration: Duration) -> Self {
        self.settle_duration = duration;
        self
    }

    /// Enable or disable dragging.
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Reject configurations that can never work.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.constraints.axes.is_empty() {
            return Err(ConfigError::NoAxes);
        }
        if let Some(b) = self.constraints.bounds {
            if !is_finite_rect(b) {
                return Err(ConfigError::NonFiniteGeometry { what: "drag bounds" });
            }
            if b.width() <= 0.0 || b.height() <= 0.0 {
                return Err(ConfigError::EmptyBounds {
                    width: b.width(),
                    height: b.height(),
                });
            }
        }
        Ok(())
    }
}

/// Ease-out interpolation between two offsets over a fixed duration.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Settle {
    from: Vec2,
    to: Vec2,
    duration: Duration,
    elapsed: Duration,
}

impl Settle {
    /// Start a settle from `from` to `to`.
    pub fn new(from: Vec2, to: Vec2, duration: Duration) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
        }
    }

    /// Destination offset.
    pub fn target(&self) -> Vec2 {
        self.to
    }

    /// Whether the settle reached its destination.
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Advance by `dt`; returns `true` once finished.
    pub fn advance(&mut self, dt: Duration) -> bool {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
        self.is_finished()
    }

    /// Linear progress in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    /// Interpolated offset with a cubic ease-out.
    pub fn current(&self) -> Vec2 {
        let t = 1.0 - self.progress();
        let eased = 1.0 - t * t * t;
        self.from.lerp(self.to, eased)
    }
}

/// Outcome of [`DragSession::begin`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Begin {
    /// The drag started immediately.
    Started,
    /// The drag starts after the press delay.
    Armed,
    /// Disabled, already dragging, or still settling.
    Ignored,
}

/// Outcome of [`DragSession::tick`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Tick {
    /// Nothing changed phase.
    Idle,
    /// The press delay elapsed; the drag started.
    Activated,
    /// The settle advanced but has not finished.
    Settling,
    /// The settle finished; the session is idle again.
    Settled,
}

/// Outcome of [`DragSession::end`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum End {
    /// The gesture never became a drag (released during the press delay, or not begun).
    NotDragging,
    /// A settle started.
    Settling,
    /// The settle had zero duration; the session is idle again.
    Settled,
}

/// State of one draggable across gestures.
#[derive(Clone, Debug)]
pub struct DragSession {
    config: DraggableConfig,
    phase: Phase,
    origin: Option<Rect>,
    // Where the item rests between drags (after settling onto a drop anchor).
    rest: Vec2,
    // Accumulated raw gesture translation for the current drag.
    gesture: Vec2,
    offset: Vec2,
    arming: Option<Duration>,
    settle: Option<Settle>,
}

impl DragSession {
    /// Create an idle session.
    pub fn new(config: DraggableConfig) -> Self {
        Self {
            config,
            phase: Phase::Idle,
            origin: None,
            rest: Vec2::ZERO,
            gesture: Vec2::ZERO,
            offset: Vec2::ZERO,
            arming: None,
            settle: None,
        }
    }

    /// Configuration in effect.
    pub fn config(&self) -> &DraggableConfig {
        &self.config
    }

    /// Replace the configuration; takes effect on the next sample.
    pub fn set_config(&mut self, config: DraggableConfig) {
        self.config = config;
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether a press delay is pending.
    pub fn is_armed(&self) -> bool {
        self.arming.is_some()
    }

    /// Measured layout rectangle (before any offset).
    pub fn origin(&self) -> Option<Rect> {
        self.origin
    }

    /// Record a fresh layout measurement. `None` means "not laid out yet".
    pub fn set_origin(&mut self, origin: Option<Rect>) {
        self.origin = origin;
    }

    /// Current translation from the origin, settle animation included.
    pub fn offset(&self) -> Vec2 {
        match (&self.settle, self.phase) {
            (Some(s), Phase::Animating) => s.current(),
            _ => self.offset,
        }
    }

    /// Resting translation between drags.
    pub fn rest_offset(&self) -> Vec2 {
        self.rest
    }

    /// Current world-space rectangle, if the origin is known.
    pub fn rect(&self) -> Option<Rect> {
        self.origin.map(|o| o + self.offset())
    }

    /// Current top-left position, if the origin is known.
    pub fn position(&self) -> Option<Point> {
        self.rect().map(|r| r.origin())
    }

    /// Active settle, if any.
    pub fn settle(&self) -> Option<&Settle> {
        self.settle.as_ref()
    }

    /// Gesture began.
    pub fn begin(&mut self) -> Begin {
        if self.config.disabled || self.phase != Phase::Idle || self.arming.is_some() {
            return Begin::Ignored;
        }
        if self.config.press_delay.is_zero() {
            self.activate();
            Begin::Started
        } else {
            self.arming = Some(self.config.press_delay);
            Begin::Armed
        }
    }

    fn activate(&mut self) {
        self.arming = None;
        self.phase = Phase::Dragging;
        self.gesture = Vec2::ZERO;
        self.offset = self.clamped(Vec2::ZERO);
    }

    fn clamped(&self, gesture: Vec2) -> Vec2 {
        let c = &self.config.constraints;
        let offset = self.rest + c.axes.filter(gesture);
        match self.origin {
            Some(o) => c.clamp_bounds(o, offset),
            None => offset,
        }
    }

    /// Apply a gesture delta. Returns `false` when not dragging.
    pub fn update(&mut self, delta: Vec2) -> bool {
        if self.phase != Phase::Dragging {
            return false;
        }
        if !(delta.x.is_finite() && delta.y.is_finite()) {
            return false;
        }
        self.gesture += delta;
        self.offset = self.clamped(self.gesture);
        true
    }

    /// Gesture ended; settle toward `destination` (an offset), or back to the origin.
    pub fn end(&mut self, destination: Option<Vec2>) -> End {
        if self.arming.take().is_some() || self.phase != Phase::Dragging {
            return End::NotDragging;
        }
        let to = destination.unwrap_or(Vec2::ZERO);
        self.gesture = Vec2::ZERO;
        self.settle = Some(Settle::new(self.offset, to, self.config.settle_duration));
        self.phase = Phase::Animating;
        if self.config.settle_duration.is_zero() {
            self.finish_settle();
            End::Settled
        } else {
            End::Settling
        }
    }

    /// Advance timers by `dt`.
    pub fn tick(&mut self, dt: Duration) -> Tick {
        if let Some(remaining) = self.arming {
            let left = remaining.saturating_sub(dt);
            if left.is_zero() {
                self.activate();
                return Tick::Activated;
            }
            self.arming = Some(left);
            return Tick::Idle;
        }
        if self.phase != Phase::Animating {
            return Tick::Idle;
        }
        let done = self.settle.as_mut().is_none_or(|s| s.advance(dt));
        if done {
            self.finish_settle();
            Tick::Settled
        } else {
            Tick::Settling
        }
    }

    fn finish_settle(&mut self) {
        let to = self.settle.take().map_or(Vec2::ZERO, |s| s.target());
        self.rest = to;
        self.offset = to;
        self.phase = Phase::Idle;
    }

    /// Forget the resting offset (the item was reset to its layout slot).
    pub fn reset_rest(&mut self) {
        if self.phase == Phase::Idle {
            self.rest = Vec2::ZERO;
            self.offset = Vec2::ZERO;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: Rect = Rect::new(0.0, 0.0, 10.0, 10.0);

    fn session(config: DraggableConfig) -> DragSession {
        let mut s = DragSession::new(config);
        s.set_origin(Some(ORIGIN));
        s
    }

    #[test]
    fn full_cycle_returns_to_idle() {
        let mut s = session(DraggableConfig::default());
        assert_eq!(s.begin(), Begin::Started);
        assert!(s.update(Vec2::new(3.0, 4.0)));
        assert_eq!(s.offset(), Vec2::new(3.0, 4.0));
        assert_eq!(s.end(None), End::Settling);
        assert_eq!(s.tick(Duration::from_millis(100)), Tick::Settling);
        let mid = s.offset();
        assert!(mid.x < 3.0 && mid.x > 0.0);
        assert_eq!(s.tick(Duration::from_millis(150)), Tick::Settled);
        assert_eq!(s.phase(), Phase::Idle);
        assert_eq!(s.offset(), Vec2::ZERO);
    }

    #[test]
    fn settle_to_destination_becomes_rest() {
        let mut s = session(DraggableConfig::default().with_settle_duration(Duration::ZERO));
        s.begin();
        s.update(Vec2::new(50.0, 0.0));
        assert_eq!(s.end(Some(Vec2::new(40.0, 5.0))), End::Settled);
        assert_eq!(s.rest_offset(), Vec2::new(40.0, 5.0));
        // The next drag continues from the resting position.
        s.begin();
        s.update(Vec2::new(1.0, 0.0));
        assert_eq!(s.offset(), Vec2::new(41.0, 5.0));
    }

    #[test]
    fn press_delay_arms_then_activates() {
        let mut s = session(DraggableConfig::default().with_press_delay(Duration::from_millis(200)));
        assert_eq!(s.begin(), Begin::Armed);
        assert!(!s.update(Vec2::new(5.0, 5.0)));
        assert_eq!(s.phase(), Phase::Idle);
        assert_eq!(s.tick(Duration::from_millis(150)), Tick::Idle);
        assert_eq!(s.tick(Duration::from_millis(50)), Tick::Activated);
        assert_eq!(s.phase(), Phase::Dragging);
        assert_eq!(s.offset(), Vec2::ZERO);
    }

    #[test]
    fn release_before_delay_is_a_tap() {
        let mut s = session(DraggableConfig::default().with_press_delay(Duration::from_millis(200)));
        s.begin();
        assert_eq!(s.end(None), End::NotDragging);
        assert!(!s.is_armed());
        assert_eq!(s.tick(Duration::from_secs(1)), Tick::Idle);
        assert_eq!(s.phase(), Phase::Idle);
    }

    #[test]
    fn axis_lock_zeroes_cross_axis() {
        let mut s = session(DraggableConfig::default().with_axes(DragAxes::Y));
        s.begin();
        s.update(Vec2::new(30.0, 7.0));
        assert_eq!(s.offset(), Vec2::new(0.0, 7.0));
    }

    #[test]
    fn bounds_clamp_before_rect_is_read() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 50.0);
        let mut s = session(DraggableConfig::default().with_bounds(bounds));
        s.begin();
        s.update(Vec2::new(500.0, -20.0));
        assert_eq!(s.rect(), Some(Rect::new(90.0, 0.0, 100.0, 10.0)));
    }

    #[test]
    fn oversized_item_pins_to_leading_edge() {
        let c = DragConstraints {
            axes: DragAxes::default(),
            bounds: Some(Rect::new(0.0, 0.0, 5.0, 5.0)),
        };
        assert_eq!(c.clamp_bounds(ORIGIN, Vec2::new(3.0, 3.0)), Vec2::ZERO);
    }

    #[test]
    fn begin_is_ignored_while_settling_or_disabled() {
        let mut s = session(DraggableConfig::default());
        s.begin();
        s.end(None);
        assert_eq!(s.begin(), Begin::Ignored);
        let mut d = session(DraggableConfig::default().with_disabled(true));
        assert_eq!(d.begin(), Begin::Ignored);
        assert!(!d.update(Vec2::new(1.0, 1.0)));
    }

    #[test]
    fn non_finite_delta_is_dropped() {
        let mut s = session(DraggableConfig::default());
        s.begin();
        assert!(!s.update(Vec2::new(f64::NAN, 1.0)));
        assert_eq!(s.offset(), Vec2::ZERO);
    }

    #[test]
    fn validation() {
        assert_eq!(
            DraggableConfig::default()
                .with_axes(DragAxes::empty())
                .validate(),
            Err(ConfigError::NoAxes)
        );
        assert!(matches!(
            DraggableConfig::default()
                .with_bounds(Rect::new(0.0, 0.0, 0.0, 10.0))
                .validate(),
            Err(ConfigError::EmptyBounds { .. })
        ));
        assert!(DraggableConfig::default().validate().is_ok());
    }

    #[test]
    fn settle_progress_is_monotonic() {
        let mut st = Settle::new(Vec2::new(10.0, 0.0), Vec2::ZERO, Duration::from_millis(100));
        let mut last = st.current().x;
        for _ in 0..10 {
            st.advance(Duration::from_millis(10));
            let x = st.current().x;
            assert!(x <= last);
            last = x;
        }
        assert!(st.is_finished());
        assert_eq!(st.current(), Vec2::ZERO);
    }
}
