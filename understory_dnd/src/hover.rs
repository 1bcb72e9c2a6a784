// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Active-target tracking: compute leave/enter transitions between samples.
//!
//! ## Usage
//!
//! 1) Resolve the active target for the current sample (for example with
//!    [`Registry::resolve_active_target`](crate::registry::Registry::resolve_active_target)).
//! 2) Call [`HoverState::update`] with the result.
//! 3) Forward the returned [`Transition`]'s events, leave first.
//!
//! Re-resolving the same target on consecutive samples yields an empty transition,
//! so hover side effects never fire twice for one entry.
//!
//! ```
//! use understory_dnd::hover::{HoverEvent, HoverState};
//!
//! let mut h: HoverState<u32> = HoverState::new();
//! assert_eq!(h.update(Some(1)).events().collect::<Vec<_>>(), vec![HoverEvent::Enter(1)]);
//! assert!(h.update(Some(1)).is_empty());
//! assert_eq!(
//!     h.update(Some(2)).events().collect::<Vec<_>>(),
//!     vec![HoverEvent::Leave(1), HoverEvent::Enter(2)]
//! );
//! ```

/// At most one active target at a time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HoverState<K: Copy + Eq> {
    current: Option<K>,
}

/// A hover transition event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HoverEvent<K> {
    /// The draggable now qualifies for the given target.
    Enter(K),
    /// The draggable no longer qualifies for the given target.
    Leave(K),
}

/// Result of one [`HoverState::update`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Transition<K> {
    /// Target that was left, if any.
    pub leave: Option<K>,
    /// Target that was entered, if any.
    pub enter: Option<K>,
}

impl<K: Copy> Transition<K> {
    /// True if nothing changed.
    pub fn is_empty(&self) -> bool {
        self.leave.is_none() && self.enter.is_none()
    }

    /// Events in delivery order: leave, then enter.
    pub fn events(&self) -> impl Iterator<Item = HoverEvent<K>> + use<K> {
        self.leave
            .map(HoverEvent::Leave)
            .into_iter()
            .chain(self.enter.map(HoverEvent::Enter))
    }
}

impl<K: Copy + Eq> HoverState<K> {
    /// Create an empty hover state.
    pub fn new() -> Self {
        Self { current: None }
    }

    /// Currently active target.
    pub fn current(&self) -> Option<K> {
        self.current
    }

    /// Move to `next` and report what changed.
    pub fn update(&mut self, next: Option<K>) -> Transition<K> {
        if self.current == next {
            return Transition {
                leave: None,
                enter: None,
            };
        }
        let leave = core::mem::replace(&mut self.current, next);
        Transition { leave, enter: next }
    }

    /// Drop the current target, returning the matching leave.
    pub fn clear(&mut self) -> Option<HoverEvent<K>> {
        self.current.take().map(HoverEvent::Leave)
    }

    /// Forget `target` without reporting a leave, if it is the current one.
    ///
    /// Used when the target itself went away; there is nobody left to notify.
    pub fn forget(&mut self, target: K) -> bool {
        if self.current == Some(target) {
            self.current = None;
            true
        } else {
            false
        }
    }
}
