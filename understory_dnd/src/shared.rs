// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared scalar cells readable from any execution context.
//!
//! ## Overview
//!
//! A [`SharedValue`] holds one `f64` (a scroll offset, an axis translation, ...)
//! behind an `Arc`. Writes and reads are lock-free. Every write bumps a version
//! counter, and a [`Watcher`] observes changes by comparing versions, which gives
//! consumers on another context a subscription without callbacks crossing over.
//!
//! Cells are created per owner (one provider, one list); there is no global state.
//!
//! ```
//! use understory_dnd::shared::SharedValue;
//!
//! let offset = SharedValue::new(0.0);
//! let mut watcher = offset.watch();
//! assert_eq!(watcher.changed(), None);
//!
//! offset.set(12.5);
//! assert_eq!(watcher.changed(), Some(12.5));
//! assert_eq!(watcher.changed(), None);
//! ```

use alloc::sync::Arc;
use core::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug)]
struct Cell {
    bits: AtomicU64,
    version: AtomicU64,
}

/// A cloneable handle to a shared `f64`.
#[derive(Clone, Debug)]
pub struct SharedValue {
    cell: Arc<Cell>,
}

impl SharedValue {
    /// Create a new cell holding `value`.
    pub fn new(value: f64) -> Self {
        Self {
            cell: Arc::new(Cell {
                bits: AtomicU64::new(value.to_bits()),
                version: AtomicU64::new(0),
            }),
        }
    }

    /// Current value.
    pub fn get(&self) -> f64 {
        f64::from_bits(self.cell.bits.load(Ordering::Acquire))
    }

    /// Replace the value. Writes of an identical value do not notify watchers.
    pub fn set(&self, value: f64) {
        let prev = self.cell.bits.swap(value.to_bits(), Ordering::AcqRel);
        if prev != value.to_bits() {
            self.cell.version.fetch_add(1, Ordering::AcqRel);
        }
    }

    /// Number of effective writes so far.
    pub fn version(&self) -> u64 {
        self.cell.version.load(Ordering::Acquire)
    }

    /// Subscribe to subsequent changes.
    pub fn watch(&self) -> Watcher {
        Watcher {
            value: self.clone(),
            seen: self.version(),
        }
    }
}

impl Default for SharedValue {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// Change subscription on a [`SharedValue`].
#[derive(Clone, Debug)]
pub struct Watcher {
    value: SharedValue,
    seen: u64,
}

impl Watcher {
    /// Return the latest value if it changed since the last call.
    ///
    /// Several writes between two calls collapse into one observation.
    pub fn changed(&mut self) -> Option<f64> {
        let v = self.value.version();
        if v == self.seen {
            return None;
        }
        self.seen = v;
        Some(self.value.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_storage() {
        let a = SharedValue::new(1.0);
        let b = a.clone();
        b.set(2.0);
        assert_eq!(a.get(), 2.0);
    }

    #[test]
    fn identical_write_does_not_bump_version() {
        let a = SharedValue::new(3.0);
        a.set(3.0);
        assert_eq!(a.version(), 0);
        a.set(4.0);
        assert_eq!(a.version(), 1);
    }

    #[test]
    fn watcher_collapses_bursts() {
        let a = SharedValue::new(0.0);
        let mut w = a.watch();
        a.set(1.0);
        a.set(2.0);
        a.set(3.0);
        assert_eq!(w.changed(), Some(3.0));
        assert_eq!(w.changed(), None);
    }
}
