// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Setup-time configuration errors.
//!
//! Only programming mistakes surface here. Runtime conditions such as a target
//! vanishing mid-drag or a full target are handled as ordinary outcomes.

use thiserror::Error;

/// A draggable or drop target was configured in a way that can never work.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    /// A rectangle contained NaN or infinite coordinates.
    #[error("{what} has non-finite geometry")]
    NonFiniteGeometry {
        /// Which field was rejected.
        what: &'static str,
    },
    /// A drop target declared a capacity of zero; it could never accept a drop.
    #[error("drop target capacity must be at least 1")]
    ZeroCapacity,
    /// A replacement descriptor lowered capacity below the occupants already resting.
    #[error("drop target capacity {capacity} is below its {occupants} current occupants")]
    CapacityBelowOccupancy {
        /// Requested capacity.
        capacity: usize,
        /// Occupants resting in the target.
        occupants: usize,
    },
    /// A bounding constraint had no area.
    #[error("drag bounds must have a positive area, got {width}x{height}")]
    EmptyBounds {
        /// Width of the rejected bounds.
        width: f64,
        /// Height of the rejected bounds.
        height: f64,
    },
    /// A draggable allowed movement along no axis at all.
    #[error("draggable must be allowed to move along at least one axis")]
    NoAxes,
}
