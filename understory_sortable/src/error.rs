// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Setup errors for sortable lists.

use thiserror::Error;

/// A sortable list was configured in a way that can never work.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SortableError {
    /// No per-item extent was given along the list's axis.
    #[error("sortable list requires an item extent along its axis")]
    MissingItemExtent,
    /// A length was negative, zero where it must be positive, or not finite.
    #[error("{what} must be finite and {requirement}, got {value}")]
    InvalidExtent {
        /// Which field was rejected.
        what: &'static str,
        /// What the field must satisfy.
        requirement: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// The same item appeared twice in the initial data set.
    #[error("item at index {index} duplicates an earlier item")]
    DuplicateItem {
        /// Position of the duplicate in the input.
        index: usize,
    },
}

pub(crate) fn positive(what: &'static str, value: f64) -> Result<f64, SortableError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(SortableError::InvalidExtent {
            what,
            requirement: "positive",
            value,
        })
    }
}

pub(crate) fn non_negative(what: &'static str, value: f64) -> Result<f64, SortableError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(SortableError::InvalidExtent {
            what,
            requirement: "non-negative",
            value,
        })
    }
}
