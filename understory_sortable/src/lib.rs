// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Sortable: drag-to-reorder for one-dimensional lists.
//!
//! ## Overview
//!
//! A [`SortableList`](crate::list::SortableList) wires three pieces together for
//! one axis:
//!
//! - [`order`]: the item → slot bijection, replaced atomically on every move.
//! - [`layout`]: uniform slot geometry and its pixel → slot inverse.
//! - [`autoscroll`]: edge detection and a tick-driven scroll offset.
//!
//! The drag itself runs on [`understory_dnd::session::DragSession`], restricted to
//! the list axis.
//!
//! ```
//! use kurbo::Vec2;
//! use understory_sortable::layout::Axis;
//! use understory_sortable::list::{SortableConfig, SortableEvent, SortableList};
//!
//! let mut list = SortableList::new(SortableConfig::new(Axis::Vertical, 40.0), ["a", "b", "c"]).unwrap();
//! list.begin(&"a");
//! list.update(Vec2::new(0.0, 82.0));
//! list.end();
//!
//! let moves: Vec<_> = list
//!     .take_events()
//!     .into_iter()
//!     .filter_map(|e| match e {
//!         SortableEvent::Move { item, from, to } => Some((item, from, to)),
//!         _ => None,
//!     })
//!     .collect();
//! assert_eq!(moves, vec![("a", 0, 2)]);
//! assert_eq!(list.order().iter().copied().collect::<Vec<_>>(), ["b", "c", "a"]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod autoscroll;
pub mod error;
pub mod layout;
pub mod list;
pub mod order;

pub use error::SortableError;
pub use list::{SortableConfig, SortableEvent, SortableList, SortableObserver};
