// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory DnD: a deterministic, `no_std` drag and drop coordinator.
//!
//! ## Overview
//!
//! This crate decides, for every position sample of an in-flight drag, which drop
//! target (if any) is active, and what happens when the gesture ends. It does not
//! render, animate, or recognize gestures. The host feeds it measured rectangles,
//! gesture deltas, and frame ticks; it answers with offsets to draw and an ordered
//! queue of events to deliver.
//!
//! ## Pieces
//!
//! - [`collision`]: the three overlap policies (`Center`, `Intersect`, `Contain`).
//! - [`registry`]: drop targets with geometry, capacity, alignment, and occupancy.
//! - [`session`]: the per-draggable state machine `Idle → Dragging → Animating → Idle`.
//! - [`hover`]: enter/leave transitions of the active target.
//! - [`provider`]: one coordination scope tying the above together with an event queue.
//! - [`shared`]: lock-free numeric cells for values read on the render path.
//!
//! ## Ordering
//!
//! When several targets qualify, the most recently registered wins. This is
//! registration order, not z-order; hosts that need z-order register targets
//! back to front.
//!
//! ## Workflow
//!
//! 1) Register targets with [`DropProvider::register_drop_target`](crate::provider::DropProvider::register_drop_target)
//!    and keep their geometry current with `on_geometry_changed`.
//! 2) Register draggables and give them an origin rectangle.
//! 3) Drive gestures with `begin`, `update`, and `end`, and call `tick` every frame.
//! 4) Call `dispatch` after each batch of input to run handlers.
//!
//! ```
//! use core::time::Duration;
//! use kurbo::{Rect, Vec2};
//! use understory_dnd::event::DragEvent;
//! use understory_dnd::provider::DropProvider;
//! use understory_dnd::registry::DropTargetDescriptor;
//! use understory_dnd::session::DraggableConfig;
//!
//! let mut provider: DropProvider<u32> = DropProvider::new();
//! let tray = provider
//!     .register_drop_target(
//!         DropTargetDescriptor::new("tray")
//!             .with_rect(Rect::new(0.0, 100.0, 300.0, 200.0))
//!             .with_capacity(1),
//!     )
//!     .unwrap();
//! let chip = provider
//!     .register_draggable(DraggableConfig::default(), 42)
//!     .unwrap();
//! provider.set_draggable_origin(chip, Some(Rect::new(0.0, 0.0, 40.0, 40.0)));
//!
//! provider.begin(chip);
//! provider.update(chip, Vec2::new(10.0, 120.0));
//! provider.end(chip);
//! provider.tick(Duration::from_millis(500));
//!
//! let dropped: Vec<_> = provider
//!     .take_events()
//!     .into_iter()
//!     .filter_map(|e| match e {
//!         DragEvent::Dropped { target, data, .. } => Some((target, data)),
//!         _ => None,
//!     })
//!     .collect();
//! assert_eq!(dropped, vec![(tray, 42)]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`. With the `std` feature (default),
//! panicking handlers are contained as well as handlers returning `Err`.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod callback;
pub mod collision;
pub mod error;
pub mod event;
pub mod hover;
pub mod provider;
pub mod registry;
pub mod session;
pub mod shared;
pub mod types;

pub use collision::CollisionAlgorithm;
pub use error::ConfigError;
pub use event::{DragEvent, DragObserver, DroppedItem};
pub use provider::DropProvider;
pub use session::{DragSession, DraggableConfig, Phase};
pub use types::{Alignment, DragAxes, DraggableId, TargetId};
