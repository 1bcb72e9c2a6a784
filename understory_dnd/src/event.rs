// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Side effects produced by the provider, and the observer that receives them.
//!
//! The provider never calls consumer code while it processes a sample. It appends
//! [`DragEvent`]s to an ordered queue; [`DropProvider::dispatch`](crate::provider::DropProvider::dispatch)
//! later delivers them, target handlers first, then the [`DragObserver`]. Events of
//! one draggable are delivered in the order their samples arrived.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Point;

use crate::callback::HandlerResult;
use crate::session::Phase;
use crate::types::{DraggableId, TargetId};

/// A draggable resting in a target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DroppedItem {
    /// The resting draggable.
    pub draggable: DraggableId,
    /// Target it rests in.
    pub target: TargetId,
    /// Application-facing id of that target.
    pub external_id: String,
}

/// One queued side effect.
#[derive(Clone, Debug)]
pub enum DragEvent<D> {
    /// The draggable's phase changed.
    PhaseChanged {
        /// Affected draggable.
        draggable: DraggableId,
        /// New phase.
        phase: Phase,
    },
    /// A drag started.
    DragStart {
        /// Affected draggable.
        draggable: DraggableId,
        /// Top-left position at start.
        position: Point,
    },
    /// A position sample was processed.
    Dragging {
        /// Affected draggable.
        draggable: DraggableId,
        /// Active target after this sample.
        over: Option<TargetId>,
        /// Top-left position after constraints.
        position: Point,
    },
    /// A target became active or inactive for a draggable.
    ActiveChange {
        /// Affected target.
        target: TargetId,
        /// Draggable that entered or left.
        draggable: DraggableId,
        /// `true` on enter, `false` on leave.
        active: bool,
    },
    /// A target accepted a drop. Queued exactly once per accepted drop.
    Dropped {
        /// Dropped draggable.
        draggable: DraggableId,
        /// Receiving target.
        target: TargetId,
        /// Application-facing id of the receiving target.
        external_id: String,
        /// Payload of the draggable at drop time.
        data: D,
        /// Top-left position where the item comes to rest.
        position: Point,
    },
    /// The gesture ended, with or without an accepted drop.
    DragEnd {
        /// Affected draggable.
        draggable: DraggableId,
        /// Target that accepted the drop, if any.
        target: Option<TargetId>,
        /// Top-left position when released.
        position: Point,
    },
    /// The set of resting draggables changed.
    DroppedItemsChanged {
        /// Snapshot after the change.
        items: Vec<DroppedItem>,
    },
}

/// Application-level receiver of drag events.
///
/// All methods default to doing nothing.
pub trait DragObserver<D> {
    /// A drag started at `position`.
    fn on_drag_start(&mut self, draggable: DraggableId, position: Point) -> HandlerResult {
        let _ = (draggable, position);
        Ok(())
    }

    /// A sample moved `draggable` to `position` over `over`.
    fn on_dragging(
        &mut self,
        draggable: DraggableId,
        over: Option<TargetId>,
        position: Point,
    ) -> HandlerResult {
        let _ = (draggable, over, position);
        Ok(())
    }

    /// The gesture ended at `position`; `target` is the accepting target.
    fn on_drop(
        &mut self,
        draggable: DraggableId,
        target: Option<TargetId>,
        position: Point,
    ) -> HandlerResult {
        let _ = (draggable, target, position);
        Ok(())
    }

    /// A target accepted `data`.
    fn on_target_drop(&mut self, draggable: DraggableId, target: TargetId, data: &D) -> HandlerResult {
        let _ = (draggable, target, data);
        Ok(())
    }

    /// The phase of `draggable` changed.
    fn on_phase_change(&mut self, draggable: DraggableId, phase: Phase) -> HandlerResult {
        let _ = (draggable, phase);
        Ok(())
    }

    /// The resting set changed.
    fn on_dropped_items_update(&mut self, items: &[DroppedItem]) -> HandlerResult {
        let _ = items;
        Ok(())
    }
}

impl<D> DragObserver<D> for () {}
