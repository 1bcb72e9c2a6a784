// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slot registry: drop targets, their geometry and capacity, and occupancy.
//!
//! ## Overview
//!
//! The registry maps [`TargetId`]s to [`DropTarget`]s and answers one question per
//! position sample: which target, if any, is active for this dragged rectangle?
//!
//! ## Resolution
//!
//! - Every registered target with known geometry is tested with the draggable's
//!   [`CollisionAlgorithm`], or with the target's own override when it declares one.
//! - Targets that are disabled or full are skipped.
//! - Among the remaining matches, the most recently registered wins. Re-registering
//!   an existing id keeps its original place in that order.
//!
//! This tie-break follows registration order only; it is not a z-order.
//!
//! ## Occupancy
//!
//! Occupancy is a ledger of draggable → target. A draggable occupies at most one
//! target; occupying another (or [`Registry::release`]) frees the previous slot.
//! A draggable already resting in a full target stays eligible for that target.
//!
//! ## Lookups
//!
//! Operations on unknown ids are no-ops; registration races with unmount during
//! fast navigation and a stale id simply resolves to "not found".

use alloc::borrow::ToOwned;
use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Vec2};

use crate::callback::HandlerResult;
use crate::collision::{CollisionAlgorithm, collides};
use crate::error::ConfigError;
use crate::types::{Alignment, Counter, DraggableId, ListenerId, TargetId};

/// Measurement source for a view's world-space rectangle.
///
/// Returns `None` while the view is not laid out yet; that is "not ready",
/// not an error.
pub trait Measure {
    /// Measure the current rectangle.
    fn measure(&mut self) -> Option<Rect>;
}

impl<F: FnMut() -> Option<Rect>> Measure for F {
    fn measure(&mut self) -> Option<Rect> {
        self()
    }
}

/// Payload delivered to a target's drop handler.
#[derive(Debug)]
pub struct DropInfo<'a, D> {
    /// Receiving target.
    pub target: TargetId,
    /// Application-facing id of the receiving target.
    pub external_id: &'a str,
    /// The dropped draggable.
    pub draggable: DraggableId,
    /// Payload attached to the draggable.
    pub data: &'a D,
    /// Top-left corner where the item comes to rest.
    pub position: Point,
}

/// Handler invoked once per accepted drop.
pub type DropHandler<D> = Box<dyn FnMut(&DropInfo<'_, D>) -> HandlerResult>;

/// Handler invoked when a target becomes (or stops being) the active target.
pub type ActiveHandler = Box<dyn FnMut(bool) -> HandlerResult>;

/// What a position listener wants after being notified.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ListenerControl {
    /// Stay subscribed.
    Keep,
    /// Unsubscribe; safe to return during teardown.
    Remove,
}

type Listener = Box<dyn FnMut() -> ListenerControl>;

/// Registration data for a drop target.
pub struct DropTargetDescriptor<D> {
    /// Application-facing id, reported in drop events.
    pub external_id: String,
    /// World-space rectangle, `None` until measured.
    pub rect: Option<Rect>,
    /// Anchor for dropped items.
    pub alignment: Alignment,
    /// Extra offset applied after alignment.
    pub offset: Vec2,
    /// Maximum number of resting occupants; `None` is unbounded.
    pub capacity: Option<usize>,
    /// Collision policy override for this target.
    pub collision: Option<CollisionAlgorithm>,
    /// Disabled targets never become active.
    pub disabled: bool,
    /// Drop handler.
    pub on_drop: Option<DropHandler<D>>,
    /// Active-change handler.
    pub on_active_change: Option<ActiveHandler>,
    /// Re-measurement source used by [`Registry::remeasure`].
    pub measure: Option<Box<dyn Measure>>,
}

impl<D> core::fmt::Debug for DropTargetDescriptor<D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DropTargetDescriptor")
            .field("external_id", &self.external_id)
            .field("rect", &self.rect)
            .field("alignment", &self.alignment)
            .field("offset", &self.offset)
            .field("capacity", &self.capacity)
            .field("collision", &self.collision)
            .field("disabled", &self.disabled)
            .finish_non_exhaustive()
    }
}

impl<D> DropTargetDescriptor<D> {
    /// Descriptor with default alignment, no capacity limit, and no geometry yet.
    pub fn new(external_id: impl Into<String>) -> Self {
        Self {
            external_id: external_id.into(),
            rect: None,
            alignment: Alignment::default(),
            offset: Vec2::ZERO,
            capacity: None,
            collision: None,
            disabled: false,
            on_drop: None,
            on_active_change: None,
            measure: None,
        }
    }

    /// Set the measured rectangle.
    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.rect = Some(rect);
        self
    }

    /// Set alignment and offset of dropped items.
    pub fn with_alignment(mut self, alignment: Alignment, offset: Vec2) -> Self {
        self.alignment = alignment;
        self.offset = offset;
        self
    }

    /// Limit the number of resting occupants.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Test this target with `algorithm` regardless of the draggable's policy.
    pub fn with_collision(mut self, algorithm: CollisionAlgorithm) -> Self {
        self.collision = Some(algorithm);
        self
    }

    /// Enable or disable the target.
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set the drop handler.
    pub fn on_drop(mut self, f: impl FnMut(&DropInfo<'_, D>) -> HandlerResult + 'static) -> Self {
        self.on_drop = Some(Box::new(f));
        self
    }

    /// Set the active-change handler.
    pub fn on_active_change(mut self, f: impl FnMut(bool) -> HandlerResult + 'static) -> Self {
        self.on_active_change = Some(Box::new(f));
        self
    }

    /// Set the measurement source.
    pub fn with_measure(mut self, m: impl Measure + 'static) -> Self {
        self.measure = Some(Box::new(m));
        self
    }

    /// Reject descriptors that can never work.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(r) = self.rect
            && !is_finite_rect(r)
        {
            return Err(ConfigError::NonFiniteGeometry { what: "drop target rect" });
        }
        if !(self.offset.x.is_finite() && self.offset.y.is_finite()) {
            return Err(ConfigError::NonFiniteGeometry {
                what: "drop offset",
            });
        }
        if self.capacity == Some(0) {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(())
    }
}

/// A registered drop target.
pub struct DropTarget<D> {
    id: TargetId,
    external_id: String,
    rect: Option<Rect>,
    alignment: Alignment,
    offset: Vec2,
    capacity: Option<usize>,
    collision: Option<CollisionAlgorithm>,
    disabled: bool,
    occupants: usize,
    pub(crate) on_drop: Option<DropHandler<D>>,
    pub(crate) on_active_change: Option<ActiveHandler>,
    measure: Option<Box<dyn Measure>>,
}

impl<D> core::fmt::Debug for DropTarget<D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DropTarget")
            .field("id", &self.id)
            .field("external_id", &self.external_id)
            .field("rect", &self.rect)
            .field("capacity", &self.capacity)
            .field("occupants", &self.occupants)
            .finish_non_exhaustive()
    }
}

impl<D> DropTarget<D> {
    /// Internal id.
    pub fn id(&self) -> TargetId {
        self.id
    }

    /// Application-facing id.
    pub fn external_id(&self) -> &str {
        &self.external_id
    }

    /// Last measured rectangle.
    pub fn rect(&self) -> Option<Rect> {
        self.rect
    }

    /// Capacity limit.
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Number of draggables currently resting here.
    pub fn current_occupants(&self) -> usize {
        self.occupants
    }

    /// Collision override.
    pub fn collision(&self) -> Option<CollisionAlgorithm> {
        self.collision
    }

    /// Whether the target is disabled.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Top-left corner where an item of `item`'s size comes to rest.
    ///
    /// Returns `None` while the target has no geometry.
    pub fn anchor_for(&self, item: Rect) -> Option<Point> {
        let zone = self.rect?;
        Some(self.alignment.place(zone, item.size()) + self.offset)
    }

    fn is_full(&self) -> bool {
        self.capacity.is_some_and(|cap| self.occupants >= cap)
    }

    fn apply(&mut self, desc: DropTargetDescriptor<D>) {
        self.external_id = desc.external_id;
        self.rect = desc.rect;
        self.alignment = desc.alignment;
        self.offset = desc.offset;
        self.capacity = desc.capacity;
        self.collision = desc.collision;
        self.disabled = desc.disabled;
        self.on_drop = desc.on_drop;
        self.on_active_change = desc.on_active_change;
        self.measure = desc.measure;
    }
}

/// Registry of drop targets owned by one provider.
pub struct Registry<D> {
    // Keyed by monotonic id, so iteration order is registration order.
    targets: BTreeMap<TargetId, DropTarget<D>>,
    ledger: BTreeMap<DraggableId, TargetId>,
    listeners: BTreeMap<ListenerId, Listener>,
    listener_ids: Counter,
}

impl<D> core::fmt::Debug for Registry<D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Registry")
            .field("targets", &self.targets.len())
            .field("occupied", &self.ledger.len())
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl<D> Default for Registry<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> Registry<D> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            targets: BTreeMap::new(),
            ledger: BTreeMap::new(),
            listeners: BTreeMap::new(),
            listener_ids: Counter::default(),
        }
    }

    /// Insert or replace the target `id`.
    ///
    /// Replacing keeps the target's occupancy and its place in registration order.
    /// A replacement whose capacity is below the current occupancy is rejected and
    /// leaves the target untouched.
    pub fn register(&mut self, id: TargetId, desc: DropTargetDescriptor<D>) -> Result<(), ConfigError> {
        desc.validate()?;
        if let Some(existing) = self.targets.get_mut(&id) {
            if let Some(capacity) = desc.capacity
                && capacity < existing.occupants
            {
                return Err(ConfigError::CapacityBelowOccupancy {
                    capacity,
                    occupants: existing.occupants,
                });
            }
            tracing::debug!(drop_target = ?id, external = %desc.external_id, "drop target replaced");
            existing.apply(desc);
            return Ok(());
        }
        tracing::debug!(drop_target = ?id, external = %desc.external_id, "drop target registered");
        let mut t = DropTarget {
            id,
            external_id: String::new(),
            rect: None,
            alignment: Alignment::default(),
            offset: Vec2::ZERO,
            capacity: None,
            collision: None,
            disabled: false,
            occupants: 0,
            on_drop: None,
            on_active_change: None,
            measure: None,
        };
        t.apply(desc);
        self.targets.insert(id, t);
        Ok(())
    }

    /// Replace the rectangle of `id`. Non-finite geometry is treated as "not ready".
    pub fn update_geometry(&mut self, id: TargetId, rect: Option<Rect>) {
        let Some(t) = self.targets.get_mut(&id) else {
            return;
        };
        t.rect = rect.filter(|r| {
            let ok = is_finite_rect(*r);
            if !ok {
                tracing::warn!(drop_target = ?id, "ignoring non-finite drop target geometry");
            }
            ok
        });
    }

    /// Enable or disable `id`.
    pub fn set_disabled(&mut self, id: TargetId, disabled: bool) {
        if let Some(t) = self.targets.get_mut(&id) {
            t.disabled = disabled;
        }
    }

    /// Remove `id`, returning whether it existed. Its occupants are released.
    pub fn unregister(&mut self, id: TargetId) -> bool {
        if self.targets.remove(&id).is_none() {
            return false;
        }
        self.ledger.retain(|_, t| *t != id);
        tracing::debug!(drop_target = ?id, "drop target unregistered");
        true
    }

    /// Look up a target.
    pub fn get(&self, id: TargetId) -> Option<&DropTarget<D>> {
        self.targets.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: TargetId) -> Option<&mut DropTarget<D>> {
        self.targets.get_mut(&id)
    }

    /// Whether `id` is registered.
    pub fn contains(&self, id: TargetId) -> bool {
        self.targets.contains_key(&id)
    }

    /// Number of registered targets.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// True if no target is registered.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Targets in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &DropTarget<D>> + '_ {
        self.targets.values()
    }

    /// Whether `draggable` may come to rest in `id`.
    pub fn has_capacity(&self, id: TargetId, draggable: DraggableId) -> bool {
        let Some(t) = self.targets.get(&id) else {
            return false;
        };
        !t.is_full() || self.ledger.get(&draggable) == Some(&id)
    }

    /// Resolve the active target for a dragged rectangle.
    pub fn resolve_active_target(
        &self,
        rect: Rect,
        algorithm: CollisionAlgorithm,
        draggable: DraggableId,
    ) -> Option<TargetId> {
        self.targets
            .values()
            .rev()
            .filter(|t| !t.disabled)
            .filter(|t| {
                t.rect
                    .is_some_and(|zone| collides(rect, zone, t.collision.unwrap_or(algorithm)))
            })
            .map(|t| t.id)
            .find(|&id| self.has_capacity(id, draggable))
    }

    /// Record `draggable` as resting in `id`, releasing any previous target.
    ///
    /// Returns `false` (and changes nothing) if `id` is unknown, disabled, or full.
    pub fn occupy(&mut self, draggable: DraggableId, id: TargetId) -> bool {
        if self.targets.get(&id).is_none_or(|t| t.disabled) || !self.has_capacity(id, draggable) {
            return false;
        }
        if self.ledger.get(&draggable) == Some(&id) {
            return true;
        }
        self.release(draggable);
        self.ledger.insert(draggable, id);
        if let Some(t) = self.targets.get_mut(&id) {
            t.occupants += 1;
            debug_assert!(
                t.capacity.is_none_or(|cap| t.occupants <= cap),
                "occupancy exceeded capacity"
            );
        }
        true
    }

    /// Release whatever target `draggable` rests in.
    pub fn release(&mut self, draggable: DraggableId) -> Option<TargetId> {
        let prev = self.ledger.remove(&draggable)?;
        if let Some(t) = self.targets.get_mut(&prev) {
            t.occupants -= 1;
        }
        Some(prev)
    }

    /// Target `draggable` currently rests in.
    pub fn occupant_of(&self, draggable: DraggableId) -> Option<TargetId> {
        self.ledger.get(&draggable).copied()
    }

    /// Draggable → target pairs, ordered by draggable.
    pub fn occupancy(&self) -> impl Iterator<Item = (DraggableId, TargetId)> + '_ {
        self.ledger.iter().map(|(d, t)| (*d, *t))
    }

    /// Re-measure every target that has a [`Measure`] source.
    pub fn remeasure(&mut self) {
        for t in self.targets.values_mut() {
            if let Some(m) = t.measure.as_mut() {
                t.rect = m.measure().filter(|r| is_finite_rect(*r));
            }
        }
    }

    /// Subscribe to position-update broadcasts.
    pub fn subscribe(&mut self, listener: impl FnMut() -> ListenerControl + 'static) -> ListenerId {
        let id = ListenerId(self.listener_ids.next());
        self.listeners.insert(id, Box::new(listener));
        id
    }

    /// Unsubscribe; unknown or already removed ids are ignored.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    /// Notify every position listener, dropping those that ask to be removed.
    pub fn notify_position_listeners(&mut self) {
        let ids: Vec<ListenerId> = self.listeners.keys().copied().collect();
        for id in ids {
            let Some(listener) = self.listeners.get_mut(&id) else {
                continue;
            };
            if listener() == ListenerControl::Remove {
                self.listeners.remove(&id);
            }
        }
    }

    pub(crate) fn external_id_owned(&self, id: TargetId) -> Option<String> {
        self.targets.get(&id).map(|t| t.external_id.to_owned())
    }
}

pub(crate) fn is_finite_rect(r: Rect) -> bool {
    r.is_finite()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use core::cell::Cell;

    const D1: DraggableId = DraggableId(1);
    const D2: DraggableId = DraggableId(2);

    fn zone(name: &str, r: Rect) -> DropTargetDescriptor<()> {
        DropTargetDescriptor::new(name).with_rect(r)
    }

    #[test]
    fn last_registered_wins_on_overlap() {
        let mut reg = Registry::new();
        reg.register(TargetId(1), zone("a", Rect::new(0.0, 0.0, 100.0, 100.0)))
            .unwrap();
        reg.register(TargetId(2), zone("b", Rect::new(0.0, 0.0, 100.0, 100.0)))
            .unwrap();
        let hit = reg.resolve_active_target(
            Rect::new(10.0, 10.0, 20.0, 20.0),
            CollisionAlgorithm::Intersect,
            D1,
        );
        assert_eq!(hit, Some(TargetId(2)));
    }

    #[test]
    fn replace_keeps_registration_order_and_occupancy() {
        let mut reg = Registry::new();
        reg.register(
            TargetId(1),
            zone("a", Rect::new(0.0, 0.0, 100.0, 100.0)).with_capacity(2),
        )
        .unwrap();
        reg.register(TargetId(2), zone("b", Rect::new(200.0, 0.0, 300.0, 100.0)))
            .unwrap();
        assert!(reg.occupy(D1, TargetId(1)));
        // Re-measure A to overlap B.
        reg.register(
            TargetId(1),
            zone("a", Rect::new(200.0, 0.0, 300.0, 100.0)).with_capacity(2),
        )
        .unwrap();
        assert_eq!(reg.get(TargetId(1)).unwrap().current_occupants(), 1);
        let hit = reg.resolve_active_target(
            Rect::new(210.0, 10.0, 220.0, 20.0),
            CollisionAlgorithm::Intersect,
            D2,
        );
        assert_eq!(hit, Some(TargetId(2)));
    }

    #[test]
    fn full_target_falls_through() {
        let mut reg = Registry::new();
        let r = Rect::new(0.0, 0.0, 100.0, 100.0);
        reg.register(TargetId(1), zone("a", r)).unwrap();
        reg.register(TargetId(2), zone("b", r).with_capacity(1)).unwrap();
        assert!(reg.occupy(D1, TargetId(2)));
        let item = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert_eq!(
            reg.resolve_active_target(item, CollisionAlgorithm::Intersect, D2),
            Some(TargetId(1))
        );
        // The resident itself still qualifies.
        assert_eq!(
            reg.resolve_active_target(item, CollisionAlgorithm::Intersect, D1),
            Some(TargetId(2))
        );
        assert!(!reg.occupy(D2, TargetId(2)));
        assert_eq!(reg.get(TargetId(2)).unwrap().current_occupants(), 1);
    }

    #[test]
    fn occupying_elsewhere_releases_previous() {
        let mut reg = Registry::new();
        reg.register(TargetId(1), zone("a", Rect::ZERO).with_capacity(1))
            .unwrap();
        reg.register(TargetId(2), zone("b", Rect::ZERO)).unwrap();
        assert!(reg.occupy(D1, TargetId(1)));
        assert!(reg.occupy(D1, TargetId(2)));
        assert_eq!(reg.get(TargetId(1)).unwrap().current_occupants(), 0);
        assert_eq!(reg.occupant_of(D1), Some(TargetId(2)));
        assert_eq!(reg.release(D1), Some(TargetId(2)));
        assert_eq!(reg.get(TargetId(2)).unwrap().current_occupants(), 0);
    }

    #[test]
    fn unknown_ids_are_noops() {
        let mut reg: Registry<()> = Registry::new();
        reg.update_geometry(TargetId(9), Some(Rect::ZERO));
        reg.set_disabled(TargetId(9), true);
        assert!(!reg.unregister(TargetId(9)));
        assert!(!reg.occupy(D1, TargetId(9)));
        assert_eq!(reg.release(D1), None);
        assert!(reg.get(TargetId(9)).is_none());
    }

    #[test]
    fn unregister_drops_ledger_entries() {
        let mut reg = Registry::new();
        reg.register(TargetId(1), zone("a", Rect::ZERO)).unwrap();
        assert!(reg.occupy(D1, TargetId(1)));
        assert!(reg.unregister(TargetId(1)));
        assert_eq!(reg.occupant_of(D1), None);
    }

    #[test]
    fn unmeasured_and_disabled_targets_never_match() {
        let mut reg = Registry::new();
        reg.register(TargetId(1), DropTargetDescriptor::<()>::new("pending"))
            .unwrap();
        reg.register(
            TargetId(2),
            zone("off", Rect::new(0.0, 0.0, 50.0, 50.0)).with_disabled(true),
        )
        .unwrap();
        let item = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(
            reg.resolve_active_target(item, CollisionAlgorithm::Intersect, D1),
            None
        );
        reg.set_disabled(TargetId(2), false);
        assert_eq!(
            reg.resolve_active_target(item, CollisionAlgorithm::Intersect, D1),
            Some(TargetId(2))
        );
    }

    #[test]
    fn target_override_beats_draggable_policy() {
        let mut reg = Registry::new();
        reg.register(
            TargetId(1),
            zone("contain", Rect::new(0.0, 0.0, 100.0, 100.0))
                .with_collision(CollisionAlgorithm::Contain),
        )
        .unwrap();
        let straddling = Rect::new(90.0, 10.0, 110.0, 20.0);
        assert_eq!(
            reg.resolve_active_target(straddling, CollisionAlgorithm::Intersect, D1),
            None
        );
    }

    #[test]
    fn validation_rejects_bad_descriptors() {
        let zero: DropTargetDescriptor<()> = DropTargetDescriptor::new("z").with_capacity(0);
        assert_eq!(zero.validate(), Err(ConfigError::ZeroCapacity));
        let nan: DropTargetDescriptor<()> =
            DropTargetDescriptor::new("n").with_rect(Rect::new(f64::NAN, 0.0, 1.0, 1.0));
        assert!(matches!(
            nan.validate(),
            Err(ConfigError::NonFiniteGeometry { .. })
        ));
    }

    #[test]
    fn remeasure_uses_measure_source() {
        let mut reg = Registry::new();
        let width = Rc::new(Cell::new(10.0));
        let w = width.clone();
        reg.register(
            TargetId(1),
            DropTargetDescriptor::<()>::new("m")
                .with_measure(move || Some(Rect::new(0.0, 0.0, w.get(), 10.0))),
        )
        .unwrap();
        assert_eq!(reg.get(TargetId(1)).unwrap().rect(), None);
        reg.remeasure();
        assert_eq!(
            reg.get(TargetId(1)).unwrap().rect(),
            Some(Rect::new(0.0, 0.0, 10.0, 10.0))
        );
        width.set(40.0);
        reg.remeasure();
        assert_eq!(reg.get(TargetId(1)).unwrap().rect().unwrap().width(), 40.0);
    }

    #[test]
    fn listeners_can_remove_themselves() {
        let mut reg: Registry<()> = Registry::new();
        let calls = Rc::new(Cell::new(0));
        let c1 = calls.clone();
        let once = reg.subscribe(move || {
            c1.set(c1.get() + 1);
            ListenerControl::Remove
        });
        let c2 = calls.clone();
        let _always = reg.subscribe(move || {
            c2.set(c2.get() + 1);
            ListenerControl::Keep
        });
        reg.notify_position_listeners();
        reg.notify_position_listeners();
        assert_eq!(calls.get(), 3);
        // Already gone; duplicate unsubscribe is harmless.
        assert!(!reg.unsubscribe(once));
    }
}
