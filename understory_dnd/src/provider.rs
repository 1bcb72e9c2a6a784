// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drop provider: one coordination scope owning targets, draggables, and the event queue.
//!
//! ## Overview
//!
//! A [`DropProvider`] is created per screen. It owns a [`Registry`], one
//! [`DragSession`] per draggable, and a FIFO of [`DragEvent`]s. Nothing is shared
//! between providers; ids come from counters owned by the provider.
//!
//! ## Lifecycle
//!
//! - Targets: [`register_drop_target`](DropProvider::register_drop_target) on mount,
//!   [`on_geometry_changed`](DropProvider::on_geometry_changed) on layout,
//!   [`unregister_drop_target`](DropProvider::unregister_drop_target) on unmount.
//! - Gestures: [`begin`](DropProvider::begin), [`update`](DropProvider::update),
//!   [`end`](DropProvider::end) or [`cancel`](DropProvider::cancel), and
//!   [`tick`](DropProvider::tick) from the host frame clock for press delays and settles.
//! - Side effects: [`dispatch`](DropProvider::dispatch) delivers queued events, or
//!   [`take_events`](DropProvider::take_events) hands them to the host to deliver elsewhere.
//!
//! State transitions are committed before any handler runs, so a failing handler
//! can never leave a session stuck in `Dragging` or `Animating`.
//!
//! ## Example
//!
//! ```
//! use core::time::Duration;
//! use kurbo::{Rect, Vec2};
//! use understory_dnd::provider::DropProvider;
//! use understory_dnd::registry::DropTargetDescriptor;
//! use understory_dnd::session::{DraggableConfig, Phase};
//!
//! let mut p: DropProvider<&'static str> = DropProvider::new();
//! let zone = p
//!     .register_drop_target(
//!         DropTargetDescriptor::new("bin").with_rect(Rect::new(100.0, 0.0, 200.0, 100.0)),
//!     )
//!     .unwrap();
//! let card = p.register_draggable(DraggableConfig::default(), "card").unwrap();
//! p.set_draggable_origin(card, Some(Rect::new(0.0, 0.0, 20.0, 20.0)));
//!
//! p.begin(card);
//! p.update(card, Vec2::new(120.0, 10.0));
//! assert_eq!(p.active_target(card), Some(zone));
//! p.end(card);
//! p.tick(Duration::from_secs(1));
//! assert_eq!(p.phase(card), Some(Phase::Idle));
//! assert_eq!(p.registry().get(zone).unwrap().current_occupants(), 1);
//! ```

use alloc::boxed::Box;
use alloc::collections::{BTreeMap, VecDeque};
use alloc::string::String;
use alloc::vec::Vec;
use core::time::Duration;

use kurbo::{Point, Rect, Vec2};

use crate::callback::isolate;
use crate::error::ConfigError;
use crate::event::{DragEvent, DragObserver, DroppedItem};
use crate::hover::{HoverEvent, HoverState};
use crate::registry::{DropInfo, DropTargetDescriptor, ListenerControl, Measure, Registry};
use crate::session::{Begin, DragSession, DraggableConfig, End, Phase, Tick};
use crate::types::{Counter, DraggableId, ListenerId, TargetId};

struct Draggable<D> {
    session: DragSession,
    hover: HoverState<TargetId>,
    data: D,
    measure: Option<Box<dyn Measure>>,
}

/// Coordination scope for free-form drag and drop.
pub struct DropProvider<D> {
    registry: Registry<D>,
    draggables: BTreeMap<DraggableId, Draggable<D>>,
    target_ids: Counter,
    draggable_ids: Counter,
    queue: VecDeque<DragEvent<D>>,
}

impl<D> core::fmt::Debug for DropProvider<D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DropProvider")
            .field("registry", &self.registry)
            .field("draggables", &self.draggables.len())
            .field("queued", &self.queue.len())
            .finish_non_exhaustive()
    }
}

impl<D: Clone> Default for DropProvider<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Clone> DropProvider<D> {
    /// Create an empty provider.
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
            draggables: BTreeMap::new(),
            target_ids: Counter::default(),
            draggable_ids: Counter::default(),
            queue: VecDeque::new(),
        }
    }

    /// The target registry.
    pub fn registry(&self) -> &Registry<D> {
        &self.registry
    }

    // --- drop targets ---

    /// Mount a drop target.
    pub fn register_drop_target(
        &mut self,
        desc: DropTargetDescriptor<D>,
    ) -> Result<TargetId, ConfigError> {
        desc.validate()?;
        let id = TargetId(self.target_ids.next());
        self.registry.register(id, desc)?;
        Ok(id)
    }

    /// Replace a mounted target's descriptor; occupancy and registration order are kept.
    ///
    /// Unknown ids are ignored.
    pub fn update_drop_target(
        &mut self,
        id: TargetId,
        desc: DropTargetDescriptor<D>,
    ) -> Result<(), ConfigError> {
        desc.validate()?;
        if self.registry.contains(id) {
            let disabled = desc.disabled;
            self.registry.register(id, desc)?;
            if disabled {
                self.deactivate(id);
            }
        }
        Ok(())
    }

    /// Record a fresh measurement of a target.
    pub fn on_geometry_changed(&mut self, id: TargetId, rect: Option<Rect>) {
        self.registry.update_geometry(id, rect);
    }

    /// Enable or disable a target.
    ///
    /// Disabling a target that is active for an in-flight drag deactivates it
    /// right away; the drag continues with no active target until the next sample.
    pub fn set_drop_target_disabled(&mut self, id: TargetId, disabled: bool) {
        if !self.registry.contains(id) {
            return;
        }
        self.registry.set_disabled(id, disabled);
        if disabled {
            self.deactivate(id);
        }
    }

    /// Drop `id` as the active target of every in-flight drag, reporting the leave.
    fn deactivate(&mut self, id: TargetId) {
        for (&draggable, d) in &mut self.draggables {
            if d.hover.forget(id) {
                tracing::debug!(?draggable, drop_target = ?id, "active drop target disabled");
                self.queue.push_back(DragEvent::ActiveChange {
                    target: id,
                    draggable,
                    active: false,
                });
            }
        }
    }

    /// Unmount a target. Sessions hovering it fall back to "no active target".
    pub fn unregister_drop_target(&mut self, id: TargetId) {
        let had_occupants = self.registry.occupancy().any(|(_, t)| t == id);
        if !self.registry.unregister(id) {
            return;
        }
        for d in self.draggables.values_mut() {
            d.hover.forget(id);
        }
        if had_occupants {
            self.push_dropped_items();
        }
    }

    // --- draggables ---

    /// Register a draggable carrying `data`.
    pub fn register_draggable(
        &mut self,
        config: DraggableConfig,
        data: D,
    ) -> Result<DraggableId, ConfigError> {
        config.validate()?;
        let id = DraggableId(self.draggable_ids.next());
        self.draggables.insert(
            id,
            Draggable {
                session: DragSession::new(config),
                hover: HoverState::new(),
                data,
                measure: None,
            },
        );
        tracing::debug!(draggable = ?id, "draggable registered");
        Ok(id)
    }

    /// Remove a draggable, releasing its resting slot.
    pub fn unregister_draggable(&mut self, id: DraggableId) {
        let Some(mut d) = self.draggables.remove(&id) else {
            return;
        };
        if let Some(target) = d.hover.current() {
            d.hover.clear();
            self.queue.push_back(DragEvent::ActiveChange {
                target,
                draggable: id,
                active: false,
            });
        }
        if self.registry.release(id).is_some() {
            self.push_dropped_items();
        }
    }

    /// Replace a draggable's configuration.
    pub fn set_draggable_config(
        &mut self,
        id: DraggableId,
        config: DraggableConfig,
    ) -> Result<(), ConfigError> {
        config.validate()?;
        if let Some(d) = self.draggables.get_mut(&id) {
            d.session.set_config(config);
        }
        Ok(())
    }

    /// Replace a draggable's payload.
    pub fn set_draggable_data(&mut self, id: DraggableId, data: D) {
        if let Some(d) = self.draggables.get_mut(&id) {
            d.data = data;
        }
    }

    /// Record the draggable's layout rectangle (before any drag offset).
    pub fn set_draggable_origin(&mut self, id: DraggableId, rect: Option<Rect>) {
        if let Some(d) = self.draggables.get_mut(&id) {
            d.session.set_origin(rect);
        }
    }

    /// Attach a measurement source used at drag start and on position updates.
    pub fn set_draggable_measure(&mut self, id: DraggableId, measure: impl Measure + 'static) {
        if let Some(d) = self.draggables.get_mut(&id) {
            d.measure = Some(Box::new(measure));
        }
    }

    /// Phase of a draggable.
    pub fn phase(&self, id: DraggableId) -> Option<Phase> {
        self.draggables.get(&id).map(|d| d.session.phase())
    }

    /// Session of a draggable.
    pub fn session(&self, id: DraggableId) -> Option<&DragSession> {
        self.draggables.get(&id).map(|d| &d.session)
    }

    /// Active target of a draggable.
    pub fn active_target(&self, id: DraggableId) -> Option<TargetId> {
        self.draggables.get(&id).and_then(|d| d.hover.current())
    }

    /// Draggables currently resting in targets.
    pub fn dropped_items(&self) -> Vec<DroppedItem> {
        self.registry
            .occupancy()
            .filter_map(|(draggable, target)| {
                Some(DroppedItem {
                    draggable,
                    target,
                    external_id: self.registry.get(target)?.external_id().into(),
                })
            })
            .collect()
    }

    // --- gestures ---

    /// Gesture began on `id`.
    pub fn begin(&mut self, id: DraggableId) {
        let Some(d) = self.draggables.get_mut(&id) else {
            return;
        };
        if d.session.phase() == Phase::Idle
            && let Some(m) = d.measure.as_mut()
        {
            let origin = m.measure();
            d.session.set_origin(origin);
        }
        match d.session.begin() {
            Begin::Started => self.started(id),
            Begin::Armed => tracing::trace!(draggable = ?id, "drag armed"),
            Begin::Ignored => {}
        }
    }

    fn started(&mut self, id: DraggableId) {
        let Some(d) = self.draggables.get(&id) else {
            return;
        };
        let position = d.session.position().unwrap_or(Point::ORIGIN);
        tracing::debug!(draggable = ?id, ?position, "drag started");
        self.queue.push_back(DragEvent::PhaseChanged {
            draggable: id,
            phase: Phase::Dragging,
        });
        self.queue.push_back(DragEvent::DragStart {
            draggable: id,
            position,
        });
        self.resample(id);
    }

    /// Apply a gesture delta to `id`.
    pub fn update(&mut self, id: DraggableId, delta: Vec2) {
        let Some(d) = self.draggables.get_mut(&id) else {
            return;
        };
        if d.session.update(delta) {
            self.resample(id);
        }
    }

    /// Re-resolve the active target of a dragging `id` and queue what changed.
    fn resample(&mut self, id: DraggableId) {
        let Some(d) = self.draggables.get_mut(&id) else {
            return;
        };
        if d.session.phase() != Phase::Dragging {
            return;
        }
        let algorithm = d.session.config().collision;
        let over = d
            .session
            .rect()
            .and_then(|r| self.registry.resolve_active_target(r, algorithm, id));
        let transition = d.hover.update(over);
        let position = d.session.position().unwrap_or(Point::ORIGIN);
        tracing::trace!(draggable = ?id, ?over, ?position, "drag sample");
        for ev in transition.events() {
            let (target, active) = match ev {
                HoverEvent::Enter(t) => (t, true),
                HoverEvent::Leave(t) => (t, false),
            };
            self.queue.push_back(DragEvent::ActiveChange {
                target,
                draggable: id,
                active,
            });
        }
        self.queue.push_back(DragEvent::Dragging {
            draggable: id,
            over,
            position,
        });
    }

    /// Gesture ended on `id`: drop onto the active target if it can still accept.
    pub fn end(&mut self, id: DraggableId) {
        self.finish(id, true);
    }

    /// Gesture was cancelled by the host; behaves like a drop with no target.
    pub fn cancel(&mut self, id: DraggableId) {
        self.finish(id, false);
    }

    fn finish(&mut self, id: DraggableId, accept: bool) {
        let Some(d) = self.draggables.get_mut(&id) else {
            return;
        };
        if d.session.phase() != Phase::Dragging {
            // Released during a press delay, or not dragging at all.
            d.session.end(None);
            return;
        }
        let position = d.session.position().unwrap_or(Point::ORIGIN);
        let candidate = d.hover.current();
        d.hover.clear();
        if let Some(target) = candidate {
            self.queue.push_back(DragEvent::ActiveChange {
                target,
                draggable: id,
                active: false,
            });
        }

        let origin = d.session.origin();
        let mut accepted = None;
        if accept
            && let (Some(target), Some(origin)) = (candidate, origin)
            && let Some(anchor) = self
                .registry
                .get(target)
                .and_then(|t| t.anchor_for(origin))
            && self.registry.occupy(id, target)
        {
            accepted = Some((target, anchor));
        }

        let ledger_changed = match accepted {
            Some((target, anchor)) => {
                let external_id: String = self.registry.external_id_owned(target).unwrap_or_default();
                tracing::debug!(draggable = ?id, drop_target = ?target, "drop accepted");
                self.queue.push_back(DragEvent::Dropped {
                    draggable: id,
                    target,
                    external_id,
                    data: d.data.clone(),
                    position: anchor,
                });
                true
            }
            None => {
                if candidate.is_some() && accept {
                    tracing::debug!(draggable = ?id, "drop rejected, settling to origin");
                }
                self.registry.release(id).is_some()
            }
        };
        if ledger_changed {
            self.push_dropped_items();
        }

        let destination = accepted.and_then(|(_, anchor)| origin.map(|o| anchor - o.origin()));
        let Some(d) = self.draggables.get_mut(&id) else {
            return;
        };
        let end = d.session.end(destination);
        self.queue.push_back(DragEvent::PhaseChanged {
            draggable: id,
            phase: Phase::Animating,
        });
        self.queue.push_back(DragEvent::DragEnd {
            draggable: id,
            target: accepted.map(|(t, _)| t),
            position,
        });
        if end == End::Settled {
            self.queue.push_back(DragEvent::PhaseChanged {
                draggable: id,
                phase: Phase::Idle,
            });
        }
    }

    /// Advance press delays and settles by `dt`.
    pub fn tick(&mut self, dt: Duration) {
        let ids: Vec<DraggableId> = self.draggables.keys().copied().collect();
        for id in ids {
            let Some(d) = self.draggables.get_mut(&id) else {
                continue;
            };
            match d.session.tick(dt) {
                Tick::Activated => self.started(id),
                Tick::Settled => {
                    tracing::debug!(draggable = ?id, "settled");
                    self.queue.push_back(DragEvent::PhaseChanged {
                        draggable: id,
                        phase: Phase::Idle,
                    });
                }
                Tick::Idle | Tick::Settling => {}
            }
        }
    }

    // --- position updates ---

    /// Re-measure all targets and idle draggables, notify listeners, and
    /// re-resolve active targets of in-flight drags.
    ///
    /// Call after programmatic scrolling or any layout change the host cannot
    /// attribute to one view.
    pub fn request_position_update(&mut self) {
        self.registry.remeasure();
        for d in self.draggables.values_mut() {
            if d.session.phase() == Phase::Idle
                && let Some(m) = d.measure.as_mut()
            {
                let origin = m.measure();
                d.session.set_origin(origin);
            }
        }
        self.registry.notify_position_listeners();
        let dragging: Vec<DraggableId> = self
            .draggables
            .iter()
            .filter(|(_, d)| d.session.phase() == Phase::Dragging)
            .map(|(id, _)| *id)
            .collect();
        for id in dragging {
            self.resample(id);
        }
    }

    /// Subscribe to position-update broadcasts.
    pub fn subscribe_position_updates(
        &mut self,
        listener: impl FnMut() -> ListenerControl + 'static,
    ) -> ListenerId {
        self.registry.subscribe(listener)
    }

    /// Unsubscribe a position listener.
    pub fn unsubscribe_position_updates(&mut self, id: ListenerId) {
        self.registry.unsubscribe(id);
    }

    // --- side effects ---

    fn push_dropped_items(&mut self) {
        let items = self.dropped_items();
        self.queue.push_back(DragEvent::DroppedItemsChanged { items });
    }

    /// Number of undelivered events.
    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    /// Take all queued events, oldest first, without invoking handlers.
    pub fn take_events(&mut self) -> Vec<DragEvent<D>> {
        self.queue.drain(..).collect()
    }

    /// Deliver queued events in order: target handlers, then `observer`.
    ///
    /// Handler failures are contained and logged; delivery continues with the next event.
    pub fn dispatch(&mut self, observer: &mut impl DragObserver<D>) {
        while let Some(ev) = self.queue.pop_front() {
            match ev {
                DragEvent::PhaseChanged { draggable, phase } => {
                    isolate("on_phase_change", || observer.on_phase_change(draggable, phase));
                }
                DragEvent::DragStart {
                    draggable,
                    position,
                } => {
                    isolate("on_drag_start", || observer.on_drag_start(draggable, position));
                }
                DragEvent::Dragging {
                    draggable,
                    over,
                    position,
                } => {
                    isolate("on_dragging", || {
                        observer.on_dragging(draggable, over, position)
                    });
                }
                DragEvent::ActiveChange { target, active, .. } => {
                    if let Some(h) = self
                        .registry
                        .get_mut(target)
                        .and_then(|t| t.on_active_change.as_mut())
                    {
                        isolate("on_active_change", || h(active));
                    }
                }
                DragEvent::Dropped {
                    draggable,
                    target,
                    external_id,
                    data,
                    position,
                } => {
                    if let Some(h) = self
                        .registry
                        .get_mut(target)
                        .and_then(|t| t.on_drop.as_mut())
                    {
                        let info = DropInfo {
                            target,
                            external_id: &external_id,
                            draggable,
                            data: &data,
                            position,
                        };
                        isolate("on_drop", || h(&info));
                    }
                    isolate("on_target_drop", || {
                        observer.on_target_drop(draggable, target, &data)
                    });
                }
                DragEvent::DragEnd {
                    draggable,
                    target,
                    position,
                } => {
                    isolate("on_drop", || observer.on_drop(draggable, target, position));
                }
                DragEvent::DroppedItemsChanged { items } => {
                    isolate("on_dropped_items_update", || {
                        observer.on_dropped_items_update(&items)
                    });
                }
            }
        }
    }
}
