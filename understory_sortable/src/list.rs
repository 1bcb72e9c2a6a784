// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sortable list coordinator: drag one item along an axis and reorder as it moves.
//!
//! ## Positions
//!
//! Positions are leading offsets along the list axis, in content coordinates
//! (scrolling does not change an item's content position). While an item is
//! dragged, its position is its start slot's offset plus the gesture offset plus
//! whatever the list auto-scrolled since the drag began.
//!
//! ## Samples
//!
//! Every processed sample, and every auto-scroll step, maps the dragged item's
//! position to the nearest slot. When that slot differs from the item's current
//! slot the order store moves it there and a [`SortableEvent::Move`] is queued.
//!
//! ## Ending
//!
//! On end the item settles to its final slot. Cancelling moves it back to the
//! slot it started from and settles there.

use alloc::collections::VecDeque;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::time::Duration;

use kurbo::Vec2;
use understory_dnd::callback::{HandlerResult, isolate};
use understory_dnd::session::{Begin, DragSession, DraggableConfig, End, Phase, Tick};
use understory_dnd::types::DragAxes;

use crate::autoscroll::{AutoScrollConfig, AutoScrollState, AutoScroller};
use crate::error::{SortableError, positive};
use crate::layout::{Axis, SlotLayout};
use crate::order::{OrderMap, OrderStore};

/// Sortable list configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct SortableConfig {
    /// Primary axis.
    pub axis: Axis,
    /// Extent of every item along the axis. Required.
    pub item_extent: Option<f64>,
    /// Space between items.
    pub gap: f64,
    /// Space before the first item.
    pub leading_padding: f64,
    /// Hold time before a drag starts.
    pub press_delay: Duration,
    /// Duration of the settle into the final slot.
    pub settle_duration: Duration,
    /// Edge auto-scroll; `None` disables it.
    pub auto_scroll: Option<AutoScrollConfig>,
    /// Visible extent of the list along the axis; used by auto-scroll.
    pub viewport_extent: f64,
}

impl Default for SortableConfig {
    fn default() -> Self {
        Self {
            axis: Axis::Vertical,
            item_extent: None,
            gap: 0.0,
            leading_padding: 0.0,
            press_delay: Duration::ZERO,
            settle_duration: Duration::from_millis(200),
            auto_scroll: None,
            viewport_extent: 0.0,
        }
    }
}

impl SortableConfig {
    /// Configuration for `axis` with items of `item_extent`.
    pub fn new(axis: Axis, item_extent: f64) -> Self {
        Self {
            axis,
            item_extent: Some(item_extent),
            ..Self::default()
        }
    }

    /// Set the gap between items.
    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    /// Set the padding before the first item.
    pub fn with_leading_padding(mut self, padding: f64) -> Self {
        self.leading_padding = padding;
        self
    }

    /// Set the press delay.
    pub fn with_press_delay(mut self, delay: Duration) -> Self {
        self.press_delay = delay;
        self
    }

    /// Set the settle duration.
    pub fn with_settle_duration(mut self, duration: Duration) -> Self {
        self.settle_duration = duration;
        self
    }

    /// Enable edge auto-scroll in a viewport of `viewport_extent`.
    pub fn with_auto_scroll(mut self, config: AutoScrollConfig, viewport_extent: f64) -> Self {
        self.auto_scroll = Some(config);
        self.viewport_extent = viewport_extent;
        self
    }

    fn layout(&self) -> Result<SlotLayout, SortableError> {
        let extent = self.item_extent.ok_or(SortableError::MissingItemExtent)?;
        SlotLayout::new(self.axis, extent)?
            .with_gap(self.gap)?
            .with_leading_padding(self.leading_padding)
    }
}

/// Side effect queued by a [`SortableList`].
#[derive(Clone, Debug, PartialEq)]
pub enum SortableEvent<K> {
    /// Dragging started.
    DragStart {
        /// Dragged item.
        item: K,
        /// Its slot at start.
        slot: usize,
    },
    /// A sample was processed.
    Dragging {
        /// Dragged item.
        item: K,
        /// Item that occupied the slot under the dragged item, if another one.
        over: Option<K>,
        /// Leading offset of the dragged item.
        position: f64,
    },
    /// The order changed.
    Move {
        /// Moved item.
        item: K,
        /// Previous slot.
        from: usize,
        /// New slot.
        to: usize,
    },
    /// Auto-scroll direction changed.
    AutoScroll {
        /// New direction.
        state: AutoScrollState,
    },
    /// The gesture ended with the item in its final slot.
    Drop {
        /// Dropped item.
        item: K,
        /// Slot at drag start.
        from: usize,
        /// Final slot.
        to: usize,
    },
    /// The dragged item finished settling.
    Settled {
        /// Settled item.
        item: K,
    },
}

/// Receiver of sortable events. All methods default to doing nothing.
pub trait SortableObserver<K> {
    /// Dragging started.
    fn on_drag_start(&mut self, item: &K, slot: usize) -> HandlerResult {
        let _ = (item, slot);
        Ok(())
    }

    /// A sample was processed.
    fn on_dragging(&mut self, item: &K, over: Option<&K>, position: f64) -> HandlerResult {
        let _ = (item, over, position);
        Ok(())
    }

    /// `item` moved from slot `from` to slot `to`.
    fn on_move(&mut self, item: &K, from: usize, to: usize) -> HandlerResult {
        let _ = (item, from, to);
        Ok(())
    }

    /// Auto-scroll direction changed.
    fn on_auto_scroll(&mut self, state: AutoScrollState) -> HandlerResult {
        let _ = state;
        Ok(())
    }

    /// The gesture ended.
    fn on_drop(&mut self, item: &K, from: usize, to: usize) -> HandlerResult {
        let _ = (item, from, to);
        Ok(())
    }

    /// The item came to rest.
    fn on_settled(&mut self, item: &K) -> HandlerResult {
        let _ = item;
        Ok(())
    }
}

impl<K> SortableObserver<K> for () {}

#[derive(Clone, Debug)]
struct Active<K> {
    item: K,
    session: DragSession,
    /// Order at drag start, narrowed to the items that survived each sync.
    start_order: Arc<OrderMap<K>>,
    start_slot: usize,
    /// Leading offset of the item when the drag began.
    base: f64,
    slot: usize,
    scroll_origin: f64,
}

/// Drag-to-reorder coordinator for one list.
#[derive(Clone, Debug)]
pub struct SortableList<K> {
    layout: SlotLayout,
    drag: DraggableConfig,
    store: OrderStore<K>,
    scroller: Option<AutoScroller>,
    active: Option<Active<K>>,
    events: VecDeque<SortableEvent<K>>,
}

impl<K: Ord + Clone> SortableList<K> {
    /// Create a list over `items`, in display order.
    pub fn new(config: SortableConfig, items: impl IntoIterator<Item = K>) -> Result<Self, SortableError> {
        let layout = config.layout()?;
        let store = OrderStore::from_items(items)?;
        let scroller = match config.auto_scroll {
            Some(c) => Some(AutoScroller::new(
                c,
                positive("viewport extent", config.viewport_extent)?,
                layout.content_extent(store.get().len()),
            )?),
            None => None,
        };
        let axes = match config.axis {
            Axis::Vertical => DragAxes::Y,
            Axis::Horizontal => DragAxes::X,
        };
        let drag = DraggableConfig::default()
            .with_axes(axes)
            .with_press_delay(config.press_delay)
            .with_settle_duration(config.settle_duration);
        Ok(Self {
            layout,
            drag,
            store,
            scroller,
            active: None,
            events: VecDeque::new(),
        })
    }

    /// Slot geometry.
    pub fn layout(&self) -> &SlotLayout {
        &self.layout
    }

    /// Current order.
    pub fn order(&self) -> &OrderMap<K> {
        self.store.get()
    }

    /// Shareable snapshot of the current order.
    pub fn snapshot(&self) -> Arc<OrderMap<K>> {
        self.store.snapshot()
    }

    /// Auto-scroll driver, when enabled.
    pub fn scroller(&self) -> Option<&AutoScroller> {
        self.scroller.as_ref()
    }

    /// Item being dragged or settling.
    pub fn active_item(&self) -> Option<&K> {
        self.active.as_ref().map(|a| &a.item)
    }

    /// Phase of the active item; `Idle` when there is none.
    pub fn phase(&self) -> Phase {
        self.active.as_ref().map_or(Phase::Idle, |a| a.session.phase())
    }

    fn scroll(&self) -> f64 {
        self.scroller.as_ref().map_or(0.0, AutoScroller::offset)
    }

    fn position_of(&self, a: &Active<K>) -> f64 {
        a.base
            + self.layout.axis().along(a.session.offset())
            + (self.scroll() - a.scroll_origin)
    }

    /// Leading offset where `item` should be drawn, in content coordinates.
    pub fn visual_offset(&self, item: &K) -> Option<f64> {
        if let Some(a) = self.active.as_ref()
            && a.item == *item
            && a.session.phase() != Phase::Idle
        {
            return Some(self.position_of(a));
        }
        self.store.get().slot_of(item).map(|s| self.layout.offset_of(s))
    }

    /// Set the visible extent along the axis. Non-positive extents are ignored.
    pub fn set_viewport_extent(&mut self, extent: f64) {
        if positive("viewport extent", extent).is_err() {
            return;
        }
        let content = self.layout.content_extent(self.store.get().len());
        if let Some(s) = self.scroller.as_mut() {
            s.set_extents(extent, content);
        }
    }

    /// Scroll to `offset`, as after a user or programmatic scroll.
    pub fn set_scroll_offset(&mut self, offset: f64) {
        if let Some(s) = self.scroller.as_mut() {
            s.set_offset(offset);
        }
        self.resample();
    }

    /// Re-derive the order from the current data set, keeping relative order.
    ///
    /// A dragged item that disappeared ends its drag without events. For one
    /// that survived, the starting slot is re-derived from the surviving items
    /// that preceded it, so cancelling still restores its place among them.
    /// The dragged item stays where it is drawn.
    pub fn sync(&mut self, items: impl IntoIterator<Item = K>) {
        self.store.sync(items);
        let order = self.store.get();
        let content = self.layout.content_extent(order.len());
        if let Some(s) = self.scroller.as_mut() {
            let visible = s.viewport();
            s.set_extents(visible, content);
        }
        let Some(a) = self.active.as_mut() else {
            return;
        };
        match order.slot_of(&a.item) {
            Some(slot) => {
                a.slot = slot;
                let start = a.start_order.synced(order.iter().cloned());
                a.start_slot = start.slot_of(&a.item).unwrap_or(slot);
                a.start_order = Arc::new(start);
            }
            None => {
                tracing::debug!("dragged item removed from the list");
                self.active = None;
                if let Some(s) = self.scroller.as_mut() {
                    s.stop();
                }
            }
        }
    }

    /// Gesture began on `item`. Returns `false` if ignored.
    pub fn begin(&mut self, item: &K) -> bool {
        if self.active.is_some() {
            return false;
        }
        let Some(slot) = self.store.get().slot_of(item) else {
            return false;
        };
        let mut session = DragSession::new(self.drag.clone());
        session.set_origin(Some(self.layout.slot_rect(slot, 0.0)));
        let begun = session.begin();
        self.active = Some(Active {
            item: item.clone(),
            session,
            start_order: self.store.snapshot(),
            start_slot: slot,
            base: self.layout.offset_of(slot),
            slot,
            scroll_origin: self.scroll(),
        });
        match begun {
            Begin::Started => self.started(),
            Begin::Armed => {}
            Begin::Ignored => {
                self.active = None;
                return false;
            }
        }
        true
    }

    fn started(&mut self) {
        let scroll = self.scroll();
        let Some(a) = self.active.as_mut() else {
            return;
        };
        a.scroll_origin = scroll;
        tracing::debug!(slot = a.slot, "sortable drag started");
        self.events.push_back(SortableEvent::DragStart {
            item: a.item.clone(),
            slot: a.slot,
        });
        self.resample();
    }

    /// Apply a gesture delta to the dragged item.
    pub fn update(&mut self, delta: Vec2) {
        let Some(a) = self.active.as_mut() else {
            return;
        };
        if a.session.update(delta) {
            self.resample();
        }
    }

    fn resample(&mut self) {
        let Some(a) = self.active.as_ref() else {
            return;
        };
        if a.session.phase() != Phase::Dragging {
            return;
        }
        let position = self.position_of(a);
        let scroll = self.scroll();
        let order = self.store.get();
        let target = self.layout.slot_at(position, order.len());
        let over = target
            .and_then(|s| order.item_at(s))
            .filter(|k| **k != a.item)
            .cloned();
        let item = a.item.clone();
        tracing::trace!(position, ?target, "sortable sample");

        if let Some(to) = target
            && let Some(m) = self.store.move_to_slot(&item, to)
        {
            if let Some(a) = self.active.as_mut() {
                a.slot = m.to;
            }
            self.events.push_back(SortableEvent::Move {
                item: m.item,
                from: m.from,
                to: m.to,
            });
        }
        self.events.push_back(SortableEvent::Dragging {
            item,
            over,
            position,
        });

        if let Some(s) = self.scroller.as_mut() {
            let before = s.state();
            let local = position - scroll;
            let after = s.observe(local, local + self.layout.item_extent());
            if after != before {
                self.events.push_back(SortableEvent::AutoScroll { state: after });
            }
        }
    }

    /// Gesture ended: settle into the current slot.
    pub fn end(&mut self) {
        self.finish(false);
    }

    /// Gesture cancelled: restore the starting slot and settle there.
    pub fn cancel(&mut self) {
        self.finish(true);
    }

    fn finish(&mut self, revert: bool) {
        let scroll = self.scroll();
        let Some(a) = self.active.as_mut() else {
            return;
        };
        if a.session.phase() != Phase::Dragging {
            if a.session.end(None) == End::NotDragging && a.session.phase() == Phase::Idle {
                // Released during the press delay.
                self.active = None;
            }
            return;
        }
        if let Some(s) = self.scroller.as_mut()
            && s.state() != AutoScrollState::None
        {
            s.stop();
            self.events.push_back(SortableEvent::AutoScroll {
                state: AutoScrollState::None,
            });
        }
        if revert {
            let home = a.start_slot.min(self.store.get().len().saturating_sub(1));
            if let Some(m) = self.store.move_to_slot(&a.item, home) {
                a.slot = m.to;
                self.events.push_back(SortableEvent::Move {
                    item: m.item,
                    from: m.from,
                    to: m.to,
                });
            }
        } else {
            tracing::debug!(from = a.start_slot, to = a.slot, "sortable drop");
            self.events.push_back(SortableEvent::Drop {
                item: a.item.clone(),
                from: a.start_slot,
                to: a.slot,
            });
        }
        let destination = self.layout.offset_of(a.slot) - a.base - (scroll - a.scroll_origin);
        let end = a.session.end(Some(self.layout.axis().vector(destination)));
        if end == End::Settled {
            self.settled();
        }
    }

    fn settled(&mut self) {
        if let Some(a) = self.active.take() {
            self.events.push_back(SortableEvent::Settled { item: a.item });
        }
    }

    /// Advance press delay, settle, and auto-scroll by `dt`.
    pub fn tick(&mut self, dt: Duration) {
        let Some(a) = self.active.as_mut() else {
            return;
        };
        match a.session.tick(dt) {
            Tick::Activated => self.started(),
            Tick::Settled => {
                self.settled();
                return;
            }
            Tick::Idle | Tick::Settling => {}
        }
        if self.phase() != Phase::Dragging {
            return;
        }
        let Some(s) = self.scroller.as_mut() else {
            return;
        };
        let before = s.state();
        let moved = s.tick(dt);
        let after = s.state();
        if after != before {
            self.events.push_back(SortableEvent::AutoScroll { state: after });
        }
        if moved != 0.0 {
            self.resample();
        }
    }

    /// Number of undelivered events.
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    /// Take all queued events, oldest first.
    pub fn take_events(&mut self) -> Vec<SortableEvent<K>> {
        self.events.drain(..).collect()
    }

    /// Deliver queued events to `observer` in order; failures are contained.
    pub fn dispatch(&mut self, observer: &mut impl SortableObserver<K>) {
        while let Some(ev) = self.events.pop_front() {
            match ev {
                SortableEvent::DragStart { item, slot } => {
                    isolate("on_drag_start", || observer.on_drag_start(&item, slot));
                }
                SortableEvent::Dragging {
                    item,
                    over,
                    position,
                } => {
                    isolate("on_dragging", || {
                        observer.on_dragging(&item, over.as_ref(), position)
                    });
                }
                SortableEvent::Move { item, from, to } => {
                    isolate("on_move", || observer.on_move(&item, from, to));
                }
                SortableEvent::AutoScroll { state } => {
                    isolate("on_auto_scroll", || observer.on_auto_scroll(state));
                }
                SortableEvent::Drop { item, from, to } => {
                    isolate("on_drop", || observer.on_drop(&item, from, to));
                }
                SortableEvent::Settled { item } => {
                    isolate("on_settled", || observer.on_settled(&item));
                }
            }
        }
    }
}
