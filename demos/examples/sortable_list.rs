// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag-to-reorder with edge auto-scroll.
//!
//! A 30-row list in a 240-unit viewport. The first row is dragged to the bottom
//! edge and held there while the list scrolls, then released.
//!
//! Run:
//! - `RUST_LOG=understory_sortable=debug cargo run -p understory_demos --example sortable_list`

use core::time::Duration;

use kurbo::Vec2;
use understory_dnd::callback::HandlerResult;
use understory_sortable::autoscroll::{AutoScrollConfig, AutoScrollState};
use understory_sortable::layout::Axis;
use understory_sortable::{SortableConfig, SortableList, SortableObserver};

struct Printer;

impl SortableObserver<String> for Printer {
    fn on_move(&mut self, item: &String, from: usize, to: usize) -> HandlerResult {
        println!("move      {item}: {from} -> {to}");
        Ok(())
    }

    fn on_auto_scroll(&mut self, state: AutoScrollState) -> HandlerResult {
        println!("scroll    {state:?}");
        Ok(())
    }

    fn on_drop(&mut self, item: &String, from: usize, to: usize) -> HandlerResult {
        println!("drop      {item}: {from} -> {to}");
        Ok(())
    }

    fn on_settled(&mut self, item: &String) -> HandlerResult {
        println!("settled   {item}");
        Ok(())
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let rows: Vec<String> = (1..=30).map(|i| format!("row-{i:02}")).collect();
    let config = SortableConfig::new(Axis::Vertical, 40.0)
        .with_gap(4.0)
        .with_auto_scroll(AutoScrollConfig::default().with_speed(400.0), 240.0);
    let mut list = SortableList::new(config, rows.iter().cloned()).expect("valid list");

    let frame = Duration::from_millis(16);
    list.begin(&rows[0]);
    for _ in 0..10 {
        list.update(Vec2::new(0.0, 20.0));
        list.tick(frame);
    }
    // Hold still at the edge for half a second.
    for _ in 0..30 {
        list.tick(frame);
    }
    list.dispatch(&mut Printer);
    let offset = list.scroller().map_or(0.0, |s| s.offset());
    tracing::info!(offset, "held at the trailing edge");

    list.end();
    while list.active_item().is_some() {
        list.tick(frame);
    }
    list.dispatch(&mut Printer);

    // A row is deleted upstream; the rest keep their order.
    let mut remaining: Vec<String> = list.order().iter().cloned().collect();
    remaining.retain(|r| r != "row-05");
    list.sync(remaining);
    let head: Vec<_> = list.order().iter().take(6).collect();
    println!("order     {head:?} ...");
}
