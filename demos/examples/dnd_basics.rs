// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Free-form drag and drop: a card dragged over two trays.
//!
//! Shows target registration, hover transitions, an accepted drop with anchor
//! alignment, and a rejected drop onto a full tray.
//!
//! Run:
//! - `RUST_LOG=understory_dnd=debug cargo run -p understory_demos --example dnd_basics`

use core::time::Duration;

use kurbo::{Point, Rect, Vec2};
use understory_dnd::callback::HandlerResult;
use understory_dnd::event::{DragObserver, DroppedItem};
use understory_dnd::registry::DropTargetDescriptor;
use understory_dnd::{Alignment, DraggableConfig, DraggableId, DropProvider, Phase, TargetId};

struct Printer;

impl DragObserver<&'static str> for Printer {
    fn on_drag_start(&mut self, draggable: DraggableId, position: Point) -> HandlerResult {
        println!("drag start  {draggable:?} at {position:?}");
        Ok(())
    }

    fn on_drop(
        &mut self,
        draggable: DraggableId,
        target: Option<TargetId>,
        position: Point,
    ) -> HandlerResult {
        println!("released    {draggable:?} at {position:?} onto {target:?}");
        Ok(())
    }

    fn on_phase_change(&mut self, draggable: DraggableId, phase: Phase) -> HandlerResult {
        println!("phase       {draggable:?} -> {phase:?}");
        Ok(())
    }

    fn on_dropped_items_update(&mut self, items: &[DroppedItem]) -> HandlerResult {
        let names: Vec<_> = items.iter().map(|i| i.external_id.as_str()).collect();
        println!("resting in  {names:?}");
        Ok(())
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut provider: DropProvider<&'static str> = DropProvider::new();

    let inbox = provider
        .register_drop_target(
            DropTargetDescriptor::new("inbox")
                .with_rect(Rect::new(200.0, 0.0, 400.0, 120.0))
                .with_alignment(Alignment::TopLeft, Vec2::new(8.0, 8.0))
                .with_capacity(1)
                .on_active_change(|active| {
                    println!("inbox       {}", if active { "highlighted" } else { "normal" });
                    Ok(())
                })
                .on_drop(|info| {
                    println!("inbox       received {:?} at {:?}", info.data, info.position);
                    Ok(())
                }),
        )
        .expect("valid target");
    let archive = provider
        .register_drop_target(
            DropTargetDescriptor::new("archive").with_rect(Rect::new(200.0, 200.0, 400.0, 320.0)),
        )
        .expect("valid target");
    tracing::info!(?inbox, ?archive, "targets registered");

    let config = DraggableConfig::default().with_settle_duration(Duration::from_millis(120));
    let mut cards = Vec::new();
    for (i, name) in ["invoice", "receipt"].into_iter().enumerate() {
        let id = provider
            .register_draggable(config.clone(), name)
            .expect("valid draggable");
        let y = i as f64 * 60.0;
        provider.set_draggable_origin(id, Some(Rect::new(0.0, y, 80.0, y + 40.0)));
        cards.push(id);
    }

    let frame = Duration::from_millis(16);
    for &card in &cards {
        provider.begin(card);
        // Sweep right toward the inbox in small steps, like a finger would.
        for _ in 0..25 {
            provider.update(card, Vec2::new(10.0, 0.0));
            provider.tick(frame);
        }
        provider.end(card);
        while provider.phase(card) == Some(Phase::Animating) {
            provider.tick(frame);
        }
        provider.dispatch(&mut Printer);
        println!(
            "settled     {card:?} at {:?}\n",
            provider.session(card).and_then(|s| s.rect())
        );
    }
}
