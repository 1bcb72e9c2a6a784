// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Identifiers, drop alignment, and axis flags shared by the registry and sessions.

use kurbo::{Point, Rect, Size, Vec2};

/// Identifier of a registered drop target.
///
/// Allocated from a counter owned by one [`DropProvider`](crate::provider::DropProvider),
/// so ids from different providers are unrelated. Ids are never reused; a larger id
/// was registered later, which is what the overlap tie-break relies on.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct TargetId(pub(crate) u64);

/// Identifier of a draggable known to a provider.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DraggableId(pub(crate) u64);

/// Opaque key of a position listener.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ListenerId(pub(crate) u64);

macro_rules! raw_accessor {
    ($($ty:ident),*) => {$(
        impl $ty {
            /// Raw counter value, useful for logging and host-side maps.
            pub const fn get(self) -> u64 {
                self.0
            }
        }
    )*};
}

raw_accessor!(TargetId, DraggableId, ListenerId);

/// Monotonic id source scoped to one owner.
#[derive(Clone, Debug, Default)]
pub(crate) struct Counter(u64);

impl Counter {
    pub(crate) fn next(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }
}

bitflags::bitflags! {
    /// Axes along which a draggable may move.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct DragAxes: u8 {
        /// Horizontal movement is allowed.
        const X = 0b0000_0001;
        /// Vertical movement is allowed.
        const Y = 0b0000_0010;
    }
}

impl Default for DragAxes {
    fn default() -> Self {
        Self::X | Self::Y
    }
}

impl DragAxes {
    /// Zero out the components of `delta` along locked axes.
    pub fn filter(self, delta: Vec2) -> Vec2 {
        Vec2::new(
            if self.contains(Self::X) { delta.x } else { 0.0 },
            if self.contains(Self::Y) { delta.y } else { 0.0 },
        )
    }
}

/// Where a dropped item comes to rest inside its target.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Alignment {
    /// Top-left corner.
    TopLeft,
    /// Centered along the top edge.
    TopCenter,
    /// Top-right corner.
    TopRight,
    /// Centered along the left edge.
    CenterLeft,
    /// Centered in both axes.
    #[default]
    Center,
    /// Centered along the right edge.
    CenterRight,
    /// Bottom-left corner.
    BottomLeft,
    /// Centered along the bottom edge.
    BottomCenter,
    /// Bottom-right corner.
    BottomRight,
}

impl Alignment {
    /// Top-left origin for an item of `item` size anchored inside `zone`.
    pub fn place(self, zone: Rect, item: Size) -> Point {
        let (fx, fy) = match self {
            Self::TopLeft => (0.0, 0.0),
            Self::TopCenter => (0.5, 0.0),
            Self::TopRight => (1.0, 0.0),
            Self::CenterLeft => (0.0, 0.5),
            Self::Center => (0.5, 0.5),
            Self::CenterRight => (1.0, 0.5),
            Self::BottomLeft => (0.0, 1.0),
            Self::BottomCenter => (0.5, 1.0),
            Self::BottomRight => (1.0, 1.0),
        };
        Point::new(
            zone.x0 + (zone.width() - item.width) * fx,
            zone.y0 + (zone.height() - item.height) * fy,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_is_monotonic() {
        let mut c = Counter::default();
        assert_eq!(c.next(), 1);
        assert_eq!(c.next(), 2);
    }

    #[test]
    fn axes_filter_locks_components() {
        let d = Vec2::new(3.0, 4.0);
        assert_eq!(DragAxes::X.filter(d), Vec2::new(3.0, 0.0));
        assert_eq!(DragAxes::Y.filter(d), Vec2::new(0.0, 4.0));
        assert_eq!(DragAxes::default().filter(d), d);
    }

    #[test]
    fn alignment_places_item_inside_zone() {
        let zone = Rect::new(100.0, 100.0, 200.0, 160.0);
        let item = Size::new(20.0, 10.0);
        assert_eq!(Alignment::TopLeft.place(zone, item), Point::new(100.0, 100.0));
        assert_eq!(Alignment::Center.place(zone, item), Point::new(140.0, 125.0));
        assert_eq!(
            Alignment::BottomRight.place(zone, item),
            Point::new(180.0, 150.0)
        );
        assert_eq!(
            Alignment::CenterRight.place(zone, item),
            Point::new(180.0, 125.0)
        );
    }
}
