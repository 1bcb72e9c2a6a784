// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collision policies between a dragged rectangle and a candidate drop zone.
//!
//! ## Overview
//!
//! All policies work on world-space, axis-aligned [`Rect`]s and are pure.
//! Rectangles are normalized with [`Rect::abs`], so inverted inputs behave
//! like their positive-size counterparts.
//!
//! - [`CollisionAlgorithm::Center`]: the dragged centroid lies inside the candidate (edges inclusive).
//! - [`CollisionAlgorithm::Intersect`]: the two boxes overlap on both axes by a non-zero amount.
//! - [`CollisionAlgorithm::Contain`]: the candidate fully encloses the dragged box.
//!
//! Zero-area or non-finite rectangles never collide under any policy.
//!
//! ```
//! use kurbo::Rect;
//! use understory_dnd::collision::{CollisionAlgorithm, collides};
//!
//! let zone = Rect::new(0.0, 0.0, 100.0, 100.0);
//! let item = Rect::new(80.0, 80.0, 120.0, 120.0);
//! assert!(collides(item, zone, CollisionAlgorithm::Intersect));
//! assert!(!collides(item, zone, CollisionAlgorithm::Contain));
//! assert!(collides(item, zone, CollisionAlgorithm::Center));
//! ```

use kurbo::Rect;

/// Geometric rule deciding whether a draggable qualifies for a drop zone.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum CollisionAlgorithm {
    /// The centroid of the dragged box lies within the zone, inclusive of edges.
    Center,
    /// The boxes overlap on both axes by a non-zero amount.
    #[default]
    Intersect,
    /// The zone fully encloses the dragged box.
    Contain,
}

/// Test `dragged` against `candidate` under `algorithm`.
pub fn collides(dragged: Rect, candidate: Rect, algorithm: CollisionAlgorithm) -> bool {
    let (Some(d), Some(c)) = (solid(dragged), solid(candidate)) else {
        return false;
    };
    match algorithm {
        CollisionAlgorithm::Center => {
            let p = d.center();
            c.x0 <= p.x && p.x <= c.x1 && c.y0 <= p.y && p.y <= c.y1
        }
        CollisionAlgorithm::Intersect => d.x0 < c.x1 && c.x0 < d.x1 && d.y0 < c.y1 && c.y0 < d.y1,
        CollisionAlgorithm::Contain => {
            c.x0 <= d.x0 && d.x1 <= c.x1 && c.y0 <= d.y0 && d.y1 <= c.y1
        }
    }
}

/// Normalized rectangle with positive, finite area, or `None`.
fn solid(r: Rect) -> Option<Rect> {
    if !r.is_finite() {
        return None;
    }
    let r = r.abs();
    (r.width() > 0.0 && r.height() > 0.0).then_some(r)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ZONE: Rect = Rect::new(0.0, 0.0, 100.0, 100.0);

    #[test]
    fn intersect_requires_positive_overlap() {
        assert!(collides(
            Rect::new(90.0, 90.0, 110.0, 110.0),
            ZONE,
            CollisionAlgorithm::Intersect
        ));
        // Touching edges share no area.
        assert!(!collides(
            Rect::new(100.0, 0.0, 150.0, 50.0),
            ZONE,
            CollisionAlgorithm::Intersect
        ));
    }

    #[test]
    fn contain_is_inclusive_of_edges() {
        assert!(collides(ZONE, ZONE, CollisionAlgorithm::Contain));
        assert!(!collides(
            Rect::new(-1.0, 0.0, 50.0, 50.0),
            ZONE,
            CollisionAlgorithm::Contain
        ));
    }

    #[test]
    fn center_uses_dragged_centroid() {
        // Centroid at (100, 50): on the right edge, still inside.
        assert!(collides(
            Rect::new(90.0, 40.0, 110.0, 60.0),
            ZONE,
            CollisionAlgorithm::Center
        ));
        // Centroid at (105, 50): outside even though the boxes overlap.
        assert!(!collides(
            Rect::new(95.0, 40.0, 115.0, 60.0),
            ZONE,
            CollisionAlgorithm::Center
        ));
    }

    #[test]
    fn zero_area_never_collides() {
        let line = Rect::new(10.0, 10.0, 10.0, 90.0);
        for alg in [
            CollisionAlgorithm::Center,
            CollisionAlgorithm::Intersect,
            CollisionAlgorithm::Contain,
        ] {
            assert!(!collides(line, ZONE, alg), "{alg:?}");
            assert!(!collides(ZONE, line, alg), "{alg:?}");
        }
    }

    #[test]
    fn non_finite_never_collides() {
        let bad = Rect::new(f64::NAN, 0.0, 10.0, 10.0);
        assert!(!collides(bad, ZONE, CollisionAlgorithm::Intersect));
        assert!(!collides(ZONE, bad, CollisionAlgorithm::Center));
    }

    #[test]
    fn inverted_rects_are_normalized() {
        let inverted = Rect::new(60.0, 60.0, 40.0, 40.0);
        assert!(collides(inverted, ZONE, CollisionAlgorithm::Contain));
        assert_eq!(solid(inverted), Some(Rect::new(40.0, 40.0, 60.0, 60.0)));
        let inverted_zone = Rect::new(100.0, 100.0, 0.0, 0.0);
        assert!(collides(
            Rect::new(90.0, 90.0, 110.0, 110.0),
            inverted_zone,
            CollisionAlgorithm::Intersect
        ));
    }
}
