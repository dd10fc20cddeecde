//! Segment and rectangle geometry for hammer/terrain tests
//!
//! Screen coordinates: x grows right, y grows down. Rectangles are
//! axis-aligned with `(x, y)` at the top-left corner.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (terrain obstacle)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// One side of a rectangle, in scan order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RectEdge {
    Top,
    Right,
    Bottom,
    Left,
}

impl RectEdge {
    /// Edge scan order used by every segment/rectangle query
    pub const SCAN_ORDER: [RectEdge; 4] = [
        RectEdge::Top,
        RectEdge::Right,
        RectEdge::Bottom,
        RectEdge::Left,
    ];

    /// Unit normal pointing out of the rectangle through this edge
    pub fn outward_normal(self) -> Vec2 {
        match self {
            RectEdge::Top => Vec2::NEG_Y,
            RectEdge::Right => Vec2::X,
            RectEdge::Bottom => Vec2::Y,
            RectEdge::Left => Vec2::NEG_X,
        }
    }
}

/// A segment/rectangle hit: the point and the edge it lies on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeHit {
    pub point: Vec2,
    pub edge: RectEdge,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Inclusive point containment
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }

    /// Endpoints of an edge, wound clockwise (top-left → top-right → ...)
    pub fn edge(&self, edge: RectEdge) -> (Vec2, Vec2) {
        let tl = Vec2::new(self.left(), self.top());
        let tr = Vec2::new(self.right(), self.top());
        let br = Vec2::new(self.right(), self.bottom());
        let bl = Vec2::new(self.left(), self.bottom());
        match edge {
            RectEdge::Top => (tl, tr),
            RectEdge::Right => (tr, br),
            RectEdge::Bottom => (br, bl),
            RectEdge::Left => (bl, tl),
        }
    }
}

/// Intersection point of segments `a1-a2` and `b1-b2`
///
/// Returns `None` for parallel or colinear segments (zero denominator) and
/// when the crossing lies outside either segment.
pub fn segment_intersection(a1: Vec2, a2: Vec2, b1: Vec2, b2: Vec2) -> Option<Vec2> {
    let da = a2 - a1;
    let db = b2 - b1;

    let denominator = da.x * db.y - da.y * db.x;
    if denominator == 0.0 {
        return None;
    }

    let offset = a1 - b1;
    let t1 = (offset.y * db.x - offset.x * db.y) / denominator;
    let t2 = (offset.y * da.x - offset.x * da.y) / denominator;

    if (0.0..=1.0).contains(&t1) && (0.0..=1.0).contains(&t2) {
        Some(a1 + da * t1)
    } else {
        None
    }
}

/// First edge (top, right, bottom, left) that segment `p1-p2` crosses
pub fn segment_rect_first_hit(p1: Vec2, p2: Vec2, rect: &Rect) -> Option<EdgeHit> {
    RectEdge::SCAN_ORDER.into_iter().find_map(|edge| {
        let (e1, e2) = rect.edge(edge);
        segment_intersection(p1, p2, e1, e2).map(|point| EdgeHit { point, edge })
    })
}

/// Point where segment `p1-p2` first crosses `rect`, scanning top, right, bottom, left
///
/// A segment entering through a corner or crossing two edges reports the
/// earlier edge in scan order, not the one nearest `p1`.
pub fn segment_rect_first_intersection(p1: Vec2, p2: Vec2, rect: &Rect) -> Option<Vec2> {
    segment_rect_first_hit(p1, p2, rect).map(|hit| hit.point)
}

/// Whether segment `p1-p2` crosses any edge of `rect`
pub fn segment_intersects_rect(p1: Vec2, p2: Vec2, rect: &Rect) -> bool {
    RectEdge::SCAN_ORDER.into_iter().any(|edge| {
        let (e1, e2) = rect.edge(edge);
        segment_intersection(p1, p2, e1, e2).is_some()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn v(x: f32, y: f32) -> Vec2 {
        Vec2::new(x, y)
    }

    #[test]
    fn test_crossing_segments() {
        let p = segment_intersection(v(0.0, 0.0), v(10.0, 10.0), v(0.0, 10.0), v(10.0, 0.0));
        let p = p.expect("diagonals cross");
        assert!((p - v(5.0, 5.0)).length() < 1e-5);
    }

    #[test]
    fn test_parallel_segments_miss() {
        assert!(segment_intersection(v(0.0, 0.0), v(10.0, 0.0), v(0.0, 5.0), v(10.0, 5.0)).is_none());
        // Colinear and overlapping still reports no intersection
        assert!(segment_intersection(v(0.0, 0.0), v(10.0, 0.0), v(5.0, 0.0), v(15.0, 0.0)).is_none());
    }

    #[test]
    fn test_segments_out_of_range() {
        // Lines cross at (5, 5) but the second segment stops short
        assert!(segment_intersection(v(0.0, 0.0), v(10.0, 10.0), v(0.0, 10.0), v(4.0, 6.0)).is_none());
    }

    #[test]
    fn test_zero_length_segment_misses() {
        assert!(segment_intersection(v(3.0, 3.0), v(3.0, 3.0), v(0.0, 0.0), v(10.0, 10.0)).is_none());
    }

    #[test]
    fn test_rect_first_intersection_prefers_top() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        // Crosses both top and bottom; top is first in scan order
        let p = segment_rect_first_intersection(v(5.0, -5.0), v(5.0, 15.0), &rect);
        assert_eq!(p, Some(v(5.0, 0.0)));

        // Same segment reversed still reports the top edge
        let p = segment_rect_first_intersection(v(5.0, 15.0), v(5.0, -5.0), &rect);
        assert_eq!(p, Some(v(5.0, 0.0)));
    }

    #[test]
    fn test_rect_single_edge_hits() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);

        let hit = segment_rect_first_hit(v(5.0, 5.0), v(20.0, 5.0), &rect).unwrap();
        assert_eq!(hit.edge, RectEdge::Right);
        assert!((hit.point - v(10.0, 5.0)).length() < 1e-4);

        let hit = segment_rect_first_hit(v(5.0, 5.0), v(5.0, 20.0), &rect).unwrap();
        assert_eq!(hit.edge, RectEdge::Bottom);
        assert!((hit.point - v(5.0, 10.0)).length() < 1e-4);

        let hit = segment_rect_first_hit(v(-5.0, 5.0), v(5.0, 5.0), &rect).unwrap();
        assert_eq!(hit.edge, RectEdge::Left);
        assert!((hit.point - v(0.0, 5.0)).length() < 1e-4);
    }

    #[test]
    fn test_segment_inside_rect_misses() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!segment_intersects_rect(v(2.0, 2.0), v(8.0, 8.0), &rect));
        assert!(segment_rect_first_intersection(v(2.0, 2.0), v(8.0, 8.0), &rect).is_none());
        assert!(rect.contains_point(v(2.0, 2.0)));
        assert!(rect.contains_point(v(10.0, 10.0)));
        assert!(!rect.contains_point(v(10.5, 5.0)));
    }

    #[test]
    fn test_outward_normals() {
        assert_eq!(RectEdge::Top.outward_normal(), v(0.0, -1.0));
        assert_eq!(RectEdge::Right.outward_normal(), v(1.0, 0.0));
        assert_eq!(RectEdge::Bottom.outward_normal(), v(0.0, 1.0));
        assert_eq!(RectEdge::Left.outward_normal(), v(-1.0, 0.0));
    }

    proptest! {
        #[test]
        fn prop_intersection_symmetric_under_endpoint_swap(
            ax1 in -50i32..50, ay1 in -50i32..50, ax2 in -50i32..50, ay2 in -50i32..50,
            bx1 in -50i32..50, by1 in -50i32..50, bx2 in -50i32..50, by2 in -50i32..50,
        ) {
            let a1 = v(ax1 as f32, ay1 as f32);
            let a2 = v(ax2 as f32, ay2 as f32);
            let b1 = v(bx1 as f32, by1 as f32);
            let b2 = v(bx2 as f32, by2 as f32);

            let forward = segment_intersection(a1, a2, b1, b2);
            let swapped = segment_intersection(a2, a1, b2, b1);
            prop_assert_eq!(forward.is_some(), swapped.is_some());
            if let (Some(p), Some(q)) = (forward, swapped) {
                prop_assert!((p - q).length() < 1e-3);
            }
        }

        #[test]
        fn prop_parallel_segments_never_intersect(
            x1 in -100.0f32..100.0, y1 in -100.0f32..100.0,
            len in 1.0f32..100.0, gap in 1.0f32..50.0,
        ) {
            let a1 = v(x1, y1);
            let a2 = v(x1 + len, y1);
            let b1 = v(x1, y1 + gap);
            let b2 = v(x1 + len, y1 + gap);
            prop_assert!(segment_intersection(a1, a2, b1, b2).is_none());
        }

        #[test]
        fn prop_rect_hit_lies_on_boundary(
            sx in -20.0f32..30.0, sy in -20.0f32..30.0,
            ex in -20.0f32..30.0, ey in -20.0f32..30.0,
        ) {
            let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
            if let Some(hit) = segment_rect_first_hit(v(sx, sy), v(ex, ey), &rect) {
                let p = hit.point;
                let eps = 1e-3;
                let on_edge = match hit.edge {
                    RectEdge::Top => (p.y - rect.top()).abs() < eps,
                    RectEdge::Right => (p.x - rect.right()).abs() < eps,
                    RectEdge::Bottom => (p.y - rect.bottom()).abs() < eps,
                    RectEdge::Left => (p.x - rect.left()).abs() < eps,
                };
                prop_assert!(on_edge);
                prop_assert!(segment_intersects_rect(v(sx, sy), v(ex, ey), &rect));
            }
        }
    }
}
