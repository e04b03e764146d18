// Copyright 2025 the Vojo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Intersection testing between path segments.

use crate::{CubicBez, Line, ParamCurve, PathSeg, QuadBez};

/// Subdivision stops here even if the halves are not yet flat. Curves of
/// reasonable magnitude flatten out far earlier.
const MAX_HIT_DEPTH: usize = 24;

/// Parametric locations of an intersection between two segments.
///
/// Coincident lines intersect without a meaningful parameter; both
/// locations are recorded as `-1` in that case.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegHit {
    /// Location of the hit on the primary segment, in `[0, 1]` or `-1`.
    pub h0: f64,
    /// Location of the hit on the secondary segment, in `[0, 1]` or `-1`.
    pub h1: f64,
}

impl SegHit {
    fn new(h0: f64, h1: f64) -> SegHit {
        let norm = |h: f64| if h >= 0.0 && h <= 1.0 { h } else { -1.0 };
        SegHit {
            h0: norm(h0),
            h1: norm(h1),
        }
    }

    fn swapped(self) -> SegHit {
        SegHit {
            h0: self.h1,
            h1: self.h0,
        }
    }
}

impl PathSeg {
    /// Finds an intersection of this segment with another, if one exists.
    ///
    /// Curved segments are tested by recursive midpoint subdivision: each
    /// half that is flat enough is tested as its chord, and the winning
    /// parameter is mapped back up through the halving. The first hit
    /// found is returned, which for multiply-intersecting curves is the
    /// one in the most-subdivided leading half.
    ///
    /// Returns `None` if either segment has a non-finite coordinate.
    pub fn hit(&self, other: &PathSeg) -> Option<SegHit> {
        if !self.is_finite() || !other.is_finite() {
            return None;
        }
        match (*self, *other) {
            (PathSeg::Line(a), PathSeg::Line(b)) => hit_line_line(a, b),
            (PathSeg::Line(a), PathSeg::Quad(b)) => {
                hit_quad_line(b, a, 0).map(SegHit::swapped)
            }
            (PathSeg::Line(a), PathSeg::Cubic(b)) => {
                hit_cubic_line(b, a, 0).map(SegHit::swapped)
            }
            (PathSeg::Quad(a), PathSeg::Line(b)) => hit_quad_line(a, b, 0),
            (PathSeg::Quad(a), PathSeg::Quad(b)) => hit_quad_quad(a, b, 0),
            (PathSeg::Quad(a), PathSeg::Cubic(b)) => {
                hit_cubic_quad(b, a, 0).map(SegHit::swapped)
            }
            (PathSeg::Cubic(a), PathSeg::Line(b)) => hit_cubic_line(a, b, 0),
            (PathSeg::Cubic(a), PathSeg::Quad(b)) => hit_cubic_quad(a, b, 0),
            (PathSeg::Cubic(a), PathSeg::Cubic(b)) => hit_cubic_cubic(a, b, 0),
        }
    }

    /// Whether this segment intersects another.
    #[inline]
    pub fn crosses(&self, other: &PathSeg) -> bool {
        self.hit(other).is_some()
    }
}

fn hit_line_line(a: Line, b: Line) -> Option<SegHit> {
    let num1 = (a.p0.y - b.p0.y) * (b.p1.x - b.p0.x) - (a.p0.x - b.p0.x) * (b.p1.y - b.p0.y);
    let num2 = (a.p0.y - b.p0.y) * (a.p1.x - a.p0.x) - (a.p0.x - b.p0.x) * (a.p1.y - a.p0.y);
    let den = (a.p1.x - a.p0.x) * (b.p1.y - b.p0.y) - (a.p1.y - a.p0.y) * (b.p1.x - b.p0.x);

    // Parametric locations of the intersection on each line.
    let r = num1 / den;
    let s = num2 / den;

    // Coincident lines divide 0/0 above; the NaN parameters pass this
    // filter and are normalized to -1.
    if r < 0.0 || r > 1.0 || s < 0.0 || s > 1.0 {
        return None;
    }
    Some(SegHit::new(r, s))
}

fn hit_quad_line(q: QuadBez, l: Line, depth: usize) -> Option<SegHit> {
    if depth >= MAX_HIT_DEPTH || q.is_line() {
        return hit_line_line(Line::new(q.p0, q.p2), l);
    }
    let (q0, q1) = q.subdivide();
    if let Some(mut hit) = hit_quad_line(q0, l, depth + 1) {
        hit.h0 /= 2.0;
        return Some(hit);
    }
    if let Some(mut hit) = hit_quad_line(q1, l, depth + 1) {
        hit.h0 = hit.h0 / 2.0 + 0.5;
        return Some(hit);
    }
    None
}

fn hit_quad_quad(q: QuadBez, other: QuadBez, depth: usize) -> Option<SegHit> {
    if depth >= MAX_HIT_DEPTH || q.is_line() {
        return hit_quad_line(other, Line::new(q.p0, q.p2), 0).map(SegHit::swapped);
    }
    let (q0, q1) = q.subdivide();
    if let Some(mut hit) = hit_quad_quad(q0, other, depth + 1) {
        hit.h0 /= 2.0;
        return Some(hit);
    }
    if let Some(mut hit) = hit_quad_quad(q1, other, depth + 1) {
        hit.h0 = hit.h0 / 2.0 + 0.5;
        return Some(hit);
    }
    None
}

fn hit_cubic_line(c: CubicBez, l: Line, depth: usize) -> Option<SegHit> {
    if depth >= MAX_HIT_DEPTH || c.is_line() {
        return hit_line_line(Line::new(c.p0, c.p3), l);
    }
    let (c0, c1) = c.subdivide();
    if let Some(mut hit) = hit_cubic_line(c0, l, depth + 1) {
        hit.h0 /= 2.0;
        return Some(hit);
    }
    if let Some(mut hit) = hit_cubic_line(c1, l, depth + 1) {
        hit.h0 = hit.h0 / 2.0 + 0.5;
        return Some(hit);
    }
    None
}

fn hit_cubic_quad(c: CubicBez, other: QuadBez, depth: usize) -> Option<SegHit> {
    if depth >= MAX_HIT_DEPTH || c.is_line() {
        return hit_quad_line(other, Line::new(c.p0, c.p3), 0).map(SegHit::swapped);
    }
    let (c0, c1) = c.subdivide();
    if let Some(mut hit) = hit_cubic_quad(c0, other, depth + 1) {
        hit.h0 /= 2.0;
        return Some(hit);
    }
    if let Some(mut hit) = hit_cubic_quad(c1, other, depth + 1) {
        hit.h0 = hit.h0 / 2.0 + 0.5;
        return Some(hit);
    }
    None
}

fn hit_cubic_cubic(c: CubicBez, other: CubicBez, depth: usize) -> Option<SegHit> {
    if depth >= MAX_HIT_DEPTH || c.is_line() {
        return hit_cubic_line(other, Line::new(c.p0, c.p3), 0).map(SegHit::swapped);
    }
    let (c0, c1) = c.subdivide();
    if let Some(mut hit) = hit_cubic_cubic(c0, other, depth + 1) {
        hit.h0 /= 2.0;
        return Some(hit);
    }
    if let Some(mut hit) = hit_cubic_cubic(c1, other, depth + 1) {
        hit.h0 = hit.h0 / 2.0 + 0.5;
        return Some(hit);
    }
    None
}

#[cfg(test)]
mod tests {
    use crate::{CubicBez, Line, PathSeg, QuadBez};

    #[test]
    fn line_line_crossing() {
        let a = PathSeg::Line(Line::new((0.0, 0.0), (10.0, 10.0)));
        let b = PathSeg::Line(Line::new((10.0, 0.0), (0.0, 10.0)));
        let hit = a.hit(&b).unwrap();
        assert!((hit.h0 - 0.5).abs() < 1e-12);
        assert!((hit.h1 - 0.5).abs() < 1e-12);
    }

    #[test]
    fn line_line_miss() {
        let a = PathSeg::Line(Line::new((0.0, 0.0), (10.0, 0.0)));
        let b = PathSeg::Line(Line::new((0.0, 1.0), (10.0, 1.0)));
        assert_eq!(a.hit(&b), None);
        assert!(!a.crosses(&b));
    }

    #[test]
    fn line_line_shared_endpoint() {
        let a = PathSeg::Line(Line::new((0.0, 0.0), (5.0, 5.0)));
        let b = PathSeg::Line(Line::new((5.0, 5.0), (10.0, 0.0)));
        let hit = a.hit(&b).unwrap();
        assert!((hit.h0 - 1.0).abs() < 1e-12);
        assert!(hit.h1.abs() < 1e-12);
    }

    #[test]
    fn line_line_coincident() {
        // Overlapping collinear lines report a hit, but there is no
        // single parameter for it.
        let a = PathSeg::Line(Line::new((0.0, 0.0), (10.0, 0.0)));
        let b = PathSeg::Line(Line::new((5.0, 0.0), (15.0, 0.0)));
        let hit = a.hit(&b).unwrap();
        assert_eq!(hit.h0, -1.0);
        assert_eq!(hit.h1, -1.0);
    }

    #[test]
    fn quad_line_hit() {
        let q = PathSeg::Quad(QuadBez::new((0.0, 0.0), (5.0, 10.0), (10.0, 0.0)));
        let l = PathSeg::Line(Line::new((5.0, -1.0), (5.0, 11.0)));
        let hit = q.hit(&l).unwrap();
        // The arch tops out at (5, 5), halfway along both segments.
        assert!((hit.h0 - 0.5).abs() < 0.01);
        assert!((hit.h1 - 0.5).abs() < 0.01);

        let above = PathSeg::Line(Line::new((0.0, 6.0), (10.0, 6.0)));
        assert_eq!(q.hit(&above), None);
    }

    #[test]
    fn quad_quad_hit() {
        let up = PathSeg::Quad(QuadBez::new((0.0, 0.0), (5.0, 10.0), (10.0, 0.0)));
        let down = PathSeg::Quad(QuadBez::new((0.0, 5.0), (5.0, -5.0), (10.0, 5.0)));
        assert!(up.crosses(&down));
        assert!(down.crosses(&up));
    }

    #[test]
    fn cubic_cubic_hit() {
        let rising = PathSeg::Cubic(CubicBez::new(
            (0.0, 0.0),
            (10.0, 0.0),
            (0.0, 10.0),
            (10.0, 10.0),
        ));
        let falling = PathSeg::Cubic(CubicBez::new(
            (0.0, 10.0),
            (10.0, 10.0),
            (0.0, 0.0),
            (10.0, 0.0),
        ));
        let hit = rising.hit(&falling).unwrap();
        assert!((hit.h0 - 0.5).abs() < 0.05);
        assert!((hit.h1 - 0.5).abs() < 0.05);

        let far = PathSeg::Cubic(CubicBez::new(
            (0.0, 20.0),
            (10.0, 20.0),
            (0.0, 30.0),
            (10.0, 30.0),
        ));
        assert!(!rising.crosses(&far));
    }

    #[test]
    fn hit_is_symmetric() {
        // Mixed-kind pairs share one computation, so the swap is exact.
        let q = PathSeg::Quad(QuadBez::new((0.0, 0.0), (5.0, 10.0), (10.0, 0.0)));
        let l = PathSeg::Line(Line::new((5.0, -1.0), (5.0, 11.0)));
        let ql = q.hit(&l).unwrap();
        let lq = l.hit(&q).unwrap();
        assert_eq!((lq.h0, lq.h1), (ql.h1, ql.h0));

        // Line pairs solve the same determinant either way around.
        let a = PathSeg::Line(Line::new((0.0, 0.0), (10.0, 0.0)));
        let b = PathSeg::Line(Line::new((2.0, -1.0), (2.0, 3.0)));
        let ab = a.hit(&b).unwrap();
        assert!((ab.h0 - 0.2).abs() < 1e-12);
        assert!((ab.h1 - 0.25).abs() < 1e-12);
        let ba = b.hit(&a).unwrap();
        assert_eq!((ba.h0, ba.h1), (ab.h1, ab.h0));

        // Same-kind pairs subdivide whichever segment is asked, so the
        // swap only holds within the flattening tolerance.
        let rising = PathSeg::Cubic(CubicBez::new(
            (0.0, 0.0),
            (10.0, 0.0),
            (0.0, 10.0),
            (10.0, 10.0),
        ));
        let falling = PathSeg::Cubic(CubicBez::new(
            (0.0, 10.0),
            (10.0, 10.0),
            (0.0, 0.0),
            (10.0, 0.0),
        ));
        let rf = rising.hit(&falling).unwrap();
        let fr = falling.hit(&rising).unwrap();
        assert!((rf.h0 - fr.h1).abs() < 0.05);
        assert!((rf.h1 - fr.h0).abs() < 0.05);
    }

    #[test]
    fn non_finite_never_hits() {
        let a = PathSeg::Line(Line::new((0.0, 0.0), (f64::NAN, 0.0)));
        let b = PathSeg::Line(Line::new((0.0, -1.0), (0.0, 1.0)));
        assert_eq!(a.hit(&b), None);
    }
}
