// Copyright 2025 the Vojo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A generic trait for shapes.

use crate::{
    segments, Affine, CubicBez, Line, ParamCurve, ParamCurveArea, ParamCurveExtrema, Path2D,
    PathEl, PathSeg, Point, QuadBez, Rect, Segments,
};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// A generic trait for open and closed shapes.
///
/// This trait provides conversion from shapes to [`PathEl`] iterators and
/// a rich set of geometry queries derived from that one conversion:
/// winding and containment, pairwise shape predicates, distance, and
/// bounds. Concrete shapes override the derived methods where a closed
/// form is cheaper.
pub trait Shape: Sized {
    /// The iterator returned by the [`path_iter`] method.
    ///
    /// [`path_iter`]: Shape::path_iter
    type PathIter<'iter>: Iterator<Item = PathEl> + 'iter
    where
        Self: 'iter;

    /// Returns an iterator over this shape expressed as path elements.
    fn path_iter(&self) -> Self::PathIter<'_>;

    /// Returns an iterator over this shape expressed as Bézier segments.
    ///
    /// A subpath is closed into a segment only by an explicit
    /// [`PathEl::ClosePath`]; the winding and containment queries below
    /// additionally treat every subpath as closed.
    fn segments(&self) -> Segments<Self::PathIter<'_>> {
        segments(self.path_iter())
    }

    /// Converts to a concrete path.
    fn to_path(&self) -> Path2D {
        self.path_iter().collect()
    }

    /// Signed area.
    ///
    /// This method only produces meaningful results with closed shapes.
    ///
    /// The convention for positive area is that y increases when x is
    /// positive. Thus, it is clockwise when down is increasing y (the
    /// usual convention for graphics), and anticlockwise when up is
    /// increasing y (the usual convention for math).
    fn area(&self) -> f64 {
        self.segments().map(|seg| seg.signed_area()).sum()
    }

    /// Total length of perimeter.
    fn perimeter(&self) -> f64 {
        self.segments().map(|seg| seg.arclen()).sum()
    }

    /// The winding number of a point.
    ///
    /// This is the sum of horizontal ray crossings of all subpaths, with
    /// each subpath counted as if it were closed back to its start
    /// point. Points on the boundary may report either side.
    ///
    /// The sign here follows the same convention as [`area`]: a point
    /// inside a clockwise path (in y-down terms) has positive winding.
    ///
    /// [`area`]: Shape::area
    fn winding(&self, pt: Point) -> i32 {
        let mut crossings = 0;
        let mut start = Point::ZERO;
        let mut last = Point::ZERO;
        for el in self.path_iter() {
            match el {
                PathEl::MoveTo(p) => {
                    // Close off any open subpath before starting anew.
                    if last.y != start.y {
                        crossings += Line::new(last, start).winding(pt);
                    }
                    start = p;
                    last = p;
                }
                PathEl::LineTo(p) => {
                    crossings += Line::new(last, p).winding(pt);
                    last = p;
                }
                PathEl::QuadTo(p1, p2) => {
                    crossings += QuadBez::new(last, p1, p2).winding(pt);
                    last = p2;
                }
                PathEl::CurveTo(p1, p2, p3) => {
                    crossings += CubicBez::new(last, p1, p2, p3).winding(pt);
                    last = p3;
                }
                PathEl::ClosePath => {
                    if last.y != start.y {
                        crossings += Line::new(last, start).winding(pt);
                        last = start;
                    }
                }
            }
        }
        crossings
    }

    /// The smallest rectangle that encloses the shape.
    ///
    /// Curved segments contribute their exact extrema, not their control
    /// points, so the box is tight.
    fn bounding_box(&self) -> Rect {
        path_bounds(self.path_iter())
    }

    /// If the shape is a rectangle, make it available.
    fn as_rect(&self) -> Option<Rect> {
        None
    }

    /// Whether a point lies inside the shape, by the nonzero winding
    /// rule.
    fn contains(&self, pt: Point) -> bool {
        self.bounding_box().contains(pt) && self.winding(pt) != 0
    }

    /// Whether this shape entirely contains another.
    ///
    /// True when every segment of the other shape lies inside this one.
    fn contains_shape<S: Shape>(&self, other: &S) -> bool {
        if !self.bounding_box().contains_rect(other.bounding_box()) {
            return false;
        }
        other.segments().all(|seg| self.contains_seg(&seg))
    }

    /// Whether this shape and another share any area.
    fn intersects_shape<S: Shape>(&self, other: &S) -> bool {
        let bounds = self.bounding_box();
        let other_bounds = other.bounding_box();
        if !bounds.intersects(other_bounds) {
            return false;
        }
        // A shape nested strictly inside this one shares no segment
        // crossings, so probe with the inner shape's segments instead.
        if other_bounds.contains_rect(bounds) && other_bounds != bounds {
            return other.intersects_shape(self);
        }
        other.segments().any(|seg| self.intersects_seg(&seg))
    }

    /// Whether a segment lies entirely inside this shape.
    ///
    /// Both endpoints must be inside; a curved segment additionally must
    /// not cross the boundary.
    fn contains_seg(&self, seg: &PathSeg) -> bool {
        if !self.contains(seg.start()) || !self.contains(seg.end()) {
            return false;
        }
        if matches!(seg, PathSeg::Line(_)) {
            return true;
        }
        !self.crosses_seg(seg)
    }

    /// Whether a segment touches any area of this shape, crossing the
    /// boundary or lying inside it.
    fn intersects_seg(&self, seg: &PathSeg) -> bool {
        self.crosses_seg(seg) || self.contains(seg.start())
    }

    /// Whether a segment crosses the boundary of this shape.
    fn crosses_seg(&self, seg: &PathSeg) -> bool {
        if !self.bounding_box().intersects(seg.bounding_box()) {
            return false;
        }
        self.segments().any(|s| s.crosses(seg))
    }

    /// The distance from a point to the boundary of this shape.
    ///
    /// Returns infinity for a shape with no segments. Points inside the
    /// shape report their distance to the nearest boundary, not zero.
    fn distance(&self, pt: Point) -> f64 {
        let mut best = f64::INFINITY;
        for seg in self.segments() {
            best = best.min(seg.distance_sq(pt));
        }
        best.sqrt()
    }

    /// Whether the point is within a stroke of the given width traced
    /// along the boundary, or inside the shape itself.
    ///
    /// Widths of one or less fall back to plain containment.
    fn contains_with_width(&self, pt: Point, line_width: f64) -> bool {
        if line_width <= 1.0 {
            return self.contains(pt);
        }
        let half = line_width / 2.0;
        let bounds = self.bounding_box().inflate(half, half);
        if !bounds.contains(pt) {
            return false;
        }
        self.distance(pt) <= half || self.contains(pt)
    }

    /// Whether the shape draws with lines alone.
    fn is_flat(&self) -> bool {
        !self
            .path_iter()
            .any(|el| matches!(el, PathEl::QuadTo(..) | PathEl::CurveTo(..)))
    }

    /// Approximates the shape with lines alone.
    ///
    /// Curves are subdivided until their control points sit within
    /// `tolerance` of the chord. Subdivided chords shorter than
    /// `tolerance` are dropped outright, so a tiny tolerance yields a
    /// fine polyline and a huge one collapses the shape.
    fn flattened(&self, tolerance: f64) -> Path2D {
        let mut path = Path2D::new();
        for el in self.path_iter() {
            match el {
                PathEl::MoveTo(p) => path.move_to(p),
                PathEl::LineTo(p) => path.line_to(p),
                PathEl::QuadTo(p1, p2) => path.quad_to_flat(p1, p2, tolerance),
                PathEl::CurveTo(p1, p2, p3) => path.curve_to_flat(p1, p2, p3, tolerance),
                PathEl::ClosePath => path.close(),
            }
        }
        path
    }

    /// Whether all drawing happens in a single subpath.
    ///
    /// Move elements after the last drawn segment do not count against
    /// this.
    fn is_single_cycle(&self) -> bool {
        let mut move_count = 0;
        for el in self.path_iter() {
            match el {
                PathEl::MoveTo(_) => move_count += 1,
                PathEl::ClosePath => {}
                _ => {
                    if move_count > 1 {
                        return false;
                    }
                }
            }
        }
        true
    }

    /// The move point of the first drawn segment, or the origin if
    /// nothing is drawn.
    fn first_move_to(&self) -> Point {
        let mut moveto = Point::ZERO;
        for el in self.path_iter() {
            match el {
                PathEl::MoveTo(p) => moveto = p,
                PathEl::ClosePath => {}
                _ => return moveto,
            }
        }
        moveto
    }

    /// The shape as a concrete path with an affine map applied.
    fn transformed_path(&self, affine: Affine) -> Path2D {
        self.path_iter().map(|el| affine * el).collect()
    }

    /// Whether every subpath either ends in a close element or returns
    /// to its start point.
    fn is_closed(&self) -> bool {
        let mut start = Point::ZERO;
        let mut last = Point::ZERO;
        let mut closed = true;
        for el in self.path_iter() {
            match el {
                PathEl::MoveTo(p) => {
                    if !closed && !last.is_near(start) {
                        return false;
                    }
                    start = p;
                    closed = true;
                }
                PathEl::LineTo(p) => {
                    last = p;
                    closed = false;
                }
                PathEl::QuadTo(_, p) => {
                    last = p;
                    closed = false;
                }
                PathEl::CurveTo(_, _, p) => {
                    last = p;
                    closed = false;
                }
                PathEl::ClosePath => closed = true,
            }
        }
        closed || last.is_near(start)
    }
}

/// The union of the tight bounding boxes of a path's segments.
///
/// A path that draws before any `MoveTo` is measured from the origin.
pub(crate) fn path_bounds<I: Iterator<Item = PathEl>>(els: I) -> Rect {
    let mut bounds: Option<Rect> = None;
    let mut last = Point::ZERO;
    for el in els {
        match el {
            PathEl::MoveTo(p) => {
                match bounds {
                    None => bounds = Some(Rect::from_points(p, p)),
                    Some(r) => bounds = Some(r.union_pt(p)),
                }
                last = p;
            }
            PathEl::LineTo(p) => {
                let r = bounds.unwrap_or(Rect::ZERO);
                bounds = Some(r.union(Rect::from_points(last, p)));
                last = p;
            }
            PathEl::QuadTo(p1, p2) => {
                let q = QuadBez::new(last, p1, p2);
                let r = bounds.unwrap_or(Rect::ZERO);
                bounds = Some(r.union(ParamCurveExtrema::bounding_box(&q)));
                last = p2;
            }
            PathEl::CurveTo(p1, p2, p3) => {
                let c = CubicBez::new(last, p1, p2, p3);
                let r = bounds.unwrap_or(Rect::ZERO);
                bounds = Some(r.union(ParamCurveExtrema::bounding_box(&c)));
                last = p3;
            }
            PathEl::ClosePath => {}
        }
    }
    bounds.unwrap_or(Rect::ZERO)
}

#[cfg(test)]
mod tests {
    use crate::{Affine, PathEl, Point, Rect, Shape};
    use alloc::vec;
    use alloc::vec::Vec;

    /// A shape that is nothing but its elements.
    struct Els(Vec<PathEl>);

    impl Shape for Els {
        type PathIter<'iter> = core::iter::Copied<core::slice::Iter<'iter, PathEl>>;

        fn path_iter(&self) -> Self::PathIter<'_> {
            self.0.iter().copied()
        }
    }

    fn square() -> Els {
        Els(vec![
            PathEl::MoveTo(Point::new(0.0, 0.0)),
            PathEl::LineTo(Point::new(10.0, 0.0)),
            PathEl::LineTo(Point::new(10.0, 10.0)),
            PathEl::LineTo(Point::new(0.0, 10.0)),
            PathEl::ClosePath,
        ])
    }

    fn annulus() -> Els {
        let mut els = square().0;
        els.extend([
            PathEl::MoveTo(Point::new(2.0, 2.0)),
            PathEl::LineTo(Point::new(2.0, 8.0)),
            PathEl::LineTo(Point::new(8.0, 8.0)),
            PathEl::LineTo(Point::new(8.0, 2.0)),
            PathEl::ClosePath,
        ]);
        Els(els)
    }

    #[test]
    fn winding_of_square() {
        let sq = square();
        assert_eq!(sq.winding(Point::new(5.0, 5.0)), 1);
        assert_eq!(sq.winding(Point::new(-1.0, 5.0)), 0);
        assert_eq!(sq.winding(Point::new(5.0, 11.0)), 0);
        assert!(sq.contains(Point::new(5.0, 5.0)));
        assert!(!sq.contains(Point::new(11.0, 5.0)));
    }

    #[test]
    fn winding_of_annulus() {
        let ring = annulus();
        // The hole cancels the outer winding.
        assert_eq!(ring.winding(Point::new(5.0, 5.0)), 0);
        assert!(!ring.contains(Point::new(5.0, 5.0)));
        // Between the two boundaries.
        assert_eq!(ring.winding(Point::new(1.0, 5.0)), 1);
        assert!(ring.contains(Point::new(1.0, 5.0)));
    }

    #[test]
    fn winding_closes_subpaths_on_move() {
        // The trailing subpath stays open, so the missing hypotenuse is
        // not counted...
        let open = Els(vec![
            PathEl::MoveTo(Point::new(0.0, 0.0)),
            PathEl::LineTo(Point::new(10.0, 0.0)),
            PathEl::LineTo(Point::new(10.0, 10.0)),
        ]);
        let pt = Point::new(0.5, 5.0);
        assert_eq!(open.winding(pt), 1);

        // ...but a new subpath closes the previous one first.
        let mut els = open.0;
        els.push(PathEl::MoveTo(Point::new(50.0, 50.0)));
        assert_eq!(Els(els).winding(pt), 0);
    }

    #[test]
    fn area_and_perimeter() {
        let sq = square();
        assert_eq!(sq.area(), 100.0);
        assert_eq!(sq.perimeter(), 40.0);
        // The hole is wound against the outer boundary.
        assert_eq!(annulus().area(), 100.0 - 36.0);
    }

    #[test]
    fn bounding_box_of_elements() {
        let sq = square();
        assert_eq!(sq.bounding_box(), Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(Els(vec![]).bounding_box(), Rect::ZERO);

        // The arch peaks at y = 5, halfway to the control point.
        let arch = Els(vec![
            PathEl::MoveTo(Point::new(0.0, 0.0)),
            PathEl::QuadTo(Point::new(5.0, 10.0), Point::new(10.0, 0.0)),
        ]);
        let bounds = arch.bounding_box();
        assert!((bounds.y1 - 5.0).abs() < 1e-12);
        assert_eq!(bounds.x0, 0.0);
        assert_eq!(bounds.x1, 10.0);
    }

    #[test]
    fn shape_contains_shape() {
        let outer = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(outer.contains_shape(&Rect::new(2.0, 2.0, 8.0, 8.0)));
        assert!(!outer.contains_shape(&Rect::new(5.0, 5.0, 15.0, 15.0)));
        assert!(!outer.contains_shape(&Rect::new(20.0, 0.0, 30.0, 10.0)));
    }

    #[test]
    fn shape_intersects_shape() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects_shape(&Rect::new(5.0, 5.0, 15.0, 15.0)));
        assert!(!a.intersects_shape(&Rect::new(20.0, 20.0, 30.0, 30.0)));

        // Nesting in either order counts as intersecting.
        let inner = Rect::new(2.0, 2.0, 8.0, 8.0);
        assert!(a.intersects_shape(&inner));
        assert!(inner.intersects_shape(&a));
        // So does an identical shape.
        assert!(a.intersects_shape(&Rect::new(0.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn distance_to_boundary() {
        let sq = square();
        assert!((sq.distance(Point::new(5.0, 5.0)) - 5.0).abs() < 1e-12);
        assert!((sq.distance(Point::new(15.0, 5.0)) - 5.0).abs() < 1e-12);
        assert!((sq.distance(Point::new(5.0, 12.0)) - 2.0).abs() < 1e-12);
        assert_eq!(Els(vec![]).distance(Point::new(0.0, 0.0)), f64::INFINITY);
    }

    #[test]
    fn closed_flag() {
        assert!(square().is_closed());
        let open = Els(vec![
            PathEl::MoveTo(Point::new(0.0, 0.0)),
            PathEl::LineTo(Point::new(10.0, 0.0)),
            PathEl::LineTo(Point::new(10.0, 10.0)),
        ]);
        assert!(!open.is_closed());

        // Returning to the start point closes a subpath without an
        // explicit close element.
        let ring = Els(vec![
            PathEl::MoveTo(Point::new(0.0, 0.0)),
            PathEl::LineTo(Point::new(10.0, 0.0)),
            PathEl::LineTo(Point::new(0.0, 0.0)),
        ]);
        assert!(ring.is_closed());
    }

    #[test]
    fn contains_within_stroke_width() {
        let sq = square();
        // Just outside the right edge, but within a wide stroke of it.
        assert!(sq.contains_with_width(Point::new(11.0, 5.0), 4.0));
        assert!(!sq.contains_with_width(Point::new(13.0, 5.0), 4.0));
        // Interior points always count.
        assert!(sq.contains_with_width(Point::new(5.0, 5.0), 4.0));
        // Thin strokes fall back to plain containment.
        assert!(!sq.contains_with_width(Point::new(10.4, 5.0), 1.0));
    }

    #[test]
    fn flatness() {
        assert!(square().is_flat());
        let arch = Els(vec![
            PathEl::MoveTo(Point::new(0.0, 0.0)),
            PathEl::QuadTo(Point::new(5.0, 10.0), Point::new(10.0, 0.0)),
        ]);
        assert!(!arch.is_flat());
    }

    #[test]
    fn single_cycle() {
        assert!(square().is_single_cycle());
        assert!(!annulus().is_single_cycle());

        // Trailing moves with nothing drawn after them are harmless.
        let mut els = square().0;
        els.push(PathEl::MoveTo(Point::new(50.0, 50.0)));
        assert!(Els(els).is_single_cycle());
    }

    #[test]
    fn first_drawn_move() {
        assert_eq!(square().first_move_to(), Point::new(0.0, 0.0));

        // The move that sticks is the one the first drawn segment hangs
        // off of.
        let els = Els(vec![
            PathEl::MoveTo(Point::new(1.0, 1.0)),
            PathEl::MoveTo(Point::new(5.0, 5.0)),
            PathEl::LineTo(Point::new(9.0, 5.0)),
        ]);
        assert_eq!(els.first_move_to(), Point::new(5.0, 5.0));
        assert_eq!(Els(vec![]).first_move_to(), Point::ZERO);
    }

    #[test]
    fn transformed_into_path() {
        let moved = square().transformed_path(Affine::translate((10.0, 0.0)));
        assert_eq!(moved.bounding_box(), Rect::new(10.0, 0.0, 20.0, 10.0));
        assert!((moved.area().abs() - 100.0).abs() < 1e-12);
    }
}
