// Copyright 2025 the Vojo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flattening of curved shapes into polygon lists.

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;
use crate::path::MAX_FLATTEN_DEPTH;
use crate::polygon::PolygonIter;
use crate::{CubicBez, Line, ParamCurve, PathEl, Point, Polygon, QuadBez, Rect, Shape};

/// One or more polygons built by flattening path elements.
///
/// Curves are subdivided until their control points sit within the
/// flattening tolerance of the chord, so the polygon outline deviates
/// from the true curve by less than that tolerance. A line back to the
/// start of the current polygon closes it implicitly.
#[derive(Clone, Debug, PartialEq)]
pub struct PolygonPath {
    polygons: Vec<Polygon>,
    tolerance: f64,
}

impl PolygonPath {
    /// The flattening tolerance used when none is given.
    pub const DEFAULT_TOLERANCE: f64 = 0.25;

    /// Create a new, empty polygon path with the default tolerance.
    pub fn new() -> PolygonPath {
        PolygonPath {
            polygons: Vec::new(),
            tolerance: PolygonPath::DEFAULT_TOLERANCE,
        }
    }

    /// Create a new, empty polygon path with the given flattening
    /// tolerance.
    ///
    /// A non-positive tolerance is replaced by the default, with a
    /// warning.
    pub fn with_tolerance(tolerance: f64) -> PolygonPath {
        let tolerance = if tolerance > 0.0 {
            tolerance
        } else {
            log::warn!("flatten tolerance {tolerance} is not positive, using default");
            PolygonPath::DEFAULT_TOLERANCE
        };
        PolygonPath {
            polygons: Vec::new(),
            tolerance,
        }
    }

    /// Flatten a shape with the default tolerance.
    pub fn from_shape(shape: &impl Shape) -> PolygonPath {
        PolygonPath::from_shape_with_tolerance(shape, PolygonPath::DEFAULT_TOLERANCE)
    }

    /// Flatten a shape with the given tolerance.
    pub fn from_shape_with_tolerance(shape: &impl Shape, tolerance: f64) -> PolygonPath {
        let mut path = PolygonPath::with_tolerance(tolerance);
        path.append_shape(shape);
        path
    }

    /// The flattening tolerance.
    #[inline]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// The polygons built so far.
    #[inline]
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    /// The number of polygons.
    #[inline]
    pub fn polygon_count(&self) -> usize {
        self.polygons.len()
    }

    /// The polygon at `index`, if there is one.
    #[inline]
    pub fn polygon(&self, index: usize) -> Option<&Polygon> {
        self.polygons.get(index)
    }

    /// The polygon currently being built.
    #[inline]
    pub fn last_polygon(&self) -> Option<&Polygon> {
        self.polygons.last()
    }

    /// The point new elements continue from.
    pub fn last_point(&self) -> Option<Point> {
        self.polygons.last().and_then(Polygon::last_point)
    }

    /// Append a finished polygon, which becomes the current one.
    pub fn add_polygon(&mut self, polygon: Polygon) {
        self.polygons.push(polygon);
    }

    /// Append a shape's path, flattening its curves.
    ///
    /// Close elements are dropped: the closing edge of each polygon is
    /// already implicit.
    pub fn append_shape(&mut self, shape: &impl Shape) {
        for el in shape.path_iter() {
            match el {
                PathEl::MoveTo(p) => self.move_to(p),
                PathEl::LineTo(p) => self.line_to(p),
                PathEl::QuadTo(cp, end) => self.quad_to(cp, end),
                PathEl::CurveTo(cp1, cp2, end) => self.curve_to(cp1, cp2, end),
                PathEl::ClosePath => {}
            }
        }
    }

    /// Start a new polygon at `p`.
    ///
    /// Two moves in a row collapse into the later one.
    pub fn move_to(&mut self, p: impl Into<Point>) {
        let p = p.into();
        match self.polygons.last_mut() {
            Some(poly) if poly.point_count() == 1 => poly.set_point(0, p),
            _ => {
                let mut poly = Polygon::new();
                poly.add_point(p);
                self.polygons.push(poly);
            }
        }
    }

    /// Add a line to `p`.
    ///
    /// Without a current polygon the line starts at the origin. A line
    /// back to the current polygon's first point is dropped, since that
    /// edge is implicit.
    pub fn line_to(&mut self, p: impl Into<Point>) {
        let p = p.into();
        if self.polygons.is_empty() {
            self.move_to(Point::ORIGIN);
        }
        let Some(poly) = self.polygons.last_mut() else {
            return;
        };
        if let Some(first) = poly.point(0) {
            if p.is_near(first) {
                return;
            }
        }
        poly.add_point(p);
    }

    /// Add a quadratic bezier to `end`, flattened to lines.
    pub fn quad_to(&mut self, cp: impl Into<Point>, end: impl Into<Point>) {
        self.append_quad(cp.into(), end.into(), 0);
    }

    /// Add a cubic bezier to `end`, flattened to lines.
    pub fn curve_to(
        &mut self,
        cp1: impl Into<Point>,
        cp2: impl Into<Point>,
        end: impl Into<Point>,
    ) {
        self.append_cubic(cp1.into(), cp2.into(), end.into(), 0);
    }

    fn append_quad(&mut self, cp: Point, end: Point, depth: usize) {
        let last = self.current_point();
        // A segment that does not travel past the tolerance vanishes.
        if last.distance(end) < self.tolerance {
            return;
        }
        let chord = Line::new(last, end);
        let flat = chord.distance_sq(cp).sqrt() < self.tolerance;
        if flat || depth >= MAX_FLATTEN_DEPTH {
            self.line_to(end);
            return;
        }
        let (q0, q1) = QuadBez::new(last, cp, end).subdivide();
        self.append_quad(q0.p1, q0.p2, depth + 1);
        self.append_quad(q1.p1, q1.p2, depth + 1);
    }

    fn append_cubic(&mut self, cp1: Point, cp2: Point, end: Point, depth: usize) {
        let last = self.current_point();
        if last.distance(end) < self.tolerance {
            return;
        }
        let chord = Line::new(last, end);
        let flat = chord.distance_sq(cp1).sqrt() < self.tolerance
            && chord.distance_sq(cp2).sqrt() < self.tolerance;
        if flat || depth >= MAX_FLATTEN_DEPTH {
            self.line_to(end);
            return;
        }
        let (c0, c1) = CubicBez::new(last, cp1, cp2, end).subdivide();
        self.append_cubic(c0.p1, c0.p2, c0.p3, depth + 1);
        self.append_cubic(c1.p1, c1.p2, c1.p3, depth + 1);
    }

    /// The point curves continue from, starting a polygon at the origin
    /// if none is in progress.
    fn current_point(&mut self) -> Point {
        if let Some(p) = self.last_point() {
            return p;
        }
        self.move_to(Point::ORIGIN);
        Point::ORIGIN
    }
}

impl Default for PolygonPath {
    fn default() -> Self {
        PolygonPath::new()
    }
}

/// An iterator over the path elements of all polygons of a
/// [`PolygonPath`].
pub struct PolygonPathIter<'a> {
    polygons: &'a [Polygon],
    index: usize,
    inner: Option<PolygonIter<'a>>,
}

impl Iterator for PolygonPathIter<'_> {
    type Item = PathEl;

    fn next(&mut self) -> Option<PathEl> {
        loop {
            if let Some(inner) = &mut self.inner {
                if let Some(el) = inner.next() {
                    return Some(el);
                }
            }
            let poly = self.polygons.get(self.index)?;
            self.index += 1;
            self.inner = Some(poly.path_iter());
        }
    }
}

impl Shape for PolygonPath {
    type PathIter<'iter> = PolygonPathIter<'iter>;

    fn path_iter(&self) -> PolygonPathIter<'_> {
        PolygonPathIter {
            polygons: &self.polygons,
            index: 0,
            inner: None,
        }
    }

    fn bounding_box(&self) -> Rect {
        let mut polys = self.polygons.iter().filter(|p| p.point_count() > 0);
        match polys.next() {
            Some(first) => polys.fold(first.bounding_box(), |r, p| r.union(p.bounding_box())),
            None => Rect::ZERO,
        }
    }
}
