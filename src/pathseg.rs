// Copyright 2025 the Vojo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Path elements and segments.

use core::mem;
use core::ops::{Mul, Range};

use arrayvec::ArrayVec;

use crate::{
    Affine, CubicBez, Line, NonConvergence, ParamCurve, ParamCurveArclen, ParamCurveArea,
    ParamCurveDeriv, ParamCurveExtrema, Point, QuadBez, SolveStatus, Vec2, MAX_EXTREMA,
};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// The element of a path.
///
/// A valid path has a `MoveTo` at the beginning of each subpath.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathEl {
    /// Move directly to the point without drawing anything, starting a new
    /// subpath.
    MoveTo(Point),
    /// Draw a line from the current location to the point.
    LineTo(Point),
    /// Draw a quadratic bezier using the control point and the end point.
    QuadTo(Point, Point),
    /// Draw a cubic bezier using the two control points and the end point.
    CurveTo(Point, Point, Point),
    /// Close off the path.
    ClosePath,
}

/// A segment of a path.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathSeg {
    /// A line segment.
    Line(Line),
    /// A quadratic bezier segment.
    Quad(QuadBez),
    /// A cubic bezier segment.
    Cubic(CubicBez),
}

/// The storage tag of one verb in a stored path.
///
/// This is [`PathEl`] stripped of its points, as kept by
/// [`Path2D`](crate::Path2D) alongside a flat point buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Verb {
    /// Starts a new subpath at the associated point.
    MoveTo,
    /// A line to the associated point.
    LineTo,
    /// A quadratic bezier, storing its control point and end point.
    QuadTo,
    /// A cubic bezier, storing two control points and an end point.
    CubicTo,
    /// Closes the subpath back to its move point, storing nothing.
    Close,
}

impl Verb {
    /// The number of points the verb stores.
    #[inline]
    pub fn point_count(self) -> usize {
        match self {
            Verb::MoveTo | Verb::LineTo => 1,
            Verb::QuadTo => 2,
            Verb::CubicTo => 3,
            Verb::Close => 0,
        }
    }
}

impl PathEl {
    /// Is this path element finite?
    #[inline]
    pub fn is_finite(&self) -> bool {
        match self {
            PathEl::MoveTo(p) | PathEl::LineTo(p) => p.is_finite(),
            PathEl::QuadTo(p, p2) => p.is_finite() && p2.is_finite(),
            PathEl::CurveTo(p, p2, p3) => p.is_finite() && p2.is_finite() && p3.is_finite(),
            PathEl::ClosePath => true,
        }
    }

    /// Is this path element NaN?
    #[inline]
    pub fn is_nan(&self) -> bool {
        match self {
            PathEl::MoveTo(p) | PathEl::LineTo(p) => p.is_nan(),
            PathEl::QuadTo(p, p2) => p.is_nan() || p2.is_nan(),
            PathEl::CurveTo(p, p2, p3) => p.is_nan() || p2.is_nan() || p3.is_nan(),
            PathEl::ClosePath => false,
        }
    }

    /// Get the end point of the path element, if it exists.
    #[inline]
    pub fn end_point(&self) -> Option<Point> {
        match self {
            PathEl::MoveTo(p) | PathEl::LineTo(p) => Some(*p),
            PathEl::QuadTo(_, p2) => Some(*p2),
            PathEl::CurveTo(_, _, p3) => Some(*p3),
            PathEl::ClosePath => None,
        }
    }
}

impl PathSeg {
    /// Returns a new `PathSeg` describing the same path as `self`, but with
    /// the points reversed.
    pub fn reversed(&self) -> PathSeg {
        match self {
            PathSeg::Line(Line { p0, p1 }) => PathSeg::Line(Line::new(*p1, *p0)),
            PathSeg::Quad(q) => PathSeg::Quad(QuadBez::new(q.p2, q.p1, q.p0)),
            PathSeg::Cubic(c) => PathSeg::Cubic(CubicBez::new(c.p3, c.p2, c.p1, c.p0)),
        }
    }

    /// Whether this segment traces the same points as `other`, in either
    /// direction, to within a tenth of a unit per coordinate.
    ///
    /// Segments of different degrees never match.
    pub fn matches(&self, other: &PathSeg) -> bool {
        fn near(a: Point, b: Point) -> bool {
            (a.x - b.x).abs() < 0.1 && (a.y - b.y).abs() < 0.1
        }
        match (self, other) {
            (PathSeg::Line(a), PathSeg::Line(b)) => {
                (near(a.p0, b.p0) && near(a.p1, b.p1)) || (near(a.p0, b.p1) && near(a.p1, b.p0))
            }
            (PathSeg::Quad(a), PathSeg::Quad(b)) => {
                near(a.p1, b.p1)
                    && ((near(a.p0, b.p0) && near(a.p2, b.p2))
                        || (near(a.p0, b.p2) && near(a.p2, b.p0)))
            }
            (PathSeg::Cubic(a), PathSeg::Cubic(b)) => {
                (near(a.p0, b.p0) && near(a.p1, b.p1) && near(a.p2, b.p2) && near(a.p3, b.p3))
                    || (near(a.p0, b.p3)
                        && near(a.p1, b.p2)
                        && near(a.p2, b.p1)
                        && near(a.p3, b.p0))
            }
            _ => false,
        }
    }

    /// Splits the segment at `t`, returning the pieces before and after
    /// the cut.
    ///
    /// The cut point belongs in the open unit interval; a cut at or
    /// beyond an end still splits, but one half is degenerate and a
    /// warning is logged.
    pub fn split(&self, t: f64) -> (PathSeg, PathSeg) {
        if !(t > 0.0 && t < 1.0) {
            log::warn!("splitting a path segment at t={t} leaves a degenerate half");
        }
        (self.subsegment(0.0..t), self.subsegment(t..1.0))
    }

    /// The point at parameter `t` along with the tangent direction there.
    ///
    /// The tangent is the raw derivative, not normalized.
    pub fn point_and_tangent(&self, t: f64) -> (Point, Vec2) {
        match self {
            PathSeg::Line(line) => (line.eval(t), line.deriv().eval(t).to_vec2()),
            PathSeg::Quad(quad) => (quad.eval(t), quad.deriv().eval(t).to_vec2()),
            PathSeg::Cubic(cubic) => (cubic.eval(t), cubic.deriv().eval(t).to_vec2()),
        }
    }

    /// The arc length of the segment.
    pub fn arclen(&self) -> f64 {
        match self {
            PathSeg::Line(line) => line.arclen(),
            PathSeg::Quad(quad) => quad.arclen(),
            PathSeg::Cubic(cubic) => cubic.arclen(),
        }
    }

    /// The arc length between two parameter values.
    ///
    /// Negative when `t1 < t0`.
    pub fn arclen_range(&self, t0: f64, t1: f64) -> f64 {
        match self {
            PathSeg::Line(line) => line.arclen_range(t0, t1),
            PathSeg::Quad(quad) => quad.arclen_range(t0, t1),
            PathSeg::Cubic(cubic) => cubic.arclen_range(t0, t1),
        }
    }

    /// Solve for the parameter where the given fraction of the segment's
    /// total arc length is reached.
    pub fn inv_arclen(&self, s: f64) -> Result<SolveStatus, NonConvergence> {
        match self {
            PathSeg::Line(line) => line.inv_arclen(s),
            PathSeg::Quad(quad) => quad.inv_arclen(s),
            PathSeg::Cubic(cubic) => cubic.inv_arclen(s),
        }
    }

    /// The contribution of this segment to the winding number of `pt`.
    pub fn winding(&self, pt: Point) -> i32 {
        match self {
            PathSeg::Line(line) => line.winding(pt),
            PathSeg::Quad(quad) => quad.winding(pt),
            PathSeg::Cubic(cubic) => cubic.winding(pt),
        }
    }

    /// The squared distance from `p` to the closest point on the segment.
    pub fn distance_sq(&self, p: Point) -> f64 {
        match self {
            PathSeg::Line(line) => line.distance_sq(p),
            PathSeg::Quad(quad) => quad.distance_sq(p),
            PathSeg::Cubic(cubic) => cubic.distance_sq(p),
        }
    }

    /// Is this segment finite?
    #[inline]
    pub fn is_finite(&self) -> bool {
        match self {
            PathSeg::Line(line) => line.is_finite(),
            PathSeg::Quad(quad) => quad.is_finite(),
            PathSeg::Cubic(cubic) => cubic.is_finite(),
        }
    }

    /// Is this segment NaN?
    #[inline]
    pub fn is_nan(&self) -> bool {
        match self {
            PathSeg::Line(line) => line.is_nan(),
            PathSeg::Quad(quad) => quad.is_nan(),
            PathSeg::Cubic(cubic) => cubic.is_nan(),
        }
    }
}

impl ParamCurve for PathSeg {
    fn eval(&self, t: f64) -> Point {
        match self {
            PathSeg::Line(line) => line.eval(t),
            PathSeg::Quad(quad) => quad.eval(t),
            PathSeg::Cubic(cubic) => cubic.eval(t),
        }
    }

    fn subsegment(&self, range: Range<f64>) -> PathSeg {
        match self {
            PathSeg::Line(line) => PathSeg::Line(line.subsegment(range)),
            PathSeg::Quad(quad) => PathSeg::Quad(quad.subsegment(range)),
            PathSeg::Cubic(cubic) => PathSeg::Cubic(cubic.subsegment(range)),
        }
    }

    #[inline]
    fn start(&self) -> Point {
        match self {
            PathSeg::Line(line) => line.start(),
            PathSeg::Quad(quad) => quad.start(),
            PathSeg::Cubic(cubic) => cubic.start(),
        }
    }

    #[inline]
    fn end(&self) -> Point {
        match self {
            PathSeg::Line(line) => line.end(),
            PathSeg::Quad(quad) => quad.end(),
            PathSeg::Cubic(cubic) => cubic.end(),
        }
    }
}

impl ParamCurveArea for PathSeg {
    fn signed_area(&self) -> f64 {
        match self {
            PathSeg::Line(line) => line.signed_area(),
            PathSeg::Quad(quad) => quad.signed_area(),
            PathSeg::Cubic(cubic) => cubic.signed_area(),
        }
    }
}

impl ParamCurveExtrema for PathSeg {
    fn extrema(&self) -> ArrayVec<f64, MAX_EXTREMA> {
        match self {
            PathSeg::Line(line) => line.extrema(),
            PathSeg::Quad(quad) => quad.extrema(),
            PathSeg::Cubic(cubic) => cubic.extrema(),
        }
    }
}

impl From<Line> for PathSeg {
    #[inline(always)]
    fn from(line: Line) -> PathSeg {
        PathSeg::Line(line)
    }
}

impl From<QuadBez> for PathSeg {
    #[inline(always)]
    fn from(quad: QuadBez) -> PathSeg {
        PathSeg::Quad(quad)
    }
}

impl From<CubicBez> for PathSeg {
    #[inline(always)]
    fn from(cubic: CubicBez) -> PathSeg {
        PathSeg::Cubic(cubic)
    }
}

impl Mul<PathEl> for Affine {
    type Output = PathEl;

    fn mul(self, other: PathEl) -> PathEl {
        match other {
            PathEl::MoveTo(p) => PathEl::MoveTo(self * p),
            PathEl::LineTo(p) => PathEl::LineTo(self * p),
            PathEl::QuadTo(p1, p2) => PathEl::QuadTo(self * p1, self * p2),
            PathEl::CurveTo(p1, p2, p3) => PathEl::CurveTo(self * p1, self * p2, self * p3),
            PathEl::ClosePath => PathEl::ClosePath,
        }
    }
}

impl Mul<PathSeg> for Affine {
    type Output = PathSeg;

    fn mul(self, other: PathSeg) -> PathSeg {
        match other {
            PathSeg::Line(line) => PathSeg::Line(self * line),
            PathSeg::Quad(quad) => PathSeg::Quad(self * quad),
            PathSeg::Cubic(cubic) => PathSeg::Cubic(self * cubic),
        }
    }
}

/// Transform an iterator over path elements into one over path segments.
///
/// See also [`Shape::segments`].
///
/// [`Shape::segments`]: crate::Shape::segments
pub fn segments<I>(elements: I) -> Segments<I::IntoIter>
where
    I: IntoIterator<Item = PathEl>,
{
    Segments {
        elements: elements.into_iter(),
        start_last: None,
    }
}

/// An iterator that transforms path elements to path segments.
///
/// This struct is created by the [`segments`] function.
#[derive(Clone)]
pub struct Segments<I: Iterator<Item = PathEl>> {
    elements: I,
    start_last: Option<(Point, Point)>,
}

impl<I: Iterator<Item = PathEl>> Iterator for Segments<I> {
    type Item = PathSeg;

    fn next(&mut self) -> Option<PathSeg> {
        for el in &mut self.elements {
            // We first need to check whether this is the first element.
            let (start, last) = self.start_last.get_or_insert_with(|| {
                let point = match el {
                    PathEl::MoveTo(p) | PathEl::LineTo(p) => p,
                    PathEl::QuadTo(_, p2) => p2,
                    PathEl::CurveTo(_, _, p3) => p3,
                    PathEl::ClosePath => Point::ZERO,
                };
                (point, point)
            });

            return Some(match el {
                PathEl::MoveTo(p) => {
                    *start = p;
                    *last = p;
                    continue;
                }
                PathEl::LineTo(p) => PathSeg::Line(Line::new(mem::replace(last, p), p)),
                PathEl::QuadTo(p1, p2) => {
                    PathSeg::Quad(QuadBez::new(mem::replace(last, p2), p1, p2))
                }
                PathEl::CurveTo(p1, p2, p3) => {
                    PathSeg::Cubic(CubicBez::new(mem::replace(last, p3), p1, p2, p3))
                }
                PathEl::ClosePath => {
                    if *last != *start {
                        PathSeg::Line(Line::new(mem::replace(last, *start), *start))
                    } else {
                        continue;
                    }
                }
            });
        }
        None
    }
}
