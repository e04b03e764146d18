// Copyright 2025 the Vojo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lines.

use core::ops::{Add, Mul, Range, Sub};

use arrayvec::ArrayVec;

use crate::{
    Affine, NonConvergence, ParamCurve, ParamCurveArclen, ParamCurveArea, ParamCurveDeriv,
    ParamCurveExtrema, PathEl, Point, Rect, Shape, SolveStatus, Vec2, MAX_EXTREMA,
};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// A single line.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Line {
    /// The line's start point.
    pub p0: Point,
    /// The line's end point.
    pub p1: Point,
}

impl Line {
    /// Create a new line.
    #[inline(always)]
    pub fn new(p0: impl Into<Point>, p1: impl Into<Point>) -> Line {
        Line {
            p0: p0.into(),
            p1: p1.into(),
        }
    }

    /// Returns a copy of this `Line` with the end points swapped so that it
    /// points in the opposite direction.
    #[must_use]
    #[inline(always)]
    pub fn reversed(&self) -> Line {
        Self {
            p0: self.p1,
            p1: self.p0,
        }
    }

    /// The length of the line.
    #[inline]
    pub fn length(self) -> f64 {
        (self.p1 - self.p0).hypot()
    }

    /// The midpoint of the line.
    ///
    /// This is the same as calling [`Point::midpoint`] with
    /// the endpoints of this line.
    #[must_use]
    #[inline]
    pub fn midpoint(&self) -> Point {
        self.p0.midpoint(self.p1)
    }

    /// Computes the point where two lines, if extended to infinity, would cross.
    pub fn crossing_point(self, other: Line) -> Option<Point> {
        let ab = self.p1 - self.p0;
        let cd = other.p1 - other.p0;
        let pcd = ab.cross(cd);
        if pcd == 0.0 {
            return None;
        }
        let h = ab.cross(self.p0 - other.p0) / pcd;
        Some(other.p0 + cd * h)
    }

    /// The squared distance from `p` to the closest point on the line segment.
    ///
    /// Degenerate lines (squared length of `1e-4` or less) report the
    /// distance to their start point.
    pub fn distance_sq(&self, p: Point) -> f64 {
        let d = self.p1 - self.p0;
        let len2 = d.hypot2();
        if len2 <= 1e-4 {
            return p.distance_squared(self.p0);
        }
        let t = (p - self.p0).dot(d) / len2;
        let t = t.clamp(0.0, 1.0);
        p.distance_squared(self.eval(t))
    }

    /// Whether three points lie on one line.
    ///
    /// The test is on twice the area of the triangle the points span
    /// (absolute tolerance `1e-4`), so it degrades gracefully for
    /// nearly collinear points.
    pub fn is_collinear(p0: Point, p1: Point, p2: Point) -> bool {
        let twice_area = p0.x * (p1.y - p2.y) + p1.x * (p2.y - p0.y) + p2.x * (p0.y - p1.y);
        twice_area.abs() < 1e-4
    }

    /// The contribution of this segment to the winding number of `pt`,
    /// counting crossings of the horizontal ray cast toward positive x.
    ///
    /// An upward crossing counts `1`, a downward crossing `-1`, following
    /// the non-zero fill convention.
    pub fn winding(&self, pt: Point) -> i32 {
        let (x0, y0) = (self.p0.x, self.p0.y);
        let (x1, y1) = (self.p1.x, self.p1.y);
        if pt.y < y0 && pt.y < y1 {
            return 0;
        }
        if pt.y >= y0 && pt.y >= y1 {
            return 0;
        }
        if pt.x >= x0 && pt.x >= x1 {
            return 0;
        }
        let sign = if y0 < y1 { 1 } else { -1 };
        if pt.x < x0 && pt.x < x1 {
            return sign;
        }
        let x_intercept = x0 + (pt.y - y0) * (x1 - x0) / (y1 - y0);
        if pt.x >= x_intercept {
            return 0;
        }
        sign
    }

    /// Is this line [finite]?
    ///
    /// [finite]: f64::is_finite
    #[inline]
    pub fn is_finite(self) -> bool {
        self.p0.is_finite() && self.p1.is_finite()
    }

    /// Is this line [NaN]?
    ///
    /// [NaN]: f64::is_nan
    #[inline]
    pub fn is_nan(self) -> bool {
        self.p0.is_nan() || self.p1.is_nan()
    }
}

impl From<(Point, Point)> for Line {
    #[inline(always)]
    fn from((from, to): (Point, Point)) -> Self {
        Line::new(from, to)
    }
}

impl From<(Point, Vec2)> for Line {
    #[inline(always)]
    fn from((origin, displacement): (Point, Vec2)) -> Self {
        Line::new(origin, origin + displacement)
    }
}

impl ParamCurve for Line {
    #[inline]
    fn eval(&self, t: f64) -> Point {
        self.p0.lerp(self.p1, t)
    }

    #[inline]
    fn subsegment(&self, range: Range<f64>) -> Line {
        Line {
            p0: self.eval(range.start),
            p1: self.eval(range.end),
        }
    }

    #[inline(always)]
    fn start(&self) -> Point {
        self.p0
    }

    #[inline(always)]
    fn end(&self) -> Point {
        self.p1
    }
}

impl ParamCurveDeriv for Line {
    type DerivResult = ConstPoint;

    #[inline]
    fn deriv(&self) -> ConstPoint {
        ConstPoint((self.p1 - self.p0).to_point())
    }
}

impl ParamCurveArclen for Line {
    #[inline]
    fn arclen(&self) -> f64 {
        (self.p1 - self.p0).hypot()
    }

    #[inline]
    fn arclen_range(&self, t0: f64, t1: f64) -> f64 {
        (self.p1 - self.p0).hypot() * (t1 - t0)
    }

    #[inline]
    fn inv_arclen(&self, s: f64) -> Result<SolveStatus, NonConvergence> {
        Ok(SolveStatus::Converged(s))
    }
}

impl ParamCurveArea for Line {
    #[inline]
    fn signed_area(&self) -> f64 {
        self.p0.to_vec2().cross(self.p1.to_vec2()) * 0.5
    }
}

impl ParamCurveExtrema for Line {
    #[inline]
    fn extrema(&self) -> ArrayVec<f64, MAX_EXTREMA> {
        ArrayVec::new()
    }
}

/// A trivial "curve" that is just a constant.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstPoint(Point);

impl ConstPoint {
    /// Is this point [finite]?
    ///
    /// [finite]: f64::is_finite
    #[inline]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    /// Is this point [NaN]?
    ///
    /// [NaN]: f64::is_nan
    #[inline]
    pub fn is_nan(self) -> bool {
        self.0.is_nan()
    }
}

impl ParamCurve for ConstPoint {
    #[inline(always)]
    fn eval(&self, _t: f64) -> Point {
        self.0
    }

    #[inline(always)]
    fn subsegment(&self, _range: Range<f64>) -> ConstPoint {
        *self
    }
}

impl ParamCurveDeriv for ConstPoint {
    type DerivResult = ConstPoint;

    #[inline(always)]
    fn deriv(&self) -> ConstPoint {
        ConstPoint(Point::new(0.0, 0.0))
    }
}

impl ParamCurveArclen for ConstPoint {
    #[inline(always)]
    fn arclen(&self) -> f64 {
        0.0
    }

    #[inline(always)]
    fn arclen_range(&self, _t0: f64, _t1: f64) -> f64 {
        0.0
    }

    #[inline(always)]
    fn inv_arclen(&self, _s: f64) -> Result<SolveStatus, NonConvergence> {
        Ok(SolveStatus::Converged(0.0))
    }
}

impl Mul<Line> for Affine {
    type Output = Line;

    #[inline]
    fn mul(self, other: Line) -> Line {
        Line {
            p0: self * other.p0,
            p1: self * other.p1,
        }
    }
}

impl Add<Vec2> for Line {
    type Output = Line;

    #[inline]
    fn add(self, v: Vec2) -> Line {
        Line::new(self.p0 + v, self.p1 + v)
    }
}

impl Sub<Vec2> for Line {
    type Output = Line;

    #[inline]
    fn sub(self, v: Vec2) -> Line {
        Line::new(self.p0 - v, self.p1 - v)
    }
}

/// An iterator yielding the path for a single line.
#[doc(hidden)]
pub struct LinePathIter {
    line: Line,
    ix: usize,
}

impl Shape for Line {
    type PathIter<'iter> = LinePathIter;

    #[inline]
    fn path_iter(&self) -> LinePathIter {
        LinePathIter { line: *self, ix: 0 }
    }

    /// Returning zero here is consistent with the contract (area is
    /// only meaningful for closed shapes), but an argument can be made
    /// that the contract should be tightened to include the Green's
    /// theorem contribution.
    #[inline(always)]
    fn area(&self) -> f64 {
        0.0
    }

    #[inline]
    fn perimeter(&self) -> f64 {
        (self.p1 - self.p0).hypot()
    }

    /// Same consideration as `area`.
    #[inline(always)]
    fn winding(&self, _pt: Point) -> i32 {
        0
    }

    #[inline(always)]
    fn bounding_box(&self) -> Rect {
        Rect::from_points(self.p0, self.p1)
    }
}

impl Iterator for LinePathIter {
    type Item = PathEl;

    fn next(&mut self) -> Option<PathEl> {
        self.ix += 1;
        match self.ix {
            1 => Some(PathEl::MoveTo(self.line.p0)),
            2 => Some(PathEl::LineTo(self.line.p1)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Line, ParamCurve, ParamCurveArclen, Point};

    #[test]
    fn line_reversed() {
        let l = Line::new((0.0, 0.0), (1.0, 1.0));
        let f = l.reversed();

        assert_eq!(l.p0, f.p1);
        assert_eq!(l.p1, f.p0);

        // Reversing it again should result in the original line
        assert_eq!(l, f.reversed());
    }

    #[test]
    fn line_arclen() {
        let l = Line::new((0.0, 0.0), (1.0, 1.0));
        let true_len = 2.0f64.sqrt();
        let epsilon = 1e-9;
        assert!((l.arclen() - true_len).abs() < epsilon);

        let t = l.inv_arclen(1.0 / 3.0).unwrap().value();
        assert!((t - 1.0 / 3.0).abs() < epsilon);
    }

    #[test]
    fn line_midpoint() {
        let l = Line::new((0.0, 0.0), (2.0, 4.0));
        assert_eq!(l.midpoint(), Point::new(1.0, 2.0));
    }

    #[test]
    fn line_distance_sq() {
        let l = Line::new((0.0, 0.0), (10.0, 0.0));
        assert_eq!(l.distance_sq(Point::new(5.0, 5.0)), 25.0);
        // Beyond an endpoint the distance is to the endpoint itself.
        assert_eq!(l.distance_sq(Point::new(13.0, 4.0)), 25.0);
        // Degenerate segment.
        let d = Line::new((2.0, 2.0), (2.0, 2.0));
        assert_eq!(d.distance_sq(Point::new(5.0, 6.0)), 25.0);
    }

    #[test]
    fn line_collinear() {
        let p0 = Point::new(0.0, 0.0);
        let p1 = Point::new(5.0, 5.0);
        assert!(Line::is_collinear(p0, p1, Point::new(10.0, 10.0)));
        assert!(Line::is_collinear(p0, p1, Point::new(2.0, 2.0)));
        assert!(!Line::is_collinear(p0, p1, Point::new(10.0, 0.0)));
    }

    #[test]
    fn line_winding() {
        let up = Line::new((1.0, 0.0), (1.0, 10.0));
        assert_eq!(up.winding(Point::new(0.0, 5.0)), 1);
        let down = up.reversed();
        assert_eq!(down.winding(Point::new(0.0, 5.0)), -1);
        // Ray pointing away from the segment.
        assert_eq!(up.winding(Point::new(2.0, 5.0)), 0);
        // Above and below the span.
        assert_eq!(up.winding(Point::new(0.0, -1.0)), 0);
        assert_eq!(up.winding(Point::new(0.0, 11.0)), 0);
    }

    #[test]
    fn line_is_finite() {
        assert!((Line {
            p0: Point { x: 0., y: 0. },
            p1: Point { x: 1., y: 1. }
        })
        .is_finite());

        assert!(!(Line {
            p0: Point { x: 0., y: 0. },
            p1: Point {
                x: f64::INFINITY,
                y: 1.
            }
        })
        .is_finite());

        assert!(!(Line {
            p0: Point { x: 0., y: 0. },
            p1: Point {
                x: 0.,
                y: f64::INFINITY
            }
        })
        .is_finite());
    }
}
