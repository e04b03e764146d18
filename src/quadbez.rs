// Copyright 2025 the Vojo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadratic Bézier segments.

use core::ops::{Mul, Range};

use arrayvec::ArrayVec;

use crate::{
    Affine, Line, ParamCurve, ParamCurveArclen, ParamCurveArea, ParamCurveDeriv,
    ParamCurveExtrema, PathEl, Point, Rect, Shape, MAX_EXTREMA,
};

/// Maximum recursion depth for distance-squared bisection.
///
/// Finite curves flatten out far earlier; this bounds the pathological
/// cases.
const MAX_DIST_DEPTH: usize = 48;

/// A single quadratic Bézier segment.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuadBez {
    /// The start point.
    pub p0: Point,
    /// The control point.
    pub p1: Point,
    /// The end point.
    pub p2: Point,
}

impl QuadBez {
    /// Create a new quadratic Bézier segment.
    #[inline(always)]
    pub fn new(p0: impl Into<Point>, p1: impl Into<Point>, p2: impl Into<Point>) -> QuadBez {
        QuadBez {
            p0: p0.into(),
            p1: p1.into(),
            p2: p2.into(),
        }
    }

    /// Whether the control point is so close to the chord that the segment
    /// is a line for all practical purposes.
    ///
    /// The threshold is a squared distance of `0.01`.
    #[inline]
    pub fn is_line(&self) -> bool {
        Line::new(self.p0, self.p2).distance_sq(self.p1) < 0.01
    }

    /// The squared distance from `p` to the closest point on the segment.
    ///
    /// Bisects the curve recursively, short-circuiting once a half is
    /// indistinguishable from its chord.
    pub fn distance_sq(&self, p: Point) -> f64 {
        if !self.is_finite() {
            return f64::NAN;
        }
        self.distance_sq_inner(p, 0)
    }

    fn distance_sq_inner(&self, p: Point, depth: usize) -> f64 {
        if depth >= MAX_DIST_DEPTH || self.is_line() {
            return Line::new(self.p0, self.p2).distance_sq(p);
        }
        let (q0, q1) = self.subdivide();
        q0.distance_sq_inner(p, depth + 1)
            .min(q1.distance_sq_inner(p, depth + 1))
    }

    /// The contribution of this segment to the winding number of `pt`.
    ///
    /// Subdivides until a half is clearly above, below, or to the left of
    /// the horizontal ray from `pt`, falling back to the chord after 52
    /// levels.
    pub fn winding(&self, pt: Point) -> i32 {
        self.winding_inner(pt, 0)
    }

    fn winding_inner(&self, pt: Point, level: usize) -> i32 {
        let (x0, y0) = (self.p0.x, self.p0.y);
        let (xc, yc) = (self.p1.x, self.p1.y);
        let (x1, y1) = (self.p2.x, self.p2.y);
        if pt.y < y0 && pt.y < yc && pt.y < y1 {
            return 0;
        }
        if pt.y >= y0 && pt.y >= yc && pt.y >= y1 {
            return 0;
        }
        if pt.x >= x0 && pt.x >= xc && pt.x >= x1 {
            return 0;
        }
        if pt.x < x0 && pt.x < xc && pt.x < x1 {
            // Endpoints decide the crossing direction out here.
            return if pt.y >= y0 {
                if pt.y < y1 {
                    1
                } else {
                    0
                }
            } else if pt.y >= y1 {
                -1
            } else {
                0
            };
        }
        if level > 52 {
            return Line::new(self.p0, self.p2).winding(pt);
        }
        let (q0, q1) = self.subdivide();
        let mid = q0.p2;
        if mid.x.is_nan() || mid.y.is_nan() {
            return 0;
        }
        q0.winding_inner(pt, level + 1) + q1.winding_inner(pt, level + 1)
    }

    /// Is this curve [finite]?
    ///
    /// [finite]: f64::is_finite
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.p0.is_finite() && self.p1.is_finite() && self.p2.is_finite()
    }

    /// Is this curve [NaN]?
    ///
    /// [NaN]: f64::is_nan
    #[inline]
    pub fn is_nan(&self) -> bool {
        self.p0.is_nan() || self.p1.is_nan() || self.p2.is_nan()
    }
}

impl ParamCurve for QuadBez {
    #[inline]
    fn eval(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        (self.p0.to_vec2() * (mt * mt)
            + (self.p1.to_vec2() * (mt * 2.0) + self.p2.to_vec2() * t) * t)
            .to_point()
    }

    fn subsegment(&self, range: Range<f64>) -> QuadBez {
        let (t0, t1) = (range.start, range.end);
        let p0 = self.eval(t0);
        let p2 = self.eval(t1);
        let p1 = p0 + (self.p1 - self.p0).lerp(self.p2 - self.p1, t0) * (t1 - t0);
        QuadBez { p0, p1, p2 }
    }

    /// Subdivide into halves, using de Casteljau.
    #[inline]
    fn subdivide(&self) -> (QuadBez, QuadBez) {
        let pm = self.eval(0.5);
        (
            QuadBez::new(self.p0, self.p0.midpoint(self.p1), pm),
            QuadBez::new(pm, self.p1.midpoint(self.p2), self.p2),
        )
    }

    #[inline(always)]
    fn start(&self) -> Point {
        self.p0
    }

    #[inline(always)]
    fn end(&self) -> Point {
        self.p2
    }
}

impl ParamCurveDeriv for QuadBez {
    type DerivResult = Line;

    #[inline]
    fn deriv(&self) -> Line {
        Line::new(
            (2.0 * (self.p1 - self.p0)).to_point(),
            (2.0 * (self.p2 - self.p1)).to_point(),
        )
    }
}

impl ParamCurveArclen for QuadBez {}

impl ParamCurveArea for QuadBez {
    #[inline]
    fn signed_area(&self) -> f64 {
        (self.p0.x * (2.0 * self.p1.y + self.p2.y) + 2.0 * self.p1.x * (self.p2.y - self.p0.y)
            - self.p2.x * (self.p0.y + 2.0 * self.p1.y))
            * (1.0 / 6.0)
    }
}

impl ParamCurveExtrema for QuadBez {
    fn extrema(&self) -> ArrayVec<f64, MAX_EXTREMA> {
        let mut result = ArrayVec::new();
        let d0 = self.p1 - self.p0;
        let d1 = self.p2 - self.p1;
        let dd = d1 - d0;
        if dd.x != 0.0 {
            let t = -d0.x / dd.x;
            if t > 0.0 && t < 1.0 {
                result.push(t);
            }
        }
        if dd.y != 0.0 {
            let t = -d0.y / dd.y;
            if t > 0.0 && t < 1.0 {
                result.push(t);
                if result.len() == 2 && result[0] > t {
                    result.swap(0, 1);
                }
            }
        }
        result
    }
}

impl Mul<QuadBez> for Affine {
    type Output = QuadBez;

    #[inline]
    fn mul(self, other: QuadBez) -> QuadBez {
        QuadBez {
            p0: self * other.p0,
            p1: self * other.p1,
            p2: self * other.p2,
        }
    }
}

/// An iterator for quadratic beziers.
#[doc(hidden)]
pub struct QuadBezIter {
    quad: QuadBez,
    ix: usize,
}

impl Shape for QuadBez {
    type PathIter<'iter> = QuadBezIter;

    #[inline]
    fn path_iter(&self) -> QuadBezIter {
        QuadBezIter { quad: *self, ix: 0 }
    }

    #[inline(always)]
    fn area(&self) -> f64 {
        0.0
    }

    #[inline]
    fn perimeter(&self) -> f64 {
        self.arclen()
    }

    #[inline(always)]
    fn winding(&self, _pt: Point) -> i32 {
        0
    }

    #[inline]
    fn bounding_box(&self) -> Rect {
        ParamCurveExtrema::bounding_box(self)
    }
}

impl Iterator for QuadBezIter {
    type Item = PathEl;

    fn next(&mut self) -> Option<PathEl> {
        self.ix += 1;
        match self.ix {
            1 => Some(PathEl::MoveTo(self.quad.p0)),
            2 => Some(PathEl::QuadTo(self.quad.p1, self.quad.p2)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        Affine, ParamCurve, ParamCurveArclen, ParamCurveArea, ParamCurveDeriv, ParamCurveExtrema,
        Point, QuadBez,
    };

    fn assert_near(p0: Point, p1: Point, epsilon: f64) {
        assert!((p1 - p0).hypot() < epsilon, "{p0:?} != {p1:?}");
    }

    #[test]
    fn quadbez_deriv() {
        let q = QuadBez::new((0.0, 0.0), (0.0, 0.5), (1.0, 1.0));
        let deriv = q.deriv();

        let n = 10;
        for i in 0..=n {
            let t = (i as f64) * (n as f64).recip();
            let delta = 1e-6;
            let p = q.eval(t);
            let p1 = q.eval(t + delta);
            let d_approx = (p1 - p) * delta.recip();
            let d = deriv.eval(t).to_vec2();
            assert!((d - d_approx).hypot() < delta * 2.0);
        }
    }

    #[test]
    fn quadbez_arclen() {
        let q = QuadBez::new((0.0, 0.0), (0.0, 0.5), (1.0, 1.0));
        let true_arclen = 0.5 * 5.0f64.sqrt() + 0.25 * (2.0 + 5.0f64.sqrt()).ln();
        assert!((q.arclen() - true_arclen).abs() < 1e-8);
        // A partial range, and its reversal.
        let partial = q.arclen_range(0.25, 0.75);
        assert!(partial > 0.0 && partial < true_arclen);
        assert!((q.arclen_range(0.75, 0.25) + partial).abs() < 1e-12);
    }

    #[test]
    fn quadbez_inv_arclen() {
        // Symmetric about t = 0.5, so half the length is reached there.
        let q = QuadBez::new((-1.0, 1.0), (0.0, -1.0), (1.0, 1.0));
        let t = q.inv_arclen(0.5).unwrap().value();
        assert!((t - 0.5).abs() < 1e-6);
        let t0 = q.inv_arclen(0.0).unwrap().value();
        assert!(t0.abs() < 1e-6);
        let t1 = q.inv_arclen(1.0).unwrap().value();
        assert!((t1 - 1.0).abs() < 1e-6);
    }

    #[test]
    fn quadbez_subsegment() {
        let q = QuadBez::new((3.1, 4.1), (5.9, 2.6), (5.3, 5.8));
        let t0 = 0.1;
        let t1 = 0.8;
        let qs = q.subsegment(t0..t1);
        let epsilon = 1e-12;
        let n = 10;
        for i in 0..=n {
            let t = (i as f64) * (n as f64).recip();
            let ts = t0 + t * (t1 - t0);
            assert_near(q.eval(ts), qs.eval(t), epsilon);
        }
    }

    #[test]
    fn quadbez_signed_area() {
        // y = 1 - x^2
        let q = QuadBez::new((1.0, 0.0), (0.5, 1.0), (0.0, 1.0));
        let epsilon = 1e-12;
        assert!((q.signed_area() - 2.0 / 3.0).abs() < epsilon);
        assert!(((Affine::rotate(0.5) * q).signed_area() - 2.0 / 3.0).abs() < epsilon);
        assert!(((Affine::translate((0.0, 1.0)) * q).signed_area() - 3.5 / 3.0).abs() < epsilon);
        assert!(((Affine::translate((1.0, 0.0)) * q).signed_area() - 3.5 / 3.0).abs() < epsilon);
    }

    #[test]
    fn quadbez_extrema() {
        // y = x^2
        let q = QuadBez::new((-1.0, 1.0), (0.0, -1.0), (1.0, 1.0));
        let extrema = q.extrema();
        assert_eq!(extrema.len(), 1);
        assert!((extrema[0] - 0.5).abs() < 1e-6);

        let q = QuadBez::new((0.0, 0.5), (1.0, 1.0), (0.5, 0.0));
        let extrema = q.extrema();
        assert_eq!(extrema.len(), 2);
        assert!((extrema[0] - 1.0 / 3.0).abs() < 1e-6);
        assert!((extrema[1] - 2.0 / 3.0).abs() < 1e-6);

        // Reverse direction
        let q = QuadBez::new((0.5, 0.0), (1.0, 1.0), (0.0, 0.5));
        let extrema = q.extrema();
        assert_eq!(extrema.len(), 2);
        assert!((extrema[0] - 1.0 / 3.0).abs() < 1e-6);
        assert!((extrema[1] - 2.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn quadbez_winding() {
        // An arch from (0, 0) up to (5, 5) and back down to (10, 0).
        let q = QuadBez::new((0.0, 0.0), (5.0, 10.0), (10.0, 0.0));
        // Under the arch: the ray exits through the descending half.
        assert_eq!(q.winding(Point::new(5.0, 2.0)), -1);
        // Above the apex.
        assert_eq!(q.winding(Point::new(5.0, 6.0)), 0);
        // Entirely to the left, both crossings cancel.
        assert_eq!(q.winding(Point::new(-1.0, 2.0)), 0);
        // Entirely to the right.
        assert_eq!(q.winding(Point::new(12.0, 2.0)), 0);
        // Reversed, the crossing flips sign.
        let r = QuadBez::new((10.0, 0.0), (5.0, 10.0), (0.0, 0.0));
        assert_eq!(r.winding(Point::new(5.0, 2.0)), 1);
    }

    #[test]
    fn quadbez_distance_sq() {
        // y = x^2
        let q = QuadBez::new((-1.0, 1.0), (0.0, -1.0), (1.0, 1.0));
        // Far past the right endpoint the distance is to the endpoint.
        let d = q.distance_sq(Point::new(3.0, 1.0));
        assert!((d - 4.0).abs() < 1e-9);
        // Below the apex.
        let d = q.distance_sq(Point::new(0.0, -0.5));
        assert!((d - 0.25).abs() < 0.02);
        // Points on the curve are at (approximately) zero distance.
        let d = q.distance_sq(q.eval(0.3));
        assert!(d < 1e-3);
    }
}
