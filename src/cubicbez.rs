// Copyright 2025 the Vojo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cubic Bézier segments.

use core::ops::{Mul, Range};

use arrayvec::ArrayVec;

use crate::common::solve_quadratic;
use crate::{
    Affine, Line, ParamCurve, ParamCurveArclen, ParamCurveArea, ParamCurveDeriv,
    ParamCurveExtrema, PathEl, Point, QuadBez, Rect, Shape, MAX_EXTREMA,
};

const MAX_DIST_DEPTH: usize = 48;

/// A single cubic Bézier segment.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CubicBez {
    /// The start point.
    pub p0: Point,
    /// The first control point.
    pub p1: Point,
    /// The second control point.
    pub p2: Point,
    /// The end point.
    pub p3: Point,
}

impl CubicBez {
    /// Create a new cubic Bézier segment.
    #[inline(always)]
    pub fn new(
        p0: impl Into<Point>,
        p1: impl Into<Point>,
        p2: impl Into<Point>,
        p3: impl Into<Point>,
    ) -> CubicBez {
        CubicBez {
            p0: p0.into(),
            p1: p1.into(),
            p2: p2.into(),
            p3: p3.into(),
        }
    }

    /// Whether both control points are so close to the chord that the
    /// segment is a line for all practical purposes.
    ///
    /// The threshold is a squared distance of `0.01` per control point.
    #[inline]
    pub fn is_line(&self) -> bool {
        let chord = Line::new(self.p0, self.p3);
        chord.distance_sq(self.p1) < 0.01 && chord.distance_sq(self.p2) < 0.01
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
            return Line::new(self.p0, self.p3).distance_sq(p);
        }
        let (c0, c1) = self.subdivide();
        c0.distance_sq_inner(p, depth + 1)
            .min(c1.distance_sq_inner(p, depth + 1))
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
        let (xc0, yc0) = (self.p1.x, self.p1.y);
        let (xc1, yc1) = (self.p2.x, self.p2.y);
        let (x1, y1) = (self.p3.x, self.p3.y);
        if pt.y < y0 && pt.y < yc0 && pt.y < yc1 && pt.y < y1 {
            return 0;
        }
        if pt.y >= y0 && pt.y >= yc0 && pt.y >= yc1 && pt.y >= y1 {
            return 0;
        }
        if pt.x >= x0 && pt.x >= xc0 && pt.x >= xc1 && pt.x >= x1 {
            return 0;
        }
        if pt.x < x0 && pt.x < xc0 && pt.x < xc1 && pt.x < x1 {
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
            return Line::new(self.p0, self.p3).winding(pt);
        }
        let (c0, c1) = self.subdivide();
        let mid = c0.p3;
        if mid.x.is_nan() || mid.y.is_nan() {
            return 0;
        }
        c0.winding_inner(pt, level + 1) + c1.winding_inner(pt, level + 1)
    }

    /// Is this curve [finite]?
    ///
    /// [finite]: f64::is_finite
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.p0.is_finite() && self.p1.is_finite() && self.p2.is_finite() && self.p3.is_finite()
    }

    /// Is this curve [NaN]?
    ///
    /// [NaN]: f64::is_nan
    #[inline]
    pub fn is_nan(&self) -> bool {
        self.p0.is_nan() || self.p1.is_nan() || self.p2.is_nan() || self.p3.is_nan()
    }
}

impl ParamCurve for CubicBez {
    #[inline]
    fn eval(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        (self.p0.to_vec2() * (mt * mt * mt)
            + (self.p1.to_vec2() * (mt * mt * 3.0)
                + (self.p2.to_vec2() * (mt * 3.0) + self.p3.to_vec2() * t) * t)
                * t)
            .to_point()
    }

    fn subsegment(&self, range: Range<f64>) -> CubicBez {
        let (t0, t1) = (range.start, range.end);
        let p0 = self.eval(t0);
        let p3 = self.eval(t1);
        let d = self.deriv();
        let scale = (t1 - t0) * (1.0 / 3.0);
        let p1 = p0 + scale * d.eval(t0).to_vec2();
        let p2 = p3 - scale * d.eval(t1).to_vec2();
        CubicBez { p0, p1, p2, p3 }
    }

    /// Subdivide into halves, using de Casteljau.
    #[inline]
    fn subdivide(&self) -> (CubicBez, CubicBez) {
        let pm = self.eval(0.5);
        (
            CubicBez::new(
                self.p0,
                self.p0.midpoint(self.p1),
                ((self.p0.to_vec2() + self.p1.to_vec2() * 2.0 + self.p2.to_vec2()) * 0.25)
                    .to_point(),
                pm,
            ),
            CubicBez::new(
                pm,
                ((self.p1.to_vec2() + self.p2.to_vec2() * 2.0 + self.p3.to_vec2()) * 0.25)
                    .to_point(),
                self.p2.midpoint(self.p3),
                self.p3,
            ),
        )
    }

    #[inline(always)]
    fn start(&self) -> Point {
        self.p0
    }

    #[inline(always)]
    fn end(&self) -> Point {
        self.p3
    }
}

impl ParamCurveDeriv for CubicBez {
    type DerivResult = QuadBez;

    #[inline]
    fn deriv(&self) -> QuadBez {
        QuadBez::new(
            (3.0 * (self.p1 - self.p0)).to_point(),
            (3.0 * (self.p2 - self.p1)).to_point(),
            (3.0 * (self.p3 - self.p2)).to_point(),
        )
    }
}

impl ParamCurveArclen for CubicBez {}

impl ParamCurveArea for CubicBez {
    #[inline]
    fn signed_area(&self) -> f64 {
        (self.p0.x * (6.0 * self.p1.y + 3.0 * self.p2.y + self.p3.y)
            + 3.0
                * (self.p1.x * (-2.0 * self.p0.y + self.p2.y + self.p3.y)
                    - self.p2.x * (self.p0.y + self.p1.y - 2.0 * self.p3.y))
            - self.p3.x * (self.p0.y + 3.0 * self.p1.y + 6.0 * self.p2.y))
            * (1.0 / 20.0)
    }
}

impl ParamCurveExtrema for CubicBez {
    fn extrema(&self) -> ArrayVec<f64, MAX_EXTREMA> {
        fn one_coord(result: &mut ArrayVec<f64, MAX_EXTREMA>, d0: f64, d1: f64, d2: f64) {
            let a = d0 - 2.0 * d1 + d2;
            let b = 2.0 * (d1 - d0);
            let c = d0;
            let roots = solve_quadratic(c, b, a);
            for &t in &roots {
                if t > 0.0 && t < 1.0 {
                    result.push(t);
                }
            }
        }
        let mut result = ArrayVec::new();
        let d0 = self.p1 - self.p0;
        let d1 = self.p2 - self.p1;
        let d2 = self.p3 - self.p2;
        one_coord(&mut result, d0.x, d1.x, d2.x);
        one_coord(&mut result, d0.y, d1.y, d2.y);
        result.sort_by(|a, b| a.partial_cmp(b).unwrap());
        result
    }
}

impl Mul<CubicBez> for Affine {
    type Output = CubicBez;

    #[inline]
    fn mul(self, c: CubicBez) -> CubicBez {
        CubicBez {
            p0: self * c.p0,
            p1: self * c.p1,
            p2: self * c.p2,
            p3: self * c.p3,
        }
    }
}

/// An iterator for cubic beziers.
#[doc(hidden)]
pub struct CubicBezIter {
    cubic: CubicBez,
    ix: usize,
}

impl Shape for CubicBez {
    type PathIter<'iter> = CubicBezIter;

    #[inline]
    fn path_iter(&self) -> CubicBezIter {
        CubicBezIter {
            cubic: *self,
            ix: 0,
        }
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

impl Iterator for CubicBezIter {
    type Item = PathEl;

    fn next(&mut self) -> Option<PathEl> {
        self.ix += 1;
        match self.ix {
            1 => Some(PathEl::MoveTo(self.cubic.p0)),
            2 => Some(PathEl::CurveTo(self.cubic.p1, self.cubic.p2, self.cubic.p3)),
            _ => None,
        }
    }
}
