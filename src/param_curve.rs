// Copyright 2025 the Vojo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A trait for curves parametrized by a scalar.

use core::ops::Range;

use arrayvec::ArrayVec;

use crate::{integrate_simpson, solve_newton, NonConvergence, Point, Rect, SolveStatus};

/// A curve parametrized by a scalar.
///
/// If the result is interpreted as a point, this represents a curve.
/// But the result can be interpreted as a vector as well.
pub trait ParamCurve: Sized {
    /// Evaluate the curve at parameter `t`.
    ///
    /// Generally `t` is in the range [0..1].
    fn eval(&self, t: f64) -> Point;

    /// Get a subsegment of the curve for the given parameter range.
    fn subsegment(&self, range: Range<f64>) -> Self;

    /// Subdivide into (roughly) halves.
    #[inline]
    fn subdivide(&self) -> (Self, Self) {
        (self.subsegment(0.0..0.5), self.subsegment(0.5..1.0))
    }

    /// The start point.
    #[inline]
    fn start(&self) -> Point {
        self.eval(0.0)
    }

    /// The end point.
    #[inline]
    fn end(&self) -> Point {
        self.eval(1.0)
    }
}

/// A differentiable parametrized curve.
pub trait ParamCurveDeriv: ParamCurve {
    /// The parametric curve obtained by taking the derivative of this one.
    type DerivResult: ParamCurve;

    /// The derivative of the curve.
    ///
    /// Note that the type of the return value is somewhat inaccurate, as
    /// the derivative of a curve (mapping of param to point) is a mapping
    /// of param to vector. We choose to accept this rather than have a
    /// more complex type scheme.
    fn deriv(&self) -> Self::DerivResult;
}

/// A parametrized curve that can have its arc length measured.
///
/// The length function `len(t)` integrates the speed (the magnitude of the
/// first derivative) by Simpson's rule over a fixed subdivision; its inverse
/// is solved by Newton–Raphson on the length function scaled to [0, 1].
pub trait ParamCurveArclen: ParamCurveDeriv {
    /// The speed of the curve, i.e. the magnitude of the first derivative.
    #[inline]
    fn speed(&self, t: f64) -> f64 {
        self.deriv().eval(t).to_vec2().hypot()
    }

    /// The arc length of the curve.
    #[inline]
    fn arclen(&self) -> f64 {
        self.arclen_range(0.0, 1.0)
    }

    /// The arc length of the parameter interval from `t0` to `t1`.
    ///
    /// A reversed interval (`t1 < t0`) yields the negated length.
    fn arclen_range(&self, t0: f64, t1: f64) -> f64 {
        let d = self.deriv();
        integrate_simpson(|t| d.eval(t).to_vec2().hypot(), t0, t1)
    }

    /// Solve for the parameter whose arc length from the start is the given
    /// fraction `s` of the total length, for `s` in [0, 1].
    ///
    /// Uses Newton iteration on the normalized length function with the
    /// initial guess set to `s` itself. A solve that runs out of iterations
    /// but lands within half the convergence limit of the target is reported
    /// as [`SolveStatus::Partial`] rather than an error.
    fn inv_arclen(&self, s: f64) -> Result<SolveStatus, NonConvergence> {
        let d = self.deriv();
        let speed = |t: f64| d.eval(t).to_vec2().hypot();
        let total = integrate_simpson(&speed, 0.0, 1.0);
        solve_newton(
            |t| integrate_simpson(&speed, 0.0, t) / total,
            |t| speed(t) / total,
            s,
        )
    }
}

/// A parametrized curve that can have its signed area measured.
pub trait ParamCurveArea {
    /// Compute the signed area under the curve.
    ///
    /// For a closed path, the signed area of the path is the sum of signed
    /// areas of the segments. This is a variant of the "shoelace formula."
    /// See:
    /// <https://github.com/Pomax/bezierinfo/issues/44> and
    /// <http://ich.deanmcnamee.com/graphics/2016/03/30/CurveArea.html>
    ///
    /// This can be computed exactly for Béziers thanks to Green's theorem.
    fn signed_area(&self) -> f64;
}

/// The maximum number of extrema that can be reported in the `ParamCurveExtrema` trait.
///
/// This is 4 to support cubic Béziers, which can have two x extrema
/// and two y extrema.
pub const MAX_EXTREMA: usize = 4;

/// A parametrized curve that reports the extrema of its coordinates.
pub trait ParamCurveExtrema: ParamCurve {
    /// Compute the extrema of the curve.
    ///
    /// Only extrema within the interior of the curve count.
    /// At most four extrema can be reported, which is sufficient for
    /// cubic Béziers.
    ///
    /// The extrema should be reported in increasing parameter order.
    fn extrema(&self) -> ArrayVec<f64, MAX_EXTREMA>;

    /// The smallest rectangle that encloses the curve in the range (0..1).
    fn bounding_box(&self) -> Rect {
        let mut bbox = Rect::from_points(self.start(), self.end());
        for t in self.extrema() {
            bbox = bbox.union_pt(self.eval(t));
        }
        bbox
    }
}
