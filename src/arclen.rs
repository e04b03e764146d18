// Copyright 2025 the Vojo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Numerical machinery for arc length computation and its inverse.
//!
//! Arc length is computed by Simpson integration of the speed of the
//! curve. The inverse mapping (the parameter at which a given fraction of
//! the total length is reached) is solved with Newton iteration, and can
//! also be baked into a piecewise polynomial table for cheap repeated
//! evaluation, as in animation along a path.

use alloc::vec::Vec;
use core::cell::Cell;
use core::f64::consts::PI;
use core::fmt;

use arrayvec::ArrayVec;

use crate::ParamCurveArclen;

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// The result of a Newton iteration that got somewhere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SolveStatus {
    /// The iteration settled within the step limit.
    Converged(f64),
    /// The iteration cap was reached, but the residual was acceptably
    /// small.
    Partial(f64),
}

impl SolveStatus {
    /// The solved value, however well converged.
    #[inline]
    pub fn value(self) -> f64 {
        match self {
            SolveStatus::Converged(x) | SolveStatus::Partial(x) => x,
        }
    }
}

/// Error returned when Newton iteration fails to approach a solution.
///
/// Carries the best guess reached and how far off it still was, so a
/// caller that can tolerate a rough answer may use it anyway.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NonConvergence {
    /// The final iterate.
    pub guess: f64,
    /// Absolute error of `f(guess)` against the target.
    pub residual: f64,
}

impl fmt::Display for NonConvergence {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "iteration stalled at {} with residual {}",
            self.guess, self.residual
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for NonConvergence {}

/// Integrate `f` over `[start, end]` with the composite Simpson rule,
/// using 100 subintervals.
///
/// A reversed interval negates the result.
pub fn integrate_simpson(f: impl Fn(f64) -> f64, start: f64, end: f64) -> f64 {
    if end < start {
        return -integrate_simpson(f, end, start);
    }
    // Simpson's rule wants an even interval count.
    let mut nintervals = 100;
    let h = (end - start) / (nintervals as f64);
    let mut integral = f(start) + f(end);
    let mut point = start + h;
    let mut odds = f(point);
    let mut evens = 0.0;
    while nintervals > 2 {
        point += h;
        evens += f(point);
        point += h;
        odds += f(point);
        nintervals -= 2;
    }
    integral += 4.0 * odds + 2.0 * evens;
    h * integral / 3.0
}

/// Solve `f(x) = target` by Newton iteration, starting from `target`
/// itself as the initial guess.
///
/// Iteration stops once a step moves less than `1e-10`. If 1000 steps
/// do not get that far, the last guess is still accepted as
/// [`SolveStatus::Partial`] when its residual is tiny, and rejected as
/// [`NonConvergence`] otherwise.
pub fn solve_newton(
    f: impl Fn(f64) -> f64,
    fprime: impl Fn(f64) -> f64,
    target: f64,
) -> Result<SolveStatus, NonConvergence> {
    const LIMIT: f64 = 1e-10;
    let mut maxiters = 1000;
    let mut new_x = target;
    loop {
        let guess = new_x;
        new_x -= (f(guess) - target) / fprime(guess);
        // Written so a NaN step also settles on the last stable guess.
        if !((guess - new_x).abs() > LIMIT) {
            return Ok(SolveStatus::Converged(guess));
        }
        maxiters -= 1;
        if maxiters == 0 {
            let residual = (f(guess) - target).abs();
            return if residual <= 0.5 * LIMIT {
                Ok(SolveStatus::Partial(guess))
            } else {
                Err(NonConvergence { guess, residual })
            };
        }
    }
}

/// One span of a piecewise polynomial fit, stored as the interpolation
/// samples of a polynomial of degree `xs.len() - 1`.
#[derive(Clone, Debug)]
pub struct Piece {
    /// Start of the span this polynomial covers.
    pub start: f64,
    /// End of the span this polynomial covers.
    pub end: f64,
    /// Sample abscissae (Chebyshev nodes mapped into the span).
    pub xs: ArrayVec<f64, 5>,
    /// Function values at the sample abscissae.
    pub ys: ArrayVec<f64, 5>,
}

impl Piece {
    /// Whether `x` falls within the span of this piece.
    #[inline]
    pub fn contains(&self, x: f64) -> bool {
        x >= self.start && x <= self.end
    }

    /// Evaluate the interpolating polynomial at `x`.
    pub fn eval(&self, x: f64) -> f64 {
        neville_eval(&self.xs, &self.ys, x)
    }
}

/// Interpolate through the samples with Neville's method.
fn neville_eval(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    let mut p: ArrayVec<f64, 5> = ys.iter().copied().collect();
    let n = xs.len();
    for j in 1..n {
        for i in 0..n - j {
            p[i] = (p[i] * (xs[i + j] - x) + p[i + 1] * (x - xs[i])) / (xs[i + j] - xs[i]);
        }
    }
    p[0]
}

/// Chebyshev nodes for an interpolating polynomial of order `n`,
/// stretched so the extreme nodes land on 0 and 1, in ascending order.
fn cheby(n: usize) -> ArrayVec<f64, 5> {
    let mut xs = ArrayVec::new();
    for _ in 0..n {
        xs.push(0.0);
    }
    let c = (PI / (2.0 * n as f64)).cos();
    let b = (c + 1.0) / (2.0 * c);
    let a = (2.0 - b * (c + 1.0)) / (1.0 - c);
    for i in 1..=n {
        let node = (1.0 + (b - a) * (((2 * i - 1) as f64) * PI / (2.0 * n as f64)).cos()) / 2.0;
        xs[n - i] = node;
    }
    xs
}

/// Fit a piecewise interpolating polynomial to `f` over `[start, end]`.
///
/// Each span tries polynomials of increasing degree (two to five
/// Chebyshev nodes), measuring the squared error against 64 uniform
/// samples. A span that cannot be fit within the error limit is split at
/// the point of worst error and both halves are fit recursively.
pub fn neville_fit(f: impl Fn(f64) -> f64, start: f64, end: f64) -> Vec<Piece> {
    let mut pieces = Vec::new();
    neville_fit_inner(&f, start, end, 0, &mut pieces);
    pieces
}

fn neville_fit_inner<F: Fn(f64) -> f64>(
    f: &F,
    start: f64,
    end: f64,
    depth: usize,
    out: &mut Vec<Piece>,
) {
    const ERROR_LIMIT: f64 = 0.0004;
    const OUT_SAMPLES: usize = 64;
    const MAX_DEPTH: usize = 16;

    if end <= start {
        return;
    }

    let mut samples = 2;
    let mut maxerr;
    let mut maxerrpt = -1.0;
    let (mut xs, mut ys);
    loop {
        xs = cheby(samples);
        for x in xs.iter_mut() {
            *x = start + (end - start) * *x;
        }
        ys = xs.iter().map(|&x| f(x)).collect::<ArrayVec<f64, 5>>();

        // Measure how well the polynomial tracks the function.
        maxerr = 0.0;
        for outi in 0..OUT_SAMPLES {
            let xx = start + (end - start) * (outi as f64) / ((OUT_SAMPLES - 1) as f64);
            let yy = neville_eval(&xs, &ys, xx);
            let actual = f(xx);
            let esq = (yy - actual) * (yy - actual);
            if esq > maxerr {
                maxerr = esq;
                maxerrpt = xx;
            }
        }

        samples += 1;
        if !(maxerr > ERROR_LIMIT && samples <= 5) {
            break;
        }
    }

    if maxerr > ERROR_LIMIT && depth < MAX_DEPTH {
        neville_fit_inner(f, start, maxerrpt, depth + 1, out);
        neville_fit_inner(f, maxerrpt, end, depth + 1, out);
    } else {
        out.push(Piece { start, end, xs, ys });
    }
}

/// Fit a piecewise polynomial table mapping arc length fraction to curve
/// parameter.
///
/// The table covers fractions in `[0, 1]` of the curve's total length.
/// Evaluating it is far cheaper than solving [`inv_arclen`] each time,
/// which matters when sampling repeatedly, as in animation along a path.
///
/// [`inv_arclen`]: ParamCurveArclen::inv_arclen
pub fn fit_inv_arclen<C: ParamCurveArclen>(curve: &C) -> Result<Vec<Piece>, NonConvergence> {
    let failed = Cell::new(None);
    let inverse = |s: f64| match curve.inv_arclen(s) {
        Ok(sol) => sol.value(),
        Err(err) => {
            failed.set(Some(err));
            err.guess
        }
    };
    let pieces = neville_fit(inverse, 0.0, 1.0);
    match failed.get() {
        Some(err) => Err(err),
        None => Ok(pieces),
    }
}
