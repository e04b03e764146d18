// Copyright 2025 the Vojo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fitting cubic curves to sample points.
//!
//! The approach follows Philip J. Schneider's curve fitting algorithm
//! from Graphics Gems (1990): a least squares cubic over a chord
//! length parameterization, a few rounds of Newton reparameterization
//! when the fit is close, and recursive splitting at the worst point
//! when it is not.

use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::{CubicBez, ParamCurve, ParamCurveDeriv, Path2D, PathEl, Point, Shape, Vec2};

/// Default fit error, in squared distance units.
///
/// Fit errors compare against the squared distance from each sample to
/// the candidate curve, so this allows samples to sit a bit over six
/// units off the curve.
pub const DEFAULT_FIT_ERROR: f64 = 40.0;

/// Fits a smooth sequence of cubic curves through the given points.
///
/// Adjacent duplicate points are dropped first, and a point equal to
/// the one two back cancels the point between them, so a jittery
/// backtrack does not pin the curve. Fewer than two distinct points fit
/// to an empty path.
pub fn fit_curve(points: &[Point], error: f64) -> Path2D {
    let d = dedup_points(points);
    let mut path = Path2D::new();
    if d.len() < 2 {
        return path;
    }

    let t_hat1 = normalize(d[1] - d[0]);
    let t_hat2 = normalize(d[d.len() - 2] - d[d.len() - 1]);
    let mut curves = Vec::new();
    fit_cubic(&d, t_hat1, t_hat2, error, &mut curves);

    path.move_to(d[0]);
    for curve in &curves {
        path.curve_to(curve.p1, curve.p2, curve.p3);
    }
    path
}

impl Path2D {
    /// Replaces the points from `point_index` on with fitted curves.
    ///
    /// The fitted curves are appended to whatever stays of the path, so
    /// a freehand line trail turns into a smooth curved tail. A range
    /// with fewer than two distinct points leaves the path untouched.
    pub fn fit_curve_from(&mut self, point_index: usize, error: f64) {
        let tail: Vec<Point> = (point_index..self.point_count())
            .filter_map(|i| self.point(i))
            .collect();
        let fitted = fit_curve(&tail, error);
        if fitted.is_empty() {
            return;
        }

        while self.point_count() > point_index {
            self.remove_last_seg();
        }
        for el in fitted.path_iter() {
            match el {
                PathEl::MoveTo(p) => {
                    if self.is_empty() {
                        self.move_to(p);
                    }
                }
                PathEl::CurveTo(p1, p2, p3) => self.curve_to(p1, p2, p3),
                _ => {}
            }
        }
    }
}

/// Drops adjacent duplicates, cancelling single point backtracks.
fn dedup_points(points: &[Point]) -> Vec<Point> {
    let mut out: Vec<Point> = Vec::with_capacity(points.len());
    for &point in points {
        let n = out.len();
        if n > 1 && point == out[n - 2] {
            out.pop();
        } else if n == 0 || point != out[n - 1] {
            out.push(point);
        }
    }
    out
}

/// Fits the point range with one cubic, or recursively with several.
fn fit_cubic(d: &[Point], t_hat1: Vec2, t_hat2: Vec2, error: f64, out: &mut Vec<CubicBez>) {
    if d.len() == 2 {
        out.push(chord_heuristic(d[0], d[1], t_hat1, t_hat2));
        return;
    }

    let mut u = chord_length_parameterize(d);
    let mut curve = generate_bezier(d, &u, t_hat1, t_hat2);
    let (mut max_error, mut split) = max_fit_error(d, &curve, &u);
    if max_error < error {
        out.push(curve);
        return;
    }

    // A near miss is worth a few Newton reparameterization rounds.
    if max_error < error * error {
        for _ in 0..4 {
            let u2 = reparameterize(d, &u, &curve);
            curve = generate_bezier(d, &u2, t_hat1, t_hat2);
            (max_error, split) = max_fit_error(d, &curve, &u2);
            if max_error < error {
                out.push(curve);
                return;
            }
            u = u2;
        }
    }

    // No luck. Split at the worst point and fit both halves, with a
    // shared tangent at the joint to keep the seam smooth.
    let center = center_tangent(d, split);
    fit_cubic(&d[..=split], t_hat1, center, error, out);
    fit_cubic(&d[split..], -center, t_hat2, error, out);
}

/// Least squares placement of the two inner control points.
fn generate_bezier(d: &[Point], u: &[f64], t_hat1: Vec2, t_hat2: Vec2) -> CubicBez {
    let first = d[0];
    let last = d[d.len() - 1];

    let mut c00 = 0.0;
    let mut c01 = 0.0;
    let mut c11 = 0.0;
    let mut x0 = 0.0;
    let mut x1 = 0.0;
    for (point, &t) in d.iter().zip(u) {
        let a0 = t_hat1 * b1(t);
        let a1 = t_hat2 * b2(t);
        c00 += a0.dot(a0);
        c01 += a0.dot(a1);
        c11 += a1.dot(a1);

        let base = first.to_vec2() * (b0(t) + b1(t)) + last.to_vec2() * (b2(t) + b3(t));
        let tmp = point.to_vec2() - base;
        x0 += a0.dot(tmp);
        x1 += a1.dot(tmp);
    }

    let mut det_c0_c1 = c00 * c11 - c01 * c01;
    let det_c0_x = c00 * x1 - c01 * x0;
    let det_x_c1 = x0 * c11 - x1 * c01;
    if det_c0_c1 == 0.0 {
        det_c0_c1 = (c00 * c11) * 10e-12;
    }
    let alpha_l = det_x_c1 / det_c0_c1;
    let alpha_r = det_c0_x / det_c0_c1;

    // Negative or non-finite alphas mean the system is degenerate;
    // place the control points a third of the chord out instead.
    if alpha_l < 0.0 || alpha_r < 0.0 || !alpha_l.is_finite() || !alpha_r.is_finite() {
        return chord_heuristic(first, last, t_hat1, t_hat2);
    }
    CubicBez::new(first, first + t_hat1 * alpha_l, last + t_hat2 * alpha_r, last)
}

/// The Wu/Barsky heuristic: control points a third of the chord length
/// out along the tangents.
fn chord_heuristic(first: Point, last: Point, t_hat1: Vec2, t_hat2: Vec2) -> CubicBez {
    let dist = last.distance(first) / 3.0;
    CubicBez::new(first, first + t_hat1 * dist, last + t_hat2 * dist, last)
}

/// Parameter values proportional to distance along the polyline.
fn chord_length_parameterize(d: &[Point]) -> SmallVec<[f64; 16]> {
    let mut u: SmallVec<[f64; 16]> = SmallVec::with_capacity(d.len());
    u.push(0.0);
    for i in 1..d.len() {
        let prev = u[i - 1];
        u.push(prev + d[i].distance(d[i - 1]));
    }
    let total = u[u.len() - 1];
    for t in &mut u[1..] {
        *t /= total;
    }
    u
}

/// One Newton root finding step per point toward the parameter of its
/// closest curve point.
fn reparameterize(d: &[Point], u: &[f64], curve: &CubicBez) -> SmallVec<[f64; 16]> {
    d.iter()
        .zip(u)
        .map(|(&point, &t)| newton_step(curve, point, t))
        .collect()
}

fn newton_step(curve: &CubicBez, point: Point, u: f64) -> f64 {
    let d1 = curve.deriv();
    let d2 = d1.deriv();
    let diff = curve.eval(u) - point;
    let q1 = d1.eval(u).to_vec2();
    let q2 = d2.eval(u).to_vec2();
    let numerator = diff.dot(q1);
    let denominator = q1.hypot2() + diff.dot(q2);
    let next = u - numerator / denominator;
    // A flat denominator gives no usable step.
    if next.is_finite() {
        next
    } else {
        u
    }
}

/// The worst squared distance from a sample to the curve, and the
/// sample index to split at.
fn max_fit_error(d: &[Point], curve: &CubicBez, u: &[f64]) -> (f64, usize) {
    let mut max_dist = 0.0;
    let mut split = d.len() / 2;
    for i in 1..d.len() - 1 {
        let dist = (curve.eval(u[i]) - d[i]).hypot2();
        if dist >= max_dist {
            max_dist = dist;
            split = i;
        }
    }
    (max_dist, split)
}

/// Unit tangent at an interior sample, averaging the two sides.
fn center_tangent(d: &[Point], center: usize) -> Vec2 {
    let v1 = d[center - 1] - d[center];
    let v2 = d[center] - d[center + 1];
    normalize((v1 + v2) / 2.0)
}

fn normalize(v: Vec2) -> Vec2 {
    let len = v.hypot();
    if len != 0.0 {
        v / len
    } else {
        v
    }
}

// Bernstein basis for a cubic.
fn b0(u: f64) -> f64 {
    (1.0 - u) * (1.0 - u) * (1.0 - u)
}

fn b1(u: f64) -> f64 {
    3.0 * u * (1.0 - u) * (1.0 - u)
}

fn b2(u: f64) -> f64 {
    3.0 * u * u * (1.0 - u)
}

fn b3(u: f64) -> f64 {
    u * u * u
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use crate::{
        fit_curve, ParamCurve, Path2D, PathEl, PathSeg, Point, Shape, Vec2, DEFAULT_FIT_ERROR,
    };

    #[test]
    fn two_points_use_the_chord_heuristic() {
        let points = [Point::new(0.0, 0.0), Point::new(30.0, 0.0)];
        let path = fit_curve(&points, DEFAULT_FIT_ERROR);
        let els: Vec<PathEl> = path.path_iter().collect();
        assert_eq!(
            els,
            [
                PathEl::MoveTo(Point::new(0.0, 0.0)),
                PathEl::CurveTo(
                    Point::new(10.0, 0.0),
                    Point::new(20.0, 0.0),
                    Point::new(30.0, 0.0)
                ),
            ]
        );
    }

    #[test]
    fn collinear_points_fit_one_cubic() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(20.0, 0.0),
            Point::new(30.0, 0.0),
        ];
        let path = fit_curve(&points, DEFAULT_FIT_ERROR);
        let segs: Vec<PathSeg> = path.segments().collect();
        assert_eq!(segs.len(), 1);
        let PathSeg::Cubic(cubic) = segs[0] else {
            panic!("expected a cubic");
        };
        assert_eq!(cubic.p0, Point::new(0.0, 0.0));
        assert_eq!(cubic.p3, Point::new(30.0, 0.0));
        // The least squares fit spaces the control points evenly along
        // the line.
        assert_eq!(cubic.p1.y, 0.0);
        assert_eq!(cubic.p2.y, 0.0);
        assert!((cubic.p1.x - 10.0).abs() < 1e-6);
        assert!((cubic.p2.x - 20.0).abs() < 1e-6);
    }

    #[test]
    fn three_collinear_points_degenerate_to_the_line() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(5.0, 0.0),
            Point::new(10.0, 0.0),
        ];
        let path = fit_curve(&points, DEFAULT_FIT_ERROR);
        let segs: Vec<PathSeg> = path.segments().collect();
        assert_eq!(segs.len(), 1);
        let PathSeg::Cubic(cubic) = segs[0] else {
            panic!("expected a cubic");
        };
        assert_eq!(cubic.p0, Point::new(0.0, 0.0));
        assert_eq!(cubic.p3, Point::new(10.0, 0.0));
        // Every control point stays on the sample line.
        assert_eq!(cubic.p1.y, 0.0);
        assert_eq!(cubic.p2.y, 0.0);
        assert!((0.0..=10.0).contains(&cubic.p1.x));
        assert!((0.0..=10.0).contains(&cubic.p2.x));
        assert_eq!(cubic.eval(0.5), Point::new(5.0, 0.0));
    }

    #[test]
    fn degenerate_inputs_fit_to_nothing() {
        assert!(fit_curve(&[], DEFAULT_FIT_ERROR).is_empty());
        assert!(fit_curve(&[Point::new(5.0, 5.0)], DEFAULT_FIT_ERROR).is_empty());
        // A repeated single point collapses entirely.
        let held = [Point::new(5.0, 5.0); 4];
        assert!(fit_curve(&held, DEFAULT_FIT_ERROR).is_empty());
        // A backtrack cancels the point in between.
        let jitter = [
            Point::new(0.0, 0.0),
            Point::new(4.0, 4.0),
            Point::new(0.0, 0.0),
        ];
        assert!(fit_curve(&jitter, DEFAULT_FIT_ERROR).is_empty());
    }

    #[test]
    fn duplicate_samples_collapse_before_fitting() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(0.0, 0.0),
            Point::new(30.0, 0.0),
            Point::new(30.0, 0.0),
        ];
        let path = fit_curve(&points, DEFAULT_FIT_ERROR);
        assert_eq!(path.segments().count(), 1);
        assert_eq!(path.last_point(), Some(Point::new(30.0, 0.0)));
    }

    #[test]
    fn arc_samples_fit_single_cubic() {
        // A quarter circle of radius 30, sampled every ten degrees.
        let points: Vec<Point> = (0..10)
            .map(|i| {
                let theta = f64::from(i) * 10.0_f64.to_radians();
                Point::new(30.0 * theta.cos(), 30.0 * theta.sin())
            })
            .collect();
        let path = fit_curve(&points, DEFAULT_FIT_ERROR);
        assert_eq!(path.segments().count(), 1);
        assert_eq!(path.point(0), Some(points[0]));
        assert_eq!(path.last_point(), Some(points[9]));

        // The fit stays near the circle.
        for seg in path.segments() {
            for i in 0..=10 {
                let p = seg.eval(f64::from(i) / 10.0);
                let r = p.to_vec2().hypot();
                assert!((r - 30.0).abs() < 2.0, "radius {r} strays too far");
            }
        }
    }

    #[test]
    fn sharp_corners_force_splits() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(20.0, 10.0),
            Point::new(20.0, 0.0),
        ];
        let path = fit_curve(&points, 1e-6);
        assert!(path.segments().count() >= 2);
        assert_eq!(path.point(0), Some(points[0]));
        assert_eq!(path.last_point(), Some(points[4]));

        // Splits happen at sample points, so every curve endpoint is a
        // sample.
        for seg in path.segments() {
            assert!(points.contains(&seg.start()));
            assert!(points.contains(&seg.end()));
        }
    }

    #[test]
    fn fit_replaces_a_line_trail() {
        let mut path = Path2D::new();
        path.move_to((0.0, 0.0));
        path.line_to((10.0, 0.0));
        path.line_to((20.0, 0.0));
        path.line_to((30.0, 0.0));

        path.fit_curve_from(2, DEFAULT_FIT_ERROR);
        assert_eq!(path.seg_count(), 3);
        assert_eq!(path.point_count(), 5);
        assert_eq!(path.last_point(), Some(Point::new(30.0, 0.0)));
    }

    #[test]
    fn fit_from_start_rebuilds_whole_path() {
        let mut path = Path2D::new();
        path.move_to((0.0, 0.0));
        path.line_to((15.0, 0.0));
        path.line_to((30.0, 0.0));

        path.fit_curve_from(0, DEFAULT_FIT_ERROR);
        assert_eq!(path.seg_count(), 2);
        assert_eq!(path.point(0), Some(Point::new(0.0, 0.0)));
        assert_eq!(path.last_point(), Some(Point::new(30.0, 0.0)));
    }

    #[test]
    fn short_tail_is_left_alone() {
        let mut path = Path2D::new();
        path.move_to((0.0, 0.0));
        path.line_to((10.0, 0.0));
        let before = path.clone();

        path.fit_curve_from(2, DEFAULT_FIT_ERROR);
        assert_eq!(path, before);
    }

    #[test]
    fn random_trails_stay_anchored() {
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..8 {
            let mut cursor = Point::new(50.0, 50.0);
            let mut points = Vec::new();
            for _ in 0..20 {
                cursor += Vec2::new(rng.random_range(-6.0..6.0), rng.random_range(-6.0..6.0));
                points.push(cursor);
            }

            let path = fit_curve(&points, DEFAULT_FIT_ERROR);
            assert_eq!(path.point(0), Some(points[0]));
            assert_eq!(path.last_point(), Some(*points.last().unwrap()));
            for seg in path.segments() {
                assert!(seg.is_finite());
            }
        }
    }
}
