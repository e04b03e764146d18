// Copyright 2025 the Vojo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A segment of an ellipse, with optional pie closure and donut hole.

use alloc::vec::Vec;

use crate::path::ARC_MAGIC;
use crate::{Path2D, PathEl, Point, Rect, Shape};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// How the gap of a partial sweep is joined up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ArcClosure {
    /// No connecting edges, just the sweep and its closing chord.
    Open,
    /// The gap closes straight across the end points.
    Chord,
    /// Edges run from the sweep's ends to the center, or to the inner
    /// rim when there is a hole.
    #[default]
    Pie,
}

/// A segment of an axis-aligned ellipse inside a bounding rectangle.
///
/// Angles are in degrees; a sweep of 360 or more draws the whole
/// ellipse. A nonzero `hole_ratio` carves out a concentric hole of that
/// fraction of the radii, turning a pie into a ring wedge.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EllipseArc {
    /// The rectangle the full ellipse would fill.
    pub bounds: Rect,
    /// The start angle in degrees.
    pub start_angle: f64,
    /// The sweep extent in degrees.
    pub sweep_angle: f64,
    /// How the gap of a partial sweep is joined up.
    pub closure: ArcClosure,
    /// The fraction of the radii carved out of the middle, 0 for none.
    pub hole_ratio: f64,
}

impl EllipseArc {
    /// A new pie-closed arc from bounds and angles in degrees.
    pub fn new(bounds: Rect, start_angle: f64, sweep_angle: f64) -> EllipseArc {
        EllipseArc {
            bounds,
            start_angle,
            sweep_angle,
            closure: ArcClosure::default(),
            hole_ratio: 0.0,
        }
    }

    /// This arc with a different closure.
    pub fn with_closure(mut self, closure: ArcClosure) -> EllipseArc {
        self.closure = closure;
        self
    }

    /// This arc with a concentric hole of the given radius fraction.
    pub fn with_hole_ratio(mut self, hole_ratio: f64) -> EllipseArc {
        self.hole_ratio = hole_ratio;
        self
    }

    /// Is this arc finite?
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.bounds.is_finite()
            && self.start_angle.is_finite()
            && self.sweep_angle.is_finite()
            && self.hole_ratio.is_finite()
    }

    /// Is this arc NaN?
    #[inline]
    pub fn is_nan(&self) -> bool {
        self.bounds.is_nan()
            || self.start_angle.is_nan()
            || self.sweep_angle.is_nan()
            || self.hole_ratio.is_nan()
    }
}

/// Appends up to a quarter turn as one cubic, recursing on the rest.
///
/// The control arms scale with the fraction of a quarter swept, so
/// partial sweeps stay on the ellipse.
fn append_sweep(path: &mut Path2D, center: Point, hw: f64, hh: f64, angle: f64, sweep: f64) {
    let step = sweep.clamp(-90.0, 90.0);
    let remainder = if step == 90.0 || step == -90.0 {
        sweep - step
    } else {
        0.0
    };
    let ratio = step / 90.0;
    let angle2 = angle + step;
    let (sin0, cos0) = angle.to_radians().sin_cos();
    let (sin1, cos1) = angle2.to_radians().sin_cos();
    let m = ARC_MAGIC * ratio;
    let cp0 = Point::new(
        center.x + cos0 * hw - sin0 * hw * m,
        center.y + sin0 * hh + cos0 * hh * m,
    );
    let cp1 = Point::new(
        center.x + cos1 * hw + sin1 * hw * m,
        center.y + sin1 * hh - cos1 * hh * m,
    );
    let end = Point::new(center.x + cos1 * hw, center.y + sin1 * hh);
    path.curve_to(cp0, cp1, end);
    if remainder != 0.0 {
        append_sweep(path, center, hw, hh, angle2, remainder);
    }
}

impl Shape for EllipseArc {
    type PathIter<'iter> = alloc::vec::IntoIter<PathEl>;

    fn path_iter(&self) -> alloc::vec::IntoIter<PathEl> {
        let els: Vec<PathEl> = self.to_path().path_iter().collect();
        els.into_iter()
    }

    fn to_path(&self) -> Path2D {
        let start = self.start_angle;
        let sweep = self.sweep_angle;
        let end_angle = start + sweep;
        let hole = self.hole_ratio;
        let hw = self.bounds.width() / 2.0;
        let hh = self.bounds.height() / 2.0;
        let center = self.bounds.center();
        let (sin0, cos0) = start.to_radians().sin_cos();
        let outer = Point::new(center.x + cos0 * hw, center.y + sin0 * hh);

        let mut path = Path2D::new();

        // A pie wedge opens with an edge from the center (or inner rim)
        // out to the sweep's start.
        if self.closure == ArcClosure::Pie && sweep < 360.0 {
            let inner = Point::new(center.x + cos0 * hw * hole, center.y + sin0 * hh * hole);
            path.move_to(inner);
            path.line_to(outer);
        } else {
            path.move_to(outer);
        }

        append_sweep(&mut path, center, hw, hh, start, sweep);

        // The hole is the same sweep over scaled radii, walked backwards
        // so it cancels the outer winding.
        if hole > 0.0 {
            let (sin1, cos1) = end_angle.to_radians().sin_cos();
            let inner_end = Point::new(center.x + cos1 * hw * hole, center.y + sin1 * hh * hole);
            if sweep < 360.0 {
                path.line_to(inner_end);
            } else {
                path.close();
                path.move_to(inner_end);
            }
            append_sweep(&mut path, center, hw * hole, hh * hole, end_angle, -sweep);
        }

        path.close();
        path
    }
}
