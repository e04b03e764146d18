// Copyright 2025 the Vojo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An axis-aligned ellipse.

use core::f64::consts::PI;
use core::ops::{Add, Sub};

use crate::path::ARC_MAGIC;
use crate::{Circle, PathEl, Point, Rect, Shape, Vec2};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// An axis-aligned ellipse, from center and per-axis radii.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ellipse {
    /// The center.
    pub center: Point,
    /// The horizontal and vertical radii.
    pub radii: Vec2,
}

impl Ellipse {
    /// A new ellipse from center and radii.
    #[inline]
    pub fn new(center: impl Into<Point>, radii: impl Into<Vec2>) -> Ellipse {
        Ellipse {
            center: center.into(),
            radii: radii.into(),
        }
    }

    /// The largest ellipse inscribed in the given rectangle.
    #[inline]
    pub fn from_rect(rect: Rect) -> Ellipse {
        Ellipse {
            center: rect.center(),
            radii: Vec2::new(rect.width() / 2.0, rect.height() / 2.0),
        }
    }

    /// Is this ellipse finite?
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.center.is_finite() && self.radii.is_finite()
    }

    /// Is this ellipse NaN?
    #[inline]
    pub fn is_nan(&self) -> bool {
        self.center.is_nan() || self.radii.is_nan()
    }
}

impl From<Circle> for Ellipse {
    #[inline]
    fn from(circle: Circle) -> Ellipse {
        Ellipse::new(circle.center, Vec2::new(circle.radius, circle.radius))
    }
}

impl Add<Vec2> for Ellipse {
    type Output = Ellipse;

    #[inline]
    fn add(self, v: Vec2) -> Ellipse {
        Ellipse {
            center: self.center + v,
            radii: self.radii,
        }
    }
}

impl Sub<Vec2> for Ellipse {
    type Output = Ellipse;

    #[inline]
    fn sub(self, v: Vec2) -> Ellipse {
        Ellipse {
            center: self.center - v,
            radii: self.radii,
        }
    }
}

/// Four quarter-turn cubics and a close.
#[doc(hidden)]
pub struct EllipsePathIter {
    ellipse: Ellipse,
    ix: usize,
}

impl Iterator for EllipsePathIter {
    type Item = PathEl;

    fn next(&mut self) -> Option<PathEl> {
        let (cx, cy) = self.ellipse.center.into();
        let Vec2 { x: rx, y: ry } = self.ellipse.radii;
        let ax = rx * ARC_MAGIC;
        let ay = ry * ARC_MAGIC;
        let ix = self.ix;
        self.ix += 1;
        match ix {
            0 => Some(PathEl::MoveTo(Point::new(cx + rx, cy))),
            1 => Some(PathEl::CurveTo(
                Point::new(cx + rx, cy + ay),
                Point::new(cx + ax, cy + ry),
                Point::new(cx, cy + ry),
            )),
            2 => Some(PathEl::CurveTo(
                Point::new(cx - ax, cy + ry),
                Point::new(cx - rx, cy + ay),
                Point::new(cx - rx, cy),
            )),
            3 => Some(PathEl::CurveTo(
                Point::new(cx - rx, cy - ay),
                Point::new(cx - ax, cy - ry),
                Point::new(cx, cy - ry),
            )),
            4 => Some(PathEl::CurveTo(
                Point::new(cx + ax, cy - ry),
                Point::new(cx + rx, cy - ay),
                Point::new(cx + rx, cy),
            )),
            5 => Some(PathEl::ClosePath),
            _ => None,
        }
    }
}

impl Shape for Ellipse {
    type PathIter<'iter> = EllipsePathIter;

    fn path_iter(&self) -> EllipsePathIter {
        EllipsePathIter {
            ellipse: *self,
            ix: 0,
        }
    }

    #[inline]
    fn area(&self) -> f64 {
        PI * (self.radii.x * self.radii.y).abs()
    }

    fn winding(&self, pt: Point) -> i32 {
        let v = pt - self.center;
        let norm = (v.x / self.radii.x).powi(2) + (v.y / self.radii.y).powi(2);
        if norm < 1.0 {
            1
        } else {
            0
        }
    }

    #[inline]
    fn bounding_box(&self) -> Rect {
        let rx = self.radii.x.abs();
        let ry = self.radii.y.abs();
        let (x, y) = self.center.into();
        Rect::new(x - rx, y - ry, x + rx, y + ry)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Ellipse, Point, Rect, Shape};
    use std::f64::consts::PI;

    #[test]
    fn path_stays_near_true_ellipse() {
        let ellipse = Ellipse::new((5.0, 5.0), (4.0, 2.0));
        assert_eq!(ellipse.bounding_box(), Rect::new(1.0, 3.0, 9.0, 7.0));

        // The cubic approximation encloses nearly the true area.
        let path = ellipse.to_path();
        assert!((path.area().abs() - 8.0 * PI).abs() < 8.0 * PI * 1e-2);
        assert_eq!(path.bounding_box(), ellipse.bounding_box());
    }

    #[test]
    fn winding_inside_and_out() {
        let ellipse = Ellipse::new((0.0, 0.0), (4.0, 2.0));
        assert_eq!(ellipse.winding(Point::new(3.9, 0.0)), 1);
        assert_eq!(ellipse.winding(Point::new(0.0, 2.1)), 0);
        // Inside the corner of the bounding box but outside the curve.
        assert_eq!(ellipse.winding(Point::new(3.5, 1.8)), 0);
        assert!(ellipse.contains(Point::new(0.0, 1.9)));
    }

    #[test]
    fn from_rect_inscribes() {
        let ellipse = Ellipse::from_rect(Rect::new(0.0, 0.0, 10.0, 4.0));
        assert_eq!(ellipse.center, Point::new(5.0, 2.0));
        assert_eq!(ellipse.radii.x, 5.0);
        assert_eq!(ellipse.radii.y, 2.0);
    }
}
