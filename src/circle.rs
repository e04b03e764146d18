// Copyright 2025 the Vojo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A circle shape.

use core::f64::consts::PI;
use core::ops::{Add, Sub};

use crate::{Ellipse, EllipsePathIter, Point, Rect, Shape, Vec2};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// A circle.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Circle {
    /// The center.
    pub center: Point,
    /// The radius.
    pub radius: f64,
}

impl Circle {
    /// A new circle from center and radius.
    #[inline]
    pub fn new(center: impl Into<Point>, radius: f64) -> Circle {
        Circle {
            center: center.into(),
            radius,
        }
    }

    /// Is this circle finite?
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.center.is_finite() && self.radius.is_finite()
    }

    /// Is this circle NaN?
    #[inline]
    pub fn is_nan(&self) -> bool {
        self.center.is_nan() || self.radius.is_nan()
    }
}

impl Add<Vec2> for Circle {
    type Output = Circle;

    #[inline]
    fn add(self, v: Vec2) -> Circle {
        Circle {
            center: self.center + v,
            radius: self.radius,
        }
    }
}

impl Sub<Vec2> for Circle {
    type Output = Circle;

    #[inline]
    fn sub(self, v: Vec2) -> Circle {
        Circle {
            center: self.center - v,
            radius: self.radius,
        }
    }
}

impl Shape for Circle {
    type PathIter<'iter> = EllipsePathIter;

    fn path_iter(&self) -> EllipsePathIter {
        Ellipse::from(*self).path_iter()
    }

    #[inline]
    fn area(&self) -> f64 {
        PI * self.radius.powi(2)
    }

    #[inline]
    fn perimeter(&self) -> f64 {
        (2.0 * PI * self.radius).abs()
    }

    fn winding(&self, pt: Point) -> i32 {
        if (pt - self.center).hypot2() < self.radius.powi(2) {
            1
        } else {
            0
        }
    }

    #[inline]
    fn bounding_box(&self) -> Rect {
        let r = self.radius.abs();
        let (x, y) = self.center.into();
        Rect::new(x - r, y - r, x + r, y + r)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Circle, Point, Shape};
    use std::f64::consts::PI;

    fn assert_approx_eq(x: f64, y: f64, tolerance: f64) {
        assert!((x - y).abs() < tolerance, "{x} != {y}");
    }

    #[test]
    fn area_and_winding_match_path() {
        let center = Point::new(5.0, 5.0);
        let circle = Circle::new(center, 5.0);
        assert_approx_eq(circle.area(), 25.0 * PI, 1e-9);
        assert_eq!(circle.winding(center), 1);

        let path = circle.to_path();
        assert_approx_eq(circle.area(), path.area(), 25.0 * PI * 1e-2);
        assert_eq!(path.winding(center), 1);
        assert_eq!(path.bounding_box(), circle.bounding_box());
    }

    #[test]
    fn perimeter_close_to_path_length() {
        let circle = Circle::new((0.0, 0.0), 10.0);
        assert_approx_eq(circle.perimeter(), 20.0 * PI, 1e-9);
        assert_approx_eq(circle.to_path().perimeter(), 20.0 * PI, 20.0 * PI * 1e-2);
    }

    #[test]
    fn contains_is_strict_at_rim() {
        let circle = Circle::new((0.0, 0.0), 2.0);
        assert!(circle.contains(Point::new(1.9, 0.0)));
        assert!(!circle.contains(Point::new(2.0, 0.0)));
        assert!(!circle.contains(Point::new(1.5, 1.5)));
    }
}
