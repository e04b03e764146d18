// Copyright 2025 the Vojo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A rectangle with rounded corners.

use core::ops::{Add, Sub};

use crate::path::ARC_MAGIC;
use crate::rect::RectPathIter;
use crate::{PathEl, Point, Rect, Shape, Vec2};

/// A rectangle with equally rounded corners.
///
/// The corner radius is clamped to half the width and half the height
/// when the path is walked, so a large radius degrades to a stadium
/// rather than a self-crossing outline.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundRect {
    rect: Rect,
    radius: f64,
}

impl RoundRect {
    /// A new rounded rectangle from coordinates and corner radius.
    #[inline]
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64, radius: f64) -> RoundRect {
        RoundRect::from_rect(Rect::new(x0, y0, x1, y1), radius)
    }

    /// A new rounded rectangle from a rectangle and corner radius.
    #[inline]
    pub fn from_rect(rect: Rect, radius: f64) -> RoundRect {
        RoundRect { rect, radius }
    }

    /// The rectangle being rounded.
    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// The corner radius, as given.
    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// The width of the rectangle.
    #[inline]
    pub fn width(&self) -> f64 {
        self.rect.width()
    }

    /// The height of the rectangle.
    #[inline]
    pub fn height(&self) -> f64 {
        self.rect.height()
    }

    /// Is this rounded rectangle finite?
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.rect.is_finite() && self.radius.is_finite()
    }

    /// Is this rounded rectangle NaN?
    #[inline]
    pub fn is_nan(&self) -> bool {
        self.rect.is_nan() || self.radius.is_nan()
    }
}

impl Add<Vec2> for RoundRect {
    type Output = RoundRect;

    #[inline]
    fn add(self, v: Vec2) -> RoundRect {
        RoundRect {
            rect: self.rect + v,
            radius: self.radius,
        }
    }
}

impl Sub<Vec2> for RoundRect {
    type Output = RoundRect;

    #[inline]
    fn sub(self, v: Vec2) -> RoundRect {
        RoundRect {
            rect: self.rect - v,
            radius: self.radius,
        }
    }
}

#[doc(hidden)]
pub struct RoundRectPathIter(RoundRectIterInner);

enum RoundRectIterInner {
    /// No rounding, so the plain rectangle path.
    Plain(RectPathIter),
    Round(RoundCorners),
}

struct RoundCorners {
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    rw: f64,
    rh: f64,
    ix: usize,
}

fn corner_cubic(last: Point, corner: Point, end: Point) -> PathEl {
    let cp1 = last + (corner - last) * ARC_MAGIC;
    let cp2 = end + (corner - end) * ARC_MAGIC;
    PathEl::CurveTo(cp1, cp2, end)
}

impl RoundCorners {
    fn next_el(&mut self) -> Option<PathEl> {
        let RoundCorners {
            x0,
            y0,
            x1,
            y1,
            rw,
            rh,
            ..
        } = *self;
        let ix = self.ix;
        self.ix += 1;
        match ix {
            0 => Some(PathEl::MoveTo(Point::new(x0 + rw, y0))),
            1 => Some(PathEl::LineTo(Point::new(x1 - rw, y0))),
            2 => Some(corner_cubic(
                Point::new(x1 - rw, y0),
                Point::new(x1, y0),
                Point::new(x1, y0 + rh),
            )),
            3 => Some(PathEl::LineTo(Point::new(x1, y1 - rh))),
            4 => Some(corner_cubic(
                Point::new(x1, y1 - rh),
                Point::new(x1, y1),
                Point::new(x1 - rw, y1),
            )),
            5 => Some(PathEl::LineTo(Point::new(x0 + rw, y1))),
            6 => Some(corner_cubic(
                Point::new(x0 + rw, y1),
                Point::new(x0, y1),
                Point::new(x0, y1 - rh),
            )),
            7 => Some(PathEl::LineTo(Point::new(x0, y0 + rh))),
            8 => Some(corner_cubic(
                Point::new(x0, y0 + rh),
                Point::new(x0, y0),
                Point::new(x0 + rw, y0),
            )),
            9 => Some(PathEl::ClosePath),
            _ => None,
        }
    }
}

impl Iterator for RoundRectPathIter {
    type Item = PathEl;

    fn next(&mut self) -> Option<PathEl> {
        match &mut self.0 {
            RoundRectIterInner::Plain(iter) => iter.next(),
            RoundRectIterInner::Round(round) => round.next_el(),
        }
    }
}

impl Shape for RoundRect {
    type PathIter<'iter> = RoundRectPathIter;

    fn path_iter(&self) -> RoundRectPathIter {
        if self.radius <= 0.0 {
            return RoundRectPathIter(RoundRectIterInner::Plain(self.rect.path_iter()));
        }
        let width = self.width();
        let height = self.height();
        let round = RoundCorners {
            x0: self.rect.x0,
            y0: self.rect.y0,
            x1: self.rect.x1,
            y1: self.rect.y1,
            rw: self.radius.min(width / 2.0),
            rh: self.radius.min(height / 2.0),
            // Degenerate extents have no path at all.
            ix: if width < 0.0 || height < 0.0 { 10 } else { 0 },
        };
        RoundRectPathIter(RoundRectIterInner::Round(round))
    }

    #[inline]
    fn bounding_box(&self) -> Rect {
        self.rect
    }
}

#[cfg(test)]
mod tests {
    use crate::{PathEl, Point, Rect, RoundRect, Shape};
    use alloc::vec::Vec;

    #[test]
    fn zero_radius_is_the_plain_rectangle() {
        let round = RoundRect::new(0.0, 0.0, 10.0, 10.0, 0.0);
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        let a: Vec<PathEl> = round.path_iter().collect();
        let b: Vec<PathEl> = rect.path_iter().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn corner_cubics_meet_the_edges() {
        let round = RoundRect::new(0.0, 0.0, 10.0, 10.0, 2.0);
        let els: Vec<PathEl> = round.path_iter().collect();
        assert_eq!(els.len(), 10);
        assert_eq!(els[0], PathEl::MoveTo(Point::new(2.0, 0.0)));
        assert_eq!(els[1], PathEl::LineTo(Point::new(8.0, 0.0)));
        match els[2] {
            PathEl::CurveTo(cp1, cp2, end) => {
                assert!((cp1 - Point::new(8.0 + 2.0 * 0.5523, 0.0)).hypot() < 1e-12);
                assert!((cp2 - Point::new(10.0, 2.0 - 2.0 * 0.5523)).hypot() < 1e-12);
                assert_eq!(end, Point::new(10.0, 2.0));
            }
            _ => panic!("expected a corner cubic"),
        }
        assert_eq!(round.bounding_box(), Rect::new(0.0, 0.0, 10.0, 10.0));

        // Rounding shaves the corners but keeps most of the area.
        let area = round.area().abs();
        assert!(area > 96.0 && area < 100.0);
        assert!(round.contains(Point::new(5.0, 5.0)));
        assert!(!round.contains(Point::new(0.2, 0.2)));
    }

    #[test]
    fn radius_clamps_to_half_extents() {
        let round = RoundRect::new(0.0, 0.0, 20.0, 10.0, 50.0);
        let els: Vec<PathEl> = round.path_iter().collect();
        assert_eq!(els[0], PathEl::MoveTo(Point::new(10.0, 0.0)));
        match els[2] {
            PathEl::CurveTo(_, _, end) => assert_eq!(end, Point::new(20.0, 5.0)),
            _ => panic!("expected a corner cubic"),
        }
        assert!(round.contains(Point::new(10.0, 5.0)));
    }

    #[test]
    fn backwards_rect_has_no_path() {
        let round = RoundRect::new(10.0, 0.0, 0.0, 10.0, 2.0);
        assert_eq!(round.path_iter().count(), 0);
    }
}
