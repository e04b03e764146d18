// Copyright 2025 the Vojo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A closed polygon, its triangulation, and convex decomposition.

use alloc::vec::Vec;
use core::f64::consts::PI;

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;
use crate::{Line, PathEl, PathSeg, Point, PolygonPath, Rect, SegmentPath, Shape};

/// A closed polygon, stored as its corner points.
///
/// The closing edge from the last point back to the first is implicit: a
/// triangle has three points, not four. Polygons with fewer than three
/// points are valid but bound no area.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon {
    points: Vec<Point>,
}

impl Polygon {
    /// Create a new, empty polygon.
    #[inline]
    pub fn new() -> Polygon {
        Polygon { points: Vec::new() }
    }

    /// Create a polygon from corner points.
    pub fn from_points(points: impl IntoIterator<Item = impl Into<Point>>) -> Polygon {
        Polygon {
            points: points.into_iter().map(|p| p.into()).collect(),
        }
    }

    /// The corner points.
    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The number of corner points.
    #[inline]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// The point at `index`, if there is one.
    #[inline]
    pub fn point(&self, index: usize) -> Option<Point> {
        self.points.get(index).copied()
    }

    /// The most recently added point.
    #[inline]
    pub fn last_point(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// Append a corner point.
    pub fn add_point(&mut self, p: impl Into<Point>) {
        self.points.push(p.into());
    }

    /// Move the point at `index`.
    ///
    /// Does nothing if `index` is out of range.
    pub fn set_point(&mut self, index: usize, p: impl Into<Point>) {
        if let Some(slot) = self.points.get_mut(index) {
            *slot = p.into();
        }
    }

    /// Remove all points.
    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// The index of the first point within `radius` of `p`, if any.
    pub fn point_near(&self, p: Point, radius: f64) -> Option<usize> {
        self.points.iter().position(|pt| pt.distance(p) <= radius)
    }

    /// The signed area by the shoelace formula.
    ///
    /// The sign encodes the traversal direction; see [`is_clockwise`].
    ///
    /// [`is_clockwise`]: Polygon::is_clockwise
    pub fn area(&self) -> f64 {
        let pc = self.points.len();
        let mut sum = 0.0;
        for i in 0..pc {
            let p0 = self.points[i];
            let p1 = self.points[(i + 1) % pc];
            sum += p0.x * p1.y - p1.x * p0.y;
        }
        0.5 * sum
    }

    /// Whether the points wind clockwise in a y-down coordinate space.
    #[inline]
    pub fn is_clockwise(&self) -> bool {
        points_clockwise(&self.points)
    }

    /// The interior angle at the point at `index`, in radians.
    ///
    /// The angle is unsigned, so a reflex corner reports the same angle
    /// as its convex mirror image. Returns zero for polygons with fewer
    /// than three points; an out of range `index` wraps around.
    pub fn angle(&self, index: usize) -> f64 {
        let pc = self.points.len();
        if pc < 3 {
            return 0.0;
        }
        let p0 = self.points[(index + pc - 1) % pc];
        let p1 = self.points[index % pc];
        let p2 = self.points[(index + 1) % pc];
        let v0 = p0 - p1;
        let v1 = p2 - p1;
        let cos = (v0.dot(v1) / (v0.hypot() * v1.hypot())).clamp(-1.0, 1.0);
        cos.acos()
    }

    /// The exterior angle at the point at `index`, in radians.
    #[inline]
    pub fn ext_angle(&self, index: usize) -> f64 {
        PI - self.angle(index)
    }

    /// The sum of the exterior angles, in radians.
    pub fn ext_angle_sum(&self) -> f64 {
        let pc = self.points.len();
        if pc < 3 {
            return 0.0;
        }
        (0..pc).map(|i| self.ext_angle(i)).sum()
    }

    /// Whether every corner turns the same way.
    ///
    /// The unsigned exterior angles of a simple convex outline sum to one
    /// full turn; any reflex corner pushes the sum past it. Polygons with
    /// fewer than three points count as convex.
    pub fn is_convex(&self) -> bool {
        if self.points.len() < 3 {
            return true;
        }
        (self.ext_angle_sum().to_degrees() - 360.0).abs() < 1e-4
    }

    /// Whether no two edges cross and no corner backtracks.
    ///
    /// Polygons with fewer than three points are not simple.
    pub fn is_simple(&self) -> bool {
        let pc = self.points.len();
        if pc < 3 {
            return false;
        }
        for i in 0..pc - 1 {
            let j = i + 1;
            let p0 = self.points[i];
            let p1 = self.points[j];

            // A collinear next point that backtracks over this edge is a
            // spur the crossing tests below cannot see.
            let p2 = self.points[(j + 1) % pc];
            if Line::is_collinear(p0, p1, p2) && (p2.x - p0.x) / (p1.x - p0.x) < 1.0 {
                return false;
            }

            for k in j + 1..pc {
                let l = (k + 1) % pc;
                if l == i {
                    continue;
                }
                if lines_cross(p0, p1, self.points[k], self.points[l]) {
                    return false;
                }
            }
        }
        true
    }

    /// Whether two of the edges cross each other.
    #[inline]
    pub fn is_self_intersecting(&self) -> bool {
        self.points.len() >= 3 && !self.is_simple()
    }

    /// Decompose into convex polygons of at most `max_sides` sides.
    ///
    /// The pieces tile this polygon, so their signed areas sum to its
    /// area. `max_sides` is clamped to at least 3. A self-intersecting
    /// polygon is first reduced to simple outlines, at the cost of a
    /// flattening round through [`PolygonPath`].
    pub fn convex_polys(&self, max_sides: usize) -> Vec<Polygon> {
        let max_sides = max_sides.max(3);

        // Decomposition walks crossbars, which only make sense on a
        // simple outline.
        if !self.is_simple() {
            log::warn!("convex decomposition of a non-simple polygon goes through make-simple");
            let mut polys = Vec::new();
            for poly in Polygon::simple_polys(self) {
                if poly.is_simple() {
                    polys.extend(poly.convex_polys(max_sides));
                } else {
                    polys.push(poly);
                }
            }
            return polys;
        }

        let mut poly = self.clone();
        let mut polys = Vec::new();
        while !poly.is_convex() || poly.point_count() > max_sides {
            let before = poly.point_count();
            let remainder = poly.split_convex(max_sides);
            polys.push(core::mem::replace(&mut poly, remainder));
            if poly.point_count() >= before {
                log::warn!("convex decomposition stalled at {before} points, keeping remainder");
                break;
            }
        }
        polys.push(poly);
        polys
    }

    /// Split off the largest leading convex run found, up to `max_sides`
    /// sides, keeping the run in this polygon.
    ///
    /// Returns the remainder outline. The run is chosen greedily by the
    /// longest chain of contained crossbars over all starting points.
    pub fn split_convex(&mut self, max_sides: usize) -> Polygon {
        let pc = self.points.len();
        if pc == 0 {
            return Polygon::new();
        }
        let mut start = 0;
        let mut cmax = 0;
        for i in 0..pc {
            let ccc = self.convex_crossbar_count(i, max_sides);
            if ccc > cmax {
                start = i;
                cmax = ccc;
                if cmax == max_sides {
                    break;
                }
            }
        }
        self.split(start, cmax)
    }

    /// The length of the convex crossbar chain anchored at `index`.
    ///
    /// Counts how many consecutive vertices past `index` can be reached
    /// by a crossbar that stays inside the polygon, then checks that the
    /// next vertex over supports a chain that long too, so the split off
    /// run is convex as seen from both ends.
    fn convex_crossbar_count(&self, index: usize, max: usize) -> usize {
        let mut ccc = 1;
        let mut i = index + 2;
        while i < index + max {
            if !self.contains_crossbar(index, i) {
                break;
            }
            ccc += 1;
            i += 1;
        }

        if ccc > 2 && max > 0 {
            ccc = ccc.min(self.convex_crossbar_count(index + 1, max - 1) + 1);
        }
        ccc
    }

    /// Whether the chord between the two point indexes stays inside.
    fn contains_crossbar(&self, ind0: usize, ind1: usize) -> bool {
        let pc = self.points.len();
        let ind0 = ind0 % pc;
        let ind1 = ind1 % pc;
        let p0 = self.points[ind0];
        let p1 = self.points[ind1];

        // Any edge not touching the chord endpoints must stay clear.
        for i in 0..pc {
            let j = (i + 1) % pc;
            if i == ind0 || i == ind1 || j == ind0 || j == ind1 {
                continue;
            }
            if lines_cross(self.points[i], self.points[j], p0, p1) {
                return false;
            }
        }

        let mid = p0.midpoint(p1);
        self.contains(mid)
    }

    /// Split off the run of `len` edges starting at the point at `start`.
    ///
    /// After the call this polygon holds the run (`len + 1` points,
    /// closed by the crossbar back to its first point) and the returned
    /// polygon holds the rest of the original outline.
    ///
    /// # Panics
    ///
    /// Panics if the polygon is empty or `len` exceeds the point count.
    pub fn split(&mut self, start: usize, len: usize) -> Polygon {
        let pc = self.points.len();
        assert!(pc != 0 && len <= pc, "polygon split needs 0 < len <= point count");
        let end = start + len;

        let rem_count = pc - len + 1;
        let mut rem_points = Vec::with_capacity(rem_count);
        let mut i = if end > pc { end % pc } else { 0 };
        while rem_points.len() < rem_count {
            if i <= start || i >= end {
                rem_points.push(self.points[i % pc]);
            }
            i += 1;
        }

        let mut run = Vec::with_capacity(len + 1);
        for j in start..=start + len {
            run.push(self.points[j % pc]);
        }
        self.points = run;

        Polygon { points: rem_points }
    }

    /// The simple polygons tiling the filled area of a shape.
    ///
    /// Self-intersections of the shape's outline are resolved first, and
    /// curves are flattened with the default [`PolygonPath`] tolerance.
    pub fn simple_polys(shape: &impl Shape) -> Vec<Polygon> {
        let mut seg_path = SegmentPath::from_shape(shape);
        seg_path.make_not_self_intersecting();
        let poly_path = PolygonPath::from_shape(&seg_path);
        poly_path.polygons().to_vec()
    }

    /// Convex polygons of at most `max_sides` sides tiling the filled
    /// area of a shape.
    pub fn convex_polys_for_shape(shape: &impl Shape, max_sides: usize) -> Vec<Polygon> {
        Polygon::simple_polys(shape)
            .into_iter()
            .flat_map(|poly| poly.convex_polys(max_sides))
            .collect()
    }
}

fn lines_cross(p0: Point, p1: Point, p2: Point, p3: Point) -> bool {
    PathSeg::Line(Line::new(p0, p1)).crosses(&PathSeg::Line(Line::new(p2, p3)))
}

/// Whether a point run winds clockwise in a y-down coordinate space.
///
/// The accumulated value is twice the signed shoelace area, so this is
/// the sign test of `Polygon::area` without the halving.
fn points_clockwise(points: &[Point]) -> bool {
    let pc = points.len();
    let mut zval = 0.0;
    for i in 0..pc {
        let p0 = points[i];
        let p1 = points[(i + 1) % pc];
        zval += (p0.x - p1.x) * (p0.y + p1.y);
    }
    zval > 0.0
}

/// An ear-cut triangulation of a [`Polygon`].
///
/// Triangles are stored as index triples into the point list, each triple
/// wound the same way as the source polygon.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Triangulation {
    points: Vec<Point>,
    indexes: Vec<usize>,
}

impl Triangulation {
    /// Triangulate a polygon.
    ///
    /// A simple polygon of `n` points produces `n - 2` triangles.
    /// Degenerate input (repeated or collinear points) is clipped on a
    /// best-effort basis rather than rejected.
    pub fn new(polygon: &Polygon) -> Triangulation {
        let points = polygon.points.clone();
        let mut indexes = earcut(&points);

        // Ear clipping does not promise an orientation per triangle;
        // rewind any triple that disagrees with the polygon itself.
        let clockwise = points_clockwise(&points);
        for tri in indexes.chunks_exact_mut(3) {
            let tri_points = [points[tri[0]], points[tri[1]], points[tri[2]]];
            if points_clockwise(&tri_points) != clockwise {
                tri.swap(0, 2);
            }
        }

        Triangulation { points, indexes }
    }

    /// The points of the source polygon.
    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Triangle corners, as index triples into [`points`].
    ///
    /// [`points`]: Triangulation::points
    #[inline]
    pub fn indexes(&self) -> &[usize] {
        &self.indexes
    }

    /// The number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indexes.len() / 3
    }

    /// The corner points of the triangle at `index`, if there is one.
    pub fn triangle(&self, index: usize) -> Option<[Point; 3]> {
        let i = index.checked_mul(3)?;
        let tri = self.indexes.get(i..i + 3)?;
        Some([self.points[tri[0]], self.points[tri[1]], self.points[tri[2]]])
    }
}

/// Classic ear clipping over the point list, returning index triples.
fn earcut(points: &[Point]) -> Vec<usize> {
    let pc = points.len();
    let mut indexes = Vec::new();
    if pc < 3 {
        return indexes;
    }
    let clockwise = points_clockwise(points);
    let mut remaining: Vec<usize> = (0..pc).collect();

    let mut cursor = 0;
    let mut stale = 0;
    while remaining.len() > 3 {
        let len = remaining.len();
        let i0 = remaining[cursor % len];
        let i1 = remaining[(cursor + 1) % len];
        let i2 = remaining[(cursor + 2) % len];

        // A full lap without finding an ear means the outline is
        // degenerate; clip anyway so the loop finishes.
        let force = stale > len;
        if force || is_ear(points, &remaining, i0, i1, i2, clockwise) {
            if force {
                log::warn!("no ear in degenerate polygon, clipping corner {i1}");
            }
            indexes.extend_from_slice(&[i0, i1, i2]);
            remaining.remove((cursor + 1) % len);
            stale = 0;
        } else {
            cursor += 1;
            stale += 1;
        }
    }
    indexes.extend_from_slice(&remaining);
    indexes
}

fn is_ear(
    points: &[Point],
    remaining: &[usize],
    i0: usize,
    i1: usize,
    i2: usize,
    clockwise: bool,
) -> bool {
    let a = points[i0];
    let b = points[i1];
    let c = points[i2];

    // The corner has to turn the same way as the polygon winds.
    let cross = (b - a).cross(c - b);
    if cross == 0.0 || (cross > 0.0) != clockwise {
        return false;
    }

    // No leftover vertex may sit inside the candidate triangle.
    for &ri in remaining {
        if ri == i0 || ri == i1 || ri == i2 {
            continue;
        }
        if triangle_contains(a, b, c, points[ri]) {
            return false;
        }
    }
    true
}

/// Whether `p` is inside the triangle `abc`, boundary included.
fn triangle_contains(a: Point, b: Point, c: Point, p: Point) -> bool {
    let d0 = (b - a).cross(p - a);
    let d1 = (c - b).cross(p - b);
    let d2 = (a - c).cross(p - c);
    let any_neg = d0 < 0.0 || d1 < 0.0 || d2 < 0.0;
    let any_pos = d0 > 0.0 || d1 > 0.0 || d2 > 0.0;
    !(any_neg && any_pos)
}

/// An iterator over the path elements of a polygon.
pub struct PolygonIter<'a> {
    points: &'a [Point],
    ix: usize,
}

impl Iterator for PolygonIter<'_> {
    type Item = PathEl;

    fn next(&mut self) -> Option<PathEl> {
        let len = self.points.len();
        if len == 0 {
            return None;
        }
        let ix = self.ix;
        self.ix += 1;
        if ix == 0 {
            Some(PathEl::MoveTo(self.points[0]))
        } else if ix < len {
            Some(PathEl::LineTo(self.points[ix]))
        } else if ix == len {
            Some(PathEl::ClosePath)
        } else {
            None
        }
    }
}

impl Shape for Polygon {
    type PathIter<'iter> = PolygonIter<'iter>;

    fn path_iter(&self) -> PolygonIter<'_> {
        PolygonIter {
            points: &self.points,
            ix: 0,
        }
    }

    #[inline]
    fn area(&self) -> f64 {
        Polygon::area(self)
    }

    #[inline]
    fn is_closed(&self) -> bool {
        true
    }

    fn bounding_box(&self) -> Rect {
        match self.points.split_first() {
            Some((first, rest)) => rest
                .iter()
                .fold(Rect::from_points(*first, *first), |r, p| r.union_pt(*p)),
            None => Rect::ZERO,
        }
    }
}
