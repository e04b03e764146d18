// Copyright 2025 the Vojo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A concrete path, built and edited by move/line/curve calls.
//!
//! [`Path2D`] stores verbs and points in per-subpath arrays rather than
//! one chained structure, so every subpath can be iterated, measured and
//! edited independently. Bounds and arc length are memoized and cleared
//! by every mutator.

use alloc::vec::Vec;
use core::cell::Cell;
use core::ops::Mul;

use crate::shape::path_bounds;
use crate::{
    Affine, CubicBez, Line, ParamCurve, PathEl, PathSeg, Point, QuadBez, Rect, Shape, Vec2, Verb,
};

/// Recursive flattening stops here even if the curve is not yet flat.
pub(crate) const MAX_FLATTEN_DEPTH: usize = 24;

/// Control points for a quarter turn land at this fraction of the way to
/// the corner.
pub(crate) const ARC_MAGIC: f64 = 0.5523;

/// How a path decides what is inside when its boundary crosses itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WindingRule {
    /// A point is inside if a ray from it crosses the boundary an odd
    /// number of times.
    #[default]
    EvenOdd,
    /// A point is inside if the signed crossings of a ray do not sum to
    /// zero.
    NonZero,
}

/// One subpath of a [`Path2D`]: a move verb followed by drawing verbs.
///
/// Points live in a flat buffer parallel to the verbs; the index list
/// gives each verb's first point.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SubPath {
    verbs: Vec<Verb>,
    points: Vec<Point>,
    seg_point_indexes: Vec<usize>,
}

impl SubPath {
    /// The verbs of this subpath, starting with its move.
    #[inline]
    pub fn verbs(&self) -> &[Verb] {
        &self.verbs
    }

    /// The points of this subpath.
    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The index into [`points`] of the first point of the verb at
    /// `verb_index`.
    ///
    /// [`points`]: SubPath::points
    #[inline]
    pub fn seg_point_index(&self, verb_index: usize) -> Option<usize> {
        self.seg_point_indexes.get(verb_index).copied()
    }

    fn push(&mut self, verb: Verb, pts: &[Point]) {
        self.seg_point_indexes.push(self.points.len());
        self.verbs.push(verb);
        self.points.extend_from_slice(pts);
    }

    fn pop(&mut self) -> Option<Verb> {
        let verb = self.verbs.pop()?;
        self.seg_point_indexes.pop();
        let remaining = self.points.len() - verb.point_count();
        self.points.truncate(remaining);
        Some(verb)
    }
}

/// A standard path shape built and modified by move/line/curve methods.
///
/// ```
/// use vojo::{Path2D, Shape};
///
/// let mut path = Path2D::new();
/// path.move_to((0.0, 0.0));
/// path.line_to((10.0, 0.0));
/// path.line_to((10.0, 10.0));
/// path.close();
/// assert!(path.contains((9.0, 1.0).into()));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Path2D {
    subpaths: Vec<SubPath>,
    winding_rule: WindingRule,
    bounds: Cell<Option<Rect>>,
    arclen: Cell<Option<f64>>,
}

impl Path2D {
    /// Create a new, empty path.
    pub fn new() -> Path2D {
        Path2D::default()
    }

    /// The subpaths of this path, in drawing order.
    #[inline]
    pub fn subpaths(&self) -> &[SubPath] {
        &self.subpaths
    }

    /// Whether the path has no verbs at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.subpaths.is_empty()
    }

    /// The total number of verbs across all subpaths.
    pub fn seg_count(&self) -> usize {
        self.subpaths.iter().map(|sp| sp.verbs.len()).sum()
    }

    /// The total number of stored points across all subpaths.
    pub fn point_count(&self) -> usize {
        self.subpaths.iter().map(|sp| sp.points.len()).sum()
    }

    /// The verb at the given index, counted across subpaths.
    pub fn verb(&self, seg_index: usize) -> Option<Verb> {
        let mut i = seg_index;
        for sp in &self.subpaths {
            if i < sp.verbs.len() {
                return Some(sp.verbs[i]);
            }
            i -= sp.verbs.len();
        }
        None
    }

    /// The point at the given index, counted across subpaths.
    pub fn point(&self, index: usize) -> Option<Point> {
        let mut i = index;
        for sp in &self.subpaths {
            if i < sp.points.len() {
                return Some(sp.points[i]);
            }
            i -= sp.points.len();
        }
        None
    }

    /// The last verb of the path.
    pub fn last_verb(&self) -> Option<Verb> {
        self.subpaths.last().and_then(|sp| sp.verbs.last()).copied()
    }

    /// The last stored point of the path.
    ///
    /// A close verb stores no point, so right after a close this is still
    /// the end of the closed segment.
    pub fn last_point(&self) -> Option<Point> {
        self.subpaths.last().and_then(|sp| sp.points.last()).copied()
    }

    /// The index of the first point of the verb at `seg_index`.
    pub fn seg_point_index(&self, seg_index: usize) -> Option<usize> {
        let mut i = seg_index;
        let mut point_base = 0;
        for sp in &self.subpaths {
            if i < sp.verbs.len() {
                return Some(point_base + sp.seg_point_indexes[i]);
            }
            i -= sp.verbs.len();
            point_base += sp.points.len();
        }
        None
    }

    /// The index of the verb that owns the point at `point_index`.
    ///
    /// Indexes past the end map to the last verb; an empty path yields 0.
    pub fn seg_index_for_point_index(&self, point_index: usize) -> usize {
        let mut seg_index: usize = 0;
        let mut point_cursor = 0;
        for sp in &self.subpaths {
            for &verb in &sp.verbs {
                if point_cursor > point_index {
                    return seg_index.saturating_sub(1);
                }
                point_cursor += verb.point_count();
                seg_index += 1;
            }
        }
        seg_index.saturating_sub(1)
    }

    /// The fill rule the path carries.
    #[inline]
    pub fn winding_rule(&self) -> WindingRule {
        self.winding_rule
    }

    /// Sets the fill rule the path carries.
    #[inline]
    pub fn set_winding_rule(&mut self, rule: WindingRule) {
        self.winding_rule = rule;
    }

    /// Removes every subpath, keeping the fill rule.
    pub fn clear(&mut self) {
        self.subpaths.clear();
        self.changed();
    }

    /// Starts a new subpath at the given point.
    pub fn move_to(&mut self, p: impl Into<Point>) {
        if self.last_verb() == Some(Verb::MoveTo) {
            log::warn!("consecutive MoveTo should be avoided");
        }
        let mut subpath = SubPath::default();
        subpath.push(Verb::MoveTo, &[p.into()]);
        self.subpaths.push(subpath);
        self.changed();
    }

    /// Draws a line from the current point to the given point.
    ///
    /// On an empty path, an implicit move to the origin comes first.
    pub fn line_to(&mut self, p: impl Into<Point>) {
        self.push_drawing(Verb::LineTo, &[p.into()]);
    }

    /// Draws a quadratic bezier from the current point.
    pub fn quad_to(&mut self, p1: impl Into<Point>, p2: impl Into<Point>) {
        self.push_drawing(Verb::QuadTo, &[p1.into(), p2.into()]);
    }

    /// Draws a cubic bezier from the current point.
    pub fn curve_to(
        &mut self,
        p1: impl Into<Point>,
        p2: impl Into<Point>,
        p3: impl Into<Point>,
    ) {
        self.push_drawing(Verb::CubicTo, &[p1.into(), p2.into(), p3.into()]);
    }

    /// Closes the current subpath.
    ///
    /// Closing a subpath with nothing drawn is refused with a warning.
    pub fn close(&mut self) {
        match self.last_verb() {
            None | Some(Verb::MoveTo) | Some(Verb::Close) => {
                log::warn!("attempting to close an empty subpath");
            }
            _ => {
                if let Some(sp) = self.subpaths.last_mut() {
                    sp.push(Verb::Close, &[]);
                }
                self.changed();
            }
        }
    }

    /// Draws a horizontal line to the given x coordinate.
    pub fn hline_to(&mut self, x: f64) {
        let current = self.current_point();
        self.line_to(Point::new(x, current.y));
    }

    /// Draws a vertical line to the given y coordinate.
    pub fn vline_to(&mut self, y: f64) {
        let current = self.current_point();
        self.line_to(Point::new(current.x, y));
    }

    /// Draws a line by the given offset from the current point.
    pub fn line_by(&mut self, v: impl Into<Vec2>) {
        let current = self.current_point();
        self.line_to(current + v.into());
    }

    /// Draws a rounded corner from the current point toward `corner`,
    /// ending at `end`, as a single cubic.
    pub fn arc_to(&mut self, corner: impl Into<Point>, end: impl Into<Point>) {
        let corner = corner.into();
        let end = end.into();
        let last = self.current_point();
        let cp1 = last + (corner - last) * ARC_MAGIC;
        let cp2 = end + (corner - end) * ARC_MAGIC;
        self.curve_to(cp1, cp2, end);
    }

    /// Draws a quadratic bezier as lines, within `flat_dist` of the true
    /// curve.
    ///
    /// Pieces whose chord is shorter than `flat_dist` are dropped without
    /// a line.
    pub fn quad_to_flat(&mut self, p1: impl Into<Point>, p2: impl Into<Point>, flat_dist: f64) {
        self.quad_to_flat_inner(p1.into(), p2.into(), flat_dist, 0);
    }

    fn quad_to_flat_inner(&mut self, p1: Point, p2: Point, flat_dist: f64, depth: usize) {
        let last = self.current_point();
        if last.distance(p2) < flat_dist {
            return;
        }
        let chord = Line::new(last, p2);
        if depth >= MAX_FLATTEN_DEPTH || chord.distance_sq(p1) < flat_dist * flat_dist {
            self.line_to(p2);
            return;
        }
        let quad = QuadBez::new(last, p1, p2);
        let head = quad.subsegment(0.0..0.5);
        let tail = quad.subsegment(0.5..1.0);
        self.quad_to_flat_inner(head.p1, head.p2, flat_dist, depth + 1);
        self.quad_to_flat_inner(tail.p1, tail.p2, flat_dist, depth + 1);
    }

    /// Draws a cubic bezier as lines, within `flat_dist` of the true
    /// curve.
    ///
    /// Pieces whose chord is shorter than `flat_dist` are dropped without
    /// a line.
    pub fn curve_to_flat(
        &mut self,
        p1: impl Into<Point>,
        p2: impl Into<Point>,
        p3: impl Into<Point>,
        flat_dist: f64,
    ) {
        self.curve_to_flat_inner(p1.into(), p2.into(), p3.into(), flat_dist, 0);
    }

    fn curve_to_flat_inner(&mut self, p1: Point, p2: Point, p3: Point, flat_dist: f64, depth: usize) {
        let last = self.current_point();
        if last.distance(p3) < flat_dist {
            return;
        }
        let chord = Line::new(last, p3);
        let flat_sq = flat_dist * flat_dist;
        if depth >= MAX_FLATTEN_DEPTH
            || (chord.distance_sq(p1) < flat_sq && chord.distance_sq(p2) < flat_sq)
        {
            self.line_to(p3);
            return;
        }
        let cubic = CubicBez::new(last, p1, p2, p3);
        let head = cubic.subsegment(0.0..0.5);
        let tail = cubic.subsegment(0.5..1.0);
        self.curve_to_flat_inner(head.p1, head.p2, head.p3, flat_dist, depth + 1);
        self.curve_to_flat_inner(tail.p1, tail.p2, tail.p3, flat_dist, depth + 1);
    }

    /// Appends every element of the given shape, reusing the builder
    /// methods and their bookkeeping.
    pub fn append_shape(&mut self, shape: &impl Shape) {
        self.extend(shape.path_iter());
    }

    /// Appends a segment, assuming it continues from the current point.
    pub fn append_seg(&mut self, seg: PathSeg) {
        match seg {
            PathSeg::Cubic(cubic) => self.curve_to(cubic.p1, cubic.p2, cubic.p3),
            PathSeg::Quad(quad) => self.quad_to(quad.p1, quad.p2),
            PathSeg::Line(line) => self.line_to(line.p1),
        }
    }

    /// Removes the last verb and its points.
    ///
    /// A subpath left with no verbs is removed with it.
    pub fn remove_last_seg(&mut self) {
        if let Some(sp) = self.subpaths.last_mut() {
            sp.pop();
            if sp.verbs.is_empty() {
                self.subpaths.pop();
            }
            self.changed();
        }
    }

    /// Removes the verb at the given index, reconnecting the verbs on
    /// either side.
    ///
    /// Removal keeps the path well formed: removing a move passes its
    /// role to the next verb's end point, removing a segment ahead of a
    /// curve merges the two while preserving the outer tangents, and the
    /// only segment between two moves takes its own move with it.
    pub fn remove_seg(&mut self, seg_index: usize) {
        let seg_count = self.seg_count();
        if seg_index >= seg_count {
            return;
        }

        // The last verb just pops, along with any move left dangling.
        if seg_index == seg_count - 1 {
            self.remove_last_seg();
            if self.last_verb() == Some(Verb::MoveTo) {
                self.remove_last_seg();
            }
            return;
        }

        let point_index = self.seg_point_index(seg_index).unwrap_or(0);
        let (mut verbs, mut points) = self.flat_storage();
        let delete_verb = verbs[seg_index];
        let next_verb = verbs[seg_index + 1];

        let mut delete_seg_start = seg_index;
        let mut delete_seg_count = 1;
        let mut delete_point_start = point_index;
        let mut delete_point_count = delete_verb.point_count();

        if delete_verb == Verb::MoveTo {
            // Drop the following verb instead; its end point becomes the
            // move point.
            delete_seg_start += 1;
            delete_point_count = next_verb.point_count();
        } else if next_verb == Verb::CubicTo || next_verb == Verb::QuadTo {
            // Merging into the following curve. Dropping that curve's
            // first control point instead of this verb's first point
            // keeps the tangents at both ends of the merged span.
            delete_point_start += 1;
        } else if next_verb == Verb::MoveTo && seg_index > 0 && verbs[seg_index - 1] == Verb::MoveTo
        {
            // The only segment between two moves goes away with its own
            // move.
            delete_seg_start -= 1;
            delete_seg_count += 1;
            delete_point_start -= 1;
            delete_point_count += 1;
        }

        verbs.drain(delete_seg_start..delete_seg_start + delete_seg_count);
        points.drain(delete_point_start..delete_point_start + delete_point_count);
        self.subpaths = Path2D::rebuild_subpaths(&verbs, &points);
        self.changed();
    }

    /// Sets the point at the given index, counted across subpaths.
    ///
    /// Indexes past the end are ignored.
    pub fn set_point(&mut self, index: usize, p: impl Into<Point>) {
        let p = p.into();
        let mut i = index;
        for sp in &mut self.subpaths {
            if i < sp.points.len() {
                sp.points[i] = p;
                self.changed();
                return;
            }
            i -= sp.points.len();
        }
    }

    /// Sets the point at the given index while keeping the path smooth.
    ///
    /// Moving a cubic's control point swings the facing control of the
    /// adjoining cubic to keep the joint tangent straight; moving an end
    /// point carries the adjacent controls along with it.
    pub fn set_point_smooth(&mut self, index: usize, p: impl Into<Point>) {
        let point = p.into();
        if index >= self.point_count() {
            return;
        }
        let seg_index = self.seg_index_for_point_index(index);
        let seg_count = self.seg_count();
        let verb = match self.verb(seg_index) {
            Some(verb) => verb,
            None => return,
        };

        if verb == Verb::CubicTo {
            let seg_point_index = self.seg_point_index(seg_index).unwrap_or(0);
            match index - seg_point_index {
                0 => {
                    if seg_index > 1 && self.verb(seg_index - 1) == Some(Verb::CubicTo) {
                        let end_point = self.point_or_zero(index - 1);
                        let far_control = self.point_or_zero(index - 2);
                        // A zero-length lever has no direction to mirror.
                        if end_point != point {
                            let dir = -(point - end_point).normalize();
                            let mag = (far_control - end_point).hypot();
                            self.set_point(index - 2, end_point + dir * mag);
                        }
                    }
                }
                1 => {
                    if seg_index + 1 < seg_count && self.verb(seg_index + 1) == Some(Verb::CubicTo)
                    {
                        let end_point = self.point_or_zero(index + 1);
                        let near_control = self.point_or_zero(index + 2);
                        if end_point != point {
                            let dir = -(point - end_point).normalize();
                            let mag = (near_control - end_point).hypot();
                            self.set_point(index + 2, end_point + dir * mag);
                        }
                    }
                }
                _ => {
                    let delta = point - self.point_or_zero(index);
                    let moved = self.point_or_zero(index - 1) + delta;
                    self.set_point(index - 1, moved);
                    if seg_index + 1 < seg_count && self.verb(seg_index + 1) == Some(Verb::CubicTo)
                    {
                        let moved = self.point_or_zero(index + 1) + delta;
                        self.set_point(index + 1, moved);
                    }
                }
            }
        } else if seg_index + 1 < seg_count && self.verb(seg_index + 1) == Some(Verb::CubicTo) {
            let delta = point - self.point_or_zero(index);
            let moved = self.point_or_zero(index + 1) + delta;
            self.set_point(index + 1, moved);
        }

        self.set_point(index, point);
    }

    /// The point drawing would continue from.
    ///
    /// After a close this is the subpath's move point; on an empty path
    /// it is the origin.
    fn current_point(&self) -> Point {
        match self.subpaths.last() {
            None => Point::ZERO,
            Some(sp) => {
                if sp.verbs.last() == Some(&Verb::Close) {
                    sp.points.first().copied().unwrap_or(Point::ZERO)
                } else {
                    sp.points.last().copied().unwrap_or(Point::ZERO)
                }
            }
        }
    }

    fn point_or_zero(&self, index: usize) -> Point {
        self.point(index).unwrap_or(Point::ZERO)
    }

    fn push_drawing(&mut self, verb: Verb, pts: &[Point]) {
        if self.subpaths.is_empty() {
            self.move_to(Point::ZERO);
        } else if self.last_verb() == Some(Verb::Close) {
            // Drawing after a close continues from the close point in a
            // fresh subpath.
            let start = self.current_point();
            self.move_to(start);
        }
        if let Some(sp) = self.subpaths.last_mut() {
            sp.push(verb, pts);
        }
        self.changed();
    }

    fn flat_storage(&self) -> (Vec<Verb>, Vec<Point>) {
        let mut verbs = Vec::with_capacity(self.seg_count());
        let mut points = Vec::with_capacity(self.point_count());
        for sp in &self.subpaths {
            verbs.extend_from_slice(&sp.verbs);
            points.extend_from_slice(&sp.points);
        }
        (verbs, points)
    }

    fn rebuild_subpaths(verbs: &[Verb], points: &[Point]) -> Vec<SubPath> {
        let mut subpaths: Vec<SubPath> = Vec::new();
        let mut point_i = 0;
        for &verb in verbs {
            if verb == Verb::MoveTo || subpaths.is_empty() {
                subpaths.push(SubPath::default());
            }
            let count = verb.point_count();
            if let Some(sp) = subpaths.last_mut() {
                sp.push(verb, &points[point_i..point_i + count]);
            }
            point_i += count;
        }
        subpaths
    }

    fn changed(&self) {
        self.bounds.set(None);
        self.arclen.set(None);
    }
}

impl PartialEq for Path2D {
    /// Memoized values do not take part in equality.
    fn eq(&self, other: &Path2D) -> bool {
        self.subpaths == other.subpaths && self.winding_rule == other.winding_rule
    }
}

impl Extend<PathEl> for Path2D {
    fn extend<I: IntoIterator<Item = PathEl>>(&mut self, iter: I) {
        for el in iter {
            match el {
                PathEl::MoveTo(p) => self.move_to(p),
                PathEl::LineTo(p) => self.line_to(p),
                PathEl::QuadTo(p1, p2) => self.quad_to(p1, p2),
                PathEl::CurveTo(p1, p2, p3) => self.curve_to(p1, p2, p3),
                PathEl::ClosePath => self.close(),
            }
        }
    }
}

impl FromIterator<PathEl> for Path2D {
    fn from_iter<I: IntoIterator<Item = PathEl>>(iter: I) -> Path2D {
        let mut path = Path2D::new();
        path.extend(iter);
        path
    }
}

/// An iterator over the elements of a [`Path2D`].
#[derive(Clone)]
pub struct Path2DIter<'a> {
    subpaths: &'a [SubPath],
    subpath: usize,
    verb: usize,
    point: usize,
}

impl Iterator for Path2DIter<'_> {
    type Item = PathEl;

    fn next(&mut self) -> Option<PathEl> {
        while let Some(sp) = self.subpaths.get(self.subpath) {
            if self.verb >= sp.verbs.len() {
                self.subpath += 1;
                self.verb = 0;
                self.point = 0;
                continue;
            }
            let verb = sp.verbs[self.verb];
            let pts = &sp.points[self.point..];
            self.verb += 1;
            self.point += verb.point_count();
            return Some(match verb {
                Verb::MoveTo => PathEl::MoveTo(pts[0]),
                Verb::LineTo => PathEl::LineTo(pts[0]),
                Verb::QuadTo => PathEl::QuadTo(pts[0], pts[1]),
                Verb::CubicTo => PathEl::CurveTo(pts[0], pts[1], pts[2]),
                Verb::Close => PathEl::ClosePath,
            });
        }
        None
    }
}

impl Shape for Path2D {
    type PathIter<'iter> = Path2DIter<'iter>;

    fn path_iter(&self) -> Path2DIter<'_> {
        Path2DIter {
            subpaths: &self.subpaths,
            subpath: 0,
            verb: 0,
            point: 0,
        }
    }

    fn to_path(&self) -> Path2D {
        self.clone()
    }

    /// Memoized; cleared by every mutator.
    fn bounding_box(&self) -> Rect {
        if let Some(bounds) = self.bounds.get() {
            return bounds;
        }
        let bounds = path_bounds(self.path_iter());
        self.bounds.set(Some(bounds));
        bounds
    }

    /// Memoized; cleared by every mutator.
    fn perimeter(&self) -> f64 {
        if let Some(len) = self.arclen.get() {
            return len;
        }
        let len = self.segments().map(|seg| seg.arclen()).sum();
        self.arclen.set(Some(len));
        len
    }
}

impl Mul<Path2D> for Affine {
    type Output = Path2D;

    fn mul(self, mut other: Path2D) -> Path2D {
        for sp in &mut other.subpaths {
            for p in &mut sp.points {
                *p = self * *p;
            }
        }
        other.changed();
        other
    }
}

impl Mul<&Path2D> for Affine {
    type Output = Path2D;

    fn mul(self, other: &Path2D) -> Path2D {
        self * other.clone()
    }
}

#[cfg(test)]
mod tests {
    use crate::{Affine, CubicBez, Path2D, PathEl, PathSeg, Point, Rect, Shape, Verb, WindingRule};
    use alloc::vec;
    use alloc::vec::Vec;

    fn els(path: &Path2D) -> Vec<PathEl> {
        path.path_iter().collect()
    }

    fn square() -> Path2D {
        let mut path = Path2D::new();
        path.move_to((0.0, 0.0));
        path.line_to((10.0, 0.0));
        path.line_to((10.0, 10.0));
        path.line_to((0.0, 10.0));
        path.close();
        path
    }

    #[test]
    fn build_and_iterate() {
        let mut path = Path2D::new();
        path.move_to((0.0, 0.0));
        path.line_to((10.0, 0.0));
        path.quad_to((15.0, 5.0), (10.0, 10.0));
        path.curve_to((8.0, 12.0), (2.0, 12.0), (0.0, 10.0));
        path.close();

        assert_eq!(path.seg_count(), 5);
        assert_eq!(path.point_count(), 7);
        assert_eq!(
            els(&path),
            vec![
                PathEl::MoveTo(Point::new(0.0, 0.0)),
                PathEl::LineTo(Point::new(10.0, 0.0)),
                PathEl::QuadTo(Point::new(15.0, 5.0), Point::new(10.0, 10.0)),
                PathEl::CurveTo(
                    Point::new(8.0, 12.0),
                    Point::new(2.0, 12.0),
                    Point::new(0.0, 10.0)
                ),
                PathEl::ClosePath,
            ]
        );
        assert_eq!(path.verb(2), Some(Verb::QuadTo));
        assert_eq!(path.seg_point_index(2), Some(2));
        assert_eq!(path.verb(5), None);
    }

    #[test]
    fn bare_drawing_gets_implicit_move() {
        let mut path = Path2D::new();
        path.line_to((5.0, 5.0));
        assert_eq!(
            els(&path),
            vec![
                PathEl::MoveTo(Point::ZERO),
                PathEl::LineTo(Point::new(5.0, 5.0))
            ]
        );
    }

    #[test]
    fn drawing_after_close_starts_new_subpath() {
        let mut path = square();
        path.line_to((20.0, 20.0));
        assert_eq!(path.subpaths().len(), 2);
        // The new subpath picks up at the close point.
        let tail = &path.subpaths()[1];
        assert_eq!(tail.verbs(), &[Verb::MoveTo, Verb::LineTo]);
        assert_eq!(tail.points()[0], Point::new(0.0, 0.0));
    }

    #[test]
    fn close_on_empty_is_refused() {
        let mut path = Path2D::new();
        path.close();
        assert_eq!(path.seg_count(), 0);

        path.move_to((1.0, 1.0));
        path.close();
        assert_eq!(path.last_verb(), Some(Verb::MoveTo));

        path.line_to((2.0, 2.0));
        path.close();
        path.close();
        assert_eq!(path.last_verb(), Some(Verb::Close));
        assert_eq!(path.seg_count(), 3);
    }

    #[test]
    fn consecutive_moves_each_get_a_subpath() {
        let mut path = Path2D::new();
        path.move_to((1.0, 1.0));
        path.move_to((2.0, 2.0));
        path.line_to((3.0, 3.0));
        assert_eq!(path.subpaths().len(), 2);
        assert_eq!(path.subpaths()[0].verbs(), &[Verb::MoveTo]);
        assert_eq!(path.first_move_to(), Point::new(2.0, 2.0));
    }

    #[test]
    fn relative_and_axis_lines() {
        let mut path = Path2D::new();
        path.move_to((1.0, 2.0));
        path.hline_to(8.0);
        path.vline_to(9.0);
        path.line_by((1.0, 1.0));
        assert_eq!(
            els(&path),
            vec![
                PathEl::MoveTo(Point::new(1.0, 2.0)),
                PathEl::LineTo(Point::new(8.0, 2.0)),
                PathEl::LineTo(Point::new(8.0, 9.0)),
                PathEl::LineTo(Point::new(9.0, 10.0)),
            ]
        );
    }

    #[test]
    fn arc_to_emits_one_cubic() {
        let mut path = Path2D::new();
        path.move_to((0.0, 0.0));
        path.arc_to((10.0, 0.0), (10.0, 10.0));
        let got = els(&path);
        assert_eq!(got.len(), 2);
        match got[1] {
            PathEl::CurveTo(p1, p2, p3) => {
                assert!((p1 - Point::new(5.523, 0.0)).hypot() < 1e-12);
                assert!((p2 - Point::new(10.0, 4.477)).hypot() < 1e-12);
                assert_eq!(p3, Point::new(10.0, 10.0));
            }
            _ => panic!("expected a cubic"),
        }
    }

    #[test]
    fn flattening_emits_lines_only() {
        let mut path = Path2D::new();
        path.move_to((0.0, 0.0));
        path.quad_to_flat((5.0, 10.0), (10.0, 0.0), 0.25);
        let flat = els(&path);
        assert!(flat.len() > 3);
        assert!(flat[1..]
            .iter()
            .all(|el| matches!(el, PathEl::LineTo(_))));
        // Every polyline point stays near the true curve.
        let quad = crate::QuadBez::new((0.0, 0.0), (5.0, 10.0), (10.0, 0.0));
        for el in &flat[1..] {
            if let PathEl::LineTo(p) = el {
                assert!(quad.distance_sq(*p) < 0.25 * 0.25);
            }
        }
    }

    #[test]
    fn flattening_drops_short_chords() {
        let mut path = Path2D::new();
        path.move_to((0.0, 0.0));
        // The whole chord is shorter than the tolerance.
        path.curve_to_flat((0.1, 0.1), (0.2, 0.1), (0.3, 0.0), 1.0);
        assert_eq!(path.seg_count(), 1);
    }

    #[test]
    fn append_shape_and_seg() {
        let mut path = Path2D::new();
        path.append_shape(&Rect::new(0.0, 0.0, 4.0, 4.0));
        assert!(path.is_closed());
        assert_eq!(path.subpaths().len(), 1);

        let mut tail = Path2D::new();
        tail.move_to((0.0, 0.0));
        tail.append_seg(PathSeg::Line(crate::Line::new((0.0, 0.0), (5.0, 0.0))));
        tail.append_seg(PathSeg::Cubic(CubicBez::new(
            (5.0, 0.0),
            (6.0, 2.0),
            (9.0, 2.0),
            (10.0, 0.0),
        )));
        assert_eq!(tail.seg_count(), 3);
        assert_eq!(tail.last_point(), Some(Point::new(10.0, 0.0)));
    }

    #[test]
    fn remove_last_seg_drops_empty_subpath() {
        let mut path = Path2D::new();
        path.move_to((0.0, 0.0));
        path.line_to((5.0, 0.0));
        path.remove_last_seg();
        assert_eq!(path.seg_count(), 1);
        path.remove_last_seg();
        assert!(path.is_empty());
        // Removing from nothing is fine.
        path.remove_last_seg();
        assert!(path.is_empty());
    }

    #[test]
    fn remove_seg_at_end_pops_dangling_move() {
        let mut path = Path2D::new();
        path.move_to((0.0, 0.0));
        path.line_to((5.0, 0.0));
        path.remove_seg(1);
        assert!(path.is_empty());
    }

    #[test]
    fn remove_seg_of_move_keeps_next_end() {
        let mut path = Path2D::new();
        path.move_to((0.0, 0.0));
        path.line_to((5.0, 5.0));
        path.line_to((10.0, 0.0));
        path.remove_seg(0);
        assert_eq!(
            els(&path),
            vec![
                PathEl::MoveTo(Point::new(5.0, 5.0)),
                PathEl::LineTo(Point::new(10.0, 0.0)),
            ]
        );
    }

    #[test]
    fn remove_seg_merges_adjoining_curves() {
        let mut path = Path2D::new();
        path.move_to((0.0, 0.0));
        path.curve_to((0.0, 10.0), (10.0, 10.0), (10.0, 0.0));
        path.curve_to((10.0, -10.0), (20.0, -10.0), (20.0, 0.0));
        path.remove_seg(1);

        // One cubic remains, keeping the outer tangent handles.
        assert_eq!(
            els(&path),
            vec![
                PathEl::MoveTo(Point::new(0.0, 0.0)),
                PathEl::CurveTo(
                    Point::new(0.0, 10.0),
                    Point::new(20.0, -10.0),
                    Point::new(20.0, 0.0)
                ),
            ]
        );
    }

    #[test]
    fn remove_only_seg_between_moves_collapses_subpath() {
        let mut path = Path2D::new();
        path.move_to((0.0, 0.0));
        path.line_to((5.0, 0.0));
        path.move_to((10.0, 10.0));
        path.line_to((12.0, 12.0));
        path.move_to((20.0, 20.0));
        path.line_to((25.0, 20.0));

        path.remove_seg(3);
        assert_eq!(path.subpaths().len(), 2);
        assert_eq!(
            els(&path),
            vec![
                PathEl::MoveTo(Point::new(0.0, 0.0)),
                PathEl::LineTo(Point::new(5.0, 0.0)),
                PathEl::MoveTo(Point::new(20.0, 20.0)),
                PathEl::LineTo(Point::new(25.0, 20.0)),
            ]
        );
    }

    #[test]
    fn point_indexing_across_subpaths() {
        let mut path = Path2D::new();
        path.move_to((0.0, 0.0));
        path.quad_to((1.0, 1.0), (2.0, 0.0));
        path.move_to((10.0, 10.0));
        path.line_to((11.0, 10.0));

        assert_eq!(path.point(3), Some(Point::new(10.0, 10.0)));
        assert_eq!(path.point(99), None);
        assert_eq!(path.seg_index_for_point_index(0), 0);
        assert_eq!(path.seg_index_for_point_index(1), 1);
        assert_eq!(path.seg_index_for_point_index(2), 1);
        assert_eq!(path.seg_index_for_point_index(4), 3);
        assert_eq!(path.seg_point_index(3), Some(4));
    }

    #[test]
    fn set_point_moves_and_invalidates() {
        let mut path = square();
        assert_eq!(path.bounding_box(), Rect::new(0.0, 0.0, 10.0, 10.0));
        path.set_point(2, (10.0, 20.0));
        assert_eq!(path.bounding_box(), Rect::new(0.0, 0.0, 10.0, 20.0));
        assert_eq!(path.point(2), Some(Point::new(10.0, 20.0)));
    }

    #[test]
    fn set_point_smooth_mirrors_far_control() {
        let mut path = Path2D::new();
        path.move_to((0.0, 0.0));
        path.curve_to((0.0, 10.0), (10.0, 10.0), (10.0, 0.0));
        path.curve_to((10.0, -10.0), (20.0, -10.0), (20.0, 0.0));

        // Move the second curve's near control; the first curve's far
        // control swings to stay opposite it, keeping its distance.
        path.set_point_smooth(4, (15.0, -5.0));
        assert_eq!(path.point(4), Some(Point::new(15.0, -5.0)));
        let mirrored = path.point(2).unwrap();
        let expected = Point::new(10.0 - 10.0 / 2.0f64.sqrt(), 10.0 / 2.0f64.sqrt());
        assert!((mirrored - expected).hypot() < 1e-9);
        // The far control keeps its distance from the joint.
        assert!(((mirrored - Point::new(10.0, 0.0)).hypot() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn set_point_smooth_carries_controls_with_end() {
        let mut path = Path2D::new();
        path.move_to((0.0, 0.0));
        path.curve_to((0.0, 10.0), (10.0, 10.0), (10.0, 0.0));
        path.curve_to((10.0, -10.0), (20.0, -10.0), (20.0, 0.0));

        // Move the shared end point; both facing controls follow.
        path.set_point_smooth(3, (12.0, 1.0));
        assert_eq!(path.point(3), Some(Point::new(12.0, 1.0)));
        assert_eq!(path.point(2), Some(Point::new(12.0, 11.0)));
        assert_eq!(path.point(4), Some(Point::new(12.0, -9.0)));
    }

    #[test]
    fn memoized_measures_follow_mutation() {
        let mut path = square();
        assert!((path.perimeter() - 40.0).abs() < 1e-12);
        assert!((path.perimeter() - 40.0).abs() < 1e-12);
        path.set_point(1, (20.0, 0.0));
        assert!(path.perimeter() > 40.0);
        assert_eq!(path.bounding_box(), Rect::new(0.0, 0.0, 20.0, 10.0));
    }

    #[test]
    fn equality_ignores_memoized_state() {
        let a = square();
        let b = square();
        let _ = a.bounding_box();
        assert_eq!(a, b);

        let mut c = square();
        c.set_winding_rule(WindingRule::NonZero);
        assert_ne!(a, c);
    }

    #[test]
    fn from_iterator_round_trips_elements() {
        let source = square();
        let rebuilt: Path2D = els(&source).into_iter().collect();
        assert_eq!(source, rebuilt);
    }

    #[test]
    fn transform_maps_every_point() {
        let path = square();
        let moved = Affine::translate((5.0, 5.0)) * &path;
        assert_eq!(moved.bounding_box(), Rect::new(5.0, 5.0, 15.0, 15.0));
        assert!((moved.area().abs() - 100.0).abs() < 1e-12);
    }

    #[test]
    fn path_shape_queries() {
        let path = square();
        assert!(path.contains(Point::new(5.0, 5.0)));
        assert!(!path.contains(Point::new(15.0, 5.0)));
        assert!((path.area().abs() - 100.0).abs() < 1e-12);
        assert!(path.is_closed());
        assert!(path.is_single_cycle());
    }
}
