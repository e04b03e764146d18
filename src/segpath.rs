// Copyright 2025 the Vojo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Segment lists for boolean path operations.

use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::{CubicBez, Line, ParamCurve, PathEl, PathSeg, Point, QuadBez, Shape};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// Hit parameters inside `(HIT_MIN, HIT_MAX)` count as interior
/// crossings; anything closer to an end is an endpoint touch.
const HIT_MIN: f64 = 0.001;
const HIT_MAX: f64 = 0.999;

/// Matching tolerance for endpoint bookkeeping, per axis.
fn point_near(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < 0.1 && (a.y - b.y).abs() < 0.1
}

/// A shape held as a flat list of segments, the working form for
/// boolean area operations.
///
/// The list is a soup of directed segments rather than a path: cycle
/// structure is only recovered while iterating, by watching for returns
/// to the active start point. Endpoint lookups use the segment matching
/// tolerance of a tenth per axis, which lets walks jump tiny gaps left
/// by intersection splitting.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SegmentPath {
    segs: Vec<PathSeg>,
}

impl SegmentPath {
    /// Create a new, empty segment path.
    #[inline]
    pub fn new() -> SegmentPath {
        SegmentPath { segs: Vec::new() }
    }

    /// Create a segment path from a shape's path.
    pub fn from_shape(shape: &impl Shape) -> SegmentPath {
        let mut path = SegmentPath::new();
        path.append_shape(shape);
        path
    }

    /// Append a shape's path as segments.
    ///
    /// Close elements become an explicit line back to the subpath start,
    /// unless the trace point is already exactly there.
    pub fn append_shape(&mut self, shape: &impl Shape) {
        let mut move_point = Point::ORIGIN;
        let mut line_point = Point::ORIGIN;
        for el in shape.path_iter() {
            match el {
                PathEl::MoveTo(p) => {
                    move_point = p;
                    line_point = p;
                }
                PathEl::LineTo(p) => {
                    self.add_seg(PathSeg::Line(Line::new(line_point, p)));
                    line_point = p;
                }
                PathEl::QuadTo(cp, end) => {
                    self.add_seg(PathSeg::Quad(QuadBez::new(line_point, cp, end)));
                    line_point = end;
                }
                PathEl::CurveTo(cp1, cp2, end) => {
                    self.add_seg(PathSeg::Cubic(CubicBez::new(line_point, cp1, cp2, end)));
                    line_point = end;
                }
                PathEl::ClosePath => {
                    if line_point != move_point {
                        self.add_seg(PathSeg::Line(Line::new(line_point, move_point)));
                        line_point = move_point;
                    }
                }
            }
        }
    }

    /// The segments.
    #[inline]
    pub fn segs(&self) -> &[PathSeg] {
        &self.segs
    }

    /// The number of segments.
    #[inline]
    pub fn seg_count(&self) -> usize {
        self.segs.len()
    }

    /// The segment at `index`, if there is one.
    #[inline]
    pub fn seg(&self, index: usize) -> Option<PathSeg> {
        self.segs.get(index).copied()
    }

    /// Append a segment.
    ///
    /// Zero length segments are dropped with a warning; they carry no
    /// boundary and make walks spin in place.
    pub fn add_seg(&mut self, seg: PathSeg) {
        self.insert_seg(self.segs.len(), seg);
    }

    /// Insert a segment at `index`, subject to the same zero length
    /// rejection as [`add_seg`].
    ///
    /// [`add_seg`]: SegmentPath::add_seg
    pub fn insert_seg(&mut self, index: usize, seg: PathSeg) {
        if seg.start() == seg.end() && seg.arclen() == 0.0 {
            log::warn!("dropping zero length segment");
            return;
        }
        self.segs.insert(index, seg);
    }

    /// Whether the point is inside the filled area or on one of the
    /// segment endpoints.
    ///
    /// Endpoint hits use the matching tolerance, so points that a split
    /// moved by less than a tenth still count.
    pub fn contains(&self, pt: Point) -> bool {
        self.contains_end_point(pt) || Shape::contains(self, pt)
    }

    /// Whether the midpoint of `seg` is inside, by [`contains`].
    ///
    /// [`contains`]: SegmentPath::contains
    pub fn contains_seg_mid(&self, seg: &PathSeg) -> bool {
        self.contains(seg.eval(0.5))
    }

    /// Whether `pt` lies on one of the segment end points.
    pub fn contains_end_point(&self, pt: Point) -> bool {
        self.segs.iter().any(|seg| point_near(seg.end(), pt))
    }

    /// Whether a segment matching `seg` (in either direction) is in the
    /// list.
    pub fn has_seg(&self, seg: &PathSeg) -> bool {
        self.segs.iter().any(|s| s.matches(seg))
    }

    /// The first segment whose midpoint is outside `other`.
    pub fn first_seg_outside(&self, other: &SegmentPath) -> Option<PathSeg> {
        self.segs
            .iter()
            .copied()
            .find(|seg| !other.contains_seg_mid(seg))
    }

    /// The first segment whose midpoint is inside `other`.
    pub fn first_seg_inside(&self, other: &SegmentPath) -> Option<PathSeg> {
        self.segs
            .iter()
            .copied()
            .find(|seg| other.contains_seg_mid(seg))
    }

    /// The segments a walk could continue on from the end of `seg`.
    ///
    /// A segment starting at the end point is taken as is; one ending
    /// there is reversed first, so every candidate leaves from the end
    /// point. `seg` itself is skipped.
    pub fn next_segs_from(&self, seg: &PathSeg) -> SmallVec<[PathSeg; 4]> {
        let end = seg.end();
        let mut found = SmallVec::new();
        for s in &self.segs {
            if s == seg {
                continue;
            }
            if point_near(s.start(), end) {
                found.push(*s);
            }
            if point_near(s.end(), end) {
                found.push(s.reversed());
            }
        }
        found
    }

    /// Whether any two segments cross away from their end points.
    pub fn is_self_intersecting(&self) -> bool {
        for (i, seg1) in self.segs.iter().enumerate() {
            for seg2 in &self.segs[i + 1..] {
                if let Some(hit) = seg1.hit(seg2) {
                    if (hit.h0 > HIT_MIN && hit.h0 < HIT_MAX)
                        || (hit.h1 > HIT_MIN && hit.h1 < HIT_MAX)
                    {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Split every segment at its interior intersections with any other
    /// segment of this list.
    ///
    /// Returns whether anything was split.
    pub fn split_intersecting_self(&mut self) -> bool {
        let mut did_split = false;
        let mut i = 0;
        while i < self.segs.len() {
            let mut j = i + 1;
            while j < self.segs.len() {
                let seg1 = self.segs[i];
                let seg2 = self.segs[j];
                if let Some(hit) = seg1.hit(&seg2) {
                    if hit.h1 > HIT_MIN && hit.h1 < HIT_MAX {
                        let (head, tail) = seg2.split(hit.h1);
                        self.segs[j] = head;
                        self.insert_seg(j + 1, tail);
                        did_split = true;
                    }
                    if hit.h0 > HIT_MIN && hit.h0 < HIT_MAX {
                        let (head, tail) = seg1.split(hit.h0);
                        self.segs[i] = head;
                        self.insert_seg(i + 1, tail);
                        did_split = true;
                    }
                }
                j += 1;
            }
            i += 1;
        }
        did_split
    }

    /// Split the segments of this and `other` at every intersection
    /// between the two, so afterwards segments only meet at end points.
    pub fn split_intersecting(&mut self, other: &mut SegmentPath) {
        let mut i = 0;
        while i < self.segs.len() {
            let mut j = 0;
            while j < other.segs.len() {
                let seg1 = self.segs[i];
                let seg2 = other.segs[j];
                if let Some(hit) = seg1.hit(&seg2) {
                    if hit.h0 > HIT_MIN && hit.h0 < HIT_MAX {
                        let (head, tail) = seg1.split(hit.h0);
                        self.segs[i] = head;
                        self.insert_seg(i + 1, tail);
                    }
                    if hit.h1 > HIT_MIN && hit.h1 < HIT_MAX {
                        let (head, tail) = seg2.split(hit.h1);
                        other.segs[j] = head;
                        other.insert_seg(j + 1, tail);
                    }
                }
                j += 1;
            }
            i += 1;
        }
    }

    /// Regroup a self-intersecting list into separate cycles.
    ///
    /// Segments are first split at their crossings. Then any run whose
    /// end point comes back to the start of an earlier segment is a
    /// closed cycle, and is moved to the back of the list so each
    /// cycle's segments sit together.
    pub fn make_not_self_intersecting(&mut self) {
        if !self.split_intersecting_self() {
            return;
        }

        let mut cycles: Vec<PathSeg> = Vec::new();
        let mut i = 0;
        while i < self.segs.len() {
            let end = self.segs[i].end();
            let mut j = 0;
            let mut extracted = false;
            while j < i {
                if end.is_near(self.segs[j].start()) {
                    cycles.extend(self.segs.drain(j..=i));
                    i = j;
                    extracted = true;
                    break;
                }
                j += 1;
            }
            if !extracted {
                i += 1;
            }
        }
        for seg in cycles {
            self.add_seg(seg);
        }

        if self.is_self_intersecting() {
            log::warn!("segment path still self intersecting after splitting");
        }
    }
}

/// An iterator rebuilding path elements from a segment list.
///
/// A move is emitted whenever the trace point is back at the current
/// start point, which happens at the beginning, after every close, and
/// after a curve that returns to the start. A line ending within the
/// point tolerance of the start point becomes a close element, and the
/// last segment's end point is snapped to the start point so the final
/// cycle always shuts.
pub struct SegmentPathIter<'a> {
    segs: &'a [PathSeg],
    index: usize,
    move_point: Point,
    at_move: bool,
}

impl Iterator for SegmentPathIter<'_> {
    type Item = PathEl;

    fn next(&mut self) -> Option<PathEl> {
        let mut seg = *self.segs.get(self.index)?;

        // The move is emitted without advancing; the segment itself
        // follows on the next call.
        if self.at_move {
            self.move_point = seg.start();
            self.at_move = false;
            return Some(PathEl::MoveTo(self.move_point));
        }
        self.index += 1;

        if self.index == self.segs.len() {
            match &mut seg {
                PathSeg::Line(line) => line.p1 = self.move_point,
                PathSeg::Quad(quad) => quad.p2 = self.move_point,
                PathSeg::Cubic(cubic) => cubic.p3 = self.move_point,
            }
        }

        match seg {
            PathSeg::Line(line) => {
                if line.p1.is_near(self.move_point) {
                    self.at_move = true;
                    Some(PathEl::ClosePath)
                } else {
                    Some(PathEl::LineTo(line.p1))
                }
            }
            PathSeg::Quad(quad) => {
                self.at_move = quad.p2 == self.move_point;
                Some(PathEl::QuadTo(quad.p1, quad.p2))
            }
            PathSeg::Cubic(cubic) => {
                self.at_move = cubic.p3 == self.move_point;
                Some(PathEl::CurveTo(cubic.p1, cubic.p2, cubic.p3))
            }
        }
    }
}

impl Shape for SegmentPath {
    type PathIter<'iter> = SegmentPathIter<'iter>;

    fn path_iter(&self) -> SegmentPathIter<'_> {
        SegmentPathIter {
            segs: &self.segs,
            index: 0,
            move_point: Point::ORIGIN,
            at_move: true,
        }
    }
}
