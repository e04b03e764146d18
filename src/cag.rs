// Copyright 2025 the Vojo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Boolean area operations on shapes.

use crate::{ParamCurve, Path2D, PathSeg, SegmentPath, Shape};

/// Walks past this many extra segments before giving up on a boolean
/// trace. The bound is relative to the input sizes so fine paths are
/// not cut off.
const WALK_SLACK: usize = 50;
const INTERSECT_WALK_SLACK: usize = 30;

/// The union of two shapes, as a path tracing the combined outline.
///
/// Disjoint shapes come back as one path with two subpaths; a shape
/// wholly inside the other disappears into it.
pub fn union(a: &impl Shape, b: &impl Shape) -> Path2D {
    if a.path_iter().eq(b.path_iter()) {
        return a.to_path();
    }
    if !a.intersects_shape(b) {
        let mut path = a.to_path();
        path.append_shape(b);
        return path;
    }
    if a.contains_shape(b) {
        return a.to_path();
    }
    if b.contains_shape(a) {
        return b.to_path();
    }

    let mut path_a = SegmentPath::from_shape(a);
    let mut path_b = SegmentPath::from_shape(b);
    let cap = path_a.seg_count() + path_b.seg_count() + WALK_SLACK;
    path_a.split_intersecting(&mut path_b);

    let Some(first) = path_a.first_seg_outside(&path_b) else {
        log::warn!("union found no starting segment, keeping first shape");
        return a.to_path();
    };
    // A segment the shapes share counts as outside; it lies on the
    // combined outline.
    walk_boundary(path_a, path_b, first, cap, |opposing, _, seg| {
        !opposing.contains_seg_mid(seg) || opposing.has_seg(seg)
    })
    .to_path()
}

/// The first shape with the second shape's overlap removed.
///
/// A shape wholly inside the first becomes a hole, carried as a second
/// subpath under the path's even-odd fill rule. Subtracting a covering
/// or identical shape leaves an empty path.
pub fn subtract(a: &impl Shape, b: &impl Shape) -> Path2D {
    if a.path_iter().eq(b.path_iter()) {
        return Path2D::new();
    }
    if !a.intersects_shape(b) {
        return a.to_path();
    }
    if a.contains_shape(b) {
        let mut path = a.to_path();
        path.append_shape(b);
        return path;
    }
    if b.contains_shape(a) {
        return Path2D::new();
    }

    let mut path_a = SegmentPath::from_shape(a);
    let mut path_b = SegmentPath::from_shape(b);
    let cap = path_a.seg_count() + path_b.seg_count() + WALK_SLACK;
    path_a.split_intersecting(&mut path_b);

    let Some(first) = path_a.first_seg_outside(&path_b) else {
        log::warn!("subtract found no starting segment, keeping first shape");
        return a.to_path();
    };
    // Keep the first shape's boundary where it is outside the second,
    // and the second shape's boundary where it is inside the first.
    walk_boundary(path_a, path_b, first, cap, |opposing, owner_is_first, seg| {
        owner_is_first != opposing.contains_seg_mid(seg)
    })
    .to_path()
}

/// The intersection of two shapes, as a path tracing the shared area.
///
/// Disjoint shapes intersect to an empty path. Two rectangles take a
/// direct route through [`Rect::intersect`].
///
/// [`Rect::intersect`]: crate::Rect::intersect
pub fn intersect(a: &impl Shape, b: &impl Shape) -> Path2D {
    if let (Some(rect_a), Some(rect_b)) = (a.as_rect(), b.as_rect()) {
        let overlap = rect_a.intersect(rect_b);
        if overlap.is_zero_area() {
            return Path2D::new();
        }
        return overlap.to_path();
    }
    if a.path_iter().eq(b.path_iter()) {
        return a.to_path();
    }
    if !a.intersects_shape(b) {
        return Path2D::new();
    }
    if a.contains_shape(b) {
        return b.to_path();
    }
    if b.contains_shape(a) {
        return a.to_path();
    }

    let mut path_a = SegmentPath::from_shape(a);
    let mut path_b = SegmentPath::from_shape(b);
    let cap = path_a.seg_count() + path_b.seg_count() + INTERSECT_WALK_SLACK;
    path_a.split_intersecting(&mut path_b);

    let Some(first) = path_a.first_seg_inside(&path_b) else {
        log::warn!("intersect found no starting segment, keeping first shape");
        return a.to_path();
    };
    walk_boundary(path_a, path_b, first, cap, |opposing, _, seg| {
        opposing.contains(seg.end())
    })
    .to_path()
}

/// Traces one boolean result boundary, starting from `first`.
///
/// Each step continues with a segment leaving the current end point
/// that passes `keep` and is not already part of the result. When the
/// owning side runs dry the roles swap, so the trace crosses between
/// the two boundaries at the split points.
fn walk_boundary(
    mut owner: SegmentPath,
    mut opposing: SegmentPath,
    first: PathSeg,
    cap: usize,
    keep: fn(&SegmentPath, bool, &PathSeg) -> bool,
) -> SegmentPath {
    let mut result = SegmentPath::new();
    let mut owner_is_first = true;
    let mut cur = Some(first);
    while let Some(seg) = cur {
        result.add_seg(seg);
        if result.seg_count() > cap {
            log::warn!("boolean walk exceeded {cap} segments, result is truncated");
            break;
        }
        let mut next = next_seg(&owner, &opposing, &result, owner_is_first, &seg, keep);
        if next.is_none() {
            core::mem::swap(&mut owner, &mut opposing);
            owner_is_first = !owner_is_first;
            next = next_seg(&owner, &opposing, &result, owner_is_first, &seg, keep);
        }
        cur = next;
    }
    result
}

fn next_seg(
    owner: &SegmentPath,
    opposing: &SegmentPath,
    result: &SegmentPath,
    owner_is_first: bool,
    prev: &PathSeg,
    keep: fn(&SegmentPath, bool, &PathSeg) -> bool,
) -> Option<PathSeg> {
    owner
        .next_segs_from(prev)
        .into_iter()
        .find(|seg| keep(opposing, owner_is_first, seg) && !result.has_seg(seg))
}

#[cfg(test)]
mod tests {
    use crate::{intersect, subtract, union, Circle, Path2D, Point, Rect, Shape};

    fn rect_a() -> Rect {
        Rect::new(0.0, 0.0, 10.0, 10.0)
    }

    fn rect_b() -> Rect {
        Rect::new(5.0, 5.0, 15.0, 15.0)
    }

    #[test]
    fn union_of_overlapping_rects() {
        let path = union(&rect_a(), &rect_b());
        assert_eq!(path.subpaths().len(), 1);
        assert!(path.is_closed());
        assert_eq!(path.segments().count(), 8);
        assert!((path.area() - 175.0).abs() < 1e-9);
    }

    #[test]
    fn union_of_disjoint_rects() {
        let far = Rect::new(20.0, 0.0, 30.0, 10.0);
        let path = union(&rect_a(), &far);
        assert_eq!(path.subpaths().len(), 2);
        assert!((path.area() - 200.0).abs() < 1e-9);
    }

    #[test]
    fn union_with_contained_shape() {
        let inner = Circle::new((5.0, 5.0), 2.0);
        assert_eq!(union(&rect_a(), &inner), rect_a().to_path());
        assert_eq!(union(&inner, &rect_a()), rect_a().to_path());
    }

    #[test]
    fn union_of_identical_shapes() {
        let circle = Circle::new((5.0, 5.0), 5.0);
        assert_eq!(union(&circle, &circle), circle.to_path());
    }

    #[test]
    fn union_of_overlapping_circles() {
        let a = Circle::new((0.0, 0.0), 5.0);
        let b = Circle::new((6.0, 0.0), 5.0);
        let path = union(&a, &b);
        assert!(path.is_closed());
        // Two r = 5 circles with centers 6 apart share a lens of about
        // 22.36, so the union covers about 134.7.
        assert!((path.area() - 134.7).abs() < 1.0);
    }

    #[test]
    fn subtract_overlapping_rects() {
        let path = subtract(&rect_a(), &rect_b());
        assert_eq!(path.subpaths().len(), 1);
        assert_eq!(path.segments().count(), 6);
        assert!((path.area() - 75.0).abs() < 1e-9);
    }

    #[test]
    fn subtract_contained_rect_leaves_hole() {
        let hole = Rect::new(2.0, 2.0, 8.0, 8.0);
        let path = subtract(&rect_a(), &hole);

        let mut expected = rect_a().to_path();
        expected.append_shape(&hole);
        assert_eq!(path, expected);
        assert_eq!(path.subpaths().len(), 2);
    }

    #[test]
    fn subtract_self_is_empty() {
        assert!(subtract(&rect_a(), &rect_a()).is_empty());
    }

    #[test]
    fn subtract_covering_shape_is_empty() {
        let cover = Rect::new(-5.0, -5.0, 15.0, 15.0);
        assert!(subtract(&rect_a(), &cover).is_empty());
    }

    #[test]
    fn subtract_disjoint_shape_changes_nothing() {
        let far = Rect::new(20.0, 0.0, 30.0, 10.0);
        assert_eq!(subtract(&rect_a(), &far), rect_a().to_path());
    }

    #[test]
    fn intersect_rects_directly() {
        let path = intersect(&rect_a(), &rect_b());
        assert_eq!(path, Rect::new(5.0, 5.0, 10.0, 10.0).to_path());

        let far = Rect::new(20.0, 0.0, 30.0, 10.0);
        assert!(intersect(&rect_a(), &far).is_empty());
    }

    #[test]
    fn intersect_walks_path_boundaries() {
        // A path stands in for the first rectangle so the walk runs
        // instead of the rectangle fast path.
        let path = intersect(&rect_a().to_path(), &rect_b());
        assert_eq!(path.segments().count(), 4);
        assert!((path.area() - 25.0).abs() < 1e-9);
        assert!(path.contains(Point::new(7.0, 7.0)));
        assert!(!path.contains(Point::new(2.0, 2.0)));
    }

    #[test]
    fn intersect_with_contained_shape() {
        let inner = Circle::new((5.0, 5.0), 2.0);
        assert_eq!(intersect(&rect_a(), &inner), inner.to_path());
        assert_eq!(intersect(&inner, &rect_a()), inner.to_path());
    }

    #[test]
    fn intersect_of_identical_circles() {
        let circle = Circle::new((5.0, 5.0), 5.0);
        assert_eq!(intersect(&circle, &circle), circle.to_path());
    }

    #[test]
    fn union_and_intersection_split_the_area() {
        let union_area = union(&rect_a(), &rect_b()).area();
        let overlap_area = intersect(&rect_a().to_path(), &rect_b()).area();
        let sum = rect_a().area() + rect_b().area();
        assert!((union_area + overlap_area - sum).abs() < 1e-9);
    }

    #[test]
    fn disjoint_bounds_never_walk() {
        // Far apart shapes skip all segment work, including curves.
        let a = Circle::new((0.0, 0.0), 5.0);
        let b = Circle::new((100.0, 0.0), 5.0);
        let both = union(&a, &b);
        assert_eq!(both.subpaths().len(), 2);
        assert!(intersect(&a, &b).is_empty());
        let only_a = subtract(&a, &b);
        assert_eq!(only_a, a.to_path());
    }

    #[test]
    fn empty_path_input() {
        let empty = Path2D::new();
        let path = union(&empty, &rect_a());
        assert!((path.area() - 100.0).abs() < 1e-9);
        assert!(intersect(&empty, &rect_a()).is_empty());
        assert!(subtract(&empty, &rect_a()).is_empty());
    }
}
