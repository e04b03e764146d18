// Copyright 2025 the Vojo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A library for 2D path geometry.
//!
//! Vojo contains data structures and algorithms for describing and
//! combining vector paths. It provides vocabulary types for 2D graphics
//! (points, rectangles, affine maps, Bezier segments) along with a
//! concrete verb-and-point path type, polygons and their triangulation,
//! constructive area geometry on arbitrary shapes, and least-squares
//! fitting of cubic curves to sampled points.
//!
//! Coordinates are y-down: a shape traced clockwise on screen has
//! positive area.
//!
//! # Examples
//!
//! Basic UI-style geometry:
//! ```
//! use vojo::{Insets, Point, Rect, Size, Vec2};
//!
//! let pt = Point::new(10.0, 10.0);
//! let vector = Vec2::new(5.0, -5.0);
//! let pt2 = pt + vector;
//! assert_eq!(pt2, Point::new(15.0, 5.0));
//!
//! let rect = Rect::from_points(pt, pt2);
//! assert_eq!(rect, Rect::from_origin_size((10.0, 5.0), (5.0, 5.0)));
//!
//! let insets = Insets::uniform(1.0);
//! let inset_rect = rect - insets;
//! assert_eq!(inset_rect.size(), Size::new(3.0, 3.0));
//! ```
//!
//! Combining two shapes into the path tracing their joint outline:
//!
//! ```
//! use vojo::{union, Point, Rect, Shape};
//!
//! let a = Rect::new(0.0, 0.0, 10.0, 10.0);
//! let b = Rect::new(5.0, 5.0, 15.0, 15.0);
//! let outline = union(&a, &b);
//! assert_eq!(outline.area(), 175.0);
//! assert!(outline.contains(Point::new(12.0, 12.0)));
//! ```
//!
//! # Feature Flags
//!
//! The following crate [feature flags](https://doc.rust-lang.org/cargo/reference/features.html#dependency-features) are available:
//!
//! - `std` (enabled by default): Get floating point functions from the standard library
//!   (likely using your target's libc).
//! - `libm`: Use floating point implementations from [libm][].
//!   This is useful for `no_std` environments.
//!   However, note that the `libm` crate is not as efficient as the standard library.
//! - `mint`: Enable `From`/`Into` conversion of Vojo and [mint][] types, enabling interoperability
//!   with other graphics libraries.
//! - `serde`: Implement `serde::Deserialize` and `serde::Serialize` on various types.
//! - `schemars`: Add best-effort support for using Vojo types in JSON schemas using [schemars][].
//!
//! At least one of `std` and `libm` is required; `std` overrides `libm`.
//! Note that Vojo does require that an allocator is available (i.e. it uses [alloc]).

// These lints aren't included in Cargo.toml because they
// shouldn't apply to examples and tests.
#![warn(unused_crate_dependencies)]
#![warn(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]
#![allow(
    clippy::unreadable_literal,
    clippy::many_single_char_names,
    clippy::excessive_precision,
    clippy::bool_to_int_with_if
)]
// The following lints are part of the standard set used in Cargo.toml,
// but resolving them has been deferred for now.
#![allow(
    missing_debug_implementations,
    elided_lifetimes_in_paths,
    single_use_lifetimes,
    trivial_numeric_casts,
    unnameable_types,
    clippy::use_self,
    clippy::return_self_not_must_use,
    clippy::cast_possible_truncation,
    clippy::wildcard_imports,
    clippy::shadow_unrelated,
    clippy::missing_assert_message,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::exhaustive_enums,
    clippy::match_same_arms,
    clippy::partial_pub_fields,
    clippy::unseparated_literal_suffix,
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason
)]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("vojo requires either the `std` or `libm` feature");

// Suppress the unused_crate_dependencies lint when both std and libm are specified.
#[cfg(all(feature = "std", feature = "libm"))]
use libm as _;

extern crate alloc;

mod affine;
mod arc;
mod arclen;
mod cag;
mod circle;
pub mod common;
mod cubicbez;
mod ellipse;
mod fit;
mod insets;
mod line;
mod param_curve;
mod path;
mod pathseg;
mod point;
mod polygon;
mod polygon_path;
mod quadbez;
mod rect;
mod rounded_rect;
mod seghit;
mod segpath;
mod shape;
mod size;
mod svg;
mod vec2;

pub use crate::affine::Affine;
pub use crate::arc::{ArcClosure, EllipseArc};
pub use crate::arclen::{
    fit_inv_arclen, integrate_simpson, neville_fit, solve_newton, NonConvergence, Piece,
    SolveStatus,
};
pub use crate::cag::{intersect, subtract, union};
pub use crate::circle::Circle;
pub use crate::cubicbez::{CubicBez, CubicBezIter};
pub use crate::ellipse::{Ellipse, EllipsePathIter};
pub use crate::fit::{fit_curve, DEFAULT_FIT_ERROR};
pub use crate::insets::Insets;
pub use crate::line::{ConstPoint, Line, LinePathIter};
pub use crate::param_curve::{
    ParamCurve, ParamCurveArclen, ParamCurveArea, ParamCurveDeriv, ParamCurveExtrema, MAX_EXTREMA,
};
pub use crate::path::{Path2D, Path2DIter, SubPath, WindingRule};
pub use crate::pathseg::{segments, PathEl, PathSeg, Segments, Verb};
pub use crate::point::Point;
pub use crate::polygon::{Polygon, PolygonIter, Triangulation};
pub use crate::polygon_path::{PolygonPath, PolygonPathIter};
pub use crate::quadbez::{QuadBez, QuadBezIter};
pub use crate::rect::{Rect, RectPathIter};
pub use crate::rounded_rect::{RoundRect, RoundRectPathIter};
pub use crate::seghit::SegHit;
pub use crate::segpath::{SegmentPath, SegmentPathIter};
pub use crate::shape::Shape;
pub use crate::size::Size;
pub use crate::svg::SvgParseError;
pub use crate::vec2::Vec2;
