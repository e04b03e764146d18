// Copyright 2025 the Vojo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reading and writing paths as SVG path data.
//!
//! The dialect is a small subset of SVG: absolute `M`, `L`, `Q`, `C`
//! and `Z` commands with whitespace separated coordinates, one command
//! per line on output. Coordinates print in full precision, so a write
//! and read round trip reproduces the path exactly.

use alloc::string::String;
use core::fmt;
use core::fmt::Write;
use core::str::SplitWhitespace;

use crate::{Path2D, PathEl, Point, Shape};

impl Path2D {
    /// The path as SVG path data.
    pub fn to_svg(&self) -> String {
        let mut svg = String::new();
        // Writing into a string cannot fail.
        self.write_svg(&mut svg).unwrap();
        svg
    }

    /// Writes the path as SVG path data, one command per line.
    pub fn write_svg<W: Write>(&self, mut writer: W) -> fmt::Result {
        for el in self.path_iter() {
            match el {
                PathEl::MoveTo(p) => writeln!(writer, "M {} {}", p.x, p.y)?,
                PathEl::LineTo(p) => writeln!(writer, "L {} {}", p.x, p.y)?,
                PathEl::QuadTo(p1, p2) => {
                    writeln!(writer, "Q {} {} {} {}", p1.x, p1.y, p2.x, p2.y)?;
                }
                PathEl::CurveTo(p1, p2, p3) => {
                    writeln!(
                        writer,
                        "C {} {} {} {} {} {}",
                        p1.x, p1.y, p2.x, p2.y, p3.x, p3.y
                    )?;
                }
                PathEl::ClosePath => writeln!(writer, "Z")?,
            }
        }
        Ok(())
    }

    /// Parses SVG path data into a path.
    ///
    /// Parsing stops at the first problem and reports it, rather than
    /// guessing at what a malformed command meant.
    pub fn from_svg(data: &str) -> Result<Path2D, SvgParseError> {
        let mut tokens = data.split_whitespace();
        let mut path = Path2D::new();
        while let Some(op) = tokens.next() {
            match op {
                "M" => {
                    let p = read_point(&mut tokens)?;
                    path.move_to(p);
                }
                "L" => {
                    let p = read_point(&mut tokens)?;
                    path.line_to(p);
                }
                "Q" => {
                    let p1 = read_point(&mut tokens)?;
                    let p2 = read_point(&mut tokens)?;
                    path.quad_to(p1, p2);
                }
                "C" => {
                    let p1 = read_point(&mut tokens)?;
                    let p2 = read_point(&mut tokens)?;
                    let p3 = read_point(&mut tokens)?;
                    path.curve_to(p1, p2, p3);
                }
                "Z" => path.close(),
                _ => {
                    let c = op.chars().next().unwrap_or(' ');
                    return Err(SvgParseError::UnknownCommand(c));
                }
            }
        }
        Ok(path)
    }
}

fn read_point(tokens: &mut SplitWhitespace<'_>) -> Result<Point, SvgParseError> {
    let x = read_number(tokens)?;
    let y = read_number(tokens)?;
    Ok(Point::new(x, y))
}

fn read_number(tokens: &mut SplitWhitespace<'_>) -> Result<f64, SvgParseError> {
    let token = tokens.next().ok_or(SvgParseError::UnexpectedEof)?;
    token.parse().map_err(|_| SvgParseError::BadNumber)
}

/// Error returned when SVG path data does not parse.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SvgParseError {
    /// A command other than `M`, `L`, `Q`, `C` or `Z`.
    UnknownCommand(char),
    /// A coordinate that does not read as a number.
    BadNumber,
    /// The data ended in the middle of a command.
    UnexpectedEof,
}

impl fmt::Display for SvgParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SvgParseError::UnknownCommand(c) => write!(f, "unknown path command {c:?}"),
            SvgParseError::BadNumber => write!(f, "malformed number in path data"),
            SvgParseError::UnexpectedEof => write!(f, "path data ended mid command"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SvgParseError {}

#[cfg(test)]
mod tests {
    use crate::{Path2D, Point, SvgParseError};

    fn curvy_path() -> Path2D {
        let mut path = Path2D::new();
        path.move_to((0.5, 0.25));
        path.line_to((10.0, 0.0));
        path.quad_to((15.0, 5.0), (10.0, 10.0));
        path.curve_to((8.0, 12.5), (2.0, 12.5), (0.0, 10.0));
        path.close();
        path
    }

    #[test]
    fn output_is_one_command_per_line() {
        let mut path = Path2D::new();
        path.move_to((0.0, 0.0));
        path.line_to((10.0, 0.0));
        path.close();
        assert_eq!(path.to_svg(), "M 0 0\nL 10 0\nZ\n");
    }

    #[test]
    fn round_trip_is_exact() {
        let path = curvy_path();
        let reparsed = Path2D::from_svg(&path.to_svg()).unwrap();
        assert_eq!(path, reparsed);
    }

    #[test]
    fn parses_multiple_subpaths() {
        let path = Path2D::from_svg("M 0 0 L 10 0 Z M 20 0 L 30 0 Z").unwrap();
        assert_eq!(path.subpaths().len(), 2);
        assert_eq!(path.last_point(), Some(Point::new(30.0, 0.0)));
    }

    #[test]
    fn tolerates_any_whitespace() {
        let path = Path2D::from_svg("  M  1 2\n\tL\t3   4\n").unwrap();
        assert_eq!(path.seg_count(), 2);
        assert_eq!(path.last_point(), Some(Point::new(3.0, 4.0)));
    }

    #[test]
    fn empty_data_parses_to_empty_path() {
        assert_eq!(Path2D::from_svg("").unwrap(), Path2D::new());
        assert_eq!(Path2D::from_svg("   \n  ").unwrap(), Path2D::new());
    }

    #[test]
    fn rejects_unknown_commands() {
        let err = Path2D::from_svg("M 0 0 X 5 5").unwrap_err();
        assert_eq!(err, SvgParseError::UnknownCommand('X'));
        // Lowercase relative commands are not part of the dialect.
        let err = Path2D::from_svg("m 0 0").unwrap_err();
        assert_eq!(err, SvgParseError::UnknownCommand('m'));
    }

    #[test]
    fn rejects_truncated_data() {
        let err = Path2D::from_svg("M 0 0 L 10").unwrap_err();
        assert_eq!(err, SvgParseError::UnexpectedEof);
        let err = Path2D::from_svg("Q 1 2 3").unwrap_err();
        assert_eq!(err, SvgParseError::UnexpectedEof);
    }

    #[test]
    fn rejects_malformed_numbers() {
        let err = Path2D::from_svg("M zero 0").unwrap_err();
        assert_eq!(err, SvgParseError::BadNumber);
    }
}
