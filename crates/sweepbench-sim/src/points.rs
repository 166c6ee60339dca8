//! Random point sets and their flat text format.
//!
//! Format: the first line holds the point count, each following line holds one
//! point as two space-separated integers.
//!
//! ```text
//! 3
//! 12 907
//! 0 1000
//! 455 3
//! ```

use crate::error::{BenchError, Result};
use rand::Rng;
use std::fmt::Write as _;
use std::path::Path;

/// Upper bound (inclusive) for both coordinates.
pub const COORD_MAX: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

/// Ordered points forming one benchmark input.
///
/// The count written by [`PointSet::serialize`] is always taken from the
/// sequence itself, so the header can never disagree with the body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PointSet {
    points: Vec<Point>,
}

/// Draw `n` points with both coordinates uniform over `[0, COORD_MAX]`.
pub fn generate<R: Rng + ?Sized>(n: usize, rng: &mut R) -> PointSet {
    let points = (0..n)
        .map(|_| Point {
            x: rng.gen_range(0..=COORD_MAX),
            y: rng.gen_range(0..=COORD_MAX),
        })
        .collect();
    PointSet { points }
}

impl PointSet {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn serialize(&self) -> String {
        // "1000 1000\n" is the widest line
        let mut out = String::with_capacity(8 + self.points.len() * 10);
        let _ = writeln!(out, "{}", self.points.len());
        for p in &self.points {
            let _ = writeln!(out, "{} {}", p.x, p.y);
        }
        out
    }

    /// Write the serialized set to `path`, creating or truncating it.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.serialize()).map_err(|e| BenchError::io(path, e))
    }

    /// Parse the text format back into a point set.
    ///
    /// Trailing blank lines are accepted. A header that disagrees with the
    /// number of point lines is a format error.
    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = text.lines().enumerate();

        let declared: usize = match lines.next() {
            Some((_, header)) => header
                .trim()
                .parse()
                .map_err(|_| BenchError::format(1, format!("invalid point count {header:?}")))?,
            None => return Err(BenchError::format(1, "missing point count")),
        };

        // The header is untrusted, so it does not size the buffer.
        let mut points = Vec::new();
        for (idx, line) in lines {
            let line_no = idx + 1;
            if line.trim().is_empty() {
                continue;
            }
            if points.len() == declared {
                return Err(BenchError::format(
                    line_no,
                    format!("more than the declared {declared} points"),
                ));
            }
            let mut fields = line.split_whitespace();
            let (Some(x), Some(y), None) = (fields.next(), fields.next(), fields.next()) else {
                return Err(BenchError::format(line_no, "expected two integers"));
            };
            let coord = |tok: &str| {
                tok.parse::<u32>()
                    .map_err(|_| BenchError::format(line_no, format!("invalid coordinate {tok:?}")))
            };
            points.push(Point {
                x: coord(x)?,
                y: coord(y)?,
            });
        }

        if points.len() != declared {
            return Err(BenchError::format(
                points.len() + 1,
                format!("declared {declared} points, found {}", points.len()),
            ));
        }
        Ok(Self { points })
    }
}

impl From<Vec<Point>> for PointSet {
    fn from(points: Vec<Point>) -> Self {
        Self { points }
    }
}
