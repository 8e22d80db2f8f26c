//! Points, leaves, and the filtering step that turns feature output into leaves.

use crate::error::{Error, Result};

/// An immutable 2-D feature point.
///
/// Coordinates are day counts upstream, but nothing here assumes integrality.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// First coordinate.
    pub x: f64,
    /// Second coordinate.
    pub y: f64,
}

impl Point {
    /// Create a point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Both coordinates are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// A defined input point with its dense leaf id.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Leaf {
    /// Leaf id in `0..m`, assigned in input order over defined points.
    pub id: usize,
    /// Position in the unfiltered input this leaf came from.
    pub source: usize,
    /// The point itself.
    pub point: Point,
}

/// Drop undefined entries and number the rest densely.
///
/// `None` entries consume no id. A defined point with a NaN or infinite
/// coordinate rejects the whole input.
pub fn leaves(features: &[Option<Point>]) -> Result<Vec<Leaf>> {
    let mut out = Vec::with_capacity(features.len());
    for (source, feature) in features.iter().enumerate() {
        let Some(point) = feature else {
            continue;
        };
        if !point.is_finite() {
            return Err(Error::NonFiniteCoordinate {
                index: source,
                x: point.x,
                y: point.y,
            });
        }
        out.push(Leaf {
            id: out.len(),
            source,
            point: *point,
        });
    }
    Ok(out)
}
