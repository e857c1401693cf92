//! Segment rasterization.
//!
//! Converts two integer endpoints into the discrete pixel path a stroke
//! covers, using Bresenham-style error accumulation. Only left-to-right
//! segments are supported: each emitted point advances x by exactly one
//! and moves y by at most one.
//!
//! The textbook formulation accumulates `dy / dx` in a floating-point
//! error term and steps y once it reaches 0.5. Here the same recurrence
//! runs on integers scaled by `dx`, which gives the exact rational paths
//! without rounding drift.

use std::iter::FusedIterator;

use crate::types::{Point, RedrawError};

/// A left-to-right line segment between two integer endpoints.
///
/// The path covers columns `start.x..end.x` (end exclusive), so a
/// segment always has exactly `end.x - start.x` pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    start: Point,
    end: Point,
}

impl Segment {
    /// Create a segment from `start` to `end`.
    ///
    /// # Errors
    ///
    /// Returns [`RedrawError::DegenerateSegment`] unless `end.x > start.x`.
    pub fn new(start: Point, end: Point) -> Result<Self, RedrawError> {
        if end.x <= start.x {
            return Err(RedrawError::DegenerateSegment {
                x0: start.x,
                x1: end.x,
            });
        }
        Ok(Self { start, end })
    }

    /// First endpoint (always the first emitted pixel).
    #[must_use]
    pub const fn start(&self) -> Point {
        self.start
    }

    /// Second endpoint (never emitted; its column bounds the path).
    #[must_use]
    pub const fn end(&self) -> Point {
        self.end
    }

    /// Number of pixels on the path.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub const fn len(&self) -> usize {
        // Positive by construction.
        (self.end.x - self.start.x) as usize
    }

    /// Always `false`: a valid segment spans at least one column.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Iterate over the pixels of the path.
    ///
    /// The iterator is lazy and can be recreated any number of times;
    /// every call yields the same sequence.
    #[must_use]
    pub const fn points(&self) -> SegmentPoints {
        let dy = self.end.y - self.start.y;
        SegmentPoints {
            x: self.start.x,
            y: self.start.y,
            end_x: self.end.x,
            dx: self.end.x - self.start.x,
            dy_abs: dy.abs(),
            step: if dy < 0 { -1 } else { 1 },
            error: 0,
        }
    }
}

impl IntoIterator for &Segment {
    type Item = Point;
    type IntoIter = SegmentPoints;

    fn into_iter(self) -> SegmentPoints {
        self.points()
    }
}

/// Iterator over the pixels of a [`Segment`].
#[derive(Debug, Clone)]
pub struct SegmentPoints {
    x: i64,
    y: i64,
    end_x: i64,
    dx: i64,
    dy_abs: i64,
    step: i64,
    /// Accumulated error, in units of `1 / dx`.
    error: i64,
}

impl Iterator for SegmentPoints {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.x >= self.end_x {
            return None;
        }
        let point = Point::new(self.x, self.y);

        // error / dx >= 0.5  <=>  2 * error >= dx
        self.error += self.dy_abs;
        if 2 * self.error >= self.dx {
            self.y += self.step;
            self.error -= self.dx;
        }
        self.x += 1;

        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.end_x - self.x).unwrap_or(0);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SegmentPoints {}

impl FusedIterator for SegmentPoints {}
