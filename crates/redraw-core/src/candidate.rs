//! Random stroke generation.
//!
//! Each iteration proposes one short stroke: a random anchor, random
//! geometry bounded by the configured maximum segment size, and a color
//! drawn from the palette.
//!
//! # Slope
//!
//! The rasterizer only walks shallow slopes, but the raw geometry can
//! ask for up to `2 * max_side - 2` rows across as little as one column.
//! The vertical extent is therefore clamped to `[-dx, dx]` here. This
//! changes no pixel: once `|dy| >= dx` the rasterizer already steps y on
//! every column, so the clamped and unclamped segments rasterize to the
//! same path.

use rand::Rng;

use crate::palette::Palette;
use crate::raster::Segment;
use crate::types::{Color, Dimensions, Point, RedrawError};

/// A proposed stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    /// Path of the stroke.
    pub segment: Segment,
    /// Color to paint it with.
    pub color: Color,
}

/// Draws random [`Candidate`]s for a canvas of fixed size.
#[derive(Debug, Clone, Copy)]
pub struct CandidateGenerator {
    dimensions: Dimensions,
    max_side: u32,
}

impl CandidateGenerator {
    /// Create a generator for a canvas of `dimensions`.
    ///
    /// # Errors
    ///
    /// Returns [`RedrawError::EmptyImage`] for a zero-sized canvas and
    /// [`RedrawError::InvalidConfig`] when `max_side < 2`, since side
    /// lengths are drawn from `1..max_side`.
    pub fn new(dimensions: Dimensions, max_side: u32) -> Result<Self, RedrawError> {
        if dimensions.pixel_count() == 0 {
            return Err(RedrawError::EmptyImage);
        }
        if max_side < 2 {
            return Err(RedrawError::InvalidConfig(format!(
                "maximum segment size must be at least 2, got {max_side}"
            )));
        }
        Ok(Self {
            dimensions,
            max_side,
        })
    }

    /// Draw the next candidate.
    ///
    /// Values are drawn in a fixed order (anchor x, anchor y, `lx`, `ly`,
    /// `yoff`, sign of `ly`, palette index) so a seeded generator always
    /// yields the same sequence.
    ///
    /// # Errors
    ///
    /// Propagates [`RedrawError::DegenerateSegment`] from
    /// [`Segment::new`]; with `lx >= 1` this cannot happen.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        palette: &Palette,
    ) -> Result<Candidate, RedrawError> {
        let x = i64::from(rng.gen_range(0..self.dimensions.width));
        let y = i64::from(rng.gen_range(0..self.dimensions.height));

        let lx = i64::from(rng.gen_range(1..self.max_side));
        let mut ly = i64::from(rng.gen_range(1..self.max_side));
        let yoff = i64::from(rng.gen_range(0..self.max_side));
        if rng.gen_bool(0.5) {
            ly = -ly;
        }

        let dy = (yoff + ly).clamp(-lx, lx);
        let segment = Segment::new(Point::new(x, y), Point::new(x + lx, y + dy))?;
        let color = palette.sample(rng);

        Ok(Candidate { segment, color })
    }
}
