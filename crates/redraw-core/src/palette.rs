//! Palette extraction.
//!
//! The palette is the pool new strokes draw their color from: every
//! distinct color of the source image, in the order a row-major scan
//! first encounters it. The order does not affect correctness, only
//! which color a given random index selects, so keeping it stable makes
//! seeded runs reproducible.

use std::collections::HashSet;

use rand::Rng;

use crate::types::{Color, RedrawError, RgbaImage};

/// The distinct colors of a source image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    /// Scan `image` once and collect its distinct colors.
    ///
    /// # Errors
    ///
    /// Returns [`RedrawError::EmptyImage`] if the image has no pixels.
    pub fn from_image(image: &RgbaImage) -> Result<Self, RedrawError> {
        let mut seen = HashSet::new();
        let mut colors = Vec::new();
        for pixel in image.pixels() {
            let color = Color::from(*pixel);
            if seen.insert(color) {
                colors.push(color);
            }
        }

        if colors.is_empty() {
            return Err(RedrawError::EmptyImage);
        }
        Ok(Self { colors })
    }

    /// Number of distinct colors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false` for a palette built by [`Palette::from_image`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Colors in first-seen order.
    #[must_use]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Whether `color` occurs in the source image.
    #[must_use]
    pub fn contains(&self, color: Color) -> bool {
        self.colors.contains(&color)
    }

    /// Pick a color uniformly at random.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Color {
        self.colors[rng.gen_range(0..self.colors.len())]
    }
}
