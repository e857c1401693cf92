//! Full-resolution pixel buffers.
//!
//! The optimizer keeps two canvases of identical dimensions, the
//! accepted state and a trial copy that receives one speculative stroke
//! per iteration. Coordinates outside the buffer are never an error
//! here: reads return `None` and writes are skipped, which is how
//! strokes hanging off an edge get clipped.

use crate::types::{Color, Dimensions, Point, RedrawError, RgbaImage};

/// A mutable RGBA pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// Allocate a canvas filled with `background`.
    #[must_use]
    pub fn new(dimensions: Dimensions, background: Color) -> Self {
        Self {
            image: RgbaImage::from_pixel(dimensions.width, dimensions.height, background.into()),
        }
    }

    /// Wrap an existing image.
    #[must_use]
    pub const fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    /// Canvas size in pixels.
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.image.width(),
            height: self.image.height(),
        }
    }

    /// Whether `point` addresses a pixel of this canvas.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        self.dimensions().contains(point)
    }

    /// Color at `point`, or `None` outside the canvas.
    #[must_use]
    pub fn get(&self, point: Point) -> Option<Color> {
        let (x, y) = self.coords(point)?;
        Some(Color::from(*self.image.get_pixel(x, y)))
    }

    /// Set the color at `point`.
    ///
    /// Returns `false` (and leaves the canvas untouched) when `point` is
    /// outside the canvas.
    pub fn set(&mut self, point: Point, color: Color) -> bool {
        match self.coords(point) {
            Some((x, y)) => {
                self.image.put_pixel(x, y, color.into());
                true
            }
            None => false,
        }
    }

    /// Paint every in-bounds pixel of `path` with `color`.
    ///
    /// Returns the number of pixels written.
    pub fn paint(&mut self, path: &[Point], color: Color) -> usize {
        path.iter().filter(|&&p| self.set(p, color)).count()
    }

    /// Replace this canvas's entire contents with `other`'s.
    ///
    /// # Errors
    ///
    /// Returns [`RedrawError::DimensionMismatch`] if the two canvases
    /// differ in size.
    pub fn copy_from(&mut self, other: &Self) -> Result<(), RedrawError> {
        let expected = self.dimensions();
        let actual = other.dimensions();
        if expected != actual {
            return Err(RedrawError::DimensionMismatch { expected, actual });
        }
        self.image.copy_from_slice(other.image.as_raw());
        Ok(())
    }

    /// Borrow the underlying image.
    #[must_use]
    pub const fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    /// Consume the canvas and return the underlying image.
    #[must_use]
    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    fn coords(&self, point: Point) -> Option<(u32, u32)> {
        if !self.contains(point) {
            return None;
        }
        Some((u32::try_from(point.x).ok()?, u32::try_from(point.y).ok()?))
    }
}
