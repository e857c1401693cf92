//! Shared types for the redraw engine.

use serde::{Deserialize, Serialize};

/// Re-export `RgbaImage` so downstream crates can hand decoded source
/// images to the engine without depending on `image` directly.
pub use image::RgbaImage;

/// An 8-bit-per-channel RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color([u8; 4]);

impl Color {
    /// Fully transparent black, the content of a freshly allocated canvas.
    pub const TRANSPARENT: Self = Self([0, 0, 0, 0]);

    /// Create a color from its four channels.
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self([red, green, blue, alpha])
    }

    /// Red channel.
    #[must_use]
    pub const fn red(self) -> u8 {
        self.0[0]
    }

    /// Green channel.
    #[must_use]
    pub const fn green(self) -> u8 {
        self.0[1]
    }

    /// Blue channel.
    #[must_use]
    pub const fn blue(self) -> u8 {
        self.0[2]
    }

    /// Alpha channel.
    #[must_use]
    pub const fn alpha(self) -> u8 {
        self.0[3]
    }

    /// All four channels in RGBA order.
    #[must_use]
    pub const fn channels(self) -> [u8; 4] {
        self.0
    }

    /// Difference score against another color: the sum over all four
    /// channels of the squared channel difference.
    ///
    /// The largest possible value is `4 * 255^2`, which fits a `u32`.
    #[must_use]
    pub fn difference(self, other: Self) -> u32 {
        self.0
            .iter()
            .zip(other.0)
            .map(|(&a, b)| u32::from(a.abs_diff(b)).pow(2))
            .sum()
    }
}

impl From<image::Rgba<u8>> for Color {
    fn from(pixel: image::Rgba<u8>) -> Self {
        Self(pixel.0)
    }
}

impl From<Color> for image::Rgba<u8> {
    fn from(color: Color) -> Self {
        Self(color.0)
    }
}

/// An integer pixel coordinate.
///
/// Signed so that segment endpoints generated near an edge can describe
/// positions outside the canvas; those are clipped before painting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    /// Column (pixels from left edge).
    pub x: i64,
    /// Row (pixels from top edge).
    pub y: i64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Dimensions {
    /// Total number of pixels.
    #[must_use]
    pub fn pixel_count(self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Whether `point` lies inside `0..width` x `0..height`.
    #[must_use]
    pub fn contains(self, point: Point) -> bool {
        (0..i64::from(self.width)).contains(&point.x)
            && (0..i64::from(self.height)).contains(&point.y)
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Configuration for a redraw run.
///
/// The random seed is deliberately not part of the configuration: it is
/// supplied per run so the same config can be replayed with different
/// seeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedrawConfig {
    /// Number of candidate segments to attempt.
    pub iterations: u64,

    /// Upper bound on generated segment side lengths and vertical offset.
    ///
    /// Side lengths are drawn from `1..max_segment_size`, so the value
    /// must be at least 2.
    pub max_segment_size: u32,

    /// Color both canvases start out with.
    pub background: Color,
}

impl RedrawConfig {
    /// Default number of iterations.
    pub const DEFAULT_ITERATIONS: u64 = 10_000;

    /// Default maximum segment size.
    pub const DEFAULT_MAX_SEGMENT_SIZE: u32 = 3;

    /// Smallest usable maximum segment size.
    pub const MIN_MAX_SEGMENT_SIZE: u32 = 2;

    /// Check the invariants the engine relies on.
    ///
    /// # Errors
    ///
    /// Returns [`RedrawError::InvalidConfig`] if `max_segment_size` is
    /// below [`Self::MIN_MAX_SEGMENT_SIZE`].
    pub fn validate(&self) -> Result<(), RedrawError> {
        if self.max_segment_size < Self::MIN_MAX_SEGMENT_SIZE {
            return Err(RedrawError::InvalidConfig(format!(
                "max_segment_size must be at least {}, got {}",
                Self::MIN_MAX_SEGMENT_SIZE,
                self.max_segment_size,
            )));
        }
        Ok(())
    }
}

impl Default for RedrawConfig {
    fn default() -> Self {
        Self {
            iterations: Self::DEFAULT_ITERATIONS,
            max_segment_size: Self::DEFAULT_MAX_SEGMENT_SIZE,
            background: Color::TRANSPARENT,
        }
    }
}

/// Errors that can occur in the redraw engine.
#[derive(Debug, thiserror::Error)]
pub enum RedrawError {
    /// Failed to decode the input image.
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// The input image bytes were empty.
    #[error("input image data is empty")]
    EmptyInput,

    /// The decoded image has no pixels.
    #[error("image has no pixels")]
    EmptyImage,

    /// Configuration is invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Two buffers that must share dimensions do not.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Dimensions of the destination buffer.
        expected: Dimensions,
        /// Dimensions of the offending buffer.
        actual: Dimensions,
    },

    /// A segment whose end does not lie strictly right of its start.
    #[error("segment must run left to right, got x0={x0} x1={x1}")]
    DegenerateSegment {
        /// Start column.
        x0: i64,
        /// End column.
        x1: i64,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn difference_of_identical_colors_is_zero() {
        let c = Color::new(12, 200, 7, 255);
        assert_eq!(c.difference(c), 0);
    }

    #[test]
    fn difference_is_symmetric() {
        let a = Color::new(10, 20, 30, 40);
        let b = Color::new(200, 5, 30, 255);
        assert_eq!(a.difference(b), b.difference(a));
    }

    #[test]
    fn difference_sums_squared_channels() {
        let a = Color::new(0, 0, 0, 0);
        let b = Color::new(1, 2, 3, 4);
        assert_eq!(a.difference(b), 1 + 4 + 9 + 16);
    }

    #[test]
    fn difference_maximum_fits() {
        let black = Color::TRANSPARENT;
        let white = Color::new(255, 255, 255, 255);
        assert_eq!(black.difference(white), 4 * 255 * 255);
    }

    #[test]
    fn color_round_trips_through_rgba() {
        let c = Color::new(1, 2, 3, 4);
        let px: image::Rgba<u8> = c.into();
        assert_eq!(Color::from(px), c);
        assert_eq!(c.red(), 1);
        assert_eq!(c.green(), 2);
        assert_eq!(c.blue(), 3);
        assert_eq!(c.alpha(), 4);
    }

    #[test]
    fn dimensions_contains_respects_bounds() {
        let d = Dimensions {
            width: 4,
            height: 3,
        };
        assert!(d.contains(Point::new(0, 0)));
        assert!(d.contains(Point::new(3, 2)));
        assert!(!d.contains(Point::new(4, 0)));
        assert!(!d.contains(Point::new(0, 3)));
        assert!(!d.contains(Point::new(-1, 1)));
        assert!(!d.contains(Point::new(1, -1)));
        assert_eq!(d.pixel_count(), 12);
    }

    #[test]
    fn default_config_is_valid() {
        let config = RedrawConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.iterations, 10_000);
        assert_eq!(config.max_segment_size, 3);
        assert_eq!(config.background, Color::TRANSPARENT);
    }

    #[test]
    fn config_rejects_tiny_segment_size() {
        for size in [0, 1] {
            let config = RedrawConfig {
                max_segment_size: size,
                ..RedrawConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(RedrawError::InvalidConfig(_))
            ));
        }
    }

    #[test]
    fn config_deserializes_with_missing_fields() {
        let config: RedrawConfig = serde_json::from_str(r#"{"iterations": 5}"#).unwrap();
        assert_eq!(config.iterations, 5);
        assert_eq!(
            config.max_segment_size,
            RedrawConfig::DEFAULT_MAX_SEGMENT_SIZE
        );
    }
}
