//! redraw-core: Stochastic stroke-based image reconstruction (sans-IO).
//!
//! Approximates a source image by painting short random line segments
//! onto a blank canvas and keeping each one only if it brings more of its
//! pixels closer to the source than it moves away:
//!
//! palette extraction -> candidate stroke -> rasterization -> paint
//! trial canvas -> concurrent per-pixel scoring -> majority vote ->
//! copy winner over loser -> repeat.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! byte slices and images. Reading, writing, and seeding from the clock
//! live in the `redraw` binary.

pub mod candidate;
pub mod canvas;
pub mod decode;
pub mod diagnostics;
pub mod optimizer;
pub mod palette;
pub mod raster;
pub mod score;
pub mod types;
pub mod vote;

pub use canvas::Canvas;
pub use diagnostics::{Clock, RunDiagnostics, RunSummary};
pub use optimizer::{Optimizer, Phase, StepOutcome};
pub use palette::Palette;
pub use raster::Segment;
pub use types::{Color, Dimensions, Point, RedrawConfig, RedrawError, RgbaImage};

/// Decode an image and run a complete optimization over it.
///
/// Takes raw image bytes (PNG, JPEG, BMP, WebP), a configuration and a
/// seed, and returns the final canvas. The same bytes, config and seed
/// always produce the same canvas.
///
/// # Errors
///
/// Returns [`RedrawError::EmptyInput`] if `image_bytes` is empty.
/// Returns [`RedrawError::ImageDecode`] if the image format is unrecognized.
/// Returns [`RedrawError::EmptyImage`] if the image has no pixels.
/// Returns [`RedrawError::InvalidConfig`] if `config` fails validation.
pub fn redraw(image_bytes: &[u8], config: &RedrawConfig, seed: u64) -> Result<Canvas, RedrawError> {
    let source = decode::decode_rgba(image_bytes)?;
    let mut optimizer = Optimizer::new(source, config, seed)?;
    optimizer.run()?;
    Ok(optimizer.into_canvas())
}
