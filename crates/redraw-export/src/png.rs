//! PNG export serializer.
//!
//! Encodes a canvas as an 8-bit RGBA PNG. The encoding is lossless, so
//! decoding the result yields exactly the canvas pixels.
//!
//! Optional metadata is stored in text chunks:
//!
//! - `Software`: always `redraw` (`tEXt`)
//! - `Title`: source image name (`iTXt`)
//! - `Description`: human-readable run parameters (`iTXt`)
//! - `Comment`: full `RedrawConfig` JSON, prefixed `Config: ` (`iTXt`)
//!
//! Title and description may contain any UTF-8 (file names often do),
//! which `tEXt` cannot carry, hence `iTXt` for everything but the
//! software tag.
//!
//! This is a pure function with no I/O -- it returns a `Vec<u8>`.

use png::{BitDepth, ColorType, Encoder, EncodingError};
use redraw_core::Canvas;

/// Value of the `Software` text chunk.
pub const SOFTWARE: &str = "redraw";

/// Errors that can occur while encoding a canvas.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The PNG encoder rejected the image or its metadata.
    #[error("failed to encode PNG: {0}")]
    Encode(#[from] EncodingError),
}

/// Metadata to embed as PNG text chunks.
///
/// All fields are optional. When present, the corresponding chunk is
/// emitted.
#[derive(Debug, Clone, Default)]
pub struct PngMetadata<'a> {
    /// Source image filename -- emitted as `Title`.
    pub title: Option<&'a str>,

    /// Human-readable run parameters -- emitted as `Description`.
    pub description: Option<&'a str>,

    /// Full `RedrawConfig` JSON -- emitted as `Comment: Config: <json>`.
    ///
    /// Together with the seed in the description this is enough to
    /// reproduce the run.
    pub config_json: Option<&'a str>,
}

/// Serialize a canvas into PNG bytes.
///
/// # Errors
///
/// Returns [`ExportError::Encode`] if the encoder fails, e.g. for a
/// zero-sized canvas.
///
/// # Examples
///
/// ```
/// use redraw_core::{Canvas, Color, Dimensions};
/// use redraw_export::{PngMetadata, to_png};
///
/// let canvas = Canvas::new(Dimensions { width: 2, height: 2 }, Color::new(9, 8, 7, 255));
/// let png = to_png(&canvas, &PngMetadata::default()).unwrap();
/// assert_eq!(&png[1..4], b"PNG");
/// ```
pub fn to_png(canvas: &Canvas, metadata: &PngMetadata<'_>) -> Result<Vec<u8>, ExportError> {
    let image = canvas.as_image();
    let mut buf = Vec::new();

    {
        let mut encoder = Encoder::new(&mut buf, image.width(), image.height());
        encoder.set_color(ColorType::Rgba);
        encoder.set_depth(BitDepth::Eight);

        encoder.add_text_chunk("Software".to_owned(), SOFTWARE.to_owned())?;
        if let Some(title) = metadata.title {
            encoder.add_itxt_chunk("Title".to_owned(), title.to_owned())?;
        }
        if let Some(description) = metadata.description {
            encoder.add_itxt_chunk("Description".to_owned(), description.to_owned())?;
        }
        if let Some(config_json) = metadata.config_json {
            encoder.add_itxt_chunk("Comment".to_owned(), format!("Config: {config_json}"))?;
        }

        let mut writer = encoder.write_header()?;
        writer.write_image_data(image.as_raw())?;
        writer.finish()?;
    }

    Ok(buf)
}
