//! Image decoding.
//!
//! Accepts raw image bytes (PNG, JPEG, BMP, WebP) and produces the RGBA
//! source image the optimizer approximates.

use crate::types::{RedrawError, RgbaImage};

/// Decode raw image bytes into 8-bit RGBA.
///
/// Supports whatever formats the `image` crate is built with. Images
/// with fewer channels or a higher bit depth are converted.
///
/// # Errors
///
/// Returns [`RedrawError::EmptyInput`] if `bytes` is empty.
/// Returns [`RedrawError::ImageDecode`] if the image format is
/// unrecognized or the data is corrupt.
/// Returns [`RedrawError::EmptyImage`] if the decoded image has no
/// pixels.
pub fn decode_rgba(bytes: &[u8]) -> Result<RgbaImage, RedrawError> {
    if bytes.is_empty() {
        return Err(RedrawError::EmptyInput);
    }

    let img = image::load_from_memory(bytes)?.to_rgba8();
    if img.width() == 0 || img.height() == 0 {
        return Err(RedrawError::EmptyImage);
    }
    Ok(img)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// Helper: encode an RGBA image as a PNG byte buffer.
    fn encode_png(img: &RgbaImage) -> Vec<u8> {
        let mut buf = Vec::new();
        let encoder = image::codecs::png::PngEncoder::new(&mut buf);
        image::ImageEncoder::write_image(
            encoder,
            img.as_raw(),
            img.width(),
            img.height(),
            image::ExtendedColorType::Rgba8,
        )
        .unwrap();
        buf
    }

    #[test]
    fn empty_input_returns_error() {
        let result = decode_rgba(&[]);
        assert!(matches!(result, Err(RedrawError::EmptyInput)));
    }

    #[test]
    fn corrupt_bytes_returns_image_decode_error() {
        let result = decode_rgba(&[0xFF, 0xFE, 0x00, 0x01]);
        assert!(matches!(result, Err(RedrawError::ImageDecode(_))));
    }

    #[test]
    fn valid_png_decodes_pixels_unchanged() {
        let img = RgbaImage::from_fn(17, 31, |x, y| {
            image::Rgba([u8::try_from(x).unwrap(), u8::try_from(y).unwrap(), 32, 200])
        });
        let decoded = decode_rgba(&encode_png(&img)).unwrap();
        assert_eq!(decoded, img);
    }

    #[test]
    fn grayscale_png_is_expanded_to_rgba() {
        let gray = image::GrayImage::from_pixel(2, 2, image::Luma([90]));
        let mut buf = Vec::new();
        let encoder = image::codecs::png::PngEncoder::new(&mut buf);
        image::ImageEncoder::write_image(
            encoder,
            gray.as_raw(),
            gray.width(),
            gray.height(),
            image::ExtendedColorType::L8,
        )
        .unwrap();

        let decoded = decode_rgba(&buf).unwrap();
        assert_eq!(decoded.get_pixel(1, 1).0, [90, 90, 90, 255]);
    }
}
