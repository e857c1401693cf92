//! redraw-export: Pure output serializers (sans-IO)
//!
//! Converts a finished canvas into bytes ready to be written to disk.
//! Currently supports lossless PNG.

pub mod png;

pub use crate::png::{ExportError, PngMetadata, to_png};
