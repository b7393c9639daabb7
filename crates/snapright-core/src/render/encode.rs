//! Scaled rendering and encoding of rasters.
//!
//! The renderer draws a raster's full extent into a buffer of the target
//! dimensions (aspect ratio is already correct by the time it runs, so
//! nothing is cropped) and encodes the result as PNG or JPEG bytes, with a
//! base64 data-URL form for callers that need a textual representation.

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::Raster;

/// Default encoding quality for lossy formats when the requested value is
/// absent or outside 0.0..=1.0.
pub const DEFAULT_QUALITY: f32 = 0.92;

/// Errors that can occur while rendering and encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match the raster dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying encoder failed
    #[error("Image encoding failed: {0}")]
    EncodingFailed(String),
}

/// Output encoding for rendered images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Lossless PNG. The default, matching `image/png`.
    #[default]
    Png,
    /// Lossy JPEG with configurable quality, matching `image/jpeg`.
    Jpeg,
}

impl OutputFormat {
    /// The MIME identifier used in data URLs.
    pub fn mime(self) -> &'static str {
        match self {
            OutputFormat::Png => "image/png",
            OutputFormat::Jpeg => "image/jpeg",
        }
    }

    /// Parse a MIME identifier. Unknown types return `None`.
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "image/png" => Some(OutputFormat::Png),
            "image/jpeg" | "image/jpg" => Some(OutputFormat::Jpeg),
            _ => None,
        }
    }

    /// Whether the quality setting applies to this format.
    pub fn is_lossy(self) -> bool {
        matches!(self, OutputFormat::Jpeg)
    }
}

/// An encoded image plus its resolved output dimensions.
#[derive(Debug, Clone)]
pub struct EncodedImage {
    /// Encoding the bytes are in.
    pub format: OutputFormat,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Encoded image bytes.
    pub bytes: Vec<u8>,
}

impl EncodedImage {
    /// Render as a `data:<mime>;base64,<payload>` URL.
    pub fn to_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.format.mime(),
            STANDARD.encode(&self.bytes)
        )
    }
}

/// Clamp a requested quality to its effective value.
///
/// Values outside 0.0..=1.0 (and absent values) fall back to
/// [`DEFAULT_QUALITY`] rather than failing, matching the behavior users
/// expect from 2D canvas encoders.
pub fn effective_quality(quality: Option<f32>) -> f32 {
    match quality {
        Some(q) if (0.0..=1.0).contains(&q) => q,
        _ => DEFAULT_QUALITY,
    }
}

/// Draw a raster scaled to the given dimensions and encode it.
///
/// The full source extent is drawn; callers resolve the target size with
/// [`crate::scale::resolve_target`] first so the aspect ratio already
/// matches. Scaling resamples bilinearly.
///
/// # Arguments
///
/// * `raster` - Upright source raster
/// * `width` - Target width in pixels
/// * `height` - Target height in pixels
/// * `format` - Output encoding
/// * `quality` - 0.0..=1.0 for lossy formats; out-of-range falls back to
///   [`DEFAULT_QUALITY`]; ignored for lossless formats
///
/// # Errors
///
/// Returns `EncodeError::InvalidDimensions` for a zero target,
/// `EncodeError::InvalidPixelData` for a malformed raster, and
/// `EncodeError::EncodingFailed` when the encoder itself fails.
pub fn render(
    raster: &Raster,
    width: u32,
    height: u32,
    format: OutputFormat,
    quality: Option<f32>,
) -> Result<EncodedImage, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = (raster.width as usize) * (raster.height as usize) * 3;
    if raster.pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: raster.pixels.len(),
        });
    }

    let bytes = if raster.width == width && raster.height == height {
        encode_pixels(&raster.pixels, width, height, format, quality)?
    } else {
        let rgb = raster
            .to_rgb_image()
            .ok_or(EncodeError::InvalidPixelData {
                expected,
                actual: raster.pixels.len(),
            })?;
        let scaled =
            image::imageops::resize(&rgb, width, height, image::imageops::FilterType::Triangle);
        encode_pixels(scaled.as_raw(), width, height, format, quality)?
    };

    Ok(EncodedImage {
        format,
        width,
        height,
        bytes,
    })
}

/// Encode a raster at its natural size (orientation correction only).
///
/// Convenience equal to [`render`] with no scaling constraint.
pub fn adjust(
    raster: &Raster,
    format: OutputFormat,
    quality: Option<f32>,
) -> Result<EncodedImage, EncodeError> {
    render(raster, raster.width, raster.height, format, quality)
}

fn encode_pixels(
    pixels: &[u8],
    width: u32,
    height: u32,
    format: OutputFormat,
    quality: Option<f32>,
) -> Result<Vec<u8>, EncodeError> {
    let mut buffer = Cursor::new(Vec::new());

    match format {
        OutputFormat::Png => {
            PngEncoder::new(&mut buffer)
                .write_image(pixels, width, height, ExtendedColorType::Rgb8)
                .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;
        }
        OutputFormat::Jpeg => {
            let quality = ((effective_quality(quality) * 100.0).round() as u8).clamp(1, 100);
            JpegEncoder::new_with_quality(&mut buffer, quality)
                .write_image(pixels, width, height, ExtendedColorType::Rgb8)
                .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;
        }
    }

    Ok(buffer.into_inner())
}


// ============================================================================
// Property-Based Tests
// ============================================================================
