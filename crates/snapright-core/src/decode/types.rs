//! Core types for image decoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The input is not recognized as a supported image format.
    #[error("Invalid or unsupported image data")]
    InvalidFormat,

    /// The image data is corrupted or incomplete.
    #[error("Corrupted or incomplete image data: {0}")]
    Corrupted(String),

    /// The textual input is not a well-formed base64 data URL.
    #[error("Malformed data URL: {0}")]
    MalformedDataUrl(String),
}

/// Error types for metadata tag reads.
///
/// These never surface past orientation resolution: a raster without a
/// readable orientation tag is simply treated as already upright.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// The raster carries no encoded container to read tags from.
    #[error("Raster carries no metadata")]
    NoMetadata,

    /// The retained container bytes could not be parsed.
    #[error("Metadata could not be read: {0}")]
    Unreadable(String),

    /// The container parsed but holds no orientation tag.
    #[error("No orientation tag present")]
    MissingTag,
}

/// Orientation codes describing the rotation needed to display an image
/// upright. See: https://exiftool.org/TagNames/EXIF.html
///
/// Only the four rotation codes are actionable here; every other value
/// (including the mirrored variants 2/4/5/7 and out-of-range values) maps
/// to `Upright`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    /// Code 1: no transformation needed.
    #[default]
    Upright = 1,
    /// Code 3: rotate 180 degrees.
    HalfTurn = 3,
    /// Code 6: rotate 90 degrees clockwise.
    QuarterCw = 6,
    /// Code 8: rotate 90 degrees counter-clockwise.
    QuarterCcw = 8,
}

impl Orientation {
    /// Returns true if this orientation swaps width and height.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        matches!(self, Orientation::QuarterCw | Orientation::QuarterCcw)
    }
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            3 => Orientation::HalfTurn,
            6 => Orientation::QuarterCw,
            8 => Orientation::QuarterCcw,
            _ => Orientation::Upright,
        }
    }
}

/// A decoded, drawable pixel buffer with known dimensions.
///
/// Immutable once produced: transforms and renders return new rasters.
#[derive(Debug, Clone)]
pub struct Raster {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGB pixel data in row-major order (3 bytes per pixel).
    /// Length should be width * height * 3.
    pub pixels: Vec<u8>,
    /// Encoded container bytes retained from decoding, if any.
    /// Orientation tags are read from here; rasters built from raw
    /// pixels carry none.
    pub metadata: Option<Vec<u8>>,
}

impl Raster {
    /// Create a new Raster from dimensions and raw pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            (width * height * 3) as usize,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
            metadata: None,
        }
    }

    /// Attach the encoded container the pixels were decoded from.
    pub fn with_metadata(mut self, metadata: Vec<u8>) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Create a Raster from an image::RgbImage.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img.into_raw();
        Self {
            width,
            height,
            pixels,
            metadata: None,
        }
    }

    /// Convert to an image::RgbImage for further processing.
    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
    }
}
