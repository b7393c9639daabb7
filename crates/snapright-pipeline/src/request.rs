//! Conversion requests and their configuration surface.

use serde::{Deserialize, Serialize};
use snapright_core::{OutputFormat, Raster, SizeConstraint};

/// Tagged input union for a conversion.
///
/// Exactly one representation is active per request; dispatch is by
/// variant, never by probing.
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// An already-decoded raster.
    Raster(Raster),
    /// Encoded image bytes.
    Bytes(Vec<u8>),
    /// A base64 data URL string.
    DataUrl(String),
}

/// Options for a single conversion. Every field is optional; defaults
/// produce an orientation-corrected PNG at natural size.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ConversionOptions {
    /// Explicit target width. Height is derived unless also given.
    pub width: Option<u32>,
    /// Explicit target height. Width is derived unless also given.
    pub height: Option<u32>,
    /// Long-edge bound; only takes effect together with `min`.
    pub max: Option<u32>,
    /// Short-edge bound; only takes effect together with `max`.
    pub min: Option<u32>,
    /// Output encoding. Defaults to PNG.
    pub format: OutputFormat,
    /// Encoding quality for lossy formats, 0.0..=1.0. Out-of-range values
    /// fall back to 0.92.
    pub quality: Option<f32>,
}

impl ConversionOptions {
    /// Resolve the active sizing strategy.
    ///
    /// Explicit dimensions win over edge bounds. Edge bounds require both
    /// values; a lone `max` or `min` falls through to the natural size.
    pub fn constraint(&self) -> SizeConstraint {
        match (self.width, self.height, self.max, self.min) {
            (Some(width), Some(height), _, _) => SizeConstraint::Exact { width, height },
            (Some(width), None, _, _) => SizeConstraint::Width(width),
            (None, Some(height), _, _) => SizeConstraint::Height(height),
            (None, None, Some(max), Some(min)) => SizeConstraint::Bounds { max, min },
            _ => SizeConstraint::Natural,
        }
    }

    /// Copy of these options with every sizing field cleared.
    pub fn without_sizing(self) -> Self {
        Self {
            width: None,
            height: None,
            max: None,
            min: None,
            ..self
        }
    }
}

/// One conversion: an input source plus its options.
///
/// Created per call and consumed once; requests are not reused.
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    pub source: ImageSource,
    pub options: ConversionOptions,
}

impl ConversionRequest {
    /// Request with default options (orientation-corrected PNG, natural size).
    pub fn new(source: ImageSource) -> Self {
        Self {
            source,
            options: ConversionOptions::default(),
        }
    }

    pub fn with_options(source: ImageSource, options: ConversionOptions) -> Self {
        Self { source, options }
    }
}
