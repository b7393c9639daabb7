//! Raster transformation: orientation correction.
//!
//! Orientation correction runs before size resolution in the conversion
//! pipeline, so target dimensions are always computed against upright
//! content.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner
//! - Quarter turns swap output width and height
//! - Pixel values are permuted, never resampled

mod orient;

pub use orient::upright;
