//! Image decoding pipeline for Snapright.
//!
//! This module turns incoming image representations into rasters:
//! - Decoding encoded bytes (JPEG, PNG, ...) with format guessing
//! - Decoding base64 data URLs
//! - Reading the EXIF orientation tag from a decoded raster's retained
//!   container
//!
//! Decoding keeps the original container bytes on the raster so the
//! orientation resolver can run against the decoded handle later.

mod source;
mod types;

pub use source::{from_bytes, from_data_url, read_orientation};
pub use types::{DecodeError, MetadataError, Orientation, Raster};
