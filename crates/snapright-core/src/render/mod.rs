//! Image rendering pipeline for Snapright.
//!
//! This module provides functionality for:
//! - Drawing a raster scaled into a target-sized buffer
//! - Encoding to PNG or JPEG with configurable quality
//! - Producing base64 data URLs for textual delivery

mod encode;

pub use encode::{
    adjust, effective_quality, render, EncodeError, EncodedImage, OutputFormat, DEFAULT_QUALITY,
};
