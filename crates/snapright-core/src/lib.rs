//! Snapright Core - Image normalization engine
//!
//! This crate provides the synchronous raster engine for Snapright:
//! decoding user-supplied images, correcting their orientation from
//! metadata codes, resolving proportional target sizes, and rendering the
//! result to an encoded representation.
//!
//! The stages compose in a fixed order:
//!
//! ```text
//! bytes/data URL -> decode -> upright -> resolve_target -> render
//! ```
//!
//! The async coordination around these stages (metadata reader ports,
//! batch fan-out, acquisition sessions) lives in `snapright-pipeline`.

pub mod decode;
pub mod render;
pub mod scale;
pub mod transform;

pub use decode::{
    from_bytes, from_data_url, read_orientation, DecodeError, MetadataError, Orientation, Raster,
};
pub use render::{
    adjust, effective_quality, render, EncodeError, EncodedImage, OutputFormat, DEFAULT_QUALITY,
};
pub use scale::{resolve_target, ConstraintError, SizeConstraint};
pub use transform::upright;
