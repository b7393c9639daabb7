//! Snapright Pipeline - async conversion coordination
//!
//! This crate wraps the synchronous raster engine in `snapright-core` with
//! the asynchronous coordination a host application needs:
//!
//! - `ports` - capability traits for the externally supplied metadata
//!   reader and image acquisition facilities
//! - `resolve` - orientation resolution against the metadata reader
//! - `convert` - the single-image conversion pipeline
//! - `batch` - fan-out/fan-in over many conversions with input-order
//!   aggregation
//! - `acquire` - single-slot acquisition sessions with supersession
//!
//! All coordination uses cooperative suspension; nothing here requires
//! real parallelism from the host.

pub mod acquire;
pub mod batch;
pub mod convert;
pub mod error;
pub mod ports;
pub mod request;
pub mod resolve;

pub use acquire::{AcquisitionCoordinator, AcquisitionPrompt};
pub use batch::{run_all, BatchJob};
pub use convert::Converter;
pub use error::{AcquireError, ConvertError};
pub use ports::{ExifMetadataReader, ImageAcquirer, MetadataReader};
pub use request::{ConversionOptions, ConversionRequest, ImageSource};
pub use resolve::OrientationResolver;
