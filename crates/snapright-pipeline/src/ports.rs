//! Capability ports supplied by the host environment.
//!
//! The pipeline treats metadata parsing and image acquisition as external
//! capabilities behind async traits. The defaults cover hosts where the
//! capability is local (EXIF bytes retained on the raster); embedders
//! replace them to bridge platform facilities.

use async_trait::async_trait;
use snapright_core::{MetadataError, Orientation, Raster};

use crate::acquire::AcquisitionPrompt;
use crate::error::AcquireError;
use crate::request::ImageSource;

/// Reads the orientation tag for a raster handle.
///
/// Metadata parsing is asynchronous in most hosts, so implementations may
/// suspend. A raster without orientation information is reported as an
/// error here; the resolver maps that to the identity case rather than
/// surfacing it.
#[async_trait]
pub trait MetadataReader: Send + Sync {
    async fn orientation(&self, raster: &Raster) -> Result<Orientation, MetadataError>;
}

/// Default reader backed by the EXIF container retained on the raster.
#[derive(Debug, Default)]
pub struct ExifMetadataReader;

#[async_trait]
impl MetadataReader for ExifMetadataReader {
    async fn orientation(&self, raster: &Raster) -> Result<Orientation, MetadataError> {
        snapright_core::read_orientation(raster)
    }
}

/// Solicits images from the host (file picker, live capture, ...).
///
/// Hosts without any acquisition facility supply no implementation; the
/// coordinator reports that as a construction-time acquisition error
/// instead of probing at call time.
#[async_trait]
pub trait ImageAcquirer: Send + Sync {
    async fn acquire(&self, prompt: &AcquisitionPrompt) -> Result<Vec<ImageSource>, AcquireError>;
}
