//! Orientation resolution against a metadata reader port.

use std::sync::Arc;

use snapright_core::{Orientation, Raster};
use tracing::debug;

use crate::ports::{ExifMetadataReader, MetadataReader};

/// Yields the single orientation code that applies to a raster.
///
/// Delegates to the configured [`MetadataReader`]. Absence of orientation
/// information is not an error, it is the identity case: `resolve` never
/// fails outward.
pub struct OrientationResolver {
    reader: Arc<dyn MetadataReader>,
}

impl OrientationResolver {
    pub fn new(reader: Arc<dyn MetadataReader>) -> Self {
        Self { reader }
    }

    /// Resolver backed by the EXIF container retained at decode time.
    pub fn exif() -> Self {
        Self::new(Arc::new(ExifMetadataReader))
    }

    /// Resolve the orientation for `raster`.
    pub async fn resolve(&self, raster: &Raster) -> Orientation {
        match self.reader.orientation(raster).await {
            Ok(orientation) => orientation,
            Err(err) => {
                debug!(error = %err, "orientation tag unavailable; treating as upright");
                Orientation::Upright
            }
        }
    }
}

impl Default for OrientationResolver {
    fn default() -> Self {
        Self::exif()
    }
}
