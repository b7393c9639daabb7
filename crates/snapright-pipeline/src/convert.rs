//! The single-image conversion pipeline and its batch surface.
//!
//! One conversion runs its stages strictly in order: decode the source
//! into a raster, resolve the orientation code, rotate the content
//! upright, resolve the target size, then render and encode. Batches fan
//! the same pipeline out across every request concurrently and join the
//! results in input order.

use std::sync::Arc;

use snapright_core::{resolve_target, transform, DecodeError, EncodedImage, Raster};
use tracing::{debug, info, warn};

use crate::acquire::{AcquisitionCoordinator, AcquisitionPrompt};
use crate::batch;
use crate::error::ConvertError;
use crate::ports::MetadataReader;
use crate::request::{ConversionOptions, ConversionRequest, ImageSource};
use crate::resolve::OrientationResolver;

/// Applies the conversion pipeline to requests.
pub struct Converter {
    resolver: OrientationResolver,
}

impl Converter {
    /// Converter with the default EXIF-backed metadata reader.
    pub fn new() -> Self {
        Self {
            resolver: OrientationResolver::exif(),
        }
    }

    /// Converter with a caller-supplied metadata reader.
    pub fn with_reader(reader: Arc<dyn MetadataReader>) -> Self {
        Self {
            resolver: OrientationResolver::new(reader),
        }
    }

    /// Run one conversion through the full pipeline.
    ///
    /// # Errors
    ///
    /// Decode, constraint and encode failures are reported through
    /// [`ConvertError`]. Metadata failures are not: an unreadable
    /// orientation tag resolves to the identity orientation.
    pub async fn convert(&self, request: ConversionRequest) -> Result<EncodedImage, ConvertError> {
        let raster = decode_source(request.source)?;
        let orientation = self.resolver.resolve(&raster).await;
        let oriented = transform::upright(&raster, orientation);

        let constraint = request.options.constraint();
        let (width, height) = resolve_target(oriented.width, oriented.height, &constraint)?;

        let encoded = snapright_core::render(
            &oriented,
            width,
            height,
            request.options.format,
            request.options.quality,
        )?;
        debug!(width, height, format = ?encoded.format, "conversion finished");
        Ok(encoded)
    }

    /// Orientation-only conversion: any sizing options are ignored.
    pub async fn adjust(&self, request: ConversionRequest) -> Result<EncodedImage, ConvertError> {
        let options = request.options.without_sizing();
        self.convert(ConversionRequest::with_options(request.source, options))
            .await
    }

    /// Convert every request concurrently and join the results.
    ///
    /// The returned vector is index-aligned with the inputs regardless of
    /// completion order. A failed item is an `Err` in its own slot; it
    /// never aborts or delays delivery of its siblings, and the aggregate
    /// is delivered once, after all items finish.
    pub async fn convert_all(
        &self,
        requests: Vec<ConversionRequest>,
    ) -> Vec<Result<EncodedImage, ConvertError>> {
        let total = requests.len();
        info!(total, "converting batch");

        let results = batch::run_all(requests, |request| self.convert(request)).await;

        let failed = results.iter().filter(|slot| slot.is_err()).count();
        if failed > 0 {
            warn!(failed, total, "batch finished with failed items");
        } else {
            info!(total, "batch finished");
        }
        results
    }

    /// Prompt the host for images and convert everything it returns.
    ///
    /// The acquisition failure path is total: a failed or superseded
    /// prompt fails the call before any pipeline work starts. Per-item
    /// conversion failures stay in their slots as usual.
    pub async fn acquire_and_convert(
        &self,
        coordinator: &AcquisitionCoordinator,
        prompt: AcquisitionPrompt,
        options: ConversionOptions,
    ) -> Result<Vec<Result<EncodedImage, ConvertError>>, ConvertError> {
        let sources = coordinator.acquire(prompt).await?;
        let requests = sources
            .into_iter()
            .map(|source| ConversionRequest::with_options(source, options))
            .collect();
        Ok(self.convert_all(requests).await)
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_source(source: ImageSource) -> Result<Raster, DecodeError> {
    match source {
        ImageSource::Raster(raster) => Ok(raster),
        ImageSource::Bytes(bytes) => snapright_core::from_bytes(&bytes),
        ImageSource::DataUrl(url) => snapright_core::from_data_url(&url),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use snapright_core::{MetadataError, Orientation, OutputFormat};

    struct FixedReader(Orientation);

    #[async_trait]
    impl MetadataReader for FixedReader {
        async fn orientation(&self, _raster: &Raster) -> Result<Orientation, MetadataError> {
            Ok(self.0)
        }
    }

    /// Route pipeline tracing output through the test harness. Safe to
    /// call from every test; only the first call installs the subscriber.
    fn init_test_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn gradient(width: u32, height: u32) -> Raster {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(((x * 255) / width.max(1)) as u8);
                pixels.push(((y * 255) / height.max(1)) as u8);
                pixels.push(128);
            }
        }
        Raster::new(width, height, pixels)
    }

    fn png_source(width: u32, height: u32) -> ImageSource {
        let raster = gradient(width, height);
        let encoded = snapright_core::adjust(&raster, OutputFormat::Png, None).unwrap();
        ImageSource::Bytes(encoded.bytes)
    }

    #[tokio::test]
    async fn test_convert_raster_natural_size() {
        let converter = Converter::new();
        let request = ConversionRequest::new(ImageSource::Raster(gradient(20, 10)));

        let encoded = converter.convert(request).await.unwrap();
        assert_eq!(encoded.width, 20);
        assert_eq!(encoded.height, 10);
        assert_eq!(encoded.format, OutputFormat::Png);
    }

    #[tokio::test]
    async fn test_convert_decodes_bytes_source() {
        let converter = Converter::new();
        let request = ConversionRequest::new(png_source(8, 6));

        let encoded = converter.convert(request).await.unwrap();
        assert_eq!(encoded.width, 8);
        assert_eq!(encoded.height, 6);
    }

    #[tokio::test]
    async fn test_convert_decodes_data_url_source() {
        let raster = gradient(5, 5);
        let url = snapright_core::adjust(&raster, OutputFormat::Png, None)
            .unwrap()
            .to_data_url();

        let converter = Converter::new();
        let encoded = converter
            .convert(ConversionRequest::new(ImageSource::DataUrl(url)))
            .await
            .unwrap();
        assert_eq!(encoded.width, 5);
    }

    #[tokio::test]
    async fn test_convert_applies_resolved_orientation() {
        // Reader says quarter turn; output dimensions must swap.
        let converter = Converter::with_reader(Arc::new(FixedReader(Orientation::QuarterCw)));
        let request = ConversionRequest::new(ImageSource::Raster(gradient(20, 10)));

        let encoded = converter.convert(request).await.unwrap();
        assert_eq!(encoded.width, 10);
        assert_eq!(encoded.height, 20);
    }

    #[tokio::test]
    async fn test_convert_scales_after_orientation() {
        // 20x10 source turned upright becomes 10x20 portrait, then the
        // width constraint derives the height from the upright ratio.
        let converter = Converter::with_reader(Arc::new(FixedReader(Orientation::QuarterCw)));
        let options = ConversionOptions {
            width: Some(5),
            ..Default::default()
        };
        let request =
            ConversionRequest::with_options(ImageSource::Raster(gradient(20, 10)), options);

        let encoded = converter.convert(request).await.unwrap();
        assert_eq!(encoded.width, 5);
        assert_eq!(encoded.height, 10);
    }

    #[tokio::test]
    async fn test_convert_garbage_bytes_is_decode_error() {
        let converter = Converter::new();
        let request = ConversionRequest::new(ImageSource::Bytes(vec![0xDE, 0xAD, 0xBE, 0xEF]));

        let result = converter.convert(request).await;
        assert!(matches!(result, Err(ConvertError::Decode(_))));
    }

    #[tokio::test]
    async fn test_convert_zero_width_is_constraint_error() {
        let converter = Converter::new();
        let options = ConversionOptions {
            width: Some(0),
            ..Default::default()
        };
        let request =
            ConversionRequest::with_options(ImageSource::Raster(gradient(10, 10)), options);

        let result = converter.convert(request).await;
        assert!(matches!(result, Err(ConvertError::Constraint(_))));
    }

    #[tokio::test]
    async fn test_adjust_ignores_sizing_options() {
        let converter = Converter::new();
        let options = ConversionOptions {
            width: Some(3),
            format: OutputFormat::Jpeg,
            ..Default::default()
        };
        let request =
            ConversionRequest::with_options(ImageSource::Raster(gradient(16, 8)), options);

        let encoded = converter.adjust(request).await.unwrap();
        assert_eq!(encoded.width, 16);
        assert_eq!(encoded.height, 8);
        assert_eq!(encoded.format, OutputFormat::Jpeg);
    }

    #[tokio::test]
    async fn test_convert_all_preserves_order_and_isolates_failures() {
        init_test_tracing();

        let converter = Converter::new();
        let requests = vec![
            ConversionRequest::new(png_source(4, 4)),
            ConversionRequest::new(ImageSource::Bytes(vec![0x00])),
            ConversionRequest::new(png_source(6, 2)),
        ];

        let results = converter.convert_all(requests).await;
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().width, 4);
        assert!(results[1].is_err());
        assert_eq!(results[2].as_ref().unwrap().width, 6);
    }

    #[tokio::test]
    async fn test_acquire_and_convert() {
        use crate::ports::ImageAcquirer;
        use crate::AcquireError;

        init_test_tracing();

        struct TwoImages;

        #[async_trait]
        impl ImageAcquirer for TwoImages {
            async fn acquire(
                &self,
                _prompt: &AcquisitionPrompt,
            ) -> Result<Vec<ImageSource>, AcquireError> {
                let good = {
                    let raster = Raster::new(3, 3, vec![10u8; 27]);
                    let encoded =
                        snapright_core::adjust(&raster, OutputFormat::Png, None).unwrap();
                    ImageSource::Bytes(encoded.bytes)
                };
                Ok(vec![good, ImageSource::Bytes(vec![0xFF])])
            }
        }

        let converter = Converter::new();
        let acquirer: Arc<dyn ImageAcquirer> = Arc::new(TwoImages);
        let coordinator = AcquisitionCoordinator::new(Some(acquirer)).unwrap();

        let results = converter
            .acquire_and_convert(
                &coordinator,
                AcquisitionPrompt {
                    multiple: true,
                    camera_only: false,
                },
                ConversionOptions::default(),
            )
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
    }
}
