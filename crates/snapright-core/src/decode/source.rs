//! Decoding image sources into rasters.
//!
//! Inputs arrive either as raw encoded bytes or as the textual
//! `data:<mime>;base64,<payload>` form. Both paths keep the original
//! container on the resulting raster so orientation tags can still be
//! read against the decoded handle.

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use exif::{In, Reader, Tag};
use image::ImageReader;

use super::{DecodeError, MetadataError, Orientation, Raster};

/// Decode an image from encoded bytes, guessing the container format.
///
/// # Arguments
///
/// * `bytes` - Encoded image bytes (JPEG, PNG, ...)
///
/// # Returns
///
/// A `Raster` with RGB pixel data. The source bytes are retained as the
/// raster's metadata so tag reads remain possible after decoding.
///
/// # Errors
///
/// Returns `DecodeError::Corrupted` if the bytes cannot be decoded.
pub fn from_bytes(bytes: &[u8]) -> Result<Raster, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::InvalidFormat);
    }

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::Corrupted(e.to_string()))?;

    let img = reader
        .decode()
        .map_err(|e| DecodeError::Corrupted(e.to_string()))?;

    let raster = Raster::from_rgb_image(img.into_rgb8());
    Ok(raster.with_metadata(bytes.to_vec()))
}

/// Decode an image from a base64 data URL.
///
/// Accepts the `data:<mime>;base64,<payload>` form, which is also what
/// [`crate::render::EncodedImage::to_data_url`] produces. The MIME portion
/// is informational only; the actual container format is guessed from the
/// decoded bytes.
///
/// # Errors
///
/// Returns `DecodeError::MalformedDataUrl` when the URL structure or the
/// base64 payload is invalid, and decoding errors otherwise.
pub fn from_data_url(url: &str) -> Result<Raster, DecodeError> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| DecodeError::MalformedDataUrl("missing data: scheme".to_string()))?;

    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| DecodeError::MalformedDataUrl("missing payload separator".to_string()))?;

    if !header.ends_with(";base64") {
        return Err(DecodeError::MalformedDataUrl(
            "only base64 payloads are supported".to_string(),
        ));
    }

    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| DecodeError::MalformedDataUrl(e.to_string()))?;

    from_bytes(&bytes)
}

/// Read the orientation tag from a raster's retained container.
///
/// # Errors
///
/// Returns `MetadataError::NoMetadata` when the raster was built from raw
/// pixels, `MetadataError::Unreadable` when the container cannot be parsed,
/// and `MetadataError::MissingTag` when no orientation field is present.
/// Callers that only need a best-effort answer should map every error to
/// [`Orientation::Upright`].
pub fn read_orientation(raster: &Raster) -> Result<Orientation, MetadataError> {
    let container = raster.metadata.as_deref().ok_or(MetadataError::NoMetadata)?;

    let exif = Reader::new()
        .read_from_container(&mut Cursor::new(container))
        .map_err(|e| MetadataError::Unreadable(e.to_string()))?;

    let code = exif
        .get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .ok_or(MetadataError::MissingTag)?;

    Ok(Orientation::from(code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine as _;
    use image::codecs::png::PngEncoder;
    use image::{ExtendedColorType, ImageEncoder};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(((x * 255) / width.max(1)) as u8);
                pixels.push(((y * 255) / height.max(1)) as u8);
                pixels.push(128);
            }
        }
        let mut buffer = Cursor::new(Vec::new());
        PngEncoder::new(&mut buffer)
            .write_image(&pixels, width, height, ExtendedColorType::Rgb8)
            .unwrap();
        buffer.into_inner()
    }

    /// Minimal JPEG container holding a single EXIF orientation field.
    /// Not a decodable image, but a valid target for tag reading.
    fn exif_container(code: u8) -> Vec<u8> {
        let mut bytes = vec![0xFF, 0xD8]; // SOI
        bytes.extend_from_slice(&[0xFF, 0xE1, 0x00, 0x22]); // APP1, length 34
        bytes.extend_from_slice(b"Exif\0\0");
        // TIFF header, little-endian, IFD0 at offset 8
        bytes.extend_from_slice(&[0x49, 0x49, 0x2A, 0x00, 0x08, 0x00, 0x00, 0x00]);
        // One IFD entry: tag 0x0112 (Orientation), type SHORT, count 1
        bytes.extend_from_slice(&[0x01, 0x00]);
        bytes.extend_from_slice(&[0x12, 0x01, 0x03, 0x00, 0x01, 0x00, 0x00, 0x00]);
        bytes.extend_from_slice(&[code, 0x00, 0x00, 0x00]);
        // No further IFDs
        bytes.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);
        bytes.extend_from_slice(&[0xFF, 0xD9]); // EOI
        bytes
    }

    #[test]
    fn test_from_bytes_decodes_png() {
        let bytes = png_bytes(10, 4);
        let raster = from_bytes(&bytes).unwrap();

        assert_eq!(raster.width, 10);
        assert_eq!(raster.height, 4);
        assert_eq!(raster.pixels.len(), 10 * 4 * 3);
    }

    #[test]
    fn test_from_bytes_retains_source_as_metadata() {
        let bytes = png_bytes(3, 3);
        let raster = from_bytes(&bytes).unwrap();
        assert_eq!(raster.metadata.as_deref(), Some(bytes.as_slice()));
    }

    #[test]
    fn test_from_bytes_rejects_garbage() {
        let result = from_bytes(&[0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(result, Err(DecodeError::Corrupted(_))));
    }

    #[test]
    fn test_from_bytes_rejects_empty_input() {
        assert!(matches!(from_bytes(&[]), Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_from_data_url_round_trip() {
        let bytes = png_bytes(5, 7);
        let url = format!("data:image/png;base64,{}", STANDARD.encode(&bytes));
        let raster = from_data_url(&url).unwrap();

        assert_eq!(raster.width, 5);
        assert_eq!(raster.height, 7);
    }

    #[test]
    fn test_from_data_url_missing_scheme() {
        let result = from_data_url("image/png;base64,AAAA");
        assert!(matches!(result, Err(DecodeError::MalformedDataUrl(_))));
    }

    #[test]
    fn test_from_data_url_missing_separator() {
        let result = from_data_url("data:image/png;base64");
        assert!(matches!(result, Err(DecodeError::MalformedDataUrl(_))));
    }

    #[test]
    fn test_from_data_url_rejects_non_base64_encoding() {
        let result = from_data_url("data:image/png,rawpayload");
        assert!(matches!(result, Err(DecodeError::MalformedDataUrl(_))));
    }

    #[test]
    fn test_from_data_url_rejects_bad_payload() {
        let result = from_data_url("data:image/png;base64,!!not-base64!!");
        assert!(matches!(result, Err(DecodeError::MalformedDataUrl(_))));
    }

    #[test]
    fn test_read_orientation_without_metadata() {
        let raster = Raster::new(1, 1, vec![0u8; 3]);
        assert!(matches!(
            read_orientation(&raster),
            Err(MetadataError::NoMetadata)
        ));
    }

    #[test]
    fn test_read_orientation_from_exif_container() {
        let raster = Raster::new(1, 1, vec![0u8; 3]).with_metadata(exif_container(6));
        assert_eq!(read_orientation(&raster).unwrap(), Orientation::QuarterCw);

        let raster = Raster::new(1, 1, vec![0u8; 3]).with_metadata(exif_container(8));
        assert_eq!(read_orientation(&raster).unwrap(), Orientation::QuarterCcw);

        let raster = Raster::new(1, 1, vec![0u8; 3]).with_metadata(exif_container(3));
        assert_eq!(read_orientation(&raster).unwrap(), Orientation::HalfTurn);
    }

    #[test]
    fn test_read_orientation_mirrored_code_is_upright() {
        let raster = Raster::new(1, 1, vec![0u8; 3]).with_metadata(exif_container(2));
        assert_eq!(read_orientation(&raster).unwrap(), Orientation::Upright);
    }

    #[test]
    fn test_read_orientation_png_without_tag() {
        let raster = from_bytes(&png_bytes(2, 2)).unwrap();
        assert!(read_orientation(&raster).is_err());
    }
}
