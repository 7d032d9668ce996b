use crate::error::AppError;
use ailbums_core::ImageAsset;
use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::ImageReader;
use std::io::Cursor;

const THUMBNAIL_SIZE: u32 = 200;
const THUMBNAIL_QUALITY: u8 = 60;
const EXIF_HEADER_LEN: usize = 128 * 1024;

/// Generate a result-tile thumbnail and return the raw JPEG bytes.
/// Respects EXIF orientation.
pub fn generate_thumbnail_bytes(asset: &ImageAsset) -> Result<Vec<u8>, AppError> {
    let bytes = asset.read_bytes_blocking().map_err(|e| AppError {
        message: format!("Failed to read image {}: {}", asset.name(), e),
    })?;

    let (exif_thumb, orientation) = read_exif_info(&bytes);

    // Embedded EXIF thumbnail first, it avoids decoding the full image.
    if let Some(thumb) = exif_thumb {
        if orientation == 1 {
            return Ok(thumb);
        }
        match decode_bytes(&thumb) {
            Ok(img) => return encode_jpeg_thumbnail(&apply_orientation(img, orientation)),
            Err(e) => {
                log::debug!("[thumb] {} EXIF thumbnail unusable: {}, falling back", asset.name(), e);
            }
        }
    }

    let mut img = decode_bytes(&bytes).map_err(|e| AppError {
        message: format!("Failed to decode image {}: {}", asset.name(), e),
    })?;

    // Resize to a bounding box first; orientation does not change the box.
    let intermediate_size = THUMBNAIL_SIZE * 4;
    if img.width() > intermediate_size * 2 || img.height() > intermediate_size * 2 {
        img = img.resize(intermediate_size, intermediate_size, FilterType::Nearest);
    }
    img = img.resize(THUMBNAIL_SIZE, THUMBNAIL_SIZE, FilterType::Triangle);

    if orientation != 1 {
        img = apply_orientation(img, orientation);
    }

    encode_jpeg_thumbnail(&img)
}

/// Generate a thumbnail and return it as a base64 data URI.
pub fn generate_thumbnail(asset: &ImageAsset) -> Result<String, AppError> {
    let bytes = generate_thumbnail_bytes(asset)?;
    let b64 = base64::engine::general_purpose::STANDARD.encode(&bytes);
    Ok(format!("data:image/jpeg;base64,{}", b64))
}

fn decode_bytes(bytes: &[u8]) -> Result<image::DynamicImage, AppError> {
    Ok(ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()?
        .decode()?)
}

fn encode_jpeg_thumbnail(img: &image::DynamicImage) -> Result<Vec<u8>, AppError> {
    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, THUMBNAIL_QUALITY);
    // JPEG has no alpha channel.
    image::DynamicImage::ImageRgb8(img.to_rgb8())
        .write_with_encoder(encoder)
        .map_err(|e| AppError {
            message: format!("Failed to encode thumbnail: {}", e),
        })?;
    Ok(buffer.into_inner())
}

/// Parse EXIF from the file header, return (Embedded Thumbnail, Orientation).
/// Orientation defaults to 1 if not found.
fn read_exif_info(bytes: &[u8]) -> (Option<Vec<u8>>, u32) {
    let header = &bytes[..bytes.len().min(EXIF_HEADER_LEN)];
    let exif = match exif::Reader::new().read_from_container(&mut Cursor::new(header)) {
        Ok(e) => e,
        Err(_) => return (None, 1),
    };

    let orientation = match exif.get_field(exif::Tag::Orientation, exif::In::PRIMARY) {
        Some(field) => match field.value {
            exif::Value::Short(ref v) => *v.first().unwrap_or(&1) as u32,
            exif::Value::Long(ref v) => *v.first().unwrap_or(&1),
            _ => 1,
        },
        None => 1,
    };

    (extract_thumb_from_exif(&exif), orientation)
}

fn extract_thumb_from_exif(exif: &exif::Exif) -> Option<Vec<u8>> {
    let offset_field = exif.get_field(exif::Tag::JPEGInterchangeFormat, exif::In::THUMBNAIL)?;
    let length_field = exif.get_field(exif::Tag::JPEGInterchangeFormatLength, exif::In::THUMBNAIL)?;

    let offset = match offset_field.value {
        exif::Value::Long(ref v) => *v.first()? as usize,
        _ => return None,
    };

    let length = match length_field.value {
        exif::Value::Long(ref v) => *v.first()? as usize,
        _ => return None,
    };

    if !(100..=200_000).contains(&length) {
        return None;
    }

    let buf = exif.buf();
    if offset + length > buf.len() {
        return None;
    }

    let thumb_bytes = &buf[offset..offset + length];
    // Verify JPEG signature
    if thumb_bytes[0] != 0xFF || thumb_bytes[1] != 0xD8 {
        return None;
    }

    Some(thumb_bytes.to_vec())
}

fn apply_orientation(img: image::DynamicImage, orientation: u32) -> image::DynamicImage {
    match orientation {
        2 => img.fliph(),
        3 => img.rotate180(),
        4 => img.flipv(),
        5 => img.fliph().rotate90(),
        6 => img.rotate90(),
        7 => img.fliph().rotate270(),
        8 => img.rotate270(),
        _ => img,
    }
}
