//! Photo preparation: decode, orient, crop, and mask the user photo.

use std::io::Cursor;

use image::imageops::FilterType;
use image::{DynamicImage, RgbaImage};
use tracing::warn;

use crate::mask::{apply_alpha_mask, hexagonal_mask};
use crate::CardError;

/// Filename sent by the browser when the photo was already cropped
/// and masked into a hexagon client-side.
pub const PREPROCESSED_FILENAME: &str = "processed_photo.png";

/// Prepare the uploaded photo for compositing.
///
/// Decodes the raw bytes, applies EXIF orientation, then either
/// resizes (when the client already cropped the photo) or center-crops
/// to a `size`x`size` square and applies the hexagonal alpha mask.
pub fn process_photo(bytes: &[u8], size: u32, preprocessed: bool) -> Result<RgbaImage, CardError> {
    let img = image::load_from_memory(bytes)?;
    let img = correct_orientation(bytes, img);

    if preprocessed {
        // Already hexagonal; re-masking would eat into the shape.
        return Ok(img
            .resize_exact(size, size, FilterType::Lanczos3)
            .to_rgba8());
    }

    let mut photo = img.resize_to_fill(size, size, FilterType::Lanczos3).to_rgba8();
    let mask = hexagonal_mask(size, size);
    apply_alpha_mask(&mut photo, &mask);
    Ok(photo)
}

/// Apply the EXIF orientation tag, if present.
///
/// A photo without EXIF data passes through untouched. A photo whose
/// EXIF segment fails to parse keeps its original orientation, and the
/// fallback is logged.
fn correct_orientation(bytes: &[u8], img: DynamicImage) -> DynamicImage {
    let mut cursor = Cursor::new(bytes);
    let data = match exif::Reader::new().read_from_container(&mut cursor) {
        Ok(data) => data,
        Err(exif::Error::NotFound(_)) => return img,
        Err(e) => {
            warn!("EXIF parse failed, keeping original orientation: {e}");
            return img;
        }
    };

    let orientation = data
        .get_field(exif::Tag::Orientation, exif::In::PRIMARY)
        .and_then(|f| f.value.get_uint(0))
        .unwrap_or(1);

    apply_orientation(img, orientation)
}

/// EXIF orientation values: 1 normal, 2 mirrored, 3 rotated 180,
/// 4 flipped vertically, 5 to 8 rotations with optional mirror.
fn apply_orientation(img: DynamicImage, orientation: u32) -> DynamicImage {
    match orientation {
        2 => img.fliph(),
        3 => img.rotate180(),
        4 => img.flipv(),
        5 => img.rotate90().fliph(),
        6 => img.rotate90(),
        7 => img.rotate270().fliph(),
        8 => img.rotate270(),
        _ => img,
    }
}
