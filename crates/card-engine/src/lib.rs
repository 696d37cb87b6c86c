//! Imaging core for ID-card generation.
//!
//! Provides photo preparation (orientation, crop, hexagonal mask),
//! shrink-to-fit text rendering, QR bitmap generation, and front/back
//! card composition. Everything operates on in-memory bitmaps; no
//! filesystem or network I/O.

pub mod compose;
pub mod mask;
pub mod photo;
pub mod qr;
pub mod template;
pub mod text;

// Re-exports for convenience
pub use compose::{compose_back, compose_front, CardFields, CardLayout};
pub use mask::hexagonal_mask;
pub use photo::{process_photo, PREPROCESSED_FILENAME};
pub use qr::{generate_qr, verification_url};

use std::io::Cursor;

use image::RgbaImage;

/// Side length of the square photo region on the front face, in pixels.
pub const PHOTO_SIZE: u32 = 285;

#[derive(Debug, thiserror::Error)]
pub enum CardError {
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("QR encoding failed: {0}")]
    Qr(#[from] qrcode::types::QrError),
}

/// Encode an RGBA bitmap as PNG bytes.
pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>, CardError> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png)?;
    Ok(buf.into_inner())
}
