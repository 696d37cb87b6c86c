//! QR code bitmaps for the verification URL.

use image::imageops::FilterType;
use image::{DynamicImage, GrayImage, Luma, RgbaImage};
use qrcode::{Color, QrCode};

use crate::CardError;

/// Pixels per QR module before the final resize.
const MODULE_SIZE: u32 = 8;

/// Quiet-zone width in modules.
const BORDER_MODULES: u32 = 2;

/// Encode `data` into a square RGBA bitmap of side `target_size`.
///
/// The code is rendered at a fixed module size with a quiet-zone
/// border, then Lanczos-resized to the target dimensions.
pub fn generate_qr(data: &str, target_size: u32) -> Result<RgbaImage, CardError> {
    let code = QrCode::new(data.as_bytes())?;
    let modules = code.to_colors();
    let module_count = code.width() as u32;
    let side = (module_count + 2 * BORDER_MODULES) * MODULE_SIZE;

    let mut img = GrayImage::from_pixel(side, side, Luma([255u8]));
    for (i, color) in modules.iter().enumerate() {
        if *color != Color::Dark {
            continue;
        }
        let x = (i as u32 % module_count + BORDER_MODULES) * MODULE_SIZE;
        let y = (i as u32 / module_count + BORDER_MODULES) * MODULE_SIZE;
        for dx in 0..MODULE_SIZE {
            for dy in 0..MODULE_SIZE {
                img.put_pixel(x + dx, y + dy, Luma([0u8]));
            }
        }
    }

    let resized = DynamicImage::ImageLuma8(img).resize_exact(
        target_size,
        target_size,
        FilterType::Lanczos3,
    );
    Ok(resized.to_rgba8())
}

/// Build the verification URL encoded into the card's QR code.
///
/// Spaces in the name become `+`, which the verification endpoint
/// restores on display.
pub fn verification_url(base_url: &str, reg_no: &str, name: &str) -> String {
    format!(
        "{}/verify?id={}&name={}",
        base_url.trim_end_matches('/'),
        reg_no,
        name.replace(' ', "+")
    )
}
