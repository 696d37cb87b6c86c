//! Synthesized front/back card templates.
//!
//! The server accepts template overrides from disk; these built-in
//! renderings keep the pipeline fully self-contained.

use image::{Rgba, RgbaImage};

/// Card face width in pixels.
pub const CARD_WIDTH: u32 = 600;

/// Card face height in pixels.
pub const CARD_HEIGHT: u32 = 950;

const HEADER_HEIGHT: u32 = 160;
const FOOTER_HEIGHT: u32 = 60;

const BRAND_GREEN: Rgba<u8> = Rgba([47, 141, 70, 255]);
const CARD_WHITE: Rgba<u8> = Rgba([248, 250, 248, 255]);
const BACK_DARK: Rgba<u8> = Rgba([24, 54, 34, 255]);

/// Front template: light body with a brand-colored header and footer.
pub fn front_template() -> RgbaImage {
    let mut img = RgbaImage::from_pixel(CARD_WIDTH, CARD_HEIGHT, CARD_WHITE);
    fill_band(&mut img, 0, HEADER_HEIGHT, BRAND_GREEN);
    fill_band(&mut img, CARD_HEIGHT - FOOTER_HEIGHT, CARD_HEIGHT, BRAND_GREEN);
    img
}

/// Back template: dark body with a brand-colored top band.
pub fn back_template() -> RgbaImage {
    let mut img = RgbaImage::from_pixel(CARD_WIDTH, CARD_HEIGHT, BACK_DARK);
    fill_band(&mut img, 0, HEADER_HEIGHT / 2, BRAND_GREEN);
    img
}

fn fill_band(img: &mut RgbaImage, y0: u32, y1: u32, color: Rgba<u8>) {
    for y in y0..y1.min(img.height()) {
        for x in 0..img.width() {
            img.put_pixel(x, y, color);
        }
    }
}
