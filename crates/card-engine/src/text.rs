//! Text measurement and shrink-to-fit rendering for card fields.

use ab_glyph::{Font, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;

/// Measure the pixel width of a string at the given font and scale.
pub fn measure_text_width<F: Font>(font: &F, scale: PxScale, text: &str) -> u32 {
    let scaled = font.as_scaled(scale);
    let mut width = 0.0f32;
    let mut prev_glyph: Option<ab_glyph::GlyphId> = None;

    for ch in text.chars() {
        let glyph_id = scaled.glyph_id(ch);
        if let Some(prev) = prev_glyph {
            width += scaled.kern(prev, glyph_id);
        }
        width += scaled.h_advance(glyph_id);
        prev_glyph = Some(glyph_id);
    }

    width.ceil() as u32
}

/// Pick the largest font size in `[min_size, max_size]` whose rendered
/// width fits within `max_width`, stepping down one size at a time.
///
/// Stops at `min_size` even if the text still overflows; callers draw
/// the result as-is (no wrapping, no clipping).
pub fn shrink_to_fit<F: Font>(
    font: &F,
    text: &str,
    max_size: u32,
    min_size: u32,
    max_width: u32,
) -> u32 {
    let mut size = max_size;
    while size > min_size && measure_text_width(font, PxScale::from(size as f32), text) > max_width
    {
        size -= 1;
    }
    size
}

/// Draw text horizontally centered on the image at the given y.
pub fn draw_centered_text<F: Font>(
    img: &mut RgbaImage,
    font: &F,
    scale: PxScale,
    y: i32,
    text: &str,
    color: Rgba<u8>,
) {
    let text_width = measure_text_width(font, scale, text) as i32;
    let x = ((img.width() as i32) - text_width).max(0) / 2;
    draw_text_mut(img, color, x, y, scale, font, text);
}
