//! Hexagonal alpha mask for the card photo.

use image::{GrayImage, Luma, RgbaImage};
use imageproc::drawing::draw_polygon_mut;
use imageproc::point::Point;

/// Build a filled hexagon mask for a `width`x`height` region.
///
/// Vertices sit at top-center, upper-right, lower-right, bottom-center,
/// lower-left, and upper-left of the bounding box. White inside the
/// hexagon, black outside.
pub fn hexagonal_mask(width: u32, height: u32) -> GrayImage {
    let mut mask = GrayImage::from_pixel(width, height, Luma([0u8]));
    let (w, h) = (width as i32, height as i32);
    let points = [
        Point::new(w / 2, 0),
        Point::new(w - 1, h / 4),
        Point::new(w - 1, h * 3 / 4),
        Point::new(w / 2, h - 1),
        Point::new(0, h * 3 / 4),
        Point::new(0, h / 4),
    ];
    draw_polygon_mut(&mut mask, &points, Luma([255u8]));
    mask
}

/// Replace the alpha channel of `img` with the given mask.
///
/// The mask must have the same dimensions as the image.
pub fn apply_alpha_mask(img: &mut RgbaImage, mask: &GrayImage) {
    debug_assert_eq!(img.dimensions(), mask.dimensions());
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        pixel[3] = mask.get_pixel(x, y)[0];
    }
}
