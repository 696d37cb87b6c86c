//! Front/back card composition: photo paste plus text layers.

use ab_glyph::{Font, PxScale};
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;

use crate::text::{draw_centered_text, shrink_to_fit};

const NAME_COLOR: Rgba<u8> = Rgba([47, 141, 70, 255]);
const LABEL_COLOR: Rgba<u8> = Rgba([0, 0, 0, 200]);
const VALUE_COLOR: Rgba<u8> = Rgba([0, 0, 0, 220]);
const BACK_REG_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Text fields printed on the card front.
#[derive(Debug, Clone)]
pub struct CardFields {
    pub name: String,
    pub reg_no: String,
    pub email: String,
    pub phone: String,
}

/// Layout constants for both card faces.
#[derive(Debug, Clone)]
pub struct CardLayout {
    /// Top-left corner of the photo on the front face.
    pub photo_pos: (i32, i32),
    pub name_max_width: u32,
    pub name_max_size: u32,
    pub name_min_size: u32,
    pub name_base_y: i32,
    /// Pixels the name shifts up per font-size step above the floor,
    /// so larger names sit slightly higher.
    pub name_rise_per_size: f32,
    pub email_max_width: u32,
    pub email_max_size: u32,
    pub email_min_size: u32,
    pub label_x: i32,
    pub value_x: i32,
    pub details_y: i32,
    pub line_height: i32,
    pub details_size: u32,
    pub back_reg_size: u32,
    pub back_reg_y: i32,
}

impl Default for CardLayout {
    fn default() -> Self {
        Self {
            photo_pos: (158, 205),
            name_max_width: 450,
            name_max_size: 50,
            name_min_size: 28,
            name_base_y: 585,
            name_rise_per_size: 0.5,
            email_max_width: 375,
            email_max_size: 27,
            email_min_size: 18,
            label_x: 50,
            value_x: 190,
            details_y: 740,
            line_height: 55,
            details_size: 28,
            back_reg_size: 32,
            back_reg_y: 783,
        }
    }
}

/// Compose the front face: paste the photo, then render the name
/// (shrink-to-fit, centered) and the details block.
pub fn compose_front(
    template: &RgbaImage,
    photo: &RgbaImage,
    fields: &CardFields,
    bold: &impl Font,
    regular: &impl Font,
    layout: &CardLayout,
) -> RgbaImage {
    let mut card = template.clone();
    overlay(&mut card, photo, layout.photo_pos.0, layout.photo_pos.1);

    let name_size = shrink_to_fit(
        bold,
        &fields.name,
        layout.name_max_size,
        layout.name_min_size,
        layout.name_max_width,
    );
    let rise = (name_size - layout.name_min_size) as f32 * layout.name_rise_per_size;
    let name_y = layout.name_base_y - rise as i32;
    draw_centered_text(
        &mut card,
        bold,
        PxScale::from(name_size as f32),
        name_y,
        &fields.name,
        NAME_COLOR,
    );

    let label_scale = PxScale::from(layout.details_size as f32);

    draw_text_mut(
        &mut card,
        LABEL_COLOR,
        layout.label_x,
        layout.details_y,
        label_scale,
        bold,
        "Reg No",
    );
    draw_text_mut(
        &mut card,
        VALUE_COLOR,
        layout.value_x,
        layout.details_y,
        label_scale,
        regular,
        &fields.reg_no,
    );

    let email_size = shrink_to_fit(
        regular,
        &fields.email,
        layout.email_max_size,
        layout.email_min_size,
        layout.email_max_width,
    );
    let email_y = layout.details_y + layout.line_height;
    draw_text_mut(
        &mut card,
        LABEL_COLOR,
        layout.label_x,
        email_y,
        label_scale,
        bold,
        "Email",
    );
    draw_text_mut(
        &mut card,
        VALUE_COLOR,
        layout.value_x,
        email_y,
        PxScale::from(email_size as f32),
        regular,
        &fields.email,
    );

    let phone_y = layout.details_y + 2 * layout.line_height;
    draw_text_mut(
        &mut card,
        LABEL_COLOR,
        layout.label_x,
        phone_y,
        label_scale,
        bold,
        "Phone",
    );
    draw_text_mut(
        &mut card,
        VALUE_COLOR,
        layout.value_x,
        phone_y,
        label_scale,
        regular,
        &fields.phone,
    );

    card
}

/// Position of the QR code on the back face: horizontally centered
/// plus a fine-adjustment offset.
pub fn qr_position(
    card_width: u32,
    qr_size: u32,
    offset_x: i32,
    base_y: i32,
    offset_y: i32,
) -> (i32, i32) {
    let x = (card_width as i32 - qr_size as i32) / 2 + offset_x;
    (x, base_y + offset_y)
}

/// Compose the back face: QR code plus the centered registration number.
pub fn compose_back(
    template: &RgbaImage,
    qr: &RgbaImage,
    qr_pos: (i32, i32),
    reg_no: &str,
    bold: &impl Font,
    layout: &CardLayout,
) -> RgbaImage {
    let mut card = template.clone();
    overlay(&mut card, qr, qr_pos.0, qr_pos.1);
    draw_centered_text(
        &mut card,
        bold,
        PxScale::from(layout.back_reg_size as f32),
        layout.back_reg_y,
        reg_no,
        BACK_REG_COLOR,
    );
    card
}

/// Alpha-composite `top` over `base` at the given position.
///
/// Pixels falling outside the base image are skipped.
pub fn overlay(base: &mut RgbaImage, top: &RgbaImage, x: i32, y: i32) {
    for (dx, dy, pixel) in top.enumerate_pixels() {
        let tx = x + dx as i32;
        let ty = y + dy as i32;
        if tx < 0 || ty < 0 || tx >= base.width() as i32 || ty >= base.height() as i32 {
            continue;
        }
        let (tx, ty) = (tx as u32, ty as u32);
        let alpha = pixel[3] as f32 / 255.0;
        if alpha > 0.99 {
            base.put_pixel(tx, ty, *pixel);
        } else if alpha > 0.01 {
            let bg = base.get_pixel(tx, ty);
            let blended = blend_pixel(bg, pixel, alpha);
            base.put_pixel(tx, ty, blended);
        }
    }
}

fn blend_pixel(bg: &Rgba<u8>, fg: &Rgba<u8>, alpha: f32) -> Rgba<u8> {
    let inv = 1.0 - alpha;
    Rgba([
        (fg[0] as f32 * alpha + bg[0] as f32 * inv) as u8,
        (fg[1] as f32 * alpha + bg[1] as f32 * inv) as u8,
        (fg[2] as f32 * alpha + bg[2] as f32 * inv) as u8,
        255,
    ])
}
