//! Card-generation pipeline: validate, process, compose, persist.

use card_engine::{compose, photo, qr, CardError};
use tracing::info;
use uuid::Uuid;

use crate::assets::CardAssets;
use crate::config::AppConfig;
use crate::storage::{BlobStore, StorageError};

/// Filename extensions accepted for the uploaded photo.
pub const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// One multipart submission, as extracted from the request.
#[derive(Debug, Default, Clone)]
pub struct Submission {
    pub photo: Vec<u8>,
    pub photo_filename: String,
    pub name: String,
    pub reg_no: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// User-correctable input problem; the message is shown verbatim.
    #[error("{0}")]
    Invalid(String),
    /// Anything that went wrong while generating; logged server-side
    /// and reported to the user generically.
    #[error("card generation failed: {0}")]
    Processing(String),
}

impl From<CardError> for PipelineError {
    fn from(e: CardError) -> Self {
        PipelineError::Processing(e.to_string())
    }
}

impl From<StorageError> for PipelineError {
    fn from(e: StorageError) -> Self {
        PipelineError::Processing(e.to_string())
    }
}

/// URLs of the two stored card faces.
#[derive(Debug, Clone)]
pub struct CardUrls {
    pub front: String,
    pub back: String,
}

/// Extension allow-list check, case-insensitive, filename only.
pub fn allowed_file(filename: &str) -> bool {
    std::path::Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| ALLOWED_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Validate the submission, trimming the text fields in place.
pub fn validate(submission: &mut Submission) -> Result<(), PipelineError> {
    for field in [
        &mut submission.name,
        &mut submission.reg_no,
        &mut submission.email,
        &mut submission.phone,
    ] {
        *field = field.trim().to_string();
    }

    if submission.photo.is_empty() && submission.photo_filename.is_empty() {
        return Err(PipelineError::Invalid(
            "No photo part in the request.".into(),
        ));
    }

    if submission.photo_filename.is_empty()
        || submission.name.is_empty()
        || submission.reg_no.is_empty()
        || submission.email.is_empty()
        || submission.phone.is_empty()
    {
        return Err(PipelineError::Invalid(
            "All fields are required. Please fill out the entire form.".into(),
        ));
    }

    if !allowed_file(&submission.photo_filename) {
        return Err(PipelineError::Invalid("Invalid file type.".into()));
    }

    Ok(())
}

/// Run the full pipeline for one submission and return the URLs of
/// the stored front and back images. Nothing is written unless every
/// step succeeds up to the store.
pub fn generate_card(
    config: &AppConfig,
    assets: &CardAssets,
    store: &dyn BlobStore,
    mut submission: Submission,
) -> Result<CardUrls, PipelineError> {
    validate(&mut submission)?;

    let preprocessed = submission.photo_filename == photo::PREPROCESSED_FILENAME;
    let user_photo = photo::process_photo(&submission.photo, config.photo_size, preprocessed)?;

    let layout = compose::CardLayout::default();
    let fields = compose::CardFields {
        name: submission.name,
        reg_no: submission.reg_no,
        email: submission.email,
        phone: submission.phone,
    };

    let front = compose::compose_front(
        &assets.front_template,
        &user_photo,
        &fields,
        assets.font_bold(),
        assets.font_regular(),
        &layout,
    );

    let verify_url = qr::verification_url(&config.base_url, &fields.reg_no, &fields.name);
    let qr_img = qr::generate_qr(&verify_url, config.qr.size)?;
    let qr_pos = compose::qr_position(
        assets.back_template.width(),
        config.qr.size,
        config.qr.offset_x,
        config.qr.base_y,
        config.qr.offset_y,
    );
    let back = compose::compose_back(
        &assets.back_template,
        &qr_img,
        qr_pos,
        &fields.reg_no,
        assets.font_bold(),
        &layout,
    );

    let id = Uuid::new_v4().simple().to_string();
    let front_name = format!("front_{id}.png");
    let back_name = format!("back_{id}.png");
    store.put(&front_name, &card_engine::encode_png(&front)?)?;
    store.put(&back_name, &card_engine::encode_png(&back)?)?;
    info!(id = %id, reg_no = %fields.reg_no, "Card generated");

    Ok(CardUrls {
        front: store.url_for(&front_name),
        back: store.url_for(&back_name),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use image::{DynamicImage, Rgb, RgbImage};
    use std::io::Cursor;

    fn jpeg_photo() -> Vec<u8> {
        let img = RgbImage::from_pixel(640, 480, Rgb([120, 90, 60]));
        let mut buf = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut buf, image::ImageFormat::Jpeg)
            .unwrap();
        buf.into_inner()
    }

    fn valid_submission() -> Submission {
        Submission {
            photo: jpeg_photo(),
            photo_filename: "me.jpg".into(),
            name: "Jane Doe".into(),
            reg_no: "REG123".into(),
            email: "jane@example.com".into(),
            phone: "9999999999".into(),
        }
    }

    fn assets() -> CardAssets {
        CardAssets::load(&AppConfig::default()).unwrap()
    }

    #[test]
    fn allowed_file_checks_extension_case_insensitively() {
        assert!(allowed_file("photo.jpg"));
        assert!(allowed_file("photo.JPEG"));
        assert!(allowed_file("photo.PNG"));
        assert!(!allowed_file("malware.exe"));
        assert!(!allowed_file("noextension"));
        assert!(!allowed_file(""));
    }

    #[test]
    fn any_missing_field_rejects_and_writes_nothing() {
        let config = AppConfig::default();
        let assets = assets();
        let store = MemoryStore::new();

        let blank_each: Vec<Box<dyn Fn(&mut Submission)>> = vec![
            Box::new(|s| s.photo_filename.clear()),
            Box::new(|s| s.name = "   ".into()),
            Box::new(|s| s.reg_no.clear()),
            Box::new(|s| s.email.clear()),
            Box::new(|s| s.phone = "\t".into()),
        ];

        for blank in blank_each {
            let mut submission = valid_submission();
            blank(&mut submission);
            let err = generate_card(&config, &assets, &store, submission).unwrap_err();
            assert!(matches!(err, PipelineError::Invalid(_)));
        }
        assert!(store.is_empty());
    }

    #[test]
    fn absent_photo_part_gets_its_own_message() {
        let config = AppConfig::default();
        let store = MemoryStore::new();
        let mut submission = valid_submission();
        submission.photo.clear();
        submission.photo_filename.clear();

        let err = generate_card(&config, &assets(), &store, submission).unwrap_err();
        match err {
            PipelineError::Invalid(msg) => assert!(msg.contains("No photo part")),
            other => panic!("unexpected error: {other}"),
        }
        assert!(store.is_empty());
    }

    #[test]
    fn disallowed_extension_is_invalid_file_type() {
        let config = AppConfig::default();
        let store = MemoryStore::new();
        let mut submission = valid_submission();
        submission.photo_filename = "malware.exe".into();

        let err = generate_card(&config, &assets(), &store, submission).unwrap_err();
        match err {
            PipelineError::Invalid(msg) => assert!(msg.contains("Invalid file type")),
            other => panic!("unexpected error: {other}"),
        }
        assert!(store.is_empty());
    }

    #[test]
    fn undecodable_photo_is_a_processing_error() {
        let config = AppConfig::default();
        let store = MemoryStore::new();
        let mut submission = valid_submission();
        submission.photo = b"definitely not an image".to_vec();

        let err = generate_card(&config, &assets(), &store, submission).unwrap_err();
        assert!(matches!(err, PipelineError::Processing(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn jane_doe_scenario_produces_a_matched_pair_of_pngs() {
        let config = AppConfig::default();
        let store = MemoryStore::new();

        let urls = generate_card(&config, &assets(), &store, valid_submission()).unwrap();

        assert_eq!(store.len(), 2);
        let front_name = urls.front.strip_prefix("/uploads/").unwrap();
        let back_name = urls.back.strip_prefix("/uploads/").unwrap();
        let front_id = front_name
            .strip_prefix("front_")
            .and_then(|n| n.strip_suffix(".png"))
            .unwrap();
        let back_id = back_name
            .strip_prefix("back_")
            .and_then(|n| n.strip_suffix(".png"))
            .unwrap();
        assert_eq!(front_id, back_id);
        assert_eq!(front_id.len(), 32);
        assert!(front_id.chars().all(|c| c.is_ascii_hexdigit()));

        // Both blobs decode back to card-sized PNGs.
        for name in [front_name, back_name] {
            let bytes = store.get(name).unwrap();
            let img = image::load_from_memory(&bytes).unwrap();
            assert_eq!(
                (img.width(), img.height()),
                (
                    card_engine::template::CARD_WIDTH,
                    card_engine::template::CARD_HEIGHT
                )
            );
        }
    }

    #[test]
    fn consecutive_submissions_get_distinct_identifiers() {
        let config = AppConfig::default();
        let assets = assets();
        let store = MemoryStore::new();

        generate_card(&config, &assets, &store, valid_submission()).unwrap();
        generate_card(&config, &assets, &store, valid_submission()).unwrap();
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn preprocessed_filename_skips_the_hexagon_mask() {
        let config = AppConfig::default();
        let store = MemoryStore::new();
        let mut submission = valid_submission();
        // The sentinel name carries a .png extension, so it passes validation.
        submission.photo_filename = photo::PREPROCESSED_FILENAME.into();
        let opaque = image::RgbaImage::from_pixel(400, 400, image::Rgba([9, 9, 9, 255]));
        submission.photo = card_engine::encode_png(&opaque).unwrap();

        let urls = generate_card(&config, &assets(), &store, submission).unwrap();
        assert_eq!(store.len(), 2);

        // The photo's top-left corner stays opaque on the resize-only
        // path, so the front card shows the photo there instead of the
        // template showing through a masked corner.
        let front_name = urls.front.strip_prefix("/uploads/").unwrap();
        let front = image::load_from_memory(&store.get(front_name).unwrap())
            .unwrap()
            .to_rgba8();
        let layout = compose::CardLayout::default();
        let corner = front.get_pixel(layout.photo_pos.0 as u32, layout.photo_pos.1 as u32);
        assert!(corner[0] < 50, "expected dark photo pixel, got {corner:?}");
    }
}
