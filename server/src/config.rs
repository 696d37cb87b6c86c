//! Runtime configuration from environment variables.

use std::path::PathBuf;

/// QR code sizing and placement on the back face.
#[derive(Debug, Clone)]
pub struct QrConfig {
    /// Final side length of the QR bitmap in pixels.
    pub size: u32,
    /// Base vertical position on the back template.
    pub base_y: i32,
    /// Left(-) / right(+) fine adjustment.
    pub offset_x: i32,
    /// Up(-) / down(+) fine adjustment.
    pub offset_y: i32,
}

/// Service configuration.
///
/// Every knob the pipeline needs is carried here explicitly so tests
/// can run against temporary directories and in-memory stores.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_port: u16,
    /// Flat directory the generated PNGs are written to.
    pub upload_dir: PathBuf,
    /// Optional directory with font/template overrides.
    pub assets_dir: Option<PathBuf>,
    /// Public base URL embedded in verification QR codes.
    pub base_url: String,
    pub max_upload_bytes: usize,
    /// Side length of the square photo region on the front face.
    pub photo_size: u32,
    pub qr: QrConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_port: 8080,
            upload_dir: PathBuf::from("uploads"),
            assets_dir: None,
            base_url: "http://localhost:8080".into(),
            max_upload_bytes: 4 * 1024 * 1024,
            photo_size: card_engine::PHOTO_SIZE,
            qr: QrConfig {
                size: 200,
                base_y: 550,
                offset_x: 0,
                offset_y: -50,
            },
        }
    }
}

impl AppConfig {
    /// Read configuration from `HEXCARD_*` environment variables,
    /// falling back to defaults.
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            server_port: env_parse("HEXCARD_PORT", d.server_port),
            upload_dir: std::env::var("HEXCARD_UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(d.upload_dir),
            assets_dir: std::env::var("HEXCARD_ASSETS_DIR").ok().map(PathBuf::from),
            base_url: std::env::var("HEXCARD_BASE_URL").unwrap_or(d.base_url),
            max_upload_bytes: env_parse("HEXCARD_MAX_UPLOAD_BYTES", d.max_upload_bytes),
            photo_size: d.photo_size,
            qr: QrConfig {
                size: env_parse("HEXCARD_QR_SIZE", d.qr.size),
                base_y: env_parse("HEXCARD_QR_BASE_Y", d.qr.base_y),
                offset_x: env_parse("HEXCARD_QR_OFFSET_X", d.qr.offset_x),
                offset_y: env_parse("HEXCARD_QR_OFFSET_Y", d.qr.offset_y),
            },
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_mirror_the_original_constants() {
        let c = AppConfig::default();
        assert_eq!(c.max_upload_bytes, 4 * 1024 * 1024);
        assert_eq!(c.photo_size, 285);
        assert_eq!(c.qr.size, 200);
        assert_eq!(c.qr.base_y, 550);
        assert_eq!(c.qr.offset_x, 0);
        assert_eq!(c.qr.offset_y, -50);
    }
}
