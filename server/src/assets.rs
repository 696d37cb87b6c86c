//! Card assets: fonts and face templates, with on-disk overrides.

use std::path::Path;

use ab_glyph::FontVec;
use anyhow::Context;
use image::RgbaImage;
use rust_embed::Embed;
use tracing::info;

use card_engine::template;

use crate::config::AppConfig;

#[derive(Embed)]
#[folder = "../assets/fonts/"]
struct BundledFonts;

const BOLD_FONT: &str = "DejaVuSans-Bold.ttf";
const REGULAR_FONT: &str = "DejaVuSans.ttf";

/// Fonts and template bitmaps, loaded once at startup and shared
/// across requests.
pub struct CardAssets {
    font_bold: FontVec,
    font_regular: FontVec,
    pub front_template: RgbaImage,
    pub back_template: RgbaImage,
}

impl CardAssets {
    /// Load assets, preferring files under the configured assets
    /// directory and falling back to the bundled fonts and the
    /// synthesized templates.
    pub fn load(config: &AppConfig) -> anyhow::Result<Self> {
        let dir = config.assets_dir.as_deref();

        let font_bold = parse_font(font_bytes(dir, BOLD_FONT)?, BOLD_FONT)?;
        let font_regular = parse_font(font_bytes(dir, REGULAR_FONT)?, REGULAR_FONT)?;

        let front_template = load_template(dir, "front.png", template::front_template)?;
        let back_template = load_template(dir, "back.png", template::back_template)?;

        Ok(Self {
            font_bold,
            font_regular,
            front_template,
            back_template,
        })
    }

    pub fn font_bold(&self) -> &FontVec {
        &self.font_bold
    }

    pub fn font_regular(&self) -> &FontVec {
        &self.font_regular
    }
}

fn font_bytes(assets_dir: Option<&Path>, name: &str) -> anyhow::Result<Vec<u8>> {
    if let Some(dir) = assets_dir {
        let path = dir.join("fonts").join(name);
        if path.is_file() {
            info!(path = %path.display(), "Using font override");
            return std::fs::read(&path)
                .with_context(|| format!("failed to read font {}", path.display()));
        }
    }
    BundledFonts::get(name)
        .map(|f| f.data.into_owned())
        .with_context(|| format!("bundled font {name} missing"))
}

fn parse_font(bytes: Vec<u8>, name: &str) -> anyhow::Result<FontVec> {
    FontVec::try_from_vec(bytes).with_context(|| format!("invalid font data in {name}"))
}

fn load_template(
    assets_dir: Option<&Path>,
    name: &str,
    fallback: fn() -> RgbaImage,
) -> anyhow::Result<RgbaImage> {
    if let Some(dir) = assets_dir {
        let path = dir.join("templates").join(name);
        if path.is_file() {
            info!(path = %path.display(), "Using template override");
            let bytes = std::fs::read(&path)
                .with_context(|| format!("failed to read template {}", path.display()))?;
            return Ok(image::load_from_memory(&bytes)
                .with_context(|| format!("invalid template image {}", path.display()))?
                .to_rgba8());
        }
    }
    Ok(fallback())
}
