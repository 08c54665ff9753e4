use std::str::FromStr;

use eframe::egui::Color32;
use palette::Srgb;

use crate::data::model::Category;

// ---------------------------------------------------------------------------
// Hex colour parsing
// ---------------------------------------------------------------------------

/// Parse `#RRGGBB` (or `RRGGBB`) into a [`Color32`].
pub fn parse_hex(hex: &str) -> Option<Color32> {
    let rgb = Srgb::<u8>::from_str(hex.trim()).ok()?;
    Some(Color32::from_rgb(rgb.red, rgb.green, rgb.blue))
}

/// Like [`parse_hex`], falling back to gray for malformed input.
pub fn hex_or_gray(hex: &str) -> Color32 {
    parse_hex(hex).unwrap_or_else(|| {
        log::warn!("Invalid colour '{hex}', using gray");
        Color32::GRAY
    })
}

// ---------------------------------------------------------------------------
// Category palette: category → Color32
// ---------------------------------------------------------------------------

/// Fixed colours for a category dimension, indexed by canonical position.
#[derive(Debug, Clone)]
pub struct CategoryPalette {
    colors: Vec<Color32>,
    default_color: Color32,
}

impl CategoryPalette {
    pub fn from_hex<S: AsRef<str>>(hex: &[S]) -> Self {
        CategoryPalette {
            colors: hex.iter().map(|h| hex_or_gray(h.as_ref())).collect(),
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a category.
    pub fn color_for<C: Category>(&self, category: C) -> Color32 {
        self.colors
            .get(category.position())
            .copied()
            .unwrap_or(self.default_color)
    }
}
