//! Deterministic colors for tag text.
//!
//! A tag's colors are derived from its text alone: a rolling 32-bit hash
//! picks a hue, and two fixed OKLCH lightness/chroma pairs at that hue give
//! a pale chip background and a darker foreground. The same text always
//! produces the same colors, in every session.

use palette::{IntoColor, Oklch, Srgb};
use ratatui::style::Color;

/// OKLCH lightness of the chip background.
pub const BACKGROUND_LIGHTNESS: f32 = 0.96;
/// OKLCH chroma of the chip background.
pub const BACKGROUND_CHROMA: f32 = 0.03;
/// OKLCH lightness of the chip foreground.
pub const FOREGROUND_LIGHTNESS: f32 = 0.45;
/// OKLCH chroma of the chip foreground.
pub const FOREGROUND_CHROMA: f32 = 0.12;

/// Rolling hash over the UTF-16 code units of `text`.
///
/// `hash = hash * 31 + unit`, wrapping at 32 bits after every step.
pub fn text_hash(text: &str) -> i32 {
    text.encode_utf16().fold(0i32, |hash, unit| {
        (hash << 5).wrapping_sub(hash).wrapping_add(i32::from(unit))
    })
}

/// Hue in degrees (`0..360`) assigned to `text`.
pub fn hue_for(text: &str) -> u16 {
    // unsigned_abs keeps i32::MIN in range
    (text_hash(text).unsigned_abs() % 360) as u16
}

/// Background/foreground pair for a tag chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagColors {
    /// Hue both colors share.
    pub hue: u16,
    /// Pale chip fill.
    pub background: Color,
    /// Darker chip text color.
    pub foreground: Color,
}

/// Colors assigned to `text`.
pub fn tag_colors(text: &str) -> TagColors {
    let hue = hue_for(text);
    TagColors {
        hue,
        background: oklch_to_color(BACKGROUND_LIGHTNESS, BACKGROUND_CHROMA, f32::from(hue)),
        foreground: oklch_to_color(FOREGROUND_LIGHTNESS, FOREGROUND_CHROMA, f32::from(hue)),
    }
}

fn oklch_to_color(l: f32, c: f32, h: f32) -> Color {
    let srgb: Srgb = Oklch::new(l, c, h).into_color();
    let (r, g, b) = srgb.into_format::<u8>().into_components();
    Color::Rgb(r, g, b)
}

/// Named categorical badge colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeVariant {
    Emerald,
    Amber,
    Violet,
    Sky,
    Rose,
    Slate,
}

impl BadgeVariant {
    /// Every variant, in selection order.
    pub const ALL: [BadgeVariant; 6] = [
        BadgeVariant::Emerald,
        BadgeVariant::Amber,
        BadgeVariant::Violet,
        BadgeVariant::Sky,
        BadgeVariant::Rose,
        BadgeVariant::Slate,
    ];

    /// Pick a variant for `text` using the same rolling hash as tag hues.
    pub fn for_text(text: &str) -> Self {
        let index = text_hash(text).unsigned_abs() as usize % Self::ALL.len();
        Self::ALL[index]
    }

    /// Text color for a badge of this variant.
    pub fn foreground(&self) -> Color {
        match self {
            BadgeVariant::Emerald => Color::Rgb(4, 120, 87),
            BadgeVariant::Amber => Color::Rgb(180, 83, 9),
            BadgeVariant::Violet => Color::Rgb(109, 40, 217),
            BadgeVariant::Sky => Color::Rgb(3, 105, 161),
            BadgeVariant::Rose => Color::Rgb(190, 18, 60),
            BadgeVariant::Slate => Color::Rgb(51, 65, 85),
        }
    }

    /// Fill color for a badge of this variant.
    pub fn background(&self) -> Color {
        match self {
            BadgeVariant::Emerald => Color::Rgb(236, 253, 245),
            BadgeVariant::Amber => Color::Rgb(255, 251, 235),
            BadgeVariant::Violet => Color::Rgb(245, 243, 255),
            BadgeVariant::Sky => Color::Rgb(240, 249, 255),
            BadgeVariant::Rose => Color::Rgb(255, 241, 242),
            BadgeVariant::Slate => Color::Rgb(248, 250, 252),
        }
    }
}
