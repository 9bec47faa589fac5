//! Color definitions, semantic tokens and palette management
//!
//! This module provides the color system of the design system based on
//! RGB565 format, optimized for embedded displays with 16-bit color depth.
//!
//! # RGB565 Format
//! - Red: 5 bits (0-31)
//! - Green: 6 bits (0-63)
//! - Blue: 5 bits (0-31)
//!
//! To convert from 8-bit RGB: R>>3, G>>2, B>>3

use embedded_graphics::pixelcolor::Rgb565;
use serde::{Deserialize, Serialize};

// ============================================================================
// Base Colors
// ============================================================================

/// Dark surface - near-black blue used behind sheets
pub const COLOR_BACKGROUND: Rgb565 = Rgb565::new(18 >> 3, 23 >> 2, 24 >> 3);

/// Raised surface - slightly lighter than background
pub const COLOR_SURFACE: Rgb565 = Rgb565::new(26 >> 3, 32 >> 2, 33 >> 3);

/// Border/stroke color - medium gray
pub const COLOR_STROKE: Rgb565 = Rgb565::new(43 >> 3, 55 >> 2, 57 >> 3);

/// Subtle stroke used on light surfaces
pub const COLOR_STROKE_LIGHT: Rgb565 = Rgb565::new(224 >> 3, 228 >> 2, 232 >> 3);

/// Neutral shadow - used for elevation gradients
pub const COLOR_SHADOW: Rgb565 = Rgb565::new(8 >> 3, 10 >> 2, 12 >> 3);

/// Neutral shadow on light themes
pub const COLOR_SHADOW_LIGHT: Rgb565 = Rgb565::new(176 >> 3, 180 >> 2, 186 >> 3);

/// Accent - bright teal-green
pub const COLOR_ACCENT: Rgb565 = Rgb565::new(95 >> 3, 185 >> 2, 141 >> 3);

/// Secondary accent - moderate green
pub const COLOR_ACCENT_MUTED: Rgb565 = Rgb565::new(76 >> 3, 154 >> 2, 113 >> 3);

/// Error - muted red
pub const COLOR_ERROR: Rgb565 = Rgb565::new(190 >> 3, 95 >> 2, 95 >> 3);

// ============================================================================
// Text Colors
// ============================================================================

/// Pure white - maximum brightness in RGB565
pub const WHITE: Rgb565 = Rgb565::new(31, 63, 31);

/// Light gray - for secondary text
pub const LIGHT_GRAY: Rgb565 = Rgb565::new(21, 42, 21);

/// Medium gray - for disabled or tertiary text
pub const GRAY: Rgb565 = Rgb565::new(16, 32, 16);

/// Dark gray - for subtle text
pub const DARK_GRAY: Rgb565 = Rgb565::new(10, 20, 10);

/// Color used when a token cannot be resolved
pub const FALLBACK_COLOR: Rgb565 = Rgb565::new(31, 0, 31);

// ============================================================================
// Semantic Tokens
// ============================================================================

/// Symbolic color reference resolved through a [`ColorPalette`].
///
/// Components never hard-code colors; they ask for a token and let the
/// active palette decide. `Custom` tokens come from external style sheets
/// and have no palette entry, so they always resolve to the fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorToken {
    PrimaryBackground,
    PrimaryForeground,
    SecondaryForeground,
    TertiaryForeground,
    NeutralShadow,
    SubtleStroke,
    Scrim,
    Accent,
    Custom(u16),
}

// ============================================================================
// Color Palette
// ============================================================================

/// A cohesive color palette for consistent UI theming.
///
/// # Examples
///
/// ```ignore
/// let palette = ColorPalette::default();
/// let sheet_fill = palette.token(ColorToken::PrimaryBackground);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorPalette {
    /// Primary accent color - used for key interactive elements
    pub primary: Rgb565,

    /// Secondary accent color - used for less prominent actions
    pub secondary: Rgb565,

    /// Backdrop behind modal surfaces
    pub background: Rgb565,

    /// Surface color for sheets, cards and panels
    pub surface: Rgb565,

    /// Error and alert color
    pub error: Rgb565,

    /// Primary text color - high contrast
    pub text_primary: Rgb565,

    /// Secondary text color
    pub text_secondary: Rgb565,

    /// Tertiary text color, also used for the drag handle
    pub text_tertiary: Rgb565,

    /// Border color for separators and outlines
    pub border: Rgb565,

    /// Elevation shadow color
    pub shadow: Rgb565,
}

impl Default for ColorPalette {
    /// Returns the default dark theme palette
    fn default() -> Self {
        Self::dark()
    }
}

impl ColorPalette {
    /// Creates a dark theme palette (default)
    pub fn dark() -> Self {
        Self {
            primary: COLOR_ACCENT,
            secondary: COLOR_ACCENT_MUTED,
            background: COLOR_BACKGROUND,
            surface: COLOR_SURFACE,
            error: COLOR_ERROR,
            text_primary: WHITE,
            text_secondary: LIGHT_GRAY,
            text_tertiary: GRAY,
            border: COLOR_STROKE,
            shadow: COLOR_SHADOW,
        }
    }

    /// Creates a light theme palette
    pub fn light() -> Self {
        Self {
            primary: COLOR_ACCENT,
            secondary: COLOR_ACCENT_MUTED,
            background: LIGHT_GRAY,
            surface: WHITE,
            error: COLOR_ERROR,
            text_primary: COLOR_BACKGROUND,
            text_secondary: DARK_GRAY,
            text_tertiary: GRAY,
            border: COLOR_STROKE_LIGHT,
            shadow: COLOR_SHADOW_LIGHT,
        }
    }

    /// Look up a semantic token. Returns `None` for tokens this palette
    /// does not define.
    pub fn token(&self, token: ColorToken) -> Option<Rgb565> {
        match token {
            ColorToken::PrimaryBackground => Some(self.surface),
            ColorToken::PrimaryForeground => Some(self.text_primary),
            ColorToken::SecondaryForeground => Some(self.text_secondary),
            ColorToken::TertiaryForeground => Some(self.text_tertiary),
            ColorToken::NeutralShadow => Some(self.shadow),
            ColorToken::SubtleStroke => Some(self.border),
            ColorToken::Scrim => Some(self.background),
            ColorToken::Accent => Some(self.primary),
            ColorToken::Custom(_) => None,
        }
    }
}
