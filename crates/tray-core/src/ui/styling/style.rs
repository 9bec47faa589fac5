//! Style configuration for UI elements
//!
//! Provides the core `Style` struct, button variants, and typography tokens
//! that describe the visual appearance of components.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::primitives::{PrimitiveStyle, PrimitiveStyleBuilder};
use serde::{Deserialize, Serialize};

use super::colors::{ColorPalette, WHITE};
use super::layout::Padding;
use crate::ui::components::TextSize;

// ============================================================================
// Style
// ============================================================================

/// Visual style configuration for a UI element
///
/// # Examples
///
/// ```ignore
/// let card_style = Style::new()
///     .with_background(COLOR_SURFACE)
///     .with_border(COLOR_STROKE, 1)
///     .with_padding(Padding::symmetric(8, 8));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    /// Background fill color (if any)
    pub background_color: Option<Rgb565>,

    /// Foreground/text color (if any)
    pub foreground_color: Option<Rgb565>,

    /// Border color (if any)
    pub border_color: Option<Rgb565>,

    /// Border width in pixels (0 = no border)
    pub border_width: u32,

    /// Internal padding around content
    pub padding: Padding,
}

impl Default for Style {
    /// Returns a minimal default style with white text and no background or border
    fn default() -> Self {
        Self {
            background_color: None,
            foreground_color: Some(WHITE),
            border_color: None,
            border_width: 0,
            padding: Padding::default(),
        }
    }
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_background(mut self, color: Rgb565) -> Self {
        self.background_color = Some(color);
        self
    }

    pub fn with_foreground(mut self, color: Rgb565) -> Self {
        self.foreground_color = Some(color);
        self
    }

    /// Sets the border color and width. A width of 0 disables the border.
    pub fn with_border(mut self, color: Rgb565, width: u32) -> Self {
        self.border_color = Some(color);
        self.border_width = width;
        self
    }

    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    /// Converts this style to a `PrimitiveStyle` for embedded-graphics drawing
    pub fn to_primitive_style(&self) -> PrimitiveStyle<Rgb565> {
        let mut builder = PrimitiveStyleBuilder::new();

        if let Some(bg) = self.background_color {
            builder = builder.fill_color(bg);
        }

        if let Some(border) = self.border_color
            && self.border_width > 0
        {
            builder = builder.stroke_color(border).stroke_width(self.border_width);
        }

        builder.build()
    }
}

// ============================================================================
// Button Variants
// ============================================================================

/// Predefined button style variants
///
/// Each variant derives its colors from the active palette.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ButtonVariant {
    /// Primary action button - most prominent, used for main actions
    Primary,

    /// Secondary action button - less prominent than primary
    Secondary,

    /// Outlined button - subtle emphasis with border
    Outline,

    /// Text-only button - minimal visual weight
    Text,
}

impl ButtonVariant {
    /// Converts the variant to a concrete style based on a color palette
    pub fn to_style(&self, palette: &ColorPalette) -> Style {
        match self {
            ButtonVariant::Primary => Style::new()
                .with_background(palette.primary)
                .with_foreground(WHITE)
                .with_padding(Padding::symmetric(8, 16)),

            ButtonVariant::Secondary => Style::new()
                .with_background(palette.secondary)
                .with_foreground(WHITE)
                .with_padding(Padding::symmetric(8, 16)),

            ButtonVariant::Outline => Style::new()
                .with_background(palette.surface)
                .with_foreground(palette.text_primary)
                .with_border(palette.border, 1)
                .with_padding(Padding::symmetric(8, 16)),

            ButtonVariant::Text => Style::new()
                .with_foreground(palette.primary)
                .with_padding(Padding::symmetric(4, 8)),
        }
    }
}

// ============================================================================
// Typography
// ============================================================================

/// Symbolic text style reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypographyToken {
    Heading,
    Body,
    Caption,
}

impl TypographyToken {
    pub fn text_size(&self) -> TextSize {
        match self {
            TypographyToken::Heading => TextSize::Large,
            TypographyToken::Body => TextSize::Medium,
            TypographyToken::Caption => TextSize::Small,
        }
    }
}
