//! Styling system for UI elements
//!
//! This module provides the styling framework including:
//! - Color definitions, semantic tokens and palettes
//! - Token resolution with a per-instance cache
//! - Padding
//! - Style configuration, button variants and typography tokens
//! - The tray theme
//!
//! # Organization
//!
//! - [`colors`] - Color constants, tokens and palette management
//! - [`resolver`] - Cached token-to-color lookup
//! - [`layout`] - Padding
//! - [`style`] - Style configuration, button variants, typography
//! - [`theme`] - Palette and sheet corner radius
//!
//! # Examples
//!
//! ```ignore
//! use ui::styling::*;
//!
//! let theme = Theme::default();
//! let mut resolver = ColorResolver::new(theme.palette);
//! let fill = resolver.resolve(ColorToken::PrimaryBackground);
//! let button_style = ButtonVariant::Primary.to_style(&theme.palette);
//! ```

pub mod colors;
pub mod layout;
pub mod resolver;
pub mod style;
pub mod theme;

pub use colors::{
    COLOR_BACKGROUND, COLOR_STROKE, COLOR_SURFACE, ColorPalette, ColorToken, DARK_GRAY,
    FALLBACK_COLOR, GRAY, LIGHT_GRAY, WHITE,
};
pub use layout::Padding;
pub use resolver::ColorResolver;
pub use style::{ButtonVariant, Style, TypographyToken};
pub use theme::{SHEET_CORNER_RADIUS_PX, Theme};
