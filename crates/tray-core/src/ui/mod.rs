// src/ui/mod.rs
//! Tray UI System - design-system widgets for embedded displays
//!
//! This module provides the building blocks the tray is composed from:
//! - Core traits for drawable and touchable elements
//! - A vertical/horizontal layout container with flexible sizing
//! - Styled components (buttons, text, the standard footer)
//! - Token-based color resolution and themes
//! - Dirty region tracking for efficient rendering

pub mod components;
pub mod core;
pub mod elements;
pub mod layouts;
pub mod styling;

/// Width of the reference display in pixels.
pub const DISPLAY_WIDTH_PX: u16 = 320;

/// Height of the reference display in pixels.
pub const DISPLAY_HEIGHT_PX: u16 = 240;

// Re-export commonly used items
pub use components::{
    Button, FOOTER_HEIGHT_PX, Footer, FooterButton, FooterType, MultiLineText, TextComponent,
    TextSize,
};
pub use self::core::{
    Action, DirtyRegion, Drawable, TouchEvent, TouchPoint, TouchResult, Touchable,
};
pub use elements::{Element, View, ViewId};
pub use layouts::{Container, LayoutError};
pub use styling::{
    ButtonVariant, ColorPalette, ColorResolver, ColorToken, Padding, Style, Theme,
    TypographyToken,
};
