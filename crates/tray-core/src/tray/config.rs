//! Tray configuration value object

use alloc::vec::Vec;
use heapless::String;
use log::warn;
use serde::{Deserialize, Serialize};

use super::{TrayError, TrayResult};
use crate::ui::components::text::bounded;
use crate::ui::{ColorToken, TypographyToken};

/// Maximum characters kept from a title.
pub const MAX_TITLE_LEN: usize = 64;

/// Maximum number of snap points per configuration.
pub const MAX_SNAP_POINTS: usize = 8;

/// Everything the caller decides about a tray before presenting it.
///
/// Snap points are resting heights in pixels, kept in the caller's order.
/// Values that are not positive or exceed the measured sheet height are
/// ignored at runtime rather than rejected here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrayConfiguration {
    pub title: Option<String<MAX_TITLE_LEN>>,
    pub show_drag_handle: bool,
    pub show_footer: bool,
    pub has_shadow: bool,
    pub has_stroke: bool,
    pub snap_points: heapless::Vec<i32, MAX_SNAP_POINTS>,
    pub cancelable_on_outside_touch: bool,
    pub animate: bool,
    pub title_text_style: TypographyToken,
    pub title_text_color: ColorToken,
}

impl Default for TrayConfiguration {
    fn default() -> Self {
        Self {
            title: None,
            show_drag_handle: true,
            show_footer: true,
            has_shadow: true,
            has_stroke: true,
            snap_points: heapless::Vec::new(),
            cancelable_on_outside_touch: true,
            animate: true,
            title_text_style: TypographyToken::Heading,
            title_text_color: ColorToken::PrimaryForeground,
        }
    }
}

impl TrayConfiguration {
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(bounded(title));
        self
    }

    pub fn with_drag_handle(mut self, show: bool) -> Self {
        self.show_drag_handle = show;
        self
    }

    pub fn with_footer(mut self, show: bool) -> Self {
        self.show_footer = show;
        self
    }

    pub fn with_shadow(mut self, enabled: bool) -> Self {
        self.has_shadow = enabled;
        self
    }

    pub fn with_stroke(mut self, enabled: bool) -> Self {
        self.has_stroke = enabled;
        self
    }

    /// Replace the snap points.
    ///
    /// # Errors
    /// `SnapCapacityExceeded` if more than [`MAX_SNAP_POINTS`] are given.
    pub fn with_snap_points(mut self, points: &[i32]) -> TrayResult<Self> {
        self.snap_points = heapless::Vec::from_slice(points).map_err(|_| {
            TrayError::SnapCapacityExceeded {
                max: MAX_SNAP_POINTS,
            }
        })?;
        Ok(self)
    }

    pub fn with_cancelable_on_outside_touch(mut self, cancelable: bool) -> Self {
        self.cancelable_on_outside_touch = cancelable;
        self
    }

    pub fn with_animation(mut self, animate: bool) -> Self {
        self.animate = animate;
        self
    }

    pub fn with_title_style(mut self, style: TypographyToken, color: ColorToken) -> Self {
        self.title_text_style = style;
        self.title_text_color = color;
        self
    }

    /// Title text, treating an empty title like no title.
    pub fn visible_title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.is_empty())
    }

    /// Encode as a compact postcard blob, e.g. for storing presets.
    pub fn to_bytes(&self) -> TrayResult<Vec<u8>> {
        postcard::to_allocvec(self).map_err(|e| {
            warn!("Failed to encode tray configuration: {:?}", e);
            TrayError::ConfigEncode
        })
    }

    /// Decode a blob produced by [`TrayConfiguration::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> TrayResult<Self> {
        postcard::from_bytes(bytes).map_err(|e| {
            warn!("Failed to decode tray configuration: {:?}", e);
            TrayError::ConfigDecode
        })
    }
}
