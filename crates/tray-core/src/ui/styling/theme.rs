//! Tray theme: the palette plus the sheet's corner radius.

use super::colors::ColorPalette;

/// Corner radius of the sheet's top edge.
pub const SHEET_CORNER_RADIUS_PX: u32 = 16;

/// Theme handed to the tray when it is created
///
/// # Examples
///
/// ```ignore
/// let tray = ModalTray::new(config).with_theme(Theme::light());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub palette: ColorPalette,
    pub sheet_corner_radius: u32,
}

impl Default for Theme {
    /// Dark mode
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            palette: ColorPalette::dark(),
            sheet_corner_radius: SHEET_CORNER_RADIUS_PX,
        }
    }

    pub fn light() -> Self {
        Self {
            palette: ColorPalette::light(),
            sheet_corner_radius: SHEET_CORNER_RADIUS_PX,
        }
    }
}
