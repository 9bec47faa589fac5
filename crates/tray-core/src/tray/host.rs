//! Surface the tray is presented on

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::primitives::Rectangle;

/// Space taken by system chrome at the screen edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Insets {
    pub top: u32,
    pub bottom: u32,
}

/// Appearance of the host's status and navigation bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SystemBars {
    pub light_status_icons: bool,
    pub light_navigation_icons: bool,
    /// Color drawn behind the navigation bar, `None` for transparent
    pub navigation_scrim: Option<Rgb565>,
}

/// Window the tray draws into.
///
/// The tray saves the current bar appearance when presented and restores it
/// on teardown.
pub trait HostSurface {
    /// Full drawable area of the surface
    fn bounds(&self) -> Rectangle;

    /// System chrome insets. The sheet keeps its content clear of the
    /// bottom inset while drawing behind it.
    fn insets(&self) -> Insets {
        Insets::default()
    }

    /// Let content draw behind the system bars
    fn set_edge_to_edge(&mut self, enabled: bool);

    fn system_bars(&self) -> SystemBars;

    fn set_system_bars(&mut self, bars: SystemBars);
}
