//! Modal bottom tray
//!
//! A sheet that slides up from the bottom edge of the host surface. It is
//! composed from a few cooperating parts:
//!
//! - [`BackgroundComposer`]: cached sheet background (top-rounded fill,
//!   optional shadow band, optional outline stroke)
//! - [`DragHandleRenderer`]: the small grab handle at the top of the sheet
//! - [`SlotComposer`]: title, content and footer slots in a vertical layout
//! - [`SheetBehavior`]: drag/settle state machine with snap points
//! - [`ModalTray`]: the orchestrator that owns configuration, presents the
//!   sheet on a [`HostSurface`] and reports to a [`TrayDelegate`]
//!
//! Everything runs on the UI loop. Work that would be asynchronous on a
//! larger toolkit (peek requests, `on_show`, teardown) is deferred to the
//! next [`ModalTray::update`] call.
//!
//! # Examples
//!
//! ```ignore
//! use tray_core::tray::*;
//! use tray_core::ui::{Element, TextSize, View, ViewId};
//!
//! let config = TrayConfiguration::default()
//!     .with_title("Pilih Pekan")
//!     .with_footer(false)
//!     .with_snap_points(&[120, 200])?;
//!
//! let mut tray = ModalTray::new(config);
//! tray.set_content(View::new(ViewId(1), Element::text(bounds, "Minggu 12", TextSize::Medium)))?;
//! tray.present(&mut host, "week-picker")?;
//!
//! // every frame
//! tray.update(&mut host, elapsed_ms);
//! tray.draw(&mut framebuffer)?;
//! ```

use thiserror_no_std::Error;

use crate::ui::LayoutError;

mod background;
mod behavior;
mod config;
mod delegate;
mod drag_handle;
mod host;
mod modal;
mod slots;
mod state;

pub use background::{BackgroundComposer, BackgroundKey, SHADOW_INSET_PX, SheetBackground};
pub use behavior::{BehaviorEvent, DISMISS_THRESHOLD, SETTLE_SPEED_PX_PER_MS, SheetBehavior};
pub use config::{MAX_SNAP_POINTS, MAX_TITLE_LEN, TrayConfiguration};
pub use delegate::{NoopDelegate, TrayDelegate};
pub use drag_handle::{
    DragHandle, DragHandleRenderer, HANDLE_BAND_HEIGHT_PX, HANDLE_HEIGHT_PX, HANDLE_WIDTH_PX,
};
pub use host::{HostSurface, Insets, SystemBars};
pub use modal::{Lifecycle, ModalTray};
pub use slots::SlotComposer;
pub use state::{PresentationState, SheetPhase};

/// Error types for tray operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrayError {
    /// The tray was dismissed and its presentation binding released
    #[error("Tray has been torn down")]
    TornDown,

    /// The presentation binding does not exist yet
    #[error("Tray has not been presented")]
    NotPresented,

    /// More snap points than a configuration can hold
    #[error("Snap point capacity exceeded (max: {max})")]
    SnapCapacityExceeded {
        /// Maximum allowed snap points
        max: usize,
    },

    /// A stored configuration blob could not be decoded
    #[error("Failed to decode tray configuration")]
    ConfigDecode,

    /// A configuration could not be encoded
    #[error("Failed to encode tray configuration")]
    ConfigEncode,

    /// Slot layout rejected a child
    #[error("Layout error: {0}")]
    Layout(LayoutError),
}

impl From<LayoutError> for TrayError {
    fn from(err: LayoutError) -> Self {
        TrayError::Layout(err)
    }
}

/// Result type for tray operations
pub type TrayResult<T> = Result<T, TrayError>;
