//! Lifecycle callbacks

use super::SheetPhase;

/// Receives tray lifecycle events. Every method defaults to doing nothing.
///
/// Callbacks fire from inside `ModalTray` calls on the UI loop, in order:
/// `on_show` once after the first measure, `on_state_changed` for every
/// phase change, `on_slide` for every frame of movement and finally
/// `on_dismiss` once, after `on_state_changed(Hidden)`.
pub trait TrayDelegate {
    fn on_show(&mut self) {}

    fn on_dismiss(&mut self) {}

    fn on_state_changed(&mut self, _phase: SheetPhase) {}

    fn on_slide(&mut self, _offset: f32) {}
}

/// Delegate that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopDelegate;

impl TrayDelegate for NoopDelegate {}
