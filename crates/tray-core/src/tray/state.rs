//! Presentation phase and per-presentation state

use serde::{Deserialize, Serialize};

/// Phase of the sheet's gesture/animation state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SheetPhase {
    /// Not visible
    Hidden,
    /// Finger down, sheet follows the touch
    Dragging,
    /// Animating toward a resting height
    Settling,
    /// Resting at a snap point below full height
    PartiallyExpanded,
    /// Resting at full height
    Expanded,
}

impl SheetPhase {
    /// Whether the sheet is at rest on screen.
    pub fn is_resting(&self) -> bool {
        matches!(self, SheetPhase::PartiallyExpanded | SheetPhase::Expanded)
    }
}

/// Mutable state of one show/dismiss cycle.
///
/// `slide_offset` is 0 at the collapsed (peek) height, 1 fully expanded and
/// negative while sliding below the peek height toward hidden (-1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresentationState {
    pub phase: SheetPhase,
    pub slide_offset: f32,
    pub active_snap_index: Option<usize>,
}

impl Default for PresentationState {
    fn default() -> Self {
        Self {
            phase: SheetPhase::Hidden,
            slide_offset: -1.0,
            active_snap_index: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_hidden() {
        let state = PresentationState::default();
        assert_eq!(state.phase, SheetPhase::Hidden);
        assert_eq!(state.slide_offset, -1.0);
        assert!(state.active_snap_index.is_none());
        assert!(!state.phase.is_resting());
    }
}
