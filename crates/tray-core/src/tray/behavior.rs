//! Sheet gesture and settle state machine
//!
//! Heights are in pixels of visible sheet, measured up from the bottom edge
//! of the host. `full_height` (H) is the measured sheet height and the peek
//! height (P) is the smallest usable snap point, or H/2 without snap points.
//! The slide offset maps visible height `h` onto `[-1, 1]`:
//!
//! - `h >= P`: `(h - P) / (H - P)`, 0 at the peek and 1 fully expanded
//! - `h < P`: `(h - P) / P`, reaching -1 when hidden
//!
//! Snapping is "forward": on release the sheet settles at the first snap
//! point, in configured order, whose share of H is at least the current
//! visible share. It never falls back to a lower point the finger has
//! already passed.

use alloc::collections::VecDeque;

use log::debug;

use super::config::{MAX_SNAP_POINTS, TrayConfiguration};
use super::state::{PresentationState, SheetPhase};

/// Released below this slide offset, the sheet dismisses.
pub const DISMISS_THRESHOLD: f32 = -0.5;

/// Settle animation speed.
pub const SETTLE_SPEED_PX_PER_MS: u32 = 2;

/// Event produced by the behavior, forwarded to the tray delegate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BehaviorEvent {
    Slide(f32),
    StateChanged(SheetPhase),
}

struct DragAnchor {
    touch_y: i32,
    visible: u32,
}

pub struct SheetBehavior {
    snap_points: heapless::Vec<i32, MAX_SNAP_POINTS>,
    draggable: bool,
    animate: bool,
    full_height: u32,
    visible: u32,
    target: u32,
    state: PresentationState,
    pending_snap: Option<usize>,
    anchor: Option<DragAnchor>,
    events: VecDeque<BehaviorEvent>,
}

impl SheetBehavior {
    pub fn new(config: &TrayConfiguration) -> Self {
        Self {
            snap_points: config.snap_points.clone(),
            draggable: config.show_drag_handle,
            animate: config.animate,
            full_height: 0,
            visible: 0,
            target: 0,
            state: PresentationState::default(),
            pending_snap: None,
            anchor: None,
            events: VecDeque::new(),
        }
    }

    pub fn state(&self) -> &PresentationState {
        &self.state
    }

    pub fn phase(&self) -> SheetPhase {
        self.state.phase
    }

    pub fn slide_offset(&self) -> f32 {
        self.state.slide_offset
    }

    pub fn visible_height(&self) -> u32 {
        self.visible
    }

    pub fn full_height(&self) -> u32 {
        self.full_height
    }

    /// Height the sheet is currently settling toward.
    pub fn target_height(&self) -> u32 {
        self.target
    }

    pub fn is_draggable(&self) -> bool {
        self.draggable
    }

    /// Enable or disable dragging. Disabling mid-drag settles the sheet as
    /// if the finger was lifted.
    pub fn set_draggable(&mut self, draggable: bool) {
        self.draggable = draggable;
        if !draggable && self.state.phase == SheetPhase::Dragging {
            self.release();
        }
    }

    /// Peek (collapsed) height for the current measurement.
    pub fn peek_height(&self) -> u32 {
        self.valid_snaps()
            .map(|(_, px)| px)
            .min()
            .unwrap_or(self.full_height / 2)
    }

    /// Update the measured sheet height.
    pub fn set_full_height(&mut self, height: u32) {
        if self.full_height == height {
            return;
        }
        debug!("Sheet measured at {}px (was {}px)", height, self.full_height);
        let was_full = self.target == self.full_height;
        self.full_height = height;

        match self.state.phase {
            SheetPhase::Hidden => {}
            SheetPhase::Expanded => {
                self.target = height;
                self.set_visible(height);
            }
            SheetPhase::Settling if was_full && self.target != 0 => self.target = height,
            _ => {
                self.target = self.target.min(height);
                self.set_visible(self.visible.min(height));
            }
        }
        if self.state.phase == SheetPhase::Hidden {
            return;
        }

        // Snap indices only ever refer to points within the measured height.
        self.state.active_snap_index = self
            .state
            .active_snap_index
            .filter(|index| self.is_usable_snap(*index));
        self.pending_snap = self.pending_snap.filter(|index| self.is_usable_snap(*index));

        // The peek height may have moved with the measurement.
        self.state.slide_offset = self.offset_for(self.visible);

        if self.state.phase == SheetPhase::PartiallyExpanded && self.target >= height {
            self.finish_settle();
        }
    }

    /// Begin presenting: `Hidden -> Settling` toward the first usable snap
    /// point, or full height without one.
    pub fn start(&mut self) {
        if self.state.phase != SheetPhase::Hidden {
            debug!("Behavior already started");
            return;
        }
        let first = self.valid_snaps().next();
        self.state.active_snap_index = first.map(|(index, _)| index);
        let target = first.map_or(self.full_height, |(_, px)| px);
        self.settle_to(target);
    }

    /// Settle to hidden. Returns `false` when already hidden or hiding.
    pub fn dismiss(&mut self) -> bool {
        if self.state.phase == SheetPhase::Hidden
            || (self.state.phase == SheetPhase::Settling && self.target == 0)
        {
            return false;
        }
        self.anchor = None;
        self.pending_snap = None;
        self.settle_to(0);
        true
    }

    /// Finger down on the sheet. Returns whether a drag started.
    pub fn press(&mut self, y: i32) -> bool {
        if !self.draggable || !self.state.phase.is_resting() {
            return false;
        }
        self.anchor = Some(DragAnchor {
            touch_y: y,
            visible: self.visible,
        });
        self.set_phase(SheetPhase::Dragging);
        true
    }

    /// Finger moved while dragging.
    pub fn drag_to(&mut self, y: i32) {
        let Some(anchor) = &self.anchor else {
            return;
        };
        let visible = (anchor.visible as i32 + (anchor.touch_y - y)).clamp(0, self.full_height as i32);
        self.set_visible(visible as u32);

        if let Some((index, _)) = self.snap_at_or_above(self.visible) {
            self.pending_snap = Some(index);
        }
    }

    /// Finger lifted; also used for host interruptions.
    pub fn release(&mut self) {
        if self.anchor.take().is_none() {
            return;
        }

        if self.state.slide_offset < DISMISS_THRESHOLD {
            debug!("Released at {:.2}, dismissing", self.state.slide_offset);
            self.pending_snap = None;
            self.settle_to(0);
            return;
        }

        let target = if self.valid_snaps().next().is_none() {
            let peek = self.peek_height();
            if self.visible.abs_diff(peek) < self.visible.abs_diff(self.full_height) {
                peek
            } else {
                self.full_height
            }
        } else {
            let snap = self.snap_at_or_above(self.visible);
            self.state.active_snap_index = snap.map(|(index, _)| index);
            snap.map_or(self.full_height, |(_, px)| px)
        };
        self.pending_snap = None;
        self.settle_to(target);
    }

    /// Gesture interrupted by the host; handled like a release.
    pub fn cancel(&mut self) {
        self.release();
    }

    /// Advance one frame: apply a posted snap request and move toward the
    /// settle target.
    pub fn advance(&mut self, elapsed_ms: u32) {
        if let Some(index) = self.pending_snap.take() {
            debug!("Peek target -> snap point {}", index);
            self.state.active_snap_index = Some(index);
        }

        if self.state.phase != SheetPhase::Settling {
            return;
        }

        let step = SETTLE_SPEED_PX_PER_MS.saturating_mul(elapsed_ms);
        let next = if self.visible < self.target {
            self.visible.saturating_add(step).min(self.target)
        } else {
            self.visible.saturating_sub(step).max(self.target)
        };
        self.set_visible(next);

        if self.visible == self.target {
            self.finish_settle();
        }
    }

    /// Next queued event, oldest first.
    pub fn pop_event(&mut self) -> Option<BehaviorEvent> {
        self.events.pop_front()
    }

    fn settle_to(&mut self, target: u32) {
        self.target = target.min(self.full_height);
        self.set_phase(SheetPhase::Settling);
        if !self.animate {
            self.set_visible(self.target);
            self.finish_settle();
        }
    }

    fn finish_settle(&mut self) {
        let phase = if self.target == 0 {
            self.state.active_snap_index = None;
            SheetPhase::Hidden
        } else if self.target >= self.full_height {
            SheetPhase::Expanded
        } else {
            SheetPhase::PartiallyExpanded
        };
        self.set_phase(phase);
    }

    fn set_phase(&mut self, phase: SheetPhase) {
        if self.state.phase != phase {
            debug!("Sheet {:?} -> {:?}", self.state.phase, phase);
            self.state.phase = phase;
            self.emit(BehaviorEvent::StateChanged(phase));
        }
    }

    fn set_visible(&mut self, visible: u32) {
        if self.visible != visible {
            self.visible = visible;
            self.state.slide_offset = self.offset_for(visible);
            self.emit(BehaviorEvent::Slide(self.state.slide_offset));
        }
    }

    fn offset_for(&self, visible: u32) -> f32 {
        if self.full_height == 0 {
            return -1.0;
        }
        let h = visible as f32;
        let full = self.full_height as f32;
        let peek = self.peek_height() as f32;

        if h >= peek {
            if self.full_height == self.peek_height() {
                1.0
            } else {
                (h - peek) / (full - peek)
            }
        } else {
            (h - peek) / peek
        }
    }

    /// Snap points usable at the current height, with their original index.
    fn valid_snaps(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        let full = self.full_height;
        self.snap_points
            .iter()
            .enumerate()
            .filter(move |(_, px)| **px > 0 && **px as u32 <= full)
            .map(|(index, px)| (index, *px as u32))
    }

    fn is_usable_snap(&self, index: usize) -> bool {
        self.valid_snaps().any(|(usable, _)| usable == index)
    }

    /// First usable snap point, in configured order, whose normalized height
    /// is at least the normalized `visible` height.
    fn snap_at_or_above(&self, visible: u32) -> Option<(usize, u32)> {
        if self.full_height == 0 {
            return None;
        }
        let full = self.full_height as f32;
        let current = visible as f32 / full;
        self.valid_snaps()
            .find(|(_, px)| *px as f32 / full >= current)
    }

    /// Queue an event. Consecutive slides collapse into the latest offset;
    /// state changes are always kept.
    fn emit(&mut self, event: BehaviorEvent) {
        if let (BehaviorEvent::Slide(offset), Some(BehaviorEvent::Slide(queued))) =
            (event, self.events.back_mut())
        {
            *queued = offset;
            return;
        }
        self.events.push_back(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn behavior(snaps: &[i32], draggable: bool, animate: bool, height: u32) -> SheetBehavior {
        let config = TrayConfiguration::default()
            .with_drag_handle(draggable)
            .with_animation(animate)
            .with_snap_points(snaps)
            .unwrap();
        let mut b = SheetBehavior::new(&config);
        b.set_full_height(height);
        b
    }

    fn events(b: &mut SheetBehavior) -> Vec<BehaviorEvent> {
        core::iter::from_fn(|| b.pop_event()).collect()
    }

    #[test]
    fn test_jump_start_emits_settling_slide_and_rest() {
        let mut b = behavior(&[], true, false, 200);
        b.start();

        assert_eq!(
            events(&mut b),
            [
                BehaviorEvent::StateChanged(SheetPhase::Settling),
                BehaviorEvent::Slide(1.0),
                BehaviorEvent::StateChanged(SheetPhase::Expanded),
            ]
        );
        assert_eq!(b.visible_height(), 200);
    }

    #[test]
    fn test_animated_settle_moves_per_frame() {
        let mut b = behavior(&[], true, true, 100);
        b.start();
        assert_eq!(b.phase(), SheetPhase::Settling);

        b.advance(20);
        assert_eq!(b.visible_height(), 40);
        assert_eq!(b.phase(), SheetPhase::Settling);

        b.advance(40);
        assert_eq!(b.visible_height(), 100);
        assert_eq!(b.phase(), SheetPhase::Expanded);
        assert_eq!(b.slide_offset(), 1.0);
    }

    #[test]
    fn test_starts_at_first_configured_snap_point() {
        let mut b = behavior(&[300, 100], true, false, 400);
        b.start();

        assert_eq!(b.visible_height(), 300);
        assert_eq!(b.phase(), SheetPhase::PartiallyExpanded);
        assert_eq!(b.state().active_snap_index, Some(0));
        assert_eq!(b.peek_height(), 100);
    }

    #[test]
    fn test_release_snaps_forward_not_nearest() {
        let mut b = behavior(&[100, 300, 600], true, false, 600);
        b.start();
        assert_eq!(b.visible_height(), 100);

        assert!(b.press(200));
        b.drag_to(50);
        assert_eq!(b.visible_height(), 250);
        b.release();

        assert_eq!(b.visible_height(), 300);
        assert_eq!(b.phase(), SheetPhase::PartiallyExpanded);
        assert_eq!(b.state().active_snap_index, Some(1));
    }

    #[test]
    fn test_release_near_top_settles_fully_expanded() {
        let mut b = behavior(&[200, 500], true, false, 500);
        b.start();

        assert!(b.press(300));
        b.drag_to(50);
        assert_eq!(b.visible_height(), 450);
        b.release();

        assert_eq!(b.target_height(), 500);
        assert_eq!(b.phase(), SheetPhase::Expanded);
        assert_eq!(b.slide_offset(), 1.0);
    }

    #[test]
    fn test_snap_request_applies_on_next_frame() {
        let mut b = behavior(&[100, 300, 600], true, false, 600);
        b.start();
        b.press(200);
        b.drag_to(50);
        assert_eq!(b.state().active_snap_index, Some(0));

        b.advance(0);
        assert_eq!(b.state().active_snap_index, Some(1));
        assert_eq!(b.phase(), SheetPhase::Dragging);
    }

    #[test]
    fn test_no_handle_means_no_drag() {
        let mut b = behavior(&[], false, false, 200);
        b.start();
        events(&mut b);

        assert!(!b.press(100));
        b.drag_to(190);
        b.release();

        assert_eq!(b.phase(), SheetPhase::Expanded);
        assert_eq!(b.visible_height(), 200);
        assert!(events(&mut b).is_empty());
    }

    #[test]
    fn test_drag_below_threshold_dismisses() {
        let mut b = behavior(&[100], true, false, 200);
        b.start();
        b.press(100);
        b.drag_to(170);
        assert_eq!(b.visible_height(), 30);
        assert!(b.slide_offset() < DISMISS_THRESHOLD);

        b.release();
        assert_eq!(b.phase(), SheetPhase::Hidden);
        assert_eq!(b.visible_height(), 0);
        assert_eq!(b.slide_offset(), -1.0);
    }

    #[test]
    fn test_cancel_settles_like_release() {
        let mut b = behavior(&[], true, true, 200);
        b.start();
        b.advance(100);
        assert_eq!(b.phase(), SheetPhase::Expanded);

        b.press(0);
        b.drag_to(30);
        b.cancel();
        assert_eq!(b.phase(), SheetPhase::Settling);
        assert_eq!(b.target_height(), 200);

        b.advance(100);
        assert_eq!(b.phase(), SheetPhase::Expanded);
    }

    #[test]
    fn test_without_snaps_release_picks_nearer_rest() {
        let mut b = behavior(&[], true, false, 200);
        b.start();
        b.press(0);
        b.drag_to(90);
        b.release();

        assert_eq!(b.peek_height(), 100);
        assert_eq!(b.visible_height(), 100);
        assert_eq!(b.phase(), SheetPhase::PartiallyExpanded);
        assert_eq!(b.slide_offset(), 0.0);
    }

    #[test]
    fn test_unusable_snap_points_are_ignored() {
        let mut b = behavior(&[-5, 0, 900], true, false, 400);
        b.start();

        assert_eq!(b.visible_height(), 400);
        assert_eq!(b.peek_height(), 200);
        assert_eq!(b.state().active_snap_index, None);
    }

    #[test]
    fn test_dismiss_is_reported_once() {
        let mut b = behavior(&[], true, true, 100);
        b.start();
        b.advance(100);
        events(&mut b);

        assert!(b.dismiss());
        assert!(!b.dismiss());
        b.advance(100);
        assert!(!b.dismiss());

        let hidden = events(&mut b)
            .into_iter()
            .filter(|e| *e == BehaviorEvent::StateChanged(SheetPhase::Hidden))
            .count();
        assert_eq!(hidden, 1);
        assert_eq!(b.phase(), SheetPhase::Hidden);
    }

    #[test]
    fn test_shrinking_below_active_snap_expands() {
        let mut b = behavior(&[300], true, false, 400);
        b.start();
        assert_eq!(b.phase(), SheetPhase::PartiallyExpanded);
        assert_eq!(b.state().active_snap_index, Some(0));
        events(&mut b);

        b.set_full_height(200);

        assert_eq!(b.phase(), SheetPhase::Expanded);
        assert_eq!(b.state().active_snap_index, None);
        assert_eq!(b.visible_height(), 200);
        assert_eq!(b.slide_offset(), 1.0);
        assert_eq!(
            events(&mut b),
            [
                BehaviorEvent::Slide(1.0),
                BehaviorEvent::StateChanged(SheetPhase::Expanded),
            ]
        );
    }

    #[test]
    fn test_shrinking_keeps_snap_that_still_fits() {
        let mut b = behavior(&[100, 300], true, false, 400);
        b.start();
        b.set_full_height(250);

        assert_eq!(b.phase(), SheetPhase::PartiallyExpanded);
        assert_eq!(b.state().active_snap_index, Some(0));
        assert_eq!(b.visible_height(), 100);
    }

    #[test]
    fn test_long_drag_keeps_every_state_change() {
        let mut b = behavior(&[], true, false, 200);
        b.start();
        assert!(b.press(0));
        for y in 1..=40 {
            b.drag_to(y);
        }
        b.release();

        let all = events(&mut b);
        let states: Vec<SheetPhase> = all
            .iter()
            .filter_map(|e| match e {
                BehaviorEvent::StateChanged(phase) => Some(*phase),
                BehaviorEvent::Slide(_) => None,
            })
            .collect();
        assert_eq!(
            states,
            [
                SheetPhase::Settling,
                SheetPhase::Expanded,
                SheetPhase::Dragging,
                SheetPhase::Settling,
                SheetPhase::Expanded,
            ]
        );
        // drag frames between two state changes collapse into one slide
        assert_eq!(all.len(), 8);
        assert_eq!(b.visible_height(), 200);
    }

    #[test]
    fn test_expanded_sheet_follows_new_measurement() {
        let mut b = behavior(&[], true, false, 100);
        b.start();
        b.set_full_height(140);

        assert_eq!(b.visible_height(), 140);
        assert_eq!(b.phase(), SheetPhase::Expanded);
    }
}
