//! The modal tray orchestrator

use alloc::boxed::Box;
use alloc::rc::Rc;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::{debug, info};

use super::background::{BackgroundComposer, SHADOW_INSET_PX, SheetBackground};
use super::behavior::{BehaviorEvent, SheetBehavior};
use super::config::TrayConfiguration;
use super::delegate::{NoopDelegate, TrayDelegate};
use super::drag_handle::{DragHandle, DragHandleRenderer};
use super::host::{HostSurface, Insets, SystemBars};
use super::slots::SlotComposer;
use super::state::{PresentationState, SheetPhase};
use super::{TrayError, TrayResult};
use crate::ui::components::text::bounded;
use crate::ui::{
    Action, ColorResolver, ColorToken, DirtyRegion, Footer, Theme, TouchEvent, TouchResult, View,
};

/// Where a tray is in its single show/dismiss cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Created,
    Presented,
    Dismissing,
    TornDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TouchOwner {
    Slots,
    Sheet,
}

/// Everything that only exists while the tray is on screen. Dropping it
/// drops every cache.
struct Binding {
    tag: heapless::String<32>,
    resolver: ColorResolver,
    backgrounds: BackgroundComposer,
    handles: DragHandleRenderer,
    slots: SlotComposer,
    behavior: SheetBehavior,
    background: Rc<SheetBackground>,
    handle: Rc<DragHandle>,
    saved_bars: SystemBars,
    host_bounds: Rectangle,
    insets: Insets,
    top_padding: u32,
    shown: bool,
    touch_owner: Option<TouchOwner>,
    drawn: Option<Rectangle>,
    needs_redraw: bool,
}

impl Binding {
    fn measure<H: HostSurface>(&mut self, host: &H) {
        self.host_bounds = host.bounds();
        self.insets = host.insets();

        let max = self.host_bounds.size.height.saturating_sub(self.insets.top);
        let full = (self.top_padding + self.slots.measure() + self.insets.bottom).min(max);
        self.behavior.set_full_height(full);
    }

    fn host_bottom(&self) -> i32 {
        self.host_bounds.top_left.y + self.host_bounds.size.height as i32
    }

    /// Visible part of the sheet, shadow padding included.
    fn frame(&self) -> Rectangle {
        let visible = self.behavior.visible_height();
        Rectangle::new(
            Point::new(self.host_bounds.top_left.x, self.host_bottom() - visible as i32),
            Size::new(self.host_bounds.size.width, visible),
        )
    }

    /// Filled sheet area. It keeps its full height and runs past the host's
    /// bottom edge while partially visible.
    fn sheet(&self) -> Rectangle {
        let frame = self.frame();
        let full = self.behavior.full_height();
        Rectangle::new(
            frame.top_left + Point::new(0, self.top_padding as i32),
            Size::new(frame.size.width, full.saturating_sub(self.top_padding)),
        )
    }

    fn layout(&mut self) {
        let origin = self.sheet().top_left;
        self.slots.layout(origin);
    }

    fn paint_area(&self) -> Rectangle {
        self.background.paint_area(self.sheet())
    }

    fn refresh_background(&mut self, has_shadow: bool, has_stroke: bool) {
        self.background = self
            .backgrounds
            .compose(&mut self.resolver, has_shadow, has_stroke);
        self.top_padding = if has_shadow { SHADOW_INSET_PX } else { 0 };
        self.needs_redraw = true;
    }
}

/// A sheet that slides up from the bottom of a [`HostSurface`].
///
/// A tray is single-use: once dismissed and torn down it cannot be
/// presented again, and calls that need the presentation binding fail with
/// [`TrayError::TornDown`].
pub struct ModalTray {
    config: TrayConfiguration,
    theme: Theme,
    lifecycle: Lifecycle,
    delegate: Box<dyn TrayDelegate>,
    pending_content: Option<View>,
    binding: Option<Binding>,
    vacated: Option<Rectangle>,
}

impl ModalTray {
    pub fn new(config: TrayConfiguration) -> Self {
        Self {
            config,
            theme: Theme::default(),
            lifecycle: Lifecycle::Created,
            delegate: Box::new(NoopDelegate),
            pending_content: None,
            binding: None,
            vacated: None,
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_delegate(mut self, delegate: impl TrayDelegate + 'static) -> Self {
        self.delegate = Box::new(delegate);
        self
    }

    pub fn set_delegate(&mut self, delegate: impl TrayDelegate + 'static) {
        self.delegate = Box::new(delegate);
    }

    pub fn configuration(&self) -> &TrayConfiguration {
        &self.config
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Current sheet phase; `Hidden` whenever nothing is on screen.
    pub fn phase(&self) -> SheetPhase {
        self.binding
            .as_ref()
            .map_or(SheetPhase::Hidden, |b| b.behavior.phase())
    }

    /// Visible sheet area while presented.
    pub fn sheet_bounds(&self) -> Option<Rectangle> {
        self.binding.as_ref().map(Binding::frame)
    }

    pub fn presentation_state(&self) -> TrayResult<&PresentationState> {
        Ok(self.bound()?.behavior.state())
    }

    pub fn slots(&self) -> TrayResult<&SlotComposer> {
        Ok(&self.bound()?.slots)
    }

    /// Background currently used by the sheet.
    pub fn background(&self) -> TrayResult<&Rc<SheetBackground>> {
        Ok(&self.bound()?.background)
    }

    /// Put a view into the content slot.
    ///
    /// Before presentation the view is kept and inserted on `present`.
    /// Returns the replaced view, or `view` itself if it is already there.
    pub fn set_content(&mut self, view: View) -> TrayResult<Option<View>> {
        self.ensure_alive()?;
        if let Some(binding) = self.binding.as_mut() {
            binding.needs_redraw = true;
            return binding.slots.set_content(view);
        }
        if self.pending_content.as_ref().map(View::id) == Some(view.id()) {
            return Ok(Some(view));
        }
        Ok(self.pending_content.replace(view))
    }

    /// Hand the live footer to `configure`. Ignored before `present`.
    pub fn configure_footer<F: FnOnce(&mut Footer)>(&mut self, configure: F) -> TrayResult<()> {
        self.ensure_alive()?;
        match self.binding.as_mut() {
            Some(binding) => binding.slots.configure_footer(configure),
            None => debug!("configure_footer before present ignored"),
        }
        Ok(())
    }

    pub fn set_title(&mut self, title: Option<&str>) -> TrayResult<()> {
        self.ensure_alive()?;
        self.config.title = title.map(bounded);
        let visible = self.config.visible_title();
        if let Some(binding) = self.binding.as_mut() {
            binding.slots.set_title(visible)?;
            binding.needs_redraw = true;
        }
        Ok(())
    }

    /// Show or hide the drag handle. Dragging is only possible while the
    /// handle is visible.
    pub fn set_drag_handle_visible(&mut self, visible: bool) -> TrayResult<()> {
        self.ensure_alive()?;
        self.config.show_drag_handle = visible;
        if let Some(binding) = self.binding.as_mut() {
            binding.slots.set_handle_visible(visible)?;
            binding.behavior.set_draggable(visible);
            binding.needs_redraw = true;
        }
        Ok(())
    }

    pub fn set_footer_visible(&mut self, visible: bool) -> TrayResult<()> {
        self.ensure_alive()?;
        self.config.show_footer = visible;
        if let Some(binding) = self.binding.as_mut() {
            binding.slots.set_footer_visible(visible)?;
            binding.needs_redraw = true;
        }
        Ok(())
    }

    pub fn set_shadow_enabled(&mut self, enabled: bool) -> TrayResult<()> {
        self.ensure_alive()?;
        self.config.has_shadow = enabled;
        let has_stroke = self.config.has_stroke;
        if let Some(binding) = self.binding.as_mut() {
            binding.refresh_background(enabled, has_stroke);
        }
        Ok(())
    }

    pub fn set_stroke_enabled(&mut self, enabled: bool) -> TrayResult<()> {
        self.ensure_alive()?;
        self.config.has_stroke = enabled;
        let has_shadow = self.config.has_shadow;
        if let Some(binding) = self.binding.as_mut() {
            binding.refresh_background(has_shadow, enabled);
        }
        Ok(())
    }

    /// Present the tray on `host`.
    ///
    /// Switches the host to edge-to-edge and the tray's bar appearance,
    /// builds the presentation binding and starts the slide-in. `on_show`
    /// fires from the next [`ModalTray::update`]. Presenting twice is a
    /// no-op.
    pub fn present<H: HostSurface>(&mut self, host: &mut H, tag: &str) -> TrayResult<()> {
        match self.lifecycle {
            Lifecycle::TornDown => return Err(TrayError::TornDown),
            Lifecycle::Presented | Lifecycle::Dismissing => {
                debug!("Tray '{}' already presented", tag);
                return Ok(());
            }
            Lifecycle::Created => {}
        }

        let mut binding = self.build_binding(host, tag)?;
        binding.measure(host);
        binding.behavior.start();
        binding.layout();

        let fill = binding.resolver.resolve(ColorToken::PrimaryBackground);
        host.set_edge_to_edge(true);
        host.set_system_bars(SystemBars {
            light_status_icons: binding.saved_bars.light_status_icons,
            light_navigation_icons: is_dark(fill),
            navigation_scrim: None,
        });

        info!("Presenting tray '{}'", tag);
        self.binding = Some(binding);
        self.lifecycle = Lifecycle::Presented;
        Ok(())
    }

    /// Slide the tray out. `on_dismiss` fires exactly once, after
    /// `on_state_changed(Hidden)`; repeated calls are ignored.
    pub fn dismiss(&mut self) {
        match self.lifecycle {
            Lifecycle::Created => {
                debug!("Dismissed before presentation");
                self.lifecycle = Lifecycle::TornDown;
                self.pending_content = None;
                self.delegate.on_dismiss();
            }
            Lifecycle::Presented => {
                self.lifecycle = Lifecycle::Dismissing;
                if let Some(binding) = self.binding.as_mut() {
                    binding.touch_owner = None;
                    binding.behavior.dismiss();
                }
            }
            Lifecycle::Dismissing | Lifecycle::TornDown => {}
        }
    }

    /// Run one frame: measure, fire `on_show` once, advance the sheet and
    /// deliver its events. A tray dismissed before its first frame never
    /// reports `on_show`. Tears the tray down once the sheet is hidden.
    pub fn update<H: HostSurface>(&mut self, host: &mut H, elapsed_ms: u32) {
        let Some(binding) = self.binding.as_mut() else {
            return;
        };

        binding.measure(host);
        if !binding.shown {
            binding.shown = true;
            if self.lifecycle == Lifecycle::Dismissing {
                debug!("Tray '{}' dismissed before it was shown", binding.tag);
            } else {
                debug!("Tray '{}' shown", binding.tag);
                self.delegate.on_show();
            }
        }

        binding.behavior.advance(elapsed_ms);
        binding.layout();
        dispatch(&mut binding.behavior, self.delegate.as_mut());

        if binding.behavior.phase() == SheetPhase::Hidden {
            self.teardown(host);
        }
    }

    /// Route a touch. While presented the tray is modal: touches outside
    /// the sheet never reach the screen behind it.
    pub fn handle_touch(&mut self, event: TouchEvent) -> TouchResult {
        match self.lifecycle {
            Lifecycle::Presented => {}
            Lifecycle::Dismissing => return TouchResult::Handled,
            Lifecycle::Created | Lifecycle::TornDown => return TouchResult::NotHandled,
        }
        let Some(binding) = self.binding.as_mut() else {
            return TouchResult::NotHandled;
        };

        let result = match event {
            TouchEvent::Press(point) => {
                if !binding.frame().contains(point.to_point()) {
                    if self.config.cancelable_on_outside_touch {
                        debug!("Outside touch, dismissing");
                        self.dismiss();
                    }
                    return TouchResult::Handled;
                }
                match binding.slots.handle_touch(event) {
                    TouchResult::NotHandled => {
                        if binding.behavior.press(point.y as i32) {
                            binding.touch_owner = Some(TouchOwner::Sheet);
                        }
                        TouchResult::Handled
                    }
                    other => {
                        binding.touch_owner = Some(TouchOwner::Slots);
                        other
                    }
                }
            }
            TouchEvent::Drag(point) => match binding.touch_owner {
                Some(TouchOwner::Sheet) => {
                    binding.behavior.drag_to(point.y as i32);
                    TouchResult::Handled
                }
                Some(TouchOwner::Slots) => binding.slots.handle_touch(event),
                None => TouchResult::Handled,
            },
            TouchEvent::Release(_) | TouchEvent::Cancel => match binding.touch_owner.take() {
                Some(TouchOwner::Sheet) => {
                    if event == TouchEvent::Cancel {
                        binding.behavior.cancel();
                    } else {
                        binding.behavior.release();
                    }
                    TouchResult::Handled
                }
                Some(TouchOwner::Slots) => binding.slots.handle_touch(event),
                None => TouchResult::Handled,
            },
        };

        binding.layout();
        if binding.shown {
            dispatch(&mut binding.behavior, self.delegate.as_mut());
        }

        if result == TouchResult::Action(Action::DismissTray) {
            self.dismiss();
        }
        result
    }

    /// Area to repaint before the next [`ModalTray::draw`]: the sheet's
    /// previous and current position, or the area it left on teardown.
    pub fn dirty_region(&self) -> Option<DirtyRegion> {
        let mut region = self.vacated.map(DirtyRegion::new);

        if let Some(binding) = &self.binding {
            let current = binding.paint_area();
            let changed = binding.needs_redraw
                || binding.slots.is_dirty()
                || binding.drawn != Some(current);
            if changed {
                for area in binding.drawn.into_iter().chain(Some(current)) {
                    match region.as_mut() {
                        Some(r) => r.expand_to_include(area),
                        None => region = Some(DirtyRegion::new(area)),
                    }
                }
            }
        }
        region
    }

    /// Draw the sheet. The caller repaints whatever lies behind
    /// [`ModalTray::dirty_region`] first.
    pub fn draw<D: DrawTarget<Color = Rgb565>>(&mut self, display: &mut D) -> Result<(), D::Error> {
        self.vacated = None;
        let Some(binding) = self.binding.as_mut() else {
            return Ok(());
        };

        let sheet = binding.sheet();
        binding.background.draw(sheet, display)?;
        if let Some(band) = binding.slots.handle_band() {
            binding.handle.draw(band, display)?;
        }
        binding.slots.draw(display)?;

        binding.slots.mark_clean();
        binding.drawn = Some(binding.paint_area());
        binding.needs_redraw = false;
        Ok(())
    }

    fn build_binding<H: HostSurface>(&mut self, host: &H, tag: &str) -> TrayResult<Binding> {
        let palette = self.theme.palette;
        let mut resolver = ColorResolver::new(palette);
        let mut backgrounds = BackgroundComposer::new(self.theme.sheet_corner_radius);
        let mut handles = DragHandleRenderer::new();

        let title_color = resolver.resolve(self.config.title_text_color);
        let host_bounds = host.bounds();
        let mut slots = SlotComposer::new(
            host_bounds.size.width,
            palette,
            self.config.title_text_style,
            title_color,
        )?;
        slots.set_title(self.config.visible_title())?;
        slots.set_handle_visible(self.config.show_drag_handle)?;
        slots.set_footer_visible(self.config.show_footer)?;
        if let Some(view) = self.pending_content.take() {
            slots.set_content(view)?;
        }

        let background =
            backgrounds.compose(&mut resolver, self.config.has_shadow, self.config.has_stroke);
        let handle = handles.handle(&mut resolver);

        Ok(Binding {
            tag: bounded(tag),
            resolver,
            backgrounds,
            handles,
            slots,
            behavior: SheetBehavior::new(&self.config),
            background,
            handle,
            saved_bars: host.system_bars(),
            host_bounds,
            insets: host.insets(),
            top_padding: if self.config.has_shadow { SHADOW_INSET_PX } else { 0 },
            shown: false,
            touch_owner: None,
            drawn: None,
            needs_redraw: true,
        })
    }

    fn teardown<H: HostSurface>(&mut self, host: &mut H) {
        let Some(mut binding) = self.binding.take() else {
            return;
        };

        host.set_system_bars(binding.saved_bars);
        host.set_edge_to_edge(false);

        binding.backgrounds.clear();
        binding.handles.clear();
        binding.resolver.clear();
        self.vacated = binding.drawn;

        info!("Tray '{}' dismissed", binding.tag);
        self.lifecycle = Lifecycle::TornDown;
        self.delegate.on_dismiss();
    }

    fn ensure_alive(&self) -> TrayResult<()> {
        if self.lifecycle == Lifecycle::TornDown {
            Err(TrayError::TornDown)
        } else {
            Ok(())
        }
    }

    fn bound(&self) -> TrayResult<&Binding> {
        self.ensure_alive()?;
        self.binding.as_ref().ok_or(TrayError::NotPresented)
    }
}

fn dispatch(behavior: &mut SheetBehavior, delegate: &mut dyn TrayDelegate) {
    while let Some(event) = behavior.pop_event() {
        match event {
            BehaviorEvent::Slide(offset) => delegate.on_slide(offset),
            BehaviorEvent::StateChanged(phase) => delegate.on_state_changed(phase),
        }
    }
}

/// Whether light bar icons read better on `color`.
fn is_dark(color: Rgb565) -> bool {
    let luma = color.r() as u32 * 2 * 299 + color.g() as u32 * 587 + color.b() as u32 * 2 * 114;
    luma < 31_500
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::{Element, FooterButton, TextSize, TouchPoint, ViewId};
    use alloc::vec::Vec;
    use core::cell::RefCell;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Event {
        Show,
        Dismiss,
        State(SheetPhase),
        Slide(f32),
    }

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<Event>>>);

    impl Recorder {
        fn events(&self) -> Vec<Event> {
            self.0.borrow().clone()
        }

        fn count(&self, event: Event) -> usize {
            self.0.borrow().iter().filter(|e| **e == event).count()
        }
    }

    impl TrayDelegate for Recorder {
        fn on_show(&mut self) {
            self.0.borrow_mut().push(Event::Show);
        }

        fn on_dismiss(&mut self) {
            self.0.borrow_mut().push(Event::Dismiss);
        }

        fn on_state_changed(&mut self, phase: SheetPhase) {
            self.0.borrow_mut().push(Event::State(phase));
        }

        fn on_slide(&mut self, offset: f32) {
            self.0.borrow_mut().push(Event::Slide(offset));
        }
    }

    struct TestHost {
        edge_to_edge: bool,
        bars: SystemBars,
    }

    impl TestHost {
        fn new() -> Self {
            Self {
                edge_to_edge: false,
                bars: SystemBars {
                    light_status_icons: true,
                    light_navigation_icons: false,
                    navigation_scrim: Some(Rgb565::BLACK),
                },
            }
        }
    }

    impl HostSurface for TestHost {
        fn bounds(&self) -> Rectangle {
            Rectangle::new(Point::zero(), Size::new(320, 240))
        }

        fn set_edge_to_edge(&mut self, enabled: bool) {
            self.edge_to_edge = enabled;
        }

        fn system_bars(&self) -> SystemBars {
            self.bars
        }

        fn set_system_bars(&mut self, bars: SystemBars) {
            self.bars = bars;
        }
    }

    fn tray(config: TrayConfiguration) -> (ModalTray, Recorder) {
        let recorder = Recorder::default();
        let tray = ModalTray::new(config).with_delegate(recorder.clone());
        (tray, recorder)
    }

    fn run(tray: &mut ModalTray, host: &mut TestHost, frames: usize) {
        for _ in 0..frames {
            tray.update(host, 16);
        }
    }

    fn press(x: u16, y: u16) -> TouchEvent {
        TouchEvent::Press(TouchPoint::new(x, y))
    }

    #[test]
    fn test_titled_tray_without_footer() {
        let config = TrayConfiguration::default()
            .with_title("Pilih Pekan")
            .with_footer(false);
        let (mut tray, recorder) = tray(config);
        let mut host = TestHost::new();

        tray.present(&mut host, "week-picker").unwrap();
        assert_eq!(recorder.count(Event::Show), 0);
        run(&mut tray, &mut host, 10);

        assert_eq!(recorder.count(Event::Show), 1);
        assert_eq!(recorder.events()[0], Event::Show);
        let slots = tray.slots().unwrap();
        assert!(!slots.is_footer_visible());
        assert_eq!(slots.title(), Some("Pilih Pekan"));
        assert_eq!(tray.phase(), SheetPhase::Expanded);
    }

    #[test]
    fn test_double_dismiss_fires_once() {
        let (mut tray, recorder) = tray(TrayConfiguration::default());
        let mut host = TestHost::new();
        tray.present(&mut host, "default").unwrap();
        run(&mut tray, &mut host, 10);

        tray.dismiss();
        tray.dismiss();
        run(&mut tray, &mut host, 10);
        tray.dismiss();

        assert_eq!(recorder.count(Event::Dismiss), 1);
        assert_eq!(tray.phase(), SheetPhase::Hidden);
        assert_eq!(tray.lifecycle(), Lifecycle::TornDown);

        let events = recorder.events();
        let hidden = events
            .iter()
            .position(|e| *e == Event::State(SheetPhase::Hidden))
            .unwrap();
        assert_eq!(events.last(), Some(&Event::Dismiss));
        assert!(hidden < events.len() - 1);
    }

    #[test]
    fn test_dismiss_before_present_tears_down() {
        let (mut tray, recorder) = tray(TrayConfiguration::default());
        tray.dismiss();
        tray.dismiss();

        assert_eq!(recorder.events(), [Event::Dismiss]);
        assert_eq!(
            tray.present(&mut TestHost::new(), "late"),
            Err(TrayError::TornDown)
        );
    }

    #[test]
    fn test_second_present_is_ignored() {
        let (mut tray, recorder) = tray(TrayConfiguration::default().with_animation(false));
        let mut host = TestHost::new();
        tray.present(&mut host, "first").unwrap();
        run(&mut tray, &mut host, 1);

        assert_eq!(tray.present(&mut host, "second"), Ok(()));
        run(&mut tray, &mut host, 1);
        assert_eq!(recorder.count(Event::Show), 1);
        assert_eq!(recorder.count(Event::State(SheetPhase::Settling)), 1);
    }

    #[test]
    fn test_system_bars_restored_on_teardown() {
        let (mut tray, _) = tray(TrayConfiguration::default().with_animation(false));
        let mut host = TestHost::new();
        let original = host.bars;

        tray.present(&mut host, "bars").unwrap();
        assert!(host.edge_to_edge);
        assert_eq!(host.bars.navigation_scrim, None);
        assert!(host.bars.light_navigation_icons);

        tray.dismiss();
        run(&mut tray, &mut host, 1);
        assert!(!host.edge_to_edge);
        assert_eq!(host.bars, original);
    }

    #[test]
    fn test_use_after_teardown_fails_fast() {
        let (mut tray, _) = tray(TrayConfiguration::default().with_animation(false));
        let mut host = TestHost::new();
        tray.present(&mut host, "gone").unwrap();
        tray.dismiss();
        run(&mut tray, &mut host, 1);

        let view = View::new(
            ViewId(1),
            Element::text(Rectangle::zero(), "Minggu 12", TextSize::Medium),
        );
        assert!(matches!(tray.set_content(view), Err(TrayError::TornDown)));
        assert_eq!(tray.configure_footer(|_| {}), Err(TrayError::TornDown));
        assert_eq!(tray.set_shadow_enabled(false), Err(TrayError::TornDown));
        assert_eq!(tray.set_title(Some("x")), Err(TrayError::TornDown));
        assert!(matches!(tray.slots(), Err(TrayError::TornDown)));
    }

    #[test]
    fn test_slots_need_presentation() {
        let (tray, _) = tray(TrayConfiguration::default());
        assert!(matches!(tray.slots(), Err(TrayError::NotPresented)));
    }

    #[test]
    fn test_pending_content_inserted_on_present() {
        let (mut tray, _) = tray(TrayConfiguration::default());
        let view = |id| {
            View::new(
                ViewId(id),
                Element::text(Rectangle::zero(), "Minggu 12", TextSize::Medium),
            )
        };
        assert!(tray.set_content(view(1)).unwrap().is_none());
        let replaced = tray.set_content(view(2)).unwrap();
        assert_eq!(replaced.map(|v| v.id()), Some(ViewId(1)));

        tray.configure_footer(|footer| footer.set_primary_label("Ignored"))
            .unwrap();

        let mut host = TestHost::new();
        tray.present(&mut host, "content").unwrap();
        let slots = tray.slots().unwrap();
        assert_eq!(slots.content().map(View::id), Some(ViewId(2)));
        assert_eq!(slots.footer().primary().label(), "OK");
    }

    #[test]
    fn test_outside_touch_dismisses_when_cancelable() {
        let (mut tray, recorder) = tray(TrayConfiguration::default().with_animation(false));
        let mut host = TestHost::new();
        tray.present(&mut host, "outside").unwrap();
        run(&mut tray, &mut host, 1);

        assert_eq!(tray.handle_touch(press(10, 10)), TouchResult::Handled);
        run(&mut tray, &mut host, 1);
        assert_eq!(recorder.count(Event::Dismiss), 1);
    }

    #[test]
    fn test_outside_touch_swallowed_when_not_cancelable() {
        let config = TrayConfiguration::default()
            .with_animation(false)
            .with_cancelable_on_outside_touch(false);
        let (mut tray, recorder) = tray(config);
        let mut host = TestHost::new();
        tray.present(&mut host, "modal").unwrap();
        run(&mut tray, &mut host, 1);

        assert_eq!(tray.handle_touch(press(10, 10)), TouchResult::Handled);
        run(&mut tray, &mut host, 1);
        assert_eq!(recorder.count(Event::Dismiss), 0);
        assert_eq!(tray.phase(), SheetPhase::Expanded);
    }

    #[test]
    fn test_drag_down_past_threshold_dismisses() {
        let (mut tray, recorder) = tray(TrayConfiguration::default().with_animation(false));
        let mut host = TestHost::new();
        tray.present(&mut host, "drag").unwrap();
        run(&mut tray, &mut host, 1);
        // shadow padding 6 + handle band 16 + footer 48
        assert_eq!(
            tray.sheet_bounds(),
            Some(Rectangle::new(Point::new(0, 170), Size::new(320, 70)))
        );

        tray.handle_touch(press(160, 180));
        assert_eq!(tray.phase(), SheetPhase::Dragging);
        tray.handle_touch(TouchEvent::Drag(TouchPoint::new(160, 235)));
        tray.handle_touch(TouchEvent::Release(TouchPoint::new(160, 235)));
        run(&mut tray, &mut host, 1);

        assert_eq!(recorder.count(Event::Dismiss), 1);
        assert_eq!(tray.lifecycle(), Lifecycle::TornDown);
    }

    #[test]
    fn test_hidden_handle_blocks_drag() {
        let (mut tray, recorder) = tray(TrayConfiguration::default().with_animation(false));
        let mut host = TestHost::new();
        tray.present(&mut host, "nodrag").unwrap();
        run(&mut tray, &mut host, 1);
        tray.set_drag_handle_visible(false).unwrap();
        run(&mut tray, &mut host, 1);
        let before = recorder.events().len();

        // footer padding, above the button
        tray.handle_touch(press(160, 195));
        tray.handle_touch(TouchEvent::Drag(TouchPoint::new(160, 239)));
        tray.handle_touch(TouchEvent::Release(TouchPoint::new(160, 239)));
        run(&mut tray, &mut host, 1);

        assert_eq!(tray.phase(), SheetPhase::Expanded);
        assert!(
            recorder.events()[before..]
                .iter()
                .all(|e| !matches!(e, Event::State(_)))
        );
    }

    #[test]
    fn test_footer_press_reaches_listener_not_drag() {
        let (mut tray, _) = tray(TrayConfiguration::default().with_animation(false));
        let mut host = TestHost::new();
        tray.present(&mut host, "footer").unwrap();
        run(&mut tray, &mut host, 1);

        let clicks = Rc::new(RefCell::new(Vec::new()));
        let sink = clicks.clone();
        tray.configure_footer(|footer| {
            footer.set_on_click(move |button| sink.borrow_mut().push(button));
        })
        .unwrap();

        let result = tray.handle_touch(press(160, 215));
        assert_eq!(result, TouchResult::Action(Action::FooterPrimary));
        assert_eq!(clicks.borrow().as_slice(), &[FooterButton::Primary]);
        assert_eq!(tray.phase(), SheetPhase::Expanded);
    }

    #[test]
    fn test_shadow_toggle_requeries_cache() {
        let (mut tray, _) = tray(TrayConfiguration::default());
        let mut host = TestHost::new();
        tray.present(&mut host, "shadow").unwrap();
        let original = tray.background().unwrap().clone();

        tray.set_shadow_enabled(false).unwrap();
        assert!(!tray.background().unwrap().has_shadow());
        tray.set_shadow_enabled(true).unwrap();
        assert!(Rc::ptr_eq(tray.background().unwrap(), &original));
    }

    #[test]
    fn test_dirty_region_covers_vacated_sheet() {
        let (mut tray, _) = tray(TrayConfiguration::default().with_animation(false));
        let mut host = TestHost::new();
        let mut fb = crate::framebuffer::FrameBuffer::default();
        tray.present(&mut host, "dirty").unwrap();
        run(&mut tray, &mut host, 1);

        let painted = tray.dirty_region().unwrap().bounds;
        tray.draw(&mut fb).unwrap();
        assert!(tray.dirty_region().is_none());

        tray.dismiss();
        run(&mut tray, &mut host, 1);
        assert_eq!(tray.dirty_region().map(|r| r.bounds), Some(painted));
        tray.draw(&mut fb).unwrap();
        assert!(tray.dirty_region().is_none());
    }

    #[test]
    fn test_dismiss_before_first_frame_skips_show() {
        let (mut tray, recorder) = tray(TrayConfiguration::default());
        let mut host = TestHost::new();
        tray.present(&mut host, "brief").unwrap();
        tray.dismiss();
        run(&mut tray, &mut host, 10);

        assert_eq!(recorder.count(Event::Show), 0);
        assert_eq!(recorder.count(Event::Dismiss), 1);
        assert_eq!(tray.lifecycle(), Lifecycle::TornDown);
    }

    #[test]
    fn test_hiding_footer_below_snap_point_expands() {
        let config = TrayConfiguration::default()
            .with_animation(false)
            .with_snap_points(&[60])
            .unwrap();
        let (mut tray, recorder) = tray(config);
        let mut host = TestHost::new();
        tray.present(&mut host, "shrink").unwrap();
        run(&mut tray, &mut host, 1);
        assert_eq!(tray.phase(), SheetPhase::PartiallyExpanded);
        assert_eq!(tray.presentation_state().unwrap().active_snap_index, Some(0));

        // shadow padding 6 + handle band 16
        tray.set_footer_visible(false).unwrap();
        run(&mut tray, &mut host, 1);

        let state = tray.presentation_state().unwrap();
        assert_eq!(state.phase, SheetPhase::Expanded);
        assert_eq!(state.active_snap_index, None);
        assert_eq!(state.slide_offset, 1.0);
        assert_eq!(tray.sheet_bounds().map(|b| b.size.height), Some(22));
        assert_eq!(
            recorder.events().last(),
            Some(&Event::State(SheetPhase::Expanded))
        );
    }

    #[test]
    fn test_long_drag_before_first_frame_keeps_state_changes() {
        let (mut tray, recorder) = tray(TrayConfiguration::default().with_animation(false));
        let mut host = TestHost::new();
        tray.present(&mut host, "early-drag").unwrap();

        tray.handle_touch(press(160, 180));
        for y in 181..=200 {
            tray.handle_touch(TouchEvent::Drag(TouchPoint::new(160, y)));
        }
        tray.handle_touch(TouchEvent::Release(TouchPoint::new(160, 200)));
        run(&mut tray, &mut host, 3);

        let states: Vec<SheetPhase> = recorder
            .events()
            .into_iter()
            .filter_map(|e| match e {
                Event::State(phase) => Some(phase),
                _ => None,
            })
            .collect();
        assert_eq!(
            states,
            [
                SheetPhase::Settling,
                SheetPhase::Expanded,
                SheetPhase::Dragging,
                SheetPhase::Settling,
                SheetPhase::PartiallyExpanded,
            ]
        );
        assert_eq!(tray.phase(), SheetPhase::PartiallyExpanded);
        assert_eq!(recorder.events()[0], Event::Show);
    }

    #[test]
    fn test_slide_events_follow_animation() {
        let (mut tray, recorder) = tray(TrayConfiguration::default());
        let mut host = TestHost::new();
        tray.present(&mut host, "anim").unwrap();
        run(&mut tray, &mut host, 5);

        let events = recorder.events();
        assert_eq!(events[1], Event::State(SheetPhase::Settling));
        assert!(events.iter().any(|e| matches!(e, Event::Slide(o) if *o < 1.0)));
        assert_eq!(events.last(), Some(&Event::State(SheetPhase::Expanded)));
    }
}
