//! Desktop simulator for the tray-rs bottom tray.
//!
//! Renders a small "Pilih Pekan" (week picker) screen in an SDL2 window via
//! `embedded-graphics-simulator` and presents the modal tray over it.
//!
//! # Key bindings
//!
//! | Key   | Action                              |
//! |-------|-------------------------------------|
//! | T     | Open the tray                       |
//! | S     | Open the tray with snap points      |
//! | D     | Dismiss the tray                    |
//! | Q/Esc | Quit                                |
//!
//! Mouse button, motion and release are forwarded as press, drag and
//! release touch events.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window, sdl2::Keycode,
};
use log::{error, info, warn};

use tray_core::framebuffer::FrameBuffer;
use tray_core::tray::{
    HostSurface, Insets, ModalTray, SheetPhase, SystemBars, TrayConfiguration, TrayDelegate,
};
use tray_core::ui::{
    DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX, Element, FooterButton, FooterType, TextSize, Theme,
    TouchEvent, TouchPoint, View, ViewId,
};

// ---------------------------------------------------------------------------
// Display constants
// ---------------------------------------------------------------------------

/// Pixel scale factor for the simulator window.
const WINDOW_SCALE: u32 = 2;

/// Target frame duration (~30 FPS).
const FRAME_DURATION: Duration = Duration::from_millis(33);

/// Height reserved for the simulated navigation bar.
const NAV_BAR_HEIGHT_PX: u32 = 12;

const WEEKS: &str = "Minggu 10\nMinggu 11\nMinggu 12\nMinggu 13";

// ---------------------------------------------------------------------------
// Host
// ---------------------------------------------------------------------------

/// The simulator window seen as a host surface.
struct DemoHost {
    edge_to_edge: bool,
    bars: SystemBars,
}

impl DemoHost {
    fn new() -> Self {
        Self {
            edge_to_edge: false,
            bars: SystemBars {
                light_status_icons: true,
                light_navigation_icons: true,
                navigation_scrim: Some(Rgb565::BLACK),
            },
        }
    }
}

impl HostSurface for DemoHost {
    fn bounds(&self) -> Rectangle {
        screen_bounds()
    }

    fn insets(&self) -> Insets {
        Insets {
            top: 0,
            bottom: NAV_BAR_HEIGHT_PX,
        }
    }

    fn set_edge_to_edge(&mut self, enabled: bool) {
        info!("Host edge-to-edge: {}", enabled);
        self.edge_to_edge = enabled;
    }

    fn system_bars(&self) -> SystemBars {
        self.bars
    }

    fn set_system_bars(&mut self, bars: SystemBars) {
        self.bars = bars;
    }
}

/// Full-screen bounding rectangle.
fn screen_bounds() -> Rectangle {
    Rectangle::new(
        Point::zero(),
        Size::new(DISPLAY_WIDTH_PX as u32, DISPLAY_HEIGHT_PX as u32),
    )
}

// ---------------------------------------------------------------------------
// Delegate
// ---------------------------------------------------------------------------

/// Reports tray lifecycle events to the log.
struct LoggingDelegate;

impl TrayDelegate for LoggingDelegate {
    fn on_show(&mut self) {
        info!("Tray shown");
    }

    fn on_dismiss(&mut self) {
        info!("Tray dismissed");
    }

    fn on_state_changed(&mut self, phase: SheetPhase) {
        info!("Tray state → {:?}", phase);
    }

    fn on_slide(&mut self, offset: f32) {
        log::trace!("Tray slide {:.2}", offset);
    }
}

// ---------------------------------------------------------------------------
// Screen behind the tray
// ---------------------------------------------------------------------------

fn draw_screen<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    theme: &Theme,
    host: &DemoHost,
    selected: Option<FooterButton>,
) -> Result<(), D::Error> {
    display.clear(theme.palette.background)?;

    let heading = MonoTextStyle::new(TextSize::Large.font(), theme.palette.text_primary);
    let body = MonoTextStyle::new(TextSize::Medium.font(), theme.palette.text_secondary);

    Text::with_baseline("Jadwal", Point::new(16, 16), heading, Baseline::Top).draw(display)?;
    Text::with_baseline(
        "T: buka  S: snap  D: tutup",
        Point::new(16, 48),
        body,
        Baseline::Top,
    )
    .draw(display)?;

    let status = match selected {
        Some(FooterButton::Primary) => "Pekan dipilih",
        Some(FooterButton::Secondary) => "Dibatalkan",
        None => "Belum ada pilihan",
    };
    Text::with_baseline(status, Point::new(16, 64), body, Baseline::Top).draw(display)?;

    if !host.edge_to_edge {
        let bar = Rectangle::new(
            Point::new(0, (DISPLAY_HEIGHT_PX as u32 - NAV_BAR_HEIGHT_PX) as i32),
            Size::new(DISPLAY_WIDTH_PX as u32, NAV_BAR_HEIGHT_PX),
        );
        let scrim = host.bars.navigation_scrim.unwrap_or(theme.palette.background);
        bar.into_styled(PrimitiveStyle::with_fill(scrim)).draw(display)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tray construction
// ---------------------------------------------------------------------------

fn open_tray(
    host: &mut DemoHost,
    theme: Theme,
    snapping: bool,
    choice: &Rc<Cell<Option<FooterButton>>>,
) -> Option<ModalTray> {
    let mut config = TrayConfiguration::default().with_title("Pilih Pekan");
    if snapping {
        config = match config.with_snap_points(&[90, 160]) {
            Ok(config) => config,
            Err(e) => {
                warn!("Snap points rejected: {}", e);
                TrayConfiguration::default().with_title("Pilih Pekan")
            }
        };
    }

    let mut tray = ModalTray::new(config)
        .with_theme(theme)
        .with_delegate(LoggingDelegate);

    let weeks = Element::multiline(
        Rectangle::new(Point::zero(), Size::new(DISPLAY_WIDTH_PX as u32, 0)),
        WEEKS,
        TextSize::Medium,
    );
    if let Err(e) = tray.set_content(View::new(ViewId(1), weeks)) {
        error!("Failed to set tray content: {}", e);
        return None;
    }

    if let Err(e) = tray.present(host, if snapping { "week-picker-snap" } else { "week-picker" }) {
        error!("Failed to present tray: {}", e);
        return None;
    }

    let sink = choice.clone();
    let configured = tray.configure_footer(|footer| {
        footer.set_footer_type(FooterType::Double);
        footer.set_secondary_label("Batal");
        footer.set_primary_label("Pilih");
        footer.set_on_click(move |button| sink.set(Some(button)));
    });
    if let Err(e) = configured {
        error!("Failed to configure footer: {}", e);
    }

    Some(tray)
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    env_logger::init();
    info!("Starting tray-rs simulator");
    info!(
        "Display: {}×{} (scale {}×)",
        DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX, WINDOW_SCALE
    );
    info!("Keys: T=Tray  S=Tray+snap  D=Dismiss  Q=Quit");

    // SDL2 display and window
    let mut display = SimulatorDisplay::<Rgb565>::new(Size::new(
        DISPLAY_WIDTH_PX as u32,
        DISPLAY_HEIGHT_PX as u32,
    ));
    let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
    let mut window = Window::new("Tray Simulator", &output_settings);

    let theme = Theme::dark();
    let mut host = DemoHost::new();
    let mut framebuffer = FrameBuffer::default();
    let choice: Rc<Cell<Option<FooterButton>>> = Rc::new(Cell::new(None));
    let mut selected = None;
    let mut tray: Option<ModalTray> = None;
    let mut mouse_down = false;

    // The SDL window is lazily initialized on the first `update()` call.
    // We must call `update()` once before `events()` or it will panic.
    let _ = draw_screen(&mut framebuffer, &theme, &host, selected);
    let _ = framebuffer.flush(&mut display);
    window.update(&display);
    let mut needs_redraw = false;
    let mut last_frame = Instant::now();

    // -----------------------------------------------------------------------
    // Main loop
    // -----------------------------------------------------------------------
    'running: loop {
        let frame_start = Instant::now();

        // --- SDL events ---------------------------------------------------
        for event in window.events() {
            let touch = match event {
                SimulatorEvent::Quit => break 'running,

                SimulatorEvent::KeyDown { keycode, .. } => {
                    match keycode {
                        Keycode::Q | Keycode::Escape => break 'running,
                        Keycode::T | Keycode::S => {
                            if tray.is_some() {
                                info!("Tray already open");
                            } else {
                                tray = open_tray(&mut host, theme, keycode == Keycode::S, &choice);
                            }
                        }
                        Keycode::D => {
                            if let Some(t) = tray.as_mut() {
                                t.dismiss();
                            }
                        }
                        _ => {}
                    }
                    None
                }

                SimulatorEvent::MouseButtonDown { point, .. } => {
                    mouse_down = true;
                    Some(TouchEvent::Press(touch_point(point)))
                }
                SimulatorEvent::MouseMove { point } if mouse_down => {
                    Some(TouchEvent::Drag(touch_point(point)))
                }
                SimulatorEvent::MouseButtonUp { point, .. } => {
                    mouse_down = false;
                    Some(TouchEvent::Release(touch_point(point)))
                }

                _ => None,
            };

            if let (Some(touch), Some(t)) = (touch, tray.as_mut()) {
                let result = t.handle_touch(touch);
                log::debug!("Touch {:?} → {:?}", touch, result);
            }
        }

        // --- Footer choice ------------------------------------------------
        if let Some(button) = choice.take() {
            info!("Footer → {:?}", button);
            selected = Some(button);
            needs_redraw = true;
            if let Some(t) = tray.as_mut() {
                t.dismiss();
            }
        }

        // --- Tray update tick ---------------------------------------------
        let elapsed_ms = last_frame.elapsed().as_millis() as u32;
        last_frame = Instant::now();
        if let Some(t) = tray.as_mut() {
            t.update(&mut host, elapsed_ms);
        }

        // --- Render -------------------------------------------------------
        let tray_dirty = tray.as_ref().and_then(ModalTray::dirty_region).is_some();
        if needs_redraw || tray_dirty {
            // Repaint the whole screen offscreen; only changed pixels are
            // flushed to the window.
            let _ = draw_screen(&mut framebuffer, &theme, &host, selected);
            if let Some(t) = tray.as_mut() {
                let _ = t.draw(&mut framebuffer);
            }
            if let Err(e) = framebuffer.flush(&mut display) {
                error!("Flush error: {:?}", e);
            }
            needs_redraw = false;
        }

        if tray
            .as_ref()
            .is_some_and(|t| t.lifecycle() == tray_core::tray::Lifecycle::TornDown)
        {
            tray = None;
            needs_redraw = true;
        }

        window.update(&display);

        // --- Frame pacing -------------------------------------------------
        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
    }

    info!("Simulator exiting");
}

fn touch_point(point: Point) -> TouchPoint {
    TouchPoint::new(point.x.max(0) as u16, point.y.max(0) as u16)
}
