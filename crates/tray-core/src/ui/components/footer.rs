//! Standard tray footer with one or two action buttons

use alloc::boxed::Box;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::debug;

use crate::ui::components::Button;
use crate::ui::core::{Action, DirtyRegion, Drawable, TouchEvent, TouchPoint, TouchResult, Touchable};
use crate::ui::styling::{ButtonVariant, ColorPalette, Padding};

/// Height of the footer band in pixels.
pub const FOOTER_HEIGHT_PX: u32 = 48;

const BUTTON_GAP_PX: u32 = 8;

/// Button arrangement of the footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FooterType {
    /// One full-width primary button
    Single,
    /// Outlined secondary button on the left, primary on the right
    Double,
}

/// Which footer button was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FooterButton {
    Primary,
    Secondary,
}

/// Click listener registered by whoever configures the footer.
pub type FooterListener = Box<dyn FnMut(FooterButton)>;

/// Footer component placed in the tray's footer slot.
///
/// The tray does not interpret the buttons; it hands the live footer to the
/// caller, who sets the type, labels, enabled state and click listener.
pub struct Footer {
    bounds: Rectangle,
    footer_type: FooterType,
    padding: Padding,
    primary: Button,
    secondary: Button,
    listener: Option<FooterListener>,
    dirty: bool,
}

impl Footer {
    pub fn new(bounds: Rectangle) -> Self {
        let mut footer = Self {
            bounds,
            footer_type: FooterType::Single,
            padding: Padding::symmetric(8, 16),
            primary: Button::new(bounds, "OK", Action::FooterPrimary)
                .with_variant(ButtonVariant::Primary),
            secondary: Button::new(bounds, "Batal", Action::FooterSecondary)
                .with_variant(ButtonVariant::Outline),
            listener: None,
            dirty: true,
        };
        footer.layout();
        footer
    }

    pub fn set_footer_type(&mut self, footer_type: FooterType) {
        if self.footer_type != footer_type {
            self.footer_type = footer_type;
            self.layout();
            self.dirty = true;
        }
    }

    pub fn footer_type(&self) -> FooterType {
        self.footer_type
    }

    pub fn set_primary_label(&mut self, label: &str) {
        self.primary.set_label(label);
    }

    pub fn set_secondary_label(&mut self, label: &str) {
        self.secondary.set_label(label);
    }

    pub fn set_primary_enabled(&mut self, enabled: bool) {
        self.primary.set_enabled(enabled);
    }

    pub fn set_secondary_enabled(&mut self, enabled: bool) {
        self.secondary.set_enabled(enabled);
    }

    pub fn primary(&self) -> &Button {
        &self.primary
    }

    pub fn secondary(&self) -> &Button {
        &self.secondary
    }

    /// Register the click listener, replacing any previous one.
    pub fn set_on_click(&mut self, listener: impl FnMut(FooterButton) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn set_palette(&mut self, palette: ColorPalette) {
        self.primary.set_palette(palette);
        self.secondary.set_palette(palette);
    }

    pub fn set_bounds(&mut self, bounds: Rectangle) {
        if self.bounds != bounds {
            self.bounds = bounds;
            self.layout();
            self.dirty = true;
        }
    }

    fn layout(&mut self) {
        let inner = Rectangle::new(
            self.bounds.top_left + Point::new(self.padding.left as i32, self.padding.top as i32),
            Size::new(
                self.bounds.size.width.saturating_sub(self.padding.horizontal()),
                self.bounds.size.height.saturating_sub(self.padding.vertical()),
            ),
        );

        match self.footer_type {
            FooterType::Single => {
                self.primary.set_bounds(inner);
                self.secondary
                    .set_bounds(Rectangle::new(inner.top_left, Size::zero()));
            }
            FooterType::Double => {
                let half = inner.size.width.saturating_sub(BUTTON_GAP_PX) / 2;
                self.secondary
                    .set_bounds(Rectangle::new(inner.top_left, Size::new(half, inner.size.height)));
                self.primary.set_bounds(Rectangle::new(
                    inner.top_left + Point::new((half + BUTTON_GAP_PX) as i32, 0),
                    Size::new(half, inner.size.height),
                ));
            }
        }
    }

    fn notify(&mut self, button: FooterButton) {
        debug!("Footer {:?} clicked", button);
        if let Some(listener) = self.listener.as_mut() {
            listener(button);
        }
    }
}

impl Drawable for Footer {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        if self.footer_type == FooterType::Double {
            self.secondary.draw(display)?;
        }
        self.primary.draw(display)
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn is_dirty(&self) -> bool {
        self.dirty || self.primary.is_dirty() || self.secondary.is_dirty()
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
        self.primary.mark_clean();
        self.secondary.mark_clean();
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn dirty_region(&self) -> Option<DirtyRegion> {
        if self.is_dirty() {
            Some(DirtyRegion::new(self.bounds))
        } else {
            None
        }
    }
}

impl Touchable for Footer {
    fn contains_point(&self, point: TouchPoint) -> bool {
        self.bounds.contains(point.to_point())
    }

    fn handle_touch(&mut self, event: TouchEvent) -> TouchResult {
        let result = match self.primary.handle_touch(event) {
            TouchResult::NotHandled if self.footer_type == FooterType::Double => {
                self.secondary.handle_touch(event)
            }
            other => other,
        };

        match result {
            TouchResult::Action(Action::FooterPrimary) => self.notify(FooterButton::Primary),
            TouchResult::Action(Action::FooterSecondary) => self.notify(FooterButton::Secondary),
            _ => {}
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    fn footer() -> Footer {
        Footer::new(Rectangle::new(Point::new(0, 192), Size::new(320, FOOTER_HEIGHT_PX)))
    }

    #[test]
    fn test_single_footer_primary_spans_width() {
        let f = footer();
        assert_eq!(f.primary().bounds().size, Size::new(288, 32));
    }

    #[test]
    fn test_double_footer_splits_buttons() {
        let mut f = footer();
        f.set_footer_type(FooterType::Double);

        assert_eq!(f.secondary().bounds().top_left, Point::new(16, 200));
        assert_eq!(f.primary().bounds().top_left, Point::new(16 + 140 + 8, 200));
        assert_eq!(f.primary().bounds().size.width, 140);
    }

    #[test]
    fn test_listener_receives_clicks() {
        let clicks = Rc::new(RefCell::new(Vec::new()));
        let sink = clicks.clone();

        let mut f = footer();
        f.set_footer_type(FooterType::Double);
        f.set_on_click(move |button| sink.borrow_mut().push(button));

        f.handle_touch(TouchEvent::Press(TouchPoint::new(20, 210)));
        f.handle_touch(TouchEvent::Release(TouchPoint::new(20, 210)));
        f.handle_touch(TouchEvent::Press(TouchPoint::new(300, 210)));

        assert_eq!(
            clicks.borrow().as_slice(),
            &[FooterButton::Secondary, FooterButton::Primary]
        );
    }

    #[test]
    fn test_disabled_primary_does_not_notify() {
        let clicks = Rc::new(RefCell::new(0u32));
        let sink = clicks.clone();

        let mut f = footer();
        f.set_primary_enabled(false);
        f.set_on_click(move |_| *sink.borrow_mut() += 1);

        let result = f.handle_touch(TouchEvent::Press(TouchPoint::new(100, 210)));
        assert_eq!(result, TouchResult::NotHandled);
        assert_eq!(*clicks.borrow(), 0);
    }
}
