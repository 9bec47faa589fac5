//! Title, content and footer slots
//!
//! Slots are stacked in a vertical [`Container`]: handle band, title,
//! content, footer. A hidden slot collapses to zero height so the ones below
//! move up. The composer owns whatever view is currently in a slot; a
//! replaced content view is handed back to the caller, detached.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::debug;

use super::TrayResult;
use super::drag_handle::HANDLE_BAND_HEIGHT_PX;
use crate::ui::{
    ColorPalette, Container, Drawable, FOOTER_HEIGHT_PX, Footer, Padding, Style, TextComponent,
    TouchEvent, TouchResult, Touchable, TypographyToken, View,
};

const HANDLE_SLOT: usize = 0;
const TITLE_SLOT: usize = 1;
const CONTENT_SLOT: usize = 2;
const FOOTER_SLOT: usize = 3;

pub struct SlotComposer {
    container: Container<4>,
    title: TextComponent,
    title_visible: bool,
    content: Option<View>,
    footer: Footer,
    footer_visible: bool,
    handle_visible: bool,
}

impl SlotComposer {
    pub fn new(
        width: u32,
        palette: ColorPalette,
        title_style: TypographyToken,
        title_color: Rgb565,
    ) -> TrayResult<Self> {
        let origin = Rectangle::new(Point::zero(), Size::new(width, 0));
        let mut container = Container::new(origin);
        for _ in [HANDLE_SLOT, TITLE_SLOT, CONTENT_SLOT, FOOTER_SLOT] {
            container.add_child(0)?;
        }

        let title = TextComponent::new(origin, "", title_style.text_size()).with_style(
            Style::default()
                .with_foreground(title_color)
                .with_padding(Padding::symmetric(4, 16)),
        );

        let mut footer = Footer::new(Rectangle::new(Point::zero(), Size::new(width, FOOTER_HEIGHT_PX)));
        footer.set_palette(palette);

        let mut slots = Self {
            container,
            title,
            title_visible: false,
            content: None,
            footer,
            footer_visible: false,
            handle_visible: false,
        };
        slots.relayout()?;
        Ok(slots)
    }

    /// Set the header text; `None` or empty hides the header.
    pub fn set_title(&mut self, text: Option<&str>) -> TrayResult<()> {
        let text = text.unwrap_or("");
        self.title.set_text(text);
        self.title_visible = !text.is_empty();
        self.relayout()
    }

    /// Visible header text.
    pub fn title(&self) -> Option<&str> {
        self.title_visible.then(|| self.title.text())
    }

    pub fn is_title_visible(&self) -> bool {
        self.title_visible
    }

    /// Put `view` into the content slot.
    ///
    /// Returns the detached previous view. When `view` has the same id as
    /// the current content nothing changes and `view` itself is returned.
    pub fn set_content(&mut self, view: View) -> TrayResult<Option<View>> {
        if self.content.as_ref().map(View::id) == Some(view.id()) {
            debug!("Content {:?} already inserted", view.id());
            return Ok(Some(view));
        }

        let previous = self.content.replace(view);
        if let Some(old) = &previous {
            debug!("Detached content {:?}", old.id());
        }
        self.relayout()?;
        Ok(previous)
    }

    pub fn content(&self) -> Option<&View> {
        self.content.as_ref()
    }

    /// Remove and return the content view.
    pub fn take_content(&mut self) -> TrayResult<Option<View>> {
        let taken = self.content.take();
        self.relayout()?;
        Ok(taken)
    }

    /// Hand the live footer to `configure`.
    pub fn configure_footer<F: FnOnce(&mut Footer)>(&mut self, configure: F) {
        configure(&mut self.footer);
        self.footer.mark_dirty();
    }

    pub fn footer(&self) -> &Footer {
        &self.footer
    }

    pub fn set_footer_visible(&mut self, visible: bool) -> TrayResult<()> {
        self.footer_visible = visible;
        self.relayout()
    }

    pub fn is_footer_visible(&self) -> bool {
        self.footer_visible
    }

    pub fn set_handle_visible(&mut self, visible: bool) -> TrayResult<()> {
        self.handle_visible = visible;
        self.relayout()
    }

    pub fn is_handle_visible(&self) -> bool {
        self.handle_visible
    }

    /// Height of the slot stack.
    pub fn measure(&self) -> u32 {
        self.container.content_extent()
    }

    /// Place the stack with its top-left corner at `origin`.
    pub fn layout(&mut self, origin: Point) {
        let size = Size::new(self.container.bounds().size.width, self.measure());
        self.container.set_bounds(Rectangle::new(origin, size));
        self.place_children();
    }

    /// Band the drag handle is drawn in, if the handle is visible.
    pub fn handle_band(&self) -> Option<Rectangle> {
        if self.handle_visible {
            self.container.child_bounds(HANDLE_SLOT)
        } else {
            None
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.container.is_dirty()
            || self.title.is_dirty()
            || self.footer.is_dirty()
            || self.content.as_ref().is_some_and(|v| v.element().is_dirty())
    }

    pub fn mark_clean(&mut self) {
        self.container.mark_clean();
        self.title.mark_clean();
        self.footer.mark_clean();
        if let Some(view) = self.content.as_mut() {
            view.element_mut().mark_clean();
        }
    }

    pub fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        if self.title_visible {
            self.title.draw(display)?;
        }
        if let Some(view) = &self.content {
            view.element().draw(display)?;
        }
        if self.footer_visible {
            self.footer.draw(display)?;
        }
        Ok(())
    }

    /// Offer a touch to the footer, then to the content.
    pub fn handle_touch(&mut self, event: TouchEvent) -> TouchResult {
        if self.footer_visible {
            match self.footer.handle_touch(event) {
                TouchResult::NotHandled => {}
                handled => return handled,
            }
        }
        match self.content.as_mut() {
            Some(view) => view.element_mut().handle_touch(event),
            None => TouchResult::NotHandled,
        }
    }

    fn relayout(&mut self) -> TrayResult<()> {
        let band = if self.handle_visible { HANDLE_BAND_HEIGHT_PX } else { 0 };
        let title = if self.title_visible { self.title.preferred_height() } else { 0 };
        let content = self
            .content
            .as_ref()
            .map_or(0, |v| v.element().preferred_size().height);
        let footer = if self.footer_visible { FOOTER_HEIGHT_PX } else { 0 };

        self.container.set_height(HANDLE_SLOT, band)?;
        self.container.set_height(TITLE_SLOT, title)?;
        self.container.set_height(CONTENT_SLOT, content)?;
        self.container.set_height(FOOTER_SLOT, footer)?;

        let origin = self.container.bounds().top_left;
        self.layout(origin);
        Ok(())
    }

    fn place_children(&mut self) {
        if let Some(bounds) = self.container.child_bounds(TITLE_SLOT) {
            self.title.set_bounds(bounds);
        }
        if let (Some(bounds), Some(view)) =
            (self.container.child_bounds(CONTENT_SLOT), self.content.as_mut())
        {
            view.element_mut().set_bounds(bounds);
        }
        if let Some(bounds) = self.container.child_bounds(FOOTER_SLOT) {
            self.footer.set_bounds(bounds);
        }
    }
}
