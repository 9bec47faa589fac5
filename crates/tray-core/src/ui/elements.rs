// src/ui/elements.rs
//! Concrete UI element enum and identified views.
//!
//! Layout slots need to own heterogeneous child widgets *without* trait
//! objects: `DrawTarget` is generic, which makes our `Drawable` trait not
//! object-safe. This enum is the pragmatic alternative and can grow as
//! needed.

use crate::ui::components::{Button, MultiLineText, TextComponent, TextSize};
use crate::ui::core::{Action, DirtyRegion, Drawable, TouchEvent, TouchPoint, TouchResult, Touchable};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

/// A concrete, layout-friendly UI element.
pub enum Element {
    Text(TextComponent),
    MultiLineText(MultiLineText),
    Button(Button),
    /// A layout-only element that draws nothing.
    Spacer {
        bounds: Rectangle,
        dirty: bool,
    },
}

impl Element {
    /// Preferred size used when the element is placed with wrap-height
    /// sizing.
    pub fn preferred_size(&self) -> Size {
        match self {
            Element::Text(t) => Size::new(t.bounds().size.width, t.preferred_height()),
            Element::MultiLineText(t) => {
                let height = t.preferred_height().max(t.bounds().size.height);
                Size::new(t.bounds().size.width, height)
            }
            _ => self.bounds().size,
        }
    }

    pub fn set_bounds(&mut self, bounds: Rectangle) {
        match self {
            Element::Text(t) => t.set_bounds(bounds),
            Element::MultiLineText(t) => t.set_bounds(bounds),
            Element::Button(b) => b.set_bounds(bounds),
            Element::Spacer { bounds: b, dirty } => {
                if *b != bounds {
                    *b = bounds;
                    *dirty = true;
                }
            }
        }
    }

    pub fn text(bounds: Rectangle, text: &str, size: TextSize) -> Self {
        Self::Text(TextComponent::new(bounds, text, size))
    }

    pub fn multiline(bounds: Rectangle, text: &str, size: TextSize) -> Self {
        Self::MultiLineText(MultiLineText::new(bounds, text, size))
    }

    pub fn button(bounds: Rectangle, label: &str, action: Action) -> Self {
        Self::Button(Button::new(bounds, label, action))
    }

    pub fn spacer(bounds: Rectangle) -> Self {
        Self::Spacer {
            bounds,
            dirty: true,
        }
    }
}

impl Drawable for Element {
    fn draw<D: DrawTarget<Color = embedded_graphics::pixelcolor::Rgb565>>(
        &self,
        display: &mut D,
    ) -> Result<(), D::Error> {
        match self {
            Element::Text(t) => t.draw(display),
            Element::MultiLineText(t) => t.draw(display),
            Element::Button(b) => b.draw(display),
            Element::Spacer { .. } => Ok(()),
        }
    }

    fn bounds(&self) -> Rectangle {
        match self {
            Element::Text(t) => t.bounds(),
            Element::MultiLineText(t) => t.bounds(),
            Element::Button(b) => b.bounds(),
            Element::Spacer { bounds, .. } => *bounds,
        }
    }

    fn is_dirty(&self) -> bool {
        match self {
            Element::Text(t) => t.is_dirty(),
            Element::MultiLineText(t) => t.is_dirty(),
            Element::Button(b) => b.is_dirty(),
            Element::Spacer { dirty, .. } => *dirty,
        }
    }

    fn mark_clean(&mut self) {
        match self {
            Element::Text(t) => t.mark_clean(),
            Element::MultiLineText(t) => t.mark_clean(),
            Element::Button(b) => b.mark_clean(),
            Element::Spacer { dirty, .. } => *dirty = false,
        }
    }

    fn mark_dirty(&mut self) {
        match self {
            Element::Text(t) => t.mark_dirty(),
            Element::MultiLineText(t) => t.mark_dirty(),
            Element::Button(b) => b.mark_dirty(),
            Element::Spacer { dirty, .. } => *dirty = true,
        }
    }

    fn dirty_region(&self) -> Option<DirtyRegion> {
        match self {
            Element::Text(t) => t.dirty_region(),
            Element::MultiLineText(t) => t.dirty_region(),
            Element::Button(b) => b.dirty_region(),
            Element::Spacer { bounds, dirty } => dirty.then(|| DirtyRegion::new(*bounds)),
        }
    }
}

impl Touchable for Element {
    fn contains_point(&self, point: TouchPoint) -> bool {
        self.bounds().contains(point.to_point())
    }

    fn handle_touch(&mut self, event: TouchEvent) -> TouchResult {
        match self {
            Element::Button(b) => b.handle_touch(event),
            Element::Text(_) | Element::MultiLineText(_) | Element::Spacer { .. } => {
                TouchResult::NotHandled
            }
        }
    }
}

/// Caller-chosen identity of a view placed into a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewId(pub u32);

/// An element with an identity, so slots can tell "the same view again"
/// apart from a replacement.
pub struct View {
    id: ViewId,
    element: Element,
}

impl View {
    pub fn new(id: ViewId, element: Element) -> Self {
        Self { id, element }
    }

    pub fn id(&self) -> ViewId {
        self.id
    }

    pub fn element(&self) -> &Element {
        &self.element
    }

    pub fn element_mut(&mut self) -> &mut Element {
        &mut self.element
    }

    pub fn into_element(self) -> Element {
        self.element
    }
}
