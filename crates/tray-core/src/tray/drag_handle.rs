//! Grab handle shown at the top of the sheet

use alloc::rc::Rc;
use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle, RoundedRectangle};

use crate::ui::{ColorResolver, ColorToken};

pub const HANDLE_WIDTH_PX: u32 = 32;
pub const HANDLE_HEIGHT_PX: u32 = 4;

/// Height of the band the handle is centered in.
pub const HANDLE_BAND_HEIGHT_PX: u32 = 16;

/// Resolved handle pill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragHandle {
    color: Rgb565,
}

impl DragHandle {
    pub fn color(&self) -> Rgb565 {
        self.color
    }

    /// Pill rectangle for a handle band.
    pub fn area(band: Rectangle) -> Rectangle {
        let size = Size::new(HANDLE_WIDTH_PX, HANDLE_HEIGHT_PX);
        let offset = Point::new(
            (band.size.width.saturating_sub(HANDLE_WIDTH_PX) / 2) as i32,
            (band.size.height.saturating_sub(HANDLE_HEIGHT_PX) / 2) as i32,
        );
        Rectangle::new(band.top_left + offset, size)
    }

    pub fn draw<D: DrawTarget<Color = Rgb565>>(
        &self,
        band: Rectangle,
        display: &mut D,
    ) -> Result<(), D::Error> {
        let radius = HANDLE_HEIGHT_PX / 2;
        RoundedRectangle::with_equal_corners(Self::area(band), Size::new(radius, radius))
            .into_styled(PrimitiveStyle::with_fill(self.color))
            .draw(display)
    }
}

/// Builds the handle once per presentation.
#[derive(Default)]
pub struct DragHandleRenderer {
    cached: Option<Rc<DragHandle>>,
}

impl DragHandleRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&mut self, resolver: &mut ColorResolver) -> Rc<DragHandle> {
        self.cached
            .get_or_insert_with(|| {
                Rc::new(DragHandle {
                    color: resolver.resolve(ColorToken::TertiaryForeground),
                })
            })
            .clone()
    }

    pub fn clear(&mut self) {
        self.cached = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::FrameBuffer;
    use crate::ui::ColorPalette;

    #[test]
    fn test_handle_is_built_once() {
        let mut resolver = ColorResolver::new(ColorPalette::dark());
        let mut renderer = DragHandleRenderer::new();

        let a = renderer.handle(&mut resolver);
        let b = renderer.handle(&mut resolver);
        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!(a.color(), ColorPalette::dark().text_tertiary);
    }

    #[test]
    fn test_handle_centered_in_band() {
        let band = Rectangle::new(Point::new(0, 100), Size::new(320, HANDLE_BAND_HEIGHT_PX));
        assert_eq!(
            DragHandle::area(band),
            Rectangle::new(Point::new(144, 106), Size::new(32, 4))
        );

        let mut resolver = ColorResolver::new(ColorPalette::dark());
        let handle = DragHandleRenderer::new().handle(&mut resolver);
        let mut fb = FrameBuffer::default();
        handle.draw(band, &mut fb).unwrap();

        assert_eq!(fb.pixel(160, 107), Some(handle.color()));
        assert_eq!(fb.pixel(160, 102), Some(Rgb565::BLACK));
    }
}
