//! RAM-backed framebuffer with per-pixel change detection.
//!
//! The tray and the screen behind it draw into this buffer instead of the
//! display. After drawing completes, only the rectangular region containing
//! changed pixels is flushed to the real display in one transfer.

use alloc::vec;
use alloc::vec::Vec;
use core::convert::Infallible;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::debug;

use crate::ui::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX};

/// Bounding box of pixels that have changed since the last flush.
#[derive(Debug, Clone, Copy)]
struct DirtyRect {
    min_x: usize,
    min_y: usize,
    max_x: usize,
    max_y: usize,
}

impl DirtyRect {
    fn expand(&mut self, x: usize, y: usize) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    fn from_point(x: usize, y: usize) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }
}

/// Heap-allocated framebuffer implementing `DrawTarget<Color = Rgb565>`.
pub struct FrameBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Rgb565>,
    dirty: Option<DirtyRect>,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new(DISPLAY_WIDTH_PX as usize, DISPLAY_HEIGHT_PX as usize)
    }
}

impl FrameBuffer {
    /// Allocate a new framebuffer filled with black pixels.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb565::BLACK; width * height],
            dirty: None,
        }
    }

    /// Read back a pixel; `None` outside the buffer.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb565> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    /// Region changed since the last flush, if any.
    pub fn dirty_area(&self) -> Option<Rectangle> {
        self.dirty.map(|rect| {
            Rectangle::new(
                Point::new(rect.min_x as i32, rect.min_y as i32),
                Size::new(
                    (rect.max_x - rect.min_x + 1) as u32,
                    (rect.max_y - rect.min_y + 1) as u32,
                ),
            )
        })
    }

    #[inline]
    fn set_pixel(&mut self, x: usize, y: usize, color: Rgb565) {
        let idx = y * self.width + x;
        if self.pixels[idx] != color {
            self.pixels[idx] = color;
            match &mut self.dirty {
                Some(rect) => rect.expand(x, y),
                None => self.dirty = Some(DirtyRect::from_point(x, y)),
            }
        }
    }

    /// Flush the dirty region to a display, then reset the dirty state.
    ///
    /// If nothing changed, this is a no-op.
    pub fn flush<D>(&mut self, display: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let Some(area) = self.dirty_area() else {
            return Ok(());
        };
        self.dirty = None;

        debug!(
            "Flushing {}x{} dirty region at ({}, {})",
            area.size.width, area.size.height, area.top_left.x, area.top_left.y
        );

        let pixels = &self.pixels;
        let stride = self.width;
        let min_x = area.top_left.x as usize;
        let width = area.size.width as usize;
        let rows = area.top_left.y as usize..area.top_left.y as usize + area.size.height as usize;
        let pixel_iter = rows.flat_map(move |y| {
            let row_start = y * stride + min_x;
            pixels[row_start..row_start + width].iter().copied()
        });

        display.fill_contiguous(&area, pixel_iter)
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(self.width as u32, self.height as u32)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            if coord.x >= 0
                && coord.y >= 0
                && (coord.x as usize) < self.width
                && (coord.y as usize) < self.height
            {
                self.set_pixel(coord.x as usize, coord.y as usize, color);
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let x_start = (area.top_left.x.max(0) as usize).min(self.width);
        let y_start = (area.top_left.y.max(0) as usize).min(self.height);
        let x_end = (area.top_left.x + area.size.width as i32).clamp(0, self.width as i32) as usize;
        let y_end = (area.top_left.y + area.size.height as i32).clamp(0, self.height as i32) as usize;

        for y in y_start..y_end {
            for x in x_start..x_end {
                self.set_pixel(x, y, color);
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        for y in 0..self.height {
            for x in 0..self.width {
                self.set_pixel(x, y, color);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::primitives::{Primitive, PrimitiveStyle};
    use embedded_graphics::Drawable;

    #[test]
    fn test_dirty_area_tracks_changed_pixels_only() {
        let mut fb = FrameBuffer::new(32, 32);
        assert!(fb.dirty_area().is_none());

        Rectangle::new(Point::new(4, 6), Size::new(3, 2))
            .into_styled(PrimitiveStyle::with_fill(Rgb565::RED))
            .draw(&mut fb)
            .unwrap();

        assert_eq!(
            fb.dirty_area(),
            Some(Rectangle::new(Point::new(4, 6), Size::new(3, 2)))
        );
        assert_eq!(fb.pixel(5, 7), Some(Rgb565::RED));
        assert_eq!(fb.pixel(40, 7), None);
    }

    #[test]
    fn test_flush_copies_dirty_region_and_resets() {
        let mut fb = FrameBuffer::new(16, 16);
        let mut target = FrameBuffer::new(16, 16);
        fb.fill_solid(&Rectangle::new(Point::new(2, 2), Size::new(2, 2)), Rgb565::GREEN)
            .unwrap();

        fb.flush(&mut target).unwrap();

        assert!(fb.dirty_area().is_none());
        assert_eq!(target.pixel(3, 3), Some(Rgb565::GREEN));
        assert_eq!(target.pixel(4, 4), Some(Rgb565::BLACK));
    }
}
