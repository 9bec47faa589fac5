//! Cached sheet background composition
//!
//! The sheet background is layered: a fill with only the top corners
//! rounded, an optional shadow band above the top edge and an optional
//! outline stroke. Composed backgrounds are cached per flag combination and
//! shared through `Rc`, so asking again for the same flags returns the very
//! same object.

use alloc::rc::Rc;
use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{
    CornerRadiiBuilder, PrimitiveStyleBuilder, Rectangle, RoundedRectangle, StrokeAlignment,
};
use heapless::LinearMap;
use log::{debug, warn};

use crate::ui::{ColorResolver, ColorToken};

/// Height of the shadow band drawn above the sheet's top edge. The sheet
/// reserves this much top padding so siblings never cover the shadow.
pub const SHADOW_INSET_PX: u32 = 6;

const STROKE_WIDTH_PX: u32 = 1;

/// Cache key: the corner radius is fixed per composer, so only the flags
/// take part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BackgroundKey {
    pub has_shadow: bool,
    pub has_stroke: bool,
}

/// Resolved description of a sheet background.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetBackground {
    corner_radius: u32,
    fill: Rgb565,
    /// Near and far colors of the shadow gradient
    shadow: Option<(Rgb565, Rgb565)>,
    stroke: Option<Rgb565>,
}

impl SheetBackground {
    pub fn corner_radius(&self) -> u32 {
        self.corner_radius
    }

    pub fn fill(&self) -> Rgb565 {
        self.fill
    }

    pub fn has_shadow(&self) -> bool {
        self.shadow.is_some()
    }

    pub fn has_stroke(&self) -> bool {
        self.stroke.is_some()
    }

    /// Area touched when drawing over `sheet`, including the shadow band.
    pub fn paint_area(&self, sheet: Rectangle) -> Rectangle {
        if self.shadow.is_none() {
            return sheet;
        }
        Rectangle::new(
            sheet.top_left - Point::new(0, SHADOW_INSET_PX as i32),
            Size::new(sheet.size.width, sheet.size.height + SHADOW_INSET_PX),
        )
    }

    /// Draw the background for a sheet occupying `sheet`.
    pub fn draw<D: DrawTarget<Color = Rgb565>>(
        &self,
        sheet: Rectangle,
        display: &mut D,
    ) -> Result<(), D::Error> {
        if let Some((near, far)) = self.shadow {
            self.draw_shadow(sheet, near, far, display)?;
        }

        let corners = CornerRadiiBuilder::new()
            .top(Size::new(self.corner_radius, self.corner_radius))
            .build();

        RoundedRectangle::new(sheet, corners)
            .into_styled(PrimitiveStyleBuilder::new().fill_color(self.fill).build())
            .draw(display)?;

        if let Some(stroke) = self.stroke {
            // Extend past the bottom edge and clip, so only the top and side
            // outline remains visible.
            let outline = Rectangle::new(
                sheet.top_left,
                Size::new(sheet.size.width, sheet.size.height + STROKE_WIDTH_PX),
            );
            let style = PrimitiveStyleBuilder::new()
                .stroke_color(stroke)
                .stroke_width(STROKE_WIDTH_PX)
                .stroke_alignment(StrokeAlignment::Inside)
                .build();

            RoundedRectangle::new(outline, corners)
                .into_styled(style)
                .draw(&mut display.clipped(&sheet))?;
        }

        Ok(())
    }

    fn draw_shadow<D: DrawTarget<Color = Rgb565>>(
        &self,
        sheet: Rectangle,
        near: Rgb565,
        far: Rgb565,
        display: &mut D,
    ) -> Result<(), D::Error> {
        let top = sheet.top_left.y - SHADOW_INSET_PX as i32;
        for row in 0..SHADOW_INSET_PX {
            let t = (row + 1) as f32 / SHADOW_INSET_PX as f32;
            display.fill_solid(
                &Rectangle::new(
                    Point::new(sheet.top_left.x, top + row as i32),
                    Size::new(sheet.size.width, 1),
                ),
                blend(far, near, t),
            )?;
        }
        Ok(())
    }
}

fn blend(from: Rgb565, to: Rgb565, t: f32) -> Rgb565 {
    let t = t.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t + 0.5) as u8;
    Rgb565::new(
        mix(from.r(), to.r()),
        mix(from.g(), to.g()),
        mix(from.b(), to.b()),
    )
}

/// Builds and caches sheet backgrounds for one presentation.
pub struct BackgroundComposer {
    corner_radius: u32,
    cache: LinearMap<BackgroundKey, Rc<SheetBackground>, 4>,
}

impl BackgroundComposer {
    pub fn new(corner_radius: u32) -> Self {
        Self {
            corner_radius,
            cache: LinearMap::new(),
        }
    }

    /// Return the background for the given flags, composing it on a cache
    /// miss. Never fails: unresolved tokens fall back inside the resolver.
    pub fn compose(
        &mut self,
        resolver: &mut ColorResolver,
        has_shadow: bool,
        has_stroke: bool,
    ) -> Rc<SheetBackground> {
        let key = BackgroundKey {
            has_shadow,
            has_stroke,
        };
        if let Some(background) = self.cache.get(&key) {
            return background.clone();
        }

        debug!("Composing sheet background {:?}", key);
        let background = Rc::new(SheetBackground {
            corner_radius: self.corner_radius,
            fill: resolver.resolve(ColorToken::PrimaryBackground),
            shadow: has_shadow.then(|| {
                (
                    resolver.resolve(ColorToken::NeutralShadow),
                    resolver.resolve(ColorToken::Scrim),
                )
            }),
            stroke: has_stroke.then(|| resolver.resolve(ColorToken::SubtleStroke)),
        });

        if self.cache.insert(key, background.clone()).is_err() {
            warn!("Background cache full, {:?} left uncached", key);
        }
        background
    }

    pub fn corner_radius(&self) -> u32 {
        self.corner_radius
    }

    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }
}
