// src/ui/components/text.rs
//! Text components for titles and body copy

use crate::ui::core::{DirtyRegion, Drawable};
use crate::ui::styling::Style;
use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle, ascii::FONT_6X10};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::{Alignment, Baseline, Text as EgText, TextStyleBuilder};

/// Text size variants
///
/// - `Small`: 5x8 font
/// - `Medium`: 6x10 font (default)
/// - `Large`: 10x20 font
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextSize {
    Small,
    Medium,
    Large,
}

impl TextSize {
    pub fn font(&self) -> &'static MonoFont<'static> {
        match self {
            TextSize::Small => &embedded_graphics::mono_font::ascii::FONT_5X8,
            TextSize::Medium => &FONT_6X10,
            TextSize::Large => &embedded_graphics::mono_font::ascii::FONT_10X20,
        }
    }

    /// Height of one line of this size in pixels.
    pub fn line_height(&self) -> u32 {
        self.font().character_size.height
    }
}

/// Copy `text` into a bounded string, dropping whatever does not fit.
pub(crate) fn bounded<const N: usize>(text: &str) -> heapless::String<N> {
    let mut out = heapless::String::new();
    for ch in text.chars() {
        if out.push(ch).is_err() {
            break;
        }
    }
    out
}

/// Single-line text component
///
/// Supports up to 128 characters of text content; longer input is
/// truncated.
///
/// # Examples
/// ```ignore
/// let title = TextComponent::new(
///     Rectangle::new(Point::new(16, 24), Size::new(288, 20)),
///     "Pilih Pekan",
///     TextSize::Large,
/// )
/// .with_alignment(Alignment::Left);
/// ```
pub struct TextComponent {
    bounds: Rectangle,
    text: heapless::String<128>,
    size: TextSize,
    alignment: Alignment,
    style: Style,
    dirty: bool,
}

impl TextComponent {
    pub fn new(bounds: Rectangle, text: &str, size: TextSize) -> Self {
        Self {
            bounds,
            text: bounded(text),
            size,
            alignment: Alignment::Left,
            style: Style::default(),
            dirty: true,
        }
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Update the displayed text, marking the component dirty if it changed.
    pub fn set_text(&mut self, text: &str) {
        let new_text = bounded(text);
        if self.text != new_text {
            self.text = new_text;
            self.dirty = true;
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn size(&self) -> TextSize {
        self.size
    }

    pub fn set_bounds(&mut self, bounds: Rectangle) {
        if self.bounds != bounds {
            self.bounds = bounds;
            self.dirty = true;
        }
    }

    /// Height needed to show one line including vertical padding.
    pub fn preferred_height(&self) -> u32 {
        self.size.line_height() + self.style.padding.vertical()
    }

    fn text_position(&self) -> Point {
        let y = self.bounds.top_left.y + self.style.padding.top as i32;
        match self.alignment {
            Alignment::Left => Point::new(self.bounds.top_left.x + self.style.padding.left as i32, y),
            Alignment::Center => Point::new(self.bounds.center().x, y),
            Alignment::Right => Point::new(
                self.bounds.top_left.x + self.bounds.size.width as i32
                    - self.style.padding.right as i32,
                y,
            ),
        }
    }
}

impl Drawable for TextComponent {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        if self.style.background_color.is_some() {
            self.bounds
                .into_styled(self.style.to_primitive_style())
                .draw(display)?;
        }

        let text_color = self.style.foreground_color.unwrap_or(Rgb565::WHITE);
        let character_style = MonoTextStyle::new(self.size.font(), text_color);
        let text_style = TextStyleBuilder::new()
            .alignment(self.alignment)
            .baseline(Baseline::Top)
            .build();

        EgText::with_text_style(&self.text, self.text_position(), character_style, text_style)
            .draw(display)?;

        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn dirty_region(&self) -> Option<DirtyRegion> {
        if self.dirty {
            Some(DirtyRegion::new(self.bounds))
        } else {
            None
        }
    }
}

/// Multi-line text component with word wrapping
pub struct MultiLineText {
    bounds: Rectangle,
    lines: heapless::Vec<heapless::String<64>, 16>,
    size: TextSize,
    line_spacing: u32,
    style: Style,
    dirty: bool,
}

impl MultiLineText {
    pub fn new(bounds: Rectangle, text: &str, size: TextSize) -> Self {
        let mut component = Self {
            bounds,
            lines: heapless::Vec::new(),
            size,
            line_spacing: 2,
            style: Style::default(),
            dirty: true,
        };

        component.set_text(text);
        component
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Height needed to show every wrapped line.
    pub fn preferred_height(&self) -> u32 {
        let count = self.lines.len() as u32;
        let line = self.size.line_height();
        count * line + count.saturating_sub(1) * self.line_spacing + self.style.padding.vertical()
    }

    pub fn set_text(&mut self, text: &str) {
        self.lines.clear();

        let char_width = self.size.font().character_size.width + 1;
        let max_chars = (self.bounds.size.width / char_width).max(1) as usize;

        for line in text.split('\n') {
            if line.len() <= max_chars {
                self.lines.push(bounded(line)).ok();
                continue;
            }

            let mut current_line = heapless::String::<64>::new();
            for word in line.split_whitespace() {
                if current_line.len() + word.len() < max_chars {
                    if !current_line.is_empty() {
                        current_line.push(' ').ok();
                    }
                    current_line.push_str(word).ok();
                } else {
                    if !current_line.is_empty() {
                        self.lines.push(current_line.clone()).ok();
                    }
                    current_line = bounded(word);
                }
            }
            if !current_line.is_empty() {
                self.lines.push(current_line).ok();
            }
        }

        self.dirty = true;
    }

    pub fn set_bounds(&mut self, bounds: Rectangle) {
        if self.bounds != bounds {
            self.bounds = bounds;
            self.dirty = true;
        }
    }
}

impl Drawable for MultiLineText {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        if self.style.background_color.is_some() {
            self.bounds
                .into_styled(self.style.to_primitive_style())
                .draw(display)?;
        }

        let text_color = self.style.foreground_color.unwrap_or(Rgb565::WHITE);
        let character_style = MonoTextStyle::new(self.size.font(), text_color);
        let text_style = TextStyleBuilder::new().baseline(Baseline::Top).build();
        let line_height = self.size.line_height() + self.line_spacing;

        let mut y = self.bounds.top_left.y + self.style.padding.top as i32;
        let x = self.bounds.top_left.x + self.style.padding.left as i32;
        let bottom = self.bounds.top_left.y + self.bounds.size.height as i32;

        for line in &self.lines {
            if y + self.size.line_height() as i32 > bottom {
                break;
            }
            EgText::with_text_style(line, Point::new(x, y), character_style, text_style)
                .draw(display)?;
            y += line_height as i32;
        }

        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
