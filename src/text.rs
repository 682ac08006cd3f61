//! Text drawing for tick and value labels.
//!
//! Text goes through the [`TextRenderer`] trait so a host can plug in exact
//! glyph metrics. [`BitmapFont`] is always available and needs no font file;
//! [`RustTypeText`] (feature `rusttype`) rasterizes TrueType/OpenType data the
//! host supplies.

use crate::color::Rgba;
use crate::framebuffer::Framebuffer;
use crate::geometry::{Point, Rect};
use crate::label::{estimate_width, CHAR_WIDTH_FACTOR};
use crate::render::fill_rect_aa;
use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::geometry::{OriginDimensions, Point as GlyphPoint, Size};
use embedded_graphics::mono_font::{iso_8859_1::FONT_6X10, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::text::{Baseline, Text};
use embedded_graphics::{Drawable, Pixel};
use std::convert::Infallible;
use std::fmt;

/// Which point of the text box a draw position refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAnchor {
    /// Horizontal and vertical centre.
    #[default]
    MiddleMiddle,
    /// Horizontal centre, top edge.
    MiddleTop,
    /// Horizontal centre, bottom edge.
    MiddleBottom,
    /// Right edge, vertical centre.
    RightMiddle,
    /// Left edge, vertical centre.
    LeftMiddle,
}

impl TextAnchor {
    /// Fractions of the extent to step back from the anchor point.
    fn factors(self) -> (f32, f32) {
        match self {
            Self::MiddleMiddle => (0.5, 0.5),
            Self::MiddleTop => (0.5, 0.0),
            Self::MiddleBottom => (0.5, 1.0),
            Self::RightMiddle => (1.0, 0.5),
            Self::LeftMiddle => (0.0, 0.5),
        }
    }

    /// Top-left corner of a text box of `extent` anchored at `position`.
    #[must_use]
    pub fn origin(self, position: Point, extent: TextExtent) -> Point {
        let (fx, fy) = self.factors();
        Point::new(position.x - extent.width * fx, position.y - extent.height * fy)
    }
}

/// Measured size of a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextExtent {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels (ascender to descender).
    pub height: f32,
}

/// Measures and draws text into a framebuffer.
pub trait TextRenderer: fmt::Debug {
    /// Size of `text` at `font_size`.
    fn measure(&self, text: &str, font_size: f32) -> TextExtent;

    /// Draw `text` so that `anchor` of its box lands on `position`.
    fn draw(
        &self,
        fb: &mut Framebuffer,
        position: Point,
        text: &str,
        anchor: TextAnchor,
        font_size: f32,
        color: Rgba,
    );
}

/// Glyph cells per character advance in [`FONT_6X10`].
const CELLS_PER_ADVANCE: f32 = 6.0;

/// Routes the on-pixels of a monospace glyph run onto a framebuffer, one
/// `cell`-sized square per glyph pixel.
struct CellTarget<'a> {
    fb: &'a mut Framebuffer,
    origin: Point,
    cell: f32,
    color: Rgba,
    size: Size,
}

impl OriginDimensions for CellTarget<'_> {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for CellTarget<'_> {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> std::result::Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            if color.is_off() {
                continue;
            }
            let cell_rect = Rect::new(
                self.origin.x + coord.x as f32 * self.cell,
                self.origin.y + coord.y as f32 * self.cell,
                self.cell,
                self.cell,
            );
            fill_rect_aa(self.fb, cell_rect, self.color);
        }
        Ok(())
    }
}

/// Built-in bitmap font.
///
/// Draws the ISO 8859-1 6x10 monospace font from `embedded-graphics`, scaled
/// so that one character advances `0.6 * font_size` (the factor
/// [`crate::label::estimate_width`] uses) and a line is `font_size` tall.
/// Characters outside Latin-1 draw as `?`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BitmapFont;

impl BitmapFont {
    /// Create the bitmap font.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl TextRenderer for BitmapFont {
    fn measure(&self, text: &str, font_size: f32) -> TextExtent {
        TextExtent { width: estimate_width(text, font_size), height: font_size }
    }

    fn draw(
        &self,
        fb: &mut Framebuffer,
        position: Point,
        text: &str,
        anchor: TextAnchor,
        font_size: f32,
        color: Rgba,
    ) {
        if font_size <= 0.0 || text.is_empty() {
            return;
        }
        let origin = anchor.origin(position, self.measure(text, font_size));
        let cell = font_size * CHAR_WIDTH_FACTOR / CELLS_PER_ADVANCE;
        let glyphs = FONT_6X10.character_size;
        let columns = text.chars().count() as u32 * glyphs.width;
        let mut target = CellTarget { fb, origin, cell, color, size: Size::new(columns, glyphs.height) };

        let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
        let run = Text::with_baseline(text, GlyphPoint::zero(), style, Baseline::Top);
        if let Err(never) = run.draw(&mut target) {
            match never {}
        }
    }
}

#[cfg(feature = "rusttype")]
pub use self::truetype::RustTypeText;

#[cfg(feature = "rusttype")]
mod truetype {
    use super::{TextAnchor, TextExtent, TextRenderer};
    use crate::color::Rgba;
    use crate::error::{Error, Result};
    use crate::framebuffer::Framebuffer;
    use crate::geometry::Point;
    use rusttype::{point, Font, Scale};
    use std::fmt;

    /// Text backed by a TrueType/OpenType font.
    pub struct RustTypeText {
        font: Font<'static>,
    }

    impl RustTypeText {
        /// Parse font data.
        ///
        /// # Errors
        ///
        /// Returns [`Error::Font`] if the bytes are not a usable font.
        pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
            let font = Font::try_from_vec(data)
                .ok_or_else(|| Error::Font("unrecognised font data".to_string()))?;
            Ok(Self { font })
        }
    }

    impl fmt::Debug for RustTypeText {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.debug_struct("RustTypeText").field("glyphs", &self.font.glyph_count()).finish()
        }
    }

    impl TextRenderer for RustTypeText {
        fn measure(&self, text: &str, font_size: f32) -> TextExtent {
            let scale = Scale::uniform(font_size);
            let v_metrics = self.font.v_metrics(scale);
            let width = self
                .font
                .layout(text, scale, point(0.0, 0.0))
                .last()
                .map_or(0.0, |g| g.position().x + g.unpositioned().h_metrics().advance_width);
            TextExtent { width, height: v_metrics.ascent - v_metrics.descent }
        }

        fn draw(
            &self,
            fb: &mut Framebuffer,
            position: Point,
            text: &str,
            anchor: TextAnchor,
            font_size: f32,
            color: Rgba,
        ) {
            let scale = Scale::uniform(font_size);
            let v_metrics = self.font.v_metrics(scale);
            let origin = anchor.origin(position, self.measure(text, font_size));

            for glyph in self.font.layout(text, scale, point(origin.x, origin.y + v_metrics.ascent)) {
                if let Some(bb) = glyph.pixel_bounding_box() {
                    glyph.draw(|gx, gy, v| {
                        fb.plot(bb.min.x + gx as i32, bb.min.y + gy as i32, color, v);
                    });
                }
            }
        }
    }

}
