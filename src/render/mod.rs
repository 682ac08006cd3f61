//! Drawing surface and rasterization.
//!
//! Faces and indicators are drawn through the [`Surface`] trait, which exposes
//! exactly the primitives a gauge needs: arcs, straight strokes, filled
//! rectangles and anchored text. [`Canvas`] implements it over a
//! [`Framebuffer`] with analytic anti-aliasing and a pluggable
//! [`TextRenderer`].
//!
//! # Angle convention
//!
//! Arc angles are degrees measured clockwise from the 3 o'clock axis in
//! y-down bitmap space, so `-90` is 12 o'clock and `90` is 6 o'clock.

mod primitives;

pub use primitives::{draw_arc_aa, draw_thick_line_aa, fill_rect_aa};

use crate::color::Rgba;
use crate::framebuffer::Framebuffer;
use crate::geometry::{Point, Rect};
use crate::text::{TextAnchor, TextExtent, TextRenderer};

/// The drawing primitives gauges are rendered with.
pub trait Surface {
    /// Width and height in pixels.
    fn size(&self) -> (u32, u32);

    /// Stroke an arc of the circle inscribed in `bounds`, clockwise from
    /// `start_angle` to `end_angle`. The stroke lies inside `bounds`.
    fn draw_arc(&mut self, bounds: Rect, start_angle: f64, end_angle: f64, color: Rgba, stroke_width: f32);

    /// Stroke a straight line with square ends.
    fn draw_line(&mut self, from: Point, to: Point, color: Rgba, stroke_width: f32);

    /// Fill a rectangle.
    fn draw_rect(&mut self, bounds: Rect, color: Rgba);

    /// Draw text anchored at `position`.
    fn draw_text(&mut self, position: Point, text: &str, anchor: TextAnchor, font_size: f32, color: Rgba);

    /// Size `text` would occupy.
    fn measure_text(&self, text: &str, font_size: f32) -> TextExtent;
}

/// A [`Surface`] over a borrowed framebuffer.
#[derive(Debug)]
pub struct Canvas<'a> {
    fb: &'a mut Framebuffer,
    text: &'a dyn TextRenderer,
}

impl<'a> Canvas<'a> {
    /// Draw into `fb`, rendering text with `text`.
    pub fn new(fb: &'a mut Framebuffer, text: &'a dyn TextRenderer) -> Self {
        Self { fb, text }
    }

    /// The framebuffer being drawn into.
    #[must_use]
    pub fn framebuffer(&self) -> &Framebuffer {
        &*self.fb
    }
}

impl Surface for Canvas<'_> {
    fn size(&self) -> (u32, u32) {
        (self.fb.width(), self.fb.height())
    }

    fn draw_arc(&mut self, bounds: Rect, start_angle: f64, end_angle: f64, color: Rgba, stroke_width: f32) {
        draw_arc_aa(self.fb, bounds, start_angle, end_angle, color, stroke_width);
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Rgba, stroke_width: f32) {
        draw_thick_line_aa(self.fb, from, to, color, stroke_width);
    }

    fn draw_rect(&mut self, bounds: Rect, color: Rgba) {
        fill_rect_aa(self.fb, bounds, color);
    }

    fn draw_text(&mut self, position: Point, text: &str, anchor: TextAnchor, font_size: f32, color: Rgba) {
        self.text.draw(self.fb, position, text, anchor, font_size, color);
    }

    fn measure_text(&self, text: &str, font_size: f32) -> TextExtent {
        self.text.measure(text, font_size)
    }
}
