//! Indicator compositing.
//!
//! Each value update copies the cached face, draws the wedge (radial) or
//! marker (linear) at the value's position and scales the result down to
//! display size. The face itself is never touched.

use crate::config::GaugeConfig;
use crate::error::Result;
use crate::face::Face;
use crate::framebuffer::Framebuffer;
use crate::layout::{Layout, LinearLayout, RadialLayout};
use crate::render::{draw_arc_aa, fill_rect_aa};
use log::trace;

/// Render the display bitmap for `value` on top of `face`.
///
/// # Errors
///
/// Returns an error if the display bitmap cannot be produced.
pub fn render(face: &Face, layout: &Layout, config: &GaugeConfig, value: f64) -> Result<Framebuffer> {
    let mut canvas = face.bitmap().clone();
    match layout {
        Layout::Radial(radial) => {
            draw_wedge(&mut canvas, radial, config, value);
            finish_radial(&canvas, radial)
        }
        Layout::Linear(linear) => {
            draw_marker(&mut canvas, linear, config, value);
            finish_linear(canvas, linear)
        }
    }
}

fn draw_wedge(canvas: &mut Framebuffer, layout: &RadialLayout, config: &GaugeConfig, value: f64) {
    let angle = layout.angle_for(value);
    trace!("wedge at {angle:.2}° for value {value}");
    draw_arc_aa(
        canvas,
        layout.arc_bounds,
        angle - config.wedge_size,
        angle + config.wedge_size,
        config.indicator_color,
        layout.arc_width,
    );
}

fn finish_radial(canvas: &Framebuffer, layout: &RadialLayout) -> Result<Framebuffer> {
    let (width, height) = layout.display_size;
    if layout.supersampling == 1 {
        return canvas.crop(0, 0, width, height);
    }
    canvas.resize(width, width)?.crop(0, 0, width, height)
}

fn draw_marker(canvas: &mut Framebuffer, layout: &LinearLayout, config: &GaugeConfig, value: f64) {
    let rect = layout.wedge_rect(value);
    trace!("marker at y={:.2} for value {value}", rect.center().y);
    fill_rect_aa(canvas, rect, config.indicator_color);
}

fn finish_linear(canvas: Framebuffer, layout: &LinearLayout) -> Result<Framebuffer> {
    if layout.supersampling == 1 {
        return Ok(canvas);
    }
    let (width, height) = layout.display_size;
    canvas.resize(width, height)
}
