//! Static gauge faces.
//!
//! The face holds everything that does not depend on the current value: the
//! arc or track, the ticks and the tick labels. It is rendered once per
//! configuration at supersampled resolution and then only ever copied.

use crate::config::{GaugeConfig, LinearLabels};
use crate::error::Result;
use crate::framebuffer::Framebuffer;
use crate::geometry::Point;
use crate::label::{format_label, format_signed_label};
use crate::layout::{Layout, LinearLayout, RadialLayout};
use crate::render::{Canvas, Surface};
use crate::scale::Scale;
use crate::text::{TextAnchor, TextRenderer};
use crate::ticks::TickSet;
use log::debug;

/// A rendered, versioned face bitmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face {
    bitmap: Framebuffer,
    version: u64,
}

impl Face {
    /// Render the face for `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the face bitmap cannot be allocated.
    pub fn render(
        config: &GaugeConfig,
        layout: &Layout,
        ticks: &TickSet,
        text: &dyn TextRenderer,
        version: u64,
    ) -> Result<Self> {
        let (width, height) = layout.face_size();
        let mut bitmap = Framebuffer::new(width, height)?;
        {
            let mut canvas = Canvas::new(&mut bitmap, text);
            match layout {
                Layout::Radial(radial) => draw_radial_face(&mut canvas, config, radial, ticks),
                Layout::Linear(linear) => draw_linear_face(&mut canvas, config, linear, ticks),
            }
        }
        debug!("rendered face v{version}: {width}x{height}, {} ticks", ticks.len());
        Ok(Self { bitmap, version })
    }

    /// The supersampled face bitmap.
    #[must_use]
    pub fn bitmap(&self) -> &Framebuffer {
        &self.bitmap
    }

    /// Configuration generation this face was rendered for.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }
}

/// Draw the arc, ticks and tick labels of a radial dial.
pub fn draw_radial_face(surface: &mut dyn Surface, config: &GaugeConfig, layout: &RadialLayout, ticks: &TickSet) {
    let (start, end) = layout.sweep.range();
    surface.draw_arc(layout.arc_bounds, start, end, config.scale_color, layout.arc_width);

    for tick in ticks.iter() {
        let (outer, inner) = layout.tick_segment(tick.value, tick.is_major);
        surface.draw_line(outer, inner, config.indicator_color, layout.tick_stroke);
        if tick.is_major {
            surface.draw_text(
                layout.label_position(tick.value),
                &format_label(tick.value, &config.label_suffix),
                TextAnchor::MiddleMiddle,
                layout.tick_font_size,
                config.indicator_color,
            );
        }
    }
}

/// Draw the track, ticks and labels of a linear meter.
pub fn draw_linear_face(surface: &mut dyn Surface, config: &GaugeConfig, layout: &LinearLayout, ticks: &TickSet) {
    surface.draw_rect(layout.track, config.scale_color);

    let suffix = &config.label_suffix;
    if layout.labels == LinearLabels::Extremes {
        let (top, bottom) = layout.extreme_label_positions();
        for (position, value, anchor) in [
            (top, config.max_value, TextAnchor::MiddleTop),
            (bottom, config.min_value, TextAnchor::MiddleBottom),
        ] {
            surface.draw_text(
                position,
                &format_signed_label(value, suffix),
                anchor,
                layout.tick_font_size,
                config.indicator_color,
            );
        }
    }

    for tick in ticks.iter() {
        let span = if tick.is_major { layout.major_tick } else { layout.minor_tick };
        let y = layout.offset_for(tick.value) as f32;
        surface.draw_line(
            Point::new(span.x_start, y),
            Point::new(span.x_end, y),
            config.indicator_color,
            layout.tick_stroke,
        );

        if tick.is_major && layout.labels == LinearLabels::EveryMajor {
            surface.draw_text(
                layout.major_label_position(tick.value),
                &format_signed_label(tick.value, suffix),
                TextAnchor::RightMiddle,
                layout.tick_font_size,
                config.indicator_color,
            );
        }
    }
}
