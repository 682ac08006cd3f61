//! Derived gauge geometry.
//!
//! A layout is computed once from a validated [`GaugeConfig`] and cached for
//! the gauge's lifetime. Face-space quantities are in supersampled pixels;
//! display-space quantities are in final output pixels.

use crate::config::{GaugeConfig, GaugeKind, LinearLabels, LinearOptions, RadialOptions};
use crate::error::{Error, Result};
use crate::geometry::{Point, Rect};
use crate::label::{auto_margin, max_label_len, tick_font_size, value_font_size, widest_label, TextMetrics};
use crate::scale::{LinearScale, Scale};
use crate::text::TextAnchor;
use log::debug;

/// Angle where the radial sweep starts (about 8 o'clock).
pub const START_ANGLE: f64 = -188.0;

/// Angle where the radial sweep ends (about 4 o'clock).
pub const END_ANGLE: f64 = 8.0;

/// Relative vertical position of the radial value label when the
/// `0.25 / (1 - cut_bottom)` rule does not apply.
pub const VALUE_LABEL_MAX_REL_Y: f64 = 0.9;

/// Gap between a linear meter and its value label, in display pixels.
pub const LINEAR_LABEL_GAP: u32 = 5;

/// Largest supersampled face side, in pixels.
pub const MAX_FACE_SIDE: u32 = 16_384;

/// Major tick length as a fraction of the radial arc width.
const RADIAL_MAJOR_TICK: f32 = 0.6;

/// Major tick length as a fraction of the linear track width.
const LINEAR_MAJOR_TICK: f32 = 0.6;

/// Minor linear tick length as a fraction of the major one.
const LINEAR_MINOR_TICK: f32 = 0.4;

/// Supersampled extent of a display dimension.
///
/// Rejects faces whose side would exceed [`MAX_FACE_SIDE`].
fn face_extent(field: &'static str, display: u32, supersampling: u32) -> Result<u32> {
    display
        .checked_mul(supersampling)
        .filter(|side| *side <= MAX_FACE_SIDE)
        .ok_or_else(|| {
            Error::config(
                field,
                format!("{display}px at {supersampling}x supersampling exceeds the {MAX_FACE_SIDE}px face limit"),
            )
        })
}

/// Relative vertical position of the radial value label.
///
/// `min(0.25 / (1 - cut_bottom), 0.9)`; an uncropped dial (`cut_bottom == 1`)
/// falls back to 0.9.
#[must_use]
pub fn value_label_rel_y(cut_bottom: f64) -> f64 {
    let visible_gap = 1.0 - cut_bottom;
    if visible_gap > 0.0 {
        (0.25 / visible_gap).min(VALUE_LABEL_MAX_REL_Y)
    } else {
        VALUE_LABEL_MAX_REL_Y
    }
}

/// Radial extent of a tick stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickRadii {
    /// Distance of the outer end from the dial centre.
    pub outer: f32,
    /// Distance of the inner end from the dial centre.
    pub inner: f32,
}

/// Horizontal extent of a linear tick stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSpan {
    /// Left end.
    pub x_start: f32,
    /// Right end.
    pub x_end: f32,
}

/// Where and how big the value label is drawn in display space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueLabelPlacement {
    /// Anchor point.
    pub position: Point,
    /// Anchor mode.
    pub anchor: TextAnchor,
    /// Font size in display pixels.
    pub font_size: f32,
    /// Extra width a snapshot needs to the right of the display bitmap.
    pub extra_width: u32,
}

/// Geometry of a radial dial.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialLayout {
    /// Value domain to sweep angle.
    pub sweep: LinearScale,
    /// Render scale.
    pub supersampling: u32,
    /// Side of the supersampled square face.
    pub face_side: u32,
    /// Margin reserved around the arc for tick labels.
    pub center_offset: f32,
    /// Square the arc is inscribed in.
    pub arc_bounds: Rect,
    /// Arc and wedge stroke width.
    pub arc_width: f32,
    /// Dial centre.
    pub center: Point,
    /// Outer radius of the arc.
    pub arc_radius: f32,
    /// Major tick extent.
    pub major_tick: TickRadii,
    /// Minor tick extent.
    pub minor_tick: TickRadii,
    /// Tick stroke width.
    pub tick_stroke: f32,
    /// Radius tick labels are centred on.
    pub label_radius: f32,
    /// Tick label font size.
    pub tick_font_size: f32,
    /// Fraction of the square kept after cropping.
    pub cut_bottom: f64,
    /// Output bitmap size.
    pub display_size: (u32, u32),
    /// Value label placement.
    pub value_label: ValueLabelPlacement,
}

impl RadialLayout {
    /// Derive the dial geometry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the box is too small to hold the
    /// tick labels and the arc, or the supersampled face is too large.
    pub fn new(config: &GaugeConfig, opts: &RadialOptions) -> Result<Self> {
        let ss = config.supersampling;
        let face_side = face_extent("box_length", opts.box_length, ss)?;
        let side = face_side as f32;

        let tick_font = tick_font_size(opts.box_length);
        let label_len = max_label_len(config.min_value, config.max_value, &config.label_suffix, false);
        let center_offset = auto_margin(label_len, tick_font as f32, ss);
        let arc_width = (opts.arc_width * ss as f32).round().max(1.0);

        let arc_radius = side / 2.0 - center_offset;
        if arc_radius <= arc_width {
            return Err(Error::config(
                "box_length",
                format!(
                    "{}px leaves no room for an arc of width {} inside {}px label margins",
                    opts.box_length, opts.arc_width, center_offset / ss as f32
                ),
            ));
        }

        let major_len = arc_width * RADIAL_MAJOR_TICK;
        let minor_len = major_len * 0.5;
        let centred = |len: f32| {
            let outer = arc_radius - (arc_width - len) / 2.0;
            TickRadii { outer, inner: outer - len }
        };

        let display_height = ((f64::from(opts.box_length) * opts.cut_bottom).round() as u32).max(1);
        let rel_y = value_label_rel_y(opts.cut_bottom);

        let layout = Self {
            sweep: LinearScale::new((config.min_value, config.max_value), (START_ANGLE, END_ANGLE))?,
            supersampling: ss,
            face_side,
            center_offset,
            arc_bounds: Rect::new(center_offset, center_offset, side - 2.0 * center_offset, side - 2.0 * center_offset),
            arc_width,
            center: Point::new(side / 2.0, side / 2.0),
            arc_radius,
            major_tick: centred(major_len),
            minor_tick: centred(minor_len),
            tick_stroke: ss as f32,
            label_radius: arc_radius + (center_offset / 2.0).round(),
            tick_font_size: (tick_font * ss) as f32,
            cut_bottom: opts.cut_bottom,
            display_size: (opts.box_length, display_height),
            value_label: ValueLabelPlacement {
                position: Point::new(opts.box_length as f32 / 2.0, (rel_y * f64::from(display_height)) as f32),
                anchor: TextAnchor::MiddleMiddle,
                font_size: value_font_size(opts.box_length) as f32,
                extra_width: 0,
            },
        };
        debug!(
            "radial layout: face {face_side}px, offset {center_offset}, arc r={arc_radius} w={arc_width}, display {:?}",
            layout.display_size
        );
        Ok(layout)
    }

    /// Sweep angle of `value`.
    #[must_use]
    pub fn angle_for(&self, value: f64) -> f64 {
        self.sweep.scale(value)
    }

    /// End points (outer, inner) of the tick stroke for `value`.
    #[must_use]
    pub fn tick_segment(&self, value: f64, is_major: bool) -> (Point, Point) {
        let radii = if is_major { self.major_tick } else { self.minor_tick };
        let angle = self.angle_for(value);
        (Point::polar(self.center, radii.outer, angle), Point::polar(self.center, radii.inner, angle))
    }

    /// Centre of the tick label for `value`.
    #[must_use]
    pub fn label_position(&self, value: f64) -> Point {
        Point::polar(self.center, self.label_radius, self.angle_for(value))
    }
}

/// Geometry of a linear meter.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearLayout {
    /// Value domain to vertical face offset; inverted so larger values sit higher.
    pub track_scale: LinearScale,
    /// Render scale.
    pub supersampling: u32,
    /// Supersampled face size.
    pub face_size: (u32, u32),
    /// Track rectangle; its top and bottom edges are the extreme values.
    pub track: Rect,
    /// Major tick extent.
    pub major_tick: TickSpan,
    /// Minor tick extent.
    pub minor_tick: TickSpan,
    /// Tick stroke width.
    pub tick_stroke: f32,
    /// Marker height.
    pub wedge_height: f32,
    /// Tick label font size.
    pub tick_font_size: f32,
    /// Tick label layout.
    pub labels: LinearLabels,
    /// Output bitmap size.
    pub display_size: (u32, u32),
    /// Value label placement.
    pub value_label: ValueLabelPlacement,
}

impl LinearLayout {
    /// Derive the meter geometry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the height leaves no room for the
    /// track between the label margins, or the supersampled face is too large.
    pub fn new(config: &GaugeConfig, opts: &LinearOptions) -> Result<Self> {
        let ss = config.supersampling;
        let s = ss as f32;
        let face_height = face_extent("height", opts.height, ss)?;
        let tick_font = tick_font_size(opts.height);
        let widest = widest_label(config.min_value, config.max_value, &config.label_suffix, true);
        let label_len = widest.chars().count();

        let width = opts
            .track_width
            .unwrap_or_else(|| (label_len as f32 * tick_font as f32 * 0.25).round() as u32)
            .max(1);
        let v_offset = tick_font + 2;
        let h_offset = ((label_len + 1) as f32 * tick_font as f32 * 0.5).round() as u32;
        let display_width = width.checked_add(h_offset).unwrap_or(u32::MAX);
        let face_width = face_extent("track_width", display_width, ss)?;

        if opts.height <= 2 * v_offset {
            return Err(Error::config(
                "height",
                format!("{}px leaves no room for a track between {v_offset}px label margins", opts.height),
            ));
        }

        let display_size = (display_width, opts.height);
        let track = Rect::new(
            h_offset as f32 * s,
            v_offset as f32 * s,
            width as f32 * s,
            (opts.height - 2 * v_offset) as f32 * s,
        );

        let span = |len: f32| {
            let mid = track.x + track.width / 2.0;
            TickSpan { x_start: mid - len / 2.0, x_end: mid + len / 2.0 }
        };
        let major_len = track.width * LINEAR_MAJOR_TICK;

        let value_font = value_font_size(opts.height) as f32;
        // Room for the widest value label plus one character of padding.
        let label_width = TextMetrics::estimate(&format!("{widest} "), value_font).width.ceil() as u32;

        let layout = Self {
            track_scale: LinearScale::new(
                (config.min_value, config.max_value),
                (f64::from(track.bottom()), f64::from(track.y)),
            )?,
            supersampling: ss,
            face_size: (face_width, face_height),
            track,
            major_tick: span(major_len),
            minor_tick: span(major_len * LINEAR_MINOR_TICK),
            tick_stroke: s,
            wedge_height: (config.wedge_size * 0.01 * f64::from(track.height)) as f32,
            tick_font_size: (tick_font * ss) as f32,
            labels: opts.labels,
            display_size,
            value_label: ValueLabelPlacement {
                position: Point::new(
                    (display_size.0 + LINEAR_LABEL_GAP) as f32 + label_width as f32 / 2.0,
                    opts.height as f32 / 2.0,
                ),
                anchor: TextAnchor::MiddleMiddle,
                font_size: value_font,
                extra_width: LINEAR_LABEL_GAP + label_width,
            },
        };
        debug!("linear layout: track {:?}, display {:?}", layout.track, layout.display_size);
        Ok(layout)
    }

    /// Vertical face offset of `value`; larger values sit higher.
    #[must_use]
    pub fn offset_for(&self, value: f64) -> f64 {
        self.track_scale.scale(value)
    }

    /// Centre of the marker for `value`, kept inside the track.
    #[must_use]
    pub fn wedge_center(&self, value: f64) -> f32 {
        let half = self.wedge_height / 2.0;
        let lo = self.track.y + half;
        let hi = self.track.bottom() - half;
        if lo > hi {
            return self.track.center().y;
        }
        (self.offset_for(value) as f32).clamp(lo, hi)
    }

    /// Marker rectangle for `value`.
    #[must_use]
    pub fn wedge_rect(&self, value: f64) -> Rect {
        let center = self.wedge_center(value);
        Rect::new(self.track.x, center - self.wedge_height / 2.0, self.track.width, self.wedge_height)
    }

    /// Anchor points of the maximum (top) and minimum (bottom) labels.
    #[must_use]
    pub fn extreme_label_positions(&self) -> (Point, Point) {
        let x = self.track.x + self.track.width / 2.0;
        (Point::new(x, 0.0), Point::new(x, self.face_size.1 as f32))
    }

    /// Right-middle anchor of the label beside the tick for `value`.
    #[must_use]
    pub fn major_label_position(&self, value: f64) -> Point {
        Point::new(self.track.x, self.offset_for(value) as f32)
    }
}

/// Geometry of either gauge kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Layout {
    /// Radial dial.
    Radial(RadialLayout),
    /// Linear meter.
    Linear(LinearLayout),
}

impl Layout {
    /// Derive the layout for a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the geometry does not fit.
    pub fn derive(config: &GaugeConfig) -> Result<Self> {
        match &config.kind {
            GaugeKind::Radial(opts) => RadialLayout::new(config, opts).map(Self::Radial),
            GaugeKind::Linear(opts) => LinearLayout::new(config, opts).map(Self::Linear),
        }
    }

    /// Position of `value` in the gauge's domain: degrees or face pixels.
    #[must_use]
    pub fn domain_position(&self, value: f64) -> f64 {
        match self {
            Self::Radial(layout) => layout.angle_for(value),
            Self::Linear(layout) => layout.offset_for(value),
        }
    }

    /// Supersampled face size.
    #[must_use]
    pub fn face_size(&self) -> (u32, u32) {
        match self {
            Self::Radial(layout) => (layout.face_side, layout.face_side),
            Self::Linear(layout) => layout.face_size,
        }
    }

    /// Output bitmap size.
    #[must_use]
    pub fn display_size(&self) -> (u32, u32) {
        match self {
            Self::Radial(layout) => layout.display_size,
            Self::Linear(layout) => layout.display_size,
        }
    }

    /// Value label placement.
    #[must_use]
    pub fn value_label(&self) -> ValueLabelPlacement {
        match self {
            Self::Radial(layout) => layout.value_label,
            Self::Linear(layout) => layout.value_label,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn radial(config: &GaugeConfig) -> RadialLayout {
        match Layout::derive(config).unwrap() {
            Layout::Radial(layout) => layout,
            Layout::Linear(_) => panic!("expected radial layout"),
        }
    }

    fn linear(config: &GaugeConfig) -> LinearLayout {
        match Layout::derive(config).unwrap() {
            Layout::Linear(layout) => layout,
            Layout::Radial(_) => panic!("expected linear layout"),
        }
    }

    #[test]
    fn test_value_label_rel_y() {
        assert_relative_eq!(value_label_rel_y(0.65), 0.25 / 0.35);
        assert_relative_eq!(value_label_rel_y(0.9), 0.9);
        assert_relative_eq!(value_label_rel_y(1.0), 0.9);
        assert_relative_eq!(value_label_rel_y(0.5), 0.5);
    }

    #[test]
    fn test_radial_default_geometry() {
        let layout = radial(&GaugeConfig::radial());
        assert_eq!(layout.face_side, 500);
        // "100.0" * 14pt * 0.5 * 2
        assert_relative_eq!(layout.center_offset, 70.0);
        assert_relative_eq!(layout.arc_radius, 180.0);
        assert_relative_eq!(layout.arc_width, 20.0);
        assert_eq!(layout.arc_bounds, Rect::new(70.0, 70.0, 360.0, 360.0));
        // Ticks are centred in the 20px band between radius 160 and 180.
        assert_relative_eq!(layout.major_tick.outer, 176.0);
        assert_relative_eq!(layout.major_tick.inner, 164.0);
        assert_relative_eq!(layout.minor_tick.outer, 173.0);
        assert_relative_eq!(layout.minor_tick.inner, 167.0);
        assert_relative_eq!(layout.label_radius, 215.0);
        assert_relative_eq!(layout.tick_font_size, 28.0);
        assert_eq!(layout.display_size, (250, 163));
        assert_relative_eq!(layout.value_label.font_size, 16.0);
    }

    #[test]
    fn test_radial_midpoint_angle() {
        let layout = radial(&GaugeConfig::radial().range(-1.0, 1.0).major_tick_step(0.1).minor_ticks_per_major(1));
        assert_eq!(layout.angle_for(0.0), -90.0);
        assert_eq!(layout.angle_for(-1.0), START_ANGLE);
        assert_eq!(layout.angle_for(1.0), END_ANGLE);
    }

    #[test]
    fn test_radial_tick_at_midpoint_points_up() {
        let layout = radial(&GaugeConfig::radial().range(-1.0, 1.0));
        let (outer, inner) = layout.tick_segment(0.0, true);
        assert_relative_eq!(outer.x, layout.center.x, epsilon = 1e-3);
        assert!(outer.y < inner.y);
        let label = layout.label_position(0.0);
        assert!(label.y < outer.y);
    }

    #[test]
    fn test_radial_minimum_on_left() {
        let layout = radial(&GaugeConfig::radial());
        let (min_tick, _) = layout.tick_segment(0.0, true);
        let (max_tick, _) = layout.tick_segment(100.0, true);
        assert!(min_tick.x < layout.center.x);
        assert!(max_tick.x > layout.center.x);
    }

    #[test]
    fn test_radial_rejects_tiny_box() {
        let err = Layout::derive(&GaugeConfig::radial().box_length(60)).unwrap_err();
        assert!(matches!(err, Error::Configuration { field: "box_length", .. }));
    }

    #[test]
    fn test_linear_default_geometry() {
        let layout = linear(&GaugeConfig::linear());
        // "+20.0" is 5 characters at the 14pt minimum tick font.
        assert_eq!(layout.display_size, (18 + 42, 250));
        assert_eq!(layout.track, Rect::new(42.0, 16.0, 18.0, 218.0));
        // 2% of the 218px track.
        assert_relative_eq!(layout.wedge_height, 4.36, epsilon = 1e-4);
        assert_relative_eq!(layout.major_tick.x_end - layout.major_tick.x_start, 18.0 * 0.6, epsilon = 1e-4);
        assert_relative_eq!(layout.minor_tick.x_end - layout.minor_tick.x_start, 18.0 * 0.24, epsilon = 1e-4);
        assert_eq!(layout.labels, LinearLabels::EveryMajor);
    }

    #[test]
    fn test_linear_inverted_mapping() {
        let layout = linear(&GaugeConfig::linear());
        assert_eq!(layout.offset_for(-20.0), 234.0);
        assert_eq!(layout.offset_for(20.0), 16.0);
        assert_relative_eq!(layout.offset_for(0.0), 125.0);
    }

    #[test]
    fn test_linear_wedge_clamped_to_track() {
        let layout = linear(&GaugeConfig::linear());
        let bottom = layout.wedge_rect(-20.0);
        assert_relative_eq!(bottom.bottom(), layout.track.bottom());
        let top = layout.wedge_rect(20.0);
        assert_relative_eq!(top.y, layout.track.y);
        let mid = layout.wedge_rect(0.0);
        assert_relative_eq!(mid.center().y, 125.0);
    }

    #[test]
    fn test_linear_large_wedge_stays_in_track() {
        let layout = linear(&GaugeConfig::linear().wedge_size(99.0));
        let top = layout.wedge_rect(20.0);
        let bottom = layout.wedge_rect(-20.0);
        assert_relative_eq!(top.y, layout.track.y, epsilon = 1e-3);
        assert_relative_eq!(bottom.bottom(), layout.track.bottom(), epsilon = 1e-3);
        assert!(top.height < layout.track.height);
    }

    #[test]
    fn test_linear_supersampled_face() {
        let layout = linear(&GaugeConfig::linear().supersampling(2).track_width(100));
        assert_eq!(layout.display_size, (142, 250));
        assert_eq!(layout.face_size, (284, 500));
        assert_eq!(layout.offset_for(-20.0), 468.0);
    }

    #[test]
    fn test_linear_wedge_follows_track_height() {
        for (ss, wedge) in [(1, 10.0), (2, 10.0), (3, 25.0)] {
            let config = GaugeConfig::linear().height(400).supersampling(ss).wedge_size(wedge);
            let layout = linear(&config);
            let expected = layout.track.height * wedge as f32 * 0.01;
            assert_relative_eq!(layout.wedge_height, expected, epsilon = 1e-3);
            assert!(layout.wedge_height < 400.0 * ss as f32 * wedge as f32 * 0.01);
        }
    }

    #[test]
    fn test_oversized_faces_are_rejected() {
        let err = Layout::derive(&GaugeConfig::radial().box_length(70_000).supersampling(70_000)).unwrap_err();
        assert!(matches!(err, Error::Configuration { field: "box_length", .. }));

        let err = Layout::derive(&GaugeConfig::radial().box_length(5_000).supersampling(4)).unwrap_err();
        assert!(matches!(err, Error::Configuration { field: "box_length", .. }));

        let err = Layout::derive(&GaugeConfig::linear().height(u32::MAX).supersampling(2)).unwrap_err();
        assert!(matches!(err, Error::Configuration { field: "height", .. }));

        let err = Layout::derive(&GaugeConfig::linear().track_width(u32::MAX)).unwrap_err();
        assert!(matches!(err, Error::Configuration { field: "track_width", .. }));

        let side = radial(&GaugeConfig::radial().box_length(MAX_FACE_SIDE / 4).supersampling(4)).face_side;
        assert_eq!(side, MAX_FACE_SIDE);
    }

    #[test]
    fn test_layouts_map_through_their_scales() {
        let dial = radial(&GaugeConfig::radial().range(-24.0, 24.0).major_tick_step(4.0));
        assert_eq!(dial.sweep.range(), (START_ANGLE, END_ANGLE));
        assert_eq!(dial.angle_for(12.0), dial.sweep.scale(12.0));

        let meter = linear(&GaugeConfig::linear());
        assert_eq!(meter.track_scale.range(), (f64::from(meter.track.bottom()), f64::from(meter.track.y)));
    }

    #[test]
    fn test_linear_value_label_width_from_widest_label() {
        let layout = linear(&GaugeConfig::linear().label_suffix("°"));
        // "+20.0°" plus a space at the 16px value font.
        assert_eq!(layout.value_label.extra_width, LINEAR_LABEL_GAP + 68);
    }

    #[test]
    fn test_linear_rejects_short_meter() {
        let err = Layout::derive(&GaugeConfig::linear().height(30)).unwrap_err();
        assert!(matches!(err, Error::Configuration { field: "height", .. }));
    }

    #[test]
    fn test_layout_dispatch() {
        let layout = Layout::derive(&GaugeConfig::linear()).unwrap();
        assert_eq!(layout.face_size(), (60, 250));
        assert_eq!(layout.display_size(), (60, 250));
        assert_eq!(layout.domain_position(-20.0), 234.0);
        assert!(layout.value_label().extra_width > LINEAR_LABEL_GAP);
    }
}
