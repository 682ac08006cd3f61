//! Gauge configuration.
//!
//! A [`GaugeConfig`] is built once, validated once in [`crate::gauge::Gauge::new`]
//! and never mutated afterwards. Fields shared by both gauge kinds live on
//! the struct; kind-specific geometry lives in [`GaugeKind`].
//!
//! # Example
//!
//! ```
//! use gaugeviz::config::GaugeConfig;
//!
//! let config = GaugeConfig::radial()
//!     .range(-24.0, 24.0)
//!     .major_tick_step(4.0)
//!     .minor_ticks_per_major(5)
//!     .wedge_size(2.0)
//!     .label_suffix("°")
//!     .box_length(500)
//!     .arc_width(30.0);
//! assert!(config.validate().is_ok());
//! ```
//!
//! With the `serde` feature a configuration can also be read from YAML:
//!
//! ```yaml
//! min_value: -20
//! max_value: 20
//! label_suffix: "°"
//! kind:
//!   type: linear
//!   height: 500
//! ```

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::ticks::{estimated_tick_count, TickOverrun, MAX_TICKS};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "serde")]
use std::path::Path;

/// Default square side of a radial dial, in display pixels.
pub const DEFAULT_BOX_LENGTH: u32 = 250;

/// Default fraction of the radial square kept after cropping.
pub const DEFAULT_CUT_BOTTOM: f64 = 0.65;

/// Default height of a linear meter, in display pixels.
pub const DEFAULT_LINEAR_HEIGHT: u32 = 250;

/// Geometry of a radial dial.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RadialOptions {
    /// Side of the square the dial is drawn in, in display pixels.
    pub box_length: u32,
    /// Fraction of the square's height kept after cropping, in `(0, 1]`.
    pub cut_bottom: f64,
    /// Width of the scale arc and the wedge, in display pixels.
    pub arc_width: f32,
}

impl Default for RadialOptions {
    fn default() -> Self {
        Self { box_length: DEFAULT_BOX_LENGTH, cut_bottom: DEFAULT_CUT_BOTTOM, arc_width: 10.0 }
    }
}

/// Where a linear meter puts its tick labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LinearLabels {
    /// Only the maximum above the track and the minimum below it.
    Extremes,
    /// A label beside every major tick.
    #[default]
    EveryMajor,
}

/// Geometry of a linear (pitch) meter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LinearOptions {
    /// Bitmap height in display pixels.
    pub height: u32,
    /// Track width in display pixels. Derived from the label width when unset.
    pub track_width: Option<u32>,
    /// Tick label layout.
    pub labels: LinearLabels,
}

impl Default for LinearOptions {
    fn default() -> Self {
        Self { height: DEFAULT_LINEAR_HEIGHT, track_width: None, labels: LinearLabels::default() }
    }
}

/// Which kind of gauge to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum GaugeKind {
    /// Circular dial swept over the top.
    Radial(RadialOptions),
    /// Vertical track with a sliding marker.
    Linear(LinearOptions),
}

impl Default for GaugeKind {
    fn default() -> Self {
        Self::Radial(RadialOptions::default())
    }
}

/// Immutable description of one gauge.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GaugeConfig {
    /// Lower end of the value domain.
    pub min_value: f64,
    /// Upper end of the value domain.
    pub max_value: f64,
    /// Distance between major ticks, in value units.
    pub major_tick_step: f64,
    /// Minor subdivisions per major interval. 0 and 1 draw no minor ticks.
    pub minor_ticks_per_major: u32,
    /// Half-width of the radial wedge in degrees, or the linear marker height
    /// as a percentage of the meter height.
    pub wedge_size: f64,
    /// Color of the arc or track.
    pub scale_color: Rgba,
    /// Color of the wedge, ticks and labels.
    pub indicator_color: Rgba,
    /// Render scale used before downsampling to display size.
    pub supersampling: u32,
    /// Appended to every rendered number, e.g. `"°"`.
    pub label_suffix: String,
    /// Whether the gauge maintains a value label.
    pub show_value_label: bool,
    /// Value shown before the first update. Defaults to `min_value`.
    pub initial_value: Option<f64>,
    /// Treatment of a major tick generated past `max_value`.
    pub tick_overrun: TickOverrun,
    /// Kind-specific geometry.
    pub kind: GaugeKind,
}

impl Default for GaugeConfig {
    fn default() -> Self {
        Self::radial()
    }
}

impl GaugeConfig {
    /// Radial dial with the stock defaults: `[0, 100]`, majors every 5,
    /// 5 minors per major, a 5° wedge, a 250 px box and 2x supersampling.
    #[must_use]
    pub fn radial() -> Self {
        Self {
            min_value: 0.0,
            max_value: 100.0,
            major_tick_step: 5.0,
            minor_ticks_per_major: 5,
            wedge_size: 5.0,
            scale_color: Rgba::SCALE_GREY,
            indicator_color: Rgba::INDICATOR_SLATE,
            supersampling: 2,
            label_suffix: String::new(),
            show_value_label: true,
            initial_value: None,
            tick_overrun: TickOverrun::default(),
            kind: GaugeKind::Radial(RadialOptions::default()),
        }
    }

    /// Linear meter with the stock defaults: `[-20, 20]`, majors every 5,
    /// 5 minors per major, a 2 % marker and a 250 px height.
    #[must_use]
    pub fn linear() -> Self {
        Self {
            min_value: -20.0,
            max_value: 20.0,
            wedge_size: 2.0,
            supersampling: 1,
            kind: GaugeKind::Linear(LinearOptions::default()),
            ..Self::radial()
        }
    }

    /// Set the value domain.
    #[must_use]
    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.min_value = min;
        self.max_value = max;
        self
    }

    /// Set the major tick step.
    #[must_use]
    pub fn major_tick_step(mut self, step: f64) -> Self {
        self.major_tick_step = step;
        self
    }

    /// Set the number of minor subdivisions per major interval.
    #[must_use]
    pub fn minor_ticks_per_major(mut self, count: u32) -> Self {
        self.minor_ticks_per_major = count;
        self
    }

    /// Set the wedge size (degrees for radial, percent for linear).
    #[must_use]
    pub fn wedge_size(mut self, size: f64) -> Self {
        self.wedge_size = size;
        self
    }

    /// Set the scale color.
    #[must_use]
    pub fn scale_color(mut self, color: Rgba) -> Self {
        self.scale_color = color;
        self
    }

    /// Set the indicator color.
    #[must_use]
    pub fn indicator_color(mut self, color: Rgba) -> Self {
        self.indicator_color = color;
        self
    }

    /// Set the supersampling factor.
    #[must_use]
    pub fn supersampling(mut self, factor: u32) -> Self {
        self.supersampling = factor;
        self
    }

    /// Set the label suffix.
    #[must_use]
    pub fn label_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.label_suffix = suffix.into();
        self
    }

    /// Enable or disable the value label.
    #[must_use]
    pub fn show_value_label(mut self, show: bool) -> Self {
        self.show_value_label = show;
        self
    }

    /// Set the value shown before the first update.
    #[must_use]
    pub fn initial_value(mut self, value: f64) -> Self {
        self.initial_value = Some(value);
        self
    }

    /// Set the major tick overrun policy.
    #[must_use]
    pub fn tick_overrun(mut self, overrun: TickOverrun) -> Self {
        self.tick_overrun = overrun;
        self
    }

    /// Replace the kind-specific geometry.
    #[must_use]
    pub fn kind(mut self, kind: GaugeKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the radial box length. Ignored for linear meters.
    #[must_use]
    pub fn box_length(mut self, length: u32) -> Self {
        if let GaugeKind::Radial(opts) = &mut self.kind {
            opts.box_length = length;
        }
        self
    }

    /// Set the radial cut-bottom fraction. Ignored for linear meters.
    #[must_use]
    pub fn cut_bottom(mut self, fraction: f64) -> Self {
        if let GaugeKind::Radial(opts) = &mut self.kind {
            opts.cut_bottom = fraction;
        }
        self
    }

    /// Set the radial arc width. Ignored for linear meters.
    #[must_use]
    pub fn arc_width(mut self, width: f32) -> Self {
        if let GaugeKind::Radial(opts) = &mut self.kind {
            opts.arc_width = width;
        }
        self
    }

    /// Set the linear meter height. Ignored for radial dials.
    #[must_use]
    pub fn height(mut self, height: u32) -> Self {
        if let GaugeKind::Linear(opts) = &mut self.kind {
            opts.height = height;
        }
        self
    }

    /// Set the linear track width. Ignored for radial dials.
    #[must_use]
    pub fn track_width(mut self, width: u32) -> Self {
        if let GaugeKind::Linear(opts) = &mut self.kind {
            opts.track_width = Some(width);
        }
        self
    }

    /// Set the linear label layout. Ignored for radial dials.
    #[must_use]
    pub fn linear_labels(mut self, labels: LinearLabels) -> Self {
        if let GaugeKind::Linear(opts) = &mut self.kind {
            opts.labels = labels;
        }
        self
    }

    /// Whether this is a radial dial.
    #[must_use]
    pub fn is_radial(&self) -> bool {
        matches!(self.kind, GaugeKind::Radial(_))
    }

    /// The value the gauge starts at.
    #[must_use]
    pub fn start_value(&self) -> f64 {
        self.initial_value.unwrap_or(self.min_value)
    }

    /// Whether `value` lies in the closed domain.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        (self.min_value..=self.max_value).contains(&value)
    }

    /// Check every construction invariant.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if !(self.min_value.is_finite() && self.max_value.is_finite()) {
            return Err(Error::config("min_value", "bounds must be finite"));
        }
        if self.max_value <= self.min_value {
            return Err(Error::config(
                "max_value",
                format!("max {} must be greater than min {}", self.max_value, self.min_value),
            ));
        }
        if !(self.major_tick_step.is_finite() && self.major_tick_step > 0.0) {
            return Err(Error::config("major_tick_step", "must be a positive finite number"));
        }
        if !(self.wedge_size > 0.0 && self.wedge_size < 100.0) {
            return Err(Error::config("wedge_size", format!("{} is outside (0, 100)", self.wedge_size)));
        }
        if self.supersampling == 0 {
            return Err(Error::config("supersampling", "must be at least 1"));
        }
        if let Some(value) = self.initial_value {
            if !self.contains(value) {
                return Err(Error::config(
                    "initial_value",
                    format!("{value} is outside [{}, {}]", self.min_value, self.max_value),
                ));
            }
        }

        let ticks = estimated_tick_count(
            self.min_value,
            self.max_value,
            self.major_tick_step,
            self.minor_ticks_per_major,
        );
        if ticks > MAX_TICKS as f64 {
            return Err(Error::config(
                "major_tick_step",
                format!("scale would need about {ticks:.0} ticks (limit {MAX_TICKS})"),
            ));
        }

        match &self.kind {
            GaugeKind::Radial(opts) => {
                if opts.box_length == 0 {
                    return Err(Error::config("box_length", "must be non-zero"));
                }
                if !(opts.arc_width.is_finite() && opts.arc_width > 0.0) {
                    return Err(Error::config("arc_width", "must be a positive finite number"));
                }
                if !(opts.cut_bottom > 0.0 && opts.cut_bottom <= 1.0) {
                    return Err(Error::config("cut_bottom", format!("{} is outside (0, 1]", opts.cut_bottom)));
                }
            }
            GaugeKind::Linear(opts) => {
                if opts.height == 0 {
                    return Err(Error::config("height", "must be non-zero"));
                }
                if opts.track_width == Some(0) {
                    return Err(Error::config("track_width", "must be non-zero"));
                }
            }
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl GaugeConfig {
    /// Load a configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse a configuration from a YAML string.
    ///
    /// Missing fields take the defaults of [`GaugeConfig::radial`]; the
    /// result is not validated.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigParse`] with the failing line.
    pub fn parse(yaml: &str) -> Result<Self> {
        serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map_or(0, |l| l.line());
            Error::ConfigParse { line, message: e.to_string() }
        })
    }

    /// Serialize to YAML.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigParse`] if serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml_ng::to_string(self).map_err(|e| Error::ConfigParse { line: 0, message: e.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(err: Error) -> &'static str {
        match err {
            Error::Configuration { field, .. } => field,
            other => panic!("expected configuration error, got {other:?}"),
        }
    }

    #[test]
    fn test_radial_defaults() {
        let config = GaugeConfig::radial();
        assert_eq!(config.min_value, 0.0);
        assert_eq!(config.max_value, 100.0);
        assert_eq!(config.major_tick_step, 5.0);
        assert_eq!(config.minor_ticks_per_major, 5);
        assert_eq!(config.wedge_size, 5.0);
        assert_eq!(config.supersampling, 2);
        assert_eq!(config.scale_color, Rgba::SCALE_GREY);
        assert_eq!(config.indicator_color, Rgba::INDICATOR_SLATE);
        assert_eq!(config.kind, GaugeKind::Radial(RadialOptions::default()));
        assert!(config.is_radial());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_linear_defaults() {
        let config = GaugeConfig::linear();
        assert_eq!((config.min_value, config.max_value), (-20.0, 20.0));
        assert_eq!(config.wedge_size, 2.0);
        assert_eq!(config.supersampling, 1);
        assert!(!config.is_radial());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_targets_matching_kind() {
        let radial = GaugeConfig::radial().box_length(350).arc_width(50.0).height(999);
        assert_eq!(
            radial.kind,
            GaugeKind::Radial(RadialOptions { box_length: 350, cut_bottom: 0.65, arc_width: 50.0 })
        );

        let linear = GaugeConfig::linear().height(500).track_width(100).box_length(1);
        assert_eq!(
            linear.kind,
            GaugeKind::Linear(LinearOptions {
                height: 500,
                track_width: Some(100),
                labels: LinearLabels::EveryMajor
            })
        );
    }

    #[test]
    fn test_start_value() {
        assert_eq!(GaugeConfig::linear().start_value(), -20.0);
        assert_eq!(GaugeConfig::linear().initial_value(3.0).start_value(), 3.0);
    }

    #[test]
    fn test_rejects_inverted_or_empty_range() {
        let err = GaugeConfig::radial().range(5.0, 5.0).validate().unwrap_err();
        assert_eq!(field_of(err), "max_value");
        let err = GaugeConfig::radial().range(10.0, -10.0).validate().unwrap_err();
        assert_eq!(field_of(err), "max_value");
        let err = GaugeConfig::radial().range(f64::NEG_INFINITY, 0.0).validate().unwrap_err();
        assert_eq!(field_of(err), "min_value");
    }

    #[test]
    fn test_rejects_wedge_outside_open_interval() {
        for size in [0.0, 100.0, -1.0, f64::NAN] {
            let err = GaugeConfig::linear().wedge_size(size).validate().unwrap_err();
            assert_eq!(field_of(err), "wedge_size");
        }
        assert!(GaugeConfig::linear().wedge_size(99.9).validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_step_and_supersampling() {
        let err = GaugeConfig::radial().major_tick_step(0.0).validate().unwrap_err();
        assert_eq!(field_of(err), "major_tick_step");
        let err = GaugeConfig::radial().supersampling(0).validate().unwrap_err();
        assert_eq!(field_of(err), "supersampling");
    }

    #[test]
    fn test_rejects_tick_explosion() {
        let err = GaugeConfig::radial().range(0.0, 1.0e6).major_tick_step(1.0).validate().unwrap_err();
        assert_eq!(field_of(err), "major_tick_step");
    }

    #[test]
    fn test_rejects_initial_value_outside_range() {
        let err = GaugeConfig::radial().initial_value(150.0).validate().unwrap_err();
        assert_eq!(field_of(err), "initial_value");
    }

    #[test]
    fn test_rejects_bad_geometry() {
        assert_eq!(field_of(GaugeConfig::radial().box_length(0).validate().unwrap_err()), "box_length");
        assert_eq!(field_of(GaugeConfig::radial().arc_width(0.0).validate().unwrap_err()), "arc_width");
        assert_eq!(field_of(GaugeConfig::radial().cut_bottom(0.0).validate().unwrap_err()), "cut_bottom");
        assert_eq!(field_of(GaugeConfig::radial().cut_bottom(1.5).validate().unwrap_err()), "cut_bottom");
        assert!(GaugeConfig::radial().cut_bottom(1.0).validate().is_ok());
        assert_eq!(field_of(GaugeConfig::linear().height(0).validate().unwrap_err()), "height");
        assert_eq!(field_of(GaugeConfig::linear().track_width(0).validate().unwrap_err()), "track_width");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_parse_yaml_with_defaults() {
        let yaml = r##"
min_value: -1
max_value: 1
major_tick_step: 0.5
minor_ticks_per_major: 2
label_suffix: "° deg"
indicator_color: "#ff0000"
kind:
  type: linear
  height: 500
"##;
        let config = GaugeConfig::parse(yaml).unwrap();
        assert_eq!((config.min_value, config.max_value), (-1.0, 1.0));
        assert_eq!(config.label_suffix, "° deg");
        assert_eq!(config.indicator_color, Rgba::rgb(255, 0, 0));
        assert_eq!(config.scale_color, Rgba::SCALE_GREY);
        assert_eq!(
            config.kind,
            GaugeKind::Linear(LinearOptions { height: 500, ..LinearOptions::default() })
        );
        assert!(config.validate().is_ok());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_parse_error_includes_line() {
        let yaml = "min_value: 0\nmax_value: 10\nmajor_tick_step: lots\n";
        let err = GaugeConfig::parse(yaml).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
        assert!(err.to_string().contains('3'), "error should include line number: {err}");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_yaml_roundtrip() {
        let config = GaugeConfig::radial().range(-24.0, 24.0).label_suffix("°").box_length(500);
        let yaml = config.to_yaml().unwrap();
        assert_eq!(GaugeConfig::parse(&yaml).unwrap(), config);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gauge.yaml");
        std::fs::write(&path, "max_value: 50\n").unwrap();
        let config = GaugeConfig::load(&path).unwrap();
        assert_eq!(config.max_value, 50.0);
        assert!(GaugeConfig::load(dir.path().join("missing.yaml")).is_err());
    }
}
