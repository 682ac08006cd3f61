//! Gauge controller.
//!
//! A [`Gauge`] owns its configuration, the derived layout and tick plan, the
//! cached face and the current display bitmap. Value changes re-composite the
//! indicator onto the cached face; the face itself is only rendered once.
//!
//! # Example
//!
//! ```
//! use gaugeviz::prelude::*;
//!
//! let config = GaugeConfig::radial().range(-24.0, 24.0).major_tick_step(4.0).label_suffix("°");
//! let mut gauge = Gauge::new(config)?;
//! assert!(gauge.on_value_changed(12.0)?);
//! assert_eq!(gauge.display_text(), "12.0°");
//! # Ok::<(), gaugeviz::Error>(())
//! ```

use crate::config::GaugeConfig;
use crate::error::{Error, Result};
use crate::face::Face;
use crate::framebuffer::Framebuffer;
use crate::indicator;
use crate::label::format_label;
use crate::layout::{Layout, ValueLabelPlacement};
use crate::source::{SharedText, Subscription, TextSink, ValueSource};
use crate::text::{BitmapFont, TextRenderer};
use crate::ticks::TickSet;
use log::{debug, trace, warn};
use std::cell::{Cell, Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

/// Face generation produced at construction.
const INITIAL_FACE_VERSION: u64 = 1;

/// Lifecycle state of a gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GaugePhase {
    /// Configuration accepted, first render pending.
    Constructed,
    /// Face and display rendered; value updates are accepted.
    Ready,
}

/// A single radial or linear gauge.
pub struct Gauge {
    config: GaugeConfig,
    layout: Layout,
    ticks: TickSet,
    text: Box<dyn TextRenderer>,
    face: Face,
    value: f64,
    display: Framebuffer,
    display_text: String,
    supplied_text: Option<SharedText>,
    sink: Option<Box<dyn TextSink>>,
    phase: GaugePhase,
    render_count: u64,
}

impl Gauge {
    /// Build a gauge drawing its labels with the built-in [`BitmapFont`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if `config` is invalid.
    pub fn new(config: GaugeConfig) -> Result<Self> {
        Self::with_text_renderer(config, Box::new(BitmapFont::new()))
    }

    /// Build a gauge drawing its labels with `text`.
    ///
    /// Validates the configuration, derives the layout and tick plan, renders
    /// the face and composites the indicator at the starting value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if `config` is invalid or its geometry
    /// does not fit; no partial gauge is produced.
    pub fn with_text_renderer(config: GaugeConfig, text: Box<dyn TextRenderer>) -> Result<Self> {
        config.validate()?;
        let layout = Layout::derive(&config)?;
        let ticks = TickSet::plan(
            config.min_value,
            config.max_value,
            config.major_tick_step,
            config.minor_ticks_per_major,
            config.tick_overrun,
        );
        let face = Face::render(&config, &layout, &ticks, text.as_ref(), INITIAL_FACE_VERSION)?;

        let value = config.start_value();
        let display = indicator::render(&face, &layout, &config, value)?;
        let display_text = format_label(value, &config.label_suffix);

        let mut gauge = Self {
            config,
            layout,
            ticks,
            text,
            face,
            value,
            display,
            display_text,
            supplied_text: None,
            sink: None,
            phase: GaugePhase::Constructed,
            render_count: 1,
        };
        gauge.phase = GaugePhase::Ready;
        debug!(
            "gauge ready: [{}, {}] at {value}, display {:?}",
            gauge.config.min_value,
            gauge.config.max_value,
            gauge.layout.display_size()
        );
        Ok(gauge)
    }

    /// Write the value label into `sink`, now and after every change.
    ///
    /// With caller-supplied text the sink receives that text once and no
    /// computed label afterwards. Nothing is written while the value label is
    /// hidden.
    #[must_use]
    pub fn with_text_sink(mut self, sink: impl TextSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self.publish_text();
        self
    }

    /// Show `text` as the value label; the gauge never overwrites it.
    ///
    /// An attached text sink is switched over to `text` as well.
    #[must_use]
    pub fn with_supplied_text(mut self, text: SharedText) -> Self {
        self.supplied_text = Some(text);
        self.publish_text();
        self
    }

    /// Push the label currently shown into the text sink.
    fn publish_text(&mut self) {
        if !self.config.show_value_label {
            return;
        }
        let text = self.display_text();
        if let Some(sink) = self.sink.as_mut() {
            sink.set_text(&text);
        }
    }

    /// Apply a new value.
    ///
    /// Returns `Ok(false)` without re-rendering when `value` equals the
    /// current value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Range`] if `value` is outside `[min, max]`; the gauge
    /// keeps its previous value, bitmap and text.
    pub fn on_value_changed(&mut self, value: f64) -> Result<bool> {
        if !self.config.contains(value) {
            return Err(Error::Range { value, min: self.config.min_value, max: self.config.max_value });
        }
        if value == self.value {
            return Ok(false);
        }

        let display = indicator::render(&self.face, &self.layout, &self.config, value)?;
        self.value = value;
        self.display = display;
        self.render_count += 1;
        trace!("gauge value {value}, render #{}", self.render_count);

        if self.supplied_text.is_none() {
            self.display_text = format_label(value, &self.config.label_suffix);
            self.publish_text();
        }
        Ok(true)
    }

    /// Subscribe to `source` and follow its value.
    ///
    /// The gauge first syncs to the source's current value. Values the gauge
    /// rejects are logged and skipped. A value that arrives while the gauge is
    /// borrowed is held as pending and applied on the next
    /// [`BoundGauge::borrow`] or [`BoundGauge::borrow_mut`]; a later
    /// notification replaces it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Range`] if the source's current value is outside the
    /// gauge's domain.
    pub fn bind(mut self, source: &ValueSource) -> Result<BoundGauge> {
        self.on_value_changed(source.get())?;
        let gauge = Rc::new(RefCell::new(self));
        let pending = Rc::new(Cell::new(None));

        let weak = Rc::downgrade(&gauge);
        let deferred = Rc::clone(&pending);
        let subscription = source.on_change(move |value| {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            match shared.try_borrow_mut() {
                Ok(mut gauge) => {
                    deferred.set(None);
                    apply_bound_value(&mut gauge, value);
                }
                Err(_) => {
                    debug!("gauge busy, deferring value {value}");
                    deferred.set(Some(value));
                }
            };
        });
        Ok(BoundGauge { gauge, source: source.clone(), pending, subscription: Some(subscription) })
    }

    /// Compose the display bitmap and the value label into one image.
    ///
    /// Radial labels are drawn inside the dial; linear labels get extra room
    /// to the right of the meter.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot bitmap cannot be allocated.
    pub fn snapshot(&self) -> Result<Framebuffer> {
        if !self.config.show_value_label {
            return Ok(self.display.clone());
        }
        let placement = self.layout.value_label();
        let mut out = Framebuffer::new(self.display.width() + placement.extra_width, self.display.height())?;
        out.blit(&self.display, 0, 0);
        self.text.draw(
            &mut out,
            placement.position,
            &self.display_text(),
            placement.anchor,
            placement.font_size,
            self.config.indicator_color,
        );
        Ok(out)
    }

    /// Current value.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Display bitmap for the current value.
    #[must_use]
    pub fn display(&self) -> &Framebuffer {
        &self.display
    }

    /// Value label text, or the caller-supplied text if set.
    #[must_use]
    pub fn display_text(&self) -> String {
        match &self.supplied_text {
            Some(text) => text.get(),
            None => self.display_text.clone(),
        }
    }

    /// The gauge configuration.
    #[must_use]
    pub fn config(&self) -> &GaugeConfig {
        &self.config
    }

    /// Cached face.
    #[must_use]
    pub fn face(&self) -> &Face {
        &self.face
    }

    /// Generation of the cached face.
    #[must_use]
    pub fn face_version(&self) -> u64 {
        self.face.version()
    }

    /// Number of indicator composites so far, including the initial one.
    #[must_use]
    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    /// Lifecycle state.
    #[must_use]
    pub fn phase(&self) -> GaugePhase {
        self.phase
    }

    /// Derived geometry.
    #[must_use]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Planned ticks.
    #[must_use]
    pub fn tick_set(&self) -> &TickSet {
        &self.ticks
    }

    /// Where the value label goes in display space.
    #[must_use]
    pub fn value_label(&self) -> ValueLabelPlacement {
        self.layout.value_label()
    }
}

fn apply_bound_value(gauge: &mut Gauge, value: f64) {
    if let Err(e) = gauge.on_value_changed(value) {
        warn!("gauge rejected value {value}: {e}");
    }
}

impl fmt::Debug for Gauge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gauge")
            .field("config", &self.config)
            .field("value", &self.value)
            .field("display_text", &self.display_text)
            .field("face_version", &self.face.version())
            .field("render_count", &self.render_count)
            .field("phase", &self.phase)
            .field("text", &self.text)
            .field("has_sink", &self.sink.is_some())
            .finish_non_exhaustive()
    }
}

/// A gauge subscribed to a [`ValueSource`].
///
/// Dropping it removes the subscription.
#[derive(Debug)]
pub struct BoundGauge {
    gauge: Rc<RefCell<Gauge>>,
    source: ValueSource,
    pending: Rc<Cell<Option<f64>>>,
    subscription: Option<Subscription>,
}

impl BoundGauge {
    /// Borrow the gauge, first applying any pending source value.
    ///
    /// # Panics
    ///
    /// Panics if the gauge is mutably borrowed.
    #[must_use]
    pub fn borrow(&self) -> Ref<'_, Gauge> {
        self.apply_pending();
        self.gauge.borrow()
    }

    /// Mutably borrow the gauge, first applying any pending source value.
    ///
    /// # Panics
    ///
    /// Panics if the gauge is already borrowed.
    #[must_use]
    pub fn borrow_mut(&self) -> RefMut<'_, Gauge> {
        self.apply_pending();
        self.gauge.borrow_mut()
    }

    /// Source value that arrived while the gauge was borrowed and has not
    /// been applied yet.
    #[must_use]
    pub fn pending_value(&self) -> Option<f64> {
        self.pending.get()
    }

    fn apply_pending(&self) {
        let Some(value) = self.pending.take() else {
            return;
        };
        match self.gauge.try_borrow_mut() {
            Ok(mut gauge) => apply_bound_value(&mut gauge, value),
            Err(_) => self.pending.set(Some(value)),
        }
    }

    /// The source the gauge follows.
    #[must_use]
    pub fn source(&self) -> &ValueSource {
        &self.source
    }
}

impl Drop for BoundGauge {
    fn drop(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            self.source.unsubscribe(subscription);
        }
    }
}
