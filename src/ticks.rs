//! Major/minor tick planning.
//!
//! Major ticks form the arithmetic sequence `min + i * step` over the
//! half-open interval `[min, max + step)`. The extra step keeps a boundary
//! tick at or just below `max` from being lost to floating-point error, and
//! it can produce one tick above `max` when the step does not divide the
//! range. What happens to that tick is a [`TickOverrun`] policy decision.
//!
//! Minor ticks fill each major interval with `minors_per_major - 1` evenly
//! spaced marks. The first interval whose end lies past `max` stops minor
//! generation:
//!
//! 1. the shrink-to-fit end `end - (max - end) / minor_step` is computed and
//!    reported as a [`DroppedWindow`];
//! 2. that window and every later one emit nothing.
//!
//! The shrink formula moves the end *outwards* whenever `end > max`, so
//! emitting the window would place minor ticks past the top of the scale.
//! Dropping it keeps every minor tick `<= max`.

use log::trace;

/// Relative tolerance, in units of the major step, for boundary comparisons.
pub const TICK_EPSILON: f64 = 1e-9;

/// Upper bound on the number of ticks a gauge may plan.
pub const MAX_TICKS: usize = 10_000;

/// What to do with a major tick generated above `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TickOverrun {
    /// Drop it; it would sit beyond the end of the scale.
    #[default]
    Discard,
    /// Keep it and draw it past the end of the scale.
    Keep,
}

/// A single graduation mark.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    /// Position in the value domain.
    pub value: f64,
    /// Major ticks are labeled; minor ticks are not.
    pub is_major: bool,
}

/// The minor-tick window that ended generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DroppedWindow {
    /// Major tick the window belongs to.
    pub major: f64,
    /// First minor position of the window.
    pub start: f64,
    /// Window end before adjustment (`major + step`).
    pub end: f64,
    /// End after `end - (max - end) / minor_step`.
    pub shrunk_end: f64,
}

/// Minor ticks plus the window that stopped generation, if any.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MinorPlan {
    /// Minor tick values, ascending.
    pub ticks: Vec<f64>,
    /// The overflowing window, when one was reached.
    pub dropped_window: Option<DroppedWindow>,
}

/// Generate major tick values over `[min, max + step)`.
///
/// Always starts with `min`. Returns an empty sequence for a non-positive or
/// non-finite step.
///
/// # Example
///
/// ```
/// use gaugeviz::ticks::major_ticks;
///
/// let ticks = major_ticks(-22.0, 23.0, 8.0);
/// assert_eq!(ticks, vec![-22.0, -14.0, -6.0, 2.0, 10.0, 18.0, 26.0]);
/// ```
#[must_use]
pub fn major_ticks(min: f64, max: f64, step: f64) -> Vec<f64> {
    if !(step.is_finite() && step > 0.0) || !(min.is_finite() && max.is_finite()) {
        return Vec::new();
    }

    let stop = max + step - step * TICK_EPSILON;
    (0..MAX_TICKS)
        .map(|i| min + i as f64 * step)
        .take_while(|&v| v < stop)
        .collect()
}

/// Generate minor tick values between consecutive majors.
///
/// See the module documentation for the boundary policy.
#[must_use]
pub fn minor_ticks(majors: &[f64], step: f64, minors_per_major: u32, max: f64) -> Vec<f64> {
    plan_minor_ticks(majors, step, minors_per_major, max).ticks
}

/// Like [`minor_ticks`], also reporting the window that ended generation.
#[must_use]
pub fn plan_minor_ticks(majors: &[f64], step: f64, minors_per_major: u32, max: f64) -> MinorPlan {
    let mut plan = MinorPlan::default();
    if minors_per_major == 0 || !(step.is_finite() && step > 0.0) {
        return plan;
    }

    let minor_step = step / f64::from(minors_per_major);
    for &major in majors {
        let start = major + minor_step;
        let end = major + step;
        if end > max + step * TICK_EPSILON {
            let shrunk_end = end - (max - end) / minor_step;
            trace!("minor window [{start}, {end}) passes max {max}; shrunk end {shrunk_end}, window dropped");
            plan.dropped_window = Some(DroppedWindow { major, start, end, shrunk_end });
            break;
        }
        plan.ticks
            .extend((1..minors_per_major).map(|k| major + f64::from(k) * minor_step));
        if plan.ticks.len() >= MAX_TICKS {
            plan.ticks.truncate(MAX_TICKS);
            break;
        }
    }
    plan
}

/// Upper estimate of how many ticks a configuration would plan.
#[must_use]
pub fn estimated_tick_count(min: f64, max: f64, step: f64, minors_per_major: u32) -> f64 {
    ((max - min) / step + 2.0) * f64::from(minors_per_major.max(1))
}

/// The ordered ticks of one gauge scale.
#[derive(Debug, Clone, PartialEq)]
pub struct TickSet {
    ticks: Vec<Tick>,
    dropped_window: Option<DroppedWindow>,
    discarded: Vec<f64>,
}

impl TickSet {
    /// Plan the full tick set for a scale.
    #[must_use]
    pub fn plan(min: f64, max: f64, step: f64, minors_per_major: u32, overrun: TickOverrun) -> Self {
        let raw_majors = major_ticks(min, max, step);
        let minor = plan_minor_ticks(&raw_majors, step, minors_per_major, max);

        let limit = max + step * TICK_EPSILON;
        let (majors, discarded): (Vec<f64>, Vec<f64>) = match overrun {
            TickOverrun::Keep => (raw_majors, Vec::new()),
            TickOverrun::Discard => raw_majors.into_iter().partition(|&v| v <= limit),
        };

        let mut ticks: Vec<Tick> = majors
            .iter()
            .map(|&value| Tick { value, is_major: true })
            .chain(minor.ticks.iter().map(|&value| Tick { value, is_major: false }))
            .collect();
        ticks.sort_by(|a, b| a.value.total_cmp(&b.value));

        trace!(
            "planned {} ticks on [{min}, {max}] (discarded {} overrun majors)",
            ticks.len(),
            discarded.len()
        );
        Self { ticks, dropped_window: minor.dropped_window, discarded }
    }

    /// All ticks, ascending by value.
    #[must_use]
    pub fn ticks(&self) -> &[Tick] {
        &self.ticks
    }

    /// Iterate over all ticks.
    pub fn iter(&self) -> impl Iterator<Item = &Tick> {
        self.ticks.iter()
    }

    /// Major tick values, ascending.
    pub fn majors(&self) -> impl Iterator<Item = f64> + '_ {
        self.ticks.iter().filter(|t| t.is_major).map(|t| t.value)
    }

    /// Minor tick values, ascending.
    pub fn minors(&self) -> impl Iterator<Item = f64> + '_ {
        self.ticks.iter().filter(|t| !t.is_major).map(|t| t.value)
    }

    /// Number of ticks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    /// Whether the set has no ticks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    /// The minor window that stopped generation, if any.
    #[must_use]
    pub fn dropped_window(&self) -> Option<DroppedWindow> {
        self.dropped_window
    }

    /// Major ticks above `max` removed by [`TickOverrun::Discard`].
    #[must_use]
    pub fn discarded_majors(&self) -> &[f64] {
        &self.discarded
    }
}
