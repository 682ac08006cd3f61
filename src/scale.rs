//! Value-to-domain mapping.
//!
//! A gauge maps its bounded value domain `[min, max]` onto a display domain:
//! degrees along the sweep for radial dials, pixel offsets along the track for
//! linear meters. The mapping is a plain linear interpolation that hits both
//! domain endpoints exactly and does not clamp; range validation is the
//! controller's job.

use crate::error::{Error, Result};

/// Maps domain values to range values.
pub trait Scale<D, R> {
    /// Transform a domain value to a range value.
    fn scale(&self, value: D) -> R;

    /// Range extent as `(start, end)`; `start` is where the domain minimum lands.
    fn range(&self) -> (R, R);
}

/// Map `value` from `[min, max]` onto `[domain_start, domain_end]`.
///
/// Values outside `[min, max]` extrapolate linearly. `min == max` is rejected
/// when the gauge is configured and is not handled here.
///
/// `domain_start` may be larger than `domain_end`; linear meters use that to
/// put larger values nearer the top of the bitmap.
///
/// # Example
///
/// ```
/// use gaugeviz::scale::map_value_to_domain;
///
/// assert_eq!(map_value_to_domain(0.0, -1.0, 1.0, -188.0, 8.0), -90.0);
/// assert_eq!(map_value_to_domain(-20.0, -20.0, 20.0, 232.0, 18.0), 232.0);
/// ```
#[must_use]
pub fn map_value_to_domain(value: f64, min: f64, max: f64, domain_start: f64, domain_end: f64) -> f64 {
    let t = (value - min) / (max - min);
    let span = domain_end - domain_start;
    // Anchor each half on its own endpoint so both ends are hit exactly.
    if t <= 0.5 {
        domain_start + span * t
    } else {
        domain_end - span * (1.0 - t)
    }
}

/// Linear scale from a gauge's value domain onto a display domain.
///
/// Built on [`map_value_to_domain`], so both range ends are hit exactly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_min: f64,
    domain_max: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    /// Create a new linear scale.
    ///
    /// # Errors
    ///
    /// Returns an error unless `domain.0 < domain.1` and both are finite.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Result<Self> {
        if !(domain.0.is_finite() && domain.1.is_finite()) || domain.0 >= domain.1 {
            return Err(Error::config(
                "max_value",
                format!("domain [{}, {}] must satisfy min < max", domain.0, domain.1),
            ));
        }

        Ok(Self {
            domain_min: domain.0,
            domain_max: domain.1,
            range_start: range.0,
            range_end: range.1,
        })
    }
}

impl Scale<f64, f64> for LinearScale {
    fn scale(&self, value: f64) -> f64 {
        map_value_to_domain(value, self.domain_min, self.domain_max, self.range_start, self.range_end)
    }

    fn range(&self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_radial_midpoint() {
        assert_eq!(map_value_to_domain(0.0, -1.0, 1.0, -188.0, 8.0), -90.0);
    }

    #[test]
    fn test_endpoints_are_exact() {
        let (min, max) = (-0.3, 0.7);
        let (start, end) = (12.345_678_9, -98.765_432_1);
        assert_eq!(map_value_to_domain(min, min, max, start, end), start);
        assert_eq!(map_value_to_domain(max, min, max, start, end), end);
    }

    #[test]
    fn test_no_clamping() {
        let v = map_value_to_domain(150.0, 0.0, 100.0, 0.0, 10.0);
        assert_relative_eq!(v, 15.0);
        let v = map_value_to_domain(-50.0, 0.0, 100.0, 0.0, 10.0);
        assert_relative_eq!(v, -5.0);
    }

    #[test]
    fn test_linear_scale_inverted_axis() {
        let scale = LinearScale::new((-20.0, 20.0), (232.0, 18.0)).unwrap();
        assert_eq!(scale.range(), (232.0, 18.0));
        assert_eq!(scale.scale(-20.0), 232.0);
        assert_eq!(scale.scale(20.0), 18.0);
        assert_relative_eq!(scale.scale(0.0), 125.0);
    }

    #[test]
    fn test_linear_scale_matches_free_mapping() {
        let scale = LinearScale::new((0.0, 100.0), (-188.0, 8.0)).unwrap();
        for v in [0.0, 12.5, 37.5, 99.0, 100.0] {
            assert_eq!(scale.scale(v), map_value_to_domain(v, 0.0, 100.0, -188.0, 8.0));
        }
    }

    #[test]
    fn test_linear_scale_rejects_degenerate_domain() {
        assert!(LinearScale::new((5.0, 5.0), (0.0, 1.0)).is_err());
        assert!(LinearScale::new((5.0, 1.0), (0.0, 1.0)).is_err());
        assert!(LinearScale::new((f64::NAN, 1.0), (0.0, 1.0)).is_err());
    }
}
