//! Label formatting and text footprint estimation.
//!
//! Every rendered number carries one fractional digit followed by the
//! configured suffix (`"12.5°"`). Linear meters use an explicit sign
//! (`"+5.0°"`). Margins around a scale are sized from the longest label so
//! that the extreme labels never clip.

/// Average glyph advance as a fraction of the font size.
///
/// Shared with [`crate::text::BitmapFont`] so estimated and drawn widths agree.
pub const CHAR_WIDTH_FACTOR: f32 = 0.6;

/// Reference gauge size the font sizes are tuned for.
const REFERENCE_SIZE: f32 = 250.0;

/// Base font size at the reference gauge size.
const REFERENCE_FONT: f32 = 16.0;

/// Smallest tick label font size.
pub const MIN_TICK_FONT: u32 = 14;

/// Collapse values that display as zero so they never print as `-0.0`.
fn display_value(value: f64) -> f64 {
    if (value * 10.0).round() == 0.0 {
        0.0
    } else {
        value
    }
}

/// Format `value` with one fractional digit and append `suffix`.
///
/// ```
/// use gaugeviz::label::format_label;
///
/// assert_eq!(format_label(12.345, "°"), "12.3°");
/// assert_eq!(format_label(-0.01, ""), "0.0");
/// ```
#[must_use]
pub fn format_label(value: f64, suffix: &str) -> String {
    format!("{:.1}{suffix}", display_value(value))
}

/// Like [`format_label`], with an explicit `+` on non-negative values.
#[must_use]
pub fn format_signed_label(value: f64, suffix: &str) -> String {
    format!("{:+.1}{suffix}", display_value(value))
}

/// Estimated rendered width of `text` at `font_size`.
#[must_use]
pub fn estimate_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * CHAR_WIDTH_FACTOR
}

/// Margin that keeps a label of `max_label_len` characters from clipping.
///
/// `max_label_len * font_size * 0.5 * supersampling`
#[must_use]
pub fn auto_margin(max_label_len: usize, font_size: f32, supersampling: u32) -> f32 {
    max_label_len as f32 * font_size * 0.5 * supersampling as f32
}

/// The longer of the two extreme labels; the maximum wins a tie.
#[must_use]
pub fn widest_label(min: f64, max: f64, suffix: &str, signed: bool) -> String {
    let format: fn(f64, &str) -> String = if signed { format_signed_label } else { format_label };
    let (low, high) = (format(min, suffix), format(max, suffix));
    if low.chars().count() > high.chars().count() {
        low
    } else {
        high
    }
}

/// Length in characters of the longer of the two extreme labels.
#[must_use]
pub fn max_label_len(min: f64, max: f64, suffix: &str, signed: bool) -> usize {
    widest_label(min, max, suffix, signed).chars().count()
}

/// Font size of the value label for a gauge of `size` pixels.
#[must_use]
pub fn value_font_size(size: u32) -> u32 {
    (REFERENCE_FONT * size as f32 / REFERENCE_SIZE).round() as u32
}

/// Font size of tick labels for a gauge of `size` pixels.
#[must_use]
pub fn tick_font_size(size: u32) -> u32 {
    ((REFERENCE_FONT * size as f32 / REFERENCE_SIZE / 2.0).round() as u32).max(MIN_TICK_FONT)
}

/// Estimated footprint of a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextMetrics {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl TextMetrics {
    /// Estimate the footprint of `text` at `font_size`.
    #[must_use]
    pub fn estimate(text: &str, font_size: f32) -> Self {
        Self { width: estimate_width(text, font_size), height: font_size }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_format_label() {
        assert_eq!(format_label(5.0, ""), "5.0");
        assert_eq!(format_label(-22.0, "°"), "-22.0°");
        assert_eq!(format_label(0.24, "%"), "0.2%");
    }

    #[test]
    fn test_format_signed_label() {
        assert_eq!(format_signed_label(5.0, "°"), "+5.0°");
        assert_eq!(format_signed_label(-20.0, "°"), "-20.0°");
        assert_eq!(format_signed_label(-0.0, ""), "+0.0");
    }

    #[test]
    fn test_negative_zero_is_normalised() {
        assert_eq!(format_label(-1e-17, ""), "0.0");
        assert_eq!(format_label(-0.04, ""), "0.0");
        assert_eq!(format_label(-0.06, ""), "-0.1");
    }

    #[test]
    fn test_estimate_width() {
        assert_relative_eq!(estimate_width("100.0", 10.0), 30.0);
        assert_relative_eq!(estimate_width("12.0°", 10.0), 30.0);
        assert_eq!(estimate_width("", 10.0), 0.0);
    }

    #[test]
    fn test_auto_margin() {
        // "100.0" at the default tick font, supersampled twice.
        let len = max_label_len(0.0, 100.0, "", false);
        assert_eq!(len, 5);
        assert_relative_eq!(auto_margin(len, 14.0, 2), 70.0);
    }

    #[test]
    fn test_max_label_len_signed() {
        assert_eq!(max_label_len(-20.0, 20.0, "°", true), 6);
        assert_eq!(max_label_len(-20.0, 20.0, "°", false), 6);
        assert_eq!(max_label_len(0.0, 5.0, "", true), 4);
    }

    #[test]
    fn test_widest_label() {
        assert_eq!(widest_label(-100.0, 5.0, "%", false), "-100.0%");
        assert_eq!(widest_label(-5.0, 5.0, "°", true), "+5.0°");
        assert_eq!(widest_label(0.0, 100.0, "", false), "100.0");
    }

    #[test]
    fn test_font_sizes() {
        assert_eq!(value_font_size(250), 16);
        assert_eq!(value_font_size(500), 32);
        assert_eq!(tick_font_size(250), 14);
        assert_eq!(tick_font_size(750), 24);
    }

    #[test]
    fn test_text_metrics() {
        let m = TextMetrics::estimate("-1.0", 20.0);
        assert_relative_eq!(m.width, 48.0);
        assert_relative_eq!(m.height, 20.0);
    }
}
