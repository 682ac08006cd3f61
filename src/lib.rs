//! # gaugeviz
//!
//! Rendering engine for analog instrument faces: radial arc dials and
//! vertical bar/pitch meters that show a bounded value as a moving indicator
//! over a scaled, labelled dial.
//!
//! The pipeline runs in one direction:
//!
//! ```text
//! GaugeConfig -> Layout + TickSet -> Face (cached, supersampled)
//!             -> indicator composite per value -> display bitmap + label text
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use gaugeviz::prelude::*;
//!
//! let source = ValueSource::new(0.0, -22.0, 22.0)?;
//! let roll = Gauge::new(
//!     GaugeConfig::radial()
//!         .range(-24.0, 24.0)
//!         .major_tick_step(4.0)
//!         .label_suffix("°")
//!         .box_length(500)
//!         .arc_width(30.0),
//! )?
//! .bind(&source)?;
//!
//! source.set(12.0)?;
//! assert_eq!(roll.borrow().display_text(), "12.0°");
//! let png = PngEncoder::new().to_bytes(&roll.borrow().snapshot()?)?;
//! assert!(!png.is_empty());
//! # Ok::<(), gaugeviz::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `rusttype`: exact glyph rendering from host-supplied font data
//! - `serde`: serde derives and YAML configuration files
//! - `cli`: the `gauge-gallery` binary
//! - `full`: all features enabled

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in graphics code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Colors and hex parsing.
pub mod color;

/// RGBA bitmaps: copy, crop and bicubic resize.
pub mod framebuffer;

/// Points, rectangles and polar helpers.
pub mod geometry;

/// Value-to-domain mapping.
pub mod scale;

// ============================================================================
// Gauge Engine
// ============================================================================

/// Gauge configuration, defaults and validation.
pub mod config;

/// Major/minor tick planning.
pub mod ticks;

/// Label formatting and text metrics.
pub mod label;

/// Derived radial and linear geometry.
pub mod layout;

/// Static face rendering.
pub mod face;

/// Indicator compositing.
pub mod indicator;

/// Reactive value source and text sinks.
pub mod source;

/// Gauge controller.
pub mod gauge;

// ============================================================================
// Rendering Modules
// ============================================================================

/// Drawing surface and anti-aliased primitives.
pub mod render;

/// Text measurement and drawing.
pub mod text;

/// Output encoders.
pub mod output;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for gauge operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust
/// use gaugeviz::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::Rgba;
    pub use crate::config::{GaugeConfig, GaugeKind, LinearLabels, LinearOptions, RadialOptions};
    pub use crate::error::{Error, Result};
    pub use crate::face::Face;
    pub use crate::framebuffer::Framebuffer;
    pub use crate::gauge::{BoundGauge, Gauge, GaugePhase};
    pub use crate::geometry::{Point, Rect};
    pub use crate::layout::Layout;
    pub use crate::output::PngEncoder;
    pub use crate::render::{Canvas, Surface};
    pub use crate::scale::{LinearScale, Scale};
    pub use crate::source::{SharedText, Subscription, TextSink, ValueSource};
    pub use crate::text::{BitmapFont, TextAnchor, TextRenderer};
    pub use crate::ticks::{Tick, TickOverrun, TickSet};

    #[cfg(feature = "rusttype")]
    pub use crate::text::RustTypeText;
}
