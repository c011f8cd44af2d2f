//! Glyph positioning, scaling and structural measurement.

/// The layout engine.
pub mod clock_layout;
/// Native-size estimation and full-day measurement.
pub mod measure;
