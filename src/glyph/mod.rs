//! Animated character slots: transition keys, the per-glyph state machine, and the glyph
//! design capability fonts implement.

/// A glyph slot and the [`glyph::GlyphDesign`] trait.
#[allow(clippy::module_inception)]
pub mod glyph;
/// Transition-key alphabet.
pub mod key;
/// Per-glyph visibility state machine.
pub mod state;
