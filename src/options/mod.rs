//! User-facing clock configuration.

/// Horizontal/vertical alignment resolution.
pub mod alignment;
/// Named time formats and per-character roles.
pub mod format;
/// `Options`, `OptionsPatch` and `Layout`.
pub mod model;
/// Key/value persistence of options and paints.
pub mod settings;
