//! Glyph families and the [`Font`] capability the layout engine builds glyphs from.

use std::sync::Arc;

use crate::foundation::error::{ClockError, ClockResult};
use crate::foundation::geometry::Size;
use crate::glyph::glyph::GlyphDesign;
use crate::layout::measure::estimate_native_size;
use crate::options::format::{GlyphRole, TimeFormat};
use crate::options::model::Layout;

/// Monospace box glyphs.
pub mod debug;
/// Default geometric glyph family.
pub mod form;
/// Seven-segment morph shared by transitions without a dedicated drawing.
pub mod segments;

/// Glyph factory plus native-size measurer.
pub trait Font: Send + Sync {
    fn name(&self) -> &str;

    /// Design for the glyph at character position `index`.
    fn glyph(&self, index: usize, role: GlyphRole) -> Box<dyn GlyphDesign>;

    /// Per-role glyph scale. Seconds render at half size by default.
    fn scale_for_role(&self, role: GlyphRole) -> f64 {
        match role {
            GlyphRole::Second => 0.5,
            _ => 1.0,
        }
    }

    /// Upper bound of the clock's size at 1x scale for every time of day.
    fn measure(&self, format: TimeFormat, layout: Layout, spacing_px: f64) -> Size {
        estimate_native_size(self, format, layout, spacing_px)
    }
}

pub const FONT_NAMES: [&str; 2] = ["form", "debug"];

/// Look up a bundled font by name (case-insensitive).
pub fn font_by_name(name: &str) -> ClockResult<Arc<dyn Font>> {
    match name.trim().to_ascii_lowercase().as_str() {
        "form" => Ok(Arc::new(form::FormFont)),
        "debug" => Ok(Arc::new(debug::DebugFont)),
        other => Err(ClockError::config(format!(
            "unknown font '{other}' (expected one of: {})",
            FONT_NAMES.join(", ")
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/font/mod.rs"]
mod tests;
