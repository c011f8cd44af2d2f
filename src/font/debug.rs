//! Monospace box glyphs for inspecting layout and animation timing.

use crate::font::Font;
use crate::foundation::error::ClockResult;
use crate::glyph::glyph::{GlyphDesign, GlyphLayoutInfo};
use crate::glyph::key::GlyphKey;
use crate::options::format::GlyphRole;
use crate::render::paints::Paints;
use crate::render::surface::Painter;

pub const SIZE: f64 = 100.0;
const BAR_HEIGHT: f64 = 10.0;
const OUTLINE_WIDTH: f64 = 2.0;

/// Every glyph is a 100 x 100 box; seconds are not scaled down.
#[derive(Clone, Copy, Debug, Default)]
pub struct DebugFont;

impl Font for DebugFont {
    fn name(&self) -> &str {
        "debug"
    }

    fn glyph(&self, _index: usize, _role: GlyphRole) -> Box<dyn GlyphDesign> {
        Box::new(DebugGlyph)
    }

    fn scale_for_role(&self, _role: GlyphRole) -> f64 {
        1.0
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct DebugGlyph;

impl GlyphDesign for DebugGlyph {
    fn layout_info(&self) -> GlyphLayoutInfo {
        GlyphLayoutInfo {
            height: SIZE,
            width: Some(SIZE),
            is_monospace: true,
        }
    }

    fn width_at_progress(&self, _key: GlyphKey, _progress: f64) -> f64 {
        SIZE
    }

    fn max_width(&self, _key: GlyphKey) -> f64 {
        SIZE
    }

    fn draw(
        &self,
        painter: &mut Painter<'_>,
        key: GlyphKey,
        progress: f64,
        paints: &Paints,
    ) -> ClockResult<()> {
        match key {
            GlyphKey::Blank | GlyphKey::Placeholder => Ok(()),
            GlyphKey::Separator => painter.fill_circle(SIZE * 0.5, SIZE * 0.5, 8.0, paints.color(0)),
            GlyphKey::Digit(_) | GlyphKey::Transition(_) => {
                painter.stroke_rect(0.0, 0.0, SIZE, SIZE, paints.color(0), OUTLINE_WIDTH)?;
                if progress > 0.0 {
                    painter.fill_rect(
                        0.0,
                        SIZE - BAR_HEIGHT,
                        SIZE * progress,
                        BAR_HEIGHT,
                        paints.color(1),
                    )?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/font/debug.rs"]
mod tests;
