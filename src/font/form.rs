//! The "Form" glyph family: flat geometric shapes in two accent colours.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

use crate::font::{Font, segments};
use crate::foundation::error::ClockResult;
use crate::foundation::geometry::Size;
use crate::foundation::math::{decelerate5, interpolate, progress as prog};
use crate::glyph::glyph::{GlyphDesign, GlyphLayoutInfo};
use crate::glyph::key::{DigitTransition, GlyphKey};
use crate::layout::measure::{estimate_native_size, measure_native_size};
use crate::options::format::{GlyphRole, TimeFormat};
use crate::options::model::Layout;
use crate::render::paints::Paints;
use crate::render::surface::Painter;

pub const HEIGHT: f64 = 144.0;
pub const SEPARATOR_WIDTH: f64 = 48.0;
/// Width of a settled `1` at the end of `0_1`.
pub const ONE_WIDTH: f64 = 100.0;
/// Widest point of the `0_1` morph, reached half way through.
pub const ZERO_ONE_BULGE: f64 = 192.0;

#[derive(Clone, Copy, Debug, Default)]
pub struct FormFont;

impl Font for FormFont {
    fn name(&self) -> &str {
        "form"
    }

    fn glyph(&self, _index: usize, _role: GlyphRole) -> Box<dyn GlyphDesign> {
        Box::new(FormGlyph)
    }

    /// Exact full-day bounds. Only one `0_1` bulge is ever in flight, so the per-slot estimate
    /// overshoots by several bulges. Measured once per format, layout and spacing.
    fn measure(&self, format: TimeFormat, layout: Layout, spacing_px: f64) -> Size {
        let key = (format, layout, spacing_px.to_bits());
        if let Some(size) = native_sizes()
            .lock()
            .ok()
            .and_then(|sizes| sizes.get(&key).copied())
        {
            return size;
        }

        let font: Arc<dyn Font> = Arc::new(*self);
        match measure_native_size(&font, format, layout, spacing_px) {
            Ok(size) => {
                if let Ok(mut sizes) = native_sizes().lock() {
                    sizes.insert(key, size);
                }
                size
            }
            Err(e) => {
                tracing::warn!(error = %e, %format, %layout, "falling back to the estimated native size");
                estimate_native_size(self, format, layout, spacing_px)
            }
        }
    }
}

type NativeSizeKey = (TimeFormat, Layout, u64);

fn native_sizes() -> &'static Mutex<HashMap<NativeSizeKey, Size>> {
    static SIZES: OnceLock<Mutex<HashMap<NativeSizeKey, Size>>> = OnceLock::new();
    SIZES.get_or_init(Default::default)
}

#[derive(Clone, Copy, Debug, Default)]
pub struct FormGlyph;

fn zero_one_width(progress: f64) -> f64 {
    interpolate(
        decelerate5(prog(progress, 0.5, 1.0)),
        interpolate(decelerate5(prog(progress, 0.0, 0.5)), HEIGHT, ZERO_ONE_BULGE),
        ONE_WIDTH,
    )
}

impl GlyphDesign for FormGlyph {
    fn layout_info(&self) -> GlyphLayoutInfo {
        GlyphLayoutInfo {
            height: HEIGHT,
            width: None,
            is_monospace: false,
        }
    }

    fn width_at_progress(&self, key: GlyphKey, progress: f64) -> f64 {
        match key {
            GlyphKey::Transition(DigitTransition::D0To1) => zero_one_width(progress),
            GlyphKey::Separator => SEPARATOR_WIDTH,
            _ => HEIGHT,
        }
    }

    fn draw(
        &self,
        painter: &mut Painter<'_>,
        key: GlyphKey,
        progress: f64,
        paints: &Paints,
    ) -> ClockResult<()> {
        match key {
            GlyphKey::Separator => draw_separator(painter, paints),
            GlyphKey::Blank | GlyphKey::Placeholder => Ok(()),
            _ => match key.drawable_transition() {
                Some(DigitTransition::D0To1) => draw_zero_one(painter, progress, paints),
                Some(t) => segments::draw_transition(painter, t, progress, paints),
                None => Ok(()),
            },
        }
    }
}

fn draw_separator(painter: &mut Painter<'_>, paints: &Paints) -> ClockResult<()> {
    painter.fill_circle(24.0, 24.0, 24.0, paints.color(1))?;
    painter.fill_circle(24.0, 120.0, 24.0, paints.color(2))
}

/// A tilted disc split in two halves, stretching into the bar of a `1`.
fn draw_zero_one(painter: &mut Painter<'_>, progress: f64, paints: &Paints) -> ClockResult<()> {
    let d1 = decelerate5(prog(progress, 0.0, 0.5));
    let d2 = decelerate5(prog(progress, 0.5, 1.0));

    painter.with_checkpoint(|c| {
        c.translate(interpolate(d1, 0.0, interpolate(d2, 24.0, 0.0)), 0.0);
        c.scale_with_pivot(interpolate(d1, 1.0, 2.0 / 3.0), 72.0, 144.0);
        c.scale_with_pivot(interpolate(d2, 1.0, 0.7), 72.0, 96.0);
        c.rotate_with_pivot(interpolate(d1, 45.0, 0.0), 72.0, 72.0);

        let stretch_x = interpolate(d1, 0.0, interpolate(d2, 72.0, -36.0));
        c.begin_path();
        c.move_to(72.0 - stretch_x, 144.0);
        c.bounded_arc(-stretch_x, 0.0, 144.0 - stretch_x, 144.0, 90.0, 180.0);
        c.line_to(72.0 + stretch_x, 0.0);
        c.line_to(72.0 + stretch_x, 144.0);
        c.line_to(72.0 - stretch_x, 144.0);
        c.close_path();
        c.fill_paint(paints.color(1))?;

        c.begin_path();
        c.bounded_arc(stretch_x, 0.0, 144.0 + stretch_x, 144.0, -90.0, 180.0);
        c.close_path();
        c.fill_paint(paints.color(2))
    })?;

    if d2 > 0.0 {
        let split = interpolate(d2, 144.0, 48.0);
        painter.stroke_rect(
            interpolate(d2, 28.0, 0.0),
            interpolate(d2, 72.0, 0.0),
            ONE_WIDTH,
            split,
            paints.color(1),
            paints.stroke_width,
        )?;
        painter.stroke_rect(
            28.0,
            split,
            ONE_WIDTH,
            HEIGHT - split,
            paints.color(2),
            paints.stroke_width,
        )?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/font/form.rs"]
mod tests;
