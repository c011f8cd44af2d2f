//! Native-size estimation and exact structural measurement over time spans.

use std::collections::HashSet;
use std::sync::Arc;

use rayon::prelude::*;

use crate::font::Font;
use crate::foundation::error::{ClockError, ClockResult};
use crate::foundation::geometry::{Rect, Size};
use crate::glyph::glyph::Glyph;
use crate::glyph::key::GlyphKey;
use crate::layout::clock_layout::ClockLayout;
use crate::options::format::{GlyphRole, TimeFormat};
use crate::options::model::{Layout, MAX_GLYPH_MORPH_MILLIS, Options};
use crate::time::clock_time::{ClockTime, MILLIS_PER_SECOND, SECONDS_PER_DAY};

const SECONDS_PER_HOUR: u32 = 3_600;

/// Conservative native size: every slot at the widest any of its keys ever gets.
///
/// Mirrors the line-breaking of the layout passes, so the result is never smaller than what
/// [`measure_full_day`] finds.
pub fn estimate_native_size<F: Font + ?Sized>(
    font: &F,
    format: TimeFormat,
    layout: Layout,
    spacing_px: f64,
) -> Size {
    let mut bounds = Rect::default();
    let mut x = 0.0;
    let mut y = 0.0;

    for (index, &role) in format.roles().iter().enumerate() {
        let design = font.glyph(index, role);
        let scale = font.scale_for_role(role);
        let native_height = design.layout_info().height;

        let breaks = match layout {
            Layout::Horizontal => false,
            Layout::Vertical => role.is_separator(),
            Layout::Wrapped => role == GlyphRole::SeparatorMinutesSeconds,
        };
        if breaks {
            x = 0.0;
            y += native_height + spacing_px;
            continue;
        }
        if scale == 0.0 {
            continue;
        }

        let native_width = if role.is_separator() {
            design.max_width(GlyphKey::Separator)
        } else {
            GlyphKey::digit_slot_keys()
                .map(|key| design.max_width(key))
                .fold(0.0, f64::max)
        };
        let width = native_width * scale;
        let (top, height) = match layout {
            Layout::Horizontal => (0.0, native_height),
            Layout::Vertical | Layout::Wrapped => (y, native_height * scale),
        };
        bounds.include(&Rect::new(x, top, x + width, top + height));
        x += width + spacing_px * scale;
    }
    bounds.to_size()
}

/// Result of sweeping a layout over a span of time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Measurement {
    /// Union of every glyph rectangle visited, in native units.
    pub bounds: Rect,
    /// Glyph keys of the last instant that grew `bounds`.
    pub widest: Option<String>,
}

impl Measurement {
    pub fn size(&self) -> Size {
        self.bounds.to_size()
    }

    /// Union with a later measurement; its `widest` wins if it grew the bounds.
    pub fn merge(&mut self, later: Measurement) {
        if self.bounds.include(&later.bounds) && later.widest.is_some() {
            self.widest = later.widest;
        }
    }
}

/// Sweep settings for exact measurement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MeasureSettings {
    /// Animation-time step within each second's transition window.
    pub step_millis: u32,
    /// Worker threads for [`measure_full_day`]; `None` uses rayon's default.
    pub threads: Option<usize>,
}

impl Default for MeasureSettings {
    fn default() -> Self {
        Self {
            step_millis: 10,
            threads: None,
        }
    }
}

/// Exact bounds reached during `seconds` whole seconds starting at `start`.
///
/// Each second's transition window is swept from 0 in `step_millis` steps. Seconds whose
/// glyphs would lay out exactly like an already swept second are skipped.
pub fn measure_span(
    font: &Arc<dyn Font>,
    options: &Options,
    start: ClockTime,
    seconds: u32,
    step_millis: u32,
) -> ClockResult<Measurement> {
    if step_millis == 0 {
        return Err(ClockError::validation("measure step_millis must be >= 1"));
    }
    let mut layout = ClockLayout::unmeasured(Arc::clone(font), options.clone())?;
    let window = options.glyph_morph_millis;
    let mut out = Measurement::default();
    let mut time = start.with_millis(0);
    let mut swept = HashSet::new();

    for _ in 0..seconds {
        layout.update(Some(time));
        if !swept.insert(layout.geometry_signature()?) {
            time = time.add_millis(i64::from(MILLIS_PER_SECOND));
            continue;
        }
        let mut changed = false;
        let mut millis = 0;
        loop {
            layout.set_animation_time_millis(millis);
            layout.layout_pass(&mut |_: &Glyph, _: f64, rect: &Rect| {
                changed |= out.bounds.include(rect);
                Ok(())
            })?;
            millis += step_millis;
            if millis >= window {
                break;
            }
        }
        if changed {
            out.widest = Some(layout.glyph_keys().join(" "));
        }
        time = time.add_millis(i64::from(MILLIS_PER_SECOND));
    }
    Ok(out)
}

/// Exact bounds over a whole day, one hour per rayon task, merged in hour order.
#[tracing::instrument(skip(font, options), fields(font = font.name(), format = %options.format, layout = %options.layout))]
pub fn measure_full_day(
    font: &Arc<dyn Font>,
    options: &Options,
    settings: MeasureSettings,
) -> ClockResult<Measurement> {
    let pool = build_thread_pool(settings.threads)?;
    let hours: Vec<u32> = (0..SECONDS_PER_DAY / SECONDS_PER_HOUR).collect();

    let spans = pool.install(|| {
        hours
            .par_iter()
            .map(|&hour| {
                measure_span(
                    font,
                    options,
                    ClockTime::from_seconds_of_day(hour * SECONDS_PER_HOUR),
                    SECONDS_PER_HOUR,
                    settings.step_millis,
                )
            })
            .collect::<Vec<_>>()
    });

    let mut out = Measurement::default();
    for span in spans {
        out.merge(span?);
    }
    tracing::debug!(bounds = %out.bounds, widest = ?out.widest, "full day measured");
    Ok(out)
}

/// Exact native size: the full-day bounds at 1x, swept over the longest transition window.
pub fn measure_native_size(
    font: &Arc<dyn Font>,
    format: TimeFormat,
    layout: Layout,
    spacing_px: f64,
) -> ClockResult<Size> {
    let options = Options {
        format,
        layout,
        spacing_px,
        glyph_morph_millis: MAX_GLYPH_MORPH_MILLIS,
        ..Options::default()
    };
    Ok(measure_full_day(font, &options, MeasureSettings::default())?.size())
}

fn build_thread_pool(threads: Option<usize>) -> ClockResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(ClockError::validation(
            "measure 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ClockError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/layout/measure.rs"]
mod tests;
