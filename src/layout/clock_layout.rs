use std::fmt;
use std::sync::Arc;

use crate::font::Font;
use crate::foundation::error::{ClockError, ClockResult};
use crate::foundation::geometry::{Rect, Size};
use crate::foundation::math::progress;
use crate::glyph::glyph::Glyph;
use crate::glyph::key::{PLACEHOLDER, SEPARATOR, is_separator_key};
use crate::glyph::state::GlyphStateLock;
use crate::options::format::GlyphRole;
use crate::options::model::{Layout, Options};
use crate::time::clock_time::{ClockTime, MILLIS_PER_DAY};
use crate::time::source::{SystemClock, TimeSource};

/// How [`ClockLayout::set_available_size`] turns available space into a scale.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MeasureStrategy {
    /// Stay inside both dimensions of the available space.
    #[default]
    Fit,
    /// Derive the scale from whichever dimension is non-zero.
    Fill,
}

/// Outcome of updating one glyph during a layout pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphStatus {
    pub visible: bool,
    pub progress: f64,
    /// Width including the glyph's role scale, in native units.
    pub width: f64,
    pub height: f64,
}

impl GlyphStatus {
    pub const HIDDEN: GlyphStatus = GlyphStatus {
        visible: false,
        progress: 0.0,
        width: 0.0,
        height: 0.0,
    };
}

/// Visitor invoked once per visible glyph with its progress and native-unit rectangle.
pub type LayoutVisitor<'a> = dyn FnMut(&Glyph, f64, &Rect) -> ClockResult<()> + 'a;

/// What one glyph contributes to the rectangles of a second's layout passes.
///
/// Steady glyphs only matter through their width and whether they break the line, so seconds
/// that differ only in steady digits produce equal signatures.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) enum GlyphSignature {
    Steady { width_bits: u64, breaks_line: bool },
    Moving(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LineBreak {
    /// Every `:` starts a new line.
    SeparatorKey,
    /// Only the minutes/seconds separator starts a new line.
    MinutesSeconds,
}

/// Positions a clock's glyphs for the current instant.
///
/// Sizes come in three flavours: the native size (the largest the clock ever gets at 1x), the
/// available size handed in by the host, and the measured size (`native * scale`) the host
/// should give its surface. Layout passes work in native units; callers apply `scale`.
pub struct ClockLayout {
    font: Arc<dyn Font>,
    options: Options,
    clock: Box<dyn TimeSource>,
    /// False for sweep layouts, whose native size is never asked of the font.
    measures_native: bool,
    native_size: Size,
    available_size: Size,
    measured_size: Size,
    current_native_size: Option<Vec<Size>>,
    scale: f64,
    measure_strategy: MeasureStrategy,
    glyphs: Vec<Glyph>,
    animation_time_millis: u32,
    animated_glyphs: Vec<usize>,
    last_update: Option<ClockTime>,
}

impl fmt::Debug for ClockLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClockLayout")
            .field("font", &self.font.name())
            .field("options", &self.options)
            .field("native_size", &self.native_size)
            .field("measured_size", &self.measured_size)
            .field("scale", &self.scale)
            .field("glyphs", &self.glyphs)
            .field("animation_time_millis", &self.animation_time_millis)
            .finish_non_exhaustive()
    }
}

impl ClockLayout {
    pub fn new(font: Arc<dyn Font>, options: Options) -> ClockResult<Self> {
        Self::build(font, options, true)
    }

    /// Layout for exact measurement sweeps: layout passes only, native size left at zero.
    pub(crate) fn unmeasured(font: Arc<dyn Font>, options: Options) -> ClockResult<Self> {
        Self::build(font, options, false)
    }

    fn build(font: Arc<dyn Font>, options: Options, measures_native: bool) -> ClockResult<Self> {
        let mut layout = Self {
            font,
            options: Options::default(),
            clock: Box::new(SystemClock::from_env()),
            measures_native,
            native_size: Size::ZERO,
            available_size: Size::ZERO,
            measured_size: Size::ZERO,
            current_native_size: None,
            scale: 0.0,
            measure_strategy: MeasureStrategy::Fit,
            glyphs: Vec::new(),
            animation_time_millis: 0,
            animated_glyphs: Vec::new(),
            last_update: None,
        };
        layout.set_options(options)?;
        Ok(layout)
    }

    /// Replace the options, rebuilding every glyph and the native size.
    ///
    /// A previously supplied available size is applied again against the new native size.
    #[tracing::instrument(skip(self, options), fields(format = %options.format, layout = %options.layout))]
    pub fn set_options(&mut self, options: Options) -> ClockResult<()> {
        options.validate()?;
        let font = Arc::clone(&self.font);
        self.native_size = if self.measures_native {
            font.measure(options.format, options.layout, options.spacing_px)
        } else {
            Size::ZERO
        };
        self.glyphs = options
            .format
            .roles()
            .iter()
            .enumerate()
            .map(|(index, &role)| {
                Glyph::new(font.glyph(index, role), role, font.scale_for_role(role))
            })
            .collect();
        self.options = options;
        self.animated_glyphs.clear();
        self.animation_time_millis = 0;
        self.last_update = None;
        self.current_native_size = None;
        tracing::debug!(native = %self.native_size, glyphs = self.glyphs.len(), "options applied");

        if self.available_size.width != 0.0 || self.available_size.height != 0.0 {
            self.set_available_size(self.available_size);
        }
        Ok(())
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn font(&self) -> &Arc<dyn Font> {
        &self.font
    }

    /// Clock used by [`ClockLayout::update`] when no explicit time is given.
    pub fn set_clock(&mut self, clock: impl TimeSource + 'static) {
        self.clock = Box::new(clock);
    }

    pub fn native_size(&self) -> Size {
        self.native_size
    }

    pub fn available_size(&self) -> Size {
        self.available_size
    }

    pub fn measured_size(&self) -> Size {
        self.measured_size
    }

    /// Per-line sizes of the current frame. Only present while [`ClockLayout::on_draw`] runs
    /// its draw callback.
    pub fn current_native_size(&self) -> Option<&[Size]> {
        self.current_native_size.as_deref()
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn measure_strategy(&self) -> MeasureStrategy {
        self.measure_strategy
    }

    pub fn set_measure_strategy(&mut self, strategy: MeasureStrategy) {
        self.measure_strategy = strategy;
    }

    /// Compute the scale for `available` and return the size the host should use.
    ///
    /// A 0 x 0 area makes the layout undrawable. A zero available height always uses
    /// [`MeasureStrategy::Fill`].
    #[tracing::instrument(skip_all, fields(available = %available))]
    pub fn set_available_size(&mut self, available: Size) -> Size {
        self.available_size = available;

        if available.width == 0.0 && available.height == 0.0 {
            return self.set_scale(0.0);
        }
        let native = self.native_size;
        let strategy = if available.height == 0.0 {
            MeasureStrategy::Fill
        } else {
            self.measure_strategy
        };

        let scale = match strategy {
            MeasureStrategy::Fit => {
                let width_ratio = available.width / native.width;
                let height_ratio = available.height / native.height;
                width_ratio.min(height_ratio)
            }
            MeasureStrategy::Fill => {
                if available.width > 0.0 {
                    available.width / native.width
                } else {
                    available.height / native.height
                }
            }
        };
        self.set_scale(scale)
    }

    /// Set the scale directly and return the resulting measured size.
    ///
    /// Non-finite or negative scales are treated as 0.
    pub fn set_scale(&mut self, scale: f64) -> Size {
        self.scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            0.0
        };
        self.measured_size = self.native_size.scaled_by(self.scale);
        tracing::debug!(scale = self.scale, measured = %self.measured_size, "scale changed");
        self.measured_size
    }

    pub fn is_drawable(&self) -> bool {
        self.scale != 0.0 && !self.measured_size.is_empty()
    }

    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    pub fn glyph(&self, index: usize) -> ClockResult<&Glyph> {
        self.glyphs.get(index).ok_or_else(|| out_of_range(index))
    }

    /// Mutable access for hosts that attach state callbacks or seed glyph states.
    pub fn glyph_mut(&mut self, index: usize) -> ClockResult<&mut Glyph> {
        self.glyphs.get_mut(index).ok_or_else(|| out_of_range(index))
    }

    /// Current key of every glyph, in order.
    pub fn glyph_keys(&self) -> Vec<String> {
        self.glyphs.iter().map(|g| g.key().to_string()).collect()
    }

    pub fn set_lock(&mut self, index: usize, lock: GlyphStateLock) -> ClockResult<()> {
        self.glyphs
            .get_mut(index)
            .ok_or_else(|| out_of_range(index))?
            .set_lock(lock);
        Ok(())
    }

    pub fn animation_time_millis(&self) -> u32 {
        self.animation_time_millis
    }

    /// Move within the current second's transition without re-reading the time.
    pub fn set_animation_time_millis(&mut self, millis: u32) {
        self.animation_time_millis = millis;
    }

    /// Indices of the glyphs transitioning during the current second.
    pub fn animated_glyph_indices(&self) -> &[usize] {
        &self.animated_glyphs
    }

    /// Set every glyph's key and state for `time` (or the layout's clock).
    pub fn update(&mut self, time: Option<ClockTime>) {
        let now = time.unwrap_or_else(|| self.clock.now());
        let now_string = self.options.format.apply(now);
        let next_string = self.options.format.apply(now.next_second());

        if let Some(last) = self.last_update {
            let elapsed = (i64::from(now.millis_of_day()) - i64::from(last.millis_of_day()))
                .rem_euclid(i64::from(MILLIS_PER_DAY));
            for glyph in &mut self.glyphs {
                glyph.machine_mut().advance(elapsed as f64);
            }
        }
        self.last_update = Some(now);

        self.animation_time_millis = now.millis();
        self.update_glyphs(&now_string, &next_string);
    }

    fn update_glyphs(&mut self, now: &str, next: &str) {
        self.animated_glyphs.clear();
        for (index, (glyph, (from, to))) in self
            .glyphs
            .iter_mut()
            .zip(now.chars().zip(next.chars()))
            .enumerate()
        {
            if from == to {
                glyph.set_key(from.to_string());
                glyph.set_activating();
            } else {
                glyph.set_key(format!("{from}_{to}"));
                glyph.set_deactivating();
                self.animated_glyphs.push(index);
            }
        }
    }

    /// Per-glyph inputs of the current second's rectangles. Layout passes of two seconds with
    /// equal signatures visit equal rectangles at equal animation times.
    pub(crate) fn geometry_signature(&self) -> ClockResult<Vec<GlyphSignature>> {
        self.glyphs
            .iter()
            .enumerate()
            .map(|(index, glyph)| {
                if self.animated_glyphs.contains(&index) {
                    return Ok(GlyphSignature::Moving(glyph.key().to_string()));
                }
                let breaks_line = match self.options.layout {
                    Layout::Horizontal => false,
                    Layout::Vertical => is_separator_key(glyph.key()),
                    Layout::Wrapped => glyph.role() == GlyphRole::SeparatorMinutesSeconds,
                };
                Ok(GlyphSignature::Steady {
                    width_bits: (glyph.width_at_progress(0.0)? * glyph.scale()).to_bits(),
                    breaks_line,
                })
            })
            .collect()
    }

    /// 0 for steady glyphs, otherwise how far through its transition the glyph is.
    pub fn glyph_animation_progress(&self, index: usize) -> f64 {
        if !self.animated_glyphs.contains(&index) {
            return 0.0;
        }
        progress(
            f64::from(self.animation_time_millis),
            0.0,
            f64::from(self.options.glyph_morph_millis),
        )
    }

    /// Resolve progress, key and size of one glyph for the current instant.
    ///
    /// Completed transitions snap to their end character and report progress 0. A moving glyph
    /// also lights up its predecessor unless that one is a separator or placeholder.
    pub fn update_glyph(&mut self, index: usize) -> ClockResult<GlyphStatus> {
        let scale = self.glyph(index)?.scale();
        if scale == 0.0 {
            return Ok(GlyphStatus::HIDDEN);
        }

        let mut glyph_progress = self.glyph_animation_progress(index);
        if glyph_progress == 1.0 {
            let glyph = &mut self.glyphs[index];
            let end = glyph.canonical_end_glyph();
            glyph.set_key(end.to_string());
            glyph_progress = 0.0;
        }

        if glyph_progress != 0.0 {
            self.glyphs[index].set_activating();
            if index > 0 {
                let previous = &mut self.glyphs[index - 1];
                let canonical = previous.canonical_start_glyph();
                if canonical != PLACEHOLDER && canonical != SEPARATOR {
                    previous.set_activating();
                }
            }
        }

        let glyph = &self.glyphs[index];
        Ok(GlyphStatus {
            visible: true,
            progress: glyph_progress,
            width: glyph.width_at_progress(glyph_progress)? * glyph.scale(),
            height: glyph.native_height() * glyph.scale(),
        })
    }

    /// Visit every visible glyph with its rectangle, per the configured [`Layout`].
    pub fn layout_pass(&mut self, visit: &mut LayoutVisitor<'_>) -> ClockResult<()> {
        match self.options.layout {
            Layout::Horizontal => self.layout_pass_horizontal(visit),
            Layout::Vertical => self.layout_pass_lines(visit, LineBreak::SeparatorKey),
            Layout::Wrapped => self.layout_pass_lines(visit, LineBreak::MinutesSeconds),
        }
    }

    fn layout_pass_horizontal(&mut self, visit: &mut LayoutVisitor<'_>) -> ClockResult<()> {
        let spacing = self.options.spacing_px;
        let vertical = self.options.alignment.vertical;
        let mut x = 0.0;

        for index in 0..self.glyphs.len() {
            let status = self.update_glyph(index)?;
            if !status.visible {
                continue;
            }
            let glyph = &self.glyphs[index];
            let top = vertical.apply(status.height, glyph.native_height(), 0.0);
            let rect = Rect::new(x, top, x + status.width, top + status.height);
            visit(glyph, status.progress, &rect)?;
            x += status.width + spacing * glyph.scale();
        }
        Ok(())
    }

    fn layout_pass_lines(
        &mut self,
        visit: &mut LayoutVisitor<'_>,
        line_break: LineBreak,
    ) -> ClockResult<()> {
        let spacing = self.options.spacing_px;
        let horizontal = self.options.alignment.horizontal;
        let line_widths: Option<Vec<f64>> = self
            .current_native_size
            .as_ref()
            .map(|lines| lines.iter().map(|line| line.width).collect());
        let max_line_width = line_widths
            .iter()
            .flatten()
            .copied()
            .fold(0.0, f64::max);
        let line_x = |line: usize| match &line_widths {
            Some(widths) => horizontal.apply(
                widths.get(line).copied().unwrap_or(0.0),
                max_line_width,
                0.0,
            ),
            None => 0.0,
        };

        let mut line = 0;
        let mut x = line_x(line);
        let mut y = 0.0;

        for index in 0..self.glyphs.len() {
            let status = self.update_glyph(index)?;
            let glyph = &self.glyphs[index];

            let breaks = match line_break {
                LineBreak::SeparatorKey => is_separator_key(glyph.key()),
                LineBreak::MinutesSeconds => glyph.role() == GlyphRole::SeparatorMinutesSeconds,
            };
            if breaks {
                line += 1;
                x = line_x(line);
                y += glyph.native_height() + spacing;
                continue;
            }
            if !status.visible {
                continue;
            }

            let rect = Rect::new(x, y, x + status.width, y + status.height);
            visit(glyph, status.progress, &rect)?;
            x += status.width + spacing * glyph.scale();
        }
        Ok(())
    }

    /// Two-pass draw: measure the current frame's lines and bounds, then hand `draw` the
    /// alignment offset and scale so it can run the positioned layout pass.
    pub fn on_draw<R>(
        &mut self,
        draw: impl FnOnce(&mut Self, (f64, f64), f64) -> ClockResult<R>,
    ) -> ClockResult<R> {
        let mut bounds = Rect::default();
        let mut lines: Vec<Size> = Vec::new();
        let mut current_line = Rect::default();

        self.current_native_size = None;
        self.layout_pass(&mut |_: &Glyph, _: f64, rect: &Rect| {
            bounds.include(rect);
            if rect.top() != current_line.top() {
                if !current_line.is_empty() {
                    lines.push(current_line.to_size());
                }
                current_line = *rect;
            } else {
                current_line.include(rect);
            }
            Ok(())
        })?;
        if !current_line.is_empty() {
            lines.push(current_line.to_size());
        }

        self.current_native_size = Some(lines);
        let translation = self
            .options
            .alignment
            .apply(bounds.to_size().scaled_by(self.scale), self.measured_size);
        let scale = self.scale;

        let out = draw(self, translation, scale);
        self.current_native_size = None;
        out
    }
}

fn out_of_range(index: usize) -> ClockError {
    ClockError::config(format!("glyph index {index} out of range"))
}

#[cfg(test)]
#[path = "../../tests/unit/layout/clock_layout.rs"]
mod tests;
