use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::Context as _;

use crate::foundation::error::{ClockError, ClockResult};
use crate::foundation::geometry::Rect;
use crate::options::alignment::{Alignment, HorizontalAlign, VerticalAlign};
use crate::options::format::TimeFormat;
use crate::render::paints::Color;

/// Upper bound for [`Options::glyph_morph_millis`]: transitions must finish within one second.
pub const MAX_GLYPH_MORPH_MILLIS: u32 = 1_000;

/// How glyphs are arranged into lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Layout {
    /// Everything on one line.
    Horizontal,
    /// One line per field, broken at every `:`.
    Vertical,
    /// `HH:MM` on the first line, seconds below.
    #[default]
    Wrapped,
}

impl Layout {
    pub const ALL: [Layout; 3] = [Self::Horizontal, Self::Vertical, Self::Wrapped];

    pub fn name(self) -> &'static str {
        match self {
            Self::Horizontal => "Horizontal",
            Self::Vertical => "Vertical",
            Self::Wrapped => "Wrapped",
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Layout {
    type Err = ClockError;

    fn from_str(s: &str) -> ClockResult<Self> {
        Self::ALL
            .into_iter()
            .find(|l| l.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ClockError::config(format!("unknown layout '{s}'")))
    }
}

/// Clock configuration consumed by the layout engine.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Options {
    pub format: TimeFormat,
    /// Duration of one glyph transition, in milliseconds.
    pub glyph_morph_millis: u32,
    pub spacing_px: f64,
    pub alignment: Alignment,
    pub layout: Layout,
    pub background_color: Option<Color>,
    /// Fractional placement of the clock inside its host container.
    pub bounds: Rect,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            format: TimeFormat::HhMmSs24,
            glyph_morph_millis: 800,
            spacing_px: 16.0,
            alignment: Alignment::new(HorizontalAlign::Default, VerticalAlign::Bottom),
            layout: Layout::Wrapped,
            background_color: None,
            bounds: Rect::new(0.0, 0.0, 1.0, 1.0),
        }
    }
}

/// A partial [`Options`]; unset fields leave the target untouched when merged.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct OptionsPatch {
    pub format: Option<TimeFormat>,
    pub glyph_morph_millis: Option<u32>,
    pub spacing_px: Option<f64>,
    pub alignment: Option<Alignment>,
    pub layout: Option<Layout>,
    /// `Some(None)` clears the background; JSON `null` means the same.
    #[serde(deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Option<Color>>,
    pub bounds: Option<Rect>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl OptionsPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Options {
    /// New options with every field set in `patch` replaced.
    pub fn merge(&self, patch: &OptionsPatch) -> Options {
        Options {
            format: patch.format.unwrap_or(self.format),
            glyph_morph_millis: patch.glyph_morph_millis.unwrap_or(self.glyph_morph_millis),
            spacing_px: patch.spacing_px.unwrap_or(self.spacing_px),
            alignment: patch.alignment.unwrap_or(self.alignment),
            layout: patch.layout.unwrap_or(self.layout),
            background_color: patch.background_color.unwrap_or(self.background_color),
            bounds: patch.bounds.unwrap_or(self.bounds),
        }
    }

    pub fn validate(&self) -> ClockResult<()> {
        if self.glyph_morph_millis > MAX_GLYPH_MORPH_MILLIS {
            return Err(ClockError::validation(format!(
                "glyph_morph_millis must be <= {MAX_GLYPH_MORPH_MILLIS}, got {}",
                self.glyph_morph_millis
            )));
        }
        if !self.spacing_px.is_finite() || self.spacing_px < 0.0 {
            return Err(ClockError::validation(format!(
                "spacing_px must be finite and >= 0, got {}",
                self.spacing_px
            )));
        }
        let b = self.bounds;
        if ![b.left(), b.top(), b.right(), b.bottom()]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(ClockError::validation("bounds must be finite"));
        }
        Ok(())
    }

    /// Parse and validate options from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> ClockResult<Self> {
        let opts: Options =
            serde_json::from_str(json).map_err(|e| ClockError::serde(e.to_string()))?;
        opts.validate()?;
        Ok(opts)
    }

    pub fn from_path(path: &Path) -> ClockResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read options '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    pub fn to_json_pretty(&self) -> ClockResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ClockError::serde(e.to_string()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/options/model.rs"]
mod tests;
