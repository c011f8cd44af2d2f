use std::fmt;
use std::str::FromStr;

use crate::foundation::error::{ClockError, ClockResult};
use crate::foundation::geometry::Size;

/// Horizontal placement of an object within a container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum HorizontalAlign {
    /// Defer to the caller-supplied fallback offset.
    #[default]
    Default,
    Start,
    Center,
    End,
}

/// Vertical placement of an object within a container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum VerticalAlign {
    /// Defer to the caller-supplied fallback offset.
    #[default]
    Default,
    Top,
    Center,
    Bottom,
}

fn align_offset(
    object: f64,
    space: f64,
    leading: bool,
    center: bool,
    trailing: bool,
    fallback: f64,
) -> f64 {
    if leading {
        0.0
    } else if center {
        (space - object) * 0.5
    } else if trailing {
        space - object
    } else {
        fallback
    }
}

impl HorizontalAlign {
    /// Offset of an object of width `object` inside `space`.
    pub fn apply(self, object: f64, space: f64, fallback: f64) -> f64 {
        align_offset(
            object,
            space,
            self == Self::Start,
            self == Self::Center,
            self == Self::End,
            fallback,
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::Start => "Start",
            Self::Center => "Center",
            Self::End => "End",
        }
    }
}

impl VerticalAlign {
    /// Offset of an object of height `object` inside `space`.
    pub fn apply(self, object: f64, space: f64, fallback: f64) -> f64 {
        align_offset(
            object,
            space,
            self == Self::Top,
            self == Self::Center,
            self == Self::Bottom,
            fallback,
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::Top => "Top",
            Self::Center => "Center",
            Self::Bottom => "Bottom",
        }
    }
}

impl FromStr for HorizontalAlign {
    type Err = ClockError;

    fn from_str(s: &str) -> ClockResult<Self> {
        match s.trim() {
            "Default" => Ok(Self::Default),
            "Start" => Ok(Self::Start),
            "Center" => Ok(Self::Center),
            "End" => Ok(Self::End),
            other => Err(ClockError::config(format!(
                "unknown horizontal alignment '{other}'"
            ))),
        }
    }
}

impl FromStr for VerticalAlign {
    type Err = ClockError;

    fn from_str(s: &str) -> ClockResult<Self> {
        match s.trim() {
            "Default" => Ok(Self::Default),
            "Top" => Ok(Self::Top),
            "Center" => Ok(Self::Center),
            "Bottom" => Ok(Self::Bottom),
            other => Err(ClockError::config(format!(
                "unknown vertical alignment '{other}'"
            ))),
        }
    }
}

/// Horizontal and vertical alignment combined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Alignment {
    pub horizontal: HorizontalAlign,
    pub vertical: VerticalAlign,
}

impl Alignment {
    pub const fn new(horizontal: HorizontalAlign, vertical: VerticalAlign) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Offset `(x, y)` placing `object` inside `space`, falling back to 0 on `Default` axes.
    pub fn apply(self, object: Size, space: Size) -> (f64, f64) {
        self.apply_with_fallback(object, space, (0.0, 0.0))
    }

    pub fn apply_with_fallback(
        self,
        object: Size,
        space: Size,
        fallback: (f64, f64),
    ) -> (f64, f64) {
        (
            self.horizontal.apply(object.width, space.width, fallback.0),
            self.vertical.apply(object.height, space.height, fallback.1),
        )
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}__{}", self.horizontal.name(), self.vertical.name())
    }
}

/// Parses `"<Horizontal>__<Vertical>"`, e.g. `End__Bottom`.
impl FromStr for Alignment {
    type Err = ClockError;

    fn from_str(s: &str) -> ClockResult<Self> {
        let (h, v) = s
            .split_once("__")
            .ok_or_else(|| ClockError::config(format!("malformed alignment '{s}'")))?;
        Ok(Self::new(h.parse()?, v.parse()?))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/options/alignment.rs"]
mod tests;
