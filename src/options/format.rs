use std::fmt;
use std::str::FromStr;

use crate::foundation::error::{ClockError, ClockResult};
use crate::time::clock_time::ClockTime;

/// Semantic tag of one character position in a formatted time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum GlyphRole {
    Hour,
    Minute,
    Second,
    SeparatorHoursMinutes,
    SeparatorMinutesSeconds,
}

impl GlyphRole {
    pub fn is_separator(self) -> bool {
        matches!(
            self,
            Self::SeparatorHoursMinutes | Self::SeparatorMinutesSeconds
        )
    }
}

/// Finest unit a format displays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimeResolution {
    Hours,
    Minutes,
    Seconds,
}

const ROLES_HH_MM_SS: &[GlyphRole] = &[
    GlyphRole::Hour,
    GlyphRole::Hour,
    GlyphRole::SeparatorHoursMinutes,
    GlyphRole::Minute,
    GlyphRole::Minute,
    GlyphRole::SeparatorMinutesSeconds,
    GlyphRole::Second,
    GlyphRole::Second,
];
const ROLES_HH_MM: &[GlyphRole] = &[
    GlyphRole::Hour,
    GlyphRole::Hour,
    GlyphRole::SeparatorHoursMinutes,
    GlyphRole::Minute,
    GlyphRole::Minute,
];
const ROLES_HH: &[GlyphRole] = &[GlyphRole::Hour, GlyphRole::Hour];
const ROLES_MM: &[GlyphRole] = &[GlyphRole::Minute, GlyphRole::Minute];
const ROLES_SS: &[GlyphRole] = &[GlyphRole::Second, GlyphRole::Second];

/// Named time formatter.
///
/// `H_` variants pad the hour with a space instead of `0`; `_12` variants show hours 1 to 12.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum TimeFormat {
    #[default]
    #[serde(rename = "HH_MM_SS_24")]
    HhMmSs24,
    #[serde(rename = "H_MM_SS_24")]
    HMmSs24,
    #[serde(rename = "HH_MM_SS_12")]
    HhMmSs12,
    #[serde(rename = "H_MM_SS_12")]
    HMmSs12,
    #[serde(rename = "HH_MM_24")]
    HhMm24,
    #[serde(rename = "H_MM_24")]
    HMm24,
    #[serde(rename = "HH_MM_12")]
    HhMm12,
    #[serde(rename = "H_MM_12")]
    HMm12,
    #[serde(rename = "HH_24")]
    Hh24,
    #[serde(rename = "H_24")]
    H24,
    #[serde(rename = "HH_12")]
    Hh12,
    #[serde(rename = "H_12")]
    H12,
    #[serde(rename = "MM")]
    Mm,
    #[serde(rename = "SS")]
    Ss,
}

#[derive(Clone, Copy)]
enum Fields {
    HoursMinutesSeconds,
    HoursMinutes,
    Hours,
    Minutes,
    Seconds,
}

impl TimeFormat {
    pub const ALL: [TimeFormat; 14] = [
        Self::HhMmSs24,
        Self::HMmSs24,
        Self::HhMmSs12,
        Self::HMmSs12,
        Self::HhMm24,
        Self::HMm24,
        Self::HhMm12,
        Self::HMm12,
        Self::Hh24,
        Self::H24,
        Self::Hh12,
        Self::H12,
        Self::Mm,
        Self::Ss,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::HhMmSs24 => "HH_MM_SS_24",
            Self::HMmSs24 => "H_MM_SS_24",
            Self::HhMmSs12 => "HH_MM_SS_12",
            Self::HMmSs12 => "H_MM_SS_12",
            Self::HhMm24 => "HH_MM_24",
            Self::HMm24 => "H_MM_24",
            Self::HhMm12 => "HH_MM_12",
            Self::HMm12 => "H_MM_12",
            Self::Hh24 => "HH_24",
            Self::H24 => "H_24",
            Self::Hh12 => "HH_12",
            Self::H12 => "H_12",
            Self::Mm => "MM",
            Self::Ss => "SS",
        }
    }

    // (fields, space-padded hours, 12-hour clock)
    fn shape(self) -> (Fields, bool, bool) {
        use Fields::*;
        match self {
            Self::HhMmSs24 => (HoursMinutesSeconds, false, false),
            Self::HMmSs24 => (HoursMinutesSeconds, true, false),
            Self::HhMmSs12 => (HoursMinutesSeconds, false, true),
            Self::HMmSs12 => (HoursMinutesSeconds, true, true),
            Self::HhMm24 => (HoursMinutes, false, false),
            Self::HMm24 => (HoursMinutes, true, false),
            Self::HhMm12 => (HoursMinutes, false, true),
            Self::HMm12 => (HoursMinutes, true, true),
            Self::Hh24 => (Hours, false, false),
            Self::H24 => (Hours, true, false),
            Self::Hh12 => (Hours, false, true),
            Self::H12 => (Hours, true, true),
            Self::Mm => (Minutes, false, false),
            Self::Ss => (Seconds, false, false),
        }
    }

    pub fn resolution(self) -> TimeResolution {
        match self.shape().0 {
            Fields::HoursMinutesSeconds | Fields::Seconds => TimeResolution::Seconds,
            Fields::HoursMinutes | Fields::Minutes => TimeResolution::Minutes,
            Fields::Hours => TimeResolution::Hours,
        }
    }

    /// Role of each character position of [`TimeFormat::apply`] output.
    pub fn roles(self) -> &'static [GlyphRole] {
        match self.shape().0 {
            Fields::HoursMinutesSeconds => ROLES_HH_MM_SS,
            Fields::HoursMinutes => ROLES_HH_MM,
            Fields::Hours => ROLES_HH,
            Fields::Minutes => ROLES_MM,
            Fields::Seconds => ROLES_SS,
        }
    }

    /// Number of characters (and glyphs) this format produces.
    pub fn glyph_count(self) -> usize {
        self.roles().len()
    }

    pub fn apply(self, time: ClockTime) -> String {
        let (fields, space_pad, twelve_hour) = self.shape();
        let hours = if twelve_hour {
            match time.hours() % 12 {
                0 => 12,
                h => h,
            }
        } else {
            time.hours()
        };
        let hh = if space_pad {
            format!("{hours:>2}")
        } else {
            format!("{hours:02}")
        };
        let mm = format!("{:02}", time.minutes());
        let ss = format!("{:02}", time.seconds());
        match fields {
            Fields::HoursMinutesSeconds => format!("{hh}:{mm}:{ss}"),
            Fields::HoursMinutes => format!("{hh}:{mm}"),
            Fields::Hours => hh,
            Fields::Minutes => mm,
            Fields::Seconds => ss,
        }
    }
}

impl fmt::Display for TimeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TimeFormat {
    type Err = ClockError;

    fn from_str(s: &str) -> ClockResult<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.name() == s.trim())
            .ok_or_else(|| ClockError::config(format!("unknown time format '{s}'")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/options/format.rs"]
mod tests;
