use std::fmt;
use std::str::FromStr;

use crate::foundation::error::{ClockError, ClockResult};

pub(crate) const MILLIS_PER_SECOND: u32 = 1_000;
pub(crate) const SECONDS_PER_DAY: u32 = 86_400;
pub(crate) const MILLIS_PER_DAY: u32 = SECONDS_PER_DAY * MILLIS_PER_SECOND;

/// A wall-clock time of day with millisecond precision.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime {
    millis_of_day: u32,
}

impl ClockTime {
    /// Midnight.
    pub const MIDNIGHT: Self = Self { millis_of_day: 0 };

    /// Build a time from its components, rejecting out-of-range values.
    pub fn new(hours: u32, minutes: u32, seconds: u32, millis: u32) -> ClockResult<Self> {
        if hours > 23 || minutes > 59 || seconds > 59 || millis > 999 {
            return Err(ClockError::validation(format!(
                "time out of range: {hours}:{minutes}:{seconds}.{millis}"
            )));
        }
        Ok(Self {
            millis_of_day: ((hours * 60 + minutes) * 60 + seconds) * MILLIS_PER_SECOND + millis,
        })
    }

    /// Wraps around midnight.
    pub fn from_millis_of_day(millis: u32) -> Self {
        Self {
            millis_of_day: millis % MILLIS_PER_DAY,
        }
    }

    /// Wraps around midnight.
    pub fn from_seconds_of_day(seconds: u32) -> Self {
        Self {
            millis_of_day: (seconds % SECONDS_PER_DAY) * MILLIS_PER_SECOND,
        }
    }

    pub fn hours(self) -> u32 {
        self.millis_of_day / 3_600_000
    }

    pub fn minutes(self) -> u32 {
        (self.millis_of_day / 60_000) % 60
    }

    pub fn seconds(self) -> u32 {
        (self.millis_of_day / MILLIS_PER_SECOND) % 60
    }

    pub fn millis(self) -> u32 {
        self.millis_of_day % MILLIS_PER_SECOND
    }

    pub fn millis_of_day(self) -> u32 {
        self.millis_of_day
    }

    pub fn seconds_of_day(self) -> u32 {
        self.millis_of_day / MILLIS_PER_SECOND
    }

    /// Truncate to the whole second, then add one second (wrapping at midnight).
    pub fn next_second(self) -> Self {
        Self::from_seconds_of_day(self.seconds_of_day() + 1)
    }

    /// Same second, with the sub-second part replaced.
    pub fn with_millis(self, millis: u32) -> Self {
        Self {
            millis_of_day: self.seconds_of_day() * MILLIS_PER_SECOND + millis.min(999),
        }
    }

    /// Shift by a signed number of milliseconds, wrapping at midnight.
    pub fn add_millis(self, delta: i64) -> Self {
        let day = i64::from(MILLIS_PER_DAY);
        let v = (i64::from(self.millis_of_day) + delta).rem_euclid(day);
        Self {
            millis_of_day: v as u32,
        }
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}.{:03}",
            self.hours(),
            self.minutes(),
            self.seconds(),
            self.millis()
        )
    }
}

/// Parses `HH:MM:SS` or `HH:MM:SS.mmm`.
impl FromStr for ClockTime {
    type Err = ClockError;

    fn from_str(s: &str) -> ClockResult<Self> {
        let bad = || ClockError::validation(format!("expected HH:MM:SS[.mmm], got '{s}'"));
        let (hms, millis) = match s.trim().split_once('.') {
            Some((hms, frac)) => {
                if frac.is_empty() || frac.len() > 3 {
                    return Err(bad());
                }
                let v: u32 = frac.parse().map_err(|_| bad())?;
                (hms, v * 10u32.pow(3 - frac.len() as u32))
            }
            None => (s.trim(), 0),
        };
        let mut parts = hms.split(':');
        let mut next = || -> ClockResult<u32> {
            parts
                .next()
                .ok_or_else(bad)?
                .parse::<u32>()
                .map_err(|_| bad())
        };
        let (h, m, sec) = (next()?, next()?, next()?);
        if parts.next().is_some() {
            return Err(bad());
        }
        Self::new(h, m, sec, millis)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/time/clock_time.rs"]
mod tests;
