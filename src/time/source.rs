use std::cell::Cell;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::time::clock_time::{ClockTime, MILLIS_PER_DAY};

/// Supplies the current wall-clock time of day.
pub trait TimeSource {
    fn now(&self) -> ClockTime;
}

/// Environment variable overriding the host's UTC offset, in minutes.
pub const UTC_OFFSET_ENV: &str = "MORPHCLOCK_UTC_OFFSET_MINUTES";

const MAX_OFFSET_MINUTES: i32 = 18 * 60;

/// Live system time, shifted by a fixed UTC offset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SystemClock {
    pub utc_offset_minutes: i32,
}

impl SystemClock {
    pub fn new(utc_offset_minutes: i32) -> Self {
        Self { utc_offset_minutes }
    }

    /// Host local time, unless `MORPHCLOCK_UTC_OFFSET_MINUTES` (limited to +/-18h) overrides
    /// the offset.
    pub fn from_env() -> Self {
        let env = std::env::var(UTC_OFFSET_ENV).ok();
        Self::new(resolve_offset_minutes(env.as_deref(), local_offset_minutes))
    }

    /// Host local time at the offset in effect now.
    pub fn local() -> Self {
        Self::new(local_offset_minutes().unwrap_or(0))
    }
}

/// The host's current UTC offset, if the platform can tell it safely.
pub fn local_offset_minutes() -> Option<i32> {
    match time::UtcOffset::current_local_offset() {
        Ok(offset) => Some(i32::from(offset.whole_minutes())),
        Err(e) => {
            tracing::debug!(error = %e, "local UTC offset unavailable, using UTC");
            None
        }
    }
}

fn resolve_offset_minutes(env: Option<&str>, local: impl FnOnce() -> Option<i32>) -> i32 {
    if let Some(raw) = env {
        match raw.trim().parse::<i32>() {
            Ok(m) if m.abs() <= MAX_OFFSET_MINUTES => return m,
            _ => tracing::warn!(value = raw, "ignoring invalid {UTC_OFFSET_ENV}"),
        }
    }
    local().unwrap_or(0)
}

impl TimeSource for SystemClock {
    fn now(&self) -> ClockTime {
        let since_epoch = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        let day = i64::from(MILLIS_PER_DAY);
        let local = since_epoch.as_millis() as i64 + i64::from(self.utc_offset_minutes) * 60_000;
        ClockTime::from_millis_of_day(local.rem_euclid(day) as u32)
    }
}

/// Shared, externally driven time. Clones observe the same instant.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<ClockTime>>,
}

impl ManualClock {
    pub fn new(start: ClockTime) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn set(&self, t: ClockTime) {
        self.now.set(t);
    }

    pub fn advance_millis(&self, delta: i64) {
        self.now.set(self.now.get().add_millis(delta));
    }
}

impl TimeSource for ManualClock {
    fn now(&self) -> ClockTime {
        self.now.get()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/time/source.rs"]
mod tests;
