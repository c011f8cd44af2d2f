//! Time-of-day values and the sources that produce them.

/// Millisecond-precision time of day.
pub mod clock_time;
/// Live and manually driven time sources.
pub mod source;
