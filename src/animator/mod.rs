//! Tick loop tying a layout, its renderers, a time source and a scheduler to one surface.

/// `ClockAnimator`: attach/detach, tick and scheduling cadence.
pub mod clock_animator;
/// Delivering scheduled callbacks in real time.
pub mod host;
/// Callback scheduling primitives.
pub mod scheduler;

pub use clock_animator::ClockAnimator;
