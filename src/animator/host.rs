use std::time::{Duration, Instant};

use crate::animator::clock_animator::ClockAnimator;
use crate::animator::scheduler::{CallbackKind, RealtimeScheduler};
use crate::foundation::error::{ClockError, ClockResult};
use crate::render::surface::DrawSurface;

/// Counters reported by [`run_realtime`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LiveStats {
    /// Ticks that ran from a delivered animation frame.
    pub ticks: u64,
    /// Timeouts delivered while idle between seconds.
    pub timeouts: u64,
}

/// Deliver the animator's callbacks on the current thread as they come due, for `run_for`.
///
/// The animator must already be attached (attaching runs the first tick). `after_tick` sees
/// the surface after every tick together with the running tick count.
pub fn run_realtime<D: DrawSurface>(
    animator: &mut ClockAnimator<D, RealtimeScheduler>,
    run_for: Duration,
    mut after_tick: impl FnMut(&mut D, u64) -> ClockResult<()>,
) -> ClockResult<LiveStats> {
    if !animator.is_attached() {
        return Err(ClockError::config("attach a surface before running the clock"));
    }
    let deadline = Instant::now() + run_for;
    let mut stats = LiveStats::default();

    while let Some((scheduled, due)) = animator.scheduler_mut().take_next() {
        if due > deadline {
            break;
        }
        let now = Instant::now();
        if due > now {
            std::thread::sleep(due - now);
        }

        let next = animator.dispatch(scheduled)?;
        match scheduled.kind {
            CallbackKind::Timeout => stats.timeouts += u64::from(next.is_some()),
            CallbackKind::AnimationFrame if next.is_some() => {
                stats.ticks += 1;
                if let Some(surface) = animator.surface_mut() {
                    after_tick(surface, stats.ticks)?;
                }
            }
            CallbackKind::AnimationFrame => {}
        }
    }
    tracing::debug!(ticks = stats.ticks, timeouts = stats.timeouts, "realtime loop finished");
    Ok(stats)
}

#[cfg(test)]
#[path = "../../tests/unit/animator/host.rs"]
mod tests;
