use std::time::{Duration, Instant};

use crate::time::clock_time::MILLIS_PER_SECOND;

/// Opaque id of a requested callback, unique per scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CallbackHandle(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallbackKind {
    /// Next display refresh.
    AnimationFrame,
    /// One-shot timer.
    Timeout,
}

/// A callback a scheduler has accepted and not yet delivered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scheduled {
    pub handle: CallbackHandle,
    pub kind: CallbackKind,
    /// Requested delay; zero for animation frames.
    pub delay: Duration,
}

/// The two cancellable suspension primitives an animation loop is built from.
///
/// Schedulers only record requests; the host delivers them back through
/// [`ClockAnimator::dispatch`](crate::animator::ClockAnimator::dispatch).
pub trait FrameScheduler {
    fn request_animation_frame(&mut self) -> CallbackHandle;
    fn set_timeout(&mut self, delay: Duration) -> CallbackHandle;
    fn cancel_animation_frame(&mut self, handle: CallbackHandle);
    fn clear_timeout(&mut self, handle: CallbackHandle);
}

/// How the animator wants to be woken after a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NextTick {
    /// A transition is in flight: redraw on the next frame.
    AnimationFrame,
    /// Idle until the next second boundary.
    Delay(Duration),
}

/// Frame callbacks while `animation_time_millis` is inside the morph window, otherwise sleep
/// until the next whole second.
pub fn next_tick_for(animation_time_millis: u32, glyph_morph_millis: u32) -> NextTick {
    if animation_time_millis < glyph_morph_millis {
        NextTick::AnimationFrame
    } else {
        let remaining = MILLIS_PER_SECOND.saturating_sub(animation_time_millis);
        NextTick::Delay(Duration::from_millis(u64::from(remaining)))
    }
}

/// Scheduler that queues requests for the host (or a test) to deliver by hand.
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    pending: Vec<Scheduled>,
    frames_requested: u64,
    timeouts_requested: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Outstanding callbacks, oldest first.
    pub fn pending(&self) -> &[Scheduled] {
        &self.pending
    }

    /// Remove and return the oldest outstanding callback.
    pub fn take_next(&mut self) -> Option<Scheduled> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }

    pub fn frames_requested(&self) -> u64 {
        self.frames_requested
    }

    pub fn timeouts_requested(&self) -> u64 {
        self.timeouts_requested
    }

    fn push(&mut self, kind: CallbackKind, delay: Duration) -> CallbackHandle {
        self.next_id += 1;
        let handle = CallbackHandle(self.next_id);
        self.pending.push(Scheduled {
            handle,
            kind,
            delay,
        });
        handle
    }

    fn cancel(&mut self, kind: CallbackKind, handle: CallbackHandle) {
        self.pending
            .retain(|s| !(s.kind == kind && s.handle == handle));
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_animation_frame(&mut self) -> CallbackHandle {
        self.frames_requested += 1;
        self.push(CallbackKind::AnimationFrame, Duration::ZERO)
    }

    fn set_timeout(&mut self, delay: Duration) -> CallbackHandle {
        self.timeouts_requested += 1;
        self.push(CallbackKind::Timeout, delay)
    }

    fn cancel_animation_frame(&mut self, handle: CallbackHandle) {
        self.cancel(CallbackKind::AnimationFrame, handle);
    }

    fn clear_timeout(&mut self, handle: CallbackHandle) {
        self.cancel(CallbackKind::Timeout, handle);
    }
}

/// Wall-clock scheduler: frames come due one `frame_interval` after the request, timeouts
/// after their delay.
#[derive(Clone, Debug)]
pub struct RealtimeScheduler {
    frame_interval: Duration,
    next_id: u64,
    pending: Vec<(Scheduled, Instant)>,
}

impl RealtimeScheduler {
    pub fn new(frame_interval: Duration) -> Self {
        Self {
            frame_interval,
            next_id: 0,
            pending: Vec::new(),
        }
    }

    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// Remove and return the callback that comes due first, with its deadline.
    pub fn take_next(&mut self) -> Option<(Scheduled, Instant)> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .min_by_key(|(_, (_, due))| *due)
            .map(|(i, _)| i)?;
        Some(self.pending.remove(index))
    }

    fn push(&mut self, kind: CallbackKind, delay: Duration) -> CallbackHandle {
        self.next_id += 1;
        let handle = CallbackHandle(self.next_id);
        let scheduled = Scheduled {
            handle,
            kind,
            delay,
        };
        self.pending.push((scheduled, Instant::now() + delay));
        handle
    }

    fn cancel(&mut self, kind: CallbackKind, handle: CallbackHandle) {
        self.pending
            .retain(|(s, _)| !(s.kind == kind && s.handle == handle));
    }
}

impl FrameScheduler for RealtimeScheduler {
    fn request_animation_frame(&mut self) -> CallbackHandle {
        self.push(CallbackKind::AnimationFrame, self.frame_interval)
    }

    fn set_timeout(&mut self, delay: Duration) -> CallbackHandle {
        self.push(CallbackKind::Timeout, delay)
    }

    fn cancel_animation_frame(&mut self, handle: CallbackHandle) {
        self.cancel(CallbackKind::AnimationFrame, handle);
    }

    fn clear_timeout(&mut self, handle: CallbackHandle) {
        self.cancel(CallbackKind::Timeout, handle);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animator/scheduler.rs"]
mod tests;
