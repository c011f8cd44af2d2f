use crate::animator::scheduler::{
    CallbackHandle, CallbackKind, FrameScheduler, NextTick, Scheduled, next_tick_for,
};
use crate::foundation::error::{ClockError, ClockResult};
use crate::foundation::geometry::Size;
use crate::layout::clock_layout::ClockLayout;
use crate::options::model::Options;
use crate::render::paints::Paints;
use crate::render::renderer::ClockRenderer;
use crate::render::surface::{DrawSurface, Painter};
use crate::time::source::TimeSource;

/// Drives a [`ClockLayout`] and its renderers on one attached surface.
///
/// Only one callback (animation frame or timeout) is outstanding at a time. Every entry
/// point that restarts the loop cancels it first, so a resize or re-attach never leaves two
/// loops running.
pub struct ClockAnimator<D: DrawSurface, S: FrameScheduler> {
    layout: ClockLayout,
    renderers: Vec<ClockRenderer>,
    time: Box<dyn TimeSource>,
    scheduler: S,
    surface: Option<D>,
    frame: Option<CallbackHandle>,
    timeout: Option<CallbackHandle>,
}

impl<D: DrawSurface, S: FrameScheduler> ClockAnimator<D, S> {
    /// Renderers draw in order; the last one is the primary whose paints are exposed.
    pub fn new(
        layout: ClockLayout,
        renderers: Vec<ClockRenderer>,
        time: Box<dyn TimeSource>,
        scheduler: S,
    ) -> ClockResult<Self> {
        if renderers.is_empty() {
            return Err(ClockError::config("clock animator needs at least one renderer"));
        }
        Ok(Self {
            layout,
            renderers,
            time,
            scheduler,
            surface: None,
            frame: None,
            timeout: None,
        })
    }

    pub fn layout(&self) -> &ClockLayout {
        &self.layout
    }

    pub fn layout_mut(&mut self) -> &mut ClockLayout {
        &mut self.layout
    }

    pub fn renderers(&self) -> &[ClockRenderer] {
        &self.renderers
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn surface(&self) -> Option<&D> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut D> {
        self.surface.as_mut()
    }

    pub fn is_attached(&self) -> bool {
        self.surface.is_some()
    }

    pub fn pending_frame(&self) -> Option<CallbackHandle> {
        self.frame
    }

    pub fn pending_timeout(&self) -> Option<CallbackHandle> {
        self.timeout
    }

    pub fn options(&self) -> &Options {
        self.layout.options()
    }

    pub fn set_options(&mut self, options: Options) -> ClockResult<()> {
        self.layout.set_options(options)
    }

    pub fn paints(&self) -> &Paints {
        self.primary().paints()
    }

    pub fn set_paints(&mut self, paints: Paints) {
        if let Some(primary) = self.renderers.last_mut() {
            primary.set_paints(paints);
        }
    }

    fn primary(&self) -> &ClockRenderer {
        // `new` rejects an empty renderer list.
        &self.renderers[self.renderers.len() - 1]
    }

    /// Bind `surface` and start a fresh tick cycle. A previously attached surface is dropped.
    pub fn attach(&mut self, surface: D) -> ClockResult<Option<NextTick>> {
        self.cancel_pending();
        self.surface = Some(surface);
        self.tick()
    }

    /// Cancel outstanding callbacks and release the surface.
    pub fn detach(&mut self) -> Option<D> {
        self.cancel_pending();
        self.surface.take()
    }

    /// Forward to [`ClockLayout::set_available_size`] and restart the loop.
    pub fn set_available_size(&mut self, available: Size) -> ClockResult<Size> {
        let measured = self.layout.set_available_size(available);
        self.on_rescale()?;
        Ok(measured)
    }

    /// Cancel outstanding callbacks and tick immediately.
    pub fn on_rescale(&mut self) -> ClockResult<Option<NextTick>> {
        self.cancel_pending();
        self.tick()
    }

    /// Update, clear, draw, and schedule the next wake-up.
    ///
    /// Without a surface this does nothing and schedules nothing. A failed draw schedules
    /// nothing either.
    pub fn tick(&mut self) -> ClockResult<Option<NextTick>> {
        let Some(surface) = self.surface.as_mut() else {
            return Ok(None);
        };
        self.layout.update(Some(self.time.now()));

        if self.layout.is_drawable() {
            let measured = self.layout.measured_size();
            surface.clear_rect(0.0, 0.0, measured.width, measured.height)?;
            if let Some(background) = self.layout.options().background_color {
                Painter::new(&mut *surface).fill_rect(
                    0.0,
                    0.0,
                    measured.width,
                    measured.height,
                    background,
                )?;
            }
            for renderer in &self.renderers {
                renderer.draw(&mut *surface, &mut self.layout)?;
            }
        }

        let next = next_tick_for(
            self.layout.animation_time_millis(),
            self.layout.options().glyph_morph_millis,
        );
        match next {
            NextTick::AnimationFrame => {
                self.frame = Some(self.scheduler.request_animation_frame());
            }
            NextTick::Delay(delay) => {
                self.timeout = Some(self.scheduler.set_timeout(delay));
            }
        }
        tracing::debug!(
            animation_time_millis = self.layout.animation_time_millis(),
            ?next,
            "tick"
        );
        Ok(Some(next))
    }

    /// Host entry point for a delivered animation frame. Stale handles are ignored.
    pub fn on_animation_frame(&mut self, handle: CallbackHandle) -> ClockResult<Option<NextTick>> {
        if self.frame != Some(handle) {
            tracing::trace!(?handle, "ignoring stale animation frame");
            return Ok(None);
        }
        self.frame = None;
        self.tick()
    }

    /// Host entry point for a delivered timeout: requests the frame that will tick.
    pub fn on_timeout(&mut self, handle: CallbackHandle) -> Option<NextTick> {
        if self.timeout != Some(handle) || self.surface.is_none() {
            tracing::trace!(?handle, "ignoring stale timeout");
            return None;
        }
        self.timeout = None;
        self.frame = Some(self.scheduler.request_animation_frame());
        Some(NextTick::AnimationFrame)
    }

    /// Route a delivered callback to the matching entry point.
    pub fn dispatch(&mut self, scheduled: Scheduled) -> ClockResult<Option<NextTick>> {
        match scheduled.kind {
            CallbackKind::AnimationFrame => self.on_animation_frame(scheduled.handle),
            CallbackKind::Timeout => Ok(self.on_timeout(scheduled.handle)),
        }
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.frame.take() {
            self.scheduler.cancel_animation_frame(handle);
        }
        if let Some(handle) = self.timeout.take() {
            self.scheduler.clear_timeout(handle);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animator/clock_animator.rs"]
mod tests;
