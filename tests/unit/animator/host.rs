use std::sync::Arc;

use super::*;
use crate::font::debug::DebugFont;
use crate::foundation::geometry::Size;
use crate::layout::clock_layout::ClockLayout;
use crate::options::model::Options;
use crate::render::recording::RecordingSurface;
use crate::render::renderer::ClockRenderer;
use crate::time::source::ManualClock;

fn animator(clock: &ManualClock) -> ClockAnimator<RecordingSurface, RealtimeScheduler> {
    let mut layout = ClockLayout::new(Arc::new(DebugFont), Options::default()).unwrap();
    layout.set_available_size(Size::new(400.0, 400.0));
    ClockAnimator::new(
        layout,
        vec![ClockRenderer::default()],
        Box::new(clock.clone()),
        RealtimeScheduler::new(Duration::from_millis(1)),
    )
    .unwrap()
}

#[test]
fn frames_keep_ticking_during_a_transition() {
    let clock = ManualClock::new("10:00:00.100".parse().unwrap());
    let mut a = animator(&clock);
    let measured = a.layout().measured_size();
    a.attach(RecordingSurface::new(measured.width, measured.height))
        .unwrap();

    let mut seen = 0;
    let stats = run_realtime(&mut a, Duration::from_millis(30), |surface, n| {
        assert!(!surface.take_ops().is_empty());
        seen = n;
        Ok(())
    })
    .unwrap();
    assert!(stats.ticks >= 1);
    assert_eq!(stats.ticks, seen);
    assert_eq!(stats.timeouts, 0);
}

#[test]
fn idle_clock_waits_past_a_short_run() {
    let clock = ManualClock::new("10:00:00.900".parse().unwrap());
    let mut a = animator(&clock);
    a.attach(RecordingSurface::new(100.0, 100.0)).unwrap();
    let stats = run_realtime(&mut a, Duration::from_millis(10), |_, _| Ok(())).unwrap();
    assert_eq!(stats, LiveStats::default());
}

#[test]
fn running_detached_is_an_error() {
    let clock = ManualClock::default();
    let mut a = animator(&clock);
    assert!(run_realtime(&mut a, Duration::from_millis(1), |_, _| Ok(())).is_err());
}
