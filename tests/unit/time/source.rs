use super::*;

#[test]
fn manual_clock_clones_share_time() {
    let a = ManualClock::new(ClockTime::new(8, 0, 0, 0).unwrap());
    let b = a.clone();
    a.advance_millis(1_250);
    assert_eq!(b.now(), ClockTime::new(8, 0, 1, 250).unwrap());
    b.set(ClockTime::MIDNIGHT);
    assert_eq!(a.now(), ClockTime::MIDNIGHT);
}

#[test]
fn system_clock_offsets_shift_hours() {
    let utc = SystemClock::new(0).now();
    let shifted = SystemClock::new(60).now();
    let diff = (i64::from(shifted.millis_of_day()) - i64::from(utc.millis_of_day()))
        .rem_euclid(i64::from(MILLIS_PER_DAY));
    // Both reads happen within a few milliseconds of each other.
    assert!((3_600_000..3_600_000 + 5_000).contains(&diff), "{diff}");
}

#[test]
fn env_offset_overrides_the_host_zone() {
    let mut asked = false;
    let minutes = resolve_offset_minutes(Some(" -330 "), || {
        asked = true;
        Some(60)
    });
    assert_eq!(minutes, -330);
    assert!(!asked);
}

#[test]
fn host_zone_is_the_default() {
    assert_eq!(resolve_offset_minutes(None, || Some(120)), 120);
    assert_eq!(resolve_offset_minutes(None, || None), 0);
    // Unparsable or out-of-range overrides fall through to the host zone.
    assert_eq!(resolve_offset_minutes(Some("east"), || Some(-60)), -60);
    assert_eq!(resolve_offset_minutes(Some("1200"), || Some(-60)), -60);
}

#[test]
fn local_clock_uses_the_host_offset() {
    assert_eq!(
        SystemClock::local().utc_offset_minutes,
        local_offset_minutes().unwrap_or(0)
    );
}
