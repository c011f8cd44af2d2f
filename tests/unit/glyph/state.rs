use std::cell::RefCell;
use std::rc::Rc;

use super::*;

type Request = fn(&mut GlyphStateMachine);

const REQUESTS: [(&str, Request); 7] = [
    ("activating", GlyphStateMachine::set_activating),
    ("deactivating", GlyphStateMachine::set_deactivating),
    ("active", GlyphStateMachine::set_active),
    ("inactive", GlyphStateMachine::set_inactive),
    ("appearing", GlyphStateMachine::set_appearing),
    ("disappearing", GlyphStateMachine::set_disappearing),
    ("disappeared", GlyphStateMachine::set_disappeared),
];

fn recording(state: GlyphState) -> (GlyphStateMachine, Rc<RefCell<Vec<GlyphState>>>) {
    let mut m = GlyphStateMachine::new();
    m.reset_to(state);
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    m.set_on_state_change(Some(Box::new(move |s| sink.borrow_mut().push(s))));
    (m, log)
}

#[test]
fn starts_appearing_and_unlocked() {
    let m = GlyphStateMachine::new();
    assert_eq!(m.state(), GlyphState::Appearing);
    assert_eq!(m.lock(), GlyphStateLock::None);
    assert_eq!(m.state_anim_time(), 0.0);
}

#[test]
fn locked_glyph_never_changes_state() {
    for lock in [GlyphStateLock::Active, GlyphStateLock::Inactive] {
        for start in GlyphState::ALL {
            for (name, request) in REQUESTS {
                let (mut m, log) = recording(start);
                m.set_lock(lock);
                m.advance(40.0);
                request(&mut m);
                assert_eq!(m.state(), start, "{lock:?} {start:?} {name}");
                assert_eq!(m.state_anim_time(), 40.0, "{lock:?} {start:?} {name}");
                assert!(log.borrow().is_empty());
            }
        }
    }
}

#[test]
fn set_active_from_active_is_noop() {
    let (mut m, log) = recording(GlyphState::Active);
    m.advance(25.0);
    m.set_active();
    m.set_active();
    assert_eq!(m.state(), GlyphState::Active);
    assert_eq!(m.state_anim_time(), 25.0);
    assert!(log.borrow().is_empty());
}

#[test]
fn effective_changes_reset_time_and_fire_once() {
    for start in GlyphState::ALL {
        for (name, request) in REQUESTS {
            let (mut m, log) = recording(start);
            m.advance(10.0);
            request(&mut m);
            if m.state() != start {
                assert_eq!(m.state_anim_time(), 0.0, "{start:?} {name}");
                assert_eq!(*log.borrow(), vec![m.state()], "{start:?} {name}");
            } else {
                assert!(log.borrow().is_empty(), "{start:?} {name}");
            }
        }
    }
}

#[test]
fn transition_table() {
    use GlyphState::*;
    let cases: [(GlyphState, usize, GlyphState); 14] = [
        (Inactive, 0, Activating),
        (Deactivating, 0, Deactivating),
        (Active, 0, Active),
        (Active, 1, Deactivating),
        (Inactive, 1, Inactive),
        (Activating, 2, Active),
        (Appearing, 2, Active),
        (Inactive, 2, Activating),
        (Deactivating, 3, Inactive),
        (Active, 3, Active),
        (Disappeared, 4, Appearing),
        (Activating, 5, DisappearingFromActive),
        (Deactivating, 5, DisappearingFromActive),
        (Inactive, 5, DisappearingFromInactive),
    ];
    for (start, req, expected) in cases {
        let (mut m, _) = recording(start);
        (REQUESTS[req].1)(&mut m);
        assert_eq!(m.state(), expected, "{start:?} {}", REQUESTS[req].0);
    }
}

#[test]
fn reentering_deactivating_restarts_animation_silently() {
    let (mut m, log) = recording(GlyphState::Deactivating);
    let first = m.deactivation_started_at();
    assert!(first.is_some());
    m.advance(300.0);
    m.set_activating();
    assert_eq!(m.state(), GlyphState::Deactivating);
    assert_eq!(m.state_anim_time(), 0.0);
    assert!(m.deactivation_started_at() >= first);
    assert!(log.borrow().is_empty());
}

#[test]
fn deactivation_timestamp_only_while_deactivating() {
    let mut m = GlyphStateMachine::new();
    m.set_active();
    assert!(m.deactivation_started_at().is_none());
    m.set_deactivating();
    assert!(m.deactivation_started_at().is_some());
    m.set_inactive();
    assert!(m.deactivation_started_at().is_none());
}

#[test]
fn advance_accumulates() {
    let mut m = GlyphStateMachine::new();
    m.advance(16.0);
    m.advance(-5.0);
    m.advance(4.0);
    assert_eq!(m.state_anim_time(), 20.0);
}
