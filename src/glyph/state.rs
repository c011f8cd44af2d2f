use std::fmt;
use std::time::Instant;

/// Visibility/animation state of one glyph slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GlyphState {
    Unused,
    Inactive,
    Active,
    Activating,
    Deactivating,
    Appearing,
    DisappearingFromActive,
    DisappearingFromInactive,
    Disappeared,
}

impl GlyphState {
    pub const ALL: [GlyphState; 9] = [
        Self::Unused,
        Self::Inactive,
        Self::Active,
        Self::Activating,
        Self::Deactivating,
        Self::Appearing,
        Self::DisappearingFromActive,
        Self::DisappearingFromInactive,
        Self::Disappeared,
    ];
}

/// While a lock other than `None` is held, every transition request is ignored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GlyphStateLock {
    #[default]
    None,
    Active,
    Inactive,
}

/// Invoked with the new state on every effective state change.
pub type StateChangeCallback = Box<dyn FnMut(GlyphState)>;

/// Per-glyph transition state machine.
pub struct GlyphStateMachine {
    state: GlyphState,
    lock: GlyphStateLock,
    state_anim_time: f64,
    deactivation_started_at: Option<Instant>,
    on_state_change: Option<StateChangeCallback>,
}

impl Default for GlyphStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GlyphStateMachine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlyphStateMachine")
            .field("state", &self.state)
            .field("lock", &self.lock)
            .field("state_anim_time", &self.state_anim_time)
            .field("deactivation_started_at", &self.deactivation_started_at)
            .field("has_callback", &self.on_state_change.is_some())
            .finish()
    }
}

impl GlyphStateMachine {
    /// Starts in [`GlyphState::Appearing`], unlocked.
    pub fn new() -> Self {
        Self {
            state: GlyphState::Appearing,
            lock: GlyphStateLock::None,
            state_anim_time: 0.0,
            deactivation_started_at: None,
            on_state_change: None,
        }
    }

    pub fn state(&self) -> GlyphState {
        self.state
    }

    pub fn lock(&self) -> GlyphStateLock {
        self.lock
    }

    pub fn set_lock(&mut self, lock: GlyphStateLock) {
        self.lock = lock;
    }

    pub fn is_locked(&self) -> bool {
        self.lock != GlyphStateLock::None
    }

    /// Milliseconds spent in the current state.
    pub fn state_anim_time(&self) -> f64 {
        self.state_anim_time
    }

    /// When the current deactivation began; `None` unless deactivating.
    pub fn deactivation_started_at(&self) -> Option<Instant> {
        self.deactivation_started_at
    }

    pub fn set_on_state_change(&mut self, callback: Option<StateChangeCallback>) {
        self.on_state_change = callback;
    }

    pub fn advance(&mut self, delta_millis: f64) {
        if delta_millis > 0.0 {
            self.state_anim_time += delta_millis;
        }
    }

    fn set_state(&mut self, state: GlyphState) {
        let changed = self.state != state;
        self.state = state;
        self.state_anim_time = 0.0;
        self.deactivation_started_at = (state == GlyphState::Deactivating).then(Instant::now);
        if changed {
            tracing::trace!(?state, "glyph state changed");
            if let Some(cb) = self.on_state_change.as_mut() {
                cb(state);
            }
        }
    }

    /// `Inactive -> Activating`; re-entering `Deactivating` restarts its animation.
    pub fn set_activating(&mut self) {
        if self.is_locked() {
            return;
        }
        match self.state {
            GlyphState::Inactive => self.set_state(GlyphState::Activating),
            GlyphState::Deactivating => self.set_state(GlyphState::Deactivating),
            _ => {}
        }
    }

    pub fn set_deactivating(&mut self) {
        if self.is_locked() {
            return;
        }
        if self.state == GlyphState::Active {
            self.set_state(GlyphState::Deactivating);
        }
    }

    /// `Activating`/`Appearing -> Active`; otherwise behaves like [`Self::set_activating`].
    pub fn set_active(&mut self) {
        if self.is_locked() {
            return;
        }
        match self.state {
            GlyphState::Activating | GlyphState::Appearing => self.set_state(GlyphState::Active),
            _ => self.set_activating(),
        }
    }

    pub fn set_inactive(&mut self) {
        if self.is_locked() {
            return;
        }
        if self.state == GlyphState::Deactivating {
            self.set_state(GlyphState::Inactive);
        }
    }

    pub fn set_appearing(&mut self) {
        if self.is_locked() {
            return;
        }
        self.set_state(GlyphState::Appearing);
    }

    pub fn set_disappearing(&mut self) {
        if self.is_locked() {
            return;
        }
        match self.state {
            GlyphState::Activating | GlyphState::Active | GlyphState::Deactivating => {
                self.set_state(GlyphState::DisappearingFromActive)
            }
            _ => self.set_state(GlyphState::DisappearingFromInactive),
        }
    }

    pub fn set_disappeared(&mut self) {
        if self.is_locked() {
            return;
        }
        self.set_state(GlyphState::Disappeared);
    }

    /// Force a state regardless of transition rules, used to seed tests and hosts.
    pub fn reset_to(&mut self, state: GlyphState) {
        self.set_state(state);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/glyph/state.rs"]
mod tests;
