use std::fmt;

use crate::foundation::error::ClockResult;
use crate::glyph::key::{self, GlyphKey};
use crate::glyph::state::{GlyphState, GlyphStateLock, GlyphStateMachine, StateChangeCallback};
use crate::options::format::GlyphRole;
use crate::render::paints::Paints;
use crate::render::surface::Painter;

/// Native metrics shared by every key of a glyph family.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphLayoutInfo {
    pub height: f64,
    /// Fixed advance width, if the family has one.
    pub width: Option<f64>,
    pub is_monospace: bool,
}

/// Progress samples used by [`GlyphDesign::max_width`].
pub const WIDTH_SAMPLES: u32 = 1_000;

/// Drawing and metrics for one glyph family, dispatched on the parsed transition key.
///
/// Implementations see `progress` in `[0, 1)`; completed transitions are snapped to their
/// end key before drawing.
pub trait GlyphDesign {
    fn layout_info(&self) -> GlyphLayoutInfo;

    /// Width in native units of `key` at `progress`.
    fn width_at_progress(&self, key: GlyphKey, progress: f64) -> f64;

    /// Widest `key` gets at any progress, sampled in steps of `1 / WIDTH_SAMPLES`.
    fn max_width(&self, key: GlyphKey) -> f64 {
        (0..=WIDTH_SAMPLES)
            .map(|i| self.width_at_progress(key, f64::from(i) / f64::from(WIDTH_SAMPLES)))
            .fold(0.0, f64::max)
    }

    /// Draw `key` at `progress` with the origin at the glyph's top-left corner, in native units.
    fn draw(
        &self,
        painter: &mut Painter<'_>,
        key: GlyphKey,
        progress: f64,
        paints: &Paints,
    ) -> ClockResult<()>;
}

/// One animated character slot.
pub struct Glyph {
    key: String,
    machine: GlyphStateMachine,
    role: GlyphRole,
    scale: f64,
    design: Box<dyn GlyphDesign>,
}

impl fmt::Debug for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Glyph")
            .field("key", &self.key)
            .field("role", &self.role)
            .field("scale", &self.scale)
            .field("machine", &self.machine)
            .finish()
    }
}

impl Glyph {
    /// A glyph showing `"0"`, in the initial `Appearing` state.
    pub fn new(design: Box<dyn GlyphDesign>, role: GlyphRole, scale: f64) -> Self {
        Self {
            key: "0".to_string(),
            machine: GlyphStateMachine::new(),
            role,
            scale,
            design,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn set_key(&mut self, key: impl Into<String>) {
        self.key = key.into();
    }

    /// Current key, parsed. Fails for keys outside the glyph alphabet.
    pub fn parsed_key(&self) -> ClockResult<GlyphKey> {
        GlyphKey::parse(&self.key)
    }

    pub fn role(&self) -> GlyphRole {
        self.role
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale;
    }

    pub fn layout_info(&self) -> GlyphLayoutInfo {
        self.design.layout_info()
    }

    pub fn native_height(&self) -> f64 {
        self.design.layout_info().height
    }

    pub fn canonical_start_glyph(&self) -> char {
        key::canonical_start(&self.key)
    }

    pub fn canonical_end_glyph(&self) -> char {
        key::canonical_end(&self.key)
    }

    /// Native (unscaled) width of the current key at `progress`.
    pub fn width_at_progress(&self, progress: f64) -> ClockResult<f64> {
        Ok(self.design.width_at_progress(self.parsed_key()?, progress))
    }

    pub fn draw(&self, painter: &mut Painter<'_>, progress: f64, paints: &Paints) -> ClockResult<()> {
        self.design
            .draw(painter, self.parsed_key()?, progress, paints)
    }

    pub fn machine(&self) -> &GlyphStateMachine {
        &self.machine
    }

    pub fn machine_mut(&mut self) -> &mut GlyphStateMachine {
        &mut self.machine
    }

    pub fn state(&self) -> GlyphState {
        self.machine.state()
    }

    pub fn lock(&self) -> GlyphStateLock {
        self.machine.lock()
    }

    pub fn set_lock(&mut self, lock: GlyphStateLock) {
        self.machine.set_lock(lock);
    }

    pub fn set_on_state_change(&mut self, callback: Option<StateChangeCallback>) {
        self.machine.set_on_state_change(callback);
    }

    pub fn set_activating(&mut self) {
        self.machine.set_activating();
    }

    pub fn set_deactivating(&mut self) {
        self.machine.set_deactivating();
    }

    pub fn set_active(&mut self) {
        self.machine.set_active();
    }

    pub fn set_inactive(&mut self) {
        self.machine.set_inactive();
    }

    pub fn set_appearing(&mut self) {
        self.machine.set_appearing();
    }

    pub fn set_disappearing(&mut self) {
        self.machine.set_disappearing();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/glyph/glyph.rs"]
mod tests;
