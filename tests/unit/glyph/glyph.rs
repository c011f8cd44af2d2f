use super::*;
use crate::foundation::error::ClockError;
use crate::render::recording::RecordingSurface;

struct Boxes;

impl GlyphDesign for Boxes {
    fn layout_info(&self) -> GlyphLayoutInfo {
        GlyphLayoutInfo {
            height: 10.0,
            width: Some(8.0),
            is_monospace: true,
        }
    }

    fn width_at_progress(&self, key: GlyphKey, progress: f64) -> f64 {
        match key {
            GlyphKey::Transition(_) => 8.0 + progress * 4.0,
            _ => 8.0,
        }
    }

    fn draw(
        &self,
        painter: &mut Painter<'_>,
        key: GlyphKey,
        progress: f64,
        paints: &Paints,
    ) -> ClockResult<()> {
        let w = self.width_at_progress(key, progress);
        painter.paint_rect(0.0, 0.0, w, 10.0, paints.color(0), paints)
    }
}

fn glyph() -> Glyph {
    Glyph::new(Box::new(Boxes), GlyphRole::Minute, 1.0)
}

#[test]
fn new_glyph_shows_zero_and_appears() {
    let g = glyph();
    assert_eq!(g.key(), "0");
    assert_eq!(g.state(), GlyphState::Appearing);
    assert_eq!(g.role(), GlyphRole::Minute);
    assert_eq!(g.native_height(), 10.0);
}

#[test]
fn canonical_glyphs_follow_the_key() {
    let mut g = glyph();
    g.set_key("5_6");
    assert_eq!(g.canonical_start_glyph(), '5');
    assert_eq!(g.canonical_end_glyph(), '6');
    g.set_key(":");
    assert_eq!(g.canonical_start_glyph(), ':');
    assert_eq!(g.canonical_end_glyph(), ':');
}

#[test]
fn width_dispatches_on_parsed_key() {
    let mut g = glyph();
    g.set_key("1_2");
    assert_eq!(g.width_at_progress(0.5).unwrap(), 10.0);
    g.set_key("7");
    assert_eq!(g.width_at_progress(0.5).unwrap(), 8.0);
}

#[test]
fn unknown_key_fails_loudly() {
    let mut g = glyph();
    g.set_key("4_9");
    assert!(matches!(g.width_at_progress(0.0), Err(ClockError::Config(_))));
    let mut s = RecordingSurface::new(10.0, 10.0);
    let mut p = Painter::new(&mut s);
    assert!(g.draw(&mut p, 0.0, &Paints::default()).is_err());
    assert!(s.ops().is_empty());
}

#[test]
fn draw_goes_through_the_design() {
    let g = glyph();
    let mut s = RecordingSurface::new(10.0, 10.0);
    let mut p = Painter::new(&mut s);
    g.draw(&mut p, 0.0, &Paints::default()).unwrap();
    assert_eq!(s.fill_bounds().len(), 1);
}

#[test]
fn state_requests_delegate_to_the_machine() {
    let mut g = glyph();
    g.set_active();
    assert_eq!(g.state(), GlyphState::Active);
    g.set_lock(GlyphStateLock::Active);
    g.set_deactivating();
    assert_eq!(g.state(), GlyphState::Active);
    g.set_lock(GlyphStateLock::None);
    g.set_deactivating();
    assert_eq!(g.state(), GlyphState::Deactivating);
    assert!(g.machine().deactivation_started_at().is_some());
}
