use super::*;
use crate::foundation::geometry::Rect;
use crate::glyph::key::DigitTransition;
use crate::render::recording::RecordingSurface;

#[test]
fn boxes_are_monospace() {
    let g = DebugGlyph;
    let info = g.layout_info();
    assert_eq!(info.width, Some(SIZE));
    assert!(info.is_monospace);
    assert_eq!(
        g.width_at_progress(GlyphKey::Transition(DigitTransition::D0To1), 0.5),
        SIZE
    );
}

#[test]
fn progress_bar_tracks_progress() {
    let mut s = RecordingSurface::new(100.0, 100.0);
    let mut p = Painter::new(&mut s);
    DebugGlyph
        .draw(
            &mut p,
            GlyphKey::Transition(DigitTransition::D3To4),
            0.25,
            &Paints::default(),
        )
        .unwrap();
    assert_eq!(s.stroke_bounds(), vec![Rect::new(0.0, 0.0, 100.0, 100.0)]);
    assert_eq!(s.fill_bounds(), vec![Rect::new(0.0, 90.0, 25.0, 100.0)]);
}

#[test]
fn steady_digits_have_no_bar() {
    let mut s = RecordingSurface::new(100.0, 100.0);
    let mut p = Painter::new(&mut s);
    DebugGlyph
        .draw(&mut p, GlyphKey::Digit(7), 0.0, &Paints::default())
        .unwrap();
    assert!(s.fill_bounds().is_empty());
    assert_eq!(s.stroke_bounds().len(), 1);
}
