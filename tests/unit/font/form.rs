use super::*;
use crate::foundation::geometry::Rect;
use crate::render::recording::{RecordingSurface, SurfaceOp};

fn near(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn zero_one_bulges_then_collapses() {
    let g = FormGlyph;
    let key = GlyphKey::Transition(DigitTransition::D0To1);
    assert!(near(g.width_at_progress(key, 0.0), HEIGHT));
    assert!(near(g.width_at_progress(key, 0.5), ZERO_ONE_BULGE));
    assert!(near(g.width_at_progress(key, 1.0), ONE_WIDTH));
    assert!(g.width_at_progress(key, 0.25) > HEIGHT);
    assert!(near(g.max_width(key), ZERO_ONE_BULGE));
}

#[test]
fn fixed_widths() {
    let g = FormGlyph;
    assert_eq!(g.width_at_progress(GlyphKey::Separator, 0.3), SEPARATOR_WIDTH);
    assert_eq!(g.width_at_progress(GlyphKey::Digit(0), 0.0), HEIGHT);
    assert_eq!(
        g.width_at_progress(GlyphKey::Transition(DigitTransition::D5To6), 0.4),
        HEIGHT
    );
    assert_eq!(g.layout_info().height, HEIGHT);
    assert!(!g.layout_info().is_monospace);
}

#[test]
fn separator_is_two_discs() {
    let mut s = RecordingSurface::new(48.0, 144.0);
    let mut p = Painter::new(&mut s);
    let paints = Paints::default();
    FormGlyph
        .draw(&mut p, GlyphKey::Separator, 0.0, &paints)
        .unwrap();
    let fills = s.fill_bounds();
    assert_eq!(fills.len(), 2);
    let expect = [Rect::new(0.0, 0.0, 48.0, 48.0), Rect::new(0.0, 96.0, 48.0, 144.0)];
    for (got, want) in fills.iter().zip(expect) {
        assert!(near(got.left(), want.left()) && near(got.bottom(), want.bottom()), "{got}");
    }
    assert!(matches!(s.ops()[0], SurfaceOp::Fill { color, .. } if color == paints.color(1)));
}

#[test]
fn every_transition_draws_something() {
    let paints = Paints::default();
    for t in DigitTransition::ALL {
        if t.start_digit().is_none() && t.end_digit().is_none() {
            continue;
        }
        let mut s = RecordingSurface::new(200.0, 200.0);
        let mut p = Painter::new(&mut s);
        FormGlyph
            .draw(&mut p, GlyphKey::Transition(t), 0.3, &paints)
            .unwrap();
        assert!(!s.fill_bounds().is_empty(), "{} drew nothing", t.key());
        assert_eq!(s.save_depth(), 0);
    }
}

#[test]
fn zero_one_strokes_the_one_in_the_second_half() {
    let paints = Paints::default();
    let key = GlyphKey::Transition(DigitTransition::D0To1);

    let mut s = RecordingSurface::new(200.0, 200.0);
    let mut p = Painter::new(&mut s);
    FormGlyph.draw(&mut p, key, 0.25, &paints).unwrap();
    assert!(s.stroke_bounds().is_empty());

    let mut s = RecordingSurface::new(200.0, 200.0);
    let mut p = Painter::new(&mut s);
    FormGlyph.draw(&mut p, key, 0.75, &paints).unwrap();
    assert_eq!(s.stroke_bounds().len(), 2);
    assert_eq!(s.fill_bounds().len(), 2);
}

#[test]
fn blanks_draw_nothing() {
    let mut s = RecordingSurface::new(200.0, 200.0);
    let mut p = Painter::new(&mut s);
    FormGlyph
        .draw(&mut p, GlyphKey::Blank, 0.0, &Paints::default())
        .unwrap();
    assert!(s.ops().is_empty());
}

#[test]
fn form_font_builds_form_glyphs() {
    let design = FormFont.glyph(2, GlyphRole::SeparatorHoursMinutes);
    assert_eq!(design.width_at_progress(GlyphKey::Separator, 0.0), SEPARATOR_WIDTH);
}

#[test]
fn native_size_is_the_full_day_maximum() {
    use crate::layout::measure::{MeasureSettings, measure_full_day};
    use crate::options::model::Options;

    let font: Arc<dyn Font> = Arc::new(FormFont);
    let expected = [
        // Four digits, two separators, half-size seconds, and one 0_1 bulge.
        (Layout::Horizontal, Size::new(968.0, 144.0)),
        (Layout::Vertical, Size::new(352.0, 392.0)),
        (Layout::Wrapped, Size::new(736.0, 232.0)),
    ];
    for (layout, want) in expected {
        let native = font.measure(TimeFormat::HhMmSs24, layout, 16.0);
        assert_eq!(native, want, "{layout}");

        let options = Options {
            format: TimeFormat::HhMmSs24,
            layout,
            spacing_px: 16.0,
            ..Options::default()
        };
        let settings = MeasureSettings {
            step_millis: 10,
            threads: None,
        };
        let exact = measure_full_day(&font, &options, settings).unwrap();
        assert_eq!(native, exact.size(), "{layout}");
        assert!(native.width < estimate_native_size(&FormFont, options.format, layout, 16.0).width);
    }
}

#[test]
fn native_size_is_remembered() {
    let a = FormFont.measure(TimeFormat::HMm12, Layout::Horizontal, 3.0);
    let b = FormFont.measure(TimeFormat::HMm12, Layout::Horizontal, 3.0);
    assert_eq!(a, b);
    assert!(native_sizes().lock().unwrap().contains_key(&(
        TimeFormat::HMm12,
        Layout::Horizontal,
        3.0f64.to_bits()
    )));
}
