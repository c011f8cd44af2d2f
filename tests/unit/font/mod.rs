use super::*;

#[test]
fn bundled_fonts_resolve_by_name() {
    assert_eq!(font_by_name("form").unwrap().name(), "form");
    assert_eq!(font_by_name(" Debug ").unwrap().name(), "debug");
    let err = match font_by_name("comic") {
        Err(e) => e,
        Ok(_) => panic!("expected an error"),
    };
    assert!(err.is_config());
    assert!(err.to_string().contains("comic"));
}

#[test]
fn seconds_are_half_size_by_default() {
    let font = form::FormFont;
    assert_eq!(font.scale_for_role(GlyphRole::Second), 0.5);
    assert_eq!(font.scale_for_role(GlyphRole::Hour), 1.0);
    assert_eq!(font.scale_for_role(GlyphRole::SeparatorMinutesSeconds), 1.0);
    assert_eq!(debug::DebugFont.scale_for_role(GlyphRole::Second), 1.0);
}

#[test]
fn measure_defaults_to_the_estimate() {
    let font = debug::DebugFont;
    let size = font.measure(TimeFormat::HhMm24, Layout::Horizontal, 10.0);
    assert_eq!(size, Size::new(5.0 * 100.0 + 4.0 * 10.0, 100.0));
}
