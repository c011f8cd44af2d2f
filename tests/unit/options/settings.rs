use super::*;
use crate::options::alignment::{Alignment, HorizontalAlign, VerticalAlign};
use crate::options::format::TimeFormat;
use crate::options::model::Layout;

fn base() -> Options {
    Options {
        alignment: Alignment::new(HorizontalAlign::Start, VerticalAlign::Top),
        format: TimeFormat::HMmSs24,
        glyph_morph_millis: 800,
        layout: Layout::Wrapped,
        spacing_px: 16.0,
        ..Options::default()
    }
}

#[test]
fn options_are_restored_from_query() {
    let params = parse_query(
        "?alignment=End__Bottom&glyphMorphMillis=500&format=HH_MM_SS_12&layout=Horizontal&spacingPx=32",
    );
    let o = restore_options(&base(), &params);
    assert_eq!(
        o.alignment,
        Alignment::new(HorizontalAlign::End, VerticalAlign::Bottom)
    );
    assert_eq!(o.format, TimeFormat::HhMmSs12);
    assert_eq!(o.glyph_morph_millis, 500);
    assert_eq!(o.layout, Layout::Horizontal);
    assert_eq!(o.spacing_px, 32.0);
}

#[test]
fn missing_params_do_not_overwrite() {
    let params = parse_query("glyphMorphMillis=500&format=HH_MM_SS_12&layout=Horizontal");
    let o = restore_options(&base(), &params);
    assert_eq!(o.spacing_px, 16.0);
    assert_eq!(o.alignment, base().alignment);
    assert_eq!(o.glyph_morph_millis, 500);
    assert_eq!(o.layout, Layout::Horizontal);
}

#[test]
fn invalid_params_are_ignored() {
    let params = parse_query(
        "glyphMorphMillis=5000&spacingPx=-3&layout=Sideways&format=nope&alignment=Center&bounds=1__2",
    );
    let patch = params_to_patch(&params);
    assert!(patch.is_empty(), "{patch:?}");
    assert_eq!(restore_options(&base(), &params), base());
}

#[test]
fn alignment_with_default_axis() {
    let o = restore_options(&base(), &parse_query("alignment=Center__Default"));
    assert_eq!(
        o.alignment,
        Alignment::new(HorizontalAlign::Center, VerticalAlign::Default)
    );
}

#[test]
fn saving_keeps_unrelated_params() {
    let mut params = parse_query("?unrelated=312");
    options_to_params(&base(), &mut params);
    assert_eq!(params.get("unrelated").map(String::as_str), Some("312"));
    assert_eq!(params.get("format").map(String::as_str), Some("H_MM_SS_24"));
    assert_eq!(params.get("alignment").map(String::as_str), Some("Start__Top"));
    assert_eq!(params.get("bounds").map(String::as_str), Some("0__0__1__1"));
    assert_eq!(params.get("spacingPx").map(String::as_str), Some("16"));
}

#[test]
fn options_round_trip_through_query_string() {
    let o = Options {
        background_color: Some(Color::rgb(0x12, 0x34, 0x56)),
        bounds: Rect::new(0.125, 0.25, 0.875, 0.9),
        ..base()
    };
    let mut params = Params::new();
    options_to_params(&o, &mut params);
    let query = to_query(&params);
    assert!(query.contains("backgroundColor=%23123456"), "{query}");
    let back = restore_options(&Options::default(), &parse_query(&query));
    assert_eq!(back, o);
}

#[test]
fn cleared_background_survives_a_restore() {
    let mut params = parse_query("backgroundColor=%23ffffff");
    options_to_params(&base(), &mut params);
    assert_eq!(params.get("backgroundColor").map(String::as_str), Some("none"));

    let with_background = Options {
        background_color: Some(Color::WHITE),
        ..base()
    };
    assert_eq!(restore_options(&with_background, &params).background_color, None);
    // Without the key the defaults' background stays.
    let params = parse_query("layout=Horizontal");
    assert_eq!(
        restore_options(&with_background, &params).background_color,
        Some(Color::WHITE)
    );
}

#[test]
fn invalid_background_is_ignored() {
    let patch = params_to_patch(&parse_query("backgroundColor=purple-ish"));
    assert_eq!(patch.background_color, None);
    let patch = params_to_patch(&parse_query("backgroundColor="));
    assert_eq!(patch.background_color, Some(None));
}

#[test]
fn paints_replace_only_matching_palettes() {
    let defaults = Paints::default();
    let n = defaults.colors.len();

    let mut params = Params::new();
    let custom = Paints {
        colors: vec![Color::rgb(1, 1, 1); n],
        ..Paints::default()
    };
    paints_to_params(&custom, &mut params);
    assert_eq!(params_to_paints(&defaults, &params).colors, custom.colors);

    let short = parse_query("colors=%23000000__%23ffffff");
    assert_eq!(params_to_paints(&defaults, &short), defaults);

    let broken = parse_query("colors=%23000000__zz__%23000000__%23000000");
    assert_eq!(params_to_paints(&defaults, &broken), defaults);
}

#[test]
fn percent_coding() {
    let params = parse_query("a=%41+b&c=%zz&d");
    assert_eq!(params.get("a").map(String::as_str), Some("A b"));
    assert_eq!(params.get("c").map(String::as_str), Some("%zz"));
    assert_eq!(params.get("d").map(String::as_str), Some(""));
    let mut p = Params::new();
    p.insert("k".into(), "a b&c".into());
    assert_eq!(to_query(&p), "k=a%20b%26c");
}
