use super::*;

#[test]
fn defaults_match_documented_values() {
    let o = Options::default();
    assert_eq!(o.format, TimeFormat::HhMmSs24);
    assert_eq!(o.glyph_morph_millis, 800);
    assert_eq!(o.spacing_px, 16.0);
    assert_eq!(
        o.alignment,
        Alignment::new(HorizontalAlign::Default, VerticalAlign::Bottom)
    );
    assert_eq!(o.layout, Layout::Wrapped);
    assert_eq!(o.background_color, None);
    assert!(o.validate().is_ok());
}

#[test]
fn merge_keeps_unset_fields() {
    let base = Options {
        background_color: Some(Color::WHITE),
        ..Options::default()
    };
    let patch = OptionsPatch {
        layout: Some(Layout::Horizontal),
        spacing_px: Some(4.0),
        ..OptionsPatch::default()
    };
    let merged = base.merge(&patch);
    assert_eq!(merged.layout, Layout::Horizontal);
    assert_eq!(merged.spacing_px, 4.0);
    assert_eq!(merged.format, base.format);
    assert_eq!(merged.glyph_morph_millis, base.glyph_morph_millis);
    assert_eq!(merged.alignment, base.alignment);
    assert_eq!(merged.background_color, Some(Color::WHITE));
    assert_eq!(merged.bounds, base.bounds);
    // The source is untouched.
    assert_eq!(base.layout, Layout::Wrapped);
}

#[test]
fn patch_can_clear_the_background() {
    let base = Options {
        background_color: Some(Color::WHITE),
        ..Options::default()
    };
    let clear = OptionsPatch {
        background_color: Some(None),
        ..OptionsPatch::default()
    };
    assert!(!clear.is_empty());
    assert_eq!(base.merge(&clear).background_color, None);

    let from_json: OptionsPatch = serde_json::from_str(r#"{"background_color":null}"#).unwrap();
    assert_eq!(from_json, clear);
    let untouched: OptionsPatch = serde_json::from_str(r#"{"layout":"Horizontal"}"#).unwrap();
    assert_eq!(untouched.background_color, None);
    let json = serde_json::to_string(&clear).unwrap();
    assert_eq!(serde_json::from_str::<OptionsPatch>(&json).unwrap(), clear);
}

#[test]
fn empty_patch_is_identity() {
    let base = Options::default();
    assert!(OptionsPatch::default().is_empty());
    assert_eq!(base.merge(&OptionsPatch::default()), base);
}

#[test]
fn validate_rejects_long_morphs_and_bad_spacing() {
    let o = Options {
        glyph_morph_millis: 1_001,
        ..Options::default()
    };
    assert!(matches!(o.validate(), Err(ClockError::Validation(_))));
    let o = Options {
        glyph_morph_millis: 1_000,
        ..Options::default()
    };
    assert!(o.validate().is_ok());
    let o = Options {
        spacing_px: -1.0,
        ..Options::default()
    };
    assert!(o.validate().is_err());
    let o = Options {
        spacing_px: f64::NAN,
        ..Options::default()
    };
    assert!(o.validate().is_err());
}

#[test]
fn json_partial_document_uses_defaults() {
    let o = Options::from_json_str(r#"{"layout":"Vertical","format":"H_MM_12"}"#).unwrap();
    assert_eq!(o.layout, Layout::Vertical);
    assert_eq!(o.format, TimeFormat::HMm12);
    assert_eq!(o.glyph_morph_millis, 800);
}

#[test]
fn json_errors_are_typed() {
    assert!(matches!(
        Options::from_json_str("{not json"),
        Err(ClockError::Serde(_))
    ));
    assert!(matches!(
        Options::from_json_str(r#"{"glyph_morph_millis":5000}"#),
        Err(ClockError::Validation(_))
    ));
}

#[test]
fn json_round_trip() {
    let o = Options {
        background_color: Some(Color::rgb(1, 2, 3)),
        layout: Layout::Horizontal,
        ..Options::default()
    };
    let json = o.to_json_pretty().unwrap();
    assert_eq!(Options::from_json_str(&json).unwrap(), o);
}

#[test]
fn layout_names() {
    assert_eq!("Wrapped".parse::<Layout>().unwrap(), Layout::Wrapped);
    assert_eq!("horizontal".parse::<Layout>().unwrap(), Layout::Horizontal);
    assert!("Diagonal".parse::<Layout>().unwrap_err().is_config());
}

#[test]
fn missing_file_is_reported() {
    let err = Options::from_path(Path::new("definitely/not/here.json")).unwrap_err();
    assert!(err.to_string().contains("read options"));
}
