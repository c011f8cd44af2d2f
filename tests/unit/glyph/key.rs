use super::*;

#[test]
fn steady_keys_parse() {
    assert_eq!(GlyphKey::parse("0").unwrap(), GlyphKey::Digit(0));
    assert_eq!(GlyphKey::parse("9").unwrap(), GlyphKey::Digit(9));
    assert_eq!(GlyphKey::parse(" ").unwrap(), GlyphKey::Blank);
    assert_eq!(GlyphKey::parse(":").unwrap(), GlyphKey::Separator);
    assert_eq!(GlyphKey::parse("#").unwrap(), GlyphKey::Placeholder);
}

#[test]
fn every_transition_key_round_trips() {
    for t in DigitTransition::ALL {
        let parsed = GlyphKey::parse(t.key()).unwrap();
        assert_eq!(parsed, GlyphKey::Transition(t));
        assert_eq!(parsed.to_string(), t.key());
        assert_eq!(canonical_start(t.key()), t.start_char());
        assert_eq!(canonical_end(t.key()), t.end_char());
    }
}

#[test]
fn unknown_keys_fail_loudly() {
    for bad in ["", "x", "1_3", "0_0", "12", ":_1", "9_1", " _ "] {
        let err = GlyphKey::parse(bad).unwrap_err();
        assert!(err.is_config(), "{bad}");
    }
}

#[test]
fn steady_digits_draw_their_outgoing_transition() {
    assert_eq!(
        GlyphKey::Digit(3).drawable_transition(),
        Some(DigitTransition::D3To4)
    );
    assert_eq!(
        GlyphKey::Digit(9).drawable_transition(),
        Some(DigitTransition::D9To0)
    );
    assert_eq!(GlyphKey::Separator.drawable_transition(), None);
    assert_eq!(GlyphKey::Blank.drawable_transition(), None);
}

#[test]
fn transition_endpoints() {
    assert_eq!(DigitTransition::D2ToBlank.start_digit(), Some(2));
    assert_eq!(DigitTransition::D2ToBlank.end_digit(), None);
    assert_eq!(DigitTransition::BlankTo1.start_digit(), None);
    assert_eq!(DigitTransition::BlankTo1.end_digit(), Some(1));
    assert_eq!(DigitTransition::D9To0.end_digit(), Some(0));
}

#[test]
fn canonical_characters() {
    assert_eq!(canonical_start("1_2"), '1');
    assert_eq!(canonical_end("1_2"), '2');
    assert_eq!(canonical_end("1_ "), ' ');
    assert_eq!(canonical_start(":"), ':');
    assert_eq!(canonical_end(""), ' ');
}

#[test]
fn digit_slot_keys_cover_the_alphabet() {
    let keys: Vec<GlyphKey> = GlyphKey::digit_slot_keys().collect();
    assert_eq!(keys.len(), 10 + 1 + DigitTransition::ALL.len());
    assert!(keys.contains(&GlyphKey::Blank));
    assert!(!keys.contains(&GlyphKey::Separator));
}

#[test]
fn separator_key_detection() {
    assert!(is_separator_key(":"));
    assert!(!is_separator_key("::"));
    assert!(!is_separator_key("1_2"));
    assert!(!is_separator_key(""));
}
