use std::fmt;
use std::str::FromStr;

use crate::foundation::error::{ClockError, ClockResult};

/// Separator character, both as a key and as a formatted-time character.
pub const SEPARATOR: char = ':';
/// Canonical form of a glyph that never morphs.
pub const PLACEHOLDER: char = '#';
pub const BLANK: char = ' ';

/// Every animated transition a glyph family must be able to draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DigitTransition {
    D0To1,
    D1To2,
    D2To3,
    D3To4,
    D4To5,
    D5To6,
    D6To7,
    D7To8,
    D8To9,
    D9To0,
    D5To0,
    D3To0,
    D2To0,
    D1To0,
    D2To1,
    BlankTo1,
    BlankTo2,
    D1ToBlank,
    D2ToBlank,
}

impl DigitTransition {
    pub const ALL: [DigitTransition; 19] = [
        Self::D0To1,
        Self::D1To2,
        Self::D2To3,
        Self::D3To4,
        Self::D4To5,
        Self::D5To6,
        Self::D6To7,
        Self::D7To8,
        Self::D8To9,
        Self::D9To0,
        Self::D5To0,
        Self::D3To0,
        Self::D2To0,
        Self::D1To0,
        Self::D2To1,
        Self::BlankTo1,
        Self::BlankTo2,
        Self::D1ToBlank,
        Self::D2ToBlank,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::D0To1 => "0_1",
            Self::D1To2 => "1_2",
            Self::D2To3 => "2_3",
            Self::D3To4 => "3_4",
            Self::D4To5 => "4_5",
            Self::D5To6 => "5_6",
            Self::D6To7 => "6_7",
            Self::D7To8 => "7_8",
            Self::D8To9 => "8_9",
            Self::D9To0 => "9_0",
            Self::D5To0 => "5_0",
            Self::D3To0 => "3_0",
            Self::D2To0 => "2_0",
            Self::D1To0 => "1_0",
            Self::D2To1 => "2_1",
            Self::BlankTo1 => " _1",
            Self::BlankTo2 => " _2",
            Self::D1ToBlank => "1_ ",
            Self::D2ToBlank => "2_ ",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.key() == key)
    }

    /// The transition a steady digit is drawn with, at progress 0.
    pub fn starting_at(digit: u8) -> Option<Self> {
        match digit {
            0 => Some(Self::D0To1),
            1 => Some(Self::D1To2),
            2 => Some(Self::D2To3),
            3 => Some(Self::D3To4),
            4 => Some(Self::D4To5),
            5 => Some(Self::D5To6),
            6 => Some(Self::D6To7),
            7 => Some(Self::D7To8),
            8 => Some(Self::D8To9),
            9 => Some(Self::D9To0),
            _ => None,
        }
    }

    /// Start character (digit or blank).
    pub fn start_char(self) -> char {
        self.key().chars().next().unwrap_or(BLANK)
    }

    /// End character (digit or blank).
    pub fn end_char(self) -> char {
        self.key().chars().last().unwrap_or(BLANK)
    }

    /// Start digit, `None` for blank.
    pub fn start_digit(self) -> Option<u8> {
        self.start_char().to_digit(10).map(|d| d as u8)
    }

    /// End digit, `None` for blank.
    pub fn end_digit(self) -> Option<u8> {
        self.end_char().to_digit(10).map(|d| d as u8)
    }
}

/// Parsed glyph transition key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GlyphKey {
    /// Steady digit, e.g. `"3"`.
    Digit(u8),
    /// `" "`.
    Blank,
    /// `":"`.
    Separator,
    /// `"#"`.
    Placeholder,
    Transition(DigitTransition),
}

impl GlyphKey {
    /// Parse a key; anything outside the alphabet is a configuration error.
    pub fn parse(key: &str) -> ClockResult<Self> {
        let mut chars = key.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return match c {
                '0'..='9' => Ok(Self::Digit(c as u8 - b'0')),
                BLANK => Ok(Self::Blank),
                SEPARATOR => Ok(Self::Separator),
                PLACEHOLDER => Ok(Self::Placeholder),
                _ => Err(unknown(key)),
            };
        }
        DigitTransition::from_key(key)
            .map(Self::Transition)
            .ok_or_else(|| unknown(key))
    }

    /// Resolve to the transition used for drawing: steady digits draw their outgoing
    /// transition at progress 0. `None` for separators, blanks and placeholders.
    pub fn drawable_transition(self) -> Option<DigitTransition> {
        match self {
            Self::Digit(d) => DigitTransition::starting_at(d),
            Self::Transition(t) => Some(t),
            Self::Blank | Self::Separator | Self::Placeholder => None,
        }
    }

    pub fn is_transition(self) -> bool {
        matches!(self, Self::Transition(_))
    }

    /// Every key a digit slot can hold: steady digits, blank, and all transitions.
    pub fn digit_slot_keys() -> impl Iterator<Item = GlyphKey> {
        (0..=9)
            .map(Self::Digit)
            .chain(std::iter::once(Self::Blank))
            .chain(DigitTransition::ALL.into_iter().map(Self::Transition))
    }
}

fn unknown(key: &str) -> ClockError {
    ClockError::config(format!("no glyph mapping for key '{key}'"))
}

impl FromStr for GlyphKey {
    type Err = ClockError;

    fn from_str(s: &str) -> ClockResult<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for GlyphKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Digit(d) => write!(f, "{d}"),
            Self::Blank => write!(f, "{BLANK}"),
            Self::Separator => write!(f, "{SEPARATOR}"),
            Self::Placeholder => write!(f, "{PLACEHOLDER}"),
            Self::Transition(t) => f.write_str(t.key()),
        }
    }
}

/// First character of a key, or blank for an empty key.
pub fn canonical_start(key: &str) -> char {
    key.chars().next().unwrap_or(BLANK)
}

/// True for the steady separator key `":"`.
pub fn is_separator_key(key: &str) -> bool {
    let mut chars = key.chars();
    chars.next() == Some(SEPARATOR) && chars.next().is_none()
}

/// Last character of a key, or blank for an empty key.
pub fn canonical_end(key: &str) -> char {
    key.chars().last().unwrap_or(BLANK)
}

#[cfg(test)]
#[path = "../../tests/unit/glyph/key.rs"]
mod tests;
