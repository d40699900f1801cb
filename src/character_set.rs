//! The built-in character sets a password can be composed from.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// A category of characters usable as a composition constraint.
///
/// Member and ambiguous lists are static, sorted, and shared by every caller; none of the queries
/// mutate anything.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize)]
pub enum CharacterSet {
    #[serde(rename = "upper", alias = "upper-case-letters")]
    UpperCaseLetters,
    #[serde(rename = "lower", alias = "lower-case-letters")]
    LowerCaseLetters,
    #[serde(rename = "digits")]
    Digits,
    #[serde(rename = "symbols")]
    Symbols,
}

impl CharacterSet {
    pub const ALL: [CharacterSet; 4] = [
        CharacterSet::UpperCaseLetters,
        CharacterSet::LowerCaseLetters,
        CharacterSet::Digits,
        CharacterSet::Symbols,
    ];

    /// All members of this set, sorted.
    pub fn members(self) -> &'static [char] {
        match self {
            CharacterSet::UpperCaseLetters => UPPER_CASE_LETTERS,
            CharacterSet::LowerCaseLetters => LOWER_CASE_LETTERS,
            CharacterSet::Digits => DIGITS,
            CharacterSet::Symbols => SYMBOLS,
        }
    }

    /// Members that are easily confused with another character, sorted. May be empty.
    pub fn ambiguous(self) -> &'static [char] {
        match self {
            CharacterSet::UpperCaseLetters => UPPER_CASE_AMBIGUOUS,
            CharacterSet::LowerCaseLetters => LOWER_CASE_AMBIGUOUS,
            CharacterSet::Digits | CharacterSet::Symbols => &[],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CharacterSet::UpperCaseLetters => "upper",
            CharacterSet::LowerCaseLetters => "lower",
            CharacterSet::Digits => "digits",
            CharacterSet::Symbols => "symbols",
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            CharacterSet::UpperCaseLetters => "Upper case letters",
            CharacterSet::LowerCaseLetters => "Lower case letters",
            CharacterSet::Digits => "Digits",
            CharacterSet::Symbols => "Symbols",
        }
    }

    /// Pick a uniformly random member.
    ///
    /// With `allow_ambiguous` unset, ambiguous members are re-drawn until a non-ambiguous one
    /// comes up. Every built-in set has at least one non-ambiguous member, so this terminates.
    pub fn pick_random<R>(self, rng: &mut R, allow_ambiguous: bool) -> char
    where
        R: Rng + ?Sized,
    {
        let members = self.members();
        loop {
            let ch = members[rng.gen_range(0..members.len())];
            if allow_ambiguous || !self.is_ambiguous(ch) {
                return ch;
            }
        }
    }

    pub fn contains(self, ch: char) -> bool {
        self.members().binary_search(&ch).is_ok()
    }

    pub fn is_ambiguous(self, ch: char) -> bool {
        let ambiguous = self.ambiguous();
        !ambiguous.is_empty() && ambiguous.binary_search(&ch).is_ok()
    }

    /// Returns `true` if at least one character of `candidate` belongs to this set.
    pub fn contains_any(self, candidate: &str) -> bool {
        candidate.chars().any(|ch| self.contains(ch))
    }
}

impl fmt::Display for CharacterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
#[error("unknown character set {0:?} (expected one of: upper, lower, digits, symbols)")]
pub struct UnknownCharacterSet(pub String);

impl FromStr for CharacterSet {
    type Err = UnknownCharacterSet;

    fn from_str(s: &str) -> Result<CharacterSet, UnknownCharacterSet> {
        match s.to_ascii_lowercase().as_str() {
            "upper" | "upper-case-letters" => Ok(CharacterSet::UpperCaseLetters),
            "lower" | "lower-case-letters" => Ok(CharacterSet::LowerCaseLetters),
            "digits" => Ok(CharacterSet::Digits),
            "symbols" => Ok(CharacterSet::Symbols),
            _ => Err(UnknownCharacterSet(s.to_owned())),
        }
    }
}

static UPPER_CASE_LETTERS: &[char] = &[
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S',
    'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];
static UPPER_CASE_AMBIGUOUS: &[char] = &['I', 'O'];

static LOWER_CASE_LETTERS: &[char] = &[
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's',
    't', 'u', 'v', 'w', 'x', 'y', 'z',
];
static LOWER_CASE_AMBIGUOUS: &[char] = &['l'];

static DIGITS: &[char] = &['0', '1', '2', '3', '4', '5', '6', '7', '8', '9'];

// Kept in code point order for the binary searches.
static SYMBOLS: &[char] = &[
    '#', '$', '%', '&', '(', ')', '*', '+', ',', '-', '.', '=', '@', '^',
];
