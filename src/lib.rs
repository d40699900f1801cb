//! Random password generation under composition constraints.
//!
//! Callers pick one or more [`CharacterSet`]s and a length; the generator returns a password of
//! exactly that length which contains at least one character from every selected set, optionally
//! leaving out visually ambiguous characters (`I`, `O`, `l`).

use serde::{Deserialize, Serialize};

pub mod character_set;
pub mod password_generation;

pub use character_set::{CharacterSet, UnknownCharacterSet};
pub use password_generation::{
    generate, generate_default, generate_with, GenerationRequest, Strategy, MIN_PASSWORD_LENGTH,
};

#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum GenerationError {
    #[error("at least one character set must be selected")]
    EmptySelection,
    #[error("password length must be at least {minimum}, but {length} was requested")]
    LengthTooShort { length: usize, minimum: usize },
}

/// A generated password.
///
/// The contents never show up in `Debug` output, so a `Secret` can sit inside structs that get
/// logged.
#[derive(Clone, Eq, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Secret(String);

opaque_debug::implement!(Secret);

impl Secret {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Length in characters (not bytes).
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for Secret {
    fn from(s: String) -> Secret {
        Secret(s)
    }
}
