//! Utilities for generating passwords.

use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::{CryptoRng, Rng};
use serde::{Deserialize, Serialize};

use crate::{CharacterSet, GenerationError, Secret};

/// Shortest password that will be generated, regardless of how many sets are selected.
pub const MIN_PASSWORD_LENGTH: usize = 4;

/// A validated request for a password.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GenerationRequest {
    sets: Vec<CharacterSet>,
    length: usize,
    allow_ambiguous: bool,
}

impl GenerationRequest {
    /// Validate the arguments of a generation call.
    ///
    /// Repeated sets are collapsed: each selected set is equally likely to be picked for a given
    /// position, no matter how often it was listed.
    pub fn new(
        sets: &[CharacterSet],
        length: usize,
        allow_ambiguous: bool,
    ) -> Result<GenerationRequest, GenerationError> {
        if sets.is_empty() {
            return Err(GenerationError::EmptySelection);
        }
        if length < MIN_PASSWORD_LENGTH {
            return Err(GenerationError::LengthTooShort {
                length,
                minimum: MIN_PASSWORD_LENGTH,
            });
        }
        let mut sets = sets.to_vec();
        sets.sort_unstable();
        sets.dedup();
        Ok(GenerationRequest {
            sets,
            length,
            allow_ambiguous,
        })
    }

    pub fn sets(&self) -> &[CharacterSet] {
        &self.sets
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn allow_ambiguous(&self) -> bool {
        self.allow_ambiguous
    }

    /// Every character a password for this request may contain.
    pub fn alphabet(&self) -> Vec<char> {
        let mut alphabet = self
            .sets
            .iter()
            .flat_map(|set| {
                set.members()
                    .iter()
                    .copied()
                    .filter(move |&ch| self.allow_ambiguous || !set.is_ambiguous(ch))
            })
            .collect::<Vec<_>>();
        alphabet.sort_unstable();
        alphabet.dedup();
        alphabet
    }

    /// Whether `candidate` has at least one character from each selected set.
    pub fn is_covered_by(&self, candidate: &str) -> bool {
        self.sets.iter().all(|set| set.contains_any(candidate))
    }
}

/// How a password satisfying a [`GenerationRequest`] is built.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Fill every position from a randomly chosen set and start over until every set shows up.
    #[default]
    Rejection,
    /// Place one character of each set, fill the rest from the combined alphabet, then shuffle.
    /// Never retries, but the distribution differs from `Rejection`.
    Placement,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Rejection => f.write_str("rejection"),
            Strategy::Placement => f.write_str("placement"),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
#[error("unknown strategy {0:?} (expected \"rejection\" or \"placement\")")]
pub struct UnknownStrategy(pub String);

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Strategy, UnknownStrategy> {
        match s {
            "rejection" => Ok(Strategy::Rejection),
            "placement" => Ok(Strategy::Placement),
            _ => Err(UnknownStrategy(s.to_owned())),
        }
    }
}

/// Generate a password of `length` characters containing at least one character from each of
/// `sets`.
///
/// Uses rejection sampling; see [`Strategy::Rejection`].
pub fn generate<R>(
    rng: &mut R,
    sets: &[CharacterSet],
    length: usize,
    allow_ambiguous: bool,
) -> Result<Secret, GenerationError>
where
    R: Rng + CryptoRng + ?Sized,
{
    let request = GenerationRequest::new(sets, length, allow_ambiguous)?;
    Ok(generate_with(rng, &request, Strategy::Rejection))
}

/// Like [`generate`], leaving out ambiguous characters.
pub fn generate_default<R>(
    rng: &mut R,
    sets: &[CharacterSet],
    length: usize,
) -> Result<Secret, GenerationError>
where
    R: Rng + CryptoRng + ?Sized,
{
    generate(rng, sets, length, false)
}

/// Generate a password for an already-validated request. This cannot fail.
pub fn generate_with<R>(rng: &mut R, request: &GenerationRequest, strategy: Strategy) -> Secret
where
    R: Rng + CryptoRng + ?Sized,
{
    log::debug!(
        "generating {} character password from {} set(s) using {} strategy",
        request.length,
        request.sets.len(),
        strategy
    );
    match strategy {
        Strategy::Rejection => generate_by_rejection(rng, request),
        Strategy::Placement => generate_by_placement(rng, request),
    }
}

fn generate_by_rejection<R>(rng: &mut R, request: &GenerationRequest) -> Secret
where
    R: Rng + CryptoRng + ?Sized,
{
    let sets = &request.sets;
    let mut password = String::with_capacity(request.length);
    let mut attempts: u64 = 0;
    loop {
        attempts += 1;
        password.clear();
        for _ in 0..request.length {
            let set = sets[rng.gen_range(0..sets.len())];
            password.push(set.pick_random(rng, request.allow_ambiguous));
        }

        if request.is_covered_by(&password) {
            log::debug!("candidate accepted after {} attempt(s)", attempts);
            return Secret(password);
        }
        log::trace!("candidate {} rejected: not every set is represented", attempts);
    }
}

fn generate_by_placement<R>(rng: &mut R, request: &GenerationRequest) -> Secret
where
    R: Rng + CryptoRng + ?Sized,
{
    let mut chars = Vec::with_capacity(request.length);
    for set in request.sets.iter() {
        chars.push(set.pick_random(rng, request.allow_ambiguous));
    }
    let remaining = request.length.saturating_sub(chars.len());
    let filler = generate_random_password(rng, &request.alphabet(), remaining);
    chars.extend(filler.as_str().chars());
    chars.shuffle(rng);
    Secret(chars.into_iter().collect())
}

/// Generate a simple, impossible-to-guess password by just randomly sampling the given alphabet.
///
/// These are ugly, hard to remember passwords, but perfect if you're just pasting them into a
/// password manager. No composition constraints are applied. An empty alphabet gives an empty
/// password.
///
/// Note that `rand`'s underlying uniform sampler does the right thing to prevent bias: if it can't
/// generate a value that is within the given range (or really, a multiple of the range), it
/// re-samples.
pub fn generate_random_password<R>(rng: &mut R, alphabet: &[char], len: usize) -> Secret
where
    R: Rng + CryptoRng + ?Sized,
{
    let mut secret = Secret(String::with_capacity(len));
    for _ in 0..len {
        match alphabet.choose(rng) {
            Some(ch) => secret.0.push(*ch),
            None => break,
        }
    }
    secret
}
