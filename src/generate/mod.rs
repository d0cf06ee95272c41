//! Random password generation.
//!
//! Each position draws one of four character classes with equal
//! probability, then a uniform byte within the class range.
//!
//! The randomness source is injected at construction so tests can pass
//! a seeded RNG; `PasswordGenerator::new` uses the thread-local RNG.

use rand::rngs::ThreadRng;
use rand::Rng;

/// Inclusive byte ranges of the four character classes.
const CLASSES: [(u8, u8); 4] = [
    (33, 47),  // ! " # $ % & ' ( ) * + , - . /
    (58, 64),  // : ; < = > ? @
    (97, 122), // a-z
    (65, 90),  // A-Z
];

/// Default length of a generated password.
pub const DEFAULT_LENGTH: usize = 12;

/// Password generator over an injected randomness source.
pub struct PasswordGenerator<R: Rng> {
    rng: R,
}

impl PasswordGenerator<ThreadRng> {
    /// Generator backed by the thread-local RNG.
    pub fn new() -> Self {
        Self::with_rng(rand::rng())
    }
}

impl Default for PasswordGenerator<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> PasswordGenerator<R> {
    /// Generator backed by an explicit RNG (deterministic in tests).
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Produce a random password of exactly `length` characters.
    pub fn generate(&mut self, length: usize) -> String {
        let mut password = String::with_capacity(length);
        for _ in 0..length {
            let (lo, hi) = CLASSES[self.rng.random_range(0..CLASSES.len())];
            password.push(self.rng.random_range(lo..=hi) as char);
        }
        password
    }
}
