//! Token sources for the canvas and WebGL placeholders.
//!
//! Each computation draws two tokens, canvas first. The default source gives a
//! fresh UUID v4 per draw; the seeded and fixed sources make output reproducible.

use std::sync::Arc;

use parking_lot::Mutex;
use rand::{rngs::StdRng, Rng, SeedableRng};
use uuid::{Builder, Uuid};

/// Supplies the per-call identifier embedded in the placeholders.
pub trait TokenSource {
    fn next_token(&self) -> String;
}

impl<T: TokenSource + ?Sized> TokenSource for &T {
    fn next_token(&self) -> String {
        (**self).next_token()
    }
}

impl<T: TokenSource + ?Sized> TokenSource for Box<T> {
    fn next_token(&self) -> String {
        (**self).next_token()
    }
}

impl<T: TokenSource + ?Sized> TokenSource for Arc<T> {
    fn next_token(&self) -> String {
        (**self).next_token()
    }
}

/// A fresh random UUID v4 on every draw.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomTokenSource;

impl TokenSource for RandomTokenSource {
    fn next_token(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// UUID-formatted tokens from a seeded generator.
///
/// The same seed always yields the same token sequence.
#[derive(Debug)]
pub struct SeededTokenSource {
    rng: Mutex<StdRng>,
}

impl SeededTokenSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl TokenSource for SeededTokenSource {
    fn next_token(&self) -> String {
        let mut bytes = [0u8; 16];
        self.rng.lock().fill(&mut bytes);
        Builder::from_random_bytes(bytes).into_uuid().to_string()
    }
}

/// The same token on every draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedTokenSource {
    token: String,
}

impl FixedTokenSource {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// `00000000-0000-0000-0000-000000000000`
    pub fn nil() -> Self {
        Self::new(Uuid::nil().to_string())
    }
}

impl TokenSource for FixedTokenSource {
    fn next_token(&self) -> String {
        self.token.clone()
    }
}
