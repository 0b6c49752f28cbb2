//! Injectable randomness.
//!
//! The engine only ever asks for one thing: a uniform index below some bound.
//! [`GameRng`] is the seedable production source; [`ScriptedSource`] replays
//! a fixed list of choices so tests can pin faction and leader picks.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A source of uniform choices.
pub trait RandomSource {
    /// Return an index in `0..upper`. `upper` is always non-zero.
    fn next_choice(&mut self, upper: usize) -> usize;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_choice(&mut self, upper: usize) -> usize {
        (**self).next_choice(upper)
    }
}

/// Seedable ChaCha8 source.
#[derive(Debug, Clone)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed from the operating system's entropy.
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for GameRng {
    fn next_choice(&mut self, upper: usize) -> usize {
        self.inner.gen_range(0..upper)
    }
}

/// Replays a fixed sequence of choices, wrapping each into range.
///
/// Once the script runs out every further choice is `0`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    choices: Vec<usize>,
    cursor: usize,
}

impl ScriptedSource {
    pub fn new(choices: impl Into<Vec<usize>>) -> Self {
        Self {
            choices: choices.into(),
            cursor: 0,
        }
    }

    /// Number of choices consumed so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedSource {
    fn next_choice(&mut self, upper: usize) -> usize {
        let choice = self.choices.get(self.cursor).copied().unwrap_or(0);
        self.cursor += 1;
        choice % upper
    }
}

/// Uniform in-place shuffle (Fisher-Yates) driven by a [`RandomSource`].
pub fn shuffle<T>(rng: &mut impl RandomSource, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = rng.next_choice(i + 1);
        items.swap(i, j);
    }
}
