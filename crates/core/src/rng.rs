use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Where a seeded stream currently stands: the seed and the ChaCha word position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub word_pos: u128,
}

/// The board's only source of randomness.
#[derive(Clone, Debug)]
pub(crate) struct SimRng {
    seed: u64,
    inner: ChaCha8Rng,
}

impl SimRng {
    pub(crate) fn new(seed: u64) -> Self {
        Self { seed, inner: ChaCha8Rng::seed_from_u64(seed) }
    }

    /// Jumps straight to the recorded position. Positions past the end of the
    /// stream wrap, so callers compare `state()` against what they asked for.
    pub(crate) fn resume(state: RngState) -> Self {
        let mut rng = Self::new(state.seed);
        rng.inner.set_word_pos(state.word_pos);
        rng
    }

    pub(crate) fn state(&self) -> RngState {
        RngState { seed: self.seed, word_pos: self.inner.get_word_pos() }
    }

    pub(crate) fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    /// Uniform in `0..bound`. `bound` must be non-zero.
    pub(crate) fn below(&mut self, bound: usize) -> usize {
        debug_assert!(bound > 0);
        (self.next_u64() % bound as u64) as usize
    }

    /// True with `percent` in 100 odds.
    pub(crate) fn chance(&mut self, percent: u32) -> bool {
        self.below(100) < percent as usize
    }

    pub(crate) fn pick<T: Copy>(&mut self, items: &[T]) -> Option<T> {
        if items.is_empty() {
            return None;
        }
        Some(items[self.below(items.len())])
    }
}
