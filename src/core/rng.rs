//! Seeded randomness for dice and scripted players.
//!
//! Every draw in a game goes through a `GameRng`. The stream position can be
//! captured as a `GameRngState` and resumed later, so a restored game rolls
//! exactly the dice the original would have rolled next.
//!
//! ```
//! use camelgo::core::GameRng;
//!
//! let mut dice = GameRng::new(42);
//! let saved = dice.state();
//!
//! let face = dice.pick(&[1u8, 2, 3]);
//! let mut resumed = GameRng::from_state(&saved);
//! assert_eq!(resumed.pick(&[1u8, 2, 3]), face);
//! ```

use std::hash::{Hash, Hasher};

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};

/// ChaCha8 stream with a resumable position.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed this stream was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Derive a separate stream, e.g. for a scripted opponent, so its draws
    /// never shift the dice.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        let mut hasher = FxHasher::default();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Uniform pick from `options`; `None` if there are none.
    ///
    /// Consumes one draw per call whatever the slice length.
    pub fn pick<T: Copy>(&mut self, options: &[T]) -> Option<T> {
        options.choose(&mut self.inner).copied()
    }

    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Resume a stream at a saved position.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Saved position of a `GameRng`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter).
    pub word_pos: u128,
}
