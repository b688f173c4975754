//! Game configuration.
//!
//! The board itself is fixed: 16 tiles, and a 48-slot action space that
//! enumerates every decision (see `crate::action`). Everything else that
//! varies between rule variants lives in `GameConfig`, built with the
//! usual `with_*` methods:
//!
//! ```
//! use camelgo::core::GameConfig;
//!
//! let config = GameConfig::new()
//!     .with_starting_points(5)
//!     .with_player_range(2, 4);
//!
//! assert_eq!(config.starting_points, 5);
//! assert!(config.accepts_player_count(3));
//! assert!(!config.accepts_player_count(6));
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Number of tiles on the track. A camel beyond this tile has finished.
pub const BOARD_SIZE: u8 = 16;

/// Number of values a die can show (1..=3).
pub const DICE_FACES: [u8; 3] = [1, 2, 3];

/// Size of the discrete action space.
pub const ACTION_SPACE_SIZE: usize = 48;

/// Ticket queue for one camel's leg bets.
pub type TicketQueue = SmallVec<[u8; 4]>;

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Points each player starts with.
    pub starting_points: i32,

    /// Fewest players allowed.
    pub min_players: usize,

    /// Most players allowed.
    pub max_players: usize,

    /// Leg-bet ticket values, handed out front to back.
    pub leg_bet_values: TicketQueue,

    /// Payouts for correct game winner/loser bets, in bet order.
    /// Bettors beyond the end of the table receive nothing.
    pub game_bet_payouts: Vec<i32>,

    /// Points lost per wrong game winner/loser bet.
    pub wrong_game_bet_penalty: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_points: 3,
            min_players: 2,
            max_players: 8,
            leg_bet_values: SmallVec::from_slice(&[5, 3, 2, 2]),
            game_bet_payouts: vec![8, 5, 3, 2, 1],
            wrong_game_bet_penalty: 1,
        }
    }
}

impl GameConfig {
    /// Create the standard configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the starting point total.
    #[must_use]
    pub fn with_starting_points(mut self, points: i32) -> Self {
        self.starting_points = points;
        self
    }

    /// Set the allowed player range (inclusive).
    #[must_use]
    pub fn with_player_range(mut self, min: usize, max: usize) -> Self {
        assert!(min >= 1 && min <= max, "Invalid player range");
        self.min_players = min;
        self.max_players = max;
        self
    }

    /// Set the leg-bet ticket values.
    #[must_use]
    pub fn with_leg_bet_values(mut self, values: &[u8]) -> Self {
        self.leg_bet_values = SmallVec::from_slice(values);
        self
    }

    /// Set the game-bet payout table.
    #[must_use]
    pub fn with_game_bet_payouts(mut self, payouts: Vec<i32>) -> Self {
        self.game_bet_payouts = payouts;
        self
    }

    /// Set the penalty for a wrong game bet.
    #[must_use]
    pub fn with_wrong_game_bet_penalty(mut self, penalty: i32) -> Self {
        self.wrong_game_bet_penalty = penalty;
        self
    }

    /// Check whether a table of `count` players may start a game.
    #[must_use]
    pub fn accepts_player_count(&self, count: usize) -> bool {
        (self.min_players..=self.max_players).contains(&count)
    }

    /// Payout for the bettor at `rank` (0-based) in a game bet list.
    #[must_use]
    pub fn game_bet_payout(&self, rank: usize) -> i32 {
        self.game_bet_payouts.get(rank).copied().unwrap_or(0)
    }
}
