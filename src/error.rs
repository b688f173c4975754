//! Engine errors.
//!
//! - `InvalidMove`: the caller asked for something the rules forbid. Always
//!   reported before any state is touched.
//! - `GameError::InvariantViolation`: internal state is inconsistent. Signals
//!   an engine or caller bug, not a rule violation.
//! - `GameError::DiceExhausted`: every die slot has already rolled this leg.

use thiserror::Error;

use crate::core::{Color, DieColor};

/// A rule violation. Returned before any mutation happens.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvalidMove {
    #[error("camel {0} has already rolled its dice this leg")]
    AlreadyRolled(Color),

    #[error("{0} die has already been rolled this leg")]
    DieAlreadyRolled(DieColor),

    #[error("no camel exists with color {0}")]
    UnknownCamel(Color),

    #[error("camel {0} cannot be bet on")]
    NotRacingCamel(Color),

    #[error("no more bets available for camel {0}")]
    NoBetsLeft(Color),

    #[error("tile position {position} must be between 1 and {board_size}")]
    TileOutOfBounds { position: u8, board_size: u8 },

    #[error("cannot place a tile on tile {0}, it is occupied by a camel")]
    TileOnCamel(u8),

    #[error("cannot place a tile on or beside the existing tile at {0}")]
    TileTooClose(u8),

    #[error("no player named {0}")]
    UnknownPlayer(String),

    #[error("player {0} is seated twice")]
    DuplicatePlayer(String),

    #[error("{count} players is outside the allowed {min}..={max}")]
    PlayerCount { count: usize, min: usize, max: usize },

    #[error("starting player index {index} is out of range for {count} players")]
    StartingPlayer { index: usize, count: usize },

    #[error("the game has already finished")]
    GameFinished,

    #[error("action index {0} is outside the action space")]
    ActionOutOfRange(usize),

    #[error("dice number {0} is not in 1..=3")]
    DiceNumber(u8),

    #[error("no grey die has been rolled to pair with")]
    NoGreyDie,
}

/// Any failure the engine can report.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("invalid move: {0}")]
    InvalidMove(#[from] InvalidMove),

    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    #[error("all dice have been rolled this leg")]
    DiceExhausted,

    #[error("snapshot encoding failed: {0}")]
    Snapshot(#[from] bincode::Error),
}

impl GameError {
    /// The rule violation, if this is one.
    #[must_use]
    pub fn as_invalid_move(&self) -> Option<&InvalidMove> {
        match self {
            GameError::InvalidMove(m) => Some(m),
            _ => None,
        }
    }
}

/// Crate result type.
pub type Result<T> = std::result::Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = InvalidMove::NoBetsLeft(Color::Red);
        assert_eq!(err.to_string(), "no more bets available for camel red");

        let err = InvalidMove::TileOutOfBounds {
            position: 17,
            board_size: 16,
        };
        assert_eq!(err.to_string(), "tile position 17 must be between 1 and 16");
    }

    #[test]
    fn test_from_invalid_move() {
        let err: GameError = InvalidMove::UnknownCamel(Color::Blue).into();
        assert_eq!(
            err.as_invalid_move(),
            Some(&InvalidMove::UnknownCamel(Color::Blue))
        );
        assert_eq!(err.to_string(), "invalid move: no camel exists with color blue");
    }

    #[test]
    fn test_non_move_errors() {
        assert!(GameError::DiceExhausted.as_invalid_move().is_none());
        let err = GameError::InvariantViolation("no camels to rank".into());
        assert_eq!(err.to_string(), "invariant violated: no camels to rank");
    }
}
