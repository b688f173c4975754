//! # camelgo
//!
//! A deterministic rules engine for a camel racing and betting board game,
//! built to be driven by learning agents.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: every random draw comes from one seeded ChaCha8
//!    stream owned by the dice roller. Same seed plus same actions gives the
//!    same game, including across snapshot/restore.
//!
//! 2. **Validate, then mutate**: a rejected action leaves the game exactly
//!    as it was.
//!
//! 3. **Illegal states are unrepresentable**: actions are a sum type, die
//!    slots and camel colours are closed enums.
//!
//! ## Architecture
//!
//! - **Leg / Game split**: the `Leg` owns everything that resets between
//!   legs (tiles, leg bets, roll points); the `Game` owns players, hidden
//!   game bets and the lifecycle.
//!
//! - **Persistent Data Structures**: tile lists, hidden bets and dice
//!   history use `im` so a `Game` clones cheaply for lookahead.
//!
//! ## Modules
//!
//! - `core`: colours, players, RNG, configuration
//! - `action`: actions, the 48-slot action space, legality masks
//! - `dice`: dice and the per-leg roller
//! - `track`: camels, stacks and ranking
//! - `leg`: movement, tiles, leg bets
//! - `game`: lifecycle, scoring, snapshots
//! - `env`: `reset`/`step` environment and observation encoding

pub mod core;
pub mod error;
pub mod action;
pub mod dice;
pub mod track;
pub mod leg;
pub mod game;
pub mod env;

#[cfg(feature = "python")]
mod python;

// Re-export commonly used types
pub use crate::core::{
    Color, DieColor,
    GameConfig, TicketQueue, ACTION_SPACE_SIZE, BOARD_SIZE, DICE_FACES,
    GameRng, GameRngState,
    Player, Roster,
};

pub use crate::error::{GameError, InvalidMove, Result};

pub use crate::action::{Action, ActionKind, ActionMask, Decision, TileKind};

pub use crate::dice::{Dice, DiceRoller, DiceRollerState};

pub use crate::track::{Camel, Track};

pub use crate::leg::{BetBook, Leg, MoveOutcome, PlacedTile};

pub use crate::game::{Game, GameSnapshot};

pub use crate::env::{
    CamelEnv, StepInfo, StepOutcome,
    EncodedState, ObservationEncoder, StateEncoder, OBSERVATION_DIM,
};
