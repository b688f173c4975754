//! Core building blocks: colours, players, RNG, configuration.
//!
//! Everything here is independent of the leg/game state machine. The rule
//! variant is described by `GameConfig` rather than by changing the engine.

pub mod color;
pub mod config;
pub mod player;
pub mod rng;

pub use color::{Color, DieColor};
pub use config::{GameConfig, TicketQueue, ACTION_SPACE_SIZE, BOARD_SIZE, DICE_FACES};
pub use player::{Player, Roster};
pub use rng::{GameRng, GameRngState};
