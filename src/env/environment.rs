//! Single-agent environment over a two-seat game.
//!
//! The agent sits in seat 0 ("Agent") and always acts first. After each
//! agent step the opponent seat plays uniformly random legal actions until
//! it is the agent's turn again or the race is over.

use crate::action::{ActionMask, Decision};
use crate::core::{GameRng, ACTION_SPACE_SIZE};
use crate::dice::DiceRoller;
use crate::error::{GameError, InvalidMove, Result};
use crate::game::Game;

use super::observation::{EncodedState, ObservationEncoder, StateEncoder};

/// Seat name of the learning agent.
pub const AGENT: &str = "Agent";

/// Seat name of the scripted opponent.
pub const OPPONENT: &str = "Opponent";

/// Reward for an action that is not legal.
pub const ILLEGAL_ACTION_REWARD: f32 = -1e6;

/// Extra information returned with every observation.
#[derive(Clone, Debug, PartialEq)]
pub struct StepInfo {
    /// Legal slots for the agent.
    pub mask: ActionMask,
    /// Why the step was rejected, if it was.
    pub error: Option<String>,
}

/// Outcome of one agent step.
#[derive(Clone, Debug, PartialEq)]
pub struct StepOutcome {
    pub obs: EncodedState,
    /// Change in the agent's points across its action and the replies.
    pub reward: f32,
    pub terminated: bool,
    pub truncated: bool,
    pub info: StepInfo,
}

/// Decision environment for one learning agent against a random opponent.
pub struct CamelEnv {
    game: Game,
    encoder: Box<dyn StateEncoder>,
    opponent_rng: GameRng,
    aborted: bool,
}

impl CamelEnv {
    /// Create an environment with a game already dealt from `seed`.
    pub fn new(seed: u64) -> Result<Self> {
        Self::with_encoder(seed, Box::new(ObservationEncoder::new()))
    }

    /// Create an environment with a custom observation encoder.
    pub fn with_encoder(seed: u64, encoder: Box<dyn StateEncoder>) -> Result<Self> {
        let (game, opponent_rng) = deal(seed)?;
        Ok(Self {
            game,
            encoder,
            opponent_rng,
            aborted: false,
        })
    }

    /// Start a new episode.
    pub fn reset(&mut self, seed: u64) -> Result<(EncodedState, StepInfo)> {
        let (game, opponent_rng) = deal(seed)?;
        self.game = game;
        self.opponent_rng = opponent_rng;
        self.aborted = false;
        self.play_opponents()?;
        Ok((self.observation(), self.info(None)))
    }

    /// Play the agent's action, then the opponent's replies.
    ///
    /// An illegal action ends the episode with `ILLEGAL_ACTION_REWARD` and
    /// the reason in `info.error`; it is not an `Err`. Errors are reserved
    /// for engine failures.
    pub fn step(&mut self, action: usize) -> Result<StepOutcome> {
        if self.game.is_finished() || self.aborted {
            return Ok(self.outcome(0.0, None));
        }

        let before = self.game.current_player_points(AGENT)?;
        if let Err(reason) = self.play_agent(action) {
            tracing::warn!(action, error = %reason, "illegal action from agent");
            self.aborted = true;
            return Ok(self.outcome(ILLEGAL_ACTION_REWARD, Some(reason)));
        }
        self.play_opponents()?;
        let after = self.game.current_player_points(AGENT)?;

        Ok(self.outcome((after - before) as f32, None))
    }

    /// The game being played.
    #[must_use]
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Legal slots for the agent.
    #[must_use]
    pub fn action_mask(&self) -> ActionMask {
        self.game.get_action_mask(AGENT)
    }

    /// Current observation from the agent's seat.
    #[must_use]
    pub fn observation(&self) -> EncodedState {
        self.encoder.encode(&self.game, AGENT)
    }

    /// Shape of observations.
    #[must_use]
    pub fn observation_shape(&self) -> Vec<usize> {
        self.encoder.output_shape()
    }

    /// Number of discrete actions.
    #[must_use]
    pub fn action_space_size(&self) -> usize {
        self.encoder.action_space_size()
    }

    fn play_agent(&mut self, action: usize) -> std::result::Result<(), String> {
        if action >= ACTION_SPACE_SIZE {
            return Err(InvalidMove::ActionOutOfRange(action).to_string());
        }
        if !self.action_mask().is_legal(action) {
            let decision = Decision::from_index(action).map_err(|e| e.to_string())?;
            return Err(format!("{decision:?} is not legal for {AGENT} now"));
        }
        self.game
            .play_index(AGENT, action)
            .map(|_| ())
            .map_err(|e| e.to_string())
    }

    fn play_opponents(&mut self) -> Result<()> {
        while !self.game.is_finished() {
            let Some(player) = self.game.next_player().map(str::to_string) else {
                break;
            };
            if player == AGENT {
                break;
            }
            let legal = self.game.get_action_mask(&player).legal_indices();
            let action = self.opponent_rng.pick(&legal).ok_or_else(|| {
                GameError::InvariantViolation(format!("{player} has no legal action"))
            })?;
            self.game.play_index(&player, action)?;
        }
        Ok(())
    }

    fn info(&self, error: Option<String>) -> StepInfo {
        StepInfo {
            mask: self.action_mask(),
            error,
        }
    }

    fn outcome(&self, reward: f32, error: Option<String>) -> StepOutcome {
        StepOutcome {
            obs: self.observation(),
            reward,
            terminated: self.game.is_finished() || self.aborted,
            truncated: false,
            info: self.info(error),
        }
    }
}

fn deal(seed: u64) -> Result<(Game, GameRng)> {
    let game = Game::start_game(&[AGENT, OPPONENT], 0, DiceRoller::new(seed))?;
    let opponent_rng = GameRng::new(seed).for_context("opponent");
    Ok((game, opponent_rng))
}
