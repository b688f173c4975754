//! Observation encoding for learning agents.
//!
//! Transforms a `Game` into a flat feature vector from one player's seat.
//! Only public information and the player's own secret bets are encoded.

use serde::{Deserialize, Serialize};

use crate::action::TileKind;
use crate::core::{Color, DieColor, ACTION_SPACE_SIZE, BOARD_SIZE};
use crate::game::Game;

/// Encoded observation as a flat tensor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EncodedState {
    /// Flattened tensor data (row-major order).
    pub tensor: Vec<f32>,

    /// Shape of the tensor.
    pub shape: Vec<usize>,
}

impl EncodedState {
    /// Create a new encoded state.
    pub fn new(tensor: Vec<f32>, shape: Vec<usize>) -> Self {
        debug_assert_eq!(
            tensor.len(),
            shape.iter().product::<usize>(),
            "Tensor length must match shape product"
        );
        Self { tensor, shape }
    }

    /// Get the total number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tensor.len()
    }

    /// Check if the tensor is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tensor.is_empty()
    }

    /// Get element at a flat index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<f32> {
        self.tensor.get(index).copied()
    }
}

/// Encodes game state into tensors for agent input.
pub trait StateEncoder: Send + Sync {
    /// Encode the game from `perspective`'s seat.
    ///
    /// Other players' game winner/loser bets must stay hidden.
    fn encode(&self, game: &Game, perspective: &str) -> EncodedState;

    /// Get the shape of encoded states.
    fn output_shape(&self) -> Vec<usize>;

    /// Get the total number of possible actions.
    fn action_space_size(&self) -> usize {
        ACTION_SPACE_SIZE
    }
}

const BOARD: usize = BOARD_SIZE as usize;
const STACK_HEIGHT: usize = Color::ALL.len();
const CAMEL_FEATURES: usize = BOARD + STACK_HEIGHT;
const TICKET_SLOTS: usize = 4;
const TILE_SLOTS: usize = 3;

/// Offsets of each block in the observation vector.
pub mod layout {
    use super::*;

    /// 7 camels × (16 tile one-hot + 7 stack-height one-hot).
    pub const CAMELS: usize = 0;
    /// One flag per die slot still to roll, in `DieColor::ALL` order.
    pub const DICE: usize = CAMELS + Color::ALL.len() * CAMEL_FEATURES;
    /// 5 racing camels × next ticket one-hot {none, 2, 3, 5}.
    pub const TICKETS: usize = DICE + DieColor::ALL.len();
    /// 16 tiles × {empty, cheering, booing}.
    pub const TILES: usize = TICKETS + Color::RACING.len() * TICKET_SLOTS;
    /// Points / 50, held ticket value / 12 per camel, winner flags, loser flags.
    pub const AGENT: usize = TILES + BOARD * TILE_SLOTS;
    /// Total winner bets / 2, total loser bets / 2.
    pub const GLOBAL: usize = AGENT + 1 + 3 * Color::RACING.len();
    /// Length of the whole vector.
    pub const TOTAL: usize = GLOBAL + 2;
}

/// Number of features produced by `ObservationEncoder`.
pub const OBSERVATION_DIM: usize = layout::TOTAL;

/// Flat 253-feature encoder.
///
/// Finished camels (beyond the last tile) have an all-zero tile one-hot.
/// Ticket values other than 2, 3 and 5 fall into the slot of the largest
/// of those not above them.
#[derive(Clone, Debug)]
pub struct ObservationEncoder {
    max_points: f32,
    max_ticket_value: f32,
    max_game_bets: f32,
}

impl Default for ObservationEncoder {
    fn default() -> Self {
        Self {
            max_points: 50.0,
            max_ticket_value: 12.0,
            max_game_bets: 2.0,
        }
    }
}

impl ObservationEncoder {
    /// Create an encoder with the standard normalizers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the divisor for the player's points.
    pub fn with_max_points(mut self, max_points: f32) -> Self {
        self.max_points = max_points;
        self
    }

    /// Set the divisor for the global game-bet counts.
    pub fn with_max_game_bets(mut self, max_game_bets: f32) -> Self {
        self.max_game_bets = max_game_bets;
        self
    }
}

impl StateEncoder for ObservationEncoder {
    fn encode(&self, game: &Game, perspective: &str) -> EncodedState {
        let mut tensor = vec![0.0f32; OBSERVATION_DIM];
        let leg = game.current_leg();
        let track = leg.track();

        for (i, color) in Color::ALL.iter().enumerate() {
            let Some(camel) = track.get(*color) else {
                continue;
            };
            let base = layout::CAMELS + i * CAMEL_FEATURES;
            if (1..=BOARD_SIZE).contains(&camel.track_pos) {
                tensor[base + usize::from(camel.track_pos) - 1] = 1.0;
            }
            if usize::from(camel.stack_pos) < STACK_HEIGHT {
                tensor[base + BOARD + usize::from(camel.stack_pos)] = 1.0;
            }
        }

        let remaining = game.dice_roller().remaining_colors();
        for (i, die) in DieColor::ALL.iter().enumerate() {
            if remaining.contains(die) {
                tensor[layout::DICE + i] = 1.0;
            }
        }

        for (i, color) in Color::RACING.iter().enumerate() {
            let next = track.get(*color).and_then(|c| c.available_bets.first().copied());
            let slot = match next {
                None => 0,
                Some(v) if v >= 5 => 3,
                Some(v) if v >= 3 => 2,
                Some(_) => 1,
            };
            tensor[layout::TICKETS + i * TICKET_SLOTS + slot] = 1.0;
        }

        for position in 1..=BOARD_SIZE {
            let slot = match leg.tile_at(position) {
                None => 0,
                Some(TileKind::Cheering) => 1,
                Some(TileKind::Booing) => 2,
            };
            tensor[layout::TILES + (usize::from(position) - 1) * TILE_SLOTS + slot] = 1.0;
        }

        let points = game.players().get(perspective).map_or(0, |p| p.points);
        tensor[layout::AGENT] = points as f32 / self.max_points;
        let racing = Color::RACING.len();
        for (i, color) in Color::RACING.iter().enumerate() {
            let held: u32 = leg
                .player_bets(perspective, *color)
                .iter()
                .map(|&t| u32::from(t))
                .sum();
            tensor[layout::AGENT + 1 + i] = held as f32 / self.max_ticket_value;
            if game.has_game_winner_bet(perspective, *color) {
                tensor[layout::AGENT + 1 + racing + i] = 1.0;
            }
            if game.has_game_loser_bet(perspective, *color) {
                tensor[layout::AGENT + 1 + 2 * racing + i] = 1.0;
            }
        }

        let (winners, losers) = game.game_bet_counts();
        tensor[layout::GLOBAL] = winners as f32 / self.max_game_bets;
        tensor[layout::GLOBAL + 1] = losers as f32 / self.max_game_bets;

        EncodedState::new(tensor, vec![OBSERVATION_DIM])
    }

    fn output_shape(&self) -> Vec<usize> {
        vec![OBSERVATION_DIM]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use crate::core::GameConfig;
    use crate::dice::{Dice, DiceRoller};
    use crate::track::{Camel, Track};

    fn game() -> Game {
        let track = Track::new([
            Camel::new(Color::Blue, 1, 0),
            Camel::new(Color::Yellow, 1, 1),
            Camel::new(Color::Green, 3, 0),
            Camel::new(Color::Purple, 5, 0),
            Camel::new(Color::Red, 7, 0),
            Camel::new(Color::White, 16, 0),
            Camel::new(Color::Black, 14, 0),
        ]);
        Game::from_track(
            GameConfig::default(),
            &["Agent", "Opponent"],
            0,
            track,
            DiceRoller::new(1),
        )
        .unwrap()
    }

    fn block(state: &EncodedState, start: usize, len: usize) -> Vec<f32> {
        state.tensor[start..start + len].to_vec()
    }

    #[test]
    fn test_dimension() {
        assert_eq!(OBSERVATION_DIM, 253);
        let encoder = ObservationEncoder::new();
        let state = encoder.encode(&game(), "Agent");

        assert_eq!(state.len(), 253);
        assert_eq!(state.shape, vec![253]);
        assert_eq!(encoder.output_shape(), vec![253]);
        assert_eq!(encoder.action_space_size(), 48);
    }

    #[test]
    fn test_camel_blocks() {
        let state = ObservationEncoder::new().encode(&game(), "Agent");

        // Yellow: tile 1, stack 1.
        let yellow = block(&state, layout::CAMELS + CAMEL_FEATURES, CAMEL_FEATURES);
        assert_eq!(yellow[0], 1.0);
        assert_eq!(yellow[BOARD + 1], 1.0);
        assert_eq!(yellow.iter().sum::<f32>(), 2.0);

        // Black is last in camel order: tile 14, stack 0.
        let black = block(&state, layout::CAMELS + 6 * CAMEL_FEATURES, CAMEL_FEATURES);
        assert_eq!(black[13], 1.0);
        assert_eq!(black[BOARD], 1.0);
    }

    #[test]
    fn test_dice_tickets_and_tiles() {
        let mut game = game();
        game.play_action(&Action::leg_bet("Agent", Color::Red)).unwrap();
        game.play_action(&Action::boo("Opponent", 10)).unwrap();
        game.play_action(&Action::roll("Agent", Dice::new(Color::Green, 1).unwrap()))
            .unwrap();

        let state = ObservationEncoder::new().encode(&game, "Agent");

        // Dice order: red, blue, green, yellow, purple, grey.
        assert_eq!(block(&state, layout::DICE, 6), vec![1.0, 1.0, 0.0, 1.0, 1.0, 1.0]);

        // Red is racing index 4; its next ticket is 3.
        let red = block(&state, layout::TICKETS + 4 * TICKET_SLOTS, TICKET_SLOTS);
        assert_eq!(red, vec![0.0, 0.0, 1.0, 0.0]);
        let blue = block(&state, layout::TICKETS, TICKET_SLOTS);
        assert_eq!(blue, vec![0.0, 0.0, 0.0, 1.0]);

        let tile_10 = block(&state, layout::TILES + 9 * TILE_SLOTS, TILE_SLOTS);
        assert_eq!(tile_10, vec![0.0, 0.0, 1.0]);
        let tile_9 = block(&state, layout::TILES + 8 * TILE_SLOTS, TILE_SLOTS);
        assert_eq!(tile_9, vec![1.0, 0.0, 0.0]);

        assert_eq!(state.get(layout::AGENT + 1 + 4), Some(5.0 / 12.0));
    }

    #[test]
    fn test_hidden_bets_only_from_own_seat() {
        let mut game = game();
        game.play_action(&Action::game_winner_bet("Agent", Color::Green)).unwrap();
        game.play_action(&Action::game_loser_bet("Opponent", Color::Blue)).unwrap();

        let encoder = ObservationEncoder::new();
        let agent = encoder.encode(&game, "Agent");
        let opponent = encoder.encode(&game, "Opponent");

        // Green is racing index 2.
        assert_eq!(agent.get(layout::AGENT + 1 + 5 + 2), Some(1.0));
        assert_eq!(agent.get(layout::AGENT + 1 + 10), Some(0.0));
        assert_eq!(opponent.get(layout::AGENT + 1 + 5 + 2), Some(0.0));
        assert_eq!(opponent.get(layout::AGENT + 1 + 10), Some(1.0));

        for state in [&agent, &opponent] {
            assert_eq!(state.get(layout::GLOBAL), Some(0.5));
            assert_eq!(state.get(layout::GLOBAL + 1), Some(0.5));
        }
        assert_eq!(agent.get(layout::AGENT), Some(3.0 / 50.0));
    }
}
