//! Player actions and the discrete action space.
//!
//! An `Action` is what the engine executes: the acting player plus exactly
//! one `ActionKind`. A roll carries the die that was rolled, so replaying a
//! recorded action is deterministic.
//!
//! A `Decision` is what an agent chooses: the same six kinds, but a roll is
//! just "roll", since the die is drawn afterwards. Decisions map one-to-one
//! onto the 48 integer slots:
//!
//! | Index | Decision |
//! |---|---|
//! | 0 | roll dice |
//! | 1–5 | leg bet on blue, yellow, green, purple, red |
//! | 6–10 | game-winner bet, same colour order |
//! | 11–15 | game-loser bet, same colour order |
//! | 16–31 | cheering tile at position `index - 15` |
//! | 32–47 | booing tile at position `index - 31` |

use serde::{Deserialize, Serialize};

use crate::core::{Color, ACTION_SPACE_SIZE, BOARD_SIZE};
use crate::dice::Dice;
use crate::error::InvalidMove;

const LEG_BET_BASE: usize = 1;
const GAME_WINNER_BASE: usize = LEG_BET_BASE + 5;
const GAME_LOSER_BASE: usize = GAME_WINNER_BASE + 5;
const CHEERING_BASE: usize = GAME_LOSER_BASE + 5;
const BOOING_BASE: usize = CHEERING_BASE + BOARD_SIZE as usize;

/// Tile kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    /// Pushes a landing camel one tile further along its direction of travel.
    Cheering,
    /// Pushes a landing camel one tile back and slips it under the stack.
    Booing,
}

/// What an action does.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    RollDice(Dice),
    PlaceTile { position: u8, kind: TileKind },
    LegBet(Color),
    GameWinnerBet(Color),
    GameLoserBet(Color),
}

/// A complete action: who acts, and what they do.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    pub player: String,
    pub kind: ActionKind,
}

impl Action {
    /// Create an action.
    pub fn new(player: impl Into<String>, kind: ActionKind) -> Self {
        Self {
            player: player.into(),
            kind,
        }
    }

    /// Roll a specific die.
    pub fn roll(player: impl Into<String>, dice: Dice) -> Self {
        Self::new(player, ActionKind::RollDice(dice))
    }

    /// Place a cheering tile.
    pub fn cheer(player: impl Into<String>, position: u8) -> Self {
        Self::new(
            player,
            ActionKind::PlaceTile {
                position,
                kind: TileKind::Cheering,
            },
        )
    }

    /// Place a booing tile.
    pub fn boo(player: impl Into<String>, position: u8) -> Self {
        Self::new(
            player,
            ActionKind::PlaceTile {
                position,
                kind: TileKind::Booing,
            },
        )
    }

    /// Take the next leg-bet ticket on a camel.
    pub fn leg_bet(player: impl Into<String>, color: Color) -> Self {
        Self::new(player, ActionKind::LegBet(color))
    }

    /// Secretly bet on the overall winner.
    pub fn game_winner_bet(player: impl Into<String>, color: Color) -> Self {
        Self::new(player, ActionKind::GameWinnerBet(color))
    }

    /// Secretly bet on the overall loser.
    pub fn game_loser_bet(player: impl Into<String>, color: Color) -> Self {
        Self::new(player, ActionKind::GameLoserBet(color))
    }

    /// The decision this action realises.
    #[must_use]
    pub fn decision(&self) -> Decision {
        match &self.kind {
            ActionKind::RollDice(_) => Decision::RollDice,
            ActionKind::PlaceTile { position, kind } => Decision::PlaceTile {
                position: *position,
                kind: *kind,
            },
            ActionKind::LegBet(c) => Decision::LegBet(*c),
            ActionKind::GameWinnerBet(c) => Decision::GameWinnerBet(*c),
            ActionKind::GameLoserBet(c) => Decision::GameLoserBet(*c),
        }
    }

    /// Integer slot of this action.
    pub fn to_index(&self) -> Result<usize, InvalidMove> {
        self.decision().to_index()
    }
}

/// A choice in the discrete action space, before any die is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decision {
    RollDice,
    PlaceTile { position: u8, kind: TileKind },
    LegBet(Color),
    GameWinnerBet(Color),
    GameLoserBet(Color),
}

impl Decision {
    /// Decode an integer slot.
    ///
    /// ```
    /// use camelgo::action::{Decision, TileKind};
    /// use camelgo::core::Color;
    ///
    /// assert_eq!(Decision::from_index(0).unwrap(), Decision::RollDice);
    /// assert_eq!(Decision::from_index(5).unwrap(), Decision::LegBet(Color::Red));
    /// assert_eq!(
    ///     Decision::from_index(47).unwrap(),
    ///     Decision::PlaceTile { position: 16, kind: TileKind::Booing },
    /// );
    /// assert!(Decision::from_index(48).is_err());
    /// ```
    pub fn from_index(index: usize) -> Result<Self, InvalidMove> {
        let decision = match index {
            0 => Decision::RollDice,
            i if i < GAME_WINNER_BASE => Decision::LegBet(Color::RACING[i - LEG_BET_BASE]),
            i if i < GAME_LOSER_BASE => Decision::GameWinnerBet(Color::RACING[i - GAME_WINNER_BASE]),
            i if i < CHEERING_BASE => Decision::GameLoserBet(Color::RACING[i - GAME_LOSER_BASE]),
            i if i < BOOING_BASE => Decision::PlaceTile {
                position: (i - CHEERING_BASE + 1) as u8,
                kind: TileKind::Cheering,
            },
            i if i < ACTION_SPACE_SIZE => Decision::PlaceTile {
                position: (i - BOOING_BASE + 1) as u8,
                kind: TileKind::Booing,
            },
            i => return Err(InvalidMove::ActionOutOfRange(i)),
        };
        Ok(decision)
    }

    /// Encode as an integer slot.
    ///
    /// Fails for decisions with no slot: bets on a crazy camel, or a tile
    /// off the board.
    pub fn to_index(self) -> Result<usize, InvalidMove> {
        let racing = |color: Color| color.racing_index().ok_or(InvalidMove::NotRacingCamel(color));
        let tile = |position: u8| {
            if (1..=BOARD_SIZE).contains(&position) {
                Ok(position as usize - 1)
            } else {
                Err(InvalidMove::TileOutOfBounds {
                    position,
                    board_size: BOARD_SIZE,
                })
            }
        };

        match self {
            Decision::RollDice => Ok(0),
            Decision::LegBet(c) => Ok(LEG_BET_BASE + racing(c)?),
            Decision::GameWinnerBet(c) => Ok(GAME_WINNER_BASE + racing(c)?),
            Decision::GameLoserBet(c) => Ok(GAME_LOSER_BASE + racing(c)?),
            Decision::PlaceTile {
                position,
                kind: TileKind::Cheering,
            } => Ok(CHEERING_BASE + tile(position)?),
            Decision::PlaceTile {
                position,
                kind: TileKind::Booing,
            } => Ok(BOOING_BASE + tile(position)?),
        }
    }

    /// Turn a non-roll decision into an action. Rolls need a die and
    /// return `None`.
    #[must_use]
    pub fn into_action(self, player: impl Into<String>) -> Option<Action> {
        let kind = match self {
            Decision::RollDice => return None,
            Decision::PlaceTile { position, kind } => ActionKind::PlaceTile { position, kind },
            Decision::LegBet(c) => ActionKind::LegBet(c),
            Decision::GameWinnerBet(c) => ActionKind::GameWinnerBet(c),
            Decision::GameLoserBet(c) => ActionKind::GameLoserBet(c),
        };
        Some(Action::new(player, kind))
    }
}

/// Legality of every slot in the action space for one player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionMask {
    legal: Vec<bool>,
}

impl Default for ActionMask {
    fn default() -> Self {
        Self::all_legal()
    }
}

impl ActionMask {
    /// A mask with every slot legal.
    #[must_use]
    pub fn all_legal() -> Self {
        Self {
            legal: vec![true; ACTION_SPACE_SIZE],
        }
    }

    /// A mask with every slot illegal.
    #[must_use]
    pub fn none_legal() -> Self {
        Self {
            legal: vec![false; ACTION_SPACE_SIZE],
        }
    }

    /// Mark a decision illegal. Decisions with no slot are ignored.
    pub fn forbid(&mut self, decision: Decision) {
        if let Ok(index) = decision.to_index() {
            self.legal[index] = false;
        }
    }

    /// Check a slot. Out-of-range slots are illegal.
    #[must_use]
    pub fn is_legal(&self, index: usize) -> bool {
        self.legal.get(index).copied().unwrap_or(false)
    }

    /// Indices of all legal slots, ascending.
    #[must_use]
    pub fn legal_indices(&self) -> Vec<usize> {
        self.legal
            .iter()
            .enumerate()
            .filter_map(|(i, &ok)| ok.then_some(i))
            .collect()
    }

    /// Number of legal slots.
    #[must_use]
    pub fn legal_count(&self) -> usize {
        self.legal.iter().filter(|&&ok| ok).count()
    }

    /// Raw mask, one entry per slot.
    #[must_use]
    pub fn as_slice(&self) -> &[bool] {
        &self.legal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_slot_decodes_and_reencodes() {
        for index in 0..ACTION_SPACE_SIZE {
            let decision = Decision::from_index(index).unwrap();
            assert_eq!(decision.to_index().unwrap(), index);
        }
    }

    #[test]
    fn test_slot_boundaries() {
        assert_eq!(Decision::from_index(1).unwrap(), Decision::LegBet(Color::Blue));
        assert_eq!(Decision::from_index(6).unwrap(), Decision::GameWinnerBet(Color::Blue));
        assert_eq!(Decision::from_index(10).unwrap(), Decision::GameWinnerBet(Color::Red));
        assert_eq!(Decision::from_index(11).unwrap(), Decision::GameLoserBet(Color::Blue));
        assert_eq!(
            Decision::from_index(16).unwrap(),
            Decision::PlaceTile {
                position: 1,
                kind: TileKind::Cheering
            }
        );
        assert_eq!(
            Decision::from_index(31).unwrap(),
            Decision::PlaceTile {
                position: 16,
                kind: TileKind::Cheering
            }
        );
        assert_eq!(
            Decision::from_index(32).unwrap(),
            Decision::PlaceTile {
                position: 1,
                kind: TileKind::Booing
            }
        );
        assert_eq!(
            Decision::from_index(48),
            Err(InvalidMove::ActionOutOfRange(48))
        );
    }

    #[test]
    fn test_unencodable_decisions() {
        assert_eq!(
            Decision::LegBet(Color::White).to_index(),
            Err(InvalidMove::NotRacingCamel(Color::White))
        );
        assert!(Decision::PlaceTile {
            position: 0,
            kind: TileKind::Booing
        }
        .to_index()
        .is_err());
    }

    #[test]
    fn test_action_constructors() {
        let dice = Dice::new(Color::Red, 3).unwrap();
        let roll = Action::roll("Alice", dice);
        assert_eq!(roll.decision(), Decision::RollDice);
        assert_eq!(roll.to_index().unwrap(), 0);

        assert_eq!(Action::leg_bet("Bob", Color::Yellow).to_index().unwrap(), 2);
        assert_eq!(Action::game_winner_bet("Bob", Color::Green).to_index().unwrap(), 8);
        assert_eq!(Action::game_loser_bet("Bob", Color::Purple).to_index().unwrap(), 14);
        assert_eq!(Action::cheer("Bob", 4).to_index().unwrap(), 19);
        assert_eq!(Action::boo("Bob", 4).to_index().unwrap(), 35);
    }

    #[test]
    fn test_into_action() {
        assert!(Decision::RollDice.into_action("Alice").is_none());

        let action = Decision::LegBet(Color::Red).into_action("Alice").unwrap();
        assert_eq!(action, Action::leg_bet("Alice", Color::Red));
    }

    #[test]
    fn test_mask() {
        let mut mask = ActionMask::all_legal();
        assert_eq!(mask.legal_count(), ACTION_SPACE_SIZE);

        mask.forbid(Decision::LegBet(Color::Blue));
        mask.forbid(Decision::LegBet(Color::White));

        assert!(!mask.is_legal(1));
        assert!(mask.is_legal(0));
        assert!(!mask.is_legal(ACTION_SPACE_SIZE));
        assert_eq!(mask.legal_count(), ACTION_SPACE_SIZE - 1);
        assert_eq!(mask.legal_indices()[..2], [0, 2]);
    }

    #[test]
    fn test_action_serialization() {
        let action = Action::boo("Alice", 7);
        let json = serde_json::to_string(&action).unwrap();
        let deserialized: Action = serde_json::from_str(&json).unwrap();

        assert_eq!(action, deserialized);
    }
}
