//! Dice and the per-leg dice roller.
//!
//! ## Draw sequence
//!
//! Seeded reproducibility depends on the exact order of draws, so it is
//! part of the contract. `DiceRoller::roll` performs:
//!
//! 1. Collect the unrolled die slots in `DieColor::ALL` order
//!    (red, blue, green, yellow, purple, grey).
//! 2. Choose one uniformly.
//! 3. Grey only: draw a uniform index into `[White, Black]`.
//! 4. Draw a uniform index into the faces `[1, 2, 3]`.
//!
//! `DiceRoller::roll_grey_counterpart` draws only step 4.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{Color, DieColor, GameRng, GameRngState, DICE_FACES};
use crate::error::{GameError, InvalidMove, Result};

/// A rolled die: the camel it moves and the number shown.
///
/// For the grey die, `color` is the face colour (White or Black).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "DiceRepr")]
pub struct Dice {
    color: Color,
    number: u8,
}

/// Unchecked wire form; decoding goes through `Dice::new`.
#[derive(Deserialize)]
struct DiceRepr {
    color: Color,
    number: u8,
}

impl TryFrom<DiceRepr> for Dice {
    type Error = InvalidMove;

    fn try_from(repr: DiceRepr) -> std::result::Result<Self, Self::Error> {
        Dice::new(repr.color, repr.number)
    }
}

impl Dice {
    /// Create a die result. `number` must be 1, 2 or 3.
    pub fn new(color: Color, number: u8) -> std::result::Result<Self, InvalidMove> {
        if !DICE_FACES.contains(&number) {
            return Err(InvalidMove::DiceNumber(number));
        }
        Ok(Self { color, number })
    }

    /// The camel this die moves.
    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// The number shown.
    #[must_use]
    pub fn number(&self) -> u8 {
        self.number
    }

    /// The die slot this result came from.
    #[must_use]
    pub fn die(&self) -> DieColor {
        self.color.die()
    }
}

/// Rolls dice for one leg at a time, never repeating a slot within a leg.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(into = "DiceRollerState", from = "DiceRollerState")]
pub struct DiceRoller {
    rng: GameRng,
    rolled: Vector<Dice>,
}

impl Default for DiceRoller {
    fn default() -> Self {
        Self::new(42)
    }
}

impl DiceRoller {
    /// Create a roller with a seeded RNG and no dice rolled.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
            rolled: Vector::new(),
        }
    }

    /// Roll a random die among the slots not yet rolled this leg.
    pub fn roll(&mut self) -> Result<Dice> {
        let dice = self.draw()?;
        self.rolled.push_back(dice);
        Ok(dice)
    }

    /// Draw a die the way `roll` does without recording it.
    ///
    /// The RNG advances but the slot stays open until the die is recorded
    /// with `roll_specific`.
    pub fn draw(&mut self) -> Result<Dice> {
        let remaining = self.remaining_colors();
        let die = self.rng.pick(&remaining).ok_or(GameError::DiceExhausted)?;
        let color = match die.camel() {
            Some(color) => color,
            None => self.rng.pick(&Color::CRAZY).unwrap_or(Color::CRAZY[0]),
        };
        let dice = Dice {
            color,
            number: self.draw_face(),
        };

        tracing::trace!(color = %dice.color, number = dice.number, "drew die");
        Ok(dice)
    }

    /// Record an externally chosen die (tests, replays, physical dice).
    ///
    /// Fails if that slot has already rolled this leg.
    pub fn roll_specific(&mut self, dice: Dice) -> Result<Dice> {
        if self.has_rolled(dice.die()) {
            return Err(InvalidMove::DieAlreadyRolled(dice.die()).into());
        }
        self.rolled.push_back(dice);
        Ok(dice)
    }

    /// Roll the second crazy-camel die during setup.
    ///
    /// There is one grey die but two crazy camels, so setup pairs the first
    /// grey result with a second value for the other half. The result is not
    /// recorded: setup resets the roller afterwards.
    pub fn roll_grey_counterpart(&mut self) -> Result<Dice> {
        let first = self
            .rolled
            .iter()
            .find(|d| d.die() == DieColor::Grey)
            .copied()
            .ok_or(InvalidMove::NoGreyDie)?;
        Ok(Dice {
            color: first.color.crazy_counterpart(),
            number: self.draw_face(),
        })
    }

    /// Forget all dice rolled this leg.
    pub fn reset(&mut self) {
        self.rolled.clear();
    }

    /// Die slots not yet rolled this leg, in draw order.
    #[must_use]
    pub fn remaining_colors(&self) -> Vec<DieColor> {
        DieColor::ALL
            .iter()
            .copied()
            .filter(|&die| !self.has_rolled(die))
            .collect()
    }

    /// Check whether a slot has rolled this leg.
    #[must_use]
    pub fn has_rolled(&self, die: DieColor) -> bool {
        self.rolled.iter().any(|d| d.die() == die)
    }

    /// Dice rolled this leg, in roll order.
    #[must_use]
    pub fn rolled(&self) -> &Vector<Dice> {
        &self.rolled
    }

    fn draw_face(&mut self) -> u8 {
        // DICE_FACES is never empty.
        self.rng.pick(&DICE_FACES).unwrap_or(DICE_FACES[0])
    }
}

/// Wire form of a `DiceRoller`: the RNG position plus this leg's dice.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DiceRollerState {
    pub rng: GameRngState,
    pub rolled: Vector<Dice>,
}

impl From<DiceRoller> for DiceRollerState {
    fn from(roller: DiceRoller) -> Self {
        Self {
            rng: roller.rng.state(),
            rolled: roller.rolled,
        }
    }
}

impl From<DiceRollerState> for DiceRoller {
    fn from(state: DiceRollerState) -> Self {
        Self {
            rng: GameRng::from_state(&state.rng),
            rolled: state.rolled,
        }
    }
}
