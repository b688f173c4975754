//! Camels on the track.
//!
//! ## Camel
//!
//! Position (`track_pos`, 1..=16, beyond 16 once finished), place in its
//! tile's stack (`stack_pos`, 0 = bottom) and the per-leg state: remaining
//! leg-bet tickets and whether it has rolled.
//!
//! ## Track
//!
//! All camels of a game, keyed by colour. Stacks are not stored: a stack is
//! the set of camels sharing a `track_pos`, ordered by `stack_pos`. The
//! track invariant is that every stack occupies `0..len` with no gaps.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Color, GameConfig, TicketQueue, BOARD_SIZE};
use crate::error::{GameError, InvalidMove, Result};

/// One camel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Camel {
    pub color: Color,
    pub track_pos: u8,
    pub stack_pos: u8,
    /// Leg-bet tickets still available, handed out front to back.
    pub available_bets: TicketQueue,
    /// Value rolled this leg, `None` until the camel's die comes up.
    pub dice_value: Option<u8>,
    pub finished: bool,
}

impl Camel {
    /// Create a camel with the standard tickets.
    #[must_use]
    pub fn new(color: Color, track_pos: u8, stack_pos: u8) -> Self {
        Self::with_tickets(color, track_pos, stack_pos, &GameConfig::default().leg_bet_values)
    }

    /// Create a camel with a specific ticket queue.
    #[must_use]
    pub fn with_tickets(color: Color, track_pos: u8, stack_pos: u8, tickets: &TicketQueue) -> Self {
        Self {
            color,
            track_pos,
            stack_pos,
            available_bets: tickets.clone(),
            dice_value: None,
            finished: track_pos > BOARD_SIZE,
        }
    }

    /// Check if this camel moves backward.
    #[must_use]
    pub fn is_crazy(&self) -> bool {
        self.color.is_crazy()
    }

    /// Place the camel. `track_pos` is normalized first (see
    /// `normalize_track_pos`); passing the board edge marks it finished.
    pub fn move_to(&mut self, track_pos: i16, stack_pos: u8) {
        self.track_pos = normalize_track_pos(track_pos);
        self.finished = self.track_pos > BOARD_SIZE;
        self.stack_pos = stack_pos;
    }

    /// Hand out the next ticket.
    pub fn take_ticket(&mut self) -> std::result::Result<u8, InvalidMove> {
        if self.available_bets.is_empty() {
            return Err(InvalidMove::NoBetsLeft(self.color));
        }
        Ok(self.available_bets.remove(0))
    }

    /// Record this leg's roll.
    pub fn dice_rolled(&mut self, value: u8) {
        self.dice_value = Some(value);
    }

    /// Restore tickets and clear the roll. Position is untouched.
    pub fn reset_for_new_leg(&mut self, tickets: &TicketQueue) {
        self.available_bets = tickets.clone();
        self.dice_value = None;
    }
}

/// Map a raw destination onto the board.
///
/// Positions past the last tile are kept as the finish signal. A crazy camel
/// pushed below tile 1 re-enters on the last tile.
#[must_use]
pub fn normalize_track_pos(track_pos: i16) -> u8 {
    if track_pos < 1 {
        BOARD_SIZE
    } else {
        u8::try_from(track_pos).unwrap_or(u8::MAX)
    }
}

/// All camels, keyed by colour.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Track {
    camels: BTreeMap<Color, Camel>,
}

impl Track {
    /// Build a track from camels. A later camel of the same colour replaces
    /// an earlier one.
    pub fn new(camels: impl IntoIterator<Item = Camel>) -> Self {
        Self {
            camels: camels.into_iter().map(|c| (c.color, c)).collect(),
        }
    }

    /// Number of camels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.camels.len()
    }

    /// Check if there are no camels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.camels.is_empty()
    }

    /// Get a camel.
    #[must_use]
    pub fn get(&self, color: Color) -> Option<&Camel> {
        self.camels.get(&color)
    }

    /// Get a camel mutably.
    pub fn get_mut(&mut self, color: Color) -> Option<&mut Camel> {
        self.camels.get_mut(&color)
    }

    /// Check if a camel of this colour is on the track.
    #[must_use]
    pub fn contains(&self, color: Color) -> bool {
        self.camels.contains_key(&color)
    }

    /// Iterate camels in colour order.
    pub fn iter(&self) -> impl Iterator<Item = &Camel> {
        self.camels.values()
    }

    /// Iterate camels mutably in colour order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Camel> {
        self.camels.values_mut()
    }

    /// Check if any camel stands on a tile.
    #[must_use]
    pub fn is_occupied(&self, track_pos: u8) -> bool {
        self.camels.values().any(|c| c.track_pos == track_pos)
    }

    /// Camels on a tile, bottom to top.
    #[must_use]
    pub fn stack_at(&self, track_pos: u8) -> Vec<Color> {
        let mut stack: SmallVec<[&Camel; 7]> = self
            .camels
            .values()
            .filter(|c| c.track_pos == track_pos)
            .collect();
        stack.sort_by_key(|c| c.stack_pos);
        stack.iter().map(|c| c.color).collect()
    }

    /// Racing camels from leader to last: highest tile first, then highest
    /// in the stack. Crazy camels are never ranked.
    pub fn ranking(&self) -> Result<Vec<Color>> {
        let mut racing: Vec<&Camel> = self.camels.values().filter(|c| !c.is_crazy()).collect();
        if racing.is_empty() {
            return Err(GameError::InvariantViolation(
                "no racing camels to rank".to_string(),
            ));
        }
        racing.sort_by(|a, b| (b.track_pos, b.stack_pos).cmp(&(a.track_pos, a.stack_pos)));
        Ok(racing.iter().map(|c| c.color).collect())
    }

    /// 1-based rank of a racing camel.
    pub fn rank_of(&self, color: Color) -> Result<usize> {
        self.ranking()?
            .iter()
            .position(|&c| c == color)
            .map(|i| i + 1)
            .ok_or_else(|| GameError::InvariantViolation(format!("camel {color} is not ranked")))
    }

    /// The leading racing camel.
    pub fn first(&self) -> Result<Color> {
        self.ranking().map(|r| r[0])
    }

    /// The trailing racing camel.
    pub fn last(&self) -> Result<Color> {
        self.ranking().map(|r| r[r.len() - 1])
    }

    /// Check that every stack is contiguous from 0.
    pub fn validate(&self) -> Result<()> {
        let mut heights: BTreeMap<u8, Vec<u8>> = BTreeMap::new();
        for camel in self.camels.values() {
            heights.entry(camel.track_pos).or_default().push(camel.stack_pos);
        }
        for (track_pos, mut stack) in heights {
            stack.sort_unstable();
            let contiguous = stack.iter().enumerate().all(|(i, &s)| usize::from(s) == i);
            if !contiguous {
                return Err(GameError::InvariantViolation(format!(
                    "stack at tile {track_pos} is not contiguous: {stack:?}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_basic() {
        let camel = Camel::new(Color::Blue, 1, 0);
        assert_eq!(camel.track_pos, 1);
        assert_eq!(camel.stack_pos, 0);
        assert_eq!(camel.available_bets.as_slice(), &[5, 3, 2, 2]);
        assert_eq!(camel.dice_value, None);
        assert!(!camel.finished);
        assert!(!camel.is_crazy());
    }

    #[test]
    fn test_camel_move() {
        let mut camel = Camel::new(Color::Red, 2, 1);
        camel.move_to(5, 2);
        assert_eq!(camel.track_pos, 5);
        assert_eq!(camel.stack_pos, 2);
    }

    #[test]
    fn test_camel_move_past_finish() {
        let mut camel = Camel::new(Color::Blue, 15, 0);
        camel.move_to(20, 0);
        assert_eq!(camel.track_pos, 20);
        assert!(camel.finished);
    }

    #[test]
    fn test_camel_move_below_one() {
        let mut camel = Camel::new(Color::White, 2, 0);
        camel.move_to(0, 0);
        assert_eq!(camel.track_pos, BOARD_SIZE);
        assert!(!camel.finished);
    }

    #[test]
    fn test_take_tickets_in_order() {
        let mut camel = Camel::new(Color::Red, 2, 1);
        let taken: Vec<_> = (0..4).map(|_| camel.take_ticket().unwrap()).collect();

        assert_eq!(taken, vec![5, 3, 2, 2]);
        assert_eq!(camel.take_ticket(), Err(InvalidMove::NoBetsLeft(Color::Red)));
    }

    #[test]
    fn test_camel_reset() {
        let mut camel = Camel::new(Color::Green, 3, 0);
        camel.dice_rolled(2);
        camel.take_ticket().unwrap();
        camel.reset_for_new_leg(&GameConfig::default().leg_bet_values);

        assert_eq!(camel.available_bets.as_slice(), &[5, 3, 2, 2]);
        assert_eq!(camel.dice_value, None);
        assert_eq!(camel.track_pos, 3);
    }

    #[test]
    fn test_stack_at() {
        let track = Track::new([
            Camel::new(Color::Red, 3, 1),
            Camel::new(Color::Green, 3, 0),
            Camel::new(Color::Blue, 3, 2),
            Camel::new(Color::Purple, 5, 0),
        ]);

        assert_eq!(track.stack_at(3), vec![Color::Green, Color::Red, Color::Blue]);
        assert_eq!(track.stack_at(5), vec![Color::Purple]);
        assert!(track.stack_at(4).is_empty());
        assert!(track.is_occupied(5));
        assert!(!track.is_occupied(4));
    }

    #[test]
    fn test_ranking_ignores_crazy_camels() {
        let track = Track::new([
            Camel::new(Color::Blue, 2, 0),
            Camel::new(Color::Green, 4, 0),
            Camel::new(Color::Red, 4, 1),
            Camel::new(Color::White, 16, 0),
        ]);

        assert_eq!(
            track.ranking().unwrap(),
            vec![Color::Red, Color::Green, Color::Blue]
        );
        assert_eq!(track.first().unwrap(), Color::Red);
        assert_eq!(track.last().unwrap(), Color::Blue);
        assert_eq!(track.rank_of(Color::Green).unwrap(), 2);
        assert!(track.rank_of(Color::White).is_err());
    }

    #[test]
    fn test_ranking_without_racing_camels() {
        let track = Track::new([Camel::new(Color::Black, 10, 0)]);
        assert!(matches!(
            track.ranking(),
            Err(GameError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_validate() {
        let good = Track::new([Camel::new(Color::Red, 3, 0), Camel::new(Color::Blue, 3, 1)]);
        assert!(good.validate().is_ok());

        let gap = Track::new([Camel::new(Color::Red, 3, 0), Camel::new(Color::Blue, 3, 2)]);
        assert!(gap.validate().is_err());

        let floating = Track::new([Camel::new(Color::Red, 3, 1)]);
        assert!(floating.validate().is_err());
    }
}
