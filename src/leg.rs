//! One leg of the race.
//!
//! A leg owns the track plus everything that resets between legs: placed
//! tiles, points earned from rolling and tile ownership, and the leg-bet
//! ledger. Camel positions carry over from leg to leg.
//!
//! Every mutating operation validates first and mutates second, so a
//! failed call leaves the leg exactly as it was.

use std::collections::BTreeMap;

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::action::{Action, ActionKind, TileKind};
use crate::core::{Color, GameConfig, TicketQueue, BOARD_SIZE};
use crate::dice::Dice;
use crate::error::{GameError, InvalidMove, Result};
use crate::track::{normalize_track_pos, Track};

/// A tile on the track and the player who placed it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlacedTile {
    pub position: u8,
    pub player: String,
}

/// One player's leg bets: camels in the order first bet on, each with the
/// tickets taken. Scoring walks this order.
pub type BetBook = Vec<(Color, TicketQueue)>;

/// Per-leg state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leg {
    leg_number: u32,
    track: Track,
    cheering_tiles: Vector<PlacedTile>,
    booing_tiles: Vector<PlacedTile>,
    leg_points: BTreeMap<String, i32>,
    player_bets: BTreeMap<String, BetBook>,
    turn_order: Vec<String>,
    next_index: usize,
    leg_bet_values: TicketQueue,
}

/// What happened when a die was resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Camels that moved, bottom to top.
    pub moved: Vec<Color>,
    /// Tile the stack ended on.
    pub final_pos: u8,
    /// Whether a booing tile sent the stack underneath.
    pub booed: bool,
    /// Whether a camel crossed the finish.
    pub race_finished: bool,
}

impl Leg {
    /// Create the first leg.
    ///
    /// `turn_order` is the seating order; `first_player` indexes into it.
    pub fn new(track: Track, turn_order: Vec<String>, first_player: usize) -> Self {
        Self::with_config(&GameConfig::default(), track, turn_order, first_player)
    }

    /// Create the first leg with a specific configuration. Camel tickets are
    /// reset to the configured values.
    pub fn with_config(
        config: &GameConfig,
        mut track: Track,
        turn_order: Vec<String>,
        first_player: usize,
    ) -> Self {
        for camel in track.iter_mut() {
            camel.reset_for_new_leg(&config.leg_bet_values);
        }
        let next_index = if turn_order.is_empty() {
            0
        } else {
            first_player % turn_order.len()
        };
        Self {
            leg_number: 1,
            track,
            cheering_tiles: Vector::new(),
            booing_tiles: Vector::new(),
            leg_points: BTreeMap::new(),
            player_bets: BTreeMap::new(),
            turn_order,
            next_index,
            leg_bet_values: config.leg_bet_values.clone(),
        }
    }

    // === Accessors ===

    /// Which leg of the game this is (1-based).
    #[must_use]
    pub fn leg_number(&self) -> u32 {
        self.leg_number
    }

    /// The camels.
    #[must_use]
    pub fn track(&self) -> &Track {
        &self.track
    }

    /// Whose turn it is.
    #[must_use]
    pub fn next_player(&self) -> Option<&str> {
        self.turn_order.get(self.next_index).map(String::as_str)
    }

    /// Seating order.
    #[must_use]
    pub fn turn_order(&self) -> &[String] {
        &self.turn_order
    }

    /// Cheering tiles in placement order.
    #[must_use]
    pub fn cheering_tiles(&self) -> &Vector<PlacedTile> {
        &self.cheering_tiles
    }

    /// Booing tiles in placement order.
    #[must_use]
    pub fn booing_tiles(&self) -> &Vector<PlacedTile> {
        &self.booing_tiles
    }

    /// All tiles of both kinds.
    pub fn tiles(&self) -> impl Iterator<Item = (&PlacedTile, TileKind)> {
        self.cheering_tiles
            .iter()
            .map(|t| (t, TileKind::Cheering))
            .chain(self.booing_tiles.iter().map(|t| (t, TileKind::Booing)))
    }

    /// Kind of tile at a position, if any.
    #[must_use]
    pub fn tile_at(&self, position: u8) -> Option<TileKind> {
        self.tiles()
            .find(|(t, _)| t.position == position)
            .map(|(_, kind)| kind)
    }

    /// Check whether a player has a tile on the track this leg.
    #[must_use]
    pub fn has_placed_tile(&self, player: &str) -> bool {
        self.tiles().any(|(t, _)| t.player == player)
    }

    /// Points a player earned this leg from rolling and tiles.
    #[must_use]
    pub fn leg_points(&self, player: &str) -> i32 {
        self.leg_points.get(player).copied().unwrap_or(0)
    }

    /// Every player's leg points.
    #[must_use]
    pub fn all_leg_points(&self) -> &BTreeMap<String, i32> {
        &self.leg_points
    }

    /// Ticket values a player holds on a camel, in the order taken.
    #[must_use]
    pub fn player_bets(&self, player: &str, color: Color) -> &[u8] {
        self.bets_of(player)
            .find(|(c, _)| *c == color)
            .map(|(_, tickets)| tickets)
            .unwrap_or_default()
    }

    /// All of a player's leg bets, in the order the camels were first bet on.
    pub fn bets_of(&self, player: &str) -> impl Iterator<Item = (Color, &[u8])> {
        self.player_bets
            .get(player)
            .into_iter()
            .flat_map(|book| book.iter().map(|(c, t)| (*c, t.as_slice())))
    }

    /// Tickets taken on a camel this leg, across all players.
    #[must_use]
    pub fn bets_placed_on(&self, color: Color) -> usize {
        self.player_bets
            .values()
            .flat_map(|book| book.iter())
            .filter(|(c, _)| *c == color)
            .map(|(_, tickets)| tickets.len())
            .sum()
    }

    // === Actions ===

    /// Single entry point for leg-scoped actions.
    ///
    /// Dispatches to the matching operation and then passes the turn,
    /// whatever the action was. Game winner/loser bets are not leg-scoped.
    /// Returns whether the race finished.
    pub fn play_action(&mut self, action: &Action) -> Result<bool> {
        let finished = match &action.kind {
            ActionKind::RollDice(dice) => self.resolve_dice(dice, &action.player)?.race_finished,
            ActionKind::PlaceTile { position, kind } => {
                self.place_tile(*position, &action.player, *kind)?;
                false
            }
            ActionKind::LegBet(color) => {
                self.place_leg_bet(*color, &action.player)?;
                false
            }
            ActionKind::GameWinnerBet(_) | ActionKind::GameLoserBet(_) => {
                return Err(GameError::InvariantViolation(
                    "game bets are held by the game, not the leg".to_string(),
                ));
            }
        };
        self.move_to_next_player();
        Ok(finished)
    }

    /// Move the rolled camel and everything stacked on it.
    pub fn resolve_dice(&mut self, dice: &Dice, player: &str) -> Result<MoveOutcome> {
        let camel = self
            .track
            .get(dice.color())
            .ok_or(InvalidMove::UnknownCamel(dice.color()))?;
        if camel.dice_value.is_some() {
            return Err(InvalidMove::AlreadyRolled(dice.color()).into());
        }

        let direction = i16::from(dice.color().direction());
        let origin = camel.track_pos;
        let moving: Vec<Color> = self
            .track
            .stack_at(origin)
            .into_iter()
            .skip(usize::from(camel.stack_pos))
            .collect();

        let next_pos = i16::from(origin) + direction * i16::from(dice.number());
        let mut final_pos = next_pos;
        let mut tile_owner = None;
        let mut booed = false;
        match self.tile_on(next_pos) {
            Some((owner, TileKind::Cheering)) => {
                final_pos += direction;
                tile_owner = Some(owner);
            }
            Some((owner, TileKind::Booing)) => {
                final_pos -= direction;
                tile_owner = Some(owner);
                booed = true;
            }
            None => {}
        }
        let final_pos = normalize_track_pos(final_pos);
        let residents: Vec<Color> = self
            .track
            .stack_at(final_pos)
            .into_iter()
            .filter(|c| !moving.contains(c))
            .collect();

        // Validated: apply.
        *self.leg_points.entry(player.to_string()).or_insert(0) += 1;
        if let Some(owner) = tile_owner {
            *self.leg_points.entry(owner).or_insert(0) += 1;
        }

        let base = if booed || residents.is_empty() {
            0
        } else {
            residents.len()
        };
        for (i, color) in moving.iter().enumerate() {
            if let Some(c) = self.track.get_mut(*color) {
                c.move_to(i16::from(final_pos), (base + i) as u8);
            }
        }
        if booed {
            for (i, color) in residents.iter().enumerate() {
                if let Some(c) = self.track.get_mut(*color) {
                    c.stack_pos = (moving.len() + i) as u8;
                }
            }
        }
        if let Some(c) = self.track.get_mut(dice.color()) {
            c.dice_rolled(dice.number());
        }

        let race_finished = final_pos > BOARD_SIZE;
        tracing::trace!(
            camel = %dice.color(),
            number = dice.number(),
            from = origin,
            to = final_pos,
            stack = moving.len(),
            booed,
            "camel moved"
        );
        Ok(MoveOutcome {
            moved: moving,
            final_pos,
            booed,
            race_finished,
        })
    }

    /// Put a cheering or booing tile on the track.
    ///
    /// The tile must be on the board, off any camel, and not on or next to
    /// another tile of either kind.
    pub fn place_tile(&mut self, position: u8, player: &str, kind: TileKind) -> Result<()> {
        if !(1..=BOARD_SIZE).contains(&position) {
            return Err(InvalidMove::TileOutOfBounds {
                position,
                board_size: BOARD_SIZE,
            }
            .into());
        }
        if self.track.is_occupied(position) {
            return Err(InvalidMove::TileOnCamel(position).into());
        }
        if let Some((existing, _)) = self.tiles().find(|(t, _)| t.position.abs_diff(position) <= 1) {
            return Err(InvalidMove::TileTooClose(existing.position).into());
        }

        let tile = PlacedTile {
            position,
            player: player.to_string(),
        };
        match kind {
            TileKind::Cheering => self.cheering_tiles.push_back(tile),
            TileKind::Booing => self.booing_tiles.push_back(tile),
        }
        Ok(())
    }

    /// Take the next ticket on a camel. Returns the ticket value.
    pub fn place_leg_bet(&mut self, color: Color, player: &str) -> Result<u8> {
        let camel = self
            .track
            .get_mut(color)
            .ok_or(InvalidMove::UnknownCamel(color))?;
        if camel.is_crazy() {
            return Err(InvalidMove::NotRacingCamel(color).into());
        }
        let ticket = camel.take_ticket()?;
        let book = self.player_bets.entry(player.to_string()).or_default();
        match book.iter_mut().find(|(c, _)| *c == color) {
            Some((_, tickets)) => tickets.push(ticket),
            None => book.push((color, TicketQueue::from_slice(&[ticket]))),
        }
        Ok(ticket)
    }

    /// Pass the turn to the next seat.
    pub fn move_to_next_player(&mut self) {
        if !self.turn_order.is_empty() {
            self.next_index = (self.next_index + 1) % self.turn_order.len();
        }
    }

    /// Clear tiles, leg points and bets; restore tickets and dice.
    /// Camel positions are untouched.
    pub fn reset_leg(&mut self) {
        self.cheering_tiles.clear();
        self.booing_tiles.clear();
        self.leg_points.clear();
        self.player_bets.clear();
        for camel in self.track.iter_mut() {
            camel.reset_for_new_leg(&self.leg_bet_values);
        }
    }

    /// Start the next leg with `starting_player` to act.
    pub fn advance_to_next_leg(&mut self, starting_player: &str) -> Result<()> {
        let index = self
            .turn_order
            .iter()
            .position(|p| p == starting_player)
            .ok_or_else(|| InvalidMove::UnknownPlayer(starting_player.to_string()))?;
        self.reset_leg();
        self.leg_number += 1;
        self.next_index = index;
        Ok(())
    }

    fn tile_on(&self, position: i16) -> Option<(String, TileKind)> {
        self.tiles()
            .find(|(t, _)| i16::from(t.position) == position)
            .map(|(t, kind)| (t.player.clone(), kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::Camel;

    fn players() -> Vec<String> {
        vec!["Alice".to_string(), "Bob".to_string()]
    }

    fn leg_with(camels: impl IntoIterator<Item = Camel>) -> Leg {
        Leg::new(Track::new(camels), players(), 0)
    }

    fn roll(color: Color, number: u8) -> Dice {
        Dice::new(color, number).unwrap()
    }

    fn camels_on_different_tiles() -> Leg {
        leg_with(
            Color::ALL
                .iter()
                .enumerate()
                .map(|(i, &c)| Camel::new(c, i as u8 + 1, 0)),
        )
    }

    fn pos(leg: &Leg, color: Color) -> (u8, u8) {
        let camel = leg.track().get(color).unwrap();
        (camel.track_pos, camel.stack_pos)
    }

    #[test]
    fn test_leg_basic() {
        let leg = camels_on_different_tiles();
        assert_eq!(leg.leg_number(), 1);
        assert!(leg.cheering_tiles().is_empty());
        assert!(leg.booing_tiles().is_empty());
        assert!(leg.all_leg_points().is_empty());
        assert_eq!(leg.bets_of("Alice").count(), 0);
        assert_eq!(leg.next_player(), Some("Alice"));
    }

    #[test]
    fn test_move_single_camel_onto_another() {
        let mut leg = camels_on_different_tiles();
        let finished = leg.play_action(&Action::roll("Alice", roll(Color::Blue, 2))).unwrap();

        assert!(!finished);
        assert_eq!(leg.leg_points("Alice"), 1);
        assert_eq!(pos(&leg, Color::Blue), (3, 1));
        assert_eq!(pos(&leg, Color::Green), (3, 0));
        assert_eq!(leg.track().get(Color::Blue).unwrap().dice_value, Some(2));
    }

    #[test]
    fn test_move_carries_camels_above() {
        let mut leg = leg_with([
            Camel::new(Color::Red, 3, 0),
            Camel::new(Color::Green, 3, 1),
            Camel::new(Color::Purple, 5, 0),
        ]);
        leg.play_action(&Action::roll("Bob", roll(Color::Red, 2))).unwrap();

        assert_eq!(leg.leg_points("Bob"), 1);
        assert_eq!(pos(&leg, Color::Purple), (5, 0));
        assert_eq!(pos(&leg, Color::Red), (5, 1));
        assert_eq!(pos(&leg, Color::Green), (5, 2));
    }

    #[test]
    fn test_move_from_middle_leaves_bottom() {
        let mut leg = leg_with([
            Camel::new(Color::Red, 3, 0),
            Camel::new(Color::Green, 3, 1),
            Camel::new(Color::Blue, 3, 2),
        ]);
        let outcome = leg.resolve_dice(&roll(Color::Green, 1), "Alice").unwrap();

        assert_eq!(outcome.moved, vec![Color::Green, Color::Blue]);
        assert_eq!(pos(&leg, Color::Red), (3, 0));
        assert_eq!(pos(&leg, Color::Green), (4, 0));
        assert_eq!(pos(&leg, Color::Blue), (4, 1));
        assert!(leg.track().validate().is_ok());
    }

    #[test]
    fn test_crazy_camel_carries_racing_camel_backward() {
        let mut leg = leg_with([
            Camel::new(Color::Black, 4, 0),
            Camel::new(Color::Red, 4, 1),
            Camel::new(Color::Green, 2, 0),
        ]);
        let finished = leg.play_action(&Action::roll("Carol", roll(Color::Black, 2))).unwrap();

        assert!(!finished);
        assert_eq!(pos(&leg, Color::Green), (2, 0));
        assert_eq!(pos(&leg, Color::Black), (2, 1));
        assert_eq!(pos(&leg, Color::Red), (2, 2));
        assert_eq!(leg.leg_points("Carol"), 1);
    }

    #[test]
    fn test_cheering_tile_pushes_forward() {
        let mut leg = leg_with([Camel::new(Color::Blue, 1, 0), Camel::new(Color::Green, 3, 0)]);
        leg.play_action(&Action::cheer("Dave", 2)).unwrap();
        leg.play_action(&Action::roll("Alice", roll(Color::Blue, 1))).unwrap();

        assert_eq!(pos(&leg, Color::Blue), (3, 1));
        assert_eq!(leg.leg_points("Alice"), 1);
        assert_eq!(leg.leg_points("Dave"), 1);
    }

    #[test]
    fn test_booing_tile_pushes_back_and_under() {
        let mut leg = leg_with([Camel::new(Color::Blue, 1, 0), Camel::new(Color::Green, 2, 0)]);
        leg.play_action(&Action::boo("Eve", 3)).unwrap();
        let outcome = leg.resolve_dice(&roll(Color::Blue, 2), "Alice").unwrap();

        assert!(outcome.booed);
        assert_eq!(pos(&leg, Color::Blue), (2, 0));
        assert_eq!(pos(&leg, Color::Green), (2, 1));
        assert_eq!(leg.leg_points("Alice"), 1);
        assert_eq!(leg.leg_points("Eve"), 1);
    }

    #[test]
    fn test_crazy_camel_cheered_further_backward() {
        let mut leg = leg_with([Camel::new(Color::White, 5, 0), Camel::new(Color::Black, 3, 0)]);
        leg.play_action(&Action::cheer("Frank", 4)).unwrap();
        leg.play_action(&Action::roll("Alice", roll(Color::White, 1))).unwrap();

        assert_eq!(pos(&leg, Color::White), (3, 1));
        assert_eq!(pos(&leg, Color::Black), (3, 0));
        assert_eq!(leg.leg_points("Frank"), 1);
    }

    #[test]
    fn test_crazy_camel_booed_forward_and_under() {
        let mut leg = leg_with([Camel::new(Color::White, 5, 0), Camel::new(Color::Black, 3, 0)]);
        leg.play_action(&Action::boo("Grace", 2)).unwrap();
        leg.play_action(&Action::roll("Alice", roll(Color::White, 3))).unwrap();

        assert_eq!(pos(&leg, Color::White), (3, 0));
        assert_eq!(pos(&leg, Color::Black), (3, 1));
        assert_eq!(leg.leg_points("Grace"), 1);
    }

    #[test]
    fn test_boo_back_onto_own_tile() {
        // Green sits under blue; blue moves 1 onto a boo and lands back on 3,
        // under green.
        let mut leg = leg_with([Camel::new(Color::Green, 3, 0), Camel::new(Color::Blue, 3, 1)]);
        leg.place_tile(4, "Eve", TileKind::Booing).unwrap();
        leg.resolve_dice(&roll(Color::Blue, 1), "Alice").unwrap();

        assert_eq!(pos(&leg, Color::Blue), (3, 0));
        assert_eq!(pos(&leg, Color::Green), (3, 1));
        assert!(leg.track().validate().is_ok());
    }

    #[test]
    fn test_crazy_camel_below_start_reenters_at_end() {
        let mut leg = leg_with([
            Camel::new(Color::White, 2, 0),
            Camel::new(Color::Black, 16, 0),
        ]);
        leg.resolve_dice(&roll(Color::White, 3), "Alice").unwrap();

        assert_eq!(pos(&leg, Color::Black), (16, 0));
        assert_eq!(pos(&leg, Color::White), (16, 1));
        assert!(leg.track().validate().is_ok());
    }

    #[test]
    fn test_move_finishes_race() {
        let mut leg = leg_with([Camel::new(Color::Blue, 15, 0), Camel::new(Color::Green, 10, 0)]);
        let finished = leg.play_action(&Action::roll("Alice", roll(Color::Blue, 2))).unwrap();

        assert!(finished);
        let blue = leg.track().get(Color::Blue).unwrap();
        assert_eq!(blue.track_pos, 17);
        assert!(blue.finished);
        assert_eq!(leg.leg_points("Alice"), 1);
    }

    #[test]
    fn test_crazy_camel_carried_past_finish() {
        let mut leg = leg_with([
            Camel::new(Color::Blue, 15, 0),
            Camel::new(Color::White, 15, 1),
            Camel::new(Color::Green, 10, 0),
        ]);
        let finished = leg.play_action(&Action::roll("Alice", roll(Color::Blue, 2))).unwrap();

        assert!(finished);
        assert_eq!(pos(&leg, Color::Blue), (17, 0));
        assert_eq!(pos(&leg, Color::White), (17, 1));
        assert!(leg.track().get(Color::White).unwrap().finished);
        assert_eq!(leg.track().first().unwrap(), Color::Blue);
        leg.track().validate().unwrap();
    }

    #[test]
    fn test_same_camel_twice_fails_without_mutation() {
        let mut leg = camels_on_different_tiles();
        leg.play_action(&Action::roll("Alice", roll(Color::Blue, 2))).unwrap();
        let before = leg.clone();

        let err = leg
            .play_action(&Action::roll("Bob", roll(Color::Blue, 1)))
            .unwrap_err();

        assert_eq!(err.as_invalid_move(), Some(&InvalidMove::AlreadyRolled(Color::Blue)));
        assert_eq!(leg, before);
    }

    #[test]
    fn test_roll_unknown_camel() {
        let mut leg = leg_with([Camel::new(Color::Blue, 1, 0)]);
        let err = leg.resolve_dice(&roll(Color::Red, 1), "Alice").unwrap_err();
        assert_eq!(err.as_invalid_move(), Some(&InvalidMove::UnknownCamel(Color::Red)));
    }

    #[test]
    fn test_place_cheering_tile() {
        let mut leg = leg_with([Camel::new(Color::Blue, 1, 0)]);
        leg.play_action(&Action::cheer("Alice", 2)).unwrap();

        assert_eq!(
            leg.cheering_tiles()[0],
            PlacedTile {
                position: 2,
                player: "Alice".to_string()
            }
        );
        assert_eq!(leg.tile_at(2), Some(TileKind::Cheering));
        assert!(leg.has_placed_tile("Alice"));

        let err = leg.play_action(&Action::cheer("Bob", 1)).unwrap_err();
        assert_eq!(err.as_invalid_move(), Some(&InvalidMove::TileOnCamel(1)));

        let err = leg.play_action(&Action::cheer("Bob", 3)).unwrap_err();
        assert_eq!(err.as_invalid_move(), Some(&InvalidMove::TileTooClose(2)));
        assert_eq!(leg.cheering_tiles().len(), 1);
    }

    #[test]
    fn test_place_booing_tile() {
        let mut leg = leg_with([Camel::new(Color::Blue, 1, 0)]);
        leg.play_action(&Action::boo("Alice", 2)).unwrap();
        assert_eq!(leg.tile_at(2), Some(TileKind::Booing));

        assert!(leg.play_action(&Action::boo("Bob", 1)).is_err());
        assert!(leg.play_action(&Action::cheer("Bob", 3)).is_err());
        assert!(leg.play_action(&Action::cheer("Bob", 2)).is_err());
        assert_eq!(leg.booing_tiles().len(), 1);
        assert!(leg.cheering_tiles().is_empty());
    }

    #[test]
    fn test_tile_bounds() {
        let mut leg = leg_with([Camel::new(Color::Blue, 1, 0)]);
        for position in [0, BOARD_SIZE + 1] {
            let err = leg.place_tile(position, "Alice", TileKind::Cheering).unwrap_err();
            assert_eq!(
                err.as_invalid_move(),
                Some(&InvalidMove::TileOutOfBounds {
                    position,
                    board_size: BOARD_SIZE
                })
            );
        }
        leg.place_tile(BOARD_SIZE, "Alice", TileKind::Cheering).unwrap();
    }

    #[test]
    fn test_failed_action_keeps_turn() {
        let mut leg = leg_with([Camel::new(Color::Blue, 1, 0)]);
        assert!(leg.play_action(&Action::cheer("Alice", 1)).is_err());
        assert_eq!(leg.next_player(), Some("Alice"));

        leg.play_action(&Action::cheer("Alice", 5)).unwrap();
        assert_eq!(leg.next_player(), Some("Bob"));
        leg.play_action(&Action::leg_bet("Bob", Color::Blue)).unwrap();
        assert_eq!(leg.next_player(), Some("Alice"));
    }

    #[test]
    fn test_leg_bets() {
        let mut leg = leg_with([Camel::new(Color::Blue, 1, 0), Camel::new(Color::Green, 3, 0)]);
        leg.play_action(&Action::leg_bet("Alice", Color::Blue)).unwrap();

        assert_eq!(leg.player_bets("Alice", Color::Blue), &[5]);
        assert!(leg.player_bets("Alice", Color::Green).is_empty());
        assert!(leg.player_bets("Nobody", Color::Green).is_empty());

        let err = leg.play_action(&Action::leg_bet("Alice", Color::Red)).unwrap_err();
        assert_eq!(err.as_invalid_move(), Some(&InvalidMove::UnknownCamel(Color::Red)));
    }

    #[test]
    fn test_ticket_sequence_regardless_of_bettor() {
        let mut leg = leg_with([Camel::new(Color::Red, 1, 0)]);
        assert_eq!(leg.place_leg_bet(Color::Red, "Alice").unwrap(), 5);
        assert_eq!(leg.place_leg_bet(Color::Red, "Alice").unwrap(), 3);
        assert_eq!(leg.place_leg_bet(Color::Red, "Carol").unwrap(), 2);

        assert_eq!(leg.player_bets("Alice", Color::Red), &[5, 3]);
        assert_eq!(leg.player_bets("Carol", Color::Red), &[2]);
        assert_eq!(leg.bets_placed_on(Color::Red), 3);
        assert_eq!(leg.track().get(Color::Red).unwrap().available_bets.as_slice(), &[2]);

        leg.place_leg_bet(Color::Red, "Bob").unwrap();
        let err = leg.place_leg_bet(Color::Red, "Bob").unwrap_err();
        assert_eq!(err.as_invalid_move(), Some(&InvalidMove::NoBetsLeft(Color::Red)));
        assert_eq!(leg.player_bets("Bob", Color::Red), &[2]);
    }

    #[test]
    fn test_bets_keep_placement_order() {
        let mut leg = camels_on_different_tiles();
        leg.place_leg_bet(Color::Red, "Alice").unwrap();
        leg.place_leg_bet(Color::Blue, "Alice").unwrap();
        leg.place_leg_bet(Color::Red, "Alice").unwrap();

        let bets: Vec<_> = leg.bets_of("Alice").collect();
        assert_eq!(
            bets,
            vec![(Color::Red, [5u8, 3].as_slice()), (Color::Blue, [5u8].as_slice())]
        );
    }

    #[test]
    fn test_leg_bet_on_crazy_camel() {
        let mut leg = leg_with([Camel::new(Color::White, 16, 0)]);
        let err = leg.place_leg_bet(Color::White, "Alice").unwrap_err();
        assert_eq!(err.as_invalid_move(), Some(&InvalidMove::NotRacingCamel(Color::White)));
    }

    #[test]
    fn test_game_bets_are_not_leg_actions() {
        let mut leg = camels_on_different_tiles();
        let err = leg
            .play_action(&Action::game_winner_bet("Alice", Color::Red))
            .unwrap_err();
        assert!(matches!(err, GameError::InvariantViolation(_)));
        assert_eq!(leg.next_player(), Some("Alice"));
    }

    #[test]
    fn test_reset_leg() {
        let mut leg = leg_with([Camel::new(Color::Blue, 1, 0), Camel::new(Color::Green, 3, 0)]);
        leg.place_tile(5, "Alice", TileKind::Cheering).unwrap();
        leg.place_tile(8, "Bob", TileKind::Booing).unwrap();
        leg.place_leg_bet(Color::Blue, "Alice").unwrap();
        leg.resolve_dice(&roll(Color::Blue, 1), "Alice").unwrap();

        leg.reset_leg();

        assert!(leg.cheering_tiles().is_empty());
        assert!(leg.booing_tiles().is_empty());
        assert!(leg.all_leg_points().is_empty());
        assert!(leg.player_bets("Alice", Color::Blue).is_empty());
        for camel in leg.track().iter() {
            assert_eq!(camel.dice_value, None);
            assert_eq!(camel.available_bets.as_slice(), &[5, 3, 2, 2]);
        }
        assert_eq!(pos(&leg, Color::Blue), (2, 0));
    }

    #[test]
    fn test_advance_to_next_leg() {
        let mut leg = leg_with([Camel::new(Color::Blue, 1, 0)]);
        leg.place_leg_bet(Color::Blue, "Alice").unwrap();

        leg.advance_to_next_leg("Bob").unwrap();

        assert_eq!(leg.leg_number(), 2);
        assert_eq!(leg.next_player(), Some("Bob"));
        assert!(leg.player_bets("Alice", Color::Blue).is_empty());

        let err = leg.advance_to_next_leg("Mallory").unwrap_err();
        assert_eq!(
            err.as_invalid_move(),
            Some(&InvalidMove::UnknownPlayer("Mallory".to_string()))
        );
        assert_eq!(leg.leg_number(), 2);
    }

    #[test]
    fn test_leg_serde_round_trip() {
        let mut leg = camels_on_different_tiles();
        leg.place_leg_bet(Color::Red, "Alice").unwrap();
        leg.place_tile(12, "Bob", TileKind::Booing).unwrap();

        let json = serde_json::to_string(&leg).unwrap();
        let restored: Leg = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, leg);
        assert!(restored.player_bets("Bob", Color::Red).is_empty());
    }
}
