//! The full game: players, legs, hidden bets and scoring.
//!
//! ## Lifecycle
//!
//! A game starts with an opening roll that places every camel, then plays
//! legs until a camel crosses the finish. A leg ends as soon as five of the
//! six die slots have rolled; leg bets and leg points are paid out and the
//! next leg starts with the next seat in rotation. When the race finishes,
//! the final leg is paid out, then the hidden game bets.
//!
//! ## Snapshots
//!
//! `Game` serializes through `GameSnapshot`, which includes the dice RNG
//! position. A restored game rolls exactly the dice the original would have.
//! Restoring validates the snapshot and fails with
//! `GameError::InvariantViolation` if it is inconsistent.

use std::collections::BTreeMap;

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::action::{Action, ActionKind, ActionMask, Decision, TileKind};
use crate::core::{Color, DieColor, GameConfig, Player, Roster, TicketQueue, BOARD_SIZE};
use crate::dice::{Dice, DiceRoller, DiceRollerState};
use crate::error::{GameError, InvalidMove, Result};
use crate::leg::Leg;
use crate::track::{Camel, Track};

/// Secret game bets: camel to bettors in the order they bet.
///
/// Lists are never empty; a camel nobody bet on has no entry.
type HiddenBets = BTreeMap<Color, Vector<String>>;

/// A game of camel racing.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(into = "GameSnapshot", try_from = "GameSnapshot")]
pub struct Game {
    config: GameConfig,
    dice_roller: DiceRoller,
    players: Roster,
    current_leg: Leg,
    legs_played: u32,
    finished: bool,
    next_leg_starting_player: String,
    hidden_game_winner_bets: HiddenBets,
    hidden_game_loser_bets: HiddenBets,
}

impl Game {
    // === Construction ===

    /// Start a game with the default configuration.
    ///
    /// ```
    /// use camelgo::dice::DiceRoller;
    /// use camelgo::game::Game;
    ///
    /// let game = Game::start_game(&["Alice", "Bob"], 0, DiceRoller::new(123)).unwrap();
    /// assert_eq!(game.current_leg().track().len(), 7);
    /// assert_eq!(game.next_player(), Some("Alice"));
    /// ```
    pub fn start_game<S: AsRef<str>>(
        player_names: &[S],
        starting_player_index: usize,
        dice_roller: DiceRoller,
    ) -> Result<Self> {
        Self::start_game_with_config(
            GameConfig::default(),
            player_names,
            starting_player_index,
            dice_roller,
        )
    }

    /// Start a game, rolling the opening positions with `dice_roller`.
    pub fn start_game_with_config<S: AsRef<str>>(
        config: GameConfig,
        player_names: &[S],
        starting_player_index: usize,
        mut dice_roller: DiceRoller,
    ) -> Result<Self> {
        check_seating(&config, player_names, starting_player_index)?;
        let opening = roll_opening_dice(&mut dice_roller)?;
        let track = opening_track(&opening, &config.leg_bet_values);
        Ok(Self::assemble(
            config,
            player_names,
            starting_player_index,
            track,
            dice_roller,
        ))
    }

    /// Start a game from explicit opening dice, placed in the given order.
    ///
    /// Each camel may appear at most once.
    pub fn start_from_dice<S: AsRef<str>>(
        player_names: &[S],
        starting_player_index: usize,
        dice: &[Dice],
        mut dice_roller: DiceRoller,
    ) -> Result<Self> {
        let config = GameConfig::default();
        check_seating(&config, player_names, starting_player_index)?;
        let mut seen = FxHashSet::default();
        if let Some(dup) = dice.iter().find(|d| !seen.insert(d.color())) {
            return Err(InvalidMove::AlreadyRolled(dup.color()).into());
        }
        dice_roller.reset();
        let track = opening_track(dice, &config.leg_bet_values);
        Ok(Self::assemble(
            config,
            player_names,
            starting_player_index,
            track,
            dice_roller,
        ))
    }

    /// Start a game from an arranged track (puzzles, tests, replays).
    pub fn from_track<S: AsRef<str>>(
        config: GameConfig,
        player_names: &[S],
        starting_player_index: usize,
        track: Track,
        dice_roller: DiceRoller,
    ) -> Result<Self> {
        check_seating(&config, player_names, starting_player_index)?;
        track.validate()?;
        Ok(Self::assemble(
            config,
            player_names,
            starting_player_index,
            track,
            dice_roller,
        ))
    }

    fn assemble<S: AsRef<str>>(
        config: GameConfig,
        player_names: &[S],
        starting_player_index: usize,
        track: Track,
        dice_roller: DiceRoller,
    ) -> Self {
        let players = Roster::new(player_names, config.starting_points);
        let turn_order: Vec<String> = players.names().map(str::to_string).collect();
        let next_leg_starting_player = turn_order[starting_player_index].clone();
        let current_leg = Leg::with_config(&config, track, turn_order, starting_player_index);

        tracing::debug!(
            players = players.len(),
            starting = %next_leg_starting_player,
            "game started"
        );
        Self {
            config,
            dice_roller,
            players,
            current_leg,
            legs_played: 0,
            finished: false,
            next_leg_starting_player,
            hidden_game_winner_bets: HiddenBets::new(),
            hidden_game_loser_bets: HiddenBets::new(),
        }
    }

    // === Accessors ===

    /// The rules this game is played with.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The dice roller.
    #[must_use]
    pub fn dice_roller(&self) -> &DiceRoller {
        &self.dice_roller
    }

    /// Players in seat order.
    #[must_use]
    pub fn players(&self) -> &Roster {
        &self.players
    }

    /// The leg in progress (or the final leg, once finished).
    #[must_use]
    pub fn current_leg(&self) -> &Leg {
        &self.current_leg
    }

    /// Legs completed so far.
    #[must_use]
    pub fn legs_played(&self) -> u32 {
        self.legs_played
    }

    /// Check if the race is over and paid out.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Whose turn it is.
    #[must_use]
    pub fn next_player(&self) -> Option<&str> {
        self.current_leg.next_player()
    }

    /// Who starts the next leg.
    #[must_use]
    pub fn next_leg_starting_player(&self) -> &str {
        &self.next_leg_starting_player
    }

    /// Players who bet on `color` to win the race, in bet order.
    pub fn game_winner_bets(&self, color: Color) -> impl Iterator<Item = &str> {
        bettors(&self.hidden_game_winner_bets, color)
    }

    /// Players who bet on `color` to lose the race, in bet order.
    pub fn game_loser_bets(&self, color: Color) -> impl Iterator<Item = &str> {
        bettors(&self.hidden_game_loser_bets, color)
    }

    /// Check whether `player` holds a winner bet on `color`.
    #[must_use]
    pub fn has_game_winner_bet(&self, player: &str, color: Color) -> bool {
        self.game_winner_bets(color).any(|p| p == player)
    }

    /// Check whether `player` holds a loser bet on `color`.
    #[must_use]
    pub fn has_game_loser_bet(&self, player: &str, color: Color) -> bool {
        self.game_loser_bets(color).any(|p| p == player)
    }

    /// Total winner and loser bets placed so far, across all camels.
    #[must_use]
    pub fn game_bet_counts(&self) -> (usize, usize) {
        let count = |bets: &HiddenBets| bets.values().map(Vector::len).sum();
        (
            count(&self.hidden_game_winner_bets),
            count(&self.hidden_game_loser_bets),
        )
    }

    /// The leading racing camel.
    pub fn first_camel(&self) -> Result<&Camel> {
        let track = self.current_leg.track();
        let color = track.first()?;
        track
            .get(color)
            .ok_or_else(|| GameError::InvariantViolation(format!("ranked camel {color} missing")))
    }

    /// The trailing racing camel.
    pub fn last_camel(&self) -> Result<&Camel> {
        let track = self.current_leg.track();
        let color = track.last()?;
        track
            .get(color)
            .ok_or_else(|| GameError::InvariantViolation(format!("ranked camel {color} missing")))
    }

    /// Points a player would have if the leg ended now.
    ///
    /// While the game runs this is the banked total plus points earned this
    /// leg from rolls and tiles. Once finished everything is banked.
    pub fn current_player_points(&self, player: &str) -> Result<i32> {
        let banked = self
            .players
            .get(player)
            .ok_or_else(|| InvalidMove::UnknownPlayer(player.to_string()))?
            .points;
        if self.finished {
            Ok(banked)
        } else {
            Ok(banked + self.current_leg.leg_points(player))
        }
    }

    /// The highest-scoring player once the game is over. Ties go to the
    /// earlier seat.
    #[must_use]
    pub fn winner_player(&self) -> Option<&Player> {
        if !self.finished {
            return None;
        }
        self.players
            .iter()
            .fold(None, |best: Option<&Player>, p| match best {
                Some(b) if b.points >= p.points => Some(b),
                _ => Some(p),
            })
    }

    // === Rolling ===

    /// Draw the die for an upcoming roll action.
    ///
    /// Only the RNG advances: the die slot is taken when the die is played
    /// with `Action::roll`, so a die that is never played costs nothing.
    pub fn roll_dice(&mut self) -> Result<Dice> {
        self.dice_roller.draw()
    }

    /// Check if the current leg is over: at most one die slot is left.
    #[must_use]
    pub fn leg_finished(&self) -> bool {
        self.dice_roller.remaining_colors().len() <= 1
    }

    // === Actions ===

    /// Play one action. Returns whether the race finished.
    ///
    /// A roll may carry a die drawn by `roll_dice` or any die whose slot has
    /// not rolled this leg (replays, physical dice).
    pub fn play_action(&mut self, action: &Action) -> Result<bool> {
        self.check_can_act(&action.player)?;

        match &action.kind {
            ActionKind::RollDice(dice) => {
                self.record_roll(dice)?;
                if self.current_leg.play_action(action)? {
                    self.finish_game()?;
                    return Ok(true);
                }
                if self.leg_finished() {
                    self.move_to_next_leg()?;
                }
                Ok(false)
            }
            ActionKind::PlaceTile { .. } | ActionKind::LegBet(_) => {
                self.current_leg.play_action(action)?;
                Ok(false)
            }
            ActionKind::GameWinnerBet(color) => {
                check_racing(*color)?;
                self.hidden_game_winner_bets
                    .entry(*color)
                    .or_default()
                    .push_back(action.player.clone());
                self.current_leg.move_to_next_player();
                Ok(false)
            }
            ActionKind::GameLoserBet(color) => {
                check_racing(*color)?;
                self.hidden_game_loser_bets
                    .entry(*color)
                    .or_default()
                    .push_back(action.player.clone());
                self.current_leg.move_to_next_player();
                Ok(false)
            }
        }
    }

    /// Play an integer-encoded action, drawing the die for a roll.
    ///
    /// Returns whether the race finished.
    pub fn play_index(&mut self, player: &str, index: usize) -> Result<bool> {
        match Decision::from_index(index)?.into_action(player) {
            Some(action) => self.play_action(&action),
            None => self.play_roll(player).map(|(_, finished)| finished),
        }
    }

    /// Draw a die and play it for `player`. Returns the die and whether the
    /// race finished.
    ///
    /// Nothing is drawn if the roll would be rejected.
    pub fn play_roll(&mut self, player: &str) -> Result<(Dice, bool)> {
        self.check_can_act(player)?;
        let mut roller = self.dice_roller.clone();
        let dice = roller.draw()?;
        self.check_camel_can_roll(&dice)?;
        self.dice_roller = roller;
        let finished = self.play_action(&Action::roll(player, dice))?;
        Ok((dice, finished))
    }

    fn check_can_act(&self, player: &str) -> Result<()> {
        if self.finished {
            return Err(InvalidMove::GameFinished.into());
        }
        if !self.players.contains(player) {
            return Err(InvalidMove::UnknownPlayer(player.to_string()).into());
        }
        Ok(())
    }

    fn check_camel_can_roll(&self, dice: &Dice) -> Result<()> {
        let camel = self
            .current_leg
            .track()
            .get(dice.color())
            .ok_or(InvalidMove::UnknownCamel(dice.color()))?;
        if camel.dice_value.is_some() {
            return Err(InvalidMove::AlreadyRolled(dice.color()).into());
        }
        Ok(())
    }

    /// Take the die slot before the camel moves.
    fn record_roll(&mut self, dice: &Dice) -> Result<()> {
        self.check_camel_can_roll(dice)?;
        self.dice_roller.roll_specific(*dice)?;
        Ok(())
    }

    // === Transitions ===

    /// Pay out the leg and start the next one.
    pub fn move_to_next_leg(&mut self) -> Result<()> {
        if self.finished {
            return Err(InvalidMove::GameFinished.into());
        }
        self.distribute_leg_points()?;
        self.legs_played += 1;
        self.current_leg
            .advance_to_next_leg(&self.next_leg_starting_player)?;
        if let Some(next) = self.players.next_after(&self.next_leg_starting_player) {
            self.next_leg_starting_player = next.to_string();
        }
        self.dice_roller.reset();

        tracing::debug!(
            legs_played = self.legs_played,
            starting = ?self.current_leg.next_player(),
            "leg finished"
        );
        Ok(())
    }

    /// Pay out the final leg and the game bets, then end the game.
    pub fn finish_game(&mut self) -> Result<()> {
        if self.finished {
            return Err(InvalidMove::GameFinished.into());
        }
        self.distribute_leg_points()?;
        self.legs_played += 1;
        self.distribute_game_points()?;
        self.finished = true;

        tracing::debug!(
            legs_played = self.legs_played,
            winner = ?self.winner_player().map(|p| p.name.as_str()),
            "game finished"
        );
        Ok(())
    }

    /// Pay each player's leg bets against the leg ranking, then bank their
    /// leg points.
    ///
    /// First place pays the face value of every ticket, second place pays 1
    /// per ticket, anything lower costs 1 per ticket.
    fn distribute_leg_points(&mut self) -> Result<()> {
        let ranking = self.current_leg.track().ranking()?;
        let leg = &self.current_leg;

        for player in self.players.iter_mut() {
            for (color, tickets) in leg.bets_of(&player.name) {
                let rank = ranking
                    .iter()
                    .position(|&c| c == color)
                    .ok_or_else(|| {
                        GameError::InvariantViolation(format!("leg bet on unranked camel {color}"))
                    })?;
                match rank {
                    0 => player.add_points(tickets.iter().map(|&t| i32::from(t)).sum()),
                    1 => player.add_points(tickets.len() as i32),
                    _ => player.apply_penalty(tickets.len() as i32),
                }
            }
            player.add_points(leg.leg_points(&player.name));
        }

        tracing::debug!(
            leg = leg.leg_number(),
            leader = ?ranking.first(),
            "leg bets paid"
        );
        Ok(())
    }

    /// Pay the hidden winner and loser bets.
    fn distribute_game_points(&mut self) -> Result<()> {
        let winner = self.first_camel()?.color;
        let loser = self.last_camel()?.color;

        let books = [
            (&self.hidden_game_winner_bets, winner),
            (&self.hidden_game_loser_bets, loser),
        ];
        for (bets, target) in books {
            for (rank, name) in bets.get(&target).into_iter().flatten().enumerate() {
                let payout = self.config.game_bet_payout(rank);
                bank_player(&mut self.players, name)?.add_points(payout);
            }
        }
        // Penalties only after every payout: the floor uses the live total.
        for (bets, target) in books {
            let wrong = bets
                .iter()
                .filter(|(color, _)| **color != target)
                .flat_map(|(_, names)| names.iter());
            for name in wrong {
                bank_player(&mut self.players, name)?
                    .apply_penalty(self.config.wrong_game_bet_penalty);
            }
        }

        tracing::debug!(winner = %winner, loser = %loser, "game bets paid");
        Ok(())
    }

    // === Legality ===

    /// Legal slots of the action space for `player`.
    ///
    /// Rolling is always legal. A leg bet is illegal once the camel's tickets
    /// are gone; a game bet is illegal if the player already holds that bet.
    /// Tiles are illegal for a player who already placed one this leg, and
    /// on any tile holding a camel or on or beside an existing tile. A
    /// finished game has no legal slots.
    #[must_use]
    pub fn get_action_mask(&self, player: &str) -> ActionMask {
        if self.finished {
            return ActionMask::none_legal();
        }
        let mut mask = ActionMask::all_legal();
        let leg = &self.current_leg;

        for color in Color::RACING {
            let tickets_left = leg
                .track()
                .get(color)
                .is_some_and(|c| !c.available_bets.is_empty());
            if !tickets_left {
                mask.forbid(Decision::LegBet(color));
            }
            if self.has_game_winner_bet(player, color) {
                mask.forbid(Decision::GameWinnerBet(color));
            }
            if self.has_game_loser_bet(player, color) {
                mask.forbid(Decision::GameLoserBet(color));
            }
        }

        let placed_tile = leg.has_placed_tile(player);
        let camel_positions: FxHashSet<u8> = leg.track().iter().map(|c| c.track_pos).collect();
        let tile_positions: FxHashSet<u8> = leg.tiles().map(|(t, _)| t.position).collect();
        for position in 1..=BOARD_SIZE {
            let blocked = placed_tile
                || camel_positions.contains(&position)
                || [position - 1, position, position + 1]
                    .iter()
                    .any(|p| tile_positions.contains(p));
            if blocked {
                for kind in [TileKind::Cheering, TileKind::Booing] {
                    mask.forbid(Decision::PlaceTile { position, kind });
                }
            }
        }
        mask
    }

    // === Snapshots ===

    /// Encode the game with `bincode`.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode and validate a game encoded with `to_bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let snapshot: GameSnapshot = bincode::deserialize(bytes)?;
        Self::restore(snapshot)
    }

    /// The full state as plain data.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        self.clone().into()
    }

    /// Rebuild a game from a snapshot, checking it is consistent.
    pub fn restore(snapshot: GameSnapshot) -> Result<Self> {
        let GameSnapshot {
            config,
            dice_roller,
            players,
            current_leg,
            legs_played,
            finished,
            next_leg_starting_player,
            hidden_game_winner_bets,
            hidden_game_loser_bets,
        } = snapshot;

        let violation = |msg: String| Err(GameError::InvariantViolation(msg));

        current_leg.track().validate()?;
        let dice_roller = DiceRoller::from(dice_roller);
        check_rolls(&dice_roller, current_leg.track())?;
        if players.is_empty() {
            return violation("snapshot has no players".to_string());
        }
        let mut seen = FxHashSet::default();
        if let Some(dup) = players.names().find(|n| !seen.insert(*n)) {
            return violation(format!("player {dup} is seated twice"));
        }
        if !current_leg.turn_order().iter().map(String::as_str).eq(players.names()) {
            return violation("leg turn order does not match the seats".to_string());
        }
        if current_leg.next_player().is_none() {
            return violation("leg has no player to act".to_string());
        }
        if !players.contains(&next_leg_starting_player) {
            return violation(format!(
                "next leg starting player {next_leg_starting_player} is not seated"
            ));
        }

        let mut hidden = [HiddenBets::new(), HiddenBets::new()];
        for (bets, out) in [hidden_game_winner_bets, hidden_game_loser_bets]
            .into_iter()
            .zip(hidden.iter_mut())
        {
            for (color, names) in bets {
                if color.is_crazy() {
                    return violation(format!("game bet on crazy camel {color}"));
                }
                if let Some(name) = names.iter().find(|n| !players.contains(n)) {
                    return violation(format!("game bet by unseated player {name}"));
                }
                if !names.is_empty() {
                    out.insert(color, names.into_iter().collect());
                }
            }
        }
        let [hidden_game_winner_bets, hidden_game_loser_bets] = hidden;

        Ok(Self {
            config,
            dice_roller,
            players,
            current_leg,
            legs_played,
            finished,
            next_leg_starting_player,
            hidden_game_winner_bets,
            hidden_game_loser_bets,
        })
    }
}

/// Plain-data form of a `Game`, as written to snapshots.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub config: GameConfig,
    pub dice_roller: DiceRollerState,
    pub players: Roster,
    pub current_leg: Leg,
    pub legs_played: u32,
    pub finished: bool,
    pub next_leg_starting_player: String,
    pub hidden_game_winner_bets: BTreeMap<Color, Vec<String>>,
    pub hidden_game_loser_bets: BTreeMap<Color, Vec<String>>,
}

impl From<Game> for GameSnapshot {
    fn from(game: Game) -> Self {
        let plain = |bets: HiddenBets| {
            bets.into_iter()
                .map(|(color, names)| (color, names.into_iter().collect()))
                .collect()
        };
        Self {
            config: game.config,
            dice_roller: game.dice_roller.into(),
            players: game.players,
            current_leg: game.current_leg,
            legs_played: game.legs_played,
            finished: game.finished,
            next_leg_starting_player: game.next_leg_starting_player,
            hidden_game_winner_bets: plain(game.hidden_game_winner_bets),
            hidden_game_loser_bets: plain(game.hidden_game_loser_bets),
        }
    }
}

impl TryFrom<GameSnapshot> for Game {
    type Error = GameError;

    fn try_from(snapshot: GameSnapshot) -> Result<Self> {
        Game::restore(snapshot)
    }
}

fn bettors(bets: &HiddenBets, color: Color) -> impl Iterator<Item = &str> {
    bets.get(&color)
        .into_iter()
        .flat_map(|names| names.iter().map(String::as_str))
}

fn bank_player<'a>(players: &'a mut Roster, name: &str) -> Result<&'a mut Player> {
    players
        .get_mut(name)
        .ok_or_else(|| GameError::InvariantViolation(format!("game bet by unseated player {name}")))
}

fn check_racing(color: Color) -> Result<()> {
    if color.is_crazy() {
        return Err(InvalidMove::NotRacingCamel(color).into());
    }
    Ok(())
}

fn check_seating<S: AsRef<str>>(
    config: &GameConfig,
    player_names: &[S],
    starting_player_index: usize,
) -> Result<()> {
    let count = player_names.len();
    if !config.accepts_player_count(count) {
        return Err(InvalidMove::PlayerCount {
            count,
            min: config.min_players,
            max: config.max_players,
        }
        .into());
    }
    let mut seen = FxHashSet::default();
    if let Some(dup) = player_names.iter().map(|n| n.as_ref()).find(|n| !seen.insert(*n)) {
        return Err(InvalidMove::DuplicatePlayer(dup.to_string()).into());
    }
    if starting_player_index >= count {
        return Err(InvalidMove::StartingPlayer {
            index: starting_player_index,
            count,
        }
        .into());
    }
    Ok(())
}

/// Roll every die slot once, then pair the grey result with its other half.
/// The roller is reset afterwards.
fn roll_opening_dice(dice_roller: &mut DiceRoller) -> Result<Vec<Dice>> {
    dice_roller.reset();
    for _ in DieColor::ALL {
        dice_roller.roll()?;
    }
    let mut dice: Vec<Dice> = dice_roller.rolled().iter().copied().collect();
    dice.push(dice_roller.roll_grey_counterpart()?);
    dice_roller.reset();
    Ok(dice)
}

/// The roller's history and the camels' rolls must describe the same leg.
fn check_rolls(roller: &DiceRoller, track: &Track) -> Result<()> {
    let violation = |msg: String| Err(GameError::InvariantViolation(msg));

    let mut slots = FxHashSet::default();
    for dice in roller.rolled() {
        if !slots.insert(dice.die()) {
            return violation(format!("{} die rolled twice this leg", dice.die()));
        }
        let rolled = track.get(dice.color()).and_then(|c| c.dice_value);
        if rolled != Some(dice.number()) {
            return violation(format!(
                "die {} {} has no matching roll on the camel",
                dice.color(),
                dice.number()
            ));
        }
    }
    for camel in track.iter() {
        let Some(value) = camel.dice_value else {
            continue;
        };
        let recorded = roller
            .rolled()
            .iter()
            .any(|d| d.color() == camel.color && d.number() == value);
        if !recorded {
            return violation(format!("camel {} rolled {value} but no die was recorded", camel.color));
        }
    }
    Ok(())
}

/// Racing camels start on the tile shown; crazy camels count back from the
/// far end. Camels sharing a tile stack in roll order.
fn opening_track(dice: &[Dice], tickets: &TicketQueue) -> Track {
    let mut heights = [0u8; BOARD_SIZE as usize + 1];
    Track::new(dice.iter().map(|d| {
        let track_pos = if d.color().is_crazy() {
            BOARD_SIZE - d.number() + 1
        } else {
            d.number()
        };
        let stack_pos = heights[usize::from(track_pos)];
        heights[usize::from(track_pos)] += 1;
        Camel::with_tickets(d.color(), track_pos, stack_pos, tickets)
    }))
}
