//! Players and seat order.
//!
//! ## Player
//!
//! A name (the unique key) and a cumulative point total.
//!
//! ## Roster
//!
//! Ordered per-player storage backed by `Vec`, in seat order. Seat order
//! drives turn rotation: after the last seat comes the first.

use std::ops::Index;

use serde::{Deserialize, Serialize};

/// A player and their cumulative points.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub points: i32,
}

impl Player {
    /// Create a player with a starting point total.
    pub fn new(name: impl Into<String>, points: i32) -> Self {
        Self {
            name: name.into(),
            points,
        }
    }

    /// Add (or subtract) points.
    pub fn add_points(&mut self, delta: i32) {
        self.points += delta;
    }

    /// Lose up to `penalty` points without dropping below zero.
    ///
    /// The floor is evaluated against the live total, so a player already
    /// below zero loses nothing.
    pub fn apply_penalty(&mut self, penalty: i32) {
        self.add_points(std::cmp::max(-self.points, -penalty));
    }
}

/// Players in seat order.
///
/// ```
/// use camelgo::core::Roster;
///
/// let roster = Roster::new(&["Alice", "Bob", "Carol"], 3);
/// assert_eq!(roster.next_after("Carol"), Some("Alice"));
/// assert_eq!(roster["Bob"].points, 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    /// Seat the named players, each starting with `starting_points`.
    pub fn new<S: AsRef<str>>(names: &[S], starting_points: i32) -> Self {
        Self {
            players: names
                .iter()
                .map(|name| Player::new(name.as_ref(), starting_points))
                .collect(),
        }
    }

    /// Number of seated players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Check if no one is seated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Seat index of a player.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.players.iter().position(|p| p.name == name)
    }

    /// Check if a player is seated.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Get a player by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    /// Get a mutable player by name.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.name == name)
    }

    /// Player seated at `index`.
    #[must_use]
    pub fn at(&self, index: usize) -> Option<&Player> {
        self.players.get(index)
    }

    /// The player after `name` in seat order, wrapping around.
    #[must_use]
    pub fn next_after(&self, name: &str) -> Option<&str> {
        let index = self.position(name)?;
        let next = (index + 1) % self.players.len();
        Some(self.players[next].name.as_str())
    }

    /// Names in seat order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.players.iter().map(|p| p.name.as_str())
    }

    /// Iterate players in seat order.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    /// Iterate players mutably in seat order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.players.iter_mut()
    }
}

impl Index<&str> for Roster {
    type Output = Player;

    fn index(&self, name: &str) -> &Self::Output {
        match self.get(name) {
            Some(player) => player,
            None => panic!("No player named {name}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_points() {
        let mut player = Player::new("Alice", 3);
        player.add_points(4);
        assert_eq!(player.points, 7);
        player.add_points(-2);
        assert_eq!(player.points, 5);
    }

    #[test]
    fn test_penalty_floors_at_zero() {
        let mut player = Player::new("Alice", 2);
        player.apply_penalty(3);
        assert_eq!(player.points, 0);

        player.apply_penalty(1);
        assert_eq!(player.points, 0);
    }

    #[test]
    fn test_penalty_against_negative_total() {
        // max(-(-2), -1) = 2: a negative total is lifted back to zero.
        let mut player = Player::new("Alice", -2);
        player.apply_penalty(1);
        assert_eq!(player.points, 0);
    }

    #[test]
    fn test_roster_order() {
        let roster = Roster::new(&["Alice", "Bob", "Carol"], 3);

        let names: Vec<_> = roster.names().collect();
        assert_eq!(names, vec!["Alice", "Bob", "Carol"]);
        assert_eq!(roster.position("Bob"), Some(1));
        assert_eq!(roster.at(2).map(|p| p.name.as_str()), Some("Carol"));
        assert_eq!(roster.len(), 3);
    }

    #[test]
    fn test_roster_rotation() {
        let roster = Roster::new(&["Alice", "Bob"], 3);

        assert_eq!(roster.next_after("Alice"), Some("Bob"));
        assert_eq!(roster.next_after("Bob"), Some("Alice"));
        assert_eq!(roster.next_after("Mallory"), None);
    }

    #[test]
    fn test_roster_mutation() {
        let mut roster = Roster::new(&["Alice", "Bob"], 3);

        roster.get_mut("Bob").unwrap().add_points(5);
        assert_eq!(roster["Bob"].points, 8);
        assert_eq!(roster["Alice"].points, 3);
        assert!(roster.get_mut("Mallory").is_none());
    }

    #[test]
    fn test_roster_serialization() {
        let roster = Roster::new(&["Alice", "Bob"], 3);
        let json = serde_json::to_string(&roster).unwrap();
        let deserialized: Roster = serde_json::from_str(&json).unwrap();
        assert_eq!(roster, deserialized);
    }

    #[test]
    #[should_panic(expected = "No player named Mallory")]
    fn test_roster_index_unknown() {
        let roster = Roster::new(&["Alice"], 3);
        let _ = &roster["Mallory"];
    }
}
