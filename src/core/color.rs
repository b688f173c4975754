//! Camel and die colours.
//!
//! ## Color
//!
//! The seven camel identities on the track: five racing camels that move
//! forward and the two halves of the crazy camel (White/Black) that move
//! backward. All seven share one rule set except for direction.
//!
//! ## DieColor
//!
//! The six die slots in the pyramid. The grey die drives both crazy camels;
//! its face colour decides which half moves.

use serde::{Deserialize, Serialize};

/// Camel identity.
///
/// Declaration order is the canonical order used by the action encoding
/// (racing camels) and the observation layout (all seven).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Color {
    Blue,
    Yellow,
    Green,
    Purple,
    Red,
    White,
    Black,
}

impl Color {
    /// Racing camels in action-encoding order.
    pub const RACING: [Color; 5] = [
        Color::Blue,
        Color::Yellow,
        Color::Green,
        Color::Purple,
        Color::Red,
    ];

    /// Crazy camel halves.
    pub const CRAZY: [Color; 2] = [Color::White, Color::Black];

    /// All seven camels, racing first.
    pub const ALL: [Color; 7] = [
        Color::Blue,
        Color::Yellow,
        Color::Green,
        Color::Purple,
        Color::Red,
        Color::White,
        Color::Black,
    ];

    /// Check if this is one half of the crazy camel.
    #[must_use]
    pub const fn is_crazy(self) -> bool {
        matches!(self, Color::White | Color::Black)
    }

    /// Direction of travel along the track: +1 forward, -1 backward.
    #[must_use]
    pub const fn direction(self) -> i8 {
        if self.is_crazy() {
            -1
        } else {
            1
        }
    }

    /// The die slot that moves this camel.
    #[must_use]
    pub const fn die(self) -> DieColor {
        match self {
            Color::Blue => DieColor::Blue,
            Color::Yellow => DieColor::Yellow,
            Color::Green => DieColor::Green,
            Color::Purple => DieColor::Purple,
            Color::Red => DieColor::Red,
            Color::White | Color::Black => DieColor::Grey,
        }
    }

    /// The other crazy half. Racing camels map to themselves.
    #[must_use]
    pub const fn crazy_counterpart(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
            other => other,
        }
    }

    /// Position of a racing camel in `RACING`, `None` for crazy camels.
    #[must_use]
    pub fn racing_index(self) -> Option<usize> {
        Color::RACING.iter().position(|&c| c == self)
    }

    /// Lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Color::Blue => "blue",
            Color::Yellow => "yellow",
            Color::Green => "green",
            Color::Purple => "purple",
            Color::Red => "red",
            Color::White => "white",
            Color::Black => "black",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Die slot. Each slot may roll at most once per leg.
///
/// Declaration order is the draw order of the dice roller and is part of
/// the seeded-reproducibility contract: the roller collects the unrolled
/// slots in this order before choosing one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DieColor {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Grey,
}

impl DieColor {
    /// All slots in draw order.
    pub const ALL: [DieColor; 6] = [
        DieColor::Red,
        DieColor::Blue,
        DieColor::Green,
        DieColor::Yellow,
        DieColor::Purple,
        DieColor::Grey,
    ];

    /// The camel a standard die moves. `None` for the grey die, whose face
    /// colour decides.
    #[must_use]
    pub const fn camel(self) -> Option<Color> {
        match self {
            DieColor::Red => Some(Color::Red),
            DieColor::Blue => Some(Color::Blue),
            DieColor::Green => Some(Color::Green),
            DieColor::Yellow => Some(Color::Yellow),
            DieColor::Purple => Some(Color::Purple),
            DieColor::Grey => None,
        }
    }
}

impl std::fmt::Display for DieColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DieColor::Red => "red",
            DieColor::Blue => "blue",
            DieColor::Green => "green",
            DieColor::Yellow => "yellow",
            DieColor::Purple => "purple",
            DieColor::Grey => "grey",
        };
        f.write_str(name)
    }
}
