#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::node::Color;
use crate::sim::Side;

/// Tunables shared by every level of a session.
///
/// Hosts typically keep one of these for the whole app and hand a copy to each [`LevelBuilder`](crate::LevelBuilder).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct Config {
    /// Color a Hamiltonian walk paints each vertex it visits.
    pub walk_color: Color,
    /// Color painted on endpoints the player claims in Sim.
    pub player_color: Color,
    /// Color painted on endpoints the automatic opponent claims in Sim.
    pub opponent_color: Color,
    /// Random pairs tried before the automatic opponent falls back to enumerating open edges.
    pub retry_budget: usize,
    /// Colors available to a coloring level, used when asking whether it can be solved at all.
    pub palette: Vec<Color>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            walk_color: Color::Gold,
            player_color: Color::Red,
            opponent_color: Color::Blue,
            retry_budget: 100,
            palette: vec![Color::Red, Color::Green, Color::Blue],
        }
    }
}

impl Config {
    pub fn with_walk_color(mut self, color: Color) -> Self {
        self.walk_color = color;
        self
    }

    pub fn with_side_colors(mut self, player: Color, opponent: Color) -> Self {
        self.player_color = player;
        self.opponent_color = opponent;
        self
    }

    pub fn with_retry_budget(mut self, budget: usize) -> Self {
        self.retry_budget = budget;
        self
    }

    pub fn with_palette(mut self, palette: impl IntoIterator<Item = Color>) -> Self {
        self.palette = palette.into_iter().collect();
        self
    }

    /// Paint color for a Sim side.
    pub fn side_color(&self, side: Side) -> Color {
        match side {
            Side::Player => self.player_color,
            Side::Opponent => self.opponent_color,
        }
    }
}
