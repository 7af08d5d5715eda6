//! End-of-game results.

use rustc_hash::FxHashSet;

use super::coord::Coord;
use super::player::{PlayerId, PlayerMap};

/// Result of a game that ended with the players isolated from each other.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// One player holds strictly the largest territory.
    Winner(PlayerId),
    /// Two or more players tie for the largest territory.
    Draw(Vec<PlayerId>),
}

impl GameResult {
    /// Check if a player won or shares the draw.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Draw(ps) => ps.contains(&player),
        }
    }

    #[must_use]
    pub fn is_draw(&self) -> bool {
        matches!(self, GameResult::Draw(_))
    }
}

/// Terminal report handed to the board when a game ends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Won {
        winner: PlayerId,
        territories: PlayerMap<FxHashSet<Coord>>,
        unreachable: FxHashSet<Coord>,
    },
    Drawn {
        winners: Vec<PlayerId>,
        territories: PlayerMap<FxHashSet<Coord>>,
        unreachable: FxHashSet<Coord>,
    },
    Stalemate {
        unreachable: FxHashSet<Coord>,
    },
}

impl Outcome {
    /// Enabled tiles no player can reach, for every kind of ending.
    #[must_use]
    pub fn unreachable(&self) -> &FxHashSet<Coord> {
        match self {
            Outcome::Won { unreachable, .. }
            | Outcome::Drawn { unreachable, .. }
            | Outcome::Stalemate { unreachable } => unreachable,
        }
    }

    /// Per-player territories; `None` for a stalemate.
    #[must_use]
    pub fn territories(&self) -> Option<&PlayerMap<FxHashSet<Coord>>> {
        match self {
            Outcome::Won { territories, .. } | Outcome::Drawn { territories, .. } => {
                Some(territories)
            }
            Outcome::Stalemate { .. } => None,
        }
    }
}
