//! One-turn lookahead: enumerating and classifying (move, shoot) pairs.

use crate::core::{Coord, GameResult, GameState, Phase, PlayerId};

/// How a turn ends for the player who took it, in preference order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TurnCategory {
    /// The game is over and the actor holds the sole largest territory.
    Win,
    /// The game goes on and the next player can move.
    Continuing,
    /// The game is over and the actor shares the largest territory.
    Draw,
    /// The game is not over but the next player cannot move.
    Stalemate,
    /// The game is over and someone else won or drew.
    Loss,
}

/// A candidate turn and the state it leads to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Turn {
    pub move_to: Coord,
    pub shoot_at: Coord,
    pub result: GameState,
}

impl Turn {
    #[must_use]
    pub fn category(&self, actor: PlayerId) -> TurnCategory {
        classify(&self.result, actor)
    }
}

/// Classify `state` from the point of view of `actor`.
#[must_use]
pub fn classify(state: &GameState, actor: PlayerId) -> TurnCategory {
    match state.result() {
        Some(GameResult::Winner(winner)) if winner == actor => TurnCategory::Win,
        Some(GameResult::Draw(players)) if players.contains(&actor) => TurnCategory::Draw,
        Some(_) => TurnCategory::Loss,
        None if state.is_stalemate() => TurnCategory::Stalemate,
        None => TurnCategory::Continuing,
    }
}

/// Every legal (move, shoot) pair for the current player, in coordinate order.
///
/// Empty outside the move phase or when the current player cannot move.
#[must_use]
pub fn enumerate_turns(state: &GameState) -> Vec<Turn> {
    if state.phase() != Phase::Move {
        return Vec::new();
    }

    let player = state.current_player();
    let mut turns = Vec::new();
    for move_to in sorted(state.valid_moves(player)) {
        let Ok(after_move) = state.apply(move_to) else {
            continue;
        };
        for shoot_at in sorted(after_move.valid_moves(player)) {
            if let Ok(result) = after_move.apply(shoot_at) {
                turns.push(Turn {
                    move_to,
                    shoot_at,
                    result,
                });
            }
        }
    }

    turns
}

/// Set contents in a stable order, so seeded choices are reproducible.
pub(crate) fn sorted(coords: impl IntoIterator<Item = Coord>) -> Vec<Coord> {
    let mut coords: Vec<Coord> = coords.into_iter().collect();
    coords.sort_unstable();
    coords
}
