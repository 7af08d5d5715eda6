//! The computer-player contract.

use serde::{Deserialize, Serialize};

use crate::core::{Coord, Error, GameState, Phase, PlayerId, Result};

/// A move-selection policy for one seat.
///
/// A turn is chosen in two calls: [`choose_move`](Strategy::choose_move) on
/// the move-phase state, then [`choose_shoot`](Strategy::choose_shoot) on the
/// state that results from applying that move. Implementations decide the
/// whole turn in the first call and hand out the shot in the second.
pub trait Strategy: Send {
    /// Pick the destination for the current player.
    ///
    /// Fails with [`Error::IllegalState`] outside the move phase, when it is
    /// not this strategy's player's turn, or when no legal turn exists.
    fn choose_move(&mut self, state: &GameState) -> Result<Coord>;

    /// Pick the tile to shoot, completing the turn started by `choose_move`.
    ///
    /// Fails with [`Error::IllegalState`] unless `state` is exactly the
    /// result of applying the last chosen move.
    fn choose_shoot(&mut self, state: &GameState) -> Result<Coord>;

    /// Display name.
    fn name(&self) -> &str;
}

impl<S: Strategy + ?Sized> Strategy for Box<S> {
    fn choose_move(&mut self, state: &GameState) -> Result<Coord> {
        (**self).choose_move(state)
    }

    fn choose_shoot(&mut self, state: &GameState) -> Result<Coord> {
        (**self).choose_shoot(state)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// A fully decided turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedTurn {
    pub move_to: Coord,
    pub shoot_at: Coord,
}

/// Reject calls made for the wrong seat or phase.
pub(crate) fn check_turn(state: &GameState, player: PlayerId, phase: Phase) -> Result<()> {
    if state.phase() != phase {
        return Err(Error::illegal_state(format!(
            "asked to {} during the {} phase",
            phase,
            state.phase()
        )));
    }
    if state.current_player() != player {
        return Err(Error::illegal_state(format!(
            "{} asked to play on {}'s turn",
            player,
            state.current_player()
        )));
    }
    Ok(())
}

/// The shot decided alongside the last move, keyed by the post-move state.
#[derive(Clone, Debug, Default)]
pub(crate) struct TurnMemo {
    planned: Option<(GameState, Coord)>,
}

impl TurnMemo {
    pub(crate) fn remember(&mut self, after_move: GameState, shoot_at: Coord) {
        self.planned = Some((after_move, shoot_at));
    }

    /// Hand out the remembered shot once, if `state` is the state it was planned for.
    pub(crate) fn recall(&mut self, state: &GameState) -> Result<Coord> {
        match self.planned.take() {
            Some((after_move, shoot_at)) if after_move == *state => Ok(shoot_at),
            Some(planned) => {
                self.planned = Some(planned);
                Err(Error::illegal_state(
                    "choose_shoot called on a state other than the one produced by the chosen move",
                ))
            }
            None => Err(Error::illegal_state("choose_shoot called without a preceding choose_move")),
        }
    }
}
