//! Uniformly random computer player.

use crate::core::{Coord, Error, GameRng, GameState, Phase, PlayerId, Result};

use super::strategy::{check_turn, Strategy, TurnMemo};
use super::turn::sorted;

/// Picks the move uniformly among legal moves, then the shot uniformly
/// among the shots legal from the new position.
#[derive(Clone, Debug)]
pub struct RandomStrategy {
    player: PlayerId,
    rng: GameRng,
    memo: TurnMemo,
}

impl RandomStrategy {
    pub fn new(player: PlayerId, rng: GameRng) -> Self {
        Self {
            player,
            rng,
            memo: TurnMemo::default(),
        }
    }
}

impl Strategy for RandomStrategy {
    fn choose_move(&mut self, state: &GameState) -> Result<Coord> {
        check_turn(state, self.player, Phase::Move)?;

        let moves = sorted(state.valid_moves(self.player));
        let move_to = *self
            .rng
            .choose(&moves)
            .ok_or_else(|| Error::illegal_state(format!("{} has no legal move", self.player)))?;

        let after_move = state.apply(move_to)?;
        let shots = sorted(after_move.valid_moves(self.player));
        let shoot_at = *self
            .rng
            .choose(&shots)
            .ok_or_else(|| Error::illegal_state(format!("{} has no legal shot", self.player)))?;

        self.memo.remember(after_move, shoot_at);
        Ok(move_to)
    }

    fn choose_shoot(&mut self, state: &GameState) -> Result<Coord> {
        check_turn(state, self.player, Phase::Shoot)?;
        self.memo.recall(state)
    }

    fn name(&self) -> &str {
        "Random"
    }
}
