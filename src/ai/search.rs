//! Exhaustive one-turn search.
//!
//! Every (move, shoot) pair is played out and the resulting state is put in a
//! [`TurnCategory`] bucket. The strategy takes, in order:
//!
//! 1. any winning turn
//! 2. the best continuing turn, according to its [`Ranking`]
//! 3. any drawing turn
//! 4. any turn that stalemates the next player
//! 5. any losing turn
//!
//! Ties are broken uniformly at random with the injected [`GameRng`].
//! The search never looks past the end of its own turn.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{Coord, Error, GameRng, GameState, Phase, PlayerId, Result};

use super::strategy::{check_turn, Strategy, TurnMemo};
use super::turn::{enumerate_turns, Turn, TurnCategory};

/// How continuing turns are ranked against each other.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ranking {
    /// No preference; any continuing turn will do.
    Any,
    /// Fewest moves left to the next player, then most moves left to us.
    #[default]
    MinimizeOpponent,
    /// Largest (own moves - next player's moves).
    MoveDifference,
}

impl Ranking {
    /// Sort key for a continuing turn; smaller is better.
    fn key(self, turn: &Turn, actor: PlayerId) -> (i64, i64) {
        let opponent_moves = turn.result.valid_moves(turn.result.current_player()).len() as i64;
        let own_moves = turn.result.valid_moves(actor).len() as i64;
        match self {
            Ranking::Any => (0, 0),
            Ranking::MinimizeOpponent => (opponent_moves, -own_moves),
            Ranking::MoveDifference => (opponent_moves - own_moves, 0),
        }
    }
}

/// Exhaustive one-turn search with categorized outcomes.
#[derive(Clone, Debug)]
pub struct SearchStrategy {
    player: PlayerId,
    ranking: Ranking,
    rng: GameRng,
    memo: TurnMemo,
    name: String,
}

impl SearchStrategy {
    pub fn new(player: PlayerId, ranking: Ranking, rng: GameRng) -> Self {
        Self {
            player,
            ranking,
            rng,
            memo: TurnMemo::default(),
            name: format!("Search ({:?})", ranking),
        }
    }

    /// Decide a whole turn for the current state.
    pub fn plan(&mut self, state: &GameState) -> Result<Turn> {
        check_turn(state, self.player, Phase::Move)?;

        let mut buckets: BTreeMap<TurnCategory, Vec<Turn>> = BTreeMap::new();
        for turn in enumerate_turns(state) {
            buckets
                .entry(turn.category(self.player))
                .or_default()
                .push(turn);
        }
        trace!(
            player = %self.player,
            categories = ?buckets.iter().map(|(c, t)| (*c, t.len())).collect::<Vec<_>>(),
            "enumerated turns"
        );

        let (category, candidates) = buckets
            .into_iter()
            .next()
            .ok_or_else(|| Error::illegal_state(format!("{} has no legal turn", self.player)))?;

        let mut pool = match category {
            TurnCategory::Continuing => self.best_continuing(candidates),
            _ => candidates,
        };
        let index = self.rng.gen_range_usize(0..pool.len());
        Ok(pool.swap_remove(index))
    }

    /// Keep only the candidates with the best ranking key.
    fn best_continuing(&self, candidates: Vec<Turn>) -> Vec<Turn> {
        let keyed: Vec<((i64, i64), Turn)> = candidates
            .into_iter()
            .map(|turn| (self.ranking.key(&turn, self.player), turn))
            .collect();
        let Some(best) = keyed.iter().map(|(key, _)| *key).min() else {
            return Vec::new();
        };
        keyed
            .into_iter()
            .filter(|(key, _)| *key == best)
            .map(|(_, turn)| turn)
            .collect()
    }
}

impl Strategy for SearchStrategy {
    fn choose_move(&mut self, state: &GameState) -> Result<Coord> {
        let turn = self.plan(state)?;
        let after_move = state.apply(turn.move_to)?;
        self.memo.remember(after_move, turn.shoot_at);
        Ok(turn.move_to)
    }

    fn choose_shoot(&mut self, state: &GameState) -> Result<Coord> {
        check_turn(state, self.player, Phase::Shoot)?;
        self.memo.recall(state)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::turn::classify;

    fn search(player: u8, ranking: Ranking) -> SearchStrategy {
        SearchStrategy::new(PlayerId::new(player), ranking, GameRng::new(11))
    }

    #[test]
    fn test_takes_winning_turn() {
        // Moving to (1,0) and shooting (2,0) leaves player 0 with 2 tiles vs 1.
        let state = GameState::parse("0..1").unwrap();
        let mut strategy = search(0, Ranking::Any);

        for _ in 0..20 {
            let turn = strategy.plan(&state).unwrap();
            assert_eq!(classify(&turn.result, PlayerId::new(0)), TurnCategory::Win);
        }
    }

    #[test]
    fn test_never_skips_a_better_category() {
        let boards = ["..01.", ".01.", "0.1", "0..1", "0...\n.#..\n..#1", ".0.\n...\n.1."];
        for layout in boards {
            let state = GameState::parse(layout).unwrap();
            let best = enumerate_turns(&state)
                .iter()
                .map(|t| t.category(PlayerId::new(0)))
                .min()
                .unwrap();

            let mut strategy = search(0, Ranking::MinimizeOpponent);
            let turn = strategy.plan(&state).unwrap();
            assert_eq!(turn.category(PlayerId::new(0)), best, "layout {:?}", layout);
        }
    }

    #[test]
    fn test_settles_for_loss_when_nothing_else() {
        // The only turn: step left, shoot the tile just vacated.
        let state = GameState::parse(".01.").unwrap();
        let mut strategy = search(0, Ranking::Any);

        let turn = strategy.plan(&state).unwrap();
        assert_eq!(turn.category(PlayerId::new(0)), TurnCategory::Loss);
        assert_eq!((turn.move_to, turn.shoot_at), (Coord::new(0, 0), Coord::new(1, 0)));
    }

    #[test]
    fn test_settles_for_stalemate_when_nothing_else() {
        let state = GameState::parse("0.1").unwrap();
        let mut strategy = search(0, Ranking::Any);

        let turn = strategy.plan(&state).unwrap();
        assert_eq!(turn.category(PlayerId::new(0)), TurnCategory::Stalemate);
    }

    #[test]
    fn test_minimize_opponent_ranking() {
        let state = GameState::parse(
            "......\n\
             .0....\n\
             ......\n\
             ....1.\n\
             ......",
        )
        .unwrap();
        let mut strategy = search(0, Ranking::MinimizeOpponent);
        let turn = strategy.plan(&state).unwrap();

        let best = enumerate_turns(&state)
            .into_iter()
            .filter(|t| t.category(PlayerId::new(0)) == TurnCategory::Continuing)
            .map(|t| t.result.valid_moves(PlayerId::new(1)).len())
            .min()
            .unwrap();
        assert_eq!(turn.result.valid_moves(PlayerId::new(1)).len(), best);
    }

    #[test]
    fn test_move_difference_ranking() {
        let state = GameState::parse("0....\n.....\n.....\n....1").unwrap();
        let mut strategy = search(0, Ranking::MoveDifference);
        let turn = strategy.plan(&state).unwrap();

        let score = |t: &Turn| {
            t.result.valid_moves(PlayerId::new(0)).len() as i64
                - t.result.valid_moves(PlayerId::new(1)).len() as i64
        };
        let best = enumerate_turns(&state)
            .iter()
            .filter(|t| t.category(PlayerId::new(0)) == TurnCategory::Continuing)
            .map(score)
            .max()
            .unwrap();
        assert_eq!(score(&turn), best);
    }

    #[test]
    fn test_choose_shoot_completes_planned_turn() {
        let state = GameState::parse("0....\n.....\n....1").unwrap();
        let mut strategy = search(0, Ranking::MinimizeOpponent);

        let move_to = strategy.choose_move(&state).unwrap();
        let after = state.apply(move_to).unwrap();
        let shoot_at = strategy.choose_shoot(&after).unwrap();

        assert!(after.apply(shoot_at).is_ok());
        // The plan is single use.
        assert!(matches!(strategy.choose_shoot(&after), Err(Error::IllegalState(_))));
    }

    #[test]
    fn test_choose_shoot_rejects_foreign_state() {
        let state = GameState::parse("0....\n.....\n....1").unwrap();
        let mut strategy = search(0, Ranking::Any);

        let move_to = strategy.choose_move(&state).unwrap();
        let other = state
            .valid_moves(PlayerId::new(0))
            .into_iter()
            .find(|c| *c != move_to)
            .unwrap();
        let elsewhere = state.apply(other).unwrap();

        assert!(matches!(strategy.choose_shoot(&elsewhere), Err(Error::IllegalState(_))));
    }

    #[test]
    fn test_name_mentions_ranking() {
        assert_eq!(search(0, Ranking::MoveDifference).name(), "Search (MoveDifference)");
    }
}
