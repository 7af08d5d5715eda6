//! Computer players.
//!
//! ## Overview
//!
//! Strategies pick a whole turn (a move and a shot) for the player whose turn
//! it is. They are pure consumers of [`GameState`](crate::core::GameState):
//! every candidate is explored on its own derived state, so no search needs
//! synchronization.
//!
//! - [`RandomStrategy`]: uniform over legal moves, then uniform over shots.
//! - [`SearchStrategy`]: every (move, shoot) pair, bucketed by outcome, with a
//!   [`Ranking`] to choose among turns that keep the game going.
//! - [`BackgroundStrategy`]: runs any strategy on a worker thread and reports
//!   through a completion callback.
//!
//! ## Usage
//!
//! ```rust
//! use tileshot::ai::{Ranking, SearchStrategy, Strategy};
//! use tileshot::core::{GameRng, GameState, PlayerId};
//!
//! let state = GameState::parse("0..1").unwrap();
//! let mut ai = SearchStrategy::new(PlayerId::new(0), Ranking::MinimizeOpponent, GameRng::new(1));
//!
//! let move_to = ai.choose_move(&state).unwrap();
//! let after_move = state.apply(move_to).unwrap();
//! let shoot_at = ai.choose_shoot(&after_move).unwrap();
//!
//! let after_turn = after_move.apply(shoot_at).unwrap();
//! assert_eq!(after_turn.winning_player(), Ok(PlayerId::new(0)));
//! ```

pub mod background;
pub mod random;
pub mod search;
pub mod strategy;
pub mod turn;

pub use background::BackgroundStrategy;
pub use random::RandomStrategy;
pub use search::{Ranking, SearchStrategy};
pub use strategy::{PlannedTurn, Strategy};
pub use turn::{classify, enumerate_turns, Turn, TurnCategory};
