//! # tileshot
//!
//! Rules engine for a territory-capture grid game. Each turn the current
//! player moves like a chess queen, then shoots out one tile reachable from
//! the new position. The game ends when no player can reach another; the
//! largest territory wins.
//!
//! ## Design Principles
//!
//! 1. **Immutable States**: every transition returns a new `GameState`.
//!    Tiles live in an `im` vector, so deriving a state is cheap and search
//!    explores candidates without copying the board.
//!
//! 2. **N-Player First**: every API works for one to ten players. Two-player
//!    rules are just the common case.
//!
//! 3. **Collaborators, Not Frameworks**: rendering and input plug into the
//!    arbiter through three small traits and completion handles.
//!
//! ## Modules
//!
//! - `core`: coordinates, players, layouts, game state, outcomes, config, RNG
//! - `ai`: random and one-turn search strategies, background worker
//! - `arbiter`: turn state machine, collaborator traits, headless drivers
//! - `boards`: built-in layouts

pub mod ai;
pub mod arbiter;
pub mod boards;
pub mod core;

// Re-export commonly used types
pub use crate::core::{
    ControllerKind, Coord, Error, GameConfig, GameResult, GameRng, GameState, Outcome, Phase,
    PlayerId, PlayerMap, Result,
};

pub use crate::ai::{
    BackgroundStrategy, PlannedTurn, RandomStrategy, Ranking, SearchStrategy, Strategy, Turn,
    TurnCategory,
};

pub use crate::arbiter::{
    Arbiter, ArbiterBuilder, Board, Controller, MoveHandle, Player, ShootHandle, Tile, TileId,
    TurnState,
};
