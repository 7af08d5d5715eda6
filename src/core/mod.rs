//! Core rules: players, coordinates, layouts, game state, RNG, configuration.
//!
//! Everything here is a pure value or a pure function of one. Nothing in this
//! module performs I/O or needs synchronization.

pub mod config;
pub mod coord;
pub mod error;
pub mod layout;
pub mod outcome;
pub mod player;
pub mod rng;
pub mod state;

pub use config::{ControllerKind, GameConfig};
pub use coord::{Coord, DIRECTIONS};
pub use error::{Error, LayoutProblem, Result};
pub use outcome::{GameResult, Outcome};
pub use player::{PlayerId, PlayerMap, MAX_PLAYERS};
pub use rng::GameRng;
pub use state::{GameState, Phase};
