//! Turn sequencing between the rules and the outside world.
//!
//! ## Overview
//!
//! The [`Arbiter`] owns the authoritative [`GameState`](crate::core::GameState)
//! and walks every turn through the same protocol:
//!
//! ```text
//! PendingMove -> Moving -> PendingShoot -> Shooting
//!     -> WinCheck -> SwitchingPlayers -> StalemateCheck -> PendingMove
//!                 \-> Won                \-> Stalemate
//! ```
//!
//! Rendering and input live behind the [`Board`], [`Player`] and [`Tile`]
//! traits. Animations are asynchronous: the arbiter hands the collaborator a
//! [`MoveHandle`] or [`ShootHandle`] and resumes once the handle reports.
//! Computer seats take their turns through a [`Controller`]; background
//! controllers think on a worker thread and report the same way.
//!
//! ## Driving a game
//!
//! ```rust
//! use tileshot::ai::Ranking;
//! use tileshot::arbiter::{Arbiter, Transcript, TurnState};
//! use tileshot::core::{ControllerKind, GameConfig, PlayerId};
//!
//! let search = ControllerKind::Search { ranking: Ranking::MinimizeOpponent };
//! let config = GameConfig::new("0...\n....\n...1")
//!     .with_controller(PlayerId::new(0), search)
//!     .with_controller(PlayerId::new(1), search);
//!
//! let mut arbiter = Arbiter::headless(&config, Transcript::new()).unwrap();
//! arbiter.reset().unwrap();
//!
//! // Instant collaborators and synchronous computer players finish the game
//! // within `reset`.
//! assert!(arbiter.turn_state().is_terminal());
//! assert!(arbiter.outcome().is_some());
//! ```

pub mod collaborators;
pub mod controller;
pub mod handle;
pub mod headless;
pub mod machine;
pub mod turn_state;

pub use collaborators::{Board, Player, Tile, TileId};
pub use controller::Controller;
pub use handle::{MoveHandle, ShootHandle};
pub use headless::{
    Completions, DeferredPlayer, HeadlessTile, InstantPlayer, Notification, Transcript,
    TranscriptBoard,
};
pub use machine::{Arbiter, ArbiterBuilder};
pub use turn_state::TurnState;
