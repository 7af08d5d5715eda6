//! Game configuration.
//!
//! A `GameConfig` names everything needed to set up a game headlessly:
//! - the board layout
//! - who controls each player (a human or one of the computer strategies)
//! - the seed all computer players derive their randomness from

use serde::{Deserialize, Serialize};

use super::error::{Error, Result};
use super::player::PlayerId;
use super::state::GameState;
use crate::ai::Ranking;

/// Who drives a player's turns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControllerKind {
    /// Turns come from `Arbiter::select` calls.
    #[default]
    Human,
    /// Uniformly random moves and shots.
    Random,
    /// One-turn exhaustive search, computed on the calling thread.
    Search { ranking: Ranking },
    /// One-turn exhaustive search, computed on a worker thread.
    BackgroundSearch { ranking: Ranking },
}

impl ControllerKind {
    #[must_use]
    pub fn is_computer(self) -> bool {
        !matches!(self, ControllerKind::Human)
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Board layout in layout notation.
    pub layout: String,

    /// Seed for every computer player's RNG.
    pub seed: u64,

    /// Controller per player, in player order. Players past the end are human.
    pub controllers: Vec<ControllerKind>,
}

impl GameConfig {
    /// Create a configuration where every player is human.
    pub fn new(layout: impl Into<String>) -> Self {
        Self {
            layout: layout.into(),
            seed: 42,
            controllers: Vec::new(),
        }
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the controller of one player.
    #[must_use]
    pub fn with_controller(mut self, player: PlayerId, kind: ControllerKind) -> Self {
        if self.controllers.len() <= player.index() {
            self.controllers.resize(player.index() + 1, ControllerKind::Human);
        }
        self.controllers[player.index()] = kind;
        self
    }

    /// Controller of `player`.
    #[must_use]
    pub fn controller(&self, player: PlayerId) -> ControllerKind {
        self.controllers
            .get(player.index())
            .copied()
            .unwrap_or_default()
    }

    /// Parse the layout into the starting state.
    pub fn initial_state(&self) -> Result<GameState> {
        GameState::parse(&self.layout)
    }

    /// Check that the layout parses and every configured controller belongs
    /// to a player on the board. Returns the starting state.
    pub fn validate(&self) -> Result<GameState> {
        let state = self.initial_state()?;
        if self.controllers.len() > state.player_count() {
            return Err(Error::invalid_config(format!(
                "{} controllers configured for a {}-player layout",
                self.controllers.len(),
                state.player_count()
            )));
        }
        Ok(state)
    }
}
