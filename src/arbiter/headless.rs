//! Collaborators for running games without a front end.
//!
//! Every callback is appended to a shared [`Transcript`], which drivers and
//! tests inspect afterwards. [`Arbiter::headless`] wires a complete game from
//! a [`GameConfig`].

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use rustc_hash::FxHashSet;
use tracing::warn;

use crate::core::{Coord, GameConfig, GameRng, PlayerId, PlayerMap, Result};

use super::collaborators::{Board, Player, Tile};
use super::controller::Controller;
use super::handle::{MoveHandle, ShootHandle};
use super::machine::{Arbiter, ArbiterBuilder};

/// One collaborator callback, as recorded in a [`Transcript`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notification {
    PendingMove(PlayerId),
    Moved { player: PlayerId, target: Coord },
    PendingShoot(PlayerId),
    Shot { player: PlayerId, target: Coord },
    PlayerReset { player: PlayerId, start: Coord },
    InvalidSelection(Coord),
    TileShot(Coord),
    TileReset { coord: Coord, enabled: bool },
    Won {
        winner: PlayerId,
        territory_sizes: Vec<usize>,
        unreachable: usize,
    },
    Drawn {
        winners: Vec<PlayerId>,
        territory_sizes: Vec<usize>,
        unreachable: usize,
    },
    Stalemate { unreachable: usize },
}

/// Shared, append-only log of notifications.
#[derive(Clone, Debug, Default)]
pub struct Transcript(Rc<RefCell<Vec<Notification>>>);

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, notification: Notification) {
        self.0.borrow_mut().push(notification);
    }

    /// Snapshot of everything recorded so far.
    #[must_use]
    pub fn entries(&self) -> Vec<Notification> {
        self.0.borrow().clone()
    }

    #[must_use]
    pub fn last(&self) -> Option<Notification> {
        self.0.borrow().last().cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    /// Count the entries matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&Notification) -> bool) -> usize {
        self.0.borrow().iter().filter(|&n| predicate(n)).count()
    }
}

fn territory_sizes(territories: &PlayerMap<FxHashSet<Coord>>) -> Vec<usize> {
    territories.values().map(|territory| territory.len()).collect()
}

/// Board that records the end of each game.
#[derive(Clone, Debug)]
pub struct TranscriptBoard {
    transcript: Transcript,
}

impl TranscriptBoard {
    pub fn new(transcript: Transcript) -> Self {
        Self { transcript }
    }
}

impl Board for TranscriptBoard {
    fn on_win(
        &mut self,
        winner: PlayerId,
        territories: &PlayerMap<FxHashSet<Coord>>,
        unreachable: &FxHashSet<Coord>,
    ) {
        self.transcript.record(Notification::Won {
            winner,
            territory_sizes: territory_sizes(territories),
            unreachable: unreachable.len(),
        });
    }

    fn on_draw(
        &mut self,
        winners: &[PlayerId],
        territories: &PlayerMap<FxHashSet<Coord>>,
        unreachable: &FxHashSet<Coord>,
    ) {
        self.transcript.record(Notification::Drawn {
            winners: winners.to_vec(),
            territory_sizes: territory_sizes(territories),
            unreachable: unreachable.len(),
        });
    }

    fn on_stalemate(&mut self, unreachable: &FxHashSet<Coord>) {
        self.transcript.record(Notification::Stalemate {
            unreachable: unreachable.len(),
        });
    }
}

/// Player piece that finishes every move and shot on the spot.
#[derive(Clone, Debug)]
pub struct InstantPlayer {
    player: PlayerId,
    transcript: Transcript,
}

impl InstantPlayer {
    pub fn new(player: PlayerId, transcript: Transcript) -> Self {
        Self { player, transcript }
    }
}

impl Player for InstantPlayer {
    fn on_pending_move(&mut self) {
        self.transcript.record(Notification::PendingMove(self.player));
    }

    fn on_move(&mut self, target: Coord, handle: MoveHandle) {
        self.transcript.record(Notification::Moved {
            player: self.player,
            target,
        });
        handle.move_done();
    }

    fn on_pending_shoot(&mut self) {
        self.transcript.record(Notification::PendingShoot(self.player));
    }

    fn on_shoot(&mut self, target: Coord, handle: ShootHandle) {
        self.transcript.record(Notification::Shot {
            player: self.player,
            target,
        });
        if let Err(err) = handle.shoot_done() {
            warn!(player = %self.player, error = %err, "shot already completed");
        }
    }

    fn on_reset(&mut self, start: Coord) {
        self.transcript.record(Notification::PlayerReset {
            player: self.player,
            start,
        });
    }
}

#[derive(Debug, Default)]
struct HeldHandles {
    moves: VecDeque<MoveHandle>,
    shots: VecDeque<ShootHandle>,
}

/// Completion handles held back by [`DeferredPlayer`]s, oldest first.
#[derive(Clone, Debug, Default)]
pub struct Completions(Rc<RefCell<HeldHandles>>);

impl Completions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take_move(&self) -> Option<MoveHandle> {
        self.0.borrow_mut().moves.pop_front()
    }

    pub fn take_shoot(&self) -> Option<ShootHandle> {
        self.0.borrow_mut().shots.pop_front()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        let held = self.0.borrow();
        held.moves.is_empty() && held.shots.is_empty()
    }
}

/// Player piece whose animations finish whenever the driver says so.
///
/// Handles land in a shared [`Completions`]; the driver completes them later.
#[derive(Clone, Debug)]
pub struct DeferredPlayer {
    inner: InstantPlayer,
    held: Completions,
}

impl DeferredPlayer {
    pub fn new(player: PlayerId, transcript: Transcript, held: Completions) -> Self {
        Self {
            inner: InstantPlayer::new(player, transcript),
            held,
        }
    }
}

impl Player for DeferredPlayer {
    fn on_pending_move(&mut self) {
        self.inner.on_pending_move();
    }

    fn on_move(&mut self, target: Coord, handle: MoveHandle) {
        self.inner.transcript.record(Notification::Moved {
            player: self.inner.player,
            target,
        });
        self.held.0.borrow_mut().moves.push_back(handle);
    }

    fn on_pending_shoot(&mut self) {
        self.inner.on_pending_shoot();
    }

    fn on_shoot(&mut self, target: Coord, handle: ShootHandle) {
        self.inner.transcript.record(Notification::Shot {
            player: self.inner.player,
            target,
        });
        self.held.0.borrow_mut().shots.push_back(handle);
    }

    fn on_reset(&mut self, start: Coord) {
        self.inner.on_reset(start);
    }
}

/// Grid cell that records what happens to it.
///
/// An inert tile leaves shot completion to the player; a completing tile
/// reports the shot itself.
#[derive(Clone, Debug)]
pub struct HeadlessTile {
    coord: Coord,
    transcript: Transcript,
    completes_shots: bool,
}

impl HeadlessTile {
    pub fn inert(coord: Coord, transcript: Transcript) -> Self {
        Self {
            coord,
            transcript,
            completes_shots: false,
        }
    }

    pub fn completing(coord: Coord, transcript: Transcript) -> Self {
        Self {
            coord,
            transcript,
            completes_shots: true,
        }
    }
}

impl Tile for HeadlessTile {
    fn coords(&self) -> Coord {
        self.coord
    }

    fn on_invalid_selection(&mut self) {
        self.transcript.record(Notification::InvalidSelection(self.coord));
    }

    fn on_shot(&mut self, handle: ShootHandle) {
        self.transcript.record(Notification::TileShot(self.coord));
        if self.completes_shots {
            if let Err(err) = handle.shoot_done() {
                warn!(coord = %self.coord, error = %err, "shot already completed");
            }
        }
    }

    fn on_reset(&mut self, enabled: bool) {
        self.transcript.record(Notification::TileReset {
            coord: self.coord,
            enabled,
        });
    }
}

impl Arbiter {
    /// Wire a game from `config` with headless collaborators.
    ///
    /// Seats get [`InstantPlayer`] pieces and the controllers named in the
    /// config, each with its own stream forked from `config.seed`. Every grid
    /// cell gets an inert [`HeadlessTile`], registered column by column.
    /// Call [`reset`](Arbiter::reset) to start playing.
    pub fn headless(config: &GameConfig, transcript: Transcript) -> Result<Arbiter> {
        let state = config.validate()?;
        let mut rng = GameRng::new(config.seed);

        let mut builder = ArbiterBuilder::new(state.duplicate())
            .board(TranscriptBoard::new(transcript.clone()));

        for player in PlayerId::all(state.player_count()) {
            let controller = Controller::from_kind(config.controller(player), player, rng.fork());
            builder = builder.player(InstantPlayer::new(player, transcript.clone()), controller);
        }

        for column in 0..state.width() {
            for row in 0..state.height() {
                builder = builder.tile(HeadlessTile::inert(
                    Coord::new(column, row),
                    transcript.clone(),
                ));
            }
        }

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_is_shared() {
        let transcript = Transcript::new();
        let copy = transcript.clone();
        copy.record(Notification::PendingMove(PlayerId::new(0)));

        assert_eq!(transcript.len(), 1);
        assert_eq!(
            transcript.last(),
            Some(Notification::PendingMove(PlayerId::new(0)))
        );
        transcript.clear();
        assert!(copy.is_empty());
    }

    #[test]
    fn test_headless_registers_every_cell() {
        let config = GameConfig::new("0..\n.#1");
        let arbiter = Arbiter::headless(&config, Transcript::new()).unwrap();

        assert_eq!(arbiter.tile_count(), 6);
        assert!(arbiter.tile_at(Coord::new(1, 1)).is_some());
        assert!(arbiter.tile_at(Coord::new(3, 0)).is_none());
    }

    #[test]
    fn test_headless_rejects_bad_layout() {
        let config = GameConfig::new("0..\n.1");
        assert!(Arbiter::headless(&config, Transcript::new()).is_err());
    }
}
