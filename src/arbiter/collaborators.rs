//! What the arbiter expects from the outside world.
//!
//! Rendering, animation and input widgets live outside this crate. They plug
//! in through three narrow traits, and the arbiter depends on nothing else.
//! Human and computer seats use the same [`Player`] surface; who decides the
//! turn is a separate [`Controller`](super::Controller).

use rustc_hash::FxHashSet;

use crate::core::{Coord, PlayerId, PlayerMap};

use super::handle::{MoveHandle, ShootHandle};

/// Index of a tile in the order tiles were registered with the arbiter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TileId(pub usize);

/// Receives the end of the game. Exactly one method is called per game.
pub trait Board {
    fn on_win(
        &mut self,
        winner: PlayerId,
        territories: &PlayerMap<FxHashSet<Coord>>,
        unreachable: &FxHashSet<Coord>,
    );

    fn on_draw(
        &mut self,
        winners: &[PlayerId],
        territories: &PlayerMap<FxHashSet<Coord>>,
        unreachable: &FxHashSet<Coord>,
    );

    fn on_stalemate(&mut self, unreachable: &FxHashSet<Coord>);
}

/// The on-board piece of one player.
pub trait Player {
    /// A human player should now pick a destination.
    fn on_pending_move(&mut self) {}

    /// Move to `target`, then call [`MoveHandle::move_done`].
    fn on_move(&mut self, target: Coord, handle: MoveHandle);

    /// A human player should now pick a tile to shoot.
    fn on_pending_shoot(&mut self) {}

    /// Shoot at `target`. Either this player or the target tile must call
    /// [`ShootHandle::shoot_done`], not both.
    fn on_shoot(&mut self, target: Coord, handle: ShootHandle);

    /// A new game starts with this player on `start`.
    fn on_reset(&mut self, start: Coord);
}

/// One selectable grid cell.
pub trait Tile {
    fn coords(&self) -> Coord;

    /// This tile was selected but is not a legal target right now.
    fn on_invalid_selection(&mut self);

    /// This tile was shot. May complete the shot through `handle`.
    fn on_shot(&mut self, handle: ShootHandle);

    /// A new game starts; `enabled` says whether this tile is in play.
    fn on_reset(&mut self, enabled: bool);
}
