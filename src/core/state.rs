//! Game state: the board grid, player positions, and whose turn it is.
//!
//! ## GameState
//!
//! An immutable snapshot. Every transition ([`GameState::apply`]) returns a new
//! instance and leaves the receiver untouched, so search code can explore
//! branches freely and callers can keep old states as history.
//!
//! The grid lives in an `im` persistent vector, making [`GameState::duplicate`]
//! O(1) and a shoot O(log n).
//!
//! ## Rules
//!
//! - A player moves like a chess queen: along any of the eight compass and
//!   diagonal rays, over enabled, unoccupied tiles, stopping before the first
//!   edge, hole, or player.
//! - After moving, the same player shoots (disables) a tile reachable from
//!   their new position by the same ray rule.
//! - The game is over once no two players share a connected region of enabled
//!   tiles; the largest region wins.

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::coord::{Coord, DIRECTIONS};
use super::error::{Error, LayoutProblem, Result};
use super::layout;
use super::outcome::GameResult;
use super::player::{PlayerId, PlayerMap};

/// Half of a player's turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// The current player relocates.
    Move,
    /// The current player disables a tile.
    Shoot,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Move => write!(f, "move"),
            Phase::Shoot => write!(f, "shoot"),
        }
    }
}

/// Board and player snapshot.
///
/// Invariants:
/// - one position per player, in bounds, on an enabled tile
/// - no two players share a tile
/// - `current` only advances on a shoot, cyclically
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    width: i32,
    height: i32,

    /// Enabled flags, column-major: index `column * height + row`.
    tiles: Vector<bool>,

    players: PlayerMap<Coord>,
    current: PlayerId,
    phase: Phase,
}

impl GameState {
    /// Build the initial state described by a layout string.
    ///
    /// Player 0 moves first.
    ///
    /// ```
    /// use tileshot::core::{Coord, GameState, Phase, PlayerId};
    ///
    /// let state = GameState::parse("..0..").unwrap();
    /// assert_eq!(state.player_position(PlayerId::new(0)), Coord::new(2, 0));
    /// assert_eq!(state.phase(), Phase::Move);
    /// assert_eq!(state.valid_moves(PlayerId::new(0)).len(), 4);
    /// ```
    pub fn parse(layout: &str) -> Result<Self> {
        let parsed = layout::parse(layout)?;
        let players = PlayerMap::from_vec(parsed.players).ok_or(LayoutProblem::NoPlayers)?;

        Ok(Self {
            width: parsed.width as i32,
            height: parsed.height as i32,
            tiles: parsed.tiles.into_iter().collect(),
            players,
            current: PlayerId::new(0),
            phase: Phase::Move,
        })
    }

    /// An independent copy. Later transitions on either never affect the other.
    #[must_use]
    pub fn duplicate(&self) -> Self {
        self.clone()
    }

    // === Accessors ===

    /// Number of columns.
    #[must_use]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Position of `player`.
    ///
    /// # Panics
    ///
    /// Panics if `player` is not part of this game.
    #[must_use]
    pub fn player_position(&self, player: PlayerId) -> Coord {
        self.players[player]
    }

    /// All player positions in player order.
    #[must_use]
    pub fn positions(&self) -> &PlayerMap<Coord> {
        &self.players
    }

    #[must_use]
    pub fn in_bounds(&self, coord: Coord) -> bool {
        (0..self.width).contains(&coord.column) && (0..self.height).contains(&coord.row)
    }

    /// Whether `coord` is on the board and its tile is still in play.
    #[must_use]
    pub fn is_enabled(&self, coord: Coord) -> bool {
        self.tile_index(coord)
            .and_then(|index| self.tiles.get(index).copied())
            .unwrap_or(false)
    }

    /// The player standing on `coord`, if any.
    #[must_use]
    pub fn occupant(&self, coord: Coord) -> Option<PlayerId> {
        self.players
            .iter()
            .find(|(_, position)| **position == coord)
            .map(|(player, _)| player)
    }

    /// Every enabled tile, column by column.
    pub fn enabled_tiles(&self) -> impl Iterator<Item = Coord> + '_ {
        let height = self.height;
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, enabled)| **enabled)
            .map(move |(index, _)| Coord::new(index as i32 / height, index as i32 % height))
    }

    fn tile_index(&self, coord: Coord) -> Option<usize> {
        self.in_bounds(coord)
            .then(|| (coord.column * self.height + coord.row) as usize)
    }

    // === Move generation ===

    /// Tiles `player` could move to (or shoot) from their current position.
    ///
    /// Walks each of the eight rays outward and collects tiles while they are
    /// in bounds, enabled and unoccupied. The first tile failing any of those
    /// ends the ray and is not included.
    ///
    /// # Panics
    ///
    /// Panics if `player` is not part of this game.
    #[must_use]
    pub fn valid_moves(&self, player: PlayerId) -> FxHashSet<Coord> {
        let origin = self.players[player];
        let mut moves = FxHashSet::default();

        for &direction in &DIRECTIONS {
            let mut cursor = origin.offset(direction);
            while self.is_enabled(cursor) && self.occupant(cursor).is_none() {
                moves.insert(cursor);
                cursor = cursor.offset(direction);
            }
        }

        moves
    }

    /// Whether the current player may target `coord` in the current phase.
    #[must_use]
    pub fn is_valid_move(&self, coord: Coord) -> bool {
        self.valid_moves(self.current).contains(&coord)
    }

    /// Apply the current player's move or shoot at `coord`.
    ///
    /// - Move phase: relocates the current player and switches to shoot.
    /// - Shoot phase: disables the tile, switches to move and hands the turn
    ///   to the next player.
    ///
    /// Fails with [`Error::IllegalMove`] when `coord` is off the board or not
    /// in [`valid_moves`](Self::valid_moves) for the current player.
    pub fn apply(&self, coord: Coord) -> Result<GameState> {
        let illegal = || Error::IllegalMove {
            coord,
            phase: self.phase,
        };
        let index = self.tile_index(coord).ok_or_else(illegal)?;
        if !self.is_valid_move(coord) {
            return Err(illegal());
        }

        let mut next = self.clone();
        match self.phase {
            Phase::Move => {
                next.players[self.current] = coord;
                next.phase = Phase::Shoot;
            }
            Phase::Shoot => {
                next.tiles.set(index, false);
                next.phase = Phase::Move;
                next.current = self.current.next(self.player_count());
            }
        }
        Ok(next)
    }

    // === Connectivity ===

    /// All enabled tiles connected to `start` through enabled tiles, using
    /// 8-directional adjacency. Occupancy is ignored. Empty if `start` itself
    /// is not enabled.
    #[must_use]
    pub fn region_from(&self, start: Coord) -> FxHashSet<Coord> {
        let mut visited = FxHashSet::default();
        if !self.is_enabled(start) {
            return visited;
        }

        visited.insert(start);
        let mut frontier = vec![start];
        while let Some(tile) = frontier.pop() {
            for neighbour in tile.neighbours() {
                if self.is_enabled(neighbour) && visited.insert(neighbour) {
                    frontier.push(neighbour);
                }
            }
        }

        visited
    }

    /// The connected territory of `player`, including their own tile.
    ///
    /// # Panics
    ///
    /// Panics if `player` is not part of this game.
    #[must_use]
    pub fn reachable_tiles(&self, player: PlayerId) -> FxHashSet<Coord> {
        self.region_from(self.players[player])
    }

    /// Territory of every player.
    #[must_use]
    pub fn territories(&self) -> PlayerMap<FxHashSet<Coord>> {
        self.players.map(|_, &position| self.region_from(position))
    }

    /// Enabled tiles that lie in no player's territory.
    #[must_use]
    pub fn unreachable_enabled_tiles(&self) -> FxHashSet<Coord> {
        let territories = self.territories();
        self.enabled_tiles()
            .filter(|tile| !territories.values().any(|territory| territory.contains(tile)))
            .collect()
    }

    // === End of game ===

    /// True once every pair of players is mutually unreachable.
    ///
    /// A one-player game is never over by this rule.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        if self.player_count() < 2 {
            return false;
        }

        let territories = self.territories();
        for (a, territory_a) in territories.iter() {
            for (b, territory_b) in territories.iter().filter(|(b, _)| *b > a) {
                if territory_a.contains(&self.players[b]) || territory_b.contains(&self.players[a]) {
                    return false;
                }
            }
        }
        true
    }

    /// True when the game is not over but the current player cannot move.
    #[must_use]
    pub fn is_stalemate(&self) -> bool {
        !self.is_game_over() && self.valid_moves(self.current).is_empty()
    }

    /// Whether two or more players tie for the largest territory.
    ///
    /// Fails with [`Error::IllegalState`] if the game is not over.
    pub fn is_draw(&self) -> Result<bool> {
        Ok(self.leaders()?.len() > 1)
    }

    /// The sole holder of the largest territory.
    ///
    /// Fails with [`Error::IllegalState`] if the game is not over or ended in
    /// a draw.
    pub fn winning_player(&self) -> Result<PlayerId> {
        match self.leaders()?.as_slice() {
            [winner] => Ok(*winner),
            _ => Err(Error::illegal_state("game ended in a draw; there is no single winner")),
        }
    }

    /// Combined [`is_draw`](Self::is_draw) / [`winning_player`](Self::winning_player);
    /// `None` while the game is still running.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        let leaders = self.leaders().ok()?;
        Some(match leaders.as_slice() {
            [winner] => GameResult::Winner(*winner),
            _ => GameResult::Draw(leaders),
        })
    }

    /// Players whose territory size equals the maximum.
    fn leaders(&self) -> Result<Vec<PlayerId>> {
        if !self.is_game_over() {
            return Err(Error::illegal_state("game is not over"));
        }

        let sizes = self.territories().map(|_, territory| territory.len());
        let best = sizes.values().copied().max().unwrap_or(0);
        Ok(sizes
            .iter()
            .filter(|(_, &size)| size == best)
            .map(|(player, _)| player)
            .collect())
    }
}

/// Renders the board in layout notation.
impl std::fmt::Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..self.height {
            if row > 0 {
                writeln!(f)?;
            }
            for column in 0..self.width {
                let coord = Coord::new(column, row);
                let symbol = match self.occupant(coord) {
                    Some(player) => char::from(b'0' + player.0),
                    None if self.is_enabled(coord) => '.',
                    None => '#',
                };
                write!(f, "{}", symbol)?;
            }
        }
        Ok(())
    }
}
