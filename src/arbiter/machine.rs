//! The turn-sequencing state machine.

use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use rustc_hash::FxHashMap;
use tracing::{debug, error, info, warn};

use crate::core::{Coord, Error, GameResult, GameState, Outcome, PlayerId, PlayerMap, Result};

use super::collaborators::{Board, Player, Tile, TileId};
use super::controller::Controller;
use super::handle::{post, ActionId, MoveHandle, ShootHandle, Signal};
use super::turn_state::TurnState;

/// Log a protocol violation on its way out to the caller.
fn fail(err: Error) -> Error {
    error!(error = %err, "turn protocol violated");
    err
}

struct Seat {
    piece: Box<dyn Player>,
    controller: Controller,
}

/// Builder for an [`Arbiter`].
///
/// Register one player per seat, in player order, and any number of tiles
/// (normally one per grid cell).
pub struct ArbiterBuilder {
    initial: GameState,
    board: Option<Box<dyn Board>>,
    seats: Vec<Seat>,
    tiles: Vec<Box<dyn Tile>>,
}

impl ArbiterBuilder {
    pub fn new(initial: GameState) -> Self {
        Self {
            initial,
            board: None,
            seats: Vec::new(),
            tiles: Vec::new(),
        }
    }

    pub fn board(mut self, board: impl Board + 'static) -> Self {
        self.board = Some(Box::new(board));
        self
    }

    /// Add the next seat.
    pub fn player(mut self, piece: impl Player + 'static, controller: Controller) -> Self {
        self.seats.push(Seat {
            piece: Box::new(piece),
            controller,
        });
        self
    }

    /// Register a tile. Its [`TileId`] is its registration index.
    pub fn tile(mut self, tile: impl Tile + 'static) -> Self {
        self.tiles.push(Box::new(tile));
        self
    }

    pub fn build(self) -> Result<Arbiter> {
        let board = self
            .board
            .ok_or_else(|| Error::invalid_config("arbiter needs a board"))?;

        let player_count = self.initial.player_count();
        if self.seats.len() != player_count {
            return Err(Error::invalid_config(format!(
                "{} seats registered for a {}-player game",
                self.seats.len(),
                player_count
            )));
        }
        let seats = PlayerMap::from_vec(self.seats)
            .ok_or_else(|| Error::invalid_config("seat count out of range"))?;

        let mut tile_lookup = FxHashMap::default();
        for (index, tile) in self.tiles.iter().enumerate() {
            if tile_lookup.insert(tile.coords(), TileId(index)).is_some() {
                return Err(Error::invalid_config(format!(
                    "two tiles registered at {}",
                    tile.coords()
                )));
            }
        }

        let (outbox, inbox) = mpsc::channel();
        Ok(Arbiter {
            state: self.initial.duplicate(),
            initial: self.initial,
            turn: TurnState::PendingMove,
            board,
            seats,
            tiles: self.tiles,
            tile_lookup,
            outbox,
            inbox,
            action: 0,
            planning: false,
            planned_shoot: None,
            outcome: None,
        })
    }
}

/// Sequences turns between the game rules and the outside world.
///
/// Single owner, single thread: one selection or one dispatch at a time.
/// The arbiter never blocks on collaborators or computer players. It hands
/// out completion handles and resumes when their signals are dispatched.
/// Signals sent from inside a callback are dispatched before the entry point
/// that triggered the callback returns. Signals sent later are picked up by
/// [`dispatch_pending`](Arbiter::dispatch_pending) or
/// [`wait_and_dispatch`](Arbiter::wait_and_dispatch).
///
/// Call [`reset`](Arbiter::reset) to start the first game.
pub struct Arbiter {
    initial: GameState,
    state: GameState,
    turn: TurnState,

    board: Box<dyn Board>,
    seats: PlayerMap<Seat>,
    tiles: Vec<Box<dyn Tile>>,
    tile_lookup: FxHashMap<Coord, TileId>,

    outbox: Sender<Signal>,
    inbox: Receiver<Signal>,

    /// The action whose completion is awaited. Bumped for every handle
    /// handed out, every background plan started, and every reset.
    action: ActionId,

    /// A background computer player is working on the current turn.
    planning: bool,
    /// Shot half of a background plan, used once the move completes.
    planned_shoot: Option<Coord>,

    outcome: Option<Outcome>,
}

impl Arbiter {
    // === Accessors ===

    /// The current game state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn turn_state(&self) -> TurnState {
        self.turn
    }

    /// How the last game ended, once it has.
    #[must_use]
    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    #[must_use]
    pub fn controller(&self, player: PlayerId) -> &Controller {
        &self.seats[player].controller
    }

    /// False while a move or shot completion, or a background turn, is outstanding.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        !self.turn.is_animating() && !self.planning
    }

    /// The tile registered at `coord`.
    #[must_use]
    pub fn tile_at(&self, coord: Coord) -> Option<TileId> {
        self.tile_lookup.get(&coord).copied()
    }

    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    // === Entry points ===

    /// Start a new game from the initial state.
    ///
    /// Resynchronizes every player and tile, then prompts the first player
    /// (or runs their computer turn). A starting position that is already
    /// over or stalemated is reported to the board straight away.
    ///
    /// Fails with [`Error::IllegalState`] unless [`is_settled`](Self::is_settled).
    pub fn reset(&mut self) -> Result<()> {
        if !self.is_settled() {
            return Err(fail(Error::illegal_state(
                "reset while a move, shot or computer turn is still in flight",
            )));
        }

        while self.inbox.try_recv().is_ok() {}
        self.action += 1;
        self.state = self.initial.duplicate();
        self.outcome = None;
        self.planned_shoot = None;
        self.turn = TurnState::PendingMove;

        for (player, seat) in self.seats.iter_mut() {
            seat.piece.on_reset(self.state.player_position(player));
        }
        for tile in &mut self.tiles {
            let enabled = self.state.is_enabled(tile.coords());
            tile.on_reset(enabled);
        }
        info!(
            players = self.state.player_count(),
            width = self.state.width(),
            height = self.state.height(),
            "game reset"
        );

        self.settle_turn()?;
        self.dispatch_pending()
    }

    /// A human selected `tile` as the move destination or shoot target.
    ///
    /// Ignored unless the arbiter is waiting for a selection from a human
    /// seat. An illegal target is reported to the tile and changes nothing.
    /// Fails with [`Error::IllegalState`] if `tile` was never registered.
    pub fn select(&mut self, tile: TileId) -> Result<()> {
        let coord = match self.tiles.get(tile.0) {
            Some(registered) => registered.coords(),
            None => return Err(fail(Error::illegal_state(format!("unknown tile {:?}", tile)))),
        };

        if !self.turn.accepts_input() {
            debug!(?tile, state = ?self.turn, "selection ignored");
            return Ok(());
        }
        let player = self.state.current_player();
        if self.seats[player].controller.is_computer() {
            debug!(?tile, %player, "selection ignored on a computer turn");
            return Ok(());
        }

        match self.state.apply(coord) {
            Ok(next) => self.commit(coord, next)?,
            Err(Error::IllegalMove { coord, phase }) => {
                debug!(%coord, %phase, "invalid selection");
                self.tiles[tile.0].on_invalid_selection();
            }
            Err(other) => return Err(fail(other)),
        }

        self.dispatch_pending()
    }

    /// Process every completion signal delivered so far. Never blocks.
    pub fn dispatch_pending(&mut self) -> Result<()> {
        while let Ok(signal) = self.inbox.try_recv() {
            self.handle(signal)?;
        }
        Ok(())
    }

    /// Wait up to `timeout` for a completion signal, then process it and
    /// everything behind it. Returns whether a signal arrived.
    ///
    /// For headless drivers that have nothing else to do while a worker
    /// thread or a deferred animation finishes.
    pub fn wait_and_dispatch(&mut self, timeout: Duration) -> Result<bool> {
        match self.inbox.recv_timeout(timeout) {
            Ok(signal) => {
                self.handle(signal)?;
                self.dispatch_pending()?;
                Ok(true)
            }
            Err(_) => Ok(false),
        }
    }

    // === State machine ===

    fn transition(&mut self, next: TurnState) {
        debug!(
            from = ?self.turn,
            to = ?next,
            player = %self.state.current_player(),
            "turn state"
        );
        self.turn = next;
    }

    fn handle(&mut self, signal: Signal) -> Result<()> {
        match signal {
            Signal::MoveDone { action } => {
                if self.expects(action, TurnState::Moving) {
                    self.transition(TurnState::PendingShoot);
                    self.prompt_shoot()?;
                }
                Ok(())
            }
            Signal::ShootDone { action } => {
                if self.expects(action, TurnState::Shooting) {
                    self.settle_turn()?;
                }
                Ok(())
            }
            Signal::TurnPlanned { action, planned } => {
                if !self.planning || action != self.action {
                    warn!(action, current = self.action, "stale computer turn ignored");
                    return Ok(());
                }
                self.planning = false;
                let planned = planned.map_err(fail)?;
                self.planned_shoot = Some(planned.shoot_at);
                self.play_computer(planned.move_to)
            }
        }
    }

    fn expects(&self, action: ActionId, state: TurnState) -> bool {
        if action == self.action && self.turn == state {
            return true;
        }
        warn!(
            action,
            current = self.action,
            state = ?self.turn,
            "stale completion ignored"
        );
        false
    }

    /// Apply a validated target and hand the animation to the collaborators.
    fn commit(&mut self, target: Coord, next: GameState) -> Result<()> {
        if !self.turn.accepts_input() {
            return Err(fail(Error::illegal_state(format!(
                "cannot apply a target in {:?}",
                self.turn
            ))));
        }

        let mover = self.state.current_player();
        self.state = next;
        self.action += 1;

        if self.turn == TurnState::PendingMove {
            self.transition(TurnState::Moving);
            let handle = MoveHandle::new(self.outbox.clone(), self.action);
            self.seats[mover].piece.on_move(target, handle);
        } else {
            self.transition(TurnState::Shooting);
            let handle = ShootHandle::new(self.outbox.clone(), self.action);
            self.seats[mover].piece.on_shoot(target, handle.clone());
            if let Some(tile) = self.tile_lookup.get(&target).copied() {
                self.tiles[tile.0].on_shot(handle);
            }
        }
        Ok(())
    }

    fn play_computer(&mut self, target: Coord) -> Result<()> {
        let next = self.state.apply(target).map_err(|e| {
            fail(Error::illegal_state(format!(
                "computer player chose an illegal target: {}",
                e
            )))
        })?;
        self.commit(target, next)
    }

    /// WIN_CHECK -> SWITCHING_PLAYERS -> STALEMATE_CHECK -> PENDING_MOVE,
    /// or a terminal state.
    fn settle_turn(&mut self) -> Result<()> {
        self.transition(TurnState::WinCheck);
        if self.state.is_game_over() {
            return self.finish_game();
        }

        self.transition(TurnState::SwitchingPlayers);
        self.transition(TurnState::StalemateCheck);
        if self.state.is_stalemate() {
            self.finish_stalemate();
            return Ok(());
        }

        self.transition(TurnState::PendingMove);
        self.prompt_move()
    }

    fn prompt_move(&mut self) -> Result<()> {
        let player = self.state.current_player();
        let seat = &mut self.seats[player];

        match &mut seat.controller {
            Controller::Human => {
                seat.piece.on_pending_move();
                Ok(())
            }
            Controller::Computer(strategy) => {
                let target = strategy.choose_move(&self.state).map_err(fail)?;
                self.play_computer(target)
            }
            Controller::Background(strategy) => {
                self.action += 1;
                let action = self.action;
                let outbox = self.outbox.clone();
                strategy
                    .begin(self.state.duplicate(), move |planned| {
                        post(&outbox, Signal::TurnPlanned { action, planned });
                    })
                    .map_err(fail)?;
                self.planning = true;
                debug!(%player, action, "background turn started");
                Ok(())
            }
        }
    }

    fn prompt_shoot(&mut self) -> Result<()> {
        let player = self.state.current_player();
        let seat = &mut self.seats[player];

        let target = match &mut seat.controller {
            Controller::Human => {
                seat.piece.on_pending_shoot();
                return Ok(());
            }
            Controller::Computer(strategy) => strategy.choose_shoot(&self.state).map_err(fail)?,
            Controller::Background(_) => self
                .planned_shoot
                .take()
                .ok_or_else(|| fail(Error::illegal_state("background player has no planned shot")))?,
        };
        self.play_computer(target)
    }

    fn finish_game(&mut self) -> Result<()> {
        let territories = self.state.territories();
        let unreachable = self.state.unreachable_enabled_tiles();

        let outcome = match self.state.result() {
            Some(GameResult::Winner(winner)) => {
                info!(%winner, unreachable = unreachable.len(), "game won");
                self.board.on_win(winner, &territories, &unreachable);
                Outcome::Won {
                    winner,
                    territories,
                    unreachable,
                }
            }
            Some(GameResult::Draw(winners)) => {
                info!(?winners, unreachable = unreachable.len(), "game drawn");
                self.board.on_draw(&winners, &territories, &unreachable);
                Outcome::Drawn {
                    winners,
                    territories,
                    unreachable,
                }
            }
            None => {
                return Err(fail(Error::illegal_state(
                    "game reported over without a result",
                )))
            }
        };

        self.outcome = Some(outcome);
        self.transition(TurnState::Won);
        Ok(())
    }

    fn finish_stalemate(&mut self) {
        let unreachable = self.state.unreachable_enabled_tiles();
        info!(
            player = %self.state.current_player(),
            unreachable = unreachable.len(),
            "stalemate"
        );
        self.board.on_stalemate(&unreachable);
        self.outcome = Some(Outcome::Stalemate { unreachable });
        self.transition(TurnState::Stalemate);
    }
}
