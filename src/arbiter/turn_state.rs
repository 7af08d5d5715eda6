//! Turn protocol states.

/// Where the arbiter is in the turn protocol.
///
/// `WinCheck`, `SwitchingPlayers` and `StalemateCheck` are passed through
/// within a single call; callers only ever observe the other states.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TurnState {
    /// Waiting for the current player's destination.
    PendingMove,
    /// Waiting for the mover's move completion.
    Moving,
    /// Waiting for the current player's target.
    PendingShoot,
    /// Waiting for the shot completion from the player or the tile.
    Shooting,
    WinCheck,
    SwitchingPlayers,
    StalemateCheck,
    /// The game is over; only `reset` leaves this state.
    Won,
    /// The current player cannot move; only `reset` leaves this state.
    Stalemate,
}

impl TurnState {
    /// Whether a selection is acted upon in this state.
    #[must_use]
    pub fn accepts_input(self) -> bool {
        matches!(self, TurnState::PendingMove | TurnState::PendingShoot)
    }

    /// Whether the arbiter is waiting on a collaborator's completion.
    #[must_use]
    pub fn is_animating(self) -> bool {
        matches!(self, TurnState::Moving | TurnState::Shooting)
    }

    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, TurnState::Won | TurnState::Stalemate)
    }
}
