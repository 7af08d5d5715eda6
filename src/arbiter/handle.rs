//! Completion handles given to collaborators.
//!
//! A collaborator told to animate a move or a shot receives a handle and
//! must eventually use it to let the arbiter resume. Handles post a signal
//! to the arbiter's mailbox; the arbiter picks it up on its next dispatch, so
//! a handle can be used from inside the callback, later on the same thread,
//! or from another thread.
//!
//! - [`MoveHandle::move_done`] consumes the handle: a move resumes once.
//! - The player and the tile each get a [`ShootHandle`] for the same shot.
//!   They share one claim, so only the first `shoot_done` counts and the
//!   second is rejected.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;

use tracing::debug;

use crate::ai::PlannedTurn;
use crate::core::{Error, Result};

/// Identifies the action a signal completes.
pub(crate) type ActionId = u64;

/// Messages delivered to the arbiter's mailbox.
#[derive(Debug)]
pub(crate) enum Signal {
    MoveDone { action: ActionId },
    ShootDone { action: ActionId },
    TurnPlanned { action: ActionId, planned: Result<PlannedTurn> },
}

pub(crate) fn post(outbox: &Sender<Signal>, signal: Signal) {
    if outbox.send(signal).is_err() {
        debug!("arbiter gone; completion signal dropped");
    }
}

/// Resumes the arbiter after a move animation.
#[derive(Debug)]
#[must_use = "the arbiter waits until move_done is called"]
pub struct MoveHandle {
    outbox: Sender<Signal>,
    action: ActionId,
}

impl MoveHandle {
    pub(crate) fn new(outbox: Sender<Signal>, action: ActionId) -> Self {
        Self { outbox, action }
    }

    /// Report that the move has finished.
    pub fn move_done(self) {
        post(&self.outbox, Signal::MoveDone { action: self.action });
    }
}

/// Resumes the arbiter after a shot animation.
#[derive(Clone, Debug)]
pub struct ShootHandle {
    outbox: Sender<Signal>,
    action: ActionId,
    claimed: Arc<AtomicBool>,
}

impl ShootHandle {
    pub(crate) fn new(outbox: Sender<Signal>, action: ActionId) -> Self {
        Self {
            outbox,
            action,
            claimed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Report that the shot has finished.
    ///
    /// Fails with [`Error::IllegalState`] if this shot was already reported,
    /// through this handle or any clone of it.
    pub fn shoot_done(self) -> Result<()> {
        if self.claimed.swap(true, Ordering::SeqCst) {
            return Err(Error::illegal_state("shoot completion signalled twice"));
        }
        post(&self.outbox, Signal::ShootDone { action: self.action });
        Ok(())
    }

    /// Whether some holder already reported the shot.
    #[must_use]
    pub fn is_claimed(&self) -> bool {
        self.claimed.load(Ordering::SeqCst)
    }
}
