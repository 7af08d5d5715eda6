//! Turn planning on a worker thread.
//!
//! The arbiter must never block on a computer player. `BackgroundStrategy`
//! runs a [`Strategy`] for the whole turn (move and shot) on its own thread
//! and reports the result through a completion callback.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use tracing::debug;

use crate::core::{Error, GameState, Result};

use super::strategy::{PlannedTurn, Strategy};

/// Runs a strategy off the calling thread, one turn at a time.
pub struct BackgroundStrategy<S> {
    inner: Arc<Mutex<S>>,
    busy: Arc<AtomicBool>,
    name: String,
}

impl<S: Strategy + 'static> BackgroundStrategy<S> {
    pub fn new(strategy: S) -> Self {
        let name = format!("{} (background)", strategy.name());
        Self {
            inner: Arc::new(Mutex::new(strategy)),
            busy: Arc::new(AtomicBool::new(false)),
            name,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether a turn is being planned right now.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Start planning the turn for `state` (which must be in the move phase).
    ///
    /// `on_ready` runs on the worker thread exactly once, with either the
    /// planned turn or the strategy's error. A strategy that panics is
    /// reported as [`Error::Worker`]. Fails with
    /// [`Error::IllegalState`] if a turn is already being planned.
    pub fn begin<F>(&self, state: GameState, on_ready: F) -> Result<JoinHandle<()>>
    where
        F: FnOnce(Result<PlannedTurn>) + Send + 'static,
    {
        if self.busy.swap(true, Ordering::SeqCst) {
            return Err(Error::illegal_state(format!(
                "{} is already planning a turn",
                self.name
            )));
        }

        let inner = Arc::clone(&self.inner);
        let busy = Arc::clone(&self.busy);
        let spawned = thread::Builder::new()
            .name("tileshot-ai".to_string())
            .spawn(move || {
                let planned = panic::catch_unwind(AssertUnwindSafe(|| plan_turn(&inner, &state)))
                    .unwrap_or_else(|payload| Err(Error::Worker(panic_message(payload.as_ref()))));
                debug!(ok = planned.is_ok(), "background turn planned");
                busy.store(false, Ordering::SeqCst);
                on_ready(planned);
            });

        spawned.map_err(|e| {
            self.busy.store(false, Ordering::SeqCst);
            Error::Worker(e.to_string())
        })
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    let detail = payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());
    format!("strategy panicked: {}", detail)
}

fn plan_turn<S: Strategy>(inner: &Mutex<S>, state: &GameState) -> Result<PlannedTurn> {
    let mut strategy = inner
        .lock()
        .map_err(|_| Error::Worker("strategy lock poisoned by an earlier panic".to_string()))?;

    let move_to = strategy.choose_move(state)?;
    let after_move = state.apply(move_to)?;
    let shoot_at = strategy.choose_shoot(&after_move)?;
    Ok(PlannedTurn { move_to, shoot_at })
}
