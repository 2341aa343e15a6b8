//! Async session driving one engine for a rendering layer.
//!
//! The computer's answer is played by a spawned task after the configured
//! delay. Reset, jump and mode change abort that task; the engine also
//! refuses its ticket if it slips through.

use crate::config::EngineConfig;
use crate::engine::{ComputerTicket, GameEngine, GameEvent, Mode, MoveOutcome, RejectReason, Snapshot};
use crate::position::Position;
use crate::types::Player;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument};

/// Entry points for the board UI.
#[derive(Debug)]
pub struct Session {
    engine: Arc<Mutex<GameEngine>>,
    pending: Mutex<Option<JoinHandle<()>>>,
    delay: Duration,
}

impl Session {
    /// Creates a session from configuration.
    #[instrument(skip(config))]
    pub fn new(config: &EngineConfig) -> Self {
        info!(mode = %config.mode(), delay_ms = *config.computer_delay_ms(), "Creating session");
        Self {
            engine: Arc::new(Mutex::new(GameEngine::new(config))),
            pending: Mutex::new(None),
            delay: config.computer_delay(),
        }
    }

    /// A click on cell `index` (0-8).
    ///
    /// Schedules the computer's answer when one is due.
    #[instrument(skip(self))]
    pub async fn on_cell_click(&self, index: usize) -> MoveOutcome {
        let Some(pos) = Position::from_index(index) else {
            debug!("Click outside the board");
            return MoveOutcome::Rejected(RejectReason::OutOfBounds(index));
        };
        let outcome = self.engine.lock().await.apply_move(pos);
        if let MoveOutcome::ComputerToMove(ticket) = &outcome {
            self.schedule(ticket.clone()).await;
        }
        outcome
    }

    /// Starts a new game, keeping scores.
    #[instrument(skip(self))]
    pub async fn on_reset(&self) {
        self.cancel_pending().await;
        self.engine.lock().await.reset();
    }

    /// Shows history step `step`.
    ///
    /// Out-of-range steps are ignored and leave a pending computer move in
    /// place. Any accepted jump, including one to the displayed step,
    /// cancels it.
    #[instrument(skip(self))]
    pub async fn on_jump(&self, step: usize) -> bool {
        let mut engine = self.engine.lock().await;
        if step >= engine.state().history().len() {
            debug!(len = engine.state().history().len(), "Jump outside history");
            return false;
        }
        // Cancelled under the engine lock.
        self.cancel_pending().await;
        engine.jump_to(step)
    }

    /// Switches between two-player and computer play.
    #[instrument(skip(self))]
    pub async fn on_mode_change(&self, mode: Mode) {
        self.cancel_pending().await;
        self.engine.lock().await.set_mode(mode);
    }

    /// Records a display name.
    #[instrument(skip(self, name))]
    pub async fn set_player_name(&self, player: Player, name: impl Into<String>) {
        self.engine.lock().await.set_player_name(player, name);
    }

    /// Current view of the game.
    pub async fn snapshot(&self) -> Snapshot {
        self.engine.lock().await.snapshot()
    }

    /// Receives every event from now on.
    pub async fn subscribe(&self) -> mpsc::UnboundedReceiver<GameEvent> {
        self.engine.lock().await.subscribe()
    }

    /// Waits until a scheduled computer move, if any, has been played.
    pub async fn settle(&self) {
        let handle = self.pending.lock().await.take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                debug!(error = %e, "Computer task ended early");
            }
        }
    }

    async fn schedule(&self, ticket: ComputerTicket) {
        let engine = Arc::clone(&self.engine);
        let delay = self.delay;
        debug!(generation = *ticket.generation(), ?delay, "Scheduling computer move");
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let outcome = engine.lock().await.play_computer(&ticket);
            debug!(?outcome, "Computer turn finished");
        });
        if let Some(previous) = self.pending.lock().await.replace(handle) {
            previous.abort();
        }
    }

    async fn cancel_pending(&self) {
        if let Some(handle) = self.pending.lock().await.take() {
            debug!("Cancelling computer move");
            handle.abort();
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.get_mut().take() {
            handle.abort();
        }
    }
}
