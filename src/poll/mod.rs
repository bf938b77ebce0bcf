//! Background price poller.
//!
//! A background tokio task owns the timer; the public handle sends commands
//! over an mpsc channel and observes display state over a watch channel.
//! Every fetch runs as its own task tagged with a display generation, so
//! overlapping fetches are permitted — but only the latest issued one may
//! write, and nothing writes after teardown.

pub mod source;

pub use source::PriceSource;

use crate::domain::price::{FetchError, FetchState, PriceDisplayState, PriceReading};
use crate::shared::Symbol;

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Default refresh cadence.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Configuration for the poller.
#[derive(Debug, Clone)]
pub struct PollConfig {
    pub interval: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

// ─── Commands from public API to background task ─────────────────────────────

enum Command {
    Refresh,
    Stop,
}

// ─── Shared display state ────────────────────────────────────────────────────

/// Display state shared between the handle, the timer task and in-flight
/// fetch tasks. The lock is only ever held for the guarded update itself,
/// never across I/O.
struct SharedDisplay {
    display: Mutex<PriceDisplayState>,
    state_tx: watch::Sender<FetchState>,
}

impl SharedDisplay {
    fn begin(&self) -> Option<u64> {
        let mut display = self.display.lock().unwrap_or_else(PoisonError::into_inner);
        let generation = display.begin()?;
        let _ = self.state_tx.send(display.state().clone());
        Some(generation)
    }

    fn apply(&self, generation: u64, outcome: Result<PriceReading, FetchError>) {
        let mut display = self.display.lock().unwrap_or_else(PoisonError::into_inner);
        if display.apply(generation, outcome) {
            let _ = self.state_tx.send(display.state().clone());
        }
    }

    fn close(&self) {
        self.display
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .close();
    }
}

// ─── Public PricePoller ──────────────────────────────────────────────────────

/// Polls a [`PriceSource`] for one symbol and maintains its display state.
pub struct PricePoller {
    symbol: Symbol,
    cmd_tx: Option<mpsc::Sender<Command>>,
    state_rx: watch::Receiver<FetchState>,
    shared: Arc<SharedDisplay>,
    task_handle: Option<JoinHandle<()>>,
}

impl PricePoller {
    /// Start polling: one fetch immediately, then one per interval tick.
    pub fn start(source: Arc<dyn PriceSource>, symbol: Symbol, config: PollConfig) -> Self {
        let (state_tx, state_rx) = watch::channel(FetchState::Loading);
        let shared = Arc::new(SharedDisplay {
            display: Mutex::new(PriceDisplayState::new(symbol)),
            state_tx,
        });

        let (cmd_tx, cmd_rx) = mpsc::channel(16);
        let task_handle = tokio::spawn(run_task(
            source,
            symbol,
            config,
            Arc::clone(&shared),
            cmd_rx,
        ));

        Self {
            symbol,
            cmd_tx: Some(cmd_tx),
            state_rx,
            shared,
            task_handle: Some(task_handle),
        }
    }

    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    /// The latest display state.
    pub fn current_state(&self) -> FetchState {
        self.state_rx.borrow().clone()
    }

    /// Subscribe to display state transitions.
    pub fn watch_state(&self) -> watch::Receiver<FetchState> {
        self.state_rx.clone()
    }

    /// User-initiated refresh. Returns whether the command was accepted;
    /// always `false` after [`stop`](Self::stop).
    pub fn refresh(&self) -> bool {
        match &self.cmd_tx {
            Some(tx) => tx.try_send(Command::Refresh).is_ok(),
            None => false,
        }
    }

    /// Stop polling and tear the display down.
    ///
    /// The timer is cancelled and no further fetch will be issued. Fetches
    /// already in flight are not cancelled; their completions resolve into
    /// the closed display as guarded no-ops.
    pub async fn stop(&mut self) {
        if let Some(tx) = self.cmd_tx.take() {
            let _ = tx.send(Command::Stop).await;
        }

        if let Some(handle) = self.task_handle.take() {
            let _ = tokio::time::timeout(Duration::from_secs(5), handle).await;
        }

        // The task closes the display on Stop; make it unconditional in case
        // the task was already gone.
        self.shared.close();
    }
}

impl Drop for PricePoller {
    fn drop(&mut self) {
        self.shared.close();
        if let Some(handle) = self.task_handle.take() {
            handle.abort();
        }
    }
}

// ─── Background task ─────────────────────────────────────────────────────────

async fn run_task(
    source: Arc<dyn PriceSource>,
    symbol: Symbol,
    config: PollConfig,
    shared: Arc<SharedDisplay>,
    mut cmd_rx: mpsc::Receiver<Command>,
) {
    let mut ticker = tokio::time::interval(config.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            // The first tick completes immediately — the mount fetch.
            _ = ticker.tick() => {
                spawn_fetch(&source, symbol, &shared);
            }

            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(Command::Refresh) => {
                        spawn_fetch(&source, symbol, &shared);
                    }
                    Some(Command::Stop) | None => {
                        // Handle dropped or explicit stop — tear down.
                        shared.close();
                        return;
                    }
                }
            }
        }
    }
}

/// Issue one fetch as an independent task. The fetch itself is never
/// awaited by the timer loop, so a slow fetch cannot delay the next tick.
fn spawn_fetch(source: &Arc<dyn PriceSource>, symbol: Symbol, shared: &Arc<SharedDisplay>) {
    let Some(generation) = shared.begin() else {
        return;
    };

    let source = Arc::clone(source);
    let shared = Arc::clone(shared);
    tokio::spawn(async move {
        let outcome = source.fetch_price(symbol).await;
        if let Err(e) = &outcome {
            tracing::error!(%symbol, generation, error = %e, "price fetch failed");
        }
        shared.apply(generation, outcome);
    });
}
