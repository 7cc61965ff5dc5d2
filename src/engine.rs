//! The two-thread concurrency model: a dispatcher (driven by [`crate::uci`])
//! that owns the position between commands, and a worker that owns the
//! position for the duration of a single search.
//!
//! Cancellation is a single atomic flag, never a lock: the dispatcher
//! sets it from `stop`/`quit`, the worker polls it. The transposition
//! table is moved into the worker thread for the search and moved back
//! out when the dispatcher reaps the finished thread, so only one side
//! ever touches it at a time.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use crate::position::Position;
use crate::search::{self, Limits, SearchOutcome};
use crate::tt::TranspositionTable;
use crate::types::Move;

/// The flag and time budget a worker polls to decide whether to keep
/// searching. Mirrors the spec's `SearchInfo`: an atomic `stopped`
/// flag plus a duration, shared without any lock.
#[derive(Clone)]
pub struct SearchInfo {
    pub stopped: Arc<AtomicBool>,
    pub duration: Option<Duration>,
}

/// Progress and completion events the worker publishes over a channel.
/// This is the one piece of the model that *does* use a channel,
/// because it carries output, not cancellation.
pub enum Event {
    Info(search::Info),
    BestMove(Option<Move>),
}

type WorkerReturn = (TranspositionTable, SearchOutcome);

/// Owns the position and transposition table between searches and
/// hands them to a worker thread while one is running.
pub struct Engine {
    position: Position,
    tt: Option<TranspositionTable>,
    worker: Option<JoinHandle<WorkerReturn>>,
    search_info: Option<SearchInfo>,
}

impl Engine {
    #[must_use]
    pub fn new() -> Engine {
        Engine::with_tt_capacity(crate::tt::DEFAULT_SIZE)
    }

    /// Builds an engine with a transposition table sized to hold
    /// `capacity` entries, the one runtime-configurable knob the spec
    /// calls out (§3). A hosting application wires this to its own
    /// "hash size" setting; the bare UCI loop just uses [`Engine::new`].
    #[must_use]
    pub fn with_tt_capacity(capacity: usize) -> Engine {
        Engine {
            position: Position::startpos(),
            tt: Some(TranspositionTable::new(capacity)),
            worker: None,
            search_info: None,
        }
    }

    #[must_use]
    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn set_position(&mut self, pos: Position) {
        self.position = pos;
    }

    /// Resets to the standard starting position. Per the UCI contract
    /// this does not clear the transposition table.
    pub fn new_game(&mut self) {
        self.reap();
        self.position = Position::startpos();
    }

    /// Joins the worker if it has already finished on its own (depth
    /// limit or `movetime` reached without an explicit `stop`),
    /// reclaiming the transposition table.
    fn reap(&mut self) {
        if let Some(handle) = &self.worker {
            if handle.is_finished() {
                let (tt, _outcome) = self.worker.take().unwrap().join().expect("worker thread panicked");
                self.tt = Some(tt);
                self.search_info = None;
            }
        }
    }

    #[must_use]
    pub fn is_busy(&mut self) -> bool {
        self.reap();
        self.worker.is_some()
    }

    /// Launches a worker to search the current position. A `go` that
    /// arrives while a search is already running is ignored, matching
    /// the spec's ordering guarantee that the dispatcher never issues
    /// overlapping searches.
    pub fn go(&mut self, limits: Limits, events: Sender<Event>) {
        if self.is_busy() {
            #[cfg(feature = "logging")]
            log::warn!("go ignored: a search is already running");
            return;
        }
        let Some(tt) = self.tt.take() else { return };

        let stopped = Arc::new(AtomicBool::new(false));
        self.search_info = Some(SearchInfo {
            stopped: Arc::clone(&stopped),
            duration: limits.movetime,
        });

        let mut pos = self.position.clone();
        let mut tt = tt;
        self.worker = Some(std::thread::spawn(move || {
            let outcome = search::search(&mut pos, &mut tt, limits, &stopped, |info| {
                let _ = events.send(Event::Info(info));
            });
            let _ = events.send(Event::BestMove(outcome.best_move));
            (tt, outcome)
        }));
    }

    /// Requests the running search stop at its next poll point. A
    /// no-op if nothing is running.
    pub fn request_stop(&self) {
        if let Some(info) = &self.search_info {
            info.stopped.store(true, Ordering::Relaxed);
        }
    }

    /// Stops and blocks until the worker has fully unwound, returning
    /// its result. Used on `quit` so the process doesn't exit out from
    /// under a running search.
    pub fn stop_and_join(&mut self) -> Option<SearchOutcome> {
        self.request_stop();
        let handle = self.worker.take()?;
        let (tt, outcome) = handle.join().expect("worker thread panicked");
        self.tt = Some(tt);
        self.search_info = None;
        Some(outcome)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
