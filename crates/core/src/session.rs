//! Session - one game shared by the clock thread and the input thread
//!
//! The whole [`GameState`], together with the render and persistence
//! collaborators, sits behind a single mutex. Every mutating entry point
//! (`apply`, `tick`) holds that lock for its full duration, redraw included,
//! so a frame never shows a half-applied move.
//!
//! Three values are mirrored outside the lock: the pause flag, the finished
//! flag and the tick interval. The clock loop reads them to decide how long
//! to sleep and whether to take the lock at all; while paused it keeps
//! sleeping without touching the game.
//!
//! Stopping is cooperative. The input thread waits for commands in bounded
//! slices and leaves once the session is finished; the clock thread sleeps
//! in slices too, so a quit is observed within one slice.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};

use crate::game_state::{GameState, Outcome};
use crate::snapshot::GameSnapshot;
use crate::types::{Command, INPUT_POLL_MS};

/// Presentation collaborator. Called with the lock held after every change.
pub trait Render: Send {
    fn draw(&mut self, snapshot: &GameSnapshot) -> Result<()>;
}

/// Persistence collaborator.
pub trait Persist: Send {
    /// Save the in-progress game (after a line clear, and at a clean exit)
    fn save_state(&mut self, game: &GameState) -> Result<()>;
    /// Record the final score of a lost game
    fn save_score(&mut self, game: &GameState) -> Result<()>;
}

/// Source of player commands
pub trait CommandSource: Send {
    /// Wait up to `timeout` for the next command
    fn next_command(&mut self, timeout: Duration) -> Result<Option<Command>>;
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Lost,
    Quit,
}

/// Outcome of [`Session::run`]
#[derive(Debug)]
pub struct SessionReport {
    pub end: SessionEnd,
    pub level: u32,
    pub score: u32,
    /// Persistence failures; the game keeps going when a save fails
    pub store_errors: Vec<anyhow::Error>,
}

struct Shared<R, P> {
    game: GameState,
    render: R,
    persist: P,
    snapshot: GameSnapshot,
    store_errors: Vec<anyhow::Error>,
    fatal: Option<anyhow::Error>,
}

impl<R: Render, P: Persist> Shared<R, P> {
    fn redraw(&mut self) {
        self.game.snapshot_into(&mut self.snapshot);
        if let Err(e) = self.render.draw(&self.snapshot) {
            self.fail(e.context("render failed"));
        }
    }

    fn fail(&mut self, err: anyhow::Error) {
        if self.fatal.is_none() {
            self.fatal = Some(err);
        }
        // A broken collaborator ends the game as a quit.
        self.game.apply(Command::Quit);
    }

    fn save_state(&mut self) {
        if let Err(e) = self.persist.save_state(&self.game) {
            self.store_errors.push(e.context("saving game state"));
        }
    }

    fn save_score(&mut self) {
        if let Err(e) = self.persist.save_score(&self.game) {
            self.store_errors.push(e.context("saving score"));
        }
    }

    fn after(&mut self, outcome: Outcome) {
        if let Some(event) = outcome.lock_event() {
            if event.score.lines > 0 {
                self.save_state();
            }
        }
        if outcome.accepted() {
            self.redraw();
        }
    }
}

pub struct Session<R, P> {
    shared: Mutex<Shared<R, P>>,
    paused: AtomicBool,
    finished: AtomicBool,
    tick_nanos: AtomicU64,
}

impl<R: Render, P: Persist> Session<R, P> {
    pub fn new(game: GameState, render: R, persist: P) -> Self {
        Self {
            paused: AtomicBool::new(game.paused()),
            finished: AtomicBool::new(game.is_over()),
            tick_nanos: AtomicU64::new(game.tick_interval().as_nanos() as u64),
            shared: Mutex::new(Shared {
                game,
                render,
                persist,
                snapshot: GameSnapshot::default(),
                store_errors: Vec::new(),
                fatal: None,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Shared<R, P>> {
        // Nothing in the critical section leaves the game half-updated on
        // panic, so a poisoned lock is still usable.
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, game: &GameState) {
        self.paused.store(game.paused(), Ordering::SeqCst);
        self.tick_nanos
            .store(game.tick_interval().as_nanos() as u64, Ordering::SeqCst);
        if game.is_over() {
            self.finished.store(true, Ordering::SeqCst);
        }
    }

    /// Apply a player command under the lock and redraw
    pub fn apply(&self, command: Command) -> bool {
        let mut shared = self.lock();
        let outcome = shared.game.apply(command);
        shared.after(outcome);
        self.publish(&shared.game);
        outcome.accepted()
    }

    /// One clock-driven advance under the lock
    pub fn tick(&self) -> bool {
        let mut shared = self.lock();
        let outcome = shared.game.step();
        shared.after(outcome);
        self.publish(&shared.game);
        outcome.accepted()
    }

    pub fn redraw(&self) {
        let mut shared = self.lock();
        shared.redraw();
        self.publish(&shared.game);
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::SeqCst)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_nanos(self.tick_nanos.load(Ordering::SeqCst))
    }

    /// Read the game under the lock
    pub fn with_game<T>(&self, f: impl FnOnce(&GameState) -> T) -> T {
        f(&self.lock().game)
    }

    /// Sleep for one tick, waking early once the session finishes
    fn sleep_tick(&self) {
        let deadline = Instant::now() + self.tick_interval();
        let slice = Duration::from_millis(INPUT_POLL_MS);
        while !self.is_finished() {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            thread::sleep((deadline - now).min(slice));
        }
    }

    /// Clock loop. Returns when the game is lost or quit.
    pub fn run_clock(&self) {
        while !self.is_finished() {
            self.sleep_tick();
            if self.is_finished() {
                break;
            }
            if self.is_paused() {
                continue;
            }
            self.tick();
        }
    }

    /// Input loop. Returns once the session is finished.
    ///
    /// A failing command source ends the game; the error is reported by `run`.
    pub fn run_input(&self, input: &mut impl CommandSource) {
        let timeout = Duration::from_millis(INPUT_POLL_MS);
        while !self.is_finished() {
            match input.next_command(timeout) {
                Ok(Some(command)) => {
                    self.apply(command);
                }
                Ok(None) => {}
                Err(e) => {
                    let mut shared = self.lock();
                    shared.fail(e.context("reading input"));
                    self.publish(&shared.game);
                    return;
                }
            }
        }
    }

    /// Final persistence checkpoint: score record on loss, in-progress save otherwise
    fn checkpoint(&self) -> Result<SessionReport> {
        let mut shared = self.lock();
        let end = if shared.game.lost() {
            shared.save_score();
            SessionEnd::Lost
        } else {
            shared.save_state();
            SessionEnd::Quit
        };

        if let Some(err) = shared.fatal.take() {
            if shared.store_errors.is_empty() {
                return Err(err);
            }
            let unsaved: Vec<String> = shared
                .store_errors
                .drain(..)
                .map(|e| format!("{e:#}"))
                .collect();
            let unsaved = unsaved.join("; ");
            return Err(err.context(format!("session aborted; store errors: {unsaved}")));
        }

        Ok(SessionReport {
            end,
            level: shared.game.level(),
            score: shared.game.score(),
            store_errors: std::mem::take(&mut shared.store_errors),
        })
    }
}

impl<R, P> Session<R, P>
where
    R: Render + 'static,
    P: Persist + 'static,
{
    /// Play the game to the end.
    ///
    /// Spawns the input thread, runs the clock loop on the calling thread,
    /// then joins the input thread and runs the final save.
    pub fn run<I: CommandSource + 'static>(self: &Arc<Self>, mut input: I) -> Result<SessionReport> {
        self.redraw();

        let session = Arc::clone(self);
        let input_thread = thread::Builder::new()
            .name("blocks-input".to_string())
            .spawn(move || session.run_input(&mut input))
            .context("spawning input thread")?;

        self.run_clock();

        input_thread
            .join()
            .map_err(|_| anyhow!("input thread panicked"))?;

        self.checkpoint()
    }
}

impl<R, P> Session<R, P> {
    /// Take back the game and collaborators once no thread uses the session
    pub fn into_parts(self) -> (GameState, R, P) {
        let shared = self
            .shared
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        (shared.game, shared.render, shared.persist)
    }
}
