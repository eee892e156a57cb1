//! Game state module - the shared game aggregate
//!
//! Ties together board, piece controller and progress, plus the pause, loss
//! and quit flags. All mutation goes through [`GameState::apply`] (player
//! commands) and [`GameState::step`] (the clock). The session wraps one
//! `GameState` in a mutex so both threads see a consistent game.

use std::time::Duration;

use crate::board::Board;
use crate::controller::{Advance, DropResult, PieceController};
use crate::pieces::Piece;
use crate::rng::PieceGenerator;
use crate::scoring::{tick_interval, Progress, ScoreResult};
use crate::snapshot::GameSnapshot;
use crate::types::{Command, Difficulty, Shift, Spin};

/// What a lock event did to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub score: ScoreResult,
    pub lost: bool,
}

/// Result of a command or clock step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing changed
    Rejected,
    /// State changed, no piece locked
    Applied,
    /// The current piece locked
    Locked(LockEvent),
}

impl Outcome {
    pub fn accepted(&self) -> bool {
        !matches!(self, Outcome::Rejected)
    }

    pub fn lock_event(&self) -> Option<LockEvent> {
        match self {
            Outcome::Locked(ev) => Some(*ev),
            _ => None,
        }
    }
}

/// Pieces of a saved game, used to resume
#[derive(Debug, Clone)]
pub struct RestoredGame {
    pub board: Board,
    pub current: Piece,
    pub next: Piece,
    pub hold: Option<Piece>,
    pub can_hold: bool,
    pub progress: Progress,
    pub difficulty: Difficulty,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    pieces: PieceController,
    progress: Progress,
    difficulty: Difficulty,
    tick: Duration,
    paused: bool,
    lost: bool,
    quit: bool,
}

impl GameState {
    /// Create a new game with the given RNG seed
    pub fn new(seed: u32, difficulty: Difficulty) -> Self {
        let progress = Progress::new();
        Self {
            board: Board::new(),
            pieces: PieceController::new(PieceGenerator::new(seed)),
            tick: tick_interval(progress.level, difficulty),
            progress,
            difficulty,
            paused: false,
            lost: false,
            quit: false,
        }
    }

    /// Resume a saved game. New pieces keep coming from `seed`.
    pub fn restore(saved: RestoredGame, seed: u32) -> Self {
        let pieces = PieceController::from_parts(
            saved.current,
            saved.next,
            saved.hold,
            saved.can_hold,
            PieceGenerator::new(seed),
        );
        Self {
            board: saved.board,
            pieces,
            tick: tick_interval(saved.progress.level, saved.difficulty),
            progress: saved.progress,
            difficulty: saved.difficulty,
            paused: false,
            lost: false,
            quit: false,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn pieces(&self) -> &PieceController {
        &self.pieces
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn level(&self) -> u32 {
        self.progress.level
    }

    pub fn score(&self) -> u32 {
        self.progress.score
    }

    /// Current delay between clock-driven advances
    pub fn tick_interval(&self) -> Duration {
        self.tick
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn lost(&self) -> bool {
        self.lost
    }

    pub fn quit(&self) -> bool {
        self.quit
    }

    /// Lost or quit: no further commands are accepted
    pub fn is_over(&self) -> bool {
        self.lost || self.quit
    }

    pub fn set_paused(&mut self, paused: bool) {
        if !self.is_over() {
            self.paused = paused;
        }
    }

    #[cfg(test)]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Apply a player command
    ///
    /// Invalid moves are rejected silently. While paused only `Pause` and
    /// `Quit` are accepted; once the game is over nothing is.
    pub fn apply(&mut self, command: Command) -> Outcome {
        if self.is_over() {
            return Outcome::Rejected;
        }
        if self.paused && !matches!(command, Command::Pause | Command::Quit) {
            return Outcome::Rejected;
        }

        let applied = match command {
            Command::MoveLeft => self.pieces.translate(&self.board, Shift::Left),
            Command::MoveRight => self.pieces.translate(&self.board, Shift::Right),
            Command::SoftDrop => self.pieces.soft_drop(&self.board) == DropResult::Advanced,
            Command::HardDrop => {
                self.pieces.hard_drop(&self.board);
                return self.step();
            }
            Command::RotateCw => self.pieces.rotate(&self.board, Spin::Clockwise),
            Command::RotateCcw => self.pieces.rotate(&self.board, Spin::CounterClockwise),
            Command::Hold => self.pieces.swap_hold(),
            Command::Pause => {
                self.paused = !self.paused;
                true
            }
            Command::Quit => {
                self.paused = false;
                self.quit = true;
                true
            }
        };

        if applied {
            Outcome::Applied
        } else {
            Outcome::Rejected
        }
    }

    /// Clock-driven advance: move the piece down or lock it.
    ///
    /// A lock clears rows, books the score and may level up, which also
    /// recomputes the tick interval. Loss is flagged when the hidden rows held
    /// a block; the score for that same event is still booked.
    pub fn step(&mut self) -> Outcome {
        if self.is_over() || self.paused {
            return Outcome::Rejected;
        }

        match self.pieces.advance_or_lock(&mut self.board) {
            Advance::Fell => Outcome::Applied,
            Advance::Locked(clear) => {
                if clear.topped_out {
                    self.lost = true;
                }

                let score = self.progress.record_clear(clear.count(), self.difficulty);
                if score.leveled_up {
                    self.tick = tick_interval(self.progress.level, self.difficulty);
                }

                Outcome::Locked(LockEvent {
                    score,
                    lost: self.lost,
                })
            }
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);

        out.current = Some(*self.pieces.current());
        out.ghost = Some(self.pieces.ghost(&self.board));
        out.next = Some(*self.pieces.next());
        out.hold = self.pieces.hold().copied();
        out.can_hold = self.pieces.can_hold();
        out.difficulty = self.difficulty;
        out.level = self.progress.level;
        out.lines = self.progress.lines;
        out.total_lines = self.progress.total_lines;
        out.score = self.progress.score;
        out.tick_ms = self.tick.as_millis() as u32;
        out.paused = self.paused;
        out.lost = self.lost;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1, Difficulty::default())
    }
}
