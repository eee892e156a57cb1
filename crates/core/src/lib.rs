//! Core game logic - rules, state and the two-thread session
//!
//! Everything here is deterministic for a given seed and free of terminal or
//! file I/O. Rendering, input and persistence plug in through the traits in
//! [`session`].
//!
//! # Module Structure
//!
//! - [`board`]: 10x22 grid (2 hidden rows) with collision checks and row clearing
//! - [`pieces`]: the seven piece shapes and pivot rotation
//! - [`rng`]: seeded piece generator
//! - [`controller`]: current, next and hold slots; moves, drops and locking
//! - [`scoring`]: level curve, points and tick interval
//! - [`game_state`]: the game aggregate, driven by commands and clock steps
//! - [`snapshot`]: copyable view handed to renderers
//! - [`session`]: clock loop and input loop sharing one locked game
//!
//! # Example
//!
//! ```
//! use blocks_core::GameState;
//! use blocks_core::types::{Command, Difficulty};
//!
//! let mut game = GameState::new(12345, Difficulty::Normal);
//! game.apply(Command::MoveRight);
//! game.apply(Command::RotateCw);
//!
//! // Hard drop locks the piece right away.
//! let outcome = game.apply(Command::HardDrop);
//! assert!(outcome.lock_event().is_some());
//! assert_eq!(game.board().filled_count(), 4);
//! ```

pub mod board;
pub mod controller;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use blocks_types as types;

pub use board::{Board, LineClear};
pub use controller::{Advance, DropResult, PieceController};
pub use game_state::{GameState, LockEvent, Outcome, RestoredGame};
pub use pieces::{try_rotate, Piece};
pub use rng::{PieceGenerator, SimpleRng};
pub use scoring::{tick_interval, Progress, ScoreResult};
pub use session::{CommandSource, Persist, Render, Session, SessionEnd, SessionReport};
pub use snapshot::GameSnapshot;
