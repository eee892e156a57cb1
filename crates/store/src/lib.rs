//! Persistence for the block game
//!
//! Saves the in-progress game after line clears and on exit, keeps the
//! local leaderboard, and hands a validated save back on the next start.

pub mod json;
pub mod records;

pub use blocks_types as types;

pub use json::{default_dir, JsonStore, StoreConfig, DEFAULT_PLAYER};
pub use records::{format_date, SavedGame, SavedPiece, ScoreRecord};
