//! Terminal input.
//!
//! Maps `crossterm` key events into [`crate::types::Command`] and provides a
//! [`TerminalInput`] command source for the session's input thread.

pub mod map;
pub mod terminal;

pub use blocks_types as types;

pub use map::{is_quit_key, map_key};
pub use terminal::{next_key, wait_for_key, TerminalInput};
