//! Terminal presentation for the block game.
//!
//! Views render into a plain framebuffer (no I/O, unit-testable); the
//! renderer diffs framebuffers and flushes the changes through crossterm.
//!
//! - [`fb`]: styled character framebuffer
//! - [`game_view`]: playing field, side panel and overlays
//! - [`leaderboard`]: score table shown after a lost game
//! - [`renderer`]: raw-mode alternate screen and diff encoding
//! - [`view`]: the session's render collaborator

pub mod fb;
pub mod game_view;
pub mod leaderboard;
pub mod renderer;
pub mod view;

pub use blocks_core as core;
pub use blocks_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{block_color, AnchorY, GameView, Viewport};
pub use leaderboard::{LeaderboardRow, LeaderboardView};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use view::TerminalView;
