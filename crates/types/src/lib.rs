//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the game.
//! All types are plain data with no external dependencies, so they can be
//! shared by the core rules, the terminal front-end, and the save store.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 22 rows (indexed 0-21), of which rows 0 and 1 are a hidden
//!   spawn buffer and rows 2-21 are the visible playfield
//! - **Spawn position**: column `BOARD_WIDTH / 2`, row [`SPAWN_ROW`]
//!
//! # Timing
//!
//! The falling speed is derived from level and difficulty (see
//! `blocks_core::scoring::tick_interval`). Tick intervals are kept strictly
//! below one second:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MAX_TICK_NANOS` | 999_999_999 | Slowest tick, also the initial tick |
//! | `INPUT_POLL_MS` | 50 | Longest single wait for an input event |
//!
//! # Examples
//!
//! ```
//! use blocks_types::{Command, Difficulty, PieceKind, BOARD_HEIGHT, HIDDEN_ROWS};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(Command::from_str("hardDrop"), Some(Command::HardDrop));
//! assert_eq!(Difficulty::default().tier(), 1);
//! assert_eq!(BOARD_HEIGHT - HIDDEN_ROWS, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Rows above the playfield where pieces spawn. Anything left here at lock time loses the game.
pub const HIDDEN_ROWS: u8 = 2;

/// Rows drawn on screen
pub const VISIBLE_HEIGHT: u8 = 20;

/// Total board height in cells, hidden spawn rows included (22 rows)
pub const BOARD_HEIGHT: u8 = VISIBLE_HEIGHT + HIDDEN_ROWS;

/// Row of the pivot of a freshly spawned piece (inside the hidden buffer)
pub const SPAWN_ROW: i8 = 1;

/// Nanoseconds in one second
pub const NANOS_PER_SECOND: u64 = 1_000_000_000;

/// Upper bound for a tick interval. Sleeping a whole second or more is rejected.
pub const MAX_TICK_NANOS: u64 = NANOS_PER_SECOND - 1;

/// Longest single wait for an input event, in milliseconds.
pub const INPUT_POLL_MS: u64 = 50;

/// Level of a new game
pub const STARTING_LEVEL: u32 = 1;

/// Lines needed to leave level 0 (`level * LEVEL_UP_PER_LEVEL + LEVEL_UP_BASE`)
pub const LEVEL_UP_BASE: u32 = 5;

/// Extra lines needed per level
pub const LEVEL_UP_PER_LEVEL: u32 = 2;

/// Number of entries shown on the local leaderboard
pub const LEADERBOARD_LEN: usize = 10;

/// Opaque color/identity token carried by a piece and stamped into the board.
pub type ColorId = u8;

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(ColorId)`: Cell locked with the color of the piece that filled it
pub type Cell = Option<ColorId>;

/// The seven piece shapes
///
/// - **O**: 2x2 square, never rotates
/// - **I**: horizontal bar of four
/// - **T**, **L**, **J**: three in a row plus one above
/// - **Z**, **S**: skewed pairs (mirror images)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    O,
    I,
    T,
    L,
    J,
    Z,
    S,
}

impl PieceKind {
    /// All kinds, in table order. Random generation indexes into this.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::O,
        PieceKind::I,
        PieceKind::T,
        PieceKind::L,
        PieceKind::J,
        PieceKind::Z,
        PieceKind::S,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blocks_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "o" => Some(PieceKind::O),
            "i" => Some(PieceKind::I),
            "t" => Some(PieceKind::T),
            "l" => Some(PieceKind::L),
            "j" => Some(PieceKind::J),
            "z" => Some(PieceKind::Z),
            "s" => Some(PieceKind::S),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::O => "o",
            PieceKind::I => "i",
            PieceKind::T => "t",
            PieceKind::L => "l",
            PieceKind::J => "j",
            PieceKind::Z => "z",
            PieceKind::S => "s",
        }
    }
}

/// Rotation direction. The sign feeds the rotation transform `(x, y) -> (-d*y, d*x)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Spin {
    Clockwise,
    CounterClockwise,
}

impl Spin {
    pub fn sign(&self) -> i8 {
        match self {
            Spin::Clockwise => 1,
            Spin::CounterClockwise => -1,
        }
    }
}

/// Horizontal move direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shift {
    Left,
    Right,
}

impl Shift {
    pub fn dx(&self) -> i8 {
        match self {
            Shift::Left => -1,
            Shift::Right => 1,
        }
    }
}

/// Difficulty tier chosen at game start
///
/// The tier scales both the falling speed curve and the points per line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    /// Numeric tier (0, 1, 2)
    pub fn tier(&self) -> u32 {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Normal => 1,
            Difficulty::Hard => 2,
        }
    }

    /// Parse from a name or a tier digit (case-insensitive)
    ///
    /// ```
    /// use blocks_types::Difficulty;
    ///
    /// assert_eq!(Difficulty::from_str("HARD"), Some(Difficulty::Hard));
    /// assert_eq!(Difficulty::from_str("0"), Some(Difficulty::Easy));
    /// assert_eq!(Difficulty::from_str("brutal"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" | "0" => Some(Difficulty::Easy),
            "normal" | "1" => Some(Difficulty::Normal),
            "hard" | "2" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }
}

/// Commands the player can issue
///
/// This is the complete command surface of the game; both keyboard input and
/// tests drive the session through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down (never locks)
    SoftDrop,
    /// Drop piece to its resting row and lock it
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Swap the next piece with the held one (once per falling piece)
    Hold,
    /// Toggle pause state
    Pause,
    /// End the game without losing
    Quit,
}

impl Command {
    /// Parse command from its camelCase name (case-insensitive)
    ///
    /// ```
    /// use blocks_types::Command;
    ///
    /// assert_eq!(Command::from_str("moveLeft"), Some(Command::MoveLeft));
    /// assert_eq!(Command::from_str("rotateccw"), Some(Command::RotateCcw));
    /// assert_eq!(Command::from_str("restart"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "softdrop" => Some(Command::SoftDrop),
            "harddrop" => Some(Command::HardDrop),
            "rotatecw" => Some(Command::RotateCw),
            "rotateccw" => Some(Command::RotateCcw),
            "hold" => Some(Command::Hold),
            "pause" => Some(Command::Pause),
            "quit" => Some(Command::Quit),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::SoftDrop => "softDrop",
            Command::HardDrop => "hardDrop",
            Command::RotateCw => "rotateCw",
            Command::RotateCcw => "rotateCcw",
            Command::Hold => "hold",
            Command::Pause => "pause",
            Command::Quit => "quit",
        }
    }
}
