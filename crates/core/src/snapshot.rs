//! Read-only view of a game, handed to renderers.

use crate::pieces::Piece;
use crate::types::{Cell, Difficulty, BOARD_HEIGHT, BOARD_WIDTH, STARTING_LEVEL};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// Full grid, hidden rows included
    pub board: [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub current: Option<Piece>,
    /// Resting position of the current piece
    pub ghost: Option<Piece>,
    pub next: Option<Piece>,
    pub hold: Option<Piece>,
    pub can_hold: bool,
    pub difficulty: Difficulty,
    pub level: u32,
    pub lines: u32,
    pub total_lines: u32,
    pub score: u32,
    pub tick_ms: u32,
    pub paused: bool,
    pub lost: bool,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        !self.lost && !self.paused
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            current: None,
            ghost: None,
            next: None,
            hold: None,
            can_hold: true,
            difficulty: Difficulty::default(),
            level: STARTING_LEVEL,
            lines: 0,
            total_lines: 0,
            score: 0,
            tick_ms: 0,
            paused: false,
            lost: false,
        }
    }
}
