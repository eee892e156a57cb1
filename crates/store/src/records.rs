//! On-disk records: the in-progress save and leaderboard entries
//!
//! Both are plain serde structs written as JSON. Loading a save goes through
//! [`SavedGame::into_restored`], which rejects anything a running game could
//! never have produced.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use blocks_core::pieces::{Offset, OFFSET_MAX, OFFSET_MIN};
use blocks_core::scoring::Progress;
use blocks_core::{Board, GameState, Piece, RestoredGame};

use crate::types::{
    Cell, ColorId, Difficulty, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, STARTING_LEVEL,
};

/// A piece as stored: kind name, offsets, pivot and color token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedPiece {
    pub kind: String,
    pub cells: [Offset; 4],
    pub x: i8,
    pub y: i8,
    pub color: ColorId,
}

impl SavedPiece {
    pub fn from_piece(piece: &Piece) -> Self {
        Self {
            kind: piece.kind.as_str().to_string(),
            cells: piece.cells,
            x: piece.x,
            y: piece.y,
            color: piece.color,
        }
    }

    /// Decode and validate against the board dimensions
    pub fn to_piece(&self) -> Result<Piece> {
        let kind = PieceKind::from_str(&self.kind)
            .with_context(|| format!("unknown piece kind {:?}", self.kind))?;

        for &(dx, dy) in &self.cells {
            if !(OFFSET_MIN..=OFFSET_MAX).contains(&dx) || !(OFFSET_MIN..=OFFSET_MAX).contains(&dy) {
                bail!("offset ({dx}, {dy}) out of range for {}", self.kind);
            }
        }

        // Pivots outside the grid are rejected before any cell arithmetic.
        if !(0..BOARD_WIDTH as i8).contains(&self.x) || !(0..BOARD_HEIGHT as i8).contains(&self.y) {
            bail!("{} pivot ({}, {}) is off the board", self.kind, self.x, self.y);
        }

        let piece = Piece {
            kind,
            cells: self.cells,
            x: self.x,
            y: self.y,
            color: self.color,
        };
        let inside = piece.blocks().iter().all(|&(x, y)| {
            (0..BOARD_WIDTH as i8).contains(&x) && (0..BOARD_HEIGHT as i8).contains(&y)
        });
        if !inside {
            bail!("{} piece at ({}, {}) is off the board", self.kind, self.x, self.y);
        }
        Ok(piece)
    }
}

/// In-progress game, written after every line clear and on a clean exit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedGame {
    pub player: String,
    pub difficulty: String,
    pub level: u32,
    /// Lines since the last level-up
    pub lines: u32,
    pub total_lines: u32,
    pub score: u32,
    pub can_hold: bool,
    /// Full grid, hidden rows first
    pub board: Vec<Vec<Cell>>,
    pub current: SavedPiece,
    pub next: SavedPiece,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hold: Option<SavedPiece>,
}

impl SavedGame {
    pub fn from_game(game: &GameState, player: &str) -> Self {
        let mut grid = [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        game.board().write_grid(&mut grid);

        let progress = game.progress();
        let pieces = game.pieces();
        Self {
            player: player.to_string(),
            difficulty: game.difficulty().as_str().to_string(),
            level: progress.level,
            lines: progress.lines,
            total_lines: progress.total_lines,
            score: progress.score,
            can_hold: pieces.can_hold(),
            board: grid.iter().map(|row| row.to_vec()).collect(),
            current: SavedPiece::from_piece(pieces.current()),
            next: SavedPiece::from_piece(pieces.next()),
            hold: pieces.hold().map(SavedPiece::from_piece),
        }
    }

    /// Validate and convert into the parts a game resumes from
    pub fn into_restored(self) -> Result<RestoredGame> {
        let difficulty = Difficulty::from_str(&self.difficulty)
            .with_context(|| format!("unknown difficulty {:?}", self.difficulty))?;

        if self.level < STARTING_LEVEL {
            bail!("level {} below {}", self.level, STARTING_LEVEL);
        }
        if self.lines > self.total_lines {
            bail!("{} lines since level-up but {} in total", self.lines, self.total_lines);
        }

        if self.board.len() != BOARD_HEIGHT as usize {
            bail!("board has {} rows, expected {}", self.board.len(), BOARD_HEIGHT);
        }
        let mut grid = [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        for (y, (dst, src)) in grid.iter_mut().zip(&self.board).enumerate() {
            if src.len() != BOARD_WIDTH as usize {
                bail!("board row {y} has {} cells, expected {}", src.len(), BOARD_WIDTH);
            }
            dst.copy_from_slice(src);
        }

        let current = self.current.to_piece().context("current piece")?;
        let next = self.next.to_piece().context("next piece")?;
        let hold = match &self.hold {
            Some(p) => Some(p.to_piece().context("held piece")?),
            None => None,
        };

        let board = Board::from_grid(&grid);
        if !current.fits(&board) {
            bail!("current piece overlaps the locked stack");
        }

        Ok(RestoredGame {
            board,
            current,
            next,
            hold,
            can_hold: self.can_hold,
            progress: Progress {
                level: self.level,
                lines: self.lines,
                total_lines: self.total_lines,
                score: self.score,
            },
            difficulty,
        })
    }
}

/// One leaderboard entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub id: String,
    pub level: u32,
    pub score: u32,
    /// Unix seconds
    pub date: u64,
}

impl ScoreRecord {
    pub fn from_game(game: &GameState, player: &str, date: u64) -> Self {
        Self {
            id: player.to_string(),
            level: game.level(),
            score: game.score(),
            date,
        }
    }

    /// `YYYY-MM-DD` in UTC
    pub fn date_string(&self) -> String {
        format_date(self.date)
    }
}

/// Format unix seconds as a UTC calendar date
pub fn format_date(unix_secs: u64) -> String {
    let days = (unix_secs / 86_400) as i64;
    let (y, m, d) = civil_from_days(days);
    format!("{y:04}-{m:02}-{d:02}")
}

// Days since 1970-01-01 to (year, month, day), proleptic Gregorian.
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let m = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let y = yoe + era * 400 + i64::from(m <= 2);
    (y, m, d)
}
