//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Only the visible rows are drawn; the two hidden rows above the field never
//! reach the screen.

use crate::core::{GameSnapshot, Piece};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{ColorId, BOARD_HEIGHT, BOARD_WIDTH, HIDDEN_ROWS, VISIBLE_HEIGHT};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

const FIELD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// Block colors, indexed by `color token % 7`.
const PALETTE: [Rgb; 7] = [
    Rgb::new(230, 230, 230),
    Rgb::new(220, 80, 80),
    Rgb::new(100, 220, 120),
    Rgb::new(240, 220, 80),
    Rgb::new(80, 120, 220),
    Rgb::new(200, 120, 220),
    Rgb::new(80, 220, 220),
];

pub fn block_color(color: ColorId) -> Rgb {
    PALETTE[color as usize % PALETTE.len()]
}

const CONTROLS: [&str; 6] = [
    "a d  ← →  move",
    "s ↓  w ↑  drop",
    "q z  e x  rotate",
    "space c   hold",
    "p    F1   pause",
    "F3   Esc  quit",
];

/// Terminal renderer for the playing field and side panel.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
    player: String,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w,
            cell_h,
            anchor_y: AnchorY::Center,
            player: String::new(),
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn with_player(mut self, player: impl Into<String>) -> Self {
        self.player = player.into();
        self
    }

    /// Size of the bordered field in terminal cells.
    pub fn frame_size(&self) -> (u16, u16) {
        (
            BOARD_WIDTH as u16 * self.cell_w + 2,
            VISIBLE_HEIGHT as u16 * self.cell_h + 2,
        )
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let (frame_w, frame_h) = self.frame_size();
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };

        fb.fill_rect(
            start_x + 1,
            start_y + 1,
            frame_w - 2,
            frame_h - 2,
            ' ',
            CellStyle::plain(Rgb::new(80, 80, 90), FIELD_BG),
        );
        fb.draw_box(
            start_x,
            start_y,
            frame_w,
            frame_h,
            CellStyle::plain(Rgb::new(200, 200, 200), PANEL_BG),
        );

        for y in HIDDEN_ROWS..BOARD_HEIGHT {
            for x in 0..BOARD_WIDTH {
                match snap.board[y as usize][x as usize] {
                    Some(color) => self.draw_block(fb, start_x, start_y, x as i8, y as i8, color),
                    None => self.draw_empty(fb, start_x, start_y, x as i8, y as i8),
                }
            }
        }

        if let Some(ghost) = snap.ghost {
            let style = CellStyle::plain(Rgb::new(140, 140, 140), FIELD_BG).dim();
            for (x, y) in ghost.blocks() {
                self.fill_board_cell(fb, start_x, start_y, x, y, '░', style);
            }
        }

        if let Some(current) = snap.current {
            for (x, y) in current.blocks() {
                self.draw_block(fb, start_x, start_y, x, y, current.color);
            }
        }

        self.draw_side_panel(fb, snap, viewport, start_x + frame_w + 2, start_y);

        if snap.lost {
            self.draw_overlay(fb, start_x, start_y, "GAME OVER");
        } else if snap.paused {
            self.draw_overlay(fb, start_x, start_y, "PAUSED");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_empty(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, x: i8, y: i8) {
        let style = CellStyle::plain(Rgb::new(90, 90, 100), FIELD_BG).dim();
        self.fill_board_cell(fb, start_x, start_y, x, y, '·', style);
    }

    fn draw_block(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, x: i8, y: i8, color: ColorId) {
        let style = CellStyle::plain(block_color(color), FIELD_BG).bold();
        self.fill_board_cell(fb, start_x, start_y, x, y, '█', style);
    }

    // Board coordinates include the hidden rows; anything above the visible
    // field is skipped.
    fn fill_board_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        x: i8,
        y: i8,
        ch: char,
        style: CellStyle,
    ) {
        let top = HIDDEN_ROWS as i8;
        if x < 0 || x >= BOARD_WIDTH as i8 || y < top || y >= BOARD_HEIGHT as i8 {
            return;
        }
        let px = start_x + 1 + x as u16 * self.cell_w;
        let py = start_y + 1 + (y - top) as u16 * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::plain(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::plain(Rgb::new(200, 200, 200), PANEL_BG);
        let hint = value.dim();

        let mut y = start_y;
        fb.put_str(panel_x, y, "BLOCKS", label);
        y += 1;
        if !self.player.is_empty() {
            fb.put_str(panel_x, y, &self.player, value);
        }
        y += 1;
        fb.put_str(panel_x, y, snap.difficulty.as_str(), hint);
        y += 2;

        for (name, n) in [("SCORE", snap.score), ("LEVEL", snap.level), ("LINES", snap.total_lines)] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x + 7, y, n, value);
            y += 1;
        }
        y += 1;

        fb.put_str(panel_x, y, "NEXT", label);
        y += 1;
        self.draw_preview(fb, panel_x, y, snap.next.as_ref(), false);
        y += 3;

        fb.put_str(panel_x, y, "HOLD", label);
        y += 1;
        self.draw_preview(fb, panel_x, y, snap.hold.as_ref(), !snap.can_hold);
        y += 3;

        for line in CONTROLS {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, hint);
            y += 1;
        }
    }

    // Draw a piece in its own small grid, normalized to its top-left cell.
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, piece: Option<&Piece>, dim: bool) {
        let Some(piece) = piece else {
            fb.put_str(x, y, "-", CellStyle::default().dim());
            return;
        };

        let min_x = piece.cells.iter().map(|c| c.0).min().unwrap_or(0);
        let min_y = piece.cells.iter().map(|c| c.1).min().unwrap_or(0);
        let mut style = CellStyle::plain(block_color(piece.color), PANEL_BG);
        if dim {
            style = style.dim();
        }
        for &(dx, dy) in &piece.cells {
            let px = x + (dx - min_x) as u16 * self.cell_w;
            let py = y + (dy - min_y) as u16 * self.cell_h;
            fb.fill_rect(px, py, self.cell_w, self.cell_h, '█', style);
        }
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, text: &str) {
        let (frame_w, frame_h) = self.frame_size();
        let style = CellStyle::plain(Rgb::new(255, 255, 255), PANEL_BG).bold();
        fb.put_str_centered(start_x, frame_w, start_y + frame_h / 2, text, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameState;
    use crate::types::Difficulty;

    #[test]
    fn hidden_rows_are_not_drawn() {
        let mut snap = GameState::new(1, Difficulty::Normal).snapshot();
        snap.current = None;
        snap.ghost = None;
        snap.board[0][0] = Some(1);
        snap.board[2][0] = Some(1);

        let fb = GameView::default().render(&snap, Viewport::new(22, 22));
        // Row 2 is the first visible row, drawn just inside the border.
        assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
        assert_eq!(fb.get(1, 1).unwrap().ch, '█');
        assert_eq!(fb.get(2, 1).unwrap().ch, '█');

        let blocks = (0..fb.height())
            .flat_map(|y| (0..fb.width()).map(move |x| (x, y)))
            .filter(|&(x, y)| fb.get(x, y).unwrap().ch == '█')
            .count();
        assert_eq!(blocks, 2);
    }

    #[test]
    fn palette_wraps() {
        assert_eq!(block_color(0), block_color(7));
        assert_ne!(block_color(1), block_color(2));
    }
}
