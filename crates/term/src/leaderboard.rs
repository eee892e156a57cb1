//! Leaderboard screen shown after a lost game.

use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::game_view::Viewport;

/// One ranked entry, already formatted for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaderboardRow<'a> {
    pub name: &'a str,
    pub level: u32,
    pub score: u32,
    pub date: &'a str,
}

const NAME_W: usize = 16;

#[derive(Debug, Clone, Copy, Default)]
pub struct LeaderboardView;

impl LeaderboardView {
    pub fn render_into(
        &self,
        rows: &[LeaderboardRow<'_>],
        final_score: Option<u32>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));
        if viewport.width < 4 || viewport.height < 4 {
            return;
        }

        let border = CellStyle::plain(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        let title = CellStyle::default().bold();
        let text = CellStyle::default();
        let hint = text.dim();

        fb.draw_box(0, 0, viewport.width, viewport.height, border);
        fb.put_str(2, 1, "Local Leaderboard", title);
        if let Some(score) = final_score {
            let x = fb.put_str(2, 2, "Your score: ", text);
            fb.put_u32(x, 2, score, title);
        }
        fb.put_str(4, 4, "Rank  Name              Level  Score    Date", title);

        let mut y = 5;
        for (i, row) in rows.iter().enumerate() {
            if y + 2 >= viewport.height {
                break;
            }
            let name: String = row.name.chars().take(NAME_W).collect();
            let line = format!(
                "{:>3}.  {:<w$}  {:<5}  {:<7}  {}",
                i + 1,
                name,
                row.level,
                row.score,
                row.date,
                w = NAME_W
            );
            fb.put_str(4, y, &line, text);
            y += 1;
        }
        if rows.is_empty() {
            fb.put_str(4, y, "No scores yet.", hint);
        }

        fb.put_str(2, viewport.height - 2, "Press any key to exit.", hint);
    }

    pub fn render(
        &self,
        rows: &[LeaderboardRow<'_>],
        final_score: Option<u32>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(rows, final_score, viewport, &mut fb);
        fb
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_rows_in_order() {
        let rows = [
            LeaderboardRow {
                name: "ada",
                level: 3,
                score: 120,
                date: "2024-01-02",
            },
            LeaderboardRow {
                name: "a-very-long-player-name",
                level: 1,
                score: 7,
                date: "2024-01-01",
            },
        ];
        let fb = LeaderboardView.render(&rows, Some(120), Viewport::new(60, 12));

        assert!(fb.row_text(1).contains("Local Leaderboard"));
        assert!(fb.row_text(2).contains("Your score: 120"));
        assert!(fb.row_text(5).contains("1.  ada"));
        assert!(fb.row_text(5).contains("2024-01-02"));
        assert!(fb.row_text(6).contains("a-very-long-play "));
        assert!(fb.row_text(10).contains("Press any key"));
    }

    #[test]
    fn empty_board_says_so() {
        let fb = LeaderboardView.render(&[], None, Viewport::new(40, 10));
        assert!(fb.row_text(5).contains("No scores yet."));
    }
}
