//! Render collaborator that draws snapshots to the terminal.

use anyhow::Result;

use crate::core::{GameSnapshot, Render};
use crate::fb::FrameBuffer;
use crate::game_view::{GameView, Viewport};
use crate::leaderboard::{LeaderboardRow, LeaderboardView};
use crate::renderer::TerminalRenderer;

/// Owns the terminal for the length of a game.
///
/// Keeps one framebuffer and hands it to the renderer every frame, so drawing
/// does not allocate once the terminal size settles.
pub struct TerminalView {
    renderer: TerminalRenderer,
    view: GameView,
    fb: FrameBuffer,
}

impl TerminalView {
    pub fn new(renderer: TerminalRenderer, view: GameView) -> Self {
        Self {
            renderer,
            view,
            fb: FrameBuffer::new(0, 0),
        }
    }

    fn viewport(&self) -> Viewport {
        let (w, h) = self.renderer.size();
        Viewport::new(w, h)
    }

    /// Draw the leaderboard in place of the game
    pub fn draw_leaderboard(&mut self, rows: &[LeaderboardRow<'_>], final_score: Option<u32>) -> Result<()> {
        let viewport = self.viewport();
        LeaderboardView.render_into(rows, final_score, viewport, &mut self.fb);
        self.renderer.invalidate();
        self.renderer.draw_swap(&mut self.fb)
    }

    pub fn renderer_mut(&mut self) -> &mut TerminalRenderer {
        &mut self.renderer
    }
}

impl Render for TerminalView {
    fn draw(&mut self, snapshot: &GameSnapshot) -> Result<()> {
        let viewport = self.viewport();
        self.view.render_into(snapshot, viewport, &mut self.fb);
        self.renderer.draw_swap(&mut self.fb)
    }
}
