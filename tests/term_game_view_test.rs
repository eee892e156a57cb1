use term_blocks::core::{GameSnapshot, GameState, Piece};
use term_blocks::term::{AnchorY, FrameBuffer, GameView, Viewport};
use term_blocks::types::{Difficulty, PieceKind};

fn empty_snapshot() -> GameSnapshot {
    let mut snap = GameState::new(1, Difficulty::Normal).snapshot();
    snap.current = None;
    snap.ghost = None;
    snap
}

fn screen_text(fb: &FrameBuffer) -> String {
    (0..fb.height())
        .map(|y| fb.row_text(y))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn term_view_renders_border_corners() {
    let snap = GameState::new(1, Difficulty::Normal).snapshot();
    let view = GameView::default();

    // With cell_w=2 and cell_h=1 the 20 visible rows are 20x20,
    // plus border => 22x22.
    assert_eq!(view.frame_size(), (22, 22));
    let fb = view.render(&snap, Viewport::new(22, 22));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_locked_cell_as_two_chars_wide() {
    let mut snap = empty_snapshot();
    // Bottom-left cell of the board; the last row is screen row 20.
    snap.board[21][0] = Some(4);

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    assert_eq!(fb.get(1, 20).unwrap().ch, '█');
    assert_eq!(fb.get(2, 20).unwrap().ch, '█');
    assert_ne!(fb.get(3, 20).unwrap().ch, '█');
}

#[test]
fn term_view_draws_current_piece_and_ghost() {
    let mut snap = empty_snapshot();
    let current = Piece::spawn(PieceKind::O, 3).shifted(0, 5);
    snap.current = Some(current);
    snap.ghost = Some(current.shifted(0, 15));

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    // Square at pivot (5, 6) covers rows 5..=6, columns 4..=5.
    assert_eq!(fb.get(9, 4).unwrap().ch, '█');
    assert_eq!(fb.get(12, 5).unwrap().ch, '█');
    // Ghost resting on the floor.
    assert_eq!(fb.get(9, 19).unwrap().ch, '░');
    assert_eq!(fb.get(12, 20).unwrap().ch, '░');
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let mut snap = GameState::new(1, Difficulty::Hard).snapshot();
    snap.score = 1234;
    snap.level = 2;
    snap.total_lines = 10;
    snap.hold = Some(Piece::spawn(PieceKind::T, 2));

    let view = GameView::default().with_player("ada");
    let fb = view.render(&snap, Viewport::new(60, 22));

    // Board frame at x=19, panel two columns past it.
    let all = screen_text(&fb);
    assert!(fb.row_text(0).contains("BLOCKS"));
    assert!(fb.row_text(1).contains("ada"));
    assert!(fb.row_text(2).contains("hard"));
    assert!(fb.row_text(4).contains("SCORE  1234"));
    assert!(fb.row_text(5).contains("LEVEL  2"));
    assert!(fb.row_text(6).contains("LINES  10"));
    assert!(all.contains("NEXT"));
    assert!(all.contains("HOLD"));
}

#[test]
fn term_view_skips_side_panel_when_narrow() {
    let snap = GameState::new(1, Difficulty::Normal).snapshot();
    let fb = GameView::default().render(&snap, Viewport::new(30, 22));
    assert!(!screen_text(&fb).contains("SCORE"));
}

#[test]
fn term_view_centers_board_by_default_on_tall_viewports() {
    let snap = GameState::new(1, Difficulty::Normal).snapshot();
    let fb = GameView::default().render(&snap, Viewport::new(22, 30));

    // start_y = (30 - 22) / 2 = 4 => top-left corner at (0,4).
    assert_eq!(fb.get(0, 4).unwrap().ch, '┌');
}

#[test]
fn term_view_can_anchor_board_to_top() {
    let snap = GameState::new(1, Difficulty::Normal).snapshot();
    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let fb = view.render(&snap, Viewport::new(22, 30));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
}

#[test]
fn term_view_overlays_pause_and_game_over() {
    let mut snap = empty_snapshot();
    snap.paused = true;
    let view = GameView::default();

    let fb = view.render(&snap, Viewport::new(22, 22));
    assert!(fb.row_text(11).contains("PAUSED"));

    snap.lost = true;
    let fb = view.render(&snap, Viewport::new(22, 22));
    assert!(fb.row_text(11).contains("GAME OVER"));
    assert!(!screen_text(&fb).contains("PAUSED"));
}
