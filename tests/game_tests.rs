//! Game state tests - commands, clock steps, scoring and game over

use term_blocks::core::scoring::{level_up_threshold, line_clear_points};
use term_blocks::core::{Board, GameState, Outcome, Piece, Progress, RestoredGame};
use term_blocks::types::{Command, Difficulty, PieceKind, BOARD_WIDTH, STARTING_LEVEL};

/// A game whose current piece is a vertical-ready bar over a well in column 9.
fn well_game(rows: std::ops::Range<i8>, difficulty: Difficulty, progress: Progress) -> GameState {
    let mut board = Board::new();
    for y in rows {
        for x in 0..BOARD_WIDTH as i8 - 1 {
            board.set(x, y, Some(1));
        }
    }
    GameState::restore(
        RestoredGame {
            board,
            current: Piece::spawn(PieceKind::I, 10),
            next: Piece::spawn(PieceKind::O, 11),
            hold: None,
            can_hold: true,
            progress,
            difficulty,
        },
        5,
    )
}

/// Stand the bar up and steer it over the right-hand well.
fn drop_bar_into_well(game: &mut GameState) -> Outcome {
    game.apply(Command::SoftDrop);
    assert!(game.apply(Command::RotateCw).accepted());
    for _ in 0..5 {
        game.apply(Command::MoveRight);
    }
    assert_eq!(game.pieces().current().x, 9);
    game.apply(Command::HardDrop)
}

#[test]
fn test_new_game_defaults() {
    let game = GameState::new(1, Difficulty::default());
    assert_eq!(game.difficulty(), Difficulty::Normal);
    assert_eq!(game.level(), STARTING_LEVEL);
    assert_eq!(game.score(), 0);
    assert!(!game.paused() && !game.lost() && !game.quit());
    assert!(game.tick_interval().as_nanos() < 1_000_000_000);
}

#[test]
fn test_same_seed_same_pieces() {
    let mut a = GameState::new(777, Difficulty::Normal);
    let mut b = GameState::new(777, Difficulty::Normal);
    for _ in 0..20 {
        assert_eq!(a.pieces().current(), b.pieces().current());
        assert_eq!(a.pieces().next(), b.pieces().next());
        a.apply(Command::HardDrop);
        b.apply(Command::HardDrop);
    }
}

#[test]
fn test_four_line_clear_scores_lines_times_level_times_tier() {
    let mut game = well_game(18..22, Difficulty::Hard, Progress::new());

    let outcome = drop_bar_into_well(&mut game);
    let event = outcome.lock_event().expect("hard drop locks");
    assert_eq!(event.score.lines, 4);
    assert!(!event.lost);
    assert_eq!(game.score(), 4 * 1 * 3);
    assert_eq!(game.progress().total_lines, 4);
    assert_eq!(game.board().filled_count(), 0);
}

#[test]
fn test_level_up_applies_before_points() {
    let progress = Progress {
        level: 1,
        lines: 5,
        total_lines: 5,
        score: 0,
    };
    let mut game = well_game(20..22, Difficulty::Normal, progress);
    let slow = game.tick_interval();

    let event = drop_bar_into_well(&mut game).lock_event().unwrap();
    assert!(event.score.leveled_up);
    assert_eq!(game.level(), 2);
    assert_eq!(game.progress().lines, 0);
    assert_eq!(game.score(), line_clear_points(2, 2, Difficulty::Normal));
    assert!(game.tick_interval() < slow);
}

#[test]
fn test_threshold_grows_with_level() {
    assert_eq!(level_up_threshold(1), 7);
    assert_eq!(level_up_threshold(2), 9);
    assert_eq!(level_up_threshold(10), 25);
}

#[test]
fn test_clock_step_moves_then_locks() {
    let mut game = GameState::new(3, Difficulty::Normal);
    let start_y = game.pieces().current().y;
    assert_eq!(game.step(), Outcome::Applied);
    assert_eq!(game.pieces().current().y, start_y + 1);

    let mut steps = 0;
    while game.step().lock_event().is_none() {
        steps += 1;
        assert!(steps < 30, "piece never locked");
    }
    assert_eq!(game.board().filled_count(), 4);
}

#[test]
fn test_paused_game_ignores_clock_and_moves() {
    let mut game = GameState::new(3, Difficulty::Normal);
    game.apply(Command::Pause);
    let snap = game.snapshot();

    assert_eq!(game.step(), Outcome::Rejected);
    for cmd in [
        Command::MoveLeft,
        Command::MoveRight,
        Command::SoftDrop,
        Command::HardDrop,
        Command::RotateCw,
        Command::RotateCcw,
        Command::Hold,
    ] {
        assert_eq!(game.apply(cmd), Outcome::Rejected, "{:?}", cmd);
    }
    assert_eq!(game.snapshot(), snap);

    assert!(game.apply(Command::Pause).accepted());
    assert!(!game.paused());
}

#[test]
fn test_topping_out_ends_game() {
    let mut game = GameState::new(9, Difficulty::Easy);
    let mut locks = 0;
    while !game.lost() {
        game.apply(Command::HardDrop);
        locks += 1;
        assert!(locks < 200, "stacking in the middle must top out");
    }
    assert!(game.is_over());
    assert_eq!(game.apply(Command::Pause), Outcome::Rejected);
    assert_eq!(game.apply(Command::Quit), Outcome::Rejected);
    assert_eq!(game.step(), Outcome::Rejected);
    assert!(game.snapshot().lost);
}

#[test]
fn test_quit_while_paused() {
    let mut game = GameState::new(9, Difficulty::Easy);
    game.apply(Command::Pause);
    assert!(game.apply(Command::Quit).accepted());
    assert!(game.quit());
    assert!(!game.paused());
    assert!(!game.lost());
}

#[test]
fn test_snapshot_carries_everything_renderers_need() {
    let mut game = GameState::new(5, Difficulty::Hard);
    game.apply(Command::Hold);
    let snap = game.snapshot();

    assert_eq!(snap.current.as_ref(), Some(game.pieces().current()));
    assert_eq!(snap.hold.as_ref(), game.pieces().hold());
    assert!(!snap.can_hold);
    assert_eq!(snap.difficulty, Difficulty::Hard);
    assert_eq!(snap.tick_ms, game.tick_interval().as_millis() as u32);
    let ghost = snap.ghost.unwrap();
    assert_eq!(ghost.cells, snap.current.unwrap().cells);
    assert!(snap.playable());
}
