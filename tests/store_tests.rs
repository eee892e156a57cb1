//! Store tests - resume round trip and the session's save points on disk

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use term_blocks::core::{
    Board, CommandSource, GameSnapshot, GameState, Persist, Piece, Progress, Render,
    RestoredGame, Session, SessionEnd,
};
use term_blocks::store::{JsonStore, SavedGame, StoreConfig};
use term_blocks::types::{Command, Difficulty, PieceKind, BOARD_WIDTH};

fn temp_store(name: &str) -> JsonStore {
    let dir: PathBuf =
        std::env::temp_dir().join(format!("blocks-it-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    JsonStore::open(StoreConfig {
        dir,
        player: "ada".to_string(),
    })
    .unwrap()
}

struct NoRender;

impl Render for NoRender {
    fn draw(&mut self, _snapshot: &GameSnapshot) -> Result<()> {
        Ok(())
    }
}

struct Once(Option<Command>);

impl CommandSource for Once {
    fn next_command(&mut self, timeout: Duration) -> Result<Option<Command>> {
        if self.0.is_none() {
            std::thread::sleep(timeout);
        }
        Ok(self.0.take())
    }
}

#[test]
fn test_resume_restores_identical_game() {
    let mut store = temp_store("resume");
    let mut game = GameState::new(31, Difficulty::Hard);
    game.apply(Command::Hold);
    game.apply(Command::MoveLeft);
    game.apply(Command::RotateCw);
    game.apply(Command::SoftDrop);

    store.save_state(&game).unwrap();
    let saved = store.load_state().unwrap().expect("state was written");
    assert_eq!(saved.player, "ada");
    assert_eq!(saved.difficulty, "hard");

    let resumed = GameState::restore(saved.into_restored().unwrap(), 99);
    assert_eq!(resumed.snapshot(), game.snapshot());
}

#[test]
fn test_save_without_hold_omits_field() {
    let mut store = temp_store("nohold");
    let game = GameState::new(2, Difficulty::Easy);
    store.save_state(&game).unwrap();

    let text = fs::read_to_string(store.state_path()).unwrap();
    assert!(!text.contains("\"hold\""));
    let saved: SavedGame = serde_json::from_str(&text).unwrap();
    assert!(saved.into_restored().unwrap().hold.is_none());
}

#[test]
fn test_tampered_save_is_rejected() {
    let mut store = temp_store("tampered");
    store
        .save_state(&GameState::new(2, Difficulty::Easy))
        .unwrap();

    let mut saved = store.load_state().unwrap().unwrap();
    saved.current.x = 40;
    store.write_state(&saved).unwrap();

    let err = store
        .load_state()
        .unwrap()
        .unwrap()
        .into_restored()
        .unwrap_err();
    assert!(format!("{:#}", err).contains("current piece"));
}

#[test]
fn test_lost_session_writes_leaderboard_and_drops_save() {
    let store = temp_store("lost");
    // Leftover save from an earlier run.
    store
        .write_state(&SavedGame::from_game(
            &GameState::new(1, Difficulty::Normal),
            "ada",
        ))
        .unwrap();

    let mut board = Board::new();
    for y in 2..22 {
        for x in 0..BOARD_WIDTH as i8 - 1 {
            board.set(x, y, Some(3));
        }
    }
    let game = GameState::restore(
        RestoredGame {
            board,
            current: Piece::spawn(PieceKind::T, 1),
            next: Piece::spawn(PieceKind::S, 2),
            hold: None,
            can_hold: true,
            progress: Progress {
                level: 3,
                lines: 0,
                total_lines: 20,
                score: 250,
            },
            difficulty: Difficulty::Normal,
        },
        6,
    );

    let session = Arc::new(Session::new(game, NoRender, store));
    let report = session.run(Once(Some(Command::HardDrop))).unwrap();
    assert_eq!(report.end, SessionEnd::Lost);
    assert_eq!((report.level, report.score), (3, 250));

    let (_, _, store) = Arc::try_unwrap(session).ok().unwrap().into_parts();
    assert!(!store.state_path().exists());
    let top = store.top_scores(10).unwrap();
    assert_eq!(top.len(), 1);
    assert_eq!((top[0].id.as_str(), top[0].level, top[0].score), ("ada", 3, 250));
    assert_eq!(top[0].date_string().len(), "2024-01-01".len());
}

#[test]
fn test_quit_session_keeps_save_for_resume() {
    let store = temp_store("quit");
    let session = Arc::new(Session::new(
        GameState::new(8, Difficulty::Normal),
        NoRender,
        store,
    ));
    let report = session.run(Once(Some(Command::Quit))).unwrap();
    assert_eq!(report.end, SessionEnd::Quit);

    let (game, _, store) = Arc::try_unwrap(session).ok().unwrap().into_parts();
    let saved = store.load_state().unwrap().expect("quit keeps the game");
    let resumed = GameState::restore(saved.into_restored().unwrap(), 1);
    assert_eq!(resumed.board(), game.board());
    assert_eq!(resumed.pieces().current(), game.pieces().current());
    assert!(store.top_scores(10).unwrap().is_empty());
}
