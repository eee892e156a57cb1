//! Terminal block game runner (default binary).
//!
//! Reads config, resumes a saved game if there is one (paused), and plays it
//! with a clock thread and an input thread. A lost game ends on the local
//! leaderboard.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Result};

use term_blocks::config::{Config, Invocation, USAGE};
use term_blocks::core::{GameState, Session, SessionEnd, SessionReport};
use term_blocks::input::{wait_for_key, TerminalInput};
use term_blocks::store::{JsonStore, SavedGame};
use term_blocks::term::{GameView, LeaderboardRow, TerminalRenderer, TerminalView};
use term_blocks::types::LEADERBOARD_LEN;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match Config::from_env().parse_args(&args)? {
        Invocation::Help => {
            println!("{USAGE}");
            return Ok(());
        }
        Invocation::Play(config) => config,
    };

    let store = JsonStore::open(config.store.clone())?;
    let seed = config.seed.unwrap_or_else(time_seed);
    let game = load_game(&store, &config, seed);
    let view = GameView::default().with_player(store.player());

    let mut renderer = TerminalRenderer::new();
    renderer.enter()?;
    let session = Arc::new(Session::new(game, TerminalView::new(renderer, view), store));

    let result = session.run(TerminalInput::new());

    let (_, mut view, store) = Arc::try_unwrap(session)
        .map_err(|_| anyhow!("session still shared after the game ended"))?
        .into_parts();

    let mut late_errors = Vec::new();
    if let Ok(SessionReport {
        end: SessionEnd::Lost,
        score,
        ..
    }) = &result
    {
        if let Err(e) = show_leaderboard(&mut view, &store, *score) {
            late_errors.push(e);
        }
    }

    // Everything below goes to the normal screen.
    view.renderer_mut().exit()?;

    let report = result?;
    for e in report.store_errors.iter().chain(&late_errors) {
        eprintln!("[Store] {e:#}");
    }
    match report.end {
        SessionEnd::Lost => eprintln!(
            "[Session] game over at level {} with {} points",
            report.level, report.score
        ),
        SessionEnd::Quit => eprintln!(
            "[Session] game saved at level {} with {} points",
            report.level, report.score
        ),
    }
    Ok(())
}

/// Resume the saved game (paused) unless `--fresh`; fall back to a new game.
fn load_game(store: &JsonStore, config: &Config, seed: u32) -> GameState {
    if config.fresh {
        if let Err(e) = store.clear_state() {
            eprintln!("[Store] {e:#}");
        }
        return GameState::new(seed, config.difficulty);
    }

    let saved = store
        .load_state()
        .and_then(|saved| saved.map(SavedGame::into_restored).transpose());
    match saved {
        Ok(Some(restored)) => {
            eprintln!("[Store] resuming saved game from {}", store.state_path().display());
            let mut game = GameState::restore(restored, seed);
            game.set_paused(true);
            game
        }
        Ok(None) => GameState::new(seed, config.difficulty),
        Err(e) => {
            eprintln!("[Store] ignoring saved game: {e:#}");
            GameState::new(seed, config.difficulty)
        }
    }
}

fn show_leaderboard(view: &mut TerminalView, store: &JsonStore, score: u32) -> Result<()> {
    let records = store.top_scores(LEADERBOARD_LEN)?;
    let dates: Vec<String> = records.iter().map(|r| r.date_string()).collect();
    let rows: Vec<LeaderboardRow<'_>> = records
        .iter()
        .zip(&dates)
        .map(|(r, date)| LeaderboardRow {
            name: r.id.as_str(),
            level: r.level,
            score: r.score,
            date: date.as_str(),
        })
        .collect();

    view.draw_leaderboard(&rows, Some(score))?;
    wait_for_key()?;
    Ok(())
}

fn time_seed() -> u32 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    (nanos ^ (nanos >> 32) ^ u64::from(std::process::id())) as u32
}
