//! JSON file store
//!
//! Layout under the data directory:
//! - `state.json`: the in-progress game, replaced atomically on every save
//! - `scores.json`: every finished game's score record

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

use blocks_core::{GameState, Persist};

use crate::records::{SavedGame, ScoreRecord};

pub const STATE_FILE: &str = "state.json";
pub const SCORES_FILE: &str = "scores.json";
pub const DEFAULT_PLAYER: &str = "No Name";

/// Where saves live and who is playing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub dir: PathBuf,
    pub player: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            player: DEFAULT_PLAYER.to_string(),
        }
    }
}

impl StoreConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from any key lookup, e.g. a map in tests
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let dir = non_empty("BLOCKS_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_dir);
        let player = non_empty("BLOCKS_PLAYER").unwrap_or_else(|| DEFAULT_PLAYER.to_string());

        Self { dir, player }
    }
}

/// `$HOME/.local/share/blocks`, or `./.blocks` without a home directory
pub fn default_dir() -> PathBuf {
    match std::env::var_os("HOME") {
        Some(home) if !home.is_empty() => PathBuf::from(home).join(".local/share/blocks"),
        _ => PathBuf::from(".blocks"),
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Persistence collaborator backed by JSON files
#[derive(Debug)]
pub struct JsonStore {
    config: StoreConfig,
}

impl JsonStore {
    /// Open the store, creating the data directory if needed
    pub fn open(config: StoreConfig) -> Result<Self> {
        fs::create_dir_all(&config.dir)
            .with_context(|| format!("creating data directory {}", config.dir.display()))?;
        Ok(Self { config })
    }

    pub fn player(&self) -> &str {
        &self.config.player
    }

    pub fn state_path(&self) -> PathBuf {
        self.config.dir.join(STATE_FILE)
    }

    pub fn scores_path(&self) -> PathBuf {
        self.config.dir.join(SCORES_FILE)
    }

    /// The saved in-progress game, if there is one
    pub fn load_state(&self) -> Result<Option<SavedGame>> {
        read_json(&self.state_path())
    }

    /// Remove the in-progress save. Missing files are fine.
    pub fn clear_state(&self) -> Result<()> {
        let path = self.state_path();
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("removing {}", path.display())),
        }
    }

    pub fn write_state(&self, saved: &SavedGame) -> Result<()> {
        write_json_atomic(&self.state_path(), saved)
    }

    /// Every recorded score, oldest first
    pub fn load_scores(&self) -> Result<Vec<ScoreRecord>> {
        Ok(read_json(&self.scores_path())?.unwrap_or_default())
    }

    pub fn record_score(&self, record: ScoreRecord) -> Result<()> {
        let mut scores = self.load_scores()?;
        scores.push(record);
        write_json_atomic(&self.scores_path(), &scores)
    }

    /// Best `n` scores, highest first. Ties keep the earlier game first.
    pub fn top_scores(&self, n: usize) -> Result<Vec<ScoreRecord>> {
        let mut scores = self.load_scores()?;
        scores.sort_by(|a, b| b.score.cmp(&a.score));
        scores.truncate(n);
        Ok(scores)
    }
}

impl Persist for JsonStore {
    fn save_state(&mut self, game: &GameState) -> Result<()> {
        self.write_state(&SavedGame::from_game(game, &self.config.player))
    }

    fn save_score(&mut self, game: &GameState) -> Result<()> {
        self.record_score(ScoreRecord::from_game(game, &self.config.player, unix_now()))?;
        // A lost game must not be resumed.
        self.clear_state()
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).with_context(|| format!("reading {}", path.display())),
    };
    let value = serde_json::from_slice(&bytes)
        .with_context(|| format!("decoding {}", path.display()))?;
    Ok(Some(value))
}

// Write to a sibling temp file, then rename over the target.
fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).context("encoding JSON")?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, &bytes).with_context(|| format!("writing {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("renaming {} to {}", tmp.display(), path.display()))?;
    Ok(())
}
