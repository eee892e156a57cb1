//! Runtime configuration: environment first, then command-line flags.
//!
//! | variable            | flag           | meaning                          |
//! |---------------------|----------------|----------------------------------|
//! | `BLOCKS_PLAYER`     | `--name`       | name on the leaderboard          |
//! | `BLOCKS_DIFFICULTY` | `--difficulty` | `easy`, `normal`, `hard` or 0-2  |
//! | `BLOCKS_DATA_DIR`   | `--data-dir`   | where saves and scores live      |
//! | `BLOCKS_SEED`       | `--seed`       | fixed piece sequence             |
//! |                     | `--fresh`      | ignore and discard any saved game|

use std::path::PathBuf;

use anyhow::{anyhow, Result};

use crate::store::StoreConfig;
use crate::types::Difficulty;

/// Longest player name kept for the leaderboard
pub const MAX_NAME_LEN: usize = 16;

pub const USAGE: &str = "\
usage: blocks [--name NAME] [--difficulty easy|normal|hard] [--data-dir DIR] [--seed N] [--fresh]

keys: a/d or arrows move, s soft drop, w hard drop, q/e rotate, space hold,
      p pause, F3 or Esc quit";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub store: StoreConfig,
    pub difficulty: Difficulty,
    /// Fixed seed; a time-based one is used when absent
    pub seed: Option<u32>,
    /// Start a new game even if a save exists
    pub fresh: bool,
}

/// What the command line asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Play(Config),
    Help,
}

impl Config {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from any key lookup. Invalid values are reported and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut store = StoreConfig::from_lookup(&lookup);
        store.player = clamp_name(&store.player);

        let difficulty = match lookup("BLOCKS_DIFFICULTY") {
            Some(v) => Difficulty::from_str(&v).unwrap_or_else(|| {
                eprintln!("[Config] ignoring BLOCKS_DIFFICULTY={v:?}");
                Difficulty::default()
            }),
            None => Difficulty::default(),
        };

        let seed = lookup("BLOCKS_SEED").and_then(|v| match v.trim().parse() {
            Ok(seed) => Some(seed),
            Err(_) => {
                eprintln!("[Config] ignoring BLOCKS_SEED={v:?}");
                None
            }
        });

        Self {
            store,
            difficulty,
            seed,
            fresh: false,
        }
    }

    /// Apply command-line flags on top of this config.
    ///
    /// `args` excludes the program name.
    pub fn parse_args(mut self, args: &[String]) -> Result<Invocation> {
        let mut i = 0usize;
        while i < args.len() {
            match args[i].as_str() {
                "-h" | "--help" => return Ok(Invocation::Help),
                "--fresh" => self.fresh = true,
                flag @ ("--name" | "--difficulty" | "--data-dir" | "--seed") => {
                    i += 1;
                    let v = args
                        .get(i)
                        .ok_or_else(|| anyhow!("missing value for {}", flag))?;
                    self.set(flag, v)?;
                }
                other => return Err(anyhow!("unknown argument: {}", other)),
            }
            i += 1;
        }
        Ok(Invocation::Play(self))
    }

    fn set(&mut self, flag: &str, v: &str) -> Result<()> {
        match flag {
            "--name" => {
                let name = clamp_name(v);
                if name.is_empty() {
                    return Err(anyhow!("--name must not be empty"));
                }
                self.store.player = name;
            }
            "--difficulty" => {
                self.difficulty = Difficulty::from_str(v)
                    .ok_or_else(|| anyhow!("invalid --difficulty value: {}", v))?;
            }
            "--data-dir" => self.store.dir = PathBuf::from(v),
            "--seed" => {
                self.seed = Some(
                    v.trim()
                        .parse()
                        .map_err(|_| anyhow!("invalid --seed value: {}", v))?,
                );
            }
            _ => return Err(anyhow!("unknown argument: {}", flag)),
        }
        Ok(())
    }
}

fn clamp_name(name: &str) -> String {
    name.trim().chars().take(MAX_NAME_LEN).collect()
}
