//! Scoring module - level curve, points and tick speed
//!
//! - A level is completed after `level * 2 + 5` cleared lines; the counter
//!   then starts again from zero.
//! - Each lock event scores `lines * level * (tier + 1)`, computed after any
//!   level-up caused by the same event.
//! - Falling speed follows `1 + atan(level / 5) * 2/π * (tier + 1)` rows per
//!   second.

use std::f64::consts::PI;
use std::time::Duration;

use crate::types::{
    Difficulty, LEVEL_UP_BASE, LEVEL_UP_PER_LEVEL, MAX_TICK_NANOS, NANOS_PER_SECOND,
    STARTING_LEVEL,
};

/// Lines that must be cleared at `level` before the next level
pub fn level_up_threshold(level: u32) -> u32 {
    level * LEVEL_UP_PER_LEVEL + LEVEL_UP_BASE
}

/// Points for one lock event
pub fn line_clear_points(lines: u32, level: u32, difficulty: Difficulty) -> u32 {
    lines
        .saturating_mul(level)
        .saturating_mul(difficulty.tier() + 1)
}

/// Rows per second at a given level and difficulty
pub fn speed(level: u32, difficulty: Difficulty) -> f64 {
    1.0 + (level as f64 / 5.0).atan() * 2.0 / PI * (difficulty.tier() + 1) as f64
}

/// Delay between two clock-driven advances
///
/// Always strictly below one second.
pub fn tick_interval(level: u32, difficulty: Difficulty) -> Duration {
    let nanos = (NANOS_PER_SECOND as f64 / speed(level, difficulty)) - 1.0;
    let nanos = (nanos.max(0.0) as u64).min(MAX_TICK_NANOS);
    Duration::from_nanos(nanos)
}

/// Score calculation result for one lock event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    pub lines: u32,
    pub points: u32,
    pub leveled_up: bool,
}

/// Level, line counters and score of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub level: u32,
    /// Lines cleared since the last level-up
    pub lines: u32,
    /// Lines cleared over the whole game
    pub total_lines: u32,
    pub score: u32,
}

impl Progress {
    pub fn new() -> Self {
        Self {
            level: STARTING_LEVEL,
            lines: 0,
            total_lines: 0,
            score: 0,
        }
    }

    /// Book one lock event that cleared `lines` rows.
    ///
    /// The level check runs on every lock, even without cleared lines.
    pub fn record_clear(&mut self, lines: u32, difficulty: Difficulty) -> ScoreResult {
        self.lines += lines;
        self.total_lines += lines;

        let leveled_up = self.lines >= level_up_threshold(self.level);
        if leveled_up {
            self.level += 1;
            self.lines = 0;
        }

        let points = line_clear_points(lines, self.level, difficulty);
        self.score = self.score.saturating_add(points);

        ScoreResult {
            lines,
            points,
            leveled_up,
        }
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold() {
        assert_eq!(level_up_threshold(1), 7);
        assert_eq!(level_up_threshold(4), 13);
    }

    #[test]
    fn test_points_without_level_up() {
        let mut p = Progress::new();
        let r = p.record_clear(3, Difficulty::Hard);
        assert!(!r.leveled_up);
        assert_eq!(r.points, 3 * 1 * 3);
        assert_eq!(p.score, 9);
        assert_eq!(p.lines, 3);
    }

    #[test]
    fn test_level_up_boosts_same_event() {
        let mut p = Progress::new();
        p.record_clear(4, Difficulty::Normal);
        let r = p.record_clear(3, Difficulty::Normal);
        assert!(r.leveled_up);
        assert_eq!(p.level, 2);
        assert_eq!(p.lines, 0);
        assert_eq!(p.total_lines, 7);
        assert_eq!(r.points, 3 * 2 * 2);
    }

    #[test]
    fn test_no_lines_no_points() {
        let mut p = Progress::new();
        let r = p.record_clear(0, Difficulty::Hard);
        assert_eq!(r.points, 0);
        assert_eq!(p, Progress::new());
    }

    #[test]
    fn test_tick_interval_below_one_second() {
        for d in [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard] {
            for level in 0..50 {
                assert!(tick_interval(level, d).as_nanos() < NANOS_PER_SECOND as u128);
            }
        }
        assert_eq!(tick_interval(0, Difficulty::Normal).as_nanos(), MAX_TICK_NANOS as u128);
    }

    #[test]
    fn test_tick_interval_shrinks_with_level() {
        let d = Difficulty::Normal;
        assert!(tick_interval(2, d) < tick_interval(1, d));
        assert!(tick_interval(10, Difficulty::Hard) < tick_interval(10, Difficulty::Easy));
    }

    #[test]
    fn test_tick_interval_level_one_normal() {
        // speed = 1 + atan(0.2) * 2/pi * 2 ~= 1.2513
        let ms = tick_interval(1, Difficulty::Normal).as_millis();
        assert!((798..=800).contains(&ms), "{ms}");
    }
}
