//! Per-difficulty game tallies.
//!
//! `GameCounter` is an observer that counts started, won and lost games and
//! keeps the best winning time for each difficulty. It lives in memory; an
//! embedder that wants to keep it across sessions serializes it with serde.

use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use std::collections::HashMap;
use std::time::Duration;

use crate::difficulty::Difficulty;
use crate::observer::GameObserver;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyStats {
    pub started: u32,
    pub won: u32,
    pub lost: u32,
    pub best_time: Option<Duration>,
}

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameCounter {
    // `Difficulty::Custom` is not a string, so store the map as pairs.
    #[serde_as(as = "Vec<(_, _)>")]
    by_difficulty: HashMap<Difficulty, DifficultyStats>,
}

impl GameCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self, difficulty: Difficulty) -> DifficultyStats {
        self.by_difficulty
            .get(&difficulty)
            .copied()
            .unwrap_or_default()
    }

    pub fn started(&self, difficulty: Difficulty) -> u32 {
        self.stats(difficulty).started
    }

    pub fn won(&self, difficulty: Difficulty) -> u32 {
        self.stats(difficulty).won
    }

    pub fn lost(&self, difficulty: Difficulty) -> u32 {
        self.stats(difficulty).lost
    }

    pub fn best_time(&self, difficulty: Difficulty) -> Option<Duration> {
        self.stats(difficulty).best_time
    }

    pub fn total_started(&self) -> u32 {
        self.by_difficulty.values().map(|s| s.started).sum()
    }

    pub fn total_won(&self) -> u32 {
        self.by_difficulty.values().map(|s| s.won).sum()
    }

    pub fn total_lost(&self) -> u32 {
        self.by_difficulty.values().map(|s| s.lost).sum()
    }

    pub fn reset(&mut self) {
        self.by_difficulty.clear();
    }

    fn entry(&mut self, difficulty: Difficulty) -> &mut DifficultyStats {
        self.by_difficulty.entry(difficulty).or_default()
    }
}

/// Leaderboard value of a winning time: hundredths of a second.
pub fn leaderboard_score(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis() / 10).unwrap_or(u64::MAX)
}

impl GameObserver for GameCounter {
    fn game_started(&mut self, difficulty: Difficulty) {
        self.entry(difficulty).started += 1;
    }

    fn game_won(&mut self, difficulty: Difficulty, elapsed: Duration) {
        let stats = self.entry(difficulty);
        stats.won += 1;
        stats.best_time = Some(match stats.best_time {
            Some(best) => best.min(elapsed),
            None => elapsed,
        });
        log::debug!(
            target: "stats",
            "{} won in {:?}, leaderboard score {}",
            difficulty,
            elapsed,
            leaderboard_score(elapsed)
        );
    }

    fn game_lost(&mut self, difficulty: Difficulty) {
        self.entry(difficulty).lost += 1;
    }
}
