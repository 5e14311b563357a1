// Results produced by the simulator: one game, and a lineup's record over many games.

use crate::lineup::Lineup;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// Runs scored by one lineup in one simulated game
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameResult {
    pub total_runs: u32,
    pub inning_runs: Vec<u32>,
}

impl GameResult {
    pub fn new(inning_runs: Vec<u32>) -> Self {
        GameResult {
            total_runs: inning_runs.iter().sum(),
            inning_runs,
        }
    }
}

/// A lineup together with the run totals of every game it was simulated for
#[derive(Debug, Clone)]
pub struct LineupResult {
    pub lineup: Lineup,
    pub runs_per_game: Vec<u32>,
    pub mean_runs: f64,
    /// Sample standard deviation; 0 with fewer than two games
    pub std_dev: f64,
}

impl LineupResult {
    pub fn new(lineup: Lineup, runs_per_game: Vec<u32>) -> Self {
        let (mean_runs, std_dev) = mean_and_std_dev(&runs_per_game);
        LineupResult {
            lineup,
            runs_per_game,
            mean_runs,
            std_dev,
        }
    }

    pub fn total_games(&self) -> usize {
        self.runs_per_game.len()
    }

    pub fn total_runs(&self) -> u64 {
        self.runs_per_game.iter().map(|&r| r as u64).sum()
    }

    pub fn min_runs(&self) -> u32 {
        self.runs_per_game.iter().copied().min().unwrap_or(0)
    }

    pub fn max_runs(&self) -> u32 {
        self.runs_per_game.iter().copied().max().unwrap_or(0)
    }
}

impl fmt::Display for LineupResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Mean: {:.2} ± {:.2} | Lineup: {}",
            self.mean_runs, self.std_dev, self.lineup
        )
    }
}

fn mean_and_std_dev(samples: &[u32]) -> (f64, f64) {
    if samples.is_empty() {
        return (0.0, 0.0);
    }
    let n = samples.len() as f64;
    let mean = samples.iter().map(|&x| x as f64).sum::<f64>() / n;
    if samples.len() < 2 {
        return (mean, 0.0);
    }
    let variance = samples
        .iter()
        .map(|&x| (x as f64 - mean).powi(2))
        .sum::<f64>()
        / (n - 1.0);
    (mean, variance.sqrt())
}

/// Descending by mean runs. Stable, so equal means keep their incoming order.
pub fn by_mean_desc(a: &LineupResult, b: &LineupResult) -> Ordering {
    b.mean_runs.partial_cmp(&a.mean_runs).unwrap_or(Ordering::Equal)
}

pub fn rank(results: &mut [LineupResult]) {
    results.sort_by(by_mean_desc);
}
