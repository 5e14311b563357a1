use crate::game_result::LineupResult;
use crate::lineup::Lineup;
use crate::simulator::{simulate_game, OutcomeSource};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

//The evaluator is the fitness function shared by random search and the GA.
//It is noisy on purpose: the same lineup scores differently on every call, and the
//noise only shrinks as the number of games grows. Callers pick a small game count
//while searching and a larger one for the final confirmation pass.

#[derive(Debug, Clone, Copy)]
pub struct Evaluator {
    pub innings: usize,
    /// Simulate games on the rayon pool instead of the caller's thread
    pub parallel: bool,
}

impl Evaluator {
    pub fn new(innings: usize) -> Self {
        Evaluator {
            innings,
            parallel: false,
        }
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn evaluate<O, R>(&self, lineup: &Lineup, num_games: usize, source: &mut O, rng: &mut R) -> LineupResult
    where
        O: OutcomeSource + Clone + Send + Sync,
        R: Rng + ?Sized,
    {
        if self.parallel {
            evaluate_lineup_par(lineup, num_games, self.innings, source, rng)
        } else {
            evaluate_lineup(lineup, num_games, self.innings, source, rng)
        }
    }
}

/// Simulate `num_games` independent games on the caller's generator, in order.
pub fn evaluate_lineup<O, R>(
    lineup: &Lineup,
    num_games: usize,
    innings: usize,
    source: &mut O,
    rng: &mut R,
) -> LineupResult
where
    O: OutcomeSource + ?Sized,
    R: Rng + ?Sized,
{
    let runs_per_game: Vec<u32> = (0..num_games)
        .map(|_| simulate_game(lineup, innings, source, rng).total_runs)
        .collect();
    LineupResult::new(lineup.clone(), runs_per_game)
}

/// Parallel variant. One seed per game is drawn up front from `rng`, so the
/// result depends only on the incoming generator state and not on thread scheduling.
/// Each game gets its own clone of `source`.
pub fn evaluate_lineup_par<O, R>(
    lineup: &Lineup,
    num_games: usize,
    innings: usize,
    source: &O,
    rng: &mut R,
) -> LineupResult
where
    O: OutcomeSource + Clone + Send + Sync,
    R: Rng + ?Sized,
{
    let seeds: Vec<u64> = (0..num_games).map(|_| rng.gen()).collect();
    let min_len = (num_games / num_cpus::get()).max(1);

    let runs_per_game: Vec<u32> = seeds
        .par_iter()
        .with_min_len(min_len)
        .map(|&seed| {
            let mut game_rng = StdRng::seed_from_u64(seed);
            let mut game_source = source.clone();
            simulate_game(lineup, innings, &mut game_source, &mut game_rng).total_runs
        })
        .collect();

    LineupResult::new(lineup.clone(), runs_per_game)
}
