use crate::evaluator::Evaluator;
use crate::game_result::{rank, LineupResult};
use crate::ingest::Roster;
use crate::lineup::Lineup;
use crate::simulator::OutcomeSource;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rand::Rng;

//Baseline search: sample lineups uniformly, score each one, keep the best.
//No learning happens here; it exists to seed the GA and to measure how much the GA adds.

#[derive(Debug, Clone, Copy)]
pub struct RandomSearch {
    pub lineup_size: usize,
    pub num_lineups: usize,
    pub num_games: usize,
    pub evaluator: Evaluator,
}

impl RandomSearch {
    pub fn new(lineup_size: usize, num_lineups: usize, num_games: usize, evaluator: Evaluator) -> Self {
        RandomSearch {
            lineup_size,
            num_lineups,
            num_games,
            evaluator,
        }
    }

    /// Evaluate `num_lineups` random lineups and return the `top_n` best by mean runs
    pub fn run<O, R>(&self, roster: &Roster, source: &mut O, rng: &mut R, top_n: usize, verbose: bool) -> Vec<LineupResult>
    where
        O: OutcomeSource + Clone + Send + Sync,
        R: Rng + ?Sized,
    {
        if verbose {
            info!(
                "Evaluating {} random lineups of {} players, {} games of {} innings each",
                self.num_lineups, self.lineup_size, self.num_games, self.evaluator.innings
            );
        }

        let progress = if verbose {
            let bar = ProgressBar::new(self.num_lineups as u64);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("{bar:40} {pos}/{len} lineups evaluated")
                    .progress_chars("##-"),
            );
            bar
        } else {
            ProgressBar::hidden()
        };

        let mut results: Vec<LineupResult> = Vec::with_capacity(self.num_lineups);
        for _ in 0..self.num_lineups {
            let lineup = Lineup::random(roster, self.lineup_size, rng);
            results.push(self.evaluator.evaluate(&lineup, self.num_games, source, rng));
            progress.inc(1);
        }
        progress.finish_and_clear();

        rank(&mut results);
        results.truncate(top_n);
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lineup::tests::test_roster;
    use crate::simulator::EmpiricalSampler;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_returns_top_n_ranked() {
        let roster = test_roster(12);
        let search = RandomSearch::new(9, 30, 5, Evaluator::new(6));
        let mut rng = StdRng::seed_from_u64(6);
        let results = search.run(&roster, &mut EmpiricalSampler, &mut rng, 10, false);
        assert_eq!(results.len(), 10);
        assert!(results.windows(2).all(|w| w[0].mean_runs >= w[1].mean_runs));
        assert!(results.iter().all(|r| r.lineup.is_valid_for(&roster, 9)));
        assert!(results.iter().all(|r| r.total_games() == 5));
    }

    #[test]
    fn test_top_n_larger_than_sample() {
        let roster = test_roster(4);
        let search = RandomSearch::new(3, 5, 2, Evaluator::new(3));
        let mut rng = StdRng::seed_from_u64(6);
        let results = search.run(&roster, &mut EmpiricalSampler, &mut rng, 50, false);
        assert_eq!(results.len(), 5);
    }
}
