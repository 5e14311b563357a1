// Two-phase optimizer: random search finds starting points, the GA refines them.
// One seeded generator drives both phases so a run can be replayed from its seed.

use crate::config::Config;
use crate::evaluator::Evaluator;
use crate::ga::GeneticAlgorithm;
use crate::game_result::{by_mean_desc, LineupResult};
use crate::ingest::Roster;
use crate::random_search::RandomSearch;
use crate::simulator::EmpiricalSampler;
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::time::{Duration, Instant};

/// Which phase produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Source {
    Random,
    Genetic,
}

impl Source {
    pub fn label(&self) -> &'static str {
        match self {
            Source::Random => "Random",
            Source::Genetic => "GA",
        }
    }
}

#[derive(Debug, Clone)]
pub struct RankedLineup {
    pub source: Source,
    pub result: LineupResult,
}

#[derive(Debug, Clone, Default)]
pub struct PhaseTiming {
    pub random_phase: Duration,
    pub genetic_phase: Option<Duration>,
    pub total: Duration,
}

#[derive(Debug, Clone)]
pub struct OptimizationReport {
    pub seed: u64,
    pub random_results: Vec<LineupResult>,
    pub ga_results: Vec<LineupResult>,
    /// Both phases' results, best first
    pub combined: Vec<RankedLineup>,
    pub timing: PhaseTiming,
}

impl OptimizationReport {
    pub fn best(&self) -> Option<&RankedLineup> {
        self.combined.first()
    }

    /// Best GA mean minus best random mean, absolute and as a percentage of the random best
    pub fn improvement(&self) -> Option<(f64, f64)> {
        let random_best = self.random_results.first()?;
        let ga_best = self.ga_results.first()?;
        let delta = ga_best.mean_runs - random_best.mean_runs;
        let pct = if random_best.mean_runs > 0.0 {
            delta / random_best.mean_runs * 100.0
        } else {
            0.0
        };
        Some((delta, pct))
    }

    pub fn combined_results(&self) -> Vec<LineupResult> {
        self.combined.iter().map(|r| r.result.clone()).collect()
    }
}

pub struct MasterOptimizer {
    pub config: Config,
    pub seed: u64,
    rng: StdRng,
}

impl MasterOptimizer {
    /// Expects `config` to have been validated against the roster.
    pub fn new(config: Config) -> Self {
        let seed = match config.search.seed {
            Some(seed) => {
                info!("Random seed set to: {}", seed);
                seed
            }
            None => {
                let seed = rand::thread_rng().gen_range(1..=1_000_000);
                info!("Generated random seed: {}", seed);
                seed
            }
        };
        MasterOptimizer {
            config,
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn evaluator(&self) -> Evaluator {
        Evaluator::new(self.config.simulation.innings).with_parallel(self.config.simulation.parallel)
    }

    /// Phase 1: random search, keeping the best `keep` lineups
    pub fn run_random_phase(&mut self, roster: &Roster, keep: usize, verbose: bool) -> Vec<LineupResult> {
        let sim = &self.config.simulation;
        let search = RandomSearch::new(
            sim.lineup_size,
            self.config.search.num_random,
            sim.num_games,
            self.evaluator(),
        );
        let results = search.run(roster, &mut EmpiricalSampler, &mut self.rng, keep, verbose);

        if let Some(best) = results.first() {
            info!(
                "Random phase: best {:.2} ± {:.2} runs, keeping top {}",
                best.mean_runs,
                best.std_dev,
                results.len()
            );
        }
        results
    }

    /// Phase 2: GA whose first population is the seed lineups padded with random ones
    pub fn run_genetic_phase(&mut self, roster: &Roster, seeds: &[LineupResult], verbose: bool) -> Vec<LineupResult> {
        let mut ga = GeneticAlgorithm::new(
            self.config.ga.clone(),
            self.config.simulation.lineup_size,
            self.config.simulation.num_games,
            self.evaluator(),
        );
        let seed_lineups = seeds.iter().map(|r| r.lineup.clone()).collect();
        ga.seed_population(roster, seed_lineups, &mut self.rng);
        ga.run(roster, &mut self.rng, verbose)
    }

    /// Run the whole workflow (or only phase 1 when `search.random_only` is set)
    pub fn optimize(&mut self, roster: &Roster, verbose: bool) -> OptimizationReport {
        let total_start = Instant::now();
        let mut timing = PhaseTiming::default();

        let keep = if self.config.search.random_only {
            self.config.output.top_n
        } else {
            self.config.search.seed_size
        };

        let phase_start = Instant::now();
        let random_results = self.run_random_phase(roster, keep, verbose);
        timing.random_phase = phase_start.elapsed();
        info!("Random phase took {:.1}s", timing.random_phase.as_secs_f64());

        let ga_results = if self.config.search.random_only {
            Vec::new()
        } else {
            let phase_start = Instant::now();
            let results = self.run_genetic_phase(roster, &random_results, verbose);
            let elapsed = phase_start.elapsed();
            info!("Genetic phase took {:.1}s", elapsed.as_secs_f64());
            timing.genetic_phase = Some(elapsed);
            results
        };

        let mut combined: Vec<RankedLineup> = random_results
            .iter()
            .map(|r| RankedLineup { source: Source::Random, result: r.clone() })
            .chain(ga_results.iter().map(|r| RankedLineup { source: Source::Genetic, result: r.clone() }))
            .collect();
        combined.sort_by(|a, b| by_mean_desc(&a.result, &b.result));

        timing.total = total_start.elapsed();

        OptimizationReport {
            seed: self.seed,
            random_results,
            ga_results,
            combined,
            timing,
        }
    }
}
