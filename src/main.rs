mod config;
mod error;
mod evaluator;
mod ga;
mod game_result;
mod ingest;
mod lineup;
mod optimizer;
mod random_search;
mod report;
mod simulator;

use anyhow::Context;
use clap::Parser;
use config::Config;
use ingest::Roster;
use log::info;
use optimizer::MasterOptimizer;
use report::RunMetadata;

/// Search for high-scoring batting orders: random search seeds a genetic algorithm
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// CSV file containing player data (Player, AB, 1B, 2B, 3B, HR)
    #[arg(short, long, default_value = "lineup_example.csv")]
    file: String,

    /// YAML configuration file (defaults: lineup.yaml, lineup.yml, .lineup-config.yaml)
    #[arg(short, long)]
    config: Option<String>,

    /// Print a sample configuration file and exit
    #[arg(long)]
    sample_config: bool,

    /// Players per lineup
    #[arg(long)]
    lineup_size: Option<usize>,

    /// Innings per game
    #[arg(short, long)]
    innings: Option<usize>,

    /// Games simulated per lineup evaluation
    #[arg(short = 'n', long)]
    num_games: Option<usize>,

    /// Random lineups evaluated in phase 1
    #[arg(long)]
    num_random: Option<usize>,

    /// Best random lineups used to seed the GA population
    #[arg(long)]
    seed_size: Option<usize>,

    /// Generations to evolve in phase 2
    #[arg(short, long)]
    generations: Option<usize>,

    /// GA population size
    #[arg(short, long)]
    population: Option<usize>,

    /// Probability of a swap mutation per child (0.0-1.0)
    #[arg(short, long)]
    mutation_rate: Option<f64>,

    /// Tournament size for parent selection
    #[arg(short, long)]
    tournament_size: Option<usize>,

    /// Simulate games on all cores
    #[arg(long)]
    parallel: bool,

    /// Number of top lineups to display
    #[arg(long)]
    top_n: Option<usize>,

    /// Run only the random search phase
    #[arg(long)]
    random_only: bool,

    /// CSV file to save top lineups to
    #[arg(long)]
    save_csv: Option<String>,

    /// Skip saving results to CSV
    #[arg(long)]
    no_save: bool,

    /// Number of top lineups to save
    #[arg(long)]
    save_num: Option<usize>,

    /// Also write ranked results as JSON
    #[arg(long)]
    save_json: Option<String>,

    /// Random seed for reproducible results (default: auto-generated)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Reduce output verbosity
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    /// Command-line values win over the configuration file
    fn apply(&self, config: &mut Config) {
        let sim = &mut config.simulation;
        if let Some(v) = self.lineup_size {
            sim.lineup_size = v;
        }
        if let Some(v) = self.innings {
            sim.innings = v;
        }
        if let Some(v) = self.num_games {
            sim.num_games = v;
        }
        sim.parallel |= self.parallel;

        let search = &mut config.search;
        if let Some(v) = self.num_random {
            search.num_random = v;
        }
        if let Some(v) = self.seed_size {
            search.seed_size = v;
        }
        if self.seed.is_some() {
            search.seed = self.seed;
        }
        search.random_only |= self.random_only;

        let ga = &mut config.ga;
        if let Some(v) = self.generations {
            ga.generations = v;
        }
        if let Some(v) = self.population {
            ga.population_size = v;
        }
        if let Some(v) = self.mutation_rate {
            ga.mutation_rate = v;
        }
        if let Some(v) = self.tournament_size {
            ga.tournament_size = v;
        }

        let output = &mut config.output;
        if let Some(v) = self.top_n {
            output.top_n = v;
        }
        if let Some(v) = self.save_num {
            output.save_num = v;
        }
        if self.save_csv.is_some() {
            output.save_csv = self.save_csv.clone();
        }
        if self.no_save {
            output.save_csv = None;
        }
        if self.save_json.is_some() {
            output.save_json = self.save_json.clone();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if cli.sample_config {
        print!("{}", config::generate_sample_config());
        return Ok(());
    }

    let mut config = Config::load_or_default(cli.config.as_deref());
    cli.apply(&mut config);

    let roster = Roster::from_path(&cli.file)
        .with_context(|| format!("Error loading players from '{}'", cli.file))?;
    if !cli.quiet {
        report::print_roster(&roster);
    }

    config.validate(roster.len()).context("Invalid configuration")?;

    let verbose = !cli.quiet;
    let mut optimizer = MasterOptimizer::new(config.clone());
    let run = optimizer.optimize(&roster, verbose);

    let metadata = RunMetadata {
        seed: run.seed,
        total_players: roster.len(),
        lineup_size: config.simulation.lineup_size,
        num_games: config.simulation.num_games,
        innings: config.simulation.innings,
    };

    let ranked = run.combined_results();
    let sources: Vec<_> = run.combined.iter().map(|r| r.source).collect();

    if config.search.random_only {
        report::print_results("Random Search Results", &run.random_results, config.output.top_n);
        if let Some(best) = run.random_results.first() {
            report::print_best_details(best);
        }
    } else {
        report::print_ranked(&run.combined, config.output.top_n);
        if verbose {
            report::print_summary(&run);
        }
    }

    if let Some(path) = &config.output.save_csv {
        let saved = report::save_csv(path, &ranked, config.output.save_num, &metadata)
            .with_context(|| format!("Failed to write {}", path))?;
        info!("Saved top {} lineups to: {}", saved, path);
    }
    if let Some(path) = &config.output.save_json {
        report::save_json(path, &ranked, &sources, &metadata)
            .with_context(|| format!("Failed to write {}", path))?;
        info!("Saved ranked lineups to: {}", path);
    }

    Ok(())
}
