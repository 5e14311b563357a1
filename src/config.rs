// Configuration module for the lineup optimizer
// Supports YAML configuration files for search, GA parameters, simulation and output settings

use crate::error::{LineupError, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub ga: GaSettings,
    #[serde(default)]
    pub simulation: SimulationSettings,
    #[serde(default)]
    pub output: OutputSettings,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            return Err(LineupError::Configuration(format!(
                "Config file not found: {}",
                path
            )));
        }

        let content = fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Load configuration from file if it exists, otherwise use defaults
    pub fn load_or_default(path: Option<&str>) -> Self {
        match path {
            Some(p) => Self::from_file(p).unwrap_or_else(|e| {
                warn!("{}", e);
                warn!("Using default configuration.");
                Self::default()
            }),
            None => {
                // Try default locations
                for default_path in &["lineup.yaml", "lineup.yml", ".lineup-config.yaml"] {
                    if Path::new(default_path).exists() {
                        if let Ok(config) = Self::from_file(default_path) {
                            log::info!("Loaded configuration from {}", default_path);
                            return config;
                        }
                    }
                }
                Self::default()
            }
        }
    }

    /// Save configuration to a YAML file
    pub fn save_to_file(&self, path: &str) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml)?;
        Ok(())
    }

    /// Clamp sizes that can be clamped and reject the rest, against a roster of `roster_len` players.
    pub fn validate(&mut self, roster_len: usize) -> Result<()> {
        if roster_len < 2 {
            return Err(LineupError::Configuration(format!(
                "need at least 2 players to search batting orders, roster has {}",
                roster_len
            )));
        }
        if self.simulation.lineup_size == 0 {
            return Err(LineupError::Configuration("lineup_size must be at least 1".to_string()));
        }
        if self.simulation.lineup_size > roster_len {
            warn!(
                "Lineup size ({}) is larger than available players ({}), using all {} players",
                self.simulation.lineup_size, roster_len, roster_len
            );
            self.simulation.lineup_size = roster_len;
        }
        if self.simulation.innings == 0 || self.simulation.num_games == 0 {
            return Err(LineupError::Configuration(
                "innings and num_games must both be at least 1".to_string(),
            ));
        }
        if self.ga.population_size < 2 {
            return Err(LineupError::Configuration(
                "population_size must be at least 2".to_string(),
            ));
        }
        if self.ga.tournament_size < 1 || self.ga.tournament_size >= self.ga.population_size {
            return Err(LineupError::Configuration(format!(
                "tournament_size ({}) must be in [1, population_size = {})",
                self.ga.tournament_size, self.ga.population_size
            )));
        }
        if !(0.0..=1.0).contains(&self.ga.mutation_rate) {
            return Err(LineupError::Configuration(format!(
                "mutation_rate ({}) must be within [0, 1]",
                self.ga.mutation_rate
            )));
        }
        if self.ga.final_games_multiplier == 0 {
            return Err(LineupError::Configuration(
                "final_games_multiplier must be at least 1".to_string(),
            ));
        }
        if self.search.seed_size > self.ga.population_size {
            warn!(
                "Seed size ({}) > population size ({}), clamping",
                self.search.seed_size, self.ga.population_size
            );
            self.search.seed_size = self.ga.population_size;
        }
        Ok(())
    }
}

/// Random search phase settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSettings {
    /// Number of random lineups evaluated in the first phase
    #[serde(default = "default_num_random")]
    pub num_random: usize,

    /// Number of best random lineups used to seed the GA population
    #[serde(default = "default_seed_size")]
    pub seed_size: usize,

    /// Skip the genetic phase entirely
    #[serde(default)]
    pub random_only: bool,

    /// Seed for the run's random generator; drawn from entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        SearchSettings {
            num_random: default_num_random(),
            seed_size: default_seed_size(),
            random_only: false,
            seed: None,
        }
    }
}

fn default_num_random() -> usize { 200 }
fn default_seed_size() -> usize { 20 }

/// Genetic Algorithm settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaSettings {
    /// Number of lineups in the population
    #[serde(default = "default_population_size")]
    pub population_size: usize,

    /// Number of generations to evolve
    #[serde(default = "default_generations")]
    pub generations: usize,

    /// Probability that a child gets two batting positions swapped (0.0 - 1.0)
    #[serde(default = "default_mutation_rate")]
    pub mutation_rate: f64,

    /// Number of lineups drawn per tournament selection
    #[serde(default = "default_tournament_size")]
    pub tournament_size: usize,

    /// Final evaluation uses this many times the per-generation game count
    #[serde(default = "default_final_games_multiplier")]
    pub final_games_multiplier: usize,
}

impl Default for GaSettings {
    fn default() -> Self {
        GaSettings {
            population_size: default_population_size(),
            generations: default_generations(),
            mutation_rate: default_mutation_rate(),
            tournament_size: default_tournament_size(),
            final_games_multiplier: default_final_games_multiplier(),
        }
    }
}

fn default_population_size() -> usize { 50 }
fn default_generations() -> usize { 50 }
fn default_mutation_rate() -> f64 { 0.1 }
fn default_tournament_size() -> usize { 3 }
fn default_final_games_multiplier() -> usize { 2 }

/// Game simulation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationSettings {
    /// Players per batting order
    #[serde(default = "default_lineup_size")]
    pub lineup_size: usize,

    /// Innings per simulated game
    #[serde(default = "default_innings")]
    pub innings: usize,

    /// Games simulated per lineup evaluation
    #[serde(default = "default_num_games")]
    pub num_games: usize,

    /// Simulate games in parallel (deterministic per seed, but a different stream than sequential)
    #[serde(default)]
    pub parallel: bool,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        SimulationSettings {
            lineup_size: default_lineup_size(),
            innings: default_innings(),
            num_games: default_num_games(),
            parallel: false,
        }
    }
}

fn default_lineup_size() -> usize { 9 }
fn default_innings() -> usize { 6 }
fn default_num_games() -> usize { 15 }

/// Reporting settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Number of top lineups printed to the console
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Number of top lineups written to the CSV file
    #[serde(default = "default_save_num")]
    pub save_num: usize,

    /// CSV output path; `None` disables saving
    #[serde(default = "default_save_csv")]
    pub save_csv: Option<String>,

    /// Optional JSON dump of the ranked results
    #[serde(default)]
    pub save_json: Option<String>,
}

impl Default for OutputSettings {
    fn default() -> Self {
        OutputSettings {
            top_n: default_top_n(),
            save_num: default_save_num(),
            save_csv: default_save_csv(),
            save_json: None,
        }
    }
}

fn default_top_n() -> usize { 10 }
fn default_save_num() -> usize { 25 }
fn default_save_csv() -> Option<String> { Some("lineups_optimized.csv".to_string()) }

/// Generate a sample configuration file
pub fn generate_sample_config() -> String {
    r#"# Lineup Optimizer Configuration
# All values shown are defaults - uncomment and modify as needed

# Random search phase
search:
  # Random lineups evaluated before the genetic phase
  num_random: 200
  # Best random lineups carried into the GA population
  seed_size: 20
  # Stop after the random phase
  random_only: false
  # Fixed seed for reproducible runs (omit to draw one)
  # seed: 12345

# Genetic Algorithm settings
ga:
  # Population size (number of lineups evolved simultaneously)
  population_size: 50
  # Number of generations to evolve
  generations: 50
  # Probability of swapping two batting positions in a child
  mutation_rate: 0.1
  # Tournament selection size (must be smaller than population_size)
  tournament_size: 3
  # Final ranking uses num_games * final_games_multiplier games per lineup
  final_games_multiplier: 2

# Simulation settings
simulation:
  # Players in each batting order
  lineup_size: 9
  # Innings per game
  innings: 6
  # Games simulated per lineup evaluation (higher = less noise but slower)
  num_games: 15
  # Simulate games on all cores
  parallel: false

# Output settings
output:
  top_n: 10
  save_num: 25
  save_csv: lineups_optimized.csv
  # save_json: lineups_optimized.json
"#.to_string()
}
