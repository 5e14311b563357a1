// Presentation of ranked lineups: console tables, a CSV export with a metadata
// header, and a JSON dump of the full per-game record.

use crate::error::Result;
use crate::game_result::LineupResult;
use crate::ingest::Roster;
use crate::optimizer::{OptimizationReport, RankedLineup, Source};
use serde::Serialize;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Run parameters written above the CSV table
#[derive(Debug, Clone, Serialize)]
pub struct RunMetadata {
    pub seed: u64,
    pub total_players: usize,
    pub lineup_size: usize,
    pub num_games: usize,
    pub innings: usize,
}

#[derive(Debug, Serialize)]
struct JsonLineup<'a> {
    rank: usize,
    source: Option<Source>,
    mean_runs: f64,
    std_dev: f64,
    runs_per_game: &'a [u32],
    lineup: Vec<&'a str>,
}

#[derive(Debug, Serialize)]
struct JsonExport<'a> {
    metadata: &'a RunMetadata,
    lineups: Vec<JsonLineup<'a>>,
}

pub fn print_roster(roster: &Roster) {
    println!("Loaded {} players:", roster.len());
    for player in &roster.players {
        println!("  {}", player);
    }
    println!();
}

pub fn print_results(title: &str, results: &[LineupResult], top_n: usize) {
    let shown = top_n.min(results.len());
    println!("\nTop {} {}:", shown, title);
    println!("{}", "=".repeat(80));
    for (i, result) in results.iter().take(shown).enumerate() {
        println!("{:2}. {}", i + 1, result);
    }
}

/// Spread of the top lineup's games, shown after a random-only run
pub fn write_best_details<W: Write>(out: &mut W, best: &LineupResult) -> io::Result<()> {
    writeln!(out, "\nBest Lineup Details:")?;
    writeln!(out, "Mean runs per game: {:.3}", best.mean_runs)?;
    writeln!(out, "Standard deviation: {:.3}", best.std_dev)?;
    writeln!(out, "Games simulated: {}", best.total_games())?;
    writeln!(out, "Total runs in all games: {}", best.total_runs())?;
    writeln!(out, "Run distribution: Min={}, Max={}", best.min_runs(), best.max_runs())
}

pub fn print_best_details(best: &LineupResult) {
    let stdout = io::stdout();
    let _ = write_best_details(&mut stdout.lock(), best);
}

pub fn print_ranked(results: &[RankedLineup], top_n: usize) {
    let shown = top_n.min(results.len());
    println!("\nTop {} Final Results (Combined Random + GA):", shown);
    println!("{}", "=".repeat(80));
    for (i, ranked) in results.iter().take(shown).enumerate() {
        println!("{:2}. [{:6}] {}", i + 1, ranked.source.label(), ranked.result);
    }
}

pub fn print_summary(report: &OptimizationReport) {
    println!("\n{}", "=".repeat(80));
    println!("OPTIMIZATION COMPLETE - FINAL SUMMARY");
    println!("{}", "=".repeat(80));

    let timing = &report.timing;
    println!("Total Time: {:.1} seconds", timing.total.as_secs_f64());
    println!("  Random Phase: {:.1}s", timing.random_phase.as_secs_f64());
    if let Some(genetic) = timing.genetic_phase {
        println!("  Genetic Phase: {:.1}s", genetic.as_secs_f64());
    }
    println!();

    if let (Some(random_best), Some(ga_best)) = (report.random_results.first(), report.ga_results.first()) {
        println!("Performance Comparison:");
        println!("Best Random:  {:.3} ± {:.3} runs/game", random_best.mean_runs, random_best.std_dev);
        println!("Best Genetic: {:.3} ± {:.3} runs/game", ga_best.mean_runs, ga_best.std_dev);
        if let Some((delta, pct)) = report.improvement() {
            println!("Improvement:  {:+.3} runs/game ({:+.1}%)", delta, pct);
        }
    }

    if let Some(best) = report.best() {
        println!("\nOPTIMAL LINEUP:");
        for (i, name) in best.result.lineup.names().iter().enumerate() {
            println!("{:2}. {}", i + 1, name);
        }
        let found_by = match best.source {
            Source::Genetic => "Genetic Algorithm",
            Source::Random => "Random Search",
        };
        println!("Best lineup found by: {}", found_by);
    }

    println!("\nReproducibility:");
    println!("Random seed used: {}", report.seed);
    println!("Use --seed {} to reproduce these exact results", report.seed);
}

/// Write the top `num_to_save` results as CSV, preceded by `#` metadata rows.
/// Returns the number of lineup rows written.
pub fn write_csv<W: io::Write>(
    writer: W,
    results: &[LineupResult],
    num_to_save: usize,
    metadata: &RunMetadata,
) -> Result<usize> {
    let to_save = &results[..num_to_save.min(results.len())];
    let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(writer);

    wtr.write_record(["# Lineup Optimization Results"])?;
    wtr.write_record([format!(
        "# Generated: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    )])?;
    wtr.write_record([format!("# Random Seed: {}", metadata.seed)])?;
    wtr.write_record([format!("# Total Players: {}", metadata.total_players)])?;
    wtr.write_record([format!("# Lineup Size: {}", metadata.lineup_size)])?;
    wtr.write_record([format!("# Games Per Evaluation: {}", metadata.num_games)])?;
    wtr.write_record([format!("# Innings Per Game: {}", metadata.innings)])?;
    wtr.write_record([""])?;

    let lineup_size = to_save.first().map_or(metadata.lineup_size, |r| r.lineup.len());
    let mut headers: Vec<String> = ["Rank", "Mean_Runs", "Std_Dev", "Total_Games", "Min_Runs", "Max_Runs"]
        .iter()
        .map(|h| h.to_string())
        .collect();
    headers.extend((1..=lineup_size).map(|i| format!("Pos_{}", i)));
    wtr.write_record(&headers)?;

    for (rank, result) in to_save.iter().enumerate() {
        let mut row = vec![
            (rank + 1).to_string(),
            format!("{:.3}", result.mean_runs),
            format!("{:.3}", result.std_dev),
            result.total_games().to_string(),
            result.min_runs().to_string(),
            result.max_runs().to_string(),
        ];
        row.extend(result.lineup.names().iter().map(|n| n.to_string()));
        wtr.write_record(&row)?;
    }
    wtr.flush()?;

    Ok(to_save.len())
}

pub fn save_csv<P: AsRef<Path>>(
    path: P,
    results: &[LineupResult],
    num_to_save: usize,
    metadata: &RunMetadata,
) -> Result<usize> {
    let file = File::create(path)?;
    write_csv(file, results, num_to_save, metadata)
}

/// JSON dump of ranked lineups. `sources` may be empty when the origin is not tracked.
pub fn write_json<W: Write>(
    writer: W,
    results: &[LineupResult],
    sources: &[Source],
    metadata: &RunMetadata,
) -> Result<()> {
    let lineups = results
        .iter()
        .enumerate()
        .map(|(i, r)| JsonLineup {
            rank: i + 1,
            source: sources.get(i).copied(),
            mean_runs: r.mean_runs,
            std_dev: r.std_dev,
            runs_per_game: &r.runs_per_game,
            lineup: r.lineup.names(),
        })
        .collect();
    let export = JsonExport { metadata, lineups };
    serde_json::to_writer_pretty(writer, &export)?;
    Ok(())
}

pub fn save_json<P: AsRef<Path>>(
    path: P,
    results: &[LineupResult],
    sources: &[Source],
    metadata: &RunMetadata,
) -> Result<()> {
    let file = File::create(path)?;
    write_json(io::BufWriter::new(file), results, sources, metadata)
}
