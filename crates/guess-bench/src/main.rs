use std::path::PathBuf;

use clap::Parser;

use guess_bench::config::{ResolvedOutputs, SimulationConfig};
use guess_bench::logging::init_logging;
use guess_bench::report::{render_histogram, write_summary};
use guess_bench::runner::SimulationRunner;

/// Self-play simulation harness for the guessing engine.
#[derive(Debug, Parser)]
#[command(
    name = "guess-bench",
    author,
    version,
    about = "Deterministic guessing-engine simulation harness"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "bench/sim.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the number of sessions to simulate.
    #[arg(long, value_name = "COUNT")]
    sessions: Option<usize>,

    /// Override the RNG seed for oracle sampling.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Exit after validating the configuration (no simulation is run).
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = SimulationConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(sessions) = cli.sessions {
        config.sessions.count = sessions;
    }

    if let Some(seed) = cli.seed {
        config.sessions.seed = Some(seed);
    }

    config.validate()?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let run_id = config.run_id.clone();
    let session_count = config.sessions.count;
    let max_questions = config.sessions.max_questions;

    println!(
        "Loaded configuration '{run_id}' ({session_count} session{}, budget {max_questions} questions)",
        if session_count == 1 { "" } else { "s" }
    );

    let logging_guard = init_logging(&config.logging, &outputs)?;
    let runner = SimulationRunner::new(config, outputs)?;

    if cli.validate_only {
        println!("Validation-only mode: simulation execution skipped.");
        return Ok(());
    }

    let (summary, records) = runner.run()?;
    println!(
        "Simulation complete for '{run_id}': {}/{} correct ({:.1}% accuracy, {:.2} questions on average)",
        summary.correct,
        summary.sessions,
        summary.accuracy * 100.0,
        summary.mean_questions
    );

    let outputs = runner.outputs();
    write_summary(&summary, &records, &outputs.summary_md, &outputs.summary_json)?;
    println!("Summary table: {}", outputs.summary_md.display());
    println!("Summary JSON: {}", outputs.summary_json.display());

    match render_histogram(&records, &outputs.plots_dir) {
        Ok(plot_path) => println!("Question histogram: {}", plot_path.display()),
        Err(error) => eprintln!("Skipping histogram: {error}"),
    }

    if let Some(guard) = logging_guard.as_ref() {
        println!("Telemetry log: {}", guard.telemetry_path.display());
    }

    Ok(())
}
