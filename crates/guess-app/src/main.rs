use std::path::PathBuf;

use anyhow::bail;
use clap::Parser;

use guess_app::knowledge::KnowledgeStore;
use guess_app::logging::init_logging;
use guess_app::prompt::{GameIo, StdIo, is_affirmative};
use guess_app::session::{SessionOptions, run_session};
use guess_core::AppInfo;
use guess_core::model::starter::starter_catalog;

/// Interactive 20-questions guesser that learns as it plays.
#[derive(Debug, Parser)]
#[command(
    name = AppInfo::name(),
    author,
    version = AppInfo::version(),
    about = "Bayesian guessing game that learns from every session"
)]
struct Cli {
    /// Path to the knowledge file (seeded with defaults when missing).
    #[arg(short, long, value_name = "FILE", default_value = "knowledge.json")]
    knowledge: PathBuf,

    /// Maximum number of questions per session.
    #[arg(long, value_name = "COUNT", default_value_t = 20)]
    max_questions: usize,

    /// Posterior probability required before venturing a guess.
    #[arg(long, value_name = "PROB", default_value_t = 0.75)]
    guess_threshold: f64,

    /// Raise log verbosity (repeat for more detail).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.max_questions == 0 {
        bail!("--max-questions must be greater than zero");
    }
    if !(0.0..=1.0).contains(&cli.guess_threshold) {
        bail!("--guess-threshold must be between 0.0 and 1.0");
    }

    let store = KnowledgeStore::new(&cli.knowledge);
    let mut catalog = store.load_or_default(starter_catalog)?;

    let options = SessionOptions {
        max_questions: cli.max_questions,
        guess_threshold: cli.guess_threshold,
        ..SessionOptions::default()
    };

    println!("Welcome! I learn from your answers, so I get smarter every game.");

    let mut io = StdIo;
    loop {
        let outcome = run_session(&mut catalog, &mut io, &options)?;
        tracing::debug!(?outcome, "session finished");

        store.save(&catalog)?;
        println!("Knowledge saved to {}", store.path().display());

        let again = io.ask("\nPlay again? (yes/no): ")?;
        if !(again.is_empty() || is_affirmative(&again)) {
            break;
        }
    }

    println!("Thanks for playing!");
    Ok(())
}
