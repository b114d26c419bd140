mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use playbook::config::PlaybookConfig;

#[derive(Parser)]
#[command(name = "playbook", version, about = "Method Card store and ranking engine for AI agents")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Plant the baseline Method Cards (idempotent)
    Seed,
    /// Keyword-search cards by task intent, plan, and tags
    Search {
        /// Free-text query
        query: String,
        /// Maximum number of cards to return
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show the top-ranked cards (no query)
    Recent {
        /// Maximum number of cards to return
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Add one upvote to a card after a successful reuse
    Upvote {
        /// Card id
        id: String,
    },
    /// Moderate and store a new Method Card
    Add(cli::add::AddArgs),
    /// Report which backend is live and how many cards each holds
    Doctor,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config (for log level)
    let config = PlaybookConfig::load()?;

    // Initialize tracing with the configured log level.
    // Log to stderr so stdout stays clean for card output.
    let filter =
        EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Seed => cli::seed::seed(&config),
        Command::Search { query, limit } => cli::search::search(&config, &query, limit),
        Command::Recent { limit } => cli::recent::recent(&config, limit),
        Command::Upvote { id } => cli::upvote::upvote(&config, &id),
        Command::Add(args) => cli::add::add(&config, args),
        Command::Doctor => cli::doctor::doctor(&config),
    }
}
