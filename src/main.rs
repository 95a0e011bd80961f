//! # Ticket Sense CLI (`tsense`)
//!
//! Runs the relevance engine over ad-hoc text or over a JSON snapshot of
//! tickets and knowledge-base articles exported by the support dashboard.
//!
//! ## Usage
//!
//! ```bash
//! tsense --config ./config/tsense.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `tsense keywords "<text>"` | Extract salient keywords |
//! | `tsense similarity "<a>" "<b>"` | Jaccard similarity of two texts |
//! | `tsense classify --subject ..` | Assign a category id |
//! | `tsense summarize "<text>"` | One-line summary |
//! | `tsense suggest <ticket-id>` | Rank KB articles for a ticket |
//! | `tsense similar <ticket-id>` | Related tickets |
//! | `tsense clusters` | Topic clusters over all tickets |
//! | `tsense duplicates` | Near-identical tickets |
//! | `tsense draft <ticket-id>` | Draft a reply |
//! | `tsense completions <shell>` | Print a shell completion script |
//!
//! Diagnostics go to stderr and are controlled by `RUST_LOG`
//! (e.g. `RUST_LOG=ticket_sense=debug`).

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use ticket_sense::commands;
use ticket_sense::config;

/// Ticket Sense CLI: an explainable relevance and classification engine
/// for support tickets.
///
/// Commands that work on tickets read a JSON snapshot
/// (`{"tickets": [...], "articles": [...]}`) from `[data].path` or `--data`.
#[derive(Parser)]
#[command(
    name = "tsense",
    about = "Ticket Sense: keyword, similarity, classification and KB-suggestion engine for support tickets",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/tsense.toml`. If the file does not exist the
    /// built-in defaults are used.
    #[arg(long, global = true, default_value = "./config/tsense.toml")]
    config: PathBuf,

    /// Path to the JSON snapshot, overriding `[data].path`.
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Print results as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Extract the most salient keywords from text.
    Keywords {
        /// Free text to analyze.
        text: String,
    },

    /// Compute the Jaccard similarity of two texts.
    Similarity { a: String, b: String },

    /// Classify a ticket into a category.
    ///
    /// The first rule in the classifier table with a keyword found in
    /// the subject or description wins.
    Classify {
        #[arg(long)]
        subject: String,
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Summarize a ticket description in one line.
    Summarize {
        /// Description text.
        text: String,
    },

    /// Rank published KB articles for a ticket.
    Suggest {
        /// Ticket id in the snapshot.
        ticket_id: String,

        /// Maximum number of suggestions.
        #[arg(long)]
        limit: Option<usize>,

        /// Show the score breakdown of each suggestion.
        #[arg(long)]
        explain: bool,
    },

    /// List tickets similar to the given ticket.
    Similar {
        /// Ticket id in the snapshot.
        ticket_id: String,
    },

    /// Group all snapshot tickets into topic clusters.
    Clusters,

    /// Find near-identical tickets.
    Duplicates,

    /// Draft a reply to a ticket, quoting the best matching article.
    Draft {
        /// Ticket id in the snapshot.
        ticket_id: String,
    },

    /// Print a shell completion script to stdout.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Commands that don't require config
    if let Commands::Completions { shell } = cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "tsense", &mut std::io::stdout());
        return Ok(());
    }

    let cfg = config::load_config_or_default(&cli.config)?;
    let json = cli.json;

    match cli.command {
        Commands::Keywords { text } => commands::run_keywords(&cfg, &text, json)?,
        Commands::Similarity { a, b } => commands::run_similarity(&a, &b, json)?,
        Commands::Classify {
            subject,
            description,
        } => commands::run_classify(&cfg, &subject, &description, json)?,
        Commands::Summarize { text } => commands::run_summarize(&cfg, &text, json)?,
        Commands::Suggest {
            ticket_id,
            limit,
            explain,
        } => {
            let snapshot = commands::open_snapshot(&cfg, cli.data.as_deref())?;
            commands::run_suggest(&cfg, &snapshot, &ticket_id, limit, explain, json)?;
        }
        Commands::Similar { ticket_id } => {
            let snapshot = commands::open_snapshot(&cfg, cli.data.as_deref())?;
            commands::run_similar(&cfg, &snapshot, &ticket_id, json)?;
        }
        Commands::Clusters => {
            let snapshot = commands::open_snapshot(&cfg, cli.data.as_deref())?;
            commands::run_clusters(&cfg, &snapshot, json)?;
        }
        Commands::Duplicates => {
            let snapshot = commands::open_snapshot(&cfg, cli.data.as_deref())?;
            commands::run_duplicates(&cfg, &snapshot, json)?;
        }
        Commands::Draft { ticket_id } => {
            let snapshot = commands::open_snapshot(&cfg, cli.data.as_deref())?;
            commands::run_draft(&cfg, &snapshot, &ticket_id, json)?;
        }
        Commands::Completions { .. } => {
            // Handled above (before config loading)
            unreachable!()
        }
    }

    Ok(())
}
