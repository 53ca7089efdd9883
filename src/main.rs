use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use slackbox::cli::{ack, compact, link, list, show, sync};
use slackbox::config::Config;
use slackbox::source::SnapshotSource;
use slackbox::store::ConversationStore;

#[derive(Parser)]
#[command(name = "slackbox")]
#[command(about = "Track unread conversations and acknowledge them up to a message")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "slackbox.yaml")]
    config: String,

    /// Database path (overrides config)
    #[arg(long)]
    db: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Pull conversations from the snapshot source and show the first page of unread
    Sync {
        /// Snapshot file (overrides config)
        #[arg(short, long)]
        snapshot: Option<PathBuf>,

        /// Conversations per page (defaults to config)
        #[arg(long)]
        page_size: Option<usize>,
    },

    /// List unread conversations
    List {
        /// Page number, starting at 1
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Conversations per page (defaults to config)
        #[arg(long)]
        page_size: Option<usize>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a conversation and its acknowledgements
    Show {
        /// Conversation ID
        id: String,
    },

    /// Mark a conversation as read through a message
    Ack {
        /// Conversation ID
        id: String,

        /// Message timestamp (defaults to the latest message)
        #[arg(long)]
        ts: Option<String>,
    },

    /// Remove an acknowledgement
    Unack {
        /// Conversation ID
        id: String,

        /// Exact timestamp that was acknowledged
        ts: String,
    },

    /// Print a permalink to where reading should resume
    Link {
        /// Conversation ID
        id: String,
    },

    /// Drop acknowledgements superseded by a later one
    Compact,
}

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config; defaults apply only when no file exists
    let config = Config::load(&cli.config)?;
    init_logging(&config);

    // Open store; runs the schema version check
    let db_path = cli.db.clone().unwrap_or_else(|| config.database_path());
    let store = ConversationStore::open(&db_path)
        .with_context(|| format!("Failed to open database at {}", db_path.display()))?;

    match cli.command {
        Commands::Sync {
            snapshot,
            page_size,
        } => {
            let path = snapshot
                .or_else(|| config.snapshot_path())
                .context("No snapshot path given; pass --snapshot or set source.snapshot_path")?;
            let page_size = page_size.unwrap_or(config.display.page_size);
            sync::run(&store, &SnapshotSource::new(path), page_size)?;
        }
        Commands::List {
            page,
            page_size,
            json,
        } => {
            let page_size = page_size.unwrap_or(config.display.page_size);
            list::run(&store, page.saturating_sub(1), page_size, json)?;
        }
        Commands::Show { id } => {
            show::run(&store, &id)?;
        }
        Commands::Ack { id, ts } => {
            ack::ack(&store, id, ts)?;
        }
        Commands::Unack { id, ts } => {
            ack::unack(&store, id, ts)?;
        }
        Commands::Link { id } => {
            link::run(&store, &config, &id)?;
        }
        Commands::Compact => {
            compact::run(&store)?;
        }
    }

    store.close()?;
    Ok(())
}
