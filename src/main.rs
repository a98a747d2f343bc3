use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use mcp_osint_board::{
    config::{Config, LogFormat},
    seed::seed_demo_board,
    server::{AppState, McpServer},
    storage::SqliteStorage,
    suggestions::{FeedbackMemory, SuggestionEngine},
};

/// MCP server for OSINT investigation boards.
#[derive(Parser, Debug)]
#[command(name = "mcp-osint-board", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Run the MCP server on stdio (default)
    Serve,

    /// Insert the demo investigation board
    Seed,

    /// Print suggestions for one thought as JSON
    Suggest {
        /// Board containing the thought
        #[arg(long)]
        board_id: String,

        /// Thought to analyse
        #[arg(long)]
        thought_id: String,

        /// Suggestion IDs to leave out
        #[arg(long = "ignore")]
        ignored: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    init_logging(&config);

    // Initialize storage
    let storage = match SqliteStorage::new(&config.database).await {
        Ok(s) => {
            info!(path = %config.database.path.display(), "Database initialized");
            s
        }
        Err(e) => {
            error!(error = %e, "Failed to initialize database");
            return Err(e.into());
        }
    };

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config, storage).await,
        Commands::Seed => {
            let inserted = seed_demo_board(&storage).await?;
            println!(
                "{}",
                if inserted {
                    "Demo board seeded"
                } else {
                    "Demo board already present"
                }
            );
            Ok(())
        }
        Commands::Suggest {
            board_id,
            thought_id,
            ignored,
        } => {
            let feedback = ignored
                .into_iter()
                .fold(FeedbackMemory::default(), FeedbackMemory::with_ignored);
            let engine = SuggestionEngine::new(storage);
            let suggestions = engine.generate(&board_id, &thought_id, &feedback).await?;
            println!("{}", serde_json::to_string_pretty(&suggestions)?);
            Ok(())
        }
    }
}

async fn serve(config: Config, storage: SqliteStorage) -> anyhow::Result<()> {
    info!(
        version = env!("CARGO_PKG_VERSION"),
        chat = config.chat_enabled(),
        "MCP OSINT Board Server starting..."
    );

    let state = Arc::new(AppState::new(config, storage)?);
    let server = McpServer::new(state);

    info!("Server ready, waiting for requests on stdin...");

    if let Err(e) = server.run().await {
        error!(error = %e, "Server error");
        return Err(e.into());
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Initialize tracing/logging
fn init_logging(config: &Config) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}
