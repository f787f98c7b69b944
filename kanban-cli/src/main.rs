//! Kanban CLI - drive the kanban store from the command line.
//!
//! Commands:
//! - `kanban show [board] [--json]`: Show a board with its columns and tasks
//! - `kanban export`: Print the saved state as JSON
//! - `kanban board add|use|rename|delete`: Manage boards
//! - `kanban column add|rename|move|delete`: Manage columns
//! - `kanban task add|update|move|delete`: Manage tasks
//!
//! Exit codes:
//! - 0: Success
//! - 1: Error
//! - 2: Unknown board, column or task

mod cli;
mod commands;
mod error;
mod table;

use clap::Parser;
use kanban_store::{KanbanConfig, KanbanStore, StoreEvent};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use error::CliError;

async fn execute(cli: Cli) -> Result<(), CliError> {
    let config = KanbanConfig::load(&cli.dir)?;
    let store = KanbanStore::from_config(&config, &cli.dir);

    let _failures = store.subscribe(|event| {
        if let StoreEvent::PersistenceFailed { message } = event {
            eprintln!("Warning: {}", message);
        }
    });
    store.hydrate().await;
    debug!(dir = %cli.dir.display(), "store ready");

    let mut stdout = std::io::stdout().lock();
    commands::run(&store, cli.command, &mut stdout).await
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing with appropriate level
    let filter = if cli.debug {
        EnvFilter::new("kanban_store=debug,kanban=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = match execute(cli).await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    };

    std::process::exit(exit_code);
}
