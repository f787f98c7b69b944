//! CLI definition for the kanban command-line interface.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use kanban_store::Priority;

/// Kanban - a local kanban board.
///
/// State is kept in `<dir>/.kanban/kanban-storage.json` and read back on
/// every run. Boards, columns and tasks may be referred to by ID; boards
/// and columns also by title.
#[derive(Parser, Debug)]
#[command(name = "kanban")]
#[command(version)]
#[command(about = "Manage a local kanban board")]
#[command(
    long_about = "Manage boards, columns and tasks stored in a local kanban directory.\n\n\
    Configuration is read from kanban.toml, kanban.yaml or kanban.json in --dir, \
    then from KANBAN_* environment variables.\n\n\
    Environment variables:\n  \
    KANBAN_STORAGE_DIR            Directory holding the saved state\n  \
    KANBAN_STORAGE_KEY            Name of the saved state blob\n  \
    KANBAN_DEFAULT_BOARD__TITLE   Title of the board created on first run"
)]
pub struct Cli {
    /// Enable debug output to stderr
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Directory holding configuration and storage
    #[arg(long, global = true, default_value = ".", value_name = "DIR")]
    pub dir: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show a board with its columns and tasks
    Show {
        /// Board ID or title (defaults to the active board)
        board: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the whole saved state as JSON
    Export,

    /// Manage boards
    Board {
        #[command(subcommand)]
        action: BoardAction,
    },

    /// Manage columns
    Column {
        #[command(subcommand)]
        action: ColumnAction,
    },

    /// Manage tasks
    Task {
        #[command(subcommand)]
        action: TaskAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum BoardAction {
    /// Create a board
    Add {
        title: String,
        /// Initial column titles (defaults to To Do, In Progress, Done)
        #[arg(long, value_delimiter = ',')]
        columns: Option<Vec<String>>,
    },
    /// Make a board the active one
    Use {
        /// Board ID or title
        #[arg(required_unless_present = "none")]
        board: Option<String>,
        /// Clear the active board instead
        #[arg(long, conflicts_with = "board")]
        none: bool,
    },
    /// Rename a board
    Rename { board: String, title: String },
    /// Delete a board with its columns and tasks
    Delete { board: String },
}

#[derive(Subcommand, Debug)]
pub enum ColumnAction {
    /// Append a column to a board
    Add {
        title: String,
        /// Board ID or title (defaults to the active board)
        #[arg(long)]
        board: Option<String>,
    },
    /// Rename a column
    Rename { column: String, title: String },
    /// Move a column to a new position within its board
    Move { column: String, index: usize },
    /// Delete a column with its tasks
    Delete { column: String },
}

#[derive(Subcommand, Debug)]
pub enum TaskAction {
    /// Add a task at the top of a column
    Add {
        /// Column ID or title
        column: String,
        title: String,
        #[arg(long)]
        description: Option<String>,
        /// low, medium or high
        #[arg(long)]
        priority: Option<Priority>,
        /// Due date as YYYY-MM-DD (defaults to today)
        #[arg(long)]
        due: Option<NaiveDate>,
    },
    /// Change fields of a task
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        priority: Option<Priority>,
        #[arg(long)]
        due: Option<NaiveDate>,
    },
    /// Move a task to a column and position
    Move {
        id: String,
        /// Target column ID or title
        column: String,
        /// Position in the target column
        #[arg(long, default_value_t = 0)]
        index: usize,
    },
    /// Delete a task
    Delete { id: String },
}
