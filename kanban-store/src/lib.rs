//! Normalized kanban state store
//!
//! Boards, columns and tasks live in flat maps keyed by ID. Boards order
//! their columns and columns order their tasks through ID sequences, so a
//! task's position is exactly its index in one column's sequence.
//!
//! ## Overview
//!
//! - **Normalized** - every entity is stored once; ordering is by ID sequence
//! - **Atomic mutations** - each command applies to a copy and commits whole
//! - **Drag-aware** - [`ReorderController`] turns pointer streams into moves
//! - **Persistent** - the whole state is one JSON blob behind [`persist::BlobStore`]
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use kanban_store::{KanbanConfig, KanbanStore, task::AddTask, types::Priority};
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = KanbanConfig::load(".")?;
//! let store = KanbanStore::from_config(&config, Path::new("."));
//! store.hydrate().await;
//!
//! let column = store.snapshot()?.active_board().unwrap().column_ids[0].clone();
//! let task = store
//!     .execute(&AddTask::new(column, "Implement feature X").with_priority(Priority::High))
//!     .await?
//!     .into_inner();
//!
//! println!("Created task: {}", task);
//! # Ok(())
//! # }
//! ```
//!
//! ## Persisted Layout
//!
//! ```text
//! .kanban/
//! ├── kanban-storage.json   # { tasks, columns, boards, activeBoardId }
//! └── .lock                 # held while saving
//! ```

mod config;
mod error;
mod hydration;
mod listeners;
mod operation;
mod splice;
mod store;
pub mod persist;
pub mod reorder;
pub mod types;

// Command modules
pub mod board;
pub mod column;
pub mod task;

pub use config::{DefaultBoard, KanbanConfig, ENV_PREFIX};
pub use error::{KanbanError, Result};
pub use listeners::Subscription;
pub use operation::{Applied, Mutate, Operation};
pub use reorder::{DragItem, DropEvent, HoverEvent, MoveIntent, ReorderController, Span};
pub use store::{KanbanStore, StoreEvent};

// Re-export commonly used types
pub use types::{
    Board, BoardId, Column, ColumnId, KanbanState, Priority, Task, TaskId, TaskPatch,
};
