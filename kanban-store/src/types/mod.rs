//! Core types for the kanban store

mod board;
mod ids;
mod state;
mod task;

// Re-export all types
pub use board::{Board, Column, DEFAULT_COLUMN_TITLES};
pub use ids::{BoardId, ColumnId, TaskId};
pub use state::KanbanState;
pub use task::{Priority, Task, TaskPatch};
