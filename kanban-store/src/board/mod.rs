//! Board commands

mod add;
mod delete;
mod set_active;
mod update;

pub use add::AddBoard;
pub use delete::DeleteBoard;
pub use set_active::SetActiveBoard;
pub use update::UpdateBoard;
