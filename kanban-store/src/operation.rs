//! Operation traits for state transitions.
//!
//! Operations are structs where the fields ARE the parameters. Each one names
//! itself with a verb/noun pair (for logs) and applies itself to a
//! [`KanbanState`].

use crate::error::Result;
use crate::types::KanbanState;

/// Metadata every operation carries
pub trait Operation {
    /// The action, e.g. "add", "move"
    fn verb(&self) -> &'static str;

    /// The entity acted upon, e.g. "task", "column"
    fn noun(&self) -> &'static str;

    /// Canonical op string (e.g., "add task", "move column")
    fn op_string(&self) -> String {
        format!("{} {}", self.verb(), self.noun())
    }
}

/// A state transition.
///
/// `apply` must check every reference it needs before touching `state`, so an
/// `Err` or `Unchanged` result leaves `state` exactly as it was.
pub trait Mutate: Operation {
    type Output;

    fn apply(&self, state: &mut KanbanState) -> Result<Applied<Self::Output>>;
}

/// Outcome of applying a mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied<T> {
    /// State changed; persist and notify
    Changed(T),
    /// Nothing to do (stale reference or no-op move)
    Unchanged(T),
}

impl<T> Applied<T> {
    pub fn is_changed(&self) -> bool {
        matches!(self, Self::Changed(_))
    }

    /// Extract the value
    pub fn into_inner(self) -> T {
        match self {
            Self::Changed(value) | Self::Unchanged(value) => value,
        }
    }
}
