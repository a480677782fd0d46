//! Errors reported by the planner

use thiserror::Error;

use crate::task::TaskId;

/// Everything that can go wrong while handling tasks.
///
/// None of these are fatal: the grid always stays in its last fully-recomputed state.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlannerError {
    /// `edit` or `delete` was given an id that is not in the repository
    #[error("No task with id {0}")]
    NotFound(TaskId),

    /// `add` was given an id that is already used (or was used by a since-deleted task)
    #[error("Task id {0} is already in use")]
    DuplicateId(TaskId),

    /// A rendered cell does not carry a readable task id. This means "no task here".
    #[error("Malformed cell content: {0}")]
    MalformedCellContent(String),

    /// The task store could not be read or written
    #[error("Persistence failure: {0}")]
    PersistenceFailure(String),

    /// A candidate task was rejected before reaching the repository
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
