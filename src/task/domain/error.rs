//! Error types for task domain validation and parsing.

use super::TaskId;
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is missing or empty after trimming.
    #[error("Title is required")]
    EmptyTitle,

    /// The task title exceeds the persisted column width.
    #[error("Title must be at most {max} characters, got {actual}")]
    TitleTooLong {
        /// Maximum accepted character count.
        max: usize,
        /// Character count of the rejected title.
        actual: usize,
    },

    /// A text field contains a NUL character, which text columns cannot hold.
    #[error("{field} must not contain NUL characters")]
    NulCharacter {
        /// Display name of the rejected field.
        field: &'static str,
    },

    /// The task identifier is not a positive integer.
    #[error("invalid task identifier '{0}', expected a positive integer")]
    InvalidTaskId(String),

    /// The task has been completed and is frozen against edits.
    #[error("task {0} is already completed")]
    TaskCompleted(TaskId),
}
