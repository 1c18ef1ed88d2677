//! Repository port for task persistence and lookup.

use crate::task::domain::{NewTask, Task, TaskDetails, TaskId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Every operation is a single independent statement against the store; no
/// operation spans a transaction.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task and returns it with its generated identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the store rejects
    /// the insert.
    async fn insert(&self, task: &NewTask) -> TaskRepositoryResult<Task>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns at most `limit` incomplete tasks, newest first.
    ///
    /// Ties on creation time are broken by descending identifier.
    async fn list_incomplete(&self, limit: usize) -> TaskRepositoryResult<Vec<Task>>;

    /// Replaces the title and description of an incomplete task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when no incomplete task has
    /// the identifier, which covers both missing and completed tasks.
    async fn update_details(
        &self,
        id: TaskId,
        details: &TaskDetails,
    ) -> TaskRepositoryResult<Task>;

    /// Flags a task as completed, recording `completed_at` on the first
    /// completion only.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn mark_completed(
        &self,
        id: TaskId,
        completed_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<Task>;

    /// Permanently removes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// No row matched the identifier and state constraint.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    #[must_use]
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
