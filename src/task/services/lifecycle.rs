//! Service layer for the five task operations.

use crate::task::{
    domain::{NewTask, Task, TaskDetails, TaskDomainError, TaskId, TaskTitle},
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Number of tasks returned by [`TaskService::list_recent`].
///
/// A fixed business rule, not a pagination setting.
pub const RECENT_TASK_LIMIT: usize = 5;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: Option<String>,
}

impl CreateTaskRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Request payload for editing an incomplete task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditTaskRequest {
    id: TaskId,
    title: String,
    description: Option<String>,
}

impl EditTaskRequest {
    /// Creates a request replacing the title of task `id`.
    ///
    /// Without [`EditTaskRequest::with_description`] the description is
    /// cleared.
    #[must_use]
    pub fn new(id: TaskId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
        }
    }

    /// Sets the replacement description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Input validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// No task has the identifier.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// No incomplete task has the identifier; it is missing or completed.
    #[error("task {0} not found or already completed")]
    NotEditable(TaskId),

    /// The store failed.
    #[error(transparent)]
    Repository(TaskRepositoryError),
}

impl From<TaskRepositoryError> for TaskServiceError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(id) => Self::NotFound(id),
            other @ TaskRepositoryError::Persistence(_) => Self::Repository(other),
        }
    }
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task orchestration service.
///
/// Holds an injected repository and clock; the HTTP layer shares one
/// instance across all requests.
pub struct TaskService<R, C>
where
    R: TaskRepository + ?Sized,
    C: Clock + Send + Sync + ?Sized,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> Clone for TaskService<R, C>
where
    R: TaskRepository + ?Sized,
    C: Clock + Send + Sync + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, C> TaskService<R, C>
where
    R: TaskRepository + ?Sized,
    C: Clock + Send + Sync + ?Sized,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Returns up to [`RECENT_TASK_LIMIT`] incomplete tasks, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the store fails.
    pub async fn list_recent(&self) -> TaskServiceResult<Vec<Task>> {
        Ok(self.repository.list_incomplete(RECENT_TASK_LIMIT).await?)
    }

    /// Creates an incomplete task stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] when the title or description is
    /// rejected, and [`TaskServiceError::Repository`] when the store fails.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskServiceResult<Task> {
        let details = TaskDetails::new(TaskTitle::new(request.title)?)
            .with_checked_description(request.description)?;
        let new_task = NewTask::new(details, self.clock.utc());
        let task = self.repository.insert(&new_task).await?;
        debug!(task_id = %task.id(), "task created");
        Ok(task)
    }

    /// Replaces the title and description of an incomplete task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] for an invalid title or description,
    /// [`TaskServiceError::NotEditable`] when no incomplete task matches, and
    /// [`TaskServiceError::Repository`] when the store fails.
    pub async fn edit(&self, request: EditTaskRequest) -> TaskServiceResult<Task> {
        let details = TaskDetails::new(TaskTitle::new(request.title)?)
            .with_checked_description(request.description)?;
        let task = self
            .repository
            .update_details(request.id, &details)
            .await
            .map_err(|err| match err {
                TaskRepositoryError::NotFound(id) => TaskServiceError::NotEditable(id),
                other @ TaskRepositoryError::Persistence(_) => TaskServiceError::Repository(other),
            })?;
        debug!(task_id = %task.id(), "task edited");
        Ok(task)
    }

    /// Marks a task completed.
    ///
    /// Completing a task twice succeeds and keeps the first completion time.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the task does not exist and
    /// [`TaskServiceError::Repository`] when the store fails.
    pub async fn complete(&self, id: TaskId) -> TaskServiceResult<Task> {
        let task = self.repository.mark_completed(id, self.clock.utc()).await?;
        debug!(task_id = %id, "task completed");
        Ok(task)
    }

    /// Permanently deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the task does not exist and
    /// [`TaskServiceError::Repository`] when the store fails.
    pub async fn delete(&self, id: TaskId) -> TaskServiceResult<()> {
        self.repository.delete(id).await?;
        debug!(task_id = %id, "task deleted");
        Ok(())
    }

    /// Retrieves a task regardless of its completion state.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the store fails.
    pub async fn find_by_id(&self, id: TaskId) -> TaskServiceResult<Option<Task>> {
        Ok(self.repository.find_by_id(id).await?)
    }
}
