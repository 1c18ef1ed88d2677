//! Task aggregate and the values used to create and edit it.

use super::{TaskDomainError, TaskId, TaskTitle};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User-editable task fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDetails {
    title: TaskTitle,
    description: Option<String>,
}

impl TaskDetails {
    /// Creates task details with a validated title and no description.
    #[must_use]
    pub const fn new(title: TaskTitle) -> Self {
        Self {
            title,
            description: None,
        }
    }

    /// Sets the optional description.
    #[must_use]
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    /// Sets a caller-supplied description after checking it can be stored.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NulCharacter`] when the description contains
    /// `'\0'`.
    pub fn with_checked_description(
        self,
        description: Option<String>,
    ) -> Result<Self, TaskDomainError> {
        if description.as_deref().is_some_and(|text| text.contains('\0')) {
            return Err(TaskDomainError::NulCharacter {
                field: "Description",
            });
        }
        Ok(self.with_description(description))
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// A task that has not been stored yet and therefore has no identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    details: TaskDetails,
    created_at: DateTime<Utc>,
}

impl NewTask {
    /// Creates an unsaved task stamped with its creation time.
    #[must_use]
    pub const fn new(details: TaskDetails, created_at: DateTime<Utc>) -> Self {
        Self {
            details,
            created_at,
        }
    }

    /// Returns the editable fields.
    #[must_use]
    pub const fn details(&self) -> &TaskDetails {
        &self.details
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Assigns the store-generated identifier, producing a persisted task.
    #[must_use]
    pub fn into_task(self, id: TaskId) -> Task {
        let TaskDetails { title, description } = self.details;
        Task {
            id,
            title,
            description,
            is_completed: false,
            created_at: self.created_at,
            completed_at: None,
        }
    }
}

/// Task aggregate root.
///
/// Serializes to the wire shape
/// `{id, title, description, is_completed, created_at, completed_at}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    description: Option<String>,
    is_completed: bool,
    created_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted completion flag.
    pub is_completed: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted completion timestamp, if any.
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            is_completed: data.is_completed,
            created_at: data.created_at,
            completed_at: data.completed_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns whether the task has been completed.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.is_completed
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the completion timestamp, if the task has been completed.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Replaces the title and description.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskCompleted`] if the task is completed;
    /// completed tasks are frozen.
    pub fn apply_details(&mut self, details: TaskDetails) -> Result<(), TaskDomainError> {
        if self.is_completed {
            return Err(TaskDomainError::TaskCompleted(self.id));
        }
        self.title = details.title;
        self.description = details.description;
        Ok(())
    }

    /// Marks the task completed.
    ///
    /// Completing an already-completed task keeps its original completion
    /// time.
    pub fn mark_completed(&mut self, at: DateTime<Utc>) {
        if self.is_completed {
            return;
        }
        self.is_completed = true;
        self.completed_at = Some(at);
    }
}
