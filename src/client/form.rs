//! Create/edit form state.

use crate::http::TaskPayload;
use crate::task::domain::{Task, TaskId};

/// What submitting the form does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    /// Submitting creates a new task.
    #[default]
    Create,
    /// Submitting replaces the fields of the given task.
    Edit(TaskId),
}

/// Title and description inputs plus the target of submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    mode: FormMode,
    title: String,
    description: String,
}

impl TaskForm {
    /// Creates an empty form for a new task.
    #[must_use]
    pub fn for_create() -> Self {
        Self::default()
    }

    /// Creates a form pre-filled from `task` for editing it.
    #[must_use]
    pub fn for_edit(task: &Task) -> Self {
        Self {
            mode: FormMode::Edit(task.id()),
            title: task.title().as_str().to_owned(),
            description: task.description().unwrap_or_default().to_owned(),
        }
    }

    /// Creates an empty form targeting task `id`.
    ///
    /// Used when the task is not on the board to pre-fill from.
    #[must_use]
    pub fn for_task_id(id: TaskId) -> Self {
        Self {
            mode: FormMode::Edit(id),
            ..Self::default()
        }
    }

    /// Sets the title input.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the description input.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Returns the submission target.
    #[must_use]
    pub const fn mode(&self) -> FormMode {
        self.mode
    }

    /// Returns the title input as typed.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description input as typed.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns `true` when the title has a non-whitespace character.
    #[must_use]
    pub fn is_submittable(&self) -> bool {
        !self.title.trim().is_empty()
    }

    /// Builds the request body; a blank description is sent as absent.
    #[must_use]
    pub fn payload(&self) -> TaskPayload {
        let description = if self.description.trim().is_empty() {
            None
        } else {
            Some(self.description.clone())
        };
        TaskPayload {
            title: Some(self.title.clone()),
            description,
        }
    }

    /// Resets the form to an empty create form.
    pub fn clear(&mut self) {
        *self = Self::for_create();
    }
}
