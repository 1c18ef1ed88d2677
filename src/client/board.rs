//! Local view state of the task list.

use super::{TaskApiClient, error::ClientError, form::FormMode, form::TaskForm};
use crate::task::{
    domain::{Task, TaskId},
    services::RECENT_TASK_LIMIT,
};
use tracing::{debug, warn};

/// Tone of a transient notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// The last action succeeded.
    Success,
    /// The last action failed.
    Error,
}

/// Transient message about the last action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Tone of the message.
    pub kind: NoticeKind,
    /// Message text.
    pub text: String,
}

impl Notice {
    fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}

/// Operation that removes a row from the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalKind {
    /// Marking the task completed.
    Complete,
    /// Deleting the task.
    Delete,
}

/// Lifecycle of an optimistic change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationState {
    /// Applied locally; the server has not answered.
    Pending,
    /// The server confirmed the change.
    Committed,
    /// The server rejected the change and the row was restored.
    RolledBack,
    /// The request timed out or the server was unreachable. The row stays
    /// removed until the next load shows what the server holds.
    Unresolved,
}

/// A row removed ahead of the server's answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRemoval {
    task: Task,
    index: usize,
    kind: RemovalKind,
    state: MutationState,
}

impl PendingRemoval {
    /// Returns the removed task.
    #[must_use]
    pub const fn task(&self) -> &Task {
        &self.task
    }

    /// Returns the operation that removed the row.
    #[must_use]
    pub const fn kind(&self) -> RemovalKind {
        self.kind
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> MutationState {
        self.state
    }
}

/// Rendered task list plus the user-facing notice and banner.
///
/// The banner reports a failed load and stays until a load succeeds; the
/// notice reports the last action and is replaced by the next one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskBoard {
    tasks: Vec<Task>,
    notice: Option<Notice>,
    banner: Option<String>,
}

impl TaskBoard {
    /// Creates an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the rows in display order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the notice for the last action, if any.
    #[must_use]
    pub const fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Returns the load failure banner, if any.
    #[must_use]
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    /// Removes and returns the notice.
    pub const fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// Fetches the recent tasks and replaces the list.
    ///
    /// Returns `true` when the list was loaded.
    pub async fn load(&mut self, client: &TaskApiClient) -> bool {
        let outcome = client.list_recent().await;
        self.apply_loaded(outcome)
    }

    /// Applies the outcome of a list request.
    ///
    /// A failure keeps the current rows and raises the banner.
    pub fn apply_loaded(&mut self, outcome: Result<Vec<Task>, ClientError>) -> bool {
        match outcome {
            Ok(tasks) => {
                debug!(count = tasks.len(), "task list loaded");
                self.tasks = tasks;
                self.banner = None;
                true
            }
            Err(err) => {
                warn!(error = %err, "failed to load tasks");
                self.banner = Some(err.user_message());
                false
            }
        }
    }

    /// Submits the form as a create or edit, depending on its mode.
    ///
    /// A form without a visible title is refused locally. Returns `true` on
    /// success.
    pub async fn submit(&mut self, client: &TaskApiClient, form: &mut TaskForm) -> bool {
        if !form.is_submittable() {
            self.notice = Some(Notice::error("Title is required"));
            return false;
        }
        let payload = form.payload();
        let outcome = match form.mode() {
            FormMode::Create => client.create(&payload).await,
            FormMode::Edit(id) => client.edit(id, &payload).await,
        };
        self.apply_submitted(form, outcome)
    }

    /// Applies the outcome of a create or edit request.
    ///
    /// Success puts the returned row in the list and clears the form; a
    /// failure raises a notice and leaves the form as typed for a retry.
    pub fn apply_submitted(
        &mut self,
        form: &mut TaskForm,
        outcome: Result<Task, ClientError>,
    ) -> bool {
        match outcome {
            Ok(task) => {
                match form.mode() {
                    FormMode::Create => {
                        self.tasks.insert(0, task);
                        self.tasks.truncate(RECENT_TASK_LIMIT);
                        self.notice = Some(Notice::success("Task created"));
                    }
                    FormMode::Edit(id) => {
                        if let Some(row) = self.tasks.iter_mut().find(|row| row.id() == id) {
                            *row = task;
                        }
                        self.notice = Some(Notice::success("Task updated"));
                    }
                }
                form.clear();
                true
            }
            Err(err) => {
                self.notice = Some(Notice::error(err.user_message()));
                false
            }
        }
    }

    /// Records a server confirmation for an operation on a task that is
    /// not on the board.
    pub fn apply_confirmation(&mut self, outcome: Result<String, ClientError>) -> bool {
        match outcome {
            Ok(message) => {
                self.notice = Some(Notice::success(message));
                true
            }
            Err(err) => {
                self.notice = Some(Notice::error(err.user_message()));
                false
            }
        }
    }

    /// Removes the row for `id` ahead of the server's answer.
    ///
    /// Returns `None` when the task is not on the board.
    pub fn begin_removal(&mut self, id: TaskId, kind: RemovalKind) -> Option<PendingRemoval> {
        let index = self.tasks.iter().position(|task| task.id() == id)?;
        let task = self.tasks.remove(index);
        Some(PendingRemoval {
            task,
            index,
            kind,
            state: MutationState::Pending,
        })
    }

    /// Resolves a pending removal with the server outcome.
    ///
    /// Only an explicit rejection restores the row, at its former position.
    /// Settling an already settled removal changes nothing.
    pub fn settle(
        &mut self,
        removal: &mut PendingRemoval,
        outcome: Result<String, ClientError>,
    ) -> MutationState {
        if removal.state != MutationState::Pending {
            return removal.state;
        }
        removal.state = match outcome {
            Ok(message) => {
                self.notice = Some(Notice::success(message));
                MutationState::Committed
            }
            Err(err) if err.is_rejection() => {
                let index = removal.index.min(self.tasks.len());
                self.tasks.insert(index, removal.task.clone());
                self.notice = Some(Notice::error(err.user_message()));
                MutationState::RolledBack
            }
            Err(err) => {
                warn!(
                    task_id = %removal.task.id(),
                    kind = ?removal.kind,
                    error = %err,
                    "removal outcome unknown"
                );
                self.notice = Some(Notice::error(err.user_message()));
                MutationState::Unresolved
            }
        };
        removal.state
    }

    /// Sends the removal `kind` for `id`, taking the row off the board first.
    ///
    /// Returns `None` when the task is not on the board.
    pub async fn remove(
        &mut self,
        client: &TaskApiClient,
        id: TaskId,
        kind: RemovalKind,
    ) -> Option<MutationState> {
        let mut removal = self.begin_removal(id, kind)?;
        let outcome = match removal.kind() {
            RemovalKind::Complete => client.complete(id).await,
            RemovalKind::Delete => client.delete(id).await,
        };
        Some(self.settle(&mut removal, outcome))
    }

    /// Completes a task, removing it from the board optimistically.
    ///
    /// Returns `None` when the task is not on the board.
    pub async fn complete(&mut self, client: &TaskApiClient, id: TaskId) -> Option<MutationState> {
        self.remove(client, id, RemovalKind::Complete).await
    }

    /// Deletes a task, removing it from the board optimistically.
    ///
    /// Returns `None` when the task is not on the board.
    pub async fn delete(&mut self, client: &TaskApiClient, id: TaskId) -> Option<MutationState> {
        self.remove(client, id, RemovalKind::Delete).await
    }
}
