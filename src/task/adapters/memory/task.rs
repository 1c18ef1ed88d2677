//! In-memory task repository for tests and database-less deployments.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::task::{
    domain::{NewTask, Task, TaskDetails, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Identifiers are assigned from a counter starting at 1 and are never
/// reused, matching a `BIGSERIAL` column.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: BTreeMap<TaskId, Task>,
    last_id: i64,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> TaskRepositoryResult<RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> TaskRepositoryResult<RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn insert(&self, task: &NewTask) -> TaskRepositoryResult<Task> {
        let mut state = self.write()?;
        let next = state
            .last_id
            .checked_add(1)
            .ok_or_else(|| {
                TaskRepositoryError::persistence(std::io::Error::other(
                    "task identifier sequence exhausted",
                ))
            })?;
        let id = TaskId::new(next).map_err(TaskRepositoryError::persistence)?;
        state.last_id = next;

        let stored = task.clone().into_task(id);
        state.tasks.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.read()?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn list_incomplete(&self, limit: usize) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read()?;
        let mut incomplete: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| !task.is_completed())
            .cloned()
            .collect();
        incomplete.sort_by_key(|task| Reverse((task.created_at(), task.id())));
        incomplete.truncate(limit);
        Ok(incomplete)
    }

    async fn update_details(
        &self,
        id: TaskId,
        details: &TaskDetails,
    ) -> TaskRepositoryResult<Task> {
        let mut state = self.write()?;
        let task = state
            .tasks
            .get_mut(&id)
            .ok_or(TaskRepositoryError::NotFound(id))?;
        task.apply_details(details.clone())
            .map_err(|_| TaskRepositoryError::NotFound(id))?;
        Ok(task.clone())
    }

    async fn mark_completed(
        &self,
        id: TaskId,
        completed_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<Task> {
        let mut state = self.write()?;
        let task = state
            .tasks
            .get_mut(&id)
            .ok_or(TaskRepositoryError::NotFound(id))?;
        task.mark_completed(completed_at);
        Ok(task.clone())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        state
            .tasks
            .remove(&id)
            .map(|_| ())
            .ok_or(TaskRepositoryError::NotFound(id))
    }
}
