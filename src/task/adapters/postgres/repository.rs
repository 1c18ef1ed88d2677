//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskRow},
    schema::task,
};
use crate::task::{
    domain::{NewTask, PersistedTaskData, Task, TaskDetails, TaskId, TaskTitle},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
///
/// Every call borrows one pooled connection for a single statement. Writes
/// use `RETURNING` so the stored row comes back from the write itself.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn insert(&self, new_task: &NewTask) -> TaskRepositoryResult<Task> {
        let new_row = to_new_row(new_task);
        self.run_blocking(move |connection| {
            let row = diesel::insert_into(task::table)
                .values(&new_row)
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            row_to_task(row)
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = task::table
                .find(id.value())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list_incomplete(&self, limit: usize) -> TaskRepositoryResult<Vec<Task>> {
        let row_limit = i64::try_from(limit).map_err(TaskRepositoryError::persistence)?;
        self.run_blocking(move |connection| {
            let rows = task::table
                .filter(task::is_completed.eq(false))
                .order((task::created_at.desc(), task::id.desc()))
                .limit(row_limit)
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn update_details(
        &self,
        id: TaskId,
        details: &TaskDetails,
    ) -> TaskRepositoryResult<Task> {
        let title = details.title().as_str().to_owned();
        let description = details.description().map(ToOwned::to_owned);
        self.run_blocking(move |connection| {
            let row = diesel::update(
                task::table
                    .filter(task::id.eq(id.value()))
                    .filter(task::is_completed.eq(false)),
            )
            .set((task::title.eq(title), task::description.eq(description)))
            .returning(TaskRow::as_returning())
            .get_result::<TaskRow>(connection)
            .optional()
            .map_err(TaskRepositoryError::persistence)?;
            row.map_or(Err(TaskRepositoryError::NotFound(id)), row_to_task)
        })
        .await
    }

    async fn mark_completed(
        &self,
        id: TaskId,
        completed_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<Task> {
        self.run_blocking(move |connection| {
            let row = diesel::sql_query(concat!(
                "UPDATE task SET is_completed = TRUE, ",
                "completed_at = COALESCE(completed_at, $2) ",
                "WHERE id = $1 ",
                "RETURNING id, title, description, is_completed, created_at, completed_at",
            ))
            .bind::<diesel::sql_types::Int8, _>(id.value())
            .bind::<diesel::sql_types::Timestamptz, _>(completed_at)
            .get_result::<TaskRow>(connection)
            .optional()
            .map_err(TaskRepositoryError::persistence)?;
            row.map_or(Err(TaskRepositoryError::NotFound(id)), row_to_task)
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(task::table.find(id.value()))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

fn to_new_row(new_task: &NewTask) -> NewTaskRow {
    NewTaskRow {
        title: new_task.details().title().as_str().to_owned(),
        description: new_task.details().description().map(ToOwned::to_owned),
        created_at: new_task.created_at(),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        title,
        description,
        is_completed,
        created_at,
        completed_at,
    } = row;

    let data = PersistedTaskData {
        id: TaskId::new(id).map_err(TaskRepositoryError::persistence)?,
        title: TaskTitle::new(title).map_err(TaskRepositoryError::persistence)?,
        description,
        is_completed,
        created_at,
        completed_at,
    };
    Ok(Task::from_persisted(data))
}
