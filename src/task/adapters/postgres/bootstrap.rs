//! Schema self-provisioning for the task store.
//!
//! Every step is idempotent: the database and table are created only when
//! missing, and the `completed_at` column is added to tables created before
//! it existed.

use super::repository::TaskPgPool;
use crate::config::DatabaseConfig;
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::Error as DieselError;
use thiserror::Error;
use tracing::{debug, info};

/// Creates the task table and its listing index when missing.
pub const CREATE_TASK_TABLE_SQL: &str = concat!(
    "CREATE TABLE IF NOT EXISTS task (",
    "id BIGSERIAL PRIMARY KEY, ",
    "title VARCHAR(255) NOT NULL CHECK (btrim(title) <> ''), ",
    "description TEXT, ",
    "is_completed BOOLEAN NOT NULL DEFAULT FALSE, ",
    "created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(), ",
    "completed_at TIMESTAMPTZ NULL DEFAULT NULL",
    ");",
    "CREATE INDEX IF NOT EXISTS idx_task_incomplete_recent ",
    "ON task (created_at DESC, id DESC) WHERE is_completed = FALSE;",
);

const ADD_COMPLETED_AT_SQL: &str =
    "ALTER TABLE task ADD COLUMN IF NOT EXISTS completed_at TIMESTAMPTZ NULL DEFAULT NULL";

/// Errors raised while provisioning the store.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// A connection to the server could not be established.
    #[error("failed to connect to PostgreSQL: {0}")]
    Connection(#[from] diesel::result::ConnectionError),

    /// A provisioning statement failed.
    #[error("schema provisioning failed: {0}")]
    Statement(#[from] DieselError),

    /// The connection pool could not be built.
    #[error("failed to build connection pool: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),

    /// The blocking provisioning task panicked or was cancelled.
    #[error("provisioning task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[derive(QueryableByName)]
struct DatabaseExists {
    #[diesel(sql_type = diesel::sql_types::Bool)]
    present: bool,
}

/// Creates the task database on the server when it does not exist.
///
/// # Errors
///
/// Returns [`BootstrapError`] when the maintenance database is unreachable
/// or the `CREATE DATABASE` statement fails for a reason other than a
/// concurrent creation.
pub fn ensure_database(config: &DatabaseConfig) -> Result<(), BootstrapError> {
    let mut connection = PgConnection::establish(&config.maintenance_connection_string())?;
    let exists = diesel::sql_query(
        "SELECT EXISTS (SELECT 1 FROM pg_database WHERE datname = $1) AS present",
    )
    .bind::<diesel::sql_types::Text, _>(&config.name)
    .get_result::<DatabaseExists>(&mut connection)?;
    if exists.present {
        debug!(database = %config.name, "task database already present");
        return Ok(());
    }

    let statement = format!("CREATE DATABASE {}", quote_identifier(&config.name));
    match connection.batch_execute(&statement) {
        Ok(()) => {
            info!(database = %config.name, "created task database");
            Ok(())
        }
        Err(err) if is_already_exists(&err) => Ok(()),
        Err(err) => Err(err.into()),
    }
}

/// Creates the task table and adds any missing columns.
///
/// # Errors
///
/// Returns [`BootstrapError::Statement`] when a statement fails for a reason
/// other than the object already existing.
pub fn ensure_schema(connection: &mut PgConnection) -> Result<(), BootstrapError> {
    connection.batch_execute(CREATE_TASK_TABLE_SQL)?;
    match connection.batch_execute(ADD_COMPLETED_AT_SQL) {
        Ok(()) => Ok(()),
        Err(err) if is_already_exists(&err) => Ok(()),
        Err(err) => Err(err.into()),
    }
}

/// Builds a connection pool without waiting for the server to answer.
///
/// Connections are opened lazily, so a pool can be handed to the HTTP layer
/// even while the database is unreachable; requests then fail with a
/// persistence error until it recovers.
#[must_use]
pub fn build_pool(config: &DatabaseConfig) -> TaskPgPool {
    let manager = ConnectionManager::<PgConnection>::new(config.connection_string());
    Pool::builder()
        .max_size(config.pool_size)
        .build_unchecked(manager)
}

/// Provisions the database and schema, returning a pool on the task database.
///
/// # Errors
///
/// Returns [`BootstrapError`] when any provisioning step fails.
pub async fn bootstrap(config: &DatabaseConfig) -> Result<TaskPgPool, BootstrapError> {
    let settings = config.clone();
    tokio::task::spawn_blocking(move || {
        ensure_database(&settings)?;
        let pool = build_pool(&settings);
        let mut connection = pool.get()?;
        ensure_schema(&mut connection)?;
        info!(database = %settings.name, "task schema ready");
        Ok(pool)
    })
    .await?
}

/// Duplicate database (`42P04`), table (`42P07`), and column (`42701`)
/// errors all carry this phrase; Diesel does not expose the SQLSTATE.
fn is_already_exists(err: &DieselError) -> bool {
    matches!(err, DieselError::DatabaseError(_, info) if info.message().contains("already exists"))
}

fn quote_identifier(identifier: &str) -> String {
    format!("\"{}\"", identifier.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::{CREATE_TASK_TABLE_SQL, quote_identifier};

    #[test]
    fn quote_identifier_doubles_embedded_quotes() {
        assert_eq!(quote_identifier("task_db"), "\"task_db\"");
        assert_eq!(quote_identifier("odd\"name"), "\"odd\"\"name\"");
    }

    #[test]
    fn create_table_statement_is_idempotent() {
        assert!(CREATE_TASK_TABLE_SQL.contains("CREATE TABLE IF NOT EXISTS task"));
        assert!(CREATE_TASK_TABLE_SQL.contains("CREATE INDEX IF NOT EXISTS"));
    }
}
