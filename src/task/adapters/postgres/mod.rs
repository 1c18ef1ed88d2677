//! `PostgreSQL` adapters for task persistence.

mod bootstrap;
mod models;
mod repository;
mod schema;

pub use bootstrap::{
    BootstrapError, CREATE_TASK_TABLE_SQL, bootstrap, build_pool, ensure_database, ensure_schema,
};
pub use repository::{PostgresTaskRepository, TaskPgPool};
