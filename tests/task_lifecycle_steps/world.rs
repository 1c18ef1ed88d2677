//! Shared world state for task lifecycle BDD scenarios.

use axum::{
    Router,
    http::{Method, StatusCode},
};
use rstest::fixture;
use serde_json::Value;

use crate::test_helpers::{app, send};

/// Scenario world for task lifecycle behaviour tests.
pub struct TaskLifecycleWorld {
    pub app: Router,
    pub last_task_id: Option<i64>,
    pub last_status: Option<StatusCode>,
    pub last_body: Option<Value>,
}

impl TaskLifecycleWorld {
    /// Creates a world over an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            app: app(),
            last_task_id: None,
            last_status: None,
            last_body: None,
        }
    }

    /// Sends a request and records the response.
    pub fn request(
        &mut self,
        method: Method,
        uri: &str,
        body: Option<&str>,
    ) -> eyre::Result<(StatusCode, Value)> {
        let (status, value) = run_async(send(&self.app, method, uri, body))?;
        self.last_status = Some(status);
        self.last_body = Some(value.clone());
        Ok((status, value))
    }

    /// Returns the identifier of the task the scenario refers to.
    pub fn task_id(&self) -> eyre::Result<i64> {
        self.last_task_id
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
    }
}

impl Default for TaskLifecycleWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskLifecycleWorld {
    TaskLifecycleWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
