//! HTTP surface over the task service.
//!
//! Routes:
//!
//! - `GET /api/tasks`: up to five incomplete tasks, newest first
//! - `POST /api/tasks`: create a task
//! - `PUT /api/tasks/{id}`: edit an incomplete task
//! - `PUT /api/tasks/{id}/complete`: mark a task completed
//! - `DELETE /api/tasks/{id}`: delete a task
//! - `GET /api/health`: liveness probe
//!
//! Every error body is `{"message": ...}`; unmatched routes answer
//! `404 {"message": "Not Found"}` and unhandled failures
//! `500 {"message": "Internal Server Error"}`.

mod error;
mod handlers;
mod router;
mod server;

pub use error::ApiError;
pub use handlers::{MessageBody, TaskPayload};
pub use router::{AppState, SharedTaskService, router};
pub use server::{serve, shutdown_signal};
