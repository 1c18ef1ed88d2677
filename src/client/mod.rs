//! Client side of the task API.
//!
//! [`TaskApiClient`] issues the five operations over HTTP with a bounded
//! timeout. [`TaskBoard`] holds the rendered list and reconciles it with
//! server responses, removing rows optimistically on complete and delete and
//! restoring them only when the server rejects the change. [`TaskForm`] is
//! the create/edit input.

mod api;
mod board;
mod error;
mod form;
mod render;

pub use api::TaskApiClient;
pub use board::{MutationState, Notice, NoticeKind, PendingRemoval, RemovalKind, TaskBoard};
pub use error::{CONNECTIVITY_MESSAGE, ClientError};
pub use form::{FormMode, TaskForm};
pub use render::{render_board, render_task};
