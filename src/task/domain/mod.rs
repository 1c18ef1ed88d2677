//! Domain model for task records.
//!
//! The task domain validates titles and identifiers and models the
//! incomplete-to-completed transition while keeping all infrastructure
//! concerns outside of the domain boundary.

mod error;
mod ids;
mod task;

pub use error::TaskDomainError;
pub use ids::{TaskId, TaskTitle};
pub use task::{NewTask, PersistedTaskData, Task, TaskDetails};
