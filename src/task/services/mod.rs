//! Application services for task lifecycle orchestration.

mod lifecycle;

pub use lifecycle::{
    CreateTaskRequest, EditTaskRequest, RECENT_TASK_LIMIT, TaskService, TaskServiceError,
    TaskServiceResult,
};
