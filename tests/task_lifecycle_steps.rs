//! Behaviour tests for the task lifecycle over the HTTP API.

mod test_helpers;

#[path = "task_lifecycle_steps/mod.rs"]
mod task_lifecycle_steps_defs;

use rstest_bdd_macros::scenario;
use task_lifecycle_steps_defs::world::{TaskLifecycleWorld, world};

#[scenario(
    path = "tests/features/task_lifecycle.feature",
    name = "Create a task and see it listed first"
)]
#[tokio::test(flavor = "multi_thread")]
async fn create_and_list(world: TaskLifecycleWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/task_lifecycle.feature",
    name = "Reject a task without a title"
)]
#[tokio::test(flavor = "multi_thread")]
async fn reject_missing_title(world: TaskLifecycleWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/task_lifecycle.feature",
    name = "Completed tasks leave the list"
)]
#[tokio::test(flavor = "multi_thread")]
async fn completed_tasks_leave_the_list(world: TaskLifecycleWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/task_lifecycle.feature",
    name = "Completed tasks cannot be edited"
)]
#[tokio::test(flavor = "multi_thread")]
async fn completed_tasks_cannot_be_edited(world: TaskLifecycleWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/task_lifecycle.feature",
    name = "Deleting a task that does not exist"
)]
#[tokio::test(flavor = "multi_thread")]
async fn delete_missing_task(world: TaskLifecycleWorld) {
    let _ = world;
}
