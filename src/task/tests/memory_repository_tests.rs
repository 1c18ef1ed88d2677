//! Contract tests for the in-memory repository.

use super::fixed_instant;
use crate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{NewTask, TaskDetails, TaskId, TaskTitle},
    ports::{TaskRepository, TaskRepositoryError},
};
use chrono::Duration;
use rstest::{fixture, rstest};

#[fixture]
fn repository() -> InMemoryTaskRepository {
    InMemoryTaskRepository::new()
}

fn new_task(title: &str, minutes: i64) -> NewTask {
    let details = TaskDetails::new(TaskTitle::new(title).expect("valid title"));
    NewTask::new(details, fixed_instant() + Duration::minutes(minutes))
}

#[rstest]
#[tokio::test]
async fn identifiers_start_at_one_and_are_never_reused(repository: InMemoryTaskRepository) {
    let first = repository
        .insert(&new_task("First", 0))
        .await
        .expect("insert succeeds");
    repository.delete(first.id()).await.expect("delete succeeds");
    let second = repository
        .insert(&new_task("Second", 1))
        .await
        .expect("insert succeeds");

    assert_eq!(first.id().value(), 1);
    assert_eq!(second.id().value(), 2);
}

#[rstest]
#[tokio::test]
async fn listing_is_newest_first_and_limited(repository: InMemoryTaskRepository) {
    for minute in 0..7 {
        repository
            .insert(&new_task(&format!("Task {minute}"), minute))
            .await
            .expect("insert succeeds");
    }

    let listed = repository.list_incomplete(5).await.expect("list succeeds");

    let titles: Vec<&str> = listed.iter().map(|task| task.title().as_str()).collect();
    assert_eq!(titles, vec!["Task 6", "Task 5", "Task 4", "Task 3", "Task 2"]);
}

#[rstest]
#[tokio::test]
async fn equal_creation_times_fall_back_to_newest_identifier(
    repository: InMemoryTaskRepository,
) {
    let older = repository
        .insert(&new_task("Older", 0))
        .await
        .expect("insert succeeds");
    let newer = repository
        .insert(&new_task("Newer", 0))
        .await
        .expect("insert succeeds");

    let listed = repository.list_incomplete(5).await.expect("list succeeds");

    let ids: Vec<TaskId> = listed.iter().map(|task| task.id()).collect();
    assert_eq!(ids, vec![newer.id(), older.id()]);
}

#[rstest]
#[tokio::test]
async fn completed_tasks_are_not_listed(repository: InMemoryTaskRepository) {
    let task = repository
        .insert(&new_task("Done soon", 0))
        .await
        .expect("insert succeeds");

    repository
        .mark_completed(task.id(), fixed_instant() + Duration::hours(1))
        .await
        .expect("completion succeeds");

    let listed = repository.list_incomplete(5).await.expect("list succeeds");
    assert!(listed.is_empty());
}

#[rstest]
#[tokio::test]
async fn updating_a_completed_task_reports_not_found(repository: InMemoryTaskRepository) {
    let task = repository
        .insert(&new_task("Frozen", 0))
        .await
        .expect("insert succeeds");
    repository
        .mark_completed(task.id(), fixed_instant())
        .await
        .expect("completion succeeds");
    let details = TaskDetails::new(TaskTitle::new("Thawed").expect("valid title"));

    let result = repository.update_details(task.id(), &details).await;

    assert!(matches!(result, Err(TaskRepositoryError::NotFound(id)) if id == task.id()));
    let stored = repository
        .find_by_id(task.id())
        .await
        .expect("lookup succeeds")
        .expect("task still stored");
    assert_eq!(stored.title().as_str(), "Frozen");
}

#[rstest]
#[tokio::test]
async fn missing_rows_report_not_found(repository: InMemoryTaskRepository) {
    let id = TaskId::new(99).expect("valid id");

    let completed = repository.mark_completed(id, fixed_instant()).await;
    let deleted = repository.delete(id).await;

    assert!(matches!(completed, Err(TaskRepositoryError::NotFound(_))));
    assert!(matches!(deleted, Err(TaskRepositoryError::NotFound(_))));
}
