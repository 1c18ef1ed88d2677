//! When steps for task lifecycle BDD scenarios.

use super::world::TaskLifecycleWorld;
use axum::http::Method;
use rstest_bdd_macros::when;
use serde_json::json;

#[when(r#"I create a task titled "{title}""#)]
fn create_task(world: &mut TaskLifecycleWorld, title: String) -> Result<(), eyre::Report> {
    let body = json!({ "title": title }).to_string();
    let (_, task) = world.request(Method::POST, "/api/tasks", Some(&body))?;
    world.last_task_id = task.get("id").and_then(serde_json::Value::as_i64);
    Ok(())
}

#[when("I create a task without a title")]
fn create_untitled_task(world: &mut TaskLifecycleWorld) -> Result<(), eyre::Report> {
    world.request(
        Method::POST,
        "/api/tasks",
        Some(r#"{"description":"untitled"}"#),
    )?;
    Ok(())
}

#[when("I complete that task")]
fn complete_task(world: &mut TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let id = world.task_id()?;
    world.request(Method::PUT, &format!("/api/tasks/{id}/complete"), None)?;
    Ok(())
}

#[when(r#"I rename that task to "{title}""#)]
fn rename_task(world: &mut TaskLifecycleWorld, title: String) -> Result<(), eyre::Report> {
    let id = world.task_id()?;
    let body = json!({ "title": title }).to_string();
    world.request(Method::PUT, &format!("/api/tasks/{id}"), Some(&body))?;
    Ok(())
}

#[when("I delete task {id:i64}")]
fn delete_task(world: &mut TaskLifecycleWorld, id: i64) -> Result<(), eyre::Report> {
    world.request(Method::DELETE, &format!("/api/tasks/{id}"), None)?;
    Ok(())
}
