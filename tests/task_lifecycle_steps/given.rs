//! Given steps for task lifecycle BDD scenarios.

use super::world::TaskLifecycleWorld;
use axum::http::{Method, StatusCode};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use serde_json::json;

#[given("an empty task board")]
fn empty_board(world: &mut TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let (_, tasks) = world.request(Method::GET, "/api/tasks", None)?;
    if tasks != json!([]) {
        return Err(eyre::eyre!("expected no tasks, found {tasks}"));
    }
    Ok(())
}

#[given(r#"a task titled "{title}" exists"#)]
fn task_exists(world: &mut TaskLifecycleWorld, title: String) -> Result<(), eyre::Report> {
    let body = json!({ "title": title }).to_string();
    let (status, task) = world
        .request(Method::POST, "/api/tasks", Some(&body))
        .wrap_err("create task for scenario setup")?;
    if status != StatusCode::CREATED {
        return Err(eyre::eyre!("setup create returned {status}: {task}"));
    }
    world.last_task_id = task.get("id").and_then(serde_json::Value::as_i64);
    Ok(())
}

#[given("that task has been completed")]
fn task_completed(world: &mut TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let id = world.task_id()?;
    let (status, _) = world
        .request(Method::PUT, &format!("/api/tasks/{id}/complete"), None)
        .wrap_err("complete task for scenario setup")?;
    if status != StatusCode::OK {
        return Err(eyre::eyre!("setup completion returned {status}"));
    }
    Ok(())
}
