//! Then steps for task lifecycle BDD scenarios.

use super::world::TaskLifecycleWorld;
use axum::http::Method;
use rstest_bdd_macros::then;
use serde_json::Value;

fn last_body(world: &TaskLifecycleWorld) -> Result<&Value, eyre::Report> {
    world
        .last_body
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no response recorded"))
}

#[then("the response status is {status:u16}")]
fn response_status(world: &TaskLifecycleWorld, status: u16) -> Result<(), eyre::Report> {
    let actual = world
        .last_status
        .ok_or_else(|| eyre::eyre!("no response recorded"))?;
    if actual.as_u16() != status {
        return Err(eyre::eyre!(
            "expected status {status}, found {actual}: {:?}",
            world.last_body
        ));
    }
    Ok(())
}

#[then(r#"the response message is "{message}""#)]
fn response_message(world: &TaskLifecycleWorld, message: String) -> Result<(), eyre::Report> {
    let body = last_body(world)?;
    let actual = body.get("message").and_then(Value::as_str);
    if actual != Some(message.as_str()) {
        return Err(eyre::eyre!("expected message {message:?}, found {body}"));
    }
    Ok(())
}

#[then("the created task is incomplete without a description")]
fn created_task_is_fresh(world: &TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let task = last_body(world)?;
    let fresh = task.get("is_completed") == Some(&Value::Bool(false))
        && task.get("description") == Some(&Value::Null)
        && task.get("completed_at") == Some(&Value::Null);
    if !fresh {
        return Err(eyre::eyre!("unexpected created task {task}"));
    }
    Ok(())
}

fn listed_titles(world: &mut TaskLifecycleWorld) -> Result<Vec<String>, eyre::Report> {
    let (_, tasks) = world.request(Method::GET, "/api/tasks", None)?;
    let rows = tasks
        .as_array()
        .ok_or_else(|| eyre::eyre!("list body is not an array: {tasks}"))?;
    Ok(rows
        .iter()
        .filter_map(|row| row.get("title").and_then(Value::as_str).map(ToOwned::to_owned))
        .collect())
}

#[then(r#"the task list starts with "{title}""#)]
fn list_starts_with(world: &mut TaskLifecycleWorld, title: String) -> Result<(), eyre::Report> {
    let titles = listed_titles(world)?;
    if titles.first() != Some(&title) {
        return Err(eyre::eyre!("expected {title:?} first, found {titles:?}"));
    }
    Ok(())
}

#[then("the task list is empty")]
fn list_is_empty(world: &mut TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let titles = listed_titles(world)?;
    if !titles.is_empty() {
        return Err(eyre::eyre!("expected no tasks, found {titles:?}"));
    }
    Ok(())
}
