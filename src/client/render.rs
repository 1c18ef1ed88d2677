//! Plain-text rendering of the board.

use std::io::{self, Write};

use super::board::{NoticeKind, TaskBoard};
use crate::task::domain::Task;

const EMPTY_MESSAGE: &str = "No tasks yet. Add one to get started!";

/// Writes the banner, the notice, and the task list.
///
/// # Errors
///
/// Returns any error raised by `out`.
pub fn render_board(board: &TaskBoard, out: &mut impl Write) -> io::Result<()> {
    if let Some(banner) = board.banner() {
        writeln!(out, "! {banner}")?;
    }
    if let Some(notice) = board.notice() {
        let prefix = match notice.kind {
            NoticeKind::Success => "ok",
            NoticeKind::Error => "error",
        };
        writeln!(out, "{prefix}: {}", notice.text)?;
    }
    if board.tasks().is_empty() {
        return writeln!(out, "{EMPTY_MESSAGE}");
    }
    writeln!(out, "Recent Tasks ({})", board.tasks().len())?;
    for task in board.tasks() {
        render_task(task, out)?;
    }
    Ok(())
}

/// Writes one task as an indented block.
///
/// # Errors
///
/// Returns any error raised by `out`.
pub fn render_task(task: &Task, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "  [{}] {}", task.id(), task.title())?;
    if let Some(description) = task.description() {
        writeln!(out, "       {description}")?;
    }
    writeln!(
        out,
        "       created {}",
        task.created_at().format("%Y-%m-%d %H:%M UTC")
    )
}

#[cfg(test)]
mod tests {
    use super::render_board;
    use crate::client::TaskBoard;
    use crate::task::domain::{PersistedTaskData, Task, TaskId, TaskTitle};
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    fn rendered(board: &TaskBoard) -> String {
        let mut out = Vec::new();
        render_board(board, &mut out).expect("writing to a Vec succeeds");
        String::from_utf8(out).expect("rendered text is UTF-8")
    }

    #[rstest]
    fn empty_board_shows_placeholder() {
        assert_eq!(
            rendered(&TaskBoard::new()),
            "No tasks yet. Add one to get started!\n"
        );
    }

    #[rstest]
    fn tasks_are_listed_with_count_and_details() {
        let task = Task::from_persisted(PersistedTaskData {
            id: TaskId::new(7).expect("valid id"),
            title: TaskTitle::new("Buy milk").expect("valid title"),
            description: Some("Two litres".to_owned()),
            is_completed: false,
            created_at: Utc
                .with_ymd_and_hms(2026, 5, 4, 8, 30, 0)
                .single()
                .expect("valid time"),
            completed_at: None,
        });
        let mut board = TaskBoard::new();
        assert!(board.apply_loaded(Ok(vec![task])));

        assert_eq!(
            rendered(&board),
            concat!(
                "Recent Tasks (1)\n",
                "  [7] Buy milk\n",
                "       Two litres\n",
                "       created 2026-05-04 08:30 UTC\n",
            )
        );
    }
}
