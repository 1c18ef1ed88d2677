//! Command-line client for the task API.
//!
//! ```text
//! taskboard list
//! taskboard add "Buy milk" --description "Two litres"
//! taskboard edit 3 "Buy oat milk"
//! taskboard done 3
//! taskboard delete 3
//! taskboard health
//! ```
//!
//! The server address comes from `--base-url` or `TASKBOARD_API_BASE_URL`.

use std::io::{self, Write};
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use taskboard::client::{
    MutationState, RemovalKind, TaskApiClient, TaskBoard, TaskForm, render_board,
};
use taskboard::config::ClientConfig;
use taskboard::task::domain::TaskId;
use tokio::runtime::Builder;
use tracing_subscriber::EnvFilter;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Parser)]
#[command(name = "taskboard", version, about = "Manage tasks on a taskboard server")]
struct Cli {
    /// Base URL of the task API.
    #[arg(long, env = "TASKBOARD_API_BASE_URL")]
    base_url: Option<String>,

    /// Request timeout in seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the five most recent incomplete tasks.
    List,
    /// Create a task.
    Add {
        /// Task title.
        title: String,
        /// Optional description.
        #[arg(long, short)]
        description: Option<String>,
    },
    /// Replace the title and description of an incomplete task.
    Edit {
        /// Task identifier.
        id: TaskId,
        /// New title.
        title: String,
        /// New description; kept from the listed task when omitted.
        #[arg(long, short)]
        description: Option<String>,
    },
    /// Mark a task completed.
    Done {
        /// Task identifier.
        id: TaskId,
    },
    /// Delete a task.
    Delete {
        /// Task identifier.
        id: TaskId,
    },
    /// Check that the server is up.
    Health,
}

fn main() -> Result<ExitCode, BoxError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = ClientConfig::from_env();
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if let Some(secs) = cli.timeout_secs {
        config.timeout = Duration::from_secs(secs);
    }
    let client = TaskApiClient::from_config(&config)?;

    let runtime = Builder::new_current_thread().enable_all().build()?;
    let succeeded = runtime.block_on(run(&client, cli.command))?;
    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn run(client: &TaskApiClient, command: Command) -> io::Result<bool> {
    let mut out = io::stdout().lock();
    let mut board = TaskBoard::new();

    let succeeded = match command {
        Command::List => board.load(client).await,
        Command::Add { title, description } => {
            let mut form = TaskForm::for_create().with_title(title);
            if let Some(text) = description {
                form = form.with_description(text);
            }
            let submitted = board.submit(client, &mut form).await;
            board.load(client).await;
            submitted
        }
        Command::Edit {
            id,
            title,
            description,
        } => {
            board.load(client).await;
            let mut form = board
                .tasks()
                .iter()
                .find(|task| task.id() == id)
                .map_or_else(|| TaskForm::for_task_id(id), TaskForm::for_edit)
                .with_title(title);
            if let Some(text) = description {
                form = form.with_description(text);
            }
            board.submit(client, &mut form).await
        }
        Command::Done { id } => remove(client, &mut board, id, RemovalKind::Complete).await,
        Command::Delete { id } => remove(client, &mut board, id, RemovalKind::Delete).await,
        Command::Health => {
            return match client.health().await {
                Ok(()) => {
                    writeln!(out, "ok: {} is healthy", client.base_url())?;
                    Ok(true)
                }
                Err(err) => {
                    writeln!(out, "error: {}", err.user_message())?;
                    Ok(false)
                }
            };
        }
    };

    render_board(&board, &mut out)?;
    out.flush()?;
    Ok(succeeded)
}

async fn remove(
    client: &TaskApiClient,
    board: &mut TaskBoard,
    id: TaskId,
    kind: RemovalKind,
) -> bool {
    board.load(client).await;
    if let Some(state) = board.remove(client, id, kind).await {
        return state == MutationState::Committed;
    }

    // Not among the listed tasks; the server still decides.
    let outcome = match kind {
        RemovalKind::Complete => client.complete(id).await,
        RemovalKind::Delete => client.delete(id).await,
    };
    board.apply_confirmation(outcome)
}
