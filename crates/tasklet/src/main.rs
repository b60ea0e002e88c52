//! CLI entry point for tasklet.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tasklet_app::{AppConfig, DB_ENV_VAR, ErrorKind, ManagerError, TaskManager, resolve_storage_path};
use tasklet_core::{StatusFilter, TaskId};
use tasklet_store_json::JsonStore;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

mod commands;
mod render;

const EXIT_FAILURE: u8 = 1;
const EXIT_INVALID_ARGUMENT: u8 = 2;
const EXIT_NOT_FOUND: u8 = 3;
const EXIT_MALFORMED_STORE: u8 = 4;

/// Personal tasks kept in a single JSON file.
#[derive(Parser, Debug)]
#[command(
    name = "tasklet",
    version,
    about = "tasklet: a small task tracker backed by a JSON file"
)]
struct Cli {
    /// Task file (defaults to $TASKLET_DB, the config file, then ~/.tasklet/tasks.json).
    #[arg(short = 'd', long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a task.
    Add {
        /// Task title.
        title: String,
        /// Free-form notes.
        #[arg(short = 'm', long, default_value = "")]
        description: String,
        /// Due date (YYYY-MM-DD).
        #[arg(short = 't', long)]
        due_date: Option<String>,
        /// Priority (low / normal / high).
        #[arg(short = 'p', long)]
        priority: Option<String>,
    },

    /// List tasks, open ones first.
    List {
        /// Which tasks to show (all / pending / completed).
        #[arg(long, default_value_t = StatusFilter::All)]
        status: StatusFilter,
        /// Show notes and timestamps.
        #[arg(long)]
        detailed: bool,
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Show a single task.
    Show {
        task_id: TaskId,
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Mark a task as completed.
    Complete {
        task_id: TaskId,
        /// Mark the task as pending again.
        #[arg(long)]
        undo: bool,
    },

    /// Change fields of a task; omitted fields stay as they are.
    Update {
        /// Task to change.
        task_id: TaskId,
        /// New title.
        #[arg(long)]
        title: Option<String>,
        /// New notes; an empty value clears them.
        #[arg(long)]
        description: Option<String>,
        /// New due date (YYYY-MM-DD); an empty value clears it.
        #[arg(long, conflicts_with = "clear_due")]
        due_date: Option<String>,
        /// Remove the due date.
        #[arg(long)]
        clear_due: bool,
        /// New priority (low / normal / high).
        #[arg(long)]
        priority: Option<String>,
        /// Mark the task pending or completed.
        #[arg(long, value_enum)]
        status: Option<TaskState>,
    },

    /// Delete a task.
    Delete { task_id: TaskId },
}

/// Output format for task listings.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Table,
    Json,
}

/// Completion state accepted by `update --status`.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum TaskState {
    Pending,
    Completed,
}

impl TaskState {
    const fn is_completed(self) -> bool {
        matches!(self, Self::Completed)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    install_tracing();

    match execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(exit_code_for(&err))
        }
    }
}

fn execute(Cli { database, cmd }: Cli) -> Result<()> {
    let path = storage_path(database)?;
    tracing::debug!(path = %path.display(), "using task file");
    let manager = TaskManager::new(JsonStore::new(path));
    commands::run(cmd, &manager, &mut io::stdout().lock())
}

fn storage_path(flag: Option<PathBuf>) -> Result<PathBuf> {
    let config = AppConfig::load()?;
    resolve_storage_path(
        flag,
        std::env::var_os(DB_ENV_VAR),
        &config,
        dirs::home_dir().as_deref(),
    )
}

fn exit_code_for(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<ManagerError>()
        .map_or(EXIT_FAILURE, |err| match err.kind() {
            ErrorKind::InvalidArgument => EXIT_INVALID_ARGUMENT,
            ErrorKind::NotFound => EXIT_NOT_FOUND,
            ErrorKind::Malformed => EXIT_MALFORMED_STORE,
            ErrorKind::Exhausted | ErrorKind::Storage => EXIT_FAILURE,
        })
}

fn install_tracing() {
    // RUST_LOG overrides; default keeps stderr quiet apart from warnings.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_span_events(FmtSpan::NONE)
        .with_writer(io::stderr)
        .compact()
        .try_init();
}
