use std::io::Write;

use anyhow::Result;
use tasklet_app::{CreateTaskInput, TaskManager, TaskStore, UpdateTaskInput};
use tasklet_core::Clock;

use crate::render;
use crate::{Command, OutputFormat, TaskState};

/// Dispatch a parsed subcommand and print its result to `out`.
pub fn run<S, C>(cmd: Command, manager: &TaskManager<S, C>, out: &mut impl Write) -> Result<()>
where
    S: TaskStore,
    C: Clock,
{
    match cmd {
        Command::Add {
            title,
            description,
            due_date,
            priority,
        } => {
            let task = manager.add(CreateTaskInput {
                title,
                description,
                due_date,
                priority,
            })?;
            writeln!(out, "created task {}", task.id)?;
        }
        Command::List {
            status,
            detailed,
            format,
        } => {
            let tasks = manager.list(status)?;
            let rendered = match format {
                OutputFormat::Json => render::tasks_json(&tasks)?,
                OutputFormat::Table if detailed => render::task_details(&tasks),
                OutputFormat::Table => render::task_table(&tasks),
            };
            writeln!(out, "{rendered}")?;
        }
        Command::Show { task_id, format } => {
            let task = manager.get(task_id)?;
            let rendered = match format {
                OutputFormat::Json => render::task_json(&task)?,
                OutputFormat::Table => render::task_detail(&task),
            };
            writeln!(out, "{rendered}")?;
        }
        Command::Complete { task_id, undo } => {
            let task = manager.complete(task_id, !undo)?;
            let state = if task.completed { "completed" } else { "pending" };
            writeln!(out, "task {} marked {state}", task.id)?;
        }
        Command::Update {
            task_id,
            title,
            description,
            due_date,
            clear_due,
            priority,
            status,
        } => {
            let due_date = if clear_due { Some(String::new()) } else { due_date };
            let task = manager.update(
                task_id,
                UpdateTaskInput {
                    title,
                    description,
                    due_date,
                    priority,
                    completed: status.map(TaskState::is_completed),
                },
            )?;
            writeln!(out, "updated task {}", task.id)?;
        }
        Command::Delete { task_id } => {
            let task = manager.delete(task_id)?;
            writeln!(out, "deleted task {} ({})", task.id, task.title)?;
        }
    }
    Ok(())
}
