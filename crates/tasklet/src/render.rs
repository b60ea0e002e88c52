//! Plain-text and JSON rendering of tasks.

use std::borrow::Cow;
use std::fmt::Write as _;

use anyhow::Result;
use tasklet_core::Task;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Printed instead of an empty table.
pub const NO_TASKS: &str = "No tasks found";

const HEADERS: [&str; 5] = ["ID", "Done", "Title", "Due", "Priority"];
const MAX_TITLE_GRAPHEMES: usize = 48;
const DONE_MARK: &str = "x";
const NOT_SET: &str = "-";

/// Column-aligned summary table, one row per task.
pub fn task_table(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return NO_TASKS.to_owned();
    }

    let rows: Vec<[String; 5]> = tasks.iter().map(table_row).collect();
    let mut widths = HEADERS.map(UnicodeWidthStr::width);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.width());
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(join_cells(HEADERS.iter().copied(), &widths));
    lines.push(
        widths
            .iter()
            .map(|width| "-".repeat(*width))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    for row in &rows {
        lines.push(join_cells(row.iter().map(String::as_str), &widths));
    }
    lines.join("\n")
}

/// Multi-line block per task, separated by blank lines.
pub fn task_details(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return NO_TASKS.to_owned();
    }
    tasks.iter().map(task_detail).collect::<Vec<_>>().join("\n\n")
}

/// Multi-line description of a single task.
pub fn task_detail(task: &Task) -> String {
    let mut out = format!("[{}] {}\n", task.id, task.title);
    let status = if task.completed { "completed" } else { "pending" };
    let due = task
        .due_date
        .map_or_else(|| NOT_SET.to_owned(), |due| due.to_string());

    // Writing into a String cannot fail.
    let _ = writeln!(out, "  status:      {status}");
    let _ = writeln!(out, "  priority:    {}", task.priority);
    let _ = writeln!(out, "  due:         {due}");
    if !task.description.is_empty() {
        let _ = writeln!(out, "  description: {}", task.description);
    }
    let _ = writeln!(out, "  created:     {}", task.created_at);
    let _ = write!(out, "  updated:     {}", task.updated_at);
    out
}

/// Pretty-printed JSON array in the same shape as the task file.
pub fn tasks_json(tasks: &[Task]) -> Result<String> {
    Ok(serde_json::to_string_pretty(tasks)?)
}

/// Pretty-printed JSON object for one task.
pub fn task_json(task: &Task) -> Result<String> {
    Ok(serde_json::to_string_pretty(task)?)
}

fn table_row(task: &Task) -> [String; 5] {
    [
        task.id.to_string(),
        if task.completed { DONE_MARK } else { "" }.to_owned(),
        truncate_with_ellipsis(&task.title, MAX_TITLE_GRAPHEMES).into_owned(),
        task.due_date
            .map_or_else(|| NOT_SET.to_owned(), |due| due.to_string()),
        task.priority.to_string(),
    ]
}

fn join_cells<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let line = cells
        .zip(widths)
        .map(|(cell, width)| pad(cell, *width))
        .collect::<Vec<_>>()
        .join(" | ");
    line.trim_end().to_owned()
}

/// Pad to `width` terminal columns; wide (CJK) characters count twice.
fn pad(cell: &str, width: usize) -> String {
    let fill = width.saturating_sub(cell.width());
    format!("{cell}{}", " ".repeat(fill))
}

fn grapheme_len(input: &str) -> usize {
    input.graphemes(true).count()
}

/// Truncate to `max_graphemes`, marking the cut with `...` when there is room for it.
fn truncate_with_ellipsis(input: &str, max_graphemes: usize) -> Cow<'_, str> {
    const ELLIPSIS: &str = "...";
    const ELLIPSIS_GRAPHEMES: usize = 3;

    if grapheme_len(input) <= max_graphemes {
        return Cow::Borrowed(input);
    }
    if max_graphemes <= ELLIPSIS_GRAPHEMES {
        return Cow::Owned(input.graphemes(true).take(max_graphemes).collect());
    }

    let keep = max_graphemes - ELLIPSIS_GRAPHEMES;
    let mut truncated: String = input.graphemes(true).take(keep).collect();
    truncated.push_str(ELLIPSIS);
    Cow::Owned(truncated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tasklet_core::{DueDate, Priority, TaskId, Timestamp};
    use time::macros::{date, datetime};

    fn task(id: u64, title: &str) -> Task {
        Task::new(
            TaskId(id),
            title.into(),
            String::new(),
            None,
            Priority::Normal,
            Timestamp::new(datetime!(2024-03-01 09:30:00)),
        )
    }

    #[test]
    fn empty_inputs_render_placeholder() {
        assert_eq!(task_table(&[]), NO_TASKS);
        assert_eq!(task_details(&[]), NO_TASKS);
    }

    #[test]
    fn table_aligns_columns() {
        let mut done = task(10, "ship release");
        done.completed = true;
        done.due_date = Some(DueDate::new(date!(2024 - 04 - 01)));
        done.priority = Priority::High;
        let tasks = [task(2, "read"), done];

        let rendered = task_table(&tasks);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "ID | Done | Title        | Due        | Priority");
        assert_eq!(lines[1], "---+------+--------------+------------+---------");
        assert_eq!(lines[2], "2  |      | read         | -          | normal");
        assert_eq!(lines[3], "10 | x    | ship release | 2024-04-01 | high");
    }

    #[test]
    fn table_pads_by_display_width() {
        let tasks = [task(1, "買い物"), task(2, "ab")];
        let rendered = task_table(&tasks);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "ID | Done | Title  | Due | Priority");
        assert_eq!(lines[2], "1  |      | 買い物 | -   | normal");
        assert_eq!(lines[3], "2  |      | ab     | -   | normal");
        let columns: Vec<usize> = lines[2..]
            .iter()
            .map(|line| line.split(" | ").take(3).map(UnicodeWidthStr::width).sum())
            .collect();
        assert_eq!(columns[0], columns[1]);
    }

    #[test]
    fn long_titles_are_truncated() {
        let title = "a".repeat(60);
        let rendered = task_table(&[task(1, &title)]);
        let expected = format!("{}...", "a".repeat(MAX_TITLE_GRAPHEMES - 3));
        assert!(rendered.contains(&expected));
        assert!(!rendered.contains(&title));
    }

    #[test]
    fn truncate_handles_small_limits() {
        assert_eq!(truncate_with_ellipsis("hello", 0), "");
        assert_eq!(truncate_with_ellipsis("hello", 2), "he");
        assert_eq!(truncate_with_ellipsis("買い物リスト", 3), "買い物");
        assert_eq!(truncate_with_ellipsis("hello", 5), "hello");
        assert_eq!(truncate_with_ellipsis("hello world", 8), "hello...");
        assert_eq!(truncate_with_ellipsis("", 0), "");
    }

    #[test]
    fn detail_includes_every_field() {
        let mut item = task(3, "歯医者");
        item.description = "午後".into();
        item.due_date = Some(DueDate::new(date!(2024 - 05 - 02)));

        let rendered = task_detail(&item);

        assert!(rendered.starts_with("[3] 歯医者\n"));
        assert!(rendered.contains("status:      pending"));
        assert!(rendered.contains("priority:    normal"));
        assert!(rendered.contains("due:         2024-05-02"));
        assert!(rendered.contains("description: 午後"));
        assert!(rendered.contains("created:     2024-03-01T09:30:00"));
        assert!(rendered.ends_with("updated:     2024-03-01T09:30:00"));
    }

    #[test]
    fn detail_omits_empty_description() {
        let rendered = task_detail(&task(1, "t"));
        assert!(!rendered.contains("description"));
        assert!(rendered.contains("due:         -"));
    }

    #[test]
    fn json_matches_file_shape() -> Result<()> {
        let rendered = tasks_json(&[task(1, "t")])?;
        let value: serde_json::Value = serde_json::from_str(&rendered)?;
        assert_eq!(value[0]["id"], 1);
        assert_eq!(value[0]["title"], "t");
        assert!(value[0]["due_date"].is_null());
        assert_eq!(value[0]["created_at"], "2024-03-01T09:30:00");
        Ok(())
    }
}
