use tasklet_core::{DueDate, Priority, Task, Timestamp};

use crate::error::ManagerError;

/// Three-state update for a clearable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldPatch<T> {
    /// Leave the current value untouched.
    #[default]
    Keep,
    /// Remove the current value.
    Clear,
    /// Overwrite with a new value.
    Set(T),
}

impl<T> FieldPatch<T> {
    /// Returns true when the patch leaves the field untouched.
    #[must_use]
    pub const fn is_keep(&self) -> bool {
        matches!(self, Self::Keep)
    }

    /// Write the patch into an optional slot.
    pub fn apply_to(self, slot: &mut Option<T>) {
        match self {
            Self::Keep => {}
            Self::Clear => *slot = None,
            Self::Set(value) => *slot = Some(value),
        }
    }
}

/// Raw, unvalidated update fields as a frontend collects them.
///
/// `None` means "not supplied". For `due_date`, `Some("")` clears the date.
#[derive(Debug, Clone, Default)]
pub struct UpdateTaskInput {
    /// New title.
    pub title: Option<String>,
    /// New description; `Some("")` empties it.
    pub description: Option<String>,
    /// New due date as `YYYY-MM-DD`; `Some("")` clears it.
    pub due_date: Option<String>,
    /// New priority as text.
    pub priority: Option<String>,
    /// Explicit completion state.
    pub completed: Option<bool>,
}

/// Validated update applied to a single task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    /// Overwrite the title.
    pub title: Option<String>,
    /// Overwrite the description.
    pub description: Option<String>,
    /// Patch applied to the due date.
    pub due_date: FieldPatch<DueDate>,
    /// Overwrite the priority.
    pub priority: Option<Priority>,
    /// Set the completion flag.
    pub completed: Option<bool>,
}

impl TaskPatch {
    /// Patch that only flips the completion flag.
    #[must_use]
    pub fn completion(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }

    /// Returns true when no field would change. `updated_at` is still refreshed on apply.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.due_date.is_keep()
            && self.priority.is_none()
            && self.completed.is_none()
    }

    /// Apply supplied fields to `task` and stamp `updated_at`.
    pub fn apply(self, task: &mut Task, now: Timestamp) {
        let Self {
            title,
            description,
            due_date,
            priority,
            completed,
        } = self;

        if let Some(title) = title {
            task.title = title;
        }
        if let Some(description) = description {
            task.description = description;
        }
        due_date.apply_to(&mut task.due_date);
        if let Some(priority) = priority {
            task.priority = priority;
        }
        if let Some(completed) = completed {
            task.completed = completed;
        }
        task.touch(now);
    }
}

impl TryFrom<UpdateTaskInput> for TaskPatch {
    type Error = ManagerError;

    fn try_from(input: UpdateTaskInput) -> Result<Self, Self::Error> {
        let UpdateTaskInput {
            title,
            description,
            due_date,
            priority,
            completed,
        } = input;

        let title = title.map(|raw| normalize_title(&raw)).transpose()?;
        let priority = priority.map(|raw| raw.parse::<Priority>()).transpose()?;
        let due_date = match due_date {
            None => FieldPatch::Keep,
            Some(raw) => DueDate::parse_optional(&raw)?.map_or(FieldPatch::Clear, FieldPatch::Set),
        };

        Ok(Self {
            title,
            description,
            due_date,
            priority,
            completed,
        })
    }
}

/// Trim surrounding whitespace and reject blank titles.
///
/// # Errors
/// Returns [`ManagerError::EmptyTitle`] when nothing remains after trimming.
pub fn normalize_title(raw: &str) -> Result<String, ManagerError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ManagerError::EmptyTitle);
    }
    Ok(trimmed.to_owned())
}
