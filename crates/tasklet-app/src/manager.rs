//! Task manager: validation, id assignment and persistence orchestration.

use tasklet_core::{
    Clock, DueDate, Priority, StatusFilter, SystemClock, Task, TaskId, sort_for_listing,
};
use tracing::{debug, info};

use crate::error::ManagerError;
use crate::task_patch::{TaskPatch, UpdateTaskInput, normalize_title};
use crate::task_store::TaskStore;

/// Raw fields for a new task.
#[derive(Debug, Clone, Default)]
pub struct CreateTaskInput {
    /// Task title (trimmed; must not be blank).
    pub title: String,
    /// Optional notes.
    pub description: String,
    /// Due date as `YYYY-MM-DD`; `None` or `Some("")` means no due date.
    pub due_date: Option<String>,
    /// Priority as text; `None` means `normal`.
    pub priority: Option<String>,
}

impl CreateTaskInput {
    /// Input with only a title set.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

struct NewTaskFields {
    title: String,
    description: String,
    due_date: Option<DueDate>,
    priority: Priority,
}

impl TryFrom<CreateTaskInput> for NewTaskFields {
    type Error = ManagerError;

    fn try_from(input: CreateTaskInput) -> Result<Self, Self::Error> {
        let CreateTaskInput {
            title,
            description,
            due_date,
            priority,
        } = input;

        let priority = priority
            .map(|raw| raw.parse::<Priority>())
            .transpose()?
            .unwrap_or_default();
        let due_date = due_date
            .map(|raw| DueDate::parse_optional(&raw))
            .transpose()?
            .flatten();
        let title = normalize_title(&title)?;

        Ok(Self {
            title,
            description,
            due_date,
            priority,
        })
    }
}

/// Stateless façade over a [`TaskStore`].
///
/// Every call loads the full collection, works on it in memory and, for
/// mutations, saves the full collection back. Inputs are validated before the
/// store is touched.
pub struct TaskManager<S, C = SystemClock> {
    store: S,
    clock: C,
}

impl<S> TaskManager<S> {
    /// Manager stamping tasks with the system clock.
    pub const fn new(store: S) -> Self {
        Self {
            store,
            clock: SystemClock,
        }
    }
}

impl<S, C> TaskManager<S, C> {
    /// Manager using a custom clock.
    pub const fn with_clock(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    /// Borrow the underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }
}

impl<S, C> TaskManager<S, C>
where
    S: TaskStore,
    C: Clock,
{
    fn store_error(err: S::Error) -> ManagerError {
        ManagerError::Store(err.into())
    }

    fn load(&self) -> Result<Vec<Task>, ManagerError> {
        self.store.load().map_err(Self::store_error)
    }

    fn save(&self, tasks: &[Task]) -> Result<(), ManagerError> {
        self.store.save(tasks).map_err(Self::store_error)
    }

    /// Create a task with the next free id and persist it.
    ///
    /// # Errors
    /// Returns [`ManagerError::InvalidField`] or [`ManagerError::EmptyTitle`]
    /// before touching the store, [`ManagerError::IdsExhausted`] when id
    /// `u64::MAX` is already taken, and [`ManagerError::Store`] on load/save failure.
    pub fn add(&self, input: CreateTaskInput) -> Result<Task, ManagerError> {
        let NewTaskFields {
            title,
            description,
            due_date,
            priority,
        } = NewTaskFields::try_from(input)?;

        let mut tasks = self.load()?;
        let id = TaskId::next_after(tasks.iter().map(|task| task.id))
            .ok_or(ManagerError::IdsExhausted(TaskId(u64::MAX)))?;
        let task = Task::new(id, title, description, due_date, priority, self.clock.now());
        tasks.push(task.clone());
        self.save(&tasks)?;

        info!(id = %task.id, "task created");
        Ok(task)
    }

    /// Tasks passing `status`, in listing order.
    ///
    /// # Errors
    /// Returns [`ManagerError::Store`] when the collection cannot be loaded.
    pub fn list(&self, status: StatusFilter) -> Result<Vec<Task>, ManagerError> {
        let mut tasks = self.load()?;
        tasks.retain(|task| status.matches(task));
        sort_for_listing(&mut tasks);
        debug!(%status, count = tasks.len(), "listed tasks");
        Ok(tasks)
    }

    /// Look up a single task.
    ///
    /// # Errors
    /// Returns [`ManagerError::NotFound`] when no task has `id`.
    pub fn get(&self, id: TaskId) -> Result<Task, ManagerError> {
        self.load()?
            .into_iter()
            .find(|task| task.id == id)
            .ok_or(ManagerError::NotFound(id))
    }

    /// Validate raw update fields and apply them to task `id`.
    ///
    /// # Errors
    /// Returns a validation error before loading, [`ManagerError::NotFound`]
    /// when `id` is unknown, or [`ManagerError::Store`] on load/save failure.
    pub fn update(&self, id: TaskId, input: UpdateTaskInput) -> Result<Task, ManagerError> {
        let patch = TaskPatch::try_from(input)?;
        self.apply_patch(id, patch)
    }

    /// Apply an already-validated patch to task `id`.
    ///
    /// # Errors
    /// Returns [`ManagerError::NotFound`] when `id` is unknown, or
    /// [`ManagerError::Store`] on load/save failure.
    pub fn apply_patch(&self, id: TaskId, patch: TaskPatch) -> Result<Task, ManagerError> {
        let mut tasks = self.load()?;
        let task = tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(ManagerError::NotFound(id))?;
        patch.apply(task, self.clock.now());
        let updated = task.clone();
        self.save(&tasks)?;

        info!(id = %id, "task updated");
        Ok(updated)
    }

    /// Set the completion flag of task `id`.
    ///
    /// # Errors
    /// Same as [`apply_patch`](Self::apply_patch).
    pub fn complete(&self, id: TaskId, completed: bool) -> Result<Task, ManagerError> {
        self.apply_patch(id, TaskPatch::completion(completed))
    }

    /// Remove task `id` and return it.
    ///
    /// # Errors
    /// Returns [`ManagerError::NotFound`] when `id` is unknown, or
    /// [`ManagerError::Store`] on load/save failure.
    pub fn delete(&self, id: TaskId) -> Result<Task, ManagerError> {
        let mut tasks = self.load()?;
        let position = tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or(ManagerError::NotFound(id))?;
        let removed = tasks.remove(position);
        self.save(&tasks)?;

        info!(id = %id, "task deleted");
        Ok(removed)
    }
}
