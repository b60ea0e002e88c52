use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::date::{DueDate, Timestamp, deserialize_optional_due_date};
use crate::id::TaskId;
use crate::priority::Priority;

/// A single to-do record as stored on disk.
///
/// Missing optional fields in older files fall back to their defaults on load;
/// `id` and `title` are required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Identifier assigned at creation.
    pub id: TaskId,
    /// Non-empty title.
    pub title: String,
    /// Free-form notes.
    #[serde(default)]
    pub description: String,
    /// Optional deadline.
    #[serde(default, deserialize_with = "deserialize_optional_due_date")]
    pub due_date: Option<DueDate>,
    /// Priority level.
    #[serde(default)]
    pub priority: Priority,
    /// Completion flag.
    #[serde(default)]
    pub completed: bool,
    /// When the task was created.
    #[serde(default = "Timestamp::now")]
    pub created_at: Timestamp,
    /// When the task was last mutated.
    #[serde(default = "Timestamp::now")]
    pub updated_at: Timestamp,
}

impl Task {
    /// Build a fresh, incomplete task stamped with `now`.
    #[must_use]
    pub const fn new(
        id: TaskId,
        title: String,
        description: String,
        due_date: Option<DueDate>,
        priority: Priority,
        now: Timestamp,
    ) -> Self {
        Self {
            id,
            title,
            description,
            due_date,
            priority,
            completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Refresh the modification timestamp.
    ///
    /// `updated_at` always moves forward: a reading that does not pass the
    /// previous stamp (same second, or a clock step backwards) bumps it by one
    /// second instead.
    pub fn touch(&mut self, now: Timestamp) {
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at.next_second()
        };
    }

    /// Due date used for ordering; undated tasks sort after every dated one.
    #[must_use]
    pub fn effective_due_date(&self) -> DueDate {
        self.due_date.unwrap_or(DueDate::FAR_FUTURE)
    }
}

/// Listing order: open tasks first, then by due date (undated last), then by id.
#[must_use]
pub fn listing_order(a: &Task, b: &Task) -> Ordering {
    a.completed
        .cmp(&b.completed)
        .then_with(|| a.effective_due_date().cmp(&b.effective_due_date()))
        .then_with(|| a.id.cmp(&b.id))
}

/// Sort tasks in place using [`listing_order`].
pub fn sort_for_listing(tasks: &mut [Task]) {
    tasks.sort_by(listing_order);
}
