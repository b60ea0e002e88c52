//! Storage seam used by [`TaskManager`](crate::manager::TaskManager).

use tasklet_core::{StoreError, Task};
use tasklet_store_json::JsonStore;

/// Minimal storage abstraction: whole-collection load and save.
pub trait TaskStore {
    /// Error type bubbled up from the backing store.
    type Error: Into<StoreError>;

    /// Load every task in stored order. An absent collection is empty.
    ///
    /// # Errors
    /// Returns a store-specific error when the collection cannot be read or decoded.
    fn load(&self) -> Result<Vec<Task>, Self::Error>;

    /// Replace the stored collection with `tasks`, keeping their order.
    ///
    /// # Errors
    /// Returns a store-specific error when persisting fails.
    fn save(&self, tasks: &[Task]) -> Result<(), Self::Error>;
}

impl TaskStore for JsonStore {
    type Error = StoreError;

    fn load(&self) -> Result<Vec<Task>, Self::Error> {
        Self::load(self)
    }

    fn save(&self, tasks: &[Task]) -> Result<(), Self::Error> {
        Self::save(self, tasks)
    }
}

impl<S: TaskStore + ?Sized> TaskStore for &S {
    type Error = S::Error;

    fn load(&self) -> Result<Vec<Task>, Self::Error> {
        (**self).load()
    }

    fn save(&self, tasks: &[Task]) -> Result<(), Self::Error> {
        (**self).save(tasks)
    }
}
