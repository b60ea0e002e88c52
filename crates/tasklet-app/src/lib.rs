//! Application layer for tasklet.
//!
//! This crate owns the business rules (validation, id assignment, timestamps,
//! listing policy) and the configuration used to locate the task file. Frontends
//! talk to [`TaskManager`] only.

pub mod config;
pub mod error;
pub mod manager;
pub mod task_patch;
pub mod task_store;

// Re-exports for convenience
pub use config::{AppConfig, DB_ENV_VAR, StorageConfig, resolve_storage_path};
pub use error::{ErrorKind, ManagerError};
pub use manager::{CreateTaskInput, TaskManager};
pub use task_patch::{FieldPatch, TaskPatch, UpdateTaskInput};
pub use task_store::TaskStore;
