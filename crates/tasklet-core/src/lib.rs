//! Domain types for tasklet: the task record, its closed value sets, and the
//! listing order shared by every frontend.

/// Wall-clock abstraction used for timestamp bookkeeping.
pub mod clock;
/// Calendar dates and timestamps in their canonical text forms.
pub mod date;
/// Error types shared across crates.
pub mod error;
/// Identifier types.
pub mod id;
/// Task priority levels.
pub mod priority;
/// Completion-state filters for listings.
pub mod status;
/// The task record and its listing order.
pub mod task;

pub use clock::{Clock, SystemClock};
pub use date::{DueDate, Timestamp};
pub use error::{ParseError, StoreError};
pub use id::TaskId;
pub use priority::Priority;
pub use status::StatusFilter;
pub use task::{Task, listing_order, sort_for_listing};
