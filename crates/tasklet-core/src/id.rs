use serde::{Deserialize, Serialize};
use std::{fmt, num::ParseIntError, str::FromStr};

/// Identifier of a task, unique within one collection.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub u64);

impl TaskId {
    /// The identifier handed to the first task of an empty collection.
    pub const FIRST: Self = Self(1);

    /// Next identifier after the given ones: `max + 1`, or [`TaskId::FIRST`] when empty.
    ///
    /// The value is recomputed from whatever is passed in, so deleting the
    /// highest id before the next add makes that id available again. Returns
    /// `None` once `u64::MAX` is taken.
    #[must_use]
    pub fn next_after<I>(existing: I) -> Option<Self>
    where
        I: IntoIterator<Item = Self>,
    {
        existing
            .into_iter()
            .max()
            .map_or(Some(Self::FIRST), |Self(max)| max.checked_add(1).map(Self))
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for TaskId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

impl From<u64> for TaskId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}
