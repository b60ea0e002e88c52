use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};
use time::macros::{date, format_description};
use time::{Date, Duration, OffsetDateTime, PrimitiveDateTime};

use crate::error::ParseError;

/// Calendar date a task is due, written as `YYYY-MM-DD`.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct DueDate(Date);

impl DueDate {
    /// Sort sentinel for tasks without a due date; later than any real deadline.
    pub const FAR_FUTURE: Self = Self(date!(9999 - 12 - 31));

    /// Wrap an existing calendar date.
    #[must_use]
    pub const fn new(date: Date) -> Self {
        Self(date)
    }

    /// Underlying calendar date.
    #[must_use]
    pub const fn date(self) -> Date {
        self.0
    }

    /// Parse user input where an empty (or blank) string means "no due date".
    ///
    /// # Errors
    /// Returns [`ParseError::InvalidDueDate`] when non-blank input is not an exact `YYYY-MM-DD` date.
    pub fn parse_optional(raw: &str) -> Result<Option<Self>, ParseError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        trimmed.parse().map(Some)
    }
}

impl fmt::Display for DueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.0.year(),
            u8::from(self.0.month()),
            self.0.day()
        )
    }
}

impl FromStr for DueDate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Date::parse(s, format_description!("[year]-[month]-[day]"))
            .map(Self)
            .map_err(|_| ParseError::InvalidDueDate(s.to_owned()))
    }
}

impl From<Date> for DueDate {
    fn from(value: Date) -> Self {
        Self(value)
    }
}

impl Serialize for DueDate {
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DueDate {
    fn deserialize<D>(d: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(d)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Deserialize an optional due date, reading `null`, a missing field and `""` as none.
///
/// # Errors
/// Propagates decoder errors and rejects non-empty strings that are not valid dates.
pub fn deserialize_optional_due_date<'de, D>(d: D) -> Result<Option<DueDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(d)?;
    raw.map_or(Ok(None), |text| {
        DueDate::parse_optional(&text).map_err(serde::de::Error::custom)
    })
}

/// UTC wall-clock instant with second precision, written as `YYYY-MM-DDTHH:MM:SS`.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Timestamp(PrimitiveDateTime);

impl Timestamp {
    /// Current UTC time truncated to whole seconds.
    #[must_use]
    pub fn now() -> Self {
        Self::from_utc(OffsetDateTime::now_utc())
    }

    /// Convert an offset-aware instant to UTC and drop sub-second precision.
    #[must_use]
    pub fn from_utc(instant: OffsetDateTime) -> Self {
        let utc = instant.to_offset(time::UtcOffset::UTC);
        let time = utc.time();
        let whole_seconds = time.replace_nanosecond(0).unwrap_or(time);
        Self(PrimitiveDateTime::new(utc.date(), whole_seconds))
    }

    /// Wrap a naive date-time that is already expressed in UTC.
    #[must_use]
    pub const fn new(value: PrimitiveDateTime) -> Self {
        Self(value)
    }

    /// Underlying date-time value.
    #[must_use]
    pub const fn value(self) -> PrimitiveDateTime {
        self.0
    }

    /// The following whole second.
    #[must_use]
    pub const fn next_second(self) -> Self {
        Self(self.0.saturating_add(Duration::SECOND))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
            self.0.year(),
            u8::from(self.0.month()),
            self.0.day(),
            self.0.hour(),
            self.0.minute(),
            self.0.second()
        )
    }
}

impl FromStr for Timestamp {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PrimitiveDateTime::parse(
            s,
            format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
        )
        .map(Self)
        .map_err(|_| ParseError::InvalidTimestamp(s.to_owned()))
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(d: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(d)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
