//! Calendar date normalization
//!
//! Workouts are filed under a calendar day, stored and compared as a
//! `YYYY-MM-DD` string. Two rules keep that day from drifting:
//!
//! - Going from a point in time to a date string, use the *local* calendar
//!   components of the value. Converting to UTC first moves late-evening
//!   times in negative offsets (and early-morning times in positive ones)
//!   onto the neighbouring day.
//! - Going from a date string back to a point in time, anchor it at noon
//!   local time. Any later conversion through UTC then stays within the
//!   same calendar day for offsets from -11:00 to +12:00. Offsets beyond
//!   that (-12:00, +13:00, +14:00) cross the date line at noon, so the day
//!   must always be read back from local components.

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Length of a canonical `YYYY-MM-DD` string
const CANONICAL_LEN: usize = 10;

/// Error produced when a date string cannot be accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    #[error("Invalid date format, expected YYYY-MM-DD")]
    InvalidFormat,

    #[error("Date does not exist in the calendar")]
    NotACalendarDate,
}

/// A calendar date that renders as `YYYY-MM-DD`
///
/// Stored in SQLite as TEXT in exactly that form, so equality in SQL is plain
/// string equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, sqlx::Type)]
#[sqlx(transparent)]
pub struct CanonicalDate(NaiveDate);

impl CanonicalDate {
    /// Parse a canonical date string
    ///
    /// The string must match `^\d{4}-\d{2}-\d{2}$` and name a real day.
    /// Nothing is coerced: `2024-3-5`, `03/15/2024` and `2024-03-15T00:00`
    /// are all rejected.
    pub fn parse(input: &str) -> Result<Self, DateError> {
        let bytes = input.as_bytes();
        if bytes.len() != CANONICAL_LEN {
            return Err(DateError::InvalidFormat);
        }

        let shape_ok = bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
        if !shape_ok {
            return Err(DateError::InvalidFormat);
        }

        // Shape is checked, so these slices are all ASCII digits
        let year: i32 = input[0..4].parse().map_err(|_| DateError::InvalidFormat)?;
        let month: u32 = input[5..7].parse().map_err(|_| DateError::InvalidFormat)?;
        let day: u32 = input[8..10].parse().map_err(|_| DateError::InvalidFormat)?;

        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or(DateError::NotACalendarDate)
    }

    /// Build a date from its components, limited to four-digit years
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        if !(0..=9999).contains(&year) {
            return None;
        }
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// The calendar day a local point in time falls on
    ///
    /// Reads the components in the value's own timezone and never through
    /// its UTC instant.
    pub fn from_local<Tz: TimeZone>(moment: &DateTime<Tz>) -> Self {
        Self(moment.date_naive())
    }

    /// Reconstruct a point in time for this date, at noon in `tz`
    pub fn to_local_noon<Tz: TimeZone>(&self, tz: &Tz) -> DateTime<Tz> {
        let noon = self.0.and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default());
        match tz.from_local_datetime(&noon).earliest() {
            Some(moment) => moment,
            // Noon sits in a DST gap; read it as UTC noon instead
            None => tz.from_utc_datetime(&noon),
        }
    }

    /// Today's date in `tz`
    pub fn today<Tz: TimeZone>(tz: &Tz) -> Self {
        Self::from_local(&Utc::now().with_timezone(tz))
    }

    /// Parse an optional external date, substituting today's date in `tz`
    /// when it is absent or not canonical
    pub fn parse_or_today<Tz: TimeZone>(raw: Option<&str>, tz: &Tz) -> Self {
        match raw.map(Self::parse) {
            Some(Ok(date)) => date,
            Some(Err(e)) => {
                tracing::debug!("Ignoring date parameter {:?}: {}", raw, e);
                Self::today(tz)
            }
            None => Self::today(tz),
        }
    }

    /// The day before, saturating at the earliest representable date
    pub fn previous_day(&self) -> Self {
        Self(self.0.checked_sub_days(Days::new(1)).unwrap_or(self.0))
    }

    /// The day after, saturating at the latest representable date
    pub fn next_day(&self) -> Self {
        Self(self.0.checked_add_days(Days::new(1)).unwrap_or(self.0))
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }
}

/// Canonical string for a local point in time
///
/// Entry point for callers holding a `DateTime` rather than a string, such as
/// clients building the `date` field from a local clock.
pub fn to_canonical_string<Tz: TimeZone>(moment: &DateTime<Tz>) -> String {
    CanonicalDate::from_local(moment).to_string()
}

/// Noon-anchored local point in time for a canonical string
///
/// Inverse of [`to_canonical_string`]. Callers rendering a stored date in a
/// user's timezone should use this rather than midnight or UTC parsing.
pub fn from_canonical_string<Tz: TimeZone>(input: &str, tz: &Tz) -> Result<DateTime<Tz>, DateError> {
    CanonicalDate::parse(input).map(|date| date.to_local_noon(tz))
}

impl fmt::Display for CanonicalDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.0.year(),
            self.0.month(),
            self.0.day()
        )
    }
}

impl std::str::FromStr for CanonicalDate {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for CanonicalDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CanonicalDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(de::Error::custom)
    }
}
