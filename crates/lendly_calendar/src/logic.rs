// --- File: crates/lendly_calendar/src/logic.rs ---
use chrono::NaiveDate;
use lendly_common::{Booking, LendlyError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use tracing::warn;

// --- Error Handling ---
use thiserror::Error;
#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Range {start} to {end} is not selectable: {blocked} is {status}")]
    InvalidRangeSelection {
        start: NaiveDate,
        end: NaiveDate,
        blocked: NaiveDate,
        status: DateStatus,
    },
    #[error("Range end {end} is before start {start}")]
    ReversedRange { start: NaiveDate, end: NaiveDate },
    #[error("Nothing is selected")]
    EmptySelection,
    #[error("Booking conflict: {blocked} is {status}")]
    Conflict {
        blocked: NaiveDate,
        status: DateStatus,
    },
    #[error("No user is signed in")]
    NotSignedIn,
    #[error("User {0} may not change this booking")]
    NotPermitted(String),
    #[error("Booking not found: {0}")]
    BookingNotFound(String),
    #[error("Booking store error: {0}")]
    Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl CalendarError {
    pub(crate) fn store<E: std::error::Error + Send + Sync + 'static>(err: E) -> Self {
        CalendarError::Store(Box::new(err))
    }
}

impl From<CalendarError> for LendlyError {
    fn from(err: CalendarError) -> Self {
        match err {
            CalendarError::InvalidDate(_) => LendlyError::ParseError(err.to_string()),
            CalendarError::InvalidRangeSelection { .. }
            | CalendarError::ReversedRange { .. }
            | CalendarError::EmptySelection => LendlyError::ValidationError(err.to_string()),
            CalendarError::Conflict { .. } => LendlyError::ConflictError(err.to_string()),
            CalendarError::NotSignedIn | CalendarError::NotPermitted(_) => {
                LendlyError::AuthError(err.to_string())
            }
            CalendarError::BookingNotFound(_) => LendlyError::NotFoundError(err.to_string()),
            CalendarError::Store(_) => LendlyError::StorageError(err.to_string()),
        }
    }
}

// --- Data Structures ---

/// How an item's rentable dates are defined, before bookings are considered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AvailabilityMode {
    /// Every date from today on.
    #[default]
    Always,
    /// Only the dates listed in `specific_dates`.
    SpecificDates,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityDefinition {
    #[serde(default)]
    pub mode: AvailabilityMode,
    /// Ignored unless `mode` is `SpecificDates`.
    #[serde(default)]
    pub specific_dates: BTreeSet<NaiveDate>,
}

impl AvailabilityDefinition {
    pub fn always() -> Self {
        Self::default()
    }

    pub fn specific_dates<I: IntoIterator<Item = NaiveDate>>(dates: I) -> Self {
        Self {
            mode: AvailabilityMode::SpecificDates,
            specific_dates: dates.into_iter().collect(),
        }
    }

    /// Falls back to `Always` with no dates when an item has no definition.
    pub fn or_default_for(definition: Option<Self>, item_id: &str) -> Self {
        definition.unwrap_or_else(|| {
            warn!(
                "Item {} has no availability definition, treating it as always available",
                item_id
            );
            Self::default()
        })
    }

    /// Whether the policy alone allows `date`, ignoring bookings and the past.
    pub fn allows(&self, date: NaiveDate) -> bool {
        match self.mode {
            AvailabilityMode::Always => true,
            AvailabilityMode::SpecificDates => self.specific_dates.contains(&date),
        }
    }
}

/// Classification of one calendar date for one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateStatus {
    Past,
    Booked,
    Available,
    Unavailable,
}

impl DateStatus {
    pub fn is_available(self) -> bool {
        self == DateStatus::Available
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DateStatus::Past => "past",
            DateStatus::Booked => "booked",
            DateStatus::Available => "available",
            DateStatus::Unavailable => "unavailable",
        }
    }
}

impl fmt::Display for DateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// --- Status Resolution ---

/// Classifies `date` for an item.
///
/// Rules in priority order: before `today` is `Past`, covered by an occupying
/// booking is `Booked`, otherwise the availability policy decides between
/// `Available` and `Unavailable`.
pub fn resolve_status(
    date: NaiveDate,
    availability: &AvailabilityDefinition,
    bookings: &[Booking],
    today: NaiveDate,
) -> DateStatus {
    if date < today {
        return DateStatus::Past;
    }
    if is_booked(date, bookings) {
        return DateStatus::Booked;
    }
    if availability.allows(date) {
        DateStatus::Available
    } else {
        DateStatus::Unavailable
    }
}

/// True if any booking that is not cancelled or rejected covers `date`.
pub fn is_booked(date: NaiveDate, bookings: &[Booking]) -> bool {
    bookings.iter().any(|booking| booking.occupies(date))
}

/// Bookings that still block their dates.
pub fn occupying_bookings(bookings: &[Booking]) -> impl Iterator<Item = &Booking> {
    bookings.iter().filter(|b| b.status.is_occupying())
}

/// Checks that every date of the inclusive range `[start, end]` is `Available`.
///
/// The first offending date is reported.
pub fn validate_range(
    start: NaiveDate,
    end: NaiveDate,
    availability: &AvailabilityDefinition,
    bookings: &[Booking],
    today: NaiveDate,
) -> Result<(), CalendarError> {
    if end < start {
        return Err(CalendarError::ReversedRange { start, end });
    }
    match first_unavailable(start, end, availability, bookings, today) {
        Some((blocked, status)) => Err(CalendarError::InvalidRangeSelection {
            start,
            end,
            blocked,
            status,
        }),
        None => Ok(()),
    }
}

/// The earliest date in `[start, end]` that is not `Available`, with its status.
pub fn first_unavailable(
    start: NaiveDate,
    end: NaiveDate,
    availability: &AvailabilityDefinition,
    bookings: &[Booking],
    today: NaiveDate,
) -> Option<(NaiveDate, DateStatus)> {
    dates_between(start, end)
        .map(|date| (date, resolve_status(date, availability, bookings, today)))
        .find(|(_, status)| !status.is_available())
}

/// Every date from `start` through `end`, both included.
pub fn dates_between(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |date| *date <= end)
}

/// Parses an ISO `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> Result<NaiveDate, CalendarError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| CalendarError::InvalidDate(value.to_string()))
}

