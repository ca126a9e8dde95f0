//! Collaborator abstractions.
//!
//! The calendar logic never reaches for the wall clock, the session or the
//! record store directly. It is handed implementations of these traits, which
//! keeps status resolution deterministic and lets tests swap in fixed values.

use crate::models::{Booking, BookingStatus, SessionUser};
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use std::future::Future;
use std::pin::Pin;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Access to persisted bookings.
pub trait BookingStore: Send + Sync {
    /// Error type returned by store operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// All bookings recorded for an item, in any order and of any status.
    fn get_bookings(&self, item_id: &str) -> BoxFuture<'_, Vec<Booking>, Self::Error>;

    /// A single booking by id.
    fn get_booking(&self, booking_id: &str) -> BoxFuture<'_, Option<Booking>, Self::Error>;

    /// Persist a new booking and return it as stored.
    fn create_booking(&self, booking: Booking) -> BoxFuture<'_, Booking, Self::Error>;

    /// Change the status of an existing booking.
    fn update_booking_status(
        &self,
        booking_id: &str,
        status: BookingStatus,
    ) -> BoxFuture<'_, Booking, Self::Error>;
}

/// Source of "now" and "today".
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// The current calendar date. Time of day is irrelevant to callers.
    fn today(&self) -> NaiveDate;
}

/// Wall clock whose "today" is the local date in a configured zone.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    tz: Tz,
}

impl SystemClock {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new(Tz::UTC)
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.tz).date_naive()
    }
}

/// A clock frozen on one date, at midnight UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    today: NaiveDate,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.today.and_time(chrono::NaiveTime::MIN).and_utc()
    }

    fn today(&self) -> NaiveDate {
        self.today
    }
}

/// Who is signed in, if anyone.
pub trait SessionProvider: Send + Sync {
    fn current_user(&self) -> Option<SessionUser>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Pacific::Kiritimati;

    #[test]
    fn test_fixed_clock_is_midnight() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let clock = FixedClock::new(day);
        assert_eq!(clock.today(), day);
        assert_eq!(clock.now().to_rfc3339(), "2024-06-01T00:00:00+00:00");
    }

    #[test]
    fn test_system_clock_uses_its_zone() {
        // UTC+14 is never behind UTC.
        let utc_today = SystemClock::default().today();
        let far_east_today = SystemClock::new(Kiritimati).today();
        assert!(far_east_today >= utc_today);
    }
}
