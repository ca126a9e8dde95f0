// --- File: crates/lendly_calendar/src/booking.rs ---
//
// Turning a confirmed selection into a stored booking.

use crate::calendar::Selection;
use crate::logic::{validate_range, AvailabilityDefinition, CalendarError};
use crate::range_selector::SelectedRange;
use chrono::NaiveDate;
use lendly_common::{Booking, BookingStatus, BookingStore, Clock, SessionProvider};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// What the booking form submits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub item_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub notes: Option<String>,
}

impl BookingRequest {
    /// Requires both ends of the range to be chosen.
    pub fn from_range(
        item_id: impl Into<String>,
        range: &SelectedRange,
    ) -> Result<Self, CalendarError> {
        match (range.start, range.end) {
            (Some(start_date), Some(end_date)) => Ok(Self {
                item_id: item_id.into(),
                start_date,
                end_date,
                notes: None,
            }),
            _ => Err(CalendarError::EmptySelection),
        }
    }

    /// Spans the earliest to the latest picked date.
    pub fn from_dates(item_id: impl Into<String>, dates: &[NaiveDate]) -> Result<Self, CalendarError> {
        let start_date = dates.iter().min().copied().ok_or(CalendarError::EmptySelection)?;
        let end_date = dates.iter().max().copied().ok_or(CalendarError::EmptySelection)?;
        Ok(Self {
            item_id: item_id.into(),
            start_date,
            end_date,
            notes: None,
        })
    }

    pub fn from_selection(
        item_id: impl Into<String>,
        selection: &Selection,
    ) -> Result<Self, CalendarError> {
        match selection {
            Selection::Range { start, end } => Self::from_range(
                item_id,
                &SelectedRange {
                    start: *start,
                    end: *end,
                },
            ),
            Selection::Dates { dates } => Self::from_dates(item_id, dates),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Submits and cancels bookings on behalf of the signed-in user.
pub struct BookingService<S, P>
where
    S: BookingStore,
    P: SessionProvider,
{
    store: Arc<S>,
    session: Arc<P>,
    clock: Arc<dyn Clock>,
}

impl<S, P> BookingService<S, P>
where
    S: BookingStore,
    P: SessionProvider,
{
    pub fn new(store: Arc<S>, session: Arc<P>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            session,
            clock,
        }
    }

    /// Stores a `pending` booking for the request.
    ///
    /// The selector's snapshot may be stale, so bookings are fetched again and
    /// the whole range is re-checked before anything is written.
    pub async fn submit(
        &self,
        request: BookingRequest,
        availability: &AvailabilityDefinition,
    ) -> Result<Booking, CalendarError> {
        let user = self
            .session
            .current_user()
            .ok_or(CalendarError::NotSignedIn)?;

        let bookings = self
            .store
            .get_bookings(&request.item_id)
            .await
            .map_err(CalendarError::store)?;

        match validate_range(
            request.start_date,
            request.end_date,
            availability,
            &bookings,
            self.clock.today(),
        ) {
            Ok(()) => {}
            Err(CalendarError::InvalidRangeSelection {
                blocked, status, ..
            }) => {
                warn!(
                    "Booking request for {} from {} to {} conflicts on {} ({})",
                    request.item_id, request.start_date, request.end_date, blocked, status
                );
                return Err(CalendarError::Conflict { blocked, status });
            }
            Err(err) => return Err(err),
        }

        let booking = Booking {
            id: format!("booking-{}", uuid::Uuid::new_v4()),
            item_id: request.item_id,
            renter_id: Some(user.id),
            start_date: request.start_date,
            end_date: request.end_date,
            status: BookingStatus::Pending,
            notes: request.notes,
            created_at: Some(self.clock.now()),
        };
        debug!("Creating booking {:?}", booking);

        let stored = self
            .store
            .create_booking(booking)
            .await
            .map_err(CalendarError::store)?;
        info!(
            "Booking {} created for item {} ({} to {})",
            stored.id, stored.item_id, stored.start_date, stored.end_date
        );
        Ok(stored)
    }

    /// Marks a booking cancelled, releasing its dates.
    ///
    /// Only the renter who made it, or an admin, may cancel.
    pub async fn cancel(&self, booking_id: &str) -> Result<Booking, CalendarError> {
        let user = self
            .session
            .current_user()
            .ok_or(CalendarError::NotSignedIn)?;

        let booking = self
            .store
            .get_booking(booking_id)
            .await
            .map_err(CalendarError::store)?
            .ok_or_else(|| CalendarError::BookingNotFound(booking_id.to_string()))?;

        if !user.is_admin && booking.renter_id.as_deref() != Some(user.id.as_str()) {
            return Err(CalendarError::NotPermitted(user.id));
        }

        let updated = self
            .store
            .update_booking_status(booking_id, BookingStatus::Cancelled)
            .await
            .map_err(CalendarError::store)?;
        info!("Booking {} cancelled by {}", booking_id, user.id);
        Ok(updated)
    }
}
