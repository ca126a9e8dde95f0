// --- File: crates/lendly_calendar/src/calendar.rs ---
//
// The read-only availability calendar. Both selectors wrap one of these and
// add selection state on top.

use crate::logic::{
    first_unavailable, resolve_status, validate_range, AvailabilityDefinition, CalendarError,
    DateStatus,
};
use crate::month::{layout_month, DayCell, MonthCursor, MonthView};
use chrono::{NaiveDate, Weekday};
use lendly_common::{Booking, BookingStore, Clock};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// What the user currently has selected, in the shape of the selector that holds it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum Selection {
    Range {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
    Dates { dates: Vec<NaiveDate> },
}

impl Selection {
    /// True when a booking could be requested from this selection:
    /// a range with both ends, or at least one individual date.
    pub fn is_complete(&self) -> bool {
        match self {
            Selection::Range { start, end } => start.is_some() && end.is_some(),
            Selection::Dates { dates } => !dates.is_empty(),
        }
    }

    /// Earliest and latest selected date.
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        match self {
            Selection::Range {
                start: Some(start),
                end: Some(end),
            } => Some((*start, *end)),
            Selection::Range { .. } => None,
            Selection::Dates { dates } => Some((*dates.first()?, *dates.last()?)),
        }
    }
}

/// Notifications delivered to the host's listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEvent {
    /// The selection was mutated by a click or a clear.
    Changed(Selection),
    /// A second click would have spanned a date that is not available.
    RangeRejected {
        start: NaiveDate,
        end: NaiveDate,
        blocked: NaiveDate,
        status: DateStatus,
    },
    /// The booking snapshot was reloaded.
    AvailabilityChanged { item_id: String },
}

/// Result of a single date click, returned to the caller synchronously.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The date was not `Available`; nothing changed.
    Ignored(DateStatus),
    StartSelected(NaiveDate),
    RangeSelected { start: NaiveDate, end: NaiveDate },
    /// The range contained `blocked`; the start is kept.
    RangeRejected {
        start: NaiveDate,
        end: NaiveDate,
        blocked: NaiveDate,
        status: DateStatus,
    },
    /// A selected date was clicked again and removed.
    Deselected(NaiveDate),
    /// Multi-date selection gained a date.
    Added(NaiveDate),
}

impl ClickOutcome {
    pub fn changed_selection(&self) -> bool {
        !matches!(self, ClickOutcome::Ignored(_) | ClickOutcome::RangeRejected { .. })
    }
}

pub type SelectionListener = Box<dyn Fn(&SelectionEvent) + Send + Sync>;

/// Status grid for one item over a booking snapshot.
pub struct AvailabilityCalendar {
    item_id: String,
    availability: AvailabilityDefinition,
    bookings: Vec<Booking>,
    clock: Arc<dyn Clock>,
    displayed: MonthCursor,
    listener: Option<SelectionListener>,
}

impl fmt::Debug for AvailabilityCalendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AvailabilityCalendar")
            .field("item_id", &self.item_id)
            .field("availability", &self.availability)
            .field("bookings", &self.bookings.len())
            .field("displayed", &self.displayed)
            .field("listener", &self.listener.is_some())
            .finish()
    }
}

impl AvailabilityCalendar {
    /// Builds a calendar over an already fetched booking snapshot.
    ///
    /// A missing availability definition means "always available".
    /// The displayed month starts at the month of today.
    pub fn new(
        item_id: impl Into<String>,
        availability: Option<AvailabilityDefinition>,
        bookings: Vec<Booking>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let item_id = item_id.into();
        let availability = AvailabilityDefinition::or_default_for(availability, &item_id);
        let displayed = MonthCursor::of(clock.today());
        Self {
            item_id,
            availability,
            bookings,
            clock,
            displayed,
            listener: None,
        }
    }

    /// Fetches the item's bookings once and builds the calendar over them.
    pub async fn load<S>(
        store: &S,
        item_id: &str,
        availability: Option<AvailabilityDefinition>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, CalendarError>
    where
        S: BookingStore + ?Sized,
    {
        let bookings = store
            .get_bookings(item_id)
            .await
            .map_err(CalendarError::store)?;
        debug!("Loaded {} bookings for item {}", bookings.len(), item_id);
        Ok(Self::new(item_id, availability, bookings, clock))
    }

    /// Replaces the booking snapshot with a fresh one from `store`.
    ///
    /// Selection state held by a wrapping selector is left alone.
    pub async fn reload<S>(&mut self, store: &S) -> Result<(), CalendarError>
    where
        S: BookingStore + ?Sized,
    {
        self.bookings = store
            .get_bookings(&self.item_id)
            .await
            .map_err(CalendarError::store)?;
        debug!(
            "Reloaded {} bookings for item {}",
            self.bookings.len(),
            self.item_id
        );
        self.notify(&SelectionEvent::AvailabilityChanged {
            item_id: self.item_id.clone(),
        });
        Ok(())
    }

    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    pub fn availability(&self) -> &AvailabilityDefinition {
        &self.availability
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn status_of(&self, date: NaiveDate) -> DateStatus {
        resolve_status(date, &self.availability, &self.bookings, self.clock.today())
    }

    pub fn validate_range(&self, start: NaiveDate, end: NaiveDate) -> Result<(), CalendarError> {
        validate_range(
            start,
            end,
            &self.availability,
            &self.bookings,
            self.clock.today(),
        )
    }

    /// The earliest non-`Available` date in `[start, end]`, if any.
    pub fn first_unavailable(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Option<(NaiveDate, DateStatus)> {
        first_unavailable(
            start,
            end,
            &self.availability,
            &self.bookings,
            self.clock.today(),
        )
    }

    // --- Month navigation ---

    pub fn displayed_month(&self) -> MonthCursor {
        self.displayed
    }

    pub fn show_month(&mut self, month: MonthCursor) {
        self.displayed = month;
    }

    pub fn next_month(&mut self) -> MonthCursor {
        self.displayed = self.displayed.next();
        self.displayed
    }

    pub fn previous_month(&mut self) -> MonthCursor {
        self.displayed = self.displayed.prev();
        self.displayed
    }

    /// The displayed month with statuses and nothing selected.
    pub fn month_view(&self, week_start: Weekday) -> MonthView {
        self.month_view_with(week_start, |_| false)
    }

    pub(crate) fn month_view_with<F>(&self, week_start: Weekday, is_selected: F) -> MonthView
    where
        F: Fn(NaiveDate) -> bool,
    {
        let today = self.clock.today();
        layout_month(self.displayed, week_start, |date| DayCell {
            date,
            status: resolve_status(date, &self.availability, &self.bookings, today),
            is_today: date == today,
            selected: is_selected(date),
        })
    }

    // --- Notifications ---

    /// Registers the host callback, replacing any previous one.
    pub fn set_listener<F>(&mut self, listener: F)
    where
        F: Fn(&SelectionEvent) + Send + Sync + 'static,
    {
        self.listener = Some(Box::new(listener));
    }

    pub(crate) fn notify(&self, event: &SelectionEvent) {
        if let Some(listener) = &self.listener {
            listener(event);
        }
    }
}
