//! Picking any set of individual dates.

use crate::calendar::{AvailabilityCalendar, ClickOutcome, Selection, SelectionEvent};
use crate::logic::{parse_date, AvailabilityDefinition, CalendarError};
use crate::month::{MonthCursor, MonthView};
use chrono::{NaiveDate, Weekday};
use lendly_common::{BookingStore, Clock};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::debug;

/// Multi-date picker. Selected dates need not be contiguous.
#[derive(Debug)]
pub struct MultiDateSelector {
    calendar: AvailabilityCalendar,
    dates: BTreeSet<NaiveDate>,
}

impl MultiDateSelector {
    pub fn new(calendar: AvailabilityCalendar) -> Self {
        Self {
            calendar,
            dates: BTreeSet::new(),
        }
    }

    /// Fetches the item's bookings once and starts with nothing selected.
    pub async fn load<S>(
        store: &S,
        item_id: &str,
        availability: Option<AvailabilityDefinition>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, CalendarError>
    where
        S: BookingStore + ?Sized,
    {
        let calendar = AvailabilityCalendar::load(store, item_id, availability, clock).await?;
        Ok(Self::new(calendar))
    }

    pub fn calendar(&self) -> &AvailabilityCalendar {
        &self.calendar
    }

    pub fn calendar_mut(&mut self) -> &mut AvailabilityCalendar {
        &mut self.calendar
    }

    /// Selected dates in chronological order.
    pub fn selected_dates(&self) -> Vec<NaiveDate> {
        self.dates.iter().copied().collect()
    }

    pub fn selection(&self) -> Selection {
        Selection::Dates {
            dates: self.selected_dates(),
        }
    }

    pub fn is_selected(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn earliest(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    pub fn latest(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    /// Earliest and latest selected date. Dates in between need not be selected.
    pub fn summary_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.earliest()?, self.latest()?))
    }

    /// Toggles `date` if it is `Available`; otherwise does nothing.
    ///
    /// A picked date that became booked or past after a reload stays picked
    /// until [`clear`](Self::clear).
    pub fn click(&mut self, date: NaiveDate) -> ClickOutcome {
        let status = self.calendar.status_of(date);
        if !status.is_available() {
            debug!("Ignoring click on {} ({})", date, status);
            return ClickOutcome::Ignored(status);
        }

        let outcome = if self.dates.remove(&date) {
            ClickOutcome::Deselected(date)
        } else {
            self.dates.insert(date);
            ClickOutcome::Added(date)
        };
        debug!("Multi-date selection now has {} dates", self.dates.len());
        self.calendar
            .notify(&SelectionEvent::Changed(self.selection()));
        outcome
    }

    /// Like [`click`](Self::click) for an ISO `YYYY-MM-DD` string.
    pub fn click_str(&mut self, date: &str) -> Result<ClickOutcome, CalendarError> {
        Ok(self.click(parse_date(date)?))
    }

    pub fn clear(&mut self) {
        self.dates.clear();
        self.calendar
            .notify(&SelectionEvent::Changed(self.selection()));
    }

    // --- Month navigation, never touches the selection ---

    pub fn displayed_month(&self) -> MonthCursor {
        self.calendar.displayed_month()
    }

    pub fn next_month(&mut self) -> MonthCursor {
        self.calendar.next_month()
    }

    pub fn previous_month(&mut self) -> MonthCursor {
        self.calendar.previous_month()
    }

    pub fn month_view(&self, week_start: Weekday) -> MonthView {
        self.calendar
            .month_view_with(week_start, |date| self.dates.contains(&date))
    }
}
