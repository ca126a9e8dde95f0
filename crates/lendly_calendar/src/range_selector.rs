//! Start/end date picking with two clicks.

use crate::calendar::{AvailabilityCalendar, ClickOutcome, Selection, SelectionEvent};
use crate::logic::{parse_date, AvailabilityDefinition, CalendarError};
use crate::month::{MonthCursor, MonthView};
use chrono::{NaiveDate, Weekday};
use lendly_common::{BookingStore, Clock};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RangeState {
    #[default]
    Empty,
    StartSelected { start: NaiveDate },
    RangeSelected { start: NaiveDate, end: NaiveDate },
}

/// The `{ start, end }` pair handed to a booking form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl SelectedRange {
    pub fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// Number of calendar days covered, both ends included.
    pub fn day_count(&self) -> Option<i64> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some((end - start).num_days() + 1),
            _ => None,
        }
    }
}

impl From<RangeState> for SelectedRange {
    fn from(state: RangeState) -> Self {
        match state {
            RangeState::Empty => SelectedRange::default(),
            RangeState::StartSelected { start } => SelectedRange {
                start: Some(start),
                end: None,
            },
            RangeState::RangeSelected { start, end } => SelectedRange {
                start: Some(start),
                end: Some(end),
            },
        }
    }
}

/// Rental date picker selecting one contiguous range.
#[derive(Debug)]
pub struct RangeSelector {
    calendar: AvailabilityCalendar,
    state: RangeState,
}

impl RangeSelector {
    pub fn new(calendar: AvailabilityCalendar) -> Self {
        Self {
            calendar,
            state: RangeState::Empty,
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

    pub fn state(&self) -> RangeState {
        self.state
    }

    pub fn selected_dates(&self) -> SelectedRange {
        self.state.into()
    }

    pub fn selection(&self) -> Selection {
        let range = self.selected_dates();
        Selection::Range {
            start: range.start,
            end: range.end,
        }
    }

    /// Applies a click on `date`.
    ///
    /// Only `Available` dates do anything. Clicking the start again deselects it
    /// rather than making a one-day range.
    pub fn click(&mut self, date: NaiveDate) -> ClickOutcome {
        let status = self.calendar.status_of(date);
        if !status.is_available() {
            debug!("Ignoring click on {} ({})", date, status);
            return ClickOutcome::Ignored(status);
        }

        let (next, outcome) = match self.state {
            RangeState::Empty | RangeState::RangeSelected { .. } => (
                RangeState::StartSelected { start: date },
                ClickOutcome::StartSelected(date),
            ),
            RangeState::StartSelected { start } if date == start => {
                (RangeState::Empty, ClickOutcome::Deselected(date))
            }
            RangeState::StartSelected { start } if date < start => (
                RangeState::StartSelected { start: date },
                ClickOutcome::StartSelected(date),
            ),
            RangeState::StartSelected { start } => {
                if let Some((blocked, status)) = self.calendar.first_unavailable(start, date) {
                    warn!(
                        "Rejected range {} to {}: {} is {}",
                        start, date, blocked, status
                    );
                    self.calendar.notify(&SelectionEvent::RangeRejected {
                        start,
                        end: date,
                        blocked,
                        status,
                    });
                    return ClickOutcome::RangeRejected {
                        start,
                        end: date,
                        blocked,
                        status,
                    };
                }
                (
                    RangeState::RangeSelected { start, end: date },
                    ClickOutcome::RangeSelected { start, end: date },
                )
            }
        };

        debug!("Range selection {:?} -> {:?}", self.state, next);
        self.state = next;
        self.calendar
            .notify(&SelectionEvent::Changed(self.selection()));
        outcome
    }

    /// Like [`click`](Self::click) for an ISO `YYYY-MM-DD` string.
    pub fn click_str(&mut self, date: &str) -> Result<ClickOutcome, CalendarError> {
        Ok(self.click(parse_date(date)?))
    }

    /// Drops any selection.
    pub fn clear(&mut self) {
        self.state = RangeState::Empty;
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

    /// Displayed month with the start, or the whole range, marked selected.
    pub fn month_view(&self, week_start: Weekday) -> MonthView {
        let range = self.selected_dates();
        self.calendar.month_view_with(week_start, |date| match (range.start, range.end) {
            (Some(start), Some(end)) => start <= date && date <= end,
            (Some(start), None) => date == start,
            _ => false,
        })
    }
}
