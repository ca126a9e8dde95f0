// --- File: crates/lendly_calendar/src/lib.rs ---
// Declare modules within this crate
pub mod booking;
pub mod calendar;
pub mod logic;
#[cfg(test)]
mod logic_proptest;
pub mod month;
pub mod multi_selector;
pub mod range_selector;
#[cfg(test)]
mod range_selector_test;
pub mod store;

pub use booking::{BookingRequest, BookingService};
pub use calendar::{AvailabilityCalendar, ClickOutcome, Selection, SelectionEvent};
pub use logic::{
    resolve_status, validate_range, AvailabilityDefinition, AvailabilityMode, CalendarError,
    DateStatus,
};
pub use month::{DayCell, MonthCursor, MonthView};
pub use multi_selector::MultiDateSelector;
pub use range_selector::{RangeSelector, RangeState, SelectedRange};
pub use store::{LocalRecordStore, StoreError};
