#[cfg(test)]
mod tests {
    use crate::calendar::{AvailabilityCalendar, ClickOutcome, Selection, SelectionEvent};
    use crate::logic::{parse_date, AvailabilityDefinition, CalendarError, DateStatus};
    use crate::month::MonthCursor;
    use crate::range_selector::{RangeSelector, RangeState, SelectedRange};
    use chrono::{NaiveDate, Weekday};
    use lendly_common::{Booking, BookingStatus, FixedClock};
    use std::sync::{Arc, Mutex};

    fn date(s: &str) -> NaiveDate {
        parse_date(s).expect("valid test date")
    }

    fn booked(start: &str, end: &str) -> Booking {
        Booking {
            id: format!("b-{start}"),
            item_id: "camera".to_string(),
            renter_id: None,
            start_date: date(start),
            end_date: date(end),
            status: BookingStatus::Confirmed,
            notes: None,
            created_at: None,
        }
    }

    fn selector(bookings: Vec<Booking>) -> RangeSelector {
        RangeSelector::new(AvailabilityCalendar::new(
            "camera",
            Some(AvailabilityDefinition::always()),
            bookings,
            Arc::new(FixedClock::new(date("2024-07-01"))),
        ))
    }

    #[test]
    fn test_starts_empty() {
        let selector = selector(vec![]);
        assert_eq!(selector.state(), RangeState::Empty);
        assert_eq!(selector.selected_dates(), SelectedRange::default());
    }

    #[test]
    fn test_two_clicks_select_range() {
        let mut selector = selector(vec![]);
        assert_eq!(
            selector.click(date("2024-07-04")),
            ClickOutcome::StartSelected(date("2024-07-04"))
        );
        assert_eq!(
            selector.click(date("2024-07-10")),
            ClickOutcome::RangeSelected {
                start: date("2024-07-04"),
                end: date("2024-07-10")
            }
        );
        let range = selector.selected_dates();
        assert!(range.is_complete());
        assert_eq!(range.day_count(), Some(7));
    }

    #[test]
    fn test_scenario_range_over_booked_date_is_rejected() {
        let mut selector = selector(vec![booked("2024-07-06", "2024-07-06")]);
        selector.click(date("2024-07-04"));

        let outcome = selector.click(date("2024-07-10"));
        assert!(!outcome.changed_selection());
        assert_eq!(
            outcome,
            ClickOutcome::RangeRejected {
                start: date("2024-07-04"),
                end: date("2024-07-10"),
                blocked: date("2024-07-06"),
                status: DateStatus::Booked,
            }
        );
        assert_eq!(
            selector.state(),
            RangeState::StartSelected {
                start: date("2024-07-04")
            }
        );

        // Recoverable: a shorter range still works.
        assert!(matches!(
            selector.click(date("2024-07-05")),
            ClickOutcome::RangeSelected { .. }
        ));
    }

    #[test]
    fn test_clicking_start_again_deselects() {
        let mut selector = selector(vec![]);
        selector.click(date("2024-07-04"));
        assert_eq!(
            selector.click(date("2024-07-04")),
            ClickOutcome::Deselected(date("2024-07-04"))
        );
        assert_eq!(selector.state(), RangeState::Empty);
    }

    #[test]
    fn test_earlier_click_moves_start() {
        let mut selector = selector(vec![]);
        selector.click(date("2024-07-10"));
        selector.click(date("2024-07-04"));
        assert_eq!(
            selector.state(),
            RangeState::StartSelected {
                start: date("2024-07-04")
            }
        );
    }

    #[test]
    fn test_click_after_complete_range_starts_over() {
        let mut selector = selector(vec![]);
        selector.click(date("2024-07-04"));
        selector.click(date("2024-07-08"));
        selector.click(date("2024-07-20"));
        assert_eq!(
            selector.state(),
            RangeState::StartSelected {
                start: date("2024-07-20")
            }
        );
    }

    #[test]
    fn test_unavailable_clicks_are_ignored() {
        let mut selector = selector(vec![booked("2024-07-06", "2024-07-07")]);
        assert_eq!(
            selector.click(date("2024-06-30")),
            ClickOutcome::Ignored(DateStatus::Past)
        );
        assert_eq!(
            selector.click(date("2024-07-06")),
            ClickOutcome::Ignored(DateStatus::Booked)
        );
        assert_eq!(selector.state(), RangeState::Empty);

        selector.click(date("2024-07-04"));
        assert_eq!(
            selector.click(date("2024-07-07")),
            ClickOutcome::Ignored(DateStatus::Booked)
        );
        assert_eq!(
            selector.state(),
            RangeState::StartSelected {
                start: date("2024-07-04")
            }
        );
    }

    #[test]
    fn test_navigation_keeps_selection() {
        let mut selector = selector(vec![]);
        selector.click(date("2024-07-04"));
        selector.click(date("2024-07-06"));
        let before = selector.state();

        assert_eq!(selector.displayed_month(), MonthCursor::new(2024, 7).unwrap());
        for _ in 0..30 {
            selector.next_month();
        }
        for _ in 0..50 {
            selector.previous_month();
        }
        assert_eq!(selector.displayed_month(), MonthCursor::new(2022, 11).unwrap());
        assert_eq!(selector.state(), before);
    }

    #[test]
    fn test_listener_sees_changes_and_rejections() {
        let events: Arc<Mutex<Vec<SelectionEvent>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();

        let mut selector = selector(vec![booked("2024-07-06", "2024-07-06")]);
        selector
            .calendar_mut()
            .set_listener(move |event| sink.lock().unwrap().push(event.clone()));

        selector.click(date("2024-06-01")); // past, ignored silently
        selector.click(date("2024-07-04"));
        selector.click(date("2024-07-10"));
        selector.click(date("2024-07-05"));

        let events = events.lock().unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(
            events[0],
            SelectionEvent::Changed(Selection::Range {
                start: Some(date("2024-07-04")),
                end: None
            })
        );
        assert!(matches!(events[1], SelectionEvent::RangeRejected { .. }));
        match &events[2] {
            SelectionEvent::Changed(selection) => assert!(selection.is_complete()),
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_month_view_marks_range() {
        let mut selector = selector(vec![]);
        selector.click(date("2024-07-04"));
        selector.click(date("2024-07-06"));

        let view = selector.month_view(Weekday::Mon);
        let selected: Vec<NaiveDate> = view
            .days()
            .filter(|cell| cell.selected)
            .map(|cell| cell.date)
            .collect();
        assert_eq!(
            selected,
            vec![date("2024-07-04"), date("2024-07-05"), date("2024-07-06")]
        );
    }

    #[test]
    fn test_click_str_rejects_malformed_dates() {
        let mut selector = selector(vec![]);
        assert!(matches!(
            selector.click_str("2024-7-4x"),
            Err(CalendarError::InvalidDate(_))
        ));
        assert_eq!(
            selector.click_str("2024-07-04").unwrap(),
            ClickOutcome::StartSelected(date("2024-07-04"))
        );
    }

    #[test]
    fn test_clear() {
        let mut selector = selector(vec![]);
        selector.click(date("2024-07-04"));
        selector.click(date("2024-07-06"));
        selector.clear();
        assert_eq!(selector.state(), RangeState::Empty);
    }
}
