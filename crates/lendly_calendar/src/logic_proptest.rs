#[cfg(test)]
mod tests {
    use crate::calendar::{AvailabilityCalendar, ClickOutcome};
    use crate::logic::{resolve_status, validate_range, AvailabilityDefinition, DateStatus};
    use crate::multi_selector::MultiDateSelector;
    use crate::range_selector::{RangeSelector, RangeState};
    use chrono::{Duration, NaiveDate};
    use lendly_common::{Booking, BookingStatus, FixedClock};
    use proptest::prelude::*;
    use std::sync::Arc;

    fn base_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn day(offset: i64) -> NaiveDate {
        base_date() + Duration::days(offset)
    }

    fn status_strategy() -> impl Strategy<Value = BookingStatus> {
        prop_oneof![
            Just(BookingStatus::Pending),
            Just(BookingStatus::Confirmed),
            Just(BookingStatus::Cancelled),
            Just(BookingStatus::Rejected),
            Just(BookingStatus::Completed),
        ]
    }

    // Bookings as (start offset, length, status) within roughly two months of the base date
    fn bookings_strategy() -> impl Strategy<Value = Vec<Booking>> {
        prop::collection::vec((0..60i64, 0..5i64, status_strategy()), 0..6).prop_map(|specs| {
            specs
                .into_iter()
                .enumerate()
                .map(|(i, (start, len, status))| Booking {
                    id: format!("b-{i}"),
                    item_id: "item".to_string(),
                    renter_id: None,
                    start_date: day(start),
                    end_date: day(start + len),
                    status,
                    notes: None,
                    created_at: None,
                })
                .collect()
        })
    }

    fn availability_strategy() -> impl Strategy<Value = AvailabilityDefinition> {
        prop_oneof![
            Just(AvailabilityDefinition::always()),
            prop::collection::btree_set(0..60i64, 0..40).prop_map(|offsets| {
                AvailabilityDefinition::specific_dates(offsets.into_iter().map(day))
            }),
        ]
    }

    fn calendar(
        availability: AvailabilityDefinition,
        bookings: Vec<Booking>,
        today: NaiveDate,
    ) -> AvailabilityCalendar {
        AvailabilityCalendar::new(
            "item",
            Some(availability),
            bookings,
            Arc::new(FixedClock::new(today)),
        )
    }

    proptest! {
        // Anything before today is past, whatever the data says
        #[test]
        fn test_past_dates_are_always_past(
            availability in availability_strategy(),
            bookings in bookings_strategy(),
            today_offset in 1..60i64,
            days_before in 1..30i64,
        ) {
            let today = day(today_offset);
            let date = today - Duration::days(days_before);
            prop_assert_eq!(
                resolve_status(date, &availability, &bookings, today),
                DateStatus::Past
            );
        }

        // Cancelled and rejected bookings never make a date booked
        #[test]
        fn test_released_bookings_never_block(
            availability in availability_strategy(),
            bookings in bookings_strategy(),
            offset in 0..70i64,
        ) {
            let released: Vec<Booking> = bookings
                .into_iter()
                .map(|mut b| {
                    if b.status.is_occupying() {
                        b.status = BookingStatus::Cancelled;
                    }
                    b
                })
                .collect();
            prop_assert_ne!(
                resolve_status(day(offset), &availability, &released, base_date()),
                DateStatus::Booked
            );
        }

        // Without bookings the policy alone decides future dates
        #[test]
        fn test_mode_semantics_for_unbooked_dates(
            availability in availability_strategy(),
            offset in 0..70i64,
        ) {
            let date = day(offset);
            let status = resolve_status(date, &availability, &[], base_date());
            let expected = if availability.allows(date) {
                DateStatus::Available
            } else {
                DateStatus::Unavailable
            };
            prop_assert_eq!(status, expected);
        }

        // A range is accepted exactly when each of its dates is available
        #[test]
        fn test_range_accepted_iff_every_date_available(
            availability in availability_strategy(),
            bookings in bookings_strategy(),
            start in 0..60i64,
            len in 1..10i64,
        ) {
            let (a, b) = (day(start), day(start + len));
            let all_available = (0..=len).all(|i| {
                resolve_status(day(start + i), &availability, &bookings, base_date())
                    == DateStatus::Available
            });
            prop_assert_eq!(
                validate_range(a, b, &availability, &bookings, base_date()).is_ok(),
                all_available
            );
        }

        // Rejected second clicks leave the start where it was
        #[test]
        fn test_rejected_range_keeps_start(
            availability in availability_strategy(),
            bookings in bookings_strategy(),
            start in 0..60i64,
            len in 1..10i64,
        ) {
            let mut selector = RangeSelector::new(calendar(availability, bookings, base_date()));
            prop_assume!(selector.click(day(start)) == ClickOutcome::StartSelected(day(start)));

            match selector.click(day(start + len)) {
                ClickOutcome::RangeSelected { start: s, end: e } => {
                    prop_assert_eq!(s, day(start));
                    prop_assert_eq!(e, day(start + len));
                    prop_assert_eq!(selector.state(), RangeState::RangeSelected { start: s, end: e });
                }
                ClickOutcome::RangeRejected { .. } | ClickOutcome::Ignored(_) => {
                    prop_assert_eq!(selector.state(), RangeState::StartSelected { start: day(start) });
                }
                other => prop_assert!(false, "unexpected outcome {:?}", other),
            }
        }

        // Toggling the same date twice restores the selection
        #[test]
        fn test_toggle_twice_is_identity(
            availability in availability_strategy(),
            bookings in bookings_strategy(),
            picks in prop::collection::vec(0..60i64, 0..8),
            toggled in 0..60i64,
        ) {
            let mut selector = MultiDateSelector::new(calendar(availability, bookings, base_date()));
            for offset in picks {
                selector.click(day(offset));
            }
            let before = selector.selected_dates();
            selector.click(day(toggled));
            selector.click(day(toggled));
            prop_assert_eq!(selector.selected_dates(), before);
        }
    }
}
