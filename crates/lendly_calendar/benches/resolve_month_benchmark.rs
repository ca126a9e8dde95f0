use chrono::{Duration, NaiveDate, Weekday};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lendly_calendar::logic::{resolve_status, validate_range, AvailabilityDefinition};
use lendly_calendar::AvailabilityCalendar;
use lendly_common::{Booking, BookingStatus, FixedClock};
use std::sync::Arc;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

// Back-to-back three day bookings with a one day gap, every fourth one cancelled
fn create_bookings(count: usize) -> Vec<Booking> {
    (0..count)
        .map(|i| {
            let start = today() + Duration::days(i as i64 * 4);
            Booking {
                id: format!("b-{i}"),
                item_id: "item".to_string(),
                renter_id: None,
                start_date: start,
                end_date: start + Duration::days(2),
                status: if i % 4 == 0 {
                    BookingStatus::Cancelled
                } else {
                    BookingStatus::Confirmed
                },
                notes: None,
                created_at: None,
            }
        })
        .collect()
}

fn benchmark_resolve_month(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_month");

    for count in [0usize, 10, 100] {
        let bookings = create_bookings(count);
        group.bench_function(format!("month_view_{count}_bookings"), |b| {
            let calendar = AvailabilityCalendar::new(
                "item",
                Some(AvailabilityDefinition::always()),
                bookings.clone(),
                Arc::new(FixedClock::new(today())),
            );
            b.iter(|| black_box(calendar.month_view(black_box(Weekday::Mon))))
        });
    }

    let bookings = create_bookings(100);
    let availability =
        AvailabilityDefinition::specific_dates((0..365).map(|i| today() + Duration::days(i)));
    group.bench_function("single_date_specific_dates", |b| {
        b.iter(|| {
            resolve_status(
                black_box(today() + Duration::days(201)),
                black_box(&availability),
                black_box(&bookings),
                black_box(today()),
            )
        })
    });

    group.bench_function("validate_thirty_day_range", |b| {
        let free = AvailabilityDefinition::always();
        b.iter(|| {
            validate_range(
                black_box(today()),
                black_box(today() + Duration::days(30)),
                black_box(&free),
                black_box(&[] as &[Booking]),
                black_box(today()),
            )
        })
    });

    group.finish();
}

criterion_group!(benches, benchmark_resolve_month);
criterion_main!(benches);
