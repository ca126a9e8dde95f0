// File: services/lendly_console/src/main.rs
//
// Usage: lendly-console <item-id> [YYYY-MM]
//
// Reads the record store configured under [storage] and prints the item's
// month grid. Without a month the current one is shown.

use chrono::{Datelike, Weekday};
use lendly_calendar::logic::occupying_bookings;
use lendly_calendar::{AvailabilityCalendar, DateStatus, LocalRecordStore, MonthCursor, MonthView};
use lendly_common::{config_error, logging, validation_error, LendlyError, SystemClock};
use lendly_config::load_config;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            logging::log_error(&err, "lendly-console failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), LendlyError> {
    let config = load_config().map_err(config_error)?;
    logging::init_from_config(&config.logging);

    let mut args = std::env::args().skip(1).filter(|a| !a.starts_with(".env"));
    let item_id = args
        .next()
        .ok_or_else(|| validation_error("usage: lendly-console <item-id> [YYYY-MM]"))?;
    let month = args
        .next()
        .map(|raw| raw.parse::<MonthCursor>())
        .transpose()
        .map_err(LendlyError::from)?;

    let store = match &config.storage.path {
        Some(path) => LocalRecordStore::open(path).map_err(|e| LendlyError::StorageError(e.to_string()))?,
        None => {
            warn!("No [storage] path configured, using an empty in-memory store");
            LocalRecordStore::in_memory()
        }
    };

    let availability = store
        .load_availability(&item_id)
        .map_err(|e| LendlyError::StorageError(e.to_string()))?;
    let clock = Arc::new(SystemClock::new(config.calendar.tz()?));
    let mut calendar = AvailabilityCalendar::load(&store, &item_id, availability, clock).await?;
    if let Some(month) = month {
        calendar.show_month(month);
    }
    info!("Rendering {} for item {}", calendar.displayed_month(), item_id);

    let view = calendar.month_view(config.calendar.week_start()?);
    println!("{}", render_month(&item_id, &view));

    let displayed = calendar.displayed_month();
    for booking in occupying_bookings(calendar.bookings()).filter(|b| {
        MonthCursor::of(b.start_date) <= displayed && displayed <= MonthCursor::of(b.end_date)
    }) {
        println!(
            "  {} {} to {} ({})",
            booking.id, booking.start_date, booking.end_date, booking.status
        );
    }
    Ok(())
}

fn glyph(status: DateStatus) -> char {
    match status {
        DateStatus::Available => ' ',
        DateStatus::Booked => 'x',
        DateStatus::Unavailable => '-',
        DateStatus::Past => '.',
    }
}

fn weekday_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Mo",
        Weekday::Tue => "Tu",
        Weekday::Wed => "We",
        Weekday::Thu => "Th",
        Weekday::Fri => "Fr",
        Weekday::Sat => "Sa",
        Weekday::Sun => "Su",
    }
}

fn render_month(item_id: &str, view: &MonthView) -> String {
    let mut out = format!("{} {}\n", item_id, view.month);
    let header: Vec<String> = view
        .weekdays()
        .iter()
        .map(|d| format!(" {} ", weekday_label(*d)))
        .collect();
    out.push_str(header.join(" ").trim_end());
    out.push('\n');

    for week in &view.weeks {
        let row: Vec<String> = week
            .iter()
            .map(|cell| match cell {
                Some(cell) => {
                    let today = if cell.is_today { '>' } else { ' ' };
                    format!("{}{:>2}{}", today, cell.date.day(), glyph(cell.status))
                }
                None => "    ".to_string(),
            })
            .collect();
        out.push_str(row.join(" ").trim_end());
        out.push('\n');
    }
    out.push_str("legend: x booked, - unavailable, . past, > today");
    out
}
