// --- File: crates/lendly_common/src/lib.rs ---

// Declare modules within this crate
pub mod error; // Error handling
pub mod logging; // Logging utilities
pub mod models; // Shared records
#[cfg(test)]
mod models_test;
pub mod services; // Collaborator abstractions

// Re-export error types and utilities for easier access
pub use error::{
    config_error, conflict, internal_error, not_found, validation_error, Context, LendlyError,
};

// Re-export logging utilities for easier access
pub use logging::{init, init_from_config, init_with_level, log_error, log_result};

pub use models::{Booking, BookingStatus, SessionUser};
pub use services::{BookingStore, BoxFuture, Clock, FixedClock, SessionProvider, SystemClock};
