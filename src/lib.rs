pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod slots;
pub mod status;
pub mod validation;

/// Log to stderr with local timestamps. `RUST_LOG` overrides the `info`
/// default, so stdout stays clean for JSON output.
pub fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            use chrono::Local;
            use std::io::Write;
            writeln!(
                buf,
                "{} [{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .target(env_logger::Target::Stderr)
        .init();
}

// Re-export commonly used types
pub use config::Config;
pub use error::NormalizeError;
pub use models::{Meridiem, ParseResult, TimeOfDay, TimeRange, TimeSlot, TimeSlotRecord};
pub use parser::{order_days_of_week, parse_time_string};
pub use pipeline::{
    normalize_batch, normalize_extraction, revalidate_statuses, InstructorRecord, RawExtraction,
};
pub use slots::{convert_to_time_slots, convert_to_time_slots_with, SlotDefaults};
pub use status::{
    determine_result_status, ApiStatus, HoursFields, HoursText, ResultStatus, UiStatus,
};
