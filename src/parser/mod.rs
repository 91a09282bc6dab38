/// Schedule text parsers
///
/// `time_parser` reads a single time range out of free text, `days` orders
/// and recognizes day-of-week names.
pub mod days;
pub mod time_parser;

pub use days::{order_days_of_week, split_day_prefix};
pub use time_parser::{parse_time_string, try_parse_time_string};
