//! Clock widget formatting. Display only; nothing else reads the clock.

use chrono::{Datelike, NaiveDate, NaiveTime};

/// `h:MM AM` / `h:MM PM`, with midnight and noon shown as 12.
pub fn format_time(time: &NaiveTime) -> String {
    time.format("%-I:%M %p").to_string()
}

/// `<Month> <day> <DAY>`, e.g. `March 5 TUE`.
pub fn format_date(date: &NaiveDate) -> String {
    let weekday = date.weekday().to_string().to_uppercase();
    format!("{} {}", date.format("%B %-d"), weekday)
}
