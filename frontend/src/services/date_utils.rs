use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};

/// Weekday names indexed by days from Sunday
const WEEKDAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Short weekday name for a date (e.g., "Sat")
pub fn weekday_name(date: NaiveDate) -> &'static str {
    WEEKDAY_NAMES[date.weekday().num_days_from_sunday() as usize]
}

/// Format a time of day as a 24-hour label (e.g., "09:30")
pub fn format_time_of_day(time: NaiveTime) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

/// Format a date as a column header (e.g., "Sat 01")
pub fn format_date_header(date: NaiveDate) -> String {
    format!("{} {:02}", weekday_name(date), date.day())
}
