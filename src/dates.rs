//! Date handling for release dates and the "fetched at" footer.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use chrono_tz::{America::New_York, Tz};
use std::fmt::Display;

use crate::error::FormatError;

/// Zone the footer timestamp is rendered in.
pub const FOOTER_TIME_ZONE: Tz = New_York;

/// Reformat a TMDB `YYYY-MM-DD` date as e.g. "March 05, 2024".
pub fn format_release_date(raw: &str) -> Result<String, FormatError> {
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| FormatError {
        input: raw.to_owned(),
    })?;
    Ok(date.format("%B %d, %Y").to_string())
}

pub fn ordinal_suffix(day: u32) -> &'static str {
    if (11..=13).contains(&day) {
        return "th";
    }
    match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

/// e.g. "Tuesday, March 5th, 2024 at 02:07:09 PM EST"
pub fn format_fetched_at<Z>(moment: &DateTime<Z>) -> String
where
    Z: TimeZone,
    Z::Offset: Display,
{
    let day = moment.day();
    let pattern = format!(
        "%A, %B {}{}, %Y at %I:%M:%S %p %Z",
        day,
        ordinal_suffix(day)
    );
    moment.format(&pattern).to_string()
}

pub fn fetched_at_now() -> String {
    format_fetched_at(&Utc::now().with_timezone(&FOOTER_TIME_ZONE))
}
