//! Formats post dates for display.

use chrono::NaiveDate;

/// The only date layout posts are expected to use.
const ISO_DATE: &str = "%Y-%m-%d";

/// The display layout, e.g. `Feb 20, 2026`.
const DISPLAY_DATE: &str = "%b %-d, %Y";

/// Converts an ISO `YYYY-MM-DD` date into `Mon D, YYYY`. Values that don't
/// parse (including the empty string) are returned unchanged.
pub fn format_date(date: &str) -> String {
    match NaiveDate::parse_from_str(date, ISO_DATE) {
        Ok(parsed) => parsed.format(DISPLAY_DATE).to_string(),
        Err(_) => date.to_owned(),
    }
}
