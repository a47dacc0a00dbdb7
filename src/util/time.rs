//! Time formatting utilities.

use chrono::Local;

/// Format the current local time as a backup suffix (`YYYYMMDD-HHMMSS`).
#[must_use]
pub fn backup_timestamp() -> String {
    Local::now().format("%Y%m%d-%H%M%S").to_string()
}

/// Format the current local time for snippet headers (`YYYY-MM-DD HH:MM:SS`).
#[must_use]
pub fn header_timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Format the current local date (`YYYY-MM-DD`) for the rc marker line.
#[must_use]
pub fn marker_date() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}
