//! Commit timestamps: an opaque `<epoch-seconds> <+/-HHMM>` token,
//! produced once per commit and otherwise treated as an unparsed string.

use chrono::Local;

/// The current local time formatted as `<epoch-seconds> <+/-HHMM>`.
pub fn now() -> String {
    let now = Local::now();
    format!("{} {}", now.timestamp(), now.format("%z"))
}
