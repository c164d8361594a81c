//! Persisted entities.
//!
//! Entities are replaced, never edited in place. All instants are epoch
//! milliseconds.

mod mood;
mod session;
mod task;

pub use mood::{Mood, MOOD_MAX, MOOD_MIN, MOOD_NEUTRAL};
pub use session::Session;
pub use task::Task;

use chrono::{Local, TimeZone};

/// Current wall-clock time in epoch milliseconds.
pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// Fresh random identifier.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Whether two instants fall on the same calendar day in local time.
pub fn same_local_day(a_ms: u64, b_ms: u64) -> bool {
    match (local_date(a_ms), local_date(b_ms)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

pub(crate) fn local_date(ms: u64) -> Option<chrono::NaiveDate> {
    let ms = i64::try_from(ms).ok()?;
    Local
        .timestamp_millis_opt(ms)
        .earliest()
        .map(|dt| dt.date_naive())
}
