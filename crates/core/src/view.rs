//! Pure derivations over the loaded queue.
//!
//! Nothing here performs I/O or reads the clock; callers pass `now` in so the results are
//! deterministic.

use crate::model::{QueueEntry, QueueStatus, UnknownValue};
use chrono::{DateTime, Local, Utc};
use frontdesk_types::QueueNumber;
use std::str::FromStr;

/// Status filter applied to the displayed queue.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Status(QueueStatus),
}

impl StatusFilter {
    pub fn matches(self, status: QueueStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Status(wanted) => wanted == status,
        }
    }
}

impl std::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusFilter::All => f.write_str("All"),
            StatusFilter::Status(status) => write!(f, "{status}"),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        s.parse::<QueueStatus>()
            .map(StatusFilter::Status)
            .map_err(|_| UnknownValue::new("filter", s))
    }
}

impl From<QueueStatus> for StatusFilter {
    fn from(status: QueueStatus) -> Self {
        StatusFilter::Status(status)
    }
}

/// Entries passing both the status filter and the search, in their original order.
///
/// Search is a case-insensitive substring match against the patient name, the status wire
/// string and the assigned doctor's name. A query that is blank after trimming matches
/// every entry; any other query is matched as typed, surrounding spaces included.
pub fn compute_visible_entries<'a>(
    entries: &'a [QueueEntry],
    filter: StatusFilter,
    search: &str,
) -> Vec<&'a QueueEntry> {
    let blank = search.trim().is_empty();
    let needle = search.to_lowercase();
    entries
        .iter()
        .filter(|entry| filter.matches(entry.status))
        .filter(|entry| blank || matches_search(entry, &needle))
        .collect()
}

fn matches_search(entry: &QueueEntry, needle: &str) -> bool {
    entry.patient_name.to_lowercase().contains(needle)
        || entry.status.as_str().contains(needle)
        || entry
            .doctor
            .as_ref()
            .is_some_and(|d| d.name.to_lowercase().contains(needle))
}

/// Suggested number for a new entry: one past the highest in the queue, or 1 when empty.
pub fn compute_next_queue_number(entries: &[QueueEntry]) -> QueueNumber {
    match entries.iter().map(|e| e.queue_number).max() {
        Some(max) => QueueNumber::new(max).map_or(QueueNumber::FIRST, QueueNumber::next),
        None => QueueNumber::FIRST,
    }
}

/// Whole minutes waited since `created_at`, rounded to nearest and clamped at zero.
pub fn compute_wait_estimate(created_at: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    let elapsed_ms = (now - created_at).num_milliseconds();
    if elapsed_ms <= 0 {
        return 0;
    }
    (elapsed_ms as f64 / 60_000.0).round() as u64
}

/// Arrival time as local `HH:MM`.
pub fn format_arrival_time(created_at: DateTime<Utc>) -> String {
    created_at.with_timezone(&Local).format("%H:%M").to_string()
}

pub fn format_wait(minutes: u64) -> String {
    format!("{minutes} min")
}
