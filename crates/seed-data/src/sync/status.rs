//! Booking status derived from the stay dates.

use serde::{Deserialize, Serialize};
use time::Date;

use hotel::BookingStatus;

/// How overlapping status rules are combined.
///
/// The rules are checked in a fixed order: checked-out (ended before today),
/// unconfirmed (starts today or later), checked-in (started before today and
/// ends today or later). For `start <= end` at most one rule holds, so both
/// policies agree; they differ only on inverted ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusPolicy {
    /// A later matching rule replaces an earlier one.
    #[default]
    LastMatchWins,
    /// The first matching rule is kept.
    FirstMatchWins,
}

/// Derives the status of a stay relative to `today`. `None` if no rule matches.
pub fn derive_status(
    start: Date,
    end: Date,
    today: Date,
    policy: StatusPolicy,
) -> Option<BookingStatus> {
    let rules = [
        (end < today, BookingStatus::CheckedOut),
        (start >= today, BookingStatus::Unconfirmed),
        (end >= today && start < today, BookingStatus::CheckedIn),
    ];
    let mut matching = rules
        .into_iter()
        .filter(|(matched, _)| *matched)
        .map(|(_, status)| status);
    match policy {
        StatusPolicy::LastMatchWins => matching.last(),
        StatusPolicy::FirstMatchWins => matching.next(),
    }
}
