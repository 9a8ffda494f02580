//! Display formatting for times and seat lists

use chrono::{DateTime, FixedOffset, Offset, Utc};

/// Formats UTC instants in a fixed display offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeDisplay {
    offset: FixedOffset,
}

impl TimeDisplay {
    /// Display in `offset`
    #[must_use]
    pub const fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Display in UTC
    #[must_use]
    pub fn utc() -> Self {
        Self::new(Utc.fix())
    }

    /// `Mon, 6 Jan, 06:30 PM`
    #[must_use]
    pub fn short(&self, at: DateTime<Utc>) -> String {
        at.with_timezone(&self.offset)
            .format("%a, %-d %b, %I:%M %p")
            .to_string()
    }

    /// `Monday, 6 January 2025, 06:30 PM`
    #[must_use]
    pub fn long(&self, at: DateTime<Utc>) -> String {
        at.with_timezone(&self.offset)
            .format("%A, %-d %B %Y, %I:%M %p")
            .to_string()
    }
}

/// Ascending, comma separated; `N/A` when empty
#[must_use]
pub fn seat_list(seats: &[u32]) -> String {
    if seats.is_empty() {
        return "N/A".to_string();
    }
    let mut sorted = seats.to_vec();
    sorted.sort_unstable();
    sorted
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
