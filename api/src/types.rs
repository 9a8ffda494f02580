//! Normalized entities returned by [`CinemaApi`](crate::CinemaApi)
//!
//! Numbers here are always numbers and times are always UTC instants,
//! whatever shape the service sent them in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            /// Raw numeric value
            #[must_use]
            pub const fn value(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }
    };
}

id_type!(
    /// Identifier of a [`Show`]
    ShowId
);
id_type!(
    /// Identifier of a [`Movie`]
    MovieId
);
id_type!(
    /// Identifier of a [`Booking`]
    BookingId
);

/// A movie in the catalogue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movie {
    /// Movie identifier
    pub id: MovieId,
    /// Title
    pub title: String,
    /// Free-text description
    pub description: String,
    /// Running time in minutes
    pub duration_minutes: u32,
}

/// Largest auditorium a show may report; bigger counts are treated as malformed
pub const MAX_TOTAL_SEATS: u32 = 10_000;

/// A screening of a movie
///
/// The optional fields are derived by the service when listing or fetching
/// shows for display; they are absent on the body returned by `create_show`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Show {
    /// Show identifier
    pub id: ShowId,
    /// Movie being screened
    pub movie_id: MovieId,
    /// Screen (auditorium) name
    pub screen_name: String,
    /// Start of the screening
    pub start_time: DateTime<Utc>,
    /// Seats in the auditorium; seats are numbered `1..=total_seats`
    pub total_seats: u32,
    /// Title of the movie
    pub movie_title: Option<String>,
    /// Description of the movie
    pub description: Option<String>,
    /// Running time of the movie
    pub duration_minutes: Option<u32>,
    /// Seats already booked
    pub booked_seats: Option<u32>,
    /// Seats still available
    pub available_seats: Option<u32>,
}

/// Booking status, owned by the service
///
/// Unknown values are kept verbatim so they can be displayed as returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingStatus {
    /// Awaiting admission
    Pending,
    /// Seats are held for the customer
    Confirmed,
    /// Admission failed
    Failed,
    /// Cancelled after confirmation
    Cancelled,
    /// A status this client does not know about
    Other(String),
}

impl BookingStatus {
    /// Wire form of the status
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Failed => "FAILED",
            Self::Cancelled => "CANCELLED",
            Self::Other(other) => other,
        }
    }
}

impl From<&str> for BookingStatus {
    fn from(value: &str) -> Self {
        match value {
            "PENDING" => Self::Pending,
            "CONFIRMED" => Self::Confirmed,
            "FAILED" => Self::Failed,
            "CANCELLED" => Self::Cancelled,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A booking as stored by the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    /// Booking identifier
    pub id: BookingId,
    /// Show the seats belong to
    pub show_id: ShowId,
    /// Customer email
    pub user_email: String,
    /// Number of seats booked
    pub seats_booked: u32,
    /// Seat numbers in the order the service returned them
    pub seat_numbers: Vec<u32>,
    /// Current status
    pub status: BookingStatus,
    /// Creation time, when reported
    pub created_at: Option<DateTime<Utc>>,
}

/// A booking joined with its show and movie, as returned by `GET /bookings/:id`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtendedBooking {
    /// The booking itself
    pub booking: Booking,
    /// Title of the booked movie
    pub movie_title: String,
    /// Screen of the booked show
    pub screen_name: String,
    /// Start of the booked show
    pub start_time: DateTime<Utc>,
}

/// Body of `POST /shows/:id/book`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingRequest {
    /// Customer email
    pub user_email: String,
    /// Seats to book, ascending
    pub seat_numbers: Vec<u32>,
}

/// Body of `POST /admin/movies`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewMovie {
    /// Title
    pub title: String,
    /// Free-text description
    pub description: String,
    /// Running time in minutes
    pub duration_minutes: u32,
}

/// Body of `POST /admin/shows`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewShow {
    /// Movie to screen
    pub movie_id: MovieId,
    /// Screen name
    pub screen_name: String,
    /// Start time exactly as entered (`YYYY-MM-DDTHH:MM` or RFC 3339)
    pub start_time: String,
    /// Seats in the auditorium
    pub total_seats: u32,
}
