//! Client routes

use cinema_api::{BookingId, ShowId};
use std::fmt;

/// A page address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `/`
    Listing,
    /// `/booking/:showId`
    Booking {
        /// Show being booked
        show_id: ShowId,
    },
    /// `/booking-success/:bookingId`
    BookingSuccess {
        /// Booking to confirm
        booking_id: BookingId,
    },
    /// `/admin`
    Admin,
    /// `/404`, also reached from any unknown path
    NotFound,
}

impl Route {
    /// Resolve a path; anything unrecognised (including non-numeric ids) is [`Route::NotFound`]
    #[must_use]
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Self::Listing,
            ["booking", id] => id
                .parse()
                .map_or(Self::NotFound, |show_id| Self::Booking { show_id }),
            ["booking-success", id] => id
                .parse()
                .map_or(Self::NotFound, |booking_id| Self::BookingSuccess { booking_id }),
            ["admin"] => Self::Admin,
            _ => Self::NotFound,
        }
    }

    /// Canonical path of this route
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Listing => "/".to_string(),
            Self::Booking { show_id } => format!("/booking/{show_id}"),
            Self::BookingSuccess { booking_id } => format!("/booking-success/{booking_id}"),
            Self::Admin => "/admin".to_string(),
            Self::NotFound => "/404".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_paths() {
        assert_eq!(Route::parse("/"), Route::Listing);
        assert_eq!(Route::parse(""), Route::Listing);
        assert_eq!(Route::parse("/booking/12"), Route::Booking { show_id: ShowId(12) });
        assert_eq!(
            Route::parse("/booking-success/7/"),
            Route::BookingSuccess { booking_id: BookingId(7) }
        );
        assert_eq!(Route::parse("/admin?tab=show"), Route::Admin);
        assert_eq!(Route::parse("/404"), Route::NotFound);
    }

    #[test]
    fn everything_else_is_not_found() {
        assert_eq!(Route::parse("/booking/abc"), Route::NotFound);
        assert_eq!(Route::parse("/booking"), Route::NotFound);
        assert_eq!(Route::parse("/shows/1"), Route::NotFound);
        assert_eq!(Route::parse("/admin/movies"), Route::NotFound);
    }

    #[test]
    fn paths_round_trip() {
        for route in [
            Route::Listing,
            Route::Booking { show_id: ShowId(3) },
            Route::BookingSuccess { booking_id: BookingId(9) },
            Route::Admin,
            Route::NotFound,
        ] {
            assert_eq!(Route::parse(&route.path()), route);
        }
    }
}
