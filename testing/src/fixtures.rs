//! Ready-made entities for tests

use cinema_api::{Booking, BookingId, BookingStatus, ExtendedBooking, Movie, MovieId, Show, ShowId};
use chrono::{DateTime, Utc};

/// Monday 6 January 2025, 18:30 UTC
#[must_use]
pub fn show_time() -> DateTime<Utc> {
    DateTime::from_timestamp(1_736_188_200, 0).unwrap_or_default()
}

/// "Inception", 148 minutes
#[must_use]
pub fn movie(id: u64) -> Movie {
    Movie {
        id: MovieId(id),
        title: "Inception".to_string(),
        description: "A thief who steals corporate secrets through dream-sharing technology."
            .to_string(),
        duration_minutes: 148,
    }
}

/// A show of [`movie`] on "Screen 1" with every seat available
#[must_use]
pub fn show(id: u64, total_seats: u32) -> Show {
    let movie = movie(1);
    Show {
        id: ShowId(id),
        movie_id: movie.id,
        screen_name: "Screen 1".to_string(),
        start_time: show_time(),
        total_seats,
        movie_title: Some(movie.title),
        description: Some(movie.description),
        duration_minutes: Some(movie.duration_minutes),
        booked_seats: Some(0),
        available_seats: Some(total_seats),
    }
}

/// A show with no seats left
#[must_use]
pub fn sold_out_show(id: u64, total_seats: u32) -> Show {
    Show {
        booked_seats: Some(total_seats),
        available_seats: Some(0),
        ..show(id, total_seats)
    }
}

/// A confirmed booking of `seats` for a show from [`show`]
#[must_use]
pub fn booking(id: u64, show_id: u64, seats: &[u32]) -> ExtendedBooking {
    ExtendedBooking {
        booking: Booking {
            id: BookingId(id),
            show_id: ShowId(show_id),
            user_email: "a@b.co".to_string(),
            seats_booked: u32::try_from(seats.len()).unwrap_or(u32::MAX),
            seat_numbers: seats.to_vec(),
            status: BookingStatus::Confirmed,
            created_at: Some(show_time()),
        },
        movie_title: "Inception".to_string(),
        screen_name: "Screen 1".to_string(),
        start_time: show_time(),
    }
}
