//! # Cinema API
//!
//! Typed client for the cinema booking service.
//!
//! The client is a pass-through: no retries, no caching. Every response is
//! normalized once at this boundary (string-encoded numbers coerced, the
//! nested booking-creation body unwrapped), so the rest of the workspace only
//! ever sees the types in [`types`].
//!
//! ```ignore
//! use cinema_api::{ApiConfig, CinemaApi, HttpCinemaApi};
//!
//! let api = HttpCinemaApi::new(&ApiConfig::default())?;
//! let shows = api.list_shows().await?;
//! ```

pub mod client;
pub mod error;
pub mod types;
mod wire;

pub use client::{ApiConfig, ApiFuture, CinemaApi, HttpCinemaApi};
pub use error::ApiError;
pub use types::{
    Booking, BookingId, BookingRequest, BookingStatus, ExtendedBooking, MAX_TOTAL_SEATS, Movie,
    MovieId, NewMovie, NewShow, Show, ShowId,
};
