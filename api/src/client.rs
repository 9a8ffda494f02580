//! HTTP client for the cinema booking service

use crate::error::ApiError;
use crate::types::{
    Booking, BookingId, BookingRequest, ExtendedBooking, Movie, NewMovie, NewShow, Show, ShowId,
};
use crate::wire::{CreatedBooking, RawBookedSeats, RawBooking, RawExtendedBooking, RawMovie, RawShow};
use reqwest::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeSet;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// Boxed future returned by every [`CinemaApi`] operation
pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ApiError>> + Send + 'a>>;

/// Operations offered by the booking service
///
/// Page reducers only talk to this trait, so tests substitute a mock.
pub trait CinemaApi: Send + Sync {
    /// `GET /shows`
    fn list_shows(&self) -> ApiFuture<'_, Vec<Show>>;

    /// `GET /shows/:id`
    fn get_show(&self, show_id: ShowId) -> ApiFuture<'_, Show>;

    /// `GET /shows/:id/booked-seats`
    fn get_booked_seats(&self, show_id: ShowId) -> ApiFuture<'_, BTreeSet<u32>>;

    /// `POST /shows/:id/book`
    ///
    /// The service nests the created booking under `booking`; the returned
    /// value is the plain booking either way.
    fn create_booking(&self, show_id: ShowId, request: BookingRequest) -> ApiFuture<'_, Booking>;

    /// `GET /bookings/:id`
    fn get_booking(&self, booking_id: BookingId) -> ApiFuture<'_, ExtendedBooking>;

    /// `GET /bookings/show/:showId`
    fn list_bookings_for_show(&self, show_id: ShowId) -> ApiFuture<'_, Vec<Booking>>;

    /// `GET /admin/movies`
    fn list_movies(&self) -> ApiFuture<'_, Vec<Movie>>;

    /// `POST /admin/movies`
    fn create_movie(&self, movie: NewMovie) -> ApiFuture<'_, Movie>;

    /// `POST /admin/shows`
    fn create_show(&self, show: NewShow) -> ApiFuture<'_, Show>;
}

/// Connection settings for [`HttpCinemaApi`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL of the service, without trailing slash
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// [`CinemaApi`] over HTTP with JSON bodies
#[derive(Clone)]
pub struct HttpCinemaApi {
    client: Client,
    base_url: String,
}

impl HttpCinemaApi {
    /// Build a client for `config.base_url`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the TLS backend cannot be initialised.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL requests are sent to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get<W: DeserializeOwned>(&self, path: &str) -> Result<W, ApiError> {
        tracing::debug!(path, "GET");
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        decode(path, response).await
    }

    async fn post<B, W>(&self, path: &str, body: &B) -> Result<W, ApiError>
    where
        B: Serialize + Sync + ?Sized,
        W: DeserializeOwned,
    {
        tracing::debug!(path, "POST");
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        decode(path, response).await
    }
}

impl std::fmt::Debug for HttpCinemaApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpCinemaApi")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

async fn decode<W: DeserializeOwned>(path: &str, response: Response) -> Result<W, ApiError> {
    let status = response.status();
    let body = response
        .bytes()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;

    if !status.is_success() {
        let err = ApiError::from_status(status.as_u16(), &String::from_utf8_lossy(&body));
        tracing::warn!(path, status = status.as_u16(), error = %err, "Request failed");
        return Err(err);
    }

    serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!(path, error = %e, "Undecodable response body");
        ApiError::InvalidResponse(e.to_string())
    })
}

fn normalize_all<R, T>(raw: Vec<R>) -> Result<Vec<T>, ApiError>
where
    T: TryFrom<R, Error = ApiError>,
{
    raw.into_iter().map(T::try_from).collect()
}

impl CinemaApi for HttpCinemaApi {
    fn list_shows(&self) -> ApiFuture<'_, Vec<Show>> {
        Box::pin(async move { normalize_all(self.get::<Vec<RawShow>>("/shows").await?) })
    }

    fn get_show(&self, show_id: ShowId) -> ApiFuture<'_, Show> {
        Box::pin(async move {
            let raw: RawShow = self.get(&format!("/shows/{show_id}")).await?;
            Show::try_from(raw)
        })
    }

    fn get_booked_seats(&self, show_id: ShowId) -> ApiFuture<'_, BTreeSet<u32>> {
        Box::pin(async move {
            let raw: RawBookedSeats = self.get(&format!("/shows/{show_id}/booked-seats")).await?;
            Ok(raw.into_seats()?.into_iter().collect())
        })
    }

    fn create_booking(&self, show_id: ShowId, request: BookingRequest) -> ApiFuture<'_, Booking> {
        Box::pin(async move {
            let created: CreatedBooking =
                self.post(&format!("/shows/{show_id}/book"), &request).await?;
            let booking = Booking::try_from(created)?;
            tracing::info!(%show_id, booking_id = %booking.id, "Booking created");
            Ok(booking)
        })
    }

    fn get_booking(&self, booking_id: BookingId) -> ApiFuture<'_, ExtendedBooking> {
        Box::pin(async move {
            let raw: RawExtendedBooking = self.get(&format!("/bookings/{booking_id}")).await?;
            ExtendedBooking::try_from(raw)
        })
    }

    fn list_bookings_for_show(&self, show_id: ShowId) -> ApiFuture<'_, Vec<Booking>> {
        Box::pin(async move {
            normalize_all(
                self.get::<Vec<RawBooking>>(&format!("/bookings/show/{show_id}"))
                    .await?,
            )
        })
    }

    fn list_movies(&self) -> ApiFuture<'_, Vec<Movie>> {
        Box::pin(async move { normalize_all(self.get::<Vec<RawMovie>>("/admin/movies").await?) })
    }

    fn create_movie(&self, movie: NewMovie) -> ApiFuture<'_, Movie> {
        Box::pin(async move {
            let raw: RawMovie = self.post("/admin/movies", &movie).await?;
            Movie::try_from(raw)
        })
    }

    fn create_show(&self, show: NewShow) -> ApiFuture<'_, Show> {
        Box::pin(async move {
            let raw: RawShow = self.post("/admin/shows", &show).await?;
            Show::try_from(raw)
        })
    }
}
