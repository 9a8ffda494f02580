//! In-memory [`CinemaApi`] for tests
//!
//! Holds shows, movies, occupancy and bookings; records every call; can be
//! told to fail an endpoint or to answer it after a delay (measured on the
//! tokio clock, so paused-time tests stay instant).

use cinema_api::{
    ApiError, ApiFuture, Booking, BookingId, BookingRequest, BookingStatus, CinemaApi,
    ExtendedBooking, Movie, MovieId, NewMovie, NewShow, Show, ShowId,
};
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// One endpoint of the booking service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `GET /shows`
    ListShows,
    /// `GET /shows/:id`
    GetShow,
    /// `GET /shows/:id/booked-seats`
    GetBookedSeats,
    /// `POST /shows/:id/book`
    CreateBooking,
    /// `GET /bookings/:id`
    GetBooking,
    /// `GET /bookings/show/:showId`
    ListBookingsForShow,
    /// `GET /admin/movies`
    ListMovies,
    /// `POST /admin/movies`
    CreateMovie,
    /// `POST /admin/shows`
    CreateShow,
}

/// A recorded call with its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    /// `list_shows()`
    ListShows,
    /// `get_show(id)`
    GetShow(ShowId),
    /// `get_booked_seats(id)`
    GetBookedSeats(ShowId),
    /// `create_booking(id, request)`
    CreateBooking(ShowId, BookingRequest),
    /// `get_booking(id)`
    GetBooking(BookingId),
    /// `list_bookings_for_show(id)`
    ListBookingsForShow(ShowId),
    /// `list_movies()`
    ListMovies,
    /// `create_movie(movie)`
    CreateMovie(NewMovie),
    /// `create_show(show)`
    CreateShow(NewShow),
}

impl ApiCall {
    /// Endpoint this call hits
    #[must_use]
    pub const fn endpoint(&self) -> Endpoint {
        match self {
            Self::ListShows => Endpoint::ListShows,
            Self::GetShow(_) => Endpoint::GetShow,
            Self::GetBookedSeats(_) => Endpoint::GetBookedSeats,
            Self::CreateBooking(..) => Endpoint::CreateBooking,
            Self::GetBooking(_) => Endpoint::GetBooking,
            Self::ListBookingsForShow(_) => Endpoint::ListBookingsForShow,
            Self::ListMovies => Endpoint::ListMovies,
            Self::CreateMovie(_) => Endpoint::CreateMovie,
            Self::CreateShow(_) => Endpoint::CreateShow,
        }
    }
}

#[derive(Default)]
struct Inner {
    shows: Vec<Show>,
    movies: Vec<Movie>,
    occupied: HashMap<ShowId, BTreeSet<u32>>,
    bookings: Vec<ExtendedBooking>,
    failures: HashMap<Endpoint, ApiError>,
    latency: HashMap<Endpoint, Duration>,
    calls: Vec<ApiCall>,
    next_id: u64,
}

impl Inner {
    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn show(&self, show_id: ShowId) -> Result<&Show, ApiError> {
        self.shows
            .iter()
            .find(|show| show.id == show_id)
            .ok_or_else(|| not_found("Show not found"))
    }

    fn book(&mut self, show_id: ShowId, request: BookingRequest) -> Result<Booking, ApiError> {
        let show = self.show(show_id)?.clone();
        let occupied = self.occupied.entry(show_id).or_default();

        if request.seat_numbers.is_empty() {
            return Err(ApiError::Rejected {
                status: 400,
                message: Some("No seats selected".to_string()),
            });
        }
        if request
            .seat_numbers
            .iter()
            .any(|seat| *seat == 0 || *seat > show.total_seats || occupied.contains(seat))
        {
            return Err(ApiError::Rejected {
                status: 409,
                message: Some("Seat already booked".to_string()),
            });
        }
        occupied.extend(request.seat_numbers.iter().copied());

        let id = BookingId(self.allocate_id());
        let booking = Booking {
            id,
            show_id,
            user_email: request.user_email,
            seats_booked: u32::try_from(request.seat_numbers.len()).unwrap_or(u32::MAX),
            seat_numbers: request.seat_numbers,
            status: BookingStatus::Confirmed,
            created_at: None,
        };
        self.bookings.push(ExtendedBooking {
            booking: booking.clone(),
            movie_title: show.movie_title.clone().unwrap_or_default(),
            screen_name: show.screen_name.clone(),
            start_time: show.start_time,
        });
        Ok(booking)
    }
}

fn not_found(message: &str) -> ApiError {
    ApiError::Rejected {
        status: 404,
        message: Some(message.to_string()),
    }
}

/// Programmable in-memory booking service
///
/// Clones share the same data, so a test keeps one handle for assertions
/// while the environment holds another.
#[derive(Clone, Default)]
pub struct MockCinemaApi {
    inner: Arc<Mutex<Inner>>,
}

impl MockCinemaApi {
    /// Empty service
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add a show
    #[must_use]
    pub fn with_show(self, show: Show) -> Self {
        {
            let mut inner = self.lock();
            inner.next_id = inner.next_id.max(show.id.value());
            inner.shows.push(show);
        }
        self
    }

    /// Add a movie
    #[must_use]
    pub fn with_movie(self, movie: Movie) -> Self {
        {
            let mut inner = self.lock();
            inner.next_id = inner.next_id.max(movie.id.value());
            inner.movies.push(movie);
        }
        self
    }

    /// Mark seats of a show as already booked
    #[must_use]
    pub fn with_booked_seats(self, show_id: ShowId, seats: impl IntoIterator<Item = u32>) -> Self {
        self.lock().occupied.entry(show_id).or_default().extend(seats);
        self
    }

    /// Add an existing booking
    #[must_use]
    pub fn with_booking(self, booking: ExtendedBooking) -> Self {
        {
            let mut inner = self.lock();
            inner.next_id = inner.next_id.max(booking.booking.id.value());
            inner.bookings.push(booking);
        }
        self
    }

    /// Answer `endpoint` only after `delay`
    #[must_use]
    pub fn with_latency(self, endpoint: Endpoint, delay: Duration) -> Self {
        self.set_latency(endpoint, delay);
        self
    }

    /// Change the delay of `endpoint` on a shared handle
    pub fn set_latency(&self, endpoint: Endpoint, delay: Duration) {
        self.lock().latency.insert(endpoint, delay);
    }

    /// Make every call to `endpoint` fail with `error`
    #[must_use]
    pub fn failing(self, endpoint: Endpoint, error: ApiError) -> Self {
        self.fail(endpoint, error);
        self
    }

    /// Make every call to `endpoint` fail with `error`, on a shared handle
    pub fn fail(&self, endpoint: Endpoint, error: ApiError) {
        self.lock().failures.insert(endpoint, error);
    }

    /// Let `endpoint` succeed again
    pub fn recover(&self, endpoint: Endpoint) {
        self.lock().failures.remove(&endpoint);
    }

    /// Every call made so far, in order
    #[must_use]
    pub fn calls(&self) -> Vec<ApiCall> {
        self.lock().calls.clone()
    }

    /// Number of calls made to `endpoint`
    #[must_use]
    pub fn calls_to(&self, endpoint: Endpoint) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|call| call.endpoint() == endpoint)
            .count()
    }

    /// Seats currently booked for a show
    #[must_use]
    pub fn occupied(&self, show_id: ShowId) -> BTreeSet<u32> {
        self.lock().occupied.get(&show_id).cloned().unwrap_or_default()
    }

    fn respond<T, F>(&self, call: ApiCall, answer: F) -> ApiFuture<'_, T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Inner) -> Result<T, ApiError> + Send + 'static,
    {
        let endpoint = call.endpoint();
        let delay = {
            let mut inner = self.lock();
            inner.calls.push(call);
            inner.latency.get(&endpoint).copied()
        };

        Box::pin(async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            self.answer(endpoint, answer)
        })
    }

    fn answer<T, F>(&self, endpoint: Endpoint, answer: F) -> Result<T, ApiError>
    where
        F: FnOnce(&mut Inner) -> Result<T, ApiError>,
    {
        let mut inner = self.lock();
        if let Some(error) = inner.failures.get(&endpoint) {
            return Err(error.clone());
        }
        answer(&mut inner)
    }
}

impl std::fmt::Debug for MockCinemaApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockCinemaApi")
            .field("calls", &self.lock().calls.len())
            .finish_non_exhaustive()
    }
}

impl CinemaApi for MockCinemaApi {
    fn list_shows(&self) -> ApiFuture<'_, Vec<Show>> {
        self.respond(ApiCall::ListShows, |inner| Ok(inner.shows.clone()))
    }

    fn get_show(&self, show_id: ShowId) -> ApiFuture<'_, Show> {
        self.respond(ApiCall::GetShow(show_id), move |inner| {
            inner.show(show_id).cloned()
        })
    }

    fn get_booked_seats(&self, show_id: ShowId) -> ApiFuture<'_, BTreeSet<u32>> {
        self.respond(ApiCall::GetBookedSeats(show_id), move |inner| {
            inner.show(show_id)?;
            Ok(inner.occupied.get(&show_id).cloned().unwrap_or_default())
        })
    }

    fn create_booking(&self, show_id: ShowId, request: BookingRequest) -> ApiFuture<'_, Booking> {
        self.respond(
            ApiCall::CreateBooking(show_id, request.clone()),
            move |inner| inner.book(show_id, request),
        )
    }

    fn get_booking(&self, booking_id: BookingId) -> ApiFuture<'_, ExtendedBooking> {
        self.respond(ApiCall::GetBooking(booking_id), move |inner| {
            inner
                .bookings
                .iter()
                .find(|extended| extended.booking.id == booking_id)
                .cloned()
                .ok_or_else(|| not_found("Booking not found"))
        })
    }

    fn list_bookings_for_show(&self, show_id: ShowId) -> ApiFuture<'_, Vec<Booking>> {
        self.respond(ApiCall::ListBookingsForShow(show_id), move |inner| {
            Ok(inner
                .bookings
                .iter()
                .filter(|extended| extended.booking.show_id == show_id)
                .map(|extended| extended.booking.clone())
                .collect())
        })
    }

    fn list_movies(&self) -> ApiFuture<'_, Vec<Movie>> {
        self.respond(ApiCall::ListMovies, |inner| Ok(inner.movies.clone()))
    }

    fn create_movie(&self, movie: NewMovie) -> ApiFuture<'_, Movie> {
        self.respond(ApiCall::CreateMovie(movie.clone()), move |inner| {
            let created = Movie {
                id: MovieId(inner.allocate_id()),
                title: movie.title,
                description: movie.description,
                duration_minutes: movie.duration_minutes,
            };
            inner.movies.push(created.clone());
            Ok(created)
        })
    }

    fn create_show(&self, show: NewShow) -> ApiFuture<'_, Show> {
        self.respond(ApiCall::CreateShow(show.clone()), move |inner| {
            let movie = inner
                .movies
                .iter()
                .find(|movie| movie.id == show.movie_id)
                .cloned()
                .ok_or_else(|| not_found("Movie not found"))?;
            let start_time = chrono::NaiveDateTime::parse_from_str(&show.start_time, "%Y-%m-%dT%H:%M")
                .map(|naive| naive.and_utc())
                .map_err(|_| ApiError::Rejected {
                    status: 400,
                    message: Some("Invalid start time".to_string()),
                })?;
            let created = Show {
                id: ShowId(inner.allocate_id()),
                movie_id: movie.id,
                screen_name: show.screen_name,
                start_time,
                total_seats: show.total_seats,
                movie_title: Some(movie.title),
                description: Some(movie.description),
                duration_minutes: Some(movie.duration_minutes),
                booked_seats: Some(0),
                available_seats: Some(show.total_seats),
            };
            inner.shows.push(created.clone());
            Ok(created)
        })
    }
}
