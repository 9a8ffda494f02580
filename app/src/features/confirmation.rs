//! Confirmation page (`/booking-success/:bookingId`)
//!
//! Re-fetches the stored booking. A successful fetch is held back until
//! [`AppEnvironment::confirmation_min_delay`] has passed since the request
//! started; slower fetches are shown as soon as they land.

use crate::environment::AppEnvironment;
use cinema_api::{ApiError, BookingId, ExtendedBooking};
use cinema_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};
use std::sync::Arc;
use tokio::time::Instant;

/// Shown when the booking cannot be fetched
pub const LOAD_ERROR: &str = "Failed to load booking details.";

/// Where the page is in its single fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationStatus {
    /// Waiting for the booking (or the latency floor)
    Loading,
    /// Booking fetched
    Loaded(ExtendedBooking),
    /// Fetch failed
    Failed(String),
}

/// Confirmation view-state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationState {
    /// Booking being shown
    pub booking_id: BookingId,
    /// Fetch progress
    pub status: ConfirmationStatus,
}

impl ConfirmationState {
    /// Fresh page for `booking_id`
    #[must_use]
    pub const fn for_booking(booking_id: BookingId) -> Self {
        Self {
            booking_id,
            status: ConfirmationStatus::Loading,
        }
    }
}

/// Requests for the parent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationDelegate {
    /// Back to the listing
    ReturnHome,
}

/// Confirmation actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationAction {
    /// Fetch the booking
    Load,
    /// Booking fetched (after the latency floor, on success)
    Loaded(Result<ExtendedBooking, ApiError>),
    /// "Book more" / "Home" pressed
    ReturnHome,
    /// Handled by the parent
    Delegate(ConfirmationDelegate),
}

/// Reducer of the confirmation page
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfirmationReducer;

impl Reducer for ConfirmationReducer {
    type State = ConfirmationState;
    type Action = ConfirmationAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut ConfirmationState,
        action: ConfirmationAction,
        env: &AppEnvironment,
    ) -> SmallVec<[Effect<ConfirmationAction>; 4]> {
        match action {
            ConfirmationAction::Load => {
                state.status = ConfirmationStatus::Loading;
                let api = Arc::clone(&env.api);
                let booking_id = state.booking_id;
                let floor = env.confirmation_min_delay;
                smallvec![Effect::future(async move {
                    let started = Instant::now();
                    let result = api.get_booking(booking_id).await;
                    if result.is_ok() {
                        tokio::time::sleep_until(started + floor).await;
                    }
                    Some(ConfirmationAction::Loaded(result))
                })]
            },
            ConfirmationAction::Loaded(Ok(booking)) => {
                if booking.booking.id != state.booking_id {
                    tracing::warn!(expected = %state.booking_id, got = %booking.booking.id, "Service answered with another booking");
                    state.status = ConfirmationStatus::Failed(LOAD_ERROR.to_string());
                    return smallvec![];
                }
                state.status = ConfirmationStatus::Loaded(booking);
                smallvec![]
            },
            ConfirmationAction::Loaded(Err(error)) => {
                tracing::warn!(booking_id = %state.booking_id, %error, "Failed to load booking");
                state.status = ConfirmationStatus::Failed(LOAD_ERROR.to_string());
                smallvec![]
            },
            ConfirmationAction::ReturnHome => smallvec![Effect::send(
                ConfirmationAction::Delegate(ConfirmationDelegate::ReturnHome)
            )],
            ConfirmationAction::Delegate(_) => smallvec![],
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use cinema_testing::{Endpoint, MockCinemaApi, TestStore, fixtures};
    use std::time::Duration;

    async fn elapsed_until_loaded(latency_ms: u64, booking_exists: bool) -> (Duration, ConfirmationStatus) {
        let mut api = MockCinemaApi::new()
            .with_latency(Endpoint::GetBooking, Duration::from_millis(latency_ms));
        if booking_exists {
            api = api.with_booking(fixtures::booking(7, 1, &[3, 1, 2]));
        }
        let mut store = TestStore::new(
            ConfirmationReducer,
            ConfirmationState::for_booking(BookingId(7)),
            AppEnvironment::new(Arc::new(api)),
        );

        let start = Instant::now();
        store.send(ConfirmationAction::Load);
        store.settle().await;
        (start.elapsed(), store.state().status.clone())
    }

    #[tokio::test(start_paused = true)]
    async fn fast_fetch_waits_for_the_floor() {
        let (elapsed, status) = elapsed_until_loaded(100, true).await;
        assert!(elapsed >= Duration::from_millis(800), "rendered after {elapsed:?}");
        assert!(elapsed < Duration::from_millis(850));
        assert!(matches!(status, ConfirmationStatus::Loaded(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_fetch_is_not_delayed_further() {
        let (elapsed, status) = elapsed_until_loaded(1200, true).await;
        assert!(elapsed >= Duration::from_millis(1200));
        assert!(elapsed < Duration::from_millis(1250), "rendered after {elapsed:?}");
        assert!(matches!(status, ConfirmationStatus::Loaded(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn failure_is_shown_without_the_floor() {
        let (elapsed, status) = elapsed_until_loaded(100, false).await;
        assert!(elapsed < Duration::from_millis(150));
        assert_eq!(status, ConfirmationStatus::Failed(LOAD_ERROR.to_string()));
    }

    #[test]
    fn another_booking_degrades_to_error() {
        let mut state = ConfirmationState::for_booking(BookingId(7));
        let reduced = ConfirmationReducer.reduce(
            &mut state,
            ConfirmationAction::Loaded(Ok(fixtures::booking(8, 1, &[1]))),
            &AppEnvironment::new(Arc::new(MockCinemaApi::new())),
        );
        assert!(reduced.is_empty());
        assert_eq!(state.status, ConfirmationStatus::Failed(LOAD_ERROR.to_string()));
    }
}
