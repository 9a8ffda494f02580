//! Dependencies shared by every page reducer

use cinema_api::CinemaApi;
use std::sync::Arc;
use std::time::Duration;

/// Default shortest time between requesting a booking and showing it
pub const CONFIRMATION_MIN_DELAY: Duration = Duration::from_millis(800);

/// Injected dependencies for [`AppReducer`](crate::AppReducer)
#[derive(Clone)]
pub struct AppEnvironment {
    /// Booking service
    pub api: Arc<dyn CinemaApi>,
    /// Latency floor of the confirmation page
    pub confirmation_min_delay: Duration,
}

impl AppEnvironment {
    /// Environment with the default confirmation delay
    #[must_use]
    pub fn new(api: Arc<dyn CinemaApi>) -> Self {
        Self {
            api,
            confirmation_min_delay: CONFIRMATION_MIN_DELAY,
        }
    }

    /// Override the confirmation delay
    #[must_use]
    pub const fn with_confirmation_min_delay(mut self, delay: Duration) -> Self {
        self.confirmation_min_delay = delay;
        self
    }
}

impl std::fmt::Debug for AppEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppEnvironment")
            .field("confirmation_min_delay", &self.confirmation_min_delay)
            .finish_non_exhaustive()
    }
}
