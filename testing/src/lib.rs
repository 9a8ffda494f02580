//! # Cinema Testing
//!
//! Testing utilities for the cinema booking client.
//!
//! This crate provides:
//! - [`ReducerTest`]: Given-When-Then tests for a single reducer step
//! - [`TestStore`]: runs effects one at a time so a test controls ordering
//! - [`MockCinemaApi`]: in-memory booking service with latency and failures
//! - [`fixtures`]: ready-made shows, movies and bookings
//!
//! ## Example
//!
//! ```ignore
//! use cinema_testing::{fixtures, MockCinemaApi, TestStore};
//!
//! #[tokio::test]
//! async fn listing_loads_shows() {
//!     let api = MockCinemaApi::new().with_show(fixtures::show(1, 50));
//!     let mut store = TestStore::new(AppReducer::new(), AppState::default(), env(api));
//!
//!     store.send(AppAction::Open { path: "/".into() });
//!     store.settle().await;
//! }
//! ```

pub mod fixtures;
pub mod mock_api;
pub mod test_store;

pub use mock_api::{ApiCall, Endpoint, MockCinemaApi};
pub use reducer_test::{ReducerTest, assertions};
pub use test_store::TestStore;

/// Install a test-friendly tracing subscriber
///
/// Output goes through the test harness capture; calling it more than once
/// is harmless.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}
