//! Shared setup for app integration tests

#![allow(dead_code, clippy::panic)]

use cinema_app::app::Page;
use cinema_app::features::booking::BookingState;
use cinema_app::{AppEnvironment, AppReducer, AppState};
use cinema_testing::{MockCinemaApi, TestStore, fixtures};
use std::sync::Arc;

/// Service with one open show (id 1, 20 seats, seat 7 taken) and one sold-out show (id 2)
pub fn cinema() -> MockCinemaApi {
    MockCinemaApi::new()
        .with_movie(fixtures::movie(1))
        .with_show(fixtures::show(1, 20))
        .with_show(fixtures::sold_out_show(2, 50))
        .with_booked_seats(cinema_api::ShowId(1), [7])
}

pub fn store(api: &MockCinemaApi) -> TestStore<AppReducer> {
    cinema_testing::init_tracing();
    TestStore::new(
        AppReducer::new(),
        AppState::default(),
        AppEnvironment::new(Arc::new(api.clone())),
    )
}

pub fn booking_page(store: &TestStore<AppReducer>) -> &BookingState {
    match &store.state().page {
        Page::Booking(page) => page,
        other => panic!("expected booking page, found {:?}", other.kind()),
    }
}
