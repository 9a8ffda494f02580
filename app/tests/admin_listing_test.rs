//! Admin forms and the listing page against the in-memory service

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

mod common;

use cinema_api::{ApiError, ShowId};
use cinema_app::app::Page;
use cinema_app::features::admin::{
    AdminAction, AdminState, AdminTab, MOVIE_CREATED, MOVIE_FAILED, MovieField, SHOW_CREATED,
    ShowField,
};
use cinema_app::features::listing::{LOAD_ERROR, ListingAction};
use cinema_app::{AppAction, AppReducer, Route};
use cinema_testing::{Endpoint, TestStore};
use common::{cinema, store};

fn admin_page(store: &TestStore<AppReducer>) -> &AdminState {
    match &store.state().page {
        Page::Admin(page) => page,
        other => panic!("expected admin page, found {:?}", other.kind()),
    }
}

fn edit_movie(store: &mut TestStore<AppReducer>, field: MovieField, value: &str) {
    store.send(AppAction::Admin(AdminAction::EditMovie(field, value.to_string())));
}

fn edit_show(store: &mut TestStore<AppReducer>, field: ShowField, value: &str) {
    store.send(AppAction::Admin(AdminAction::EditShow(field, value.to_string())));
}

#[tokio::test]
async fn new_movie_then_show_appear_in_listing() {
    let api = cinema();
    let mut store = store(&api);
    store.send(AppAction::Navigate(Route::Admin));
    store.settle().await;
    assert_eq!(admin_page(&store).movies.len(), 1);
    assert_eq!(admin_page(&store).shows.len(), 2);

    edit_movie(&mut store, MovieField::Title, "Arrival");
    edit_movie(&mut store, MovieField::Description, "Linguist meets heptapods");
    edit_movie(&mut store, MovieField::Duration, "116");
    store.send(AppAction::Admin(AdminAction::SubmitMovie));
    store.settle().await;

    let page = admin_page(&store);
    assert_eq!(page.message.as_deref(), Some(MOVIE_CREATED));
    assert!(page.movie_form.title.is_empty());
    let arrival = page
        .movies
        .iter()
        .find(|movie| movie.title == "Arrival")
        .cloned()
        .unwrap();
    assert_eq!(arrival.duration_minutes, 116);
    assert_eq!(api.calls_to(Endpoint::ListMovies), 2);

    store.send(AppAction::Admin(AdminAction::SelectTab(AdminTab::Show)));
    edit_show(&mut store, ShowField::Movie, &arrival.id.to_string());
    edit_show(&mut store, ShowField::Screen, "Screen 4");
    edit_show(&mut store, ShowField::StartTime, "2025-02-01T20:15");
    edit_show(&mut store, ShowField::TotalSeats, "40");
    store.send(AppAction::Admin(AdminAction::SubmitShow));
    store.settle().await;

    let page = admin_page(&store);
    assert_eq!(page.tab, AdminTab::Show);
    assert_eq!(page.message.as_deref(), Some(SHOW_CREATED));
    assert!(page.show_form.screen_name.is_empty());
    assert_eq!(page.shows.len(), 3);
    assert_eq!(api.calls_to(Endpoint::ListShows), 3);

    store.send(AppAction::Open {
        path: "/".to_string(),
    });
    store.settle().await;
    let Page::Listing(listing) = &store.state().page else {
        panic!("listing should be mounted");
    };
    let card = listing
        .cards()
        .into_iter()
        .find(|card| card.title == "Arrival")
        .unwrap();
    assert_eq!(card.screen_name, "Screen 4");
    assert_eq!(card.available, Some(40));
    assert_eq!(card.book_label(), "Book Now");
}

#[tokio::test]
async fn blank_field_is_reported_without_a_request() {
    let api = cinema();
    let mut store = store(&api);
    store.send(AppAction::Navigate(Route::Admin));
    store.settle().await;

    edit_movie(&mut store, MovieField::Title, "Arrival");
    edit_movie(&mut store, MovieField::Duration, "116");
    store.send(AppAction::Admin(AdminAction::SubmitMovie));
    assert_eq!(store.pending_effects(), 0);
    assert_eq!(
        admin_page(&store).message.as_deref(),
        Some("Please fill all fields")
    );

    edit_movie(&mut store, MovieField::Description, "Heptapods");
    edit_movie(&mut store, MovieField::Duration, "two hours");
    store.send(AppAction::Admin(AdminAction::SubmitMovie));
    assert_eq!(store.pending_effects(), 0);
    assert_eq!(
        admin_page(&store).message.as_deref(),
        Some("Duration must be a whole number")
    );
    assert_eq!(api.calls_to(Endpoint::CreateMovie), 0);
}

#[tokio::test]
async fn rejected_movie_keeps_the_form() {
    let api = cinema();
    let mut store = store(&api);
    store.send(AppAction::Navigate(Route::Admin));
    store.settle().await;

    api.fail(
        Endpoint::CreateMovie,
        ApiError::Server {
            status: 500,
            message: None,
        },
    );
    edit_movie(&mut store, MovieField::Title, "Arrival");
    edit_movie(&mut store, MovieField::Description, "Heptapods");
    edit_movie(&mut store, MovieField::Duration, "116");
    store.send(AppAction::Admin(AdminAction::SubmitMovie));
    store.settle().await;

    let page = admin_page(&store);
    assert_eq!(page.message.as_deref(), Some(MOVIE_FAILED));
    assert_eq!(page.movie_form.title, "Arrival");
    assert_eq!(api.calls_to(Endpoint::ListMovies), 1);
}

#[tokio::test]
async fn listing_failure_shows_error_and_no_cards() {
    let api = cinema().failing(
        Endpoint::ListShows,
        ApiError::Transport("connection refused".to_string()),
    );
    let mut store = store(&api);
    store.send(AppAction::Open {
        path: "/".to_string(),
    });
    store.settle().await;

    let Page::Listing(listing) = &store.state().page else {
        panic!("listing should be mounted");
    };
    assert!(!listing.loading);
    assert_eq!(listing.error.as_deref(), Some(LOAD_ERROR));
    assert!(listing.cards().is_empty());

    api.recover(Endpoint::ListShows);
    store.send(AppAction::Listing(ListingAction::Load));
    store.settle().await;
    let Page::Listing(listing) = &store.state().page else {
        panic!("listing should be mounted");
    };
    assert_eq!(listing.error, None);
    assert_eq!(listing.cards().len(), 2);
}

#[tokio::test]
async fn booking_open_show_navigates() {
    let api = cinema();
    let mut store = store(&api);
    store.send(AppAction::Open {
        path: "/".to_string(),
    });
    store.settle().await;

    store.send(AppAction::Listing(ListingAction::Book { show_id: ShowId(1) }));
    store.settle().await;

    assert_eq!(store.state().route, Route::Booking { show_id: ShowId(1) });
    let page = common::booking_page(&store);
    assert_eq!(page.selection.total_seats(), 20);
    assert!(page.selection.occupied().contains(&7));
}
