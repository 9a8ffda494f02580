//! Page lifetimes: responses for a page that is gone are dropped

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

mod common;

use cinema_api::ShowId;
use cinema_app::app::{Page, PageKind};
use cinema_app::features::booking::BookingAction;
use cinema_app::features::listing::ListingAction;
use cinema_app::{AppAction, AppEnvironment, AppReducer, AppState, Route};
use cinema_runtime::Store;
use cinema_testing::{Endpoint, fixtures};
use common::{booking_page, cinema, store};
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn late_show_details_are_dropped_after_leaving() {
    let api = cinema();
    let mut store = store(&api);

    store.send(AppAction::Navigate(Route::Booking { show_id: ShowId(1) }));
    let in_flight = store.take_pending();
    assert_eq!(in_flight.len(), 1);

    store.send(AppAction::Navigate(Route::Listing));
    store.settle().await;
    let listing_before = store.state().clone();

    for effect in in_flight {
        store.feed(effect).await;
    }

    assert_eq!(store.state(), &listing_before);
    assert_eq!(store.state().page.kind(), PageKind::Listing);
    assert_eq!(store.pending_effects(), 0);
}

#[tokio::test]
async fn late_booking_response_does_not_navigate() {
    let api = cinema();
    let mut store = store(&api);
    store.send(AppAction::Open {
        path: "/booking/1".to_string(),
    });
    store.settle().await;
    store.send(AppAction::Booking(BookingAction::ToggleSeat { seat: 2 }));
    store.send(AppAction::Booking(BookingAction::SetCustomerName("Ada".to_string())));
    store.send(AppAction::Booking(BookingAction::SetCustomerEmail("a@b.co".to_string())));
    store.send(AppAction::Booking(BookingAction::Submit));
    let submission = store.take_pending();

    store.send(AppAction::Navigate(Route::Admin));
    for effect in submission {
        store.feed(effect).await;
    }

    // The booking exists server-side, but the admin page stays mounted.
    assert_eq!(api.occupied(ShowId(1)).into_iter().collect::<Vec<_>>(), vec![2, 7]);
    assert_eq!(store.state().route, Route::Admin);
    assert_eq!(store.state().page.kind(), PageKind::Admin);
}

#[tokio::test]
async fn changing_show_resets_selection() {
    let api = cinema().with_show(fixtures::show(3, 30));
    let mut store = store(&api);

    store.send(AppAction::Open {
        path: "/booking/1".to_string(),
    });
    store.settle().await;
    store.send(AppAction::Booking(BookingAction::ToggleSeat { seat: 5 }));
    assert_eq!(booking_page(&store).selection.selected(), &[5]);

    store.send(AppAction::Open {
        path: "/booking/3".to_string(),
    });
    store.settle().await;

    let page = booking_page(&store);
    assert_eq!(page.show_id, ShowId(3));
    assert!(page.selection.is_empty());
    assert_eq!(page.selection.total_seats(), 30);
}

#[tokio::test]
async fn sold_out_show_cannot_be_opened_from_listing() {
    let api = cinema();
    let mut store = store(&api);
    store.send(AppAction::Open {
        path: "/".to_string(),
    });
    store.settle().await;

    let Page::Listing(listing) = &store.state().page else {
        panic!("listing should be mounted");
    };
    let sold_out = listing
        .cards()
        .into_iter()
        .find(|card| card.show_id == ShowId(2))
        .unwrap();
    assert!(sold_out.is_sold_out());
    assert_eq!(sold_out.book_label(), "Sold Out");
    assert_eq!(sold_out.total, 50);

    store.send(AppAction::Listing(ListingAction::Book { show_id: ShowId(2) }));
    store.settle().await;
    assert_eq!(store.state().route, Route::Listing);
}

#[tokio::test]
async fn unknown_paths_land_on_not_found() {
    let api = cinema();
    let mut store = store(&api);
    store.send(AppAction::Open {
        path: "/films/12".to_string(),
    });
    store.settle().await;

    assert_eq!(store.state().route.path(), "/404");
    assert_eq!(store.state().page, Page::NotFound);
    assert!(api.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn store_drops_response_that_lands_after_navigation() {
    let api = cinema().with_latency(Endpoint::GetShow, Duration::from_millis(500));
    let store = Store::new(
        AppState::default(),
        AppReducer::new(),
        AppEnvironment::new(Arc::new(api.clone())),
    );

    let _ = store
        .send(AppAction::Navigate(Route::Booking { show_id: ShowId(1) }))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;
    let _ = store.send(AppAction::Navigate(Route::Admin)).await.unwrap();
    tokio::time::sleep(Duration::from_secs(1)).await;

    let (route, kind) = store.state(|s| (s.route, s.page.kind())).await;
    assert_eq!(route, Route::Admin);
    assert_eq!(kind, PageKind::Admin);
    assert_eq!(api.calls_to(Endpoint::GetShow), 1);
}
