//! Root reducer: routing, page lifetimes and stale-response filtering
//!
//! Navigating replaces [`AppState::page`] and advances the view generation.
//! Effects returned by a page are tagged with the generation that was
//! current when they were issued, so whatever they produce after the page
//! is gone is dropped here, before any page reducer sees it.

use crate::environment::AppEnvironment;
use crate::features::admin::{AdminAction, AdminReducer, AdminState};
use crate::features::booking::{BookingAction, BookingDelegate, BookingReducer, BookingState};
use crate::features::confirmation::{
    ConfirmationAction, ConfirmationDelegate, ConfirmationReducer, ConfirmationState,
};
use crate::features::listing::{ListingAction, ListingDelegate, ListingReducer, ListingState};
use crate::route::Route;
use cinema_core::{Generation, SmallVec, ViewScope, effect::Effect, reducer::Reducer, smallvec};

/// The mounted page and its view-state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    /// Show listing
    Listing(ListingState),
    /// Seat booking
    Booking(BookingState),
    /// Booking confirmation
    Confirmation(ConfirmationState),
    /// Admin forms
    Admin(AdminState),
    /// Unknown path
    NotFound,
}

/// Which page is mounted, without its state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    /// Show listing
    Listing,
    /// Seat booking
    Booking,
    /// Booking confirmation
    Confirmation,
    /// Admin forms
    Admin,
    /// Unknown path
    NotFound,
}

impl Page {
    /// Kind of the mounted page
    #[must_use]
    pub const fn kind(&self) -> PageKind {
        match self {
            Self::Listing(_) => PageKind::Listing,
            Self::Booking(_) => PageKind::Booking,
            Self::Confirmation(_) => PageKind::Confirmation,
            Self::Admin(_) => PageKind::Admin,
            Self::NotFound => PageKind::NotFound,
        }
    }
}

/// Whole-client state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    /// Current address
    pub route: Route,
    /// Generation of the mounted page
    pub scope: ViewScope,
    /// Mounted page
    pub page: Page,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            route: Route::Listing,
            scope: ViewScope::new(),
            page: Page::Listing(ListingState::default()),
        }
    }
}

impl AppState {
    /// Generation of the mounted page
    #[must_use]
    pub const fn generation(&self) -> Generation {
        self.scope.current()
    }
}

/// Whole-client actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Go to a path, as typed or linked
    Open {
        /// Client path, e.g. `/booking/3`
        path: String,
    },
    /// Go to a route
    Navigate(Route),
    /// Listing page action
    Listing(ListingAction),
    /// Booking page action
    Booking(BookingAction),
    /// Confirmation page action
    Confirmation(ConfirmationAction),
    /// Admin page action
    Admin(AdminAction),
    /// Action produced by an effect of the page mounted at `generation`
    Scoped {
        /// Generation the effect was issued under
        generation: Generation,
        /// Produced action
        action: Box<AppAction>,
    },
}

/// Root reducer
#[derive(Debug, Clone, Copy, Default)]
pub struct AppReducer;

impl AppReducer {
    /// Create the root reducer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn navigate(
        self,
        state: &mut AppState,
        route: Route,
        env: &AppEnvironment,
    ) -> SmallVec<[Effect<AppAction>; 4]> {
        let generation = state.scope.advance();
        tracing::debug!(%route, %generation, "Navigating");
        state.route = route;

        let on_appear = match route {
            Route::Listing => {
                state.page = Page::Listing(ListingState::default());
                Some(AppAction::Listing(ListingAction::Load))
            },
            Route::Booking { show_id } => {
                state.page = Page::Booking(BookingState::for_show(show_id));
                Some(AppAction::Booking(BookingAction::Load))
            },
            Route::BookingSuccess { booking_id } => {
                state.page = Page::Confirmation(ConfirmationState::for_booking(booking_id));
                Some(AppAction::Confirmation(ConfirmationAction::Load))
            },
            Route::Admin => {
                state.page = Page::Admin(AdminState::default());
                Some(AppAction::Admin(AdminAction::Load))
            },
            Route::NotFound => {
                state.page = Page::NotFound;
                None
            },
        };

        match on_appear {
            Some(action) => self.reduce(state, action, env),
            None => smallvec![],
        }
    }
}

/// Tag a page's effects with the generation they were issued under
fn scoped<A>(
    effects: SmallVec<[Effect<A>; 4]>,
    generation: Generation,
    lift: fn(A) -> AppAction,
) -> SmallVec<[Effect<AppAction>; 4]>
where
    A: Send + 'static,
{
    effects
        .into_iter()
        .filter(|effect| !effect.is_none())
        .map(|effect| {
            effect.map(move |action| AppAction::Scoped {
                generation,
                action: Box::new(lift(action)),
            })
        })
        .collect()
}

fn not_mounted(page: &Page, action: &str) -> SmallVec<[Effect<AppAction>; 4]> {
    tracing::debug!(mounted = ?page.kind(), action, "Ignoring action for a page that is not mounted");
    smallvec![]
}

impl Reducer for AppReducer {
    type State = AppState;
    type Action = AppAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut AppState,
        action: AppAction,
        env: &AppEnvironment,
    ) -> SmallVec<[Effect<AppAction>; 4]> {
        let generation = state.generation();

        match action {
            AppAction::Open { path } => self.navigate(state, Route::parse(&path), env),
            AppAction::Navigate(route) => self.navigate(state, route, env),

            AppAction::Scoped {
                generation: issued,
                action,
            } => {
                if state.scope.is_current(issued) {
                    self.reduce(state, *action, env)
                } else {
                    tracing::debug!(%issued, current = %generation, ?action, "Discarding stale response");
                    metrics::counter!("app.responses.stale_discarded").increment(1);
                    smallvec![]
                }
            },

            AppAction::Listing(ListingAction::Delegate(ListingDelegate::OpenBooking {
                show_id,
            })) => self.navigate(state, Route::Booking { show_id }, env),
            AppAction::Listing(action) => match &mut state.page {
                Page::Listing(page) => scoped(
                    ListingReducer.reduce(page, action, env),
                    generation,
                    AppAction::Listing,
                ),
                page => not_mounted(page, "listing"),
            },

            AppAction::Booking(BookingAction::Delegate(delegate)) => match delegate {
                BookingDelegate::Confirmed { booking_id } => {
                    self.navigate(state, Route::BookingSuccess { booking_id }, env)
                },
                BookingDelegate::ReturnHome => self.navigate(state, Route::Listing, env),
            },
            AppAction::Booking(action) => match &mut state.page {
                Page::Booking(page) => scoped(
                    BookingReducer.reduce(page, action, env),
                    generation,
                    AppAction::Booking,
                ),
                page => not_mounted(page, "booking"),
            },

            AppAction::Confirmation(ConfirmationAction::Delegate(
                ConfirmationDelegate::ReturnHome,
            )) => self.navigate(state, Route::Listing, env),
            AppAction::Confirmation(action) => match &mut state.page {
                Page::Confirmation(page) => scoped(
                    ConfirmationReducer.reduce(page, action, env),
                    generation,
                    AppAction::Confirmation,
                ),
                page => not_mounted(page, "confirmation"),
            },

            AppAction::Admin(action) => match &mut state.page {
                Page::Admin(page) => scoped(
                    AdminReducer.reduce(page, action, env),
                    generation,
                    AppAction::Admin,
                ),
                page => not_mounted(page, "admin"),
            },
        }
    }
}
