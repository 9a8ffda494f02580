//! Show listing page (`/`)

use crate::environment::AppEnvironment;
use cinema_api::{ApiError, Show, ShowId};
use cinema_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Shown when the listing cannot be fetched
pub const LOAD_ERROR: &str = "Failed to load shows.";

/// Listing view-state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingState {
    /// A fetch is in flight
    pub loading: bool,
    /// Shows from the last successful fetch
    pub shows: Vec<Show>,
    /// Set when the last fetch failed
    pub error: Option<String>,
}

impl Default for ListingState {
    fn default() -> Self {
        Self {
            loading: true,
            shows: Vec::new(),
            error: None,
        }
    }
}

impl ListingState {
    /// Cards in the order the service returned the shows
    #[must_use]
    pub fn cards(&self) -> Vec<ShowCard> {
        self.shows.iter().map(ShowCard::from).collect()
    }

    fn card(&self, show_id: ShowId) -> Option<ShowCard> {
        self.shows.iter().find(|show| show.id == show_id).map(ShowCard::from)
    }
}

/// Requests for the parent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingDelegate {
    /// Go to the booking page of a show
    OpenBooking {
        /// Chosen show
        show_id: ShowId,
    },
}

/// Listing actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingAction {
    /// Fetch every show
    Load,
    /// Shows fetched
    ShowsLoaded(Result<Vec<Show>, ApiError>),
    /// "Book Now" pressed
    Book {
        /// Show on the card
        show_id: ShowId,
    },
    /// Handled by the parent
    Delegate(ListingDelegate),
}

/// One show as the listing presents it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowCard {
    /// Show identifier
    pub show_id: ShowId,
    /// Movie title
    pub title: String,
    /// Movie description
    pub description: String,
    /// Screen name
    pub screen_name: String,
    /// Start of the show
    pub start_time: DateTime<Utc>,
    /// Running time, when known
    pub duration_minutes: Option<u32>,
    /// Seats left; `None` when the service did not say
    pub available: Option<u32>,
    /// Seats in the auditorium
    pub total: u32,
}

impl ShowCard {
    /// Booking is refused exactly when no seat is left
    #[must_use]
    pub fn is_sold_out(&self) -> bool {
        self.available == Some(0)
    }

    /// Label of the booking button
    #[must_use]
    pub fn book_label(&self) -> &'static str {
        if self.is_sold_out() {
            "Sold Out"
        } else {
            "Book Now"
        }
    }
}

impl From<&Show> for ShowCard {
    fn from(show: &Show) -> Self {
        Self {
            show_id: show.id,
            title: show.movie_title.clone().unwrap_or_default(),
            description: show.description.clone().unwrap_or_default(),
            screen_name: show.screen_name.clone(),
            start_time: show.start_time,
            duration_minutes: show.duration_minutes,
            available: show.available_seats,
            total: show.total_seats,
        }
    }
}

/// Reducer of the listing page
#[derive(Debug, Clone, Copy, Default)]
pub struct ListingReducer;

impl Reducer for ListingReducer {
    type State = ListingState;
    type Action = ListingAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut ListingState,
        action: ListingAction,
        env: &AppEnvironment,
    ) -> SmallVec<[Effect<ListingAction>; 4]> {
        match action {
            ListingAction::Load => {
                state.loading = true;
                state.error = None;
                let api = Arc::clone(&env.api);
                smallvec![Effect::future(async move {
                    Some(ListingAction::ShowsLoaded(api.list_shows().await))
                })]
            },
            ListingAction::ShowsLoaded(Ok(shows)) => {
                tracing::debug!(count = shows.len(), "Shows loaded");
                state.loading = false;
                state.shows = shows;
                smallvec![]
            },
            ListingAction::ShowsLoaded(Err(error)) => {
                tracing::warn!(%error, "Failed to load shows");
                state.loading = false;
                state.error = Some(LOAD_ERROR.to_string());
                smallvec![]
            },
            ListingAction::Book { show_id } => match state.card(show_id) {
                Some(card) if !card.is_sold_out() => smallvec![Effect::send(
                    ListingAction::Delegate(ListingDelegate::OpenBooking { show_id })
                )],
                Some(_) => {
                    tracing::debug!(%show_id, "Refusing to book a sold-out show");
                    smallvec![]
                },
                None => smallvec![],
            },
            ListingAction::Delegate(_) => smallvec![],
        }
    }
}
