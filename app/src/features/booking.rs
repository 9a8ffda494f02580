//! Booking page (`/booking/:showId`)
//!
//! Loads the show and its occupancy, lets the customer pick seats and fill
//! in their details, then submits the booking. Submission failures keep
//! every input so the customer can adjust and resend.

use super::seat_selection::{SeatSelection, Toggle};
use super::submission;
use crate::environment::AppEnvironment;
use cinema_api::{ApiError, Booking, BookingId, Show, ShowId};
use cinema_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Shown when the show or its occupancy cannot be fetched
pub const LOAD_ERROR: &str = "Failed to load show details. Please try again.";

/// Shown when a submission fails without a message from the service
pub const BOOKING_FAILED: &str = "Booking failed";

/// Booking page view-state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingState {
    /// Show being booked
    pub show_id: ShowId,
    /// Show details once loaded
    pub show: Option<Show>,
    /// Set when loading failed
    pub load_error: Option<String>,
    /// Seat picks and occupancy
    pub selection: SeatSelection,
    /// Name as typed
    pub customer_name: String,
    /// Email as typed
    pub customer_email: String,
    /// A submission is in flight
    pub submitting: bool,
    /// Validation or submission message
    pub message: Option<String>,
}

impl BookingState {
    /// Fresh page for `show_id`
    #[must_use]
    pub const fn for_show(show_id: ShowId) -> Self {
        Self {
            show_id,
            show: None,
            load_error: None,
            selection: SeatSelection::for_show(show_id),
            customer_name: String::new(),
            customer_email: String::new(),
            submitting: false,
            message: None,
        }
    }

    /// Whether the submit control is enabled
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.submitting && !self.selection.is_empty()
    }

    /// Label of the submit control
    #[must_use]
    pub const fn submit_label(&self) -> &'static str {
        if self.submitting {
            "Booking..."
        } else {
            "Confirm Booking"
        }
    }
}

/// Requests for the parent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingDelegate {
    /// Booking stored; show its confirmation
    Confirmed {
        /// New booking
        booking_id: BookingId,
    },
    /// Back to the listing
    ReturnHome,
}

/// Booking page actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingAction {
    /// Fetch the show and its booked seats
    Load,
    /// Show and booked seats fetched
    Loaded(Result<(Show, BTreeSet<u32>), ApiError>),
    /// Seat clicked
    ToggleSeat {
        /// Seat number
        seat: u32,
    },
    /// Name edited
    SetCustomerName(String),
    /// Email edited
    SetCustomerEmail(String),
    /// Submit pressed
    Submit,
    /// Service answered the submission
    Submitted(Result<Booking, ApiError>),
    /// Back pressed
    Back,
    /// Handled by the parent
    Delegate(BookingDelegate),
}

/// Reducer of the booking page
#[derive(Debug, Clone, Copy, Default)]
pub struct BookingReducer;

impl Reducer for BookingReducer {
    type State = BookingState;
    type Action = BookingAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut BookingState,
        action: BookingAction,
        env: &AppEnvironment,
    ) -> SmallVec<[Effect<BookingAction>; 4]> {
        match action {
            BookingAction::Load => {
                state.load_error = None;
                state.selection.reset_for(state.show_id);
                let api = Arc::clone(&env.api);
                let show_id = state.show_id;
                smallvec![Effect::future(async move {
                    let result =
                        futures::try_join!(api.get_show(show_id), api.get_booked_seats(show_id));
                    Some(BookingAction::Loaded(result))
                })]
            },
            BookingAction::Loaded(Ok((show, occupied))) => {
                if show.id != state.show_id {
                    tracing::warn!(expected = %state.show_id, got = %show.id, "Service answered with another show");
                    state.load_error = Some(LOAD_ERROR.to_string());
                    return smallvec![];
                }
                state.selection.set_total_seats(show.total_seats);
                state.selection.set_occupied(occupied);
                state.show = Some(show);
                smallvec![]
            },
            BookingAction::Loaded(Err(error)) => {
                tracing::warn!(show_id = %state.show_id, %error, "Failed to load show");
                state.load_error = Some(LOAD_ERROR.to_string());
                smallvec![]
            },
            BookingAction::ToggleSeat { seat } => {
                if state.show.is_none() {
                    return smallvec![];
                }
                if state.selection.toggle(seat) == Toggle::Selected {
                    state.message = None;
                }
                smallvec![]
            },
            BookingAction::SetCustomerName(name) => {
                state.customer_name = name;
                smallvec![]
            },
            BookingAction::SetCustomerEmail(email) => {
                state.customer_email = email;
                smallvec![]
            },
            BookingAction::Submit => {
                if state.submitting {
                    tracing::debug!("Submission already in flight");
                    return smallvec![];
                }
                let request = match submission::validate(
                    &state.selection,
                    &state.customer_name,
                    &state.customer_email,
                ) {
                    Ok(request) => request,
                    Err(error) => {
                        state.message = Some(error.to_string());
                        return smallvec![];
                    },
                };
                state.submitting = true;
                state.message = None;
                state.selection.clear_message();
                let api = Arc::clone(&env.api);
                let show_id = state.show_id;
                smallvec![Effect::future(async move {
                    Some(BookingAction::Submitted(
                        api.create_booking(show_id, request).await,
                    ))
                })]
            },
            BookingAction::Submitted(Ok(booking)) => {
                // Stays in flight until the parent unmounts the page.
                tracing::info!(show_id = %state.show_id, booking_id = %booking.id, seats = booking.seat_numbers.len(), "Booking confirmed");
                smallvec![Effect::send(BookingAction::Delegate(
                    BookingDelegate::Confirmed {
                        booking_id: booking.id
                    }
                ))]
            },
            BookingAction::Submitted(Err(error)) => {
                state.submitting = false;
                tracing::warn!(show_id = %state.show_id, %error, "Booking failed");
                state.message = Some(error.user_message(BOOKING_FAILED));
                smallvec![]
            },
            BookingAction::Back => {
                smallvec![Effect::send(BookingAction::Delegate(
                    BookingDelegate::ReturnHome
                ))]
            },
            BookingAction::Delegate(_) => smallvec![],
        }
    }
}
