//! Page features
//!
//! Every page is a `State`/`Action`/`Reducer` triple sharing the
//! [`AppEnvironment`](crate::AppEnvironment). Seat selection and submission
//! checks are plain types used by the booking page.

pub mod admin;
pub mod booking;
pub mod confirmation;
pub mod listing;
pub mod seat_selection;
pub mod submission;
