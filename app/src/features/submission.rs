//! Checks run before a booking is sent
//!
//! Each failed check has its own message and stops the submission before
//! any network call.

use super::seat_selection::SeatSelection;
use cinema_api::BookingRequest;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

static EMAIL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

/// A booking precondition that does not hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// No seat picked
    #[error("Please select at least one seat")]
    NoSeats,

    /// Name empty or blank
    #[error("Please enter your name")]
    MissingName,

    /// Email empty or blank
    #[error("Please enter your email address")]
    MissingEmail,

    /// Email does not look like `user@domain.tld`
    #[error("Please enter a valid email address (e.g., user@example.com)")]
    InvalidEmail,
}

/// `local@domain.tld` with no whitespace and exactly one `@`
#[must_use]
pub fn validate_email(email: &str) -> bool {
    EMAIL.as_ref().is_some_and(|pattern| pattern.is_match(email))
}

/// Check the form and build the request body
///
/// Seats are sent ascending; surrounding whitespace is dropped from the email.
///
/// # Errors
///
/// Returns the first failing [`SubmissionError`], checked in declaration order.
pub fn validate(
    selection: &SeatSelection,
    customer_name: &str,
    customer_email: &str,
) -> Result<BookingRequest, SubmissionError> {
    if selection.is_empty() {
        return Err(SubmissionError::NoSeats);
    }
    if customer_name.trim().is_empty() {
        return Err(SubmissionError::MissingName);
    }
    let email = customer_email.trim();
    if email.is_empty() {
        return Err(SubmissionError::MissingEmail);
    }
    if !validate_email(email) {
        return Err(SubmissionError::InvalidEmail);
    }

    Ok(BookingRequest {
        user_email: email.to_string(),
        seat_numbers: selection.sorted(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use cinema_api::ShowId;

    fn picked(seats: &[u32]) -> SeatSelection {
        let mut selection = SeatSelection::for_show(ShowId(1));
        selection.set_total_seats(10);
        for seat in seats {
            selection.toggle(*seat);
        }
        selection
    }

    #[test]
    fn email_shapes() {
        assert!(validate_email("a@b.co"));
        assert!(validate_email("first.last+tag@mail.example.org"));
        assert!(!validate_email("not-an-email"));
        assert!(!validate_email("a@b"));
        assert!(!validate_email("a b@c.de"));
        assert!(!validate_email("a@@b.co"));
        assert!(!validate_email(""));
    }

    #[test]
    fn checks_run_in_order() {
        assert_eq!(validate(&picked(&[]), "", "x"), Err(SubmissionError::NoSeats));
        assert_eq!(validate(&picked(&[1]), "   ", "x"), Err(SubmissionError::MissingName));
        assert_eq!(validate(&picked(&[1]), "Ada", " "), Err(SubmissionError::MissingEmail));
        assert_eq!(
            validate(&picked(&[1]), "Ada", "a@b"),
            Err(SubmissionError::InvalidEmail)
        );
    }

    #[test]
    fn messages_are_distinct() {
        let messages: std::collections::BTreeSet<String> = [
            SubmissionError::NoSeats,
            SubmissionError::MissingName,
            SubmissionError::MissingEmail,
            SubmissionError::InvalidEmail,
        ]
        .iter()
        .map(ToString::to_string)
        .collect();
        assert_eq!(messages.len(), 4);
    }

    #[test]
    fn request_has_sorted_seats_and_trimmed_email() {
        let request = validate(&picked(&[3, 1, 2]), "Ada", " a@b.co ").unwrap();
        assert_eq!(request.seat_numbers, vec![1, 2, 3]);
        assert_eq!(request.user_email, "a@b.co");
    }
}
