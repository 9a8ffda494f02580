//! Text rendering of each page
//!
//! Pure functions of state; the binary prints whatever they return.

use crate::app::{AppState, Page};
use crate::features::admin::{AdminState, AdminTab};
use crate::features::booking::BookingState;
use crate::features::confirmation::{ConfirmationState, ConfirmationStatus};
use crate::features::listing::ListingState;
use crate::features::seat_selection::SeatState;
use crate::format::{TimeDisplay, seat_list};
use std::fmt::Write;

/// Seats per row of the grid
pub const SEATS_PER_ROW: usize = 10;

/// Render the mounted page
#[must_use]
pub fn render(state: &AppState, time: &TimeDisplay) -> String {
    let body = match &state.page {
        Page::Listing(listing) => listing_view(listing, time),
        Page::Booking(booking) => booking_view(booking, time),
        Page::Confirmation(confirmation) => confirmation_view(confirmation, time),
        Page::Admin(admin) => admin_view(admin, time),
        Page::NotFound => not_found_view(),
    };
    format!("[{}]\n{body}", state.route)
}

/// Show cards, or the empty-list text
#[must_use]
pub fn listing_view(state: &ListingState, time: &TimeDisplay) -> String {
    if state.loading {
        return "Loading shows...\n".to_string();
    }

    let mut out = String::from("Available Shows\n\n");
    if let Some(error) = &state.error {
        let _ = writeln!(out, "{error}");
    }
    let cards = state.cards();
    if cards.is_empty() {
        out.push_str("No shows available at the moment\n");
        return out;
    }
    for card in cards {
        let available = card
            .available
            .map_or_else(|| "?".to_string(), |n| n.to_string());
        let duration = card
            .duration_minutes
            .map_or_else(|| "?".to_string(), |n| n.to_string());
        let _ = writeln!(out, "#{} {}", card.show_id, card.title);
        if !card.description.is_empty() {
            let _ = writeln!(out, "   {}", card.description);
        }
        let _ = writeln!(out, "   Screen: {}", card.screen_name);
        let _ = writeln!(out, "   Time: {}", time.short(card.start_time));
        let _ = writeln!(out, "   Duration: {duration} mins");
        let _ = writeln!(out, "   {available} available / {} total", card.total);
        let _ = writeln!(out, "   [{}]", card.book_label());
        out.push('\n');
    }
    out
}

/// One seat cell: ` 12 ` available, `[12]` selected, ` XX ` booked
#[must_use]
pub fn seat_cell(seat: u32, state: SeatState) -> String {
    match state {
        SeatState::Available => format!(" {seat:>2} "),
        SeatState::Selected => format!("[{seat:>2}]"),
        SeatState::Booked => " XX ".to_string(),
    }
}

/// Seat grid, customer form and messages
#[must_use]
pub fn booking_view(state: &BookingState, time: &TimeDisplay) -> String {
    if let Some(error) = &state.load_error {
        return format!("{error}\n");
    }
    let Some(show) = &state.show else {
        return "Loading...\n".to_string();
    };

    let mut out = String::new();
    let _ = writeln!(out, "{}", show.movie_title.as_deref().unwrap_or_default());
    let _ = writeln!(out, "{} • {}", show.screen_name, time.long(show.start_time));
    out.push_str("\nSelect Your Seats (Max 5)\n");
    let _ = writeln!(out, "{:^width$}", "SCREEN", width = SEATS_PER_ROW * 4);

    let cells: Vec<String> = state
        .selection
        .seats()
        .map(|(seat, seat_state)| seat_cell(seat, seat_state))
        .collect();
    for row in cells.chunks(SEATS_PER_ROW) {
        let _ = writeln!(out, "{}", row.concat());
    }
    out.push_str(" nn  Available   [nn] Selected    XX  Booked\n\n");

    out.push_str("Customer Details\n");
    let _ = writeln!(out, "   Name:  {}", state.customer_name);
    let _ = writeln!(out, "   Email: {}", state.customer_email);

    let selected = state.selection.sorted();
    if selected.is_empty() {
        out.push_str("No seats selected\n");
    } else {
        let _ = writeln!(
            out,
            "{} seat(s) selected: {}",
            selected.len(),
            seat_list(&selected)
        );
    }
    let enabled = if state.can_submit() { "" } else { " (disabled)" };
    let _ = writeln!(out, "[{}]{enabled}", state.submit_label());

    if let Some(message) = state.selection.capacity_message() {
        let _ = writeln!(out, "{message}");
    }
    if let Some(message) = &state.message {
        let _ = writeln!(out, "{message}");
    }
    out
}

/// Booking details once fetched
#[must_use]
pub fn confirmation_view(state: &ConfirmationState, time: &TimeDisplay) -> String {
    match &state.status {
        ConfirmationStatus::Loading => "Processing Booking...\n".to_string(),
        ConfirmationStatus::Failed(error) => format!("{error}\n[Go Home]\n"),
        ConfirmationStatus::Loaded(extended) => {
            let booking = &extended.booking;
            let mut out = String::from("Booking Confirmed!\n");
            let _ = writeln!(out, "Thank you for your booking, {}\n", booking.user_email);
            let _ = writeln!(out, "   Movie:      {}", extended.movie_title);
            let _ = writeln!(out, "   Screen:     {}", extended.screen_name);
            let _ = writeln!(out, "   Show Time:  {}", time.long(extended.start_time));
            let _ = writeln!(out, "   Seats:      {}", seat_list(&booking.seat_numbers));
            let _ = writeln!(out, "   Booking ID: #{}", booking.id);
            let _ = writeln!(out, "   Status:     {}", booking.status);
            out.push_str("\n[Book More Tickets]\n");
            out
        },
    }
}

/// Tabs, the open form and both lists
#[must_use]
pub fn admin_view(state: &AdminState, time: &TimeDisplay) -> String {
    let mut out = String::from("Admin Dashboard\n");
    let (movie_tab, show_tab) = match state.tab {
        AdminTab::Movie => ("[Create Movie]", " Create Show "),
        AdminTab::Show => (" Create Movie ", "[Create Show]"),
    };
    let _ = writeln!(out, "{movie_tab} {show_tab}");
    if let Some(message) = &state.message {
        let _ = writeln!(out, "{message}");
    }
    out.push('\n');

    match state.tab {
        AdminTab::Movie => {
            let form = &state.movie_form;
            out.push_str("Add New Movie\n");
            let _ = writeln!(out, "   Title:       {}", form.title);
            let _ = writeln!(out, "   Description: {}", form.description);
            let _ = writeln!(out, "   Duration:    {}", form.duration_minutes);
        },
        AdminTab::Show => {
            let form = &state.show_form;
            let movie = state
                .movies
                .iter()
                .find(|movie| movie.id.to_string() == form.movie_id.trim())
                .map_or("Select Movie", |movie| movie.title.as_str());
            out.push_str("Add New Show\n");
            let _ = writeln!(out, "   Movie:       {movie}");
            let _ = writeln!(out, "   Screen:      {}", form.screen_name);
            let _ = writeln!(out, "   Start:       {}", form.start_time);
            let _ = writeln!(out, "   Total Seats: {}", form.total_seats);
        },
    }

    let _ = writeln!(out, "\nMovies ({})", state.movies.len());
    for movie in &state.movies {
        let _ = writeln!(out, "   #{} {} - {}m", movie.id, movie.title, movie.duration_minutes);
    }
    let _ = writeln!(out, "\nShows ({})", state.shows.len());
    for show in &state.shows {
        let _ = writeln!(
            out,
            "   {} - {} ({})",
            show.movie_title.as_deref().unwrap_or_default(),
            show.screen_name,
            time.short(show.start_time)
        );
    }
    out
}

/// Unknown path
#[must_use]
pub fn not_found_view() -> String {
    "Page Not Found\n[Go Home]\n".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::listing::ListingState;
    use cinema_api::ShowId;
    use cinema_testing::fixtures;

    #[test]
    fn sold_out_card_is_labelled() {
        let state = ListingState {
            loading: false,
            shows: vec![fixtures::sold_out_show(1, 50)],
            error: None,
        };
        let text = listing_view(&state, &TimeDisplay::utc());
        assert!(text.contains("0 available / 50 total"));
        assert!(text.contains("[Sold Out]"));
        assert!(text.contains("Mon, 6 Jan, 06:30 PM"));
    }

    #[test]
    fn empty_listing_says_so() {
        let state = ListingState {
            loading: false,
            shows: vec![],
            error: None,
        };
        assert!(listing_view(&state, &TimeDisplay::utc()).contains("No shows available at the moment"));
    }

    #[test]
    fn seats_render_in_three_states() {
        let mut state = BookingState::for_show(ShowId(1));
        let show = fixtures::show(1, 12);
        state.selection.set_total_seats(show.total_seats);
        state.selection.set_occupied([2].into_iter().collect());
        state.show = Some(show);
        state.selection.toggle(3);
        state.selection.toggle(1);

        let text = booking_view(&state, &TimeDisplay::utc());
        assert!(text.contains("[ 1] XX [ 3]  4 "));
        assert!(text.contains("2 seat(s) selected: 1, 3"));
        assert!(text.contains("[Confirm Booking]"));
    }

    #[test]
    fn empty_selection_disables_submit() {
        let mut state = BookingState::for_show(ShowId(1));
        state.show = Some(fixtures::show(1, 5));
        state.selection.set_total_seats(5);
        let text = booking_view(&state, &TimeDisplay::utc());
        assert!(text.contains("No seats selected"));
        assert!(text.contains("[Confirm Booking] (disabled)"));
    }

    #[test]
    fn confirmation_lists_sorted_seats() {
        let state = ConfirmationState {
            booking_id: cinema_api::BookingId(7),
            status: ConfirmationStatus::Loaded(fixtures::booking(7, 1, &[3, 1, 2])),
        };
        let text = confirmation_view(&state, &TimeDisplay::utc());
        assert!(text.contains("Seats:      1, 2, 3"));
        assert!(text.contains("Booking ID: #7"));
        assert!(text.contains("Status:     CONFIRMED"));
        assert!(text.contains("Monday, 6 January 2025, 06:30 PM"));
    }
}
