//! Seat selection for one show
//!
//! Holds the last-known occupancy and the customer's picks, and keeps the
//! picks inside `[1, total_seats]`, outside the occupied set, and at most
//! [`MAX_SEATS_PER_BOOKING`] long. The service still has the final say.

use cinema_api::{MAX_TOTAL_SEATS, ShowId};
use std::collections::BTreeSet;

/// Most seats one booking may hold
pub const MAX_SEATS_PER_BOOKING: usize = 5;

/// Shown when a sixth seat is clicked
pub const CAPACITY_MESSAGE: &str = "You can only select up to 5 seats";

/// How a seat is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatState {
    /// Taken by another booking
    Booked,
    /// Picked by this customer
    Selected,
    /// Free to pick
    Available,
}

/// Outcome of [`SeatSelection::toggle`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    /// The seat was added
    Selected,
    /// The seat was removed
    Deselected,
    /// The seat is booked; nothing changed
    Occupied,
    /// No such seat; nothing changed
    OutOfRange,
    /// Already holding the maximum; nothing changed but the capacity message
    AtCapacity,
}

/// Picks for one show, in click order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatSelection {
    show_id: ShowId,
    total_seats: u32,
    occupied: BTreeSet<u32>,
    selected: Vec<u32>,
    capacity_message: Option<&'static str>,
}

impl SeatSelection {
    /// Empty selection for `show_id`; seat count unknown until the show loads
    #[must_use]
    pub const fn for_show(show_id: ShowId) -> Self {
        Self {
            show_id,
            total_seats: 0,
            occupied: BTreeSet::new(),
            selected: Vec::new(),
            capacity_message: None,
        }
    }

    /// Switch to `show_id`, dropping everything if it differs from the current show
    ///
    /// Returns whether a reset happened.
    pub fn reset_for(&mut self, show_id: ShowId) -> bool {
        if self.show_id == show_id {
            return false;
        }
        *self = Self::for_show(show_id);
        true
    }

    /// Show this selection belongs to
    #[must_use]
    pub const fn show_id(&self) -> ShowId {
        self.show_id
    }

    /// Seats numbered `1..=total_seats`
    #[must_use]
    pub const fn total_seats(&self) -> u32 {
        self.total_seats
    }

    /// Set the seat count, dropping picks beyond it
    ///
    /// Counts above [`MAX_TOTAL_SEATS`] are clamped so the grid stays bounded.
    pub fn set_total_seats(&mut self, total_seats: u32) {
        let total_seats = total_seats.min(MAX_TOTAL_SEATS);
        self.total_seats = total_seats;
        self.selected.retain(|seat| *seat <= total_seats);
    }

    /// Replace the occupied set with the service's view, dropping picks that became occupied
    pub fn set_occupied(&mut self, occupied: BTreeSet<u32>) {
        self.occupied = occupied;
        let occupied = &self.occupied;
        self.selected.retain(|seat| !occupied.contains(seat));
    }

    /// Click on `seat`
    pub fn toggle(&mut self, seat: u32) -> Toggle {
        if self.occupied.contains(&seat) {
            return Toggle::Occupied;
        }
        if seat == 0 || seat > self.total_seats {
            return Toggle::OutOfRange;
        }
        if let Some(index) = self.selected.iter().position(|s| *s == seat) {
            self.selected.remove(index);
            return Toggle::Deselected;
        }
        if self.selected.len() >= MAX_SEATS_PER_BOOKING {
            self.capacity_message = Some(CAPACITY_MESSAGE);
            return Toggle::AtCapacity;
        }
        self.selected.push(seat);
        self.capacity_message = None;
        Toggle::Selected
    }

    /// Occupied wins over selected
    #[must_use]
    pub fn seat_state(&self, seat: u32) -> SeatState {
        if self.occupied.contains(&seat) {
            SeatState::Booked
        } else if self.selected.contains(&seat) {
            SeatState::Selected
        } else {
            SeatState::Available
        }
    }

    /// Every seat with its state, ascending
    pub fn seats(&self) -> impl Iterator<Item = (u32, SeatState)> + '_ {
        (1..=self.total_seats).map(|seat| (seat, self.seat_state(seat)))
    }

    /// Picks in click order
    #[must_use]
    pub fn selected(&self) -> &[u32] {
        &self.selected
    }

    /// Picks ascending
    #[must_use]
    pub fn sorted(&self) -> Vec<u32> {
        let mut sorted = self.selected.clone();
        sorted.sort_unstable();
        sorted
    }

    /// Whether nothing is picked
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Last-known occupied seats
    #[must_use]
    pub const fn occupied(&self) -> &BTreeSet<u32> {
        &self.occupied
    }

    /// Pending capacity message, if the last add was refused
    #[must_use]
    pub const fn capacity_message(&self) -> Option<&'static str> {
        self.capacity_message
    }

    /// Dismiss the capacity message
    pub fn clear_message(&mut self) {
        self.capacity_message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn selection(total: u32, occupied: &[u32]) -> SeatSelection {
        let mut selection = SeatSelection::for_show(ShowId(1));
        selection.set_total_seats(total);
        selection.set_occupied(occupied.iter().copied().collect());
        selection
    }

    #[test]
    fn huge_auditorium_is_clamped() {
        let selection = selection(u32::MAX, &[]);
        assert_eq!(selection.total_seats(), MAX_TOTAL_SEATS);
        assert_eq!(selection.seats().count(), MAX_TOTAL_SEATS as usize);
    }

    #[test]
    fn occupied_seat_is_never_added() {
        let mut s = selection(10, &[4]);
        assert_eq!(s.toggle(4), Toggle::Occupied);
        assert!(s.is_empty());
        assert_eq!(s.seat_state(4), SeatState::Booked);
    }

    #[test]
    fn sixth_seat_is_refused_with_message() {
        let mut s = selection(10, &[]);
        for seat in 1..=5 {
            assert_eq!(s.toggle(seat), Toggle::Selected);
        }
        assert_eq!(s.toggle(6), Toggle::AtCapacity);
        assert_eq!(s.selected(), &[1, 2, 3, 4, 5]);
        assert_eq!(s.capacity_message(), Some(CAPACITY_MESSAGE));

        assert_eq!(s.toggle(5), Toggle::Deselected);
        assert_eq!(s.capacity_message(), Some(CAPACITY_MESSAGE));
        assert_eq!(s.toggle(6), Toggle::Selected);
        assert_eq!(s.capacity_message(), None);
    }

    #[test]
    fn seats_outside_the_auditorium_are_ignored() {
        let mut s = selection(10, &[]);
        assert_eq!(s.toggle(0), Toggle::OutOfRange);
        assert_eq!(s.toggle(11), Toggle::OutOfRange);
        assert!(s.is_empty());
    }

    #[test]
    fn changing_show_resets() {
        let mut s = selection(10, &[2]);
        s.toggle(1);
        assert!(!s.reset_for(ShowId(1)));
        assert_eq!(s.selected(), &[1]);

        assert!(s.reset_for(ShowId(2)));
        assert!(s.is_empty());
        assert!(s.occupied().is_empty());
        assert_eq!(s.show_id(), ShowId(2));
    }

    #[test]
    fn newly_occupied_picks_are_dropped() {
        let mut s = selection(10, &[]);
        s.toggle(3);
        s.toggle(7);
        s.set_occupied([7].into_iter().collect());
        assert_eq!(s.selected(), &[3]);
    }

    #[test]
    fn sorted_keeps_click_order_intact() {
        let mut s = selection(10, &[]);
        for seat in [3, 1, 2] {
            s.toggle(seat);
        }
        assert_eq!(s.sorted(), vec![1, 2, 3]);
        assert_eq!(s.selected(), &[3, 1, 2]);
    }

    proptest! {
        #[test]
        fn clicks_preserve_invariants(
            total in 1u32..60,
            occupied in prop::collection::btree_set(1u32..60, 0..20),
            clicks in prop::collection::vec(0u32..65, 0..40),
        ) {
            let mut s = SeatSelection::for_show(ShowId(1));
            s.set_total_seats(total);
            s.set_occupied(occupied.clone());
            for seat in clicks {
                s.toggle(seat);
                prop_assert!(s.selected().len() <= MAX_SEATS_PER_BOOKING);
                prop_assert!(s.selected().iter().all(|seat| (1..=total).contains(seat)));
                prop_assert!(s.selected().iter().all(|seat| !occupied.contains(seat)));
                let distinct: BTreeSet<_> = s.selected().iter().collect();
                prop_assert_eq!(distinct.len(), s.selected().len());
            }
        }

        #[test]
        fn double_toggle_restores_selection(
            picks in prop::collection::btree_set(1u32..30, 0..4),
            seat in 1u32..30,
        ) {
            let mut s = SeatSelection::for_show(ShowId(1));
            s.set_total_seats(30);
            for pick in &picks {
                s.toggle(*pick);
            }
            let before = s.selected().to_vec();
            let mut after = {
                s.toggle(seat);
                s.toggle(seat);
                s.selected().to_vec()
            };
            let mut before_sorted = before;
            before_sorted.sort_unstable();
            after.sort_unstable();
            prop_assert_eq!(before_sorted, after);
        }
    }
}
