//! Availability calculator.
//!
//! Derives what a viewer sees for one class session from three inputs:
//! the session capacity, the number of `booked` rows, and the viewer's own
//! booking (if any). Pure and synchronous; the schedule, session detail and
//! booking placement all go through it so the label a member sees and the
//! status their booking receives can never disagree.
//!
//! | Own booking            | Full  | Action                    |
//! |------------------------|-------|---------------------------|
//! | none / cancelled       | no    | Book                      |
//! | none / cancelled       | yes   | Join waitlist             |
//! | booked                 | -     | You're booked (disabled)  |
//! | waitlist               | -     | On waitlist (disabled)    |
//! | anonymous viewer       | -     | Log in to book (disabled) |

use serde::{Deserialize, Serialize};

use super::BookingStatus;

/// Capacity snapshot for a single session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    capacity: u32,
    booked_count: u32,
}

impl Availability {
    pub fn new(capacity: u32, booked_count: u32) -> Self {
        Self {
            capacity,
            booked_count,
        }
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn booked_count(&self) -> u32 {
        self.booked_count
    }

    /// Never negative, even when a session is over-booked.
    pub fn spots_left(&self) -> u32 {
        self.capacity.saturating_sub(self.booked_count)
    }

    pub fn is_full(&self) -> bool {
        self.spots_left() == 0
    }

    /// Status a new booking request receives right now.
    pub fn status_for_new_booking(&self) -> BookingStatus {
        if self.is_full() {
            BookingStatus::Waitlist
        } else {
            BookingStatus::Booked
        }
    }

    /// Slot status from the viewer's own booking. A cancelled row counts as no booking.
    pub fn slot_status(&self, own: Option<BookingStatus>) -> SlotStatus {
        match own {
            Some(BookingStatus::Booked) => SlotStatus::AlreadyBooked,
            Some(BookingStatus::Waitlist) => SlotStatus::AlreadyWaitlisted,
            Some(BookingStatus::Cancelled) | None => {
                if self.is_full() {
                    SlotStatus::Full
                } else {
                    SlotStatus::HasSpace
                }
            }
        }
    }

    /// Action offered to a viewer.
    pub fn action_for(&self, viewer: Viewer) -> BookingAction {
        match viewer {
            Viewer::Anonymous => BookingAction::LogInToBook,
            Viewer::Member(own) => self.slot_status(own).action(),
        }
    }
}

/// Who is looking at the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewer {
    Anonymous,
    /// Signed-in member with their own booking status for the session, if any.
    Member(Option<BookingStatus>),
}

/// Derived, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SlotStatus {
    Full,
    HasSpace,
    AlreadyBooked,
    AlreadyWaitlisted,
}

impl SlotStatus {
    pub fn action(&self) -> BookingAction {
        match self {
            SlotStatus::HasSpace => BookingAction::Book,
            SlotStatus::Full => BookingAction::JoinWaitlist,
            SlotStatus::AlreadyBooked => BookingAction::Booked,
            SlotStatus::AlreadyWaitlisted => BookingAction::OnWaitlist,
        }
    }
}

/// The booking button a client renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BookingAction {
    Book,
    JoinWaitlist,
    Booked,
    OnWaitlist,
    LogInToBook,
}

impl BookingAction {
    pub fn label(&self) -> &'static str {
        match self {
            BookingAction::Book => "Book",
            BookingAction::JoinWaitlist => "Join waitlist",
            BookingAction::Booked => "You're booked",
            BookingAction::OnWaitlist => "On waitlist",
            BookingAction::LogInToBook => "Log in to book",
        }
    }

    /// Whether pressing the button creates a booking.
    pub fn enabled(&self) -> bool {
        matches!(self, BookingAction::Book | BookingAction::JoinWaitlist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn capacity_ten_with_ten_booked_is_full_and_waitlists() {
        let availability = Availability::new(10, 10);
        assert_eq!(availability.spots_left(), 0);
        assert!(availability.is_full());
        assert_eq!(availability.status_for_new_booking(), BookingStatus::Waitlist);
    }

    #[test]
    fn capacity_ten_with_four_booked_has_space_and_books() {
        let availability = Availability::new(10, 4);
        assert_eq!(availability.spots_left(), 6);
        assert!(!availability.is_full());
        assert_eq!(availability.status_for_new_booking(), BookingStatus::Booked);
    }

    #[test]
    fn overbooked_session_reports_zero_spots() {
        let availability = Availability::new(5, 7);
        assert_eq!(availability.spots_left(), 0);
        assert!(availability.is_full());
    }

    #[test]
    fn zero_capacity_is_full() {
        assert!(Availability::new(0, 0).is_full());
    }

    #[test]
    fn cancelled_own_booking_is_treated_as_none() {
        let availability = Availability::new(8, 3);
        assert_eq!(
            availability.slot_status(Some(BookingStatus::Cancelled)),
            SlotStatus::HasSpace
        );
        assert_eq!(
            availability.action_for(Viewer::Member(Some(BookingStatus::Cancelled))),
            BookingAction::Book
        );
    }

    #[test]
    fn anonymous_viewer_is_asked_to_log_in() {
        let availability = Availability::new(8, 8);
        let action = availability.action_for(Viewer::Anonymous);
        assert_eq!(action, BookingAction::LogInToBook);
        assert_eq!(action.label(), "Log in to book");
        assert!(!action.enabled());
    }

    #[test]
    fn labels_match_button_copy() {
        assert_eq!(BookingAction::Book.label(), "Book");
        assert_eq!(BookingAction::JoinWaitlist.label(), "Join waitlist");
        assert_eq!(BookingAction::Booked.label(), "You're booked");
        assert_eq!(BookingAction::OnWaitlist.label(), "On waitlist");
    }

    #[test]
    fn only_book_and_join_waitlist_are_enabled() {
        assert!(BookingAction::Book.enabled());
        assert!(BookingAction::JoinWaitlist.enabled());
        assert!(!BookingAction::Booked.enabled());
        assert!(!BookingAction::OnWaitlist.enabled());
    }

    #[test]
    fn slot_status_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_string(&SlotStatus::AlreadyWaitlisted).unwrap(),
            "\"already-waitlisted\""
        );
        assert_eq!(
            serde_json::to_string(&SlotStatus::HasSpace).unwrap(),
            "\"has-space\""
        );
    }

    fn own_booking() -> impl Strategy<Value = Option<BookingStatus>> {
        prop_oneof![
            Just(None),
            Just(Some(BookingStatus::Booked)),
            Just(Some(BookingStatus::Waitlist)),
            Just(Some(BookingStatus::Cancelled)),
        ]
    }

    proptest! {
        #[test]
        fn spots_left_is_clamped_difference(capacity in 0u32..1_000, booked in 0u32..1_000) {
            let availability = Availability::new(capacity, booked);
            let expected = (capacity as i64 - booked as i64).max(0) as u32;
            prop_assert_eq!(availability.spots_left(), expected);
        }

        #[test]
        fn full_iff_no_spots_left(capacity in 0u32..1_000, booked in 0u32..1_000) {
            let availability = Availability::new(capacity, booked);
            prop_assert_eq!(availability.is_full(), availability.spots_left() == 0);
        }

        #[test]
        fn booked_member_is_never_offered_book(capacity in 0u32..200, booked in 0u32..200) {
            let action = Availability::new(capacity, booked)
                .action_for(Viewer::Member(Some(BookingStatus::Booked)));
            prop_assert_ne!(action, BookingAction::Book);
            prop_assert_eq!(action, BookingAction::Booked);
        }

        #[test]
        fn waitlisted_member_is_never_offered_join_waitlist(capacity in 0u32..200, booked in 0u32..200) {
            let action = Availability::new(capacity, booked)
                .action_for(Viewer::Member(Some(BookingStatus::Waitlist)));
            prop_assert_ne!(action, BookingAction::JoinWaitlist);
            prop_assert_eq!(action, BookingAction::OnWaitlist);
        }

        #[test]
        fn enabled_action_matches_new_booking_status(
            capacity in 0u32..200,
            booked in 0u32..200,
            own in own_booking(),
        ) {
            let availability = Availability::new(capacity, booked);
            match availability.action_for(Viewer::Member(own)) {
                BookingAction::Book => {
                    prop_assert_eq!(availability.status_for_new_booking(), BookingStatus::Booked)
                }
                BookingAction::JoinWaitlist => {
                    prop_assert_eq!(availability.status_for_new_booking(), BookingStatus::Waitlist)
                }
                other => prop_assert!(!other.enabled()),
            }
        }
    }
}
