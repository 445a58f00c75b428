// 📅 Bookings - simulated reservations
// Status is whatever was recorded; "past" vs "upcoming" is derived from the
// event date relative to today. There is no transition logic.

use crate::catalog::Venue;
use crate::validation::{FormErrors, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// TYPES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EventType {
    #[default]
    Shaadi,
    Mehndi,
    Walima,
    Corporate,
}

impl EventType {
    pub const ALL: [EventType; 4] = [
        EventType::Shaadi,
        EventType::Mehndi,
        EventType::Walima,
        EventType::Corporate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Shaadi => "Shaadi",
            EventType::Mehndi => "Mehndi",
            EventType::Walima => "Walima",
            EventType::Corporate => "Corporate",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            EventType::Shaadi => EventType::Mehndi,
            EventType::Mehndi => EventType::Walima,
            EventType::Walima => EventType::Corporate,
            EventType::Corporate => EventType::Shaadi,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingStatus {
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::Completed => "Completed",
            BookingStatus::Cancelled => "Cancelled",
        }
    }
}

/// What the profile page offers for a booking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingAction {
    Manage,
    LeaveReview,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: u32,
    pub venue_id: u32,
    pub user_id: String,
    pub event_date: NaiveDate,
    pub event_type: EventType,
    pub guests: u32,
    pub status: BookingStatus,
}

impl Booking {
    pub fn is_past(&self, today: NaiveDate) -> bool {
        self.event_date < today
    }

    pub fn action(&self, today: NaiveDate) -> BookingAction {
        if self.is_past(today) {
            BookingAction::LeaveReview
        } else {
            BookingAction::Manage
        }
    }
}

// ============================================================================
// BOOKING REQUEST
// ============================================================================

/// Raw booking form input
#[derive(Debug, Clone, PartialEq)]
pub struct BookingRequest {
    /// `YYYY-MM-DD`
    pub date: String,
    pub guests: u32,
    pub event_type: EventType,
}

impl BookingRequest {
    /// Form defaults for a venue: no date, minimum capacity, Shaadi
    pub fn for_venue(venue: &Venue) -> Self {
        BookingRequest {
            date: String::new(),
            guests: venue.capacity.min,
            event_type: EventType::default(),
        }
    }

    /// Check the request against the venue; returns the parsed event date
    pub fn validate(&self, venue: &Venue, today: NaiveDate) -> Result<NaiveDate, FormErrors> {
        let mut errors = Vec::new();

        let date = if self.date.trim().is_empty() {
            errors.push(ValidationError::new("date", "Please choose an event date."));
            None
        } else {
            match NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d") {
                Ok(date) if date < today => {
                    errors.push(ValidationError::new(
                        "date",
                        "Event date cannot be in the past.",
                    ));
                    None
                }
                Ok(date) => Some(date),
                Err(_) => {
                    errors.push(ValidationError::new("date", "Date must be YYYY-MM-DD."));
                    None
                }
            }
        };

        if !venue.fits_guests(self.guests) {
            errors.push(ValidationError {
                field: "guests".to_string(),
                message: format!(
                    "Guests must be between {} and {}.",
                    venue.capacity.min, venue.capacity.max
                ),
            });
        }

        match date {
            Some(date) if errors.is_empty() => Ok(date),
            _ => Err(FormErrors(errors)),
        }
    }
}

/// Up-front payment for a venue price
pub fn advance_payment(price: u64, ratio: f64) -> u64 {
    (price as f64 * ratio).round() as u64
}

// ============================================================================
// BOOKING BOOK
// ============================================================================

#[derive(Debug, Clone)]
pub struct BookingBook {
    bookings: Vec<Booking>,
    next_id: u32,
}

impl BookingBook {
    pub fn new() -> Self {
        BookingBook {
            bookings: Vec::new(),
            next_id: 1,
        }
    }

    /// Demo bookings for a seeded account, spread around `today`
    pub fn with_mock(user_id: &str, today: NaiveDate) -> Self {
        let mut book = BookingBook::new();
        let mock = [
            (3, 45, EventType::Shaadi, BookingStatus::Confirmed),
            (6, 120, EventType::Walima, BookingStatus::Confirmed),
            (1, -60, EventType::Mehndi, BookingStatus::Completed),
            (4, -200, EventType::Corporate, BookingStatus::Cancelled),
        ];

        for (venue_id, offset_days, event_type, status) in mock {
            let event_date = today + chrono::Duration::days(offset_days);
            book.record(venue_id, user_id, event_date, event_type, 250, status);
        }

        book
    }

    pub fn record(
        &mut self,
        venue_id: u32,
        user_id: &str,
        event_date: NaiveDate,
        event_type: EventType,
        guests: u32,
        status: BookingStatus,
    ) -> &Booking {
        let booking = Booking {
            id: self.next_id,
            venue_id,
            user_id: user_id.to_string(),
            event_date,
            event_type,
            guests,
            status,
        };
        self.next_id = booking.id + 1;
        self.bookings.push(booking);
        &self.bookings[self.bookings.len() - 1]
    }

    pub fn for_user(&self, user_id: &str) -> Vec<&Booking> {
        self.bookings.iter().filter(|b| b.user_id == user_id).collect()
    }

    /// Date today or later, soonest first
    pub fn upcoming(&self, user_id: &str, today: NaiveDate) -> Vec<&Booking> {
        let mut upcoming: Vec<&Booking> = self
            .for_user(user_id)
            .into_iter()
            .filter(|b| !b.is_past(today))
            .collect();
        upcoming.sort_by_key(|b| b.event_date);
        upcoming
    }

    /// Date before today, most recent first
    pub fn past(&self, user_id: &str, today: NaiveDate) -> Vec<&Booking> {
        let mut past: Vec<&Booking> = self
            .for_user(user_id)
            .into_iter()
            .filter(|b| b.is_past(today))
            .collect();
        past.sort_by(|a, b| b.event_date.cmp(&a.event_date));
        past
    }
}

impl Default for BookingBook {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::venue;
    use crate::catalog::VenueType;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn request(date: &str, guests: u32) -> BookingRequest {
        BookingRequest {
            date: date.to_string(),
            guests,
            event_type: EventType::Walima,
        }
    }

    #[test]
    fn test_valid_request() {
        let hall = venue(1, "Lahore", VenueType::Banquet, 200_000, 4.0);
        let date = request("2025-06-01", 100).validate(&hall, today()).unwrap();
        assert_eq!(date, today());
    }

    #[test]
    fn test_request_missing_date() {
        let hall = venue(1, "Lahore", VenueType::Banquet, 200_000, 4.0);
        let errors = request("", 100).validate(&hall, today()).unwrap_err();
        assert!(errors.for_field("date").is_some());
    }

    #[test]
    fn test_request_bad_and_past_dates() {
        let hall = venue(1, "Lahore", VenueType::Banquet, 200_000, 4.0);

        let errors = request("01/07/2025", 100).validate(&hall, today()).unwrap_err();
        assert_eq!(errors.first_message(), Some("Date must be YYYY-MM-DD."));

        let errors = request("2025-05-31", 100).validate(&hall, today()).unwrap_err();
        assert_eq!(errors.first_message(), Some("Event date cannot be in the past."));
    }

    #[test]
    fn test_request_guests_outside_capacity() {
        let hall = venue(1, "Lahore", VenueType::Banquet, 200_000, 4.0);
        let errors = request("2025-07-01", 800).validate(&hall, today()).unwrap_err();
        let guests = errors.for_field("guests").unwrap();
        assert_eq!(guests.message, "Guests must be between 100 and 500.");
    }

    #[test]
    fn test_form_defaults() {
        let hall = venue(1, "Lahore", VenueType::Banquet, 200_000, 4.0);
        let form = BookingRequest::for_venue(&hall);
        assert_eq!(form.guests, 100);
        assert_eq!(form.event_type, EventType::Shaadi);
        assert!(form.date.is_empty());
    }

    #[test]
    fn test_advance_payment_quarter() {
        assert_eq!(advance_payment(450_000, 0.25), 112_500);
        assert_eq!(advance_payment(0, 0.25), 0);
    }

    #[test]
    fn test_upcoming_and_past_partition() {
        let book = BookingBook::with_mock("demo", today());
        assert_eq!(book.for_user("demo").len(), 4);

        let upcoming = book.upcoming("demo", today());
        let dates: Vec<NaiveDate> = upcoming.iter().map(|b| b.event_date).collect();
        assert_eq!(dates.len(), 2);
        assert!(dates[0] < dates[1]);
        assert!(upcoming.iter().all(|b| b.action(today()) == BookingAction::Manage));

        let past = book.past("demo", today());
        assert_eq!(past.len(), 2);
        assert!(past[0].event_date > past[1].event_date);
        assert!(past.iter().all(|b| b.action(today()) == BookingAction::LeaveReview));

        assert!(book.upcoming("someone-else", today()).is_empty());
    }

    #[test]
    fn test_booking_dated_today_is_upcoming() {
        let mut book = BookingBook::new();
        book.record(2, "u", today(), EventType::Walima, 200, BookingStatus::Confirmed);

        let upcoming = book.upcoming("u", today());
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].event_date, today());
        assert_eq!(upcoming[0].action(today()), BookingAction::Manage);
        assert!(book.past("u", today()).is_empty());

        // One day later it has moved to the past
        let tomorrow = today() + chrono::Duration::days(1);
        assert!(book.upcoming("u", tomorrow).is_empty());
        assert_eq!(book.past("u", tomorrow).len(), 1);
    }

    #[test]
    fn test_record_assigns_increasing_ids() {
        let mut book = BookingBook::new();
        let first = book
            .record(1, "u", today(), EventType::Shaadi, 150, BookingStatus::Confirmed)
            .id;
        let second = book
            .record(2, "u", today(), EventType::Mehndi, 150, BookingStatus::Confirmed)
            .id;
        assert_eq!(first, 1);
        assert_eq!(second, 2);
    }

    #[test]
    fn test_event_type_cycles() {
        let mut event = EventType::default();
        for _ in 0..EventType::ALL.len() {
            event = event.next();
        }
        assert_eq!(event, EventType::Shaadi);
    }
}
