// Hall Finder - Core Library
// Exposes all modules for use in the TUI binary and tests

pub mod catalog;     // Venue records + seed data
pub mod navigation;  // View stack + guards
pub mod listing;     // Filter / sort engine
pub mod validation;  // Form validation
pub mod booking;     // Simulated reservations
pub mod entities;    // User records + account store
pub mod config;
pub mod error;
pub mod session;     // Session controller

// Re-export commonly used types
pub use catalog::{Capacity, Catalog, GeoPoint, Review, Venue, VenueType};
pub use navigation::{Guard, View, ViewStack};
pub use listing::{
    apply, rating_in_band,
    FilterOptions, ListingCriteria, PriceRange, SortOrder,
};
pub use validation::{FormErrors, ValidationError};
pub use booking::{
    advance_payment,
    Booking, BookingAction, BookingBook, BookingRequest, BookingStatus, EventType,
};
pub use entities::{AccountStore, User};
pub use config::SessionConfig;
pub use error::{SessionError, SessionResult};
pub use session::{FavoriteToggle, Session, SubmittedReview};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
