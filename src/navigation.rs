// 🧭 View Stack - navigation history of named views

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum View {
    Home,
    Listing,
    Detail,
    Booking,
    Favorites,
    Profile,
    Auth,
    Settings,
}

/// Precondition a view needs before it can be rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    /// Always renders
    Open,

    /// Needs a selected venue, otherwise reset to `Home`
    SelectedVenue,

    /// Needs a signed-in user, otherwise reset to `Auth`
    SignedIn,

    /// Needs nobody signed in, otherwise reset to `Home`
    SignedOut,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            View::Home => "Home",
            View::Listing => "Listing",
            View::Detail => "Venue",
            View::Booking => "Booking",
            View::Favorites => "Favorites",
            View::Profile => "My Bookings",
            View::Auth => "Sign In",
            View::Settings => "Settings",
        }
    }

    pub fn guard(&self) -> Guard {
        match self {
            View::Home | View::Listing => Guard::Open,
            View::Detail | View::Booking => Guard::SelectedVenue,
            View::Favorites | View::Profile | View::Settings => Guard::SignedIn,
            View::Auth => Guard::SignedOut,
        }
    }

    /// Where a failed guard sends the user
    pub fn fallback(&self) -> View {
        match self.guard() {
            Guard::SignedIn => View::Auth,
            _ => View::Home,
        }
    }
}

/// Ordered navigation history. Never empty; the current view is the last entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewStack {
    entries: Vec<View>,
}

impl ViewStack {
    pub fn new(root: View) -> Self {
        ViewStack {
            entries: vec![root],
        }
    }

    pub fn current(&self) -> View {
        // entries is never empty
        self.entries[self.entries.len() - 1]
    }

    /// Append `view` unless it is already on top
    pub fn push(&mut self, view: View) {
        if self.current() != view {
            self.entries.push(view);
        }
    }

    /// Replace the whole history with `[view]`
    pub fn reset(&mut self, view: View) {
        self.entries.clear();
        self.entries.push(view);
    }

    /// Drop the top entry; no-op at the root
    pub fn pop(&mut self) {
        if self.entries.len() > 1 {
            self.entries.pop();
        }
    }

    pub fn can_go_back(&self) -> bool {
        self.entries.len() > 1
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[View] {
        &self.entries
    }
}

impl Default for ViewStack {
    fn default() -> Self {
        ViewStack::new(View::Home)
    }
}

// ============================================================================
// TESTS
// ============================================================================
