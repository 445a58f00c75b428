// 🎛️ Session Controller
// Single owner of everything that changes while the app runs: account store,
// current user, favorites, navigation history, selected venue, listing scope,
// bookings and submitted reviews. The catalog is read-only.
//
// Every mutation is synchronous and total. Failures come back as
// `SessionError` for the presentation layer to show inline or redirect on.

use crate::booking::{advance_payment, Booking, BookingBook, BookingRequest, BookingStatus};
use crate::catalog::{Catalog, Review, Venue, VenueType};
use crate::config::SessionConfig;
use crate::entities::{AccountStore, User};
use crate::error::{SessionError, SessionResult};
use crate::listing::{self, FilterOptions, ListingCriteria};
use crate::navigation::{Guard, View, ViewStack};
use crate::validation;
use chrono::NaiveDate;
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

/// Seeded account that owns the mock bookings
pub const DEMO_EMAIL: &str = "demo@hallfinder.pk";
pub const DEMO_PASSWORD: &str = "password";
const DEMO_NAME: &str = "Demo Guest";

/// Owner of bookings made while nobody is signed in
pub const GUEST_USER_ID: &str = "guest";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteToggle {
    Added,
    Removed,
    /// Nobody signed in; the user was sent to the sign-in view instead
    NeedsSignIn,
    /// No venue with that id; the set is unchanged
    UnknownVenue,
}

/// A review left from the profile page, kept beside the immutable catalog
#[derive(Debug, Clone, PartialEq)]
pub struct SubmittedReview {
    pub venue_id: u32,
    pub review: Review,
}

#[derive(Debug, Clone)]
struct ListingState {
    title: String,
    /// Venue ids in scope, in catalog order
    scope: Vec<u32>,
    criteria: ListingCriteria,
}

pub struct Session {
    catalog: Catalog,
    config: SessionConfig,
    accounts: AccountStore,
    current_user: Option<String>,
    favorites: BTreeSet<u32>,
    views: ViewStack,
    selected_venue: Option<u32>,
    listing: ListingState,
    bookings: BookingBook,
    reviews: Vec<SubmittedReview>,
    today: NaiveDate,
}

impl Session {
    pub fn new(catalog: Catalog, config: SessionConfig) -> Self {
        let today = chrono::Local::now().date_naive();
        Session::with_today(catalog, config, today)
    }

    /// Build a session with a fixed notion of "today"
    pub fn with_today(catalog: Catalog, config: SessionConfig, today: NaiveDate) -> Self {
        let mut accounts = AccountStore::new();
        let bookings = if config.seed_demo_account {
            let demo = User::new(
                DEMO_NAME.to_string(),
                DEMO_EMAIL.to_string(),
                DEMO_PASSWORD.to_string(),
            );
            let book = BookingBook::with_mock(&demo.id, today);
            accounts.register(demo);
            book
        } else {
            BookingBook::new()
        };

        let favorites = config
            .seed_favorites
            .iter()
            .copied()
            .filter(|id| catalog.find_by_id(*id).is_some())
            .collect();

        let scope: Vec<u32> = catalog.all().iter().map(|v| v.id).collect();
        let criteria = ListingCriteria::for_options(&FilterOptions::derive(&catalog.all()));
        let listing = ListingState {
            title: config.default_listing_title.clone(),
            scope,
            criteria,
        };

        info!(
            venues = catalog.len(),
            users = accounts.count(),
            "session started"
        );

        Session {
            catalog,
            config,
            accounts,
            current_user: None,
            favorites,
            views: ViewStack::default(),
            selected_venue: None,
            listing,
            bookings,
            reviews: Vec::new(),
            today,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn accounts(&self) -> &AccountStore {
        &self.accounts
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn featured(&self) -> Vec<&Venue> {
        self.catalog.featured(self.config.featured_count)
    }

    // ========================================================================
    // NAVIGATION
    // ========================================================================

    pub fn current_view(&self) -> View {
        self.views.current()
    }

    pub fn history(&self) -> &ViewStack {
        &self.views
    }

    pub fn navigate(&mut self, view: View) {
        debug!(?view, "push view");
        self.views.push(view);
    }

    /// Replace the history with a single root view
    pub fn navigate_root(&mut self, view: View) {
        debug!(?view, "reset view stack");
        self.views.reset(view);
    }

    pub fn back(&mut self) {
        self.views.pop();
    }

    fn guard_passes(&self, guard: Guard) -> bool {
        match guard {
            Guard::Open => true,
            Guard::SelectedVenue => self.selected_venue().is_some(),
            Guard::SignedIn => self.is_signed_in(),
            Guard::SignedOut => !self.is_signed_in(),
        }
    }

    /// The view to render. A guarded view whose precondition fails resets the
    /// stack to its fallback instead of rendering.
    pub fn resolve_view(&mut self) -> View {
        loop {
            let view = self.views.current();
            if self.guard_passes(view.guard()) {
                return view;
            }
            let fallback = view.fallback();
            warn!(?view, ?fallback, "view precondition failed");
            self.views.reset(fallback);
        }
    }

    // ========================================================================
    // VENUES + LISTING
    // ========================================================================

    pub fn selected_venue(&self) -> Option<&Venue> {
        self.selected_venue.and_then(|id| self.catalog.find_by_id(id))
    }

    /// Select a venue and show its detail view
    pub fn open_venue(&mut self, id: u32) -> SessionResult<()> {
        if self.catalog.find_by_id(id).is_none() {
            warn!(venue_id = id, "open unknown venue");
            return Err(SessionError::UnknownVenue(id));
        }
        self.selected_venue = Some(id);
        self.navigate(View::Detail);
        Ok(())
    }

    fn show_listing(&mut self, title: String, scope: Vec<u32>) {
        let criteria = {
            let venues = self.catalog.resolve(scope.iter().copied());
            ListingCriteria::for_options(&FilterOptions::derive(&venues))
        };
        debug!(%title, results = scope.len(), "show listing");
        self.listing = ListingState {
            title,
            scope,
            criteria,
        };
        self.navigate(View::Listing);
    }

    /// Free-text search over name/city/area. A blank term does nothing.
    pub fn search(&mut self, term: &str) -> bool {
        let term = term.trim();
        if term.is_empty() {
            return false;
        }
        let scope = self.catalog.search(term).iter().map(|v| v.id).collect();
        self.show_listing(format!("Results for \"{}\"", term), scope);
        true
    }

    pub fn browse_type(&mut self, venue_type: VenueType) {
        let scope = self.catalog.by_type(venue_type).iter().map(|v| v.id).collect();
        self.show_listing(format!("{} Halls", venue_type.as_str()), scope);
    }

    pub fn browse_city(&mut self, city: &str) {
        let scope = self.catalog.by_city(city).iter().map(|v| v.id).collect();
        self.show_listing(format!("Venues in {}", city), scope);
    }

    pub fn browse_all(&mut self) {
        let scope = self.catalog.all().iter().map(|v| v.id).collect();
        self.show_listing(self.config.default_listing_title.clone(), scope);
    }

    pub fn listing_title(&self) -> &str {
        &self.listing.title
    }

    pub fn listing_scope(&self) -> Vec<&Venue> {
        self.catalog.resolve(self.listing.scope.iter().copied())
    }

    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions::derive(&self.listing_scope())
    }

    pub fn criteria(&self) -> &ListingCriteria {
        &self.listing.criteria
    }

    pub fn criteria_mut(&mut self) -> &mut ListingCriteria {
        &mut self.listing.criteria
    }

    pub fn reset_criteria(&mut self) {
        self.listing.criteria = ListingCriteria::for_options(&self.filter_options());
    }

    /// Scope after filters and sort, recomputed on every call
    pub fn displayed_venues(&self) -> Vec<&Venue> {
        listing::apply(&self.listing_scope(), &self.listing.criteria)
    }

    // ========================================================================
    // AUTH
    // ========================================================================

    pub fn is_signed_in(&self) -> bool {
        self.current_user().is_some()
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user
            .as_deref()
            .and_then(|id| self.accounts.find_by_id(id))
    }

    fn current_user_id(&self) -> SessionResult<String> {
        self.current_user()
            .map(|u| u.id.clone())
            .ok_or(SessionError::NotAuthenticated)
    }

    pub fn signup(&mut self, name: &str, email: &str, password: &str) -> SessionResult<&User> {
        validation::validate_signup(name, email, password)?;

        if self.accounts.contains_email(email) {
            warn!(email, "signup with existing email");
            return Err(SessionError::DuplicateEmail);
        }

        let user = User::new(name.to_string(), email.to_string(), password.to_string());
        let id = user.id.clone();
        self.accounts.register(user);
        self.sign_in_as(&id);
        info!(user_id = %id, "signed up");

        self.accounts
            .find_by_id(&id)
            .ok_or(SessionError::NotAuthenticated)
    }

    pub fn login(&mut self, email: &str, password: &str) -> SessionResult<&User> {
        validation::validate_login(email, password)?;

        let id = match self.accounts.authenticate(email, password) {
            Some(user) => user.id.clone(),
            None => {
                warn!(email, "login failed");
                return Err(SessionError::InvalidCredentials);
            }
        };

        self.sign_in_as(&id);
        info!(user_id = %id, "logged in");

        self.accounts
            .find_by_id(&id)
            .ok_or(SessionError::NotAuthenticated)
    }

    /// Make `id` the current user. Favorites belong to whoever was signed in
    /// before, so a change of identity starts from an empty set.
    fn sign_in_as(&mut self, id: &str) {
        if self.current_user.as_deref().is_some_and(|previous| previous != id) {
            self.favorites.clear();
        }
        self.current_user = Some(id.to_string());
        self.views.reset(View::Home);
    }

    pub fn logout(&mut self) {
        if let Some(id) = self.current_user.take() {
            info!(user_id = %id, "logged out");
        }
        self.favorites.clear();
        self.views.reset(View::Home);
    }

    // ========================================================================
    // FAVORITES
    // ========================================================================

    pub fn toggle_favorite(&mut self, venue_id: u32) -> FavoriteToggle {
        if self.catalog.find_by_id(venue_id).is_none() {
            warn!(venue_id, "favorite unknown venue");
            return FavoriteToggle::UnknownVenue;
        }
        if !self.is_signed_in() {
            self.navigate(View::Auth);
            return FavoriteToggle::NeedsSignIn;
        }

        if self.favorites.remove(&venue_id) {
            debug!(venue_id, "favorite removed");
            FavoriteToggle::Removed
        } else {
            self.favorites.insert(venue_id);
            debug!(venue_id, "favorite added");
            FavoriteToggle::Added
        }
    }

    pub fn is_favorite(&self, venue_id: u32) -> bool {
        self.favorites.contains(&venue_id)
    }

    pub fn favorite_ids(&self) -> &BTreeSet<u32> {
        &self.favorites
    }

    /// Favorited venues in catalog order
    pub fn favorite_venues(&self) -> Vec<&Venue> {
        self.catalog.resolve(self.favorites.iter().copied())
    }

    // ========================================================================
    // PROFILE + ACCOUNT
    // ========================================================================

    pub fn update_profile(&mut self, name: &str, picture: Option<String>) -> SessionResult<&User> {
        let id = self.current_user_id()?;
        validation::validate_profile(name)?;

        let name = name.to_string();
        info!(user_id = %id, "profile updated");
        self.accounts
            .update(&id, |user| {
                user.name = name;
                user.picture = picture;
            })
            .ok_or(SessionError::NotAuthenticated)
    }

    pub fn change_password(
        &mut self,
        current_password: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> SessionResult<()> {
        validation::validate_new_password(
            new_password,
            confirm_password,
            self.config.min_password_length,
        )?;

        let user = self.current_user().ok_or(SessionError::NotAuthenticated)?;
        if !user.password_matches(current_password) {
            warn!(user_id = %user.id, "password change with wrong current password");
            return Err(SessionError::WrongPassword);
        }

        let id = user.id.clone();
        let new_password = new_password.to_string();
        self.accounts
            .update(&id, |user| user.password = new_password)
            .ok_or(SessionError::NotAuthenticated)?;
        info!(user_id = %id, "password changed");
        Ok(())
    }

    /// Remove the signed-in account, then log out
    pub fn delete_account(&mut self) -> SessionResult<()> {
        let id = self.current_user_id()?;
        self.accounts.remove(&id);
        info!(user_id = %id, "account deleted");
        self.logout();
        Ok(())
    }

    // ========================================================================
    // BOOKINGS + REVIEWS
    // ========================================================================

    /// Blank booking form for the selected venue
    pub fn booking_form(&self) -> SessionResult<BookingRequest> {
        self.selected_venue()
            .map(BookingRequest::for_venue)
            .ok_or(SessionError::NoVenueSelected)
    }

    pub fn advance_payment(&self) -> SessionResult<u64> {
        self.selected_venue()
            .map(|v| advance_payment(v.price_per_event, self.config.advance_payment_ratio))
            .ok_or(SessionError::NoVenueSelected)
    }

    /// Confirm a booking for the selected venue and land on the profile view
    pub fn book_selected_venue(&mut self, request: &BookingRequest) -> SessionResult<&Booking> {
        let venue = self.selected_venue().ok_or(SessionError::NoVenueSelected)?;
        let venue_id = venue.id;
        let event_date = request.validate(venue, self.today)?;

        let user_id = self
            .current_user
            .clone()
            .unwrap_or_else(|| GUEST_USER_ID.to_string());

        info!(
            venue_id,
            %user_id,
            %event_date,
            guests = request.guests,
            event_type = request.event_type.as_str(),
            "booking confirmed"
        );
        self.views.reset(View::Profile);

        Ok(self.bookings.record(
            venue_id,
            &user_id,
            event_date,
            request.event_type,
            request.guests,
            BookingStatus::Confirmed,
        ))
    }

    pub fn upcoming_bookings(&self) -> Vec<&Booking> {
        match &self.current_user {
            Some(id) => self.bookings.upcoming(id, self.today),
            None => Vec::new(),
        }
    }

    pub fn past_bookings(&self) -> Vec<&Booking> {
        match &self.current_user {
            Some(id) => self.bookings.past(id, self.today),
            None => Vec::new(),
        }
    }

    pub fn submit_review(&mut self, venue_id: u32, rating: u8, comment: &str) -> SessionResult<()> {
        if self.catalog.find_by_id(venue_id).is_none() {
            return Err(SessionError::UnknownVenue(venue_id));
        }
        validation::validate_review(rating)?;

        let author = self
            .current_user()
            .map(|u| u.name.clone())
            .unwrap_or_else(|| "Guest".to_string());

        info!(venue_id, rating, %author, "review submitted");
        self.reviews.push(SubmittedReview {
            venue_id,
            review: Review {
                author,
                rating: f64::from(rating),
                comment: comment.to_string(),
            },
        });
        Ok(())
    }

    pub fn submitted_reviews(&self, venue_id: u32) -> Vec<&Review> {
        self.reviews
            .iter()
            .filter(|r| r.venue_id == venue_id)
            .map(|r| &r.review)
            .collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================
