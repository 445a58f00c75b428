use hall_finder::booking::{BookingAction, BookingRequest};
use hall_finder::catalog::{Venue, VenueType};
use hall_finder::error::SessionError;
use hall_finder::navigation::View;
use hall_finder::session::{FavoriteToggle, Session};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::io;

/// Step used by `[` / `]` on the price ceiling
const PRICE_STEP: u64 = 50_000;

// ============================================================================
// TEXT FORMS
// ============================================================================

#[derive(Debug, Clone)]
pub struct Field {
    pub label: &'static str,
    pub value: String,
    pub secret: bool,
}

impl Field {
    fn text(label: &'static str) -> Self {
        Field {
            label,
            value: String::new(),
            secret: false,
        }
    }

    fn secret(label: &'static str) -> Self {
        Field {
            label,
            value: String::new(),
            secret: true,
        }
    }

    fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }
}

#[derive(Debug, Clone)]
pub struct TextForm {
    pub fields: Vec<Field>,
    pub focus: usize,
}

impl TextForm {
    fn new(fields: Vec<Field>) -> Self {
        TextForm { fields, focus: 0 }
    }

    fn value(&self, index: usize) -> &str {
        self.fields.get(index).map(|f| f.value.as_str()).unwrap_or("")
    }

    fn next_field(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    fn previous_field(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    fn push_char(&mut self, c: char) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.push(c);
        }
    }

    fn pop_char(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.pop();
        }
    }

    fn clear(&mut self) {
        for field in &mut self.fields {
            field.value.clear();
        }
        self.focus = 0;
    }

    fn lines(&self) -> Vec<Line<'static>> {
        self.fields
            .iter()
            .enumerate()
            .map(|(i, field)| {
                let shown = if field.secret {
                    "*".repeat(field.value.chars().count())
                } else {
                    field.value.clone()
                };
                let focused = i == self.focus;
                let cursor = if focused { "_" } else { "" };
                Line::from(vec![
                    Span::styled(
                        format!("  {:<18}", field.label),
                        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("{}{}", shown, cursor),
                        if focused {
                            Style::default().fg(Color::Yellow)
                        } else {
                            Style::default().fg(Color::White)
                        },
                    ),
                ])
            })
            .collect()
    }
}

// ============================================================================
// APP STATE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Signup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsTab {
    Profile,
    Account,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

#[derive(Debug, Clone)]
pub struct ReviewDraft {
    pub venue_id: u32,
    pub rating: u8,
    pub comment: String,
}

pub struct App {
    pub session: Session,
    pub table_state: TableState,
    pub search: Option<String>,
    pub capacity_input: Option<String>,
    pub auth_mode: AuthMode,
    pub auth_form: TextForm,
    pub settings_tab: SettingsTab,
    pub profile_form: TextForm,
    pub password_form: TextForm,
    pub confirm_delete: bool,
    pub booking: Option<BookingRequest>,
    pub booking_focus: usize,
    pub review: Option<ReviewDraft>,
    pub facility_cursor: usize,
    pub notice: Option<Notice>,
    pub should_quit: bool,
    last_view: View,
}

impl App {
    pub fn new(session: Session) -> Self {
        let mut table_state = TableState::default();
        table_state.select(Some(0));

        Self {
            session,
            table_state,
            search: None,
            capacity_input: None,
            auth_mode: AuthMode::Login,
            auth_form: Self::auth_fields(AuthMode::Login),
            settings_tab: SettingsTab::Profile,
            profile_form: TextForm::new(Vec::new()),
            password_form: Self::password_fields(),
            confirm_delete: false,
            booking: None,
            booking_focus: 0,
            review: None,
            facility_cursor: 0,
            notice: None,
            should_quit: false,
            last_view: View::Home,
        }
    }

    fn auth_fields(mode: AuthMode) -> TextForm {
        let mut fields = Vec::new();
        if mode == AuthMode::Signup {
            fields.push(Field::text("Full Name"));
        }
        fields.push(Field::text("Email address"));
        fields.push(Field::secret("Password"));
        TextForm::new(fields)
    }

    fn password_fields() -> TextForm {
        TextForm::new(vec![
            Field::secret("Current password"),
            Field::secret("New password"),
            Field::secret("Confirm password"),
        ])
    }

    /// Resolve guards and reset per-view state when the view changes
    pub fn sync_view(&mut self) -> View {
        let view = self.session.resolve_view();
        if view != self.last_view {
            self.last_view = view;
            self.table_state.select(Some(0));
            self.confirm_delete = false;
            match view {
                View::Booking => {
                    self.booking = self.session.booking_form().ok();
                    self.booking_focus = 0;
                }
                View::Settings => {
                    if let Some(user) = self.session.current_user() {
                        self.profile_form = TextForm::new(vec![
                            Field::text("Name").with_value(&user.name),
                            Field::text("Picture").with_value(user.picture.as_deref().unwrap_or("")),
                        ]);
                    }
                    self.password_form = Self::password_fields();
                }
                View::Auth => {
                    self.auth_form = Self::auth_fields(self.auth_mode);
                }
                _ => {}
            }
        }
        view
    }

    fn set_error(&mut self, err: SessionError) {
        self.notice = Some(Notice::Error(err.to_string()));
    }

    fn set_info(&mut self, message: impl Into<String>) {
        self.notice = Some(Notice::Info(message.into()));
    }

    /// Venues shown as rows on the current view
    pub fn rows(&self) -> Vec<&Venue> {
        match self.last_view {
            View::Home => self.session.featured(),
            View::Listing => self.session.displayed_venues(),
            View::Favorites => self.session.favorite_venues(),
            _ => Vec::new(),
        }
    }

    fn row_count(&self) -> usize {
        match self.last_view {
            View::Profile => {
                self.session.upcoming_bookings().len() + self.session.past_bookings().len()
            }
            _ => self.rows().len(),
        }
    }

    fn selected_row_venue(&self) -> Option<u32> {
        self.table_state
            .selected()
            .and_then(|i| self.rows().get(i).map(|v| v.id))
    }

    pub fn next(&mut self) {
        let len = self.row_count();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.row_count();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.table_state.select(Some(i));
    }

    fn open_selected(&mut self) {
        if let Some(id) = self.selected_row_venue() {
            if let Err(err) = self.session.open_venue(id) {
                self.set_error(err);
            }
        }
    }

    fn toggle_favorite(&mut self, venue_id: u32) {
        match self.session.toggle_favorite(venue_id) {
            FavoriteToggle::Added => self.set_info("Added to favorites"),
            FavoriteToggle::Removed => self.set_info("Removed from favorites"),
            FavoriteToggle::NeedsSignIn => self.set_info("Sign in to save favorites"),
            FavoriteToggle::UnknownVenue => self.set_info("That venue no longer exists"),
        }
    }

    // ========================================================================
    // KEY HANDLING
    // ========================================================================

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        let view = self.sync_view();

        // Text entry captures keys first
        if self.search.is_some() {
            self.handle_search_key(key);
            return;
        }
        if self.capacity_input.is_some() {
            self.handle_capacity_key(key);
            return;
        }
        if self.review.is_some() {
            self.handle_review_key(key);
            return;
        }

        match view {
            View::Auth => self.handle_auth_key(key),
            View::Settings => self.handle_settings_key(key),
            View::Booking => self.handle_booking_key(key),
            _ => self.handle_browse_key(view, key),
        }

        self.sync_view();
    }

    fn handle_global_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc | KeyCode::Backspace => self.session.back(),
            KeyCode::Char('H') => self.session.navigate_root(View::Home),
            KeyCode::Char('F') => self.session.navigate(View::Favorites),
            KeyCode::Char('P') => self.session.navigate(View::Profile),
            KeyCode::Char('S') => self.session.navigate(View::Settings),
            KeyCode::Char('L') => {
                if self.session.is_signed_in() {
                    self.session.logout();
                    self.set_info("Signed out");
                } else {
                    self.session.navigate(View::Auth);
                }
            }
            _ => return false,
        }
        true
    }

    fn handle_browse_key(&mut self, view: View, key: KeyEvent) {
        if self.handle_global_key(key) {
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Down | KeyCode::Char('j') => self.next(),
            KeyCode::Up | KeyCode::Char('k') => self.previous(),
            _ => match view {
                View::Home => self.handle_home_key(key),
                View::Listing => self.handle_listing_key(key),
                View::Detail => self.handle_detail_key(key),
                View::Favorites => {
                    if key.code == KeyCode::Enter {
                        self.open_selected();
                    }
                }
                View::Profile => self.handle_profile_key(key),
                _ => {}
            },
        }
    }

    fn handle_home_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.open_selected(),
            KeyCode::Char('/') => self.search = Some(String::new()),
            KeyCode::Char('a') => self.session.browse_all(),
            KeyCode::Char(c @ '1'..='5') => {
                let index = c as usize - '1' as usize;
                self.session.browse_type(VenueType::ALL[index]);
            }
            _ => {}
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        let Some(term) = self.search.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc => self.search = None,
            KeyCode::Backspace => {
                term.pop();
            }
            KeyCode::Char(c) => term.push(c),
            KeyCode::Enter => {
                let term = term.clone();
                if self.session.search(&term) {
                    self.search = None;
                    self.sync_view();
                }
            }
            _ => {}
        }
    }

    fn handle_listing_key(&mut self, key: KeyEvent) {
        let options = self.session.filter_options();

        match key.code {
            KeyCode::Enter => self.open_selected(),
            KeyCode::Char('s') => {
                let criteria = self.session.criteria_mut();
                criteria.sort = criteria.sort.next();
            }
            KeyCode::Char('c') => {
                let next = cycle(&options.cities, self.session.criteria().city.as_ref());
                self.session.criteria_mut().city = next;
            }
            KeyCode::Char('t') => {
                let next = cycle(&options.venue_types, self.session.criteria().venue_type.as_ref());
                self.session.criteria_mut().venue_type = next;
            }
            KeyCode::Char(c @ '1'..='5') => {
                let stars = c as u8 - b'0';
                self.session.criteria_mut().select_rating(stars);
            }
            KeyCode::Char('[') => {
                let criteria = self.session.criteria_mut();
                criteria.max_price = criteria
                    .max_price
                    .saturating_sub(PRICE_STEP)
                    .max(options.price_range.min);
            }
            KeyCode::Char(']') => {
                let criteria = self.session.criteria_mut();
                criteria.max_price = (criteria.max_price + PRICE_STEP).min(options.price_range.max);
            }
            KeyCode::Char('m') => {
                let current = self
                    .session
                    .criteria()
                    .min_capacity
                    .map(|n| n.to_string())
                    .unwrap_or_default();
                self.capacity_input = Some(current);
                return;
            }
            KeyCode::Char('g') => {
                if !options.facilities.is_empty() {
                    self.facility_cursor = (self.facility_cursor + 1) % options.facilities.len();
                }
            }
            KeyCode::Char(' ') => {
                if let Some(facility) = options.facilities.get(self.facility_cursor) {
                    self.session.criteria_mut().toggle_facility(facility);
                }
            }
            KeyCode::Char('x') => {
                self.session.reset_criteria();
                self.facility_cursor = 0;
            }
            _ => return,
        }
        self.table_state.select(Some(0));
    }

    /// Min-guests text field on the listing; blank clears the filter
    fn handle_capacity_key(&mut self, key: KeyEvent) {
        let Some(text) = self.capacity_input.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc => self.capacity_input = None,
            KeyCode::Backspace => {
                text.pop();
            }
            KeyCode::Char(c) => text.push(c),
            KeyCode::Enter => {
                let text = text.clone();
                match self.session.criteria_mut().set_min_capacity_input(&text) {
                    Ok(()) => {
                        self.capacity_input = None;
                        self.notice = None;
                        self.table_state.select(Some(0));
                    }
                    Err(err) => self.notice = Some(Notice::Error(err.message)),
                }
            }
            _ => {}
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent) {
        let Some(venue_id) = self.session.selected_venue().map(|v| v.id) else {
            return;
        };
        match key.code {
            KeyCode::Char('f') => self.toggle_favorite(venue_id),
            KeyCode::Char('b') | KeyCode::Enter => self.session.navigate(View::Booking),
            _ => {}
        }
    }

    fn handle_profile_key(&mut self, key: KeyEvent) {
        if key.code != KeyCode::Char('r') && key.code != KeyCode::Enter {
            return;
        }

        let today = self.session.today();
        let selected = self.table_state.selected().and_then(|i| {
            self.session
                .upcoming_bookings()
                .into_iter()
                .chain(self.session.past_bookings())
                .nth(i)
                .map(|b| (b.venue_id, b.action(today)))
        });

        match (key.code, selected) {
            (KeyCode::Char('r'), Some((venue_id, BookingAction::LeaveReview))) => {
                self.review = Some(ReviewDraft {
                    venue_id,
                    rating: 0,
                    comment: String::new(),
                });
            }
            (KeyCode::Char('r'), Some(_)) => {
                self.set_info("Reviews open once the event has taken place");
            }
            (KeyCode::Enter, Some((venue_id, _))) => {
                if let Err(err) = self.session.open_venue(venue_id) {
                    self.set_error(err);
                }
            }
            _ => {}
        }
    }

    fn handle_review_key(&mut self, key: KeyEvent) {
        let Some(draft) = self.review.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc => self.review = None,
            KeyCode::Char(c @ '1'..='5') if draft.comment.is_empty() => {
                draft.rating = c as u8 - b'0';
            }
            KeyCode::Char(c) => draft.comment.push(c),
            KeyCode::Backspace => {
                draft.comment.pop();
            }
            KeyCode::Enter => {
                let draft = draft.clone();
                match self
                    .session
                    .submit_review(draft.venue_id, draft.rating, &draft.comment)
                {
                    Ok(()) => {
                        self.review = None;
                        self.set_info("Review submitted. Thank you!");
                    }
                    Err(err) => self.set_error(err),
                }
            }
            _ => {}
        }
    }

    fn handle_auth_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.session.back(),
            KeyCode::Tab | KeyCode::Down => self.auth_form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.auth_form.previous_field(),
            KeyCode::Backspace => self.auth_form.pop_char(),
            KeyCode::F(2) => {
                self.auth_mode = match self.auth_mode {
                    AuthMode::Login => AuthMode::Signup,
                    AuthMode::Signup => AuthMode::Login,
                };
                self.auth_form = Self::auth_fields(self.auth_mode);
                self.notice = None;
            }
            KeyCode::Char(c) => self.auth_form.push_char(c),
            KeyCode::Enter => self.submit_auth(),
            _ => {}
        }
    }

    fn submit_auth(&mut self) {
        let result = match self.auth_mode {
            AuthMode::Login => self
                .session
                .login(self.auth_form.value(0), self.auth_form.value(1))
                .map(|u| u.name.clone()),
            AuthMode::Signup => self
                .session
                .signup(
                    self.auth_form.value(0),
                    self.auth_form.value(1),
                    self.auth_form.value(2),
                )
                .map(|u| u.name.clone()),
        };

        match result {
            Ok(name) => {
                self.auth_form.clear();
                self.set_info(format!("Welcome, {}", name));
            }
            Err(err) => self.set_error(err),
        }
    }

    fn handle_settings_key(&mut self, key: KeyEvent) {
        if self.confirm_delete {
            match key.code {
                KeyCode::Char('y') => {
                    self.confirm_delete = false;
                    match self.session.delete_account() {
                        Ok(()) => self.set_info("Your account has been deleted"),
                        Err(err) => self.set_error(err),
                    }
                }
                _ => self.confirm_delete = false,
            }
            return;
        }

        let form = match self.settings_tab {
            SettingsTab::Profile => &mut self.profile_form,
            SettingsTab::Account => &mut self.password_form,
        };

        match key.code {
            KeyCode::Esc => self.session.back(),
            KeyCode::F(2) => {
                self.settings_tab = match self.settings_tab {
                    SettingsTab::Profile => SettingsTab::Account,
                    SettingsTab::Account => SettingsTab::Profile,
                };
                self.notice = None;
            }
            KeyCode::Delete => self.confirm_delete = true,
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.previous_field(),
            KeyCode::Backspace => form.pop_char(),
            KeyCode::Char(c) => form.push_char(c),
            KeyCode::Enter => self.submit_settings(),
            _ => {}
        }
    }

    fn submit_settings(&mut self) {
        match self.settings_tab {
            SettingsTab::Profile => {
                let name = self.profile_form.value(0).to_string();
                let picture = match self.profile_form.value(1).trim() {
                    "" => None,
                    p => Some(p.to_string()),
                };
                match self.session.update_profile(&name, picture) {
                    Ok(_) => self.set_info("Profile updated successfully!"),
                    Err(err) => self.set_error(err),
                }
            }
            SettingsTab::Account => {
                let result = self.session.change_password(
                    self.password_form.value(0),
                    self.password_form.value(1),
                    self.password_form.value(2),
                );
                match result {
                    Ok(()) => {
                        self.password_form.clear();
                        self.set_info("Password changed successfully!");
                    }
                    Err(err) => self.set_error(err),
                }
            }
        }
    }

    fn handle_booking_key(&mut self, key: KeyEvent) {
        let Some(form) = self.booking.as_mut() else {
            self.session.back();
            return;
        };

        match key.code {
            KeyCode::Esc => self.session.back(),
            KeyCode::Tab | KeyCode::Down => self.booking_focus = (self.booking_focus + 1) % 3,
            KeyCode::BackTab | KeyCode::Up => self.booking_focus = (self.booking_focus + 2) % 3,
            KeyCode::Char(' ') if self.booking_focus == 2 => form.event_type = form.event_type.next(),
            KeyCode::Char(c) if self.booking_focus == 0 => form.date.push(c),
            KeyCode::Char(c) if self.booking_focus == 1 => {
                if let Some(d) = c.to_digit(10) {
                    form.guests = form.guests.saturating_mul(10).saturating_add(d);
                }
            }
            KeyCode::Backspace if self.booking_focus == 0 => {
                form.date.pop();
            }
            KeyCode::Backspace if self.booking_focus == 1 => form.guests /= 10,
            KeyCode::Enter => {
                let request = form.clone();
                match self.session.book_selected_venue(&request) {
                    Ok(booking) => {
                        let message = format!(
                            "Booking confirmed for {} ({})",
                            booking.event_date,
                            booking.event_type.as_str()
                        );
                        self.booking = None;
                        self.set_info(message);
                    }
                    Err(err) => self.set_error(err),
                }
            }
            _ => {}
        }
    }
}

/// Step through `options`, then back to `None` ("all")
fn cycle<T: Clone + PartialEq>(options: &[T], current: Option<&T>) -> Option<T> {
    match current {
        None => options.first().cloned(),
        Some(value) => {
            let pos = options.iter().position(|o| o == value)?;
            options.get(pos + 1).cloned()
        }
    }
}

// ============================================================================
// TERMINAL LOOP
// ============================================================================

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.map_err(Into::into)
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        app.sync_view();
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                app.handle_key(key);
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

// ============================================================================
// RENDERING
// ============================================================================

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    match app.last_view {
        View::Home => render_home(f, chunks[1], app),
        View::Listing => render_listing(f, chunks[1], app),
        View::Detail => render_detail(f, chunks[1], app),
        View::Booking => render_booking(f, chunks[1], app),
        View::Favorites => {
            let title = format!(" Favorites ({}) ", app.session.favorite_ids().len());
            render_venue_table(f, chunks[1], app, &title);
        }
        View::Profile => render_profile(f, chunks[1], app),
        View::Auth => render_auth(f, chunks[1], app),
        View::Settings => render_settings(f, chunks[1], app),
    }

    render_status_bar(f, chunks[2], app);

    if app.review.is_some() {
        render_review_modal(f, app);
    }
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = Vec::new();

    if app.session.history().can_go_back() {
        spans.push(Span::styled("← ", Style::default().fg(Color::Yellow)));
    }
    spans.push(Span::styled(
        "ShaadiHallFinder",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ));
    spans.push(Span::raw("  |  "));

    let trail: Vec<&str> = app
        .session
        .history()
        .entries()
        .iter()
        .map(|v| v.title())
        .collect();
    spans.push(Span::styled(trail.join(" › "), Style::default().fg(Color::Cyan)));

    spans.push(Span::raw("  |  "));
    spans.push(Span::styled(
        format!("♥ {}", app.session.favorite_ids().len()),
        Style::default().fg(Color::Red),
    ));
    spans.push(Span::raw("  "));
    let who = match app.session.current_user() {
        Some(user) => format!("[{}] {}", user.initial(), user.name),
        None => "Guest".to_string(),
    };
    spans.push(Span::styled(who, Style::default().fg(Color::Green)));

    let header = Paragraph::new(vec![Line::from(spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(header, area);
}

fn render_home(f: &mut Frame, area: Rect, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(0)])
        .split(area);

    let search_line = match &app.search {
        Some(term) => Line::from(vec![
            Span::styled("  Search: ", Style::default().fg(Color::Cyan)),
            Span::styled(format!("{}_", term), Style::default().fg(Color::Yellow)),
        ]),
        None => Line::from(Span::styled(
            "  Press / to search by city, area, or hall name...",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )),
    };

    let mut categories = vec![Span::raw("  ")];
    for (i, venue_type) in VenueType::ALL.iter().enumerate() {
        categories.push(Span::styled(
            format!("{}", i + 1),
            Style::default().fg(Color::Yellow),
        ));
        categories.push(Span::raw(format!(" {}   ", venue_type.as_str())));
    }
    categories.push(Span::styled("a", Style::default().fg(Color::Yellow)));
    categories.push(Span::raw(" All venues"));

    let hero = Paragraph::new(vec![
        Line::from(Span::styled(
            "  Find the perfect venue for your special day",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        search_line,
        Line::from(categories),
    ])
    .block(Block::default().borders(Borders::ALL).title(" Welcome "));

    f.render_widget(hero, chunks[0]);
    render_venue_table(f, chunks[1], app, " Featured Halls ");
}

fn render_venue_table(f: &mut Frame, area: Rect, app: &mut App, title: &str) {
    let header_cells = ["", "Name", "City", "Area", "Type", "Guests", "Price", "Rating"]
        .iter()
        .map(|h| {
            Cell::from(*h).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows: Vec<Row> = app
        .rows()
        .iter()
        .map(|venue| {
            let heart = if app.session.is_favorite(venue.id) { "♥" } else { " " };
            Row::new(vec![
                Cell::from(heart).style(Style::default().fg(Color::Red)),
                Cell::from(truncate(&venue.name, 30)),
                Cell::from(venue.city.clone()),
                Cell::from(truncate(&venue.area, 16)),
                Cell::from(venue.venue_type.as_str()),
                Cell::from(format!("{}-{}", venue.capacity.min, venue.capacity.max)),
                Cell::from(format_price(venue.price_per_event)),
                Cell::from(format!("{:.1} ★", venue.rating)).style(rating_style(venue.rating)),
            ])
            .height(1)
        })
        .collect();

    let empty = rows.is_empty();

    let table = Table::new(
        rows,
        [
            Constraint::Length(2),
            Constraint::Length(32),
            Constraint::Length(11),
            Constraint::Length(18),
            Constraint::Length(12),
            Constraint::Length(11),
            Constraint::Length(14),
            Constraint::Length(8),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(title.to_string()),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    if empty {
        let text = Paragraph::new("\n  No venues match. Press x to reset the filters.")
            .block(Block::default().borders(Borders::ALL).title(title.to_string()));
        f.render_widget(text, area);
    } else {
        f.render_stateful_widget(table, area, &mut app.table_state);
    }
}

fn render_listing(f: &mut Frame, area: Rect, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(34), Constraint::Min(0)])
        .split(area);

    let options = app.session.filter_options();
    let criteria = app.session.criteria().clone();
    let label = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let key = Style::default().fg(Color::Yellow);

    let stars: String = (1..=5)
        .map(|s| if s <= criteria.min_rating { '★' } else { '☆' })
        .collect();

    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(" c ", key),
            Span::styled("City: ", label),
            Span::raw(criteria.city.clone().unwrap_or_else(|| "All Cities".to_string())),
        ]),
        Line::from(vec![
            Span::styled(" t ", key),
            Span::styled("Type: ", label),
            Span::raw(
                criteria
                    .venue_type
                    .map(|t| t.as_str())
                    .unwrap_or("All Types"),
            ),
        ]),
        Line::from(vec![
            Span::styled("[ ]", key),
            Span::styled("Max price: ", label),
            Span::raw(format_price(criteria.max_price)),
        ]),
        Line::from(vec![
            Span::raw("    "),
            Span::styled(
                format!(
                    "{} - {}",
                    format_price(options.price_range.min),
                    format_price(options.price_range.max)
                ),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(vec![
            Span::styled(" m ", key),
            Span::styled("Min guests: ", label),
            match &app.capacity_input {
                Some(text) => Span::styled(format!("{}_", text), key),
                None => Span::raw(
                    criteria
                        .min_capacity
                        .map(|n| n.to_string())
                        .unwrap_or_else(|| "Any".to_string()),
                ),
            },
        ]),
        Line::from(vec![
            Span::styled("1-5", key),
            Span::styled("Rating: ", label),
            Span::styled(stars, Style::default().fg(Color::Yellow)),
        ]),
        Line::from(vec![
            Span::styled(" s ", key),
            Span::styled("Sort: ", label),
            Span::raw(criteria.sort.as_str()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("g/␣", key),
            Span::styled("Facilities", label),
        ]),
    ];

    for (i, facility) in options.facilities.iter().enumerate() {
        let checked = criteria.facilities.contains(facility);
        let cursor = if i == app.facility_cursor { "›" } else { " " };
        lines.push(Line::from(vec![
            Span::styled(format!("  {} ", cursor), key),
            Span::raw(if checked { "[x] " } else { "[ ] " }),
            Span::raw(facility.clone()),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(" x ", key),
        Span::raw("Reset filters"),
    ]));

    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Filters "),
    );
    f.render_widget(panel, chunks[0]);

    let title = format!(
        " {} ({} of {}) ",
        app.session.listing_title(),
        app.session.displayed_venues().len(),
        app.session.listing_scope().len()
    );
    render_venue_table(f, chunks[1], app, &title);
}

fn render_detail(f: &mut Frame, area: Rect, app: &App) {
    let Some(venue) = app.session.selected_venue() else {
        return;
    };

    let label = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let heart = if app.session.is_favorite(venue.id) {
        Span::styled("  ♥ Saved", Style::default().fg(Color::Red))
    } else {
        Span::styled("  ♡ Not saved", Style::default().fg(Color::DarkGray))
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!("  {}", venue.name),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            heart,
        ]),
        Line::from(format!("  {}, {}, {}", venue.address, venue.area, venue.city)),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Type: ", label),
            Span::raw(venue.venue_type.as_str()),
            Span::styled("   Guests: ", label),
            Span::raw(format!("{} - {}", venue.capacity.min, venue.capacity.max)),
        ]),
        Line::from(vec![
            Span::styled("  Price: ", label),
            Span::raw(format_price(venue.price_per_event)),
            Span::styled("   Rating: ", label),
            Span::styled(format!("{:.1} ★", venue.rating), rating_style(venue.rating)),
        ]),
        Line::from(vec![
            Span::styled("  Photos: ", label),
            Span::raw(format!("{}", venue.images.len())),
            Span::styled("   Location: ", label),
            Span::raw(format!("{:.4}, {:.4}", venue.location.lat, venue.location.lng)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "  Welcome to {}, the premier destination for weddings and grand celebrations in {}.",
                venue.name, venue.city
            ),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )),
        Line::from(""),
        Line::from(Span::styled("  FACILITIES", label.add_modifier(Modifier::UNDERLINED))),
        Line::from(format!("  {}", venue.facilities.join(" • "))),
        Line::from(""),
        Line::from(Span::styled("  REVIEWS", label.add_modifier(Modifier::UNDERLINED))),
    ];

    let submitted = app.session.submitted_reviews(venue.id);
    if venue.reviews.is_empty() && submitted.is_empty() {
        lines.push(Line::from("  No reviews yet."));
    }
    for review in venue.reviews.iter().chain(submitted) {
        lines.push(Line::from(vec![
            Span::styled(format!("  {} ", review.author), Style::default().fg(Color::White)),
            Span::styled(format!("{:.1} ★", review.rating), rating_style(review.rating)),
        ]));
        lines.push(Line::from(Span::styled(
            format!("    \"{}\"", review.comment),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let detail = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Venue Details "),
    );
    f.render_widget(detail, area);
}

fn render_booking(f: &mut Frame, area: Rect, app: &App) {
    let (Some(venue), Some(form)) = (app.session.selected_venue(), app.booking.as_ref()) else {
        return;
    };

    let label = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let focus = |i: usize| {
        if app.booking_focus == i {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::White)
        }
    };
    let advance = app.session.advance_payment().unwrap_or(0);
    let advance_label = format!(
        "  Advance ({:.0}%):    ",
        app.session.config().advance_payment_ratio * 100.0
    );

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  Book {}", venue.name),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("  {:<18}", "Event date"), label),
            Span::styled(format!("{}_", form.date), focus(0)),
            Span::styled("  (YYYY-MM-DD)", Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(vec![
            Span::styled(format!("  {:<18}", "Guests"), label),
            Span::styled(form.guests.to_string(), focus(1)),
            Span::styled(
                format!("  ({} - {})", venue.capacity.min, venue.capacity.max),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(vec![
            Span::styled(format!("  {:<18}", "Event type"), label),
            Span::styled(form.event_type.as_str(), focus(2)),
            Span::styled("  (space to change)", Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(""),
        Line::from("  ─────────────────────────────────────"),
        Line::from(vec![
            Span::styled("  Venue price:      ", label),
            Span::raw(format_price(venue.price_per_event)),
        ]),
        Line::from(vec![
            Span::styled(advance_label, label),
            Span::styled(format_price(advance), Style::default().fg(Color::Green)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "  Press Enter to confirm booking",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )),
    ];

    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Booking "),
    );
    f.render_widget(panel, area);
}

fn render_profile(f: &mut Frame, area: Rect, app: &mut App) {
    let today = app.session.today();
    let header = Row::new(
        ["When", "Venue", "Event", "Date", "Status", "Action"]
            .iter()
            .map(|h| {
                Cell::from(*h).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            }),
    )
    .style(Style::default().bg(Color::DarkGray));

    let upcoming = app.session.upcoming_bookings();
    let past = app.session.past_bookings();
    let empty = upcoming.is_empty() && past.is_empty();

    let rows: Vec<Row> = upcoming
        .iter()
        .map(|b| ("Upcoming", b))
        .chain(past.iter().map(|b| ("Past", b)))
        .map(|(when, booking)| {
            let venue = app
                .session
                .catalog()
                .find_by_id(booking.venue_id)
                .map(|v| v.name.clone())
                .unwrap_or_else(|| format!("Venue #{}", booking.venue_id));
            let action = match booking.action(today) {
                BookingAction::Manage => "Manage Booking",
                BookingAction::LeaveReview => "r: Leave a Review",
            };
            Row::new(vec![
                Cell::from(when),
                Cell::from(truncate(&venue, 30)),
                Cell::from(booking.event_type.as_str()),
                Cell::from(booking.event_date.format("%B %-d, %Y").to_string()),
                Cell::from(booking.status.as_str()),
                Cell::from(action),
            ])
        })
        .collect();

    let title = match app.session.current_user() {
        Some(user) => format!(" {} - My Bookings ", user.name),
        None => " My Bookings ".to_string(),
    };

    if empty {
        let text = Paragraph::new("\n  You have no bookings yet. Press H to discover venues.")
            .block(Block::default().borders(Borders::ALL).title(title));
        f.render_widget(text, area);
        return;
    }

    let table = Table::new(
        rows,
        [
            Constraint::Length(10),
            Constraint::Length(32),
            Constraint::Length(11),
            Constraint::Length(20),
            Constraint::Length(11),
            Constraint::Length(20),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title(title))
    .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.table_state);
}

fn render_auth(f: &mut Frame, area: Rect, app: &App) {
    let (title, toggle) = match app.auth_mode {
        AuthMode::Login => (
            " Sign in to your account ",
            "F2: Don't have an account? Sign up",
        ),
        AuthMode::Signup => (
            " Create a new account ",
            "F2: Already have an account? Sign in",
        ),
    };

    let mut lines = vec![Line::from("")];
    lines.extend(app.auth_form.lines());
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("  {}", toggle),
        Style::default().fg(Color::DarkGray),
    )));

    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(title),
    );
    f.render_widget(panel, area);
}

fn render_settings(f: &mut Frame, area: Rect, app: &App) {
    let tab_style = |tab: SettingsTab| {
        if app.settings_tab == tab {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    };

    let mut lines = vec![
        Line::from(vec![
            Span::raw("  "),
            Span::styled("Profile", tab_style(SettingsTab::Profile)),
            Span::raw(" │ "),
            Span::styled("Account", tab_style(SettingsTab::Account)),
            Span::styled("   (F2 switch)", Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(""),
    ];

    match app.settings_tab {
        SettingsTab::Profile => {
            lines.extend(app.profile_form.lines());
            if let Some(user) = app.session.current_user() {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("  {:<18}", "Email"),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(user.email.clone(), Style::default().fg(Color::DarkGray)),
                ]));
            }
        }
        SettingsTab::Account => {
            lines.extend(app.password_form.lines());
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "  Del: Delete My Account",
                Style::default().fg(Color::Red),
            )));
        }
    }

    if app.confirm_delete {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "  Are you sure you want to permanently delete your account? (y/N)",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
    }

    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Account Settings "),
    );
    f.render_widget(panel, area);
}

fn render_review_modal(f: &mut Frame, app: &App) {
    let Some(draft) = &app.review else {
        return;
    };
    let name = app
        .session
        .catalog()
        .find_by_id(draft.venue_id)
        .map(|v| v.name.as_str())
        .unwrap_or("this venue");

    let area = centered_rect(60, 40, f.size());
    let stars: String = (1..=5)
        .map(|s| if s <= draft.rating { '★' } else { '☆' })
        .collect();

    let lines = vec![
        Line::from(""),
        Line::from(format!("  How was your event at {}?", name)),
        Line::from(""),
        Line::from(vec![
            Span::raw("  Rating (1-5): "),
            Span::styled(stars, Style::default().fg(Color::Yellow)),
        ]),
        Line::from(vec![
            Span::raw("  Comment: "),
            Span::styled(format!("{}_", draft.comment), Style::default().fg(Color::White)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "  Enter submit  |  Esc cancel",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let modal = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Leave a Review "),
    );
    f.render_widget(Clear, area);
    f.render_widget(modal, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = Vec::new();

    match &app.notice {
        Some(Notice::Error(message)) => {
            spans.push(Span::styled(
                format!(" {} ", message),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::raw(" | "));
        }
        Some(Notice::Info(message)) => {
            spans.push(Span::styled(
                format!(" {} ", message),
                Style::default().fg(Color::Green),
            ));
            spans.push(Span::raw(" | "));
        }
        None => {}
    }

    let hints: &[(&str, &str)] = match app.last_view {
        View::Home => &[("Enter", "Open"), ("/", "Search"), ("F", "Favorites"), ("P", "Bookings")],
        View::Listing => &[("Enter", "Open"), ("↑/↓", "Nav"), ("Esc", "Back")],
        View::Detail => &[("f", "Favorite"), ("b", "Book"), ("Esc", "Back")],
        View::Booking => &[("Tab", "Field"), ("Enter", "Confirm"), ("Esc", "Back")],
        View::Favorites => &[("Enter", "Open"), ("Esc", "Back")],
        View::Profile => &[("Enter", "View Venue"), ("r", "Review"), ("S", "Settings")],
        View::Auth => &[("Tab", "Field"), ("Enter", "Submit"), ("Esc", "Back")],
        View::Settings => &[("Tab", "Field"), ("Enter", "Save"), ("Esc", "Back")],
    };

    for (key, label) in hints {
        spans.push(Span::styled(*key, Style::default().fg(Color::Yellow)));
        spans.push(Span::raw(format!(" {} | ", label)));
    }
    let account = if app.session.is_signed_in() { " Logout | " } else { " Sign in | " };
    spans.push(Span::styled("L", Style::default().fg(Color::Yellow)));
    spans.push(Span::raw(account));
    spans.push(Span::styled("q", Style::default().fg(Color::Red)));
    spans.push(Span::raw(" Quit"));

    let status_bar = Paragraph::new(vec![Line::from(spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

fn rating_style(rating: f64) -> Style {
    let color = if rating >= 4.5 {
        Color::Green
    } else if rating >= 3.5 {
        Color::Yellow
    } else {
        Color::Red
    };
    Style::default().fg(color)
}

/// 450000 -> "Rs 450,000"
fn format_price(price: u64) -> String {
    let digits = price.to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("Rs {}", grouped)
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use hall_finder::catalog::Catalog;
    use hall_finder::config::SessionConfig;
    use hall_finder::session::{DEMO_EMAIL, DEMO_PASSWORD};
    use chrono::NaiveDate;

    fn app() -> App {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        App::new(Session::with_today(
            Catalog::seed().unwrap(),
            SessionConfig::default(),
            today,
        ))
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(450_000), "Rs 450,000");
        assert_eq!(format_price(999), "Rs 999");
        assert_eq!(format_price(1_000_000), "Rs 1,000,000");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a much longer name", 10), "a much ...");
    }

    #[test]
    fn test_cycle_through_options_then_all() {
        let cities = vec!["Karachi".to_string(), "Lahore".to_string()];
        let first = cycle(&cities, None);
        assert_eq!(first.as_deref(), Some("Karachi"));
        let second = cycle(&cities, first.as_ref());
        assert_eq!(second.as_deref(), Some("Lahore"));
        assert_eq!(cycle(&cities, second.as_ref()), None);
    }

    #[test]
    fn test_search_from_home() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "islamabad");
        press(&mut app, KeyCode::Enter);

        assert!(app.search.is_none());
        assert_eq!(app.session.current_view(), View::Listing);
        assert!(app.rows().iter().all(|v| v.city == "Islamabad"));
    }

    #[test]
    fn test_favorite_from_detail_needs_sign_in() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session.current_view(), View::Detail);

        press(&mut app, KeyCode::Char('f'));
        assert_eq!(app.session.current_view(), View::Auth);
        assert_eq!(app.notice, Some(Notice::Info("Sign in to save favorites".to_string())));
    }

    #[test]
    fn test_login_through_form() {
        let mut app = app();
        press(&mut app, KeyCode::Char('L'));
        assert_eq!(app.session.current_view(), View::Auth);

        type_text(&mut app, DEMO_EMAIL);
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "wrong");
        press(&mut app, KeyCode::Enter);
        assert_eq!(
            app.notice,
            Some(Notice::Error("Invalid email or password.".to_string()))
        );

        for _ in 0.."wrong".len() {
            press(&mut app, KeyCode::Backspace);
        }
        type_text(&mut app, DEMO_PASSWORD);
        press(&mut app, KeyCode::Enter);
        assert!(app.session.is_signed_in());
        assert_eq!(app.session.current_view(), View::Home);
    }

    #[test]
    fn test_listing_rating_key_filters() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.session.current_view(), View::Listing);

        press(&mut app, KeyCode::Char('4'));
        assert_eq!(app.session.criteria().min_rating, 4);
        assert!(app
            .rows()
            .iter()
            .all(|v| v.rating >= 4.0 && v.rating < 5.0));

        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.session.criteria().min_rating, 0);
    }

    #[test]
    fn test_min_guests_text_field() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Char('m'));
        assert_eq!(app.capacity_input.as_deref(), Some(""));

        type_text(&mut app, "lots");
        press(&mut app, KeyCode::Enter);
        assert_eq!(
            app.notice,
            Some(Notice::Error("Minimum guests must be a whole number.".to_string()))
        );
        assert_eq!(app.session.criteria().min_capacity, None);

        for _ in 0.."lots".len() {
            press(&mut app, KeyCode::Backspace);
        }
        type_text(&mut app, "1000");
        press(&mut app, KeyCode::Enter);
        assert!(app.capacity_input.is_none());
        assert_eq!(app.session.criteria().min_capacity, Some(1000));
        assert!(app.rows().iter().all(|v| v.capacity.max >= 1000));

        // Blank input clears the filter again
        press(&mut app, KeyCode::Char('m'));
        for _ in 0.."1000".len() {
            press(&mut app, KeyCode::Backspace);
        }
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session.criteria().min_capacity, None);
    }

    #[test]
    fn test_escape_goes_back() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.session.current_view(), View::Home);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.session.current_view(), View::Home);
    }
}
