//! Main application state and event loop.
//!
//! This module implements The Elm Architecture (TEA) pattern: events flow
//! through [`App::update`], and [`App::view`] draws whatever the state says.
//! The screen is a single search bar built around the claim input, with a
//! simulated search backend that can answer "did you mean".

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tokio::sync::mpsc::{self, error::TryRecvError};
use tracing::{debug, info, trace, warn};

use crate::claim::{BadgeVariant, FocusState, SuggestionOverlay};
use crate::config::Settings;
use crate::error::AppError;
use crate::events::{Event, KeyContext};
use crate::tasks::{RewriteTable, SearchMessage, SearchSpawner};
use crate::ui::{render_context_help, ClaimInput, ClaimInputAction, ClaimInputConfig, Theme};

/// Number of past searches kept for display.
const HISTORY_LIMIT: usize = 8;

/// What the status line reports.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Status {
    /// Nothing searched yet.
    #[default]
    Idle,
    /// A search is in flight.
    Searching(String),
    /// The last search completed.
    Found(String),
    /// The last search was answered with a suggestion.
    Suggested,
    /// The suggestion was dismissed.
    Dismissed,
    /// Something went wrong.
    Error(String),
}

/// The main application struct that holds all state.
pub struct App {
    /// Whether the application should quit.
    should_quit: bool,
    /// The search bar.
    input: ClaimInput,
    /// Tag list as last reported by the input.
    current_tags: Vec<String>,
    /// Pending text as last reported by the input.
    current_text: String,
    /// Last tag list pushed into the input.
    forced_tags: Option<Vec<String>>,
    /// Whether a search is in flight.
    loading: bool,
    status: Status,
    /// Past queries, most recent first.
    history: Vec<String>,
    theme: Theme,
    search: SearchSpawner,
    results: mpsc::UnboundedReceiver<SearchMessage>,
}

impl App {
    /// Create a new application instance with the given settings.
    pub fn new(settings: Settings) -> Self {
        debug!("Creating application");

        let (tx, results) = mpsc::unbounded_channel();
        let search = SearchSpawner::new(
            tx,
            RewriteTable::new(&settings.rewrites),
            Duration::from_millis(settings.search_delay_ms),
        );

        let mut input = ClaimInput::new(ClaimInputConfig {
            placeholder: settings.placeholder,
            rotate_interval: Duration::from_millis(settings.rotate_ms),
            tips: settings.tips,
        });
        let initial = input.focus();

        let mut app = Self {
            should_quit: false,
            input,
            current_tags: Vec::new(),
            current_text: String::new(),
            forced_tags: None,
            loading: false,
            status: Status::Idle,
            history: Vec::new(),
            theme: Theme::default(),
            search,
            results,
        };
        app.apply_actions(initial);
        app
    }

    /// Returns whether the application should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Past queries, most recent first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn input(&self) -> &ClaimInput {
        &self.input
    }

    /// Tag list as last reported by the input.
    pub fn current_tags(&self) -> &[String] {
        &self.current_tags
    }

    /// Pending text as last reported by the input.
    pub fn current_text(&self) -> &str {
        &self.current_text
    }

    /// Tag list last pushed into the input after accepting a suggestion.
    pub fn forced_tags(&self) -> Option<&[String]> {
        self.forced_tags.as_deref()
    }

    /// Which key hints apply right now.
    pub fn key_context(&self) -> KeyContext {
        if self.input.suggestion().is_some() {
            KeyContext::Suggestion
        } else if self.loading {
            KeyContext::Searching
        } else {
            match self.input.focus_state() {
                FocusState::Unfocused => KeyContext::Blurred,
                FocusState::Tag(_) => KeyContext::TagFocused,
                FocusState::Text => KeyContext::Editing,
            }
        }
    }

    /// Update the application state based on an event.
    pub fn update(&mut self, event: Event) {
        match event {
            Event::Quit => {
                info!("Quit event received");
                self.should_quit = true;
            }
            Event::Key(key_event) => {
                trace!(key = ?key_event.code, modifiers = ?key_event.modifiers, "Key event");
                self.handle_key_event(key_event);
            }
            Event::Resize(width, height) => {
                trace!(width, height, "Terminal resize event");
            }
            Event::Tick => self.handle_tick(Instant::now()),
        }
    }

    /// Show an error in the status line. Critical errors also stop the app.
    pub fn handle_error(&mut self, error: &AppError) {
        warn!(error = %error, critical = error.is_critical(), "Application error");
        self.status = Status::Error(error.user_message());
        if error.is_critical() {
            self.should_quit = true;
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            info!("Ctrl+C pressed");
            self.should_quit = true;
            return;
        }

        if self.input.suggestion().is_some() {
            self.handle_suggestion_key(key);
            return;
        }

        if self.input.is_focused() {
            let actions = if key.code == KeyCode::Esc {
                self.input.blur()
            } else {
                self.input.handle_input(key)
            };
            self.apply_actions(actions);
            return;
        }

        match key.code {
            KeyCode::Char('q') => {
                info!("Quit requested");
                self.should_quit = true;
            }
            KeyCode::Char('i') | KeyCode::Char('/') => {
                let actions = self.input.focus();
                self.apply_actions(actions);
            }
            _ => {}
        }
    }

    fn handle_suggestion_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => self.accept_suggestion(),
            KeyCode::Char('n') | KeyCode::Esc => {
                debug!("Suggestion rejected");
                let actions = self.input.set_suggestion(None);
                self.apply_actions(actions);
                self.status = Status::Dismissed;
            }
            _ => {}
        }
    }

    fn accept_suggestion(&mut self) {
        let Some(accepted) = self.input.suggestion().map(SuggestionOverlay::accepted_tags) else {
            return;
        };
        debug!(tags = ?accepted, "Suggestion accepted");
        let mut actions = self.input.set_suggestion(None);
        actions.extend(self.input.set_forced_tags(Some(accepted.as_slice())));
        self.forced_tags = Some(accepted);
        self.apply_actions(actions);
        self.status = Status::Idle;
    }

    fn apply_actions(&mut self, actions: Vec<ClaimInputAction>) {
        for action in actions {
            match action {
                ClaimInputAction::TagsChanged(tags) => self.current_tags = tags,
                ClaimInputAction::TextChanged(text) => self.current_text = text,
                ClaimInputAction::Submit(tags) => self.submit(tags),
                ClaimInputAction::FocusChanged(focused) => {
                    trace!(focused, "Input focus changed");
                }
            }
        }
    }

    fn submit(&mut self, tags: Vec<String>) {
        if tags.is_empty() || self.loading {
            return;
        }
        let query = tags.join(" ");
        info!(%query, "Starting search");
        self.loading = true;
        self.input.set_disabled(true);
        self.status = Status::Searching(query);
        self.search.spawn_search(tags);
    }

    fn handle_tick(&mut self, now: Instant) {
        self.input.tick(now);

        loop {
            match self.results.try_recv() {
                Ok(message) => self.handle_search_message(message),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.finish_loading();
                    self.handle_error(&AppError::search("search worker stopped"));
                    break;
                }
            }
        }
    }

    fn handle_search_message(&mut self, message: SearchMessage) {
        self.finish_loading();
        match message {
            SearchMessage::Searched { query } => {
                debug!(%query, "Search completed");
                self.history.retain(|q| q != &query);
                self.history.insert(0, query.clone());
                self.history.truncate(HISTORY_LIMIT);
                self.status = Status::Found(query);
            }
            SearchMessage::NoMatches {
                original_tags,
                suggested_tags,
            } => {
                debug!(?original_tags, ?suggested_tags, "Search suggested a rewrite");
                // Release the last accepted list so accepting the same
                // suggestion again still replaces the cleared tags
                self.forced_tags = None;
                let mut actions = self.input.set_forced_tags(None::<&[String]>);
                let overlay = SuggestionOverlay::new(original_tags, suggested_tags);
                actions.extend(self.input.set_suggestion(Some(overlay)));
                self.apply_actions(actions);
                self.status = Status::Suggested;
            }
        }
    }

    fn finish_loading(&mut self) {
        self.loading = false;
        self.input.set_disabled(false);
    }

    /// Render the application.
    pub fn view(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Header
                Constraint::Length(4), // Claim input
                Constraint::Length(1), // Status
                Constraint::Min(1),    // History
                Constraint::Length(1), // Help bar
            ])
            .split(frame.area());

        self.render_header(frame, chunks[0]);
        self.input.render(frame, chunks[1]);
        self.render_status(frame, chunks[2]);
        self.render_history(frame, chunks[3]);
        render_context_help(frame, chunks[4], self.key_context());
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let title = Paragraph::new("claimtags")
            .style(self.theme.title())
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::BOTTOM)
                    .border_style(self.theme.muted()),
            );
        frame.render_widget(title, area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let line = match &self.status {
            Status::Idle => Line::from(Span::styled(
                "Add tags with Tab, search with Enter",
                self.theme.muted(),
            )),
            Status::Searching(query) => Line::from(vec![
                Span::styled("Searching for ", self.theme.muted()),
                Span::styled(query.clone(), Style::default().fg(self.theme.fg)),
                Span::styled("...", self.theme.muted()),
            ]),
            Status::Found(query) => Line::from(vec![
                Span::styled("Showing results for ", self.theme.muted()),
                Span::styled(query.clone(), Style::default().fg(self.theme.accent)),
            ]),
            Status::Suggested => Line::from(Span::styled(
                "Some terms had no matches",
                Style::default().fg(self.theme.error),
            )),
            Status::Dismissed => {
                Line::from(Span::styled("Suggestion dismissed", self.theme.muted()))
            }
            Status::Error(message) => Line::from(Span::styled(
                message.clone(),
                Style::default().fg(self.theme.error),
            )),
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_history(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Recent searches ")
            .borders(Borders::TOP)
            .border_style(self.theme.muted());

        let line = if self.history.is_empty() {
            Line::from(Span::styled("No searches yet", self.theme.muted()))
        } else {
            let mut spans = Vec::with_capacity(self.history.len() * 2);
            for query in &self.history {
                let variant = BadgeVariant::for_text(query);
                spans.push(Span::styled(format!(" {} ", query), self.theme.badge(variant)));
                spans.push(Span::raw(" "));
            }
            Line::from(spans)
        };

        let history = Paragraph::new(line)
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(history, area);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.update(key(KeyCode::Char(c)));
        }
    }

    fn instant_settings() -> Settings {
        Settings {
            search_delay_ms: 0,
            ..Settings::default()
        }
    }

    async fn wait_for_search(app: &mut App) {
        for _ in 0..100 {
            tokio::time::sleep(Duration::from_millis(5)).await;
            app.update(Event::Tick);
            if !app.is_loading() {
                return;
            }
        }
        panic!("search did not finish");
    }

    #[test]
    fn test_app_starts_focused() {
        let app = App::default();
        assert!(!app.should_quit());
        assert!(app.input().is_focused());
        assert_eq!(app.key_context(), KeyContext::Editing);
        assert_eq!(app.status(), &Status::Idle);
    }

    #[test]
    fn test_quit_event() {
        let mut app = App::default();
        app.update(Event::Quit);
        assert!(app.should_quit());
    }

    #[test]
    fn test_ctrl_c_quits_while_editing() {
        let mut app = App::default();
        app.update(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert!(app.should_quit());
    }

    #[test]
    fn test_q_types_while_focused_and_quits_while_blurred() {
        let mut app = App::default();
        app.update(key(KeyCode::Char('q')));
        assert!(!app.should_quit());
        assert_eq!(app.current_text(), "q");

        app.update(key(KeyCode::Esc));
        assert_eq!(app.key_context(), KeyContext::Blurred);
        app.update(key(KeyCode::Char('q')));
        assert!(app.should_quit());
    }

    #[test]
    fn test_refocus_with_slash() {
        let mut app = App::default();
        app.update(key(KeyCode::Esc));
        assert!(!app.input().is_focused());

        app.update(key(KeyCode::Char('/')));
        assert!(app.input().is_focused());
        assert_eq!(app.current_text(), "");
    }

    #[test]
    fn test_tab_commits_tag_into_shadow() {
        let mut app = App::default();
        type_text(&mut app, "2BR");
        assert_eq!(app.current_text(), "2BR");

        app.update(key(KeyCode::Tab));
        assert_eq!(app.current_tags(), ["2BR".to_string()]);
        assert_eq!(app.current_text(), "");
    }

    #[test]
    fn test_tag_focus_context() {
        let mut app = App::default();
        type_text(&mut app, "gym");
        app.update(key(KeyCode::Tab));
        app.update(key(KeyCode::Left));
        assert_eq!(app.key_context(), KeyContext::TagFocused);
    }

    #[test]
    fn test_empty_submit_does_nothing() {
        let mut app = App::default();
        app.update(key(KeyCode::Enter));
        assert!(!app.is_loading());
        assert_eq!(app.status(), &Status::Idle);
    }

    #[test]
    fn test_no_matches_shows_suggestion() {
        let mut app = App::default();
        type_text(&mut app, "2BR");
        app.update(key(KeyCode::Tab));

        app.handle_search_message(SearchMessage::NoMatches {
            original_tags: vec!["gym".to_string(), "2BR".to_string()],
            suggested_tags: vec!["fitness center".to_string()],
        });

        assert_eq!(app.key_context(), KeyContext::Suggestion);
        assert_eq!(app.status(), &Status::Suggested);
        assert!(app.current_tags().is_empty());
    }

    #[test]
    fn test_accept_suggestion_forces_tags() {
        let mut app = App::default();
        app.handle_search_message(SearchMessage::NoMatches {
            original_tags: vec!["gym".to_string(), "2BR".to_string()],
            suggested_tags: vec!["fitness center".to_string()],
        });

        app.update(key(KeyCode::Char('y')));

        let expected = vec!["2BR".to_string(), "fitness center".to_string()];
        assert!(app.input().suggestion().is_none());
        assert_eq!(app.current_tags(), expected.as_slice());
        assert_eq!(app.input().tag_texts(), expected);
        assert_eq!(app.forced_tags(), Some(expected.as_slice()));
    }

    #[test]
    fn test_accepting_same_suggestion_twice_restores_tags() {
        let mut app = App::default();
        let expected = vec!["2BR".to_string(), "fitness center".to_string()];

        for _ in 0..2 {
            app.handle_search_message(SearchMessage::NoMatches {
                original_tags: vec!["gym".to_string(), "2BR".to_string()],
                suggested_tags: vec!["fitness center".to_string()],
            });
            assert!(app.input().tags().is_empty());
            assert!(app.forced_tags().is_none());

            app.update(key(KeyCode::Char('y')));
            assert_eq!(app.input().tag_texts(), expected);
            assert_eq!(app.current_tags(), expected.as_slice());
        }
    }

    #[test]
    fn test_reject_suggestion_leaves_input_empty() {
        let mut app = App::default();
        app.handle_search_message(SearchMessage::NoMatches {
            original_tags: vec!["gym".to_string()],
            suggested_tags: vec!["fitness center".to_string()],
        });

        app.update(key(KeyCode::Esc));

        assert!(app.input().suggestion().is_none());
        assert!(app.input().tags().is_empty());
        assert_eq!(app.status(), &Status::Dismissed);
        // Esc was consumed by the overlay, not the blur
        assert!(app.input().is_focused());
    }

    #[test]
    fn test_searched_message_records_history() {
        let mut app = App::default();
        for query in ["2BR", "pet friendly", "2BR"] {
            app.handle_search_message(SearchMessage::Searched {
                query: query.to_string(),
            });
        }
        assert_eq!(app.history(), ["2BR".to_string(), "pet friendly".to_string()]);
        assert_eq!(app.status(), &Status::Found("2BR".to_string()));
    }

    #[tokio::test]
    async fn test_submit_runs_search() {
        let mut app = App::new(instant_settings());
        type_text(&mut app, "2BR");
        app.update(key(KeyCode::Tab));
        type_text(&mut app, "Brooklyn");
        app.update(key(KeyCode::Enter));

        assert!(app.is_loading());
        assert!(app.input().is_disabled());
        assert_eq!(app.key_context(), KeyContext::Searching);

        wait_for_search(&mut app).await;

        assert!(!app.input().is_disabled());
        assert_eq!(app.history(), ["2BR Brooklyn".to_string()]);
    }

    #[tokio::test]
    async fn test_submit_rewritten_term_shows_suggestion() {
        let mut app = App::new(instant_settings());
        type_text(&mut app, "gym");
        app.update(key(KeyCode::Enter));

        wait_for_search(&mut app).await;

        let overlay = app.input().suggestion().expect("suggestion shown");
        assert_eq!(overlay.rejected_term(), Some("gym"));
        assert_eq!(overlay.suggested_tags, vec!["fitness center".to_string()]);
    }

    #[test]
    fn test_view_renders_header_and_help() {
        let app = App::default();
        let backend = TestBackend::new(80, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| app.view(frame)).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("claimtags"));
        assert!(text.contains("No searches yet"));
        assert!(text.contains("[Tab]"));
    }

    #[test]
    fn test_handle_error_sets_status() {
        let mut app = App::default();
        app.handle_error(&AppError::search("worker stopped"));
        assert_eq!(
            app.status(),
            &Status::Error("Search failed: worker stopped".to_string())
        );
        assert!(!app.should_quit());
    }

    #[test]
    fn test_critical_error_quits() {
        let mut app = App::default();
        app.handle_error(&AppError::terminal("lost tty"));
        assert!(app.should_quit());
        assert_eq!(
            app.status(),
            &Status::Error("Terminal error: lost tty".to_string())
        );
    }
}
