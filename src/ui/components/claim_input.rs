//! Claim tag input component.
//!
//! The primary query-entry surface. Free text typed at the caret is turned
//! into colored tag chips, focus moves between chips and the caret with the
//! arrow keys, and externally forced tags or a "did you mean" overlay can
//! replace the contents without fighting the user's edits.
//!
//! The component owns input semantics only. Everything it wants the caller
//! to know comes back as [`ClaimInputAction`] values from each handler, in
//! a fixed order: tag list, then pending text, then submission, then focus.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tracing::debug;

use super::TextInput;
use crate::claim::{
    tag_colors, FocusController, FocusState, ForcedUpdate, OverlayUpdate, SuggestionOverlay,
    SuggestionReconciler, Tag, TagStore, TipRotator, DEFAULT_ROTATE_INTERVAL,
};

/// Placeholder used when no tip is available.
pub const DEFAULT_PLACEHOLDER: &str = "Search apartments...";

/// Notifications for the owner of the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimInputAction {
    /// The pending text changed.
    TextChanged(String),
    /// The committed tag list changed (full ordered list).
    TagsChanged(Vec<String>),
    /// Enter was pressed: committed tags plus any pending text.
    Submit(Vec<String>),
    /// Focus entered (true) or left (false) the control.
    FocusChanged(bool),
}

/// Configuration for the claim input.
#[derive(Debug, Clone)]
pub struct ClaimInputConfig {
    /// Text shown when no tip is available.
    pub placeholder: String,
    /// Time between placeholder tip changes.
    pub rotate_interval: Duration,
    /// Example queries rotated through the empty field.
    pub tips: Vec<String>,
}

impl Default for ClaimInputConfig {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            rotate_interval: DEFAULT_ROTATE_INTERVAL,
            tips: Vec::new(),
        }
    }
}

/// What a handler changed, collected before notifying.
#[derive(Debug, Default)]
struct Changes {
    tags: bool,
    text: bool,
    submit: Option<Vec<String>>,
}

/// Claim tag input component.
#[derive(Debug)]
pub struct ClaimInput {
    placeholder: String,
    input: TextInput,
    store: TagStore,
    focus: FocusController,
    reconciler: SuggestionReconciler,
    tips: TipRotator,
    disabled: bool,
    /// Focus as last reported to the owner.
    reported_focus: bool,
}

impl ClaimInput {
    /// Create a new claim input with the given configuration.
    pub fn new(config: ClaimInputConfig) -> Self {
        let mut input = Self {
            placeholder: config.placeholder,
            input: TextInput::new(),
            store: TagStore::new(),
            focus: FocusController::new(),
            reconciler: SuggestionReconciler::new(),
            tips: TipRotator::new(config.tips, config.rotate_interval),
            disabled: false,
            reported_focus: false,
        };
        input.sync_tips();
        input
    }

    /// The pending text.
    pub fn text(&self) -> &str {
        self.input.value()
    }

    /// Committed tags in order.
    pub fn tags(&self) -> &[Tag] {
        self.store.tags()
    }

    /// Committed tag texts in order.
    pub fn tag_texts(&self) -> Vec<String> {
        self.store.texts()
    }

    pub fn focus_state(&self) -> FocusState {
        self.focus.state()
    }

    pub fn is_focused(&self) -> bool {
        self.focus.is_focused()
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// The active suggestion overlay.
    pub fn suggestion(&self) -> Option<&SuggestionOverlay> {
        self.reconciler.overlay()
    }

    /// Whether the overlay has settled and is shown instead of the editor.
    pub fn is_suggestion_shown(&self) -> bool {
        self.reconciler.is_overlay_active() && self.reconciler.is_ready()
    }

    /// The rotating placeholder tip, while the field is idle and empty.
    pub fn current_tip(&self) -> Option<&str> {
        self.tips
            .is_active()
            .then(|| self.tips.current(&self.placeholder))
    }

    /// Committed tags plus the trimmed pending text, if any.
    pub fn submission(&self) -> Vec<String> {
        let mut submitted = self.store.texts();
        let pending = self.input.value().trim();
        if !pending.is_empty() {
            submitted.push(pending.to_string());
        }
        submitted
    }

    /// Enable or disable editing.
    pub fn set_disabled(&mut self, disabled: bool) {
        if self.disabled != disabled {
            debug!(disabled, "Claim input disabled state changed");
            self.disabled = disabled;
            self.sync_tips();
        }
    }

    pub fn set_placeholder(&mut self, placeholder: impl Into<String>) {
        self.placeholder = placeholder.into();
    }

    /// Replace the caller-supplied tips.
    pub fn set_tips(&mut self, tips: Vec<String>) {
        self.tips.set_tips(tips);
    }

    pub fn set_rotate_interval(&mut self, interval: Duration) {
        self.tips.set_period(interval);
    }

    /// Feed the caller's forced tag list.
    ///
    /// A list equal by value to the last one applied is ignored, so callers
    /// may pass a fresh copy on every update.
    pub fn set_forced_tags<S: AsRef<str>>(&mut self, forced: Option<&[S]>) -> Vec<ClaimInputAction> {
        let mut changes = Changes::default();
        if let ForcedUpdate::Replace(texts) = self.reconciler.update_forced(forced) {
            changes.tags = self.store.replace_all(&texts);
            self.focus.clamp(self.store.len());
            changes.text = self.clear_pending();
        }
        self.finish(changes)
    }

    /// Show, update or clear the suggestion overlay.
    ///
    /// Showing it clears tags and pending text and suspends editing until it
    /// is cleared again.
    pub fn set_suggestion(&mut self, overlay: Option<SuggestionOverlay>) -> Vec<ClaimInputAction> {
        let mut changes = Changes::default();
        if self.reconciler.update_overlay(overlay) == OverlayUpdate::Activated {
            changes.tags = self.store.clear();
            self.focus.clamp(0);
            changes.text = self.clear_pending();
        }
        self.finish(changes)
    }

    /// Move focus onto the caret.
    pub fn focus(&mut self) -> Vec<ClaimInputAction> {
        if !self.focus.is_text_focused() {
            self.focus.focus_text();
        }
        self.finish(Changes::default())
    }

    /// Move focus out of the control.
    pub fn blur(&mut self) -> Vec<ClaimInputAction> {
        self.focus.blur();
        self.finish(Changes::default())
    }

    /// Handle keyboard input.
    ///
    /// Returns the notifications produced by the key, in order.
    pub fn handle_input(&mut self, key: KeyEvent) -> Vec<ClaimInputAction> {
        if self.disabled || self.reconciler.is_overlay_active() {
            return Vec::new();
        }

        let mut changes = Changes::default();
        match self.focus.state() {
            FocusState::Unfocused => return Vec::new(),
            FocusState::Text => self.handle_text_key(key, &mut changes),
            FocusState::Tag(index) => self.handle_tag_key(index, key, &mut changes),
        }
        self.finish(changes)
    }

    fn handle_text_key(&mut self, key: KeyEvent, changes: &mut Changes) {
        match (key.code, key.modifiers) {
            (KeyCode::Tab, KeyModifiers::NONE) => self.commit_pending(changes),
            (KeyCode::Enter, _) => changes.submit = Some(self.submission()),
            // Index is clamped, so this takes the last tag
            (KeyCode::Backspace, _) if self.input.is_empty() => {
                self.remove_tag(usize::MAX, changes)
            }
            (KeyCode::Left, KeyModifiers::NONE) => {
                let caret_at_start = self.input.caret_at_start();
                if !self.focus.move_left(caret_at_start, self.store.len()) {
                    changes.text = self.input.handle_input(key);
                }
            }
            (KeyCode::Right, KeyModifiers::NONE) => {
                if !self.focus.move_right(self.store.len()) {
                    changes.text = self.input.handle_input(key);
                }
            }
            _ => changes.text = self.input.handle_input(key),
        }
    }

    fn handle_tag_key(&mut self, index: usize, key: KeyEvent, changes: &mut Changes) {
        match key.code {
            KeyCode::Left => {
                self.focus.move_left(true, self.store.len());
            }
            KeyCode::Right => {
                self.focus.move_right(self.store.len());
            }
            KeyCode::Backspace | KeyCode::Delete => self.remove_tag(index, changes),
            KeyCode::Enter => changes.submit = Some(self.submission()),
            KeyCode::Tab | KeyCode::BackTab => self.focus.focus_text(),
            _ => {}
        }
    }

    /// Turn the pending text into a tag. Blank text is left as it is.
    fn commit_pending(&mut self, changes: &mut Changes) {
        if !self.store.add(self.input.value()) {
            return;
        }
        debug!(tags = self.store.len(), "Pending text committed as tag");
        changes.tags = true;
        self.input.clear();
        changes.text = true;
        self.focus.focus_text();
    }

    fn remove_tag(&mut self, index: usize, changes: &mut Changes) {
        if let Some((removed, tag)) = self.store.remove_at(index) {
            debug!(index = removed, text = %tag.text(), "Tag removed");
            changes.tags = true;
            self.focus.after_removal(removed, self.store.len());
        }
    }

    /// Clear the pending text. Returns true if there was any.
    fn clear_pending(&mut self) -> bool {
        if self.input.is_empty() {
            return false;
        }
        self.input.clear();
        true
    }

    /// Turn collected changes into notifications and settle derived state.
    fn finish(&mut self, changes: Changes) -> Vec<ClaimInputAction> {
        self.sync_tips();

        let mut actions = Vec::new();
        if changes.tags {
            actions.push(ClaimInputAction::TagsChanged(self.store.texts()));
        }
        if changes.text {
            actions.push(ClaimInputAction::TextChanged(self.input.value().to_string()));
        }
        if let Some(submitted) = changes.submit {
            debug!(tags = ?submitted, "Query submitted");
            actions.push(ClaimInputAction::Submit(submitted));
        }
        let focused = self.focus.is_focused();
        if focused != self.reported_focus {
            self.reported_focus = focused;
            actions.push(ClaimInputAction::FocusChanged(focused));
        }
        actions
    }

    fn sync_tips(&mut self) {
        let idle = self.store.is_empty()
            && self.input.is_empty()
            && !self.disabled
            && !self.reconciler.is_overlay_active();
        self.tips.set_active(idle);
    }

    /// Advance timers. Returns true if anything visible changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let ready = self.reconciler.tick(now);
        let rotated = self.tips.tick(now);
        ready || rotated
    }

    /// Render the claim input.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let border_style = if self.disabled {
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM)
        } else if self.focus.is_focused() {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.is_suggestion_shown() {
            if let Some(overlay) = self.reconciler.overlay() {
                frame.render_widget(
                    Paragraph::new(overlay_line(overlay)).wrap(Wrap { trim: false }),
                    inner,
                );
            }
            return;
        }

        let mut spans = self.chip_spans();
        let prefix_width: usize = spans.iter().map(Span::width).sum();

        if let Some(tip) = self.current_tip() {
            spans.push(Span::styled(
                tip.to_string(),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ));
        } else {
            let text_style = if self.disabled {
                Style::default().add_modifier(Modifier::DIM)
            } else {
                Style::default()
            };
            spans.push(Span::styled(self.input.value().to_string(), text_style));
        }

        frame.render_widget(
            Paragraph::new(Line::from(spans)).wrap(Wrap { trim: false }),
            inner,
        );

        if self.focus.is_text_focused() && !self.disabled {
            let caret_offset = prefix_width + Span::raw(self.input.before_cursor()).width();
            let cursor_x = inner.x as usize + caret_offset;
            if cursor_x < inner.right() as usize {
                frame.set_cursor_position(Position::new(cursor_x as u16, inner.y));
            }
        }
    }

    /// Tag chips followed by a separator each.
    fn chip_spans(&self) -> Vec<Span<'static>> {
        let focused = self.focus.focused_tag();
        let mut spans = Vec::with_capacity(self.store.len() * 2);
        for (i, tag) in self.store.tags().iter().enumerate() {
            let colors = tag.colors();
            let mut style = Style::default().fg(colors.foreground).bg(colors.background);
            if focused == Some(i) {
                style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
            }
            if self.disabled {
                style = style.add_modifier(Modifier::DIM);
            }
            spans.push(Span::styled(format!(" {} ", tag.text()), style));
            spans.push(Span::raw(" "));
        }
        spans
    }
}

impl Default for ClaimInput {
    fn default() -> Self {
        Self::new(ClaimInputConfig::default())
    }
}

/// Build the "did you mean" line for an overlay.
fn overlay_line(overlay: &SuggestionOverlay) -> Line<'static> {
    let muted = Style::default().fg(Color::DarkGray);
    let mut spans = vec![Span::styled("No matches for ", muted)];
    if let Some(term) = overlay.rejected_term() {
        spans.push(Span::styled(
            format!(" {} ", term),
            Style::default()
                .fg(Color::Rgb(185, 28, 28))
                .bg(Color::Rgb(254, 242, 242)),
        ));
    }
    spans.push(Span::styled(", you might be searching for: ", muted));
    for term in overlay.kept_terms().iter().chain(&overlay.suggested_tags) {
        let colors = tag_colors(term);
        spans.push(Span::styled(
            format!(" {} ", term),
            Style::default().fg(colors.foreground).bg(colors.background),
        ));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}
