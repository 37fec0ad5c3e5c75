//! Contextual help bar component.
//!
//! Displays key hints for whatever part of the search bar has focus.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::events::{get_context_hints, KeyContext};

/// Render a single line of key hints for the given context.
pub fn render_context_help(frame: &mut Frame, area: Rect, context: KeyContext) {
    let line = Line::from(parse_hints_to_spans(get_context_hints(context)));
    frame.render_widget(Paragraph::new(line), area);
}

/// Parse hint text into styled spans.
///
/// Bracketed keys are highlighted; everything else is muted. An unclosed
/// bracket is treated as plain text.
fn parse_hints_to_spans(hints: &str) -> Vec<Span<'static>> {
    let key_style = Style::default().fg(Color::Cyan);
    let text_style = Style::default().fg(Color::DarkGray);

    let mut spans = Vec::new();
    let mut rest = hints;
    while !rest.is_empty() {
        let key = rest
            .find('[')
            .and_then(|open| rest[open..].find(']').map(|len| (open, open + len + 1)));
        match key {
            Some((open, close)) => {
                if open > 0 {
                    spans.push(Span::styled(rest[..open].to_string(), text_style));
                }
                spans.push(Span::styled(rest[open..close].to_string(), key_style));
                rest = &rest[close..];
            }
            None => {
                spans.push(Span::styled(rest.to_string(), text_style));
                rest = "";
            }
        }
    }
    spans
}
