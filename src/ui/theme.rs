//! Theme and styling configuration.

use ratatui::style::{Color, Modifier, Style};

use crate::claim::BadgeVariant;

/// Color theme for the search screen chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Primary foreground color.
    pub fg: Color,
    /// Muted text (hints, empty states).
    pub muted: Color,
    /// Accent for titles and the active border.
    pub accent: Color,
    /// Color for error and rejection states.
    pub error: Color,
}

impl Theme {
    /// Style for a screen title.
    pub fn title(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    /// Style for secondary text.
    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// Style for a categorical badge.
    pub fn badge(&self, variant: BadgeVariant) -> Style {
        Style::default()
            .fg(variant.foreground())
            .bg(variant.background())
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            fg: Color::White,
            muted: Color::DarkGray,
            accent: Color::Cyan,
            error: Color::Red,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_style_uses_variant_colors() {
        let theme = Theme::default();
        let style = theme.badge(BadgeVariant::Rose);
        assert_eq!(style.fg, Some(BadgeVariant::Rose.foreground()));
        assert_eq!(style.bg, Some(BadgeVariant::Rose.background()));
    }
}
