//! Key hint definitions.
//!
//! Hints use `[key] description` pairs; the help bar highlights the
//! bracketed part.

/// Which part of the search bar currently receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyContext {
    /// The caret has focus.
    Editing,
    /// A tag chip has focus.
    TagFocused,
    /// The "did you mean" overlay is up.
    Suggestion,
    /// A search is running and the input is disabled.
    Searching,
    /// Focus is outside the input.
    Blurred,
}

/// Get the key hints for a context.
pub fn get_context_hints(context: KeyContext) -> &'static str {
    match context {
        KeyContext::Editing => {
            "[Tab] add tag  [Enter] search  [←] tags  [Bksp] remove tag  [Esc] leave"
        }
        KeyContext::TagFocused => {
            "[←/→] move  [Bksp/Del] remove  [Tab] back to text  [Enter] search"
        }
        KeyContext::Suggestion => "[y/Enter] accept  [n/Esc] reject",
        KeyContext::Searching => "Searching...  [Ctrl+C] quit",
        KeyContext::Blurred => "[i or /] edit  [q] quit",
    }
}
