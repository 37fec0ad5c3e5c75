//! Keyboard focus across tag chips and the text caret.
//!
//! Focus is either on the caret, on one tag by index, or outside the
//! control. Every transition takes the current tag count so a tag index
//! can never point past the end of the list.

use tracing::trace;

/// Which element owns keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusState {
    /// Focus is outside the control.
    #[default]
    Unfocused,
    /// The free-text caret has focus.
    Text,
    /// The tag at this index has focus.
    Tag(usize),
}

impl FocusState {
    /// Whether any part of the control is focused.
    pub fn is_focused(&self) -> bool {
        !matches!(self, FocusState::Unfocused)
    }
}

/// Where focus goes after removing the tag at `removed` when `remaining`
/// tags are left: the previous tag if there is one, otherwise the caret.
pub fn refocus_after_removal(removed: usize, remaining: usize) -> FocusState {
    match removed.checked_sub(1) {
        Some(prev) if remaining > 0 => FocusState::Tag(prev.min(remaining - 1)),
        _ => FocusState::Text,
    }
}

/// Tracks the focused element and computes key-driven transitions.
#[derive(Debug, Default)]
pub struct FocusController {
    state: FocusState,
}

impl FocusController {
    /// Create a controller with nothing focused.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> FocusState {
        self.state
    }

    pub fn is_focused(&self) -> bool {
        self.state.is_focused()
    }

    /// Index of the focused tag, if a tag has focus.
    pub fn focused_tag(&self) -> Option<usize> {
        match self.state {
            FocusState::Tag(index) => Some(index),
            _ => None,
        }
    }

    pub fn is_text_focused(&self) -> bool {
        self.state == FocusState::Text
    }

    fn set(&mut self, state: FocusState) {
        if self.state != state {
            trace!(from = ?self.state, to = ?state, "Focus moved");
            self.state = state;
        }
    }

    /// Put focus on the caret.
    pub fn focus_text(&mut self) {
        self.set(FocusState::Text);
    }

    /// Focus the tag at `index`, or the caret if `index` is out of range.
    pub fn focus_tag(&mut self, index: usize, tag_count: usize) {
        if index < tag_count {
            self.set(FocusState::Tag(index));
        } else {
            self.set(FocusState::Text);
        }
    }

    /// Move focus out of the control.
    pub fn blur(&mut self) {
        self.set(FocusState::Unfocused);
    }

    /// Handle ArrowLeft.
    ///
    /// From the caret this enters the last tag, but only when the caret is
    /// at the start of the buffer. From a tag it steps to the previous tag
    /// and stays put on the first one. Returns true if the key was consumed.
    pub fn move_left(&mut self, caret_at_start: bool, tag_count: usize) -> bool {
        match self.state {
            FocusState::Text if caret_at_start && tag_count > 0 => {
                self.set(FocusState::Tag(tag_count - 1));
                true
            }
            FocusState::Tag(index) => {
                if index > 0 {
                    self.set(FocusState::Tag(index - 1));
                }
                true
            }
            _ => false,
        }
    }

    /// Handle ArrowRight.
    ///
    /// From a tag this steps to the next tag, or to the caret after the last
    /// one. From the caret there is nothing to the right, so the key is left
    /// for caret movement. Returns true if the key was consumed.
    pub fn move_right(&mut self, tag_count: usize) -> bool {
        match self.state {
            FocusState::Tag(index) => {
                let next = index + 1;
                if next < tag_count {
                    self.set(FocusState::Tag(next));
                } else {
                    self.set(FocusState::Text);
                }
                true
            }
            _ => false,
        }
    }

    /// Re-focus after the tag at `removed` was taken out, leaving
    /// `remaining` tags.
    pub fn after_removal(&mut self, removed: usize, remaining: usize) {
        self.set(refocus_after_removal(removed, remaining));
    }

    /// Keep a tag focus valid after the tag list was replaced wholesale.
    pub fn clamp(&mut self, tag_count: usize) {
        if let FocusState::Tag(index) = self.state {
            if tag_count == 0 {
                self.set(FocusState::Text);
            } else if index >= tag_count {
                self.set(FocusState::Tag(tag_count - 1));
            }
        }
    }
}
