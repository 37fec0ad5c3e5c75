//! Event handling for the application.
//!
//! Terminal input and timer ticks are turned into [`Event`] values that the
//! application consumes one at a time.

mod handler;
mod keys;

use crossterm::event::KeyEvent;

pub use handler::EventHandler;
pub use keys::{get_context_hints, KeyContext};

/// An event for the application to process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// The terminal was resized.
    Resize(u16, u16),
    /// The tick interval elapsed without input.
    Tick,
    /// The application should exit.
    Quit,
}
