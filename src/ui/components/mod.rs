//! Reusable UI components.

mod claim_input;
mod help_bar;
mod input;

pub use claim_input::{ClaimInput, ClaimInputAction, ClaimInputConfig, DEFAULT_PLACEHOLDER};
pub use help_bar::render_context_help;
pub use input::TextInput;
