//! User interface components.
//!
//! This module contains the terminal rendering side of the claim input and
//! the chrome around it.

mod components;
pub mod theme;

pub use components::{
    render_context_help, ClaimInput, ClaimInputAction, ClaimInputConfig, TextInput,
    DEFAULT_PLACEHOLDER,
};
pub use theme::Theme;
