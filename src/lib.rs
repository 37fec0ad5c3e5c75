//! claimtags - a claim tag query input for the terminal.
//!
//! Free text typed into the search bar is committed as colored tag chips.
//! The headless state lives in [`claim`]; [`ui`] renders it with ratatui and
//! [`app`] wires it into a small search screen.

pub mod app;
pub mod claim;
pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod tasks;
pub mod ui;
