//! Headless state behind the claim tag input.
//!
//! Everything here is plain data plus transitions, independent of any
//! terminal. The [`ClaimInput`](crate::ui::ClaimInput) component wires these
//! pieces to key events and rendering.

mod color;
mod focus;
mod reconcile;
mod store;
mod timer;
mod tips;

pub use color::{hue_for, tag_colors, text_hash, BadgeVariant, TagColors};
pub use focus::{refocus_after_removal, FocusController, FocusState};
pub use reconcile::{
    ForcedUpdate, OverlayUpdate, SuggestionOverlay, SuggestionReconciler, SUGGESTION_READY_DELAY,
};
pub use store::{Tag, TagId, TagStore};
pub use timer::{Interval, Timeout};
pub use tips::{TipRotator, DEFAULT_ROTATE_INTERVAL, FALLBACK_TIPS};
