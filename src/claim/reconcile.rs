//! Reconciliation of externally imposed tag state.
//!
//! Two signals come from the caller on every update: an optional forced tag
//! list and an optional suggestion overlay. Callers are free to hand over a
//! freshly built but equal list each time, so forced tags are compared by
//! value against a shadow copy of the last list that was applied. The
//! overlay only matters by presence, plus a short settle delay before its
//! content counts as ready.

use std::time::{Duration, Instant};

use tracing::debug;

use super::timer::Timeout;

/// Delay between an overlay appearing and its content being shown.
pub const SUGGESTION_READY_DELAY: Duration = Duration::from_millis(120);

/// A read-only "did you mean" comparison shown in place of the editor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SuggestionOverlay {
    /// Terms of the rejected query. The first one is the term that failed.
    pub original_tags: Vec<String>,
    /// Proposed replacement terms.
    pub suggested_tags: Vec<String>,
}

impl SuggestionOverlay {
    pub fn new(original_tags: Vec<String>, suggested_tags: Vec<String>) -> Self {
        Self {
            original_tags,
            suggested_tags,
        }
    }

    /// The term that produced no matches.
    pub fn rejected_term(&self) -> Option<&str> {
        self.original_tags.first().map(String::as_str)
    }

    /// Original terms that are kept alongside the suggestion.
    pub fn kept_terms(&self) -> &[String] {
        self.original_tags.get(1..).unwrap_or(&[])
    }

    /// Tags a caller should force after the user accepts the suggestion.
    pub fn accepted_tags(&self) -> Vec<String> {
        self.kept_terms()
            .iter()
            .chain(&self.suggested_tags)
            .cloned()
            .collect()
    }
}

/// Outcome of feeding the forced tag list to the reconciler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForcedUpdate {
    /// Same value as the last applied list; nothing to do.
    Unchanged,
    /// The caller stopped forcing tags. The shadow copy is dropped so the
    /// next forced list applies even if it equals the old one.
    Released,
    /// A new list that must replace the tags and clear pending text.
    Replace(Vec<String>),
}

/// Outcome of feeding the overlay signal to the reconciler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayUpdate {
    Unchanged,
    /// The overlay appeared: editing is suspended and state must be cleared.
    Activated,
    /// The overlay was already up; only its content changed.
    Updated,
    /// The overlay went away.
    Deactivated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Readiness {
    Idle,
    /// Waiting for the next tick to arm the settle timer.
    Arming,
    Waiting(Timeout),
    Ready,
}

/// Value-level reconciliation of forced tags and the suggestion overlay.
#[derive(Debug)]
pub struct SuggestionReconciler {
    last_forced: Option<Vec<String>>,
    overlay: Option<SuggestionOverlay>,
    readiness: Readiness,
    ready_delay: Duration,
}

impl Default for SuggestionReconciler {
    fn default() -> Self {
        Self::new()
    }
}

impl SuggestionReconciler {
    pub fn new() -> Self {
        Self::with_ready_delay(SUGGESTION_READY_DELAY)
    }

    /// Create a reconciler with a custom overlay settle delay.
    pub fn with_ready_delay(ready_delay: Duration) -> Self {
        Self {
            last_forced: None,
            overlay: None,
            readiness: Readiness::Idle,
            ready_delay,
        }
    }

    /// Feed the caller's current forced tag list.
    pub fn update_forced<S: AsRef<str>>(&mut self, forced: Option<&[S]>) -> ForcedUpdate {
        let Some(forced) = forced else {
            if self.last_forced.take().is_some() {
                debug!("Forced tags released");
                return ForcedUpdate::Released;
            }
            return ForcedUpdate::Unchanged;
        };

        let same = self.last_forced.as_ref().is_some_and(|last| {
            last.len() == forced.len()
                && last.iter().zip(forced).all(|(a, b)| a == b.as_ref())
        });
        if same {
            return ForcedUpdate::Unchanged;
        }

        let copy: Vec<String> = forced.iter().map(|s| s.as_ref().to_string()).collect();
        debug!(tags = ?copy, "Applying forced tags");
        self.last_forced = Some(copy.clone());
        ForcedUpdate::Replace(copy)
    }

    /// Feed the caller's current overlay.
    pub fn update_overlay(&mut self, overlay: Option<SuggestionOverlay>) -> OverlayUpdate {
        match (self.overlay.is_some(), overlay) {
            (false, None) => OverlayUpdate::Unchanged,
            (true, None) => {
                debug!("Suggestion overlay cleared");
                self.overlay = None;
                self.readiness = Readiness::Idle;
                OverlayUpdate::Deactivated
            }
            (false, Some(next)) => {
                debug!(original = ?next.original_tags, suggested = ?next.suggested_tags, "Suggestion overlay shown");
                self.overlay = Some(next);
                self.readiness = Readiness::Arming;
                OverlayUpdate::Activated
            }
            (true, Some(next)) => {
                if self.overlay.as_ref() == Some(&next) {
                    return OverlayUpdate::Unchanged;
                }
                self.overlay = Some(next);
                OverlayUpdate::Updated
            }
        }
    }

    /// The active overlay, if any.
    pub fn overlay(&self) -> Option<&SuggestionOverlay> {
        self.overlay.as_ref()
    }

    pub fn is_overlay_active(&self) -> bool {
        self.overlay.is_some()
    }

    /// Whether the overlay has settled and its content may be shown.
    pub fn is_ready(&self) -> bool {
        self.readiness == Readiness::Ready
    }

    /// Advance the settle timer. Returns true when the overlay just became
    /// ready.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.readiness == Readiness::Arming {
            self.readiness = Readiness::Waiting(Timeout::after(now, self.ready_delay));
        }
        match self.readiness {
            Readiness::Waiting(timeout) if timeout.is_elapsed(now) => {
                debug!("Suggestion overlay ready");
                self.readiness = Readiness::Ready;
                true
            }
            _ => false,
        }
    }
}
