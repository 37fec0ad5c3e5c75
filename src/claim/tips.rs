//! Rotating placeholder hints.

use std::time::{Duration, Instant};

use tracing::trace;

use super::timer::Interval;

/// Default time between hint changes.
pub const DEFAULT_ROTATE_INTERVAL: Duration = Duration::from_millis(2600);

/// Hints used when the caller supplies none.
pub const FALLBACK_TIPS: [&str; 3] = [
    "2BR with hardwood floors near subway",
    "Pet-friendly apartment with balcony",
    "Luxury building with gym, doorman, laundry",
];

/// Cycles through example queries while the control is empty.
///
/// The rotation interval only exists while the rotator is active. It is
/// dropped the moment activity ends and started fresh on the first tick
/// after activity resumes.
#[derive(Debug)]
pub struct TipRotator {
    tips: Vec<String>,
    index: usize,
    period: Duration,
    active: bool,
    interval: Option<Interval>,
}

impl TipRotator {
    /// Create a rotator over `tips`, falling back to the built-in list when
    /// `tips` is empty.
    pub fn new(tips: Vec<String>, period: Duration) -> Self {
        Self {
            tips,
            index: 0,
            period,
            active: false,
            interval: None,
        }
    }

    /// The hints currently in rotation.
    pub fn tips(&self) -> Vec<&str> {
        if self.tips.is_empty() {
            FALLBACK_TIPS.to_vec()
        } else {
            self.tips.iter().map(String::as_str).collect()
        }
    }

    fn tip_count(&self) -> usize {
        if self.tips.is_empty() {
            FALLBACK_TIPS.len()
        } else {
            self.tips.len()
        }
    }

    /// Swap in a new caller-supplied list, wrapping the index into range.
    pub fn set_tips(&mut self, tips: Vec<String>) {
        if tips == self.tips {
            return;
        }
        self.tips = tips;
        self.index %= self.tip_count();
    }

    /// Change the rotation period. A running interval restarts on the next
    /// tick with the new period.
    pub fn set_period(&mut self, period: Duration) {
        if period != self.period {
            self.period = period;
            self.interval = None;
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether a rotation interval is currently running.
    pub fn is_running(&self) -> bool {
        self.interval.is_some()
    }

    /// Turn rotation on or off. Turning it off cancels the interval.
    pub fn set_active(&mut self, active: bool) {
        if self.active == active {
            return;
        }
        trace!(active, "Tip rotation toggled");
        self.active = active;
        if !active {
            self.interval = None;
        }
    }

    /// Advance the rotation. Returns true if the visible tip changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.active {
            return false;
        }
        let period = self.period;
        let interval = self
            .interval
            .get_or_insert_with(|| Interval::start(now, period));
        let fired = interval.poll(now) as usize;
        if fired == 0 {
            return false;
        }
        let count = self.tip_count();
        self.index = (self.index + fired % count) % count;
        true
    }

    /// Hint to show right now, or `placeholder` when the hint is blank.
    pub fn current<'a>(&'a self, placeholder: &'a str) -> &'a str {
        let tip = if self.tips.is_empty() {
            FALLBACK_TIPS.get(self.index).copied()
        } else {
            self.tips.get(self.index).map(String::as_str)
        };
        match tip {
            Some(tip) if !tip.is_empty() => tip,
            _ => placeholder,
        }
    }
}

impl Default for TipRotator {
    fn default() -> Self {
        Self::new(Vec::new(), DEFAULT_ROTATE_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tips(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_fallback_tips_when_empty() {
        let rotator = TipRotator::default();
        assert_eq!(rotator.tips(), FALLBACK_TIPS.to_vec());
        assert_eq!(rotator.current("Search"), FALLBACK_TIPS[0]);
    }

    #[test]
    fn test_inactive_rotator_does_not_rotate() {
        let mut rotator = TipRotator::default();
        let t0 = Instant::now();
        assert!(!rotator.tick(t0));
        assert!(!rotator.tick(t0 + Duration::from_secs(60)));
        assert_eq!(rotator.index(), 0);
        assert!(!rotator.is_running());
    }

    #[test]
    fn test_rotates_each_period_and_wraps() {
        let mut rotator = TipRotator::new(tips(&["a", "b"]), Duration::from_millis(100));
        rotator.set_active(true);
        let t0 = Instant::now();

        assert!(!rotator.tick(t0));
        assert!(rotator.is_running());
        assert!(rotator.tick(t0 + Duration::from_millis(100)));
        assert_eq!(rotator.current(""), "b");
        assert!(rotator.tick(t0 + Duration::from_millis(200)));
        assert_eq!(rotator.current(""), "a");
    }

    #[test]
    fn test_deactivation_cancels_interval() {
        let mut rotator = TipRotator::new(tips(&["a", "b"]), Duration::from_millis(100));
        rotator.set_active(true);
        let t0 = Instant::now();
        rotator.tick(t0);

        rotator.set_active(false);
        assert!(!rotator.is_running());
        assert!(!rotator.tick(t0 + Duration::from_millis(500)));
        assert_eq!(rotator.index(), 0);
    }

    #[test]
    fn test_reactivation_restarts_interval() {
        let mut rotator = TipRotator::new(tips(&["a", "b", "c"]), Duration::from_millis(100));
        let t0 = Instant::now();
        rotator.set_active(true);
        rotator.tick(t0);
        rotator.set_active(false);

        // Back on at t0 + 90ms: the full period counts from there
        rotator.set_active(true);
        let t1 = t0 + Duration::from_millis(90);
        assert!(!rotator.tick(t1));
        assert!(!rotator.tick(t0 + Duration::from_millis(150)));
        assert!(rotator.tick(t1 + Duration::from_millis(100)));
        assert_eq!(rotator.index(), 1);
    }

    #[test]
    fn test_index_wrapped_when_list_shrinks() {
        let mut rotator = TipRotator::new(tips(&["a", "b", "c", "d"]), Duration::from_millis(10));
        rotator.set_active(true);
        let t0 = Instant::now();
        rotator.tick(t0);
        rotator.tick(t0 + Duration::from_millis(30));
        assert_eq!(rotator.index(), 3);

        rotator.set_tips(tips(&["x", "y"]));
        assert_eq!(rotator.index(), 1);
        assert_eq!(rotator.current(""), "y");

        rotator.set_tips(Vec::new());
        assert!(rotator.index() < FALLBACK_TIPS.len());
    }

    #[test]
    fn test_blank_tip_falls_back_to_placeholder() {
        let rotator = TipRotator::new(tips(&[""]), DEFAULT_ROTATE_INTERVAL);
        assert_eq!(rotator.current("Search apartments..."), "Search apartments...");
    }

    #[test]
    fn test_set_period_restarts() {
        let mut rotator = TipRotator::new(tips(&["a", "b"]), Duration::from_millis(100));
        rotator.set_active(true);
        let t0 = Instant::now();
        rotator.tick(t0);
        rotator.set_period(Duration::from_millis(1000));
        assert!(!rotator.is_running());
        assert_eq!(rotator.period(), Duration::from_millis(1000));
    }
}
