//! Loading splash shown for a fixed time after start-up.

use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug)]
/// Splash visibility, hidden for good once its time is up.
pub struct Splash {
    hide_at: Option<Instant>,
}

impl Splash {
    #[must_use]
    /// Shows the splash until `duration` after `loaded`. A zero duration never shows it.
    pub fn new(loaded: Instant, duration: Duration) -> Self {
        let hide_at = (!duration.is_zero()).then(|| loaded + duration);
        Self { hide_at }
    }

    /// Hide the splash if its time has come.
    pub fn update(&mut self, now: Instant) {
        if self.hide_at.is_some_and(|at| now >= at) {
            tracing::debug!("splash hidden");
            self.hide_at = None;
        }
    }

    #[must_use]
    /// Whether the splash is showing.
    pub fn is_visible(&self) -> bool {
        self.hide_at.is_some()
    }

    #[must_use]
    /// When the splash will hide, if it is showing.
    pub fn deadline(&self) -> Option<Instant> {
        self.hide_at
    }
}
