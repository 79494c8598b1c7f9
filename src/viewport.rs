//! The scrollable window onto the laid-out page.
//!
//! The viewport owns the scroll offset and clamps it to the scrollable range. A smooth scroll is
//! fire-and-forget: it is started, advanced by clock ticks, and dropped when it completes or when
//! the user scrolls. Nobody is told when it finishes.

use crate::ease::Ease;
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq)]
/// An in-flight animated scroll.
pub struct ScrollAnimation {
    /// Offset at the start of the animation.
    pub from: f64,
    /// Clamped destination offset.
    pub to: f64,
    /// When the animation began.
    pub started: Instant,
    /// Total length of the animation.
    pub duration: Duration,
    /// Progress curve.
    pub ease: Ease,
}

impl ScrollAnimation {
    #[must_use]
    /// Offset at `now`, and whether the animation has finished.
    pub fn sample(&self, now: Instant) -> (f64, bool) {
        let elapsed = now.saturating_duration_since(self.started);
        if self.duration.is_zero() || elapsed >= self.duration {
            return (self.to, true);
        }
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        (self.from + (self.to - self.from) * self.ease.apply(t), false)
    }
}

#[derive(Clone, Debug)]
/// Scroll position and dimensions of the visible window, in document coordinates.
pub struct Viewport {
    scroll_y: f64,
    height: f64,
    content_height: f64,
    scroll_duration: Duration,
    animation: Option<ScrollAnimation>,
}

impl Viewport {
    #[must_use]
    /// Creates a viewport at the top of the document.
    pub fn new(height: f64, content_height: f64, scroll_duration: Duration) -> Self {
        Self {
            scroll_y: 0.0,
            height,
            content_height,
            scroll_duration,
            animation: None,
        }
    }

    #[must_use]
    /// Current vertical scroll offset.
    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    #[must_use]
    /// Visible height.
    pub fn height(&self) -> f64 {
        self.height
    }

    #[must_use]
    /// Total height of the document.
    pub fn content_height(&self) -> f64 {
        self.content_height
    }

    #[must_use]
    /// Largest reachable scroll offset.
    pub fn max_scroll(&self) -> f64 {
        (self.content_height - self.height).max(0.0)
    }

    #[must_use]
    /// Vertical midpoint of the visible window in document coordinates.
    pub fn reference_point(&self) -> f64 {
        self.scroll_y + self.height / 2.0
    }

    #[must_use]
    /// Whether a smooth scroll is still running.
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    #[must_use]
    /// The running smooth scroll, if any.
    pub fn animation(&self) -> Option<&ScrollAnimation> {
        self.animation.as_ref()
    }

    fn clamp(&self, y: f64) -> f64 {
        y.clamp(0.0, self.max_scroll())
    }

    /// Scroll by `delta` as the user would. Cancels any smooth scroll.
    ///
    /// Returns whether the offset changed.
    pub fn scroll_by(&mut self, delta: f64) -> bool {
        self.scroll_to(self.scroll_y + delta)
    }

    /// Jump to an offset as the user would. Cancels any smooth scroll.
    ///
    /// Returns whether the offset changed.
    pub fn scroll_to(&mut self, y: f64) -> bool {
        if self.animation.take().is_some() {
            tracing::trace!("user scroll cancelled smooth scroll");
        }
        self.set_offset(y)
    }

    fn set_offset(&mut self, y: f64) -> bool {
        let y = self.clamp(y);
        let changed = (y - self.scroll_y).abs() > f64::EPSILON;
        self.scroll_y = y;
        changed
    }

    /// Start a smooth scroll towards `target`, replacing any running one.
    ///
    /// Returns whether the viewport will move. A clamped target equal to the current offset
    /// stops any running smooth scroll and starts nothing.
    pub fn smooth_scroll_to(&mut self, target: f64, now: Instant) -> bool {
        let to = self.clamp(target);
        if (to - self.scroll_y).abs() <= f64::EPSILON {
            self.animation = None;
            tracing::trace!("already at {to:.1}");
            return false;
        }
        tracing::debug!("smooth scroll {:.1} -> {to:.1}", self.scroll_y);
        self.animation = Some(ScrollAnimation {
            from: self.scroll_y,
            to,
            started: now,
            duration: self.scroll_duration,
            ease: Ease::default(),
        });
        true
    }

    /// Advance the smooth scroll to `now`.
    ///
    /// Returns whether the offset changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(animation) = self.animation else {
            return false;
        };
        let (y, done) = animation.sample(now);
        if done {
            self.animation = None;
        }
        self.set_offset(y)
    }

    /// Update dimensions after a relayout, keeping the offset in range.
    ///
    /// Returns whether the offset had to move.
    pub fn resize(&mut self, height: f64, content_height: f64) -> bool {
        self.height = height;
        self.content_height = content_height;
        if let Some(animation) = &mut self.animation {
            animation.to = animation.to.clamp(0.0, (content_height - height).max(0.0));
        }
        self.set_offset(self.scroll_y)
    }
}

#[cfg(test)]
#[path = "tests/viewport.rs"]
mod tests;
