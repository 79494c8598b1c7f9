//! The section navigator: which section is centred, and the dots that say so.
//!
//! The navigator owns the current section index and one indicator per section. Programmatic
//! navigation sets the index immediately and starts a smooth scroll it never waits for. Organic
//! tracking is debounced: every scroll event re-arms a single pending deadline, and only when the
//! viewport has been quiet for the settle delay is the section under the viewport midpoint
//! adopted.
//!
//! ```text
//! scroll event ──> pending = now + settle ──(another event)──> pending = now' + settle
//!                         │
//!                    now >= pending
//!                         v
//!        candidate = first section containing scroll_y + height / 2
//!        candidate != current  =>  current = candidate; update_dots()
//! ```
//!
//! A jump and a user scroll can race: organic tracking may overwrite the jump's section while
//! the animation is mid-flight. [`RacePolicy::Preserve`] keeps that behaviour.
//! [`RacePolicy::HoldUntilSettled`] suppresses organic updates until the jump's animation ends.

use crate::error::{PageError, PageResult};
use crate::section::SectionGeometry;
use crate::viewport::Viewport;
use std::time::{Duration, Instant};

/// Quiet period after the last scroll event before the section is re-evaluated.
pub const SETTLE_DELAY: Duration = Duration::from_millis(100);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
/// How a programmatic jump interacts with organic tracking.
pub enum RacePolicy {
    #[default]
    /// Organic tracking always runs, even over an in-flight jump.
    Preserve,
    /// Organic tracking is ignored until the jump's animation has settled.
    HoldUntilSettled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// What moved the viewport.
pub enum ScrollOrigin {
    /// The user scrolled.
    User,
    /// A frame of a smooth scroll moved the viewport.
    Animation,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
/// A navigation marker for one section.
pub struct Indicator {
    active: bool,
}

impl Indicator {
    #[must_use]
    /// Whether this indicator is highlighted.
    pub fn is_active(self) -> bool {
        self.active
    }
}

#[derive(Clone, Debug)]
/// Tracks the current section and keeps the indicators in step with it.
pub struct Navigator {
    sections: Vec<SectionGeometry>,
    indicators: Vec<Indicator>,
    current_section: usize,
    settle_delay: Duration,
    pending: Option<Instant>,
    policy: RacePolicy,
    jump_in_flight: bool,
}

impl Navigator {
    #[must_use]
    /// Creates a navigator at section 0 with one indicator per section.
    pub fn new(sections: Vec<SectionGeometry>, settle_delay: Duration, policy: RacePolicy) -> Self {
        let indicators = vec![Indicator::default(); sections.len()];
        Self {
            sections,
            indicators,
            current_section: 0,
            settle_delay,
            pending: None,
            policy,
            jump_in_flight: false,
        }
    }

    #[must_use]
    /// Index of the section currently considered centred.
    pub fn current_section(&self) -> usize {
        self.current_section
    }

    #[must_use]
    /// Number of sections.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    #[must_use]
    /// Indicators, index-aligned with the sections.
    pub fn indicators(&self) -> &[Indicator] {
        &self.indicators
    }

    #[must_use]
    /// Section geometry, index-aligned with the sections.
    pub fn sections(&self) -> &[SectionGeometry] {
        &self.sections
    }

    #[must_use]
    /// When the pending evaluation will fire, if one is armed.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending
    }

    #[must_use]
    /// Whether a programmatic jump is still holding off organic tracking.
    pub fn jump_in_flight(&self) -> bool {
        self.jump_in_flight
    }

    /// Jump to a section: set it current, start a smooth scroll to its top, sync the dots.
    ///
    /// Out-of-range indices are ignored.
    pub fn scroll_to_section(&mut self, index: usize, viewport: &mut Viewport, now: Instant) {
        let Some(target) = self.sections.get(index) else {
            tracing::trace!("ignoring jump to section {index} of {}", self.sections.len());
            return;
        };

        self.current_section = index;
        let moving = viewport.smooth_scroll_to(target.top, now);
        // A jump that goes nowhere produces no scroll events to settle it
        self.jump_in_flight = moving && self.policy == RacePolicy::HoldUntilSettled;
        self.update_dots();
    }

    /// Make exactly the current section's indicator active.
    pub fn update_dots(&mut self) {
        for (index, indicator) in self.indicators.iter_mut().enumerate() {
            indicator.active = index == self.current_section;
        }
    }

    /// Record a scroll event, restarting the settle delay.
    pub fn on_scroll(&mut self, origin: ScrollOrigin, now: Instant) {
        if origin == ScrollOrigin::User && self.jump_in_flight {
            tracing::trace!("user scroll took over from jump");
            self.jump_in_flight = false;
        }
        self.pending = Some(now + self.settle_delay);
    }

    /// Run the pending evaluation if the settle delay has elapsed.
    ///
    /// Returns whether an evaluation fired.
    pub fn poll(&mut self, now: Instant, viewport: &Viewport) -> bool {
        match self.pending {
            Some(deadline) if now >= deadline => {
                self.pending = None;
                self.settle(viewport);
                true
            }
            _ => false,
        }
    }

    fn settle(&mut self, viewport: &Viewport) {
        if self.jump_in_flight {
            if !viewport.is_animating() {
                self.jump_in_flight = false;
                tracing::trace!("jump settled on section {}", self.current_section);
            }
            return;
        }

        let reference = viewport.reference_point();
        let Some(candidate) = self.section_at(reference) else {
            tracing::trace!("no section contains {reference:.1}");
            return;
        };
        if candidate != self.current_section {
            tracing::debug!(
                "scroll settled on section {candidate} (was {})",
                self.current_section
            );
            self.current_section = candidate;
            self.update_dots();
        }
    }

    #[must_use]
    /// First section whose vertical range contains `y`.
    pub fn section_at(&self, y: f64) -> Option<usize> {
        self.sections.iter().position(|s| s.contains(y))
    }

    /// Replace section geometry after a relayout. The number of sections is fixed.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::SectionCount`] if `sections` has a different length.
    pub fn set_geometry(&mut self, sections: Vec<SectionGeometry>) -> PageResult<()> {
        if sections.len() != self.sections.len() {
            return Err(PageError::SectionCount {
                expected: self.sections.len(),
                actual: sections.len(),
            });
        }
        self.sections = sections;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/navigator.rs"]
mod tests;
