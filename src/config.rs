//! Configuration to acknowledge presentation preferences as well as set defaults.
//!
//! Specifically, we try to find a scrollnav.toml, and if present we load settings from there.
//! This provides timing, layout and effect preferences. Anything missing falls back to the
//! defaults below, and a file that fails to parse is ignored with a warning.

use crate::error::{PageError, PageResult};
use crate::navigator::RacePolicy;
use facet::Facet;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// File name looked up in the working directory.
pub const CONFIG_FILE: &str = "scrollnav.toml";

#[derive(Facet, Clone, Debug, PartialEq)]
/// User preferences loaded from scrollnav.toml or falling back to defaults.
pub struct Config {
    #[facet(default = 100)]
    /// Maximum line width for page text wrapping.
    pub wrap_width: usize,
    #[facet(default = 100)]
    /// Quiet period after the last scroll event before the current section is re-evaluated.
    pub settle_delay_ms: u64,
    #[facet(default = 450)]
    /// Duration of the smooth scroll started by a section jump.
    pub scroll_duration_ms: u64,
    #[facet(default = 3000)]
    /// How long the loading splash stays up after start-up.
    pub splash_ms: u64,
    #[facet(default = 50)]
    /// Parallax drift of decorative glyphs, in thousandths of the scroll offset.
    pub parallax_per_mille: u64,
    #[facet(default = 10)]
    /// Share of a card that must be in view before it animates in.
    pub reveal_threshold_percent: usize,
    #[facet(default = 2)]
    /// Rows trimmed off the bottom of the viewport when testing card visibility.
    pub reveal_bottom_margin: usize,
    #[facet(default = true)]
    /// Pad every section to at least one viewport of height.
    pub full_height_sections: bool,
    #[facet(default = false)]
    /// Ignore organic section tracking while a jump animation is still running.
    pub hold_during_programmatic_scroll: bool,
    #[facet(default = String::new())]
    /// Log file for tracing output; empty disables logging.
    pub log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            wrap_width: 100,
            settle_delay_ms: 100,
            scroll_duration_ms: 450,
            splash_ms: 3000,
            parallax_per_mille: 50,
            reveal_threshold_percent: 10,
            reveal_bottom_margin: 2,
            full_height_sections: true,
            hold_during_programmatic_scroll: false,
            log_file: String::new(),
        }
    }
}

impl Config {
    #[must_use]
    /// Load configuration from scrollnav.toml if present.
    pub fn load() -> Self {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    #[must_use]
    /// Load configuration from an explicit path, using defaults when it is absent or invalid.
    pub fn load_from(path: &Path) -> Self {
        if let Ok(contents) = fs::read_to_string(path) {
            match Self::parse(&contents) {
                Ok(config) => return config,
                Err(e) => tracing::warn!("ignoring {}: {e}", path.display()),
            }
        }
        Self::default()
    }

    /// Parse configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Config`] if the text is not valid TOML for this struct.
    pub fn parse(contents: &str) -> PageResult<Self> {
        facet_toml::from_str::<Self>(contents).map_err(|e| PageError::Config(e.to_string()))
    }

    #[must_use]
    /// Debounce interval for organic scroll tracking.
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    #[must_use]
    /// Length of the smooth scroll animation.
    pub fn scroll_duration(&self) -> Duration {
        Duration::from_millis(self.scroll_duration_ms)
    }

    #[must_use]
    /// Time the splash stays visible.
    pub fn splash_duration(&self) -> Duration {
        Duration::from_millis(self.splash_ms)
    }

    #[must_use]
    /// How programmatic jumps interact with organic tracking.
    pub fn race_policy(&self) -> RacePolicy {
        if self.hold_during_programmatic_scroll {
            RacePolicy::HoldUntilSettled
        } else {
            RacePolicy::Preserve
        }
    }
}
