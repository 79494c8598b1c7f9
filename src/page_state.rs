//! The single source of truth for a page being presented.
//!
//! A TUI needs one place that can be interrogated and mutated as the user scrolls, clicks and
//! jumps. `PageState` owns the laid-out page, the viewport onto it, the section navigator and the
//! visual effects, and routes every input and clock tick through them in a fixed order: move the
//! viewport, notify the navigator, then refresh whatever depends on the visible rows.

use crate::config::Config;
use crate::effects::entrance::Entrance;
use crate::effects::lazy_load::LazyImages;
use crate::effects::lightbox::Lightbox;
use crate::effects::splash::Splash;
use crate::layout::{layout_page, LayoutLine, LayoutOptions, LineKind, PageLayout};
use crate::navigator::{Navigator, ScrollOrigin};
use crate::section::Page;
use crate::viewport::Viewport;
use ratatui::layout::{Position, Rect};
use serde::Serialize;
use std::ops::Range;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Rows moved per mouse wheel notch.
pub const WHEEL_ROWS: f64 = 3.0;

const FRAME: Duration = Duration::from_millis(16);
const IDLE: Duration = Duration::from_millis(250);

#[derive(Clone, Debug, Default)]
/// Screen regions recorded by the last draw, for mouse hit testing.
pub struct HitRegions {
    /// Where page rows are drawn.
    pub page: Rect,
    /// One cell range per indicator, index-aligned with the sections.
    pub dots: Vec<Rect>,
    /// Lightbox popup, when open.
    pub lightbox: Option<Rect>,
    /// Lightbox close button, when open.
    pub lightbox_close: Option<Rect>,
}

#[derive(Serialize, Debug)]
/// Serialisable summary of where the reader ended up.
pub struct Snapshot {
    /// Document being presented.
    pub file: String,
    /// Index of the current section.
    pub current_section: usize,
    /// Title of the current section.
    pub current_title: String,
    /// All section titles in order.
    pub sections: Vec<String>,
    /// Active state of each indicator.
    pub indicators: Vec<bool>,
    /// Final scroll offset in rows.
    pub scroll_y: f64,
}

/// Bridges the loaded page, its viewport and the navigator, maintaining session state.
pub struct PageState {
    /// Document being presented.
    pub file: PathBuf,
    /// Parsed content.
    pub page: Page,
    /// Rows for the current terminal size.
    pub layout: PageLayout,
    /// Current section tracking and indicators.
    pub navigator: Navigator,
    /// Scroll position and smooth scrolling.
    pub viewport: Viewport,
    /// Image overlay.
    pub lightbox: Lightbox,
    /// Placeholder or loaded state per image.
    pub images: LazyImages,
    /// Entrance animation state per card.
    pub entrance: Entrance,
    /// Start-up splash.
    pub splash: Splash,
    /// Regions from the last draw.
    pub hits: HitRegions,
    /// Status feedback displayed in the help bar.
    pub message: Option<String>,
    /// Parallax drift rate for decorative glyphs.
    pub parallax_per_mille: u64,
    wrap_width: usize,
    full_height_sections: bool,
    size: (usize, usize),
}

impl PageState {
    #[must_use]
    /// Lays out the page for a `width` by `height` page area and starts at the first section.
    pub fn new(
        file: PathBuf,
        page: Page,
        cfg: &Config,
        width: usize,
        height: usize,
        now: Instant,
    ) -> Self {
        let options = LayoutOptions {
            width: width.min(cfg.wrap_width),
            viewport_height: height,
            full_height_sections: cfg.full_height_sections,
        };
        let layout = layout_page(&page, options);
        let viewport = Viewport::new(
            rows_to_f64(height),
            rows_to_f64(layout.content_height()),
            cfg.scroll_duration(),
        );
        let mut navigator = Navigator::new(
            layout.sections.clone(),
            cfg.settle_delay(),
            cfg.race_policy(),
        );
        navigator.update_dots();

        let mut state = Self {
            file,
            images: LazyImages::new(page.images.len()),
            entrance: Entrance::new(
                page.cards.len(),
                cfg.reveal_threshold_percent,
                cfg.reveal_bottom_margin,
            ),
            page,
            layout,
            navigator,
            viewport,
            lightbox: Lightbox::default(),
            splash: Splash::new(now, cfg.splash_duration()),
            hits: HitRegions::default(),
            message: None,
            parallax_per_mille: cfg.parallax_per_mille,
            wrap_width: cfg.wrap_width,
            full_height_sections: cfg.full_height_sections,
            size: (width, height),
        };
        state.refresh_visibility();
        state
    }

    /// Re-lay out the page for a new page area size.
    pub fn resize(&mut self, width: usize, height: usize, now: Instant) {
        if self.size == (width, height) {
            return;
        }
        self.size = (width, height);
        self.layout = layout_page(
            &self.page,
            LayoutOptions {
                width: width.min(self.wrap_width),
                viewport_height: height,
                full_height_sections: self.full_height_sections,
            },
        );
        if let Err(e) = self.navigator.set_geometry(self.layout.sections.clone()) {
            tracing::warn!("keeping old section geometry: {e}");
        }
        let moved = self.viewport.resize(
            rows_to_f64(height),
            rows_to_f64(self.layout.content_height()),
        );
        if self.viewport.is_animating() {
            // Rows moved under the jump, so aim at the section's new top
            let current = self.navigator.current_section();
            self.navigator
                .scroll_to_section(current, &mut self.viewport, now);
        } else if moved {
            self.navigator.on_scroll(ScrollOrigin::Animation, now);
        }
        tracing::debug!("relayout for {width}x{height}");
        self.refresh_visibility();
    }

    /// Scroll by `rows` as the user.
    pub fn scroll_by(&mut self, rows: f64, now: Instant) {
        if self.viewport.scroll_by(rows) {
            self.user_scrolled(now);
        }
    }

    /// Scroll by one viewport, less a row of overlap.
    pub fn page_down(&mut self, now: Instant) {
        self.scroll_by((self.viewport.height() - 1.0).max(1.0), now);
    }

    /// Scroll back by one viewport, less a row of overlap.
    pub fn page_up(&mut self, now: Instant) {
        self.scroll_by(-(self.viewport.height() - 1.0).max(1.0), now);
    }

    /// Jump straight to the top of the page as the user.
    pub fn scroll_to_top(&mut self, now: Instant) {
        if self.viewport.scroll_to(0.0) {
            self.user_scrolled(now);
        }
    }

    /// Jump straight to the bottom of the page as the user.
    pub fn scroll_to_bottom(&mut self, now: Instant) {
        if self.viewport.scroll_to(self.viewport.max_scroll()) {
            self.user_scrolled(now);
        }
    }

    fn user_scrolled(&mut self, now: Instant) {
        self.navigator.on_scroll(ScrollOrigin::User, now);
        self.refresh_visibility();
    }

    /// Smooth-scroll to a section. Out-of-range indices do nothing.
    pub fn jump_to_section(&mut self, index: usize, now: Instant) {
        self.navigator
            .scroll_to_section(index, &mut self.viewport, now);
    }

    /// Smooth-scroll to the section after the current one.
    pub fn next_section(&mut self, now: Instant) {
        self.jump_to_section(self.navigator.current_section() + 1, now);
    }

    /// Smooth-scroll to the section before the current one.
    pub fn prev_section(&mut self, now: Instant) {
        if let Some(prev) = self.navigator.current_section().checked_sub(1) {
            self.jump_to_section(prev, now);
        }
    }

    /// Advance animations and timers to `now`.
    pub fn tick(&mut self, now: Instant) {
        if self.viewport.tick(now) {
            self.navigator.on_scroll(ScrollOrigin::Animation, now);
            self.refresh_visibility();
        }
        self.navigator.poll(now, &self.viewport);
        self.splash.update(now);
    }

    #[must_use]
    /// How long the event loop may sleep before something needs doing.
    pub fn next_wakeup(&self, now: Instant) -> Duration {
        let mut wait = if self.viewport.is_animating() {
            FRAME
        } else {
            IDLE
        };
        for deadline in [self.navigator.deadline(), self.splash.deadline()]
            .into_iter()
            .flatten()
        {
            wait = wait.min(deadline.saturating_duration_since(now));
        }
        wait
    }

    #[must_use]
    /// Document rows currently inside the viewport.
    pub fn visible_rows(&self) -> Range<usize> {
        let start = f64_to_row(self.viewport.scroll_y());
        let height = f64_to_row(self.viewport.height().ceil());
        let end = (start + height).min(self.layout.lines.len());
        start.min(end)..end
    }

    /// Feed the visible rows to the lazy loader and entrance animations.
    pub fn refresh_visibility(&mut self) {
        let visible = self.visible_rows();
        self.images.reveal(&self.layout.images, &visible);
        self.entrance.observe(&self.layout.cards, &visible);
    }

    #[must_use]
    /// Laid-out row under screen row `row` of the page area, if any.
    pub fn line_at_screen_row(&self, row: u16) -> Option<&LayoutLine> {
        let offset = row.checked_sub(self.hits.page.y)?;
        if offset >= self.hits.page.height {
            return None;
        }
        self.layout
            .lines
            .get(self.visible_rows().start + usize::from(offset))
    }

    /// Open the lightbox on the first image with a row in view.
    pub fn open_first_visible_image(&mut self) {
        let visible = self.visible_rows();
        let image = self.layout.lines[visible].iter().find_map(|line| match line.kind {
            LineKind::Image(image) => Some(image),
            _ => None,
        });
        match image {
            Some(image) => self.lightbox.open(image),
            None => self.message = Some("No image in view".to_string()),
        }
    }

    /// Route a left click at a screen cell.
    pub fn click(&mut self, column: u16, row: u16, now: Instant) {
        let position = Position::new(column, row);

        if self.lightbox.is_open() {
            let on_close = self
                .hits
                .lightbox_close
                .is_some_and(|r| r.contains(position));
            let on_popup = self.hits.lightbox.is_some_and(|r| r.contains(position));
            if on_close || !on_popup {
                self.lightbox.close();
            }
            return;
        }

        if let Some(index) = self.hits.dots.iter().position(|r| r.contains(position)) {
            self.jump_to_section(index, now);
            return;
        }

        if !self.hits.page.contains(position) {
            return;
        }
        let image = match self.line_at_screen_row(row).map(|l| &l.kind) {
            Some(LineKind::Image(image)) => Some(*image),
            _ => None,
        };
        if let Some(image) = image {
            self.lightbox.open(image);
        }
    }

    #[must_use]
    /// Summary of the session for printing on exit.
    pub fn snapshot(&self) -> Snapshot {
        let current = self.navigator.current_section();
        Snapshot {
            file: self.file.display().to_string(),
            current_section: current,
            current_title: self
                .page
                .sections
                .get(current)
                .map(|s| s.title.clone())
                .unwrap_or_default(),
            sections: self.page.titles(),
            indicators: self
                .navigator
                .indicators()
                .iter()
                .map(|i| i.is_active())
                .collect(),
            scroll_y: self.viewport.scroll_y(),
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn rows_to_f64(rows: usize) -> f64 {
    rows as f64
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn f64_to_row(y: f64) -> usize {
    y.max(0.0).floor() as usize
}

#[cfg(test)]
#[path = "tests/page_state.rs"]
mod tests;
