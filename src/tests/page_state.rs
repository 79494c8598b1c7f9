#![allow(clippy::float_cmp)]

use super::{PageState, WHEEL_ROWS};
use crate::config::Config;
use crate::formats::markdown::MarkdownFormat;
use crate::input::parse_page;
use ratatui::layout::Rect;
use std::path::PathBuf;
use std::time::{Duration, Instant};

const DOC: &str = "# Intro

Welcome to the page.

# Photos

![Sunset](sunset.jpg)

# Wishes

- Be happy
- Stay curious

> See you soon
";

const WIDTH: usize = 40;
const HEIGHT: usize = 10;

fn config() -> Config {
    Config {
        splash_ms: 0,
        ..Config::default()
    }
}

fn state_with(cfg: &Config, now: Instant) -> PageState {
    let page = parse_page(DOC, &MarkdownFormat).unwrap();
    PageState::new(PathBuf::from("page.md"), page, cfg, WIDTH, HEIGHT, now)
}

fn active(app: &PageState) -> Vec<bool> {
    app.navigator
        .indicators()
        .iter()
        .map(|i| i.is_active())
        .collect()
}

/// Tick every frame for `ms` milliseconds.
fn run_for(app: &mut PageState, from: Instant, ms: u64) -> Instant {
    let mut now = from;
    let end = from + Duration::from_millis(ms);
    while now < end {
        now += Duration::from_millis(16);
        app.tick(now);
    }
    now
}

#[test]
fn starts_on_first_section_with_first_dot() {
    let app = state_with(&config(), Instant::now());
    assert_eq!(app.navigator.current_section(), 0);
    assert_eq!(active(&app), vec![true, false, false]);
    assert!(!app.splash.is_visible());
    assert_eq!(app.layout.sections.len(), 3);
}

#[test]
fn splash_hides_after_its_time() {
    let now = Instant::now();
    let mut app = state_with(&Config::default(), now);
    assert!(app.splash.is_visible());
    run_for(&mut app, now, 3100);
    assert!(!app.splash.is_visible());
}

#[test]
fn jump_animates_and_stays_on_target() {
    let now = Instant::now();
    let mut app = state_with(&config(), now);

    app.jump_to_section(2, now);
    assert_eq!(app.navigator.current_section(), 2);
    assert!(app.viewport.is_animating());

    run_for(&mut app, now, 1000);
    assert!(!app.viewport.is_animating());
    assert_eq!(app.viewport.scroll_y(), app.layout.sections[2].top);
    assert_eq!(app.navigator.current_section(), 2);
    assert_eq!(active(&app), vec![false, false, true]);
}

#[test]
fn organic_scroll_updates_section_after_settling() {
    let now = Instant::now();
    let mut app = state_with(&config(), now);
    let target = app.layout.sections[1].top;

    app.scroll_by(target, now);
    assert_eq!(app.navigator.current_section(), 0, "debounce has not fired");

    app.tick(now + Duration::from_millis(99));
    assert_eq!(app.navigator.current_section(), 0);
    app.tick(now + Duration::from_millis(100));
    assert_eq!(app.navigator.current_section(), 1);
    assert_eq!(active(&app), vec![false, true, false]);
}

#[test]
fn next_and_previous_stay_in_range() {
    let now = Instant::now();
    let mut app = state_with(&config(), now);

    app.prev_section(now);
    assert_eq!(app.navigator.current_section(), 0);

    app.next_section(now);
    app.next_section(now);
    app.next_section(now);
    assert_eq!(app.navigator.current_section(), 2);

    app.prev_section(now);
    assert_eq!(app.navigator.current_section(), 1);
}

#[test]
fn clicking_a_dot_jumps() {
    let now = Instant::now();
    let mut app = state_with(&config(), now);
    app.hits.dots = (0..3).map(|i| Rect::new(60, 2 + i * 2, 4, 1)).collect();

    app.click(61, 6, now);
    assert_eq!(app.navigator.current_section(), 2);

    app.click(0, 0, now);
    assert_eq!(app.navigator.current_section(), 2, "clicks elsewhere do nothing");
}

#[test]
fn lazy_image_loads_when_scrolled_into_view() {
    let now = Instant::now();
    let mut app = state_with(&config(), now);
    assert!(!app.images.is_loaded(0));

    app.jump_to_section(1, now);
    run_for(&mut app, now, 600);
    assert!(app.images.is_loaded(0));

    app.scroll_to_top(now);
    assert!(app.images.is_loaded(0), "loading is one-shot");
}

#[test]
fn cards_animate_in_once() {
    let now = Instant::now();
    let mut app = state_with(&config(), now);
    assert!(!app.entrance.is_shown(0));

    app.scroll_to_bottom(now);
    assert!(app.entrance.is_shown(0));
    assert!(app.entrance.is_shown(2));

    app.scroll_to_top(now);
    assert!(app.entrance.is_shown(0));
}

#[test]
fn lightbox_opens_on_image_and_closes_on_backdrop() {
    let now = Instant::now();
    let mut app = state_with(&config(), now);

    app.open_first_visible_image();
    assert!(!app.lightbox.is_open());
    assert!(app.message.is_some());

    app.jump_to_section(1, now);
    run_for(&mut app, now, 600);
    app.open_first_visible_image();
    assert_eq!(app.lightbox.image(), Some(0));

    app.hits.lightbox = Some(Rect::new(10, 5, 20, 8));
    app.hits.lightbox_close = Some(Rect::new(26, 5, 3, 1));

    app.click(15, 8, now);
    assert!(app.lightbox.is_open(), "clicks inside the popup keep it open");

    app.click(1, 1, now);
    assert!(!app.lightbox.is_open());

    app.lightbox.open(0);
    app.click(27, 5, now);
    assert!(!app.lightbox.is_open(), "close button closes");
}

#[test]
fn clicking_an_image_row_opens_lightbox() {
    let now = Instant::now();
    let mut app = state_with(&config(), now);
    app.hits.page = Rect::new(3, 0, 40, 10);

    let image_row = app.layout.images[0].top;
    app.scroll_by(app.layout.sections[1].top, now);
    let screen_row = image_row - app.visible_rows().start;

    app.click(5, u16::try_from(screen_row).unwrap(), now);
    assert_eq!(app.lightbox.image(), Some(0));
}

#[test]
fn resize_relayouts_without_changing_section() {
    let now = Instant::now();
    let mut app = state_with(&config(), now);
    app.jump_to_section(1, now);

    app.resize(WIDTH, HEIGHT * 2, now);
    assert_eq!(app.navigator.current_section(), 1);
    assert!(app.layout.sections.iter().all(|s| s.height >= 20.0));
    assert_eq!(app.navigator.sections(), app.layout.sections.as_slice());
}

#[test]
fn wakeup_follows_pending_deadline() {
    let now = Instant::now();
    let mut app = state_with(&config(), now);
    assert_eq!(app.next_wakeup(now), Duration::from_millis(250));

    app.scroll_by(WHEEL_ROWS, now);
    assert_eq!(app.next_wakeup(now), Duration::from_millis(100));

    app.jump_to_section(2, now);
    assert_eq!(app.next_wakeup(now), Duration::from_millis(16));
}

#[test]
fn snapshot_serialises_position() {
    let now = Instant::now();
    let mut app = state_with(&config(), now);
    app.jump_to_section(2, now);

    let json = serde_json::to_value(app.snapshot()).unwrap();
    assert_eq!(json["current_section"], 2);
    assert_eq!(json["current_title"], "Wishes");
    assert_eq!(json["indicators"], serde_json::json!([false, false, true]));
}
