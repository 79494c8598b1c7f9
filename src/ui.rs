//! The UI renders the page state into something visible and clickable.
//!
//! The screen is split into a decorative parallax gutter, the page itself, the dot rail and a
//! help bar. Overlays (lightbox, splash) are drawn last. Every draw records where the dots and
//! overlays landed so mouse clicks can be mapped back onto them.

use crate::effects::parallax;
use crate::layout::{LayoutLine, LineKind};
use crate::page_state::{HitRegions, PageState};
use crate::section::CardKind;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const DECOR_GLYPHS: [&str; 3] = ["✦", "·", "✧"];
const DECOR_SPACING: i64 = 9;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Fixed screen regions for a terminal area.
pub struct Regions {
    /// Gutter holding the parallax decoration.
    pub decor: Rect,
    /// Page rows.
    pub page: Rect,
    /// Dot indicators.
    pub rail: Rect,
    /// Help and status bar.
    pub help: Rect,
}

#[must_use]
/// Split a terminal area into the regions the page is drawn in.
pub fn regions(area: Rect) -> Regions {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(3), // Decoration
            Constraint::Min(0),    // Page
            Constraint::Length(4), // Dots
        ])
        .split(rows[0]);

    Regions {
        decor: columns[0],
        page: columns[1],
        rail: columns[2],
        help: rows[1],
    }
}

/// Renders the page and any overlays, recording hit regions on the state.
pub fn draw(f: &mut Frame, app: &mut PageState) {
    let area = f.area();
    let regions = regions(area);
    let mut hits = HitRegions {
        page: regions.page,
        ..HitRegions::default()
    };

    draw_decor(f, app, regions.decor);
    draw_page(f, app, regions.page);
    hits.dots = draw_rail(f, app, regions.rail);
    draw_help(f, app, regions.help);

    if let Some(image) = app.lightbox.image() {
        let (popup, close) = draw_lightbox(f, app, image, area);
        hits.lightbox = Some(popup);
        hits.lightbox_close = Some(close);
    }

    if app.splash.is_visible() {
        draw_splash(f, app, area);
    }

    app.hits = hits;
}

fn draw_decor(f: &mut Frame, app: &PageState, area: Rect) {
    let scroll_y = app.viewport.scroll_y();
    let phase = scroll_y - parallax::offset(scroll_y, app.parallax_per_mille);

    let lines: Vec<Line> = (0..area.height)
        .map(|row| {
            let doc_row = round_row(f64::from(row) + phase);
            if doc_row.rem_euclid(DECOR_SPACING) == 0 {
                let glyph = DECOR_GLYPHS[glyph_index(doc_row / DECOR_SPACING)];
                Line::from(Span::styled(
                    format!(" {glyph}"),
                    Style::default().fg(Color::DarkGray),
                ))
            } else {
                Line::default()
            }
        })
        .collect();

    f.render_widget(Paragraph::new(lines), area);
}

#[allow(clippy::cast_possible_truncation)]
fn round_row(y: f64) -> i64 {
    y.round() as i64
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss
)]
fn glyph_index(n: i64) -> usize {
    n.rem_euclid(DECOR_GLYPHS.len() as i64) as usize
}

fn draw_page(f: &mut Frame, app: &PageState, area: Rect) {
    let visible = app.visible_rows();
    let lines: Vec<Line> = app.layout.lines[visible]
        .iter()
        .map(|line| render_line(app, line))
        .collect();

    f.render_widget(Paragraph::new(lines), area);
}

fn render_line<'a>(app: &'a PageState, line: &'a LayoutLine) -> Line<'a> {
    match &line.kind {
        LineKind::Heading(index) => {
            let style = if *index == app.navigator.current_section() {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };
            Line::from(Span::styled(line.text.as_str(), style))
        }
        LineKind::Subheading => Line::from(Span::styled(
            line.text.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        LineKind::Text => Line::from(line.text.as_str()),
        LineKind::Code => Line::from(Span::styled(
            line.text.as_str(),
            Style::default().fg(Color::Blue),
        )),
        LineKind::Image(image) => {
            let Some(image_ref) = app.page.images.get(*image) else {
                return Line::default();
            };
            if app.images.is_loaded(*image) {
                Line::from(vec![
                    Span::styled("▣ ", Style::default().fg(Color::Magenta)),
                    Span::styled(
                        image_ref.alt.clone(),
                        Style::default().add_modifier(Modifier::UNDERLINED),
                    ),
                    Span::styled(
                        format!(" ({})", image_ref.src),
                        Style::default().fg(Color::DarkGray),
                    ),
                ])
            } else {
                Line::from(Span::styled(
                    "░░░░ loading image ░░░░",
                    Style::default().fg(Color::DarkGray),
                ))
            }
        }
        LineKind::Card { card, .. } => {
            let style = if app.entrance.is_shown(*card) {
                match app.page.cards.get(*card).map(|c| c.kind) {
                    Some(CardKind::Bubble) => Style::default().fg(Color::Green),
                    _ => Style::default().fg(Color::Yellow),
                }
            } else {
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::DIM)
            };
            Line::from(Span::styled(line.text.as_str(), style))
        }
        LineKind::Blank => Line::default(),
    }
}

/// Draw one dot per section, centred vertically, and return each dot's cell range.
fn draw_rail(f: &mut Frame, app: &PageState, area: Rect) -> Vec<Rect> {
    let indicators = app.navigator.indicators();
    let count = u16::try_from(indicators.len()).unwrap_or(u16::MAX);
    if count == 0 || area.height == 0 {
        return Vec::new();
    }

    let step: u16 = if count.saturating_mul(2) <= area.height {
        2
    } else {
        1
    };
    let span = count.saturating_sub(1).saturating_mul(step) + 1;
    let top = area.y + area.height.saturating_sub(span) / 2;

    let mut rects = Vec::with_capacity(indicators.len());
    let mut lines = vec![Line::default(); usize::from(area.height)];
    for (index, indicator) in indicators.iter().enumerate() {
        let y = top.saturating_add(u16::try_from(index).unwrap_or(u16::MAX).saturating_mul(step));
        if y >= area.y + area.height {
            break;
        }
        let (glyph, style) = if indicator.is_active() {
            ("●", Style::default().fg(Color::Cyan))
        } else {
            ("○", Style::default().fg(Color::DarkGray))
        };
        lines[usize::from(y - area.y)] = Line::from(Span::styled(glyph, style));
        rects.push(Rect::new(area.x, y, area.width, 1));
    }

    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
    rects
}

fn draw_help(f: &mut Frame, app: &PageState, area: Rect) {
    let current = app.navigator.current_section();
    let title = app
        .page
        .sections
        .get(current)
        .map_or("", |s| s.title.as_str());
    let position = format!("{}/{} {title}", current + 1, app.page.sections.len());

    let help = if let Some(ref msg) = app.message {
        msg.clone()
    } else if app.lightbox.is_open() {
        "Esc/click outside: Close".to_string()
    } else {
        "↑/↓: Scroll | n/p: Next/Prev | 1-9: Section | i: Image | Click dot: Jump | q: Quit"
            .to_string()
    };

    let help_widget = Paragraph::new(help).block(
        Block::default()
            .borders(Borders::ALL)
            .title(position),
    );
    f.render_widget(help_widget, area);
}

/// Draw the lightbox popup, returning the popup and close button areas.
fn draw_lightbox(f: &mut Frame, app: &PageState, image: usize, area: Rect) -> (Rect, Rect) {
    let popup = centered(area, 60, 40);
    let close = Rect::new(popup.right().saturating_sub(4), popup.y, 3, 1);

    let (alt, src) = app
        .page
        .images
        .get(image)
        .map_or(("", ""), |i| (i.alt.as_str(), i.src.as_str()));

    let body = vec![
        Line::default(),
        Line::from(Span::styled(
            alt,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(Span::styled(src, Style::default().fg(Color::DarkGray))),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Image")
        .title_top(Line::from("[×]").right_aligned());

    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(body)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        popup,
    );
    (popup, close)
}

fn draw_splash(f: &mut Frame, app: &PageState, area: Rect) {
    let title = app
        .file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let text = vec![
        Line::default(),
        Line::from(Span::styled(
            title,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from("Loading…"),
    ];

    let popup = centered(area, 50, 30);
    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center),
        popup,
    );
}

/// A rectangle `percent_x` by `percent_y` of `area`, centred in it.
fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let scale = |len: u16, percent: u16| {
        u16::try_from(u32::from(len) * u32::from(percent) / 100).unwrap_or(len)
    };
    let width = scale(area.width, percent_x).max(3);
    let height = scale(area.height, percent_y).max(3);
    Rect::new(
        area.x + area.width.saturating_sub(width) / 2,
        area.y + area.height.saturating_sub(height) / 2,
        width.min(area.width),
        height.min(area.height),
    )
}
