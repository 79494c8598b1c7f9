//! scrollnav: present a markdown document as a single scrolling page.
#![allow(clippy::multiple_crate_versions)]

use anyhow::Context;
use clap::Parser;
use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use scrollnav::{config, formats, input, page_state, ui};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "scrollnav")]
#[command(about = "Single scrolling page presenter with section navigation", long_about = None)]
struct Args {
    /// Markdown document to present
    #[arg(value_name = "PATH")]
    path: PathBuf,

    /// Quiet period in milliseconds before the current section follows the scroll position
    #[arg(long, value_name = "MS")]
    settle_ms: Option<u64>,

    /// Duration in milliseconds of the smooth scroll when jumping to a section
    #[arg(long, value_name = "MS")]
    scroll_ms: Option<u64>,

    /// Skip the loading splash
    #[arg(long)]
    no_splash: bool,

    /// Ignore scroll tracking until a section jump has finished animating
    #[arg(long)]
    hold_programmatic: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut cfg = config::Config::load();

    // Override config with command line args
    if let Some(ms) = args.settle_ms {
        cfg.settle_delay_ms = ms;
    }
    if let Some(ms) = args.scroll_ms {
        cfg.scroll_duration_ms = ms;
    }
    if args.no_splash {
        cfg.splash_ms = 0;
    }
    if args.hold_programmatic {
        cfg.hold_during_programmatic_scroll = true;
    }

    init_logging(&cfg)?;

    let page = input::load_page(&args.path, &formats::markdown::MarkdownFormat)
        .with_context(|| format!("cannot present {}", args.path.display()))?;

    run_tui(args.path, page, &cfg)
}

fn init_logging(cfg: &config::Config) -> anyhow::Result<()> {
    if cfg.log_file.is_empty() {
        return Ok(());
    }
    let file = File::create(&cfg.log_file)
        .with_context(|| format!("cannot open log file {}", cfg.log_file))?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .init();
    Ok(())
}

fn run_tui(
    path: PathBuf,
    page: scrollnav::section::Page,
    cfg: &config::Config,
) -> anyhow::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    let regions = ui::regions(Rect::new(0, 0, size.width, size.height));
    let mut app = page_state::PageState::new(
        path,
        page,
        cfg,
        usize::from(regions.page.width),
        usize::from(regions.page.height),
        Instant::now(),
    );

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        tracing::error!("event loop failed: {e}");
        eprintln!("Error: {e}");
    } else {
        let json = serde_json::to_string_pretty(&app.snapshot())?;
        println!("{json}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut page_state::PageState,
) -> io::Result<()> {
    loop {
        let now = Instant::now();
        app.tick(now);
        terminal.draw(|f| ui::draw(f, app))?;

        if !event::poll(app.next_wakeup(Instant::now()))? {
            continue;
        }

        let now = Instant::now();
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if handle_key(app, key, now) {
                    return Ok(());
                }
            }
            Event::Mouse(mouse) => handle_mouse(app, mouse, now),
            Event::Resize(width, height) => {
                let regions = ui::regions(Rect::new(0, 0, width, height));
                app.resize(
                    usize::from(regions.page.width),
                    usize::from(regions.page.height),
                    now,
                );
            }
            _ => {}
        }
    }
}

/// Returns true when the user asked to quit.
fn handle_key(app: &mut page_state::PageState, key: KeyEvent, now: Instant) -> bool {
    app.message = None;

    if app.lightbox.is_open() {
        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Esc => app.lightbox.close(),
            _ => {}
        }
        return false;
    }

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
        KeyCode::Up | KeyCode::Char('k') => app.scroll_by(-1.0, now),
        KeyCode::Down | KeyCode::Char('j') => app.scroll_by(1.0, now),
        KeyCode::PageUp => app.page_up(now),
        KeyCode::PageDown | KeyCode::Char(' ') => app.page_down(now),
        KeyCode::Home => app.scroll_to_top(now),
        KeyCode::End => app.scroll_to_bottom(now),
        KeyCode::Tab | KeyCode::Char('n') => app.next_section(now),
        KeyCode::BackTab | KeyCode::Char('p') => app.prev_section(now),
        KeyCode::Char('i') => app.open_first_visible_image(),
        KeyCode::Char(c @ '1'..='9') => {
            // Digits map onto sections 0..=8
            let index = c.to_digit(10).map_or(0, |d| d as usize - 1);
            app.jump_to_section(index, now);
        }
        _ => {}
    }
    false
}

fn handle_mouse(app: &mut page_state::PageState, mouse: MouseEvent, now: Instant) {
    if app.lightbox.is_open() {
        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
            app.click(mouse.column, mouse.row, now);
        }
        return;
    }

    match mouse.kind {
        MouseEventKind::ScrollDown => app.scroll_by(page_state::WHEEL_ROWS, now),
        MouseEventKind::ScrollUp => app.scroll_by(-page_state::WHEEL_ROWS, now),
        MouseEventKind::Down(MouseButton::Left) => app.click(mouse.column, mouse.row, now),
        _ => {}
    }
}
