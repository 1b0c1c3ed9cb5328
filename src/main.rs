//! A minimal terminal file browser built around an incremental
//! status-line engine.
//!
//! The listing pane is deliberately simple; the interesting machinery is
//! in [`statusbar`], which recomposes the bottom line only when the
//! observed inputs actually change.

mod app;
mod config;
mod core;
mod statusbar;
mod ui;

use std::io::{self, stderr};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    widgets::{Block, Borders},
    Terminal,
};

use crate::app::{
    du_runtime::{self, DuUpdate},
    event::{spawn_event_reader, AppEvent},
    handler,
    state::AppState,
};
use crate::statusbar::StatusContext;
use crate::ui::{listing::Listing, statusline::StatusLine, theme::Theme};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Directory browser with an incremental status line")]
struct Cli {
    /// Directory to open (defaults to `.`).
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Show hidden (dot) files.
    #[arg(long)]
    hidden: bool,
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only in debug builds / when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();
    let mut user_config = config::AppConfig::load();
    if cli.hidden {
        user_config.show_hidden = true;
    }

    let root = cli.path.canonicalize()?;
    let mut state = AppState::new(root, user_config);

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    // ── async channels ────────────────────────────────────────
    let mut events = spawn_event_reader(Duration::from_millis(100));
    let (du_tx, mut du_rx) = tokio::sync::mpsc::unbounded_channel::<DuUpdate>();

    // ── event loop ────────────────────────────────────────────
    loop {
        // Draw first so the UI stays responsive; disk usage fills in
        // asynchronously and shows up on a later frame.
        terminal.draw(|frame| {
            // Listing pane takes everything above a one-row status line.
            let [listing_area, status_area] =
                Layout::vertical([Constraint::Min(3), Constraint::Length(1)])
                    .areas(frame.area());

            let block = Block::default()
                .title(format!(" {} ", state.column.path.display()))
                .title_style(Theme::title_style())
                .borders(Borders::ALL)
                .border_style(Theme::border_style());
            let inner_height = block.inner(listing_area).height as usize;

            let AppState {
                column,
                status,
                settings,
                euid,
                ..
            } = &mut state;

            column.clamp_scroll(inner_height);
            frame.render_widget(Listing::new(column).block(block), listing_area);

            let ctx = StatusContext {
                file: column.pointed_entry(),
                column: Some(column),
                height: inner_height,
                display_size: settings.display_size_in_status_bar(),
                euid: *euid,
                width: status_area.width as usize,
                now: Instant::now(),
            };
            let fragments = status.draw(&ctx);
            frame.render_widget(StatusLine::new(fragments), status_area);
        })?;

        // ── kick off the disk-usage walk AFTER draw ──────────────
        if state.needs_du_recompute {
            state.needs_du_recompute = false;
            state.du_generation = state.du_generation.wrapping_add(1);
            du_runtime::spawn_disk_usage(
                state.column.path.clone(),
                state.du_generation,
                du_tx.clone(),
            );
        }

        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                match event {
                    AppEvent::Key(k) => handler::handle_key(&mut state, k),
                    AppEvent::Resize(_, _) => {}
                    AppEvent::Tick => {}
                }
            }

            Some(update) = du_rx.recv() => {
                apply_du_update(&mut state, update);
                // Drain anything else queued without blocking.
                while let Ok(update) = du_rx.try_recv() {
                    apply_du_update(&mut state, update);
                }
            }
        }

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    let sub = state.status_sub;
    state.settings.unsubscribe(sub);
    state.config.display_size_in_status_bar = state.settings.display_size_in_status_bar();
    state.config.show_hidden = state.show_hidden;
    if let Err(err) = state.config.save() {
        tracing::warn!(%err, "config save failed");
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}

/// Accept a finished walk only when it matches the current generation —
/// anything older belongs to a directory the user already left.
fn apply_du_update(state: &mut AppState, update: DuUpdate) {
    if update.generation == state.du_generation {
        state.column.disk_usage = Some(update.bytes);
    }
}
