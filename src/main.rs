//! A terminal profile card over a pointer-reactive neon grid.
//!
//! Move the mouse to drive the background effect.  Click an address (or
//! select it and press Enter) to copy it to the clipboard.

mod app;
mod config;
mod core;
mod ui;

use std::io::{self, stdout, Stdout};
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, widgets::Paragraph, Frame, Terminal};

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    frame::FrameLoop,
    handler,
    state::AppState,
};
use crate::config::AppConfig;
use crate::core::{clipboard::SystemClipboard, profile::Profile, scene::VisualMode};
use crate::ui::{profile_card::ProfileCard, surface::SurfaceView, theme::Theme};

type Tui = Terminal<CrosstermBackend<Stdout>>;

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Profile card with a pointer-reactive background")]
struct Cli {
    /// Background effect (overrides the config file).
    #[arg(long, value_enum)]
    mode: Option<VisualMode>,

    /// Frames per second for the background effect.
    #[arg(long)]
    fps: Option<u32>,

    /// Grid cell size in viewport pixels.
    #[arg(long)]
    cell_size: Option<f64>,

    /// Write the effective configuration to the config file and exit.
    #[arg(long)]
    write_config: bool,
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // the TUI owns stdout
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load();
    if let Some(mode) = cli.mode {
        config.mode = mode;
    }
    if let Some(fps) = cli.fps {
        config.effects.fps = fps.clamp(1, 240);
    }
    if let Some(cell_size) = cli.cell_size {
        config.effects.cell_size = cell_size.clamp(4.0, 400.0);
    }

    if cli.write_config {
        let path = config.save()?;
        println!("{}", path.display());
        return Ok(());
    }

    let mut terminal = setup_terminal()?;
    let result = run(&mut terminal, config).await;
    // Restore even when the loop failed, then report whichever error came first.
    let restored = restore_terminal(&mut terminal);
    result.and(restored)
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen, EnableMouseCapture, EnableFocusChange)?;
    Ok(Terminal::new(CrosstermBackend::new(out))?)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableFocusChange,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    Ok(())
}

// ───────────────────────────────────────── event loop ───────

async fn run(terminal: &mut Tui, config: AppConfig) -> Result<()> {
    let size = terminal.size()?;
    let viewport = Rect::new(0, 0, size.width, size.height);
    let fps = config.effects.fps;
    let mut state = AppState::new(
        Profile::builtin(),
        config,
        Box::new(SystemClipboard::new()),
        viewport,
    );

    let mut events = spawn_event_reader(Duration::from_millis(100));
    let mut frames = FrameLoop::start(fps);
    let mut needs_draw = true;
    let started = Instant::now();

    loop {
        if needs_draw {
            let now = Instant::now();
            terminal.draw(|frame| render(frame, &state, now))?;
            needs_draw = false;
        }

        // The earliest pending reset, if any.  The sleep is only polled
        // while a deadline exists.
        let deadline = state.next_deadline();
        let reset_at = tokio::time::Instant::from_std(deadline.unwrap_or_else(Instant::now));

        tokio::select! {
            Some(event) = events.recv() => {
                let now = Instant::now();
                match event {
                    AppEvent::Key(k) => {
                        handler::handle_key(&mut state, k, now);
                        needs_draw = true;
                    }
                    AppEvent::Mouse(m) => {
                        // Plain movement is picked up by the next frame.
                        handler::handle_mouse(&mut state, m, now);
                        needs_draw |= !matches!(m.kind, crossterm::event::MouseEventKind::Moved);
                    }
                    AppEvent::Resize(w, h) => {
                        handler::handle_resize(&mut state, w, h);
                        needs_draw = true;
                    }
                    AppEvent::FocusLost => handler::handle_focus_lost(&mut state),
                    AppEvent::FocusGained => {}
                }
            }

            _ = tokio::time::sleep_until(reset_at), if deadline.is_some() => {
                if state.expire(Instant::now()) {
                    needs_draw = true;
                }
            }

            Some(at) = frames.next() => {
                state.effects.frame(&state.pointer, at.saturating_duration_since(started));
                needs_draw = true;
            }

            else => break,
        }

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    frames.cancel();
    if state.effects.is_mounted() {
        state.effects.teardown();
    }
    Ok(())
}

fn render(frame: &mut Frame, state: &AppState, now: Instant) {
    let layout = state.layout();

    if let Some(surface) = state.effects.surface() {
        frame.render_widget(SurfaceView { surface }, layout.background_area);
    }

    frame.render_widget(
        ProfileCard {
            profile: &state.profile,
            layout: &layout,
            hovered_section: state.hovered_section,
            selected_wallet: state.selected_wallet,
            confirmed_wallet: state.confirmed_wallet(now),
        },
        frame.area(),
    );

    let hint = state.config.status_bar_hint();
    let status_text = format!(
        " [{}] {}",
        state.effects.mode().label(),
        state.status_message.as_deref().unwrap_or(&hint)
    );
    let status = Paragraph::new(status_text).style(Theme::status_bar_style());
    frame.render_widget(status, layout.status_area);
}
