//! Browse a catalog in the terminal.
//!
//! Run with a JSON file or an `http(s)://` endpoint as the only argument.
//! Run with `--write-config` to write the default config file and exit.

use std::fs::File;
use std::io::{self, stderr, Stderr};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use tokio::sync::oneshot;
use tracing_subscriber::EnvFilter;

use catalog_nav::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::AppState,
};
use catalog_nav::config::AppConfig;
use catalog_nav::core::{
    catalog::{Catalog, Id},
    provider::{CatalogSource, FetchError},
};
use catalog_nav::ui;

/// Category hint meaning "no particular category".
const ALL_CATEGORIES: &str = "All";

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Terminal catalog browser")]
struct Cli {
    /// Catalog JSON file, or an http(s) endpoint answering a POST.
    #[arg(required_unless_present = "write_config")]
    source: Option<String>,

    /// Category id to open at.  `All` opens at the top.
    #[arg(long)]
    category: Option<String>,

    /// Rows left above a section heading after jumping to it.
    #[arg(long)]
    header_offset: Option<i32>,

    /// Write logs to this file (level from `RUST_LOG`, default `debug`).
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Write the default config file and exit.
    #[arg(long)]
    write_config: bool,
}

type Tui = Terminal<CrosstermBackend<Stderr>>;

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_ref())?;

    if cli.write_config {
        let path = AppConfig::default().save()?;
        println!("wrote {}", path.display());
        return Ok(());
    }
    let Some(source) = cli.source.as_deref().map(CatalogSource::parse) else {
        return Ok(());
    };

    let mut config = AppConfig::load();
    if let Some(rows) = cli.header_offset {
        config.header_offset = rows.clamp(0, 10);
    }
    let hint = cli
        .category
        .filter(|c| c != ALL_CATEGORIES)
        .map(Id::new);
    let frame = Duration::from_millis(config.frame_ms);
    let mut state = AppState::new(source.label(), config, hint);

    // ── fetch in the background ───────────────────────────────
    let (fetch_tx, fetch_rx) = oneshot::channel();
    tokio::spawn(async move {
        tracing::info!(source = %source.label(), "fetching catalog");
        let _ = fetch_tx.send(source.fetch().await);
    });

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut state, fetch_rx, frame).await;

    // ── teardown ──────────────────────────────────────────────
    state.unmount();
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run(
    terminal: &mut Tui,
    state: &mut AppState,
    mut fetch_rx: oneshot::Receiver<Result<Catalog, FetchError>>,
    frame: Duration,
) -> Result<()> {
    let mut events = spawn_event_reader(frame);

    loop {
        let size = terminal.size()?;
        state.terminal_area = Rect::new(0, 0, size.width, size.height);
        state.on_frame(Instant::now());
        terminal.draw(|f| ui::draw(f, state))?;

        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                match event {
                    AppEvent::Key(k) => handler::handle_key(state, k),
                    AppEvent::Mouse(m) => handler::handle_mouse(state, m),
                    AppEvent::Resize(_, _) | AppEvent::Tick => {}
                }
            }

            fetched = &mut fetch_rx, if state.load.is_loading() => {
                let result = fetched.context("catalog fetch task ended without a result")?;
                state.finish_load(result, Instant::now());
            }

            else => break,
        }

        if state.should_quit {
            break;
        }
    }

    Ok(())
}

/// Logs go to `--log-file` when given, else to stderr only when `RUST_LOG`
/// is set.  The TUI draws on stderr too, so stderr logging is a debugging aid.
fn init_tracing(log_file: Option<&PathBuf>) -> Result<()> {
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create log file {}", path.display()))?;
            let filter =
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None if std::env::var_os(EnvFilter::DEFAULT_ENV).is_some() => {
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::from_default_env())
                .with_writer(io::stderr) // never pollute stdout
                .init();
        }
        None => {}
    }
    Ok(())
}
