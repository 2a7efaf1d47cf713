//! ShopLens TUI: five-panel sales dashboard over a transaction CSV.
//!
//! Panels:
//! 1. Overview: total orders, total revenue, weekly revenue and order charts
//! 2. Products: best and worst categories by revenue
//! 3. Payments: revenue per payment type
//! 4. Customers: RFM averages and top customers
//! 5. Help: keyboard shortcuts and load diagnostics

mod app;
mod input;
mod persistence;
mod theme;
mod ui;

use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shoplens_core::{AppContext, Config};

use crate::app::AppState;

#[derive(Parser)]
#[command(name = "shoplens-tui", about = "Interactive sales dashboard")]
struct Args {
    /// Config file (TOML). Missing file means defaults.
    #[arg(long, default_value = "shoplens.toml")]
    config: PathBuf,

    /// Transaction CSV, overriding `data_path` from the config.
    #[arg(long)]
    data: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Paths
    let state_dir = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("shoplens");
    let state_path = state_dir.join("state.json");

    init_tracing(&state_dir)?;

    // Load data before touching the terminal so errors print normally.
    let mut config = Config::load_or_default(&args.config)
        .with_context(|| format!("failed to read config {}", args.config.display()))?;
    if let Some(data) = args.data {
        config.data_path = data;
    }
    let ctx = AppContext::load(config).context("failed to load transaction data")?;

    let mut app = AppState::new(ctx, state_path.clone());
    persistence::apply(&mut app, persistence::load(&state_path));

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Save state before exit
    let persisted = persistence::extract(&app);
    if let Err(e) = persistence::save(&app.state_path, &persisted) {
        tracing::warn!(error = %e, "failed to save UI state");
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Log to a file under the state directory; stdout belongs to the UI.
fn init_tracing(state_dir: &std::path::Path) -> Result<()> {
    std::fs::create_dir_all(state_dir)
        .with_context(|| format!("failed to create {}", state_dir.display()))?;
    let log_path = state_dir.join("shoplens-tui.log");
    let file = std::fs::File::create(&log_path)
        .with_context(|| format!("failed to create {}", log_path.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env("SHOPLENS_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        // 3. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}
