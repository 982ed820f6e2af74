//! CMS-Admin: terminal admin panel for the Folio CMS
//!
//! Reorders projects, intro banners, services or about-page slides with
//! optimistic updates and rollback.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use cms_01_ordering::MutatorConfig;
use cms_02_content::{ContentDependencies, ContentService, SystemClock};
use cms_03_backend::BackendClient;
use cms_admin::demo::{self, DEMO_LATENCY};
use cms_admin::{ui, App, Command, Key, Panel, TableKind};
use cms_telemetry::{init_logging, TelemetryConfig};
use shared_types::Notification;

/// Log file used when neither `--log-file` nor `CMS_LOG_FILE` is given.
const DEFAULT_LOG_FILE: &str = "cms-admin.log";

/// CMS-Admin: reorder portfolio content from the terminal
#[derive(Parser, Debug)]
#[command(name = "cms-admin")]
#[command(about = "TUI admin panel for reordering Folio CMS content")]
struct Args {
    /// Table to reorder
    #[arg(short, long, value_enum, default_value_t = TableKind::Projects)]
    table: TableKind,

    /// Run against a seeded in-memory backend (no network required)
    #[arg(long)]
    demo: bool,

    /// Sign in with this email before loading
    #[arg(long, requires = "password")]
    email: Option<String>,

    /// Password for --email
    #[arg(long, requires = "email")]
    password: Option<String>,

    /// Write logs to this file instead of CMS_LOG_FILE
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Logs must not draw over the terminal UI.
    let mut telemetry = TelemetryConfig::for_tool("cms-admin");
    if let Some(path) = &args.log_file {
        telemetry = telemetry.with_log_file(path);
    } else if telemetry.log_file.is_none() {
        telemetry = telemetry.with_log_file(DEFAULT_LOG_FILE);
    }
    init_logging(&telemetry).context("failed to initialize logging")?;

    let (deps, user) = if args.demo {
        (demo::dependencies(DEMO_LATENCY)?, Some("demo".to_string()))
    } else {
        connect(&args).await?
    };

    let content = ContentService::new(deps);
    let panel = Panel::open(&content, args.table, MutatorConfig::default());
    info!(table = args.table.table_name(), demo = args.demo, "Admin panel starting");

    let app = Arc::new(Mutex::new(App::new(args.table)));
    app.lock().await.user = user;
    refresh(&panel, &app).await;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let result = run_app(&mut terminal, app, panel).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result.context("terminal error")
}

/// Build backend adapters from the environment and optionally sign in.
async fn connect(args: &Args) -> anyhow::Result<(ContentDependencies, Option<String>)> {
    let backend = BackendClient::from_env().context("backend configuration")?;

    let user = match (&args.email, &args.password) {
        (Some(email), Some(password)) => {
            let user = backend
                .auth()
                .sign_in(email, password)
                .await
                .context("sign-in failed")?;
            Some(user.email.unwrap_or(user.id))
        }
        _ => None,
    };

    let deps = ContentDependencies {
        tables: Arc::new(backend.tables()),
        uploads: Arc::new(backend.uploads()),
        images: Arc::new(backend.images()),
        clock: Arc::new(SystemClock),
    };
    Ok((deps, user))
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: Arc<Mutex<App>>,
    panel: Panel,
) -> io::Result<()> {
    loop {
        // Draw UI
        {
            let mut app_guard = app.lock().await;
            panel.sync(&mut app_guard);
            terminal.draw(|frame| {
                ui::render(frame, &app_guard);
            })?;
        }

        // Handle input with timeout so in-flight saves keep redrawing
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind == KeyEventKind::Press {
                    let command = match map_key(key.code) {
                        Some(key) => app.lock().await.handle_key(key),
                        None => None,
                    };
                    if let Some(command) = command {
                        dispatch(command, &panel, &app);
                    }
                }
            }
        }

        // Check if we should quit
        if app.lock().await.should_quit() {
            return Ok(());
        }
    }
}

fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Esc => Some(Key::Esc),
        _ => None,
    }
}

/// Run a command in its own task so the UI keeps drawing while it waits.
fn dispatch(command: Command, panel: &Panel, app: &Arc<Mutex<App>>) {
    let panel = panel.clone();
    let app = app.clone();

    match command {
        Command::Refresh => {
            tokio::spawn(async move {
                refresh(&panel, &app).await;
            });
        }
        Command::CommitOrder { id, order } => {
            tokio::spawn(async move {
                let result = panel.commit(&id, order).await;
                let mut app = app.lock().await;
                match result {
                    Ok(outcome) => {
                        panel.sync(&mut app);
                        app.record_outcome(&id, &outcome);
                    }
                    Err(err) => {
                        warn!(id = %id, order, error = %err, "Order edit refused");
                        app.notify(Notification::error(err.to_string()));
                    }
                }
            });
        }
    }
}

/// Fetch data from the backend and update app state.
async fn refresh(panel: &Panel, app: &Mutex<App>) {
    let result = panel.refresh().await;

    let mut app = app.lock().await;
    match result {
        Ok(state) => {
            app.error_message = None;
            app.last_refresh = Some(chrono::Utc::now());
            info!(table = panel.table().table_name(), state = ?state, "Table loaded");
        }
        Err(err) => {
            error!(table = panel.table().table_name(), error = %err, "Table load failed");
            app.error_message = Some(err.to_string());
        }
    }
    panel.sync(&mut app);
}
