//! IMEC Hub - Terminal browser for the IMEC Intelligence Hub search API.
//!
//! Main entry point and event loop for the application.

mod app;
mod config;
mod error;
mod hub;
mod i18n;
mod logging;
mod opener;
mod render;
mod ui;

use app::{App, SearchOutcome, SearchState, SearchTicket, UiMode};
use clap::Parser;
use config::{Config, ViewMode};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
        MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use error::SearchError;
use hub::{HubClient, SearchResultItem};
use i18n::Language;
use opener::open_link;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    text::Line,
    widgets::Paragraph,
};
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Command line arguments.
#[derive(Debug, Parser)]
#[command(
    name = "imec-hub",
    version,
    about = "Browse IMEC Intelligence Hub budgets, news and legal instruments"
)]
struct Cli {
    /// Config file (default: $XDG_CONFIG_HOME/imec-hub/config.jsonc)
    #[arg(long)]
    config: Option<PathBuf>,

    /// API base URL, overrides IMEC_API_BASE and the config file
    #[arg(long)]
    api_base: Option<String>,

    /// Interface language: fr, en or ar
    #[arg(long)]
    lang: Option<String>,

    /// Result layout
    #[arg(long, value_enum)]
    view: Option<ViewMode>,

    /// Search for this keyword immediately
    #[arg(short, long)]
    query: Option<String>,

    /// Fetch the unfiltered result set at startup
    #[arg(long)]
    load_on_start: bool,

    /// Print results to stdout instead of starting the interface
    #[arg(long)]
    print: bool,

    /// Write the effective configuration to the config file and exit
    #[arg(long)]
    write_config: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Main application entry point.
///
/// # Details
/// Resolves configuration, initializes logging, then either prints one search
/// result set or runs the interactive event loop.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_env_overrides();
    config.override_api_base(cli.api_base.clone());
    if let Some(lang) = &cli.lang {
        config.lang = Language::from_code(lang);
    }
    if let Some(view) = cli.view {
        config.view = view;
    }
    if cli.load_on_start {
        config.load_on_start = true;
    }

    if cli.write_config {
        let path = match cli.config.clone() {
            Some(path) => path,
            None => Config::default_config_path()?,
        };
        config.save(Some(&path))?;
        println!("Configuration written to {}", path.display());
        return Ok(());
    }

    let log_filter = if cli.verbose { "debug" } else { config.log_level.as_str() };
    let log_path = logging::init(log_filter)?;
    tracing::info!(api_base = %config.api_base, lang = %config.lang, "starting");

    let client = HubClient::new(&config)?;
    let mut app = App::new(config.lang.clone(), config.view);
    app.load_on_start = config.load_on_start;

    if cli.print {
        return run_print(&mut app, &client, cli.query.as_deref()).await;
    }

    let (tx, rx) = mpsc::unbounded_channel();

    if let Some(query) = &cli.query {
        app.input = query.clone();
        if let Some(ticket) = app.submit_search() {
            dispatch(&client, ticket, &tx);
        }
    } else if config.load_on_start {
        let ticket = app.begin_initial_load();
        dispatch(&client, ticket, &tx);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run event loop
    let result = run_app(&mut terminal, &mut app, &client, tx, rx).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "event loop failed");
        eprintln!("See log: {}", log_path.display());
    }
    result
}

/// Run one search and print the rendered view.
///
/// # Arguments
/// * `app` - Application state
/// * `client` - Hub client
/// * `query` - Keyword, or None for the unfiltered result set
///
/// # Returns
/// * `Result<()>` - Error when the request failed
async fn run_print(app: &mut App, client: &HubClient, query: Option<&str>) -> anyhow::Result<()> {
    let ticket = match query {
        Some(q) => {
            app.input = q.to_string();
            app.submit_search()
        }
        None => Some(app.begin_initial_load()),
    };

    if let Some(ticket) = ticket {
        let result = execute_search(client, &ticket).await;
        app.apply_outcome(SearchOutcome {
            seq: ticket.seq,
            result,
        });
    }

    match app.results_message() {
        Some(message) => println!("{}", message),
        None => match app.view {
            ViewMode::Categorized => print!("{}", app.categorized_view()),
            ViewMode::List => print!("{}", app.list_view()),
        },
    }

    match &app.state {
        SearchState::Error(message) => Err(anyhow::anyhow!("Search request failed: {}", message)),
        _ => Ok(()),
    }
}

/// Execute a ticket against the hub.
async fn execute_search(
    client: &HubClient,
    ticket: &SearchTicket,
) -> Result<Vec<SearchResultItem>, SearchError> {
    match &ticket.query {
        Some(query) => client.search(query).await,
        None => client.fetch_initial().await,
    }
}

/// Run a ticket in the background and report its outcome on `tx`.
///
/// # Details
/// Earlier requests are not cancelled; `App::apply_outcome` drops their
/// results once a newer ticket exists.
fn dispatch(client: &HubClient, ticket: SearchTicket, tx: &UnboundedSender<SearchOutcome>) {
    let client = client.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = execute_search(&client, &ticket).await;
        if tx
            .send(SearchOutcome {
                seq: ticket.seq,
                result,
            })
            .is_err()
        {
            tracing::debug!(seq = ticket.seq, "event loop gone, dropping search outcome");
        }
    });
}

/// Render the complete UI.
///
/// # Arguments
/// * `f` - Frame to render to
/// * `app` - Application state
///
/// # Details
/// Lays out header, search bar, counters (categorized view), results and status.
fn render_ui(f: &mut ratatui::Frame, app: &App) {
    let show_counters = app.view == ViewMode::Categorized
        && matches!(app.state, SearchState::Rendered | SearchState::Empty);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                                   // Header
            Constraint::Length(3),                                   // Search bar
            Constraint::Length(if show_counters { 3 } else { 0 }),   // Counters
            Constraint::Min(0),                                      // Results
            Constraint::Length(1),                                   // Status bar
        ])
        .split(f.area());

    ui::render_tabs(app, chunks[0], f.buffer_mut());
    ui::render_search(app, chunks[1], f.buffer_mut());

    if show_counters {
        ui::render_counters(app, chunks[2], f.buffer_mut());
    }

    match app.results_message() {
        Some(message) => ui::render_message(
            &message,
            i18n::t(&app.lang, "title"),
            app.lang.direction(),
            chunks[3],
            f.buffer_mut(),
        ),
        None => match app.view {
            ViewMode::Categorized => ui::render_sections(app, chunks[3], f.buffer_mut()),
            ViewMode::List => ui::render_list(app, chunks[3], f.buffer_mut()),
        },
    }

    let status_text = app
        .status_message
        .as_deref()
        .unwrap_or_else(|| i18n::t(&app.lang, "help"));
    f.render_widget(Paragraph::new(Line::from(status_text)), chunks[4]);
}

/// Main event loop.
///
/// # Arguments
/// * `terminal` - Terminal instance
/// * `app` - Application state
/// * `client` - Hub client used for new searches
/// * `tx` - Sender handed to search tasks
/// * `rx` - Receiver of completed searches
///
/// # Details
/// Applies finished searches, handles keyboard and mouse events, and renders UI.
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    client: &HubClient,
    tx: UnboundedSender<SearchOutcome>,
    mut rx: UnboundedReceiver<SearchOutcome>,
) -> anyhow::Result<()> {
    loop {
        while let Ok(outcome) = rx.try_recv() {
            app.apply_outcome(outcome);
        }

        terminal.draw(|f| render_ui(f, app))?;

        // Non-blocking poll keeps search results flowing in while idle
        if !event::poll(Duration::from_millis(100))? {
            continue;
        }

        match event::read()? {
            Event::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    break;
                }

                match app.mode {
                    UiMode::Browse => match key.code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => break,
                        KeyCode::Up | KeyCode::Char('k') => app.move_up(),
                        KeyCode::Down | KeyCode::Char('j') => app.move_down(),
                        KeyCode::Tab => app.focus_next_section(),
                        KeyCode::Char('/') => app.mode = UiMode::Input,
                        KeyCode::Char('v') => app.toggle_view(),
                        KeyCode::Char('l') => app.cycle_language(),
                        KeyCode::Char('r') => {
                            if let Some(ticket) = app.reload() {
                                dispatch(client, ticket, &tx);
                            }
                        }
                        KeyCode::Enter => {
                            if let Some(url) = app.selected_link() {
                                let status = match open_link(&url) {
                                    Ok(()) => {
                                        let label = i18n::t(&app.lang, "status.opened");
                                        format!("{} {}", label, url)
                                    }
                                    Err(e) => {
                                        let label = i18n::t(&app.lang, "status.open_failed");
                                        format!("{} {}", label, e)
                                    }
                                };
                                app.set_status(status);
                            }
                        }
                        _ => {}
                    },
                    UiMode::Input => match key.code {
                        KeyCode::Enter => {
                            if let Some(ticket) = app.submit_search() {
                                dispatch(client, ticket, &tx);
                            }
                        }
                        KeyCode::Esc => app.mode = UiMode::Browse,
                        KeyCode::Backspace => app.remove_input_char(),
                        KeyCode::Char(c) => app.add_input_char(c),
                        _ => {}
                    },
                }
            }
            Event::Mouse(mouse) => handle_mouse_event(mouse, app),
            _ => {}
        }
    }

    Ok(())
}

/// Handle mouse scrolling over the results.
fn handle_mouse_event(mouse: MouseEvent, app: &mut App) {
    if app.mode != UiMode::Browse {
        return;
    }
    match mouse.kind {
        MouseEventKind::ScrollUp => app.move_up(),
        MouseEventKind::ScrollDown => app.move_down(),
        _ => {}
    }
}
