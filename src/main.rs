mod app;
mod components;
mod draw;
mod engine;
mod keys;
mod state;
mod ui;

use crate::app::App;
use crate::engine::{BracketLayoutEngine, ResizeOutcome};
use crate::keys::InputOutcome;
use crate::state::app_settings::AppSettings;
use crate::state::messages::{NetworkRequest, NetworkResponse, UiEvent};
use crate::state::network::NetworkWorker;
use crate::state::refresher::PeriodicRefresher;
use crate::state::resize::ResizeDebouncer;
use anyhow::Context;
use courtside_api::client::{self, TournamentApi};
use crossterm::event::{self as crossterm_event, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::{cursor, execute, terminal};
use log::{debug, info};
use std::io::Stdout;
use std::path::PathBuf;
use std::sync::Arc;
use std::{io, panic};
use tokio::sync::{Mutex, mpsc};
use tokio::time::{Duration, Instant};
use tui::{Terminal, backend::CrosstermBackend};

/// Pulse expiry and the "Last updated" clock only need a coarse tick.
const TICK_INTERVAL: Duration = Duration::from_millis(500);

const INPUT_POLL: Duration = Duration::from_millis(100);

enum CliAction {
    Run { tournament_id: Option<String> },
    Exit,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let tournament_id = match handle_cli_args(std::env::args().skip(1).collect())? {
        CliAction::Run { tournament_id } => tournament_id,
        CliAction::Exit => return Ok(()),
    };

    better_panic::install();

    let settings = AppSettings::load();
    let log_level = settings.log_level.unwrap_or(log::LevelFilter::Error);
    tui_logger::init_logger(log_level)?;
    tui_logger::set_default_level(log_level);

    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;

    setup_panic_hook();
    setup_terminal()?;

    let size = terminal::size()?;
    let app = Arc::new(Mutex::new(App::new(settings.clone(), size)));

    let (ui_event_tx, ui_event_rx) = mpsc::channel::<UiEvent>(100);
    let (network_req_tx, network_req_rx) = mpsc::channel::<NetworkRequest>(100);
    let (network_resp_tx, network_resp_rx) = mpsc::channel::<NetworkResponse>(100);

    // Input handler thread
    let input_handler = tokio::spawn(input_handler_task(ui_event_tx.clone()));

    // Network thread
    let client = TournamentApi::new(settings.base_url.clone());
    info!("scores endpoint base: {}", settings.base_url);
    let network_worker = NetworkWorker::new(client, tournament_id, network_req_rx, network_resp_tx);
    let network_task = tokio::spawn(network_worker.run());

    // Periodic score poll
    let periodic_updater = PeriodicRefresher::new(network_req_tx.clone(), settings.poll_interval);
    let periodic_task = tokio::spawn(periodic_updater.run());

    // UI tick thread
    let tick_tx = ui_event_tx.clone();
    let tick_task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(TICK_INTERVAL);
        loop {
            interval.tick().await;
            if tick_tx.send(UiEvent::Tick).await.is_err() {
                break;
            }
        }
    });

    let _ = ui_event_tx.send(UiEvent::AppStarted).await;

    main_ui_loop(terminal, app, ui_event_rx, network_req_tx, network_resp_rx).await;

    input_handler.abort();
    network_task.abort();
    periodic_task.abort();
    tick_task.abort();

    cleanup_terminal()?;
    Ok(())
}

fn handle_cli_args(args: Vec<String>) -> anyhow::Result<CliAction> {
    let mut args = args.into_iter();
    let Some(arg) = args.next() else {
        return Ok(CliAction::Run { tournament_id: None });
    };

    match arg.as_str() {
        "-h" | "--help" => {
            println!("{}", usage_text());
            Ok(CliAction::Exit)
        }
        "-V" | "--version" => {
            println!("courtside {}", env!("CARGO_PKG_VERSION"));
            Ok(CliAction::Exit)
        }
        "--dump-layout" => {
            let (Some(width), Some(path)) = (args.next(), args.next()) else {
                anyhow::bail!("--dump-layout needs <WIDTH_PX> <BRACKET_JSON>\n\n{}", usage_text());
            };
            let width: u32 = width
                .parse()
                .with_context(|| format!("invalid width in pixels: {width}"))?;
            println!("{}", dump_layout(width, &PathBuf::from(path))?);
            Ok(CliAction::Exit)
        }
        id if !id.starts_with('-') => Ok(CliAction::Run { tournament_id: Some(id.to_string()) }),
        _ => {
            eprintln!("Unknown argument: {arg}\n\n{}", usage_text());
            std::process::exit(2);
        }
    }
}

/// Layout model for one viewport width, as pretty JSON.
fn dump_layout(width_px: u32, path: &std::path::Path) -> anyhow::Result<String> {
    let bracket = client::load_bracket(path)?;
    let engine = BracketLayoutEngine::new(&bracket, width_px);
    Ok(serde_json::to_string_pretty(engine.model())?)
}

fn usage_text() -> &'static str {
    "courtside - tournament bracket with live scores

Usage:
  courtside [TOURNAMENT_ID]
  courtside --dump-layout <WIDTH_PX> <BRACKET_JSON>
  courtside --help
  courtside --version

Environment:
  COURTSIDE_BASE_URL      Tournament server origin (default http://127.0.0.1:5000)
  COURTSIDE_BRACKET_JSON  Path to the bracket snapshot JSON
  COURTSIDE_POLL_SECS     Score poll interval in seconds (default 15)
  COURTSIDE_CELL_PX       Assumed pixel width of a terminal column (default 8)
  COURTSIDE_LOG           Log level for the log pane (default error)"
}

async fn main_ui_loop(
    mut terminal: Terminal<CrosstermBackend<Stdout>>,
    app: Arc<Mutex<App>>,
    mut ui_events: mpsc::Receiver<UiEvent>,
    network_requests: mpsc::Sender<NetworkRequest>,
    mut network_responses: mpsc::Receiver<NetworkResponse>,
) {
    let mut debouncer = ResizeDebouncer::default();

    loop {
        let relayout_at = debouncer.deadline().unwrap_or_else(Instant::now);
        let should_redraw = tokio::select! {
            Some(ui_event) = ui_events.recv() => {
                match handle_ui_event(ui_event, &app, &network_requests, &mut debouncer).await {
                    InputOutcome::Quit => break,
                    outcome => outcome == InputOutcome::Redraw,
                }
            }

            Some(response) = network_responses.recv() => {
                handle_network_response(response, &app).await
            }

            _ = tokio::time::sleep_until(relayout_at), if debouncer.is_pending() => {
                if debouncer.fire(Instant::now()) {
                    debug!("relayout after resize");
                    app.lock().await.relayout();
                }
                true
            }

            else => break,
        };

        if should_redraw {
            let mut app_guard = app.lock().await;
            draw::draw(&mut terminal, &mut app_guard);
        }
    }
}

async fn handle_ui_event(
    ui_event: UiEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
    debouncer: &mut ResizeDebouncer,
) -> InputOutcome {
    match ui_event {
        UiEvent::AppStarted => {
            let path = app.lock().await.settings.bracket_path.clone();
            if let Some(path) = path {
                let _ = network_requests.send(NetworkRequest::LoadBracket { path }).await;
            }
            let _ = network_requests.send(NetworkRequest::RefreshScores).await;
            InputOutcome::Redraw
        }
        UiEvent::KeyPressed(key_event) => {
            keys::handle_key_bindings(key_event, app, network_requests).await
        }
        UiEvent::Mouse(mouse_event) => keys::handle_mouse(mouse_event, app).await,
        UiEvent::Resize(columns, rows) => {
            let mut guard = app.lock().await;
            match guard.on_resize(columns, rows) {
                Some(ResizeOutcome::Reinitialized) => debouncer.cancel(),
                Some(ResizeOutcome::RelayoutPending) => debouncer.schedule(Instant::now()),
                None => {}
            }
            InputOutcome::Redraw
        }
        UiEvent::Tick => {
            app.lock().await.on_tick(std::time::Instant::now());
            InputOutcome::Redraw
        }
    }
}

async fn handle_network_response(response: NetworkResponse, app: &Arc<Mutex<App>>) -> bool {
    let mut guard = app.lock().await;
    match response {
        NetworkResponse::BracketLoaded { bracket } => guard.on_bracket_loaded(bracket),
        NetworkResponse::ScoresFetched { records } => {
            let changed =
                guard.on_scores_fetched(records, std::time::Instant::now(), chrono::Utc::now());
            debug!("{changed} matches updated");
        }
    }
    true
}

async fn input_handler_task(ui_events: mpsc::Sender<UiEvent>) {
    loop {
        // Poll with a timeout on the blocking pool so an aborted task never
        // leaves a thread parked in read().
        let polled = tokio::task::spawn_blocking(|| -> io::Result<Option<Event>> {
            if crossterm_event::poll(INPUT_POLL)? {
                crossterm_event::read().map(Some)
            } else {
                Ok(None)
            }
        })
        .await;
        let Ok(Ok(Some(event))) = polled else {
            continue;
        };
        let ui_event = match event {
            Event::Key(key_event) => Some(UiEvent::KeyPressed(key_event)),
            Event::Mouse(mouse_event) => Some(UiEvent::Mouse(mouse_event)),
            Event::Resize(columns, rows) => Some(UiEvent::Resize(columns, rows)),
            _ => None,
        };

        if let Some(ui_event) = ui_event
            && ui_events.send(ui_event).await.is_err()
        {
            break;
        }
    }
}

fn setup_terminal() -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, cursor::Hide)?;
    execute!(stdout, terminal::EnterAlternateScreen)?;
    execute!(stdout, EnableMouseCapture)?;
    execute!(stdout, terminal::Clear(terminal::ClearType::All))?;
    terminal::enable_raw_mode()
}

pub fn cleanup_terminal() -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, cursor::MoveTo(0, 0))?;
    execute!(stdout, terminal::Clear(terminal::ClearType::All))?;
    execute!(stdout, DisableMouseCapture)?;
    execute!(stdout, terminal::LeaveAlternateScreen)?;
    execute!(stdout, cursor::Show)?;
    terminal::disable_raw_mode()
}

fn setup_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        let _ = cleanup_terminal();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));
}
