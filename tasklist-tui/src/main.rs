use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    io,
    time::{Duration, Instant},
};
use tokio::sync::mpsc;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

mod app;
mod messages;
mod network;
mod settings;
mod ui;

use app::App;
use network::{ApiClient, ApiEvent, ApiRequest};
use settings::ClientSettings;
use ui::ui;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = match ClientSettings::new() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("tasklist-tui: {e}");
            std::process::exit(2);
        }
    };

    let _log_guard = init_logging(&settings)?;
    info!(server_url = %settings.server_url, "Starting client");

    let client = ApiClient::new(settings.server_url.clone());

    // setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (tx, mut rx) = mpsc::channel(100);
    spawn_request(&client, &tx, ApiRequest::Load);

    let res = run_app(&mut terminal, App::new(), &mut rx, &client, &tx).await;

    // restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("{err:?}");
    }

    Ok(())
}

fn init_logging(settings: &ClientSettings) -> anyhow::Result<WorkerGuard> {
    let appender = tracing_appender::rolling::never(&settings.log_dir, "tasklist-tui.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to init logging: {e}"))?;

    Ok(guard)
}

/// Fire-and-forget: the result arrives later as an `ApiEvent`.
fn spawn_request(client: &ApiClient, tx: &mpsc::Sender<ApiEvent>, request: ApiRequest) {
    let client = client.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let event = client.dispatch(request).await;
        let _ = tx.send(event).await;
    });
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    rx: &mut mpsc::Receiver<ApiEvent>,
    client: &ApiClient,
    tx: &mpsc::Sender<ApiEvent>,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, &mut app))?;

        // Manual event loop with timeout to allow checking the response channel
        if event::poll(Duration::from_millis(16))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                let request = app.handle_key(key.code);
                if app.should_quit {
                    return Ok(());
                }

                if let Some(request) = request {
                    spawn_request(client, tx, request);
                }
            }
        }

        // Process server responses
        while let Ok(api_event) = rx.try_recv() {
            app.apply(api_event);
        }

        app.expire_notification(Instant::now());
    }
}
