use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use ratatui::Terminal;
use ratatui::crossterm::event;
use ratatui::crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::CrosstermBackend;
use tokio::sync::mpsc;

mod action;
mod app;
mod config_file;
mod input;
mod model;
mod theme;
mod tui_event;
mod view;

use deckdraft_core::service::{MockSlideService, SlideService};
use deckdraft_core::{DetailLevel, HttpSlideService};

use app::{App, Phase};
use model::config::ConfigState;
use tui_event::{BackendCommand, BackendEvent};

/// deckdraft: upload a PDF, edit the extracted slides, pick a theme, and
/// generate a presentation through the companion service.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// PDF to upload on startup
    pdf: Option<PathBuf>,

    /// Base URL of the extraction/generation service
    #[arg(long)]
    server: Option<String>,

    /// Extraction detail level, 0 (very concise) to 4 (very detailed)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=4))]
    detail_level: Option<u8>,

    /// Directory the generated presentation is saved into
    #[arg(long)]
    download_dir: Option<PathBuf>,

    /// Color theme: hacker (default) or modern
    #[arg(long)]
    theme: Option<String>,

    /// Run against the built-in mock service (no backend needed)
    #[arg(long)]
    mock: bool,
}

/// Route tracing to a log file; a TUI cannot log to stdout.
fn init_tracing() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let dir = dirs::data_local_dir()?.join("deckdraft");
    std::fs::create_dir_all(&dir).ok()?;
    let appender = tracing_appender::rolling::never(dir, "deckdraft.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Some(guard)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    let _log_guard = init_tracing();

    if let Some(ref pdf) = args.pdf
        && !pdf.exists()
    {
        anyhow::bail!("PDF file not found: {}", pdf.display());
    }

    // Resolve config from CLI flags > env vars > config file > defaults
    let mut config = ConfigState::default();
    config_file::apply_to_config_state(&config_file::load_config(), &mut config);
    if let Some(url) = args
        .server
        .or_else(|| std::env::var("DECKDRAFT_SERVER").ok())
    {
        config.server_url = url;
    }
    if let Some(dir) = args.download_dir {
        config.download_dir = dir;
    }
    if let Some(value) = args.detail_level
        && let Some(level) = DetailLevel::from_value(value)
    {
        config.detail_level = level;
    }
    if let Some(name) = args.theme {
        config.theme_name = name;
    }

    let ui = match config.theme_name.as_str() {
        "modern" => theme::Theme::modern(),
        _ => theme::Theme::hacker(),
    };

    let service: Arc<dyn SlideService> = if args.mock {
        tracing::info!("running against the built-in mock service");
        Arc::new(MockSlideService::sample())
    } else {
        Arc::new(HttpSlideService::new(config.server_url.clone()))
    };
    let download_dir = config.download_dir.clone();

    let catalog = deckdraft_core::theme::load_catalog();

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    // Install panic hook that restores terminal before printing panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));

    let backend_terminal = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend_terminal)?;

    // Drain any stray input events (e.g. Enter keypress from launching the command)
    while event::poll(Duration::from_millis(50)).unwrap_or(false) {
        let _ = event::read();
    }

    let mut app = App::new(catalog, config, ui);

    // Backend command/event channels
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let (cmd_tx, mut cmd_rx) = mpsc::unbounded_channel::<BackendCommand>();
    app.backend_cmd_tx = Some(cmd_tx);

    // Spawn backend command listener. Each command runs in its own task so
    // the listener stays responsive; the app's phase machine ensures at most
    // one extraction and one generation are in flight.
    let backend_event_tx = event_tx.clone();
    tokio::spawn(async move {
        while let Some(cmd) = cmd_rx.recv().await {
            match cmd {
                BackendCommand::Extract { path, detail } => {
                    let service = service.clone();
                    let tx = backend_event_tx.clone();
                    tokio::spawn(async move {
                        let (progress_tx, mut progress_rx) = mpsc::unbounded_channel();
                        let fwd_tx = tx.clone();
                        let forwarder = tokio::spawn(async move {
                            while let Some(value) = progress_rx.recv().await {
                                let _ = fwd_tx.send(BackendEvent::ExtractProgress(value));
                            }
                        });

                        let result = service.extract(&path, detail, progress_tx).await;
                        // The gateway settled, so the progress channel is
                        // closed; drain it fully before reporting the result.
                        let _ = forwarder.await;
                        match result {
                            Ok(slides) => {
                                let _ = tx.send(BackendEvent::ExtractFinished { slides });
                            }
                            Err(err) => {
                                tracing::warn!(error = %err, "extraction failed");
                                let _ = tx.send(BackendEvent::ExtractFailed {
                                    error: err.to_string(),
                                });
                            }
                        }
                    });
                }
                BackendCommand::Generate { slides, theme } => {
                    let service = service.clone();
                    let tx = backend_event_tx.clone();
                    let dest_dir = download_dir.clone();
                    tokio::spawn(async move {
                        let (progress_tx, mut progress_rx) = mpsc::unbounded_channel();
                        let fwd_tx = tx.clone();
                        let forwarder = tokio::spawn(async move {
                            while let Some(value) = progress_rx.recv().await {
                                let _ = fwd_tx.send(BackendEvent::GenerateProgress(value));
                            }
                        });

                        let result = service
                            .generate(&slides, &theme, &dest_dir, progress_tx)
                            .await;
                        let _ = forwarder.await;
                        match result {
                            Ok(path) => {
                                let _ = tx.send(BackendEvent::GenerateFinished { path });
                            }
                            Err(err) => {
                                tracing::warn!(error = %err, "generation failed");
                                let _ = tx.send(BackendEvent::GenerateFailed {
                                    error: err.to_string(),
                                });
                            }
                        }
                    });
                }
            }
        }
    });

    // A PDF on the command line skips the picker and uploads immediately.
    if let Some(pdf) = args.pdf {
        if let Some(tx) = &app.backend_cmd_tx {
            let _ = tx.send(BackendCommand::Extract {
                path: pdf.clone(),
                detail: app.detail_level,
            });
        }
        app.pending_upload = Some(pdf);
        app.phase = Phase::Extracting;
    }

    // Main event loop
    let tick_rate = Duration::from_millis(100);

    loop {
        terminal.draw(|f| app.view(f))?;

        tokio::select! {
            // Backend events (non-blocking drain)
            maybe_event = event_rx.recv() => {
                if let Some(backend_event) = maybe_event {
                    app.handle_backend_event(backend_event);
                    // Drain any additional queued backend events
                    while let Ok(evt) = event_rx.try_recv() {
                        app.handle_backend_event(evt);
                    }
                }
            }
            // Terminal input events
            _ = async {
                if event::poll(tick_rate).unwrap_or(false)
                    && let Ok(evt) = event::read()
                {
                    let action = input::map_event(&evt, &app.input_mode);
                    app.update(action);
                }
            } => {}
        }

        // Process tick
        app.update(action::Action::Tick);

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;

    // Persist settings changed during the session (detail level, theme).
    if app.config.dirty {
        if let Err(err) = config_file::save_config(&config_file::from_config_state(&app.config)) {
            tracing::warn!(%err, "could not save config");
        }
    }

    Ok(())
}
