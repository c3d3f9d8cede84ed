//! FinSight Terminal UI.
//!
//! Upload a financial PDF to the FinSight backend, trigger ingestion, and
//! ask questions about it from the terminal.

use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use finsight_client::{HttpClient, RagBackend};
use finsight_core::SessionController;

mod app;
mod backend;
mod config;
mod dispatch;
mod event;
mod scroll;
mod state;
mod ui;

use app::App;
use config::{Config, DEFAULT_BASE_URL, DEFAULT_LOG_FILE};
use dispatch::ChannelDispatcher;
use event::{BackendCommand, UiEvent};

#[derive(Parser)]
#[command(name = "finsight-tui")]
#[command(about = "Ask questions about financial PDF reports")]
#[command(version)]
struct Cli {
    /// Backend base URL
    #[arg(long, env = "FINSIGHT_API_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Log file (the terminal is taken by the UI)
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,

    /// PDF to stage at startup
    #[arg(short, long)]
    document: Option<PathBuf>,

    /// UI poll interval in milliseconds
    #[arg(long, default_value = "50")]
    tick_ms: u64,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            base_url: cli.base_url,
            log_file: cli.log_file,
            document: cli.document,
            tick: Duration::from_millis(cli.tick_ms),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::from(Cli::parse());

    init_tracing(&config.log_file);

    let config = config.validated()?;
    run(config)
}

/// Log to a file so output does not interfere with the terminal UI.
///
/// `RUST_LOG` overrides the default filter. If the file cannot be created,
/// logging stays off.
fn init_tracing(path: &Path) {
    let Ok(file) = std::fs::File::create(path) else {
        return;
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("finsight_tui=debug,finsight_client=debug,finsight_core=debug")
    });

    tracing_subscriber::fmt()
        .with_writer(std::sync::Mutex::new(file))
        .with_env_filter(filter)
        .with_ansi(false)
        .init();
}

fn run(config: Config) -> Result<(), Box<dyn Error>> {
    info!(base_url = %config.base_url, "Starting FinSight TUI");

    // Create channels for UI <-> runner communication
    let (ui_tx, ui_rx) = mpsc::channel::<UiEvent>(100);
    let (cmd_tx, cmd_rx) = mpsc::channel::<BackendCommand>(100);

    let mut session = SessionController::new(ChannelDispatcher::new(cmd_tx));
    if let Some(path) = &config.document {
        session.select_document(config::load_document(path)?);
    }

    // Spawn background thread with its own tokio runtime
    let client = HttpClient::new(&config.base_url);
    info!(base_url = %client.base_url(), "Using backend");
    let backend: Arc<dyn RagBackend> = Arc::new(client);
    let rt = tokio::runtime::Runtime::new()?;
    let bg_handle = std::thread::spawn(move || {
        rt.block_on(backend::run_backend(backend, ui_tx, cmd_rx));
    });

    // Initialize terminal (enters alternate screen, enables raw mode)
    let terminal = ratatui::init();

    let mut app = App::new(session, ui_rx, config.tick);
    let result = app.run(terminal);

    ratatui::restore();

    // Dropping the app closes the command channel even if the loop bailed out early.
    drop(app);

    // Wait for the runner to finish
    let _ = bg_handle.join();

    info!("TUI shutdown complete");

    result.map_err(|e| e.into())
}
