//! cloudwin demo entry point.
//!
//! Starts the streaming backend against the in-process loopback service,
//! opens one window and plays an input script into it.  The script comes
//! from the TOML file named by the first argument, or the built-in session
//! when none is given.  When the script runs out the demo stops the stream,
//! the backend closes the window and the process exits.
//!
//! # Threads
//!
//! The frame loop is synchronous and blocks between frames, so it runs on
//! Tokio's blocking pool.  The async runtime only watches for Ctrl-C.

use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use anyhow::Context as _;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cloudwin_app::application::demo::{default_script, DemoHandler};
use cloudwin_app::infrastructure::script::{load_script, InputScript};
use cloudwin_app::{AppError, Application};
use cloudwin_backend::infrastructure::storage::config::load_config;
use cloudwin_backend::{BackendConfig, LoopbackStreamService, VERSION_STRING};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Config first: it carries the fallback log level.
    let (config, config_error) = match load_config() {
        Ok(config) => (config, None),
        Err(e) => (BackendConfig::default(), Some(e)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .init();

    if let Some(e) = config_error {
        warn!("could not load config, using defaults: {e}");
    }
    info!(version = VERSION_STRING, "cloudwin demo starting");

    let script = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => load_script(&path)
            .with_context(|| format!("loading input script {}", path.display()))?,
        None => default_script(),
    };
    info!(events = script.len(), "input script ready");

    // ── Ctrl-C handler ────────────────────────────────────────────────────────
    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_clone = Arc::clone(&shutdown);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            shutdown_clone.store(true, Ordering::Relaxed);
        }
    });

    // ── Frame loop ────────────────────────────────────────────────────────────
    let service = Arc::new(LoopbackStreamService::new());
    let code = tokio::task::spawn_blocking(move || run(service, config, script, shutdown))
        .await
        .context("frame loop thread panicked")??;

    info!(code, "cloudwin demo finished");
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

fn run(
    service: Arc<LoopbackStreamService>,
    config: BackendConfig,
    script: InputScript,
    shutdown: Arc<AtomicBool>,
) -> Result<i32, AppError> {
    let mut app = Application::new(service.clone(), config)?;
    let window = app.add_default_window("cloudwin demo")?;

    let mut handler = DemoHandler::new(service, window, script, shutdown);
    let code = app.execute(&mut handler);
    info!(events = handler.received(), "demo session complete");

    app.terminate();
    Ok(code)
}
