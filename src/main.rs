//! MediHealth: Heart-disease risk wizard
//!
//! Main entry point for the terminal application.

use anyhow::Result;
use std::io::IsTerminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use medihealth::tui::{broken_prediction_label, App};
use medihealth::AppConfig;

fn main() -> Result<()> {
    let config = AppConfig::from_env();

    // Initialize logging.
    //
    // Writing logs to the terminal corrupts the TUI (alternate screen), so an
    // interactive session logs to a file unless told otherwise.
    let interactive = std::io::stdout().is_terminal();

    let (writer, _guard) = if config.log_mode.use_file(interactive) {
        if let Some(parent) = config.log_file.parent() {
            let _ = std::fs::create_dir_all(parent);
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.log_file)?;
        tracing_appender::non_blocking(file)
    } else {
        tracing_appender::non_blocking(std::io::stdout())
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(writer))
        .init();

    tracing::info!("Starting MediHealth...");

    // Dataset and tree are ready before the first frame is drawn
    let mut app = App::new(&config).inspect_err(|e| tracing::error!("Startup failed: {e:#}"))?;

    if let Err(e) = app.run() {
        if let Some(label) = broken_prediction_label(&e) {
            tracing::error!("Classifier emitted label {label}; aborting");
        } else {
            tracing::error!("MediHealth terminated: {e:#}");
        }
        return Err(e);
    }

    tracing::info!("MediHealth shutdown complete.");
    Ok(())
}
