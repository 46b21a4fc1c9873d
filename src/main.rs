// naijagate - API gateway for the NaijaHub web client
//
// The frontend talks only to this process, which shields two third-party
// APIs behind a single origin:
// - newsdata.io: Nigerian news headlines, behind a shared snapshot cache
// - OpenAI: Nigeria-focused topic summaries via chat completions
//
// Architecture:
// - Gateway server (axum): /api/news, /api/ai-summary, /health
// - Upstream client (reqwest): one pooled client for both providers
// - Config: env vars > ~/.config/naijagate/config.toml > defaults

mod cli;
mod config;
mod proxy;
mod startup;

use anyhow::Result;
use config::{Config, LogRotation, LoggingConfig};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // `config --show` and friends handle themselves and exit
    if cli::handle_cli() {
        return Ok(());
    }

    // Drop a commented template on first run so the options are discoverable
    Config::ensure_config_exists();

    let config = Config::from_env();

    // Guard must outlive main or buffered file logs are lost on shutdown
    let _file_guard = init_tracing(&config.logging);

    // The server runs as its own task; main owns the shutdown signal
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
    let server_config = config.clone();
    let server_handle = tokio::spawn(async move {
        proxy::start_proxy(server_config, shutdown_rx)
            .await
            .expect("Gateway server failed");
    });

    // Banner goes out after init so it reflects the loaded state
    startup::print_startup(&config);
    startup::log_startup(&config);

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down...");

    // Send failing means the server already stopped, which is fine
    let _ = shutdown_tx.send(());
    let _ = server_handle.await;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Wire up tracing: stdout always, plus an optional JSON file layer
///
/// Filter precedence: RUST_LOG env var > config level > "info". The returned
/// guard keeps the non-blocking file writer flushing; None when file logging
/// is off or its directory cannot be created.
fn init_tracing(logging: &LoggingConfig) -> Option<WorkerGuard> {
    let default_filter = format!("naijagate={},tower_http=debug,axum=debug", logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer());

    let appender = if logging.file_enabled {
        match std::fs::create_dir_all(&logging.file_dir) {
            Ok(()) => Some(file_appender(logging)),
            Err(e) => {
                eprintln!(
                    "Warning: could not create log directory {:?}: {} - logging to stdout only",
                    logging.file_dir, e
                );
                None
            }
        }
    } else {
        None
    };

    match appender {
        Some(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            registry
                .with(
                    // JSON format so the files are machine-parseable
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(writer)
                        .with_ansi(false),
                )
                .init();
            Some(guard)
        }
        None => {
            registry.init();
            None
        }
    }
}

fn file_appender(logging: &LoggingConfig) -> RollingFileAppender {
    let dir = &logging.file_dir;
    let prefix = &logging.file_prefix;
    match logging.file_rotation {
        LogRotation::Hourly => tracing_appender::rolling::hourly(dir, prefix),
        LogRotation::Daily => tracing_appender::rolling::daily(dir, prefix),
        LogRotation::Never => tracing_appender::rolling::never(dir, prefix),
    }
}
