//! Logging Module
//!
//! Sets up `tracing` output for applications embedding the engine:
//! - Pretty stdout logs filtered by `RUST_LOG` or the configured filter
//! - Optional daily-rolling JSON log files
//! - `log` macro records forwarded to `tracing`
//! - miette reports for engine errors

use std::fs;
use std::io;

use miette::{Diagnostic, GraphicalReportHandler, GraphicalTheme};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Layer};

use crate::config::LoggingConfig;

const LOG_FILE_NAME: &str = "encounter-engine.log";

// ============================================================================
// Logging Initialization
// ============================================================================

fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize the logging system.
///
/// Installs a registry with a pretty stdout layer and, when `log_dir` is
/// configured, a JSON file layer rolling daily. Standard `log` macros are
/// redirected to `tracing`.
///
/// Returns the file writer's `WorkerGuard` when file logging is on. Keep it
/// alive for the life of the application so buffered lines are flushed.
pub fn init(config: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = env_filter(config);

    let mut guard = None;
    let file_layer = config.log_dir.as_ref().and_then(|log_dir| {
        if let Err(e) = fs::create_dir_all(log_dir) {
            eprintln!("Failed to create logs directory {}: {}", log_dir.display(), e);
            return None;
        }
        let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_NAME);
        let (non_blocking, file_guard) = tracing_appender::non_blocking(file_appender);
        guard = Some(file_guard);

        Some(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .json()
                .with_file(true)
                .with_line_number(true)
                .with_target(true)
                .with_filter(filter.clone()),
        )
    });

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stdout)
        .pretty()
        .with_filter(filter);

    let subscriber = tracing_subscriber::registry()
        .with(file_layer)
        .with(stdout_layer);

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to install tracing subscriber: {}", e);
        return guard;
    }

    if let Err(e) = tracing_log::LogTracer::init() {
        eprintln!("Failed to initialize LogTracer: {}", e);
    }

    match &config.log_dir {
        Some(dir) => log::info!(
            "Logging initialized. Writing to: {:?} (daily rolling)",
            dir.join(LOG_FILE_NAME)
        ),
        None => log::info!("Logging initialized (stdout only)"),
    }

    guard
}

/// Logging for tests: output captured per test, safe to call repeatedly.
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("debug"))
        .try_init();
}

// ============================================================================
// Diagnostic Rendering
// ============================================================================

/// Render a diagnostic (code, message, help) as plain text.
pub fn render_diagnostic(diagnostic: &dyn Diagnostic) -> String {
    let mut out = String::new();
    let handler =
        GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor()).with_width(120);
    if handler.render_report(&mut out, diagnostic).is_err() {
        return diagnostic.to_string();
    }
    out
}
