//! Logging setup.
//!
//! Logs go to a daily-rolling file under the data directory, with a compact
//! copy on stderr so headless runs still show warnings. The filter defaults
//! to the level passed on the command line and can be overridden with
//! `RUST_LOG`.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging; keep the returned guard alive for the process
/// lifetime or buffered log lines are lost on exit.
pub fn init_logging(data_dir: &Path, level: &str) -> color_eyre::Result<WorkerGuard> {
    std::fs::create_dir_all(data_dir)?;

    let file_appender = tracing_appender::rolling::daily(data_dir, "agritwin.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let default_filter = format!("agritwin={level},agritwin_core=warn");
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false)
                .with_target(true),
        )
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .compact()
                .with_target(false),
        )
        .init();

    tracing::info!("logging initialized (data_dir={})", data_dir.display());
    Ok(guard)
}
