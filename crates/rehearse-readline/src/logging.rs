use anyhow::Result;
use rehearse_infrastructure::RehearsePaths;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const LOG_FILE_PREFIX: &str = "rehearse.log";

/// Sends all tracing output to a daily-rotated file under the logs directory.
///
/// The level comes from `RUST_LOG` and defaults to `info`. Keep the returned
/// guard alive until exit or buffered lines are lost.
pub fn init(paths: &RehearsePaths) -> Result<WorkerGuard> {
    let logs_dir = paths.logs_dir()?;
    std::fs::create_dir_all(&logs_dir)?;

    let appender = tracing_appender::rolling::daily(&logs_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!("Failed to initialize logging: {err}"))?;

    Ok(guard)
}
