use std::path::Path;

use anyhow::Result;
use tracing::level_filters::LevelFilter;
use tracing_appender::rolling::Rotation;
use tracing_subscriber::EnvFilter;

const LOG_PREFIX: &str = "planner";

/// Sends all logs to a daily rolling file under `<data_dir>/logs`.
///
/// The terminal belongs to the TUI, so nothing goes to stdout.
pub fn enable_logging(data_dir: &Path, log_level: Option<LevelFilter>) -> Result<()> {
    let appender = tracing_appender::rolling::Builder::new()
        .rotation(Rotation::DAILY)
        .max_log_files(7)
        .filename_prefix(LOG_PREFIX)
        .filename_suffix("log")
        .build(data_dir.join("logs"))?;

    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter_directives(log_level, rust_log.as_deref())))
        .with_writer(appender)
        .with_ansi(false)
        .init();
    Ok(())
}

/// The flag wins over `RUST_LOG`. A bare level is scoped to the planner
/// crates; anything else in `RUST_LOG` is taken as full directives.
fn filter_directives(log_level: Option<LevelFilter>, rust_log: Option<&str>) -> String {
    let level = match (log_level, rust_log.map(str::trim)) {
        (Some(level), _) => level,
        (None, Some(env)) if !env.is_empty() => match env.parse::<LevelFilter>() {
            Ok(level) => level,
            Err(_) => return env.to_string(),
        },
        _ => LevelFilter::INFO,
    };
    format!("planner_core={level},planner={level}")
}
