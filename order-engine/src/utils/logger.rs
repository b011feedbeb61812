//! Logging Infrastructure
//!
//! `RUST_LOG` wins when set; otherwise the configured level applies to every
//! target. With a log directory the output goes to a daily rolling file.

use std::path::Path;
use tracing_subscriber::EnvFilter;

const LOG_FILE_PREFIX: &str = "order-engine";

/// Initialize the logger with defaults (info, stdout)
pub fn init_logger() {
    init_logger_with_file(None, None);
}

/// Initialize the logger with optional file output
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logger_with_file(log_level: Option<&str>, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if log_path.exists() {
            let file_appender = tracing_appender::rolling::daily(log_path, LOG_FILE_PREFIX);
            let _ = subscriber.with_ansi(false).with_writer(file_appender).try_init();
            return;
        }
        eprintln!("Log directory {dir} does not exist, logging to stdout");
    }

    let _ = subscriber.try_init();
}
