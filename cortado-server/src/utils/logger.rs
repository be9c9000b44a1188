//! Logging Infrastructure
//!
//! Structured logging setup with support for both development and production environments.

use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialize the logger with the given level and optional file output
///
/// `level` accepts anything `EnvFilter` understands ("info",
/// "cortado_server=debug", ...). When `log_dir` points at an existing
/// directory, output additionally goes to a daily-rolling file.
pub fn init_logger(level: &str, log_dir: Option<&str>) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    // Add file output if log_dir is provided
    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if log_path.exists()
            && let Some(dir_str) = log_path.to_str()
        {
            let file_appender = tracing_appender::rolling::daily(dir_str, "cortado-server");
            subscriber.with_writer(file_appender).init();
            return;
        }
    }

    subscriber.init();
}
