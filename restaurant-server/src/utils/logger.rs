//! Logging Infrastructure
//!
//! Structured logging setup. Text output for development, JSON lines when
//! `LOG_FORMAT=json` so events like `menu_create_success` can be shipped to a
//! log collector as-is.

use std::path::Path;

use tracing_subscriber::EnvFilter;

/// Initialize the logger
pub fn init_logger() {
    init_logger_with_file(None, None, None);
}

/// Initialize the logger with optional JSON format and file output
///
/// `RUST_LOG` takes precedence over `log_level` when set.
pub fn init_logger_with_file(log_level: Option<&str>, json: Option<bool>, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let json = json.unwrap_or(false);

    let builder = tracing_subscriber::fmt()
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
            let file_appender = tracing_appender::rolling::daily(dir_str, "restaurant-server");
            let builder = builder.with_writer(file_appender).with_ansi(false);
            let installed = if json {
                builder.json().try_init()
            } else {
                builder.try_init()
            };
            report(installed);
            return;
        }
    }

    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    report(installed);
}

/// A second install (tests, embedding) keeps the existing subscriber
fn report(installed: Result<(), Box<dyn std::error::Error + Send + Sync>>) {
    if let Err(e) = installed {
        tracing::debug!(error = %e, "Logger already initialized, keeping existing subscriber");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_init_keeps_first_subscriber() {
        init_logger_with_file(Some("debug"), Some(false), None);
        init_logger_with_file(Some("info"), Some(true), None);
        init_logger();
    }
}
