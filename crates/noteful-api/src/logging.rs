//! Tracing subscriber setup.
//!
//! Environment variables:
//!   LOG_FORMAT  - "json" or "text" (default: "text")
//!   LOG_FILE    - path to log file (optional, enables file logging)
//!   LOG_ANSI    - "true"/"false" override ANSI colors (auto-detected by default)
//!   RUST_LOG    - standard env filter (default: "noteful_api=debug,noteful_db=debug,tower_http=debug")

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "noteful_api=debug,noteful_db=debug,tower_http=debug";

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Logging options.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub format: LogFormat,
    pub file: Option<String>,
    pub ansi: Option<bool>,
}

impl LogConfig {
    /// Read logging options from the environment.
    pub fn from_env() -> Self {
        let format = match std::env::var("LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };
        let file = std::env::var("LOG_FILE").ok().filter(|s| !s.is_empty());
        let ansi = std::env::var("LOG_ANSI")
            .ok()
            .map(|v| v == "true" || v == "1");

        Self { format, file, ansi }
    }
}

/// Install the global subscriber.
///
/// Hold on to the returned guard for the life of the process when logging to
/// a file; dropping it stops the background writer.
pub fn init(config: &LogConfig) -> Option<WorkerGuard> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_FILTER.into());

    let registry = tracing_subscriber::registry().with(env_filter);

    if let Some(ref path) = config.file {
        // Daily rotation
        let file_dir = std::path::Path::new(path)
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(std::path::Path::new("."));
        let file_name = std::path::Path::new(path)
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or("noteful-api.log");
        let file_appender = tracing_appender::rolling::daily(file_dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        match config.format {
            LogFormat::Json => registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking),
                )
                .init(),
            LogFormat::Text => registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(non_blocking)
                        .with_ansi(config.ansi.unwrap_or(false)), // no ANSI in files
                )
                .init(),
        }
        Some(guard)
    } else {
        match config.format {
            LogFormat::Json => registry
                .with(tracing_subscriber::fmt::layer().json())
                .init(),
            LogFormat::Text => {
                let mut layer = tracing_subscriber::fmt::layer();
                if let Some(ansi) = config.ansi {
                    layer = layer.with_ansi(ansi);
                }
                registry.with(layer).init();
            }
        }
        None
    }
}
