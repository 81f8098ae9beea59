//! Tracing subscriber setup shared by the binaries.
//!
//! Environment variables:
//!   LOG_FORMAT  - "json" or "text" (default: "text")
//!   LOG_FILE    - path to log file (optional, enables daily-rotated file logging)
//!   LOG_ANSI    - "true"/"false" override ANSI colors (auto-detected on stdout, off in files)
//!   RUST_LOG    - standard env filter

use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const DEFAULT_LOG_FILTER: &str = "people_api=debug,people_db=debug,tower_http=debug";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Where and how log lines are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub format: LogFormat,
    pub file: Option<PathBuf>,
    pub ansi: Option<bool>,
}

impl LogConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let format = match lookup("LOG_FORMAT").as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };
        Self {
            format,
            file: lookup("LOG_FILE")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            ansi: lookup("LOG_ANSI").map(|v| v == "true" || v == "1"),
        }
    }

    /// Directory and file-name prefix for the rolling appender.
    fn file_target(path: &Path) -> (PathBuf, String) {
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."))
            .to_path_buf();
        let name = path
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or("people-api.log")
            .to_string();
        (dir, name)
    }
}

/// Install the global subscriber.
///
/// The returned guard flushes the file writer on drop; hold it for the life of
/// the process.
pub fn init_tracing(config: &LogConfig, default_filter: &str) -> Option<WorkerGuard> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());
    let registry = tracing_subscriber::registry().with(env_filter);

    match (&config.file, config.format) {
        (Some(path), format) => {
            let (dir, name) = LogConfig::file_target(path);
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, name));
            let layer = tracing_subscriber::fmt::layer().with_writer(writer);
            match format {
                LogFormat::Json => registry.with(layer.json()).init(),
                LogFormat::Text => registry
                    .with(layer.with_ansi(config.ansi.unwrap_or(false)))
                    .init(),
            }
            Some(guard)
        }
        (None, LogFormat::Json) => {
            registry.with(tracing_subscriber::fmt::layer().json()).init();
            None
        }
        (None, LogFormat::Text) => {
            let mut layer = tracing_subscriber::fmt::layer();
            if let Some(ansi) = config.ansi {
                layer = layer.with_ansi(ansi);
            }
            registry.with(layer).init();
            None
        }
    }
}
