// Access logging - one pipe-delimited line per request, written to a file sink

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::{Level, Subscriber};
use tracing_subscriber::{
    filter::Targets,
    fmt::{self, time::ChronoLocal, MakeWriter},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

use crate::config::LoggingConfig;

/// Tracing target routed to the access log file
pub const ACCESS_TARGET: &str = "access";

/// Message and category a handler attaches to its response.
///
/// The request tracking middleware removes it from the response extensions
/// and turns it into the access line for that request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessNote {
    pub message: String,
    pub category: String,
}

impl AccessNote {
    pub fn new(message: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            category: category.into(),
        }
    }
}

/// Fields of one access line
#[derive(Debug, Clone)]
pub struct AccessRecord<'a> {
    pub source: &'a str,
    pub note: &'a AccessNote,
    pub elapsed: Duration,
    pub user_agent: &'a str,
}

impl AccessRecord<'_> {
    /// `|source|message|elapsed|user agent|category|`, elapsed in seconds
    /// with five decimals. Line breaks inside fields are escaped.
    pub fn to_line(&self) -> String {
        format!(
            "|{}|{}|{:.5}|{}|{}|",
            single_line(self.source),
            single_line(&self.note.message),
            self.elapsed.as_secs_f64(),
            single_line(self.user_agent),
            single_line(&self.note.category),
        )
    }
}

fn single_line(field: &str) -> String {
    field.replace('\r', "\\r").replace('\n', "\\n")
}

/// Install the global subscriber: `RUST_LOG`-filtered stdout output plus the
/// access log file, which only receives events on [`ACCESS_TARGET`].
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let path = Path::new(&config.access_log_path);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open access log {}", path.display()))?;

    let stdout_layer = fmt::layer().with_filter(
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    );

    tracing_subscriber::registry()
        .with(stdout_layer)
        .with(access_layer(Arc::new(file)))
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}

/// File layer of the access log: `<timestamp> - <line>` for every event on
/// [`ACCESS_TARGET`], nothing else.
pub fn access_layer<S, W>(writer: W) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a> + 'static,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .with_level(false)
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S,%3f -".to_string()))
        .with_filter(Targets::new().with_target(ACCESS_TARGET, Level::INFO))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_layout() {
        let note = AccessNote::new("Index page displayed", "Index");
        let record = AccessRecord {
            source: "game-night",
            note: &note,
            elapsed: Duration::from_micros(1234),
            user_agent: "curl/8.5.0",
        };

        assert_eq!(
            record.to_line(),
            "|game-night|Index page displayed|0.00123|curl/8.5.0|Index|"
        );
    }

    #[test]
    fn test_line_stays_single_line() {
        let note = AccessNote::new("Comment added for game: two\nlines", "Comment");
        let record = AccessRecord {
            source: "game-night",
            note: &note,
            elapsed: Duration::ZERO,
            user_agent: "",
        };

        let line = record.to_line();
        assert!(!line.contains('\n'));
        assert_eq!(line, "|game-night|Comment added for game: two\\nlines|0.00000||Comment|");
    }
}
