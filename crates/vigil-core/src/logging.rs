//! Console logger.
//!
//! Every line looks like
//!
//! ```text
//! [2026-10-15 09:41:07.123//Main] PROJECT: Starting up
//! ```
//!
//! Events carry their tag in a `source` field; events without one fall back
//! to the tracing target. WARN and ERROR go to stderr, everything else to
//! stdout. Output is best-effort: write failures are dropped by the
//! subscriber.

use std::fmt::{self, Write as _};

use chrono::Local;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// `chrono` pattern for the line timestamp (millisecond precision).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Severity accepted by [`log`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Written to stdout.
    Info,
    /// Written to stderr.
    Error,
}

/// Emits one tagged line at `level`.
pub fn log(level: LogLevel, source: &str, message: &str) {
    match level {
        LogLevel::Info => tracing::info!(source = source, "{message}"),
        LogLevel::Error => tracing::error!(source = source, "{message}"),
    }
}

/// Renders a single console line, including the trailing newline.
#[must_use]
pub fn render_line(timestamp: impl fmt::Display, source: &str, message: &str) -> String {
    format!("[{timestamp}//{source}] {message}\n")
}

/// Installs the global console subscriber.
///
/// `RUST_LOG` takes precedence over `default_filter`. Calling this more than
/// once leaves the first subscriber in place.
pub fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let writer = std::io::stderr
        .with_max_level(Level::WARN)
        .or_else(std::io::stdout);

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .event_format(ConsoleFormat)
        .with_writer(writer)
        .try_init();
}

/// `tracing-subscriber` event formatter producing the console line format.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleFormat;

impl<S, N> FormatEvent<S, N> for ConsoleFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut fields = LineFields::default();
        event.record(&mut fields);

        let source = fields
            .source
            .as_deref()
            .unwrap_or_else(|| event.metadata().target());

        let mut message = fields.message;
        for (name, value) in &fields.extra {
            write!(message, " {name}={value}")?;
        }

        let timestamp = Local::now().format(TIMESTAMP_FORMAT);
        writer.write_str(&render_line(timestamp, source, &message))
    }
}

/// Field visitor splitting out `message` and `source`.
#[derive(Default)]
struct LineFields {
    message: String,
    source: Option<String>,
    extra: Vec<(&'static str, String)>,
}

impl LineFields {
    fn store(&mut self, field: &Field, value: String) {
        match field.name() {
            "message" => self.message = value,
            "source" => self.source = Some(value),
            name => self.extra.push((name, value)),
        }
    }
}

impl Visit for LineFields {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.store(field, value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.store(field, format!("{value:?}"));
    }
}
