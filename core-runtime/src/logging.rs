//! # Logging & Tracing Infrastructure
//!
//! Diagnostics for the bridge itself, built on the `tracing` crate:
//! - JSON, pretty-print and compact output formats
//! - Per-crate filtering that keeps dependencies at `warn`
//! - Redaction helper for client tokens and proxy credentials
//! - Delivery to the host through a [`DiagnosticSink`]
//!
//! ## Overview
//!
//! The bridge never raises on malformed host input; it substitutes a default
//! and emits a diagnostic instead. Those diagnostics are the only way an
//! engineer inspecting device logs learns about the substitution, so every
//! event that survives filtering is also turned into a [`Diagnostic`] and
//! handed to the optional host sink (Logcat, OSLog, ...).
//!
//! These diagnostics are separate from the logs the host forwards to the
//! native SDK through `DdLogs`.
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::logging::{init_logging, LogFormat, LoggingConfig};
//! use bridge_traits::diagnostics::LogLevel;
//! use std::sync::Arc;
//!
//! let config = LoggingConfig::default()
//!     .with_format(LogFormat::Compact)
//!     .with_level(LogLevel::Debug)
//!     .with_sink(Arc::new(LogcatSink::new()));
//!
//! init_logging(config)?;
//! tracing::warn!(consent = "maybe", "Unknown consent, using PENDING");
//! ```

use crate::error::{Error, Result};

use bridge_traits::diagnostics::{Diagnostic, DiagnosticSink, LogLevel};

use std::fmt;
use std::io;
use std::sync::Arc;

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    filter::EnvFilter,
    layer::{Context, SubscriberExt},
    registry::Registry,
    util::SubscriberInitExt,
    Layer,
};

/// Crates whose events follow the configured level.
const BRIDGE_TARGETS: &[&str] = &[
    "core_runtime",
    "core_bridge",
    "core_service",
    "bridge_desktop",
    "dd_logs",
];

/// Console output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Multi-line and colored, for local development.
    Pretty,
    /// One JSON object per event with flattened fields.
    Json,
    /// Single line per event.
    Compact,
}

impl Default for LogFormat {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            Self::Pretty
        } else {
            Self::Json
        }
    }
}

#[derive(Clone)]
pub struct LoggingConfig {
    pub format: LogFormat,
    /// Level applied to the bridge crates when no custom filter is set.
    pub level: LogLevel,
    /// `EnvFilter` directives replacing the default filter entirely.
    pub filter: Option<String>,
    pub sink: Option<Arc<dyn DiagnosticSink>>,
    /// Print the emitting module next to each console line.
    pub display_target: bool,
}

impl fmt::Debug for LoggingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggingConfig")
            .field("format", &self.format)
            .field("level", &self.level)
            .field("filter", &self.filter)
            .field("sink", &self.sink.is_some())
            .field("display_target", &self.display_target)
            .finish()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            level: LogLevel::Info,
            filter: None,
            sink: None,
            display_target: true,
        }
    }
}

impl LoggingConfig {
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn with_target(mut self, display: bool) -> Self {
        self.display_target = display;
        self
    }
}

/// Install the global `tracing` subscriber.
///
/// Call once during host startup.
///
/// # Errors
///
/// Returns [`Error::Config`] if a global subscriber is already installed or
/// the filter directives do not parse.
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let filter = build_filter(&config)?;

    tracing_subscriber::registry()
        .with(console_layer(&config))
        .with(DiagnosticSinkLayer::new(config.sink.clone()))
        .with(filter)
        .try_init()
        .map_err(|e| Error::Config(format!("Failed to initialize logging: {}", e)))
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

fn console_layer(config: &LoggingConfig) -> BoxedLayer {
    let layer = tracing_subscriber::fmt::layer()
        .with_target(config.display_target)
        .with_writer(io::stdout);

    match config.format {
        LogFormat::Pretty => layer.pretty().boxed(),
        LogFormat::Json => layer.json().flatten_event(true).boxed(),
        LogFormat::Compact => layer.compact().boxed(),
    }
}

fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    let directives = match &config.filter {
        Some(custom) => custom.clone(),
        None => {
            let level = config.level.as_directive();
            std::iter::once("warn".to_string())
                .chain(BRIDGE_TARGETS.iter().map(|target| format!("{target}={level}")))
                .collect::<Vec<_>>()
                .join(",")
        }
    };

    EnvFilter::try_new(&directives)
        .map_err(|e| Error::Config(format!("Invalid log filter '{}': {}", directives, e)))
}

/// Turns each `tracing` event into a [`Diagnostic`] for the host sink.
struct DiagnosticSinkLayer {
    sink: Option<Arc<dyn DiagnosticSink>>,
}

impl DiagnosticSinkLayer {
    fn new(sink: Option<Arc<dyn DiagnosticSink>>) -> Self {
        Self { sink }
    }
}

impl<S: Subscriber> Layer<S> for DiagnosticSinkLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let Some(sink) = self.sink.as_ref() else {
            return;
        };

        let metadata = event.metadata();
        let level = log_level(*metadata.level());
        if level < sink.min_level() {
            return;
        }

        let mut collector = FieldCollector::new(level, metadata.target());
        event.record(&mut collector);
        let mut diagnostic = collector.diagnostic;
        if diagnostic.message.is_empty() {
            diagnostic.message = metadata.name().to_string();
        }

        if let Err(err) = sink.record(diagnostic) {
            // the sink is the host logger, stderr is all that is left
            eprintln!("Diagnostic sink error: {}", err);
        }
    }
}

struct FieldCollector {
    diagnostic: Diagnostic,
}

impl FieldCollector {
    fn new(level: LogLevel, target: &str) -> Self {
        Self {
            diagnostic: Diagnostic::new(level, target, String::new()),
        }
    }

    fn insert(&mut self, field: &Field, value: String) {
        match field.name() {
            "message" => self.diagnostic.message = value,
            name => {
                self.diagnostic.fields.insert(name.to_string(), value);
            }
        }
    }
}

impl Visit for FieldCollector {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.insert(field, value.to_string());
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.insert(field, value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.insert(field, format!("{:?}", value));
    }
}

fn log_level(level: Level) -> LogLevel {
    match level {
        Level::TRACE => LogLevel::Trace,
        Level::DEBUG => LogLevel::Debug,
        Level::INFO => LogLevel::Info,
        Level::WARN => LogLevel::Warn,
        Level::ERROR => LogLevel::Error,
    }
}

/// Value safe to put in a log line for the given field.
///
/// Client tokens and proxy credentials never reach device logs in clear.
/// Email-like values keep only their first character.
///
/// ```
/// use core_runtime::logging::redact_if_sensitive;
///
/// assert_eq!(redact_if_sensitive("client_token", "pub1234"), "[REDACTED]");
/// assert_eq!(redact_if_sensitive("env", "prod"), "prod");
/// ```
pub fn redact_if_sensitive(field_name: &str, value: &str) -> String {
    const SENSITIVE_FIELDS: &[&str] = &[
        "token",
        "password",
        "secret",
        "api_key",
        "authorization",
        "username",
    ];

    let field = field_name.to_ascii_lowercase();
    if SENSITIVE_FIELDS.iter().any(|sensitive| field.contains(sensitive)) {
        return "[REDACTED]".to_string();
    }

    match value.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => {
            let first: String = local.chars().take(1).collect();
            format!("{}***@[REDACTED]", first)
        }
        _ => value.to_string(),
    }
}
