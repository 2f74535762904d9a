//! Bridge diagnostics handed to the host.
//!
//! Every fallback the bridge takes on malformed input (unknown consent,
//! unknown proxy type, a finish for an unknown span) is reported as a
//! `tracing` event. `core-runtime::logging` turns those events into
//! [`Diagnostic`] records and hands them to a host [`DiagnosticSink`] such as
//! Logcat or OSLog.
//!
//! This is not the native SDK's uploaded log stream; that is
//! [`NativeLogger`](crate::logs::NativeLogger).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{error::Result, platform::PlatformSendSync};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Directive spelling understood by `EnvFilter`.
    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// One diagnostic event with its structured fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub level: LogLevel,
    pub timestamp: DateTime<Utc>,
    /// Emitting module, e.g. `core_bridge::consent`.
    pub target: String,
    pub message: String,
    pub fields: BTreeMap<String, String>,
}

impl Diagnostic {
    pub fn new(level: LogLevel, target: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            timestamp: Utc::now(),
            target: target.into(),
            message: message.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }
}

/// Host destination for bridge diagnostics.
pub trait DiagnosticSink: PlatformSendSync {
    fn record(&self, diagnostic: Diagnostic) -> Result<()>;

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    /// Diagnostics below this level are not delivered.
    fn min_level(&self) -> LogLevel {
        LogLevel::Info
    }
}
