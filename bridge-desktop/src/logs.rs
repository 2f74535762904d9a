//! In-process log writer backed by `tracing`.

use bridge_traits::{
    logs::{LogSeverity, NativeLogger},
    value::AttributeMap,
};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, error, info, warn};

use crate::history::History;

/// A log line as the desktop writer received it.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub severity: LogSeverity,
    pub message: String,
    pub attributes: AttributeMap,
}

/// Desktop stand-in for the native log writer.
///
/// Each log is re-emitted as a `tracing` event under the `dd_logs` target at
/// the matching level, with its attributes rendered as JSON.
#[derive(Debug, Default)]
pub struct DesktopLogger {
    records: Mutex<History<LogRecord>>,
}

impl DesktopLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Logger keeping at most `capacity` records.
    pub fn with_history(capacity: usize) -> Self {
        Self {
            records: Mutex::new(History::new(capacity)),
        }
    }

    pub fn records(&self) -> Vec<LogRecord> {
        self.lock().snapshot()
    }

    /// Take every kept record, oldest first.
    pub fn drain_records(&self) -> Vec<LogRecord> {
        self.lock().drain()
    }

    fn lock(&self) -> MutexGuard<'_, History<LogRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl NativeLogger for DesktopLogger {
    fn log(&self, severity: LogSeverity, message: &str, attributes: AttributeMap) {
        let rendered = serde_json::to_string(&attributes).unwrap_or_default();
        match severity {
            LogSeverity::Debug => debug!(target: "dd_logs", attributes = %rendered, "{}", message),
            LogSeverity::Info => info!(target: "dd_logs", attributes = %rendered, "{}", message),
            LogSeverity::Warn => warn!(target: "dd_logs", attributes = %rendered, "{}", message),
            LogSeverity::Error => error!(target: "dd_logs", attributes = %rendered, "{}", message),
        }

        self.lock().push(LogRecord {
            severity,
            message: message.to_string(),
            attributes,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_traits::value::AttributeValue;

    #[test]
    fn test_records_in_order() {
        let logger = DesktopLogger::new();
        let mut attributes = AttributeMap::new();
        attributes.insert("user".to_string(), AttributeValue::from("ann"));

        logger.log(LogSeverity::Info, "first", attributes.clone());
        logger.log(LogSeverity::Error, "second", AttributeMap::new());

        let records = logger.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].severity, LogSeverity::Info);
        assert_eq!(records[0].attributes, attributes);
        assert_eq!(records[1].message, "second");
    }

    #[test]
    fn test_history_is_bounded() {
        let logger = DesktopLogger::with_history(2);
        for message in ["a", "b", "c"] {
            logger.log(LogSeverity::Debug, message, AttributeMap::new());
        }

        let messages: Vec<_> = logger.drain_records().into_iter().map(|r| r.message).collect();
        assert_eq!(messages, vec!["b", "c"]);
        assert!(logger.records().is_empty());
    }
}
