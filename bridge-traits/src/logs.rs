//! Native Log Writer Abstraction

use crate::{platform::PlatformSendSync, value::AttributeMap};

/// Severity of a log forwarded to the native logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogSeverity {
    Debug,
    Info,
    Warn,
    Error,
}

/// Native log writer (the SDK logger that uploads logs).
pub trait NativeLogger: PlatformSendSync {
    fn log(&self, severity: LogSeverity, message: &str, attributes: AttributeMap);
}
