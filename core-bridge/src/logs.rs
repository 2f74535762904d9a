//! Log forwarding.

use std::sync::Arc;

use bridge_traits::logs::{LogSeverity, NativeLogger};
use bridge_traits::value::AttributeMap;
use core_runtime::GlobalAttributeStore;

/// Host-facing log entry points.
///
/// Attributes sent with each log are the global attributes overlaid with the
/// per-call context.
#[derive(Clone)]
pub struct DdLogs {
    logger: Arc<dyn NativeLogger>,
    globals: Arc<GlobalAttributeStore>,
}

impl DdLogs {
    pub fn new(logger: Arc<dyn NativeLogger>, globals: Arc<GlobalAttributeStore>) -> Self {
        Self { logger, globals }
    }

    pub fn debug(&self, message: &str, context: &AttributeMap) {
        self.log(LogSeverity::Debug, message, context);
    }

    pub fn info(&self, message: &str, context: &AttributeMap) {
        self.log(LogSeverity::Info, message, context);
    }

    pub fn warn(&self, message: &str, context: &AttributeMap) {
        self.log(LogSeverity::Warn, message, context);
    }

    pub fn error(&self, message: &str, context: &AttributeMap) {
        self.log(LogSeverity::Error, message, context);
    }

    fn log(&self, severity: LogSeverity, message: &str, context: &AttributeMap) {
        self.logger
            .log(severity, message, self.globals.merged_with(context));
    }
}
