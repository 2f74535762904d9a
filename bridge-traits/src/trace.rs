//! Tracing Abstraction
//!
//! Minimal tracer/span contract of the native SDK's distributed tracer.

use crate::{
    platform::{PlatformSend, PlatformSendSync},
    value::TagValue,
};

/// Identifiers of a native span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpanContext {
    pub trace_id: u64,
    pub span_id: u64,
}

impl SpanContext {
    /// Opaque string encoding used by the bridge to refer to an open span.
    pub fn to_span_id(&self) -> String {
        format!("{:016x}{:016x}", self.trace_id, self.span_id)
    }
}

/// An open native span.
pub trait NativeSpan: PlatformSend {
    fn context(&self) -> SpanContext;

    fn set_tag(&mut self, key: &str, value: TagValue);

    /// Finish the span at an explicit time, in microseconds since epoch.
    fn finish(self: Box<Self>, finish_micros: i64);
}

/// Native tracer.
///
/// Only usable once the native SDK has been initialized.
pub trait Tracer: PlatformSendSync {
    /// Start a span with an explicit start time, in microseconds since epoch.
    fn start_span(&self, operation: &str, start_micros: i64) -> Box<dyn NativeSpan>;
}
