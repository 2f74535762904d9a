//! In-process tracer.

use bridge_traits::{
    trace::{NativeSpan, SpanContext, Tracer},
    value::TagValue,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;
use uuid::Uuid;

use crate::history::History;

/// A span after `finish`.
#[derive(Debug, Clone, PartialEq)]
pub struct FinishedSpan {
    pub context: SpanContext,
    pub operation: String,
    pub start_micros: i64,
    pub finish_micros: i64,
    pub tags: HashMap<String, TagValue>,
}

impl FinishedSpan {
    pub fn duration_micros(&self) -> i64 {
        self.finish_micros.saturating_sub(self.start_micros)
    }
}

type FinishedSpans = Arc<Mutex<History<FinishedSpan>>>;

/// Desktop tracer. Every span is a new trace with random 64-bit ids.
#[derive(Debug, Default)]
pub struct DesktopTracer {
    finished: FinishedSpans,
}

impl DesktopTracer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracer keeping at most `capacity` finished spans.
    pub fn with_history(capacity: usize) -> Self {
        Self {
            finished: Arc::new(Mutex::new(History::new(capacity))),
        }
    }

    pub fn finished_spans(&self) -> Vec<FinishedSpan> {
        self.finished
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .snapshot()
    }

    /// Take every kept finished span, oldest first.
    pub fn drain_finished_spans(&self) -> Vec<FinishedSpan> {
        self.finished
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain()
    }
}

impl Tracer for DesktopTracer {
    fn start_span(&self, operation: &str, start_micros: i64) -> Box<dyn NativeSpan> {
        let (trace_id, span_id) = Uuid::new_v4().as_u64_pair();
        let context = SpanContext { trace_id, span_id };
        debug!(operation, span_id = %context.to_span_id(), "Desktop span started");

        Box::new(DesktopSpan {
            context,
            operation: operation.to_string(),
            start_micros,
            tags: HashMap::new(),
            finished: Arc::clone(&self.finished),
        })
    }
}

struct DesktopSpan {
    context: SpanContext,
    operation: String,
    start_micros: i64,
    tags: HashMap<String, TagValue>,
    finished: FinishedSpans,
}

impl NativeSpan for DesktopSpan {
    fn context(&self) -> SpanContext {
        self.context
    }

    fn set_tag(&mut self, key: &str, value: TagValue) {
        self.tags.insert(key.to_string(), value);
    }

    fn finish(self: Box<Self>, finish_micros: i64) {
        let span = FinishedSpan {
            context: self.context,
            operation: self.operation,
            start_micros: self.start_micros,
            finish_micros,
            tags: self.tags,
        };
        debug!(
            operation = %span.operation,
            duration_micros = span.duration_micros(),
            tags = span.tags.len(),
            "Desktop span finished"
        );
        self.finished
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(span);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_ids_are_unique() {
        let tracer = DesktopTracer::new();
        let first = tracer.start_span("a", 0).context();
        let second = tracer.start_span("b", 0).context();
        assert_ne!(first.to_span_id(), second.to_span_id());
    }

    #[test]
    fn test_finish_records_span() {
        let tracer = DesktopTracer::new();
        let mut span = tracer.start_span("db.query", 1_000_000);
        span.set_tag("rows", TagValue::Int(3));
        span.set_tag("rows", TagValue::Int(4));
        span.finish(1_250_000);

        let finished = tracer.finished_spans();
        assert_eq!(finished.len(), 1);
        assert_eq!(finished[0].operation, "db.query");
        assert_eq!(finished[0].duration_micros(), 250_000);
        assert_eq!(finished[0].tags["rows"], TagValue::Int(4));
    }

    #[test]
    fn test_finished_spans_are_bounded() {
        let tracer = DesktopTracer::with_history(1);
        tracer.start_span("old", 0).finish(1);
        tracer.start_span("new", 0).finish(1);

        let finished = tracer.drain_finished_spans();
        assert_eq!(finished.len(), 1);
        assert_eq!(finished[0].operation, "new");
        assert!(tracer.finished_spans().is_empty());
    }
}
