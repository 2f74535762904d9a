//! # Tracing Forwarder
//!
//! Manual spans started and finished by the host with explicit timestamps.
//!
//! Open spans are kept in a map keyed by their native span id. Finishing
//! removes the span from the map first, so two concurrent finishes of the
//! same id finish the native span at most once.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use bridge_traits::trace::{NativeSpan, Tracer};
use bridge_traits::value::{AttributeMap, TagValue};
use core_runtime::GlobalAttributeStore;
use tracing::{debug, warn};

type TracerProvider = Box<dyn Fn() -> Arc<dyn Tracer> + Send + Sync>;

/// Native tracer built on first use.
///
/// The native tracer can only be created once the SDK is initialized, so
/// the slot holds a provider until the first span is started. A gated slot
/// refuses to build the tracer until its readiness flag is set.
pub struct TracerSlot {
    provider: TracerProvider,
    gate: Option<Arc<AtomicBool>>,
    tracer: OnceLock<Arc<dyn Tracer>>,
}

impl TracerSlot {
    pub fn new<F>(provider: F) -> Self
    where
        F: Fn() -> Arc<dyn Tracer> + Send + Sync + 'static,
    {
        Self {
            provider: Box::new(provider),
            gate: None,
            tracer: OnceLock::new(),
        }
    }

    /// Slot whose tracer is built only once `ready` reads `true`.
    pub fn gated<F>(ready: Arc<AtomicBool>, provider: F) -> Self
    where
        F: Fn() -> Arc<dyn Tracer> + Send + Sync + 'static,
    {
        Self {
            gate: Some(ready),
            ..Self::new(provider)
        }
    }

    /// Slot that is ready from the start.
    pub fn ready(tracer: Arc<dyn Tracer>) -> Self {
        let provided = Arc::clone(&tracer);
        let slot = Self::new(move || Arc::clone(&provided));
        let _ = slot.tracer.set(tracer);
        slot
    }

    pub fn is_ready(&self) -> bool {
        self.tracer.get().is_some()
    }

    /// The native tracer, or `None` while the gate is closed.
    pub fn get(&self) -> Option<&Arc<dyn Tracer>> {
        if let Some(tracer) = self.tracer.get() {
            return Some(tracer);
        }
        if let Some(gate) = &self.gate {
            if !gate.load(Ordering::Acquire) {
                return None;
            }
        }
        Some(self.tracer.get_or_init(|| {
            debug!("Building native tracer");
            (self.provider)()
        }))
    }
}

impl fmt::Debug for TracerSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TracerSlot")
            .field("ready", &self.is_ready())
            .finish()
    }
}

/// Host-facing span entry points.
pub struct DdTrace {
    tracer: TracerSlot,
    globals: Arc<GlobalAttributeStore>,
    spans: Mutex<HashMap<String, Box<dyn NativeSpan>>>,
}

impl DdTrace {
    pub fn new(tracer: TracerSlot, globals: Arc<GlobalAttributeStore>) -> Self {
        Self {
            tracer,
            globals,
            spans: Mutex::new(HashMap::new()),
        }
    }

    /// Start a span at `timestamp_ms` and return its id.
    ///
    /// Tags are the global attributes overlaid with `context`. Returns
    /// `None` without touching the native SDK while the tracer is not
    /// available yet, i.e. before the SDK is initialized.
    pub fn start_span(
        &self,
        operation: &str,
        timestamp_ms: i64,
        context: &AttributeMap,
    ) -> Option<String> {
        let Some(tracer) = self.tracer.get() else {
            warn!(operation, "Native tracer not ready, span dropped");
            return None;
        };
        let mut span = tracer.start_span(operation, timestamp_ms.saturating_mul(1000));

        for (key, value) in self.globals.merged_with(context) {
            span.set_tag(&key, TagValue::coerce(&value));
        }

        let span_id = span.context().to_span_id();
        debug!(operation, span_id = %span_id, "Span started");

        self.spans
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(span_id.clone(), span);
        Some(span_id)
    }

    /// Finish a span previously returned by [`DdTrace::start_span`].
    ///
    /// Tags follow the same merge as at start, read from the global
    /// attributes as they are now. Unknown or already finished ids are
    /// ignored.
    pub fn finish_span(&self, span_id: &str, timestamp_ms: i64, context: &AttributeMap) {
        let span = self
            .spans
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(span_id);

        let Some(mut span) = span else {
            debug!(span_id, "No open span with this id, ignoring finish");
            return;
        };

        for (key, value) in self.globals.merged_with(context) {
            span.set_tag(&key, TagValue::coerce(&value));
        }
        span.finish(timestamp_ms.saturating_mul(1000));
        debug!(span_id, "Span finished");
    }

    pub fn open_span_count(&self) -> usize {
        self.spans
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl fmt::Debug for DdTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DdTrace")
            .field("tracer", &self.tracer)
            .field("open_spans", &self.open_span_count())
            .finish()
    }
}
