//! # RUM Event Forwarder
//!
//! Forwards host RUM calls to the native [`RumMonitor`].
//!
//! Every call carries a host timestamp in epoch milliseconds. It is attached
//! to the event attributes under [`INTERNAL_TIMESTAMP`] so the native SDK
//! back-dates the event; the host's own context never overrides it.
//! Loosely-typed enum strings are coerced to native enums, unknown values
//! fall back to a catch-all variant.

use std::sync::Arc;

use bridge_traits::clock::Clock;
use bridge_traits::rum::{
    RumActionType, RumErrorSource, RumMonitor, RumResourceKind, INTERNAL_TIMESTAMP,
};
use bridge_traits::value::{AttributeMap, AttributeValue};
use tracing::debug;

/// Case-insensitive action type, `Custom` when unknown.
pub fn as_action_type(raw: &str) -> RumActionType {
    match raw.to_ascii_lowercase().as_str() {
        "tap" => RumActionType::Tap,
        "scroll" => RumActionType::Scroll,
        "swipe" => RumActionType::Swipe,
        "click" => RumActionType::Click,
        _ => RumActionType::Custom,
    }
}

/// Case-insensitive resource kind, `Unknown` when unrecognized.
pub fn as_resource_kind(raw: &str) -> RumResourceKind {
    match raw.to_ascii_lowercase().as_str() {
        "xhr" => RumResourceKind::Xhr,
        "native" => RumResourceKind::Native,
        "fetch" => RumResourceKind::Fetch,
        "document" => RumResourceKind::Document,
        "beacon" => RumResourceKind::Beacon,
        "js" => RumResourceKind::Js,
        "image" => RumResourceKind::Image,
        "font" => RumResourceKind::Font,
        "css" => RumResourceKind::Css,
        "media" => RumResourceKind::Media,
        "other" => RumResourceKind::Other,
        _ => RumResourceKind::Unknown,
    }
}

/// Case-insensitive error source, `Source` when unknown.
pub fn as_error_source(raw: &str) -> RumErrorSource {
    match raw.to_ascii_lowercase().as_str() {
        "agent" => RumErrorSource::Agent,
        "console" => RumErrorSource::Console,
        "logger" => RumErrorSource::Logger,
        "network" => RumErrorSource::Network,
        "source" => RumErrorSource::Source,
        "webview" => RumErrorSource::WebView,
        _ => RumErrorSource::Source,
    }
}

/// Host-facing RUM entry points.
#[derive(Clone)]
pub struct DdRum {
    monitor: Arc<dyn RumMonitor>,
    clock: Arc<dyn Clock>,
}

impl DdRum {
    pub fn new(monitor: Arc<dyn RumMonitor>, clock: Arc<dyn Clock>) -> Self {
        Self { monitor, clock }
    }

    pub fn start_view(&self, key: &str, name: &str, context: &AttributeMap, timestamp_ms: i64) {
        self.trace_delta("start_view", timestamp_ms);
        self.monitor
            .start_view(key, name, with_timestamp(context, timestamp_ms));
    }

    pub fn stop_view(&self, key: &str, context: &AttributeMap, timestamp_ms: i64) {
        self.trace_delta("stop_view", timestamp_ms);
        self.monitor.stop_view(key, with_timestamp(context, timestamp_ms));
    }

    pub fn start_action(
        &self,
        action_type: &str,
        name: &str,
        context: &AttributeMap,
        timestamp_ms: i64,
    ) {
        self.trace_delta("start_action", timestamp_ms);
        self.monitor.start_user_action(
            as_action_type(action_type),
            name,
            with_timestamp(context, timestamp_ms),
        );
    }

    pub fn stop_action(&self, context: &AttributeMap, timestamp_ms: i64) {
        self.trace_delta("stop_action", timestamp_ms);
        self.monitor
            .stop_user_action(with_timestamp(context, timestamp_ms));
    }

    pub fn add_action(
        &self,
        action_type: &str,
        name: &str,
        context: &AttributeMap,
        timestamp_ms: i64,
    ) {
        self.trace_delta("add_action", timestamp_ms);
        self.monitor.add_user_action(
            as_action_type(action_type),
            name,
            with_timestamp(context, timestamp_ms),
        );
    }

    pub fn start_resource(
        &self,
        key: &str,
        method: &str,
        url: &str,
        context: &AttributeMap,
        timestamp_ms: i64,
    ) {
        self.trace_delta("start_resource", timestamp_ms);
        self.monitor
            .start_resource(key, method, url, with_timestamp(context, timestamp_ms));
    }

    /// Stop a resource.
    ///
    /// A negative `size` means the host did not know it and is forwarded as
    /// "unknown". The status code is clamped into the native `i32` range.
    pub fn stop_resource(
        &self,
        key: &str,
        status_code: i64,
        kind: &str,
        size: i64,
        context: &AttributeMap,
        timestamp_ms: i64,
    ) {
        self.trace_delta("stop_resource", timestamp_ms);
        let size = u64::try_from(size).ok();
        let status_code = status_code.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
        self.monitor.stop_resource(
            key,
            status_code,
            size,
            as_resource_kind(kind),
            with_timestamp(context, timestamp_ms),
        );
    }

    pub fn add_error(
        &self,
        message: &str,
        source: &str,
        stacktrace: &str,
        context: &AttributeMap,
        timestamp_ms: i64,
    ) {
        self.trace_delta("add_error", timestamp_ms);
        self.monitor.add_error_with_stacktrace(
            message,
            as_error_source(source),
            stacktrace,
            with_timestamp(context, timestamp_ms),
        );
    }

    pub fn add_timing(&self, name: &str) {
        self.monitor.add_timing(name);
    }

    fn trace_delta(&self, operation: &'static str, timestamp_ms: i64) {
        let now = self.clock.now_millis();
        debug!(
            operation,
            timestamp_ms,
            now_ms = now,
            delta_ms = now.saturating_sub(timestamp_ms),
            "Forwarding RUM event"
        );
    }
}

/// Context copy with the host timestamp attached last.
fn with_timestamp(context: &AttributeMap, timestamp_ms: i64) -> AttributeMap {
    let mut attributes = context.clone();
    attributes.insert(
        INTERNAL_TIMESTAMP.to_string(),
        AttributeValue::Int(timestamp_ms),
    );
    attributes
}
