//! RUM Monitor Abstraction
//!
//! Real-user-monitoring operations exposed by the native SDK's global monitor.

use crate::{platform::PlatformSendSync, value::AttributeMap};

/// Reserved attribute carrying the caller-supplied event time (epoch ms).
pub const INTERNAL_TIMESTAMP: &str = "_dd.timestamp";

/// User action type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RumActionType {
    Tap,
    Scroll,
    Swipe,
    Click,
    Custom,
}

/// Resource kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RumResourceKind {
    Xhr,
    Native,
    Fetch,
    Document,
    Beacon,
    Js,
    Image,
    Font,
    Css,
    Media,
    Other,
    Unknown,
}

/// Error source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RumErrorSource {
    Agent,
    Console,
    Logger,
    Network,
    Source,
    WebView,
}

/// Native RUM monitor.
///
/// Every call mutates the monitor's view/action/resource lifecycle. Failures
/// inside the monitor stay inside it, so the operations return nothing.
pub trait RumMonitor: PlatformSendSync {
    fn start_view(&self, key: &str, name: &str, attributes: AttributeMap);

    fn stop_view(&self, key: &str, attributes: AttributeMap);

    fn start_user_action(&self, action_type: RumActionType, name: &str, attributes: AttributeMap);

    fn stop_user_action(&self, attributes: AttributeMap);

    fn add_user_action(&self, action_type: RumActionType, name: &str, attributes: AttributeMap);

    fn start_resource(&self, key: &str, method: &str, url: &str, attributes: AttributeMap);

    fn stop_resource(
        &self,
        key: &str,
        status_code: i32,
        size: Option<u64>,
        kind: RumResourceKind,
        attributes: AttributeMap,
    );

    fn add_error_with_stacktrace(
        &self,
        message: &str,
        source: RumErrorSource,
        stacktrace: &str,
        attributes: AttributeMap,
    );

    /// Record a named timing relative to the active view's start.
    fn add_timing(&self, name: &str);
}
