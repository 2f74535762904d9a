//! In-process RUM monitor.
//!
//! Tracks the active view, pending action and open resources the way the
//! native monitor does, and records each completed event. Event times come
//! from the `_dd.timestamp` attribute when present, otherwise from the clock.

use bridge_traits::{
    clock::Clock,
    rum::{RumActionType, RumErrorSource, RumMonitor, RumResourceKind, INTERNAL_TIMESTAMP},
    value::{AttributeMap, AttributeValue},
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info, warn};

use crate::history::History;

/// A RUM event as the desktop monitor recorded it.
#[derive(Debug, Clone, PartialEq)]
pub enum RumEvent {
    View {
        key: String,
        name: String,
        duration_ms: i64,
        attributes: AttributeMap,
    },
    Action {
        action_type: RumActionType,
        name: String,
        timestamp_ms: i64,
        attributes: AttributeMap,
    },
    Resource {
        key: String,
        method: String,
        url: String,
        status_code: i32,
        size: Option<u64>,
        kind: RumResourceKind,
        duration_ms: i64,
        attributes: AttributeMap,
    },
    Error {
        message: String,
        source: RumErrorSource,
        stacktrace: String,
        timestamp_ms: i64,
        attributes: AttributeMap,
    },
    Timing {
        view: String,
        name: String,
        offset_ms: i64,
    },
}

#[derive(Debug)]
struct ActiveView {
    key: String,
    name: String,
    started_ms: i64,
    attributes: AttributeMap,
}

#[derive(Debug)]
struct PendingAction {
    action_type: RumActionType,
    name: String,
    started_ms: i64,
    attributes: AttributeMap,
}

#[derive(Debug)]
struct OpenResource {
    method: String,
    url: String,
    started_ms: i64,
    attributes: AttributeMap,
}

#[derive(Debug, Default)]
struct MonitorState {
    view: Option<ActiveView>,
    action: Option<PendingAction>,
    resources: HashMap<String, OpenResource>,
    events: History<RumEvent>,
}

/// Desktop stand-in for the native global RUM monitor.
pub struct DesktopRumMonitor {
    clock: Arc<dyn Clock>,
    state: Mutex<MonitorState>,
}

impl DesktopRumMonitor {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            state: Mutex::new(MonitorState::default()),
        }
    }

    /// Monitor keeping at most `capacity` completed events.
    pub fn with_history(clock: Arc<dyn Clock>, capacity: usize) -> Self {
        let state = MonitorState {
            events: History::new(capacity),
            ..MonitorState::default()
        };
        Self {
            clock,
            state: Mutex::new(state),
        }
    }

    /// Completed events in the order they were recorded.
    pub fn events(&self) -> Vec<RumEvent> {
        self.lock().events.snapshot()
    }

    /// Take every kept event, oldest first.
    pub fn drain_events(&self) -> Vec<RumEvent> {
        self.lock().events.drain()
    }

    pub fn active_view(&self) -> Option<String> {
        self.lock().view.as_ref().map(|view| view.key.clone())
    }

    pub fn open_resources(&self) -> usize {
        self.lock().resources.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MonitorState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn event_time(&self, attributes: &AttributeMap) -> i64 {
        match attributes.get(INTERNAL_TIMESTAMP) {
            Some(AttributeValue::Int(timestamp)) => *timestamp,
            Some(AttributeValue::Float(timestamp)) => *timestamp as i64,
            _ => self.clock.now_millis(),
        }
    }
}

/// Attributes of a stop call layered over those of the matching start.
fn merge(mut base: AttributeMap, overlay: AttributeMap) -> AttributeMap {
    base.extend(overlay);
    base
}

impl RumMonitor for DesktopRumMonitor {
    fn start_view(&self, key: &str, name: &str, attributes: AttributeMap) {
        let started_ms = self.event_time(&attributes);
        let mut state = self.lock();
        if let Some(previous) = state.view.take() {
            // starting a view implicitly stops the current one
            let duration_ms = started_ms.saturating_sub(previous.started_ms);
            state.events.push(RumEvent::View {
                key: previous.key,
                name: previous.name,
                duration_ms,
                attributes: previous.attributes,
            });
        }
        state.view = Some(ActiveView {
            key: key.to_string(),
            name: name.to_string(),
            started_ms,
            attributes,
        });
        debug!(key, name, "View started");
    }

    fn stop_view(&self, key: &str, attributes: AttributeMap) {
        let stopped_ms = self.event_time(&attributes);
        let mut state = self.lock();
        let view = match state.view.take() {
            Some(view) if view.key == key => view,
            other => {
                state.view = other;
                warn!(key, "Stopping a view that is not active, ignoring");
                return;
            }
        };

        let duration_ms = stopped_ms.saturating_sub(view.started_ms);
        state.events.push(RumEvent::View {
            key: view.key,
            name: view.name.clone(),
            duration_ms,
            attributes: merge(view.attributes, attributes),
        });
        info!(key, name = %view.name, duration_ms, "View stopped");
    }

    fn start_user_action(&self, action_type: RumActionType, name: &str, attributes: AttributeMap) {
        let started_ms = self.event_time(&attributes);
        let mut state = self.lock();
        if state.action.is_some() {
            warn!(name, "An action is already pending, ignoring start");
            return;
        }
        state.action = Some(PendingAction {
            action_type,
            name: name.to_string(),
            started_ms,
            attributes,
        });
        debug!(?action_type, name, "Action started");
    }

    fn stop_user_action(&self, attributes: AttributeMap) {
        let mut state = self.lock();
        let Some(action) = state.action.take() else {
            warn!("No pending action to stop");
            return;
        };
        state.events.push(RumEvent::Action {
            action_type: action.action_type,
            name: action.name,
            timestamp_ms: action.started_ms,
            attributes: merge(action.attributes, attributes),
        });
    }

    fn add_user_action(&self, action_type: RumActionType, name: &str, attributes: AttributeMap) {
        let timestamp_ms = self.event_time(&attributes);
        self.lock().events.push(RumEvent::Action {
            action_type,
            name: name.to_string(),
            timestamp_ms,
            attributes,
        });
        debug!(?action_type, name, "Action added");
    }

    fn start_resource(&self, key: &str, method: &str, url: &str, attributes: AttributeMap) {
        let started_ms = self.event_time(&attributes);
        self.lock().resources.insert(
            key.to_string(),
            OpenResource {
                method: method.to_string(),
                url: url.to_string(),
                started_ms,
                attributes,
            },
        );
        debug!(key, method, url, "Resource started");
    }

    fn stop_resource(
        &self,
        key: &str,
        status_code: i32,
        size: Option<u64>,
        kind: RumResourceKind,
        attributes: AttributeMap,
    ) {
        let stopped_ms = self.event_time(&attributes);
        let mut state = self.lock();
        let Some(resource) = state.resources.remove(key) else {
            warn!(key, "Stopping an unknown resource, ignoring");
            return;
        };

        let duration_ms = stopped_ms.saturating_sub(resource.started_ms);
        state.events.push(RumEvent::Resource {
            key: key.to_string(),
            method: resource.method,
            url: resource.url,
            status_code,
            size,
            kind,
            duration_ms,
            attributes: merge(resource.attributes, attributes),
        });
        debug!(key, status_code, ?size, ?kind, duration_ms, "Resource stopped");
    }

    fn add_error_with_stacktrace(
        &self,
        message: &str,
        source: RumErrorSource,
        stacktrace: &str,
        attributes: AttributeMap,
    ) {
        let timestamp_ms = self.event_time(&attributes);
        self.lock().events.push(RumEvent::Error {
            message: message.to_string(),
            source,
            stacktrace: stacktrace.to_string(),
            timestamp_ms,
            attributes,
        });
        info!(message, ?source, "Error added");
    }

    fn add_timing(&self, name: &str) {
        let now = self.clock.now_millis();
        let mut state = self.lock();
        let Some(view) = state.view.as_ref() else {
            warn!(name, "No active view, timing dropped");
            return;
        };
        let event = RumEvent::Timing {
            view: view.key.clone(),
            name: name.to_string(),
            offset_ms: now.saturating_sub(view.started_ms),
        };
        state.events.push(event);
        debug!(name, "Timing added");
    }
}
