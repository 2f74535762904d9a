#![cfg(feature = "desktop-shims")]

use std::sync::Arc;

use bridge_desktop::RumEvent;
use bridge_traits::clock::{Clock, FixedClock};
use bridge_traits::configuration::{DatadogSite, TrackingConsent};
use bridge_traits::logs::LogSeverity;
use bridge_traits::value::{attributes_from_json, AttributeMap, AttributeValue, TagValue};
use core_service::{bootstrap_desktop_with_clock, CoreError, DesktopBridge};
use serde_json::json;

fn desktop() -> (DesktopBridge, Arc<FixedClock>) {
    let clock = Arc::new(FixedClock::new(1_700_000_000_000));
    (bootstrap_desktop_with_clock(clock.clone()), clock)
}

const CONFIG: &str = r#"{
    "clientToken": "pub1234",
    "env": "staging",
    "applicationId": "app-1",
    "site": "us5",
    "trackingConsent": "granted",
    "manualTracingEnabled": true,
    "additionalConfig": {
        "_dd.service_name": "checkout",
        "_dd.sdk_verbosity": "info"
    }
}"#;

#[test]
fn test_initialize_reaches_desktop_sdk() {
    let (desktop, _) = desktop();

    desktop.bridge.initialize_json(CONFIG).unwrap();

    assert!(desktop.bridge.is_initialized());
    assert!(desktop.sdk.is_initialized());
    assert!(desktop.sdk.is_rum_registered());
    assert_eq!(desktop.sdk.consent(), Some(TrackingConsent::Granted));

    let credentials = desktop.sdk.credentials().unwrap();
    assert_eq!(credentials.service_name.as_deref(), Some("checkout"));
    let configuration = desktop.sdk.configuration().unwrap();
    assert_eq!(configuration.site, DatadogSite::Us5);
    assert!(configuration.traces_enabled);
}

#[test]
fn test_second_initialize_is_forwarded() {
    let (desktop, _) = desktop();
    desktop.bridge.initialize_json(CONFIG).unwrap();
    desktop.bridge.initialize_json(CONFIG).unwrap();

    assert_eq!(desktop.sdk.initialize_count(), 2);
    assert!(desktop.bridge.is_initialized());
}

#[test]
fn test_span_before_initialize_is_dropped() {
    let (desktop, _) = desktop();

    let early = desktop
        .bridge
        .trace()
        .start_span("boot", 1_000, &AttributeMap::new());
    assert_eq!(early, None);
    assert_eq!(desktop.bridge.trace().open_span_count(), 0);

    desktop.bridge.initialize_json(CONFIG).unwrap();
    let span_id = desktop
        .bridge
        .trace()
        .start_span("boot", 2_000, &AttributeMap::new())
        .unwrap();
    desktop
        .bridge
        .trace()
        .finish_span(&span_id, 2_100, &AttributeMap::new());
    assert_eq!(desktop.tracer.finished_spans().len(), 1);
}

#[test]
fn test_invalid_configuration_allows_retry() {
    let (desktop, _) = desktop();

    let err = desktop
        .bridge
        .initialize_json(r#"{"clientToken":"","env":"prod"}"#)
        .unwrap_err();
    assert!(matches!(err, CoreError::Runtime(_)));
    assert!(!desktop.bridge.is_initialized());

    desktop.bridge.initialize_json(CONFIG).unwrap();
    assert!(desktop.sdk.is_initialized());
}

#[test]
fn test_malformed_json_is_runtime_error() {
    let (desktop, _) = desktop();
    let err = desktop.bridge.initialize_json("{not json").unwrap_err();
    assert!(matches!(err, CoreError::Runtime(_)));
}

#[test]
fn test_global_attributes_flow_to_logs_spans_and_rum() {
    let (desktop, _) = desktop();
    desktop.bridge.initialize_json(CONFIG).unwrap();

    desktop
        .bridge
        .sdk()
        .set_attributes(&attributes_from_json(json!({"version": "1.0", "team": "web"})));

    desktop
        .bridge
        .logs()
        .warn("slow checkout", &attributes_from_json(json!({"version": "2.0"})));

    let records = desktop.logger.records();
    assert_eq!(records[0].severity, LogSeverity::Warn);
    assert_eq!(records[0].attributes["version"], AttributeValue::from("2.0"));
    assert_eq!(records[0].attributes["team"], AttributeValue::from("web"));

    let span_id = desktop
        .bridge
        .trace()
        .start_span("checkout", 1_000, &AttributeMap::new())
        .unwrap();
    desktop
        .bridge
        .trace()
        .finish_span(&span_id, 1_250, &attributes_from_json(json!({"ok": true})));

    let spans = desktop.tracer.finished_spans();
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].context.to_span_id(), span_id);
    assert_eq!(spans[0].duration_micros(), 250_000);
    assert_eq!(spans[0].tags["team"], TagValue::String("web".to_string()));
    assert_eq!(spans[0].tags["ok"], TagValue::Bool(true));

    assert_eq!(
        desktop.sdk.rum_global_attributes()["version"],
        AttributeValue::from("1.0")
    );
}

#[test]
fn test_rum_view_with_timing() {
    let (desktop, clock) = desktop();
    let rum = desktop.bridge.rum();
    let start = clock.now_millis();

    rum.start_view("home", "Home", &AttributeMap::new(), start);
    clock.advance_millis(120);
    rum.add_timing("hero_image");
    rum.stop_view("home", &AttributeMap::new(), start + 500);

    let events = desktop.rum_monitor.events();
    assert_eq!(
        events[0],
        RumEvent::Timing {
            view: "home".to_string(),
            name: "hero_image".to_string(),
            offset_ms: 120,
        }
    );
    assert!(matches!(
        &events[1],
        RumEvent::View { key, duration_ms: 500, .. } if key == "home"
    ));
}

#[test]
fn test_set_user_and_consent() {
    let (desktop, _) = desktop();
    desktop.bridge.initialize_json(CONFIG).unwrap();

    desktop.bridge.sdk().set_user(&attributes_from_json(json!({
        "id": 7,
        "email": "ann@example.com",
        "plan": "pro"
    })));
    desktop.bridge.sdk().set_tracking_consent("not_granted");

    let user = desktop.sdk.user();
    assert_eq!(user.id.as_deref(), Some("7"));
    assert_eq!(user.email.as_deref(), Some("ann@example.com"));
    assert_eq!(user.name, None);
    assert_eq!(user.extra_info.len(), 1);
    assert_eq!(desktop.sdk.consent(), Some(TrackingConsent::NotGranted));
}
