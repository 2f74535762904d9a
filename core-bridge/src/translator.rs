//! # Configuration Translator
//!
//! Turns the host's [`BridgeConfiguration`] into the native SDK's
//! [`Credentials`] and [`Configuration`].
//!
//! Nothing in here fails. Every absent or malformed input degrades to a
//! documented default; unrecognized enum-like strings (consent, proxy type,
//! verbosity) additionally produce a warning.
//!
//! | Input | Default |
//! |-------|---------|
//! | `sampleRate` | native default (100) |
//! | `nativeCrashReportEnabled` | `false` |
//! | `manualTracingEnabled` | traces disabled |
//! | `site` | US1 |
//! | `trackingConsent` | PENDING |
//! | view tracking key | no-op strategy |
//! | verbosity key | left untouched |

use std::sync::Arc;
use std::time::Duration;

use bridge_traits::configuration::{
    Configuration, Credentials, DatadogSite, ProxyAuthenticator, ProxyConfiguration, ProxyType,
    TrackingConsent, Verbosity, ViewTrackingStrategy,
};
use bridge_traits::value::{AttributeMap, AttributeValue};
use core_runtime::config::{keys, BridgeConfiguration};
use core_runtime::logging::redact_if_sensitive;
use serde_json::Value;
use tracing::{debug, warn};

use crate::consent::resolve_consent;
use crate::proxy::BasicProxyAuthenticator;

/// Proxy settings extracted from `additionalConfig`.
pub type ProxySetup = (ProxyConfiguration, Option<Arc<dyn ProxyAuthenticator>>);

const PROXY_KEYS: &[&str] = &[
    keys::PROXY_ADDRESS,
    keys::PROXY_PORT,
    keys::PROXY_TYPE,
    keys::PROXY_USERNAME,
    keys::PROXY_PASSWORD,
];

pub fn build_credentials(config: &BridgeConfiguration) -> Credentials {
    Credentials {
        client_token: config.client_token.clone(),
        env_name: config.env.clone(),
        rum_application_id: config.application_id.clone(),
        variant: String::new(),
        service_name: config.additional_str(keys::SERVICE_NAME).map(str::to_string),
    }
}

pub fn build_configuration(config: &BridgeConfiguration) -> Configuration {
    let traces_enabled = config.manual_tracing_enabled.unwrap_or(false);
    let crash_reports_enabled = config.native_crash_report_enabled.unwrap_or(false);

    let mut builder = Configuration::builder(true, traces_enabled, crash_reports_enabled, true)
        .set_additional_configuration(build_additional_configuration(config))
        .use_site(resolve_site(config.site.as_deref()))
        .use_view_tracking_strategy(build_view_tracking_strategy(config));

    if let Some(sample_rate) = config.sample_rate {
        builder = builder.sample_rum_sessions(sample_rate as f32);
    }

    if let Some(threshold) = config.additional_f64(keys::LONG_TASK_THRESHOLD) {
        builder = builder.track_long_tasks(Duration::from_millis(threshold as u64));
    }

    if let Some(hosts) = build_first_party_hosts(config) {
        builder = builder.set_first_party_hosts(hosts);
    }

    if let Some((proxy, authenticator)) = build_proxy_configuration(config) {
        builder = builder.set_proxy(proxy, authenticator);
    }

    builder.build()
}

pub fn build_tracking_consent(raw: Option<&str>) -> TrackingConsent {
    resolve_consent(raw)
}

/// Native verbosity from the reserved key, if it names a known level.
pub fn build_verbosity(config: &BridgeConfiguration) -> Option<Verbosity> {
    let raw = config.additional_str(keys::SDK_VERBOSITY)?;
    let verbosity = resolve_verbosity(raw);
    if verbosity.is_none() {
        warn!(
            verbosity = raw,
            "Unknown SDK verbosity, leaving native verbosity unchanged"
        );
    }
    verbosity
}

pub fn resolve_verbosity(raw: &str) -> Option<Verbosity> {
    match raw.to_ascii_lowercase().as_str() {
        "debug" => Some(Verbosity::Debug),
        "info" => Some(Verbosity::Info),
        "warn" => Some(Verbosity::Warn),
        "error" => Some(Verbosity::Error),
        _ => None,
    }
}

/// Case-insensitive site lookup, US1 when absent or unknown.
pub fn resolve_site(raw: Option<&str>) -> DatadogSite {
    let Some(raw) = raw else {
        return DatadogSite::Us1;
    };

    match raw.to_ascii_lowercase().as_str() {
        "us1" | "us" => DatadogSite::Us1,
        "eu1" | "eu" => DatadogSite::Eu1,
        "us3" => DatadogSite::Us3,
        "us5" => DatadogSite::Us5,
        "us1_fed" | "gov" => DatadogSite::Us1Fed,
        _ => {
            warn!(site = raw, "Unknown site, using US1");
            DatadogSite::Us1
        }
    }
}

pub fn resolve_proxy_type(raw: &str) -> Option<ProxyType> {
    match raw.to_ascii_lowercase().as_str() {
        "http" | "https" => Some(ProxyType::Http),
        "socks" => Some(ProxyType::Socks),
        _ => None,
    }
}

/// Proxy and optional authenticator from the reserved proxy keys.
///
/// Returns `None` unless address, port and a recognized type are all present.
/// An authenticator is attached only when both username and password are set.
pub fn build_proxy_configuration(config: &BridgeConfiguration) -> Option<ProxySetup> {
    if PROXY_KEYS.iter().all(|key| config.additional(key).is_none()) {
        return None;
    }

    let address = config.additional_str(keys::PROXY_ADDRESS);
    let port = config.additional(keys::PROXY_PORT).and_then(parse_port);
    let raw_type = config.additional_str(keys::PROXY_TYPE);

    let (Some(address), Some(port), Some(raw_type)) = (address, port, raw_type) else {
        warn!(
            address = address.unwrap_or("<absent>"),
            port = ?port,
            proxy_type = raw_type.unwrap_or("<absent>"),
            "Incomplete proxy configuration, proxy not configured"
        );
        return None;
    };

    let Some(proxy_type) = resolve_proxy_type(raw_type) else {
        warn!(
            proxy_type = raw_type,
            "Unknown proxy type, proxy not configured"
        );
        return None;
    };

    let proxy = ProxyConfiguration {
        proxy_type,
        address: address.to_string(),
        port,
    };

    let username = config.additional_str(keys::PROXY_USERNAME);
    let password = config.additional_str(keys::PROXY_PASSWORD);
    let authenticator: Option<Arc<dyn ProxyAuthenticator>> = match (username, password) {
        (Some(username), Some(password)) => {
            debug!(
                username = %redact_if_sensitive("proxy_username", username),
                "Proxy authentication configured"
            );
            Some(Arc::new(BasicProxyAuthenticator::new(username, password)))
        }
        _ => None,
    };

    Some((proxy, authenticator))
}

fn parse_port(value: &Value) -> Option<u16> {
    match value {
        Value::Number(number) => number.as_u64().and_then(|port| u16::try_from(port).ok()),
        Value::String(raw) => raw.trim().parse().ok(),
        _ => None,
    }
}

fn build_view_tracking_strategy(config: &BridgeConfiguration) -> ViewTrackingStrategy {
    if config.additional_bool(keys::NATIVE_VIEW_TRACKING) == Some(true) {
        ViewTrackingStrategy::Activity {
            track_extras: false,
        }
    } else {
        ViewTrackingStrategy::NoOp
    }
}

fn build_first_party_hosts(config: &BridgeConfiguration) -> Option<Vec<String>> {
    let hosts = config.additional(keys::FIRST_PARTY_HOSTS)?.as_array()?;
    Some(
        hosts
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
    )
}

/// `additionalConfig` with null entries dropped.
fn build_additional_configuration(config: &BridgeConfiguration) -> AttributeMap {
    config
        .additional_config
        .iter()
        .flatten()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| (key.clone(), AttributeValue::from(value.clone())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_traits::configuration::{ProxyChallenge, DEFAULT_SAMPLE_RATE};
    use serde_json::json;

    fn base() -> core_runtime::BridgeConfigurationBuilder {
        BridgeConfiguration::builder("pub1234", "prod")
    }

    #[test]
    fn test_credentials() {
        let config = base()
            .application_id("app-id")
            .additional_config(keys::SERVICE_NAME, "checkout")
            .build()
            .unwrap();

        let credentials = build_credentials(&config);

        assert_eq!(credentials.client_token, "pub1234");
        assert_eq!(credentials.env_name, "prod");
        assert_eq!(credentials.rum_application_id.as_deref(), Some("app-id"));
        assert_eq!(credentials.variant, "");
        assert_eq!(credentials.service_name.as_deref(), Some("checkout"));
    }

    #[test]
    fn test_credentials_without_service_name() {
        let config = base().build().unwrap();
        let credentials = build_credentials(&config);
        assert_eq!(credentials.service_name, None);
        assert_eq!(credentials.rum_application_id, None);
    }

    #[test]
    fn test_configuration_defaults() {
        let config = base().build().unwrap();
        let configuration = build_configuration(&config);

        assert!(configuration.logs_enabled);
        assert!(configuration.rum_enabled);
        assert!(!configuration.traces_enabled);
        assert!(!configuration.crash_reports_enabled);
        assert_eq!(configuration.site, DatadogSite::Us1);
        assert_eq!(configuration.rum_sample_rate, DEFAULT_SAMPLE_RATE);
        assert_eq!(configuration.view_tracking_strategy, ViewTrackingStrategy::NoOp);
        assert_eq!(configuration.long_task_threshold, None);
        assert!(configuration.first_party_hosts.is_empty());
        assert!(configuration.proxy.is_none());
        assert!(configuration.additional_config.is_empty());
    }

    #[test]
    fn test_configuration_flags() {
        let config = base()
            .manual_tracing_enabled(true)
            .native_crash_report_enabled(true)
            .sample_rate(25.5)
            .build()
            .unwrap();
        let configuration = build_configuration(&config);

        assert!(configuration.traces_enabled);
        assert!(configuration.crash_reports_enabled);
        assert_eq!(configuration.rum_sample_rate, 25.5);
    }

    #[test]
    fn test_manual_tracing_false_disables_traces() {
        let config = base().manual_tracing_enabled(false).build().unwrap();
        assert!(!build_configuration(&config).traces_enabled);
    }

    #[test]
    fn test_additional_configuration_drops_nulls() {
        let config = base()
            .additional_config("custom", "value")
            .additional_config("number", 3)
            .additional_config("gone", Value::Null)
            .additional_config(keys::SERVICE_NAME, "svc")
            .build()
            .unwrap();
        let additional = build_configuration(&config).additional_config;

        assert_eq!(additional.len(), 3);
        assert_eq!(additional["custom"], AttributeValue::from("value"));
        assert_eq!(additional["number"], AttributeValue::Int(3));
        assert_eq!(additional[keys::SERVICE_NAME], AttributeValue::from("svc"));
        assert!(!additional.contains_key("gone"));
    }

    #[test]
    fn test_site_resolution() {
        assert_eq!(resolve_site(None), DatadogSite::Us1);
        assert_eq!(resolve_site(Some("US1")), DatadogSite::Us1);
        assert_eq!(resolve_site(Some("us")), DatadogSite::Us1);
        assert_eq!(resolve_site(Some("EU")), DatadogSite::Eu1);
        assert_eq!(resolve_site(Some("eu1")), DatadogSite::Eu1);
        assert_eq!(resolve_site(Some("us3")), DatadogSite::Us3);
        assert_eq!(resolve_site(Some("US5")), DatadogSite::Us5);
        assert_eq!(resolve_site(Some("us1_fed")), DatadogSite::Us1Fed);
        assert_eq!(resolve_site(Some("GOV")), DatadogSite::Us1Fed);
        assert_eq!(resolve_site(Some("mars")), DatadogSite::Us1);
    }

    #[derive(Default)]
    struct LevelRecorder {
        levels: Arc<std::sync::Mutex<Vec<tracing::Level>>>,
    }

    impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for LevelRecorder {
        fn on_event(
            &self,
            event: &tracing::Event<'_>,
            _ctx: tracing_subscriber::layer::Context<'_, S>,
        ) {
            self.levels.lock().unwrap().push(*event.metadata().level());
        }
    }

    #[test]
    fn test_unknown_site_warns() {
        use tracing_subscriber::layer::SubscriberExt;

        let recorder = LevelRecorder::default();
        let levels = Arc::clone(&recorder.levels);
        let subscriber = tracing_subscriber::registry().with(recorder);

        tracing::subscriber::with_default(subscriber, || {
            assert_eq!(resolve_site(Some("eu")), DatadogSite::Eu1);
            assert_eq!(resolve_site(Some("mars")), DatadogSite::Us1);
        });

        assert_eq!(*levels.lock().unwrap(), vec![tracing::Level::WARN]);
    }

    #[test]
    fn test_verbosity() {
        for (raw, expected) in [
            ("debug", Verbosity::Debug),
            ("INFO", Verbosity::Info),
            ("Warn", Verbosity::Warn),
            ("error", Verbosity::Error),
        ] {
            let config = base()
                .additional_config(keys::SDK_VERBOSITY, raw)
                .build()
                .unwrap();
            assert_eq!(build_verbosity(&config), Some(expected));
        }
    }

    #[test]
    fn test_verbosity_unknown_or_absent() {
        let config = base()
            .additional_config(keys::SDK_VERBOSITY, "verbose")
            .build()
            .unwrap();
        assert_eq!(build_verbosity(&config), None);

        let config = base()
            .additional_config(keys::SDK_VERBOSITY, 4)
            .build()
            .unwrap();
        assert_eq!(build_verbosity(&config), None);

        assert_eq!(build_verbosity(&base().build().unwrap()), None);
    }

    #[test]
    fn test_view_tracking() {
        let enabled = base()
            .additional_config(keys::NATIVE_VIEW_TRACKING, true)
            .build()
            .unwrap();
        assert_eq!(
            build_configuration(&enabled).view_tracking_strategy,
            ViewTrackingStrategy::Activity {
                track_extras: false
            }
        );

        let disabled = base()
            .additional_config(keys::NATIVE_VIEW_TRACKING, false)
            .build()
            .unwrap();
        assert_eq!(
            build_configuration(&disabled).view_tracking_strategy,
            ViewTrackingStrategy::NoOp
        );
    }

    #[test]
    fn test_long_task_threshold() {
        let config = base()
            .additional_config(keys::LONG_TASK_THRESHOLD, 250.7)
            .build()
            .unwrap();
        assert_eq!(
            build_configuration(&config).long_task_threshold,
            Some(Duration::from_millis(250))
        );
    }

    #[test]
    fn test_first_party_hosts() {
        let config = base()
            .additional_config(
                keys::FIRST_PARTY_HOSTS,
                json!(["api.example.com", 3, "cdn.example.com"]),
            )
            .build()
            .unwrap();
        assert_eq!(
            build_configuration(&config).first_party_hosts,
            vec!["api.example.com".to_string(), "cdn.example.com".to_string()]
        );
    }

    #[test]
    fn test_proxy_absent() {
        assert!(build_proxy_configuration(&base().build().unwrap()).is_none());
    }

    #[test]
    fn test_proxy_socks_without_credentials() {
        let config = base()
            .additional_config(keys::PROXY_ADDRESS, "proxy.local")
            .additional_config(keys::PROXY_PORT, 8080)
            .additional_config(keys::PROXY_TYPE, "socks")
            .additional_config(keys::PROXY_USERNAME, Value::Null)
            .build()
            .unwrap();

        let (proxy, authenticator) = build_proxy_configuration(&config).unwrap();

        assert_eq!(proxy.proxy_type, ProxyType::Socks);
        assert_eq!(proxy.address, "proxy.local");
        assert_eq!(proxy.port, 8080);
        assert!(authenticator.is_none());
    }

    #[test]
    fn test_proxy_with_credentials() {
        let config = base()
            .additional_config(keys::PROXY_ADDRESS, "proxy.local")
            .additional_config(keys::PROXY_PORT, "3128")
            .additional_config(keys::PROXY_TYPE, "HTTPS")
            .additional_config(keys::PROXY_USERNAME, "user")
            .additional_config(keys::PROXY_PASSWORD, "pass")
            .build()
            .unwrap();

        let configuration = build_configuration(&config);
        let proxy = configuration.proxy.as_ref().unwrap();
        assert_eq!(proxy.proxy_type, ProxyType::Http);
        assert_eq!(proxy.port, 3128);

        let authenticator = configuration.proxy_authenticator.as_ref().unwrap();
        let challenge = ProxyChallenge {
            scheme: "Basic".to_string(),
            charset: None,
        };
        assert_eq!(
            authenticator.authenticate(407, &[challenge]),
            Some("Basic dXNlcjpwYXNz".to_string())
        );
    }

    #[test]
    fn test_proxy_username_without_password() {
        let config = base()
            .additional_config(keys::PROXY_ADDRESS, "proxy.local")
            .additional_config(keys::PROXY_PORT, 8080)
            .additional_config(keys::PROXY_TYPE, "http")
            .additional_config(keys::PROXY_USERNAME, "user")
            .build()
            .unwrap();

        let (_, authenticator) = build_proxy_configuration(&config).unwrap();
        assert!(authenticator.is_none());
    }

    #[test]
    fn test_proxy_unknown_type_is_skipped() {
        let config = base()
            .additional_config(keys::PROXY_ADDRESS, "proxy.local")
            .additional_config(keys::PROXY_PORT, 8080)
            .additional_config(keys::PROXY_TYPE, "ftp")
            .build()
            .unwrap();

        assert!(build_proxy_configuration(&config).is_none());
        assert!(build_configuration(&config).proxy.is_none());
    }

    #[test]
    fn test_proxy_incomplete_is_skipped() {
        let missing_port = base()
            .additional_config(keys::PROXY_ADDRESS, "proxy.local")
            .additional_config(keys::PROXY_TYPE, "http")
            .build()
            .unwrap();
        assert!(build_proxy_configuration(&missing_port).is_none());

        let bad_port = base()
            .additional_config(keys::PROXY_ADDRESS, "proxy.local")
            .additional_config(keys::PROXY_PORT, 70000)
            .additional_config(keys::PROXY_TYPE, "http")
            .build()
            .unwrap();
        assert!(build_proxy_configuration(&bad_port).is_none());
    }

    #[test]
    fn test_proxy_type_resolution() {
        assert_eq!(resolve_proxy_type("http"), Some(ProxyType::Http));
        assert_eq!(resolve_proxy_type("HTTPS"), Some(ProxyType::Http));
        assert_eq!(resolve_proxy_type("Socks"), Some(ProxyType::Socks));
        assert_eq!(resolve_proxy_type("socks5"), None);
    }
}
