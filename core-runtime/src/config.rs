//! # Bridge Configuration
//!
//! The flat configuration record a host passes to `initialize`.
//!
//! ## Overview
//!
//! Hosts usually hand the configuration over as JSON (camelCase field names,
//! as produced by a scripting runtime). [`BridgeConfiguration::from_json`]
//! decodes and validates it; Rust hosts can use the builder instead. The
//! record is immutable once built and is consumed once by the configuration
//! translator.
//!
//! ## Usage
//!
//! ```
//! use core_runtime::config::BridgeConfiguration;
//!
//! let config = BridgeConfiguration::from_json(
//!     r#"{"clientToken":"pub1234","env":"prod","site":"EU","sampleRate":50.0}"#,
//! )
//! .expect("valid configuration");
//! assert_eq!(config.site.as_deref(), Some("EU"));
//! ```
//!
//! ```
//! use core_runtime::config::{keys, BridgeConfiguration};
//!
//! let config = BridgeConfiguration::builder("pub1234", "staging")
//!     .application_id("app-id")
//!     .additional_config(keys::SERVICE_NAME, "checkout")
//!     .build()
//!     .expect("valid configuration");
//! assert_eq!(config.env, "staging");
//! ```
//!
//! ## Additional configuration
//!
//! `additionalConfig` is a free-form map. A closed set of keys (see [`keys`])
//! forms a private sub-protocol read by the translator; every other non-null
//! entry is forwarded to the native SDK untouched.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Reserved `additionalConfig` keys.
pub mod keys {
    /// SDK internal verbosity: "debug" | "info" | "warn" | "error".
    pub const SDK_VERBOSITY: &str = "_dd.sdk_verbosity";
    /// Service name override for the credentials.
    pub const SERVICE_NAME: &str = "_dd.service_name";
    /// Long-task threshold in milliseconds.
    pub const LONG_TASK_THRESHOLD: &str = "_dd.long_task.threshold";
    /// List of first-party host names.
    pub const FIRST_PARTY_HOSTS: &str = "_dd.first_party_hosts";
    /// Enables native activity-based view tracking.
    pub const NATIVE_VIEW_TRACKING: &str = "_dd.native_view_tracking";
    pub const PROXY_ADDRESS: &str = "_dd.proxy.address";
    pub const PROXY_PORT: &str = "_dd.proxy.port";
    /// "http" | "https" | "socks".
    pub const PROXY_TYPE: &str = "_dd.proxy.type";
    pub const PROXY_USERNAME: &str = "_dd.proxy.username";
    pub const PROXY_PASSWORD: &str = "_dd.proxy.password";
}

/// Host-side configuration record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeConfiguration {
    pub client_token: String,
    pub env: String,
    #[serde(default)]
    pub application_id: Option<String>,
    /// Case-insensitive site token, e.g. "us1", "eu1", "gov".
    #[serde(default)]
    pub site: Option<String>,
    /// RUM session sample rate, 0 to 100.
    #[serde(default)]
    pub sample_rate: Option<f64>,
    #[serde(default)]
    pub native_crash_report_enabled: Option<bool>,
    #[serde(default)]
    pub tracking_consent: Option<String>,
    #[serde(default)]
    pub manual_tracing_enabled: Option<bool>,
    #[serde(default)]
    pub additional_config: Option<Map<String, Value>>,
}

impl BridgeConfiguration {
    /// Creates a builder with the two required fields.
    pub fn builder(
        client_token: impl Into<String>,
        env: impl Into<String>,
    ) -> BridgeConfigurationBuilder {
        BridgeConfigurationBuilder::new(client_token, env)
    }

    /// Decode a configuration from host JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: BridgeConfiguration = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Decode a configuration from an already parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        let config: BridgeConfiguration = serde_json::from_value(value)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the fields the native SDK cannot start without.
    pub fn validate(&self) -> Result<()> {
        if self.client_token.trim().is_empty() {
            return Err(Error::InvalidConfiguration {
                field: "clientToken".to_string(),
                message: "client token cannot be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Looks up an `additionalConfig` entry, treating JSON null as absent.
    pub fn additional(&self, key: &str) -> Option<&Value> {
        self.additional_config
            .as_ref()
            .and_then(|map| map.get(key))
            .filter(|value| !value.is_null())
    }

    /// String entry of `additionalConfig`.
    pub fn additional_str(&self, key: &str) -> Option<&str> {
        self.additional(key).and_then(Value::as_str)
    }

    /// Boolean entry of `additionalConfig`.
    pub fn additional_bool(&self, key: &str) -> Option<bool> {
        self.additional(key).and_then(Value::as_bool)
    }

    /// Numeric entry of `additionalConfig`.
    pub fn additional_f64(&self, key: &str) -> Option<f64> {
        self.additional(key).and_then(Value::as_f64)
    }
}

/// Builder for [`BridgeConfiguration`].
#[derive(Debug, Clone)]
pub struct BridgeConfigurationBuilder {
    config: BridgeConfiguration,
}

impl BridgeConfigurationBuilder {
    fn new(client_token: impl Into<String>, env: impl Into<String>) -> Self {
        Self {
            config: BridgeConfiguration {
                client_token: client_token.into(),
                env: env.into(),
                application_id: None,
                site: None,
                sample_rate: None,
                native_crash_report_enabled: None,
                tracking_consent: None,
                manual_tracing_enabled: None,
                additional_config: None,
            },
        }
    }

    pub fn application_id(mut self, application_id: impl Into<String>) -> Self {
        self.config.application_id = Some(application_id.into());
        self
    }

    pub fn site(mut self, site: impl Into<String>) -> Self {
        self.config.site = Some(site.into());
        self
    }

    pub fn sample_rate(mut self, sample_rate: f64) -> Self {
        self.config.sample_rate = Some(sample_rate);
        self
    }

    pub fn native_crash_report_enabled(mut self, enabled: bool) -> Self {
        self.config.native_crash_report_enabled = Some(enabled);
        self
    }

    pub fn tracking_consent(mut self, consent: impl Into<String>) -> Self {
        self.config.tracking_consent = Some(consent.into());
        self
    }

    pub fn manual_tracing_enabled(mut self, enabled: bool) -> Self {
        self.config.manual_tracing_enabled = Some(enabled);
        self
    }

    /// Adds one `additionalConfig` entry.
    pub fn additional_config(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.config
            .additional_config
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> Result<BridgeConfiguration> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_minimal() {
        let config = BridgeConfiguration::from_json(r#"{"clientToken":"pub1234","env":"prod"}"#)
            .unwrap();

        assert_eq!(config.client_token, "pub1234");
        assert_eq!(config.env, "prod");
        assert_eq!(config.application_id, None);
        assert_eq!(config.site, None);
        assert_eq!(config.sample_rate, None);
        assert_eq!(config.native_crash_report_enabled, None);
        assert_eq!(config.tracking_consent, None);
        assert_eq!(config.manual_tracing_enabled, None);
        assert_eq!(config.additional_config, None);
    }

    #[test]
    fn test_from_json_full() {
        let config = BridgeConfiguration::from_value(json!({
            "clientToken": "pub1234",
            "env": "prod",
            "applicationId": null,
            "site": "EU",
            "sampleRate": 50.0,
            "nativeCrashReportEnabled": true,
            "trackingConsent": "granted",
            "manualTracingEnabled": false,
            "additionalConfig": {"_dd.service_name": "shop", "custom": 1}
        }))
        .unwrap();

        assert_eq!(config.application_id, None);
        assert_eq!(config.site.as_deref(), Some("EU"));
        assert_eq!(config.sample_rate, Some(50.0));
        assert_eq!(config.native_crash_report_enabled, Some(true));
        assert_eq!(config.tracking_consent.as_deref(), Some("granted"));
        assert_eq!(config.manual_tracing_enabled, Some(false));
        assert_eq!(config.additional_str(keys::SERVICE_NAME), Some("shop"));
        assert_eq!(config.additional_f64("custom"), Some(1.0));
    }

    #[test]
    fn test_from_json_rejects_empty_client_token() {
        let err = BridgeConfiguration::from_json(r#"{"clientToken":"  ","env":"prod"}"#)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidConfiguration { ref field, .. } if field == "clientToken"
        ));
    }

    #[test]
    fn test_from_json_rejects_malformed_input() {
        let err = BridgeConfiguration::from_json(r#"{"env":"prod"}"#).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_additional_treats_null_as_absent() {
        let config = BridgeConfiguration::builder("pub1234", "prod")
            .additional_config(keys::SDK_VERBOSITY, Value::Null)
            .build()
            .unwrap();

        assert!(config.additional_config.as_ref().unwrap().contains_key(keys::SDK_VERBOSITY));
        assert_eq!(config.additional(keys::SDK_VERBOSITY), None);
    }

    #[test]
    fn test_typed_accessors_ignore_mismatched_types() {
        let config = BridgeConfiguration::builder("pub1234", "prod")
            .additional_config(keys::NATIVE_VIEW_TRACKING, "yes")
            .additional_config(keys::LONG_TASK_THRESHOLD, "100")
            .build()
            .unwrap();

        assert_eq!(config.additional_bool(keys::NATIVE_VIEW_TRACKING), None);
        assert_eq!(config.additional_f64(keys::LONG_TASK_THRESHOLD), None);
    }

    #[test]
    fn test_builder() {
        let config = BridgeConfiguration::builder("pub1234", "prod")
            .application_id("app")
            .site("us3")
            .sample_rate(12.0)
            .native_crash_report_enabled(true)
            .tracking_consent("pending")
            .manual_tracing_enabled(true)
            .build()
            .unwrap();

        assert_eq!(config.application_id.as_deref(), Some("app"));
        assert_eq!(config.site.as_deref(), Some("us3"));
        assert_eq!(config.sample_rate, Some(12.0));
        assert_eq!(config.native_crash_report_enabled, Some(true));
        assert_eq!(config.tracking_consent.as_deref(), Some("pending"));
        assert_eq!(config.manual_tracing_enabled, Some(true));
    }

    #[test]
    fn test_builder_requires_client_token() {
        assert!(BridgeConfiguration::builder("", "prod").build().is_err());
    }
}
