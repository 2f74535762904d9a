//! Native SDK Configuration Model
//!
//! Strongly-typed credentials and configuration handed to
//! [`NativeSdk::initialize`](crate::sdk::NativeSdk::initialize).
//!
//! The bridge builds these values from the loosely-typed host configuration;
//! nothing in here is parsed from strings.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::value::AttributeMap;

/// Default RUM session sampling rate applied when the host gives none.
pub const DEFAULT_SAMPLE_RATE: f32 = 100.0;

/// Credentials identifying the client application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_token: String,
    pub env_name: String,
    pub rum_application_id: Option<String>,
    pub variant: String,
    pub service_name: Option<String>,
}

/// User data-collection authorization state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackingConsent {
    Pending,
    Granted,
    NotGranted,
}

/// Native SDK internal log verbosity.
///
/// Values mirror the platform log priorities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Debug = 3,
    Info = 4,
    Warn = 5,
    Error = 6,
}

/// Upload endpoints for one data-residency region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiteEndpoints {
    pub logs: &'static str,
    pub traces: &'static str,
    pub rum: &'static str,
}

/// Data-residency region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DatadogSite {
    #[default]
    Us1,
    Us3,
    Us5,
    Eu1,
    Us1Fed,
}

impl DatadogSite {
    /// Endpoints used by the logs, traces and RUM features for this region.
    pub fn endpoints(&self) -> SiteEndpoints {
        match self {
            DatadogSite::Us1 => SiteEndpoints {
                logs: "https://logs.browser-intake-datadoghq.com",
                traces: "https://trace.browser-intake-datadoghq.com",
                rum: "https://rum.browser-intake-datadoghq.com",
            },
            DatadogSite::Us3 => SiteEndpoints {
                logs: "https://logs.browser-intake-us3-datadoghq.com",
                traces: "https://trace.browser-intake-us3-datadoghq.com",
                rum: "https://rum.browser-intake-us3-datadoghq.com",
            },
            DatadogSite::Us5 => SiteEndpoints {
                logs: "https://logs.browser-intake-us5-datadoghq.com",
                traces: "https://trace.browser-intake-us5-datadoghq.com",
                rum: "https://rum.browser-intake-us5-datadoghq.com",
            },
            DatadogSite::Eu1 => SiteEndpoints {
                logs: "https://mobile-http-intake.logs.datadoghq.eu",
                traces: "https://public-trace-http-intake.logs.datadoghq.eu",
                rum: "https://rum-http-intake.logs.datadoghq.eu",
            },
            DatadogSite::Us1Fed => SiteEndpoints {
                logs: "https://logs.browser-intake-ddog-gov.com",
                traces: "https://trace.browser-intake-ddog-gov.com",
                rum: "https://rum.browser-intake-ddog-gov.com",
            },
        }
    }
}

/// How RUM views are tracked automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewTrackingStrategy {
    /// No automatic tracking; the host reports views itself.
    #[default]
    NoOp,
    /// Track every foreground activity as a view.
    Activity { track_extras: bool },
}

/// Proxy protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProxyType {
    Http,
    Socks,
}

/// Proxy used for telemetry uploads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyConfiguration {
    pub proxy_type: ProxyType,
    pub address: String,
    pub port: u16,
}

/// Authentication challenge sent by a proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyChallenge {
    pub scheme: String,
    pub charset: Option<String>,
}

/// Answers proxy authentication challenges on behalf of the native SDK.
pub trait ProxyAuthenticator: fmt::Debug + Send + Sync {
    /// Returns the `Proxy-Authorization` header value to retry with, or
    /// `None` to give up.
    fn authenticate(&self, status_code: u16, challenges: &[ProxyChallenge]) -> Option<String>;
}

/// Native SDK configuration.
///
/// Construct through [`Configuration::builder`].
#[derive(Debug, Clone)]
pub struct Configuration {
    pub logs_enabled: bool,
    pub traces_enabled: bool,
    pub crash_reports_enabled: bool,
    pub rum_enabled: bool,
    pub site: DatadogSite,
    pub rum_sample_rate: f32,
    pub view_tracking_strategy: ViewTrackingStrategy,
    pub long_task_threshold: Option<Duration>,
    pub first_party_hosts: Vec<String>,
    pub proxy: Option<ProxyConfiguration>,
    pub proxy_authenticator: Option<Arc<dyn ProxyAuthenticator>>,
    pub additional_config: AttributeMap,
}

impl Configuration {
    /// Start a configuration with the four feature toggles.
    pub fn builder(
        logs_enabled: bool,
        traces_enabled: bool,
        crash_reports_enabled: bool,
        rum_enabled: bool,
    ) -> ConfigurationBuilder {
        ConfigurationBuilder {
            config: Configuration {
                logs_enabled,
                traces_enabled,
                crash_reports_enabled,
                rum_enabled,
                site: DatadogSite::default(),
                rum_sample_rate: DEFAULT_SAMPLE_RATE,
                view_tracking_strategy: ViewTrackingStrategy::default(),
                long_task_threshold: None,
                first_party_hosts: Vec::new(),
                proxy: None,
                proxy_authenticator: None,
                additional_config: AttributeMap::new(),
            },
        }
    }

    pub fn endpoints(&self) -> SiteEndpoints {
        self.site.endpoints()
    }
}

/// Builder for [`Configuration`].
#[derive(Debug)]
pub struct ConfigurationBuilder {
    config: Configuration,
}

impl ConfigurationBuilder {
    pub fn use_site(mut self, site: DatadogSite) -> Self {
        self.config.site = site;
        self
    }

    pub fn sample_rum_sessions(mut self, sample_rate: f32) -> Self {
        self.config.rum_sample_rate = sample_rate;
        self
    }

    pub fn use_view_tracking_strategy(mut self, strategy: ViewTrackingStrategy) -> Self {
        self.config.view_tracking_strategy = strategy;
        self
    }

    pub fn track_long_tasks(mut self, threshold: Duration) -> Self {
        self.config.long_task_threshold = Some(threshold);
        self
    }

    pub fn set_first_party_hosts(mut self, hosts: Vec<String>) -> Self {
        self.config.first_party_hosts = hosts;
        self
    }

    pub fn set_proxy(
        mut self,
        proxy: ProxyConfiguration,
        authenticator: Option<Arc<dyn ProxyAuthenticator>>,
    ) -> Self {
        self.config.proxy = Some(proxy);
        self.config.proxy_authenticator = authenticator;
        self
    }

    pub fn set_additional_configuration(mut self, additional: AttributeMap) -> Self {
        self.config.additional_config = additional;
        self
    }

    pub fn build(self) -> Configuration {
        self.config
    }
}
