//! In-process native SDK core.

use bridge_traits::{
    configuration::{Configuration, Credentials, TrackingConsent, Verbosity},
    sdk::{NativeSdk, UserInfo},
    value::AttributeMap,
};
use core_runtime::logging::redact_if_sensitive;
use std::sync::{PoisonError, RwLock};
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
struct SdkState {
    verbosity: Option<Verbosity>,
    credentials: Option<Credentials>,
    configuration: Option<Configuration>,
    consent: Option<TrackingConsent>,
    rum_registered: bool,
    initialize_calls: usize,
    user: UserInfo,
    rum_global_attributes: AttributeMap,
}

/// Desktop stand-in for the native SDK singleton.
///
/// Keeps the state a real SDK would hold and reports every change through
/// `tracing`. Only the first `initialize` call takes effect; later calls
/// are counted and ignored.
#[derive(Debug, Default)]
pub struct DesktopSdk {
    state: RwLock<SdkState>,
}

impl DesktopSdk {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_initialized(&self) -> bool {
        self.read(|state| state.credentials.is_some())
    }

    /// Number of `initialize` calls received, including ignored ones.
    pub fn initialize_count(&self) -> usize {
        self.read(|state| state.initialize_calls)
    }

    pub fn is_rum_registered(&self) -> bool {
        self.read(|state| state.rum_registered)
    }

    pub fn verbosity(&self) -> Option<Verbosity> {
        self.read(|state| state.verbosity)
    }

    pub fn credentials(&self) -> Option<Credentials> {
        self.read(|state| state.credentials.clone())
    }

    pub fn configuration(&self) -> Option<Configuration> {
        self.read(|state| state.configuration.clone())
    }

    pub fn consent(&self) -> Option<TrackingConsent> {
        self.read(|state| state.consent)
    }

    pub fn user(&self) -> UserInfo {
        self.read(|state| state.user.clone())
    }

    pub fn rum_global_attributes(&self) -> AttributeMap {
        self.read(|state| state.rum_global_attributes.clone())
    }

    fn read<T>(&self, f: impl FnOnce(&SdkState) -> T) -> T {
        f(&self.state.read().unwrap_or_else(PoisonError::into_inner))
    }

    fn write<T>(&self, f: impl FnOnce(&mut SdkState) -> T) -> T {
        f(&mut self.state.write().unwrap_or_else(PoisonError::into_inner))
    }
}

impl NativeSdk for DesktopSdk {
    fn set_verbosity(&self, verbosity: Verbosity) {
        self.write(|state| state.verbosity = Some(verbosity));
        debug!(?verbosity, "SDK verbosity set");
    }

    fn initialize(
        &self,
        credentials: &Credentials,
        configuration: &Configuration,
        consent: TrackingConsent,
    ) {
        let initialized = self.write(|state| {
            state.initialize_calls += 1;
            if state.credentials.is_some() {
                return false;
            }
            state.credentials = Some(credentials.clone());
            state.configuration = Some(configuration.clone());
            state.consent = Some(consent);
            true
        });

        if !initialized {
            warn!("SDK already initialized, ignoring initialize call");
            return;
        }

        let endpoints = configuration.endpoints();
        info!(
            client_token = %redact_if_sensitive("client_token", &credentials.client_token),
            env = %credentials.env_name,
            service = credentials.service_name.as_deref().unwrap_or("<default>"),
            rum_endpoint = endpoints.rum,
            logs_endpoint = endpoints.logs,
            traces_enabled = configuration.traces_enabled,
            sample_rate = configuration.rum_sample_rate,
            proxy = configuration.proxy.is_some(),
            ?consent,
            "Desktop SDK initialized"
        );
    }

    fn register_rum_monitor(&self) {
        let initialized = self.write(|state| {
            if state.credentials.is_none() {
                return false;
            }
            state.rum_registered = true;
            true
        });

        if initialized {
            debug!("RUM monitor registered");
        } else {
            warn!("RUM monitor registration before SDK initialization, ignoring");
        }
    }

    fn set_user_info(&self, user: UserInfo) {
        debug!(
            has_id = user.id.is_some(),
            extra_info = user.extra_info.len(),
            "User info set"
        );
        self.write(|state| state.user = user);
    }

    fn add_rum_global_attributes(&self, attributes: AttributeMap) {
        self.write(|state| state.rum_global_attributes.extend(attributes));
    }

    fn set_tracking_consent(&self, consent: TrackingConsent) {
        self.write(|state| state.consent = Some(consent));
        debug!(?consent, "Tracking consent set");
    }
}
