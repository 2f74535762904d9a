//! # SDK Forwarder
//!
//! Process-wide entry points: initialization, global attributes, user info
//! and tracking consent.

use std::sync::Arc;

use bridge_traits::sdk::{NativeSdk, UserInfo};
use bridge_traits::value::AttributeMap;
use core_runtime::logging::redact_if_sensitive;
use core_runtime::{BridgeConfiguration, GlobalAttributeStore, Result};
use tracing::{debug, info};

use crate::consent::resolve_consent;
use crate::translator::{build_configuration, build_credentials, build_verbosity};

const USER_ID: &str = "id";
const USER_NAME: &str = "name";
const USER_EMAIL: &str = "email";

/// Host-facing SDK entry points.
#[derive(Clone)]
pub struct DdSdk {
    native: Arc<dyn NativeSdk>,
    globals: Arc<GlobalAttributeStore>,
}

impl DdSdk {
    pub fn new(native: Arc<dyn NativeSdk>, globals: Arc<GlobalAttributeStore>) -> Self {
        Self { native, globals }
    }

    pub fn globals(&self) -> &Arc<GlobalAttributeStore> {
        &self.globals
    }

    /// Initialize the native SDK and register the RUM monitor.
    ///
    /// Verbosity is applied before initialization so the SDK's own startup
    /// diagnostics honor it.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration has no client token.
    pub fn initialize(&self, configuration: &BridgeConfiguration) -> Result<()> {
        configuration.validate()?;

        let credentials = build_credentials(configuration);
        let native_configuration = build_configuration(configuration);
        let consent = resolve_consent(configuration.tracking_consent.as_deref());

        if let Some(verbosity) = build_verbosity(configuration) {
            self.native.set_verbosity(verbosity);
        }

        self.native
            .initialize(&credentials, &native_configuration, consent);
        self.native.register_rum_monitor();

        info!(
            client_token = %redact_if_sensitive("client_token", &credentials.client_token),
            env = %credentials.env_name,
            site = ?native_configuration.site,
            consent = ?consent,
            traces_enabled = native_configuration.traces_enabled,
            "Native SDK initialized"
        );
        Ok(())
    }

    /// Add global attributes to every subsequent RUM event, log and span.
    pub fn set_attributes(&self, attributes: &AttributeMap) {
        self.native.add_rum_global_attributes(attributes.clone());
        self.globals.extend(attributes);
        debug!(count = attributes.len(), "Global attributes updated");
    }

    /// Set user info.
    ///
    /// `id`, `name` and `email` are lifted out of the map (non-string values
    /// are stringified); remaining entries become extra info.
    pub fn set_user(&self, user: &AttributeMap) {
        let mut extra_info = user.clone();
        let id = take_string(&mut extra_info, USER_ID);
        let name = take_string(&mut extra_info, USER_NAME);
        let email = take_string(&mut extra_info, USER_EMAIL);

        self.native.set_user_info(UserInfo {
            id,
            name,
            email,
            extra_info,
        });
    }

    pub fn set_tracking_consent(&self, consent: &str) {
        let consent = resolve_consent(Some(consent));
        self.native.set_tracking_consent(consent);
        debug!(consent = ?consent, "Tracking consent updated");
    }
}

fn take_string(map: &mut AttributeMap, key: &str) -> Option<String> {
    map.remove(key).and_then(|value| value.to_string_lossy())
}
