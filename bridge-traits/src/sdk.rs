//! Native SDK Core Abstraction
//!
//! Narrow wrapper over the native SDK's process-wide entry points. The bridge
//! never calls the SDK singletons directly, only through this trait, so hosts
//! and tests can swap the implementation.

use crate::{
    configuration::{Configuration, Credentials, TrackingConsent, Verbosity},
    platform::PlatformSendSync,
    value::AttributeMap,
};

/// User identity attached to every event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserInfo {
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub extra_info: AttributeMap,
}

/// Native SDK entry points.
///
/// # Platform Support
///
/// - **Android**: JNI shim over the SDK's global `Datadog` object
/// - **iOS**: FFI shim over the SDK's global configuration
/// - **Desktop**: `bridge-desktop::DesktopSdk` (in-process reference)
pub trait NativeSdk: PlatformSendSync {
    fn set_verbosity(&self, verbosity: Verbosity);

    fn initialize(
        &self,
        credentials: &Credentials,
        configuration: &Configuration,
        consent: TrackingConsent,
    );

    /// Register the global RUM monitor. Must follow [`NativeSdk::initialize`].
    fn register_rum_monitor(&self);

    fn set_user_info(&self, user: UserInfo);

    fn add_rum_global_attributes(&self, attributes: AttributeMap);

    fn set_tracking_consent(&self, consent: TrackingConsent);
}
