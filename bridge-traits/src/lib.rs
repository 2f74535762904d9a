//! # Native SDK Bridge Traits
//!
//! The contract between the bridge's translation logic and the native
//! observability SDK it drives.
//!
//! ## Overview
//!
//! The native SDK exposes process-wide singletons (core SDK, RUM monitor,
//! tracer, log writer). Each one is reached through a narrow trait defined
//! here, together with the strongly-typed model those traits accept. The
//! translation crate (`core-bridge`) only ever speaks these types; weakly
//! typed host input never crosses this boundary.
//!
//! ## Traits
//!
//! ### Native SDK
//! - [`NativeSdk`](sdk::NativeSdk) - Initialization, user info, consent, RUM global attributes
//! - [`RumMonitor`](rum::RumMonitor) - View/action/resource/error lifecycle
//! - [`Tracer`](trace::Tracer) / [`NativeSpan`](trace::NativeSpan) - Spans with explicit timestamps
//! - [`NativeLogger`](logs::NativeLogger) - Uploaded log stream
//! - [`ProxyAuthenticator`](configuration::ProxyAuthenticator) - Proxy challenge answers
//!
//! ### Utilities
//! - [`Clock`](clock::Clock) - Millisecond time source, fixed under test
//! - [`DiagnosticSink`](diagnostics::DiagnosticSink) - Bridge diagnostics to host logging
//!
//! ## Platform Requirements
//!
//! | Platform | Implementation Crate | Status |
//! |----------|---------------------|--------|
//! | Desktop  | `bridge-desktop`    | ✅ Reference |
//! | Android  | host JNI shim       | 📋 Host-provided |
//! | iOS      | host FFI shim       | 📋 Host-provided |
//!
//! ## Thread Safety
//!
//! All traits require `Send + Sync` (via [`PlatformSendSync`](platform::PlatformSendSync))
//! on native targets so a single implementation can serve every host thread.

pub mod clock;
pub mod configuration;
pub mod diagnostics;
pub mod error;
pub mod logs;
pub mod platform;
pub mod rum;
pub mod sdk;
pub mod trace;
pub mod value;

pub use error::BridgeError;

// Re-export commonly used types
pub use configuration::{
    Configuration, ConfigurationBuilder, Credentials, DatadogSite, ProxyAuthenticator,
    ProxyChallenge, ProxyConfiguration, ProxyType, SiteEndpoints, TrackingConsent, Verbosity,
    ViewTrackingStrategy, DEFAULT_SAMPLE_RATE,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use diagnostics::{Diagnostic, DiagnosticSink, LogLevel};
pub use logs::{LogSeverity, NativeLogger};
pub use rum::{RumActionType, RumErrorSource, RumMonitor, RumResourceKind, INTERNAL_TIMESTAMP};
pub use sdk::{NativeSdk, UserInfo};
pub use trace::{NativeSpan, SpanContext, Tracer};
pub use value::{attributes_from_json, AttributeMap, AttributeValue, TagValue};
