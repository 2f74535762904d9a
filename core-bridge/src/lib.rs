//! # Core Bridge
//!
//! Translation layer between a weakly-typed host (maps, strings, numbers)
//! and the strongly-typed native SDK traits in `bridge-traits`.
//!
//! ## Components
//!
//! - [`translator`] - Host configuration into native credentials and configuration
//! - [`consent`] - Tracking consent string resolution
//! - [`proxy`] - Basic proxy authentication
//! - [`sdk::DdSdk`] - Initialization, global attributes, user info, consent
//! - [`rum::DdRum`] - RUM views, actions, resources, errors and timings
//! - [`trace::DdTrace`] - Manual spans with explicit timestamps
//! - [`logs::DdLogs`] - Log forwarding
//!
//! Event paths never fail: unrecognized input falls back to a default and
//! emits a `tracing` diagnostic. Only [`sdk::DdSdk::initialize`] returns an
//! error, for a configuration the native SDK cannot start with.

pub mod consent;
pub mod logs;
pub mod proxy;
pub mod rum;
pub mod sdk;
pub mod trace;
pub mod translator;

pub use consent::resolve_consent;
pub use logs::DdLogs;
pub use proxy::BasicProxyAuthenticator;
pub use rum::DdRum;
pub use sdk::DdSdk;
pub use trace::{DdTrace, TracerSlot};
