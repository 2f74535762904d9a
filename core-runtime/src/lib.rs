//! # Core Runtime Module
//!
//! Foundational runtime pieces shared by the bridge crates:
//! - Host configuration record and its reserved keys
//! - Process-wide global attribute store
//! - Logging and diagnostics infrastructure
//!
//! ## Overview
//!
//! Nothing in here talks to the native SDK. The translation crate
//! (`core-bridge`) consumes these types and turns them into native calls.

pub mod attributes;
pub mod config;
pub mod error;
pub mod logging;

pub use attributes::GlobalAttributeStore;
pub use config::{BridgeConfiguration, BridgeConfigurationBuilder};
pub use error::{Error, Result};
