//! Feature passthrough crate for the bridge workspace.
//!
//! Hosts depend on `dd-bridge-workspace` and pick features instead of wiring
//! each member crate. With `desktop-shims` (the default) the bridge façade is
//! re-exported together with the in-process desktop bindings.

#[cfg(feature = "desktop-shims")]
pub use core_service::{
    bootstrap_desktop, bootstrap_desktop_with_clock, CoreError, DdBridge, DesktopBridge,
    NativeBindings,
};
