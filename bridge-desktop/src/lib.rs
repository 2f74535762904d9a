//! # Desktop Bridge Implementations
//!
//! In-process implementations of the native SDK traits for desktop hosts
//! (macOS, Windows, Linux) and for tests.
//!
//! ## Overview
//!
//! There is no native observability SDK on desktop. These types keep the
//! state the native singletons would keep and report through `tracing`:
//! - `NativeSdk` as [`DesktopSdk`]: credentials, configuration, user, consent
//! - `RumMonitor` as [`DesktopRumMonitor`]: view/action/resource lifecycle with timings
//! - `Tracer` as [`DesktopTracer`]: spans with random 64-bit ids
//! - `NativeLogger` as [`DesktopLogger`]: logs re-emitted under the `dd_logs` target
//!
//! Recorded events, spans and logs are kept in bounded buffers of
//! [`DEFAULT_HISTORY`] entries by default; the oldest entry is dropped when
//! a buffer is full. Hosts that consume them call the `drain_*` accessors.
//!
//! ## Usage
//!
//! ```
//! use std::sync::Arc;
//! use bridge_desktop::{DesktopRumMonitor, DesktopSdk};
//! use bridge_traits::SystemClock;
//!
//! let sdk = Arc::new(DesktopSdk::new());
//! let monitor = Arc::new(DesktopRumMonitor::new(Arc::new(SystemClock)));
//! assert!(!sdk.is_initialized());
//! assert!(monitor.events().is_empty());
//! ```

mod history;
mod logs;
mod rum;
mod sdk;
mod trace;

pub use history::DEFAULT_HISTORY;
pub use logs::{DesktopLogger, LogRecord};
pub use rum::{DesktopRumMonitor, RumEvent};
pub use sdk::DesktopSdk;
pub use trace::{DesktopTracer, FinishedSpan};
