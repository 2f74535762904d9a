//! Bridge façade and bootstrap helpers.
//!
//! This crate wires host-provided native SDK implementations (core SDK, RUM
//! monitor, tracer, log writer) into the forwarders of `core-bridge`, all
//! sharing one global attribute store. Desktop apps and tests typically
//! enable the `desktop-shims` feature (which depends on `bridge-desktop`);
//! mobile hosts pass their own bindings to [`DdBridge::new`].

pub mod error;

pub use error::{CoreError, Result};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use bridge_traits::{
    clock::{Clock, SystemClock},
    logs::NativeLogger,
    rum::RumMonitor,
    sdk::NativeSdk,
    trace::Tracer,
};
use core_bridge::{DdLogs, DdRum, DdSdk, DdTrace, TracerSlot};
use core_runtime::{BridgeConfiguration, GlobalAttributeStore};
use tracing::info;

#[cfg(feature = "desktop-shims")]
use bridge_desktop::{DesktopLogger, DesktopRumMonitor, DesktopSdk, DesktopTracer};

/// Builds the native tracer once the SDK is up.
pub type TracerProvider = Arc<dyn Fn() -> Arc<dyn Tracer> + Send + Sync>;

/// Aggregated handle to all native bindings the bridge requires.
#[derive(Clone)]
pub struct NativeBindings {
    pub sdk: Arc<dyn NativeSdk>,
    pub rum_monitor: Arc<dyn RumMonitor>,
    pub logger: Arc<dyn NativeLogger>,
    pub tracer_provider: TracerProvider,
    pub clock: Arc<dyn Clock>,
}

impl NativeBindings {
    /// Construct a binding bundle from explicit native handles, using the
    /// system clock.
    pub fn new(
        sdk: Arc<dyn NativeSdk>,
        rum_monitor: Arc<dyn RumMonitor>,
        logger: Arc<dyn NativeLogger>,
        tracer_provider: TracerProvider,
    ) -> Self {
        Self {
            sdk,
            rum_monitor,
            logger,
            tracer_provider,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}

/// Primary façade exposed to host applications.
#[derive(Clone)]
pub struct DdBridge {
    sdk: DdSdk,
    rum: DdRum,
    trace: Arc<DdTrace>,
    logs: DdLogs,
    globals: Arc<GlobalAttributeStore>,
    initialized: Arc<AtomicBool>,
}

impl DdBridge {
    /// Create a bridge from the provided native bindings.
    pub fn new(bindings: NativeBindings) -> Self {
        let globals = Arc::new(GlobalAttributeStore::new());
        let initialized = Arc::new(AtomicBool::new(false));

        let provider = bindings.tracer_provider;
        let tracer = TracerSlot::gated(Arc::clone(&initialized), move || provider());

        Self {
            sdk: DdSdk::new(bindings.sdk, Arc::clone(&globals)),
            rum: DdRum::new(bindings.rum_monitor, bindings.clock),
            trace: Arc::new(DdTrace::new(tracer, Arc::clone(&globals))),
            logs: DdLogs::new(bindings.logger, Arc::clone(&globals)),
            globals,
            initialized,
        }
    }

    /// Initialize the native SDK.
    ///
    /// Every call is forwarded, so calling it again re-initializes the
    /// native SDK with the new configuration. The native tracer becomes
    /// available after the first successful call.
    ///
    /// # Errors
    ///
    /// Fails if the configuration is rejected; the native SDK is not
    /// touched in that case.
    pub fn initialize(&self, configuration: &BridgeConfiguration) -> Result<()> {
        if self.is_initialized() {
            info!("Re-initializing native SDK");
        }
        self.sdk.initialize(configuration)?;
        self.initialized.store(true, Ordering::Release);
        Ok(())
    }

    /// Decode a host JSON configuration and initialize with it.
    pub fn initialize_json(&self, json: &str) -> Result<()> {
        let configuration = BridgeConfiguration::from_json(json)?;
        self.initialize(&configuration)
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    pub fn sdk(&self) -> &DdSdk {
        &self.sdk
    }

    pub fn rum(&self) -> &DdRum {
        &self.rum
    }

    pub fn trace(&self) -> &DdTrace {
        &self.trace
    }

    pub fn logs(&self) -> &DdLogs {
        &self.logs
    }

    pub fn globals(&self) -> &Arc<GlobalAttributeStore> {
        &self.globals
    }
}

/// Bridge wired to the in-process desktop implementations, with direct
/// handles on them for inspection.
#[cfg(feature = "desktop-shims")]
#[derive(Clone)]
pub struct DesktopBridge {
    pub bridge: DdBridge,
    pub sdk: Arc<DesktopSdk>,
    pub rum_monitor: Arc<DesktopRumMonitor>,
    pub tracer: Arc<DesktopTracer>,
    pub logger: Arc<DesktopLogger>,
}

/// Convenience bootstrapper for desktop hosts.
///
/// ```
/// # #[cfg(feature = "desktop-shims")]
/// # fn example() -> core_service::Result<()> {
/// use core_service::bootstrap_desktop;
///
/// let desktop = bootstrap_desktop();
/// desktop
///     .bridge
///     .initialize_json(r#"{"clientToken":"pub1234","env":"dev"}"#)?;
/// assert!(desktop.sdk.is_initialized());
/// # Ok(())
/// # }
/// ```
#[cfg(feature = "desktop-shims")]
pub fn bootstrap_desktop() -> DesktopBridge {
    bootstrap_desktop_with_clock(Arc::new(SystemClock))
}

/// Desktop bootstrap with an explicit clock, for deterministic hosts and
/// tests.
#[cfg(feature = "desktop-shims")]
pub fn bootstrap_desktop_with_clock(clock: Arc<dyn Clock>) -> DesktopBridge {
    let sdk = Arc::new(DesktopSdk::new());
    let rum_monitor = Arc::new(DesktopRumMonitor::new(Arc::clone(&clock)));
    let tracer = Arc::new(DesktopTracer::new());
    let logger = Arc::new(DesktopLogger::new());

    let provided = Arc::clone(&tracer);
    let bindings = NativeBindings::new(
        sdk.clone(),
        rum_monitor.clone(),
        logger.clone(),
        Arc::new(move || Arc::clone(&provided) as Arc<dyn Tracer>),
    )
    .with_clock(clock);

    DesktopBridge {
        bridge: DdBridge::new(bindings),
        sdk,
        rum_monitor,
        tracer,
        logger,
    }
}
