//! Tracing subscriber setup.
//!
//! The library itself only emits `tracing` events. Binaries and demos call
//! [`init`] once to print them.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a formatted stderr subscriber.
///
/// `RUST_LOG` takes precedence over `default_directive` (for example
/// `"fluxion=trace"`). Calling this more than once, or after another
/// subscriber was installed, has no effect.
pub fn init(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .try_init();
}
