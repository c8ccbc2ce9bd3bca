//! Tracing setup for the binary.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

/// Install the global subscriber. Later calls are ignored.
pub fn init() {
    let filter = EnvFilter::new(std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_FILTER.into()));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
