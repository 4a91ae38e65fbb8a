//! Structured logging setup.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "tracer=info";

/// Install a `tracing` subscriber with an env filter and a fmt layer.
///
/// `RUST_LOG` wins over `fallback`. Returns false if a global subscriber was
/// already installed.
pub fn init_logging(fallback: &str) -> bool {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| fallback.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}
