//! Process-wide registry accessor.
//!
//! Libraries that cannot thread a registry through their call graph use
//! [`global()`]. Applications that want non-default settings call
//! [`install_global`] once at startup, before anything traces. Tests should
//! build their own [`TraceRegistry`] instead.

use std::sync::OnceLock;

use crate::error::{TraceError, TraceResult};
use crate::registry::trace_registry::TraceRegistry;

static GLOBAL: OnceLock<TraceRegistry> = OnceLock::new();

/// The process-wide registry, created with default settings on first use.
pub fn global() -> &'static TraceRegistry {
    GLOBAL.get_or_init(TraceRegistry::default)
}

/// Install `registry` as the process-wide registry.
///
/// Fails if `global()` was already called or a registry was already installed.
pub fn install_global(registry: TraceRegistry) -> TraceResult<()> {
    GLOBAL
        .set(registry)
        .map_err(|_| TraceError::GlobalAlreadyInstalled)
}
