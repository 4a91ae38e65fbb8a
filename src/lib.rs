//! Composed, dynamically reconfigurable trace sources.
//!
//! A [`TraceRegistry`] maps a component's qualifying name (`A.B.C.Component`,
//! or a Rust type path) to a [`CompositeSource`] holding one named channel per
//! namespace level. Emitting through the composite reaches every level, root
//! first. Levels and listeners are configured by channel name, before or after
//! the channel exists:
//!
//! ```
//! use std::sync::Arc;
//! use tracer::{MemoryListener, SourceLevel, TraceRegistry};
//!
//! let registry = TraceRegistry::default();
//! let audit = Arc::new(MemoryListener::new("audit"));
//! registry.add_listener("app.payments", audit.clone());
//! registry.set_logging_level("app", SourceLevel::Warning);
//!
//! let source = registry.source_named("app.payments.Processor").unwrap();
//! source.trace_information("charged");
//! # if tracer::TRACE_ENABLED {
//! assert_eq!(audit.messages(), vec!["charged"]);
//! # }
//! ```

#[macro_use]
mod macros;

pub mod config;
pub mod error;
pub mod listeners;
pub mod observability;
pub mod registry;

pub use error::{TraceError, TraceResult};
pub use listeners::{FileListener, MemoryListener, SharedListener, TraceListener, TracingListener};
pub use registry::{
    current_activity, global, install_global, ActivityScope, Channel, ChannelFactory,
    CompositeSource, EventType, RegistrySettings, SourceIdentity, SourceLevel, TracePayload,
    TraceRecord, TraceRegistry,
};

/// False when the crate is built without the `trace` feature; emission is then a no-op.
pub const TRACE_ENABLED: bool = cfg!(feature = "trace");
