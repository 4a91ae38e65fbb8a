//! Observability of the tracer itself.
//!
//! # Data Flow
//! ```text
//! registry, config applier, watcher:
//!     → logging.rs (structured `tracing` events about the tracer)
//!     → metrics.rs (counters: channels, sources, emitted events)
//! ```
//!
//! # Design Decisions
//! - Trace records go to listeners; only the tracer's own diagnostics use `tracing`
//! - Metrics go through the `metrics` facade; installing an exporter is up to the host

pub mod logging;
pub mod metrics;
