//! Trace listeners.
//!
//! # Data Flow
//! ```text
//! CompositeSource::trace_*
//!     → Channel (threshold check, root to leaf)
//!     → TraceListener::trace (attachment order)
//!         → memory.rs  (in-memory capture)
//!         → bridge.rs  (forward to the `tracing` subscriber)
//!         → file.rs    (append lines to a file)
//! ```
//!
//! # Design Decisions
//! - Listeners are shared (`Arc`) so one instance can sit on many channels
//! - Listeners own their I/O; channels never buffer

pub mod bridge;
pub mod file;
pub mod memory;

use std::sync::Arc;

use crate::registry::record::TraceRecord;

pub use bridge::TracingListener;
pub use file::FileListener;
pub use memory::MemoryListener;

/// Consumer of trace records attached to one or more channels.
pub trait TraceListener: Send + Sync {
    /// Name used in configuration and diagnostics.
    fn name(&self) -> &str;

    /// Handle a record that passed the channel threshold.
    fn trace(&self, record: &TraceRecord);

    fn flush(&self) {}
}

/// Listener handle as stored on channels.
pub type SharedListener = Arc<dyn TraceListener>;

/// Listener backed by a closure.
pub struct FnListener<F> {
    name: String,
    f: F,
}

impl<F> FnListener<F>
where
    F: Fn(&TraceRecord) + Send + Sync,
{
    pub fn new(name: &str, f: F) -> Self {
        Self {
            name: name.to_string(),
            f,
        }
    }
}

impl<F> TraceListener for FnListener<F>
where
    F: Fn(&TraceRecord) + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn trace(&self, record: &TraceRecord) {
        (self.f)(record)
    }
}
