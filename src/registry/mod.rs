//! Trace source registry subsystem.
//!
//! # Data Flow
//! ```text
//! qualifying name ("A.B.Component" or a Rust type path)
//!     → identity.rs (segments, cumulative channel names)
//!     → trace_registry.rs (composite cache, channel cache, pending config)
//!     → channel.rs (one named channel per cumulative name)
//!     → composite.rs (root-to-leaf fan-out of trace calls)
//!
//! add_listener / set_logging_level (by channel name):
//!     → applied to the cached channel if it exists
//!     → recorded as pending for a channel created later
//! ```
//!
//! # Design Decisions
//! - Channels are shared between composites, so configuration is retroactive
//! - Nothing is ever evicted; listeners are never detached
//! - A registry is an ordinary value; `global()` is only a convenience
//! - Records pick up the thread's current activity (see `activity.rs`)

pub mod activity;
pub mod channel;
pub mod composite;
pub mod global;
pub mod identity;
pub mod level;
pub mod record;
pub mod trace_registry;

pub use activity::{current_activity, ActivityScope};
pub use channel::{Channel, ChannelFactory, DefaultChannelFactory};
pub use composite::CompositeSource;
pub use global::{global, install_global};
pub use identity::SourceIdentity;
pub use level::{EventType, SourceLevel};
pub use record::{TracePayload, TraceRecord};
pub use trace_registry::{RegistrySettings, TraceRegistry};
