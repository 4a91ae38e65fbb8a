//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → TracerConfig (validated)
//!     → apply.rs (levels + listener bindings pushed into a TraceRegistry)
//!
//! On file change:
//!     watcher.rs detects change, waits for the burst to settle
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → apply.rs re-applies; channels observe new levels immediately
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Reloads never detach listeners; only new bindings are added

pub mod apply;
pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use apply::{ApplySummary, ConfigApplier};
pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{ListenerConfig, ListenerKind, SourceConfig, TracerConfig};
pub use validation::ValidationError;
pub use watcher::{apply_updates, ConfigWatcher, ReloadStream};
