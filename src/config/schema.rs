//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files.
//!
//! ```toml
//! enabled = true
//! default_level = "information"
//!
//! [[listeners]]
//! name = "audit"
//! kind = "file"
//! path = "/var/log/app/audit.log"
//!
//! [[sources]]
//! name = "app.payments"
//! level = "verbose"
//! listeners = ["audit"]
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::registry::{RegistrySettings, SourceLevel};

/// Root configuration for a trace registry.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TracerConfig {
    /// Runtime tracing switch. Only read when the registry is constructed.
    pub enabled: bool,

    /// Threshold of channels without an explicit level.
    pub default_level: SourceLevel,

    /// Listener definitions, referenced by name from `sources`.
    pub listeners: Vec<ListenerConfig>,

    /// Per-channel settings.
    pub sources: Vec<SourceConfig>,
}

impl Default for TracerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            default_level: SourceLevel::Information,
            listeners: Vec::new(),
            sources: Vec::new(),
        }
    }
}

impl TracerConfig {
    /// Construction settings for a registry built from this config.
    pub fn registry_settings(&self) -> RegistrySettings {
        RegistrySettings {
            enabled: self.enabled,
            default_level: self.default_level,
        }
    }

    pub fn listener(&self, name: &str) -> Option<&ListenerConfig> {
        self.listeners.iter().find(|l| l.name == name)
    }
}

/// Kind of listener to construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListenerKind {
    /// Keeps records in memory.
    Memory,
    /// Forwards records to the `tracing` subscriber.
    Tracing,
    /// Appends records to `path`.
    File,
}

/// Listener definition.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ListenerConfig {
    /// Unique listener name.
    pub name: String,

    pub kind: ListenerKind,

    /// Output file, required for `kind = "file"`.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Settings for the channel named `name`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SourceConfig {
    /// Exact channel name, e.g. `app.payments`.
    pub name: String,

    /// Threshold to set. Left unchanged when absent.
    #[serde(default)]
    pub level: Option<SourceLevel>,

    /// Names of listeners to attach.
    #[serde(default)]
    pub listeners: Vec<String>,
}
