//! Applying configuration to a registry.
//!
//! Levels are pushed on every apply. Listener bindings are applied at most once
//! per `(source, listener)` pair because listeners cannot be detached, so a
//! reload that repeats a binding does not double-deliver.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError};

use arc_swap::ArcSwap;

use crate::config::schema::{ListenerConfig, ListenerKind, TracerConfig};
use crate::error::{TraceError, TraceResult};
use crate::listeners::{FileListener, MemoryListener, SharedListener, TracingListener};
use crate::registry::TraceRegistry;

/// What a single `apply` changed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ApplySummary {
    pub levels_set: usize,
    pub listeners_created: usize,
    pub bindings_added: usize,
}

/// Applies [`TracerConfig`]s to a registry and remembers what it attached.
pub struct ConfigApplier {
    current: ArcSwap<TracerConfig>,
    listeners: Mutex<HashMap<String, SharedListener>>,
    bindings: Mutex<HashSet<(String, String)>>,
}

impl Default for ConfigApplier {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigApplier {
    pub fn new() -> Self {
        Self {
            current: ArcSwap::from_pointee(TracerConfig::default()),
            listeners: Mutex::new(HashMap::new()),
            bindings: Mutex::new(HashSet::new()),
        }
    }

    /// The most recently applied configuration.
    pub fn current(&self) -> Arc<TracerConfig> {
        self.current.load_full()
    }

    /// Listener instance built for `name`, if any.
    pub fn listener(&self, name: &str) -> Option<SharedListener> {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// Apply `config` to `registry`.
    ///
    /// Listener construction happens first; if it fails the registry is left
    /// untouched. `enabled` and `default_level` only matter at registry
    /// construction and are not re-applied here.
    pub fn apply(&self, registry: &TraceRegistry, config: &TracerConfig) -> TraceResult<ApplySummary> {
        let mut summary = ApplySummary::default();
        let mut listeners = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);

        let mut created = Vec::new();
        for listener_config in &config.listeners {
            if listeners.contains_key(&listener_config.name) {
                continue;
            }
            created.push((listener_config.name.clone(), build_listener(listener_config)?));
        }
        summary.listeners_created = created.len();
        listeners.extend(created);

        let mut bindings = self.bindings.lock().unwrap_or_else(PoisonError::into_inner);
        for source in &config.sources {
            if let Some(level) = source.level {
                registry.set_logging_level(&source.name, level);
                summary.levels_set += 1;
            }
            for listener_name in &source.listeners {
                let Some(listener) = listeners.get(listener_name) else {
                    tracing::warn!(source = %source.name, listener = %listener_name, "Skipping unknown listener");
                    continue;
                };
                if bindings.insert((source.name.clone(), listener_name.clone())) {
                    registry.add_listener(&source.name, Arc::clone(listener));
                    summary.bindings_added += 1;
                }
            }
        }

        self.current.store(Arc::new(config.clone()));
        tracing::info!(
            levels = summary.levels_set,
            listeners = summary.listeners_created,
            bindings = summary.bindings_added,
            "Tracer configuration applied"
        );
        Ok(summary)
    }
}

/// Build a listener from its definition.
pub fn build_listener(config: &ListenerConfig) -> TraceResult<SharedListener> {
    let listener: SharedListener = match config.kind {
        ListenerKind::Memory => Arc::new(MemoryListener::new(&config.name)),
        ListenerKind::Tracing => Arc::new(TracingListener::new(&config.name)),
        ListenerKind::File => {
            let path = config.path.as_deref().ok_or_else(|| TraceError::InvalidListener {
                name: config.name.clone(),
                reason: "file listener has no path".to_string(),
            })?;
            Arc::new(FileListener::open(&config.name, path)?)
        }
    };
    Ok(listener)
}
